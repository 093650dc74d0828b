//! The image-processing capability the editing core depends on.
//!
//! The history and viewport code never touch pixels. Everything that does
//! (opening, saving, resizing, grayscale, cropping) goes through
//! [`ImageOps`], and every method returns a freshly built image.
//! [`RasterOps`] is the implementation backed by the `image` crate.

use std::path::Path;

use crate::raster::{self, FilterType, ImageError, RasterImage, DEFAULT_JPEG_QUALITY};
use crate::viewport::{CropBox, Size};

/// Pixel-level operations on an opaque image type.
pub trait ImageOps {
    /// The image value. Equality must be structural, since the history uses
    /// it to skip redundant pushes.
    type Image: Clone + PartialEq;

    fn open(&self, path: &Path) -> Result<Self::Image, ImageError>;

    fn decode(&self, bytes: &[u8]) -> Result<Self::Image, ImageError>;

    fn save(&self, image: &Self::Image, path: &Path) -> Result<(), ImageError>;

    fn resize(&self, image: &Self::Image, width: u32, height: u32)
        -> Result<Self::Image, ImageError>;

    fn to_grayscale(&self, image: &Self::Image) -> Self::Image;

    fn crop(&self, image: &Self::Image, crop: CropBox) -> Result<Self::Image, ImageError>;

    fn size(&self, image: &Self::Image) -> Size;
}

/// [`ImageOps`] over [`RasterImage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterOps {
    pub filter: FilterType,
    pub jpeg_quality: u8,
}

impl Default for RasterOps {
    fn default() -> Self {
        Self {
            filter: FilterType::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl RasterOps {
    pub fn new(filter: FilterType) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }
}

impl ImageOps for RasterOps {
    type Image = RasterImage;

    fn open(&self, path: &Path) -> Result<RasterImage, ImageError> {
        raster::open(path)
    }

    fn decode(&self, bytes: &[u8]) -> Result<RasterImage, ImageError> {
        raster::decode(bytes)
    }

    fn save(&self, image: &RasterImage, path: &Path) -> Result<(), ImageError> {
        raster::save(image, path, self.jpeg_quality)
    }

    fn resize(&self, image: &RasterImage, width: u32, height: u32) -> Result<RasterImage, ImageError> {
        raster::resize(image, width, height, self.filter)
    }

    fn to_grayscale(&self, image: &RasterImage) -> RasterImage {
        raster::to_grayscale(image)
    }

    fn crop(&self, image: &RasterImage, crop: CropBox) -> Result<RasterImage, ImageError> {
        raster::crop(image, crop)
    }

    fn size(&self, image: &RasterImage) -> Size {
        image.size()
    }
}
