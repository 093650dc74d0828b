//! Core raster types.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::viewport::Size;

/// Error types for raster operations.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The bytes are not a recognized or supported image.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image data is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The requested output format cannot be written.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Width or height is zero where a real image is required.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data length doesn't match the declared dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Encoding to the output format failed.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Filter type for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    #[default]
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// File formats the editor can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Pick the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ImageError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        ext.parse()
    }
}

impl FromStr for OutputFormat {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            other => Err(ImageError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Png => f.write_str("png"),
            OutputFormat::Jpeg => f.write_str("jpeg"),
        }
    }
}

/// An RGB raster held fully in memory.
///
/// Equality is structural: two rasters are equal when their dimensions and
/// every pixel match. The history relies on this to skip redundant pushes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// Create a new RasterImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a RasterImage, checking that the buffer matches the dimensions.
    pub fn try_new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, ImageError> {
        let expected = (width as usize) * (height as usize) * 3;
        if pixels.len() != expected {
            return Err(ImageError::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A uniformly colored image.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let pixels = rgb
            .iter()
            .copied()
            .cycle()
            .take((width as usize) * (height as usize) * 3)
            .collect();
        Self::new(width, height, pixels)
    }

    /// Create a RasterImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbImage for further processing.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// RGB value at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 3;
        match self.pixels.get(idx..idx + 3)? {
            &[r, g, b] => Some([r, g, b]),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_type_conversion() {
        assert!(matches!(
            FilterType::Nearest.to_image_filter(),
            image::imageops::FilterType::Nearest
        ));
        assert!(matches!(
            FilterType::Bilinear.to_image_filter(),
            image::imageops::FilterType::Triangle
        ));
        assert!(matches!(
            FilterType::Lanczos3.to_image_filter(),
            image::imageops::FilterType::Lanczos3
        ));
    }

    #[test]
    fn test_filter_default_is_lanczos() {
        assert_eq!(FilterType::default(), FilterType::Lanczos3);
    }

    #[test]
    fn test_output_format_from_path() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out/photo.PNG")).unwrap(),
            OutputFormat::Png
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("photo.jpg")).unwrap(),
            OutputFormat::Jpeg
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("photo.jpeg")).unwrap(),
            OutputFormat::Jpeg
        );
        assert!(matches!(
            OutputFormat::from_path(Path::new("photo.bmp")),
            Err(ImageError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            OutputFormat::from_path(Path::new("photo")),
            Err(ImageError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_raster_image_creation() {
        let img = RasterImage::new(100, 50, vec![0u8; 100 * 50 * 3]);

        assert_eq!(img.size(), Size::new(100, 50));
        assert_eq!(img.pixel_count(), 5000);
        assert_eq!(img.byte_size(), 15000);
        assert!(!img.is_empty());
    }

    #[test]
    fn test_raster_image_empty() {
        let img = RasterImage::new(0, 0, vec![]);
        assert!(img.is_empty());
    }

    #[test]
    fn test_try_new_rejects_mismatched_buffer() {
        let result = RasterImage::try_new(10, 10, vec![0u8; 10]);
        assert!(matches!(
            result,
            Err(ImageError::InvalidPixelData {
                expected: 300,
                actual: 10
            })
        ));
    }

    #[test]
    fn test_filled_and_pixel_lookup() {
        let img = RasterImage::filled(3, 2, [10, 20, 30]);
        assert_eq!(img.pixel(2, 1), Some([10, 20, 30]));
        assert_eq!(img.pixel(3, 0), None);
    }

    #[test]
    fn test_pixel_with_short_buffer() {
        let img = RasterImage {
            width: 2,
            height: 2,
            pixels: vec![1, 2, 3, 4, 5, 6, 7],
        };
        assert_eq!(img.pixel(1, 0), Some([4, 5, 6]));
        assert_eq!(img.pixel(0, 1), None);
        assert_eq!(img.pixel(1, 1), None);
    }

    #[test]
    fn test_structural_equality() {
        let a = RasterImage::filled(4, 4, [1, 2, 3]);
        let b = RasterImage::filled(4, 4, [1, 2, 3]);
        let c = RasterImage::filled(4, 4, [1, 2, 4]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_image_error_display() {
        let err = ImageError::UnsupportedFormat("bmp".to_string());
        assert_eq!(err.to_string(), "Unsupported output format: bmp");

        let err = ImageError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }
}
