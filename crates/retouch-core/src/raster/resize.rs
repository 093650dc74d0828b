//! Image resizing for edits and display copies.
//!
//! All functions return new `RasterImage` instances without modifying the input.

use super::{FilterType, ImageError, RasterImage};

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `ImageError::InvalidDimensions` if either target dimension is zero,
/// or `ImageError::CorruptedFile` if the pixel buffer doesn't match the image
/// dimensions.
pub fn resize(
    image: &RasterImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<RasterImage, ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| ImageError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(RasterImage::from_rgb_image(resized))
}
