//! Cropping by source-space pixel box.
//!
//! The box comes from [`crate::viewport::compute_crop_box`] and is half-open:
//! `left..right` columns and `top..bottom` rows.

use super::{ImageError, RasterImage};
use crate::viewport::CropBox;

/// Copy the pixels inside `crop` into a new image.
///
/// The box is clamped to the image bounds first.
///
/// # Errors
///
/// Returns `ImageError::InvalidDimensions` if nothing of the box lies inside
/// the image.
pub fn crop(image: &RasterImage, crop: CropBox) -> Result<RasterImage, ImageError> {
    let right = crop.right.min(image.width);
    let bottom = crop.bottom.min(image.height);
    let left = crop.left.min(right);
    let top = crop.top.min(bottom);

    let out_width = right - left;
    let out_height = bottom - top;
    if out_width == 0 || out_height == 0 {
        return Err(ImageError::InvalidDimensions {
            width: out_width,
            height: out_height,
        });
    }

    // Fast path: full crop returns a clone
    if left == 0 && top == 0 && right == image.width && bottom == image.height {
        return Ok(image.clone());
    }

    let src_stride = image.width as usize * 3;
    let row_len = out_width as usize * 3;
    let mut output = Vec::with_capacity(row_len * out_height as usize);

    // Copy pixel data row by row
    for y in top..bottom {
        let start = y as usize * src_stride + left as usize * 3;
        let row = image
            .pixels
            .get(start..start + row_len)
            .ok_or_else(|| ImageError::CorruptedFile("Pixel buffer too short".to_string()))?;
        output.extend_from_slice(row);
    }

    Ok(RasterImage::new(out_width, out_height, output))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> RasterImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.push(v); // R
                pixels.push(v); // G
                pixels.push(v); // B
            }
        }
        RasterImage::new(width, height, pixels)
    }

    #[test]
    fn test_full_crop() {
        let img = test_image(100, 100);
        let result = crop(&img, CropBox::new(0, 0, 100, 100)).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_center_crop() {
        let img = test_image(10, 10);
        let result = crop(&img, CropBox::new(2, 2, 8, 8)).unwrap();

        assert_eq!(result.width, 6);
        assert_eq!(result.height, 6);

        // Value at (2, 2) = (2 * 10 + 2) % 256 = 22
        assert_eq!(result.pixels[0], 22);
        // Last pixel comes from (7, 7) = 77
        assert_eq!(result.pixel(5, 5), Some([77, 77, 77]));
    }

    #[test]
    fn test_crop_clamps_to_bounds() {
        let img = test_image(10, 10);
        let result = crop(&img, CropBox::new(8, 8, 50, 50)).unwrap();

        assert_eq!(result.width, 2);
        assert_eq!(result.height, 2);
        assert_eq!(result.pixels[0], 88);
    }

    #[test]
    fn test_crop_outside_image() {
        let img = test_image(10, 10);
        let result = crop(&img, CropBox::new(20, 20, 30, 30));
        assert!(matches!(result, Err(ImageError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_crop_empty_box() {
        let img = test_image(10, 10);
        let result = crop(&img, CropBox::new(4, 4, 4, 9));
        assert!(matches!(result, Err(ImageError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_crop_rectangular() {
        let img = test_image(200, 100);
        let result = crop(&img, CropBox::new(0, 0, 50, 100)).unwrap();

        assert_eq!(result.width, 50);
        assert_eq!(result.height, 100);
        assert_eq!(result.pixels.len(), 50 * 100 * 3);
    }

    #[test]
    fn test_single_pixel_crop() {
        let img = test_image(10, 10);
        let result = crop(&img, CropBox::new(3, 3, 4, 4)).unwrap();
        assert_eq!(result.pixels, vec![33, 33, 33]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
