//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Retouch types,
//! handling the conversion between Rust and JavaScript data representations.

use retouch_core::raster::{ImageError, RasterImage};
use wasm_bindgen::prelude::*;

/// An RGB image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
///
/// The `free()` method can be called to explicitly release WASM memory, but this is
/// optional as wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
pub struct JsRasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRasterImage {
    /// Create a new JsRasterImage from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRasterImage {
        JsRasterImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3 for RGB)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsRasterImage {
    pub(crate) fn from_raster(img: RasterImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Convert to a core RasterImage, validating the buffer length.
    ///
    /// Note: This clones the pixel data.
    pub(crate) fn to_raster(&self) -> Result<RasterImage, ImageError> {
        RasterImage::try_new(self.width, self.height, self.pixels.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_raster_image_creation() {
        let img = JsRasterImage::new(100, 50, vec![0u8; 100 * 50 * 3]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 15000);
    }

    #[test]
    fn test_js_raster_image_pixels() {
        let pixels = vec![255u8, 128, 64, 32, 16, 8]; // 2 RGB pixels
        let img = JsRasterImage::new(2, 1, pixels.clone());
        assert_eq!(img.pixels(), pixels);
    }

    #[test]
    fn test_from_raster() {
        let raster = RasterImage::filled(200, 100, [1, 2, 3]);
        let js_img = JsRasterImage::from_raster(raster);
        assert_eq!(js_img.width(), 200);
        assert_eq!(js_img.height(), 100);
        assert_eq!(js_img.byte_length(), 60000);
    }

    #[test]
    fn test_to_raster() {
        let js_img = JsRasterImage::new(50, 25, vec![128u8; 50 * 25 * 3]);
        let raster = js_img.to_raster().unwrap();
        assert_eq!(raster, RasterImage::filled(50, 25, [128, 128, 128]));
    }

    #[test]
    fn test_to_raster_rejects_short_buffer() {
        let js_img = JsRasterImage::new(4, 4, vec![0u8; 10]);
        assert!(matches!(
            js_img.to_raster(),
            Err(ImageError::InvalidPixelData {
                expected: 48,
                actual: 10
            })
        ));
    }
}
