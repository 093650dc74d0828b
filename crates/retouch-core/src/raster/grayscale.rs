//! Grayscale conversion using ITU-R BT.709 luminance.
//!
//! The output stays RGB with the luminance replicated into all three
//! channels. Converting an already-gray image therefore yields an identical
//! raster, which the history treats as a redundant push.

use super::RasterImage;

/// ITU-R BT.709 coefficient for red channel in luminance calculation.
pub const LUMINANCE_R: f32 = 0.2126;

/// ITU-R BT.709 coefficient for green channel in luminance calculation.
pub const LUMINANCE_G: f32 = 0.7152;

/// ITU-R BT.709 coefficient for blue channel in luminance calculation.
pub const LUMINANCE_B: f32 = 0.0722;

/// Calculate luminance from u8 RGB values (0 to 255).
#[inline]
pub fn calculate_luminance_u8(r: u8, g: u8, b: u8) -> u8 {
    let lum = LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32;
    lum.clamp(0.0, 255.0).round() as u8
}

/// Return a grayscale copy of `image`.
pub fn to_grayscale(image: &RasterImage) -> RasterImage {
    let mut pixels = Vec::with_capacity(image.pixels.len());
    for chunk in image.pixels.chunks_exact(3) {
        let lum = calculate_luminance_u8(chunk[0], chunk[1], chunk[2]);
        pixels.extend_from_slice(&[lum, lum, lum]);
    }
    RasterImage {
        width: image.width,
        height: image.height,
        pixels,
    }
}
