//! Decoding and encoding between files/bytes and [`RasterImage`].
//!
//! Decoding sniffs the format from the content, so PNG, JPEG and GIF inputs
//! all work regardless of their file extension. Encoding writes PNG or
//! JPEG, chosen from the output path when saving to disk.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageReader};

use super::{ImageError, OutputFormat, RasterImage};

/// JPEG quality used when the caller doesn't specify one.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Decode an image from bytes.
///
/// # Errors
///
/// Returns `ImageError::InvalidFormat` if the format cannot be recognized,
/// or `ImageError::CorruptedFile` if decoding fails part-way.
pub fn decode(bytes: &[u8]) -> Result<RasterImage, ImageError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ImageError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(ImageError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| ImageError::CorruptedFile(e.to_string()))?;

    Ok(RasterImage::from_rgb_image(img.into_rgb8()))
}

/// Read and decode an image file.
pub fn open(path: &Path) -> Result<RasterImage, ImageError> {
    let bytes = std::fs::read(path)
        .map_err(|e| ImageError::IoError(format!("{}: {}", path.display(), e)))?;
    decode(&bytes)
}

/// Encode an image in the given format.
///
/// `quality` only applies to JPEG and is clamped to 1-100.
///
/// # Errors
///
/// Returns an error if the image has a zero dimension, if the pixel buffer
/// doesn't match the dimensions, or if the encoder fails.
pub fn encode(image: &RasterImage, format: OutputFormat, quality: u8) -> Result<Vec<u8>, ImageError> {
    let (width, height) = (image.width, image.height);
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if image.pixels.len() != expected {
        return Err(ImageError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    let result = match format {
        OutputFormat::Png => PngEncoder::new(&mut buffer).write_image(
            &image.pixels,
            width,
            height,
            ExtendedColorType::Rgb8,
        ),
        OutputFormat::Jpeg => JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
            .write_image(&image.pixels, width, height, ExtendedColorType::Rgb8),
    };
    result.map_err(|e| ImageError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode and write an image, picking the format from the path's extension.
pub fn save(image: &RasterImage, path: &Path, quality: u8) -> Result<(), ImageError> {
    let format = OutputFormat::from_path(path)?;
    let bytes = encode(image, format, quality)?;
    std::fs::write(path, bytes)
        .map_err(|e| ImageError::IoError(format!("{}: {}", path.display(), e)))
}
