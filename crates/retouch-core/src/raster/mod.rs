//! In-memory RGB rasters and the pixel operations the editor applies to them.
//!
//! This module provides:
//! - Decoding PNG, JPEG and GIF from bytes or files
//! - Encoding to PNG or JPEG
//! - Resizing, grayscale conversion and cropping
//!
//! Every operation returns a new [`RasterImage`]; nothing mutates its input.
//! That is what lets the history hold each state as an immutable snapshot.
//!
//! # Examples
//!
//! ```ignore
//! use retouch_core::raster::{self, FilterType};
//!
//! let image = raster::open("photo.jpg".as_ref()).unwrap();
//! let half = raster::resize(&image, image.width / 2, image.height / 2, FilterType::Lanczos3).unwrap();
//! println!("Resized to {}x{}", half.width, half.height);
//! ```

mod codec;
mod crop;
mod grayscale;
mod resize;
mod types;

pub use codec::{decode, encode, open, save, DEFAULT_JPEG_QUALITY};
pub use crop::crop;
pub use grayscale::{calculate_luminance_u8, to_grayscale};
pub use resize::resize;
pub use types::{FilterType, ImageError, OutputFormat, RasterImage};
