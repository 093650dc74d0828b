//! Retouch Core - editing state for a single-image editor
//!
//! This crate holds everything an image editor needs besides its widgets:
//! a bounded undo/redo history, the mapping between the on-screen copy and
//! the full-resolution image, the crop drag gesture, slider debouncing, and
//! the raster operations themselves.
//!
//! [`EditSession`] ties these together. A GUI (or the WASM bindings in
//! `retouch-wasm`) forwards user actions to it and renders what it returns.

pub mod config;
pub mod debounce;
pub mod gesture;
pub mod history;
pub mod ops;
pub mod raster;
pub mod session;
pub mod viewport;

pub use config::{ConfigError, EditorConfig};
pub use debounce::Debouncer;
pub use gesture::{CropGesture, GestureOutcome};
pub use history::{HistoryLog, HistoryStatus, Step, DEFAULT_HISTORY_CAPACITY};
pub use ops::{ImageOps, RasterOps};
pub use raster::{FilterType, ImageError, OutputFormat, RasterImage};
pub use session::{EditSession, SessionError};
pub use viewport::{
    compute_crop_box, display_to_source, fit_to_max, normalized_rect, CropBox, CropError, Point,
    Rect, Size,
};
