//! Retouch WASM - WebAssembly bindings for Retouch
//!
//! This crate exposes the retouch-core editing session to JavaScript/TypeScript
//! applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for RGB image data
//! - `session` - The editing session: open, edit, crop, undo/redo
//! - `viewport` - Display/source coordinate helpers
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditSession } from '@retouch/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const session = new JsEditSession();
//! session.open_bytes(new Uint8Array(await file.arrayBuffer()));
//! const display = session.display_image();
//! console.log(`Showing ${display.width}x${display.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod session;
mod types;
mod viewport;

// Re-export public types
pub use session::JsEditSession;
pub use types::JsRasterImage;
pub use viewport::{compute_crop_box, fit_to_max};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
