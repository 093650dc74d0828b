//! WASM bindings for display/source coordinate mapping.
//!
//! These let a page that draws its own canvas size the display copy and
//! translate a drag without going through a session.

use retouch_core::viewport::{self, CropBox, Point, Size};
use wasm_bindgen::prelude::*;

/// Fit `width` x `height` within `max_dimension` without upscaling.
///
/// Returns `{ width, height }`.
#[wasm_bindgen]
pub fn fit_to_max(width: u32, height: u32, max_dimension: u32) -> Result<JsValue, JsValue> {
    let size = viewport::fit_to_max(width, height, max_dimension);
    serde_wasm_bindgen::to_value(&size).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Map a drag on the display copy to a source-space crop box.
///
/// Returns `{ left, top, right, bottom }`, or throws "Invalid crop area" if
/// the selection has zero width or height.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const box = compute_crop_box(10, 10, 60, 40, 100, 66, 300, 200);
/// // { left: 30, top: 30, right: 180, bottom: 121 }
/// ```
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn compute_crop_box(
    press_x: i32,
    press_y: i32,
    release_x: i32,
    release_y: i32,
    display_width: u32,
    display_height: u32,
    source_width: u32,
    source_height: u32,
) -> Result<JsValue, JsValue> {
    let crop = crop_box(
        Point::new(press_x, press_y),
        Point::new(release_x, release_y),
        Size::new(display_width, display_height),
        Size::new(source_width, source_height),
    )
    .map_err(|e| JsValue::from_str(&e))?;
    serde_wasm_bindgen::to_value(&crop).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn crop_box(press: Point, release: Point, display: Size, source: Size) -> Result<CropBox, String> {
    viewport::compute_crop_box(press, release, display, source).map_err(|e| e.to_string())
}
