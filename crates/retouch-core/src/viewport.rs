//! Coordinate mapping between the full-resolution source image and its
//! scaled on-screen copy.
//!
//! The editor never shows the source image at full size. It shows a copy that
//! fits within a maximum footprint (see [`fit_to_max`]), and every pointer
//! gesture made on that copy has to be translated back to source pixels
//! before an edit is applied.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner in both spaces
//! - Display space: pixel coordinates on the scaled copy, as reported by the
//!   pointer (may be negative or beyond the canvas while dragging)
//! - Source space: pixel coordinates on the stored image
//!
//! All functions here are pure; none of them hold state between calls.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

/// Errors produced while mapping a gesture into source space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CropError {
    /// The selection collapsed to zero width or height.
    #[error("Invalid crop area")]
    InvalidCropArea,
}

/// Width and height of an image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True if either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A pointer position in display space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle with ordered corners (`min <= max`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Rect {
    pub fn width(&self) -> u32 {
        self.max_x.abs_diff(self.min_x)
    }

    pub fn height(&self) -> u32 {
        self.max_y.abs_diff(self.min_y)
    }

    /// True if the rectangle has zero width or zero height.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// A crop region in source space.
///
/// The box is half-open: `left..right` columns and `top..bottom` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CropBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropBox {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

impl std::fmt::Display for CropBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Compute display dimensions that fit within `max_dimension` on both sides.
///
/// Images that already fit are returned unchanged (no upscaling). Larger
/// images are scaled by `min(max / width, max / height)` and floored, so the
/// longer side lands exactly on `max_dimension`.
///
/// # Guarantees
///
/// - Both output sides are `<= max_dimension`
/// - Both output sides are `>= 1` when both inputs are `>= 1`
/// - Aspect ratio is preserved to within integer-floor rounding
///
/// A zero-sized source yields `(0, 0)`. A `max_dimension` of zero is treated
/// as 1.
///
/// # Example
///
/// ```ignore
/// assert_eq!(fit_to_max(3000, 2000, 1000), Size::new(1000, 666));
/// assert_eq!(fit_to_max(400, 300, 1000), Size::new(400, 300));
/// ```
pub fn fit_to_max(source_width: u32, source_height: u32, max_dimension: u32) -> Size {
    if source_width == 0 || source_height == 0 {
        return Size::new(0, 0);
    }

    let max_dimension = max_dimension.max(1);
    if source_width <= max_dimension && source_height <= max_dimension {
        return Size::new(source_width, source_height);
    }

    // The longer side limits the scale; integer math keeps the floor exact.
    let max = max_dimension as u64;
    let (w, h) = (source_width as u64, source_height as u64);
    let fitted = if w >= h {
        Size::new(max_dimension, ((h * max) / w).max(1) as u32)
    } else {
        Size::new(((w * max) / h).max(1) as u32, max_dimension)
    };

    trace!(
        source_width,
        source_height,
        max_dimension,
        width = fitted.width,
        height = fitted.height,
        "fitted display size"
    );
    fitted
}

/// Clamp a pointer position to `[0, width] x [0, height]` of the display.
///
/// The upper bound is inclusive so that a drag ending on the far edge covers
/// the last row and column.
pub fn clamp_to_display(point: Point, display: Size) -> Point {
    let max_x = i32::try_from(display.width).unwrap_or(i32::MAX);
    let max_y = i32::try_from(display.height).unwrap_or(i32::MAX);
    Point::new(point.x.clamp(0, max_x), point.y.clamp(0, max_y))
}

/// Map a display-space point to source-space pixel coordinates.
///
/// The point is clamped to the display bounds first, then scaled by
/// `source / display` on each axis and truncated. A zero-sized display axis
/// maps to 0.
pub fn display_to_source(point: Point, display: Size, source: Size) -> (u32, u32) {
    let clamped = clamp_to_display(point, display);
    let x = scale_axis(clamped.x as u32, display.width, source.width);
    let y = scale_axis(clamped.y as u32, display.height, source.height);
    trace!(
        display_x = clamped.x,
        display_y = clamped.y,
        source_x = x,
        source_y = y,
        "mapped display point to source"
    );
    (x, y)
}

fn scale_axis(value: u32, display: u32, source: u32) -> u32 {
    if display == 0 {
        return 0;
    }
    ((value as u64 * source as u64) / display as u64) as u32
}

/// Build an ordered rectangle from two arbitrary corners.
///
/// The result does not depend on which corner was the press point and which
/// was the release point.
pub fn normalized_rect(a: Point, b: Point) -> Rect {
    Rect {
        min_x: a.x.min(b.x),
        min_y: a.y.min(b.y),
        max_x: a.x.max(b.x),
        max_y: a.y.max(b.y),
    }
}

/// Clamp both corners to the display and normalize them.
///
/// This is what a live drag preview draws; no source mapping is involved.
pub fn clamped_rect(a: Point, b: Point, display: Size) -> Rect {
    normalized_rect(clamp_to_display(a, display), clamp_to_display(b, display))
}

/// Translate a drag gesture on the display copy into a source-space crop box.
///
/// Both points are clamped to the display, normalized into a rectangle, and
/// each corner is mapped through [`display_to_source`].
///
/// # Errors
///
/// Returns [`CropError::InvalidCropArea`] if the clamped rectangle has zero
/// width or height, or if it collapses to zero area once mapped to source
/// space. Callers must not crop in that case.
pub fn compute_crop_box(
    press: Point,
    release: Point,
    display: Size,
    source: Size,
) -> Result<CropBox, CropError> {
    let rect = clamped_rect(press, release, display);
    if rect.is_empty() {
        return Err(CropError::InvalidCropArea);
    }

    let (left, top) = display_to_source(Point::new(rect.min_x, rect.min_y), display, source);
    let (right, bottom) = display_to_source(Point::new(rect.max_x, rect.max_y), display, source);
    let crop = CropBox::new(left, top, right, bottom);
    if crop.is_empty() {
        return Err(CropError::InvalidCropArea);
    }
    Ok(crop)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: fitted dimensions never exceed the maximum.
        #[test]
        fn prop_fit_within_max(
            width in 1u32..=10_000,
            height in 1u32..=10_000,
            max in 1u32..=4_000,
        ) {
            let fitted = fit_to_max(width, height, max);
            prop_assert!(fitted.width <= max);
            prop_assert!(fitted.height <= max);
            prop_assert!(fitted.width >= 1);
            prop_assert!(fitted.height >= 1);
        }

        /// Property: fitting never upscales.
        #[test]
        fn prop_fit_never_upscales(
            width in 1u32..=10_000,
            height in 1u32..=10_000,
            max in 1u32..=4_000,
        ) {
            let fitted = fit_to_max(width, height, max);
            prop_assert!(fitted.width <= width);
            prop_assert!(fitted.height <= height);
        }

        /// Property: aspect ratio survives within one pixel of rounding.
        #[test]
        fn prop_fit_preserves_aspect(
            width in 10u32..=10_000,
            height in 10u32..=10_000,
            max in 10u32..=4_000,
        ) {
            let fitted = fit_to_max(width, height, max);
            // Cross-multiplied: fitted.w / fitted.h ~ width / height
            let lhs = fitted.width as i64 * height as i64;
            let rhs = fitted.height as i64 * width as i64;
            let tolerance = width.max(height) as i64;
            prop_assert!((lhs - rhs).abs() <= tolerance);
        }

        /// Property: mapped points always land inside the source bounds.
        #[test]
        fn prop_display_to_source_in_bounds(
            x in -500i32..=3_000,
            y in -500i32..=3_000,
            dw in 1u32..=2_000,
            dh in 1u32..=2_000,
            sw in 1u32..=8_000,
            sh in 1u32..=8_000,
        ) {
            let (sx, sy) = display_to_source(Point::new(x, y), Size::new(dw, dh), Size::new(sw, sh));
            prop_assert!(sx <= sw);
            prop_assert!(sy <= sh);
        }

        /// Property: a successful crop box is non-empty and inside the source.
        #[test]
        fn prop_crop_box_inside_source(
            ax in -100i32..=1_100,
            ay in -100i32..=1_100,
            bx in -100i32..=1_100,
            by in -100i32..=1_100,
            sw in 1u32..=5_000,
            sh in 1u32..=5_000,
        ) {
            let display = fit_to_max(sw, sh, 1000);
            let source = Size::new(sw, sh);
            if let Ok(crop) = compute_crop_box(Point::new(ax, ay), Point::new(bx, by), display, source) {
                prop_assert!(!crop.is_empty());
                prop_assert!(crop.right <= sw);
                prop_assert!(crop.bottom <= sh);
                prop_assert!(crop.left < crop.right);
                prop_assert!(crop.top < crop.bottom);
            }
        }
    }
}
