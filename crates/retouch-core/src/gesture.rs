//! Interactive crop selection as an explicit state machine.
//!
//! ```text
//!   Idle --press--> Selecting --drag--> Selecting
//!                       |
//!                       +--release--> Committed(box) | Rejected --> Idle
//!                       +--cancel---> Cancelled                  --> Idle
//! ```
//!
//! The machine only tracks display-space points. Mapping to source space
//! happens once, on release, through [`compute_crop_box`].

use tracing::debug;

use crate::viewport::{clamped_rect, compute_crop_box, CropBox, CropError, Point, Rect, Size};

/// Where a crop gesture currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CropGesture {
    #[default]
    Idle,
    /// The pointer is down; `current` follows the latest drag position.
    Selecting { press: Point, current: Point },
}

/// What happened when a gesture ended (or failed to).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Release produced a usable source-space box.
    Committed(CropBox),
    /// Release produced a zero-area selection; nothing should be cropped.
    Rejected(CropError),
    /// The selection was abandoned.
    Cancelled,
    /// The event arrived while no selection was in progress.
    Ignored,
}

impl CropGesture {
    pub fn new() -> Self {
        Self::Idle
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self, CropGesture::Selecting { .. })
    }

    /// Start a selection at `point`. Pressing again mid-selection restarts it.
    pub fn press(&mut self, point: Point) {
        debug!(x = point.x, y = point.y, "crop selection started");
        *self = CropGesture::Selecting {
            press: point,
            current: point,
        };
    }

    /// Follow the pointer and return the live preview rectangle.
    ///
    /// The preview is clamped to the display so it never draws outside the
    /// image. Returns `None` if no selection is in progress.
    pub fn drag(&mut self, point: Point, display: Size) -> Option<Rect> {
        match self {
            CropGesture::Selecting { press, current } => {
                *current = point;
                Some(clamped_rect(*press, point, display))
            }
            CropGesture::Idle => None,
        }
    }

    /// The preview rectangle for the current selection, if any.
    pub fn preview(&self, display: Size) -> Option<Rect> {
        match *self {
            CropGesture::Selecting { press, current } => {
                Some(clamped_rect(press, current, display))
            }
            CropGesture::Idle => None,
        }
    }

    /// Finish the selection at `point` and map it into source space.
    ///
    /// The gesture is always back to [`CropGesture::Idle`] afterwards.
    pub fn release(&mut self, point: Point, display: Size, source: Size) -> GestureOutcome {
        let CropGesture::Selecting { press, .. } = std::mem::take(self) else {
            return GestureOutcome::Ignored;
        };

        match compute_crop_box(press, point, display, source) {
            Ok(crop) => {
                debug!(%crop, "crop selection committed");
                GestureOutcome::Committed(crop)
            }
            Err(err) => {
                debug!(%err, "crop selection rejected");
                GestureOutcome::Rejected(err)
            }
        }
    }

    /// Abandon any selection in progress.
    pub fn cancel(&mut self) -> GestureOutcome {
        match std::mem::take(self) {
            CropGesture::Selecting { .. } => {
                debug!("crop selection cancelled");
                GestureOutcome::Cancelled
            }
            CropGesture::Idle => GestureOutcome::Ignored,
        }
    }
}
