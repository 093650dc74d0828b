//! A single editing session: one image, its history, and the pointer and
//! slider state that drive edits.
//!
//! [`EditSession`] is what a GUI shell talks to. The shell forwards menu
//! actions and pointer events; the session runs the edit through
//! [`ImageOps`], records the result in the [`HistoryLog`], and keeps a
//! one-line status message for display.
//!
//! # Invariants
//!
//! - History only ever holds images that were produced successfully; a
//!   failed edit leaves it untouched.
//! - Snapshots are full resolution. Display copies are computed on demand
//!   and never recorded.
//! - Slider resizes are debounced: intermediate requests only produce a
//!   preview, and only the settled one reaches history.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::debounce::Debouncer;
use crate::gesture::{CropGesture, GestureOutcome};
use crate::history::{HistoryLog, HistoryStatus};
use crate::ops::{ImageOps, RasterOps};
use crate::raster::ImageError;
use crate::viewport::{fit_to_max, CropBox, CropError, Point, Rect, Size};

#[derive(Debug, Error)]
pub enum SessionError {
    /// An edit was requested before any image was opened.
    #[error("No image loaded")]
    NoImageLoaded,

    /// The crop selection had zero width or height.
    #[error("Invalid crop area")]
    InvalidCropArea,

    /// The image operation itself failed.
    #[error(transparent)]
    Image(#[from] ImageError),
}

impl From<CropError> for SessionError {
    fn from(err: CropError) -> Self {
        match err {
            CropError::InvalidCropArea => SessionError::InvalidCropArea,
        }
    }
}

/// Editor state for one open image.
pub struct EditSession<O: ImageOps = RasterOps> {
    ops: O,
    config: EditorConfig,
    history: HistoryLog<Arc<O::Image>>,
    gesture: CropGesture,
    crop_mode: bool,
    pending_resize: Debouncer<Size>,
    status: String,
}

impl Default for EditSession<RasterOps> {
    fn default() -> Self {
        Self::with_config(EditorConfig::default())
    }
}

impl EditSession<RasterOps> {
    /// A session backed by the `image` crate, using the config's resize filter.
    pub fn with_config(config: EditorConfig) -> Self {
        let ops = RasterOps::new(config.resize_filter);
        Self::new(ops, config)
    }
}

impl<O: ImageOps> EditSession<O> {
    pub fn new(ops: O, config: EditorConfig) -> Self {
        Self {
            history: HistoryLog::with_capacity(config.history_capacity),
            pending_resize: Debouncer::new(config.resize_debounce_ms),
            ops,
            config,
            gesture: CropGesture::Idle,
            crop_mode: false,
            status: HistoryStatus::NoImageLoaded.to_string(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn ops(&self) -> &O {
        &self.ops
    }

    pub fn history(&self) -> &HistoryLog<Arc<O::Image>> {
        &self.history
    }

    /// The status line for the last operation.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// The full-resolution image being edited.
    pub fn current(&self) -> Option<&O::Image> {
        self.history.current().map(Arc::as_ref)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ------------------------------------------------------------------
    // Loading and saving
    // ------------------------------------------------------------------

    /// Open an image file and start a fresh history with it as the origin.
    pub fn open(&mut self, path: &Path) -> Result<(), SessionError> {
        let image = self.ops.open(path).map_err(|e| self.fail(e.into()))?;
        info!(path = %path.display(), "opened image");
        self.load(image);
        Ok(())
    }

    /// Decode in-memory bytes and start a fresh history with them.
    pub fn open_bytes(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        let image = self.ops.decode(bytes).map_err(|e| self.fail(e.into()))?;
        self.load(image);
        Ok(())
    }

    /// Start a fresh history from an already-decoded image.
    ///
    /// Any crop selection or pending resize from the previous image is dropped.
    pub fn load(&mut self, image: O::Image) {
        let size = self.ops.size(&image);
        self.history = HistoryLog::with_capacity(self.config.history_capacity);
        self.history.push(Arc::new(image));
        self.reset_interaction();
        self.status = format!("Image opened ({}x{})", size.width, size.height);
    }

    /// Write the current image, with the format chosen from the extension.
    pub fn save(&mut self, path: &Path) -> Result<(), SessionError> {
        let current = self.require_current()?;
        if let Err(err) = self.ops.save(&current, path) {
            warn!(path = %path.display(), %err, "failed to save image");
            self.status = format!("Error saving image: {err}");
            return Err(err.into());
        }
        info!(path = %path.display(), "saved image");
        self.status = format!("Image saved to {}", path.display());
        Ok(())
    }

    // ------------------------------------------------------------------
    // Edits
    // ------------------------------------------------------------------

    /// Resize the current image to exact dimensions and record it.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<HistoryStatus, SessionError> {
        let current = self.require_current()?;
        let resized = self
            .ops
            .resize(&current, width, height)
            .map_err(|e| self.fail(e.into()))?;
        let status = self.commit(resized);
        self.status = format!("Image resized to: {width} x {height}");
        Ok(status)
    }

    /// Convert the current image to grayscale and record it.
    pub fn grayscale(&mut self) -> Result<HistoryStatus, SessionError> {
        let current = self.require_current()?;
        let gray = self.ops.to_grayscale(&current);
        let status = self.commit(gray);
        self.status = "Image converted to grayscale".to_string();
        Ok(status)
    }

    /// Queue a slider resize and return a display-sized preview of it.
    ///
    /// The request settles `resize_debounce_ms` after the last call; commit it
    /// with [`EditSession::poll_resize`]. A newer request cancels the pending
    /// one, which is never executed, and so does any edit recorded meanwhile.
    pub fn request_resize(
        &mut self,
        width: u32,
        height: u32,
        now_ms: u64,
    ) -> Result<O::Image, SessionError> {
        let current = self.require_current()?;
        if width == 0 || height == 0 {
            return Err(self.fail(ImageError::InvalidDimensions { width, height }.into()));
        }

        let preview_size = fit_to_max(width, height, self.config.max_display_dimension);
        let preview = self
            .ops
            .resize(&current, preview_size.width, preview_size.height)
            .map_err(|e| self.fail(e.into()))?;

        if let Some(superseded) = self.pending_resize.submit(Size::new(width, height), now_ms) {
            debug!(
                width = superseded.width,
                height = superseded.height,
                "cancelled superseded resize"
            );
        }
        Ok(preview)
    }

    /// Commit the pending slider resize if it has settled by `now_ms`.
    ///
    /// Returns `true` if a resize was applied.
    pub fn poll_resize(&mut self, now_ms: u64) -> Result<bool, SessionError> {
        let Some(size) = self.pending_resize.poll(now_ms) else {
            return Ok(false);
        };
        self.resize(size.width, size.height)?;
        Ok(true)
    }

    pub fn has_pending_resize(&self) -> bool {
        self.pending_resize.is_pending()
    }

    // ------------------------------------------------------------------
    // Crop gesture
    // ------------------------------------------------------------------

    /// Enter crop mode; the next press starts a selection.
    pub fn begin_crop(&mut self) -> Result<(), SessionError> {
        self.require_current()?;
        self.crop_mode = true;
        self.gesture = CropGesture::Idle;
        self.status = "Click and drag to select crop area".to_string();
        Ok(())
    }

    pub fn is_cropping(&self) -> bool {
        self.crop_mode
    }

    /// Pointer pressed on the display copy. Returns whether it was accepted.
    pub fn crop_press(&mut self, point: Point) -> bool {
        if !self.crop_mode {
            return false;
        }
        self.gesture.press(point);
        true
    }

    /// Pointer dragged; returns the clamped preview rectangle to draw.
    pub fn crop_drag(&mut self, point: Point) -> Option<Rect> {
        if !self.crop_mode {
            return None;
        }
        let display = self.display_size()?;
        self.gesture.drag(point, display)
    }

    /// The preview rectangle of the selection in progress.
    pub fn crop_preview(&self) -> Option<Rect> {
        self.gesture.preview(self.display_size()?)
    }

    /// Pointer released: crop to the selection and record the result.
    ///
    /// Returns the source-space box that was applied, or `Ok(None)` if no
    /// selection was in progress. Crop mode ends either way.
    ///
    /// # Errors
    ///
    /// `SessionError::InvalidCropArea` if the selection has zero area; the
    /// image is not cropped and history is untouched.
    pub fn crop_release(&mut self, point: Point) -> Result<Option<CropBox>, SessionError> {
        if !self.crop_mode {
            return Ok(None);
        }
        self.crop_mode = false;

        let current = self.require_current()?;
        let source = self.ops.size(&current);
        let display = fit_to_max(source.width, source.height, self.config.max_display_dimension);

        match self.gesture.release(point, display, source) {
            GestureOutcome::Committed(crop) => {
                let cropped = self
                    .ops
                    .crop(&current, crop)
                    .map_err(|e| self.fail(e.into()))?;
                self.commit(cropped);
                self.status = format!("Image cropped to {crop}");
                Ok(Some(crop))
            }
            GestureOutcome::Rejected(err) => Err(self.fail(err.into())),
            GestureOutcome::Cancelled | GestureOutcome::Ignored => {
                self.status = "Crop cancelled".to_string();
                Ok(None)
            }
        }
    }

    /// Abandon crop mode and any selection in progress.
    pub fn cancel_crop(&mut self) -> bool {
        if !self.crop_mode {
            return false;
        }
        self.crop_mode = false;
        self.gesture.cancel();
        self.status = "Crop cancelled".to_string();
        true
    }

    // ------------------------------------------------------------------
    // History navigation
    // ------------------------------------------------------------------

    pub fn undo(&mut self) -> HistoryStatus {
        self.reset_interaction();
        let status = self.history.undo().status;
        self.status = status.to_string();
        status
    }

    pub fn redo(&mut self) -> HistoryStatus {
        self.reset_interaction();
        let status = self.history.redo().status;
        self.status = status.to_string();
        status
    }

    /// Restore the image as it was first opened.
    pub fn reset(&mut self) -> HistoryStatus {
        self.reset_interaction();
        let status = self.history.reset();
        self.status = status.to_string();
        status
    }

    // ------------------------------------------------------------------
    // Display
    // ------------------------------------------------------------------

    /// Size of the on-screen copy of the current image.
    pub fn display_size(&self) -> Option<Size> {
        let source = self.ops.size(self.current()?);
        Some(fit_to_max(
            source.width,
            source.height,
            self.config.max_display_dimension,
        ))
    }

    /// The current image scaled to [`EditSession::display_size`].
    pub fn display_image(&self) -> Result<O::Image, SessionError> {
        let current = self.current().ok_or(SessionError::NoImageLoaded)?;
        Ok(self.fit(current, self.config.max_display_dimension)?)
    }

    /// Before/after pair for the last edit, each scaled for side-by-side view.
    ///
    /// Returns `Ok(None)` when there is no earlier state to compare against.
    pub fn comparison(&self) -> Result<Option<(O::Image, O::Image)>, SessionError> {
        let current = self.current().ok_or(SessionError::NoImageLoaded)?;
        let Some(previous) = self.history.previous() else {
            return Ok(None);
        };
        let max = self.config.comparison_max_dimension;
        Ok(Some((self.fit(previous, max)?, self.fit(current, max)?)))
    }

    fn fit(&self, image: &O::Image, max_dimension: u32) -> Result<O::Image, ImageError> {
        let source = self.ops.size(image);
        let target = fit_to_max(source.width, source.height, max_dimension);
        if target == source {
            return Ok(image.clone());
        }
        self.ops.resize(image, target.width, target.height)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn require_current(&mut self) -> Result<Arc<O::Image>, SessionError> {
        match self.history.current() {
            Some(current) => Ok(Arc::clone(current)),
            None => Err(self.fail(SessionError::NoImageLoaded)),
        }
    }

    /// Record an edit. A slider resize still waiting to settle was previewed
    /// against the old image, so it is dropped.
    fn commit(&mut self, image: O::Image) -> HistoryStatus {
        if let Some(stale) = self.pending_resize.cancel() {
            debug!(
                width = stale.width,
                height = stale.height,
                "dropped pending resize after edit"
            );
        }
        let status = self.history.push(Arc::new(image));
        debug!(%status, len = self.history.len(), "committed edit");
        status
    }

    fn reset_interaction(&mut self) {
        self.crop_mode = false;
        self.gesture = CropGesture::Idle;
        self.pending_resize.cancel();
    }

    fn fail(&mut self, err: SessionError) -> SessionError {
        warn!(%err, "edit failed");
        self.status = err.to_string();
        err
    }
}
