//! WASM bindings for the editing session.
//!
//! `JsEditSession` owns one image and its undo history. The page forwards
//! menu actions and pointer events to it and redraws from `display_image()`
//! after each call; `status` holds the line to show in the status bar.
//!
//! Timestamps for the debounced resize are plain milliseconds, typically
//! `performance.now()`.

use crate::types::JsRasterImage;
use retouch_core::raster::{self, OutputFormat};
use retouch_core::viewport::Point;
use retouch_core::{EditSession, EditorConfig};
use wasm_bindgen::prelude::*;

/// An image editing session for JavaScript.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const session = new JsEditSession({ history_capacity: 20 });
/// session.open_bytes(new Uint8Array(await file.arrayBuffer()));
/// session.grayscale();
/// session.undo();
/// statusBar.textContent = session.status;
/// ```
#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
}

#[wasm_bindgen]
impl JsEditSession {
    /// Create a session. `config` is an optional plain object with any of
    /// the `EditorConfig` fields; missing fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsEditSession, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            let config: EditorConfig = serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid editor config: {}", e)))?;
            config
                .validate()
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            config
        };
        Ok(Self::from_config(config))
    }

    /// Decode PNG, JPEG or GIF bytes and start a fresh history.
    pub fn open_bytes(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner
            .open_bytes(bytes)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Start a fresh history from already-decoded pixels.
    pub fn load(&mut self, image: &JsRasterImage) -> Result<(), JsValue> {
        let raster = image
            .to_raster()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.inner.load(raster);
        Ok(())
    }

    /// Encode the current image as `"png"` or `"jpeg"`.
    pub fn encode(&self, format: &str) -> Result<Vec<u8>, JsValue> {
        let format: OutputFormat = format
            .parse()
            .map_err(|e: raster::ImageError| JsValue::from_str(&e.to_string()))?;
        let current = self
            .inner
            .current()
            .ok_or_else(|| JsValue::from_str("No image loaded"))?;
        raster::encode(current, format, self.inner.ops().jpeg_quality)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Returns the status message.
    pub fn undo(&mut self) -> String {
        self.inner.undo().to_string()
    }

    /// Returns the status message.
    pub fn redo(&mut self) -> String {
        self.inner.redo().to_string()
    }

    /// Restore the image as first opened. Returns the status message.
    pub fn reset(&mut self) -> String {
        self.inner.reset().to_string()
    }

    /// Returns `true` if a new history entry was recorded.
    pub fn grayscale(&mut self) -> Result<bool, JsValue> {
        self.inner
            .grayscale()
            .map(|status| status.changed())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Returns `true` if a new history entry was recorded.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<bool, JsValue> {
        self.inner
            .resize(width, height)
            .map(|status| status.changed())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Queue a slider resize and return a display-sized preview.
    ///
    /// Call `poll_resize` from a timer to commit it once the slider settles.
    pub fn request_resize(
        &mut self,
        width: u32,
        height: u32,
        now_ms: f64,
    ) -> Result<JsRasterImage, JsValue> {
        self.inner
            .request_resize(width, height, millis(now_ms))
            .map(JsRasterImage::from_raster)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Returns `true` if a settled resize was applied.
    pub fn poll_resize(&mut self, now_ms: f64) -> Result<bool, JsValue> {
        self.inner
            .poll_resize(millis(now_ms))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn has_pending_resize(&self) -> bool {
        self.inner.has_pending_resize()
    }

    pub fn begin_crop(&mut self) -> Result<(), JsValue> {
        self.inner
            .begin_crop()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn is_cropping(&self) -> bool {
        self.inner.is_cropping()
    }

    pub fn crop_press(&mut self, x: i32, y: i32) -> bool {
        self.inner.crop_press(Point::new(x, y))
    }

    /// Returns the selection to draw as `[minX, minY, maxX, maxY]`.
    pub fn crop_drag(&mut self, x: i32, y: i32) -> Option<Vec<i32>> {
        self.inner
            .crop_drag(Point::new(x, y))
            .map(|rect| vec![rect.min_x, rect.min_y, rect.max_x, rect.max_y])
    }

    /// Apply the crop. Returns the source box as `[left, top, right, bottom]`,
    /// or `undefined` if no selection was in progress.
    pub fn crop_release(&mut self, x: i32, y: i32) -> Result<Option<Vec<u32>>, JsValue> {
        self.inner
            .crop_release(Point::new(x, y))
            .map(|crop| crop.map(|c| vec![c.left, c.top, c.right, c.bottom]))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn cancel_crop(&mut self) -> bool {
        self.inner.cancel_crop()
    }

    /// The full-resolution image. Copies the pixels.
    pub fn current(&self) -> Option<JsRasterImage> {
        self.inner
            .current()
            .cloned()
            .map(JsRasterImage::from_raster)
    }

    /// The current image scaled to fit the display.
    pub fn display_image(&self) -> Result<JsRasterImage, JsValue> {
        self.inner
            .display_image()
            .map(JsRasterImage::from_raster)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> String {
        self.inner.status().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(getter)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }
}

impl JsEditSession {
    pub(crate) fn from_config(config: EditorConfig) -> Self {
        Self {
            inner: EditSession::with_config(config),
        }
    }
}

/// JS timestamps are fractional and may be negative before page load.
fn millis(now_ms: f64) -> u64 {
    if now_ms.is_finite() && now_ms > 0.0 {
        now_ms as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retouch_core::{FilterType, RasterImage};

    fn session() -> JsEditSession {
        let mut session = JsEditSession::from_config(EditorConfig {
            max_display_dimension: 100,
            resize_filter: FilterType::Nearest,
            ..EditorConfig::default()
        });
        let image = JsRasterImage::from_raster(RasterImage::filled(300, 200, [200, 100, 50]));
        session.load(&image).unwrap();
        session
    }

    #[test]
    fn test_load_and_display() {
        let session = session();
        assert_eq!(session.status(), "Image opened (300x200)");
        let display = session.display_image().unwrap();
        assert_eq!(display.width(), 100);
        assert_eq!(display.height(), 66);
        assert_eq!(session.current().map(|img| img.width()), Some(300));
    }

    #[test]
    fn test_grayscale_undo_redo() {
        let mut session = session();
        assert!(session.grayscale().unwrap());
        assert!(session.can_undo());

        assert_eq!(session.undo(), "Undo performed");
        assert_eq!(session.undo(), "Nothing to undo");
        assert!(session.can_redo());
        assert_eq!(session.redo(), "Redo performed");
        assert_eq!(session.redo(), "Nothing to redo");
        assert_eq!(session.reset(), "Image reset to original");
    }

    #[test]
    fn test_crop_gesture() {
        let mut session = session();
        session.begin_crop().unwrap();
        assert!(session.is_cropping());
        assert!(session.crop_press(10, 10));
        assert_eq!(session.crop_drag(60, 40), Some(vec![10, 10, 60, 40]));
        assert_eq!(
            session.crop_release(60, 40).unwrap(),
            Some(vec![30, 30, 180, 121])
        );
        assert!(!session.is_cropping());
        assert_eq!(session.current().map(|img| img.width()), Some(150));
    }

    #[test]
    fn test_cancel_crop() {
        let mut session = session();
        session.begin_crop().unwrap();
        session.crop_press(0, 0);
        assert!(session.cancel_crop());
        assert_eq!(session.status(), "Crop cancelled");
        assert!(!session.can_undo());
    }

    #[test]
    fn test_debounced_resize() {
        let mut session = session();
        let preview = session.request_resize(150, 100, 1000.0).unwrap();
        assert_eq!((preview.width(), preview.height()), (100, 66));
        assert!(session.has_pending_resize());

        assert!(!session.poll_resize(1100.0).unwrap());
        assert!(session.poll_resize(1200.5).unwrap());
        assert_eq!(session.status(), "Image resized to: 150 x 100");
    }

    #[test]
    fn test_encode_png() {
        let session = session();
        let bytes = session.encode("png").unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_millis() {
        assert_eq!(millis(1234.9), 1234);
        assert_eq!(millis(-5.0), 0);
        assert_eq!(millis(f64::NAN), 0);
    }
}
