//! The `Editor` class exported to JavaScript.
//!
//! Each method corresponds to one UI event: the page forwards file-input,
//! slider, select, pointer and button events here, then calls `render()` and
//! paints the returned surface.

use log::debug;
use quickedit_core::{AspectLock, EditorConfig, EditorSession};
use wasm_bindgen::prelude::*;

use crate::types::{to_js_error, JsExportedImage, JsSurface};

/// An editing session bound to one page.
///
/// ```typescript
/// const editor = new Editor();               // or new Editor({ jpegQuality: 80 })
/// editor.load(new Uint8Array(await file.arrayBuffer()));
/// editor.set_brightness(20);
/// editor.select_aspect_ratio("16:9");
/// canvas.onmousedown = (e) => editor.pointer_down(e.offsetX, e.offsetY);
/// ```
#[wasm_bindgen]
pub struct Editor {
    session: EditorSession,
}

#[wasm_bindgen]
impl Editor {
    /// Create an editor.
    ///
    /// # Arguments
    /// * `config` - Optional partial `EditorConfig` object (camelCase keys).
    ///   Missing keys take their defaults.
    ///
    /// # Errors
    /// Returns error if the config cannot be deserialized or fails validation
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<Editor, JsValue> {
        let config: EditorConfig = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| to_js_error(format!("Invalid editor config: {}", e)))?
        };

        let session = EditorSession::with_config(config).map_err(to_js_error)?;
        Ok(Self::from_session(session))
    }

    /// Decode an uploaded file and make it the image being edited.
    ///
    /// # Errors
    /// Returns error if the bytes are empty or not a supported image. The
    /// previously loaded image stays active in that case.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.session.load(bytes).map_err(to_js_error)
    }

    /// Restore the image as it was uploaded. Adjustments are kept.
    ///
    /// Returns false if nothing is loaded.
    pub fn revert(&mut self) -> bool {
        self.session.revert()
    }

    /// Brightness offset; values outside -100..=100 are clamped.
    pub fn set_brightness(&mut self, value: i32) {
        self.session.set_brightness(value);
    }

    /// Contrast offset; values outside -100..=100 are clamped.
    pub fn set_contrast(&mut self, value: i32) {
        self.session.set_contrast(value);
    }

    /// Select a filter preset by its CSS value, e.g. `"sepia(100%)"` or `"none"`.
    ///
    /// # Errors
    /// Returns error for an unknown preset
    pub fn set_filter(&mut self, value: &str) -> Result<(), JsValue> {
        self.session.set_filter_by_name(value).map_err(to_js_error)
    }

    /// Select the crop aspect mode: `"free"` or `"W:H"` such as `"4:3"`.
    ///
    /// # Errors
    /// Returns error for a malformed ratio
    pub fn select_aspect_ratio(&mut self, value: &str) -> Result<(), JsValue> {
        self.session
            .select_aspect_ratio_by_name(value)
            .map_err(to_js_error)
    }

    /// Press at canvas coordinates. Returns whether a drag started.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.session.pointer_down(x, y)
    }

    /// Move to canvas coordinates. Returns whether the crop region changed.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.session.pointer_move(x, y)
    }

    /// Release. Returns whether a drag ended.
    pub fn pointer_up(&mut self) -> bool {
        self.session.pointer_up()
    }

    /// Pointer left the canvas; ends a drag like a release.
    pub fn pointer_leave(&mut self) -> bool {
        self.session.pointer_leave()
    }

    /// Replace the working image with the selected region.
    ///
    /// # Errors
    /// Returns error if no image is loaded or the region is empty or outside
    /// the image
    pub fn commit_crop(&mut self) -> Result<(), JsValue> {
        self.session.commit_crop().map_err(to_js_error)
    }

    /// Render the current state, crop overlay included while cropping.
    pub fn render(&mut self) -> JsSurface {
        JsSurface::from(self.session.surface())
    }

    /// Encode the edited image as PNG, without the crop overlay.
    ///
    /// # Errors
    /// Returns error if no image is loaded or encoding fails
    pub fn export_png(&self) -> Result<JsExportedImage, JsValue> {
        self.session
            .export_png()
            .map(JsExportedImage::from)
            .map_err(to_js_error)
    }

    /// Encode the edited image as JPEG at the configured quality.
    ///
    /// # Errors
    /// Returns error if no image is loaded or encoding fails
    pub fn export_jpeg(&self) -> Result<JsExportedImage, JsValue> {
        self.session
            .export_jpeg()
            .map(JsExportedImage::from)
            .map_err(to_js_error)
    }

    /// The crop region as `{ x, y, width, height }`.
    ///
    /// # Errors
    /// Returns error if the region cannot be serialized
    pub fn crop_region(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.crop_region()).map_err(to_js_error)
    }

    /// Whether an image has been loaded.
    #[wasm_bindgen(getter)]
    pub fn is_image_loaded(&self) -> bool {
        self.session.is_image_loaded()
    }

    /// Whether a crop drag is in progress.
    #[wasm_bindgen(getter)]
    pub fn is_cropping(&self) -> bool {
        self.session.is_cropping()
    }

    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> i32 {
        self.session.adjustments().brightness()
    }

    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> i32 {
        self.session.adjustments().contrast()
    }

    /// Name of the selected preset, e.g. `"sepia"`.
    #[wasm_bindgen(getter)]
    pub fn filter(&self) -> String {
        self.session.adjustments().filter().name().to_string()
    }

    /// Full CSS filter string for the current adjustments.
    #[wasm_bindgen(getter)]
    pub fn filter_string(&self) -> String {
        self.session.adjustments().filter_string()
    }

    /// Selected aspect mode (`"free"`, `"4:3"`, ...), or undefined before
    /// the user has picked one.
    #[wasm_bindgen(getter)]
    pub fn aspect_ratio(&self) -> Option<String> {
        self.session.aspect_lock().map(|lock| match lock {
            AspectLock::Freeform => "free".to_string(),
            AspectLock::Fixed(ratio) => ratio.to_string(),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.session.surface_size().0
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.session.surface_size().1
    }
}

impl Editor {
    pub(crate) fn from_session(session: EditorSession) -> Self {
        debug!("editor: created");
        Self { session }
    }
}
