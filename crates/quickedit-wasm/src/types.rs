//! WASM-compatible wrapper types for editor output.
//!
//! These wrap the core `Surface` and `ExportedImage` types and expose them to
//! JavaScript through getters, converting to JS-friendly representations.

use quickedit_core::{ExportedImage, Surface};
use wasm_bindgen::prelude::*;

/// A rendered surface for JavaScript.
///
/// The pixel buffer is RGBA, so it can be wrapped directly in an `ImageData`
/// and put on a canvas:
///
/// ```typescript
/// const surface = editor.render();
/// const data = new ImageData(new Uint8ClampedArray(surface.pixels()), surface.width);
/// ctx.putImageData(data, 0, 0);
/// ```
#[wasm_bindgen]
pub struct JsSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    filter: String,
}

#[wasm_bindgen]
impl JsSurface {
    /// Surface width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The CSS filter string the surface was rendered with, for pages that
    /// draw the image themselves with `ctx.filter`.
    #[wasm_bindgen(getter)]
    pub fn filter(&self) -> String {
        self.filter.clone()
    }

    /// Number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl From<&Surface> for JsSurface {
    fn from(surface: &Surface) -> Self {
        Self {
            width: surface.width,
            height: surface.height,
            pixels: surface.pixels.clone(),
            filter: surface.filter.clone(),
        }
    }
}

/// An encoded export, ready for a download link.
///
/// ```typescript
/// const out = editor.export_png();
/// const url = URL.createObjectURL(new Blob([out.bytes()], { type: out.mime_type }));
/// Object.assign(document.createElement('a'), { href: url, download: out.filename }).click();
/// ```
#[wasm_bindgen]
pub struct JsExportedImage {
    filename: String,
    mime_type: String,
    bytes: Vec<u8>,
}

#[wasm_bindgen]
impl JsExportedImage {
    /// Suggested download filename
    #[wasm_bindgen(getter)]
    pub fn filename(&self) -> String {
        self.filename.clone()
    }

    /// MIME type of the encoded bytes
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    /// Encoded size in bytes
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    /// Encoded image bytes as Uint8Array.
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

impl From<ExportedImage> for JsExportedImage {
    fn from(image: ExportedImage) -> Self {
        Self {
            filename: image.filename,
            mime_type: image.mime_type.to_string(),
            bytes: image.bytes,
        }
    }
}

/// Convert any error into a JavaScript `Error` with its message.
pub(crate) fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
