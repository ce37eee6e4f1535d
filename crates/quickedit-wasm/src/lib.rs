//! QuickEdit WASM - WebAssembly bindings for QuickEdit
//!
//! This crate exposes the quickedit-core editor session to JavaScript as a
//! single `Editor` class, and routes the core's `log` output to the browser
//! console.
//!
//! # Module Structure
//!
//! - `editor` - The `Editor` class (upload, adjust, crop, render, export)
//! - `types` - WASM-compatible wrapper types for rendered and exported images
//! - `logging` - `log` backend writing to `console.*`
//!
//! # Usage
//!
//! ```typescript
//! import init, { Editor } from '@quickedit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new Editor();
//! editor.load(new Uint8Array(await file.arrayBuffer()));
//! editor.set_filter("grayscale");
//! const surface = editor.render();
//! console.log(`Rendered ${surface.width}x${surface.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod editor;
mod logging;
mod types;

pub use editor::Editor;
pub use types::{JsExportedImage, JsSurface};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logging::init(log::LevelFilter::Info);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Change how much the editor logs to the console.
///
/// # Errors
/// Returns error for an unknown level name
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = logging::parse_level(level)
        .ok_or_else(|| types::to_js_error(format!("Unknown log level: {}", level)))?;
    logging::init(filter);
    Ok(())
}
