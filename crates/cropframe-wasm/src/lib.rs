//! Cropframe WASM - WebAssembly bindings for Cropframe
//!
//! This crate provides WASM bindings to expose the cropframe-core editor
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `editor` - The interactive crop rectangle editor
//! - `transform` - Pixel-space crop extraction
//! - `types` - WASM-compatible wrapper types for image data
//! - `logger` - Routes core logging to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropEditor, JsSourceImage } from '@cropframe/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new JsCropEditor(0, 0, 320, 480);
//! editor.set_layout({ image_frame, container });
//! // ... forward pointer gestures to begin/update/end ...
//! const cropped = editor.crop(image, { image_frame, container });
//! ```

use wasm_bindgen::prelude::*;

mod editor;
mod logger;
mod transform;
mod types;

// Re-export public types
pub use editor::JsCropEditor;
pub use logger::set_log_level;
pub use transform::crop_image;
pub use types::JsSourceImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Warn);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
