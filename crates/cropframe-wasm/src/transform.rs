//! WASM bindings for pixel-space crop extraction.

use crate::types::JsSourceImage;
use cropframe_core::{extract, PixelCropRect};
use wasm_bindgen::prelude::*;

/// Crop an image to a pixel rectangle.
///
/// The rectangle is clamped to the image. If nothing remains after clamping,
/// the original image is returned. Scale and orientation are preserved.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const cropped = crop_image(sourceImage, 200, 200, 100, 100);
/// ```
#[wasm_bindgen]
pub fn crop_image(image: &JsSourceImage, x: u32, y: u32, width: u32, height: u32) -> JsSourceImage {
    let src = image.to_source();
    let result = extract(&src, PixelCropRect::new(x, y, width, height));
    JsSourceImage::from_source(result)
}
