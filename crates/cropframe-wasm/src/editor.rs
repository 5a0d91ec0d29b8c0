//! Crop editor WASM bindings.
//!
//! Wraps [`HandleController`] for the browser. Handles cross the boundary as
//! their `u8` index (0 = top-left ... 7 = right), rectangles as flat
//! `[x, y, width, height]` arrays, and layouts/configs as plain objects via
//! serde-wasm-bindgen.

use crate::types::JsSourceImage;
use cropframe_core::{
    AspectPreset, AspectRatio, EditorConfig, HandleController, HandleKind, ImageLayout, Offset,
    Point, Rect,
};
use wasm_bindgen::prelude::*;

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_layout(layout: JsValue) -> Result<ImageLayout, JsValue> {
    serde_wasm_bindgen::from_value(layout).map_err(to_js_error)
}

fn handle_from(index: u8) -> Option<HandleKind> {
    match HandleKind::try_from(index) {
        Ok(handle) => Some(handle),
        Err(index) => {
            log::debug!("ignoring gesture for unknown handle index {index}");
            None
        }
    }
}

fn flatten(rect: Rect) -> Vec<f64> {
    vec![rect.x, rect.y, rect.width, rect.height]
}

/// Interactive crop rectangle editor for JavaScript.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const editor = new JsCropEditor(0, 0, 320, 480, { min_size: 50 });
/// editor.set_aspect_preset(5); // square
/// editor.begin(2);             // bottom-right
/// editor.update(2, -40, -40);
/// editor.end(2);
/// const [x, y, w, h] = editor.rect();
/// ```
#[wasm_bindgen]
pub struct JsCropEditor {
    inner: HandleController,
}

#[wasm_bindgen]
impl JsCropEditor {
    /// Create an editor whose rectangle covers the given bounds.
    ///
    /// `config` is an optional `{ min_size, handle_margin, hit_radius }`
    /// object; missing fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        config: JsValue,
    ) -> Result<JsCropEditor, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value::<EditorConfig>(config).map_err(to_js_error)?
        };
        Self::from_parts(Rect::new(x, y, width, height), config).map_err(to_js_error)
    }

    /// Start dragging `handle`. Returns false if the gesture was rejected.
    pub fn begin(&mut self, handle: u8) -> bool {
        handle_from(handle).is_some_and(|h| self.inner.begin(h).is_ok())
    }

    /// Move the active handle by the cumulative translation since `begin`.
    pub fn update(&mut self, handle: u8, dx: f64, dy: f64) -> bool {
        handle_from(handle).is_some_and(|h| self.inner.update(h, Offset::new(dx, dy)).is_ok())
    }

    /// Commit the active drag.
    pub fn end(&mut self, handle: u8) -> bool {
        handle_from(handle).is_some_and(|h| self.inner.end(h).is_ok())
    }

    /// Abandon the active drag, restoring the rectangle from `begin`.
    pub fn cancel(&mut self, handle: u8) -> bool {
        handle_from(handle).is_some_and(|h| self.inner.cancel(h).is_ok())
    }

    /// Handle index under the given editor point, if any.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<u8> {
        self.inner.hit_test(Point::new(x, y)).map(|h| h as u8)
    }

    /// Select one of the built-in ratios (0 = free, 1 = 19:9, 2 = 9:16,
    /// 3 = 4:5, 4 = 5:4, 5 = 1:1). Returns the re-fitted rectangle.
    pub fn set_aspect_preset(&mut self, preset: u8) -> Vec<f64> {
        flatten(self.inner.set_aspect_ratio(AspectPreset::from(preset).into()))
    }

    /// Lock to a custom `width:height` ratio. Returns the re-fitted rectangle.
    pub fn set_aspect_ratio(&mut self, width: f64, height: f64) -> Vec<f64> {
        flatten(self.inner.set_aspect_ratio(AspectRatio::fixed(width, height)))
    }

    /// Drop the ratio lock. The rectangle expands to the bounds.
    pub fn clear_aspect_ratio(&mut self) -> Vec<f64> {
        flatten(self.inner.set_aspect_ratio(AspectRatio::Free))
    }

    /// Replace the bounds the rectangle must stay inside.
    pub fn set_bounds(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.inner.set_bounds(Rect::new(x, y, width, height));
    }

    /// Use the visible part of `{ image_frame, container }` as the bounds.
    pub fn set_layout(&mut self, layout: JsValue) -> Result<(), JsValue> {
        let layout = parse_layout(layout)?;
        self.inner.set_layout(&layout);
        Ok(())
    }

    /// Current rectangle as `[x, y, width, height]`.
    pub fn rect(&self) -> Vec<f64> {
        flatten(self.inner.rect())
    }

    /// Current bounds as `[x, y, width, height]`.
    pub fn bounds(&self) -> Vec<f64> {
        flatten(self.inner.bounds())
    }

    /// Handle centres as `[x0, y0, x1, y1, ...]` in handle index order.
    pub fn handle_positions(&self) -> Vec<f64> {
        self.inner
            .handle_positions()
            .iter()
            .flat_map(|h| [h.position.x, h.position.y])
            .collect()
    }

    /// Full overlay snapshot as a plain object.
    pub fn overlay(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.overlay()).map_err(to_js_error)
    }

    /// Whether a drag is in progress
    #[wasm_bindgen(getter)]
    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }

    /// Index of the handle being dragged
    #[wasm_bindgen(getter)]
    pub fn active_handle(&self) -> Option<u8> {
        self.inner.active_handle().map(|h| h as u8)
    }

    /// Committed rectangle in source pixels as `[x, y, width, height]`.
    pub fn pixel_crop(
        &self,
        layout: JsValue,
        image_width: u32,
        image_height: u32,
    ) -> Result<Vec<u32>, JsValue> {
        let layout = parse_layout(layout)?;
        let px = self
            .inner
            .pixel_crop(&layout, image_width, image_height)
            .map_err(to_js_error)?;
        Ok(vec![px.x, px.y, px.width, px.height])
    }

    /// Crop `image` to the committed rectangle.
    pub fn crop(&self, image: &JsSourceImage, layout: JsValue) -> Result<JsSourceImage, JsValue> {
        let layout = parse_layout(layout)?;
        Ok(self.crop_with_layout(image, &layout))
    }
}

impl JsCropEditor {
    pub(crate) fn from_parts(
        bounds: Rect,
        config: EditorConfig,
    ) -> Result<Self, cropframe_core::CropError> {
        let config = config.validate()?;
        Ok(Self {
            inner: HandleController::new(bounds, config),
        })
    }

    pub(crate) fn apply_layout(&mut self, layout: &ImageLayout) {
        self.inner.set_layout(layout);
    }

    pub(crate) fn crop_with_layout(
        &self,
        image: &JsSourceImage,
        layout: &ImageLayout,
    ) -> JsSourceImage {
        JsSourceImage::from_source(self.inner.crop(&image.to_source(), layout))
    }
}
