//! Mapping between editor space and source-image pixel space.
//!
//! The image layer may be panned or zoomed so that only part of it shows
//! inside its container. A crop rectangle drawn in the editor is therefore
//! first expressed as fractions of the *visible* image frame, and those
//! fractions are then composed with the fraction of the full image the visible
//! frame covers:
//!
//! ```text
//! rel      = (rect - visible.origin) / visible.size
//! visible% = (visible - frame.origin) / frame.size
//! final    = visible%.origin + rel * visible%.size
//! pixels   = round(final * image_size), clamped to the image
//! ```
//!
//! Rotation of the image layer is not taken into account; only pan and zoom
//! affect the mapping.

use crate::error::CropError;
use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Crop rectangle in source-image pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelCropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelCropRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whole-image crop.
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clip to an image of `width × height`. The result may be empty.
    pub fn clamp_to(&self, width: u32, height: u32) -> PixelCropRect {
        let x = self.x.min(width);
        let y = self.y.min(height);
        let right = self.right().min(width);
        let bottom = self.bottom().min(height);
        PixelCropRect::new(x, y, right - x, bottom - y)
    }
}

/// Snapshot of the image host's layout, in editor space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageLayout {
    /// Frame of the whole image layer after pan and zoom. May extend past the
    /// container.
    pub image_frame: Rect,
    /// Bounds of the view that clips the image layer.
    pub container: Rect,
}

impl ImageLayout {
    pub fn new(image_frame: Rect, container: Rect) -> Self {
        Self {
            image_frame,
            container,
        }
    }

    /// Portion of the image layer currently inside the container.
    ///
    /// This is also the bounds the crop rectangle is solved against.
    pub fn visible_frame(&self) -> Rect {
        self.image_frame.intersection(&self.container)
    }

    /// Visible frame as fractions of the full image layer.
    fn visible_fraction(&self, visible: &Rect) -> Rect {
        let frame = &self.image_frame;
        Rect::new(
            (visible.x - frame.x) / frame.width,
            (visible.y - frame.y) / frame.height,
            visible.width / frame.width,
            visible.height / frame.height,
        )
    }
}

/// Converts crop rectangles between editor space and pixel space for one
/// layout and one image size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    layout: ImageLayout,
    image_width: u32,
    image_height: u32,
}

impl CoordinateMapper {
    pub fn new(layout: ImageLayout, image_width: u32, image_height: u32) -> Self {
        Self {
            layout,
            image_width,
            image_height,
        }
    }

    /// Visible frame, rejecting layouts where it has no area.
    fn checked_visible(&self) -> Result<Rect, CropError> {
        let visible = self.layout.visible_frame();
        if visible.is_degenerate() || !visible.is_valid() {
            return Err(CropError::DegenerateVisibleArea);
        }
        Ok(visible)
    }

    /// Map an editor-space rectangle to source pixels.
    ///
    /// Edges are rounded independently, so adjacent crops share edges. Parts of
    /// the rectangle that fall outside the image are clipped.
    ///
    /// # Errors
    ///
    /// [`CropError::DegenerateVisibleArea`] when the visible frame has zero
    /// area.
    pub fn editor_to_pixel(&self, rect: &Rect) -> Result<PixelCropRect, CropError> {
        let visible = self.checked_visible()?;

        // Position relative to the visible frame
        let rel = Rect::new(
            (rect.x - visible.x) / visible.width,
            (rect.y - visible.y) / visible.height,
            rect.width / visible.width,
            rect.height / visible.height,
        );

        // Compose with the visible frame's share of the full image
        let vis = self.layout.visible_fraction(&visible);
        let fx = vis.x + rel.x * vis.width;
        let fy = vis.y + rel.y * vis.height;
        let fw = rel.width * vis.width;
        let fh = rel.height * vis.height;

        let img_w = self.image_width as f64;
        let img_h = self.image_height as f64;
        let left = to_pixel(fx * img_w, img_w);
        let top = to_pixel(fy * img_h, img_h);
        let right = to_pixel((fx + fw) * img_w, img_w);
        let bottom = to_pixel((fy + fh) * img_h, img_h);

        Ok(PixelCropRect::new(
            left,
            top,
            right.saturating_sub(left),
            bottom.saturating_sub(top),
        ))
    }

    /// Map a pixel rectangle back into editor space.
    ///
    /// # Errors
    ///
    /// [`CropError::DegenerateVisibleArea`] when the visible frame or the image
    /// has zero area.
    pub fn pixel_to_editor(&self, pixel: &PixelCropRect) -> Result<Rect, CropError> {
        let visible = self.checked_visible()?;
        if self.image_width == 0 || self.image_height == 0 {
            return Err(CropError::DegenerateVisibleArea);
        }

        let img_w = self.image_width as f64;
        let img_h = self.image_height as f64;
        let vis = self.layout.visible_fraction(&visible);

        let rel_x = (pixel.x as f64 / img_w - vis.x) / vis.width;
        let rel_y = (pixel.y as f64 / img_h - vis.y) / vis.height;
        let rel_w = (pixel.width as f64 / img_w) / vis.width;
        let rel_h = (pixel.height as f64 / img_h) / vis.height;

        Ok(Rect::new(
            visible.x + rel_x * visible.width,
            visible.y + rel_y * visible.height,
            rel_w * visible.width,
            rel_h * visible.height,
        ))
    }
}

#[inline]
fn to_pixel(value: f64, max: f64) -> u32 {
    value.round().clamp(0.0, max) as u32
}


// ============================================================================
// Property-Based Tests
// ============================================================================
