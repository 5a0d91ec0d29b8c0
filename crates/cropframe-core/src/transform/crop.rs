//! Crop extraction in pixel space.
//!
//! Cuts a [`PixelCropRect`] out of a [`SourceImage`]. Out-of-bounds
//! rectangles are clipped to the image; an empty result falls back to the
//! original image rather than producing a zero-sized buffer.
//!
//! # Example
//!
//! ```ignore
//! let cropped = extract(&image, PixelCropRect::new(200, 200, 100, 100));
//! ```

use crate::error::CropError;
use crate::geometry::Rect;
use crate::mapper::{CoordinateMapper, ImageLayout, PixelCropRect};
use crate::source::SourceImage;

/// Extract a pixel region, surfacing failures.
///
/// # Behavior
///
/// - The rectangle is clamped to the image bounds
/// - A clamped rectangle with zero area returns a copy of the original
/// - Full-image rectangles return a copy of the original
/// - Scale factor and orientation are copied from the source
///
/// # Errors
///
/// [`CropError::ExtractionFailure`] when the pixel buffer is shorter than the
/// image dimensions require.
pub fn try_extract(image: &SourceImage, rect: PixelCropRect) -> Result<SourceImage, CropError> {
    let clamped = rect.clamp_to(image.width, image.height);

    // Fast path: nothing to cut away, or nothing left to keep
    if clamped.is_empty() || clamped == PixelCropRect::full(image.width, image.height) {
        return Ok(image.clone());
    }

    let rgb = image.to_rgb_image().ok_or_else(|| {
        CropError::ExtractionFailure(format!(
            "pixel buffer holds {} bytes, {}x{} RGB needs {}",
            image.pixels.len(),
            image.width,
            image.height,
            image.pixel_count() * 3
        ))
    })?;

    let cropped = image::imageops::crop_imm(
        &rgb,
        clamped.x,
        clamped.y,
        clamped.width,
        clamped.height,
    )
    .to_image();

    Ok(SourceImage::from_rgb_image(cropped).with_metadata(image.scale, image.orientation))
}

/// Extract a pixel region, falling back to the original image on failure.
///
/// Failures are logged, never returned.
pub fn extract(image: &SourceImage, rect: PixelCropRect) -> SourceImage {
    match try_extract(image, rect) {
        Ok(cropped) => cropped,
        Err(err) => {
            log::warn!("{err}; keeping the uncropped image");
            image.clone()
        }
    }
}

/// Map an editor-space rectangle onto `image` and extract it.
///
/// A layout with no visible image area yields the original image.
pub fn crop_from_editor(image: &SourceImage, rect: &Rect, layout: &ImageLayout) -> SourceImage {
    let mapper = CoordinateMapper::new(*layout, image.width, image.height);
    match mapper.editor_to_pixel(rect) {
        Ok(pixel_rect) => {
            log::debug!("committing crop {pixel_rect:?} from editor rect {rect:?}");
            extract(image, pixel_rect)
        }
        Err(err) => {
            log::warn!("{err}; keeping the uncropped image");
            image.clone()
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
