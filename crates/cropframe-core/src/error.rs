//! Error types for the crop editor.

use crate::handle::HandleKind;
use thiserror::Error;

/// Errors produced by the crop editor.
///
/// None of these are fatal. Callers recover by keeping the current rectangle
/// or by falling back to the original, uncropped image.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CropError {
    /// The visible image frame has no area, so editor coordinates cannot be
    /// mapped onto the image.
    #[error("Visible image frame has zero area")]
    DegenerateVisibleArea,

    /// The pixel sub-region could not be extracted.
    #[error("Crop extraction failed: {0}")]
    ExtractionFailure(String),

    /// A gesture event arrived for a handle that does not own the session.
    #[error("Gesture for {received:?} ignored (active handle: {active:?})")]
    InvalidHandleSession {
        active: Option<HandleKind>,
        received: HandleKind,
    },

    /// An editor configuration value is out of range.
    #[error("Invalid editor configuration: {0}")]
    InvalidConfig(String),
}
