//! Editor configuration.

use crate::error::CropError;
use serde::{Deserialize, Serialize};

/// Tunables for the crop editor, in editor-space units.
///
/// Every field has a default, so hosts may pass a partial object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Smallest width and height the crop rectangle may shrink to.
    pub min_size: f64,
    /// Distance handles sit outside the rectangle edge.
    pub handle_margin: f64,
    /// Touch radius around a handle's position that counts as a hit.
    pub hit_radius: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_size: 50.0,
            handle_margin: 10.0,
            hit_radius: 22.0,
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that every value is finite and in range.
    pub fn validate(self) -> Result<Self, CropError> {
        if !self.min_size.is_finite() || self.min_size <= 0.0 {
            return Err(CropError::InvalidConfig(format!(
                "min_size must be positive, got {}",
                self.min_size
            )));
        }
        if !self.handle_margin.is_finite() || self.handle_margin < 0.0 {
            return Err(CropError::InvalidConfig(format!(
                "handle_margin must be non-negative, got {}",
                self.handle_margin
            )));
        }
        if !self.hit_radius.is_finite() || self.hit_radius <= 0.0 {
            return Err(CropError::InvalidConfig(format!(
                "hit_radius must be positive, got {}",
                self.hit_radius
            )));
        }
        Ok(self)
    }
}
