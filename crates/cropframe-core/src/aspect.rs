//! Aspect-ratio constraints for the crop rectangle.

use crate::geometry::{Rect, Size};
use serde::{Deserialize, Serialize};

/// Aspect-ratio lock applied while resizing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum AspectRatio {
    /// Width and height move independently.
    #[default]
    Free,
    /// Locked to `width / height`.
    Fixed(f64),
}

impl AspectRatio {
    /// Fixed ratio from a `width:height` pair.
    pub fn fixed(width: f64, height: f64) -> Self {
        AspectRatio::Fixed(width / height)
    }

    /// The locked ratio, if any.
    pub fn ratio(self) -> Option<f64> {
        match self {
            AspectRatio::Free => None,
            AspectRatio::Fixed(r) => Some(r),
        }
    }

    /// A fixed ratio must be a positive finite number.
    pub fn is_valid(self) -> bool {
        match self {
            AspectRatio::Free => true,
            AspectRatio::Fixed(r) => r.is_finite() && r > 0.0,
        }
    }

    /// Largest rectangle honoring this ratio, centered within `bounds`.
    ///
    /// Whichever bounds dimension binds first caps the size. `Free` returns
    /// `bounds` unchanged.
    pub fn fit_centered(self, bounds: &Rect) -> Rect {
        let Some(r) = self.ratio() else {
            return *bounds;
        };

        let size = if bounds.width / bounds.height > r {
            // Height binds
            Size::new(bounds.height * r, bounds.height)
        } else {
            Size::new(bounds.width, bounds.width / r)
        };

        Rect::from_center_size(bounds.center(), size)
    }
}

/// The fixed set of ratios offered to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectPreset {
    #[default]
    Free,
    /// 19:9
    Wide19x9,
    /// 9:16
    Portrait9x16,
    /// 4:5
    Portrait4x5,
    /// 5:4
    Landscape5x4,
    /// 1:1
    Square,
}

impl AspectPreset {
    pub const ALL: [AspectPreset; 6] = [
        AspectPreset::Free,
        AspectPreset::Wide19x9,
        AspectPreset::Portrait9x16,
        AspectPreset::Portrait4x5,
        AspectPreset::Landscape5x4,
        AspectPreset::Square,
    ];

    pub fn aspect_ratio(self) -> AspectRatio {
        match self {
            AspectPreset::Free => AspectRatio::Free,
            AspectPreset::Wide19x9 => AspectRatio::fixed(19.0, 9.0),
            AspectPreset::Portrait9x16 => AspectRatio::fixed(9.0, 16.0),
            AspectPreset::Portrait4x5 => AspectRatio::fixed(4.0, 5.0),
            AspectPreset::Landscape5x4 => AspectRatio::fixed(5.0, 4.0),
            AspectPreset::Square => AspectRatio::fixed(1.0, 1.0),
        }
    }
}

impl From<u8> for AspectPreset {
    /// Index into [`AspectPreset::ALL`]; unknown values fall back to `Free`.
    fn from(value: u8) -> Self {
        AspectPreset::ALL
            .get(value as usize)
            .copied()
            .unwrap_or(AspectPreset::Free)
    }
}

impl From<AspectPreset> for AspectRatio {
    fn from(preset: AspectPreset) -> Self {
        preset.aspect_ratio()
    }
}
