//! Pixel-space transforms applied when a crop is committed.
//!
//! # Coordinate System
//!
//! - Crop rectangles are in integer source pixels ([`PixelCropRect`])
//! - Origin is the top-left corner
//! - Orientation tags are carried through untouched; pixels are cropped in
//!   storage order
//!
//! [`PixelCropRect`]: crate::mapper::PixelCropRect

mod crop;

pub use crop::{crop_from_editor, extract, try_extract};
