//! Cropframe Core - constrained crop-rectangle editor
//!
//! This crate provides the geometry behind an interactive crop tool: an
//! eight-handle resize solver with optional aspect-ratio lock, the drag
//! session state machine, the mapping from editor coordinates onto the pixels
//! of a panned/zoomed image, and the final pixel extraction.
//!
//! # Data Flow
//!
//! 1. Gesture events reach the [`HandleController`]
//! 2. The controller runs [`solve`] against the rectangle captured at
//!    gesture start
//! 3. On commit, the [`CoordinateMapper`] turns the rectangle into a
//!    [`PixelCropRect`]
//! 4. [`extract`] cuts that region out of the [`SourceImage`]
//!
//! Everything is synchronous and allocation-light; the only state is the
//! controller's single drag session.

pub mod aspect;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod handle;
pub mod mapper;
pub mod solver;
pub mod source;
pub mod transform;

pub use aspect::{AspectPreset, AspectRatio};
pub use config::EditorConfig;
pub use controller::{
    DragState, EditSession, GestureEvent, GesturePhase, HandleController, HandlePosition,
    OverlayState,
};
pub use error::CropError;
pub use geometry::{Offset, Point, Rect, Size};
pub use handle::{AxisRole, HandleKind};
pub use mapper::{CoordinateMapper, ImageLayout, PixelCropRect};
pub use solver::solve;
pub use source::{Orientation, SourceImage};
pub use transform::{crop_from_editor, extract, try_extract};
