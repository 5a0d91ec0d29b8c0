//! Editor-space geometry primitives.
//!
//! All values are `f64` in editor units. The origin is the top-left corner,
//! `x` grows to the right and `y` grows downward.

use serde::{Deserialize, Serialize};

/// Tolerance used when comparing editor-space coordinates.
pub const EPSILON: f64 = 1e-9;

/// A position in editor space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A translation in editor space, e.g. the cumulative drag since gesture start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { dx: 0.0, dy: 0.0 };

    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// Width and height pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in editor space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of `size` centered on `center`.
    pub fn from_center_size(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True when both extents are positive and every component is finite.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// True when the rectangle has no area.
    pub fn is_degenerate(&self) -> bool {
        self.width <= EPSILON || self.height <= EPSILON
    }

    /// Overlapping region of two rectangles.
    ///
    /// Disjoint rectangles produce a zero-sized rectangle positioned at the
    /// clamped origin rather than a negative extent.
    pub fn intersection(&self, other: &Rect) -> Rect {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rect::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
    }

    /// Whether `other` lies completely inside `self` (within [`EPSILON`]).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x - EPSILON
            && other.y >= self.y - EPSILON
            && other.right() <= self.right() + EPSILON
            && other.bottom() <= self.bottom() + EPSILON
    }

    /// Move and, if needed, shrink the rectangle so it lies inside `bounds`.
    ///
    /// Extents larger than the bounds are capped first, then the origin is
    /// shifted inward. A rectangle already inside `bounds` is returned as is.
    pub fn constrain_to(&self, bounds: &Rect) -> Rect {
        let width = self.width.min(bounds.width);
        let height = self.height.min(bounds.height);
        // min-then-max so rounding in `right() - width` never inverts the range
        let x = self.x.min(bounds.right() - width).max(bounds.x);
        let y = self.y.min(bounds.bottom() - height).max(bounds.y);
        Rect::new(x, y, width, height)
    }

    /// Component-wise comparison within `tolerance`.
    pub fn approx_eq(&self, other: &Rect, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 70.0);
        assert_eq!(r.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn test_from_center_size() {
        let r = Rect::from_center_size(Point::new(50.0, 50.0), Size::new(20.0, 10.0));
        assert_eq!(r, Rect::new(40.0, 45.0, 20.0, 10.0));
    }

    #[test]
    fn test_validity() {
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).is_valid());
        assert!(!Rect::new(0.0, 0.0, 0.0, 1.0).is_valid());
        assert!(!Rect::new(0.0, 0.0, -1.0, 1.0).is_valid());
        assert!(!Rect::new(f64::NAN, 0.0, 1.0, 1.0).is_valid());
    }

    #[test]
    fn test_intersection_overlapping() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 25.0, 100.0, 100.0);
        assert_eq!(a.intersection(&b), Rect::new(50.0, 25.0, 50.0, 75.0));
    }

    #[test]
    fn test_intersection_disjoint_is_degenerate() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 20.0, 10.0, 10.0);
        let i = a.intersection(&b);
        assert!(i.is_degenerate());
        assert_eq!((i.width, i.height), (0.0, 0.0));
    }

    #[test]
    fn test_contains() {
        let bounds = Rect::new(0.0, 0.0, 300.0, 300.0);
        assert!(bounds.contains_rect(&Rect::new(0.0, 0.0, 300.0, 300.0)));
        assert!(bounds.contains_rect(&Rect::new(50.0, 50.0, 100.0, 100.0)));
        assert!(!bounds.contains_rect(&Rect::new(250.0, 50.0, 100.0, 100.0)));
    }

    #[test]
    fn test_constrain_shifts_inside() {
        let bounds = Rect::new(0.0, 0.0, 300.0, 300.0);
        let r = Rect::new(250.0, -20.0, 100.0, 100.0).constrain_to(&bounds);
        assert_eq!(r, Rect::new(200.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_constrain_caps_oversized() {
        let bounds = Rect::new(10.0, 10.0, 100.0, 50.0);
        let r = Rect::new(0.0, 0.0, 500.0, 500.0).constrain_to(&bounds);
        assert_eq!(r, bounds);
    }

    #[test]
    fn test_constrain_keeps_inner_rect() {
        let bounds = Rect::new(0.0, 0.0, 300.0, 300.0);
        let r = Rect::new(50.0, 50.0, 100.0, 100.0);
        assert_eq!(r.constrain_to(&bounds), r);
    }

    #[test]
    fn test_distance() {
        assert_eq!(Point::new(0.0, 0.0).distance_to(Point::new(3.0, 4.0)), 5.0);
    }
}
