//! The eight resize handles and their per-axis behavior.
//!
//! Each handle is described by one [`AxisRole`] per axis. The solver and the
//! handle layout are written once against this table instead of once per
//! handle.

use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// What a handle does to one axis of the rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisRole {
    /// Moves the min edge (left/top); the max edge is the anchor.
    Start,
    /// Moves the max edge (right/bottom); the min edge is the anchor.
    End,
    /// Not driven by the handle. Under a ratio lock the extent is derived and
    /// kept centered on the rectangle's own center.
    Centered,
}

impl AxisRole {
    /// Whether dragging moves an edge on this axis.
    pub fn is_free(self) -> bool {
        !matches!(self, AxisRole::Centered)
    }
}

/// A resize handle: four corners and four edge midpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum HandleKind {
    TopLeft = 0,
    TopRight = 1,
    BottomLeft = 2,
    BottomRight = 3,
    Top = 4,
    Bottom = 5,
    Left = 6,
    Right = 7,
}

impl HandleKind {
    pub const ALL: [HandleKind; 8] = [
        HandleKind::TopLeft,
        HandleKind::TopRight,
        HandleKind::BottomLeft,
        HandleKind::BottomRight,
        HandleKind::Top,
        HandleKind::Bottom,
        HandleKind::Left,
        HandleKind::Right,
    ];

    /// `(x role, y role)` for this handle.
    pub const fn roles(self) -> (AxisRole, AxisRole) {
        use AxisRole::*;
        match self {
            HandleKind::TopLeft => (Start, Start),
            HandleKind::TopRight => (End, Start),
            HandleKind::BottomLeft => (Start, End),
            HandleKind::BottomRight => (End, End),
            HandleKind::Top => (Centered, Start),
            HandleKind::Bottom => (Centered, End),
            HandleKind::Left => (Start, Centered),
            HandleKind::Right => (End, Centered),
        }
    }

    /// The point that stays fixed while this handle is dragged.
    ///
    /// For corners this is the diagonally opposite corner; for edges it is the
    /// midpoint of the opposite edge.
    pub fn anchor(self, rect: &Rect) -> Point {
        let (x, y) = self.roles();
        Point::new(
            anchor_coord(x, rect.x, rect.right()),
            anchor_coord(y, rect.y, rect.bottom()),
        )
    }

    /// Screen position of the handle for `rect`.
    ///
    /// Corners are pushed outward by `margin` on both axes, edge handles only
    /// on the axis perpendicular to their edge.
    pub fn position(self, rect: &Rect, margin: f64) -> Point {
        let (x, y) = self.roles();
        Point::new(
            handle_coord(x, rect.x, rect.right(), margin),
            handle_coord(y, rect.y, rect.bottom(), margin),
        )
    }
}

impl TryFrom<u8> for HandleKind {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        HandleKind::ALL.get(value as usize).copied().ok_or(value)
    }
}

fn handle_coord(role: AxisRole, min: f64, max: f64, margin: f64) -> f64 {
    match role {
        AxisRole::Start => min - margin,
        AxisRole::End => max + margin,
        AxisRole::Centered => (min + max) / 2.0,
    }
}

fn anchor_coord(role: AxisRole, min: f64, max: f64) -> f64 {
    match role {
        AxisRole::Start => max,
        AxisRole::End => min,
        AxisRole::Centered => (min + max) / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_classification() {
        let corners = HandleKind::ALL
            .iter()
            .filter(|h| {
                let (x, y) = h.roles();
                x.is_free() && y.is_free()
            })
            .count();
        assert_eq!(corners, 4);
        assert_eq!(HandleKind::Top.roles(), (AxisRole::Centered, AxisRole::Start));
        assert_eq!(HandleKind::BottomLeft.roles(), (AxisRole::Start, AxisRole::End));
    }

    #[test]
    fn test_try_from_u8() {
        assert_eq!(HandleKind::try_from(3), Ok(HandleKind::BottomRight));
        assert_eq!(HandleKind::try_from(7), Ok(HandleKind::Right));
        assert_eq!(HandleKind::try_from(8), Err(8));
        for h in HandleKind::ALL {
            assert_eq!(HandleKind::try_from(h as u8), Ok(h));
        }
    }

    #[test]
    fn test_corner_positions_offset_both_axes() {
        let r = Rect::new(50.0, 50.0, 100.0, 100.0);
        assert_eq!(HandleKind::TopLeft.position(&r, 10.0), Point::new(40.0, 40.0));
        assert_eq!(HandleKind::TopRight.position(&r, 10.0), Point::new(160.0, 40.0));
        assert_eq!(HandleKind::BottomLeft.position(&r, 10.0), Point::new(40.0, 160.0));
        assert_eq!(HandleKind::BottomRight.position(&r, 10.0), Point::new(160.0, 160.0));
    }

    #[test]
    fn test_edge_positions_offset_perpendicular_only() {
        let r = Rect::new(50.0, 50.0, 100.0, 100.0);
        assert_eq!(HandleKind::Top.position(&r, 10.0), Point::new(100.0, 40.0));
        assert_eq!(HandleKind::Bottom.position(&r, 10.0), Point::new(100.0, 160.0));
        assert_eq!(HandleKind::Left.position(&r, 10.0), Point::new(40.0, 100.0));
        assert_eq!(HandleKind::Right.position(&r, 10.0), Point::new(160.0, 100.0));
    }

    #[test]
    fn test_anchors_are_opposite() {
        let r = Rect::new(0.0, 0.0, 10.0, 20.0);
        assert_eq!(HandleKind::TopLeft.anchor(&r), Point::new(10.0, 20.0));
        assert_eq!(HandleKind::BottomRight.anchor(&r), Point::new(0.0, 0.0));
        assert_eq!(HandleKind::Left.anchor(&r), Point::new(10.0, 10.0));
        assert_eq!(HandleKind::Bottom.anchor(&r), Point::new(5.0, 0.0));
    }
}
