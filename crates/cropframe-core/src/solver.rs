//! Constraint solver for handle-driven crop rectangle resizing.
//!
//! [`solve`] is a pure function of the rectangle captured at gesture start and
//! the cumulative drag offset. Callers never feed a previous result back in,
//! so replaying a gesture always lands on the same rectangle and rounding
//! error cannot accumulate across events.
//!
//! # Algorithm
//!
//! Every handle is described per axis by an [`AxisRole`] (see
//! [`HandleKind::roles`]). The rectangle is split into two one-dimensional
//! spans and the same routine runs for every handle:
//!
//! - **Free**: each driven axis moves its edge by the delta, holding the
//!   opposite edge. The extent is floored at `min_size` and capped by the
//!   room left between the anchor and the bounds.
//! - **Fixed ratio, corner**: the axis with the larger relative change drives,
//!   the other extent is derived from the ratio. If the derived extent does not
//!   fit, it is capped and the driving extent is recomputed from it.
//! - **Fixed ratio, edge**: the dragged axis drives, the cross extent is
//!   derived from the ratio and kept centered, then shifted into bounds. A
//!   cross extent larger than the bounds is capped and the driving extent
//!   shrinks to match.
//!
//! The minimum size can push the moving edge past the bounds when the anchor
//! sits close to a bounds edge; the final containment pass then slides the
//! rectangle back inside. Only when the bounds themselves are smaller than the
//! minimum does staying inside win and the minimum get relaxed.

use crate::aspect::AspectRatio;
use crate::geometry::{Offset, Rect, EPSILON};
use crate::handle::{AxisRole, HandleKind};

/// One axis of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    start: f64,
    len: f64,
}

impl Span {
    #[inline]
    fn end(self) -> f64 {
        self.start + self.len
    }

    #[inline]
    fn center(self) -> f64 {
        self.start + self.len / 2.0
    }
}

fn spans(rect: &Rect) -> (Span, Span) {
    (
        Span {
            start: rect.x,
            len: rect.width,
        },
        Span {
            start: rect.y,
            len: rect.height,
        },
    )
}

fn from_spans(x: Span, y: Span) -> Rect {
    Rect::new(x.start, y.start, x.len, y.len)
}

/// A driven axis: its current span, the bounds on that axis, the drag delta
/// and the role of the handle on it.
#[derive(Debug, Clone, Copy)]
struct DrivenAxis {
    role: AxisRole,
    span: Span,
    bounds: Span,
    delta: f64,
}

impl DrivenAxis {
    /// Coordinate held fixed while the handle moves.
    fn anchor(&self) -> f64 {
        match self.role {
            AxisRole::Start => self.span.end(),
            AxisRole::End => self.span.start,
            AxisRole::Centered => self.span.center(),
        }
    }

    /// Largest extent that keeps the moving edge inside the bounds.
    fn available(&self) -> f64 {
        let anchor = self.anchor();
        let room = match self.role {
            AxisRole::Start => anchor - self.bounds.start,
            AxisRole::End => self.bounds.end() - anchor,
            AxisRole::Centered => self.bounds.len,
        };
        room.max(0.0)
    }

    /// Extent the drag asks for before any clamping. May be negative when the
    /// handle has been dragged past the anchor.
    fn requested(&self) -> f64 {
        match self.role {
            AxisRole::Start => self.span.len - self.delta,
            AxisRole::End => self.span.len + self.delta,
            AxisRole::Centered => self.span.len,
        }
    }

    /// Relative change `|delta| / extent`, used to pick the dominant axis.
    fn relative_change(&self) -> f64 {
        if self.span.len > EPSILON {
            self.delta.abs() / self.span.len
        } else {
            self.delta.abs()
        }
    }

    /// Span of `extent` hanging off the anchor.
    fn place(&self, extent: f64) -> Span {
        let anchor = self.anchor();
        match self.role {
            AxisRole::Start => Span {
                start: anchor - extent,
                len: extent,
            },
            AxisRole::End => Span {
                start: anchor,
                len: extent,
            },
            AxisRole::Centered => Span {
                start: anchor - extent / 2.0,
                len: extent,
            },
        }
    }
}

/// Compute the rectangle produced by dragging `handle` by `delta`.
///
/// # Arguments
///
/// * `initial` - Rectangle captured when the gesture began
/// * `handle` - Handle being dragged
/// * `delta` - Cumulative translation since the gesture began
/// * `ratio` - Aspect-ratio lock (invalid fixed ratios behave as `Free`)
/// * `bounds` - Visible image area the result must stay inside
/// * `min_size` - Smallest allowed width and height
///
/// # Returns
///
/// The resized rectangle. Handles never swap roles: dragging past the anchor
/// stops at `min_size`.
pub fn solve(
    initial: Rect,
    handle: HandleKind,
    delta: Offset,
    ratio: AspectRatio,
    bounds: Rect,
    min_size: f64,
) -> Rect {
    let initial = initial.constrain_to(&bounds);
    let min_size = min_size.max(0.0);
    let (x_span, y_span) = spans(&initial);
    let (x_bounds, y_bounds) = spans(&bounds);
    let (x_role, y_role) = handle.roles();

    let x = DrivenAxis {
        role: x_role,
        span: x_span,
        bounds: x_bounds,
        delta: delta.dx,
    };
    let y = DrivenAxis {
        role: y_role,
        span: y_span,
        bounds: y_bounds,
        delta: delta.dy,
    };

    let locked = ratio.ratio().filter(|r| r.is_finite() && *r > 0.0);

    let result = match (locked, x_role.is_free(), y_role.is_free()) {
        (None, _, _) => from_spans(resize_free(&x, min_size), resize_free(&y, min_size)),
        (Some(r), true, true) => resize_corner_locked(&x, &y, r, min_size),
        // Width drives, height = width / r
        (Some(r), true, false) => {
            let (w, h) = resize_edge_locked(&x, &y, 1.0 / r, min_size);
            from_spans(w, h)
        }
        // Height drives, width = height * r
        (Some(r), false, true) => {
            let (h, w) = resize_edge_locked(&y, &x, r, min_size);
            from_spans(w, h)
        }
        (Some(_), false, false) => initial,
    };

    result.constrain_to(&bounds)
}

fn resize_free(axis: &DrivenAxis, min_size: f64) -> Span {
    if !axis.role.is_free() {
        return axis.span;
    }
    let extent = axis
        .requested()
        .min(axis.available())
        .max(min_size)
        .min(axis.bounds.len);
    axis.place(extent)
}

/// Smallest `(width, height)` with the given ratio where both are at least
/// `min_size`.
fn min_locked_size(ratio: f64, min_size: f64) -> (f64, f64) {
    if ratio >= 1.0 {
        (min_size * ratio, min_size)
    } else {
        (min_size, min_size / ratio)
    }
}

fn resize_corner_locked(x: &DrivenAxis, y: &DrivenAxis, ratio: f64, min_size: f64) -> Rect {
    let avail_w = x.available();
    let avail_h = y.available();

    // Drive from the dominant axis
    let (mut w, mut h) = if x.relative_change() >= y.relative_change() {
        let w = x.requested().min(avail_w);
        (w, w / ratio)
    } else {
        let h = y.requested().min(avail_h);
        (h * ratio, h)
    };

    // Correct from the other axis if the derived extent overflows
    if h > avail_h {
        h = avail_h;
        w = h * ratio;
    }
    if w > avail_w {
        w = avail_w;
        h = w / ratio;
    }

    let (min_w, min_h) = min_locked_size(ratio, min_size);
    if w < min_w || h < min_h {
        w = min_w;
        h = min_h;
    }

    // Bounds smaller than the minimum: shrink back in, keeping the ratio
    if w > x.bounds.len || h > y.bounds.len {
        let scale = (x.bounds.len / w).min(y.bounds.len / h);
        w *= scale;
        h *= scale;
    }

    from_spans(x.place(w), y.place(h))
}

/// Resize along `drive`, deriving the cross extent as `drive * factor`.
///
/// Returns `(drive span, cross span)`.
fn resize_edge_locked(
    drive: &DrivenAxis,
    cross: &DrivenAxis,
    factor: f64,
    min_size: f64,
) -> (Span, Span) {
    // Both extents must reach min_size: drive >= min and drive * factor >= min
    let min_drive = min_size.max(min_size / factor);
    let mut drive_len = drive
        .requested()
        .min(drive.available())
        .max(min_drive)
        .min(drive.bounds.len);
    let mut cross_len = drive_len * factor;

    if cross_len > cross.bounds.len {
        cross_len = cross.bounds.len;
        drive_len = cross_len / factor;
    }

    let centered = cross.span.center() - cross_len / 2.0;
    let cross_start = centered
        .min(cross.bounds.end() - cross_len)
        .max(cross.bounds.start);

    (
        drive.place(drive_len),
        Span {
            start: cross_start,
            len: cross_len,
        },
    )
}


// ============================================================================
// Property-Based Tests
// ============================================================================
