//! Handle controller: owns the crop rectangle and the single drag session.
//!
//! The controller is a two-state machine:
//!
//! ```text
//!            Began(h)                    Ended(h)
//!   Idle ──────────────▶ Dragging(h) ──────────────▶ Idle   (result kept)
//!                          │   ▲
//!                Changed(h)│   │          Cancelled(h)
//!                          └───┘       ──────────────▶ Idle (rect restored)
//! ```
//!
//! While a session is active, events for any other handle (and a second
//! `Began`) are rejected with [`CropError::InvalidHandleSession`] and leave the
//! rectangle untouched.

use crate::aspect::AspectRatio;
use crate::config::EditorConfig;
use crate::error::CropError;
use crate::geometry::{Offset, Point, Rect};
use crate::handle::HandleKind;
use crate::mapper::{CoordinateMapper, ImageLayout, PixelCropRect};
use crate::solver::solve;
use crate::source::SourceImage;
use crate::transform::crop_from_editor;
use serde::{Deserialize, Serialize};

/// Phase of a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// One event from the gesture source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureEvent {
    pub handle: HandleKind,
    pub phase: GesturePhase,
    /// Cumulative translation since the gesture began.
    pub translation: Offset,
}

impl GestureEvent {
    pub fn new(handle: HandleKind, phase: GesturePhase, translation: Offset) -> Self {
        Self {
            handle,
            phase,
            translation,
        }
    }
}

/// State captured for one drag gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditSession {
    /// Rectangle when the gesture began. Every update is solved from this,
    /// and a cancel restores it.
    pub initial_rect: Rect,
    pub handle: HandleKind,
    pub min_size: f64,
}

impl EditSession {
    /// Rectangle for the given cumulative translation.
    pub fn resolve(&self, translation: Offset, ratio: AspectRatio, bounds: Rect) -> Rect {
        solve(
            self.initial_rect,
            self.handle,
            translation,
            ratio,
            bounds,
            self.min_size,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(EditSession),
}

/// Where a handle should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandlePosition {
    pub handle: HandleKind,
    pub position: Point,
}

/// Everything the overlay renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayState {
    pub rect: Rect,
    pub bounds: Rect,
    pub handles: Vec<HandlePosition>,
}

#[derive(Debug, Clone)]
pub struct HandleController {
    rect: Rect,
    bounds: Rect,
    ratio: AspectRatio,
    config: EditorConfig,
    state: DragState,
}

impl HandleController {
    /// Controller whose rectangle initially covers the whole of `bounds`.
    pub fn new(bounds: Rect, config: EditorConfig) -> Self {
        Self::with_rect(bounds, bounds, config)
    }

    /// Controller starting from an existing rectangle, pulled inside `bounds`.
    pub fn with_rect(rect: Rect, bounds: Rect, config: EditorConfig) -> Self {
        Self {
            rect: rect.constrain_to(&bounds),
            bounds,
            ratio: AspectRatio::Free,
            config,
            state: DragState::Idle,
        }
    }

    /// The published rectangle, including any in-progress drag.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The last committed rectangle; differs from [`rect`](Self::rect) only
    /// during a drag.
    pub fn committed_rect(&self) -> Rect {
        match self.state {
            DragState::Dragging(session) => session.initial_rect,
            DragState::Idle => self.rect,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.ratio
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn active_handle(&self) -> Option<HandleKind> {
        match self.state {
            DragState::Dragging(session) => Some(session.handle),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Positions of all eight handles for the current rectangle.
    pub fn handle_positions(&self) -> [HandlePosition; 8] {
        HandleKind::ALL.map(|handle| HandlePosition {
            handle,
            position: handle.position(&self.rect, self.config.handle_margin),
        })
    }

    pub fn overlay(&self) -> OverlayState {
        OverlayState {
            rect: self.rect,
            bounds: self.bounds,
            handles: self.handle_positions().to_vec(),
        }
    }

    /// Handle closest to `point` within the configured hit radius.
    pub fn hit_test(&self, point: Point) -> Option<HandleKind> {
        self.handle_positions()
            .iter()
            .map(|hp| (hp.handle, hp.position.distance_to(point)))
            .filter(|(_, distance)| *distance <= self.config.hit_radius)
            .fold(None, |best: Option<(HandleKind, f64)>, candidate| match best {
                Some((_, best_distance)) if best_distance <= candidate.1 => best,
                _ => Some(candidate),
            })
            .map(|(handle, _)| handle)
    }

    /// Start dragging `handle`.
    pub fn begin(&mut self, handle: HandleKind) -> Result<Rect, CropError> {
        if let DragState::Dragging(session) = self.state {
            return Err(self.reject(Some(session.handle), handle));
        }

        self.state = DragState::Dragging(EditSession {
            initial_rect: self.rect,
            handle,
            min_size: self.config.min_size,
        });
        log::debug!("drag began on {handle:?} from {:?}", self.rect);
        Ok(self.rect)
    }

    /// Apply the cumulative `translation` of the active drag.
    pub fn update(&mut self, handle: HandleKind, translation: Offset) -> Result<Rect, CropError> {
        let session = self.session_for(handle)?;
        self.rect = session.resolve(translation, self.ratio, self.bounds);
        Ok(self.rect)
    }

    /// Finish the drag, keeping the published rectangle.
    pub fn end(&mut self, handle: HandleKind) -> Result<Rect, CropError> {
        self.session_for(handle)?;
        self.state = DragState::Idle;
        log::debug!("drag ended on {handle:?} at {:?}", self.rect);
        Ok(self.rect)
    }

    /// Abort the drag, restoring the rectangle from before it began.
    pub fn cancel(&mut self, handle: HandleKind) -> Result<Rect, CropError> {
        let session = self.session_for(handle)?;
        self.rect = session.initial_rect;
        self.state = DragState::Idle;
        log::debug!("drag cancelled on {handle:?}, restored {:?}", self.rect);
        Ok(self.rect)
    }

    /// Dispatch a gesture event to the matching phase method.
    ///
    /// `Ended` applies its final translation before committing.
    pub fn apply(&mut self, event: GestureEvent) -> Result<Rect, CropError> {
        match event.phase {
            GesturePhase::Began => self.begin(event.handle),
            GesturePhase::Changed => self.update(event.handle, event.translation),
            GesturePhase::Ended => {
                self.update(event.handle, event.translation)?;
                self.end(event.handle)
            }
            GesturePhase::Cancelled => self.cancel(event.handle),
        }
    }

    /// Switch the aspect-ratio lock.
    ///
    /// Any active drag is cancelled first. The rectangle becomes the largest
    /// one with the new ratio centered in the bounds. Invalid ratios are
    /// ignored.
    pub fn set_aspect_ratio(&mut self, ratio: AspectRatio) -> Rect {
        if !ratio.is_valid() {
            log::warn!("ignoring invalid aspect ratio {ratio:?}");
            return self.rect;
        }
        if let DragState::Dragging(session) = self.state {
            self.rect = session.initial_rect;
            self.state = DragState::Idle;
            log::debug!("drag on {:?} dropped by ratio change", session.handle);
        }
        self.ratio = ratio;
        self.rect = ratio.fit_centered(&self.bounds);
        self.rect
    }

    /// New bounds after a layout, pan or zoom change.
    ///
    /// Outside a drag the rectangle is pulled inside the new bounds; during a
    /// drag the next update is solved against them. A locked ratio survives:
    /// if capping changed it, the rectangle shrinks about its center.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        if self.is_dragging() {
            return;
        }
        let constrained = self.rect.constrain_to(&bounds);
        self.rect = match self.ratio.ratio() {
            Some(r) if (constrained.width / constrained.height - r).abs() > 1e-6 => {
                self.ratio.fit_centered(&constrained)
            }
            _ => constrained,
        };
    }

    /// Use the visible frame of `layout` as the bounds.
    pub fn set_layout(&mut self, layout: &ImageLayout) {
        self.set_bounds(layout.visible_frame());
    }

    /// Committed rectangle in source pixels.
    pub fn pixel_crop(
        &self,
        layout: &ImageLayout,
        image_width: u32,
        image_height: u32,
    ) -> Result<PixelCropRect, CropError> {
        CoordinateMapper::new(*layout, image_width, image_height)
            .editor_to_pixel(&self.committed_rect())
    }

    /// Crop `image` to the committed rectangle, falling back to the original.
    pub fn crop(&self, image: &SourceImage, layout: &ImageLayout) -> SourceImage {
        crop_from_editor(image, &self.committed_rect(), layout)
    }

    fn session_for(&self, handle: HandleKind) -> Result<EditSession, CropError> {
        match self.state {
            DragState::Dragging(session) if session.handle == handle => Ok(session),
            DragState::Dragging(session) => Err(self.reject(Some(session.handle), handle)),
            DragState::Idle => Err(self.reject(None, handle)),
        }
    }

    fn reject(&self, active: Option<HandleKind>, received: HandleKind) -> CropError {
        log::debug!("ignoring gesture for {received:?} (active: {active:?})");
        CropError::InvalidHandleSession { active, received }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Rect = Rect::new(0.0, 0.0, 300.0, 300.0);
    const START: Rect = Rect::new(50.0, 50.0, 100.0, 100.0);

    fn controller() -> HandleController {
        HandleController::with_rect(START, BOUNDS, EditorConfig::default())
    }

    fn event(handle: HandleKind, phase: GesturePhase, dx: f64, dy: f64) -> GestureEvent {
        GestureEvent::new(handle, phase, Offset::new(dx, dy))
    }

    #[test]
    fn test_drag_updates_from_initial_rect() {
        let mut c = controller();
        c.begin(HandleKind::BottomRight).unwrap();
        c.update(HandleKind::BottomRight, Offset::new(20.0, 20.0))
            .unwrap();
        // Cumulative, not incremental: the second update replaces the first
        let r = c
            .update(HandleKind::BottomRight, Offset::new(40.0, 40.0))
            .unwrap();
        assert_eq!(r, Rect::new(50.0, 50.0, 140.0, 140.0));
        assert_eq!(c.committed_rect(), START);

        c.end(HandleKind::BottomRight).unwrap();
        assert!(!c.is_dragging());
        assert_eq!(c.committed_rect(), Rect::new(50.0, 50.0, 140.0, 140.0));
    }

    #[test]
    fn test_cancel_restores_committed_rect() {
        let mut c = controller();
        c.apply(event(HandleKind::Left, GesturePhase::Began, 0.0, 0.0))
            .unwrap();
        c.apply(event(HandleKind::Left, GesturePhase::Changed, -500.0, 0.0))
            .unwrap();
        assert_eq!(c.rect(), Rect::new(0.0, 50.0, 150.0, 100.0));

        let r = c
            .apply(event(HandleKind::Left, GesturePhase::Cancelled, 0.0, 0.0))
            .unwrap();
        assert_eq!(r, START);
        assert_eq!(c.state(), DragState::Idle);
    }

    #[test]
    fn test_ended_applies_final_translation() {
        let mut c = controller();
        c.apply(event(HandleKind::Top, GesturePhase::Began, 0.0, 0.0))
            .unwrap();
        let r = c
            .apply(event(HandleKind::Top, GesturePhase::Ended, 0.0, -30.0))
            .unwrap();
        assert_eq!(r, Rect::new(50.0, 20.0, 100.0, 130.0));
        assert!(!c.is_dragging());
    }

    #[test]
    fn test_other_handle_cannot_write() {
        let mut c = controller();
        c.begin(HandleKind::BottomRight).unwrap();
        c.update(HandleKind::BottomRight, Offset::new(10.0, 10.0))
            .unwrap();
        let published = c.rect();

        for phase in [
            GesturePhase::Began,
            GesturePhase::Changed,
            GesturePhase::Ended,
            GesturePhase::Cancelled,
        ] {
            let err = c
                .apply(event(HandleKind::TopLeft, phase, -40.0, -40.0))
                .unwrap_err();
            assert_eq!(
                err,
                CropError::InvalidHandleSession {
                    active: Some(HandleKind::BottomRight),
                    received: HandleKind::TopLeft,
                }
            );
            assert_eq!(c.rect(), published);
            assert_eq!(c.active_handle(), Some(HandleKind::BottomRight));
        }
    }

    #[test]
    fn test_second_begin_on_same_handle_rejected() {
        let mut c = controller();
        c.begin(HandleKind::Right).unwrap();
        assert!(c.begin(HandleKind::Right).is_err());
        assert_eq!(c.active_handle(), Some(HandleKind::Right));
    }

    #[test]
    fn test_events_without_session_rejected() {
        let mut c = controller();
        let err = c
            .update(HandleKind::Left, Offset::new(10.0, 0.0))
            .unwrap_err();
        assert_eq!(
            err,
            CropError::InvalidHandleSession {
                active: None,
                received: HandleKind::Left,
            }
        );
        assert!(c.end(HandleKind::Left).is_err());
        assert!(c.cancel(HandleKind::Left).is_err());
        assert_eq!(c.rect(), START);
    }

    #[test]
    fn test_replay_is_deterministic() {
        let events = [
            event(HandleKind::TopRight, GesturePhase::Began, 0.0, 0.0),
            event(HandleKind::TopRight, GesturePhase::Changed, 5.0, -3.0),
            event(HandleKind::BottomLeft, GesturePhase::Changed, 80.0, 80.0),
            event(HandleKind::TopRight, GesturePhase::Changed, 37.5, -12.25),
            event(HandleKind::TopRight, GesturePhase::Ended, 41.0, -20.0),
        ];
        let run = || {
            let mut c = controller();
            c.set_aspect_ratio(AspectRatio::Fixed(1.5));
            for e in events {
                let _ = c.apply(e);
            }
            c.rect()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_set_aspect_ratio_fits_centered() {
        let mut c = HandleController::new(Rect::new(0.0, 0.0, 400.0, 200.0), EditorConfig::default());
        let r = c.set_aspect_ratio(AspectRatio::Fixed(1.0));
        assert_eq!(r, Rect::new(100.0, 0.0, 200.0, 200.0));
        assert_eq!(c.aspect_ratio(), AspectRatio::Fixed(1.0));

        let r = c.set_aspect_ratio(AspectRatio::Free);
        assert_eq!(r, c.bounds());
    }

    #[test]
    fn test_set_aspect_ratio_cancels_drag() {
        let mut c = controller();
        c.begin(HandleKind::Bottom).unwrap();
        c.update(HandleKind::Bottom, Offset::new(0.0, 60.0)).unwrap();

        c.set_aspect_ratio(AspectRatio::Fixed(2.0));
        assert!(!c.is_dragging());
        assert_eq!(c.rect(), Rect::new(0.0, 75.0, 300.0, 150.0));
        // The old session is gone
        assert!(c.update(HandleKind::Bottom, Offset::new(0.0, 10.0)).is_err());
    }

    #[test]
    fn test_invalid_aspect_ratio_ignored() {
        let mut c = controller();
        let r = c.set_aspect_ratio(AspectRatio::Fixed(-1.0));
        assert_eq!(r, START);
        assert_eq!(c.aspect_ratio(), AspectRatio::Free);
    }

    #[test]
    fn test_locked_drag_keeps_ratio() {
        let mut c = controller();
        c.set_aspect_ratio(AspectRatio::Fixed(1.0));
        c.begin(HandleKind::BottomLeft).unwrap();
        let r = c
            .update(HandleKind::BottomLeft, Offset::new(-10.0, -200.0))
            .unwrap();
        assert!((r.width / r.height - 1.0).abs() < 1e-9);
        assert!(BOUNDS.contains_rect(&r));
    }

    #[test]
    fn test_set_bounds_constrains_when_idle() {
        let mut c = controller();
        c.set_bounds(Rect::new(100.0, 100.0, 200.0, 200.0));
        assert_eq!(c.rect(), Rect::new(100.0, 100.0, 100.0, 100.0));
    }

    #[test]
    fn test_set_bounds_keeps_locked_ratio() {
        let mut c = HandleController::new(
            Rect::new(0.0, 0.0, 300.0, 300.0),
            EditorConfig::default(),
        );
        c.set_aspect_ratio(AspectRatio::Fixed(1.0));
        let bounds = Rect::new(0.0, 0.0, 200.0, 300.0);
        c.set_bounds(bounds);

        let r = c.rect();
        assert_eq!(r, Rect::new(0.0, 50.0, 200.0, 200.0));
        assert!((r.width / r.height - 1.0).abs() < 1e-9);
        assert!(bounds.contains_rect(&r));

        // Grabbing a handle without moving leaves it in place
        c.begin(HandleKind::BottomRight).unwrap();
        c.update(HandleKind::BottomRight, Offset::ZERO).unwrap();
        assert_eq!(c.end(HandleKind::BottomRight).unwrap(), r);
    }

    #[test]
    fn test_set_bounds_locked_ratio_slides_when_it_fits() {
        let mut c = HandleController::new(
            Rect::new(0.0, 0.0, 300.0, 300.0),
            EditorConfig::default(),
        );
        c.set_aspect_ratio(AspectRatio::Fixed(1.0));
        c.set_bounds(Rect::new(50.0, 0.0, 300.0, 300.0));
        // Fits without capping, so it only slides
        assert_eq!(c.rect(), Rect::new(50.0, 0.0, 300.0, 300.0));
    }

    #[test]
    fn test_set_bounds_during_drag_applies_on_next_update() {
        let mut c = controller();
        c.begin(HandleKind::Right).unwrap();
        c.set_bounds(Rect::new(0.0, 0.0, 180.0, 300.0));
        assert_eq!(c.rect(), START);
        let r = c.update(HandleKind::Right, Offset::new(100.0, 0.0)).unwrap();
        assert_eq!(r, Rect::new(50.0, 50.0, 130.0, 100.0));
    }

    #[test]
    fn test_handle_positions_follow_rect() {
        let mut c = controller();
        let positions = c.handle_positions();
        assert_eq!(positions[0].handle, HandleKind::TopLeft);
        assert_eq!(positions[0].position, Point::new(40.0, 40.0));

        c.begin(HandleKind::BottomRight).unwrap();
        c.update(HandleKind::BottomRight, Offset::new(40.0, 40.0))
            .unwrap();
        let br = c
            .handle_positions()
            .into_iter()
            .find(|hp| hp.handle == HandleKind::BottomRight)
            .unwrap();
        assert_eq!(br.position, Point::new(200.0, 200.0));
    }

    #[test]
    fn test_hit_test() {
        let c = controller();
        assert_eq!(c.hit_test(Point::new(42.0, 38.0)), Some(HandleKind::TopLeft));
        assert_eq!(c.hit_test(Point::new(100.0, 158.0)), Some(HandleKind::Bottom));
        assert_eq!(c.hit_test(Point::new(100.0, 100.0)), None);
    }

    #[test]
    fn test_hit_test_prefers_closest() {
        let mut config = EditorConfig::default();
        config.hit_radius = 80.0;
        let c = HandleController::with_rect(START, BOUNDS, config);
        // Closer to the Top handle at (100, 40) than to TopLeft at (40, 40)
        assert_eq!(c.hit_test(Point::new(85.0, 40.0)), Some(HandleKind::Top));
    }

    #[test]
    fn test_overlay() {
        let c = controller();
        let overlay = c.overlay();
        assert_eq!(overlay.rect, START);
        assert_eq!(overlay.bounds, BOUNDS);
        assert_eq!(overlay.handles.len(), 8);
    }

    #[test]
    fn test_pixel_crop_uses_committed_rect() {
        let layout = ImageLayout::new(BOUNDS, BOUNDS);
        let mut c = controller();
        c.begin(HandleKind::BottomRight).unwrap();
        c.update(HandleKind::BottomRight, Offset::new(40.0, 40.0))
            .unwrap();

        let px = c.pixel_crop(&layout, 600, 600).unwrap();
        assert_eq!(px, PixelCropRect::new(100, 100, 200, 200));

        c.end(HandleKind::BottomRight).unwrap();
        let px = c.pixel_crop(&layout, 600, 600).unwrap();
        assert_eq!(px, PixelCropRect::new(100, 100, 280, 280));
    }

    #[test]
    fn test_crop_image() {
        let layout = ImageLayout::new(BOUNDS, BOUNDS);
        let c = controller();
        let image = SourceImage::new(30, 30, vec![9u8; 30 * 30 * 3]);
        let cropped = c.crop(&image, &layout);
        assert_eq!((cropped.width, cropped.height), (10, 10));
    }
}
