//! The scroll controller: clamped target driven by input, exponentially
//! smoothed displayed position advanced once per frame.
//!
//! Input handlers only ever touch the *target*.  `advance` moves the
//! *displayed* position a fixed fraction of the way toward it, derives the
//! frame velocity from the movement, and pushes the resulting transforms to
//! the [`Surface`].  There is no delta-time compensation: a skipped frame
//! just means a larger step on the next one.

use super::error::CarouselError;
use super::input::{DefaultAction, InputEvent, PointerEvent, PointerKind};
use super::physics::{clamp, lerp, Physics};
use super::surface::Surface;

/// Gap below which the displayed position counts as arrived.
const SETTLE_EPSILON: f64 = 0.01;

/// Numeric scroll state.  Positions are in pixels along the track.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    /// Where input wants the track to be.
    pub target: f64,
    /// Where the track is currently drawn.
    pub displayed: f64,
    /// Track width minus viewport width.  May be ≤ 0 for short content.
    pub max_scroll: f64,
    /// `previous displayed − displayed`, capped from above.
    pub velocity: f64,
    /// `displayed / max_scroll`, or 0 when there is nothing to scroll.
    pub play_ratio: f64,
}

/// Drag mode.  Wheel input is independent of it.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DragMode {
    Idle,
    Dragging { last_x: f64 },
}

pub struct ScrollController<S: Surface> {
    surface: S,
    physics: Physics,
    state: ScrollState,
    drag: DragMode,
    disposed: bool,
}

impl<S: Surface> ScrollController<S> {
    /// Validate the surface geometry and compute the initial bounds.
    pub fn new(surface: S, physics: Physics) -> Result<Self, CarouselError> {
        let mut controller = Self {
            surface,
            physics: physics.sanitised(),
            state: ScrollState::default(),
            drag: DragMode::Idle,
            disposed: false,
        };
        controller.calculate()?;
        Ok(controller)
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for hosts that need to update measured geometry
    /// (e.g. on resize) before calling [`Self::calculate`].
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragMode::Dragging { .. })
    }

    /// True once the displayed position has caught up with the target and
    /// nothing is moving.
    pub fn is_settled(&self) -> bool {
        (self.state.target - self.state.displayed).abs() < SETTLE_EPSILON
            && self.state.velocity.abs() < SETTLE_EPSILON
    }

    /// Re-measure geometry, resize the track, recompute `max_scroll`, and
    /// reset the target to the start.
    pub fn calculate(&mut self) -> Result<(), CarouselError> {
        let geometry = self.surface.geometry().validate()?;
        let track_width = geometry.track_width();

        self.surface.set_track_width(track_width);
        self.state.max_scroll = track_width - geometry.viewport_width;
        self.state.target = 0.0;
        self.state.displayed = clamp(self.state.displayed, 0.0, self.state.max_scroll);

        tracing::debug!(
            track_width,
            viewport_width = geometry.viewport_width,
            max_scroll = self.state.max_scroll,
            items = geometry.item_count,
            "calculate"
        );
        Ok(())
    }

    pub fn on_wheel(&mut self, delta_y: f64) {
        if !delta_y.is_finite() {
            return;
        }
        self.state.target += delta_y;
        self.clamp_target();
    }

    /// Enter drag mode at `pointer.x`.  Touch starts ask the host to
    /// suppress its native drag/scroll gesture.
    pub fn on_drag_start(&mut self, pointer: PointerEvent) -> DefaultAction {
        self.drag = DragMode::Dragging { last_x: pointer.x };
        tracing::trace!(x = pointer.x, y = pointer.y, kind = ?pointer.kind, "drag start");
        match pointer.kind {
            PointerKind::Touch => DefaultAction::Prevent,
            PointerKind::Mouse => DefaultAction::Allow,
        }
    }

    pub fn on_drag_move(&mut self, pointer: PointerEvent) {
        let DragMode::Dragging { last_x } = self.drag else {
            return;
        };
        if !pointer.x.is_finite() {
            return;
        }
        self.state.target += (last_x - pointer.x) * self.physics.drag_multiplier;
        self.drag = DragMode::Dragging { last_x: pointer.x };
        self.clamp_target();
    }

    pub fn on_drag_end(&mut self) {
        if self.is_dragging() {
            tracing::trace!("drag end");
        }
        self.drag = DragMode::Idle;
    }

    /// Route a normalized event to its handler.  Ignored after [`Self::dispose`].
    pub fn dispatch(&mut self, event: InputEvent) -> Result<DefaultAction, CarouselError> {
        if self.disposed {
            return Ok(DefaultAction::Allow);
        }
        match event {
            InputEvent::Resize => self.calculate()?,
            InputEvent::Wheel { delta_y } => self.on_wheel(delta_y),
            InputEvent::PointerDown(p) => return Ok(self.on_drag_start(p)),
            InputEvent::PointerMove(p) => self.on_drag_move(p),
            InputEvent::PointerUp | InputEvent::PointerLeave => self.on_drag_end(),
        }
        Ok(DefaultAction::Allow)
    }

    /// One frame of the loop.
    pub fn advance(&mut self) {
        if self.disposed {
            return;
        }
        let p = self.physics;
        let previous = self.state.displayed;

        self.state.displayed = lerp(previous, self.state.target, p.smoothing);
        self.state.play_ratio = if self.state.max_scroll > 0.0 {
            self.state.displayed / self.state.max_scroll
        } else {
            0.0
        };
        // Only the positive side is capped: a fast move toward the end can
        // produce a large negative velocity.
        self.state.velocity = p.velocity_cap.min(previous - self.state.displayed);

        self.surface.set_track_translate_x(-self.state.displayed);
        self.surface.set_bar_scale_x(p.bar_scale(self.state.play_ratio));

        let speed = self.state.velocity.abs();
        let item_scale = 1.0 - speed * p.item_squash;
        let image_scale = 1.0 + speed * p.image_stretch;
        for index in 0..self.surface.geometry().item_count {
            self.surface.set_item_scale(index, item_scale);
            self.surface.set_image_scale_x(index, image_scale);
        }
    }

    /// Stop reacting to input and frames.  Hosts release their listeners
    /// alongside this.
    pub fn dispose(&mut self) {
        if !self.disposed {
            tracing::debug!("scroll controller disposed");
        }
        self.disposed = true;
        self.drag = DragMode::Idle;
    }

    fn clamp_target(&mut self) {
        self.state.target = clamp(self.state.target, 0.0, self.state.max_scroll);
    }
}
