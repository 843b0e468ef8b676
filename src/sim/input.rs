//! Pointer interaction
//!
//! Coordinates are canvas-relative pixels. `now_ms` is the same host clock
//! passed to [`super::tick`].

use glam::Vec2;

use super::state::{BallState, SimEvent, SliderState};
use super::tick::poll_dwell;
use crate::tuning::Tuning;

/// Kind of pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Press,
    Move,
    Release,
    /// Pointer left the canvas; treated like a release
    Leave,
}

/// A pointer event in canvas space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub pos: Vec2,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            pos: Vec2::new(x, y),
        }
    }
}

/// Apply a pointer event to the widget.
///
/// Returns `true` when the ball was held by the pointer before or after the
/// event. Hosts use it to swallow only the gestures that belong to the ball.
pub fn handle_pointer(
    state: &mut SliderState,
    tuning: &Tuning,
    event: PointerEvent,
    now_ms: f64,
) -> bool {
    let was_dragging = state.ball.state.is_dragging();

    // A deadline may have passed between frames
    poll_dwell(state, tuning, now_ms);

    match event.kind {
        PointerKind::Press => press(state, tuning, event.pos),
        PointerKind::Move => drag_to(state, tuning, event.pos, now_ms),
        PointerKind::Release | PointerKind::Leave => release(state),
    }

    was_dragging || state.ball.state.is_dragging()
}

fn press(state: &mut SliderState, tuning: &Tuning, pos: Vec2) {
    let ball = &mut state.ball;
    if ball.state.is_dragging() || !ball.hit_test(pos, tuning.grab_slack) {
        return;
    }
    ball.state = BallState::Dragging {
        attached: ball.state.is_attached(),
    };
    ball.vel = Vec2::ZERO;
    log::debug!("Ball grabbed at ({:.1}, {:.1})", pos.x, pos.y);
}

fn drag_to(state: &mut SliderState, tuning: &Tuning, pos: Vec2, now_ms: f64) {
    let BallState::Dragging { attached } = state.ball.state else {
        return;
    };

    let ball = &mut state.ball;
    ball.pos = Vec2::new(
        tuning.track.clamp(pos.x),
        pos.y.clamp(0.0, tuning.canvas_height),
    );

    let near_curve = tuning.curve.vertical_distance(ball.pos) < ball.radius;
    if !attached && near_curve {
        if state.dwell.arm(now_ms, tuning.dwell_ms) {
            state.events.push(SimEvent::DwellArmed {
                deadline_ms: now_ms + tuning.dwell_ms,
            });
        }
    } else if !near_curve && state.dwell.cancel() {
        state.events.push(SimEvent::DwellCancelled);
    }

    if attached {
        ball.pos.y = tuning.curve.y_at(ball.pos.x);
    }
}

fn release(state: &mut SliderState) {
    if let BallState::Dragging { attached } = state.ball.state {
        state.ball.state = if attached {
            BallState::Attached
        } else {
            BallState::Detached { resting: false }
        };
        log::debug!("Ball released (attached: {attached})");
    }
    if state.dwell.cancel() {
        state.events.push(SimEvent::DwellCancelled);
    }
}
