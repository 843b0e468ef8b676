//! Per-tick simulation step
//!
//! Advances the ball according to its state, resolves floor contact and
//! fades the spark burst. One call is one 60 Hz tick.

use super::state::{BallState, SimEvent, SliderState};
use crate::tuning::Tuning;

/// Advance the widget by one tick. `now_ms` is the host clock, used only for
/// the dwell timer.
pub fn tick(state: &mut SliderState, tuning: &Tuning, now_ms: f64) {
    state.time_ticks += 1;

    poll_dwell(state, tuning, now_ms);

    advance_sparks(state, tuning);

    match state.ball.state {
        BallState::Attached => roll_along_curve(state, tuning),
        BallState::Detached { resting: false } => fall(state, tuning),
        // Resting on the floor, or held by the pointer: nothing moves on its own
        BallState::Detached { resting: true } | BallState::Dragging { .. } => {}
    }
}

/// Reattach a dragged ball whose dwell deadline has passed
pub(crate) fn poll_dwell(state: &mut SliderState, tuning: &Tuning, now_ms: f64) {
    if !state.dwell.fire(now_ms) {
        return;
    }
    // The timer only runs while a detached ball is being dragged
    if let BallState::Dragging { attached: false } = state.ball.state {
        let ball = &mut state.ball;
        ball.pos.y = tuning.curve.y_at(ball.pos.x);
        ball.state = BallState::Dragging { attached: true };
        log::debug!("Ball reattached at x={:.1}", ball.pos.x);
        state.events.push(SimEvent::Reattached { pos: ball.pos });
    }
}

/// Slope-following with friction; detaches at the right end
fn roll_along_curve(state: &mut SliderState, tuning: &Tuning) {
    let ball = &mut state.ball;
    let slope = tuning.curve.slope_at(ball.pos.x);

    ball.vel.x += slope * tuning.gravity;
    ball.vel.x *= tuning.friction;
    ball.vel.x = ball
        .vel
        .x
        .clamp(-tuning.max_roll_speed, tuning.max_roll_speed);
    ball.pos.x = tuning.track.clamp(ball.pos.x + ball.vel.x);
    ball.pos.y = tuning.curve.y_at(ball.pos.x);

    if tuning.track.at_right_end(ball.pos.x) {
        ball.state = BallState::Detached { resting: false };
        ball.vel.y = 0.0;
        log::debug!("Ball rolled off the end of the track");
        state.events.push(SimEvent::Detached { pos: ball.pos });
    }
}

/// Free fall with a lossy floor bounce
fn fall(state: &mut SliderState, tuning: &Tuning) {
    let ball = &mut state.ball;

    ball.vel.y += tuning.gravity;
    ball.vel.y *= tuning.friction;
    ball.pos.y += ball.vel.y;
    ball.pos.x = tuning.track.clamp(ball.pos.x + ball.vel.x);

    let floor = tuning.floor_y();
    if ball.pos.y < floor {
        return;
    }

    ball.pos.y = floor;
    let impact_speed = ball.vel.y.abs();
    let bounced = impact_speed > tuning.rest_threshold;
    if bounced {
        ball.vel.y *= -tuning.bounce;
    } else {
        ball.vel.y = 0.0;
        ball.state = BallState::Detached { resting: true };
    }

    let pos = ball.pos;
    log::debug!(
        "Ball landed at x={:.1} (impact {:.2}, bounced: {})",
        pos.x,
        impact_speed,
        bounced
    );
    state.spawn_sparks(pos, &tuning.sparks);
    state.events.push(SimEvent::Landed {
        pos,
        impact_speed,
        bounced,
    });
}

/// Move and fade sparks, dropping the spent ones
fn advance_sparks(state: &mut SliderState, tuning: &Tuning) {
    for spark in state.sparks.iter_mut() {
        spark.advance(tuning.sparks.gravity, tuning.sparks.fade);
    }
    state.sparks.retain(|s| s.is_alive());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Spark;
    use glam::Vec2;
    use proptest::prelude::*;

    fn detached_at(tuning: &Tuning, pos: Vec2, vel: Vec2) -> SliderState {
        let mut state = SliderState::new(tuning, 1);
        state.ball.pos = pos;
        state.ball.vel = vel;
        state.ball.state = BallState::Detached { resting: false };
        state
    }

    #[test]
    fn test_attached_ball_stays_on_curve() {
        let tuning = Tuning::default();
        let mut state = SliderState::new(&tuning, 1);
        for frame in 0..600 {
            tick(&mut state, &tuning, frame as f64 * 16.0);
            if state.ball.state == BallState::Attached {
                assert_eq!(state.ball.pos.y, tuning.curve.y_at(state.ball.pos.x));
            }
            assert!(state.ball.pos.x >= tuning.track.left);
            assert!(state.ball.pos.x <= tuning.track.right);
        }
    }

    #[test]
    fn test_roll_velocity_is_clamped() {
        let tuning = Tuning::default();
        let mut state = SliderState::new(&tuning, 1);
        state.ball.pos = tuning.curve.point_at(300.0);
        state.ball.vel.x = 50.0;
        tick(&mut state, &tuning, 0.0);
        assert!(state.ball.vel.x <= tuning.max_roll_speed);
    }

    #[test]
    fn test_detaches_at_right_end() {
        let tuning = Tuning::default();
        let mut state = SliderState::new(&tuning, 1);
        state.ball.pos = tuning.curve.point_at(tuning.track.right - 2.0);
        state.ball.vel = Vec2::new(8.0, 3.0);
        tick(&mut state, &tuning, 0.0);

        assert_eq!(state.ball.state, BallState::Detached { resting: false });
        assert_eq!(state.ball.pos.x, tuning.track.right);
        assert_eq!(state.ball.vel.y, 0.0);
        assert!(matches!(
            state.drain_events().as_slice(),
            [SimEvent::Detached { .. }]
        ));
    }

    #[test]
    fn test_no_detach_while_dragging() {
        let tuning = Tuning::default();
        let mut state = SliderState::new(&tuning, 1);
        state.ball.pos = tuning.curve.point_at(tuning.track.right);
        state.ball.state = BallState::Dragging { attached: true };
        for _ in 0..10 {
            tick(&mut state, &tuning, 0.0);
        }
        assert_eq!(state.ball.state, BallState::Dragging { attached: true });
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_dragging_overrides_integration() {
        let tuning = Tuning::default();
        let mut state = detached_at(&tuning, Vec2::new(500.0, 200.0), Vec2::new(3.0, 5.0));
        state.ball.state = BallState::Dragging { attached: false };
        tick(&mut state, &tuning, 0.0);
        assert_eq!(state.ball.pos, Vec2::new(500.0, 200.0));
    }

    #[test]
    fn test_free_fall_accelerates() {
        let tuning = Tuning::default();
        let mut state = detached_at(&tuning, Vec2::new(500.0, 100.0), Vec2::ZERO);
        tick(&mut state, &tuning, 0.0);
        let expected_vy = tuning.gravity * tuning.friction;
        assert!((state.ball.vel.y - expected_vy).abs() < 1e-6);
        assert!((state.ball.pos.y - (100.0 + expected_vy)).abs() < 1e-4);
    }

    #[test]
    fn test_free_fall_clamps_to_track() {
        let tuning = Tuning::default();
        let mut state = detached_at(&tuning, Vec2::new(955.0, 100.0), Vec2::new(20.0, 0.0));
        tick(&mut state, &tuning, 0.0);
        assert_eq!(state.ball.pos.x, tuning.track.right);
    }

    #[test]
    fn test_fast_landing_bounces() {
        let tuning = Tuning::default();
        let floor = tuning.floor_y();
        // After gravity and friction the impact speed is exactly 4.0
        let incoming = 4.0 / tuning.friction - tuning.gravity;
        let mut state = detached_at(
            &tuning,
            Vec2::new(500.0, floor - 1.0),
            Vec2::new(0.0, incoming),
        );
        tick(&mut state, &tuning, 0.0);

        assert_eq!(state.ball.pos.y, floor);
        assert!((state.ball.vel.y - (-2.8)).abs() < 1e-4);
        assert_eq!(state.ball.state, BallState::Detached { resting: false });
        assert_eq!(state.sparks.len(), tuning.sparks.count);
        assert!(matches!(
            state.drain_events().as_slice(),
            [SimEvent::Landed { bounced: true, .. }]
        ));
    }

    #[test]
    fn test_slow_landing_rests() {
        let tuning = Tuning::default();
        let floor = tuning.floor_y();
        let mut state = detached_at(&tuning, Vec2::new(500.0, floor - 0.3), Vec2::ZERO);
        tick(&mut state, &tuning, 0.0);

        assert_eq!(state.ball.pos.y, floor);
        assert_eq!(state.ball.vel.y, 0.0);
        assert_eq!(state.ball.state, BallState::Detached { resting: true });
        state.drain_events();

        // A resting ball does not land again
        for _ in 0..50 {
            tick(&mut state, &tuning, 0.0);
        }
        assert_eq!(state.ball.pos.y, floor);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_second_landing_replaces_sparks() {
        let tuning = Tuning::default();
        let floor = tuning.floor_y();
        let mut state = detached_at(
            &tuning,
            Vec2::new(500.0, floor - 1.0),
            Vec2::new(0.0, 6.0),
        );
        tick(&mut state, &tuning, 0.0);
        // Mark the first burst
        for spark in state.sparks.iter_mut() {
            spark.radius = 100.0;
        }

        let mut landings = 1;
        for _ in 0..200 {
            let before = state.events.len();
            tick(&mut state, &tuning, 0.0);
            if state.events.len() > before {
                landings += 1;
                break;
            }
        }
        assert_eq!(landings, 2);
        assert_eq!(state.sparks.len(), tuning.sparks.count);
        assert!(state.sparks.iter().all(|s| s.radius < 100.0 && s.alpha == 1.0));
    }

    #[test]
    fn test_sparks_fade_out() {
        let tuning = Tuning::default();
        let mut state = SliderState::new(&tuning, 1);
        state.sparks.push(Spark {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: 1.0,
            alpha: 1.0,
        });
        let lifetime = (1.0 / tuning.sparks.fade).ceil() as usize;
        for _ in 0..lifetime {
            tick(&mut state, &tuning, 0.0);
        }
        assert!(state.sparks.is_empty());
    }

    #[test]
    fn test_full_run_ends_resting_on_floor() {
        let tuning = Tuning::default();
        let mut state = SliderState::new(&tuning, 3);
        state.ball.pos = tuning.curve.point_at(tuning.track.right - 1.0);
        state.ball.vel.x = 5.0;
        for frame in 0..3000 {
            tick(&mut state, &tuning, frame as f64 * 16.0);
        }
        assert_eq!(state.ball.state, BallState::Detached { resting: true });
        assert_eq!(state.ball.pos.y, tuning.floor_y());
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning::default();
        let mut a = detached_at(&tuning, Vec2::new(400.0, 100.0), Vec2::new(1.0, 0.0));
        let mut b = detached_at(&tuning, Vec2::new(400.0, 100.0), Vec2::new(1.0, 0.0));
        for frame in 0..500 {
            tick(&mut a, &tuning, frame as f64);
            tick(&mut b, &tuning, frame as f64);
        }
        assert_eq!(a.ball.pos, b.ball.pos);
        assert_eq!(a.sparks.len(), b.sparks.len());
        for (sa, sb) in a.sparks.iter().zip(&b.sparks) {
            assert_eq!(sa.pos, sb.pos);
        }
    }

    proptest! {
        #[test]
        fn attached_ball_tracks_curve(
            x in 60.0f32..960.0,
            vx in -10.0f32..10.0,
            ticks in 1usize..200,
        ) {
            let tuning = Tuning::default();
            let mut state = SliderState::new(&tuning, 0);
            state.ball.pos = tuning.curve.point_at(x);
            state.ball.vel.x = vx;
            for _ in 0..ticks {
                tick(&mut state, &tuning, 0.0);
                if state.ball.state == BallState::Attached {
                    prop_assert_eq!(state.ball.pos.y, tuning.curve.y_at(state.ball.pos.x));
                }
                prop_assert!(state.volume(&tuning) >= 0.0 && state.volume(&tuning) <= 1.0);
            }
        }
    }
}
