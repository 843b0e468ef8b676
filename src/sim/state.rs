//! Simulation state and core types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_SPARK_COUNT;
use crate::tuning::{SparkTuning, Tuning};

/// Ball state - on the curve, falling, or held by the pointer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BallState {
    /// Rolling along the curve; y is always the curve height at x
    Attached,
    /// Free-fall physics below the curve
    Detached {
        /// Came to rest on the floor; no longer integrated until grabbed
        resting: bool,
    },
    /// Held by the pointer; `attached` is what automatic motion resumes on release
    Dragging { attached: bool },
}

impl BallState {
    /// Whether y is slaved to the curve (while rolling or while dragged along it)
    pub fn is_attached(&self) -> bool {
        matches!(
            self,
            BallState::Attached | BallState::Dragging { attached: true }
        )
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, BallState::Dragging { .. })
    }
}

/// The slider knob
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub state: BallState,
}

impl Ball {
    /// A ball resting on the curve at the left end of the track
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.curve.point_at(tuning.track.left),
            vel: Vec2::ZERO,
            radius: tuning.ball_radius,
            state: BallState::Attached,
        }
    }

    /// Whether a pointer at `pos` picks the ball up
    pub fn hit_test(&self, pos: Vec2, slack: f32) -> bool {
        self.pos.distance(pos) < self.radius + slack
    }
}

/// A decorative particle from a landing burst
#[derive(Debug, Clone)]
pub struct Spark {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// 1.0 at spawn, removed at or below 0
    pub alpha: f32,
}

impl Spark {
    /// Advance one tick
    pub fn advance(&mut self, gravity: f32, fade: f32) {
        self.pos += self.vel;
        self.vel.y += gravity;
        self.alpha -= fade;
    }

    pub fn is_alive(&self) -> bool {
        self.alpha > 0.0
    }
}

/// Deadline after which a hovering dragged ball snaps back onto the curve.
/// At most one is outstanding; arming an armed timer keeps the first deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DwellTimer {
    deadline_ms: Option<f64>,
}

impl DwellTimer {
    /// Arm the timer unless already armed. Returns true if newly armed.
    pub fn arm(&mut self, now_ms: f64, duration_ms: f64) -> bool {
        if self.deadline_ms.is_some() {
            return false;
        }
        self.deadline_ms = Some(now_ms + duration_ms);
        true
    }

    /// Disarm. Returns true if a pending deadline was dropped.
    pub fn cancel(&mut self) -> bool {
        self.deadline_ms.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    pub fn deadline_ms(&self) -> Option<f64> {
        self.deadline_ms
    }

    /// Consume the deadline if it has passed
    pub fn fire(&mut self, now_ms: f64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }
}

/// Things the host may want to react to (sound, logging)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// Ball rolled off the right end of the track
    Detached { pos: Vec2 },
    /// Dragged ball is hovering on the curve; reattaches at `deadline_ms`
    DwellArmed { deadline_ms: f64 },
    /// Dragged ball moved off the curve before the dwell elapsed
    DwellCancelled,
    /// Dwell elapsed; ball is back on the curve
    Reattached { pos: Vec2 },
    /// Ball hit the floor
    Landed {
        pos: Vec2,
        impact_speed: f32,
        bounced: bool,
    },
}

/// Complete widget state
#[derive(Debug, Clone)]
pub struct SliderState {
    pub ball: Ball,
    /// Current landing burst (replaced wholesale on each landing)
    pub sparks: Vec<Spark>,
    pub dwell: DwellTimer,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events since the host last drained them
    pub events: Vec<SimEvent>,
    rng: Pcg32,
}

impl SliderState {
    /// Create the widget with the ball at the left end of the curve
    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        Self {
            ball: Ball::new(tuning),
            sparks: Vec::with_capacity(tuning.sparks.count.min(MAX_SPARK_COUNT)),
            dwell: DwellTimer::default(),
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Slider value in [0, 1]
    pub fn volume(&self, tuning: &Tuning) -> f32 {
        tuning.track.normalized(self.ball.pos.x)
    }

    /// Hand pending events to the host
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Replace the current burst with a fresh one at `origin`
    pub fn spawn_sparks(&mut self, origin: Vec2, tuning: &SparkTuning) {
        self.sparks.clear();
        for _ in 0..tuning.count {
            let radius = self.rng.random_range(tuning.min_radius..tuning.max_radius);
            let vel = Vec2::new(
                self.rng.random_range(-tuning.spread..tuning.spread),
                -self.rng.random_range(tuning.lift_min..tuning.lift_max),
            );
            self.sparks.push(Spark {
                pos: origin,
                vel,
                radius,
                alpha: 1.0,
            });
        }
    }
}
