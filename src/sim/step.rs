//! Fixed-timestep accumulator
//!
//! Turns variable host frame deltas into a whole number of 60 Hz ticks.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Accumulates frame time and hands out ticks
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a frame delta in seconds and return how many ticks to run.
    ///
    /// Deltas are clamped to `[0, MAX_FRAME_DT]`. At most `MAX_SUBSTEPS`
    /// ticks are returned; when that cap is hit the remaining backlog is
    /// dropped so a stalled tab does not fast-forward on resume.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS {
            self.accumulator = 0.0;
        }
        ticks
    }

    /// Time carried over to the next frame, in seconds
    pub fn leftover(&self) -> f32 {
        self.accumulator
    }
}
