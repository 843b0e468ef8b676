//! Squiggly Slider - a volume knob that rolls along a wobbly sine curve
//!
//! Core modules:
//! - `sim`: Deterministic simulation (curve, ball state machine, sparks, pointer input)
//! - `renderer`: 2D drawing surface abstraction and frame composition
//! - `tuning`: Data-driven physics and geometry
//! - `settings`: Presentation preferences (sound, sparks, colours)
//! - `audio`: Landing sound (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Default widget constants
pub mod consts {
    /// Fixed simulation timestep; the per-tick constants below assume 60 Hz
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Canvas dimensions (fixed layout)
    pub const CANVAS_WIDTH: f32 = 1000.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;

    /// Track interval the ball may occupy
    pub const TRACK_LEFT: f32 = 60.0;
    pub const TRACK_RIGHT: f32 = CANVAS_WIDTH - 40.0;

    /// Curve coefficients: y = baseline + (amp + amp_mod*m) * sin(x * (freq + freq_mod*m)),
    /// with m = sin(x * mod_rate)
    pub const CURVE_BASELINE: f32 = 150.0;
    pub const CURVE_AMPLITUDE: f32 = 30.0;
    pub const CURVE_AMPLITUDE_MOD: f32 = 15.0;
    pub const CURVE_FREQUENCY: f32 = 0.015;
    pub const CURVE_FREQUENCY_MOD: f32 = 0.005;
    pub const CURVE_MOD_RATE: f32 = 0.005;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Extra pick-up distance around the ball for pointer presses
    pub const GRAB_SLACK: f32 = 5.0;

    /// Per-tick gravity (pixels/tick²), shared by rolling and falling
    pub const GRAVITY: f32 = 0.4;
    /// Per-tick velocity damping
    pub const FRICTION: f32 = 0.99;
    /// Floor restitution
    pub const BOUNCE: f32 = 0.7;
    /// Rolling speed limit (pixels/tick)
    pub const MAX_ROLL_SPEED: f32 = 10.0;
    /// Impacts at or below this speed come to rest instead of bouncing
    pub const REST_THRESHOLD: f32 = 1.0;

    /// Hover time near the curve before a dragged ball reattaches
    pub const DWELL_MS: f64 = 2000.0;

    /// Spark burst on landing
    pub const SPARK_COUNT: usize = 20;
    /// Upper bound on a configured burst size
    pub const MAX_SPARK_COUNT: usize = 1000;
    pub const SPARK_GRAVITY: f32 = 0.1;
    pub const SPARK_FADE: f32 = 0.03;
}
