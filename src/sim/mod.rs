//! Deterministic simulation module
//!
//! All widget behaviour lives here. This module must stay pure:
//! - One call to `tick` per 60 Hz step, no wall-clock reads
//!   (`FixedStep` converts host frame deltas into tick counts)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod curve;
pub mod input;
pub mod state;
pub mod step;
pub mod tick;

pub use curve::{Curve, Track};
pub use input::{PointerEvent, PointerKind, handle_pointer};
pub use state::{Ball, BallState, DwellTimer, SimEvent, SliderState, Spark};
pub use step::FixedStep;
pub use tick::tick;
