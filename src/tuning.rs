//! Data-driven physics and geometry
//!
//! Every constant the simulation reads lives here so a host can reshape the
//! widget from JSON without recompiling. Missing fields fall back to
//! [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{Curve, Track};

/// Errors produced while loading a [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Spark burst parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparkTuning {
    /// Sparks per landing
    pub count: usize,
    /// Added to each spark's vertical velocity per tick
    pub gravity: f32,
    /// Opacity lost per tick
    pub fade: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Horizontal launch speed range is [-spread, spread)
    pub spread: f32,
    /// Upward launch speed range is [lift_min, lift_max)
    pub lift_min: f32,
    pub lift_max: f32,
}

impl Default for SparkTuning {
    fn default() -> Self {
        Self {
            count: SPARK_COUNT,
            gravity: SPARK_GRAVITY,
            fade: SPARK_FADE,
            min_radius: 1.0,
            max_radius: 3.0,
            spread: 1.5,
            lift_min: 1.0,
            lift_max: 4.0,
        }
    }
}

/// Widget tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub canvas_width: f32,
    /// Also the floor the detached ball lands on
    pub canvas_height: f32,
    pub track: Track,
    pub curve: Curve,
    pub ball_radius: f32,
    pub grab_slack: f32,
    pub gravity: f32,
    pub friction: f32,
    pub bounce: f32,
    pub max_roll_speed: f32,
    pub rest_threshold: f32,
    pub dwell_ms: f64,
    pub sparks: SparkTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            track: Track::default(),
            curve: Curve::default(),
            ball_radius: BALL_RADIUS,
            grab_slack: GRAB_SLACK,
            gravity: GRAVITY,
            friction: FRICTION,
            bounce: BOUNCE,
            max_roll_speed: MAX_ROLL_SPEED,
            rest_threshold: REST_THRESHOLD,
            dwell_ms: DWELL_MS,
            sparks: SparkTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Floor height the ball's centre settles at
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.canvas_height - self.ball_radius
    }

    /// Reject values the integrators cannot work with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
            TuningError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return Err(invalid("canvas", "dimensions must be positive"));
        }
        if self.track.left >= self.track.right {
            return Err(invalid(
                "track",
                format!("left {} must be < right {}", self.track.left, self.track.right),
            ));
        }
        if self.track.left < 0.0 || self.track.right > self.canvas_width {
            return Err(invalid("track", "must lie inside the canvas"));
        }
        if self.ball_radius <= 0.0 || self.ball_radius * 2.0 > self.canvas_height {
            return Err(invalid("ball_radius", "must be positive and fit the canvas"));
        }
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(invalid("friction", "must be in (0, 1]"));
        }
        if !(0.0..1.0).contains(&self.bounce) {
            return Err(invalid("bounce", "must be in [0, 1)"));
        }
        if self.max_roll_speed <= 0.0 {
            return Err(invalid("max_roll_speed", "must be positive"));
        }
        if self.dwell_ms < 0.0 {
            return Err(invalid("dwell_ms", "must not be negative"));
        }
        if self.sparks.count > MAX_SPARK_COUNT {
            return Err(invalid(
                "sparks.count",
                format!("must be at most {MAX_SPARK_COUNT}"),
            ));
        }
        if self.sparks.fade <= 0.0 {
            return Err(invalid("sparks.fade", "must be positive or sparks never expire"));
        }
        if self.sparks.min_radius >= self.sparks.max_radius
            || self.sparks.lift_min >= self.sparks.lift_max
            || self.sparks.spread <= 0.0
        {
            return Err(invalid("sparks", "ranges must be non-empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.5, "curve": { "baseline": 180.0 } }"#)
            .expect("partial tuning should parse");
        assert_eq!(tuning.gravity, 0.5);
        assert_eq!(tuning.curve.baseline, 180.0);
        assert_eq!(tuning.curve.amplitude, CURVE_AMPLITUDE);
        assert_eq!(tuning.friction, FRICTION);
        assert_eq!(tuning.track, Track::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        let tuning = Tuning::from_json("{}").expect("empty tuning should parse");
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Tuning::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_inverted_track_rejected() {
        let err = Tuning::from_json(r#"{ "track": { "left": 500.0, "right": 100.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "track", .. }));
    }

    #[test]
    fn test_partial_track_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "track": { "right": 900.0 } }"#)
            .expect("partial track should parse");
        assert_eq!(tuning.track.left, TRACK_LEFT);
        assert_eq!(tuning.track.right, 900.0);
    }

    #[test]
    fn test_huge_spark_count_rejected() {
        let err = Tuning::from_json(r#"{ "sparks": { "count": 18446744073709551615 } }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "sparks.count", .. }));

        let at_cap = format!(r#"{{ "sparks": {{ "count": {MAX_SPARK_COUNT} }} }}"#);
        let tuning = Tuning::from_json(&at_cap).expect("burst at the cap is allowed");
        assert_eq!(tuning.sparks.count, MAX_SPARK_COUNT);
    }

    #[test]
    fn test_bounce_must_lose_energy() {
        let err = Tuning::from_json(r#"{ "bounce": 1.2 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "bounce", .. }));
        assert!(err.to_string().contains("bounce"));
    }

    #[test]
    fn test_floor_y() {
        let tuning = Tuning::default();
        assert_eq!(tuning.floor_y(), CANVAS_HEIGHT - BALL_RADIUS);
    }
}
