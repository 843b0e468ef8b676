//! The slider path and the horizontal track it spans

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A sine wave whose amplitude and frequency are modulated by a slower sine of x
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Curve {
    /// Vertical centre line of the wave
    pub baseline: f32,
    pub amplitude: f32,
    pub amplitude_mod: f32,
    pub frequency: f32,
    pub frequency_mod: f32,
    /// Rate of the slow modulating sine
    pub mod_rate: f32,
}

impl Default for Curve {
    fn default() -> Self {
        Self {
            baseline: CURVE_BASELINE,
            amplitude: CURVE_AMPLITUDE,
            amplitude_mod: CURVE_AMPLITUDE_MOD,
            frequency: CURVE_FREQUENCY,
            frequency_mod: CURVE_FREQUENCY_MOD,
            mod_rate: CURVE_MOD_RATE,
        }
    }
}

impl Curve {
    /// Vertical position of the curve at `x`
    #[inline]
    pub fn y_at(&self, x: f32) -> f32 {
        let m = (x * self.mod_rate).sin();
        let amplitude = self.amplitude + self.amplitude_mod * m;
        let frequency = self.frequency + self.frequency_mod * m;
        self.baseline + amplitude * (x * frequency).sin()
    }

    /// Centered finite-difference slope over a unit step.
    /// Positive means the curve descends on screen (canvas y grows downward).
    #[inline]
    pub fn slope_at(&self, x: f32) -> f32 {
        (self.y_at(x + 1.0) - self.y_at(x - 1.0)) / 2.0
    }

    /// Point on the curve at `x`
    #[inline]
    pub fn point_at(&self, x: f32) -> Vec2 {
        Vec2::new(x, self.y_at(x))
    }

    /// Vertical distance from `pos` to the curve directly above/below it
    #[inline]
    pub fn vertical_distance(&self, pos: Vec2) -> f32 {
        (pos.y - self.y_at(pos.x)).abs()
    }

    /// Curve points sampled at unit steps across the track (both ends included)
    pub fn samples(&self, track: &Track) -> impl Iterator<Item = Vec2> + '_ {
        let left = track.left;
        let steps = track.width().max(0.0).floor() as u32;
        (0..=steps).map(move |i| self.point_at(left + i as f32))
    }
}

/// Horizontal interval the ball is confined to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Track {
    pub left: f32,
    pub right: f32,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            left: TRACK_LEFT,
            right: TRACK_RIGHT,
        }
    }
}

impl Track {
    pub fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.left, self.right)
    }

    /// Position along the track in [0, 1]; this is the slider's volume
    #[inline]
    pub fn normalized(&self, x: f32) -> f32 {
        let width = self.width();
        if width <= 0.0 {
            return 0.0;
        }
        ((x - self.left) / width).clamp(0.0, 1.0)
    }

    /// True once `x` has reached the right end
    #[inline]
    pub fn at_right_end(&self, x: f32) -> bool {
        self.normalized(x) >= 1.0 && x >= self.right - 1.0
    }
}
