//! Presentation preferences
//!
//! Purely cosmetic knobs, kept apart from [`crate::Tuning`] so changing them
//! can never affect the simulation.

use serde::{Deserialize, Serialize};

/// Widget preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Play the landing pop
    pub sound: bool,
    /// Landing pop volume (0.0 - 1.0)
    pub volume: f32,

    // === Visual Effects ===
    /// Draw the spark burst on landing
    pub sparks: bool,
    /// Draw the volume text above the ball
    pub readout: bool,

    // === Colours (CSS) ===
    pub ball_color: String,
    pub curve_color: String,
    pub spark_color: String,
    pub text_color: String,
    pub font: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound: true,
            volume: 1.0,

            sparks: true,
            readout: true,

            ball_color: "#00ffcc".to_string(),
            curve_color: "#ffcc00".to_string(),
            spark_color: "#FFD700".to_string(),
            text_color: "#fff".to_string(),
            font: "16px monospace".to_string(),
        }
    }
}

impl Settings {
    /// Parse settings JSON, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match serde_json::from_str::<Self>(json) {
            Ok(mut settings) => {
                settings.volume = settings.volume.clamp(0.0, 1.0);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Effective landing volume (0 when sound is off)
    pub fn effective_volume(&self) -> f32 {
        if self.sound { self.volume } else { 0.0 }
    }
}
