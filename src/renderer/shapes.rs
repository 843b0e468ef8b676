//! Geometry for the static parts of the frame

use glam::Vec2;
use std::f32::consts::FRAC_PI_4;

use super::Surface;
use crate::tuning::Tuning;

/// Speaker glyph: triangle body plus two sound-wave arcs
const ICON_BODY: [Vec2; 3] = [
    Vec2::new(20.0, 150.0),
    Vec2::new(30.0, 140.0),
    Vec2::new(30.0, 160.0),
];
const ICON_WAVE_CENTER: Vec2 = Vec2::new(34.0, 150.0);
const ICON_WAVE_RADII: [f32; 2] = [5.0, 10.0];
const ICON_FILL: &str = "#fff";

/// The slider path sampled at unit steps across the track
pub fn curve_polyline(tuning: &Tuning) -> Vec<Vec2> {
    tuning.curve.samples(&tuning.track).collect()
}

/// Draw the speaker glyph; arcs use the path colour
pub fn draw_volume_icon(surface: &mut impl Surface, wave_color: &str) {
    surface.fill_polygon(&ICON_BODY, ICON_FILL);
    for radius in ICON_WAVE_RADII {
        surface.stroke_arc(
            ICON_WAVE_CENTER,
            radius,
            -FRAC_PI_4,
            FRAC_PI_4,
            wave_color,
            super::CURVE_LINE_WIDTH,
        );
    }
}

/// `#RRGGBB` plus an alpha byte, e.g. `#FFD700` at 0.5 -> `#FFD7007f`
pub fn spark_color(base: &str, alpha: f32) -> String {
    let byte = (alpha.clamp(0.0, 1.0) * 255.0).floor() as u8;
    format!("{base}{byte:02x}")
}
