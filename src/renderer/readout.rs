//! Volume text drawn above the ball
//!
//! On the curve it reads `Volume: 42%`. Once detached the height above the
//! floor shows up as a decorative imaginary part: `Volume: 100 + 12i%`.

use glam::Vec2;

use crate::sim::{Ball, SliderState};
use crate::tuning::Tuning;

/// Gap between the top of the ball and the text baseline
const TEXT_GAP: f32 = 10.0;
/// Keeps centred text from running off either side of the canvas
const TEXT_EDGE_MARGIN: f32 = 40.0;

/// Text for the current frame
pub fn readout_text(state: &SliderState, tuning: &Tuning) -> String {
    let real = percent(state.volume(tuning));
    if state.ball.state.is_attached() {
        return format!("Volume: {real}%");
    }

    let height = tuning.canvas_height;
    let imag = percent((height - state.ball.pos.y) / height);
    let sign = if imag >= 0 { '+' } else { '-' };
    format!("Volume: {real} {sign} {}i%", imag.abs())
}

/// Where the text is anchored (centre of the baseline)
pub fn readout_position(ball: &Ball, tuning: &Tuning) -> Vec2 {
    let x = ball
        .pos
        .x
        .min(tuning.canvas_width - TEXT_EDGE_MARGIN)
        .max(TEXT_EDGE_MARGIN);
    Vec2::new(x, ball.pos.y - ball.radius - TEXT_GAP)
}

fn percent(fraction: f32) -> i32 {
    (fraction * 100.0).round() as i32
}
