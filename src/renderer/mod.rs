//! Frame composition over a host 2D drawing surface

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod readout;
pub mod shapes;

use glam::Vec2;

use crate::Settings;
use crate::sim::SliderState;
use crate::tuning::Tuning;

pub use readout::{readout_position, readout_text};

/// Drawing primitives the widget needs from its host
pub trait Surface {
    /// Clear the whole `width` x `height` area
    fn clear(&mut self, width: f32, height: f32);
    /// Stroke an open polyline
    fn stroke_polyline(&mut self, points: &[Vec2], color: &str, line_width: f32);
    /// Fill a closed polygon
    fn fill_polygon(&mut self, points: &[Vec2], color: &str);
    /// Stroke a circular arc from `start` to `end` (radians, clockwise on screen)
    fn stroke_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        color: &str,
        line_width: f32,
    );
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);
    /// Centered text at `pos`
    fn fill_text(&mut self, text: &str, pos: Vec2, color: &str, font: &str);
}

/// Curve stroke width
pub const CURVE_LINE_WIDTH: f32 = 3.0;

/// Draw one full frame: curve, icon, sparks, ball, readout
pub fn draw_frame(
    surface: &mut impl Surface,
    state: &SliderState,
    tuning: &Tuning,
    settings: &Settings,
) {
    surface.clear(tuning.canvas_width, tuning.canvas_height);

    let path = shapes::curve_polyline(tuning);
    surface.stroke_polyline(&path, &settings.curve_color, CURVE_LINE_WIDTH);

    shapes::draw_volume_icon(surface, &settings.curve_color);

    if settings.sparks {
        for spark in &state.sparks {
            let color = shapes::spark_color(&settings.spark_color, spark.alpha);
            surface.fill_circle(spark.pos, spark.radius, &color);
        }
    }

    surface.fill_circle(state.ball.pos, state.ball.radius, &settings.ball_color);

    if settings.readout {
        let text = readout_text(state, tuning);
        let pos = readout_position(&state.ball, tuning);
        surface.fill_text(&text, pos, &settings.text_color, &settings.font);
    }
}

/// Surface that records draw calls, for tests
#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Clear(f32, f32),
        Polyline { len: usize, color: String },
        Polygon { len: usize, color: String },
        Arc { center: Vec2, radius: f32 },
        Circle { center: Vec2, radius: f32, color: String },
        Text { text: String, pos: Vec2 },
    }

    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub calls: Vec<DrawCall>,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self, width: f32, height: f32) {
            self.calls.push(DrawCall::Clear(width, height));
        }

        fn stroke_polyline(&mut self, points: &[Vec2], color: &str, _line_width: f32) {
            self.calls.push(DrawCall::Polyline {
                len: points.len(),
                color: color.to_string(),
            });
        }

        fn fill_polygon(&mut self, points: &[Vec2], color: &str) {
            self.calls.push(DrawCall::Polygon {
                len: points.len(),
                color: color.to_string(),
            });
        }

        fn stroke_arc(
            &mut self,
            center: Vec2,
            radius: f32,
            _start: f32,
            _end: f32,
            _color: &str,
            _line_width: f32,
        ) {
            self.calls.push(DrawCall::Arc { center, radius });
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
            self.calls.push(DrawCall::Circle {
                center,
                radius,
                color: color.to_string(),
            });
        }

        fn fill_text(&mut self, text: &str, pos: Vec2, _color: &str, _font: &str) {
            self.calls.push(DrawCall::Text {
                text: text.to_string(),
                pos,
            });
        }
    }
}
