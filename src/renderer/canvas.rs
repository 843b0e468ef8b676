//! `Surface` backed by a browser 2D canvas context

use glam::Vec2;
use std::f64::consts::TAU;
use web_sys::CanvasRenderingContext2d;

use super::Surface;

/// Trace `points` as the current path
fn trace(ctx: &CanvasRenderingContext2d, points: &[Vec2]) {
    ctx.begin_path();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        ctx.move_to(first.x as f64, first.y as f64);
    }
    for p in iter {
        ctx.line_to(p.x as f64, p.y as f64);
    }
}

impl Surface for CanvasRenderingContext2d {
    fn clear(&mut self, width: f32, height: f32) {
        self.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn stroke_polyline(&mut self, points: &[Vec2], color: &str, line_width: f32) {
        trace(self, points);
        self.set_stroke_style_str(color);
        self.set_line_width(line_width as f64);
        self.stroke();
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: &str) {
        trace(self, points);
        self.close_path();
        self.set_fill_style_str(color);
        self.fill();
    }

    fn stroke_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        color: &str,
        line_width: f32,
    ) {
        self.begin_path();
        self.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            start as f64,
            end as f64,
        )
        .ok();
        self.set_stroke_style_str(color);
        self.set_line_width(line_width as f64);
        self.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.begin_path();
        self.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .ok();
        self.set_fill_style_str(color);
        self.fill();
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, color: &str, font: &str) {
        self.set_fill_style_str(color);
        self.set_font(font);
        self.set_text_align("center");
        // Inherent method; the trait method of the same name would shadow it
        CanvasRenderingContext2d::fill_text(self, text, pos.x as f64, pos.y as f64).ok();
    }
}
