use std::f32::consts::PI;

use egui::{Color32, Pos2, Stroke, Vec2};

use crate::config::ToolSettings;
use crate::shape::{ArrowShape, BoxShape, PolyShape, Shape, TextShape};
use crate::surface::{FontSpec, Surface};

/// Half-angle between an arrow shaft and each side of its head.
pub const ARROW_HEAD_ANGLE: f32 = PI / 6.0;

/// Paints a scene, the grid and the shape under construction.
#[derive(Debug, Clone)]
pub struct Renderer {
    grid_stroke: Stroke,
    axis_stroke: Stroke,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            grid_stroke: Stroke::new(0.5, Color32::from_rgb(0xe0, 0xe0, 0xe0)),
            axis_stroke: Stroke::new(1.0, Color32::from_rgb(0xa0, 0xa0, 0xa0)),
        }
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full repaint: clear, grid, committed shapes in order, then `current` on top.
    pub fn render(
        &self,
        surface: &mut dyn Surface,
        shapes: &[Shape],
        current: Option<&Shape>,
        settings: &ToolSettings,
    ) {
        surface.clear();
        self.draw_grid(surface, settings);
        for shape in shapes {
            draw_shape(surface, shape);
        }
        if let Some(shape) = current {
            draw_shape(surface, shape);
        }
    }

    /// Minor lines every `grid_spacing()` pixels (when shown) and the two midline axes.
    pub fn draw_grid(&self, surface: &mut dyn Surface, settings: &ToolSettings) {
        let size = surface.size();

        if settings.show_grid {
            let step = settings.grid_spacing();
            let columns = (size.x / step).floor() as usize;
            let rows = (size.y / step).floor() as usize;
            for i in 0..=columns {
                let x = i as f32 * step;
                stroke_segment(surface, Pos2::new(x, 0.0), Pos2::new(x, size.y), self.grid_stroke);
            }
            for i in 0..=rows {
                let y = i as f32 * step;
                stroke_segment(surface, Pos2::new(0.0, y), Pos2::new(size.x, y), self.grid_stroke);
            }
        }

        let mid = size / 2.0;
        stroke_segment(surface, Pos2::new(0.0, mid.y), Pos2::new(size.x, mid.y), self.axis_stroke);
        stroke_segment(surface, Pos2::new(mid.x, 0.0), Pos2::new(mid.x, size.y), self.axis_stroke);
    }
}

fn stroke_segment(surface: &mut dyn Surface, from: Pos2, to: Pos2, stroke: Stroke) {
    surface.begin_path();
    surface.move_to(from);
    surface.line_to(to);
    surface.stroke(stroke);
}

/// Paint one shape with its own style.
pub fn draw_shape(surface: &mut dyn Surface, shape: &Shape) {
    match shape {
        Shape::Freehand(path) => {
            if trace_polyline(surface, &path.points) {
                surface.stroke(path.style.to_egui());
            }
        }
        Shape::SmoothFreehand(path) => {
            if trace_smooth(surface, &path.points) {
                surface.stroke(path.style.to_egui());
            }
        }
        Shape::Line(line) => {
            stroke_segment(surface, line.start, line.end, line.style.to_egui());
        }
        Shape::Arrow(arrow) => draw_arrow(surface, arrow),
        Shape::Rectangle(rect) => {
            surface.begin_path();
            surface.rect(rect.rect());
            fill_and_stroke(surface, rect);
        }
        Shape::Ellipse(ellipse) => {
            let rect = ellipse.rect();
            surface.begin_path();
            surface.ellipse(rect.center(), rect.size() / 2.0);
            fill_and_stroke(surface, ellipse);
        }
        Shape::Polygon(poly) => draw_polygon(surface, poly),
        Shape::Bezier(poly) => draw_bezier(surface, poly),
        Shape::Text(text) => draw_text(surface, text),
    }
}

/// Start a path through `points`. Returns false when there is nothing to draw.
fn trace_polyline(surface: &mut dyn Surface, points: &[Pos2]) -> bool {
    let Some((first, rest)) = points.split_first() else {
        return false;
    };
    surface.begin_path();
    surface.move_to(*first);
    for point in rest {
        surface.line_to(*point);
    }
    true
}

/// Quadratic segments through the midpoints, finishing with a straight line.
fn trace_smooth(surface: &mut dyn Surface, points: &[Pos2]) -> bool {
    let Some(first) = points.first() else {
        return false;
    };
    surface.begin_path();
    surface.move_to(*first);
    if points.len() < 2 {
        return true;
    }
    for pair in points[1..].windows(2) {
        let mid = pair[0] + (pair[1] - pair[0]) / 2.0;
        surface.quadratic_curve_to(pair[0], mid);
    }
    surface.line_to(points[points.len() - 1]);
    true
}

fn fill_and_stroke(surface: &mut dyn Surface, shape: &BoxShape) {
    if let Some(color) = shape.fill.color() {
        surface.fill(color.to_color32());
    }
    surface.stroke(shape.style.to_egui());
}

/// Two corners of a triangular head pointing at `tip` along `angle`.
pub fn arrow_head(tip: Pos2, angle: f32, length: f32) -> [Pos2; 2] {
    let side = |a: f32| tip - Vec2::new(a.cos(), a.sin()) * length;
    [side(angle - ARROW_HEAD_ANGLE), side(angle + ARROW_HEAD_ANGLE)]
}

/// Shaft, then a filled head in the stroke color.
pub fn paint_arrow(surface: &mut dyn Surface, start: Pos2, end: Pos2, stroke: Stroke, head_length: f32) {
    stroke_segment(surface, start, end, stroke);

    let delta = end - start;
    let [left, right] = arrow_head(end, delta.y.atan2(delta.x), head_length);
    surface.begin_path();
    surface.move_to(end);
    surface.line_to(left);
    surface.line_to(right);
    surface.close_path();
    surface.fill(stroke.color);
}

fn draw_arrow(surface: &mut dyn Surface, arrow: &ArrowShape) {
    paint_arrow(surface, arrow.start, arrow.end, arrow.style.to_egui(), arrow.head_size);
}

fn draw_polygon(surface: &mut dyn Surface, poly: &PolyShape) {
    if !trace_polyline(surface, &poly.points) {
        return;
    }
    if poly.points.len() > 2 {
        surface.close_path();
        if let Some(color) = poly.fill.color() {
            surface.fill(color.to_color32());
        }
    }
    surface.stroke(poly.style.to_egui());
}

/// Cubic segments three points at a time; a leftover pair becomes a quadratic,
/// a leftover single point a line.
fn draw_bezier(surface: &mut dyn Surface, poly: &PolyShape) {
    let points = &poly.points;
    let Some(first) = points.first() else {
        return;
    };
    surface.begin_path();
    surface.move_to(*first);

    let mut i = 1;
    while i + 2 < points.len() {
        surface.bezier_curve_to(points[i], points[i + 1], points[i + 2]);
        i += 3;
    }
    match points.len() - i {
        1 => surface.line_to(points[i]),
        2 => surface.quadratic_curve_to(points[i], points[i + 1]),
        _ => {}
    }

    if points.len() > 2 {
        if let Some(color) = poly.fill.color() {
            surface.fill(color.to_color32());
        }
    }
    surface.stroke(poly.style.to_egui());
}

fn draw_text(surface: &mut dyn Surface, text: &TextShape) {
    let font = FontSpec::new(text.font_size, text.font_family.clone());
    surface.fill_text(&text.content, text.anchor, &font, text.color.to_color32());
}
