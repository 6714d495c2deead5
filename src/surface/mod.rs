//! Minimal 2D raster API the renderer and the TikZ preview paint through.
//!
//! It follows the immediate path model: build a path with `begin_path`,
//! `move_to` and friends, then `stroke` or `fill` it. Coordinates are in
//! surface pixels with the origin at the top left.

use egui::{Color32, Pos2, Rect, Stroke, Vec2};

mod painter;
mod recording;

pub use painter::PainterSurface;
pub use recording::{RecordingSurface, SurfaceOp};

/// Font requested for a text draw.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub size: f32,
    pub family: String,
}

impl FontSpec {
    pub fn new(size: f32, family: impl Into<String>) -> Self {
        Self {
            size,
            family: family.into(),
        }
    }
}

pub trait Surface {
    /// Drawable area in pixels.
    fn size(&self) -> Vec2;

    /// Erase everything and drop any path under construction.
    fn clear(&mut self);

    fn fill_rect(&mut self, rect: Rect, color: Color32);

    fn begin_path(&mut self);

    fn move_to(&mut self, point: Pos2);

    fn line_to(&mut self, point: Pos2);

    fn quadratic_curve_to(&mut self, control: Pos2, to: Pos2);

    fn bezier_curve_to(&mut self, control1: Pos2, control2: Pos2, to: Pos2);

    fn close_path(&mut self);

    /// Add a closed rectangle as its own subpath.
    fn rect(&mut self, rect: Rect);

    /// Add a closed axis-aligned ellipse as its own subpath.
    fn ellipse(&mut self, center: Pos2, radius: Vec2);

    fn stroke(&mut self, stroke: Stroke);

    fn fill(&mut self, color: Color32);

    /// Draw `text` with its baseline starting at `pos`.
    fn fill_text(&mut self, text: &str, pos: Pos2, font: &FontSpec, color: Color32);
}
