use egui::{Color32, Pos2, Rect, Stroke, Vec2};

use super::{FontSpec, Surface};

/// One call made on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Clear,
    FillRect(Rect, Color32),
    BeginPath,
    MoveTo(Pos2),
    LineTo(Pos2),
    QuadraticCurveTo(Pos2, Pos2),
    BezierCurveTo(Pos2, Pos2, Pos2),
    ClosePath,
    Rect(Rect),
    Ellipse(Pos2, Vec2),
    Stroke(Stroke),
    Fill(Color32),
    FillText {
        text: String,
        pos: Pos2,
        font: FontSpec,
        color: Color32,
    },
}

/// Headless surface that keeps a log of every drawing call.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Vec2,
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn count(&self, pred: impl Fn(&SurfaceOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    pub fn stroke_count(&self) -> usize {
        self.count(|op| matches!(op, SurfaceOp::Stroke(_)))
    }

    pub fn fill_count(&self) -> usize {
        self.count(|op| matches!(op, SurfaceOp::Fill(_)))
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Ops recorded after the most recent `clear`.
    pub fn since_clear(&self) -> &[SurfaceOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, SurfaceOp::Clear))
            .map_or(0, |i| i + 1);
        &self.ops[start..]
    }

    pub fn reset(&mut self) {
        self.ops.clear();
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.ops.push(SurfaceOp::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.ops.push(SurfaceOp::FillRect(rect, color));
    }

    fn begin_path(&mut self) {
        self.ops.push(SurfaceOp::BeginPath);
    }

    fn move_to(&mut self, point: Pos2) {
        self.ops.push(SurfaceOp::MoveTo(point));
    }

    fn line_to(&mut self, point: Pos2) {
        self.ops.push(SurfaceOp::LineTo(point));
    }

    fn quadratic_curve_to(&mut self, control: Pos2, to: Pos2) {
        self.ops.push(SurfaceOp::QuadraticCurveTo(control, to));
    }

    fn bezier_curve_to(&mut self, control1: Pos2, control2: Pos2, to: Pos2) {
        self.ops.push(SurfaceOp::BezierCurveTo(control1, control2, to));
    }

    fn close_path(&mut self) {
        self.ops.push(SurfaceOp::ClosePath);
    }

    fn rect(&mut self, rect: Rect) {
        self.ops.push(SurfaceOp::Rect(rect));
    }

    fn ellipse(&mut self, center: Pos2, radius: Vec2) {
        self.ops.push(SurfaceOp::Ellipse(center, radius));
    }

    fn stroke(&mut self, stroke: Stroke) {
        self.ops.push(SurfaceOp::Stroke(stroke));
    }

    fn fill(&mut self, color: Color32) {
        self.ops.push(SurfaceOp::Fill(color));
    }

    fn fill_text(&mut self, text: &str, pos: Pos2, font: &FontSpec, color: Color32) {
        self.ops.push(SurfaceOp::FillText {
            text: text.to_string(),
            pos,
            font: font.clone(),
            color,
        });
    }
}
