use egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};

mod color;

pub use color::{Color, Fill};

/// Discriminant of [`Shape`], also used to name shapes in logs and the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    Freehand,
    SmoothFreehand,
    Line,
    Arrow,
    Rectangle,
    Ellipse,
    Polygon,
    Bezier,
    Text,
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Freehand => "freehand",
            ShapeKind::SmoothFreehand => "smoothFreehand",
            ShapeKind::Line => "line",
            ShapeKind::Arrow => "arrow",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Bezier => "bezier",
            ShapeKind::Text => "text",
        }
    }

    /// Shapes built click by click and finished explicitly.
    pub fn is_multi_point(&self) -> bool {
        matches!(self, ShapeKind::Polygon | ShapeKind::Bezier)
    }

    /// Fewest points a path-like shape needs to be committed.
    pub fn min_points(&self) -> usize {
        match self {
            ShapeKind::Polygon => 3,
            _ => 2,
        }
    }
}

/// Stroke color and width. The width already has pen pressure applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
}

impl StrokeStyle {
    pub fn new(color: impl Into<Color>, width: f32) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }

    pub fn to_egui(&self) -> egui::Stroke {
        egui::Stroke::new(self.width, self.color.to_color32())
    }
}

/// Freehand strokes: a continuous, decimated sequence of samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathShape {
    pub points: Vec<Pos2>,
    pub style: StrokeStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineShape {
    pub start: Pos2,
    pub end: Pos2,
    pub style: StrokeStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowShape {
    pub start: Pos2,
    pub end: Pos2,
    pub style: StrokeStyle,
    pub head_size: f32,
}

/// Rectangles and ellipses: `start`/`end` are opposite corners in any order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxShape {
    pub start: Pos2,
    pub end: Pos2,
    pub style: StrokeStyle,
    pub fill: Fill,
}

impl BoxShape {
    /// The bounding box with min/max normalized regardless of drag direction.
    pub fn rect(&self) -> Rect {
        Rect::from_two_pos(self.start, self.end)
    }
}

/// Polygons and bezier curves: points added one click at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolyShape {
    pub points: Vec<Pos2>,
    pub style: StrokeStyle,
    pub fill: Fill,
}

/// A text label. `anchor` is the left end of the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextShape {
    pub anchor: Pos2,
    pub content: String,
    pub font_size: f32,
    pub font_family: String,
    pub color: Color,
}

impl TextShape {
    /// Approximate extent, since there are no real font metrics here.
    pub fn approx_size(&self) -> egui::Vec2 {
        egui::vec2(
            self.content.chars().count() as f32 * self.font_size * 0.6,
            self.font_size * 1.2,
        )
    }
}

/// One drawn object. Each kind carries only the fields that make sense for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Shape {
    Freehand(PathShape),
    SmoothFreehand(PathShape),
    Line(LineShape),
    Arrow(ArrowShape),
    Rectangle(BoxShape),
    Ellipse(BoxShape),
    Polygon(PolyShape),
    Bezier(PolyShape),
    Text(TextShape),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Freehand(_) => ShapeKind::Freehand,
            Shape::SmoothFreehand(_) => ShapeKind::SmoothFreehand,
            Shape::Line(_) => ShapeKind::Line,
            Shape::Arrow(_) => ShapeKind::Arrow,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Polygon(_) => ShapeKind::Polygon,
            Shape::Bezier(_) => ShapeKind::Bezier,
            Shape::Text(_) => ShapeKind::Text,
        }
    }

    /// Stroke style, for every kind except text.
    pub fn stroke(&self) -> Option<&StrokeStyle> {
        match self {
            Shape::Freehand(s) | Shape::SmoothFreehand(s) => Some(&s.style),
            Shape::Line(s) => Some(&s.style),
            Shape::Arrow(s) => Some(&s.style),
            Shape::Rectangle(s) | Shape::Ellipse(s) => Some(&s.style),
            Shape::Polygon(s) | Shape::Bezier(s) => Some(&s.style),
            Shape::Text(_) => None,
        }
    }

    pub fn line_width(&self) -> f32 {
        self.stroke().map_or(0.0, |style| style.width)
    }

    pub fn fill(&self) -> &Fill {
        const NO_FILL: &Fill = &Fill::Transparent;
        match self {
            Shape::Rectangle(s) | Shape::Ellipse(s) => &s.fill,
            Shape::Polygon(s) | Shape::Bezier(s) => &s.fill,
            _ => NO_FILL,
        }
    }

    /// Ordered points of path-like shapes (freehand, polygon, bezier).
    pub fn path_points(&self) -> Option<&[Pos2]> {
        match self {
            Shape::Freehand(s) | Shape::SmoothFreehand(s) => Some(&s.points),
            Shape::Polygon(s) | Shape::Bezier(s) => Some(&s.points),
            _ => None,
        }
    }

    /// Every coordinate that defines the shape's extent on the canvas.
    pub fn extent_points(&self) -> Vec<Pos2> {
        match self {
            Shape::Freehand(s) | Shape::SmoothFreehand(s) => s.points.clone(),
            Shape::Polygon(s) | Shape::Bezier(s) => s.points.clone(),
            Shape::Line(s) => vec![s.start, s.end],
            Shape::Arrow(s) => vec![s.start, s.end],
            Shape::Rectangle(s) | Shape::Ellipse(s) => vec![s.start, s.end],
            Shape::Text(t) => {
                let size = t.approx_size();
                vec![t.anchor, t.anchor + egui::vec2(size.x, t.font_size)]
            }
        }
    }

    /// Whether the shape has enough geometry to be kept once drawing ends.
    pub fn is_complete(&self) -> bool {
        match self.path_points() {
            Some(points) => points.len() >= self.kind().min_points(),
            None => match self {
                Shape::Text(t) => !t.content.is_empty(),
                _ => true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn freehand(points: Vec<Pos2>) -> Shape {
        Shape::Freehand(PathShape {
            points,
            style: StrokeStyle::new(Color::BLACK, 2.0),
        })
    }

    #[test]
    fn test_box_rect_is_normalized() {
        let shape = BoxShape {
            start: pos2(110.0, 60.0),
            end: pos2(10.0, 10.0),
            style: StrokeStyle::new(Color::BLACK, 1.0),
            fill: Fill::Transparent,
        };
        let rect = shape.rect();
        assert_eq!(rect.min, pos2(10.0, 10.0));
        assert_eq!(rect.max, pos2(110.0, 60.0));
    }

    #[test]
    fn test_completeness_by_kind() {
        assert!(!freehand(vec![pos2(0.0, 0.0)]).is_complete());
        assert!(freehand(vec![pos2(0.0, 0.0), pos2(1.0, 1.0)]).is_complete());

        let polygon = Shape::Polygon(PolyShape {
            points: vec![pos2(0.0, 0.0), pos2(10.0, 0.0)],
            style: StrokeStyle::new(Color::BLACK, 1.0),
            fill: Fill::Transparent,
        });
        assert!(!polygon.is_complete());
    }

    #[test]
    fn test_text_has_no_stroke() {
        let text = Shape::Text(TextShape {
            anchor: pos2(5.0, 5.0),
            content: "abc".into(),
            font_size: 10.0,
            font_family: "Arial".into(),
            color: Color::BLACK,
        });
        assert!(text.stroke().is_none());
        assert_eq!(text.line_width(), 0.0);
        assert!(text.fill().is_transparent());
    }

    #[test]
    fn test_serde_tags_by_kind() {
        let json = serde_json::to_string(&freehand(vec![pos2(1.0, 2.0)])).unwrap();
        assert!(json.contains("\"kind\":\"freehand\""));
        let back: Shape = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind(), ShapeKind::Freehand);
    }
}
