use egui::{Pos2, Rect};

use super::{distance_to_segment, point_in_polygon};
use crate::shape::{BoxShape, PolyShape, Shape, TextShape};

/// Extra slack around a stroke, on top of its width, that still counts as a hit.
pub const HIT_PADDING: f32 = 5.0;

pub fn hit_tolerance(shape: &Shape) -> f32 {
    shape.line_width() + HIT_PADDING
}

/// Test whether `pos` lands on `shape`. Never panics on degenerate geometry.
pub fn is_point_in_shape(pos: Pos2, shape: &Shape) -> bool {
    let tolerance = hit_tolerance(shape);

    match shape {
        Shape::Freehand(path) | Shape::SmoothFreehand(path) => {
            near_polyline(pos, &path.points, tolerance)
        }
        Shape::Line(line) => distance_to_segment(pos, line.start, line.end) <= tolerance,
        Shape::Arrow(arrow) => distance_to_segment(pos, arrow.start, arrow.end) <= tolerance,
        Shape::Rectangle(rect) => hit_rectangle(pos, rect, tolerance),
        Shape::Ellipse(ellipse) => hit_ellipse(pos, ellipse, tolerance),
        Shape::Polygon(poly) => hit_poly(pos, poly, tolerance, true),
        Shape::Bezier(poly) => hit_poly(pos, poly, tolerance, false),
        Shape::Text(text) => hit_text(pos, text),
    }
}

fn near_polyline(pos: Pos2, points: &[Pos2], tolerance: f32) -> bool {
    points
        .windows(2)
        .any(|w| distance_to_segment(pos, w[0], w[1]) <= tolerance)
}

fn rect_edges(rect: Rect) -> [(Pos2, Pos2); 4] {
    [
        (rect.left_top(), rect.right_top()),
        (rect.right_top(), rect.right_bottom()),
        (rect.right_bottom(), rect.left_bottom()),
        (rect.left_bottom(), rect.left_top()),
    ]
}

fn hit_rectangle(pos: Pos2, shape: &BoxShape, tolerance: f32) -> bool {
    let rect = shape.rect();
    if !shape.fill.is_transparent() && rect.contains(pos) {
        return true;
    }
    rect_edges(rect)
        .iter()
        .any(|(a, b)| distance_to_segment(pos, *a, *b) <= tolerance)
}

fn hit_ellipse(pos: Pos2, shape: &BoxShape, tolerance: f32) -> bool {
    let rect = shape.rect();
    let center = rect.center();
    let radius = rect.size() / 2.0;

    // A flat ellipse is just a segment between its extremes.
    if radius.x <= 0.0 || radius.y <= 0.0 {
        return distance_to_segment(pos, rect.min, rect.max) <= tolerance;
    }

    let dx = (pos.x - center.x) / radius.x;
    let dy = (pos.y - center.y) / radius.y;
    let distance = (dx * dx + dy * dy).sqrt();

    if !shape.fill.is_transparent() && distance <= 1.0 {
        return true;
    }
    (distance - 1.0).abs() * radius.x.min(radius.y) <= tolerance
}

fn hit_poly(pos: Pos2, shape: &PolyShape, tolerance: f32, closed: bool) -> bool {
    if !shape.fill.is_transparent() && point_in_polygon(pos, &shape.points) {
        return true;
    }
    if near_polyline(pos, &shape.points, tolerance) {
        return true;
    }
    if closed && shape.points.len() > 2 {
        let first = shape.points[0];
        let last = shape.points[shape.points.len() - 1];
        return distance_to_segment(pos, last, first) <= tolerance;
    }
    false
}

fn hit_text(pos: Pos2, text: &TextShape) -> bool {
    let size = text.approx_size();
    pos.x >= text.anchor.x
        && pos.x <= text.anchor.x + size.x
        && pos.y >= text.anchor.y - size.y
        && pos.y <= text.anchor.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Color, Fill, LineShape, PathShape, StrokeStyle};
    use egui::pos2;

    fn rectangle(fill: Fill) -> Shape {
        Shape::Rectangle(BoxShape {
            start: pos2(10.0, 10.0),
            end: pos2(110.0, 60.0),
            style: StrokeStyle::new(Color::BLACK, 2.0),
            fill,
        })
    }

    #[test]
    fn test_rectangle_border_is_hit() {
        let shape = rectangle(Fill::Transparent);
        assert!(is_point_in_shape(pos2(10.0, 30.0), &shape));
        assert!(is_point_in_shape(pos2(60.0, 60.0), &shape));
    }

    #[test]
    fn test_rectangle_beyond_tolerance_is_missed() {
        let shape = rectangle(Fill::Transparent);
        let tolerance = hit_tolerance(&shape);
        assert_eq!(tolerance, 7.0);
        let eps = 0.01;
        assert!(!is_point_in_shape(pos2(10.0 - tolerance - eps, 30.0), &shape));
        assert!(!is_point_in_shape(pos2(60.0, 60.0 + tolerance + eps), &shape));
        // Centre of an unfilled rectangle is far from every edge.
        assert!(!is_point_in_shape(pos2(60.0, 35.0), &shape));
    }

    #[test]
    fn test_filled_rectangle_interior_is_hit() {
        let shape = rectangle(Fill::Solid(Color::WHITE));
        assert!(is_point_in_shape(pos2(60.0, 35.0), &shape));
    }

    #[test]
    fn test_line_tolerance_includes_width() {
        let shape = Shape::Line(LineShape {
            start: pos2(0.0, 0.0),
            end: pos2(100.0, 0.0),
            style: StrokeStyle::new(Color::BLACK, 3.0),
        });
        assert!(is_point_in_shape(pos2(50.0, 8.0), &shape));
        assert!(!is_point_in_shape(pos2(50.0, 8.5), &shape));
    }

    #[test]
    fn test_freehand_checks_every_segment() {
        let shape = Shape::Freehand(PathShape {
            points: vec![pos2(0.0, 0.0), pos2(50.0, 0.0), pos2(50.0, 50.0)],
            style: StrokeStyle::new(Color::BLACK, 1.0),
        });
        assert!(is_point_in_shape(pos2(52.0, 40.0), &shape));
        assert!(!is_point_in_shape(pos2(20.0, 30.0), &shape));
    }

    #[test]
    fn test_ellipse_border_and_fill() {
        let outline = Shape::Ellipse(BoxShape {
            start: pos2(0.0, 0.0),
            end: pos2(100.0, 50.0),
            style: StrokeStyle::new(Color::BLACK, 1.0),
            fill: Fill::Transparent,
        });
        assert!(is_point_in_shape(pos2(100.0, 25.0), &outline));
        assert!(!is_point_in_shape(pos2(50.0, 25.0), &outline));

        let filled = Shape::Ellipse(BoxShape {
            fill: Fill::Solid(Color::BLACK),
            ..match outline {
                Shape::Ellipse(b) => b,
                _ => unreachable!(),
            }
        });
        assert!(is_point_in_shape(pos2(50.0, 25.0), &filled));
    }

    #[test]
    fn test_flat_ellipse_does_not_divide_by_zero() {
        let flat = Shape::Ellipse(BoxShape {
            start: pos2(0.0, 10.0),
            end: pos2(100.0, 10.0),
            style: StrokeStyle::new(Color::BLACK, 1.0),
            fill: Fill::Transparent,
        });
        assert!(is_point_in_shape(pos2(50.0, 12.0), &flat));
        assert!(!is_point_in_shape(pos2(50.0, 40.0), &flat));
    }

    #[test]
    fn test_polygon_closing_edge() {
        let triangle = Shape::Polygon(PolyShape {
            points: vec![pos2(0.0, 0.0), pos2(100.0, 0.0), pos2(100.0, 100.0)],
            style: StrokeStyle::new(Color::BLACK, 1.0),
            fill: Fill::Transparent,
        });
        // On the implicit edge from the last vertex back to the first.
        assert!(is_point_in_shape(pos2(50.0, 50.0), &triangle));

        let curve = Shape::Bezier(PolyShape {
            points: vec![pos2(0.0, 0.0), pos2(100.0, 0.0), pos2(100.0, 100.0)],
            style: StrokeStyle::new(Color::BLACK, 1.0),
            fill: Fill::Transparent,
        });
        assert!(!is_point_in_shape(pos2(50.0, 50.0), &curve));
    }

    #[test]
    fn test_text_box_above_baseline() {
        let text = Shape::Text(TextShape {
            anchor: pos2(10.0, 50.0),
            content: "hello".into(),
            font_size: 20.0,
            font_family: "Arial".into(),
            color: Color::BLACK,
        });
        // 5 chars * 20 * 0.6 = 60 wide, 24 tall above the baseline.
        assert!(is_point_in_shape(pos2(40.0, 40.0), &text));
        assert!(!is_point_in_shape(pos2(40.0, 55.0), &text));
        assert!(!is_point_in_shape(pos2(75.0, 40.0), &text));
    }
}
