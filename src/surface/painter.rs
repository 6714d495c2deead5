use egui::epaint::PathStroke;
use egui::{Align2, Color32, FontFamily, FontId, Mesh, Painter, Pos2, Rect, Stroke, Vec2};

use super::{FontSpec, Surface};

const CURVE_SEGMENTS: usize = 16;
const ELLIPSE_SEGMENTS: usize = 48;

#[derive(Debug, Default)]
struct SubPath {
    points: Vec<Pos2>,
    closed: bool,
}

/// [`Surface`] backed by an egui painter, offset to a canvas rectangle.
///
/// Curves and ellipses are flattened into polylines. Fills are ear-clipped
/// into triangle meshes so concave outlines fill correctly.
pub struct PainterSurface<'a> {
    painter: &'a Painter,
    canvas: Rect,
    path: Vec<SubPath>,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a Painter, canvas: Rect) -> Self {
        Self {
            painter,
            canvas,
            path: Vec::new(),
        }
    }

    fn to_screen(&self, point: Pos2) -> Pos2 {
        self.canvas.min + point.to_vec2()
    }

    fn current(&mut self) -> &mut SubPath {
        if self.path.last().map_or(true, |sub| sub.closed) {
            let start = self.path.last().and_then(|sub| sub.points.first().copied());
            self.path.push(SubPath {
                points: start.into_iter().collect(),
                closed: false,
            });
        }
        // A subpath was pushed above if none was open.
        let last = self.path.len() - 1;
        &mut self.path[last]
    }

    fn last_point(&self) -> Pos2 {
        self.path
            .last()
            .and_then(|sub| sub.points.last().copied())
            .unwrap_or(Pos2::ZERO)
    }

    fn screen_points(&self, sub: &SubPath) -> Vec<Pos2> {
        sub.points.iter().map(|p| self.to_screen(*p)).collect()
    }
}

fn quadratic_point(p0: Pos2, c: Pos2, p1: Pos2, t: f32) -> Pos2 {
    let mt = 1.0 - t;
    (p0.to_vec2() * (mt * mt) + c.to_vec2() * (2.0 * mt * t) + p1.to_vec2() * (t * t)).to_pos2()
}

fn cubic_point(p0: Pos2, c1: Pos2, c2: Pos2, p1: Pos2, t: f32) -> Pos2 {
    let mt = 1.0 - t;
    (p0.to_vec2() * (mt * mt * mt)
        + c1.to_vec2() * (3.0 * mt * mt * t)
        + c2.to_vec2() * (3.0 * mt * t * t)
        + p1.to_vec2() * (t * t * t))
        .to_pos2()
}

fn cross(o: Pos2, a: Pos2, b: Pos2) -> f32 {
    (a - o).x * (b - o).y - (a - o).y * (b - o).x
}

/// Twice the signed area; the sign gives the winding.
fn signed_area(points: &[Pos2]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let (a, b) = (points[i], points[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum()
}

/// Ear-clipping triangulation of a simple polygon, as vertex indices.
/// Outlines with no ear left (self-intersecting ones) finish as a fan.
fn triangulate(points: &[Pos2]) -> Vec<[u32; 3]> {
    if points.len() < 3 {
        return Vec::new();
    }
    let winding = signed_area(points).signum();
    let mut remaining: Vec<usize> = (0..points.len()).collect();
    let mut triangles = Vec::with_capacity(points.len() - 2);

    while remaining.len() > 3 {
        let n = remaining.len();
        let ear = (0..n).find(|&i| {
            let (a, b, c) = (remaining[(i + n - 1) % n], remaining[i], remaining[(i + 1) % n]);
            let (pa, pb, pc) = (points[a], points[b], points[c]);
            if cross(pa, pb, pc) * winding <= 0.0 {
                return false;
            }
            !remaining.iter().any(|&j| {
                j != a
                    && j != b
                    && j != c
                    && cross(pa, pb, points[j]) * winding > 0.0
                    && cross(pb, pc, points[j]) * winding > 0.0
                    && cross(pc, pa, points[j]) * winding > 0.0
            })
        });
        let Some(i) = ear else {
            break;
        };
        let (a, b, c) = (remaining[(i + n - 1) % n], remaining[i], remaining[(i + 1) % n]);
        triangles.push([a as u32, b as u32, c as u32]);
        remaining.remove(i);
    }

    let first = remaining[0];
    for pair in remaining[1..].windows(2) {
        triangles.push([first as u32, pair[0] as u32, pair[1] as u32]);
    }
    triangles
}

fn egui_family(family: &str) -> FontFamily {
    let lower = family.to_ascii_lowercase();
    if lower.contains("mono") || lower.contains("courier") {
        FontFamily::Monospace
    } else {
        FontFamily::Proportional
    }
}

impl Surface for PainterSurface<'_> {
    fn size(&self) -> Vec2 {
        self.canvas.size()
    }

    fn clear(&mut self) {
        // egui repaints from scratch every frame; only the path state survives.
        self.path.clear();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        let rect = rect.translate(self.canvas.min.to_vec2());
        self.painter.rect_filled(rect, 0.0, color);
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, point: Pos2) {
        self.path.push(SubPath {
            points: vec![point],
            closed: false,
        });
    }

    fn line_to(&mut self, point: Pos2) {
        self.current().points.push(point);
    }

    fn quadratic_curve_to(&mut self, control: Pos2, to: Pos2) {
        let from = self.last_point();
        let sub = self.current();
        if sub.points.is_empty() {
            sub.points.push(from);
        }
        for i in 1..=CURVE_SEGMENTS {
            let t = i as f32 / CURVE_SEGMENTS as f32;
            sub.points.push(quadratic_point(from, control, to, t));
        }
    }

    fn bezier_curve_to(&mut self, control1: Pos2, control2: Pos2, to: Pos2) {
        let from = self.last_point();
        let sub = self.current();
        if sub.points.is_empty() {
            sub.points.push(from);
        }
        for i in 1..=CURVE_SEGMENTS {
            let t = i as f32 / CURVE_SEGMENTS as f32;
            sub.points.push(cubic_point(from, control1, control2, to, t));
        }
    }

    fn close_path(&mut self) {
        if let Some(sub) = self.path.last_mut() {
            sub.closed = true;
        }
    }

    fn rect(&mut self, rect: Rect) {
        self.path.push(SubPath {
            points: vec![rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()],
            closed: true,
        });
    }

    fn ellipse(&mut self, center: Pos2, radius: Vec2) {
        let points = (0..ELLIPSE_SEGMENTS)
            .map(|i| {
                let angle = i as f32 / ELLIPSE_SEGMENTS as f32 * std::f32::consts::TAU;
                center + Vec2::new(radius.x * angle.cos(), radius.y * angle.sin())
            })
            .collect();
        self.path.push(SubPath { points, closed: true });
    }

    fn stroke(&mut self, stroke: Stroke) {
        for sub in &self.path {
            if sub.points.len() < 2 {
                continue;
            }
            let points = self.screen_points(sub);
            let stroke = PathStroke::from(stroke);
            let shape = if sub.closed {
                egui::Shape::closed_line(points, stroke)
            } else {
                egui::Shape::line(points, stroke)
            };
            self.painter.add(shape);
        }
    }

    fn fill(&mut self, color: Color32) {
        for sub in &self.path {
            if sub.points.len() < 3 {
                continue;
            }
            let points = self.screen_points(sub);
            let mut mesh = Mesh::default();
            for point in &points {
                mesh.colored_vertex(*point, color);
            }
            for [a, b, c] in triangulate(&points) {
                mesh.add_triangle(a, b, c);
            }
            self.painter.add(egui::Shape::mesh(mesh));
        }
    }

    fn fill_text(&mut self, text: &str, pos: Pos2, font: &FontSpec, color: Color32) {
        let font_id = FontId::new(font.size.max(1.0), egui_family(&font.family));
        self.painter
            .text(self.to_screen(pos), Align2::LEFT_BOTTOM, text, font_id, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_curve_endpoints() {
        let (a, c, b) = (pos2(0.0, 0.0), pos2(5.0, 10.0), pos2(10.0, 0.0));
        assert_eq!(quadratic_point(a, c, b, 0.0), a);
        assert_eq!(quadratic_point(a, c, b, 1.0), b);
        assert_eq!(quadratic_point(a, c, b, 0.5), pos2(5.0, 5.0));

        let d = pos2(10.0, 10.0);
        assert_eq!(cubic_point(a, c, d, b, 1.0), b);
    }

    fn covered_area(points: &[Pos2]) -> f32 {
        triangulate(points)
            .iter()
            .map(|[a, b, c]| cross(points[*a as usize], points[*b as usize], points[*c as usize]).abs() / 2.0)
            .sum()
    }

    #[test]
    fn test_concave_fill_stays_inside_outline() {
        let l_shape = vec![
            pos2(0.0, 0.0),
            pos2(20.0, 0.0),
            pos2(20.0, 10.0),
            pos2(10.0, 10.0),
            pos2(10.0, 20.0),
            pos2(0.0, 20.0),
        ];
        assert_eq!(triangulate(&l_shape).len(), 4);
        assert_eq!(covered_area(&l_shape), 300.0);

        let reversed: Vec<Pos2> = l_shape.iter().rev().copied().collect();
        assert_eq!(covered_area(&reversed), 300.0);

        // No triangle may span the notch at (15, 15).
        for [a, b, c] in triangulate(&l_shape) {
            let (pa, pb, pc) = (l_shape[a as usize], l_shape[b as usize], l_shape[c as usize]);
            let p = pos2(15.0, 15.0);
            let signs = [cross(pa, pb, p), cross(pb, pc, p), cross(pc, pa, p)];
            assert!(!(signs.iter().all(|s| *s > 0.0) || signs.iter().all(|s| *s < 0.0)));
        }
    }

    #[test]
    fn test_convex_fill_triangles() {
        let square = [pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(10.0, 10.0), pos2(0.0, 10.0)];
        assert_eq!(triangulate(&square).len(), 2);
        assert_eq!(covered_area(&square), 100.0);
        assert!(triangulate(&square[..2]).is_empty());
    }

    #[test]
    fn test_font_family_mapping() {
        assert_eq!(egui_family("Courier New"), FontFamily::Monospace);
        assert_eq!(egui_family("Arial"), FontFamily::Proportional);
    }
}
