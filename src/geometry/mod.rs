use egui::{Pos2, Rect};

pub mod hit_testing;

pub use hit_testing::{hit_tolerance, is_point_in_shape};

/// Weight of the neighbour difference applied to interior points when smoothing.
pub const SMOOTHING_FACTOR: f32 = 0.3;

/// Distance from `point` to the segment `a`-`b`.
///
/// The projection is clamped to the segment, so points beyond either end
/// measure to that endpoint. A zero-length segment measures to `a`.
pub fn distance_to_segment(point: Pos2, a: Pos2, b: Pos2) -> f32 {
    let seg = b - a;
    let rel = point - a;

    let len_sq = seg.length_sq();
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (rel.dot(seg) / len_sq).clamp(0.0, 1.0)
    };

    let projection = a + seg * t;
    (point - projection).length()
}

/// Even-odd ray crossing test. Fewer than three vertices never contain anything.
pub fn point_in_polygon(point: Pos2, polygon: &[Pos2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let crossing_x = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < crossing_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Pull every interior point along its neighbours' direction.
/// Paths of two points or fewer are returned unchanged; endpoints never move.
pub fn smooth_path(points: &[Pos2]) -> Vec<Pos2> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut smoothed = Vec::with_capacity(points.len());
    smoothed.push(points[0]);
    for window in points.windows(3) {
        let (prev, current, next) = (window[0], window[1], window[2]);
        smoothed.push(current + (next - prev) * SMOOTHING_FACTOR);
    }
    smoothed.push(points[points.len() - 1]);
    smoothed
}

/// Round each coordinate to the nearest multiple of `grid_size`.
pub fn snap_to_grid(point: Pos2, grid_size: f32) -> Pos2 {
    if grid_size <= 0.0 {
        return point;
    }
    Pos2::new(
        (point.x / grid_size).round() * grid_size,
        (point.y / grid_size).round() * grid_size,
    )
}

/// Bounding box of a point set, or `None` if it is empty.
pub fn calculate_bounds(points: &[Pos2]) -> Option<Rect> {
    let first = *points.first()?;
    let rect = points
        .iter()
        .fold(Rect::from_min_max(first, first), |rect, p| rect.union(Rect::from_min_max(*p, *p)));
    Some(rect)
}
