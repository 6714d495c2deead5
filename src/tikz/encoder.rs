use egui::{Pos2, Vec2};

use crate::shape::{Fill, PolyShape, Shape, StrokeStyle, TextShape};

/// Width of the emitted picture in TikZ units.
pub const TIKZ_WIDTH: f32 = 10.0;
/// Canvas pixels added around the drawing before scaling.
pub const BOUNDS_PADDING: f32 = 10.0;
/// First line of every non-empty drawing.
pub const HEADER: &str = "% Drawing created in the LaTeX editor";
/// Output for a scene with no shapes.
pub const EMPTY_DRAWING: &str = "% Empty drawing";

/// Maps canvas pixels to TikZ units: centred, uniformly scaled, Y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TikzTransform {
    pub center: Pos2,
    pub scale: f32,
}

impl TikzTransform {
    /// Fit the padded bounding box of `shapes` (clamped to the canvas) to
    /// [`TIKZ_WIDTH`] units.
    pub fn fit(shapes: &[Shape], canvas_size: Vec2) -> Self {
        let mut min = canvas_size.to_pos2();
        let mut max = Pos2::ZERO;
        for point in shapes.iter().flat_map(Shape::extent_points) {
            min = min.min(point);
            max = max.max(point);
        }

        let min = (min - Vec2::splat(BOUNDS_PADDING)).max(Pos2::ZERO);
        let max = (max + Vec2::splat(BOUNDS_PADDING)).min(canvas_size.to_pos2());

        let span = max.x - min.x;
        let scale = if span > f32::EPSILON { TIKZ_WIDTH / span } else { 1.0 };

        Self {
            center: min + (max - min) / 2.0,
            scale,
        }
    }

    pub fn x(&self, x: f32) -> f32 {
        (x - self.center.x) * self.scale
    }

    pub fn y(&self, y: f32) -> f32 {
        -(y - self.center.y) * self.scale
    }

    pub fn point(&self, p: Pos2) -> Pos2 {
        Pos2::new(self.x(p.x), self.y(p.y))
    }
}

/// Compile a scene drawn on a `canvas_size` canvas into TikZ statements.
pub fn encode(shapes: &[Shape], canvas_size: Vec2) -> String {
    if shapes.is_empty() {
        return EMPTY_DRAWING.to_string();
    }

    let transform = TikzTransform::fit(shapes, canvas_size);
    let mut lines = vec![HEADER.to_string(), String::new()];
    lines.extend(shapes.iter().filter_map(|shape| encode_shape(shape, &transform)));
    lines.join("\n")
}

/// One statement for `shape`, or `None` if it has too little geometry.
pub fn encode_shape(shape: &Shape, t: &TikzTransform) -> Option<String> {
    let statement = match shape {
        Shape::Freehand(path) | Shape::SmoothFreehand(path) => {
            draw(&options(&path.style, None, false), &chain(&path.points, t)?)
        }
        Shape::Line(line) => draw(
            &options(&line.style, None, false),
            &chain(&[line.start, line.end], t)?,
        ),
        Shape::Arrow(arrow) => draw(
            &options(&arrow.style, None, true),
            &chain(&[arrow.start, arrow.end], t)?,
        ),
        Shape::Rectangle(rect) => {
            let r = rect.rect();
            // Canvas bottom is the lower TikZ y.
            let lower_left = Pos2::new(t.x(r.min.x), t.y(r.max.y));
            let upper_right = Pos2::new(t.x(r.max.x), t.y(r.min.y));
            draw(
                &options(&rect.style, Some(&rect.fill), false),
                &format!("{} rectangle {}", coord(lower_left), coord(upper_right)),
            )
        }
        Shape::Ellipse(ellipse) => {
            let r = ellipse.rect();
            let radius = r.size() / 2.0 * t.scale;
            draw(
                &options(&ellipse.style, Some(&ellipse.fill), false),
                &format!(
                    "{} ellipse ({} and {})",
                    coord(t.point(r.center())),
                    fixed(radius.x),
                    fixed(radius.y)
                ),
            )
        }
        Shape::Polygon(poly) => encode_polygon(poly, t)?,
        Shape::Bezier(poly) => draw(&options(&poly.style, None, false), &chain(&poly.points, t)?),
        Shape::Text(text) => encode_text(text, t),
    };
    Some(statement)
}

fn encode_polygon(poly: &PolyShape, t: &TikzTransform) -> Option<String> {
    let path = chain(&poly.points, t)?;
    Some(draw(
        &options(&poly.style, Some(&poly.fill), false),
        &format!("{path} -- cycle"),
    ))
}

fn encode_text(text: &TextShape, t: &TikzTransform) -> String {
    let size = text.font_size / 1.5;
    format!(
        "\\node[color={}, font=\\fontsize{{{}pt}}{{{}pt}}\\selectfont] at {} {{{}}};",
        text.color.to_tikz(),
        number(size),
        number(size * 1.2),
        coord(t.point(text.anchor)),
        text.content
    )
}

fn draw(options: &str, path: &str) -> String {
    format!("\\draw[{options}] {path};")
}

fn options(style: &StrokeStyle, fill: Option<&Fill>, arrow: bool) -> String {
    let mut opts = vec![
        format!("color={}", style.color.to_tikz()),
        format!("line width={}pt", number(style.width)),
    ];
    if let Some(color) = fill.and_then(Fill::color) {
        opts.push(format!("fill={}", color.to_tikz()));
    }
    if arrow {
        opts.push("->".to_string());
        opts.push(">=stealth".to_string());
    }
    opts.join(", ")
}

/// `(x, y) -- (x, y) -- ...`, or `None` for fewer than two points.
fn chain(points: &[Pos2], t: &TikzTransform) -> Option<String> {
    if points.len() < 2 {
        return None;
    }
    let coords: Vec<String> = points.iter().map(|p| coord(t.point(*p))).collect();
    Some(coords.join(" -- "))
}

fn coord(p: Pos2) -> String {
    format!("({}, {})", fixed(p.x), fixed(p.y))
}

/// Two decimals, never printing a negative zero.
pub fn fixed(value: f32) -> String {
    let text = format!("{value:.2}");
    if text == "-0.00" { "0.00".to_string() } else { text }
}

/// Up to two decimals with trailing zeros dropped: `2`, `1.5`, `10.67`.
pub fn number(value: f32) -> String {
    let text = format!("{value:.2}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" { "0".to_string() } else { trimmed.to_string() }
}
