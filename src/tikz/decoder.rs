use egui::{Color32, Pos2, Rect, Stroke, Vec2};
use log::trace;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::renderer::paint_arrow;
use crate::shape::Color;
use crate::surface::{FontSpec, Surface};

/// Stroke width when a statement has no `line width`, in TikZ units.
pub const DEFAULT_LINE_WIDTH: f32 = 0.2;
/// Screen pixels kept free around the previewed picture.
pub const PREVIEW_PADDING: f32 = 20.0;
/// Points per TikZ unit (one centimetre).
pub const PT_PER_UNIT: f32 = 28.45;

static DRAW_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\draw\[([^\]]*)\]([^;]+);").unwrap());
/// Everything of a `\node` up to the opening brace of its label.
static NODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\node\[([^\]]*)\]\s*at\s*\((-?[\d.]+),\s*(-?[\d.]+)\)\s*\{").unwrap());
static COORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((-?[\d.]+),\s*(-?[\d.]+)\)").unwrap());
static ELLIPSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\((-?[\d.]+),\s*(-?[\d.]+)\)\s*ellipse\s*\((-?[\d.]+)\s*and\s*(-?[\d.]+)\)").unwrap()
});
static RECTANGLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\((-?[\d.]+),\s*(-?[\d.]+)\)\s*rectangle\s*\((-?[\d.]+),\s*(-?[\d.]+)\)").unwrap()
});
static SEGMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\((-?[\d.]+),\s*(-?[\d.]+)\)\s*--\s*\((-?[\d.]+),\s*(-?[\d.]+)\)").unwrap()
});
static RGB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{rgb,255:red,(\d+);green,(\d+);blue,(\d+)\}$").unwrap());
static COLOR_OPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|,)\s*color=(\{[^}]*\}|[^,\]]+)").unwrap());
static FILL_OPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|,)\s*fill=(\{[^}]*\}|[^,\]]+)").unwrap());
static WIDTH_OPT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"line width=([\d.]+)pt").unwrap());
static FONT_SIZE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\fontsize\{([\d.]+)pt\}").unwrap());

/// Paint attributes of one statement, in TikZ units.
#[derive(Debug, Clone, PartialEq)]
pub struct TikzStyle {
    pub color: Color32,
    pub line_width: f32,
    pub fill: Option<Color32>,
}

impl Default for TikzStyle {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            line_width: DEFAULT_LINE_WIDTH,
            fill: None,
        }
    }
}

/// A recognized statement. Coordinates are TikZ units with Y pointing up.
#[derive(Debug, Clone, PartialEq)]
pub enum TikzCommand {
    Ellipse { center: Pos2, radius: Vec2, style: TikzStyle },
    Rectangle { corner1: Pos2, corner2: Pos2, style: TikzStyle },
    Arrow { start: Pos2, end: Pos2, style: TikzStyle },
    Path { points: Vec<Pos2>, closed: bool, style: TikzStyle },
    Text { anchor: Pos2, content: String, font_size_pt: f32, color: Color32 },
}

/// Interpret `source` as a list of drawing commands in source order.
/// Statements that match no known form are skipped.
pub fn decode(source: &str) -> Vec<TikzCommand> {
    let mut found: Vec<(usize, Option<TikzCommand>)> = DRAW_RE
        .captures_iter(source)
        .map(|caps| (offset(&caps), decode_draw(&caps[1], &caps[2])))
        .chain(
            NODE_RE
                .captures_iter(source)
                .map(|caps| (offset(&caps), decode_node(source, &caps))),
        )
        .collect();
    found.sort_by_key(|(at, _)| *at);

    found
        .into_iter()
        .filter_map(|(at, command)| {
            if command.is_none() {
                trace!("Skipping unrecognized TikZ statement at byte {at}");
            }
            command
        })
        .collect()
}

fn offset(caps: &Captures<'_>) -> usize {
    caps.get(0).map_or(0, |m| m.start())
}

fn number(text: &str) -> Option<f32> {
    text.parse().ok()
}

fn point(caps: &Captures<'_>, x: usize, y: usize) -> Option<Pos2> {
    Some(Pos2::new(number(&caps[x])?, number(&caps[y])?))
}

fn parse_color(value: &str) -> Option<Color32> {
    let value = value.trim();
    if let Some(caps) = RGB_RE.captures(value) {
        let channel = |i: usize| caps[i].parse::<u8>().ok();
        return Some(Color32::from_rgb(channel(1)?, channel(2)?, channel(3)?));
    }
    match Color::parse(value) {
        Color::Named(_) if !value.chars().all(|c| c.is_ascii_alphabetic()) => None,
        color => Some(color.to_color32()),
    }
}

fn parse_style(options: &str) -> TikzStyle {
    let color = COLOR_OPT_RE
        .captures(options)
        .and_then(|caps| parse_color(&caps[1]))
        .unwrap_or(Color32::BLACK);
    let line_width = WIDTH_OPT_RE
        .captures(options)
        .and_then(|caps| number(&caps[1]))
        .map_or(DEFAULT_LINE_WIDTH, |pt| pt / 10.0);
    let fill = FILL_OPT_RE
        .captures(options)
        .and_then(|caps| parse_color(&caps[1]));
    TikzStyle {
        color,
        line_width,
        fill,
    }
}

fn decode_draw(options: &str, body: &str) -> Option<TikzCommand> {
    let style = parse_style(options);

    if body.contains("ellipse") {
        let caps = ELLIPSE_RE.captures(body)?;
        return Some(TikzCommand::Ellipse {
            center: point(&caps, 1, 2)?,
            radius: Vec2::new(number(&caps[3])?, number(&caps[4])?),
            style,
        });
    }
    if body.contains("rectangle") {
        let caps = RECTANGLE_RE.captures(body)?;
        return Some(TikzCommand::Rectangle {
            corner1: point(&caps, 1, 2)?,
            corner2: point(&caps, 3, 4)?,
            style,
        });
    }
    if options.contains("->") {
        let caps = SEGMENT_RE.captures(body)?;
        return Some(TikzCommand::Arrow {
            start: point(&caps, 1, 2)?,
            end: point(&caps, 3, 4)?,
            style,
        });
    }
    if body.contains(" -- ") {
        let points: Vec<Pos2> = COORD_RE
            .captures_iter(body)
            .filter_map(|caps| point(&caps, 1, 2))
            .collect();
        if points.len() < 2 {
            return None;
        }
        return Some(TikzCommand::Path {
            points,
            closed: body.trim_end().ends_with("cycle"),
            style,
        });
    }
    None
}

/// The label starting right after the `{` at `start`, up to its matching
/// `}`, which must be followed by `;`. Escaped braces do not count.
fn node_label(source: &str, start: usize) -> Option<&str> {
    let rest = source.get(start..)?;
    let mut depth = 0usize;
    let mut chars = rest.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '{' => depth += 1,
            '}' if depth == 0 => {
                return rest[i + 1..].trim_start().starts_with(';').then(|| &rest[..i]);
            }
            '}' => depth -= 1,
            _ => {}
        }
    }
    None
}

fn decode_node(source: &str, caps: &Captures<'_>) -> Option<TikzCommand> {
    let label = node_label(source, caps.get(0)?.end())?;
    let options = &caps[1];
    let color = COLOR_OPT_RE
        .captures(options)
        .and_then(|c| parse_color(&c[1]))
        .unwrap_or(Color32::BLACK);
    let font_size_pt = FONT_SIZE_RE
        .captures(options)
        .and_then(|c| number(&c[1]))
        .unwrap_or(10.0);
    Some(TikzCommand::Text {
        anchor: point(caps, 2, 3)?,
        content: label.to_string(),
        font_size_pt,
        color,
    })
}

/// Extent of every `(x, y)` coordinate in `source`, padded by a tenth of the
/// larger side (at least half a unit). No coordinates gives `[-5, 5]²`.
pub fn tikz_bounds(source: &str) -> Rect {
    let mut points = COORD_RE
        .captures_iter(source)
        .filter_map(|caps| point(&caps, 1, 2));

    let Some(first) = points.next() else {
        return Rect::from_min_max(Pos2::new(-5.0, -5.0), Pos2::new(5.0, 5.0));
    };
    let rect = points.fold(Rect::from_min_max(first, first), |rect, p| {
        rect.union(Rect::from_min_max(p, p))
    });

    let padding = (rect.width() * 0.1).max(rect.height() * 0.1).max(0.5);
    rect.expand(padding)
}

/// Maps TikZ units onto a preview surface: uniform scale, centred, Y flipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewTransform {
    pub scale: f32,
    pub offset: Vec2,
}

impl PreviewTransform {
    pub fn fit(bounds: Rect, size: Vec2) -> Self {
        let span = |extent: f32| if extent == 0.0 { 1.0 } else { extent };
        let scale = ((size.x - PREVIEW_PADDING * 2.0) / span(bounds.width()))
            .min((size.y - PREVIEW_PADDING * 2.0) / span(bounds.height()));
        let center = bounds.center();
        Self {
            scale,
            offset: Vec2::new(size.x / 2.0 - center.x * scale, size.y / 2.0 + center.y * scale),
        }
    }

    pub fn to_screen(&self, p: Pos2) -> Pos2 {
        Pos2::new(self.offset.x + p.x * self.scale, self.offset.y - p.y * self.scale)
    }

    pub fn stroke(&self, style: &TikzStyle) -> Stroke {
        Stroke::new(style.line_width * self.scale, style.color)
    }
}

/// Paint decoded commands through `transform`.
pub fn replay(surface: &mut dyn Surface, commands: &[TikzCommand], transform: &PreviewTransform) {
    for command in commands {
        match command {
            TikzCommand::Ellipse { center, radius, style } => {
                surface.begin_path();
                surface.ellipse(transform.to_screen(*center), *radius * transform.scale);
                finish(surface, style, transform);
            }
            TikzCommand::Rectangle { corner1, corner2, style } => {
                surface.begin_path();
                surface.rect(Rect::from_two_pos(
                    transform.to_screen(*corner1),
                    transform.to_screen(*corner2),
                ));
                finish(surface, style, transform);
            }
            TikzCommand::Arrow { start, end, style } => {
                let head = style.line_width * 5.0 * transform.scale;
                paint_arrow(
                    surface,
                    transform.to_screen(*start),
                    transform.to_screen(*end),
                    transform.stroke(style),
                    head,
                );
            }
            TikzCommand::Path { points, closed, style } => {
                let Some((first, rest)) = points.split_first() else {
                    continue;
                };
                surface.begin_path();
                surface.move_to(transform.to_screen(*first));
                for p in rest {
                    surface.line_to(transform.to_screen(*p));
                }
                if *closed {
                    surface.close_path();
                    if let Some(fill) = style.fill {
                        surface.fill(fill);
                    }
                }
                surface.stroke(transform.stroke(style));
            }
            TikzCommand::Text { anchor, content, font_size_pt, color } => {
                let size = font_size_pt / PT_PER_UNIT * transform.scale;
                let font = FontSpec::new(size, "sans-serif");
                surface.fill_text(content, transform.to_screen(*anchor), &font, *color);
            }
        }
    }
}

fn finish(surface: &mut dyn Surface, style: &TikzStyle, transform: &PreviewTransform) {
    if let Some(fill) = style.fill {
        surface.fill(fill);
    }
    surface.stroke(transform.stroke(style));
}

/// Clear `surface` to white and paint `source` fitted into it.
/// Returns how many statements were drawn.
pub fn render_tikz(surface: &mut dyn Surface, source: &str) -> usize {
    let size = surface.size();
    surface.clear();
    surface.fill_rect(Rect::from_min_size(Pos2::ZERO, size), Color32::WHITE);

    let transform = PreviewTransform::fit(tikz_bounds(source), size);
    let commands = decode(source);
    replay(surface, &commands, &transform);
    commands.len()
}
