use egui::Color32;
use serde::{Deserialize, Serialize};

/// A stroke or fill color as the user picked it.
///
/// Hex colors are kept as RGB so they can be re-emitted as an explicit TikZ
/// triple; anything else is treated as a named color and passed through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Color {
    Rgb(Color32),
    Named(String),
}

impl Color {
    pub const BLACK: Color = Color::Rgb(Color32::BLACK);
    pub const WHITE: Color = Color::Rgb(Color32::WHITE);

    /// Parse `#RRGGBB` (or `#RGB`) into an RGB color; any other text is a named color.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        match trimmed.strip_prefix('#').and_then(parse_hex) {
            Some(rgb) => Color::Rgb(rgb),
            None => Color::Named(trimmed.to_string()),
        }
    }

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb(Color32::from_rgb(r, g, b))
    }

    /// Resolve to a concrete color for painting. Unknown names paint black.
    pub fn to_color32(&self) -> Color32 {
        match self {
            Color::Rgb(c) => *c,
            Color::Named(name) => named_color(name).unwrap_or(Color32::BLACK),
        }
    }

    /// The TikZ spelling: `{rgb,255:red,R;green,G;blue,B}` for RGB, the name otherwise.
    pub fn to_tikz(&self) -> String {
        match self {
            Color::Rgb(c) => format!("{{rgb,255:red,{};green,{};blue,{}}}", c.r(), c.g(), c.b()),
            Color::Named(name) => name.clone(),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl From<Color32> for Color {
    fn from(c: Color32) -> Self {
        Color::Rgb(c)
    }
}

impl From<String> for Color {
    fn from(text: String) -> Self {
        Color::parse(&text)
    }
}

impl From<&str> for Color {
    fn from(text: &str) -> Self {
        Color::parse(text)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Rgb(c) => write!(f, "#{:02x}{:02x}{:02x}", c.r(), c.g(), c.b()),
            Color::Named(name) => f.write_str(name),
        }
    }
}

fn parse_hex(hex: &str) -> Option<Color32> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color32::from_rgb(r, g, b))
        }
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some(Color32::from_rgb(digit(0)?, digit(1)?, digit(2)?))
        }
        _ => None,
    }
}

fn named_color(name: &str) -> Option<Color32> {
    let c = match name.to_ascii_lowercase().as_str() {
        "black" => Color32::BLACK,
        "white" => Color32::WHITE,
        "red" => Color32::from_rgb(255, 0, 0),
        "green" => Color32::from_rgb(0, 128, 0),
        "blue" => Color32::from_rgb(0, 0, 255),
        "yellow" => Color32::from_rgb(255, 255, 0),
        "orange" => Color32::from_rgb(255, 165, 0),
        "purple" => Color32::from_rgb(128, 0, 128),
        "cyan" => Color32::from_rgb(0, 255, 255),
        "magenta" => Color32::from_rgb(255, 0, 255),
        "brown" => Color32::from_rgb(165, 42, 42),
        "gray" | "grey" => Color32::from_rgb(128, 128, 128),
        _ => return None,
    };
    Some(c)
}

/// Fill of a closed shape. Transparent is an explicit value, never a missing one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Fill {
    #[default]
    Transparent,
    Solid(Color),
}

impl Fill {
    pub fn is_transparent(&self) -> bool {
        matches!(self, Fill::Transparent)
    }

    pub fn color(&self) -> Option<&Color> {
        match self {
            Fill::Transparent => None,
            Fill::Solid(color) => Some(color),
        }
    }
}
