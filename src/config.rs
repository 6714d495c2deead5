use std::fs;
use std::path::{Path, PathBuf};

use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::error::SettingsResult;
use crate::geometry::snap_to_grid;
use crate::shape::{Color, Fill, ShapeKind};

/// Smallest grid spacing, in pixels, used for drawing and snapping.
pub const MIN_GRID_SIZE: f32 = 1.0;

/// Every tool the drawing toolbar offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolKind {
    #[default]
    Freehand,
    SmoothFreehand,
    Line,
    Arrow,
    Rectangle,
    Ellipse,
    Polygon,
    Bezier,
    Text,
    Select,
}

impl ToolKind {
    pub const ALL: [ToolKind; 10] = [
        ToolKind::Select,
        ToolKind::Freehand,
        ToolKind::SmoothFreehand,
        ToolKind::Line,
        ToolKind::Arrow,
        ToolKind::Rectangle,
        ToolKind::Ellipse,
        ToolKind::Polygon,
        ToolKind::Bezier,
        ToolKind::Text,
    ];

    /// The shape this tool creates. The selection tool creates none.
    pub fn shape_kind(&self) -> Option<ShapeKind> {
        let kind = match self {
            ToolKind::Freehand => ShapeKind::Freehand,
            ToolKind::SmoothFreehand => ShapeKind::SmoothFreehand,
            ToolKind::Line => ShapeKind::Line,
            ToolKind::Arrow => ShapeKind::Arrow,
            ToolKind::Rectangle => ShapeKind::Rectangle,
            ToolKind::Ellipse => ShapeKind::Ellipse,
            ToolKind::Polygon => ShapeKind::Polygon,
            ToolKind::Bezier => ShapeKind::Bezier,
            ToolKind::Text => ShapeKind::Text,
            ToolKind::Select => return None,
        };
        Some(kind)
    }

    pub fn is_multi_point(&self) -> bool {
        self.shape_kind().is_some_and(|kind| kind.is_multi_point())
    }

    pub fn label(&self) -> &'static str {
        match self {
            ToolKind::Freehand => "Pen",
            ToolKind::SmoothFreehand => "Smooth pen",
            ToolKind::Line => "Line",
            ToolKind::Arrow => "Arrow",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Ellipse => "Ellipse",
            ToolKind::Polygon => "Polygon",
            ToolKind::Bezier => "Curve",
            ToolKind::Text => "Text",
            ToolKind::Select => "Select",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ToolKind::Freehand => "✏",
            ToolKind::SmoothFreehand => "〰",
            ToolKind::Line => "╱",
            ToolKind::Arrow => "➚",
            ToolKind::Rectangle => "▭",
            ToolKind::Ellipse => "◯",
            ToolKind::Polygon => "⬠",
            ToolKind::Bezier => "∿",
            ToolKind::Text => "T",
            ToolKind::Select => "⬉",
        }
    }
}

/// Tool configuration read whenever a new shape is started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub tool: ToolKind,
    pub color: Color,
    pub line_width: f32,
    pub fill_enabled: bool,
    /// Remembered while fill is disabled so toggling it back restores the color.
    pub fill_color: Color,
    pub font_size: f32,
    pub font_family: String,
    pub arrow_size: f32,
    pub show_grid: bool,
    pub snap_to_grid: bool,
    pub grid_size: f32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: ToolKind::Freehand,
            color: Color::BLACK,
            line_width: 2.0,
            fill_enabled: false,
            fill_color: Color::WHITE,
            font_size: 16.0,
            font_family: "Arial".to_string(),
            arrow_size: 10.0,
            show_grid: true,
            snap_to_grid: false,
            grid_size: 20.0,
        }
    }
}

impl ToolSettings {
    /// Fill applied to new closed shapes.
    pub fn fill(&self) -> Fill {
        if self.fill_enabled {
            Fill::Solid(self.fill_color.clone())
        } else {
            Fill::Transparent
        }
    }

    /// `grid_size` floored at [`MIN_GRID_SIZE`]. NaN also maps to the floor.
    pub fn grid_spacing(&self) -> f32 {
        self.grid_size.max(MIN_GRID_SIZE)
    }

    /// Apply grid snapping if it is turned on.
    pub fn snap(&self, pos: Pos2) -> Pos2 {
        if self.snap_to_grid {
            snap_to_grid(pos, self.grid_spacing())
        } else {
            pos
        }
    }
}

/// Loads and saves [`ToolSettings`] as pretty JSON.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(&self) -> SettingsResult<ToolSettings> {
        if !self.path.exists() {
            log::debug!("No settings at {}, using defaults", self.path.display());
            return Ok(ToolSettings::default());
        }
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self, settings: &ToolSettings) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json)?;
        log::debug!("Saved tool settings to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SettingsError;
    use egui::pos2;

    #[test]
    fn test_defaults() {
        let settings = ToolSettings::default();
        assert_eq!(settings.color, Color::parse("#000000"));
        assert_eq!(settings.line_width, 2.0);
        assert!(settings.fill().is_transparent());
        assert!(settings.show_grid);
        assert!(!settings.snap_to_grid);
        assert_eq!(settings.grid_size, 20.0);
    }

    #[test]
    fn test_snap_only_when_enabled() {
        let mut settings = ToolSettings::default();
        assert_eq!(settings.snap(pos2(29.0, 11.0)), pos2(29.0, 11.0));
        settings.snap_to_grid = true;
        assert_eq!(settings.snap(pos2(29.0, 11.0)), pos2(20.0, 20.0));
    }

    #[test]
    fn test_fill_remembers_color() {
        let mut settings = ToolSettings {
            fill_color: Color::parse("#00ff00"),
            ..Default::default()
        };
        assert!(settings.fill().is_transparent());
        settings.fill_enabled = true;
        assert_eq!(settings.fill(), Fill::Solid(Color::from_rgb(0, 255, 0)));
    }

    #[test]
    fn test_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("nested").join("settings.json"));

        assert_eq!(store.load().unwrap(), ToolSettings::default());

        let settings = ToolSettings {
            tool: ToolKind::Ellipse,
            color: Color::parse("red"),
            snap_to_grid: true,
            ..Default::default()
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn test_store_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r##"{"color": "#ff0000", "lineWidth": 9}"##).unwrap();

        let loaded = SettingsStore::new(&path).load().unwrap();
        assert_eq!(loaded.color, Color::from_rgb(255, 0, 0));
        // Unknown keys are ignored, so the width stays at its default.
        assert_eq!(loaded.line_width, 2.0);
    }

    #[test]
    fn test_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        let err = SettingsStore::new(&path).load().unwrap_err();
        assert!(matches!(err, SettingsError::Serde(_)));
    }

    #[test]
    fn test_tiny_grid_size_is_floored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"grid_size": 0.000001, "snap_to_grid": true}"#).unwrap();

        let loaded = SettingsStore::new(&path).load().unwrap();
        assert_eq!(loaded.grid_spacing(), MIN_GRID_SIZE);
        assert_eq!(loaded.snap(egui::pos2(10.4, 7.6)), egui::pos2(10.0, 8.0));

        let nan = ToolSettings {
            grid_size: f32::NAN,
            ..Default::default()
        };
        assert_eq!(nan.grid_spacing(), MIN_GRID_SIZE);
    }
}
