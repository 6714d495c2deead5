use egui::Pos2;

use crate::command::Command;
use crate::config::{ToolKind, ToolSettings};
use crate::scene::Scene;
use crate::shape::Shape;

mod draw_shape_tool;
pub use draw_shape_tool::{DrawShapeState, DrawShapeTool, MIN_SAMPLE_DISTANCE};

mod select_tool;
pub use select_tool::SelectTool;

/// Asks the user for the content of a new text label.
pub trait TextPrompt {
    /// `None` or an empty string cancels the label.
    fn request_text(&mut self, anchor: Pos2) -> Option<String>;
}

impl<F> TextPrompt for F
where
    F: FnMut(Pos2) -> Option<String>,
{
    fn request_text(&mut self, anchor: Pos2) -> Option<String> {
        self(anchor)
    }
}

/// What a tool may read while handling pointer input.
pub struct ToolContext<'a> {
    pub settings: &'a ToolSettings,
    pub scene: &'a Scene,
    pub prompt: Option<&'a mut dyn TextPrompt>,
}

/// Tool trait defines the interface for all canvas tools.
///
/// Pointer handlers return a [`Command`] once an action is final; the
/// caller applies it to the scene and records history.
pub trait Tool {
    fn name(&self) -> &'static str;

    /// Called when the tool is switched away from. Returns any shape that
    /// must be committed rather than lost.
    fn deactivate(&mut self) -> Option<Command> {
        None
    }

    fn on_pointer_down(&mut self, pos: Pos2, pressure: f32, ctx: &mut ToolContext<'_>) -> Option<Command>;

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command>;

    fn on_pointer_up(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command>;

    /// The shape under construction, drawn on top of the scene.
    fn current_shape(&self) -> Option<&Shape> {
        None
    }

    fn current_state_name(&self) -> &'static str;
}

/// All available tools, dispatched without boxing.
#[derive(Debug, Clone)]
pub enum ToolType {
    DrawShape(DrawShapeTool),
    Select(SelectTool),
}

impl ToolType {
    pub fn kind(&self) -> ToolKind {
        match self {
            Self::DrawShape(tool) => tool.tool_kind(),
            Self::Select(_) => ToolKind::Select,
        }
    }

    pub fn as_draw_shape_mut(&mut self) -> Option<&mut DrawShapeTool> {
        match self {
            Self::DrawShape(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn as_select(&self) -> Option<&SelectTool> {
        match self {
            Self::Select(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn as_select_mut(&mut self) -> Option<&mut SelectTool> {
        match self {
            Self::Select(tool) => Some(tool),
            _ => None,
        }
    }
}

impl Tool for ToolType {
    fn name(&self) -> &'static str {
        match self {
            Self::DrawShape(tool) => tool.name(),
            Self::Select(tool) => tool.name(),
        }
    }

    fn deactivate(&mut self) -> Option<Command> {
        match self {
            Self::DrawShape(tool) => tool.deactivate(),
            Self::Select(tool) => tool.deactivate(),
        }
    }

    fn on_pointer_down(&mut self, pos: Pos2, pressure: f32, ctx: &mut ToolContext<'_>) -> Option<Command> {
        match self {
            Self::DrawShape(tool) => tool.on_pointer_down(pos, pressure, ctx),
            Self::Select(tool) => tool.on_pointer_down(pos, pressure, ctx),
        }
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        match self {
            Self::DrawShape(tool) => tool.on_pointer_move(pos, ctx),
            Self::Select(tool) => tool.on_pointer_move(pos, ctx),
        }
    }

    fn on_pointer_up(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        match self {
            Self::DrawShape(tool) => tool.on_pointer_up(pos, ctx),
            Self::Select(tool) => tool.on_pointer_up(pos, ctx),
        }
    }

    fn current_shape(&self) -> Option<&Shape> {
        match self {
            Self::DrawShape(tool) => tool.current_shape(),
            Self::Select(tool) => tool.current_shape(),
        }
    }

    fn current_state_name(&self) -> &'static str {
        match self {
            Self::DrawShape(tool) => tool.current_state_name(),
            Self::Select(tool) => tool.current_state_name(),
        }
    }
}

/// Factory for the tool behind a toolbar entry.
pub fn new_tool(kind: ToolKind) -> ToolType {
    match kind.shape_kind() {
        Some(shape_kind) => ToolType::DrawShape(DrawShapeTool::new(shape_kind)),
        None => ToolType::Select(SelectTool::new()),
    }
}
