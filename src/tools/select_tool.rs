use egui::Pos2;
use log::debug;

use crate::command::Command;
use crate::tools::{Tool, ToolContext};

/// Picks the topmost committed shape under the pointer.
#[derive(Debug, Clone, Default)]
pub struct SelectTool {
    selected: Option<usize>,
}

impl SelectTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the selected shape in the scene.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}

impl Tool for SelectTool {
    fn name(&self) -> &'static str {
        "select"
    }

    fn deactivate(&mut self) -> Option<Command> {
        self.clear_selection();
        None
    }

    fn on_pointer_down(&mut self, pos: Pos2, _pressure: f32, ctx: &mut ToolContext<'_>) -> Option<Command> {
        self.selected = ctx.scene.shape_at(pos).map(|(index, _)| index);
        debug!("Selection at {:?}: {:?}", pos, self.selected);
        None
    }

    fn on_pointer_move(&mut self, _pos: Pos2, _ctx: &mut ToolContext<'_>) -> Option<Command> {
        None
    }

    fn on_pointer_up(&mut self, _pos: Pos2, _ctx: &mut ToolContext<'_>) -> Option<Command> {
        None
    }

    fn current_state_name(&self) -> &'static str {
        if self.selected.is_some() { "Selected" } else { "Idle" }
    }
}
