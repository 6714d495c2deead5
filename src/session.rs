use egui::{Key, Modifiers, Pos2, Vec2};
use log::{debug, info};

use crate::command::Command;
use crate::config::{ToolKind, ToolSettings};
use crate::error::SessionError;
use crate::history::{HistoryManager, HistorySink};
use crate::input::InputEvent;
use crate::renderer::Renderer;
use crate::scene::Scene;
use crate::shape::Shape;
use crate::surface::Surface;
use crate::text_buffer::TextBuffer;
use crate::tikz;
use crate::tools::{TextPrompt, Tool, ToolContext, ToolType, new_tool};

/// One drawing window: the scene being edited plus the tool, settings and
/// history that act on it.
///
/// All input arrives through [`DrawingSession::handle_event`]; the finished
/// drawing leaves through [`DrawingSession::insert_into`].
pub struct DrawingSession {
    settings: ToolSettings,
    scene: Scene,
    tool: ToolType,
    history: Option<Box<dyn HistorySink>>,
    text_prompt: Option<Box<dyn TextPrompt>>,
    renderer: Renderer,
    canvas_size: Vec2,
    last_pointer: Pos2,
    open: bool,
}

impl DrawingSession {
    /// A closed session with the default history.
    pub fn new(settings: ToolSettings, canvas_size: Vec2) -> Self {
        Self {
            tool: new_tool(settings.tool),
            settings,
            scene: Scene::new(),
            history: Some(Box::new(HistoryManager::default())),
            text_prompt: None,
            renderer: Renderer::new(),
            canvas_size,
            last_pointer: Pos2::ZERO,
            open: false,
        }
    }

    /// Replace the history, or run without undo/redo when `None`.
    pub fn with_history(mut self, history: Option<Box<dyn HistorySink>>) -> Self {
        self.history = history;
        self
    }

    pub fn with_text_prompt(mut self, prompt: Box<dyn TextPrompt>) -> Self {
        self.text_prompt = Some(prompt);
        self
    }

    pub fn set_text_prompt(&mut self, prompt: Option<Box<dyn TextPrompt>>) {
        self.text_prompt = prompt;
    }

    /// Start with an empty scene and empty history.
    pub fn open(&mut self) {
        self.reset();
        self.open = true;
        info!("Drawing session opened ({}x{})", self.canvas_size.x, self.canvas_size.y);
    }

    /// Discard the drawing without inserting it.
    pub fn close(&mut self) {
        if self.open {
            info!("Drawing session closed with {} unsaved shapes", self.scene.len());
        }
        self.reset();
        self.open = false;
    }

    fn reset(&mut self) {
        self.scene.clear();
        self.drop_tool_state();
        if let Some(history) = self.history.as_mut() {
            history.reset();
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    /// Changes take effect from the next shape started.
    pub fn settings_mut(&mut self) -> &mut ToolSettings {
        &mut self.settings
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn tool(&self) -> &ToolType {
        &self.tool
    }

    pub fn current_shape(&self) -> Option<&Shape> {
        self.tool.current_shape()
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    pub fn set_canvas_size(&mut self, size: Vec2) {
        self.canvas_size = size;
    }

    /// Switch tools, committing whatever the old tool was still placing.
    pub fn select_tool(&mut self, kind: ToolKind) {
        self.settings.tool = kind;
        if self.tool.kind() == kind {
            return;
        }
        if let Some(command) = self.tool.deactivate() {
            self.execute(command);
        }
        self.tool = new_tool(kind);
        info!("Tool changed to {}", kind.label());
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        if !self.open {
            return;
        }
        if let Some(pos) = event.position() {
            self.last_pointer = pos;
        }

        match event {
            InputEvent::PointerDown { position, pressure } => {
                let (pos, pressure) = (*position, *pressure);
                self.dispatch(|tool, ctx| tool.on_pointer_down(pos, pressure, ctx));
            }
            InputEvent::PointerMove { position, .. } => {
                let pos = *position;
                self.dispatch(|tool, ctx| tool.on_pointer_move(pos, ctx));
            }
            InputEvent::PointerUp { position } => {
                let pos = *position;
                self.dispatch(|tool, ctx| tool.on_pointer_up(pos, ctx));
            }
            InputEvent::PointerLeave => {
                let pos = self.last_pointer;
                self.dispatch(|tool, ctx| tool.on_pointer_up(pos, ctx));
            }
            InputEvent::KeyDown { key, modifiers } => self.handle_key(*key, *modifiers),
        }
    }

    fn handle_key(&mut self, key: Key, modifiers: Modifiers) {
        let command_key = modifiers.command || modifiers.ctrl;
        match key {
            Key::Enter | Key::Escape => self.finish_multi_point(),
            Key::Z if command_key && modifiers.shift => self.redo(),
            Key::Z if command_key => self.undo(),
            Key::Y if command_key => self.redo(),
            _ => {}
        }
    }

    /// Run a tool handler with the session's context and apply its result.
    fn dispatch(&mut self, handler: impl FnOnce(&mut ToolType, &mut ToolContext<'_>) -> Option<Command>) {
        let prompt = match self.text_prompt.as_mut() {
            Some(prompt) => {
                let prompt: &mut dyn TextPrompt = &mut **prompt;
                Some(prompt)
            }
            None => None,
        };
        let mut ctx = ToolContext {
            settings: &self.settings,
            scene: &self.scene,
            prompt,
        };
        if let Some(command) = handler(&mut self.tool, &mut ctx) {
            self.execute(command);
        }
    }

    /// Commit the polygon or bezier being placed. Too few points discards it.
    pub fn finish_multi_point(&mut self) {
        let command = self.tool.as_draw_shape_mut().and_then(|tool| tool.finish_multi_point());
        if let Some(command) = command {
            self.execute(command);
        }
    }

    /// Apply a command to the scene and record the result in history.
    pub fn execute(&mut self, command: Command) {
        debug!("Executing {}", command.name());
        command.execute(&mut self.scene);
        if let Some(history) = self.history.as_mut() {
            history.save_state(self.scene.shapes());
        }
    }

    /// Discard the pending shape or the selection; both index into a scene
    /// that is about to be replaced.
    fn drop_tool_state(&mut self) {
        if let Some(tool) = self.tool.as_draw_shape_mut() {
            tool.cancel();
        }
        if let Some(tool) = self.tool.as_select_mut() {
            tool.clear_selection();
        }
    }

    /// Remove every shape. Undoable.
    pub fn clear(&mut self) {
        self.drop_tool_state();
        self.execute(Command::Clear);
    }

    pub fn undo(&mut self) {
        let Some(shapes) = self.history.as_mut().and_then(|h| h.undo()) else {
            return;
        };
        self.drop_tool_state();
        info!("Undo: {} shapes", shapes.len());
        self.scene.replace(shapes);
    }

    pub fn redo(&mut self) {
        let Some(shapes) = self.history.as_mut().and_then(|h| h.redo()) else {
            return;
        };
        self.drop_tool_state();
        info!("Redo: {} shapes", shapes.len());
        self.scene.replace(shapes);
    }

    pub fn can_undo(&self) -> bool {
        self.history.as_ref().is_some_and(|h| h.can_undo())
    }

    pub fn can_redo(&self) -> bool {
        self.history.as_ref().is_some_and(|h| h.can_redo())
    }

    /// Topmost committed shape under `pos`.
    pub fn select_shape_at(&self, pos: Pos2) -> Option<(usize, &Shape)> {
        self.scene.shape_at(pos)
    }

    /// Shape picked by the select tool, if it is active and still exists.
    pub fn selected(&self) -> Option<(usize, &Shape)> {
        let index = self.tool.as_select()?.selected()?;
        self.scene.shapes().get(index).map(|shape| (index, shape))
    }

    /// Repaint grid, scene and the shape under construction.
    pub fn render(&self, surface: &mut dyn Surface) {
        self.renderer
            .render(surface, self.scene.shapes(), self.tool.current_shape(), &self.settings);
    }

    pub fn encode(&self) -> String {
        tikz::encode(self.scene.shapes(), self.canvas_size)
    }

    /// The encoded scene inside a `tikzpicture` environment.
    pub fn tikz_picture(&self) -> String {
        tikz::wrap_tikzpicture(&self.encode())
    }

    /// Splice the drawing into `buffer` at its cursor, then close the session.
    ///
    /// A multi-point shape still being placed is committed first. On error
    /// the session stays open and nothing is lost.
    pub fn insert_into(&mut self, buffer: &mut dyn TextBuffer) -> Result<(), SessionError> {
        if !self.open {
            return Err(SessionError::Closed);
        }
        self.finish_multi_point();

        let picture = self.tikz_picture();
        let position = buffer.cursor_position();
        buffer.insert_text_at(position, &picture)?;

        info!("Inserted drawing with {} shapes at {}", self.scene.len(), position);
        self.reset();
        self.open = false;
        Ok(())
    }
}
