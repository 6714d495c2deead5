use serde::{Deserialize, Serialize};

use crate::scene::Scene;
use crate::shape::Shape;

/// A committed mutation of the scene.
///
/// Undo and redo do not go through commands: the history replays whole
/// snapshots, so a command only needs to know how to apply itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Append a finished shape on top of the scene.
    AddShape(Shape),
    /// Remove every shape.
    Clear,
}

impl Command {
    pub fn execute(&self, scene: &mut Scene) {
        match self {
            Command::AddShape(shape) => scene.push(shape.clone()),
            Command::Clear => scene.clear(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::AddShape(_) => "AddShape",
            Command::Clear => "Clear",
        }
    }
}
