use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::geometry::is_point_in_shape;
use crate::shape::Shape;

/// Committed shapes in z-order: the first shape is drawn at the bottom.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Swap in a whole snapshot, as undo and redo do.
    pub fn replace(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
    }

    /// Deep copy of the shape list for the history.
    pub fn snapshot(&self) -> Vec<Shape> {
        self.shapes.clone()
    }

    /// Topmost shape under `pos`.
    pub fn shape_at(&self, pos: Pos2) -> Option<(usize, &Shape)> {
        self.shapes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, shape)| is_point_in_shape(pos, shape))
    }
}
