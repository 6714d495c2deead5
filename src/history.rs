use std::collections::VecDeque;

use log::debug;

use crate::shape::Shape;

/// Undo snapshots kept before the oldest is evicted.
pub const MAX_HISTORY_SIZE: usize = 50;

/// Observer of committed scene changes that can hand back earlier states.
pub trait HistorySink {
    /// Record the scene after a committed mutation. Unchanged scenes are ignored.
    fn save_state(&mut self, shapes: &[Shape]);

    /// The state to restore, or `None` when there is nothing to undo.
    fn undo(&mut self) -> Option<Vec<Shape>>;

    fn redo(&mut self) -> Option<Vec<Shape>>;

    fn can_undo(&self) -> bool;

    fn can_redo(&self) -> bool;

    /// Forget everything and treat the empty scene as current.
    fn reset(&mut self);
}

/// Snapshot-based undo/redo over the committed shape list.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    undo_stack: VecDeque<Vec<Shape>>,
    redo_stack: Vec<Vec<Shape>>,
    current: Vec<Shape>,
    max_history: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(MAX_HISTORY_SIZE)
    }
}

impl HistoryManager {
    pub fn new(max_history: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(max_history),
            redo_stack: Vec::new(),
            current: Vec::new(),
            max_history,
        }
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn current(&self) -> &[Shape] {
        &self.current
    }
}

impl HistorySink for HistoryManager {
    fn save_state(&mut self, shapes: &[Shape]) {
        if shapes == self.current.as_slice() {
            return;
        }

        let previous = std::mem::replace(&mut self.current, shapes.to_vec());
        self.undo_stack.push_back(previous);
        if self.undo_stack.len() > self.max_history {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
        debug!("History saved: {} undo, {} shapes", self.undo_stack.len(), shapes.len());
    }

    fn undo(&mut self) -> Option<Vec<Shape>> {
        let previous = self.undo_stack.pop_back()?;
        let current = std::mem::replace(&mut self.current, previous);
        self.redo_stack.push(current);
        Some(self.current.clone())
    }

    fn redo(&mut self) -> Option<Vec<Shape>> {
        let next = self.redo_stack.pop()?;
        let current = std::mem::replace(&mut self.current, next);
        self.undo_stack.push_back(current);
        Some(self.current.clone())
    }

    fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn reset(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current.clear();
    }
}
