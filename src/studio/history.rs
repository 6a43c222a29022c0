//! Snapshot undo/redo.
//!
//! Callers push a full copy of the undoable state before mutating it. Undo
//! swaps the live state with the most recent snapshot.

use std::collections::VecDeque;

/// Bounded past/future stacks of `T` snapshots.
#[derive(Clone, Debug)]
pub struct History<T> {
    past: VecDeque<T>,
    future: Vec<T>,
    limit: usize,
}

impl<T> History<T> {
    pub fn new(limit: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record the state as it was before a mutation. Clears redo.
    pub fn checkpoint(&mut self, before: T) {
        if self.past.len() == self.limit {
            self.past.pop_front();
        }
        self.past.push_back(before);
        self.future.clear();
    }

    /// Step back: returns the snapshot to restore, keeping `current` for redo.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let previous = self.past.pop_back()?;
        self.future.push(current);
        Some(previous)
    }

    /// Step forward: returns the snapshot to restore, keeping `current` for undo.
    pub fn redo(&mut self, current: T) -> Option<T> {
        let next = self.future.pop()?;
        self.past.push_back(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo_cycle() {
        let mut history = History::new(10);
        let mut state = 1;

        history.checkpoint(state);
        state = 2;
        history.checkpoint(state);
        state = 3;

        state = history.undo(state).unwrap();
        assert_eq!(state, 2);
        state = history.undo(state).unwrap();
        assert_eq!(state, 1);
        assert!(history.undo(state).is_none());

        state = history.redo(state).unwrap();
        assert_eq!(state, 2);
        state = history.redo(state).unwrap();
        assert_eq!(state, 3);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_checkpoint_clears_redo() {
        let mut history = History::new(10);
        history.checkpoint("a");
        let restored = history.undo("b").unwrap();
        assert_eq!(restored, "a");
        assert!(history.can_redo());

        history.checkpoint("a");
        assert!(!history.can_redo());
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::new(2);
        history.checkpoint(1);
        history.checkpoint(2);
        history.checkpoint(3);
        assert_eq!(history.undo_depth(), 2);
        assert_eq!(history.undo(4), Some(3));
        assert_eq!(history.undo(3), Some(2));
        assert_eq!(history.undo(2), None);
    }
}
