//! Bounded undo/redo stacks of owned snapshots.

use std::collections::VecDeque;

/// Undo/redo history holding at most `depth` steps in either direction.
///
/// The undo stack always keeps the current state on top, so it never drops
/// below one entry and holds at most `depth + 1`. Oldest entries are evicted
/// first. Recording a new state discards the redo trail.
#[derive(Debug)]
pub struct History<T> {
    undo_stack: VecDeque<T>,
    redo_stack: VecDeque<T>,
    depth: usize,
}

impl<T> History<T> {
    /// Creates a history whose floor is `initial`.
    pub fn new(depth: usize, initial: T) -> Self {
        let mut undo_stack = VecDeque::with_capacity(depth + 1);
        undo_stack.push_back(initial);
        Self {
            undo_stack,
            redo_stack: VecDeque::with_capacity(depth),
            depth,
        }
    }

    /// Records `snapshot` as the new current state.
    pub fn push(&mut self, snapshot: T) {
        self.undo_stack.push_back(snapshot);
        while self.undo_stack.len() > self.depth + 1 {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
    }

    /// Steps back one state and returns the state that is now current.
    ///
    /// Returns `None` without changing anything when only the floor remains.
    pub fn undo(&mut self) -> Option<&T> {
        if self.undo_stack.len() <= 1 {
            return None;
        }
        let top = self.undo_stack.pop_back()?;
        self.redo_stack.push_back(top);
        while self.redo_stack.len() > self.depth {
            self.redo_stack.pop_front();
        }
        self.undo_stack.back()
    }

    /// Re-applies the most recently undone state and returns it.
    pub fn redo(&mut self) -> Option<&T> {
        let next = self.redo_stack.pop_back()?;
        self.undo_stack.push_back(next);
        while self.undo_stack.len() > self.depth + 1 {
            self.undo_stack.pop_front();
        }
        self.undo_stack.back()
    }

    /// The state on top of the undo stack.
    pub fn current(&self) -> Option<&T> {
        self.undo_stack.back()
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Entries on the undo stack, current state included.
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }
}
