//! Bounded linear undo/redo over independent snapshots.

use std::collections::VecDeque;

use crate::scene::model::Configuration;

/// Snapshots retained by default.
pub const DEFAULT_CAPACITY: usize = 30;

/// Undo history for the editor's configuration.
pub type HistoryManager = History<Configuration>;

/// Snapshot list with a cursor.
///
/// Stored values are owned clones; every read hands out another clone, so callers can mutate
/// what they get back freely. The list is never empty and the cursor always points at a
/// stored snapshot.
#[derive(Clone, Debug)]
pub struct History<T> {
    snapshots: VecDeque<T>,
    cursor: usize,
    capacity: usize,
}

impl<T: Clone> History<T> {
    pub fn new(initial: &T) -> Self {
        Self::with_capacity(initial, DEFAULT_CAPACITY)
    }

    /// `capacity` is clamped to at least one snapshot.
    pub fn with_capacity(initial: &T, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut snapshots = VecDeque::with_capacity(capacity);
        snapshots.push_back(initial.clone());
        Self {
            snapshots,
            cursor: 0,
            capacity,
        }
    }

    /// Record a committed state. Anything after the cursor is discarded first.
    pub fn push(&mut self, state: &T) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push_back(state.clone());
        self.cursor = self.snapshots.len() - 1;

        if self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
            self.cursor -= 1;
        }
        tracing::debug!(len = self.snapshots.len(), cursor = self.cursor, "history push");
    }

    /// Step back one snapshot; `None` at the oldest one.
    pub fn undo(&mut self) -> Option<T> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.snapshots.get(self.cursor).cloned()
    }

    /// Step forward one snapshot; `None` at the newest one.
    pub fn redo(&mut self) -> Option<T> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.snapshots.get(self.cursor).cloned()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Copy of the snapshot under the cursor.
    pub fn current(&self) -> T {
        // The list always holds the cursor's entry.
        self.snapshots[self.cursor].clone()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
#[path = "../../tests/unit/history/manager.rs"]
mod tests;
