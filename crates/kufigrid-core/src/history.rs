//! Snapshot history.
//!
//! Undo is snapshot-based: the full lattice is cloned before each
//! destructive edit. The undo stack is bounded; recording past the cap
//! evicts the oldest snapshot, and any new edit clears the redo stack.

use std::collections::VecDeque;

use crate::lattice::Lattice;

/// Default bound on the undo stack.
pub const HISTORY_CAP: usize = 60;

/// A saved lattice state.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot(Lattice);

impl Lattice {
    /// Capture the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.clone())
    }

    /// Replace the current state with a snapshot's.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        *self = snapshot.0.clone();
    }
}

/// Bounded undo/redo stacks of lattice snapshots.
#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
    cap: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(HISTORY_CAP)
    }
}

impl History {
    pub fn new(cap: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            cap: cap.max(1),
        }
    }

    /// Record the pre-edit state. Clears any redoable future.
    pub fn record(&mut self, lat: &Lattice) {
        if self.undo.len() == self.cap {
            self.undo.pop_front();
        }
        self.undo.push_back(lat.snapshot());
        self.redo.clear();
    }

    /// Step back one edit. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self, lat: &mut Lattice) -> bool {
        let Some(prev) = self.undo.pop_back() else {
            return false;
        };
        self.redo.push(lat.snapshot());
        lat.restore(&prev);
        true
    }

    /// Step forward one undone edit. Returns `false` when there is nothing
    /// to redo.
    pub fn redo(&mut self, lat: &mut Lattice) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        self.undo.push_back(lat.snapshot());
        lat.restore(&next);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
