//! Structural parent resolution over a most-recent-first history of classified lines.
//!
//! Each history entry pairs the [`LineRecord`] with the handle it produced (a node for items, a
//! cluster for headings), so resolving a parent yields the graph object directly.

use crate::line::{LineKind, LineRecord};
use std::collections::VecDeque;

/// Most-recent-first sequence of previously seen records and their handles.
pub struct History<H> {
    entries: VecDeque<(LineRecord, H)>,
}

impl<H: Copy> History<H> {
    #[must_use]
    /// An empty history.
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Record a resolved line as the most recent entry.
    pub fn push(&mut self, record: LineRecord, handle: H) {
        self.entries.push_front((record, handle));
    }

    /// Forget every entry, used when a heading starts a new node scope.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    /// The most recently pushed entry.
    pub fn latest(&self) -> Option<&(LineRecord, H)> {
        self.entries.front()
    }

    #[must_use]
    /// Whether nothing has been pushed since creation or the last clear.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    /// Find the structural parent of `record`, scanning most recent first.
    ///
    /// Bullets and headings attach to the nearest strictly shallower entry, so siblings never
    /// parent each other. Numbered items attach to the nearest entry at equal or shallower depth,
    /// which chains consecutive steps. `None` means the parent is the enclosing cluster.
    pub fn find_parent(&self, record: &LineRecord) -> Option<&(LineRecord, H)> {
        self.entries
            .iter()
            .find(|(candidate, _)| is_parent(record, candidate))
    }
}

impl<H: Copy> Default for History<H> {
    fn default() -> Self {
        Self::new()
    }
}

fn is_parent(record: &LineRecord, candidate: &LineRecord) -> bool {
    match record.kind {
        LineKind::ChoiceItem | LineKind::Heading => candidate.depth < record.depth,
        LineKind::SequentialItem => {
            candidate.depth <= record.depth && candidate.line != record.line
        }
    }
}

#[cfg(test)]
#[path = "tests/ancestry.rs"]
mod tests;
