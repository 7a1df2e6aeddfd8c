//! Per-vertex adjacency lists.
//!
//! An entry aliases the neighbour's handle cell and carries a `direct` flag:
//! `true` marks a real edge from the owning vertex's point of view, `false`
//! marks the back-reference a directed graph keeps on the target so that edge
//! checks and vertex removal never scan the whole graph.
//!
//! Entries live in a `Vec` in insertion order; iteration runs newest-first so
//! the list behaves like a singly linked list with head insertion.

use crate::error::Result;
use crate::handle::HandleId;

/// A neighbour record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AdjacencyEntry {
    pub(crate) target: HandleId,
    pub(crate) direct: bool,
}

#[derive(Debug, Default)]
pub(crate) struct AdjacencyList {
    entries: Vec<AdjacencyEntry>,
}

impl AdjacencyList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds an entry at the head of the list.
    #[inline]
    pub(crate) fn prepend(&mut self, target: HandleId, direct: bool) {
        self.entries.push(AdjacencyEntry { target, direct });
    }

    /// Reserves room for `additional` entries so the next prepends cannot fail.
    pub(crate) fn reserve(&mut self, additional: usize) -> Result<()> {
        self.entries.try_reserve(additional)?;
        Ok(())
    }

    /// Removes the first entry (from the head) matching `target` and `direct`.
    pub(crate) fn find_and_remove(&mut self, target: HandleId, direct: bool) -> bool {
        match self
            .entries
            .iter()
            .rposition(|e| e.target == target && e.direct == direct)
        {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Whether some entry targets `target`; with `require_direct` only real
    /// edges count.
    pub(crate) fn contains(&self, target: HandleId, require_direct: bool) -> bool {
        self.iter()
            .any(|e| e.target == target && (!require_direct || e.direct))
    }

    /// Entries from the head.
    pub(crate) fn iter(&self) -> impl Iterator<Item = AdjacencyEntry> + '_ {
        self.entries.iter().rev().copied()
    }

    /// Drops every entry.
    pub(crate) fn release_all(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
