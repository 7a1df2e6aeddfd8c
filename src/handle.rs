//! Stable vertex handles.
//!
//! Every vertex owns exactly one *handle cell* in a [`HandleTable`]. The cell
//! records the vertex's current slot index in the arena; compaction rewrites
//! that single value when it moves a vertex, and every adjacency entry that
//! refers to the vertex stores the cell's [`HandleId`] rather than the index,
//! so no edge list needs updating.
//!
//! Callers hold a [`VertexHandle`], which pairs the cell id with the cell's
//! generation. Releasing a cell bumps its generation, so a handle that
//! outlives its vertex is rejected even after the cell is recycled.

use crate::error::{GraphError, Result};

/// Identity of a handle cell.
///
/// This is the non-owning alias adjacency entries hold. Two entries refer to
/// the same vertex exactly when their ids are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct HandleId(u32);

impl HandleId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A stable, copyable reference to a vertex.
///
/// The handle stays valid across compaction and growth of the underlying
/// arena and becomes invalid once the vertex is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexHandle {
    id: HandleId,
    generation: u32,
}

impl VertexHandle {
    #[inline]
    pub(crate) fn cell(self) -> HandleId {
        self.id
    }

    /// Returns the raw id of the handle cell, for debugging or external maps.
    pub fn id(self) -> u32 {
        self.id.0
    }

    /// Returns the generation this handle was issued with.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy)]
struct HandleCell {
    slot: usize,
    generation: u32,
    live: bool,
}

/// Table of handle cells with id recycling.
#[derive(Debug, Default)]
pub(crate) struct HandleTable {
    cells: Vec<HandleCell>,
    free: Vec<u32>,
}

impl HandleTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Allocates a cell naming `slot`.
    ///
    /// Recycled cells keep the generation they were released with.
    pub(crate) fn allocate(&mut self, slot: usize) -> Result<VertexHandle> {
        if let Some(raw) = self.free.pop() {
            let cell = &mut self.cells[raw as usize];
            cell.slot = slot;
            cell.live = true;
            return Ok(VertexHandle {
                id: HandleId(raw),
                generation: cell.generation,
            });
        }

        let raw = u32::try_from(self.cells.len()).map_err(|_| GraphError::AllocationFailure)?;
        // The free list must be able to take this id back without allocating.
        self.cells.try_reserve(1)?;
        self.free.try_reserve(self.cells.len() + 1 - self.free.len())?;
        self.cells.push(HandleCell {
            slot,
            generation: 0,
            live: true,
        });
        Ok(VertexHandle {
            id: HandleId(raw),
            generation: 0,
        })
    }

    /// Resolves a public handle to the slot index its cell currently names.
    pub(crate) fn resolve(&self, handle: VertexHandle) -> Result<usize> {
        match self.cells.get(handle.id.index()) {
            Some(cell) if cell.live && cell.generation == handle.generation => Ok(cell.slot),
            _ => Err(GraphError::InvalidHandle),
        }
    }

    /// Slot index named by a live cell; `None` once the cell is released.
    #[inline]
    pub(crate) fn slot_of(&self, id: HandleId) -> Option<usize> {
        self.cells
            .get(id.index())
            .filter(|cell| cell.live)
            .map(|cell| cell.slot)
    }

    /// Rewrites the slot index of a live cell. Used by compaction.
    #[inline]
    pub(crate) fn relocate(&mut self, id: HandleId, slot: usize) {
        let cell = &mut self.cells[id.index()];
        debug_assert!(cell.live);
        cell.slot = slot;
    }

    /// Rebuilds the public handle for a live cell.
    #[inline]
    pub(crate) fn handle_of(&self, id: HandleId) -> VertexHandle {
        VertexHandle {
            id,
            generation: self.cells[id.index()].generation,
        }
    }

    /// Releases a cell; every handle issued for it goes stale.
    pub(crate) fn release(&mut self, id: HandleId) {
        let cell = &mut self.cells[id.index()];
        debug_assert!(cell.live);
        cell.live = false;
        cell.generation = cell.generation.wrapping_add(1);
        self.free.push(id.0);
    }

    /// Whether `id` is live and currently names `slot`.
    pub(crate) fn names(&self, id: HandleId, slot: usize) -> bool {
        self.cells
            .get(id.index())
            .is_some_and(|cell| cell.live && cell.slot == slot)
    }

    /// Number of live cells.
    pub(crate) fn live_count(&self) -> usize {
        self.cells.len() - self.free.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_resolve() {
        let mut table = HandleTable::new();
        let a = table.allocate(0).unwrap();
        let b = table.allocate(1).unwrap();

        assert_ne!(a, b);
        assert_eq!(table.resolve(a), Ok(0));
        assert_eq!(table.resolve(b), Ok(1));
        assert_eq!(table.live_count(), 2);
    }

    #[test]
    fn test_relocate_is_seen_through_every_alias() {
        let mut table = HandleTable::new();
        let a = table.allocate(7).unwrap();
        let alias = a.cell();

        table.relocate(alias, 3);
        assert_eq!(table.resolve(a), Ok(3));
        assert_eq!(table.slot_of(alias), Some(3));
    }

    #[test]
    fn test_released_handle_is_rejected_after_reuse() {
        let mut table = HandleTable::new();
        let stale = table.allocate(0).unwrap();
        table.release(stale.cell());
        assert_eq!(table.resolve(stale), Err(GraphError::InvalidHandle));

        let fresh = table.allocate(0).unwrap();
        assert_eq!(fresh.id(), stale.id());
        assert_ne!(fresh.generation(), stale.generation());
        assert_eq!(table.resolve(stale), Err(GraphError::InvalidHandle));
        assert_eq!(table.resolve(fresh), Ok(0));
        assert_eq!(table.handle_of(fresh.cell()), fresh);
    }
}
