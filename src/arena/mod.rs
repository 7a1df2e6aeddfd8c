//! `VertexArena` — a compacting pool of vertex slots behind stable handles.
//!
//! Slots live in one contiguous vector whose length is the arena capacity.
//! New vertices always land at the *high-water mark*, the first index not used
//! since the last compaction; removal leaves a hole. Holes are reclaimed by
//! [`VertexArena::compact`], which slides live vertices from above the live
//! count into the holes below it and rewrites each moved vertex's handle cell.
//! Handles and adjacency aliases go through that cell, so nothing else has to
//! be renumbered.
//!
//! # Performance
//! - `insert`: O(1) amortized, O(capacity) when it compacts or grows
//! - `remove`: O(1) plus the high-water shrink
//! - `validate`: O(1)
//! - `compact` / `grow`: O(capacity)

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::adjacency::AdjacencyList;
use crate::config::GraphConfig;
use crate::error::{GraphError, Result};
use crate::handle::{HandleId, HandleTable, VertexHandle};


/// Plane coordinates attached to a vertex for drawing front ends.
///
/// The graph stores the value and never interprets it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

/// An occupied vertex slot.
#[derive(Debug)]
pub(crate) struct VertexSlot<C> {
    pub(crate) content: C,
    /// The handle cell this slot owns.
    pub(crate) owner: HandleId,
    pub(crate) position: Position,
    pub(crate) neighbors: AdjacencyList,
}

/// Array-backed vertex storage with compaction and growth.
#[derive(Debug)]
pub struct VertexArena<C> {
    /// `len() == capacity`; `None` marks a free slot.
    slots: Vec<Option<VertexSlot<C>>>,
    handles: HandleTable,
    high_water: usize,
    occupied: usize,
    fragmentation_threshold: f32,
    growth_factor: usize,
}

impl<C> VertexArena<C> {
    /// Creates an arena with `capacity` free slots and default tuning.
    ///
    /// # Errors
    /// [`GraphError::AllocationFailure`] if the slots cannot be reserved.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_config(&GraphConfig::default().with_initial_capacity(capacity))
    }

    /// Creates an arena from a validated configuration.
    ///
    /// # Errors
    /// [`GraphError::InvalidConfig`] for a rejected configuration,
    /// [`GraphError::AllocationFailure`] if the initial slots cannot be reserved.
    pub fn with_config(config: &GraphConfig) -> Result<Self> {
        config.validate()?;
        let mut slots = Vec::new();
        slots.try_reserve_exact(config.initial_capacity)?;
        slots.resize_with(config.initial_capacity, || None);
        Ok(Self {
            slots,
            handles: HandleTable::new(),
            high_water: 0,
            occupied: 0,
            fragmentation_threshold: config.fragmentation_threshold,
            growth_factor: config.growth_factor,
        })
    }

    /// Number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.occupied
    }

    /// Returns true if no vertex is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// First slot index not in use since the last compaction.
    #[inline]
    pub fn high_water_mark(&self) -> usize {
        self.high_water
    }

    #[allow(clippy::cast_precision_loss)]
    fn is_fragmented(&self) -> bool {
        (self.occupied as f32) < self.fragmentation_threshold * self.high_water as f32
    }

    /// Stores `content` in a new slot and returns its handle.
    ///
    /// Compacts first when the arena is fragmented, and grows it when the
    /// high-water mark has reached capacity.
    ///
    /// # Errors
    /// [`GraphError::AllocationFailure`] if growth or the handle table cannot
    /// allocate. The arena stays valid, possibly compacted.
    pub fn insert(&mut self, content: C) -> Result<VertexHandle> {
        if self.is_fragmented() {
            self.compact();
        }
        if self.high_water == self.capacity() {
            self.grow(self.growth_factor)?;
        }

        let index = self.high_water;
        let handle = self.handles.allocate(index)?;
        self.slots[index] = Some(VertexSlot {
            content,
            owner: handle.cell(),
            position: Position::default(),
            neighbors: AdjacencyList::new(),
        });
        self.high_water += 1;
        self.occupied += 1;

        trace!(index, handle = handle.id(), "inserted vertex");
        Ok(handle)
    }

    /// Frees the vertex's slot and returns its content.
    ///
    /// The slot's adjacency list is dropped as is; unlinking neighbours is the
    /// caller's job.
    ///
    /// # Errors
    /// [`GraphError::InvalidHandle`] if the handle does not name a live vertex.
    pub fn remove(&mut self, handle: VertexHandle) -> Result<C> {
        let index = self.validate(handle)?;
        let slot = self.slots[index].take().ok_or(GraphError::InvalidHandle)?;
        self.occupied -= 1;

        while self.high_water > 0 && self.slots[self.high_water - 1].is_none() {
            self.high_water -= 1;
        }
        self.handles.release(slot.owner);

        trace!(index, handle = handle.id(), "removed vertex");
        Ok(slot.content)
    }

    /// Moves every live vertex into `0..len()`, rewriting moved handles.
    pub fn compact(&mut self) {
        let mut free = 0;
        let mut src = self.occupied;
        let mut moved = 0usize;

        while free < self.occupied {
            if self.slots[free].is_some() {
                free += 1;
                continue;
            }
            // Every hole below `occupied` has a live vertex above it to fill it.
            while self.slots[src].is_none() {
                src += 1;
            }
            let vertex = self.slots[src].take();
            if let Some(slot) = &vertex {
                self.handles.relocate(slot.owner, free);
            }
            self.slots[free] = vertex;

            moved += 1;
            src += 1;
            free += 1;
        }
        self.high_water = self.occupied;

        if moved > 0 {
            debug!(moved, live = self.occupied, "compacted vertex arena");
        }
    }

    /// Compacts, then multiplies the capacity by `multiplier`.
    ///
    /// Capacity always increases by at least one slot.
    ///
    /// # Errors
    /// [`GraphError::AllocationFailure`] if the new capacity overflows or
    /// cannot be reserved; the arena keeps its compacted old storage.
    pub fn grow(&mut self, multiplier: usize) -> Result<()> {
        self.compact();

        let old = self.capacity();
        let new_capacity = old
            .checked_mul(multiplier)
            .ok_or(GraphError::AllocationFailure)?
            .max(old + 1);
        self.slots.try_reserve_exact(new_capacity - old)?;
        self.slots.resize_with(new_capacity, || None);

        debug!(from = old, to = new_capacity, "grew vertex arena");
        Ok(())
    }

    /// Resolves a handle to its current slot index.
    ///
    /// # Errors
    /// [`GraphError::InvalidHandle`] if the handle is stale, its slot value is
    /// out of range, the slot is free, or the slot belongs to another handle.
    pub fn validate(&self, handle: VertexHandle) -> Result<usize> {
        let index = self.handles.resolve(handle)?;
        match self.slots.get(index) {
            Some(Some(slot)) if slot.owner == handle.cell() => Ok(index),
            _ => Err(GraphError::InvalidHandle),
        }
    }

    /// Returns true if `handle` names a live vertex.
    pub fn contains(&self, handle: VertexHandle) -> bool {
        self.validate(handle).is_ok()
    }

    /// Content of a vertex.
    ///
    /// # Errors
    /// [`GraphError::InvalidHandle`] for a dead handle.
    pub fn get(&self, handle: VertexHandle) -> Result<&C> {
        self.vertex(handle).map(|slot| &slot.content)
    }

    /// Mutable content of a vertex.
    ///
    /// # Errors
    /// [`GraphError::InvalidHandle`] for a dead handle.
    pub fn get_mut(&mut self, handle: VertexHandle) -> Result<&mut C> {
        self.vertex_mut(handle).map(|slot| &mut slot.content)
    }

    /// Live vertices in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexHandle, &C)> + '_ {
        self.occupied_slots()
            .map(|(_, slot)| (self.handles.handle_of(slot.owner), &slot.content))
    }

    /// Checks the slot/handle bookkeeping: every live slot is named by its own
    /// cell, counts agree, and nothing lives at or above the high-water mark.
    pub fn is_consistent(&self) -> bool {
        if self.occupied > self.high_water || self.high_water > self.capacity() {
            return false;
        }
        let mut live = 0;
        for (index, slot) in self.occupied_slots() {
            if !self.handles.names(slot.owner, index) {
                return false;
            }
            live += 1;
        }
        live == self.occupied
            && self.handles.live_count() == self.occupied
            && self.slots[self.high_water..].iter().all(Option::is_none)
    }

    pub(crate) fn vertex(&self, handle: VertexHandle) -> Result<&VertexSlot<C>> {
        let index = self.validate(handle)?;
        self.slots[index].as_ref().ok_or(GraphError::InvalidHandle)
    }

    pub(crate) fn vertex_mut(&mut self, handle: VertexHandle) -> Result<&mut VertexSlot<C>> {
        let index = self.validate(handle)?;
        self.slots[index].as_mut().ok_or(GraphError::InvalidHandle)
    }

    /// Slot reached through an adjacency alias.
    pub(crate) fn aliased(&self, id: HandleId) -> Option<&VertexSlot<C>> {
        self.slots.get(self.handles.slot_of(id)?)?.as_ref()
    }

    pub(crate) fn aliased_mut(&mut self, id: HandleId) -> Option<&mut VertexSlot<C>> {
        let index = self.handles.slot_of(id)?;
        self.slots.get_mut(index)?.as_mut()
    }

    pub(crate) fn handle_of(&self, id: HandleId) -> VertexHandle {
        self.handles.handle_of(id)
    }

    pub(crate) fn occupied_slots(&self) -> impl Iterator<Item = (usize, &VertexSlot<C>)> + '_ {
        self.slots[..self.high_water]
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|slot| (index, slot)))
    }
}
