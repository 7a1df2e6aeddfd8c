//! `Graph` — directed or undirected adjacency over a compacting vertex arena.
//!
//! Vertices live in a [`VertexArena`] and are addressed by [`VertexHandle`]s
//! that survive compaction and growth. Each vertex keeps one adjacency list;
//! an edge `u -> v` is stored twice:
//! - a forward entry `(v, direct = true)` in `u`'s list
//! - a mirror entry `(u, direct = !directed)` in `v`'s list
//!
//! In an undirected graph the mirror is itself a real edge. In a directed
//! graph it is a back-reference that only serves existence checks and vertex
//! removal, and never shows up in [`Graph::neighbors`] or [`Graph::render`].
//!
//! ### Performance Characteristics
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `add_vertex` | \(O(1)\) amortized | may compact or grow the arena |
//! | `remove_vertex` | \(O(\text{degree}^2)\) worst case | one neighbour scan per entry |
//! | `add_edge` | \(O(\text{degree})\) | checks for an existing edge first |
//! | `remove_edge` | \(O(\text{degree})\) | linear scans on both endpoints |
//! | `is_linked` | \(O(\text{degree})\) | scans the source list |
//! | `find_vertex` | \(O(\text{capacity})\) | scans occupied slots in order |
//!
//! `remove_vertex` visits each of the vertex's entries once, but each visit
//! calls `find_and_remove` on the neighbour's list to drop the mirror. That
//! scan is linear in the neighbour's degree, so the bound is the sum of
//! neighbour degrees rather than the vertex's own degree.

use std::collections::HashMap;

use tracing::trace;

use crate::arena::{Position, VertexArena};
use crate::config::{GraphConfig, DEFAULT_INITIAL_CAPACITY};
use crate::error::{GraphError, Result};
use crate::handle::{HandleId, VertexHandle};

mod render;

/// Default vertex payload: an opaque content id.
pub type ContentId = u64;

/// A graph of `C`-valued vertices with stable handles.
#[derive(Debug)]
pub struct Graph<C = ContentId> {
    arena: VertexArena<C>,
    directed: bool,
}

impl<C> Graph<C> {
    /// Creates an empty graph with the default capacity of 20 slots.
    ///
    /// # Errors
    /// [`GraphError::AllocationFailure`] if the initial slots cannot be reserved.
    pub fn new(directed: bool) -> Result<Self> {
        Self::with_capacity(directed, DEFAULT_INITIAL_CAPACITY)
    }

    /// Creates an empty graph with `capacity` vertex slots reserved.
    ///
    /// # Errors
    /// [`GraphError::AllocationFailure`] if the slots cannot be reserved.
    pub fn with_capacity(directed: bool, capacity: usize) -> Result<Self> {
        Self::with_config(
            GraphConfig::default()
                .directed(directed)
                .with_initial_capacity(capacity),
        )
    }

    /// Creates an empty graph from a configuration.
    ///
    /// # Errors
    /// [`GraphError::InvalidConfig`] or [`GraphError::AllocationFailure`].
    pub fn with_config(config: GraphConfig) -> Result<Self> {
        Ok(Self {
            arena: VertexArena::with_config(&config)?,
            directed: config.directed,
        })
    }

    /// Returns true if edges are oriented.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.arena.len()
    }

    /// Returns true if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Number of vertex slots currently allocated.
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// See [`VertexArena::high_water_mark`].
    pub fn high_water_mark(&self) -> usize {
        self.arena.high_water_mark()
    }

    /// The underlying vertex storage.
    pub fn arena(&self) -> &VertexArena<C> {
        &self.arena
    }

    /// `direct` flag of the entry mirroring an entry flagged `direct`.
    #[inline]
    fn mirror_of(&self, direct: bool) -> bool {
        !self.directed || !direct
    }

    /// Adds a vertex carrying `content`.
    ///
    /// # Errors
    /// [`GraphError::AllocationFailure`] if storage cannot grow.
    pub fn add_vertex(&mut self, content: C) -> Result<VertexHandle> {
        self.arena.insert(content)
    }

    /// Removes a vertex and every edge touching it, returning its content.
    ///
    /// # Errors
    /// [`GraphError::InvalidHandle`] if `handle` is not a live vertex.
    pub fn remove_vertex(&mut self, handle: VertexHandle) -> Result<C> {
        let own = handle.cell();
        let mut neighbors = core::mem::take(&mut self.arena.vertex_mut(handle)?.neighbors);

        for entry in neighbors.iter() {
            // Self-loop entries went away with the detached list.
            if entry.target == own {
                continue;
            }
            let mirror = self.mirror_of(entry.direct);
            if let Some(neighbor) = self.arena.aliased_mut(entry.target) {
                neighbor.neighbors.find_and_remove(own, mirror);
            }
        }
        let degree = neighbors.len();
        neighbors.release_all();

        let content = self.arena.remove(handle)?;
        trace!(handle = handle.id(), degree, "removed vertex and its edges");
        Ok(content)
    }

    /// Adds the edge `from -> to` unless it already exists.
    ///
    /// Returns `false` when the edge was already present.
    ///
    /// # Errors
    /// [`GraphError::InvalidHandle`] for a dead endpoint,
    /// [`GraphError::AllocationFailure`] if an adjacency list cannot grow.
    pub fn add_edge(&mut self, from: VertexHandle, to: VertexHandle) -> Result<bool> {
        if self.is_linked(from, to)? {
            return Ok(false);
        }

        if from == to {
            self.arena.vertex_mut(from)?.neighbors.reserve(2)?;
        } else {
            self.arena.vertex_mut(from)?.neighbors.reserve(1)?;
            self.arena.vertex_mut(to)?.neighbors.reserve(1)?;
        }
        let mirror = self.mirror_of(true);
        self.arena.vertex_mut(from)?.neighbors.prepend(to.cell(), true);
        self.arena.vertex_mut(to)?.neighbors.prepend(from.cell(), mirror);

        trace!(from = from.id(), to = to.id(), "added edge");
        Ok(true)
    }

    /// Removes the edge `from -> to`.
    ///
    /// Returns `true` only if both the forward entry on `from` and its mirror
    /// on `to` were found and removed. A `false` after the forward entry was
    /// removed means the graph was already inconsistent; it is left as is.
    ///
    /// # Errors
    /// [`GraphError::InvalidHandle`] for a dead endpoint.
    pub fn remove_edge(&mut self, from: VertexHandle, to: VertexHandle) -> Result<bool> {
        self.arena.validate(from)?;
        self.arena.validate(to)?;

        let mirror = self.mirror_of(true);
        let removed = self.arena.vertex_mut(from)?.neighbors.find_and_remove(to.cell(), true)
            && self.arena.vertex_mut(to)?.neighbors.find_and_remove(from.cell(), mirror);

        trace!(from = from.id(), to = to.id(), removed, "removed edge");
        Ok(removed)
    }

    /// Returns true if the edge `from -> to` exists.
    ///
    /// # Errors
    /// [`GraphError::InvalidHandle`] for a dead endpoint.
    pub fn is_linked(&self, from: VertexHandle, to: VertexHandle) -> Result<bool> {
        self.is_linked_oriented(from, to, true)
    }

    /// Edge test with explicit orientation.
    ///
    /// With `orientation == false` a directed graph also reports `to -> from`
    /// edges. Undirected graphs answer the same either way.
    ///
    /// # Errors
    /// [`GraphError::InvalidHandle`] for a dead endpoint.
    pub fn is_linked_oriented(
        &self,
        from: VertexHandle,
        to: VertexHandle,
        orientation: bool,
    ) -> Result<bool> {
        self.arena.validate(to)?;
        Ok(self
            .arena
            .vertex(from)?
            .neighbors
            .contains(to.cell(), orientation))
    }

    /// Returns the first vertex, in slot order, whose content equals `content`.
    ///
    /// # Errors
    /// [`GraphError::NotFound`] if there is none.
    pub fn find_vertex(&self, content: &C) -> Result<VertexHandle>
    where
        C: PartialEq,
    {
        self.arena
            .occupied_slots()
            .find(|(_, slot)| slot.content == *content)
            .map(|(_, slot)| self.arena.handle_of(slot.owner))
            .ok_or(GraphError::NotFound)
    }

    /// Returns true if `handle` names a live vertex.
    pub fn contains(&self, handle: VertexHandle) -> bool {
        self.arena.contains(handle)
    }

    /// Current slot index of a vertex. Changes under compaction.
    ///
    /// # Errors
    /// [`GraphError::InvalidHandle`] for a dead handle.
    pub fn slot_index(&self, handle: VertexHandle) -> Result<usize> {
        self.arena.validate(handle)
    }

    /// Content of a vertex.
    ///
    /// # Errors
    /// [`GraphError::InvalidHandle`] for a dead handle.
    pub fn content(&self, handle: VertexHandle) -> Result<&C> {
        self.arena.get(handle)
    }

    /// Mutable content of a vertex.
    ///
    /// # Errors
    /// [`GraphError::InvalidHandle`] for a dead handle.
    pub fn content_mut(&mut self, handle: VertexHandle) -> Result<&mut C> {
        self.arena.get_mut(handle)
    }

    /// Plane position of a vertex; the origin until set.
    ///
    /// # Errors
    /// [`GraphError::InvalidHandle`] for a dead handle.
    pub fn position(&self, handle: VertexHandle) -> Result<Position> {
        Ok(self.arena.vertex(handle)?.position)
    }

    /// Sets the plane position of a vertex.
    ///
    /// # Errors
    /// [`GraphError::InvalidHandle`] for a dead handle.
    pub fn set_position(&mut self, handle: VertexHandle, position: Position) -> Result<()> {
        self.arena.vertex_mut(handle)?.position = position;
        Ok(())
    }

    /// Real out-neighbours of a vertex, most recently linked first.
    ///
    /// In an undirected graph this is every neighbour.
    ///
    /// # Errors
    /// [`GraphError::InvalidHandle`] for a dead handle.
    pub fn neighbors(
        &self,
        handle: VertexHandle,
    ) -> Result<impl Iterator<Item = VertexHandle> + '_> {
        let slot = self.arena.vertex(handle)?;
        Ok(slot
            .neighbors
            .iter()
            .filter(|entry| entry.direct)
            .map(move |entry| self.arena.handle_of(entry.target)))
    }

    /// Length of a vertex's adjacency list, back-references included.
    ///
    /// # Errors
    /// [`GraphError::InvalidHandle`] for a dead handle.
    pub fn degree(&self, handle: VertexHandle) -> Result<usize> {
        Ok(self.arena.vertex(handle)?.neighbors.len())
    }

    /// Live vertices in slot order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexHandle, &C)> + '_ {
        self.arena.iter()
    }

    /// Compacts the vertex arena. Handles and edges are unaffected.
    pub fn compact(&mut self) {
        self.arena.compact();
    }

    /// Verifies the structural invariants:
    /// - every live slot is named by its own handle cell
    /// - every adjacency entry aliases a live vertex
    /// - every forward entry has exactly one mirror of the right kind
    /// - no ordered pair carries two forward entries
    pub fn check_invariants(&self) -> bool {
        if !self.arena.is_consistent() {
            return false;
        }

        let mut counts: HashMap<(HandleId, HandleId, bool), usize> = HashMap::new();
        for (_, slot) in self.arena.occupied_slots() {
            for entry in slot.neighbors.iter() {
                if self.arena.aliased(entry.target).is_none() {
                    return false;
                }
                *counts.entry((slot.owner, entry.target, entry.direct)).or_default() += 1;
            }
        }

        counts.iter().all(|(&(u, v, direct), &n)| {
            if self.directed {
                n == 1 && counts.get(&(v, u, !direct)) == Some(&1)
            } else {
                // An undirected self-loop keeps both of its entries in one list.
                let expected = if u == v { 2 } else { 1 };
                direct && n == expected && counts.get(&(v, u, true)) == Some(&n)
            }
        })
    }
}
