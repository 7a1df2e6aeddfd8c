//! # `compact-graph` - Stable Handles over a Compacting Vertex Arena
//!
//! A graph container whose vertices are addressed by handles that stay valid
//! while the underlying storage is compacted and grown, with per-vertex
//! adjacency lists for directed or undirected edges.
//!
//! ## Architecture
//!
//! 1. **Handle cells** (`VertexHandle`):
//!    - One mutable cell per vertex records its current slot index
//!    - Adjacency entries alias the cell, never the index
//!    - Generations turn use-after-remove into [`GraphError::InvalidHandle`]
//!
//! 2. **Vertex arena** (`VertexArena<C>`):
//!    - Contiguous slots filled from a high-water mark
//!    - Auto-compaction below a fragmentation threshold
//!    - Growth by a constant factor, compacting first
//!
//! 3. **Graph engine** (`Graph<C>`):
//!    - Forward entries plus mirror entries for O(degree) removal
//!    - Back-references in directed graphs are never reported as edges
//!
//! ## Invariants
//!
//! - For every occupied slot `i`, the slot's handle cell names `i`.
//! - `len() <= high_water_mark() <= capacity()`.
//! - Every forward entry has exactly one mirror; no ordered pair has two
//!   forward entries.
//!
//! [`Graph::check_invariants`] verifies all of them.
//!
//! ## Example
//!
//! ```rust
//! use compact_graph::Graph;
//!
//! let mut graph = Graph::new(true).unwrap();
//! let a = graph.add_vertex(1).unwrap();
//! let b = graph.add_vertex(2).unwrap();
//!
//! assert!(graph.add_edge(a, b).unwrap());
//! assert!(graph.is_linked(a, b).unwrap());
//! assert!(!graph.is_linked(b, a).unwrap());
//!
//! graph.remove_vertex(a).unwrap();
//! graph.compact();
//! assert_eq!(graph.slot_index(b).unwrap(), 0);
//! assert!(graph.content(a).is_err());
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

mod adjacency;
pub mod arena;
pub mod config;
pub mod error;
pub mod graph;
pub mod handle;

pub use arena::{Position, VertexArena};
pub use config::GraphConfig;
pub use error::{GraphError, Result};
pub use graph::{ContentId, Graph};
pub use handle::VertexHandle;

// Compile-time layout checks.
const _: () = {
    use core::mem;

    // A handle is two words of 32 bits and nothing else.
    assert!(mem::size_of::<VertexHandle>() == 8);
    assert!(mem::size_of::<Option<VertexHandle>>() <= 12);
};
