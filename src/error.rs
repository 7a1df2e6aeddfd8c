//! Error taxonomy for graph operations.

use core::fmt;

/// Errors reported by [`Graph`](crate::Graph) and [`VertexArena`](crate::VertexArena).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    /// The handle does not name a live vertex of this graph.
    ///
    /// Raised for stale generations, released handle cells, slot values outside
    /// the arena capacity, unoccupied slots, and slots owned by another cell.
    InvalidHandle,
    /// No vertex carries the requested content.
    NotFound,
    /// Backing storage could not be reserved.
    AllocationFailure,
    /// A [`GraphConfig`](crate::GraphConfig) was rejected.
    InvalidConfig {
        /// Which constraint was violated.
        reason: &'static str,
    },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHandle => f.write_str("invalid vertex handle"),
            Self::NotFound => f.write_str("vertex not found"),
            Self::AllocationFailure => f.write_str("vertex storage allocation failed"),
            Self::InvalidConfig { reason } => write!(f, "invalid graph configuration: {reason}"),
        }
    }
}

impl std::error::Error for GraphError {}

impl From<std::collections::TryReserveError> for GraphError {
    fn from(_: std::collections::TryReserveError) -> Self {
        Self::AllocationFailure
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = GraphError> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(GraphError::InvalidHandle.to_string(), "invalid vertex handle");
        assert_eq!(GraphError::NotFound.to_string(), "vertex not found");
        let err = GraphError::InvalidConfig { reason: "growth_factor must be at least 2" };
        assert_eq!(
            err.to_string(),
            "invalid graph configuration: growth_factor must be at least 2"
        );
    }

    #[test]
    fn test_try_reserve_maps_to_allocation_failure() {
        let mut v: Vec<u64> = Vec::new();
        let err = v.try_reserve_exact(usize::MAX).unwrap_err();
        assert_eq!(GraphError::from(err), GraphError::AllocationFailure);
    }
}
