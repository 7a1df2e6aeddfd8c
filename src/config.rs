//! Construction parameters for a [`Graph`](crate::Graph).

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// Slots reserved by [`Graph::new`](crate::Graph::new).
pub const DEFAULT_INITIAL_CAPACITY: usize = 20;
/// Occupancy ratio under which an insertion compacts the arena first.
pub const DEFAULT_FRAGMENTATION_THRESHOLD: f32 = 0.5;
/// Capacity multiplier applied when the arena is full.
pub const DEFAULT_GROWTH_FACTOR: usize = 2;

/// Graph construction parameters.
///
/// Missing fields deserialize to their defaults, so a config file only has to
/// name what it changes:
///
/// ```
/// use compact_graph::GraphConfig;
///
/// let config = GraphConfig::default().directed(true).with_initial_capacity(64);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Whether edges carry a direction.
    pub directed: bool,
    /// Number of vertex slots reserved up front.
    pub initial_capacity: usize,
    /// `occupied / high_water_mark` ratio below which inserts compact first.
    pub fragmentation_threshold: f32,
    /// Capacity multiplier used when the arena is full.
    pub growth_factor: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            directed: false,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            fragmentation_threshold: DEFAULT_FRAGMENTATION_THRESHOLD,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }
}

impl GraphConfig {
    /// Sets edge orientation.
    #[must_use]
    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    /// Sets the number of slots reserved up front.
    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the auto-compaction threshold.
    #[must_use]
    pub fn with_fragmentation_threshold(mut self, threshold: f32) -> Self {
        self.fragmentation_threshold = threshold;
        self
    }

    /// Sets the growth multiplier.
    #[must_use]
    pub fn with_growth_factor(mut self, factor: usize) -> Self {
        self.growth_factor = factor;
        self
    }

    /// Checks the parameters.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidConfig`] when the threshold is not a finite
    /// ratio in `0.0..=1.0` or the growth factor is below 2.
    pub fn validate(&self) -> Result<()> {
        if !self.fragmentation_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.fragmentation_threshold)
        {
            return Err(GraphError::InvalidConfig {
                reason: "fragmentation_threshold must be within 0.0..=1.0",
            });
        }
        if self.growth_factor < 2 {
            return Err(GraphError::InvalidConfig {
                reason: "growth_factor must be at least 2",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GraphConfig::default();
        assert!(!config.directed);
        assert_eq!(config.initial_capacity, 20);
        assert!((config.fragmentation_threshold - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.growth_factor, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_threshold() {
        for threshold in [-0.1, 1.5, f32::NAN, f32::INFINITY] {
            let config = GraphConfig::default().with_fragmentation_threshold(threshold);
            assert!(matches!(
                config.validate(),
                Err(GraphError::InvalidConfig { .. })
            ));
        }
    }

    #[test]
    fn test_rejects_small_growth_factor() {
        let config = GraphConfig::default().with_growth_factor(1);
        assert_eq!(
            config.validate(),
            Err(GraphError::InvalidConfig {
                reason: "growth_factor must be at least 2"
            })
        );
    }
}
