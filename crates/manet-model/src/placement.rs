//! Initial node placement.

use crate::random::RandomStream;
use manet_core::{ModelError, Point};
use manet_space::Area;

/// Output of a placement model.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Placement {
    /// One position per node, in node order. Every entry satisfies
    /// `area.contains`.
    pub positions: Vec<Point>,
    /// Samples that had to be clamped after exhausting retries.
    pub warnings: Vec<ModelError>,
}

/// Assigns initial positions inside an area.
pub trait PlacementModel: Send + 'static {
    /// Registered model name.
    fn name(&self) -> &str;

    /// Produce exactly `node_count` in-area positions.
    ///
    /// Must never loop unboundedly: a sampler that keeps missing the
    /// area clamps after a bounded number of retries and records a
    /// warning.
    fn place(&self, node_count: usize, area: &dyn Area, random: &mut RandomStream) -> Placement;
}
