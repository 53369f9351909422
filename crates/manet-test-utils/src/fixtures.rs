//! Ready-made configurations.

use manet_core::{Application, NodeId};
use manet_engine::SimConfig;
use manet_model::ModelConfig;
use manet_space::{AreaConfig, BoundaryPolicy};

use crate::apps::SilentApp;

/// Reference models on a 200 x 200 reflecting square.
pub fn reference_config(node_count: usize, steps: u64, seed: u64) -> SimConfig {
    SimConfig::new(
        node_count,
        AreaConfig::square(200.0, BoundaryPolicy::Reflect),
        steps,
    )
    .with_seed(seed)
}

/// The golden regression scenario: 10 nodes under random waypoint on a
/// 200 x 200 square, path-loss links at -70 dBm, lossless links, no
/// failures, 1000 steps, seed 42.
pub fn scenario_config() -> SimConfig {
    let mut config = reference_config(10, 1000, 42);
    config.propagation = ModelConfig::new("path_loss").with("threshold", -70.0);
    config.packet_loss = ModelConfig::new("none");
    config
}

/// Application factory giving every node a [`SilentApp`].
pub fn silent(_node: NodeId) -> Box<dyn Application> {
    Box::new(SilentApp)
}
