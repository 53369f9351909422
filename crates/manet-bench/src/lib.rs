//! Benchmark profiles for the MANET simulator.
//!
//! Provides pre-built [`SimConfig`] profiles for benchmarks and examples:
//!
//! - [`reference_profile`]: 100 nodes on a 1 km square, reference models
//! - [`stress_profile`]: 1000 nodes on a 3 km square
//! - [`dense_profile`]: 200 nodes packed into 300 m, lossy links, crashes

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use manet_engine::SimConfig;
use manet_model::ModelConfig;
use manet_space::{AreaConfig, BoundaryPolicy};

/// 100 nodes under random waypoint on a 1000 x 1000 reflecting square,
/// path-loss links with Gilbert-Elliott loss, no failures, 1000 steps.
pub fn reference_profile(seed: u64) -> SimConfig {
    let mut config = SimConfig::new(
        100,
        AreaConfig::square(1000.0, BoundaryPolicy::Reflect),
        1000,
    )
    .with_seed(seed);
    config.speed = ModelConfig::new("uniform").with("min", 1.0).with("max", 10.0);
    config
}

/// Same models as [`reference_profile`] at 10x the node count.
///
/// Link resolution is quadratic in the active node count, so this is
/// the profile that shows channel cost.
pub fn stress_profile(seed: u64) -> SimConfig {
    let mut config = reference_profile(seed);
    config.node_count = 1000;
    config.area = AreaConfig::square(3000.0, BoundaryPolicy::Reflect);
    config.steps = 100;
    config
}

/// 200 nodes in a 300 x 300 wrapping square: almost every pair is in
/// range, links are lossy and nodes crash.
pub fn dense_profile(seed: u64) -> SimConfig {
    let mut config = SimConfig::new(
        200,
        AreaConfig::square(300.0, BoundaryPolicy::Wrap),
        500,
    )
    .with_seed(seed);
    config.mobility = ModelConfig::new("random_direction");
    config.propagation = ModelConfig::new("unit_disk").with("range", 250.0);
    config.packet_loss = ModelConfig::new("gilbert_elliott")
        .with("p_good_to_bad", 0.05)
        .with("p_bad_to_good", 0.3);
    config.failure = ModelConfig::new("crash").with("probability", 0.0005);
    config
}
