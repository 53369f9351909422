//! Manet: a round-based mobile ad-hoc network simulator.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all sub-crates. For most users, adding `manet` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use manet::prelude::*;
//!
//! // Greets every neighbor once per step.
//! struct Hello;
//! impl Application for Hello {
//!     fn step(
//!         &mut self,
//!         _time: SimTime,
//!         neighbors: &[NodeId],
//!         channel: &mut dyn ChannelAccess,
//!     ) -> Result<(), ApplicationError> {
//!         while channel.receive().is_some() {}
//!         for &n in neighbors {
//!             channel.send(n, b"hello".to_vec());
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let config = SimConfig::new(20, AreaConfig::square(300.0, BoundaryPolicy::Reflect), 50)
//!     .with_seed(42);
//! let mut sim = Simulator::new(&config, |_| Box::new(Hello)).unwrap();
//! let summary = sim.run().unwrap();
//! assert_eq!(summary.steps_run, 50);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `manet-core` | IDs, geometry, events, the application contract |
//! | [`space`] | `manet-space` | Simulation areas and boundary policies |
//! | [`model`] | `manet-model` | Model traits, parameters, registry, random streams |
//! | [`models`] | `manet-models` | Reference placement, mobility, link and failure models |
//! | [`engine`] | `manet-engine` | Configuration, the simulator and its step loop |
//! | [`replay`] | `manet-replay` | Event logs, hashes and golden position fixtures |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`manet-core`).
///
/// Node and link ids, planar geometry, the [`types::SimEvent`] stream
/// and the [`types::Application`] contract.
pub use manet_core as types;

/// Simulation areas (`manet-space`).
pub use manet_space as space;

/// Model traits and the name-based registry (`manet-model`).
///
/// Implement one of the family traits and register a constructor with
/// [`model::ModelRegistry`] to plug in a custom model.
pub use manet_model as model;

/// Reference model implementations (`manet-models`).
pub use manet_models as models;

/// Configuration and the simulator (`manet-engine`).
pub use manet_engine as engine;

/// Determinism tooling (`manet-replay`).
///
/// Record a run with [`replay::EventLog`] and compare runs with
/// [`replay::compare_events`] and [`replay::compare_positions`].
pub use manet_replay as replay;

/// Common imports for typical usage.
///
/// ```rust
/// use manet::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use manet_core::{
        Application, ApplicationError, ChannelAccess, EventKind, EventSink, Message, NodeId,
        Point, SimEvent, SimTime, StepId,
    };

    // Space
    pub use manet_space::{AreaConfig, BoundaryPolicy};

    // Models
    pub use manet_model::{ModelConfig, ModelRegistry};
    pub use manet_models::builtin_registry;

    // Engine
    pub use manet_engine::{
        ConfigError, RunSummary, SimConfig, Simulator, StepError, StepMetrics, TracingSink,
    };

    // Replay
    pub use manet_replay::EventLog;
}
