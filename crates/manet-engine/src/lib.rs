//! Round-based MANET simulation kernel.
//!
//! Provides the [`Simulator`] that builds a node population from a
//! [`SimConfig`] and drives it step by step: mobility, failure, link
//! resolution, then applications. Every observable fact is reported to
//! an injected [`EventSink`](manet_core::EventSink); the default
//! [`TracingSink`] forwards to `tracing`.

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod channel;
pub mod clock;
pub mod config;
pub mod metrics;
pub mod network;
pub mod simulator;
pub mod sink;

pub use channel::{Channel, LinkView, NodeChannel, ResolveStats, Traffic};
pub use clock::{Clock, StopHandle};
pub use config::{ConfigError, SimConfig};
pub use metrics::{RunSummary, StepMetrics};
pub use network::{Models, Network, Node, NodeStatus, StepError};
pub use simulator::Simulator;
pub use sink::TracingSink;
