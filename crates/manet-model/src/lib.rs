//! Model contracts and seeded randomness for MANET simulations.
//!
//! Every behavior the kernel does not hard-code is a model selected by
//! name at configuration time: placement, speed, mobility, propagation,
//! packet loss and failure. This crate defines the trait each family
//! implements, the [`RandomSource`] that hands every consumer its own
//! deterministic stream, checked parameter access for constructors, the
//! [`ModelRegistry`] that maps names to constructors, and the
//! composition check run before any step executes.

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod composition;
pub mod error;
pub mod failure;
pub mod mobility;
pub mod packet_loss;
pub mod params;
pub mod placement;
pub mod propagation;
pub mod random;
pub mod registry;
pub mod speed;

pub use composition::validate_composition;
pub use error::{BuildError, CompositionError, ModelFamily, RandomError};
pub use failure::FailureModel;
pub use mobility::{MobilityModel, MotionContext, MotionPhase, MotionState, NodeMotion};
pub use packet_loss::{LinkState, PacketLossModel};
pub use params::{ModelConfig, Params};
pub use placement::{Placement, PlacementModel};
pub use propagation::PropagationModel;
pub use random::{keys, RandomSource, RandomStream};
pub use registry::{BuildContext, Constructor, ModelRegistry};
pub use speed::SpeedModel;
