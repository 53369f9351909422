//! Reference models for MANET simulations.
//!
//! One module per model, each exposing the model type and the
//! constructor registered under its configuration name by
//! [`register_builtins`]:
//!
//! | Family | Names |
//! |--------|-------|
//! | placement | `grid`, `uniform`, `normal` |
//! | speed | `constant`, `uniform`, `normal` |
//! | mobility | `random_waypoint`, `random_direction`, `gauss_markov`, `nomadic_community`, `stationary` |
//! | propagation | `path_loss`, `unit_disk` |
//! | packet_loss | `gilbert_elliott`, `none` |
//! | failure | `crash`, `scheduled_crash`, `none` |

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod builtin;
pub mod crash;
pub mod gauss_markov;
pub mod gilbert_elliott;
pub mod grid_placement;
pub mod lossless;
pub mod no_failure;
pub mod nomadic_community;
pub mod normal_placement;
pub mod path_loss;
pub mod random_direction;
pub mod random_waypoint;
pub(crate) mod sampling;
pub mod scheduled_crash;
pub mod speed;
pub mod stationary;
pub mod uniform_placement;
pub mod unit_disk;
pub(crate) mod waypoint;

pub use builtin::{builtin_registry, register_builtins};
pub use crash::Crash;
pub use gauss_markov::GaussMarkov;
pub use gilbert_elliott::GilbertElliott;
pub use grid_placement::GridPlacement;
pub use lossless::Lossless;
pub use no_failure::NoFailure;
pub use nomadic_community::NomadicCommunity;
pub use normal_placement::NormalPlacement;
pub use path_loss::PathLoss;
pub use random_direction::RandomDirection;
pub use random_waypoint::RandomWaypoint;
pub use scheduled_crash::ScheduledCrash;
pub use speed::{ConstantSpeed, NormalSpeed, UniformSpeed};
pub use stationary::Stationary;
pub use uniform_placement::UniformPlacement;
pub use unit_disk::UnitDisk;
