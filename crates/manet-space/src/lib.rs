//! Bounded simulation areas for MANET simulations.
//!
//! This crate defines the [`Area`] trait, the region every node position
//! must stay inside, along with the concrete [`Rectangle`] and [`Square`]
//! shapes and the [`BoundaryPolicy`] applied when a move would leave it.
//!
//! Areas are immutable after construction and shared read-only by
//! placement and mobility models.

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod area;
pub mod boundary;
pub mod config;
pub mod error;
pub mod rectangle;
pub mod square;

#[cfg(test)]
pub(crate) mod compliance;

pub use area::{Area, Bounded};
pub use boundary::BoundaryPolicy;
pub use config::{AreaConfig, AreaShape};
pub use error::AreaError;
pub use rectangle::Rectangle;
pub use square::Square;
