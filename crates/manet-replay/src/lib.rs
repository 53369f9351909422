//! Determinism tooling for MANET simulations.
//!
//! Two runs built from the same configuration and seed must produce
//! identical event streams and identical final positions. This crate
//! provides what is needed to check that:
//!
//! - [`EventLog`] records every event with a running hash
//! - [`positions_hash`] and [`events_hash`] give fast equality checks
//! - [`compare_events`] and [`compare_positions`] locate the first
//!   divergence, bit-exact
//! - [`write_fixture`] and [`read_fixture`] persist golden positions
//!   for regression tests

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compare;
pub mod error;
pub mod fixture;
pub mod hash;
pub mod log;

pub use compare::{compare_events, compare_positions, EventDivergence, PositionDivergence};
pub use error::ReplayError;
pub use fixture::{format_positions, parse_positions, read_fixture, write_fixture, FIXTURE_HEADER};
pub use hash::{event_hash, events_hash, positions_hash};
pub use log::EventLog;
