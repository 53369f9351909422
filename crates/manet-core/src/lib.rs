//! Core types and traits for the MANET simulation kernel.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other crate in the workspace: node and
//! link identifiers, planar geometry, the structured event stream, the
//! error types that flow through that stream, and the [`Application`]
//! contract user code implements.

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod application;
pub mod error;
pub mod event;
pub mod geometry;
pub mod id;

pub use application::{Application, ChannelAccess, Message, SimTime};
pub use error::{ApplicationError, ModelError};
pub use event::{EventKind, EventSink, LossCause, NullSink, SimEvent};
pub use geometry::{Point, Vector};
pub use id::{LinkKey, NodeId, NodeSet, StepId};
