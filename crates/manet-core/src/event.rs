//! Structured simulation events and the [`EventSink`] contract.
//!
//! The kernel never formats or writes log lines. Every observable fact
//! about a step is pushed to an injected sink as a [`SimEvent`]; what
//! happens to it (tracing output, an in-memory log for replay checks,
//! nothing at all) is the sink's business.

use crate::error::{ApplicationError, ModelError};
use crate::geometry::Point;
use crate::id::{LinkKey, NodeId, StepId};

/// Why a message did not reach its receiver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LossCause {
    /// The link is in range but the packet-loss process dropped this
    /// step's traffic.
    PacketLoss,
    /// No in-range link exists between sender and receiver.
    NoLink,
}

/// What happened.
#[derive(Clone, Debug, PartialEq)]
pub enum EventKind {
    /// A node's position changed during the mobility phase.
    Moved {
        /// The node that moved.
        node: NodeId,
        /// Position before the step.
        from: Point,
        /// Position after the step.
        to: Point,
    },
    /// A link came into range.
    LinkUp {
        /// The link.
        link: LinkKey,
        /// Quality that put the link over the reception threshold.
        quality: f64,
    },
    /// A link left range, or one of its endpoints crashed.
    LinkDown {
        /// The link.
        link: LinkKey,
    },
    /// A message was delivered.
    Delivered {
        /// Sender.
        from: NodeId,
        /// Receiver.
        to: NodeId,
    },
    /// A message was not delivered.
    Lost {
        /// Sender.
        from: NodeId,
        /// Intended receiver.
        to: NodeId,
        /// Why it was not delivered.
        cause: LossCause,
    },
    /// A node crashed. Terminal.
    Crashed {
        /// The node.
        node: NodeId,
    },
    /// A node's application failed and was contained.
    ApplicationError {
        /// The node whose application failed.
        node: NodeId,
        /// The failure.
        error: ApplicationError,
    },
    /// A model produced an out-of-domain value and was clamped.
    ModelError {
        /// The affected node, if the error is node-specific.
        node: Option<NodeId>,
        /// The recovered error.
        error: ModelError,
    },
}

impl EventKind {
    /// Stable snake_case name of the event kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Moved { .. } => "moved",
            Self::LinkUp { .. } => "link_up",
            Self::LinkDown { .. } => "link_down",
            Self::Delivered { .. } => "delivered",
            Self::Lost { .. } => "lost",
            Self::Crashed { .. } => "crashed",
            Self::ApplicationError { .. } => "application_error",
            Self::ModelError { .. } => "model_error",
        }
    }
}

/// An event stamped with the step that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct SimEvent {
    /// Step during which the event occurred.
    pub step: StepId,
    /// The event payload.
    pub kind: EventKind,
}

impl SimEvent {
    /// Construct an event.
    pub fn new(step: StepId, kind: EventKind) -> Self {
        Self { step, kind }
    }
}

/// Receiver of the simulation's structured event stream.
///
/// Events arrive in the order they are produced: phase order within a
/// step, node order within a phase.
pub trait EventSink {
    /// Record one event.
    fn record(&mut self, event: SimEvent);
}

/// Sink that discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&mut self, _event: SimEvent) {}
}

impl EventSink for Vec<SimEvent> {
    fn record(&mut self, event: SimEvent) {
        self.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn record(&mut self, event: SimEvent) {
        (**self).record(event);
    }
}
