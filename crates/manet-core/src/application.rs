//! The per-node [`Application`] contract and its channel handle.

use crate::error::ApplicationError;
use crate::id::{NodeId, StepId};

/// Simulation time handed to application callbacks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimTime {
    /// Current step.
    pub step: StepId,
    /// Current time in simulation time units (`step * period`).
    pub time: f64,
}

/// A message sitting in a node's inbox.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Sender.
    pub from: NodeId,
    /// Step during which the message was sent.
    pub sent_at: StepId,
    /// Opaque payload.
    pub payload: Vec<u8>,
}

/// Send/receive access to the channel for one node during one step.
///
/// Sending consults the link state already resolved for the current
/// step; it never re-rolls packet loss. Delivered messages become
/// readable by the receiver from the next step on.
pub trait ChannelAccess {
    /// The node this handle sends on behalf of.
    fn node(&self) -> NodeId;

    /// Send `payload` to `to`. Returns whether it was delivered.
    fn send(&mut self, to: NodeId, payload: Vec<u8>) -> bool;

    /// Send `payload` to every in-range peer. Returns the number of
    /// peers it was delivered to.
    fn broadcast(&mut self, payload: Vec<u8>) -> usize;

    /// Pop the oldest message from this node's inbox.
    fn receive(&mut self) -> Option<Message>;

    /// Number of messages waiting in this node's inbox.
    fn pending(&self) -> usize;
}

/// User-supplied per-node logic.
///
/// One instance is owned per node. The kernel calls [`initialize`] once
/// at construction, [`step`] once per step while the node is active,
/// [`failure`] once when the node crashes, and [`finalize`] once after
/// the run. `step` is never called for a crashed node.
///
/// [`initialize`]: Application::initialize
/// [`step`]: Application::step
/// [`failure`]: Application::failure
/// [`finalize`]: Application::finalize
pub trait Application {
    /// Called once before the first step.
    fn initialize(&mut self, _node: NodeId) {}

    /// Called once per step while the node is active.
    ///
    /// `neighbors` is the sorted set of nodes with a deliverable link
    /// this step. An `Err` (or a panic) is contained: it is reported as
    /// an event, the node stays active, and it is called again next step.
    fn step(
        &mut self,
        time: SimTime,
        neighbors: &[NodeId],
        channel: &mut dyn ChannelAccess,
    ) -> Result<(), ApplicationError>;

    /// Called once, during the step in which the node crashes.
    fn failure(&mut self, _time: SimTime) {}

    /// Called once after the final step, crashed or not.
    fn finalize(&mut self) {}
}
