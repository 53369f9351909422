//! Canned applications.
//!
//! - [`SilentApp`]: never sends, never fails.
//! - [`FloodApp`]: broadcasts every step and drains its inbox.
//! - [`FaultyApp`]: returns an error on chosen steps.
//! - [`PanickingApp`]: panics on chosen steps.
//! - [`RecordingApp`]: logs every callback to a shared [`CallbackLog`].

use std::cell::RefCell;
use std::rc::Rc;

use manet_core::{Application, ApplicationError, ChannelAccess, Message, NodeId, SimTime, StepId};

/// Does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentApp;

impl Application for SilentApp {
    fn step(
        &mut self,
        _time: SimTime,
        _neighbors: &[NodeId],
        _channel: &mut dyn ChannelAccess,
    ) -> Result<(), ApplicationError> {
        Ok(())
    }
}

/// Broadcasts the step number every step and counts what it receives.
#[derive(Clone, Debug, Default)]
pub struct FloodApp {
    pub sent: usize,
    pub received: usize,
}

impl Application for FloodApp {
    fn step(
        &mut self,
        time: SimTime,
        _neighbors: &[NodeId],
        channel: &mut dyn ChannelAccess,
    ) -> Result<(), ApplicationError> {
        while channel.receive().is_some() {
            self.received += 1;
        }
        self.sent += channel.broadcast(time.step.0.to_le_bytes().to_vec());
        Ok(())
    }
}

/// Fails on every step listed in `steps`.
#[derive(Clone, Debug, Default)]
pub struct FaultyApp {
    pub steps: Vec<u64>,
}

impl FaultyApp {
    pub fn on(steps: impl IntoIterator<Item = u64>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }
}

impl Application for FaultyApp {
    fn step(
        &mut self,
        time: SimTime,
        _neighbors: &[NodeId],
        _channel: &mut dyn ChannelAccess,
    ) -> Result<(), ApplicationError> {
        if self.steps.contains(&time.step.0) {
            return Err(ApplicationError::failed(format!("fault at step {}", time.step)));
        }
        Ok(())
    }
}

/// Panics on every step listed in `steps`.
#[derive(Clone, Debug, Default)]
pub struct PanickingApp {
    pub steps: Vec<u64>,
}

impl PanickingApp {
    pub fn on(steps: impl IntoIterator<Item = u64>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }
}

impl Application for PanickingApp {
    fn step(
        &mut self,
        time: SimTime,
        _neighbors: &[NodeId],
        _channel: &mut dyn ChannelAccess,
    ) -> Result<(), ApplicationError> {
        if self.steps.contains(&time.step.0) {
            panic!("panic at step {}", time.step);
        }
        Ok(())
    }
}

// ── RecordingApp ───────────────────────────────────────────────────

/// One observed application callback.
#[derive(Clone, Debug, PartialEq)]
pub enum Callback {
    Initialize(NodeId),
    Step {
        node: NodeId,
        step: StepId,
        neighbors: Vec<NodeId>,
    },
    Received {
        node: NodeId,
        step: StepId,
        message: Message,
    },
    Failure {
        node: NodeId,
        step: StepId,
    },
    Finalize(NodeId),
}

impl Callback {
    /// The node the callback was delivered to.
    pub fn node(&self) -> NodeId {
        match self {
            Self::Initialize(node) | Self::Finalize(node) => *node,
            Self::Step { node, .. } | Self::Received { node, .. } | Self::Failure { node, .. } => {
                *node
            }
        }
    }
}

/// Callback log shared by every [`RecordingApp`] in a run.
pub type CallbackLog = Rc<RefCell<Vec<Callback>>>;

/// Records every callback. Optionally broadcasts its id each step.
#[derive(Debug)]
pub struct RecordingApp {
    node: NodeId,
    log: CallbackLog,
    broadcast: bool,
}

impl RecordingApp {
    pub fn new(node: NodeId, log: CallbackLog) -> Self {
        Self {
            node,
            log,
            broadcast: false,
        }
    }

    /// Broadcast the node id every step.
    pub fn broadcasting(mut self) -> Self {
        self.broadcast = true;
        self
    }
}

impl Application for RecordingApp {
    fn initialize(&mut self, node: NodeId) {
        self.log.borrow_mut().push(Callback::Initialize(node));
    }

    fn step(
        &mut self,
        time: SimTime,
        neighbors: &[NodeId],
        channel: &mut dyn ChannelAccess,
    ) -> Result<(), ApplicationError> {
        let mut log = self.log.borrow_mut();
        log.push(Callback::Step {
            node: self.node,
            step: time.step,
            neighbors: neighbors.to_vec(),
        });
        while let Some(message) = channel.receive() {
            log.push(Callback::Received {
                node: self.node,
                step: time.step,
                message,
            });
        }
        if self.broadcast {
            channel.broadcast(self.node.0.to_le_bytes().to_vec());
        }
        Ok(())
    }

    fn failure(&mut self, time: SimTime) {
        self.log.borrow_mut().push(Callback::Failure {
            node: self.node,
            step: time.step,
        });
    }

    fn finalize(&mut self) {
        self.log.borrow_mut().push(Callback::Finalize(self.node));
    }
}
