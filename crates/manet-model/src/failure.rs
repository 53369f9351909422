//! Per-node crash decisions.

use crate::random::RandomStream;
use manet_core::{NodeId, StepId};

/// Decides, per active node per step, whether the node crashes.
///
/// Called in node order during the failure phase, only for nodes that
/// are still active. Once it returns `true` for a node, the node is
/// crashed permanently and is never passed again.
pub trait FailureModel: Send + 'static {
    /// Registered model name.
    fn name(&self) -> &str;

    /// `random` is the node's own failure stream.
    fn decide(&mut self, node: NodeId, step: StepId, random: &mut RandomStream) -> bool;
}
