//! No failures.

use manet_core::{NodeId, StepId};
use manet_model::{BuildContext, BuildError, FailureModel, Params, RandomStream};

/// Nodes never crash. Consumes no randomness.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NoFailure;

impl FailureModel for NoFailure {
    fn name(&self) -> &str {
        "none"
    }

    fn decide(&mut self, _node: NodeId, _step: StepId, _random: &mut RandomStream) -> bool {
        false
    }
}

/// Constructor for `none`: no parameters.
pub fn build(
    _params: &mut Params<'_>,
    _ctx: &mut BuildContext<'_>,
) -> Result<Box<dyn FailureModel>, BuildError> {
    Ok(Box::new(NoFailure))
}
