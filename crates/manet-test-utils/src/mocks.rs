//! Mock models, registered alongside the reference ones.
//!
//! - [`Eastward`] (`"eastward"` propagation): directional; a node only
//!   reaches peers east of it within `range`.
//! - [`ScriptedFailure`] (`"scripted"` failure): crashes one chosen node
//!   at one chosen step.

use manet_core::{NodeId, Point, StepId};
use manet_model::{
    BuildContext, BuildError, FailureModel, ModelRegistry, Params, PropagationModel, RandomStream,
};
use manet_models::register_builtins;

/// Directional propagation: `from` reaches `to` when `to` lies east of
/// (or level with) `from` and within `range`.
#[derive(Clone, Copy, Debug)]
pub struct Eastward {
    pub range: f64,
}

impl PropagationModel for Eastward {
    fn name(&self) -> &str {
        "eastward"
    }

    fn quality(&self, from: Point, to: Point) -> f64 {
        if to.x >= from.x {
            self.range - from.distance(to)
        } else {
            -1.0
        }
    }

    fn threshold(&self) -> f64 {
        0.0
    }

    fn is_symmetric(&self) -> bool {
        false
    }
}

fn build_eastward(
    params: &mut Params<'_>,
    _ctx: &mut BuildContext<'_>,
) -> Result<Box<dyn PropagationModel>, BuildError> {
    Ok(Box::new(Eastward {
        range: params.positive("range", 50.0)?,
    }))
}

/// Crashes `node` at `step`, nothing else.
#[derive(Clone, Copy, Debug)]
pub struct ScriptedFailure {
    pub node: NodeId,
    pub step: StepId,
}

impl FailureModel for ScriptedFailure {
    fn name(&self) -> &str {
        "scripted"
    }

    fn decide(&mut self, node: NodeId, step: StepId, _random: &mut RandomStream) -> bool {
        node == self.node && step == self.step
    }
}

fn build_scripted(
    params: &mut Params<'_>,
    _ctx: &mut BuildContext<'_>,
) -> Result<Box<dyn FailureModel>, BuildError> {
    let node = params.count("node", 0)?;
    let step = params.count("step", 1)?;
    let node = u32::try_from(node).map_err(|_| BuildError::InvalidParam {
        family: params.family(),
        model: params.model().to_string(),
        param: "node".into(),
        value: node as f64,
        expected: "a node id that fits in u32",
    })?;
    Ok(Box::new(ScriptedFailure {
        node: NodeId(node),
        step: StepId(step),
    }))
}

/// The reference registry plus the mocks in this module.
pub fn mock_registry() -> ModelRegistry {
    let mut registry = ModelRegistry::new();
    register_builtins(&mut registry);
    registry.register_propagation("eastward", build_eastward);
    registry.register_failure("scripted", build_scripted);
    registry
}
