//! Probabilistic crash failures.

use manet_core::{NodeId, StepId};
use manet_model::{BuildContext, BuildError, FailureModel, Params, RandomStream};

/// Each active node crashes on each step independently with a fixed
/// probability, optionally capped at a total number of crashes.
///
/// The draw is always taken from the node's stream, even once the cap is
/// reached, so the cap never shifts any node's sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Crash {
    probability: f64,
    max_crashes: Option<u64>,
    crashed: u64,
}

impl Crash {
    /// `probability` in `[0, 1]` per node per step.
    pub fn new(probability: f64, max_crashes: Option<u64>) -> Self {
        Self {
            probability,
            max_crashes,
            crashed: 0,
        }
    }

    /// Number of crashes decided so far.
    pub fn crashed(&self) -> u64 {
        self.crashed
    }
}

impl FailureModel for Crash {
    fn name(&self) -> &str {
        "crash"
    }

    fn decide(&mut self, _node: NodeId, _step: StepId, random: &mut RandomStream) -> bool {
        let hit = random.chance(self.probability);
        if !hit || self.max_crashes.is_some_and(|max| self.crashed >= max) {
            return false;
        }
        self.crashed += 1;
        true
    }
}

/// Constructor for `crash`: `probability` (default 0.001),
/// `max_crashes` (optional).
pub fn build(
    params: &mut Params<'_>,
    _ctx: &mut BuildContext<'_>,
) -> Result<Box<dyn FailureModel>, BuildError> {
    let probability = params.probability("probability", 0.001)?;
    let max_crashes = params.optional_count("max_crashes")?;
    Ok(Box::new(Crash::new(probability, max_crashes)))
}
