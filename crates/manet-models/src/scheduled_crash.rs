//! Crash failures on a schedule fixed at construction.
//!
//! Each node independently becomes faulty with `probability`; a faulty
//! node crashes at a step drawn uniformly from
//! `(transient_steps, steps]`. At most `max_crashes` nodes are made
//! faulty, and the drawn crash steps are then shuffled across nodes so
//! the cap does not favour low node ids. The schedule uses the
//! `failure:schedule` stream; per-node failure streams are untouched.

use manet_core::{NodeId, StepId};
use manet_model::{keys, BuildContext, BuildError, FailureModel, Params, RandomStream};
use rand::seq::SliceRandom;

/// Precomputed crash schedule.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledCrash {
    schedule: Vec<Option<StepId>>,
}

impl ScheduledCrash {
    /// Draw a schedule for `node_count` nodes over `steps` steps.
    pub fn draw(
        node_count: usize,
        steps: u64,
        probability: f64,
        max_crashes: Option<u64>,
        transient_steps: u64,
        random: &mut RandomStream,
    ) -> Self {
        let mut schedule = vec![None; node_count];
        let window = steps.saturating_sub(transient_steps);
        let mut faulty = 0u64;
        if window > 0 {
            for slot in schedule.iter_mut() {
                if max_crashes.is_some_and(|max| faulty >= max) {
                    break;
                }
                if random.chance(probability) {
                    let offset = random.index(window as usize) as u64;
                    *slot = Some(StepId(transient_steps + 1 + offset));
                    faulty += 1;
                }
            }
        }
        schedule.shuffle(random);
        Self { schedule }
    }

    /// Build directly from a schedule (`None` = never crashes).
    pub fn from_schedule(schedule: Vec<Option<StepId>>) -> Self {
        Self { schedule }
    }

    /// Crash step of `node`, if it is faulty.
    pub fn crash_step(&self, node: NodeId) -> Option<StepId> {
        self.schedule.get(node.index()).copied().flatten()
    }

    /// Number of faulty nodes.
    pub fn faulty(&self) -> usize {
        self.schedule.iter().filter(|s| s.is_some()).count()
    }
}

impl FailureModel for ScheduledCrash {
    fn name(&self) -> &str {
        "scheduled_crash"
    }

    fn decide(&mut self, node: NodeId, step: StepId, _random: &mut RandomStream) -> bool {
        self.crash_step(node).is_some_and(|at| at <= step)
    }
}

/// Constructor for `scheduled_crash`: `probability` (default 0.1),
/// `max_crashes` (optional), `transient_steps` (default 0, at most the
/// step budget).
pub fn build(
    params: &mut Params<'_>,
    ctx: &mut BuildContext<'_>,
) -> Result<Box<dyn FailureModel>, BuildError> {
    let probability = params.probability("probability", 0.1)?;
    let max_crashes = params.optional_count("max_crashes")?;
    let transient_steps = params.count("transient_steps", 0)?;
    if transient_steps > ctx.steps {
        return Err(BuildError::InvalidParam {
            family: params.family(),
            model: params.model().to_string(),
            param: "transient_steps".into(),
            value: transient_steps as f64,
            expected: "at most the step budget",
        });
    }
    let mut random = ctx.random.stream(keys::failure_schedule())?;
    Ok(Box::new(ScheduledCrash::draw(
        ctx.node_count,
        ctx.steps,
        probability,
        max_crashes,
        transient_steps,
        &mut random,
    )))
}
