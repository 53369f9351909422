//! Per-node motion state machines.
//!
//! The model object is shared by all nodes; each node owns its
//! [`NodeMotion`] (position, velocity and [`MotionState`]) and its own
//! mobility stream. Speeds are drawn from that same stream through the
//! configured [`SpeedModel`].

use crate::random::RandomStream;
use crate::speed::SpeedModel;
use manet_core::{NodeId, Point, StepId, Vector};
use manet_space::{Area, BoundaryPolicy};

/// Where a node is in its decide/move cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum MotionPhase {
    /// Next step picks a new destination or heading and a speed.
    #[default]
    Deciding,
    /// Advancing toward the current destination or along the heading.
    Moving,
    /// Holding position.
    Paused {
        /// Simulation time left in the pause.
        remaining: f64,
    },
}

/// A node's model-owned motion state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionState {
    /// Current phase.
    pub phase: MotionPhase,
    /// Waypoint being travelled to, for destination-driven models.
    pub destination: Option<Point>,
    /// Current scalar speed.
    pub speed: f64,
    /// Current heading in radians, for heading-driven models.
    pub heading: f64,
    /// Steps since the last decision.
    pub since_decision: u64,
}

/// Everything the kernel tracks about one node's movement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeMotion {
    /// The node.
    pub node: NodeId,
    /// Current position.
    pub position: Point,
    /// Displacement per unit time over the last step.
    pub velocity: Vector,
    /// Model state.
    pub state: MotionState,
}

impl NodeMotion {
    /// A node at rest at `position`, about to make its first decision.
    pub fn at_rest(node: NodeId, position: Point) -> Self {
        Self {
            node,
            position,
            velocity: Vector::ZERO,
            state: MotionState::default(),
        }
    }
}

/// Read-only per-step inputs to a mobility model.
#[derive(Clone, Copy)]
pub struct MotionContext<'a> {
    /// The simulation area.
    pub area: &'a dyn Area,
    /// Step being executed.
    pub step: StepId,
    /// Simulation time at the end of this step.
    pub time: f64,
    /// Step duration in simulation time units.
    pub dt: f64,
}

/// Produces each active node's next position.
///
/// `step` must leave `motion.position` inside `ctx.area`; models move
/// through [`Area::apply_boundary`] (or [`Area::bound`]) to guarantee it.
pub trait MobilityModel: Send + 'static {
    /// Registered model name.
    fn name(&self) -> &str;

    /// Whether the model can operate under `boundary`.
    ///
    /// Checked once at construction; `false` aborts initialization.
    fn supports(&self, _boundary: BoundaryPolicy) -> bool {
        true
    }

    /// Advance model-wide state once, before any node moves this step.
    ///
    /// `group` is the model's own stream, separate from every node's.
    fn begin_step(&mut self, _ctx: &MotionContext<'_>, _group: &mut RandomStream) {}

    /// Advance one node by one step.
    fn step(
        &self,
        ctx: &MotionContext<'_>,
        motion: &mut NodeMotion,
        speed: &dyn SpeedModel,
        random: &mut RandomStream,
    );
}
