//! Random Waypoint mobility.
//!
//! Each node repeatedly picks a destination uniformly over the area and
//! a speed from the speed model, travels there in a straight line, then
//! pauses for a time drawn uniformly from `[0, pause_time)`.

use crate::waypoint::waypoint_step;
use manet_core::Point;
use manet_model::{
    BuildContext, BuildError, MobilityModel, MotionContext, NodeMotion, Params, RandomStream,
    SpeedModel,
};

/// The Random Waypoint model.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomWaypoint {
    pause_time: f64,
}

impl RandomWaypoint {
    /// `pause_time` is the upper bound of the pause at each waypoint, in
    /// simulation time units.
    pub fn new(pause_time: f64) -> Self {
        Self {
            pause_time: pause_time.max(0.0),
        }
    }
}

impl MobilityModel for RandomWaypoint {
    fn name(&self) -> &str {
        "random_waypoint"
    }

    fn step(
        &self,
        ctx: &MotionContext<'_>,
        motion: &mut NodeMotion,
        speed: &dyn SpeedModel,
        random: &mut RandomStream,
    ) {
        let (w, h) = (ctx.area.width(), ctx.area.height());
        waypoint_step(ctx, motion, speed, random, self.pause_time, |r| {
            Point::new(r.uniform(0.0, w), r.uniform(0.0, h))
        });
    }
}

/// Constructor for `random_waypoint`: `pause_time` (default 0).
pub fn build(
    params: &mut Params<'_>,
    _ctx: &mut BuildContext<'_>,
) -> Result<Box<dyn MobilityModel>, BuildError> {
    Ok(Box::new(RandomWaypoint::new(
        params.non_negative("pause_time", 0.0)?,
    )))
}
