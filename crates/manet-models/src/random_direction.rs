//! Random Direction mobility.
//!
//! Like Random Waypoint, but every destination lies on the area border:
//! a node picks one of the four sides uniformly, a point uniformly along
//! it, travels there, pauses, and repeats. Nodes therefore sweep the
//! whole area instead of clustering toward its center.

use crate::waypoint::waypoint_step;
use manet_core::Point;
use manet_model::{
    BuildContext, BuildError, MobilityModel, MotionContext, NodeMotion, Params, RandomStream,
    SpeedModel,
};

/// The Random Direction model.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomDirection {
    pause_time: f64,
}

impl RandomDirection {
    /// `pause_time` is the upper bound of the pause at the border.
    pub fn new(pause_time: f64) -> Self {
        Self {
            pause_time: pause_time.max(0.0),
        }
    }
}

fn border_point(width: f64, height: f64, random: &mut RandomStream) -> Point {
    let x = random.uniform(0.0, width);
    let y = random.uniform(0.0, height);
    match random.index(4) {
        0 => Point::new(x, 0.0),
        1 => Point::new(width, y),
        2 => Point::new(x, height),
        _ => Point::new(0.0, y),
    }
}

impl MobilityModel for RandomDirection {
    fn name(&self) -> &str {
        "random_direction"
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
            border_point(w, h, r)
        });
    }
}

/// Constructor for `random_direction`: `pause_time` (default 0).
pub fn build(
    params: &mut Params<'_>,
    _ctx: &mut BuildContext<'_>,
) -> Result<Box<dyn MobilityModel>, BuildError> {
    Ok(Box::new(RandomDirection::new(
        params.non_negative("pause_time", 0.0)?,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speed::ConstantSpeed;
    use manet_core::{NodeId, StepId};
    use manet_model::RandomSource;
    use manet_space::{Area, BoundaryPolicy, Rectangle};

    #[test]
    fn destinations_lie_on_the_border() {
        let mut rng = RandomSource::new(4).stream("t").unwrap();
        for _ in 0..500 {
            let p = border_point(30.0, 10.0, &mut rng);
            let on_edge = p.x == 0.0 || p.x == 30.0 || p.y == 0.0 || p.y == 10.0;
            assert!(on_edge, "{p} not on border");
        }
    }

    #[test]
    fn arrivals_end_on_the_border() {
        let area = Rectangle::new(30.0, 10.0, BoundaryPolicy::Clamp).unwrap();
        let model = RandomDirection::new(0.0);
        let speed = ConstantSpeed::new(3.0);
        let mut rng = RandomSource::new(5).stream("mobility:node1").unwrap();
        let mut m = NodeMotion::at_rest(NodeId(1), area.center());
        for s in 1..=300 {
            let ctx = MotionContext {
                area: &area,
                step: StepId(s),
                time: s as f64,
                dt: 1.0,
            };
            model.step(&ctx, &mut m, &speed, &mut rng);
            assert!(area.contains(m.position));
            if m.state.destination.is_none() {
                let p = m.position;
                assert!(p.x == 0.0 || p.x == 30.0 || p.y == 0.0 || p.y == 10.0);
            }
        }
    }
}
