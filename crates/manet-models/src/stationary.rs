//! Stationary mobility: nodes never move.

use manet_core::Vector;
use manet_model::{
    BuildContext, BuildError, MobilityModel, MotionContext, NodeMotion, Params, RandomStream,
    SpeedModel,
};

/// Keeps every node at its placed position. Consumes no randomness.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Stationary;

impl MobilityModel for Stationary {
    fn name(&self) -> &str {
        "stationary"
    }

    fn step(
        &self,
        _ctx: &MotionContext<'_>,
        motion: &mut NodeMotion,
        _speed: &dyn SpeedModel,
        _random: &mut RandomStream,
    ) {
        motion.velocity = Vector::ZERO;
    }
}

/// Constructor for `stationary`: no parameters.
pub fn build(
    _params: &mut Params<'_>,
    _ctx: &mut BuildContext<'_>,
) -> Result<Box<dyn MobilityModel>, BuildError> {
    Ok(Box::new(Stationary))
}
