//! Lossless channel: every in-range link delivers.

use manet_model::{BuildContext, BuildError, LinkState, PacketLossModel, Params, RandomStream};

/// Every evaluated link delivers and stays Good. Consumes no randomness.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Lossless;

impl PacketLossModel for Lossless {
    fn name(&self) -> &str {
        "none"
    }

    fn resolve(
        &self,
        _state: LinkState,
        _quality: f64,
        _random: &mut RandomStream,
    ) -> (bool, LinkState) {
        (true, LinkState::Good)
    }
}

/// Constructor for `none`: no parameters.
pub fn build(
    _params: &mut Params<'_>,
    _ctx: &mut BuildContext<'_>,
) -> Result<Box<dyn PacketLossModel>, BuildError> {
    Ok(Box::new(Lossless))
}
