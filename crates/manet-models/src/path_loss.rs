//! Log-distance path-loss propagation.
//!
//! ```text
//! quality = transmit_power - 10 * exponent * log10(max(d, floor_distance)) - reference_loss
//! ```
//!
//! Quality is in dB-like units; a link exists when it is at least
//! `threshold`. `floor_distance` keeps the logarithm finite for
//! coincident nodes.

use manet_core::Point;
use manet_model::{BuildContext, BuildError, Params, PropagationModel};

/// Simplified log-distance path loss.
#[derive(Clone, Debug, PartialEq)]
pub struct PathLoss {
    transmit_power: f64,
    exponent: f64,
    reference_loss: f64,
    floor_distance: f64,
    threshold: f64,
}

impl PathLoss {
    /// Defaults: transmit power 20, exponent 3, reference loss 40,
    /// floor distance 1, threshold -70.
    pub fn new() -> Self {
        Self {
            transmit_power: 20.0,
            exponent: 3.0,
            reference_loss: 40.0,
            floor_distance: 1.0,
            threshold: -70.0,
        }
    }

    /// Transmit power.
    pub fn transmit_power(mut self, power: f64) -> Self {
        self.transmit_power = power;
        self
    }

    /// Path-loss exponent (free space is 2).
    pub fn exponent(mut self, exponent: f64) -> Self {
        self.exponent = exponent;
        self
    }

    /// Constant loss term.
    pub fn reference_loss(mut self, loss: f64) -> Self {
        self.reference_loss = loss;
        self
    }

    /// Minimum distance used in the logarithm. Must be positive.
    pub fn floor_distance(mut self, floor: f64) -> Self {
        self.floor_distance = floor;
        self
    }

    /// Reception threshold.
    pub fn reception_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Largest distance at which a link still clears the threshold.
    pub fn range(&self) -> f64 {
        let budget = self.transmit_power - self.reference_loss - self.threshold;
        10f64
            .powf(budget / (10.0 * self.exponent))
            .max(self.floor_distance)
    }

    /// Quality at distance `d`.
    pub fn quality_at(&self, d: f64) -> f64 {
        self.transmit_power
            - 10.0 * self.exponent * d.max(self.floor_distance).log10()
            - self.reference_loss
    }
}

impl Default for PathLoss {
    fn default() -> Self {
        Self::new()
    }
}

impl PropagationModel for PathLoss {
    fn name(&self) -> &str {
        "path_loss"
    }

    fn quality(&self, from: Point, to: Point) -> f64 {
        self.quality_at(from.distance(to))
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// Constructor for `path_loss`: `transmit_power`, `exponent`,
/// `reference_loss`, `floor_distance`, `threshold`.
pub fn build(
    params: &mut Params<'_>,
    _ctx: &mut BuildContext<'_>,
) -> Result<Box<dyn PropagationModel>, BuildError> {
    let d = PathLoss::new();
    let model = PathLoss::new()
        .transmit_power(params.get("transmit_power", d.transmit_power)?)
        .exponent(params.positive("exponent", d.exponent)?)
        .reference_loss(params.get("reference_loss", d.reference_loss)?)
        .floor_distance(params.positive("floor_distance", d.floor_distance)?)
        .reception_threshold(params.get("threshold", d.threshold)?);
    Ok(Box::new(model))
}
