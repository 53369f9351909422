//! Scalar speed sampling.

use crate::random::RandomStream;

/// Samples a non-negative scalar speed on demand.
pub trait SpeedModel: Send + 'static {
    /// Registered model name.
    fn name(&self) -> &str;

    /// Next speed sample. Always `>= 0`; samplers clamp negative draws
    /// to zero.
    fn next_speed(&self, random: &mut RandomStream) -> f64;

    /// Mean of the distribution (after clamping is not accounted for).
    fn mean(&self) -> f64;
}
