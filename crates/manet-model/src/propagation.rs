//! Link quality from node positions.

use manet_core::Point;

/// Computes a link quality scalar from two positions.
///
/// A link exists when `quality >= threshold()`.
pub trait PropagationModel: Send + 'static {
    /// Registered model name.
    fn name(&self) -> &str;

    /// Quality of a transmission from `from` to `to`.
    fn quality(&self, from: Point, to: Point) -> f64;

    /// Reception threshold.
    fn threshold(&self) -> f64;

    /// Whether `quality(a, b) == quality(b, a)` for all positions.
    ///
    /// Symmetric models get one link record per unordered pair;
    /// directional models get one per ordered pair.
    fn is_symmetric(&self) -> bool {
        true
    }

    /// Whether `quality` clears the reception threshold.
    fn in_range(&self, quality: f64) -> bool {
        quality >= self.threshold()
    }
}
