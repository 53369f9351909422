//! Per-link stateful delivery process.

use crate::random::RandomStream;

/// State of a link's two-state loss process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LinkState {
    /// Low-loss state.
    #[default]
    Good,
    /// Bursty high-loss state.
    Bad,
}

/// Decides, once per step per evaluated link, whether traffic gets through.
///
/// The model itself is stateless; the per-link [`LinkState`] lives in
/// the channel's link record and the per-link stream is owned by that
/// record. A link not evaluated in a step does not advance.
pub trait PacketLossModel: Send + 'static {
    /// Registered model name.
    fn name(&self) -> &str;

    /// State a freshly created link record starts in.
    fn initial_state(&self) -> LinkState {
        LinkState::Good
    }

    /// Advance the process one step. Returns `(delivered, new_state)`.
    fn resolve(
        &self,
        state: LinkState,
        quality: f64,
        random: &mut RandomStream,
    ) -> (bool, LinkState);
}
