//! Gilbert-Elliott bursty packet loss.
//!
//! Each link carries a two-state Markov chain. Every step the link is
//! evaluated, the chain first transitions (Good to Bad with
//! `p_good_to_bad`, Bad to Good with `p_bad_to_good`), then the step's
//! delivery is lost with the loss probability of the new state. Link
//! quality does not influence the process.
//!
//! The long-run loss rate is `pi_good * loss_in_good + pi_bad *
//! loss_in_bad` with `pi_bad = p_good_to_bad / (p_good_to_bad +
//! p_bad_to_good)`.

use manet_model::{BuildContext, BuildError, LinkState, PacketLossModel, Params, RandomStream};

/// Gilbert-Elliott parameters and process.
#[derive(Clone, Debug, PartialEq)]
pub struct GilbertElliott {
    /// Probability of moving Good to Bad per evaluated step.
    pub p_good_to_bad: f64,
    /// Probability of moving Bad to Good per evaluated step.
    pub p_bad_to_good: f64,
    /// Loss probability while Good.
    pub loss_in_good: f64,
    /// Loss probability while Bad.
    pub loss_in_bad: f64,
}

impl Default for GilbertElliott {
    /// Long-burst defaults: rare, persistent Bad periods losing ~45% of
    /// traffic, near-lossless Good periods.
    fn default() -> Self {
        Self {
            p_good_to_bad: 0.000_013_33,
            p_bad_to_good: 0.006_017_95,
            loss_in_good: 0.000_001,
            loss_in_bad: 0.445_051,
        }
    }
}

impl GilbertElliott {
    /// Stationary probability of the Bad state.
    pub fn stationary_bad(&self) -> f64 {
        let total = self.p_good_to_bad + self.p_bad_to_good;
        if total > 0.0 {
            self.p_good_to_bad / total
        } else {
            0.0
        }
    }

    /// Expected long-run loss rate.
    pub fn mean_loss(&self) -> f64 {
        let bad = self.stationary_bad();
        (1.0 - bad) * self.loss_in_good + bad * self.loss_in_bad
    }
}

impl PacketLossModel for GilbertElliott {
    fn name(&self) -> &str {
        "gilbert_elliott"
    }

    fn resolve(
        &self,
        state: LinkState,
        _quality: f64,
        random: &mut RandomStream,
    ) -> (bool, LinkState) {
        let next = match state {
            LinkState::Good if random.chance(self.p_good_to_bad) => LinkState::Bad,
            LinkState::Bad if random.chance(self.p_bad_to_good) => LinkState::Good,
            s => s,
        };
        let loss = match next {
            LinkState::Good => self.loss_in_good,
            LinkState::Bad => self.loss_in_bad,
        };
        (!random.chance(loss), next)
    }
}

/// Constructor for `gilbert_elliott`: `p_good_to_bad`, `p_bad_to_good`,
/// `loss_in_good`, `loss_in_bad` (all probabilities).
pub fn build(
    params: &mut Params<'_>,
    _ctx: &mut BuildContext<'_>,
) -> Result<Box<dyn PacketLossModel>, BuildError> {
    let d = GilbertElliott::default();
    Ok(Box::new(GilbertElliott {
        p_good_to_bad: params.probability("p_good_to_bad", d.p_good_to_bad)?,
        p_bad_to_good: params.probability("p_bad_to_good", d.p_bad_to_good)?,
        loss_in_good: params.probability("loss_in_good", d.loss_in_good)?,
        loss_in_bad: params.probability("loss_in_bad", d.loss_in_bad)?,
    }))
}
