//! Per-step metrics and the end-of-run summary.
//!
//! [`StepMetrics`] captures phase timings and counters for a single
//! step. [`RunSummary`] accumulates the counters over a whole run.

use manet_core::NodeId;

/// Timing and counters collected during a single step.
///
/// All durations are in microseconds of wall-clock time and are not
/// part of the deterministic output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step, in microseconds.
    pub total_us: u64,
    /// Time spent in the mobility phase, in microseconds.
    pub mobility_us: u64,
    /// Time spent in the failure phase, in microseconds.
    pub failure_us: u64,
    /// Time spent resolving links, in microseconds.
    pub channel_us: u64,
    /// Time spent in application callbacks and delivery, in microseconds.
    pub application_us: u64,
    /// Active nodes after the failure phase.
    pub active_nodes: u64,
    /// Nodes whose position changed.
    pub moved: u64,
    /// Nodes that crashed this step.
    pub crashed: u64,
    /// Links that came into range.
    pub links_up: u64,
    /// Links that went down.
    pub links_down: u64,
    /// Links in range after resolution.
    pub live_links: u64,
    /// Packet-loss resolutions performed.
    pub link_resolutions: u64,
    /// Messages delivered.
    pub delivered: u64,
    /// Messages lost.
    pub lost: u64,
    /// Contained application failures.
    pub application_errors: u64,
    /// Recovered model errors.
    pub model_errors: u64,
}

/// Outcome of a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Master seed the run used (drawn from entropy when none was
    /// configured for a non-deterministic run).
    pub seed: u64,
    /// Steps executed.
    pub steps_run: u64,
    /// Number of crashed nodes.
    pub nodes_crashed: u64,
    /// Crashed nodes, in crash order.
    pub crashed: Vec<NodeId>,
    /// Messages delivered.
    pub delivered: u64,
    /// Messages lost.
    pub lost: u64,
    /// Packet-loss resolutions performed.
    pub link_resolutions: u64,
    /// Contained application failures.
    pub application_errors: u64,
    /// Recovered model errors, including placement warnings.
    pub model_errors: u64,
    /// Whether the run ended before its step budget.
    pub stopped_early: bool,
}

impl RunSummary {
    /// Fold one step's counters into the totals.
    pub fn absorb(&mut self, step: &StepMetrics) {
        self.steps_run += 1;
        self.nodes_crashed += step.crashed;
        self.delivered += step.delivered;
        self.lost += step.lost;
        self.link_resolutions += step.link_resolutions;
        self.application_errors += step.application_errors;
        self.model_errors += step.model_errors;
    }

    /// Fraction of sent messages that were lost, or 0 with no traffic.
    pub fn loss_ratio(&self) -> f64 {
        let sent = self.delivered + self.lost;
        if sent == 0 {
            0.0
        } else {
            self.lost as f64 / sent as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = StepMetrics::default();
        assert_eq!(m.total_us, 0);
        assert_eq!(m.delivered, 0);
        assert_eq!(m.link_resolutions, 0);
        assert_eq!(RunSummary::default().loss_ratio(), 0.0);
    }

    #[test]
    fn summary_accumulates_steps() {
        let mut s = RunSummary::default();
        let step = StepMetrics {
            crashed: 1,
            delivered: 3,
            lost: 1,
            link_resolutions: 5,
            application_errors: 2,
            model_errors: 1,
            ..StepMetrics::default()
        };
        s.absorb(&step);
        s.absorb(&step);
        assert_eq!(s.steps_run, 2);
        assert_eq!(s.nodes_crashed, 2);
        assert_eq!(s.delivered, 6);
        assert_eq!(s.lost, 2);
        assert_eq!(s.link_resolutions, 10);
        assert_eq!(s.application_errors, 4);
        assert_eq!(s.model_errors, 2);
        assert_eq!(s.loss_ratio(), 0.25);
    }
}
