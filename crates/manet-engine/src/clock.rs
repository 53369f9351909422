//! Step counter, step budget and the early-stop flag.
//!
//! [`Clock`] starts at step 0 and is moved forward only by
//! [`advance()`](Clock::advance). A run with a budget of `N` steps
//! therefore executes steps `1..=N`. The stop flag is shared through
//! [`StopHandle`] so it can be raised from outside the step loop; it is
//! observed only between steps.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use manet_core::StepId;

// ── StopHandle ─────────────────────────────────────────────────────

/// Cloneable handle that requests a graceful stop.
///
/// The step in progress always completes; the next
/// [`Clock::advance()`] returns `false`.
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    /// Raise the stop flag. Idempotent.
    pub fn stop(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Whether a stop was requested.
    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

// ── Clock ──────────────────────────────────────────────────────────

/// Monotonic step clock.
#[derive(Debug)]
pub struct Clock {
    current: StepId,
    total: u64,
    frequency: f64,
    stop: StopHandle,
}

impl Clock {
    /// A clock with a budget of `total` steps at `frequency` steps per
    /// simulation time unit.
    pub fn new(total: u64, frequency: f64) -> Self {
        Self {
            current: StepId(0),
            total,
            frequency,
            stop: StopHandle::default(),
        }
    }

    /// Move to the next step.
    ///
    /// Returns `false`, without moving, once the budget is exhausted or
    /// a stop was requested.
    pub fn advance(&mut self) -> bool {
        if self.stop.is_stopped() || self.is_exhausted() {
            return false;
        }
        self.current = self.current.next();
        true
    }

    /// The current step (0 before the first advance).
    pub fn current(&self) -> StepId {
        self.current
    }

    /// Total step budget.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Steps per simulation time unit.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Duration of one step in simulation time units.
    pub fn period(&self) -> f64 {
        1.0 / self.frequency
    }

    /// Simulation time of the current step.
    pub fn time(&self) -> f64 {
        self.time_of(self.current)
    }

    /// Simulation time of `step`.
    pub fn time_of(&self, step: StepId) -> f64 {
        step.0 as f64 / self.frequency
    }

    /// Whether every budgeted step has run.
    pub fn is_exhausted(&self) -> bool {
        self.current.0 >= self.total
    }

    /// Whether a stop was requested.
    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }

    /// A handle onto this clock's stop flag.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }
}
