//! Error types that travel through the event stream.
//!
//! Neither of these aborts a run: a [`ModelError`] is a recovered
//! out-of-domain sample, an [`ApplicationError`] is a contained failure
//! of user code. Both are reported to the event sink and the step
//! continues.

use std::error::Error;
use std::fmt;

/// A model produced an out-of-domain value and the kernel recovered.
///
/// The recovery policy is always "clamp to the nearest valid value and
/// continue"; this record describes what was clamped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelError {
    /// Name of the model (or kernel phase) that produced the value.
    pub model: String,
    /// Human-readable description of the violation and the recovery.
    pub reason: String,
}

impl ModelError {
    /// Construct a model error.
    pub fn new(model: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "model '{}': {}", self.model, self.reason)
    }
}

impl Error for ModelError {}

/// A user application failed during its step callback.
///
/// Contained per node: the node stays active and is invoked again on
/// the next step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApplicationError {
    /// The callback returned an error.
    Failed {
        /// Description supplied by the application.
        reason: String,
    },
    /// The callback panicked.
    Panicked {
        /// The panic payload, if it was a string.
        message: String,
    },
}

impl ApplicationError {
    /// Shorthand for [`ApplicationError::Failed`].
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed { reason } => write!(f, "application failed: {reason}"),
            Self::Panicked { message } => write!(f, "application panicked: {message}"),
        }
    }
}

impl Error for ApplicationError {}
