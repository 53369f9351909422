//! Construction-time error types.
//!
//! Everything here is raised before the first step runs. A simulation
//! that fails to build never executes a partial run.

use manet_space::BoundaryPolicy;
use std::error::Error;
use std::fmt;

/// The six pluggable model families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelFamily {
    /// Initial node positions.
    Placement,
    /// Scalar speed sampling.
    Speed,
    /// Per-node motion.
    Mobility,
    /// Link quality from positions.
    Propagation,
    /// Per-link delivery process.
    PacketLoss,
    /// Per-node crash decisions.
    Failure,
}

impl ModelFamily {
    /// Stable snake_case name, matching the configuration keys.
    pub fn name(self) -> &'static str {
        match self {
            Self::Placement => "placement",
            Self::Speed => "speed",
            Self::Mobility => "mobility",
            Self::Propagation => "propagation",
            Self::PacketLoss => "packet_loss",
            Self::Failure => "failure",
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors from [`RandomSource`](crate::RandomSource).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RandomError {
    /// Deterministic mode was requested without a master seed.
    MissingSeed,
    /// A stream key was requested twice. Streams are exclusively owned.
    DuplicateStream {
        /// The key requested twice.
        key: String,
    },
}

impl fmt::Display for RandomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeed => write!(f, "deterministic run requires a master seed"),
            Self::DuplicateStream { key } => {
                write!(f, "random stream '{key}' was already issued")
            }
        }
    }
}

impl Error for RandomError {}

/// Errors from building a model out of a [`ModelConfig`](crate::ModelConfig).
#[derive(Clone, Debug, PartialEq)]
pub enum BuildError {
    /// No constructor is registered under this name.
    UnknownModel {
        /// Family that was searched.
        family: ModelFamily,
        /// The unknown name.
        name: String,
    },
    /// A parameter is present but out of range.
    InvalidParam {
        /// Model family.
        family: ModelFamily,
        /// Model name.
        model: String,
        /// Parameter key.
        param: String,
        /// The rejected value.
        value: f64,
        /// Description of the accepted domain.
        expected: &'static str,
    },
    /// A parameter the model does not recognize.
    UnknownParam {
        /// Model family.
        family: ModelFamily,
        /// Model name.
        model: String,
        /// The unrecognized key.
        param: String,
    },
    /// The model's constructor could not obtain its random stream.
    Random(RandomError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownModel { family, name } => {
                write!(f, "unknown {family} model '{name}'")
            }
            Self::InvalidParam {
                family,
                model,
                param,
                value,
                expected,
            } => write!(
                f,
                "{family} model '{model}': parameter '{param}' = {value}, expected {expected}"
            ),
            Self::UnknownParam {
                family,
                model,
                param,
            } => write!(f, "{family} model '{model}': unknown parameter '{param}'"),
            Self::Random(e) => write!(f, "random stream: {e}"),
        }
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Random(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RandomError> for BuildError {
    fn from(e: RandomError) -> Self {
        Self::Random(e)
    }
}

/// A selected model requires a capability the configuration lacks.
///
/// Fatal: initialization is aborted and no step runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompositionError {
    /// The mobility model cannot operate under the area's boundary policy.
    UnsupportedBoundary {
        /// Mobility model name.
        mobility: String,
        /// The area's policy.
        boundary: BoundaryPolicy,
    },
}

impl fmt::Display for CompositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedBoundary { mobility, boundary } => write!(
                f,
                "mobility model '{mobility}' does not support the '{boundary}' boundary policy"
            ),
        }
    }
}

impl Error for CompositionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_error_chains_random_source() {
        let e = BuildError::from(RandomError::MissingSeed);
        assert!(e.source().is_some());
        assert_eq!(
            e.to_string(),
            "random stream: deterministic run requires a master seed"
        );
    }

    #[test]
    fn display_names_family_and_param() {
        let e = BuildError::InvalidParam {
            family: ModelFamily::PacketLoss,
            model: "gilbert_elliott".into(),
            param: "loss_in_bad".into(),
            value: 1.5,
            expected: "a probability in [0, 1]",
        };
        assert_eq!(
            e.to_string(),
            "packet_loss model 'gilbert_elliott': parameter 'loss_in_bad' = 1.5, expected a probability in [0, 1]"
        );
    }
}
