//! Simulation configuration, validation, and error types.
//!
//! [`SimConfig`] is the structured record a simulation is built from.
//! [`validate()`](SimConfig::validate) checks the scalar options; model
//! names and parameters are checked when the
//! [`Simulator`](crate::Simulator) builds each model, and the
//! composition check runs after that. Every failure surfaces as a
//! [`ConfigError`] before any step runs.

use std::error::Error;
use std::fmt;

use manet_model::{BuildError, CompositionError, ModelConfig, RandomError};
use manet_space::{AreaConfig, AreaError};
use serde::{Deserialize, Serialize};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating a [`SimConfig`] or building the
/// component graph from it.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// `node_count` is zero or does not fit a node id.
    InvalidNodeCount {
        /// The rejected value.
        value: usize,
    },
    /// `steps` is zero.
    InvalidSteps,
    /// `frequency` is NaN, infinite, zero, or negative.
    InvalidFrequency {
        /// The rejected value.
        value: f64,
    },
    /// `link_expiry` is zero.
    InvalidLinkExpiry,
    /// The placement model returned the wrong number of positions.
    InvalidPlacement {
        /// Positions requested.
        expected: usize,
        /// Positions returned.
        actual: usize,
    },
    /// Area dimensions are invalid.
    Area(AreaError),
    /// A model could not be built from its configuration.
    Model(BuildError),
    /// Seed missing or a random stream could not be issued.
    Random(RandomError),
    /// The configured models cannot run together.
    Composition(CompositionError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNodeCount { value } => {
                write!(f, "node_count must be in 1..={}, got {value}", u32::MAX)
            }
            Self::InvalidSteps => write!(f, "steps must be at least 1"),
            Self::InvalidFrequency { value } => {
                write!(f, "frequency must be finite and positive, got {value}")
            }
            Self::InvalidLinkExpiry => write!(f, "link_expiry must be at least 1 step"),
            Self::InvalidPlacement { expected, actual } => {
                write!(f, "placement returned {actual} positions for {expected} nodes")
            }
            Self::Area(e) => write!(f, "area: {e}"),
            Self::Model(e) => write!(f, "model: {e}"),
            Self::Random(e) => write!(f, "random: {e}"),
            Self::Composition(e) => write!(f, "composition: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Area(e) => Some(e),
            Self::Model(e) => Some(e),
            Self::Random(e) => Some(e),
            Self::Composition(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AreaError> for ConfigError {
    fn from(e: AreaError) -> Self {
        Self::Area(e)
    }
}

impl From<BuildError> for ConfigError {
    fn from(e: BuildError) -> Self {
        Self::Model(e)
    }
}

impl From<RandomError> for ConfigError {
    fn from(e: RandomError) -> Self {
        Self::Random(e)
    }
}

impl From<CompositionError> for ConfigError {
    fn from(e: CompositionError) -> Self {
        Self::Composition(e)
    }
}

// ── SimConfig ──────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}

fn default_frequency() -> f64 {
    1.0
}

/// Complete configuration for one simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimConfig {
    /// Number of nodes. Must be positive.
    pub node_count: usize,
    /// Shape, dimensions and boundary policy of the area.
    pub area: AreaConfig,
    /// Initial placement model.
    pub placement: ModelConfig,
    /// Speed model consulted by mobility.
    pub speed: ModelConfig,
    /// Mobility model.
    pub mobility: ModelConfig,
    /// Propagation model.
    pub propagation: ModelConfig,
    /// Packet-loss model.
    pub packet_loss: ModelConfig,
    /// Failure model.
    pub failure: ModelConfig,
    /// Step budget. Must be positive.
    pub steps: u64,
    /// Master seed.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Whether a seed is required. Default: true.
    #[serde(default = "default_true")]
    pub deterministic: bool,
    /// Steps per simulation time unit. Default: 1.
    #[serde(default = "default_frequency")]
    pub frequency: f64,
    /// Evict link records out of range for this many steps. Default:
    /// never.
    #[serde(default)]
    pub link_expiry: Option<u64>,
}

impl SimConfig {
    /// A configuration using the reference model of every family:
    /// uniform placement and speed, random waypoint mobility, path-loss
    /// propagation, Gilbert-Elliott packet loss and no failures.
    pub fn new(node_count: usize, area: AreaConfig, steps: u64) -> Self {
        Self {
            node_count,
            area,
            placement: ModelConfig::new("uniform"),
            speed: ModelConfig::new("uniform"),
            mobility: ModelConfig::new("random_waypoint"),
            propagation: ModelConfig::new("path_loss"),
            packet_loss: ModelConfig::new("gilbert_elliott"),
            failure: ModelConfig::new("none"),
            steps,
            seed: None,
            deterministic: true,
            frequency: 1.0,
            link_expiry: None,
        }
    }

    /// Set the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Step duration in simulation time units.
    pub fn period(&self) -> f64 {
        1.0 / self.frequency
    }

    /// Validate the scalar options.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.node_count == 0 || u32::try_from(self.node_count).is_err() {
            return Err(ConfigError::InvalidNodeCount {
                value: self.node_count,
            });
        }
        if self.steps == 0 {
            return Err(ConfigError::InvalidSteps);
        }
        // The reciprocal must be finite too, or every step would have an
        // infinite duration.
        let hz = self.frequency;
        if !hz.is_finite() || hz <= 0.0 || !(1.0 / hz).is_finite() {
            return Err(ConfigError::InvalidFrequency { value: hz });
        }
        if self.link_expiry == Some(0) {
            return Err(ConfigError::InvalidLinkExpiry);
        }
        if self.seed.is_none() && self.deterministic {
            return Err(ConfigError::Random(RandomError::MissingSeed));
        }
        Ok(())
    }
}
