//! Error types for area construction.

use std::fmt;

/// Errors arising from area construction.
#[derive(Clone, Debug, PartialEq)]
pub enum AreaError {
    /// A dimension is zero, negative, or not finite.
    InvalidDimension {
        /// Which dimension (`"width"`, `"height"`, `"side"`).
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for AreaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { name, value } => {
                write!(f, "area {name} must be positive and finite, got {value}")
            }
        }
    }
}

impl std::error::Error for AreaError {}

/// Check that `value` is a usable area dimension.
pub(crate) fn check_dimension(name: &'static str, value: f64) -> Result<f64, AreaError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(AreaError::InvalidDimension { name, value })
    }
}
