//! Square area.

use crate::area::Area;
use crate::boundary::BoundaryPolicy;
use crate::error::{check_dimension, AreaError};
use crate::rectangle::Rectangle;

/// A `side x side` square with its lower-left corner at the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Square {
    inner: Rectangle,
}

impl Square {
    /// Create a square.
    ///
    /// Returns `Err(AreaError::InvalidDimension)` if `side` is not a
    /// positive finite number.
    pub fn new(side: f64, boundary: BoundaryPolicy) -> Result<Self, AreaError> {
        let side = check_dimension("side", side)?;
        Ok(Self {
            inner: Rectangle::new(side, side, boundary)?,
        })
    }

    /// Side length.
    pub fn side(&self) -> f64 {
        self.inner.width()
    }
}

impl Area for Square {
    fn name(&self) -> &'static str {
        "square"
    }

    fn width(&self) -> f64 {
        self.inner.width()
    }

    fn height(&self) -> f64 {
        self.inner.height()
    }

    fn boundary(&self) -> BoundaryPolicy {
        self.inner.boundary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;

    #[test]
    fn side_error_names_the_side() {
        assert_eq!(
            Square::new(-2.0, BoundaryPolicy::Wrap),
            Err(AreaError::InvalidDimension {
                name: "side",
                value: -2.0
            })
        );
    }

    #[test]
    fn dimensions_match_side() {
        let s = Square::new(42.0, BoundaryPolicy::Wrap).unwrap();
        assert_eq!(s.width(), 42.0);
        assert_eq!(s.height(), 42.0);
        assert_eq!(s.side(), 42.0);
        assert_eq!(s.name(), "square");
    }

    #[test]
    fn compliance_all_policies() {
        for policy in [BoundaryPolicy::Reflect, BoundaryPolicy::Wrap, BoundaryPolicy::Clamp] {
            compliance::run_full_compliance(&Square::new(5.0, policy).unwrap());
        }
    }
}
