//! Axis-aligned rectangular area.

use crate::area::Area;
use crate::boundary::BoundaryPolicy;
use crate::error::{check_dimension, AreaError};

/// A `width x height` rectangle with its lower-left corner at the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Rectangle {
    width: f64,
    height: f64,
    boundary: BoundaryPolicy,
}

impl Rectangle {
    /// Create a rectangle.
    ///
    /// Returns `Err(AreaError::InvalidDimension)` if either dimension is
    /// not a positive finite number.
    pub fn new(width: f64, height: f64, boundary: BoundaryPolicy) -> Result<Self, AreaError> {
        Ok(Self {
            width: check_dimension("width", width)?,
            height: check_dimension("height", height)?,
            boundary,
        })
    }
}

impl Area for Rectangle {
    fn name(&self) -> &'static str {
        "rectangle"
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn boundary(&self) -> BoundaryPolicy {
        self.boundary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use manet_core::{Point, Vector};
    use proptest::prelude::*;

    #[test]
    fn rejects_bad_dimensions() {
        assert!(Rectangle::new(0.0, 1.0, BoundaryPolicy::Clamp).is_err());
        assert!(Rectangle::new(1.0, -1.0, BoundaryPolicy::Clamp).is_err());
        assert!(matches!(
            Rectangle::new(f64::NAN, 1.0, BoundaryPolicy::Clamp),
            Err(AreaError::InvalidDimension { name: "width", .. })
        ));
        assert_eq!(
            Rectangle::new(1.0, f64::INFINITY, BoundaryPolicy::Clamp),
            Err(AreaError::InvalidDimension {
                name: "height",
                value: f64::INFINITY
            })
        );
    }

    #[test]
    fn contains_uses_closed_bounds() {
        let r = Rectangle::new(100.0, 50.0, BoundaryPolicy::Reflect).unwrap();
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(100.0, 50.0)));
        assert!(!r.contains(Point::new(100.0001, 10.0)));
        assert!(!r.contains(Point::new(10.0, -0.0001)));
        assert!(!r.contains(Point::new(f64::NAN, 10.0)));
    }

    #[test]
    fn reflect_reports_flipped_axes() {
        let r = Rectangle::new(10.0, 10.0, BoundaryPolicy::Reflect).unwrap();
        let b = r.bound(Point::new(9.0, 1.0), Vector::new(2.0, -2.0));
        assert_eq!(b.position, Point::new(9.0, 1.0));
        assert!(b.flip_x);
        assert!(b.flip_y);
        assert!(b.reflected());
    }

    #[test]
    fn drifted_start_is_repaired() {
        let r = Rectangle::new(10.0, 10.0, BoundaryPolicy::Clamp).unwrap();
        let p = r.apply_boundary(Point::new(-1e-12, 10.0 + 1e-9), Vector::ZERO);
        assert!(r.contains(p));
    }

    #[test]
    fn compliance_all_policies() {
        for policy in [BoundaryPolicy::Reflect, BoundaryPolicy::Wrap, BoundaryPolicy::Clamp] {
            let r = Rectangle::new(37.5, 12.0, policy).unwrap();
            compliance::run_full_compliance(&r);
        }
    }

    #[test]
    fn downcast_recovers_concrete_shape() {
        let boxed: Box<dyn Area> =
            Box::new(Rectangle::new(3.0, 4.0, BoundaryPolicy::Wrap).unwrap());
        assert!(boxed.downcast_ref::<Rectangle>().is_some());
        assert!(boxed.downcast_ref::<crate::Square>().is_none());
        assert_eq!(boxed.diagonal(), 5.0);
    }

    proptest! {
        #[test]
        fn apply_boundary_always_contains(
            x in -1e4f64..1e4,
            y in -1e4f64..1e4,
            dx in -1e5f64..1e5,
            dy in -1e5f64..1e5,
            policy in prop_oneof![
                Just(BoundaryPolicy::Reflect),
                Just(BoundaryPolicy::Wrap),
                Just(BoundaryPolicy::Clamp),
            ],
        ) {
            let r = Rectangle::new(250.0, 80.0, policy).unwrap();
            let p = r.apply_boundary(Point::new(x, y), Vector::new(dx, dy));
            prop_assert!(r.contains(p), "{p} escaped {policy}");
        }
    }
}
