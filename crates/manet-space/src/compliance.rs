//! Area trait compliance test helpers.
//!
//! These functions verify that an Area implementation satisfies the
//! invariants required by the trait contract. Reused across all shape
//! test modules.

use crate::area::Area;
use manet_core::{Point, Vector};

/// Assert that the four corners and the center are contained.
pub fn assert_contains_corners(area: &dyn Area) {
    let (w, h) = (area.width(), area.height());
    for p in [
        Point::new(0.0, 0.0),
        Point::new(w, 0.0),
        Point::new(0.0, h),
        Point::new(w, h),
        area.center(),
    ] {
        assert!(area.contains(p), "{} should contain {p}", area.name());
    }
}

/// Assert that points just outside each edge are not contained.
pub fn assert_excludes_outside(area: &dyn Area) {
    let (w, h) = (area.width(), area.height());
    let eps = 1e-6 * w.max(h);
    for p in [
        Point::new(-eps, h / 2.0),
        Point::new(w + eps, h / 2.0),
        Point::new(w / 2.0, -eps),
        Point::new(w / 2.0, h + eps),
    ] {
        assert!(!area.contains(p), "{} should not contain {p}", area.name());
    }
}

/// Assert that a zero move from an interior point is the identity.
pub fn assert_zero_move_is_identity(area: &dyn Area) {
    let c = area.center();
    assert_eq!(area.apply_boundary(c, Vector::ZERO), c);
}

/// Assert that `apply_boundary` lands inside the area for a spread of
/// large, small, and non-finite moves from inside and outside points.
pub fn assert_apply_boundary_total(area: &dyn Area) {
    let (w, h) = (area.width(), area.height());
    let starts = [
        area.center(),
        Point::new(0.0, 0.0),
        Point::new(w, h),
        Point::new(-w, 2.0 * h),
        Point::new(f64::NAN, h / 2.0),
    ];
    let moves = [
        Vector::new(w * 0.1, -h * 0.1),
        Vector::new(w * 3.7, h * 5.3),
        Vector::new(-w * 11.0, -h * 0.5),
        Vector::new(f64::INFINITY, 0.0),
        Vector::new(0.0, f64::NEG_INFINITY),
        Vector::new(f64::NAN, f64::NAN),
    ];
    for start in starts {
        for delta in moves {
            let p = area.apply_boundary(start, delta);
            assert!(
                area.contains(p),
                "{}: apply_boundary({start}, {delta:?}) = {p} escaped",
                area.name()
            );
        }
    }
}

/// Assert that `clamp` returns contained points and fixes interior ones.
pub fn assert_clamp_contains(area: &dyn Area) {
    let c = area.center();
    assert_eq!(area.clamp(c), c);
    let far = Point::new(-1e9, 1e9);
    assert!(area.contains(area.clamp(far)));
}

/// Run all compliance checks.
pub fn run_full_compliance(area: &dyn Area) {
    assert_contains_corners(area);
    assert_excludes_outside(area);
    assert_zero_move_is_identity(area);
    assert_apply_boundary_total(area);
    assert_clamp_contains(area);
}
