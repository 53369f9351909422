//! Boundary policies: what happens when a move would leave the area.

use serde::{Deserialize, Serialize};

/// How an [`Area`](crate::Area) folds positions that overflow its bounds.
///
/// # Examples
///
/// ```
/// use manet_core::{Point, Vector};
/// use manet_space::{Area, BoundaryPolicy, Rectangle};
///
/// let start = Point::new(9.0, 5.0);
/// let step = Vector::new(3.0, 0.0);
///
/// let reflect = Rectangle::new(10.0, 10.0, BoundaryPolicy::Reflect).unwrap();
/// assert_eq!(reflect.apply_boundary(start, step), Point::new(8.0, 5.0));
///
/// let wrap = Rectangle::new(10.0, 10.0, BoundaryPolicy::Wrap).unwrap();
/// assert_eq!(wrap.apply_boundary(start, step), Point::new(2.0, 5.0));
///
/// let clamp = Rectangle::new(10.0, 10.0, BoundaryPolicy::Clamp).unwrap();
/// assert_eq!(clamp.apply_boundary(start, step), Point::new(10.0, 5.0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Mirror the overflowing component back into the area.
    #[default]
    Reflect,
    /// Toroidal: leave through one edge, enter through the opposite one.
    Wrap,
    /// Truncate the overflowing component to the edge.
    Clamp,
}

impl BoundaryPolicy {
    /// Stable snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Reflect => "reflect",
            Self::Wrap => "wrap",
            Self::Clamp => "clamp",
        }
    }
}

impl std::fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Fold a single coordinate into `[0, extent]`.
///
/// Returns the folded value and whether the direction of travel along
/// this axis was mirrored (an odd number of reflections). Total: NaN
/// folds to 0 and infinities clamp to the nearest edge regardless of
/// policy. `extent` must be positive and finite.
pub(crate) fn fold_axis(value: f64, extent: f64, policy: BoundaryPolicy) -> (f64, bool) {
    if value.is_nan() {
        return (0.0, false);
    }
    if value.is_infinite() {
        return (if value > 0.0 { extent } else { 0.0 }, false);
    }
    if (0.0..=extent).contains(&value) {
        return (value, false);
    }
    match policy {
        BoundaryPolicy::Clamp => (value.clamp(0.0, extent), false),
        BoundaryPolicy::Wrap => (value.rem_euclid(extent).clamp(0.0, extent), false),
        BoundaryPolicy::Reflect => {
            let period = 2.0 * extent;
            let m = value.rem_euclid(period);
            if m > extent {
                ((period - m).clamp(0.0, extent), true)
            } else {
                (m.clamp(0.0, extent), false)
            }
        }
    }
}
