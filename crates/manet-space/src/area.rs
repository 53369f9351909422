//! The core `Area` trait and `dyn Area` downcast support.

use crate::boundary::{fold_axis, BoundaryPolicy};
use manet_core::{Point, Vector};
use std::any::Any;

/// Result of applying the boundary policy to a move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounded {
    /// Final in-area position.
    pub position: Point,
    /// The horizontal direction of travel was mirrored.
    pub flip_x: bool,
    /// The vertical direction of travel was mirrored.
    pub flip_y: bool,
}

impl Bounded {
    /// Whether either direction of travel was mirrored.
    pub fn reflected(&self) -> bool {
        self.flip_x || self.flip_y
    }
}

/// A bounded 2D region anchored at the origin.
///
/// The area spans `[0, width] x [0, height]` (closed bounds). Concrete
/// shapes provide their dimensions and policy; containment and boundary
/// folding are shared.
///
/// # Object Safety
///
/// This trait is designed for use as `dyn Area`. Use `downcast_ref` for
/// opt-in specialization on concrete shapes.
pub trait Area: Any + Send + Sync + 'static {
    /// Shape name (`"rectangle"`, `"square"`).
    fn name(&self) -> &'static str;

    /// Horizontal extent.
    fn width(&self) -> f64;

    /// Vertical extent.
    fn height(&self) -> f64;

    /// Policy applied by [`apply_boundary`](Self::apply_boundary).
    fn boundary(&self) -> BoundaryPolicy;

    /// Whether `position` lies inside the closed area bounds.
    fn contains(&self, position: Point) -> bool {
        position.is_finite()
            && (0.0..=self.width()).contains(&position.x)
            && (0.0..=self.height()).contains(&position.y)
    }

    /// Move `position` by `delta` and fold the result back into the area.
    ///
    /// Total: defined for any input, including non-finite deltas and
    /// start positions already outside the area.
    fn bound(&self, position: Point, delta: Vector) -> Bounded {
        let target = position.offset(delta);
        let policy = self.boundary();
        let (x, flip_x) = fold_axis(target.x, self.width(), policy);
        let (y, flip_y) = fold_axis(target.y, self.height(), policy);
        Bounded {
            position: Point::new(x, y),
            flip_x,
            flip_y,
        }
    }

    /// [`bound`](Self::bound) without the reflection flags.
    fn apply_boundary(&self, position: Point, delta: Vector) -> Point {
        self.bound(position, delta).position
    }

    /// Nearest in-area point, regardless of the boundary policy.
    fn clamp(&self, position: Point) -> Point {
        let (x, _) = fold_axis(position.x, self.width(), BoundaryPolicy::Clamp);
        let (y, _) = fold_axis(position.y, self.height(), BoundaryPolicy::Clamp);
        Point::new(x, y)
    }

    /// Geometric center.
    fn center(&self) -> Point {
        Point::new(self.width() / 2.0, self.height() / 2.0)
    }

    /// Length of the diagonal; the largest possible node separation.
    fn diagonal(&self) -> f64 {
        self.width().hypot(self.height())
    }
}

impl std::fmt::Debug for dyn Area {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(self.name())
            .field("width", &self.width())
            .field("height", &self.height())
            .field("boundary", &self.boundary())
            .finish()
    }
}

impl dyn Area {
    /// Attempt to downcast a trait object to a concrete shape.
    pub fn downcast_ref<T: Area>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }
}
