//! Planar geometry: positions and displacements.

use std::fmt;

/// A position in the simulation plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Construct a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        self.vector_to(other).length()
    }

    /// Displacement from `self` to `other`.
    pub fn vector_to(self, other: Point) -> Vector {
        Vector::new(other.x - self.x, other.y - self.y)
    }

    /// This point shifted by `delta`.
    pub fn offset(self, delta: Vector) -> Point {
        Point::new(self.x + delta.dx, self.y + delta.dy)
    }

    /// Both coordinates are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A displacement or velocity in the simulation plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector {
    /// Horizontal component.
    pub dx: f64,
    /// Vertical component.
    pub dy: f64,
}

impl Vector {
    /// The zero vector.
    pub const ZERO: Vector = Vector { dx: 0.0, dy: 0.0 };

    /// Construct a vector.
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Vector of the given length pointing along `angle` (radians,
    /// counter-clockwise from the positive x axis).
    pub fn from_polar(length: f64, angle: f64) -> Self {
        Self::new(length * angle.cos(), length * angle.sin())
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        self.dx.hypot(self.dy)
    }

    /// Component-wise scaling.
    pub fn scale(self, factor: f64) -> Vector {
        Vector::new(self.dx * factor, self.dy * factor)
    }

    /// Heading in radians, in `(-pi, pi]`.
    pub fn angle(self) -> f64 {
        self.dy.atan2(self.dx)
    }
}
