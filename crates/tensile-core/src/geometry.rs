//! Geometric primitives for graph layout and rendering.
//!
//! This module provides the small set of geometric types used by the layout
//! engine and the renderer.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate (also used as a 2D vector for velocities)
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned rectangle defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Tensile uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```

/// A 2D point in layout space.
///
/// Points use `f32` coordinates and double as plain 2D vectors: the layout
/// engine stores particle velocities as `Point`s as well.
///
/// # Examples
///
/// ```
/// # use tensile_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let diff = p1.sub_point(p2);
/// assert_eq!(diff.x(), 5.0);
/// assert_eq!(diff.y(), 15.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Checks if both coordinates are finite (neither NaN nor infinite)
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Multiplies both coordinates by the given factor.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tensile_core::geometry::Point;
    /// let point = Point::new(10.0, 20.0);
    ///
    /// let halved = point.scale(0.5);
    /// assert_eq!(halved.x(), 5.0);
    /// assert_eq!(halved.y(), 10.0);
    /// ```
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Returns the point with both coordinates negated
    pub fn negate(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }

    /// Squared Euclidean length, `x² + y²`
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Clamps each coordinate independently to `[-limit, limit]`.
    ///
    /// NaN coordinates are passed through unchanged, as [`f32::clamp`] does.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is negative or NaN.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tensile_core::geometry::Point;
    /// let step = Point::new(25.0, -3.0).clamp_axes(10.0);
    /// assert_eq!(step, Point::new(10.0, -3.0));
    /// ```
    pub fn clamp_axes(self, limit: f32) -> Self {
        Self {
            x: self.x.clamp(-limit, limit),
            y: self.y.clamp(-limit, limit),
        }
    }

    /// Largest absolute coordinate
    pub fn max_abs_axis(self) -> f32 {
        self.x.abs().max(self.y.abs())
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns the center point of a canvas of this size anchored at the origin
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// An axis-aligned rectangle with minimum and maximum coordinates.
///
/// Bounds expose the `(x, y, w, h)` view used when centering a rendered
/// graph: [`x`](Self::x) and [`y`](Self::y) are the top-left corner,
/// [`width`](Self::width) and [`height`](Self::height) the extents.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Computes the smallest bounds containing every point.
    ///
    /// An empty iterator yields the degenerate bounds with `min = +∞` and
    /// `max = -∞` on both axes, so the width and height are `-∞`. Callers
    /// that need meaningful output must check for emptiness first, see
    /// [`is_empty`](Self::is_empty).
    ///
    /// # Examples
    ///
    /// ```
    /// # use tensile_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::from_points([
    ///     Point::new(0.0, 0.0),
    ///     Point::new(4.0, 2.0),
    ///     Point::new(-1.0, 5.0),
    /// ]);
    /// assert_eq!(bounds.x(), -1.0);
    /// assert_eq!(bounds.y(), 0.0);
    /// assert_eq!(bounds.width(), 5.0);
    /// assert_eq!(bounds.height(), 5.0);
    /// ```
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        points.into_iter().fold(
            Self {
                min_x: f32::INFINITY,
                min_y: f32::INFINITY,
                max_x: f32::NEG_INFINITY,
                max_y: f32::NEG_INFINITY,
            },
            |acc, point| Self {
                min_x: acc.min_x.min(point.x),
                min_y: acc.min_y.min(point.y),
                max_x: acc.max_x.max(point.x),
                max_y: acc.max_y.max(point.y),
            },
        )
    }

    /// Returns true for the degenerate bounds produced from zero points
    pub fn is_empty(self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Left edge
    pub fn x(self) -> f32 {
        self.min_x
    }

    /// Top edge
    pub fn y(self) -> f32 {
        self.min_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}
