//! Simulated points that carry each node's position.
//!
//! A [`Particle`] is owned by exactly one [`Graph`](crate::graph::Graph) and is
//! addressed through its node identifier. Its velocity is a per-step force
//! accumulator: it is zero between steps and never carries momentum over.

use rand::Rng;

use tensile_core::geometry::Point;

/// Caller-supplied starting coordinates for a node.
///
/// Each axis is optional. An axis that is missing, NaN, or infinite is
/// treated as unspecified and drawn uniformly from `[0, 1)` when the particle
/// is created. The layout only needs *some* starting point, so malformed
/// input is not an error.
///
/// # Examples
///
/// ```
/// # use tensile::particle::InitialPosition;
/// let pinned = InitialPosition::at(10.0, 20.0);
/// assert_eq!(pinned.x(), Some(10.0));
///
/// let half = InitialPosition::new(Some(f32::NAN), Some(3.0));
/// assert_eq!(half.x(), None);
/// assert_eq!(half.y(), Some(3.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InitialPosition {
    x: Option<f32>,
    y: Option<f32>,
}

impl InitialPosition {
    /// Creates initial coordinates, discarding non-finite values
    pub fn new(x: Option<f32>, y: Option<f32>) -> Self {
        Self {
            x: x.filter(|v| v.is_finite()),
            y: y.filter(|v| v.is_finite()),
        }
    }

    /// Both axes given
    pub fn at(x: f32, y: f32) -> Self {
        Self::new(Some(x), Some(y))
    }

    /// Neither axis given, the particle will be placed randomly
    pub fn unspecified() -> Self {
        Self::default()
    }

    /// Returns the x-coordinate if it was given
    pub fn x(&self) -> Option<f32> {
        self.x
    }

    /// Returns the y-coordinate if it was given
    pub fn y(&self) -> Option<f32> {
        self.y
    }

    /// Resolves missing axes with independent uniform draws from `[0, 1)`
    pub fn resolve<R>(&self, rng: &mut R) -> Point
    where
        R: Rng,
    {
        let x = self.x().unwrap_or_else(|| rng.random::<f32>());
        let y = self.y().unwrap_or_else(|| rng.random::<f32>());
        Point::new(x, y)
    }
}

/// A node's simulated physical point: position plus velocity accumulator
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    position: Point,
    velocity: Point,
}

impl Particle {
    /// Creates a particle from initial coordinates, randomizing missing axes
    pub fn new<R>(initial: InitialPosition, rng: &mut R) -> Self
    where
        R: Rng,
    {
        Self::at(initial.resolve(rng))
    }

    /// Creates a resting particle at an exact position
    pub fn at(position: Point) -> Self {
        Self {
            position,
            velocity: Point::default(),
        }
    }

    /// Current position
    pub fn position(&self) -> Point {
        self.position
    }

    /// Velocity accumulated so far in the current step
    pub fn velocity(&self) -> Point {
        self.velocity
    }

    /// Adds a velocity contribution from one node pair
    pub(crate) fn accelerate(&mut self, delta: Point) {
        self.velocity = self.velocity.add_point(delta);
    }

    /// Moves by the accumulated velocity, clamped to `limit` on each axis, and
    /// resets the accumulator.
    ///
    /// Returns the displacement that was applied.
    pub(crate) fn integrate(&mut self, limit: f32) -> Point {
        let displacement = self.velocity.clamp_axes(limit);
        self.position = self.position.add_point(displacement);
        self.velocity = Point::default();
        displacement
    }
}
