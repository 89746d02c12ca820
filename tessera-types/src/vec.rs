use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::ops::{Add, Div, Mul, Neg, Sub};

use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

/// A point (or a vector) in the 2-dimensional coordinate space `S`.
///
/// Arithmetic is only defined between values of the same space:
///
/// ```
/// use tessera_types::{LonLat, Vec2};
///
/// let a = Vec2::<LonLat>::new(10.0, 20.0);
/// let b = Vec2::<LonLat>::new(1.0, 2.0);
/// assert_eq!(a - b, Vec2::new(9.0, 18.0));
/// ```
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Vec2<S> {
    x: f64,
    y: f64,
    #[serde(skip)]
    space: PhantomData<S>,
}

impl<S> Vec2<S> {
    /// Creates a new vector with the given coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            space: PhantomData,
        }
    }

    /// X coordinate.
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Y coordinate.
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Returns a copy of the vector with `x` replaced.
    pub const fn with_x(&self, x: f64) -> Self {
        Self::new(x, self.y)
    }

    /// Returns a copy of the vector with `y` replaced.
    pub const fn with_y(&self, y: f64) -> Self {
        Self::new(self.x, y)
    }

    /// Returns `true` if neither of the coordinates is `NaN` or infinite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl<S> Clone for Vec2<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Vec2<S> {}

impl<S> Default for Vec2<S> {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl<S> PartialEq for Vec2<S> {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl<S> Debug for Vec2<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vec2")
            .field("x", &self.x)
            .field("y", &self.y)
            .finish()
    }
}

impl<S> Add for Vec2<S> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<S> Sub for Vec2<S> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<S> Mul<f64> for Vec2<S> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl<S> Div<f64> for Vec2<S> {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl<S> Neg for Vec2<S> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

impl<S> AbsDiffEq for Vec2<S> {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}
