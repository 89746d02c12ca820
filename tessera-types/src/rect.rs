use std::fmt::{Debug, Formatter};

use serde::{Deserialize, Serialize};

use crate::span::Span;
use crate::vec::Vec2;

/// Axis aligned rectangle in the coordinate space `S`, defined by its origin and dimension.
///
/// `top` is the side with the smaller `y` value, `bottom` the side with the larger one. For geographic rectangles
/// this means that `top` is the southern edge.
///
/// Rectangles produced by a bounding box calculation over a cyclic axis may extend past the domain boundary (e.g.
/// `left = -263, width = 171` for a box spanning the antimeridian). Use the accessors rather than comparing the raw
/// fields of two rectangles.
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Rect<S> {
    origin: Vec2<S>,
    dimension: Vec2<S>,
}

impl<S> Rect<S> {
    /// Creates a new rectangle.
    pub const fn new(origin: Vec2<S>, dimension: Vec2<S>) -> Self {
        Self { origin, dimension }
    }

    /// Creates a new rectangle from the origin coordinates, width and height.
    pub const fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Vec2::new(x, y),
            dimension: Vec2::new(width, height),
        }
    }

    /// Creates a new rectangle from its sides.
    pub fn from_ltrb(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::from_xywh(left, top, right - left, bottom - top)
    }

    /// Creates a rectangle from the ranges it covers on each axis.
    pub fn from_ranges(x_range: Span, y_range: Span) -> Self {
        Self::from_xywh(
            x_range.lower(),
            y_range.lower(),
            x_range.length(),
            y_range.length(),
        )
    }

    /// Origin (left-top corner) of the rectangle.
    pub const fn origin(&self) -> Vec2<S> {
        self.origin
    }

    /// Width and height of the rectangle as a vector.
    pub const fn dimension(&self) -> Vec2<S> {
        self.dimension
    }

    /// Minimum x.
    pub const fn left(&self) -> f64 {
        self.origin.x()
    }

    /// Maximum x.
    pub fn right(&self) -> f64 {
        self.origin.x() + self.dimension.x()
    }

    /// Minimum y.
    pub const fn top(&self) -> f64 {
        self.origin.y()
    }

    /// Maximum y.
    pub fn bottom(&self) -> f64 {
        self.origin.y() + self.dimension.y()
    }

    /// Width.
    pub const fn width(&self) -> f64 {
        self.dimension.x()
    }

    /// Height.
    pub const fn height(&self) -> f64 {
        self.dimension.y()
    }

    /// Range covered on the x axis.
    pub fn x_range(&self) -> Span {
        Span::from_unordered(self.left(), self.right())
    }

    /// Range covered on the y axis.
    pub fn y_range(&self) -> Span {
        Span::from_unordered(self.top(), self.bottom())
    }

    /// Center point.
    pub fn center(&self) -> Vec2<S> {
        self.origin + self.dimension / 2.0
    }

    /// Returns true if the point is inside the rectangle (borders included).
    pub fn contains(&self, point: &Vec2<S>) -> bool {
        self.x_range().contains(point.x()) && self.y_range().contains(point.y())
    }

    /// Returns a rectangle with the same size mirrored over the `x` axis (`y -> -y`).
    pub fn flip_y(&self) -> Self {
        Self::from_xywh(self.left(), -self.bottom(), self.width(), self.height())
    }
}

impl<S> Clone for Rect<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Rect<S> {}

impl<S> PartialEq for Rect<S> {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin && self.dimension == other.dimension
    }
}

impl<S> Debug for Rect<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rect")
            .field("left", &self.left())
            .field("top", &self.top())
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LonLat;

    #[test]
    fn sides() {
        let rect = Rect::<LonLat>::from_xywh(-180.0, -90.0, 360.0, 180.0);
        assert_eq!(rect.left(), -180.0);
        assert_eq!(rect.right(), 180.0);
        assert_eq!(rect.top(), -90.0);
        assert_eq!(rect.bottom(), 90.0);
        assert_eq!(rect.center(), Vec2::new(0.0, 0.0));
        assert_eq!(rect.x_range(), Span::new(-180.0, 180.0).unwrap());
        assert_eq!(rect.y_range(), Span::new(-90.0, 90.0).unwrap());
    }

    #[test]
    fn ltrb_and_ranges() {
        let rect = Rect::<LonLat>::from_ltrb(10.0, 20.0, 30.0, 60.0);
        assert_eq!(rect, Rect::from_xywh(10.0, 20.0, 20.0, 40.0));
        assert_eq!(
            Rect::<LonLat>::from_ranges(rect.x_range(), rect.y_range()),
            rect
        );
    }

    #[test]
    fn contains_point() {
        let rect = Rect::<LonLat>::from_xywh(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(&Vec2::new(0.0, 10.0)));
        assert!(rect.contains(&Vec2::new(5.0, 5.0)));
        assert!(!rect.contains(&Vec2::new(-0.1, 5.0)));
    }

    #[test]
    fn flip() {
        let rect = Rect::<LonLat>::from_xywh(10.0, 20.0, 5.0, 30.0);
        assert_eq!(rect.flip_y(), Rect::from_xywh(10.0, -50.0, 5.0, 30.0));
        assert_eq!(rect.flip_y().flip_y(), rect);
    }
}
