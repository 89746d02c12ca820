//! Geometry model produced by decoders and consumed by the bounding-box engine.
//!
//! All types are plain owned containers of [`Vec2`] points. Single line strings and polygons are promoted into the
//! corresponding multi-geometry when converted into [`Geometry`].

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::vec::Vec2;

/// Direction in which the points of a closed ring go around its interior.
///
/// Determined in a coordinate system with `y` growing upwards (as latitude does).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winding {
    /// Clockwise. Zero-area rings also fall here.
    Clockwise,
    /// Counter-clockwise.
    CounterClockwise,
}

/// Open sequence of points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct LineString<S> {
    points: Vec<Vec2<S>>,
}

impl<S> LineString<S> {
    /// Creates a new line string.
    pub fn new(points: Vec<Vec2<S>>) -> Self {
        Self { points }
    }

    /// Consumes the line string and returns its points.
    pub fn into_points(self) -> Vec<Vec2<S>> {
        self.points
    }
}

impl<S> Deref for LineString<S> {
    type Target = Vec<Vec2<S>>;

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl<S> DerefMut for LineString<S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.points
    }
}

impl<S> From<Vec<Vec2<S>>> for LineString<S> {
    fn from(points: Vec<Vec2<S>>) -> Self {
        Self::new(points)
    }
}

/// Closed sequence of points.
///
/// The last point is expected to repeat the first one (as TWKB and most other formats store rings), but this is not
/// enforced. Area calculation closes the ring implicitly if it is not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Ring<S> {
    points: Vec<Vec2<S>>,
}

impl<S> Ring<S> {
    /// Creates a new ring.
    pub fn new(points: Vec<Vec2<S>>) -> Self {
        Self { points }
    }

    /// Consumes the ring and returns its points.
    pub fn into_points(self) -> Vec<Vec2<S>> {
        self.points
    }

    /// Signed area of the ring (shoelace formula). Positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        let Some(first) = self.points.first() else {
            return 0.0;
        };

        let mut prev = first;
        let mut aggr = 0.0;
        for p in self.points.iter().skip(1).chain(std::iter::once(first)) {
            aggr += prev.x() * p.y() - p.x() * prev.y();
            prev = p;
        }

        aggr / 2.0
    }

    /// Winding of the ring.
    pub fn winding(&self) -> Winding {
        if self.signed_area() <= 0.0 {
            Winding::Clockwise
        } else {
            Winding::CounterClockwise
        }
    }
}

impl<S> Deref for Ring<S> {
    type Target = Vec<Vec2<S>>;

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl<S> DerefMut for Ring<S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.points
    }
}

impl<S> From<Vec<Vec2<S>>> for Ring<S> {
    fn from(points: Vec<Vec2<S>>) -> Self {
        Self::new(points)
    }
}

/// Polygon: the first ring is the outer boundary, the rest are holes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Polygon<S> {
    rings: Vec<Ring<S>>,
}

impl<S> Polygon<S> {
    /// Creates a new polygon from its rings.
    pub fn new(rings: Vec<Ring<S>>) -> Self {
        Self { rings }
    }

    /// All rings of the polygon.
    pub fn rings(&self) -> &[Ring<S>] {
        &self.rings
    }

    /// Outer boundary, if the polygon has any rings.
    pub fn outer(&self) -> Option<&Ring<S>> {
        self.rings.first()
    }

    /// Holes of the polygon.
    pub fn holes(&self) -> &[Ring<S>] {
        self.rings.get(1..).unwrap_or_default()
    }

    /// Consumes the polygon and returns its rings.
    pub fn into_rings(self) -> Vec<Ring<S>> {
        self.rings
    }

    /// Iterates over the points of all the rings.
    pub fn iter_points(&self) -> impl Iterator<Item = &Vec2<S>> + '_ {
        self.rings.iter().flat_map(|ring| ring.iter())
    }
}

/// Set of points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MultiPoint<S> {
    points: Vec<Vec2<S>>,
}

impl<S> MultiPoint<S> {
    /// Creates a new multi point.
    pub fn new(points: Vec<Vec2<S>>) -> Self {
        Self { points }
    }

    /// Points of the geometry.
    pub fn points(&self) -> &[Vec2<S>] {
        &self.points
    }

    /// Consumes the geometry and returns its points.
    pub fn into_points(self) -> Vec<Vec2<S>> {
        self.points
    }
}

/// Set of line strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MultiLineString<S> {
    parts: Vec<LineString<S>>,
}

impl<S> MultiLineString<S> {
    /// Creates a new multi line string.
    pub fn new(parts: Vec<LineString<S>>) -> Self {
        Self { parts }
    }

    /// Line strings of the geometry.
    pub fn parts(&self) -> &[LineString<S>] {
        &self.parts
    }

    /// Consumes the geometry and returns its line strings.
    pub fn into_parts(self) -> Vec<LineString<S>> {
        self.parts
    }
}

/// Set of polygons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MultiPolygon<S> {
    parts: Vec<Polygon<S>>,
}

impl<S> MultiPolygon<S> {
    /// Creates a new multi polygon.
    pub fn new(parts: Vec<Polygon<S>>) -> Self {
        Self { parts }
    }

    /// Groups a flat list of rings into polygons by their winding.
    ///
    /// Every counter-clockwise ring starts a new polygon, every clockwise ring is added as a hole to the last started
    /// polygon. Clockwise rings that come before any counter-clockwise one are dropped.
    pub fn from_rings(rings: impl IntoIterator<Item = Ring<S>>) -> Self {
        let mut parts: Vec<Polygon<S>> = vec![];
        for ring in rings {
            match ring.winding() {
                Winding::CounterClockwise => parts.push(Polygon::new(vec![ring])),
                Winding::Clockwise => {
                    if let Some(last) = parts.last_mut() {
                        last.rings.push(ring);
                    }
                }
            }
        }

        Self { parts }
    }

    /// Polygons of the geometry.
    pub fn parts(&self) -> &[Polygon<S>] {
        &self.parts
    }

    /// Consumes the geometry and returns its polygons.
    pub fn into_parts(self) -> Vec<Polygon<S>> {
        self.parts
    }
}

/// Any decoded geometry.
///
/// Single points, line strings and polygons are represented by a multi-geometry with one member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum Geometry<S> {
    /// Points.
    MultiPoint(MultiPoint<S>),
    /// Lines.
    MultiLineString(MultiLineString<S>),
    /// Polygons.
    MultiPolygon(MultiPolygon<S>),
}

impl<S> Geometry<S> {
    /// Iterates over every vertex of the geometry.
    pub fn points(&self) -> Box<dyn Iterator<Item = &Vec2<S>> + '_> {
        match self {
            Geometry::MultiPoint(geom) => Box::new(geom.points.iter()),
            Geometry::MultiLineString(geom) => {
                Box::new(geom.parts.iter().flat_map(|line| line.iter()))
            }
            Geometry::MultiPolygon(geom) => {
                Box::new(geom.parts.iter().flat_map(|polygon| polygon.iter_points()))
            }
        }
    }

    /// Returns true if the geometry has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points().next().is_none()
    }
}

impl<S> From<Vec2<S>> for Geometry<S> {
    fn from(value: Vec2<S>) -> Self {
        Self::MultiPoint(MultiPoint::new(vec![value]))
    }
}

impl<S> From<LineString<S>> for Geometry<S> {
    fn from(value: LineString<S>) -> Self {
        Self::MultiLineString(MultiLineString::new(vec![value]))
    }
}

impl<S> From<Polygon<S>> for Geometry<S> {
    fn from(value: Polygon<S>) -> Self {
        Self::MultiPolygon(MultiPolygon::new(vec![value]))
    }
}

impl<S> From<MultiPoint<S>> for Geometry<S> {
    fn from(value: MultiPoint<S>) -> Self {
        Self::MultiPoint(value)
    }
}

impl<S> From<MultiLineString<S>> for Geometry<S> {
    fn from(value: MultiLineString<S>) -> Self {
        Self::MultiLineString(value)
    }
}

impl<S> From<MultiPolygon<S>> for Geometry<S> {
    fn from(value: MultiPolygon<S>) -> Self {
        Self::MultiPolygon(value)
    }
}
