use tessera_types::geometry::{
    Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Polygon,
};
use tessera_types::{Untyped, Vec2};

use crate::consumer::GeometryConsumer;

/// Consumer that stores every decoded geometry as a [`Geometry`].
///
/// Single points, line strings and polygons are promoted into multi-geometries with one member.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCollector<S = Untyped> {
    geometries: Vec<Geometry<S>>,
}

impl<S> GeometryCollector<S> {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self { geometries: vec![] }
    }

    /// Geometries collected so far.
    pub fn geometries(&self) -> &[Geometry<S>] {
        &self.geometries
    }

    /// Consumes the collector and returns the collected geometries.
    pub fn into_geometries(self) -> Vec<Geometry<S>> {
        self.geometries
    }
}

impl<S> Default for GeometryCollector<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> GeometryConsumer<S> for GeometryCollector<S> {
    fn on_point(&mut self, point: Vec2<S>) {
        self.geometries.push(point.into());
    }

    fn on_line_string(&mut self, line_string: LineString<S>) {
        self.geometries.push(line_string.into());
    }

    fn on_polygon(&mut self, polygon: Polygon<S>) {
        self.geometries.push(polygon.into());
    }

    fn on_multi_point(&mut self, multi_point: MultiPoint<S>) {
        self.geometries.push(multi_point.into());
    }

    fn on_multi_line_string(&mut self, multi_line_string: MultiLineString<S>) {
        self.geometries.push(multi_line_string.into());
    }

    fn on_multi_polygon(&mut self, multi_polygon: MultiPolygon<S>) {
        self.geometries.push(multi_polygon.into());
    }
}
