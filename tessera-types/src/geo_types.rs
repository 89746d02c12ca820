use crate::geometry::{
    Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Polygon, Ring,
};
use crate::vec::Vec2;

impl<S> From<Vec2<S>> for geo_types::Coord<f64> {
    fn from(value: Vec2<S>) -> Self {
        geo_types::coord! { x: value.x(), y: value.y() }
    }
}

impl<S> From<Vec2<S>> for geo_types::Point<f64> {
    fn from(value: Vec2<S>) -> Self {
        geo_types::Point::new(value.x(), value.y())
    }
}

impl<S> From<LineString<S>> for geo_types::LineString<f64> {
    fn from(value: LineString<S>) -> Self {
        value.into_points().into_iter().map(geo_types::Coord::from).collect()
    }
}

impl<S> From<Ring<S>> for geo_types::LineString<f64> {
    fn from(value: Ring<S>) -> Self {
        value.into_points().into_iter().map(geo_types::Coord::from).collect()
    }
}

impl<S> From<Polygon<S>> for geo_types::Polygon<f64> {
    fn from(value: Polygon<S>) -> Self {
        let mut rings = value.into_rings().into_iter().map(geo_types::LineString::from);
        let exterior = rings.next().unwrap_or_else(|| geo_types::LineString::new(vec![]));
        geo_types::Polygon::new(exterior, rings.collect())
    }
}

impl<S> From<MultiPoint<S>> for geo_types::MultiPoint<f64> {
    fn from(value: MultiPoint<S>) -> Self {
        geo_types::MultiPoint::new(
            value
                .into_points()
                .into_iter()
                .map(geo_types::Point::from)
                .collect(),
        )
    }
}

impl<S> From<MultiLineString<S>> for geo_types::MultiLineString<f64> {
    fn from(value: MultiLineString<S>) -> Self {
        geo_types::MultiLineString::new(
            value
                .into_parts()
                .into_iter()
                .map(geo_types::LineString::from)
                .collect(),
        )
    }
}

impl<S> From<MultiPolygon<S>> for geo_types::MultiPolygon<f64> {
    fn from(value: MultiPolygon<S>) -> Self {
        geo_types::MultiPolygon::new(
            value
                .into_parts()
                .into_iter()
                .map(geo_types::Polygon::from)
                .collect(),
        )
    }
}

impl<S> From<Geometry<S>> for geo_types::Geometry<f64> {
    fn from(value: Geometry<S>) -> Self {
        match value {
            Geometry::MultiPoint(geom) => geo_types::Geometry::MultiPoint(geom.into()),
            Geometry::MultiLineString(geom) => geo_types::Geometry::MultiLineString(geom.into()),
            Geometry::MultiPolygon(geom) => geo_types::Geometry::MultiPolygon(geom.into()),
        }
    }
}
