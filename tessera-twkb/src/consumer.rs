use serde::{Deserialize, Serialize};
use tessera_types::geometry::{LineString, MultiLineString, MultiPoint, MultiPolygon, Polygon};
use tessera_types::Vec2;

use crate::error::TwkbError;

/// Geometry type code of a TWKB record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryType {
    /// Single point.
    Point = 1,
    /// Single line string.
    LineString = 2,
    /// Single polygon.
    Polygon = 3,
    /// Set of points.
    MultiPoint = 4,
    /// Set of line strings.
    MultiLineString = 5,
    /// Set of polygons.
    MultiPolygon = 6,
    /// Set of nested TWKB records.
    Collection = 7,
}

impl TryFrom<u8> for GeometryType {
    type Error = TwkbError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Self::Point,
            2 => Self::LineString,
            3 => Self::Polygon,
            4 => Self::MultiPoint,
            5 => Self::MultiLineString,
            6 => Self::MultiPolygon,
            7 => Self::Collection,
            _ => return Err(TwkbError::UnknownGeometryType(value)),
        })
    }
}

/// Receiver of decoded geometries.
///
/// The decoder pushes every geometry into the consumer as soon as the TWKB record containing it is fully decoded.
/// Members of a geometry collection are pushed one by one. A multi-geometry that carries an id list is pushed member
/// by member as well (`on_point`, `on_line_string`, `on_polygon`), since every member is a separate feature in this
/// case.
pub trait GeometryConsumer<S> {
    /// Single point.
    fn on_point(&mut self, point: Vec2<S>);
    /// Single line string.
    fn on_line_string(&mut self, line_string: LineString<S>);
    /// Single polygon.
    fn on_polygon(&mut self, polygon: Polygon<S>);
    /// Multi point without id list.
    fn on_multi_point(&mut self, multi_point: MultiPoint<S>);
    /// Multi line string without id list.
    fn on_multi_line_string(&mut self, multi_line_string: MultiLineString<S>);
    /// Multi polygon without id list.
    fn on_multi_polygon(&mut self, multi_polygon: MultiPolygon<S>);

    /// Top-level record marked as empty. Empty members of collections are not reported.
    fn on_empty(&mut self, _geometry_type: GeometryType) {}
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn type_codes() {
        for code in 1..=7u8 {
            let geometry_type = GeometryType::try_from(code).unwrap();
            assert_eq!(geometry_type as u8, code);
        }

        assert_matches!(
            GeometryType::try_from(0),
            Err(TwkbError::UnknownGeometryType(0))
        );
        assert_matches!(
            GeometryType::try_from(8),
            Err(TwkbError::UnknownGeometryType(8))
        );
    }
}
