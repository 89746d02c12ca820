//! Geographic coordinates: longitude wrap-around, geographic rectangles and Web-Mercator helpers.

mod longitude;
pub mod mercator;
mod rectangle;

pub use longitude::LongitudeSegment;
pub use rectangle::GeoRectangle;

use crate::rect::Rect;
use crate::space::LonLat;
use crate::span::Span;

/// Western edge of the longitude domain.
pub const MIN_LONGITUDE: f64 = -180.0;
/// Eastern edge of the longitude domain.
pub const MAX_LONGITUDE: f64 = 180.0;
/// Width of the longitude domain.
pub const FULL_LONGITUDE: f64 = MAX_LONGITUDE - MIN_LONGITUDE;
/// Southern edge of the latitude domain.
pub const MIN_LATITUDE: f64 = -90.0;
/// Northern edge of the latitude domain.
pub const MAX_LATITUDE: f64 = 90.0;
/// Height of the latitude domain.
pub const FULL_LATITUDE: f64 = MAX_LATITUDE - MIN_LATITUDE;

/// Equatorial radius of the WGS84 ellipsoid in meters.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// The whole surface of the Earth in geographic coordinates.
pub const EARTH_RECT: Rect<LonLat> =
    Rect::from_xywh(MIN_LONGITUDE, MIN_LATITUDE, FULL_LONGITUDE, FULL_LATITUDE);

/// Longitude domain `[-180, 180]`.
pub const LONGITUDE_SPAN: Span = Span::new_unchecked(MIN_LONGITUDE, MAX_LONGITUDE);

/// Clamps a longitude into `[-180, 180]`.
pub fn limit_lon(lon: f64) -> f64 {
    lon.clamp(MIN_LONGITUDE, MAX_LONGITUDE)
}

/// Clamps a latitude into `[-90, 90]`.
pub fn limit_lat(lat: f64) -> f64 {
    lat.clamp(MIN_LATITUDE, MAX_LATITUDE)
}

/// Brings any longitude into `[-180, 180)` by adding or subtracting full turns.
pub fn normalize_lon(lon: f64) -> f64 {
    lon - ((lon - MIN_LONGITUDE) / FULL_LONGITUDE).floor() * FULL_LONGITUDE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits() {
        assert_eq!(limit_lon(200.0), 180.0);
        assert_eq!(limit_lon(-200.0), -180.0);
        assert_eq!(limit_lon(12.5), 12.5);
        assert_eq!(limit_lat(100.0), 90.0);
        assert_eq!(limit_lat(-91.0), -90.0);
    }

    #[test]
    fn normalization() {
        assert_eq!(normalize_lon(0.0), 0.0);
        assert_eq!(normalize_lon(190.0), -170.0);
        assert_eq!(normalize_lon(-190.0), 170.0);
        assert_eq!(normalize_lon(-263.0), 97.0);
        assert_eq!(normalize_lon(540.0), -180.0);
        assert_eq!(normalize_lon(180.0), -180.0);
        assert_eq!(normalize_lon(-180.0), -180.0);
    }

    #[test]
    fn earth_rect() {
        assert_eq!(EARTH_RECT.x_range(), LONGITUDE_SPAN);
        assert_eq!(EARTH_RECT.bottom(), MAX_LATITUDE);
    }
}
