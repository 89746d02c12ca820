//! Web-Mercator (EPSG:3857) helper math.
//!
//! Only the spherical forward and inverse formulas are provided, arbitrary projections are out of the scope of this
//! crate.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use super::{limit_lon, EARTH_RADIUS};
use crate::rect::Rect;
use crate::space::{LonLat, World};
use crate::vec::Vec2;

/// Latitude at which the Web-Mercator world becomes a square.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_779_806_59;

/// Half of the Web-Mercator world width in meters.
pub const MERCATOR_HALF_WIDTH: f64 = EARTH_RADIUS * std::f64::consts::PI;

/// The whole Web-Mercator world.
pub const MERCATOR_RECT: Rect<World> = Rect::from_xywh(
    -MERCATOR_HALF_WIDTH,
    -MERCATOR_HALF_WIDTH,
    2.0 * MERCATOR_HALF_WIDTH,
    2.0 * MERCATOR_HALF_WIDTH,
);

/// Projected `x` of the given longitude (degrees).
pub fn mercator_x(lon: f64) -> f64 {
    EARTH_RADIUS * limit_lon(lon).to_radians()
}

/// Projected `y` of the given latitude (degrees). Latitudes beyond [`MAX_MERCATOR_LATITUDE`] are clamped.
pub fn mercator_y(lat: f64) -> f64 {
    let lat = lat.clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE);
    EARTH_RADIUS * (FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln()
}

/// Longitude (degrees) of the projected `x`.
pub fn inverse_mercator_x(x: f64) -> f64 {
    (x / EARTH_RADIUS).to_degrees()
}

/// Latitude (degrees) of the projected `y`.
pub fn inverse_mercator_y(y: f64) -> f64 {
    (2.0 * (y / EARTH_RADIUS).exp().atan() - FRAC_PI_2).to_degrees()
}

/// Projects a geographic point into Web-Mercator meters.
pub fn project(point: Vec2<LonLat>) -> Vec2<World> {
    Vec2::<World>::new(mercator_x(point.x()), mercator_y(point.y()))
}

/// Converts a Web-Mercator point back into geographic coordinates.
pub fn unproject(point: Vec2<World>) -> Vec2<LonLat> {
    Vec2::<LonLat>::new(inverse_mercator_x(point.x()), inverse_mercator_y(point.y()))
}

/// Projects a geographic rectangle by its corners.
pub fn project_rect(rect: &Rect<LonLat>) -> Rect<World> {
    let min = project(rect.origin());
    let max = project(rect.origin() + rect.dimension());
    Rect::new(min, max - min)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::geo::EARTH_RECT;

    #[test]
    fn projects_known_points() {
        assert_abs_diff_eq!(
            project(Vec2::new(0.0, 0.0)),
            Vec2::new(0.0, 0.0),
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            project(Vec2::new(180.0, MAX_MERCATOR_LATITUDE)),
            Vec2::new(MERCATOR_HALF_WIDTH, MERCATOR_HALF_WIDTH),
            epsilon = 1e-3
        );
        assert_abs_diff_eq!(mercator_x(-180.0), -20037508.342789244, epsilon = 1e-6);
    }

    #[test]
    fn round_trip() {
        for (lon, lat) in [(37.6, 55.75), (-71.06, 42.29), (151.2, -33.87), (0.0, 0.0)] {
            let point = Vec2::<LonLat>::new(lon, lat);
            assert_abs_diff_eq!(unproject(project(point)), point, epsilon = 1e-9);
        }
    }

    #[test]
    fn projection_changes_space() {
        let moscow = Vec2::<LonLat>::new(37.6, 55.75);
        let projected: Vec2<World> = project(moscow);
        assert_eq!(projected, Vec2::<World>::new(mercator_x(37.6), mercator_y(55.75)));

        let unprojected: Vec2<LonLat> = unproject(projected);
        assert_abs_diff_eq!(unprojected, moscow, epsilon = 1e-9);
    }

    #[test]
    fn polar_latitudes_are_clamped() {
        assert_abs_diff_eq!(mercator_y(90.0), mercator_y(MAX_MERCATOR_LATITUDE), epsilon = 1e-9);
        assert!(mercator_y(-90.0).is_finite());
    }

    #[test]
    fn whole_earth_is_the_mercator_square() {
        let rect = project_rect(&EARTH_RECT);
        assert_abs_diff_eq!(rect.left(), MERCATOR_RECT.left(), epsilon = 1e-3);
        assert_abs_diff_eq!(rect.top(), MERCATOR_RECT.top(), epsilon = 1e-3);
        assert_abs_diff_eq!(rect.width(), MERCATOR_RECT.width(), epsilon = 1e-3);
        assert_abs_diff_eq!(rect.height(), MERCATOR_RECT.height(), epsilon = 1e-3);
    }
}
