use serde::{Deserialize, Serialize};

use super::{
    limit_lat, normalize_lon, LongitudeSegment, FULL_LONGITUDE, MAX_LONGITUDE, MIN_LONGITUDE,
};
use crate::error::TypesError;
use crate::rect::Rect;
use crate::space::LonLat;
use crate::span::Span;

/// Rectangle on the surface of the Earth.
///
/// Longitude range may cross the antimeridian (`min_longitude > max_longitude`), latitude range may not.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRectangle {
    longitude: LongitudeSegment,
    latitude: Span,
}

impl GeoRectangle {
    /// Creates a new rectangle.
    ///
    /// Longitudes are clamped into `[-180, 180]`. Returns [`TypesError::Configuration`] if
    /// `min_latitude > max_latitude`.
    pub fn new(
        min_longitude: f64,
        min_latitude: f64,
        max_longitude: f64,
        max_latitude: f64,
    ) -> Result<Self, TypesError> {
        let latitude = Span::new(min_latitude, max_latitude).map_err(|_| {
            TypesError::Configuration(format!(
                "invalid latitude range: [{min_latitude}..{max_latitude}]"
            ))
        })?;

        Ok(Self {
            longitude: LongitudeSegment::new(min_longitude, max_longitude),
            latitude,
        })
    }

    /// Converts a rectangle in geographic coordinates into a `GeoRectangle`.
    ///
    /// The rectangle may extend past the antimeridian (as bounding boxes spanning it do), both of its longitude
    /// edges are normalized into the longitude domain. A rectangle at least 360 degrees wide covers all
    /// longitudes. Latitudes are clamped.
    pub fn from_rect(rect: &Rect<LonLat>) -> Result<Self, TypesError> {
        let (min_longitude, max_longitude) = if rect.width() >= FULL_LONGITUDE {
            (MIN_LONGITUDE, MAX_LONGITUDE)
        } else {
            let max_longitude = match normalize_lon(rect.right()) {
                lon if lon == MIN_LONGITUDE && rect.width() > 0.0 => MAX_LONGITUDE,
                lon => lon,
            };
            (normalize_lon(rect.left()), max_longitude)
        };

        Self::new(
            min_longitude,
            limit_lat(rect.top()),
            max_longitude,
            limit_lat(rect.bottom()),
        )
    }

    /// Western edge.
    pub fn min_longitude(&self) -> f64 {
        self.longitude.start()
    }

    /// Eastern edge.
    pub fn max_longitude(&self) -> f64 {
        self.longitude.end()
    }

    /// Southern edge.
    pub fn min_latitude(&self) -> f64 {
        self.latitude.lower()
    }

    /// Northern edge.
    pub fn max_latitude(&self) -> f64 {
        self.latitude.upper()
    }

    /// Longitude range of the rectangle.
    pub fn longitude_segment(&self) -> LongitudeSegment {
        self.longitude
    }

    /// Latitude range of the rectangle.
    pub fn latitude_span(&self) -> Span {
        self.latitude
    }

    /// Returns true if the rectangle is a single point.
    pub fn is_empty(&self) -> bool {
        self.longitude.is_empty() && self.latitude.length() == 0.0
    }

    /// Area in square degrees.
    pub fn area(&self) -> f64 {
        self.longitude.length() * self.latitude.length()
    }

    /// Returns true if `other` is completely inside `self`.
    pub fn encloses(&self, other: &GeoRectangle) -> bool {
        self.longitude.encloses(&other.longitude) && self.latitude.encloses(&other.latitude)
    }

    /// Splits the rectangle by the antimeridian into one or two rectangles that do not cross it.
    pub fn split_by_anti_meridian(&self) -> Vec<Rect<LonLat>> {
        self.longitude
            .split_by_anti_meridian()
            .into_iter()
            .map(|longitude| Rect::from_ranges(longitude, self.latitude))
            .collect()
    }
}
