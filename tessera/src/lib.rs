//! Tiling of geographic data.
//!
//! This crate decides which parts of a map a set of geometries covers. It contains:
//!
//! * [`GeoBoundingBoxCalculator`] - minimal bounding boxes over axes that wrap around, so that a set of points on
//!   both sides of the antimeridian is framed by a narrow box through the antimeridian instead of a box covering
//!   the whole world,
//! * [`tiles`] and [`QuadKey`] - addressing of tiles in a quad tree and enumeration of the tiles covering a
//!   rectangle.
//!
//! Geometries usually come from a TWKB buffer, decoded by [`twkb`]. Primitive types are re-exported as [`types`].
//!
//! ```
//! use tessera::tiles::calculate_quad_keys;
//! use tessera::twkb::TwkbDecoder;
//! use tessera::types::geo::GeoRectangle;
//! use tessera::types::LonLat;
//! use tessera::GeoBoundingBoxCalculator;
//!
//! // Multi point (97, -41), (-92, 62).
//! let bytes = [0x04, 0x00, 0x02, 0xc2, 0x01, 0x51, 0xf9, 0x02, 0xce, 0x01];
//! let geometries = TwkbDecoder::new().decode_geometries::<LonLat, _>(&bytes[..])?;
//!
//! let bbox = GeoBoundingBoxCalculator::lon_lat().for_geometries(&geometries)?;
//! let bbox = GeoRectangle::from_rect(&bbox)?;
//! assert_eq!(bbox.min_longitude(), 97.0);
//! assert_eq!(bbox.max_longitude(), -92.0);
//!
//! let mut keys = vec![];
//! for part in bbox.split_by_anti_meridian() {
//!     keys.extend(calculate_quad_keys(&part, 1)?);
//! }
//! keys.sort();
//! assert_eq!(keys.iter().map(|key| key.key()).collect::<Vec<_>>(), ["0", "1", "2", "3"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod bounding_box;
pub mod error;
mod quad_key;
pub mod tiles;

pub use bounding_box::GeoBoundingBoxCalculator;
pub use error::TilingError;
pub use quad_key::QuadKey;
pub use tessera_twkb as twkb;
pub use tessera_types as types;
