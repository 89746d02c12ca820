//! Strongly typed primitives for geographic tiling.
//!
//! Every coordinate carries the space it belongs to as a zero-sized marker type (see [`space`]). A
//! [`Vec2<LonLat>`](Vec2) and a [`Vec2<World>`](Vec2) cannot be added together, and a bounding box computed over
//! geographic coordinates stays a `Rect<LonLat>` until it is explicitly projected.
//!
//! The crate contains:
//!
//! * [`Vec2`] and [`Rect`] - the basic 2d point/vector and axis-aligned rectangle,
//! * [`Span`] and [`Segment`] - closed intervals and directional pairs that may wrap around a cyclic axis,
//! * [`geo`] - longitude handling around the antimeridian, [`GeoRectangle`](geo::GeoRectangle) and Web-Mercator
//!   helper math,
//! * [`geometry`] - decoded geometry model ([`LineString`](geometry::LineString), [`Polygon`](geometry::Polygon),
//!   multi-geometries and the [`Geometry`](geometry::Geometry) sum type).

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod error;
pub mod geo;
pub mod geometry;
mod rect;
pub mod space;
mod span;
mod vec;

#[cfg(feature = "geo-types")]
mod geo_types;

pub use error::TypesError;
pub use rect::Rect;
pub use space::{Client, LonLat, Space, Untyped, World};
pub use span::{Segment, Span, SplitSpans};
pub use vec::Vec2;
