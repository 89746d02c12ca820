//! Reader of the [TWKB](https://github.com/TWKB/Specification/blob/master/twkb.md) (Tiny Well-Known Binary)
//! geometry format.
//!
//! The decoder is push-based: it reads records from a [`bytes::Buf`] and hands every decoded geometry to a
//! [`GeometryConsumer`]. Use [`GeometryCollector`] to simply get a list of [`Geometry`](tessera_types::geometry::Geometry)
//! values.
//!
//! Coordinates are returned in the coordinate space chosen by the caller (usually
//! [`LonLat`](tessera_types::LonLat) for data produced by PostGIS `ST_AsTWKB`, or
//! [`Untyped`](tessera_types::Untyped) if the meaning is not known). Z and M values, bounding boxes and id lists are
//! read but not reported.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

mod buffer;
mod collector;
mod consumer;
mod decoder;
pub mod error;
mod parser;

pub use collector::GeometryCollector;
pub use consumer::{GeometryConsumer, GeometryType};
pub use decoder::{parse, DecoderOptions, MemberErrorPolicy, TwkbDecoder};
pub use error::TwkbError;
