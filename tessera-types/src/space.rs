//! Coordinate space markers.
//!
//! Markers are zero-sized and only exist on the type level. Generic types of this crate are parameterized by one of
//! them, so values from different spaces cannot be mixed by accident.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// Marker trait implemented by all coordinate spaces.
pub trait Space: Debug + Copy + Default + Send + Sync + 'static {}

/// Geographic coordinates: `x` is longitude, `y` is latitude, both in degrees.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LonLat;

/// Projected coordinates of the whole map (e.g. Web-Mercator meters).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct World;

/// Pixel coordinates of the client (screen) area.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Client;

/// Coordinates with unknown meaning, e.g. freshly decoded from a binary format.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Untyped;

impl Space for LonLat {}
impl Space for World {}
impl Space for Client {}
impl Space for Untyped {}
