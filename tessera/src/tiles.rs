//! Quad-tree tile addressing.
//!
//! A tile at zoom level `z` is addressed by a string of `z` base-4 digits, one digit per level, the coarsest level
//! first. At every level the digit tells which quarter of the parent tile the child occupies: `0` for the
//! left-top quarter, `1` for right-top, `2` for left-bottom and `3` for right-bottom, where "top" is the side with
//! the smaller `y` value.

use std::collections::HashSet;
use std::hash::Hash;

use tessera_types::geo::EARTH_RECT;
use tessera_types::{LonLat, Rect, Space, Span, Vec2};

use crate::error::TilingError;
use crate::quad_key::QuadKey;

/// Maximum zoom level for which tile indices fit into `u32`.
pub const MAX_ZOOM: u32 = 31;

/// Number of tiles along each axis at the zoom level: `2^zoom`.
pub fn tile_count(zoom: u32) -> Result<u32, TilingError> {
    check_zoom(zoom)?;
    Ok(1 << zoom)
}

fn check_zoom(zoom: u32) -> Result<(), TilingError> {
    if zoom > MAX_ZOOM {
        return Err(TilingError::Precondition(format!(
            "zoom level {zoom} is greater than the maximum of {MAX_ZOOM}"
        )));
    }

    Ok(())
}

/// Index of the tile containing `value`, when `range` is divided into `tile_count` equal tiles.
///
/// Values outside of the range are clamped to the first or the last tile.
pub fn calc_tile_num(value: f64, range: Span, tile_count: u32) -> Result<u32, TilingError> {
    if range.length() == 0.0 {
        return Err(TilingError::Precondition(format!(
            "cannot divide degenerate range [{}, {}] into tiles",
            range.lower(),
            range.upper()
        )));
    }
    if tile_count == 0 {
        return Err(TilingError::Precondition("tile count must be positive".into()));
    }

    let position = ((value - range.lower()) / range.length() * f64::from(tile_count)).floor();
    Ok(position.clamp(0.0, f64::from(tile_count - 1)) as u32)
}

/// Quad key of the tile with the given indices.
///
/// Bit `i - 1` of `x` adds `1` and bit `i - 1` of `y` adds `2` to the digit of the level `zoom - i + 1`. Both
/// indices must be less than [`tile_count`] of the zoom level.
pub fn tile_xy_to_tile_id(x: u32, y: u32, zoom: u32) -> Result<String, TilingError> {
    let tile_count = u64::from(tile_count(zoom)?);
    if u64::from(x) >= tile_count || u64::from(y) >= tile_count {
        return Err(TilingError::Precondition(format!(
            "tile ({x}, {y}) is outside of the {tile_count}x{tile_count} grid of zoom level {zoom}"
        )));
    }

    Ok((1..=zoom)
        .rev()
        .map(|level| {
            let mask = 1u32 << (level - 1);
            let mut digit = b'0';
            if x & mask != 0 {
                digit += 1;
            }
            if y & mask != 0 {
                digit += 2;
            }
            char::from(digit)
        })
        .collect())
}

/// Keys of all the tiles of `map_rect` at the zoom level that intersect `view_rect`.
///
/// The key strings are converted into the key type with `constructor`.
pub fn calculate_tile_keys<S, K, F>(
    map_rect: &Rect<S>,
    view_rect: &Rect<S>,
    zoom: u32,
    constructor: F,
) -> Result<HashSet<K>, TilingError>
where
    S: Space,
    K: Eq + Hash,
    F: Fn(String) -> K,
{
    let tile_count = tile_count(zoom)?;
    let x_range = map_rect.x_range();
    let y_range = map_rect.y_range();

    let x_min = calc_tile_num(view_rect.left(), x_range, tile_count)?;
    let x_max = calc_tile_num(view_rect.right(), x_range, tile_count)?;
    let y_min = calc_tile_num(view_rect.top(), y_range, tile_count)?;
    let y_max = calc_tile_num(view_rect.bottom(), y_range, tile_count)?;

    let mut keys = HashSet::new();
    for x in x_min..=x_max {
        for y in y_min..=y_max {
            keys.insert(constructor(tile_xy_to_tile_id(x, y, zoom)?));
        }
    }

    log::debug!(
        "Calculated {} tile keys at zoom {zoom}: x {x_min}..={x_max}, y {y_min}..={y_max}",
        keys.len()
    );

    Ok(keys)
}

/// Left-top corner of the tile inside `map_rect`.
pub fn tile_origin<S: Space>(map_rect: &Rect<S>, key: &str) -> Result<Vec2<S>, TilingError> {
    let mut left = map_rect.left();
    let mut top = map_rect.top();
    let mut width = map_rect.width();
    let mut height = map_rect.height();

    for digit in key.chars() {
        width /= 2.0;
        height /= 2.0;

        match digit {
            '0' => {}
            '1' => left += width,
            '2' => top += height,
            '3' => {
                left += width;
                top += height;
            }
            _ => return Err(TilingError::InvalidQuadKey(key.to_string())),
        }
    }

    Ok(Vec2::new(left, top))
}

/// Area of the tile inside `map_rect`.
pub fn tile_rect<S: Space>(map_rect: &Rect<S>, key: &str) -> Result<Rect<S>, TilingError> {
    let origin = tile_origin(map_rect, key)?;
    let scale = (0..key.len()).fold(1.0, |scale, _| scale * 2.0);

    Ok(Rect::new(origin, map_rect.dimension() / scale))
}

/// Geographic rectangle of the tile.
///
/// Tiles are addressed from the north, so the tile with key `"0"` covers the north-western quarter of the Earth.
pub fn quad_key_rect(key: &QuadKey<LonLat>) -> Result<Rect<LonLat>, TilingError> {
    let tile = tile_rect(&EARTH_RECT, key.key())?;
    let top = EARTH_RECT.bottom() - (tile.bottom() - EARTH_RECT.top());

    Ok(Rect::new(tile.origin().with_y(top), tile.dimension()))
}

/// Keys of all the tiles at the zoom level that intersect the geographic rectangle.
///
/// Quad keys have at least one digit, so `zoom` must be at least 1.
pub fn calculate_quad_keys(
    rect: &Rect<LonLat>,
    zoom: u32,
) -> Result<HashSet<QuadKey<LonLat>>, TilingError> {
    if zoom == 0 {
        return Err(TilingError::Precondition(
            "quad keys start at zoom level 1".into(),
        ));
    }

    calculate_tile_keys(&EARTH_RECT, &rect.flip_y(), zoom, QuadKey::from_valid)
}
