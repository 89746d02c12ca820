use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TilingError;
use crate::tiles::MAX_ZOOM;

/// Key of a tile in the quad tree over a map of the coordinate space `S`.
///
/// The key is a non-empty string of digits `0..=3`, see [`crate::tiles`] for the addressing scheme.
///
/// ```
/// use tessera::QuadKey;
/// use tessera::types::LonLat;
///
/// let key: QuadKey<LonLat> = "0132".parse().unwrap();
/// assert_eq!(key.len(), 4);
/// assert_eq!(key.tile_xy(), (0b0110, 0b0011));
/// assert_eq!(key.parent().unwrap().key(), "013");
/// ```
#[derive(Serialize, Deserialize)]
#[serde(bound = "", try_from = "String", into = "String")]
pub struct QuadKey<S> {
    key: String,
    #[serde(skip)]
    space: PhantomData<S>,
}

impl<S> QuadKey<S> {
    /// Creates a key, checking that it has between 1 and [`MAX_ZOOM`] valid digits.
    pub fn new(key: impl Into<String>) -> Result<Self, TilingError> {
        let key = key.into();
        let is_valid = !key.is_empty()
            && key.len() <= MAX_ZOOM as usize
            && key.bytes().all(|digit| (b'0'..=b'3').contains(&digit));

        if is_valid {
            Ok(Self::from_valid(key))
        } else {
            Err(TilingError::InvalidQuadKey(key))
        }
    }

    pub(crate) fn from_valid(key: String) -> Self {
        Self {
            key,
            space: PhantomData,
        }
    }

    /// Digits of the key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Number of digits, which is the zoom level of the tile in the quad tree.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.key.len()
    }

    /// Zoom level at which the tile is requested.
    ///
    /// Tiles are requested in steps of three levels, so this is [`QuadKey::len`] rounded up to a multiple of 3.
    pub fn zoom(&self) -> usize {
        self.len().saturating_sub(1) / 3 * 3 + 3
    }

    /// Key of the tile one level up, or `None` for a top-level tile.
    pub fn parent(&self) -> Option<Self> {
        if self.len() > 1 {
            Some(Self::from_valid(self.key[..self.len() - 1].to_string()))
        } else {
            None
        }
    }

    /// Keys of the four tiles one level down, or `None` if the tile is at the maximum zoom level.
    pub fn children(&self) -> Option<[Self; 4]> {
        if self.len() >= MAX_ZOOM as usize {
            return None;
        }

        Some(['0', '1', '2', '3'].map(|digit| {
            let mut key = String::with_capacity(self.len() + 1);
            key.push_str(&self.key);
            key.push(digit);
            Self::from_valid(key)
        }))
    }

    /// Indices `(x, y)` of the tile among the tiles of its level.
    pub fn tile_xy(&self) -> (u32, u32) {
        self.key.bytes().fold((0, 0), |(x, y), digit| {
            let digit = u32::from(digit - b'0');
            ((x << 1) | (digit & 1), (y << 1) | (digit >> 1))
        })
    }
}

impl<S> FromStr for QuadKey<S> {
    type Err = TilingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<S> TryFrom<String> for QuadKey<S> {
    type Error = TilingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<S> From<QuadKey<S>> for String {
    fn from(value: QuadKey<S>) -> Self {
        value.key
    }
}

impl<S> Display for QuadKey<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key)
    }
}

impl<S> Debug for QuadKey<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("QuadKey").field(&self.key).finish()
    }
}

impl<S> Clone for QuadKey<S> {
    fn clone(&self) -> Self {
        Self::from_valid(self.key.clone())
    }
}

impl<S> PartialEq for QuadKey<S> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<S> Eq for QuadKey<S> {}

impl<S> PartialOrd for QuadKey<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for QuadKey<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<S> Hash for QuadKey<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use insta::assert_compact_debug_snapshot;
    use tessera_types::LonLat;

    use super::*;
    use crate::tiles::tile_xy_to_tile_id;

    type Key = QuadKey<LonLat>;

    #[test]
    fn validation() {
        assert!(Key::new("0123").is_ok());
        assert_matches!(Key::new(""), Err(TilingError::InvalidQuadKey(_)));
        assert_matches!(Key::new("0124"), Err(TilingError::InvalidQuadKey(_)));
        assert_matches!(Key::new("01 2"), Err(TilingError::InvalidQuadKey(_)));
        assert_matches!(
            Key::new("0".repeat(32)),
            Err(TilingError::InvalidQuadKey(_))
        );
        assert!(Key::new("3".repeat(31)).is_ok());
    }

    #[test]
    fn zoom_is_rounded_up_to_three_levels() {
        let zooms: Vec<usize> = ["0", "01", "012", "0123", "012301", "0123012"]
            .iter()
            .map(|key| Key::new(*key).unwrap().zoom())
            .collect();
        assert_eq!(zooms, vec![3, 3, 3, 6, 6, 9]);
    }

    #[test]
    fn hierarchy() {
        let key = Key::new("21").unwrap();
        assert_eq!(key.parent(), Some(Key::new("2").unwrap()));
        assert_eq!(Key::new("2").unwrap().parent(), None);

        let children = key.children().unwrap();
        assert_compact_debug_snapshot!(children, @r#"[QuadKey("210"), QuadKey("211"), QuadKey("212"), QuadKey("213")]"#);
        assert!(children.iter().all(|child| child.parent().as_ref() == Some(&key)));

        assert!(Key::new("1".repeat(31)).unwrap().children().is_none());
    }

    #[test]
    fn tile_xy_inverts_addressing() {
        for (x, y, zoom) in [(0, 0, 1), (1, 1, 1), (3, 5, 3), (35210, 21493, 16)] {
            let key = Key::new(tile_xy_to_tile_id(x, y, zoom).unwrap()).unwrap();
            assert_eq!(key.tile_xy(), (x, y));
        }
    }

    #[test]
    fn serialization() {
        let key = Key::new("0132").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, r#""0132""#);
        assert_eq!(serde_json::from_str::<Key>(&json).unwrap(), key);
        assert!(serde_json::from_str::<Key>(r#""0182""#).is_err());
        assert_eq!(key.to_string(), "0132");
    }
}
