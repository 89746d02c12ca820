use serde::{Deserialize, Serialize};

use super::{limit_lon, FULL_LONGITUDE, LONGITUDE_SPAN};
use crate::span::{Segment, Span, SplitSpans};

/// Range of longitudes going eastwards from `start` to `end`.
///
/// If `end < start` the range crosses the antimeridian. Both ends are clamped into `[-180, 180]` when the segment is
/// created, out of range values are not rejected.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongitudeSegment {
    start: f64,
    end: f64,
}

impl LongitudeSegment {
    /// Creates a new segment, clamping both ends into the longitude domain.
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start: limit_lon(start),
            end: limit_lon(end),
        }
    }

    /// Western end.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Eastern end.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Returns true if the segment has zero length.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if the segment crosses the antimeridian.
    pub fn crosses_anti_meridian(&self) -> bool {
        self.end < self.start
    }

    /// Length of the segment in degrees, taking the wrap over the antimeridian into account.
    pub fn length(&self) -> f64 {
        let length = self.end - self.start;
        if self.crosses_anti_meridian() {
            length + FULL_LONGITUDE
        } else {
            length
        }
    }

    /// Splits the segment into non-wrapping spans.
    ///
    /// A segment crossing the antimeridian becomes `[start, 180]` and `[-180, end]`, any other segment becomes a
    /// single span `[start, end]`.
    pub fn split_by_anti_meridian(&self) -> SplitSpans {
        Segment::new(self.start, self.end).split(LONGITUDE_SPAN)
    }

    /// Returns true if every part of `other` is covered by a single part of `self`.
    ///
    /// Both segments are split by the antimeridian first. A piece of `other` that is only covered by the union of
    /// two pieces of `self` does not count as enclosed.
    pub fn encloses(&self, other: &LongitudeSegment) -> bool {
        let own = self.split_by_anti_meridian();
        other
            .split_by_anti_meridian()
            .iter()
            .all(|piece| own.iter().any(|span| span.encloses(piece)))
    }

    /// Directional segment with the same ends.
    pub fn as_segment(&self) -> Segment {
        Segment::new(self.start, self.end)
    }
}

impl From<Span> for LongitudeSegment {
    fn from(value: Span) -> Self {
        Self::new(value.lower(), value.upper())
    }
}
