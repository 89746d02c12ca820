use serde::{Deserialize, Serialize};

use crate::error::TypesError;

/// Closed interval `[lower, upper]` on a real axis with `lower <= upper`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    lower: f64,
    upper: f64,
}

impl Span {
    /// Creates a new span.
    ///
    /// Returns an error if `lower > upper` or if any of the ends is `NaN`. The values are never reordered silently,
    /// use [`Span::from_unordered`] for that.
    pub fn new(lower: f64, upper: f64) -> Result<Self, TypesError> {
        if lower <= upper {
            Ok(Self { lower, upper })
        } else {
            Err(TypesError::Precondition(format!(
                "span lower end {lower} is greater than upper end {upper}"
            )))
        }
    }

    pub(crate) const fn new_unchecked(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Creates a span that contains the single value `v`.
    pub const fn point(v: f64) -> Self {
        Self { lower: v, upper: v }
    }

    /// Creates a span from two ends given in any order.
    ///
    /// Floating point subtraction can flip the order of ends that are supposed to be equal. Operations that
    /// produce ranges from such arithmetic use this constructor instead of [`Span::new`].
    pub fn from_unordered(a: f64, b: f64) -> Self {
        Self {
            lower: a.min(b),
            upper: a.max(b),
        }
    }

    /// Lower end of the span.
    pub const fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper end of the span.
    pub const fn upper(&self) -> f64 {
        self.upper
    }

    /// `upper - lower`.
    pub fn length(&self) -> f64 {
        self.upper - self.lower
    }

    /// Middle point of the span.
    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// Returns true if `v` lies inside the span (ends included).
    pub fn contains(&self, v: f64) -> bool {
        self.lower <= v && v <= self.upper
    }

    /// Returns true if every value of `other` is contained in `self`.
    pub fn encloses(&self, other: &Span) -> bool {
        self.lower <= other.lower && other.upper <= self.upper
    }

    /// Returns true if the spans have at least one common value.
    pub fn intersects(&self, other: &Span) -> bool {
        self.lower <= other.upper && other.lower <= self.upper
    }

    /// Smallest span enclosing both `self` and `other`.
    pub fn union(&self, other: &Span) -> Span {
        Span {
            lower: self.lower.min(other.lower),
            upper: self.upper.max(other.upper),
        }
    }

    /// Common part of two spans, or `None` if they do not intersect.
    pub fn intersection(&self, other: &Span) -> Option<Span> {
        if self.intersects(other) {
            Some(Span {
                lower: self.lower.max(other.lower),
                upper: self.upper.min(other.upper),
            })
        } else {
            None
        }
    }

    /// Moves both ends of the span by `delta`.
    pub fn shift(&self, delta: f64) -> Span {
        Span {
            lower: self.lower + delta,
            upper: self.upper + delta,
        }
    }
}

/// Directional pair of values on an axis.
///
/// Unlike [`Span`], a segment may have `start > end`. On a cyclic axis this means that the segment goes from `start`
/// up to the end of the domain and continues from the beginning of the domain up to `end`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    start: f64,
    end: f64,
}

impl Segment {
    /// Creates a new segment.
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Creates a zero-length segment at `v`.
    pub const fn point(v: f64) -> Self {
        Self { start: v, end: v }
    }

    /// Start value.
    pub const fn start(&self) -> f64 {
        self.start
    }

    /// End value.
    pub const fn end(&self) -> f64 {
        self.end
    }

    /// Returns true if the segment crosses the domain boundary (`end < start`).
    pub fn is_wrapping(&self) -> bool {
        self.end < self.start
    }

    /// Splits the segment at the boundary of the cyclic `domain`.
    ///
    /// A non-wrapping segment produces exactly one span equal to the segment. A wrapping segment produces
    /// `[start, domain.upper]` and `[domain.lower, end]`.
    pub fn split(&self, domain: Span) -> SplitSpans {
        let mut spans = SplitSpans::default();
        self.split_into(domain, |span| spans.push(span));
        spans
    }

    pub(crate) fn split_into(&self, domain: Span, mut out: impl FnMut(Span)) {
        if self.is_wrapping() {
            out(Span::from_unordered(self.start, domain.upper));
            out(Span::from_unordered(domain.lower, self.end));
        } else {
            out(Span {
                lower: self.start,
                upper: self.end,
            });
        }
    }
}

impl From<Span> for Segment {
    fn from(value: Span) -> Self {
        Self::new(value.lower, value.upper)
    }
}

/// Result of splitting a [`Segment`]: one or two non-wrapping spans.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitSpans {
    spans: [Option<Span>; 2],
}

impl SplitSpans {
    fn push(&mut self, span: Span) {
        if self.spans[0].is_none() {
            self.spans[0] = Some(span);
        } else {
            self.spans[1] = Some(span);
        }
    }

    /// Number of spans (1 or 2).
    pub fn len(&self) -> usize {
        self.spans.iter().flatten().count()
    }

    /// Always false; a split produces at least one span.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the spans.
    pub fn iter(&self) -> impl Iterator<Item = &Span> + '_ {
        self.spans.iter().flatten()
    }

    /// Total length of all the spans.
    pub fn total_length(&self) -> f64 {
        self.iter().map(Span::length).sum()
    }
}

impl IntoIterator for SplitSpans {
    type Item = Span;
    type IntoIter = std::iter::Flatten<std::array::IntoIter<Option<Span>, 2>>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.into_iter().flatten()
    }
}
