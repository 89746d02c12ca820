//! Errors of TWKB decoding.

use thiserror::Error;

/// Error returned when a TWKB buffer cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TwkbError {
    /// The buffer ended in the middle of a value.
    #[error("unexpected end of data at byte {offset}")]
    UnexpectedEnd {
        /// Offset of the first missing byte.
        offset: usize,
    },

    /// Variable length integer does not fit into 64 bits.
    #[error("variable length integer at byte {offset} is too long")]
    VarIntOverflow {
        /// Offset of the byte that overflowed.
        offset: usize,
    },

    /// Geometry type code outside of `1..=7`.
    #[error("unknown geometry type: {0}")]
    UnknownGeometryType(u8),

    /// Record declared its size, but its content took a different number of bytes.
    #[error("record declares {declared} bytes, but {consumed} bytes were read")]
    InvalidSize {
        /// Size from the record header.
        declared: usize,
        /// Bytes actually taken by the record content.
        consumed: usize,
    },

    /// Element count that cannot possibly fit into the rest of the buffer.
    #[error("{count} elements cannot fit into the remaining {remaining} bytes")]
    TooManyElements {
        /// Count read from the buffer.
        count: u64,
        /// Bytes left in the buffer.
        remaining: usize,
    },

    /// Geometry collections are nested deeper than the decoder allows.
    #[error("geometry collection at byte {offset} is nested too deep")]
    NestingTooDeep {
        /// Offset of the record that exceeds the nesting limit.
        offset: usize,
    },
}
