//! Error type used by the crate.

use tessera_types::TypesError;
use thiserror::Error;

/// Error returned by bounding-box and tiling operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TilingError {
    /// Input violates a requirement of the operation.
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// Bounding box of an empty set of coordinates was requested.
    #[error("no coordinates for bounding box calculation")]
    NoCoordinates,

    /// String is not a valid quad key.
    #[error("invalid quad key: {0:?}")]
    InvalidQuadKey(String),

    /// Error from one of the primitive types.
    #[error(transparent)]
    Types(#[from] TypesError),
}
