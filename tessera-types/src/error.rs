//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TypesError {
    /// The caller supplied an input that violates the invariant of the constructed value.
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// A value cannot be constructed from the given configuration.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}
