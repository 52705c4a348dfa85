//! Errors returned when serving a bisecting k-means tree.

use thiserror::Error;

/// Errors returned by the metrics, the search and the model in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Two vectors that were compared have different lengths.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Dimensionality of the first vector, or of the model.
        expected: usize,
        /// Dimensionality of the offending vector.
        found: usize,
    },

    /// A closest-center search was attempted against no centers.
    #[error("cannot search for the closest center in an empty set of centers")]
    EmptyCenterSet,

    /// Two nodes in the same tree share an index.
    #[error("the index {0} is used by more than one node in the tree")]
    DuplicateIndex(usize),

    /// A tree could not be read from or written to disk.
    #[error("i/o error: {0}")]
    Io(String),

    /// A tree could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type used by this crate.
pub type Result<T> = core::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
