//! Error types for isomesh

use thiserror::Error;

/// Main error type for isomesh operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A mesh violated a structural contract (index list length not a
    /// multiple of 3, or an index past the end of the vertex list). The
    /// caller handed over a broken mesh; this is not recoverable by the
    /// algorithm.
    #[error("Mesh invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Algorithm error: {0}")]
    Algorithm(String),
}

/// Result type alias for isomesh operations
pub type Result<T> = std::result::Result<T, Error>;
