use std::{fmt, io};
use thiserror::Error;

/// Unified error type for all qube operations.
///
/// Errors propagate upward through the call stack using Rust's `?` operator.
/// At API boundaries they are typically rendered with `Display`; internal code
/// can match on specific variants for fine-grained handling.
///
/// `Error` is `Send + Sync` so it can cross thread boundaries when a query is
/// parallelized across record batches.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during filesystem operations.
    ///
    /// Raised by the cleanup job when deleting obsolete paths. The underlying
    /// `io::Error` carries the detail (permission denied, not found, ...).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Arrow library error during columnar materialization.
    ///
    /// Raised when finished tuples are assembled into a `RecordBatch` and the
    /// arrays disagree with the declared output schema.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Invalid input or configuration.
    ///
    /// Covers plan-construction failures that are the caller's (or the
    /// catalog's) fault: a selected column missing from the cuboid, an
    /// unrecognized derive kind, an unknown aggregate expression. These are
    /// fatal for the plan being built and are never retried.
    #[error("Invalid argument: {0}")]
    InvalidArgumentError(String),

    /// A named resource does not exist.
    #[error("Not found")]
    NotFound,

    /// Typed storage-layer failure wrapping the underlying cause.
    ///
    /// Raised by the administrative storage interface for connection and
    /// table-admin failures. The message always carries the cause so that
    /// operators can diagnose from logs alone.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error indicating a bug or violated invariant.
    ///
    /// Should never occur during normal operation.
    #[error("An internal operation failed: {0}")]
    Internal(String),
}

impl Error {
    /// Wrap any displayable cause as a storage-layer failure.
    #[inline]
    pub fn storage<E: fmt::Display>(err: E) -> Self {
        Error::Storage(err.to_string())
    }

    /// Build an invalid-argument error from any displayable cause.
    #[inline]
    pub fn invalid_argument<E: fmt::Display>(err: E) -> Self {
        Error::InvalidArgumentError(err.to_string())
    }
}
