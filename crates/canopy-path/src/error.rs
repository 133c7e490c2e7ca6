//! Error types for path validation.

use thiserror::Error;

/// Errors that can occur while validating a path string.
#[derive(Debug, Error)]
pub enum PathError {
    /// The path string is empty.
    #[error("path is empty")]
    Empty,

    /// Normalization produced a zero-length segment (doubled or trailing
    /// separator).
    #[error("path has an empty segment: {path}")]
    EmptySegment { path: String },
}

/// Convenience type alias for path operations.
pub type Result<T> = std::result::Result<T, PathError>;
