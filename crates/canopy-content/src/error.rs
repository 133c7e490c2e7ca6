//! Error types for content stream operations.

use thiserror::Error;

/// Errors that can occur while opening or driving a content stream.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The path is malformed.
    #[error("malformed path: {path:?}")]
    InvalidPath { path: String },

    /// No mounted drive owns this path.
    #[error("unable to resolve a drive for path: {path}")]
    DriveNotFound { path: String },

    /// No item exists at the path.
    #[error("item not found: {path}")]
    NotFound { path: String },

    /// The target is a container; containers have no content.
    #[error("containers have no content: {path}")]
    NoContent { path: String },

    /// Seeking is not supported by this content model.
    #[error("seek is not supported")]
    SeekUnsupported,

    /// A backing store failure.
    #[error(transparent)]
    Store(#[from] canopy_tree::StoreError),

    /// An I/O failure on a file stream.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for content operations.
pub type Result<T> = std::result::Result<T, ContentError>;
