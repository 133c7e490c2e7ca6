//! Error types for drive operations.

use thiserror::Error;

/// Errors that can occur while managing drive contexts.
#[derive(Debug, Error)]
pub enum DriveError {
    /// No drive is mounted under this name.
    #[error("drive not found: {name}")]
    NotFound { name: String },

    /// A drive with this name is already mounted.
    #[error("drive already exists: {name}")]
    AlreadyExists { name: String },

    /// The drive name is invalid.
    #[error("invalid drive name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// The backing store failed to load or save.
    #[error(transparent)]
    Store(#[from] canopy_tree::StoreError),
}

/// Convenience type alias for drive operations.
pub type Result<T> = std::result::Result<T, DriveError>;
