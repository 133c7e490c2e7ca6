//! Error types for navigation operations.

use thiserror::Error;

use crate::capability::Capability;

/// Machine-readable category attached to every reported error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A drive, parent, or target item is absent.
    NotFound,
    /// A malformed path, bad parameter, or name collision.
    InvalidArgument,
    /// The operation does not apply to this target (containers, the root).
    InvalidOperation,
    /// A supplied value has the wrong type.
    InvalidType,
    /// The caller declined or is not allowed to perform the mutation.
    Permission,
    /// Supplied or stored data is invalid.
    InvalidData,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "not-found"),
            Self::InvalidArgument => write!(f, "invalid-argument"),
            Self::InvalidOperation => write!(f, "invalid-operation"),
            Self::InvalidType => write!(f, "invalid-type"),
            Self::Permission => write!(f, "permission"),
            Self::InvalidData => write!(f, "invalid-data"),
        }
    }
}

/// Errors that can occur during navigation operations.
///
/// These are the *fatal* conditions: returning one aborts the remaining
/// work in the invocation. Recoverable per-node failures are reported as
/// [`ErrorRecord`]s in the operation output instead.
///
/// [`ErrorRecord`]: crate::item::ErrorRecord
#[derive(Debug, Error)]
pub enum NavError {
    /// The path is malformed (empty, or has an empty segment).
    #[error("malformed path: {path:?}")]
    InvalidPath { path: String },

    /// No mounted drive owns this path.
    #[error("unable to resolve a drive for path: {path}")]
    DriveNotFound { path: String },

    /// The operation requires an existing target and none was found.
    #[error("item not found: {path}")]
    ItemNotFound { path: String },

    /// The parent container for a new item does not exist.
    #[error("parent path does not exist: {path}")]
    ParentNotFound { path: String },

    /// An item already exists at the target path and force was not set.
    #[error("item already exists: {path}")]
    AlreadyExists { path: String },

    /// A mandatory dynamic parameter was not supplied.
    #[error("missing mandatory parameter: {name}")]
    MissingParameter { name: &'static str },

    /// The item-kind string names no creatable node kind.
    #[error("unknown item kind: {kind}")]
    InvalidItemKind { kind: String },

    /// A value-taking operation was invoked without a value.
    #[error("value must not be empty")]
    MissingValue,

    /// The supplied value cannot be used as a node.
    #[error("value is not a usable node: {reason}")]
    WrongValueType { reason: String },

    /// The document root cannot be set, renamed, or moved — it has no
    /// parent to re-attach into.
    #[error("the root item cannot be modified")]
    ProtectedRoot,

    /// The target is not a container.
    #[error("not a container: {path}")]
    NotAContainer { path: String },

    /// The engine was composed without the capability this operation needs.
    #[error("operation requires the {0} capability")]
    CapabilityMissing(Capability),

    /// The operation is not supported by this provider.
    #[error("not supported: {operation}")]
    Unsupported { operation: String },

    /// A backing store failure.
    #[error(transparent)]
    Store(#[from] canopy_tree::StoreError),

    /// A drive registry failure.
    #[error(transparent)]
    Drive(#[from] canopy_drive::DriveError),
}

impl NavError {
    /// The machine-readable category of this error.
    pub fn category(&self) -> ErrorCategory {
        use canopy_drive::DriveError;
        use canopy_tree::StoreError;

        match self {
            Self::InvalidPath { .. }
            | Self::AlreadyExists { .. }
            | Self::MissingParameter { .. }
            | Self::InvalidItemKind { .. } => ErrorCategory::InvalidArgument,
            Self::DriveNotFound { .. }
            | Self::ItemNotFound { .. }
            | Self::ParentNotFound { .. } => ErrorCategory::NotFound,
            Self::MissingValue => ErrorCategory::InvalidData,
            Self::WrongValueType { .. } => ErrorCategory::InvalidType,
            Self::ProtectedRoot
            | Self::NotAContainer { .. }
            | Self::CapabilityMissing(_)
            | Self::Unsupported { .. } => ErrorCategory::InvalidOperation,
            Self::Store(StoreError::InvalidExpression { .. }) => ErrorCategory::InvalidArgument,
            Self::Store(_) => ErrorCategory::InvalidData,
            Self::Drive(DriveError::NotFound { .. }) => ErrorCategory::NotFound,
            Self::Drive(DriveError::AlreadyExists { .. })
            | Self::Drive(DriveError::InvalidName { .. }) => ErrorCategory::InvalidArgument,
            Self::Drive(DriveError::Store(_)) => ErrorCategory::InvalidData,
        }
    }
}

/// Convenience type alias for navigation operations.
pub type Result<T> = std::result::Result<T, NavError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_kebab_case() {
        assert_eq!(ErrorCategory::NotFound.to_string(), "not-found");
        assert_eq!(ErrorCategory::InvalidType.to_string(), "invalid-type");
    }

    #[test]
    fn category_mapping() {
        let err = NavError::ItemNotFound {
            path: "d:/x".into(),
        };
        assert_eq!(err.category(), ErrorCategory::NotFound);

        assert_eq!(NavError::MissingValue.category(), ErrorCategory::InvalidData);
        assert_eq!(
            NavError::ProtectedRoot.category(),
            ErrorCategory::InvalidOperation
        );
        assert_eq!(
            NavError::AlreadyExists { path: "d:/x".into() }.category(),
            ErrorCategory::InvalidArgument
        );
    }
}
