//! Error types for backing store operations.

use thiserror::Error;

use crate::node::NodeId;

/// Errors from backing store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The path expression is malformed (empty segment, empty expression).
    ///
    /// Note: an expression that matches nothing is *not* an error; selection
    /// returns an empty result in that case.
    #[error("malformed path expression {expr:?}: {reason}")]
    InvalidExpression { expr: String, reason: String },

    /// A node id does not exist in the arena (stale or foreign id).
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    /// Attempted to attach a node that is already attached to a parent.
    #[error("node {0} is already attached")]
    AlreadyAttached(NodeId),

    /// The named child does not belong to the named parent.
    #[error("node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    /// Attempted to attach children under a leaf node.
    #[error("node {0} is not a container")]
    NotAContainer(NodeId),

    /// Attempted to detach, replace, or re-attach the document root.
    #[error("the document root cannot be detached or replaced")]
    RootProtected,

    /// Serialization or deserialization failure in the durable format.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error while loading or saving the durable form.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
