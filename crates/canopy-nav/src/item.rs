//! Operation output: result items and recoverable error records.

use canopy_tree::NodeValue;

use crate::error::{ErrorCategory, NavError};

/// One emitted result: a node snapshot tagged with its source path and its
/// container/leaf classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemRecord {
    /// The path this item was resolved at.
    pub path: String,
    /// Snapshot of the node, including its subtree.
    pub value: NodeValue,
    /// `true` when the node is navigable.
    pub is_container: bool,
}

impl ItemRecord {
    /// The item's own name.
    pub fn name(&self) -> &str {
        &self.value.name
    }
}

/// A recoverable, per-node failure reported alongside the surviving
/// results. Fatal failures are the `Err` arm of the operation instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorRecord {
    /// Machine-readable category.
    pub category: ErrorCategory,
    /// The path or node the failure applies to.
    pub target: String,
    /// Human-readable description.
    pub message: String,
}

impl ErrorRecord {
    /// Build a record from a navigation error and the node it applies to.
    pub fn from_error(error: &NavError, target: impl Into<String>) -> Self {
        Self {
            category: error.category(),
            target: target.into(),
            message: error.to_string(),
        }
    }
}

/// What one operation produced: zero or more items plus zero or more
/// recoverable per-node errors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OperationOutput {
    /// Result items, in resolution order.
    pub items: Vec<ItemRecord>,
    /// Per-node failures that did not abort the operation.
    pub errors: Vec<ErrorRecord>,
}

impl OperationOutput {
    /// An output with no items and no errors.
    pub fn empty() -> Self {
        Self::default()
    }

    /// `true` when the operation produced neither items nor errors.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.errors.is_empty()
    }

    /// The emitted item paths, in order.
    pub fn paths(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.path.as_str()).collect()
    }

    /// The emitted item names, in order.
    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_record_carries_category() {
        let err = NavError::ItemNotFound {
            path: "d:/x".into(),
        };
        let record = ErrorRecord::from_error(&err, "d:/x");
        assert_eq!(record.category, ErrorCategory::NotFound);
        assert!(record.message.contains("d:/x"));
    }

    #[test]
    fn empty_output() {
        let out = OperationOutput::empty();
        assert!(out.is_empty());
        assert!(out.paths().is_empty());
    }
}
