//! Dynamic per-operation parameters.

use std::path::PathBuf;

use canopy_drive::StoreFormat;
use canopy_tree::NodeValue;

/// The dynamic parameters an operation may carry beyond its path.
///
/// Every navigation operation accepts the optional `namespace` scope; the
/// rest are operation-specific and checked against the operation's
/// descriptor before dispatch. Unused fields are simply ignored.
#[derive(Clone, Debug, Default)]
pub struct OpParams {
    /// Restrict store queries to nodes carrying this namespace tag.
    pub namespace: Option<String>,
    /// Recurse into child containers (enumeration) or clone deep (copy).
    pub recurse: bool,
    /// Overwrite an existing item (new-item), create missing parents.
    pub force: bool,
    /// Kind of item to create (new-item).
    pub item_kind: Option<String>,
    /// Replacement name (rename-item).
    pub new_name: Option<String>,
    /// Destination path (copy-item, move-item).
    pub destination: Option<String>,
    /// Replacement value (set-item).
    pub value: Option<NodeValue>,
    /// Durable location of the backing store (mount).
    pub location: Option<PathBuf>,
    /// Durable format of the backing store (mount).
    pub format: StoreFormat,
}

impl OpParams {
    /// Parameters with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the namespace scope (builder style).
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Enable recursion (builder style).
    pub fn with_recurse(mut self) -> Self {
        self.recurse = true;
        self
    }

    /// Enable force (builder style).
    pub fn with_force(mut self) -> Self {
        self.force = true;
        self
    }

    /// Set the item kind (builder style).
    pub fn with_item_kind(mut self, kind: impl Into<String>) -> Self {
        self.item_kind = Some(kind.into());
        self
    }

    /// Set the replacement name (builder style).
    pub fn with_new_name(mut self, name: impl Into<String>) -> Self {
        self.new_name = Some(name.into());
        self
    }

    /// Set the destination path (builder style).
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Set the replacement value (builder style).
    pub fn with_value(mut self, value: NodeValue) -> Self {
        self.value = Some(value);
        self
    }

    /// Set the durable location (builder style).
    pub fn with_location(mut self, location: impl Into<PathBuf>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the durable format (builder style).
    pub fn with_format(mut self, format: StoreFormat) -> Self {
        self.format = format;
        self
    }
}
