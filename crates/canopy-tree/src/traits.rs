//! The [`BackingStore`] trait defining the uniform node-access contract.
//!
//! The navigation layer is written entirely against this trait; any
//! hierarchical data source that can answer path queries and perform the
//! structural mutations below can be exposed as a drive.

use crate::error::StoreResult;
use crate::node::{Node, NodeId, NodeKind};

/// Uniform node-access contract over one hierarchical data source.
///
/// All implementations must satisfy these invariants:
/// - Exactly one node (the root) has no parent while attached.
/// - `create_node` and `clone_node` return *detached* nodes; attaching them
///   is the caller's responsibility.
/// - Structural mutations are atomic: on failure, nothing is mutated.
/// - Selection never fails for "not found" — zero matches is `Ok(vec![])`;
///   only a malformed expression is an `Err`.
pub trait BackingStore {
    /// The document root id.
    fn root(&self) -> NodeId;

    /// Borrow a node by id. Fails for ids the arena does not know.
    fn node(&self, id: NodeId) -> StoreResult<&Node>;

    /// Mutably borrow a node by id.
    ///
    /// Intended for payload and attribute edits. Structural fields
    /// (`children`, `parent`) must be changed through the mutation
    /// primitives below, never directly.
    fn node_mut(&mut self, id: NodeId) -> StoreResult<&mut Node>;

    /// The parent of a node, recomputed on demand. `Ok(None)` for the root.
    fn parent_of(&self, id: NodeId) -> StoreResult<Option<NodeId>>;

    /// The ordered children of a node.
    fn children_of(&self, id: NodeId) -> StoreResult<Vec<NodeId>>;

    /// `true` when the node's kind is navigable.
    fn is_container(&self, id: NodeId) -> StoreResult<bool>;

    /// All nodes matching a drive-less normalized path expression.
    ///
    /// Siblings sharing a name all match, so the result is a set. When
    /// `namespace` is given, only matches carrying that namespace tag are
    /// returned.
    fn select_nodes(&self, expr: &str, namespace: Option<&str>) -> StoreResult<Vec<NodeId>>;

    /// The first node matching the expression, or `Ok(None)`.
    fn select_single(&self, expr: &str, namespace: Option<&str>) -> StoreResult<Option<NodeId>> {
        Ok(self.select_nodes(expr, namespace)?.into_iter().next())
    }

    /// Allocate a new detached node.
    fn create_node(
        &mut self,
        kind: NodeKind,
        name: &str,
        namespace: Option<&str>,
    ) -> StoreResult<NodeId>;

    /// Clone a node into a new detached node.
    ///
    /// A deep clone copies the whole subtree; a shallow clone copies only
    /// the node itself. Payload and attributes are always copied.
    fn clone_node(&mut self, id: NodeId, deep: bool) -> StoreResult<NodeId>;

    /// Append a detached node as the last child of a container.
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> StoreResult<()>;

    /// Detach a child from its parent and free its subtree from the arena.
    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> StoreResult<()>;

    /// Replace a child in place with a detached node, freeing the old
    /// child's subtree. The replacement takes the old child's position.
    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) -> StoreResult<()>;
}
