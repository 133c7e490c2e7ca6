//! [`NodeValue`]: a detached, self-contained node subtree.
//!
//! Arena nodes refer to their children by [`NodeId`], which only means
//! something inside the owning document. A `NodeValue` is the portable
//! form: an owned subtree with no ids, used to emit item snapshots out of
//! a store and to carry replacement values into one (set-item).

use std::collections::BTreeMap;

use crate::error::StoreResult;
use crate::node::{NodeId, NodeKind};
use crate::traits::BackingStore;

/// An owned node subtree, independent of any arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeValue {
    /// Native kind; decides container vs leaf.
    pub kind: NodeKind,
    /// Segment name.
    pub name: String,
    /// Optional namespace tag.
    pub namespace: Option<String>,
    /// Leaf payload.
    pub text: String,
    /// Named attributes, ordered by name.
    pub attributes: BTreeMap<String, String>,
    /// Owned child subtrees, in order.
    pub children: Vec<NodeValue>,
}

impl NodeValue {
    /// A new element container with the given name.
    pub fn container(name: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Element,
            name: name.into(),
            namespace: None,
            text: String::new(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// A new text leaf with the given name and payload.
    pub fn leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text,
            name: name.into(),
            namespace: None,
            text: text.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Set the namespace tag (builder style).
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Add a child subtree (builder style).
    pub fn with_child(mut self, child: NodeValue) -> Self {
        self.children.push(child);
        self
    }

    /// Add an attribute (builder style).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// `true` when this value's kind is navigable.
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// Export the subtree rooted at `id` out of a store.
    pub fn snapshot<B: BackingStore + ?Sized>(store: &B, id: NodeId) -> StoreResult<Self> {
        let node = store.node(id)?;
        let mut children = Vec::with_capacity(node.children.len());
        for &child in &node.children {
            children.push(Self::snapshot(store, child)?);
        }
        Ok(Self {
            kind: node.kind,
            name: node.name.clone(),
            namespace: node.namespace.clone(),
            text: node.text.clone(),
            attributes: node.attributes.clone(),
            children,
        })
    }

    /// Materialize this subtree into a store as a detached node.
    ///
    /// The returned node has no parent; attaching it is the caller's job.
    pub fn materialize<B: BackingStore + ?Sized>(&self, store: &mut B) -> StoreResult<NodeId> {
        let id = store.create_node(self.kind, &self.name, self.namespace.as_deref())?;
        {
            let node = store.node_mut(id)?;
            node.text = self.text.clone();
            node.attributes = self.attributes.clone();
        }
        for child in &self.children {
            let child_id = child.materialize(store)?;
            store.append_child(id, child_id)?;
        }
        Ok(id)
    }
}
