//! The arena-allocated [`TreeDocument`] and its durable JSON form.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::node::{Node, NodeId, NodeKind};
use crate::traits::BackingStore;

/// An in-memory tree of nodes indexed by stable ids.
///
/// Nodes live in a `BTreeMap` arena; the parent relation is an id lookup,
/// so there are no ownership cycles. Ids are allocated from a counter and
/// never reused within one document.
#[derive(Clone, PartialEq, Eq)]
pub struct TreeDocument {
    nodes: BTreeMap<NodeId, Node>,
    root: NodeId,
    next_id: u64,
}

impl TreeDocument {
    /// Create an empty document: a single root node of kind
    /// [`NodeKind::Document`] with no children.
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = BTreeMap::new();
        nodes.insert(root, Node::new(root, NodeKind::Document, "#document"));
        Self {
            nodes,
            root,
            next_id: 1,
        }
    }

    /// Number of nodes currently in the arena, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when only the root node exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    fn alloc(&mut self, kind: NodeKind, name: &str) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(id, kind, name));
        id
    }

    fn get(&self, id: NodeId) -> StoreResult<&Node> {
        self.nodes.get(&id).ok_or(StoreError::UnknownNode(id))
    }

    fn get_mut(&mut self, id: NodeId) -> StoreResult<&mut Node> {
        self.nodes.get_mut(&id).ok_or(StoreError::UnknownNode(id))
    }

    /// Collect `id` and all of its descendants, pre-order.
    fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            if let Some(node) = self.nodes.get(&current) {
                // Reverse keeps pre-order when popping off the stack.
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    fn free_subtree(&mut self, id: NodeId) {
        for freed in self.subtree(id) {
            self.nodes.remove(&freed);
        }
    }

    fn split_expr<'e>(&self, expr: &'e str) -> StoreResult<Vec<&'e str>> {
        if expr.is_empty() {
            return Err(StoreError::InvalidExpression {
                expr: expr.to_string(),
                reason: "expression is empty".into(),
            });
        }
        let body = expr.strip_prefix('/').unwrap_or(expr);
        if body.is_empty() {
            return Ok(Vec::new());
        }
        let chunks: Vec<&str> = body.split('/').collect();
        if chunks.iter().any(|c| c.is_empty()) {
            return Err(StoreError::InvalidExpression {
                expr: expr.to_string(),
                reason: "expression has an empty segment".into(),
            });
        }
        Ok(chunks)
    }

    // -----------------------------------------------------------------------
    // Durable JSON form
    // -----------------------------------------------------------------------

    /// Load a document from its durable JSON form.
    pub fn load_json(path: &Path) -> StoreResult<Self> {
        let data = fs::read(path)?;
        let file: DocumentFile = serde_json::from_slice(&data)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let doc = file.into_document()?;
        debug!(path = %path.display(), nodes = doc.len(), "loaded tree document");
        Ok(doc)
    }

    /// Save the document to its durable JSON form, overwriting the target.
    pub fn save_json(&self, path: &Path) -> StoreResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = DocumentFile::from_document(self);
        let data = serde_json::to_vec_pretty(&file)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        fs::write(path, data)?;
        debug!(path = %path.display(), nodes = self.len(), "saved tree document");
        Ok(())
    }
}

impl Default for TreeDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TreeDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeDocument")
            .field("nodes", &self.nodes.len())
            .field("root", &self.root)
            .finish()
    }
}

impl BackingStore for TreeDocument {
    fn root(&self) -> NodeId {
        self.root
    }

    fn node(&self, id: NodeId) -> StoreResult<&Node> {
        self.get(id)
    }

    fn node_mut(&mut self, id: NodeId) -> StoreResult<&mut Node> {
        self.get_mut(id)
    }

    fn parent_of(&self, id: NodeId) -> StoreResult<Option<NodeId>> {
        Ok(self.get(id)?.parent)
    }

    fn children_of(&self, id: NodeId) -> StoreResult<Vec<NodeId>> {
        Ok(self.get(id)?.children.clone())
    }

    fn is_container(&self, id: NodeId) -> StoreResult<bool> {
        Ok(self.get(id)?.is_container())
    }

    fn select_nodes(&self, expr: &str, namespace: Option<&str>) -> StoreResult<Vec<NodeId>> {
        let segs = self.split_expr(expr)?;

        let mut current = vec![self.root];
        for seg in segs {
            let mut next = Vec::new();
            for id in current {
                let node = self.get(id)?;
                for &child in &node.children {
                    if self.get(child)?.name == seg {
                        next.push(child);
                    }
                }
            }
            current = next;
            if current.is_empty() {
                break;
            }
        }

        if let Some(ns) = namespace {
            current.retain(|&id| {
                self.nodes
                    .get(&id)
                    .is_some_and(|n| n.namespace.as_deref() == Some(ns))
            });
        }

        Ok(current)
    }

    fn create_node(
        &mut self,
        kind: NodeKind,
        name: &str,
        namespace: Option<&str>,
    ) -> StoreResult<NodeId> {
        let id = self.alloc(kind, name);
        self.get_mut(id)?.namespace = namespace.map(str::to_string);
        Ok(id)
    }

    fn clone_node(&mut self, id: NodeId, deep: bool) -> StoreResult<NodeId> {
        let source = self.get(id)?.clone();
        let copy = self.alloc(source.kind, &source.name);
        {
            let node = self.get_mut(copy)?;
            node.namespace = source.namespace.clone();
            node.text = source.text.clone();
            node.attributes = source.attributes.clone();
        }
        if deep {
            for child in source.children {
                let child_copy = self.clone_node(child, true)?;
                self.get_mut(child_copy)?.parent = Some(copy);
                self.get_mut(copy)?.children.push(child_copy);
            }
        }
        Ok(copy)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> StoreResult<()> {
        if !self.get(parent)?.is_container() {
            return Err(StoreError::NotAContainer(parent));
        }
        if child == self.root {
            return Err(StoreError::RootProtected);
        }
        if self.get(child)?.parent.is_some() {
            return Err(StoreError::AlreadyAttached(child));
        }
        self.get_mut(child)?.parent = Some(parent);
        self.get_mut(parent)?.children.push(child);
        Ok(())
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> StoreResult<()> {
        let position = self
            .get(parent)?
            .children
            .iter()
            .position(|&c| c == child)
            .ok_or(StoreError::NotAChild { parent, child })?;
        self.get_mut(parent)?.children.remove(position);
        self.free_subtree(child);
        Ok(())
    }

    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) -> StoreResult<()> {
        if new == self.root || old == self.root {
            return Err(StoreError::RootProtected);
        }
        if self.get(new)?.parent.is_some() {
            return Err(StoreError::AlreadyAttached(new));
        }
        let position = self
            .get(parent)?
            .children
            .iter()
            .position(|&c| c == old)
            .ok_or(StoreError::NotAChild { parent, child: old })?;
        self.get_mut(parent)?.children[position] = new;
        self.get_mut(new)?.parent = Some(parent);
        self.free_subtree(old);
        Ok(())
    }
}

/// The on-disk JSON shape: nodes flattened into a list so ids stay simple
/// map values rather than JSON object keys.
#[derive(Serialize, Deserialize)]
struct DocumentFile {
    root: NodeId,
    next_id: u64,
    nodes: Vec<Node>,
}

impl DocumentFile {
    fn from_document(doc: &TreeDocument) -> Self {
        Self {
            root: doc.root,
            next_id: doc.next_id,
            nodes: doc.nodes.values().cloned().collect(),
        }
    }

    fn into_document(self) -> StoreResult<TreeDocument> {
        let mut nodes = BTreeMap::new();
        for node in self.nodes {
            nodes.insert(node.id, node);
        }
        if !nodes.contains_key(&self.root) {
            return Err(StoreError::Serialization(format!(
                "document file has no root node {}",
                self.root
            )));
        }
        Ok(TreeDocument {
            nodes,
            root: self.root,
            next_id: self.next_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build: root -> shelf -> { book, book, note }, with the second book
    /// namespaced and the note a text leaf.
    fn sample() -> (TreeDocument, NodeId, NodeId, NodeId, NodeId) {
        let mut doc = TreeDocument::new();
        let shelf = doc.create_node(NodeKind::Element, "shelf", None).unwrap();
        doc.append_child(doc.root(), shelf).unwrap();

        let book1 = doc.create_node(NodeKind::Element, "book", None).unwrap();
        doc.append_child(shelf, book1).unwrap();

        let book2 = doc
            .create_node(NodeKind::Element, "book", Some("archive"))
            .unwrap();
        doc.append_child(shelf, book2).unwrap();

        let note = doc.create_node(NodeKind::Text, "note", None).unwrap();
        doc.node_mut(note).unwrap().text = "remember".into();
        doc.append_child(shelf, note).unwrap();

        (doc, shelf, book1, book2, note)
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    #[test]
    fn select_root_expression() {
        let (doc, ..) = sample();
        let hits = doc.select_nodes("/", None).unwrap();
        assert_eq!(hits, vec![doc.root()]);
    }

    #[test]
    fn select_returns_all_matching_siblings() {
        let (doc, _, book1, book2, _) = sample();
        let hits = doc.select_nodes("/shelf/book", None).unwrap();
        assert_eq!(hits, vec![book1, book2]);
    }

    #[test]
    fn select_zero_matches_is_not_an_error() {
        let (doc, ..) = sample();
        let hits = doc.select_nodes("/shelf/missing/deeper", None).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn select_malformed_expression_is_an_error() {
        let (doc, ..) = sample();
        assert!(matches!(
            doc.select_nodes("", None),
            Err(StoreError::InvalidExpression { .. })
        ));
        assert!(matches!(
            doc.select_nodes("/shelf//book", None),
            Err(StoreError::InvalidExpression { .. })
        ));
    }

    #[test]
    fn select_with_namespace_filters_matches() {
        let (doc, _, _, book2, _) = sample();
        let hits = doc.select_nodes("/shelf/book", Some("archive")).unwrap();
        assert_eq!(hits, vec![book2]);

        let none = doc.select_nodes("/shelf/book", Some("other")).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn select_single_takes_first_match() {
        let (doc, _, book1, _, _) = sample();
        assert_eq!(doc.select_single("/shelf/book", None).unwrap(), Some(book1));
        assert_eq!(doc.select_single("/shelf/nope", None).unwrap(), None);
    }

    // -----------------------------------------------------------------------
    // Structure
    // -----------------------------------------------------------------------

    #[test]
    fn root_has_no_parent() {
        let (doc, shelf, ..) = sample();
        assert_eq!(doc.parent_of(doc.root()).unwrap(), None);
        assert_eq!(doc.parent_of(shelf).unwrap(), Some(doc.root()));
    }

    #[test]
    fn created_node_is_detached() {
        let mut doc = TreeDocument::new();
        let id = doc.create_node(NodeKind::Element, "loose", None).unwrap();
        assert_eq!(doc.parent_of(id).unwrap(), None);
        assert!(doc.select_nodes("/loose", None).unwrap().is_empty());
    }

    #[test]
    fn append_rejects_attached_node() {
        let (mut doc, shelf, book1, ..) = sample();
        assert!(matches!(
            doc.append_child(shelf, book1),
            Err(StoreError::AlreadyAttached(_))
        ));
    }

    #[test]
    fn append_rejects_leaf_parent() {
        let (mut doc, _, _, _, note) = sample();
        let extra = doc.create_node(NodeKind::Element, "extra", None).unwrap();
        assert!(matches!(
            doc.append_child(note, extra),
            Err(StoreError::NotAContainer(_))
        ));
    }

    #[test]
    fn remove_child_frees_subtree() {
        let (mut doc, shelf, book1, ..) = sample();
        let page = doc.create_node(NodeKind::Text, "page", None).unwrap();
        doc.append_child(book1, page).unwrap();

        let before = doc.len();
        doc.remove_child(shelf, book1).unwrap();
        assert_eq!(doc.len(), before - 2);
        assert!(doc.node(book1).is_err());
        assert!(doc.node(page).is_err());
    }

    #[test]
    fn remove_rejects_non_child() {
        let (mut doc, _, book1, _, note) = sample();
        assert!(matches!(
            doc.remove_child(book1, note),
            Err(StoreError::NotAChild { .. })
        ));
    }

    #[test]
    fn replace_child_keeps_position() {
        let (mut doc, shelf, book1, book2, note) = sample();
        let swap = doc.create_node(NodeKind::Element, "swap", None).unwrap();
        doc.replace_child(shelf, book2, swap).unwrap();

        assert_eq!(doc.children_of(shelf).unwrap(), vec![book1, swap, note]);
        assert!(doc.node(book2).is_err());
        assert_eq!(doc.parent_of(swap).unwrap(), Some(shelf));
    }

    #[test]
    fn root_cannot_be_replaced_or_attached() {
        let (mut doc, shelf, book1, ..) = sample();
        let root = doc.root();
        assert!(matches!(
            doc.append_child(shelf, root),
            Err(StoreError::RootProtected)
        ));
        assert!(matches!(
            doc.replace_child(shelf, book1, root),
            Err(StoreError::RootProtected)
        ));
    }

    // -----------------------------------------------------------------------
    // Cloning
    // -----------------------------------------------------------------------

    #[test]
    fn shallow_clone_copies_node_only() {
        let (mut doc, shelf, ..) = sample();
        let copy = doc.clone_node(shelf, false).unwrap();
        let node = doc.node(copy).unwrap();
        assert_eq!(node.name, "shelf");
        assert!(node.children.is_empty());
        assert_eq!(node.parent, None);
    }

    #[test]
    fn deep_clone_copies_descendants() {
        let (mut doc, shelf, ..) = sample();
        let copy = doc.clone_node(shelf, true).unwrap();
        assert_eq!(doc.children_of(copy).unwrap().len(), 3);
        // Clone is independent: mutating the copy leaves the original alone.
        let copy_children = doc.children_of(copy).unwrap();
        doc.remove_child(copy, copy_children[0]).unwrap();
        assert_eq!(doc.children_of(shelf).unwrap().len(), 3);
    }

    #[test]
    fn deep_clone_preserves_payload_and_attributes() {
        let (mut doc, _, book1, ..) = sample();
        doc.node_mut(book1)
            .unwrap()
            .attributes
            .insert("author".into(), "anon".into());
        let copy = doc.clone_node(book1, true).unwrap();
        assert_eq!(
            doc.node(copy).unwrap().attributes.get("author"),
            Some(&"anon".to_string())
        );
    }

    // -----------------------------------------------------------------------
    // Durable JSON round-trip
    // -----------------------------------------------------------------------

    #[test]
    fn json_round_trip() {
        let (doc, ..) = sample();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");

        doc.save_json(&path).unwrap();
        let loaded = TreeDocument::load_json(&path).unwrap();

        assert_eq!(loaded, doc);
        assert_eq!(
            loaded.select_nodes("/shelf/book", None).unwrap().len(),
            2
        );
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            TreeDocument::load_json(&missing),
            Err(StoreError::Io(_))
        ));
    }

    #[test]
    fn load_garbage_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, b"not json").unwrap();
        assert!(matches!(
            TreeDocument::load_json(&path),
            Err(StoreError::Serialization(_))
        ));
    }
}
