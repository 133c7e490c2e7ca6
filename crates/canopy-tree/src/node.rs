//! Node types: ids, kinds, and the node record itself.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a node within one [`TreeDocument`] arena.
///
/// Ids are never reused within a document's lifetime; a removed node's id
/// simply stops resolving.
///
/// [`TreeDocument`]: crate::document::TreeDocument
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) u64);

impl NodeId {
    /// The raw id value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The native kind of a node.
///
/// Container-ness is determined by kind alone, never by child count: an
/// `Element` with zero children is still a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// The whole-document root. Exactly one per store; has no parent.
    Document,
    /// A composite element; may hold children, attributes, and a namespace.
    Element,
    /// An entity reference; navigable like an element.
    EntityRef,
    /// A text leaf; its payload is the node content.
    Text,
    /// A comment leaf.
    Comment,
    /// A processing-instruction leaf.
    ProcessingInstruction,
}

impl NodeKind {
    /// `true` for kinds that may have children and support navigation into
    /// them: elements, entity references, and the document itself.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Document | Self::Element | Self::EntityRef)
    }

    /// Parse an item-kind string as supplied to a new-item operation.
    ///
    /// Accepts the native kind names plus the friendlier aliases
    /// `"container"` (element) and `"leaf"` / `"value"` (text). The
    /// document kind is not creatable. Returns `None` for unknown strings.
    pub fn from_item_type(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "element" | "container" => Some(Self::Element),
            "text" | "value" | "leaf" => Some(Self::Text),
            "comment" => Some(Self::Comment),
            "entityref" | "entityreference" => Some(Self::EntityRef),
            "processinginstruction" | "pi" => Some(Self::ProcessingInstruction),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document => write!(f, "document"),
            Self::Element => write!(f, "element"),
            Self::EntityRef => write!(f, "entityref"),
            Self::Text => write!(f, "text"),
            Self::Comment => write!(f, "comment"),
            Self::ProcessingInstruction => write!(f, "processinginstruction"),
        }
    }
}

/// A unit in the backing store.
///
/// `children` is ordered; enumeration and write-back preserve insertion
/// order. `parent` is a weak id reference resolved against the owning
/// arena — it is `None` only for the document root and for nodes that are
/// currently detached (freshly created or cloned, not yet appended).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Arena id of this node.
    pub id: NodeId,
    /// Native kind; decides container vs leaf.
    pub kind: NodeKind,
    /// Segment name this node is addressed by.
    pub name: String,
    /// Optional namespace tag used to scope queries.
    pub namespace: Option<String>,
    /// Leaf payload (inner text). Empty for most containers.
    pub text: String,
    /// Named attributes, ordered by name.
    pub attributes: BTreeMap<String, String>,
    /// Ordered child ids. Empty for leaves.
    pub children: Vec<NodeId>,
    /// Parent id, or `None` for the root and for detached nodes.
    pub parent: Option<NodeId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            namespace: None,
            text: String::new(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            parent: None,
        }
    }

    /// `true` when this node's kind is navigable.
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// `true` when this node has at least one child.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_kinds() {
        assert!(NodeKind::Document.is_container());
        assert!(NodeKind::Element.is_container());
        assert!(NodeKind::EntityRef.is_container());
        assert!(!NodeKind::Text.is_container());
        assert!(!NodeKind::Comment.is_container());
        assert!(!NodeKind::ProcessingInstruction.is_container());
    }

    #[test]
    fn item_type_aliases() {
        assert_eq!(NodeKind::from_item_type("container"), Some(NodeKind::Element));
        assert_eq!(NodeKind::from_item_type("Element"), Some(NodeKind::Element));
        assert_eq!(NodeKind::from_item_type("leaf"), Some(NodeKind::Text));
        assert_eq!(NodeKind::from_item_type("value"), Some(NodeKind::Text));
        assert_eq!(NodeKind::from_item_type("pi"), Some(NodeKind::ProcessingInstruction));
        assert_eq!(NodeKind::from_item_type("document"), None);
        assert_eq!(NodeKind::from_item_type("bogus"), None);
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(NodeKind::Element.to_string(), "element");
        assert_eq!(NodeKind::EntityRef.to_string(), "entityref");
    }
}
