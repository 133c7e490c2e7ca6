//! Backing store for the canopy namespace.
//!
//! This crate implements the hierarchical data source that a drive exposes:
//! a tree of named nodes held in an arena and addressed by path expression.
//! Nodes are indexed by stable [`NodeId`]s; the parent relation is an id
//! lookup, never an owning reference, so the tree is acyclic by
//! construction and exactly one node — the document root — has no parent.
//!
//! # Structure
//!
//! - [`Node`] — a unit in the store: kind, name, optional namespace tag,
//!   leaf payload, attributes, ordered children
//! - [`TreeDocument`] — the arena implementation of [`BackingStore`]
//! - [`BackingStore`] — the uniform node-access contract the navigation
//!   layer is written against
//! - [`NodeValue`] — an owned, id-free subtree for moving node data in and
//!   out of a store
//!
//! # Durable formats
//!
//! A `TreeDocument` can be persisted two ways:
//!
//! - JSON: [`TreeDocument::load_json`] / [`TreeDocument::save_json`]
//! - a filesystem subtree: [`TreeDocument::from_dir`] /
//!   [`TreeDocument::write_dir`], where directories become containers and
//!   files become leaves whose payload is the file contents
//!
//! # Design Rules
//!
//! 1. Structural mutations are atomic: on failure, nothing is mutated.
//! 2. `create_node` and `clone_node` produce detached nodes; attachment is
//!    always a separate, explicit step.
//! 3. Selecting by path never fails for "not found" — zero matches is an
//!    empty result. Only a malformed expression is an error.
//! 4. Removing a node frees its whole subtree from the arena.

pub mod document;
pub mod error;
pub mod fs;
pub mod node;
pub mod traits;
pub mod value;

pub use document::TreeDocument;
pub use error::{StoreError, StoreResult};
pub use node::{Node, NodeId, NodeKind};
pub use traits::BackingStore;
pub use value::NodeValue;
