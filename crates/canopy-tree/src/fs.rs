//! Mirroring a filesystem subtree into and out of a [`TreeDocument`].
//!
//! Directories become [`NodeKind::Element`] containers; files become
//! [`NodeKind::Text`] leaves whose payload is the file contents. The sweep
//! is deterministic: entries are visited in file-name order.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::document::TreeDocument;
use crate::error::{StoreError, StoreResult};
use crate::node::{NodeId, NodeKind};
use crate::traits::BackingStore;

impl TreeDocument {
    /// Build a document from a filesystem subtree rooted at `root`.
    ///
    /// `root` itself becomes the document root; each directory below it an
    /// element, each file a text leaf. Files must be valid UTF-8.
    pub fn from_dir(root: &Path) -> StoreResult<Self> {
        let mut doc = TreeDocument::new();
        let mut ids: HashMap<PathBuf, NodeId> = HashMap::new();
        ids.insert(root.to_path_buf(), doc.root());

        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let parent = entry
                .path()
                .parent()
                .and_then(|p| ids.get(p))
                .copied()
                .ok_or_else(|| StoreError::Serialization(format!(
                    "walk produced {} before its parent directory",
                    entry.path().display()
                )))?;

            let id = if entry.file_type().is_dir() {
                doc.create_node(NodeKind::Element, &name, None)?
            } else {
                let id = doc.create_node(NodeKind::Text, &name, None)?;
                doc.node_mut(id)?.text = fs::read_to_string(entry.path())?;
                id
            };
            doc.append_child(parent, id)?;
            ids.insert(entry.path().to_path_buf(), id);
        }

        debug!(root = %root.display(), nodes = doc.len(), "swept directory into tree document");
        Ok(doc)
    }

    /// Write the document back out as a filesystem subtree under `target`.
    ///
    /// Containers become directories, leaves become files holding their
    /// payload. The target directory is created if missing; existing files
    /// with matching names are overwritten.
    pub fn write_dir(&self, target: &Path) -> StoreResult<()> {
        fs::create_dir_all(target)?;
        self.write_children(self.root(), target)?;
        debug!(target = %target.display(), nodes = self.len(), "wrote tree document as directory");
        Ok(())
    }

    fn write_children(&self, id: NodeId, dir: &Path) -> StoreResult<()> {
        for child in self.children_of(id)? {
            let node = self.node(child)?;
            let path = dir.join(&node.name);
            if node.is_container() {
                fs::create_dir_all(&path)?;
                self.write_children(child, &path)?;
            } else {
                fs::write(&path, node.text.as_bytes())?;
            }
        }
        Ok(())
    }
}
