//! The [`DriveContext`]: one mounted backing store bound to a drive name.

use std::path::{Path, PathBuf};

use canopy_tree::TreeDocument;
use tracing::debug;

use crate::error::Result;
use crate::names::validate_drive_name;

/// The durable form a drive's backing store is loaded from and flushed to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StoreFormat {
    /// A single JSON tree-document file.
    #[default]
    Json,
    /// A filesystem subtree mirrored into the document.
    Directory,
}

/// A named binding between a mounted backing store and the path namespace.
///
/// The context owns its [`TreeDocument`] exclusively for its whole lifetime.
/// Mounting loads the store from `location`; [`DriveContext::flush`] writes
/// it back. Dropping a context without flushing discards in-memory changes —
/// the unmount path in the registry always flushes first.
#[derive(Debug)]
pub struct DriveContext {
    name: String,
    location: PathBuf,
    format: StoreFormat,
    document: TreeDocument,
}

impl DriveContext {
    /// Mount a backing store: validate the drive name and load the document
    /// from its durable location.
    pub fn mount(name: &str, location: &Path, format: StoreFormat) -> Result<Self> {
        validate_drive_name(name)?;
        let document = match format {
            StoreFormat::Json => TreeDocument::load_json(location)?,
            StoreFormat::Directory => TreeDocument::from_dir(location)?,
        };
        debug!(drive = name, location = %location.display(), ?format, "mounted drive");
        Ok(Self {
            name: name.to_string(),
            location: location.to_path_buf(),
            format,
            document,
        })
    }

    /// The drive name paths are prefixed with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The durable location the store was loaded from.
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// The durable format of this drive's store.
    pub fn format(&self) -> StoreFormat {
        self.format
    }

    /// The mounted document.
    pub fn document(&self) -> &TreeDocument {
        &self.document
    }

    /// The mounted document, mutably.
    pub fn document_mut(&mut self) -> &mut TreeDocument {
        &mut self.document
    }

    /// Write the in-memory store back to its durable location.
    pub fn flush(&self) -> Result<()> {
        match self.format {
            StoreFormat::Json => self.document.save_json(&self.location)?,
            StoreFormat::Directory => self.document.write_dir(&self.location)?,
        }
        debug!(drive = %self.name, location = %self.location.display(), "flushed drive");
        Ok(())
    }

    /// Flush and release the context.
    pub fn unmount(self) -> Result<()> {
        self.flush()?;
        debug!(drive = %self.name, "unmounted drive");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use canopy_tree::{BackingStore, NodeKind};

    use super::*;
    use crate::error::DriveError;

    fn seed_document(path: &Path) {
        let mut doc = TreeDocument::new();
        let top = doc.create_node(NodeKind::Element, "top", None).unwrap();
        doc.append_child(doc.root(), top).unwrap();
        doc.save_json(path).unwrap();
    }

    #[test]
    fn mount_loads_the_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        seed_document(&path);

        let drive = DriveContext::mount("docs", &path, StoreFormat::Json).unwrap();
        assert_eq!(drive.name(), "docs");
        assert_eq!(
            drive.document().select_nodes("/top", None).unwrap().len(),
            1
        );
    }

    #[test]
    fn mount_rejects_bad_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        seed_document(&path);

        assert!(matches!(
            DriveContext::mount("do:cs", &path, StoreFormat::Json),
            Err(DriveError::InvalidName { .. })
        ));
    }

    #[test]
    fn mount_missing_location_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert!(matches!(
            DriveContext::mount("docs", &missing, StoreFormat::Json),
            Err(DriveError::Store(_))
        ));
    }

    #[test]
    fn unmount_flushes_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        seed_document(&path);

        let mut drive = DriveContext::mount("docs", &path, StoreFormat::Json).unwrap();
        let doc = drive.document_mut();
        let top = doc.select_single("/top", None).unwrap().unwrap();
        let extra = doc.create_node(NodeKind::Element, "extra", None).unwrap();
        doc.append_child(top, extra).unwrap();
        drive.unmount().unwrap();

        let reloaded = DriveContext::mount("docs", &path, StoreFormat::Json).unwrap();
        assert_eq!(
            reloaded
                .document()
                .select_nodes("/top/extra", None)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn directory_format_mounts_a_subtree() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("file.txt"), "content").unwrap();

        let drive = DriveContext::mount("fs", dir.path(), StoreFormat::Directory).unwrap();
        let doc = drive.document();
        let file = doc.select_single("/file.txt", None).unwrap().unwrap();
        assert_eq!(doc.node(file).unwrap().text, "content");
    }
}
