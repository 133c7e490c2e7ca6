//! The [`DriveSet`] registry: drive name → mounted context.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::context::{DriveContext, StoreFormat};
use crate::error::{DriveError, Result};

/// Registry of mounted drives, keyed by drive name.
///
/// Each name maps to exactly one [`DriveContext`]; a store instance is never
/// shared between contexts. Enumeration order is the name order.
#[derive(Debug, Default)]
pub struct DriveSet {
    drives: BTreeMap<String, DriveContext>,
}

impl DriveSet {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mounted drives.
    pub fn len(&self) -> usize {
        self.drives.len()
    }

    /// `true` when no drive is mounted.
    pub fn is_empty(&self) -> bool {
        self.drives.is_empty()
    }

    /// Mounted drive names, in order.
    pub fn names(&self) -> Vec<&str> {
        self.drives.keys().map(String::as_str).collect()
    }

    /// `true` when a drive with this name is mounted.
    pub fn contains(&self, name: &str) -> bool {
        self.drives.contains_key(name)
    }

    /// Borrow a mounted drive by name.
    pub fn get(&self, name: &str) -> Option<&DriveContext> {
        self.drives.get(name)
    }

    /// Mutably borrow a mounted drive by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut DriveContext> {
        self.drives.get_mut(name)
    }

    /// Mount a new drive. Fails if the name is taken or the store cannot be
    /// loaded.
    pub fn mount(&mut self, name: &str, location: &Path, format: StoreFormat) -> Result<()> {
        if self.drives.contains_key(name) {
            return Err(DriveError::AlreadyExists {
                name: name.to_string(),
            });
        }
        let context = DriveContext::mount(name, location, format)?;
        self.drives.insert(name.to_string(), context);
        debug!(drive = name, mounted = self.drives.len(), "drive registered");
        Ok(())
    }

    /// Unmount a drive: flush its store to the durable location and release
    /// the context.
    pub fn unmount(&mut self, name: &str) -> Result<()> {
        let context = self.drives.remove(name).ok_or_else(|| DriveError::NotFound {
            name: name.to_string(),
        })?;
        context.unmount()
    }
}

#[cfg(test)]
mod tests {
    use canopy_tree::TreeDocument;

    use super::*;

    fn seeded_store(dir: &Path, file: &str) -> std::path::PathBuf {
        let path = dir.join(file);
        TreeDocument::new().save_json(&path).unwrap();
        path
    }

    #[test]
    fn mount_and_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded_store(dir.path(), "a.json");

        let mut set = DriveSet::new();
        set.mount("docs", &path, StoreFormat::Json).unwrap();

        assert!(set.contains("docs"));
        assert_eq!(set.get("docs").unwrap().name(), "docs");
        assert!(set.get("other").is_none());
    }

    #[test]
    fn mount_duplicate_name_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded_store(dir.path(), "a.json");

        let mut set = DriveSet::new();
        set.mount("docs", &path, StoreFormat::Json).unwrap();
        assert!(matches!(
            set.mount("docs", &path, StoreFormat::Json),
            Err(DriveError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn unmount_removes_the_drive() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded_store(dir.path(), "a.json");

        let mut set = DriveSet::new();
        set.mount("docs", &path, StoreFormat::Json).unwrap();
        set.unmount("docs").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn unmount_unknown_drive_fails() {
        let mut set = DriveSet::new();
        assert!(matches!(
            set.unmount("ghost"),
            Err(DriveError::NotFound { .. })
        ));
    }

    #[test]
    fn names_are_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let a = seeded_store(dir.path(), "a.json");
        let b = seeded_store(dir.path(), "b.json");

        let mut set = DriveSet::new();
        set.mount("zeta", &a, StoreFormat::Json).unwrap();
        set.mount("alpha", &b, StoreFormat::Json).unwrap();
        assert_eq!(set.names(), vec!["alpha", "zeta"]);
    }
}
