//! Content streams over leaf payloads in a mounted drive.

use canopy_drive::DriveSet;
use canopy_path::{is_well_formed, normalize, split_drive};
use canopy_tree::{BackingStore, Node, NodeId, TreeDocument};
use tracing::debug;

use crate::error::{ContentError, Result};
use crate::traits::{ContentReader, ContentWriter};

/// Resolve a path to a leaf node id within its drive's document.
///
/// Fatal for malformed paths, missing drives, and container targets;
/// `Ok(None)` when no item exists at the path.
fn resolve_leaf<'a>(
    drives: &'a DriveSet,
    path: &str,
    namespace: Option<&str>,
) -> Result<Option<(&'a TreeDocument, NodeId)>> {
    if !is_well_formed(path) {
        return Err(ContentError::InvalidPath { path: path.into() });
    }
    let (drive, rest) = split_drive(path);
    let context = drive
        .and_then(|d| drives.get(d))
        .ok_or_else(|| ContentError::DriveNotFound { path: path.into() })?;
    let doc = context.document();

    let Some(id) = doc.select_single(&normalize(rest), namespace)? else {
        return Ok(None);
    };
    if doc.is_container(id)? {
        return Err(ContentError::NoContent { path: path.into() });
    }
    Ok(Some((doc, id)))
}

/// Open a read cursor over the leaf at `path`.
///
/// Returns `Ok(None)` when no leaf exists there. The cursor snapshots the
/// payload at open time.
pub fn open_leaf_reader(
    drives: &DriveSet,
    path: &str,
    namespace: Option<&str>,
) -> Result<Option<LeafReader>> {
    debug!(path, "open content reader");
    let Some((doc, id)) = resolve_leaf(drives, path, namespace)? else {
        return Ok(None);
    };
    let lines = doc.node(id)?.text.lines().map(String::from).collect();
    Ok(Some(LeafReader { lines, cursor: 0 }))
}

/// Open a write cursor over the leaf at `path`, truncating its payload.
///
/// Returns `Ok(None)` when no leaf exists there. Written lines land in the
/// node payload immediately; the drive's unmount flush persists them.
pub fn open_leaf_writer<'a>(
    drives: &'a mut DriveSet,
    path: &str,
    namespace: Option<&str>,
) -> Result<Option<LeafWriter<'a>>> {
    debug!(path, "open content writer");
    // Probe immutably first so error cases leave the store untouched.
    let Some((_, id)) = resolve_leaf(drives, path, namespace)? else {
        return Ok(None);
    };

    let drive = split_drive(path).0.expect("resolve_leaf checked the drive");
    let doc = drives
        .get_mut(drive)
        .expect("resolve_leaf checked the drive")
        .document_mut();
    let node = doc.node_mut(id)?;
    // Overwrite mode: an existing payload is truncated at open.
    node.text.clear();
    Ok(Some(LeafWriter { node }))
}

/// Truncate the payload of the leaf at `path`.
///
/// Unlike opening a writer, clearing a missing item is an error.
pub fn clear_content(drives: &mut DriveSet, path: &str, namespace: Option<&str>) -> Result<()> {
    debug!(path, "clear content");
    match open_leaf_writer(drives, path, namespace)? {
        Some(_writer) => Ok(()),
        None => Err(ContentError::NotFound { path: path.into() }),
    }
}

/// A read cursor over a leaf payload snapshot.
#[derive(Debug)]
pub struct LeafReader {
    lines: Vec<String>,
    cursor: usize,
}

impl ContentReader for LeafReader {
    fn read_lines(&mut self, count: i64) -> Result<Vec<String>> {
        let remaining = self.lines.len() - self.cursor;
        let take = if count <= 0 {
            remaining
        } else {
            remaining.min(count as usize)
        };
        let out = self.lines[self.cursor..self.cursor + take].to_vec();
        self.cursor += take;
        debug!(lines = out.len(), "content read");
        Ok(out)
    }
}

/// A write cursor over a leaf payload.
///
/// Holds a mutable borrow of the drive's document for its whole lifetime,
/// which is what guarantees no concurrent stream can touch the same node.
#[derive(Debug)]
pub struct LeafWriter<'a> {
    node: &'a mut Node,
}

impl ContentWriter for LeafWriter<'_> {
    fn write_lines(&mut self, lines: &[&str]) -> Result<()> {
        for line in lines {
            self.node.text.push_str(line);
            self.node.text.push('\n');
        }
        debug!(lines = lines.len(), node = %self.node.name, "content written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use canopy_drive::StoreFormat;
    use canopy_tree::NodeKind;

    use super::*;

    /// Mount a drive `lib` with root -> folder -> { memo }, where memo is
    /// a three-line text leaf.
    fn mounted(dir: &Path) -> DriveSet {
        let store = dir.join("store.json");
        let mut doc = TreeDocument::new();
        let folder = doc.create_node(NodeKind::Element, "folder", None).unwrap();
        doc.append_child(doc.root(), folder).unwrap();
        let memo = doc.create_node(NodeKind::Text, "memo", None).unwrap();
        doc.node_mut(memo).unwrap().text = "one\ntwo\nthree\n".into();
        doc.append_child(folder, memo).unwrap();
        doc.save_json(&store).unwrap();

        let mut drives = DriveSet::new();
        drives.mount("lib", &store, StoreFormat::Json).unwrap();
        drives
    }

    #[test]
    fn read_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let drives = mounted(dir.path());

        let mut reader = open_leaf_reader(&drives, "lib:/folder/memo", None)
            .unwrap()
            .unwrap();
        assert_eq!(reader.read_lines(0).unwrap(), vec!["one", "two", "three"]);
        // Cursor is exhausted.
        assert!(reader.read_lines(0).unwrap().is_empty());
    }

    #[test]
    fn read_counted_stops_at_end() {
        let dir = tempfile::tempdir().unwrap();
        let drives = mounted(dir.path());

        let mut reader = open_leaf_reader(&drives, "lib:/folder/memo", None)
            .unwrap()
            .unwrap();
        assert_eq!(reader.read_lines(2).unwrap(), vec!["one", "two"]);
        assert_eq!(reader.read_lines(10).unwrap(), vec!["three"]);
        reader.close().unwrap();
    }

    #[test]
    fn reader_on_container_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let drives = mounted(dir.path());

        assert!(matches!(
            open_leaf_reader(&drives, "lib:/folder", None),
            Err(ContentError::NoContent { .. })
        ));
    }

    #[test]
    fn reader_on_missing_leaf_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let drives = mounted(dir.path());

        assert!(open_leaf_reader(&drives, "lib:/folder/ghost", None)
            .unwrap()
            .is_none());
    }

    #[test]
    fn reader_without_drive_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let drives = mounted(dir.path());

        assert!(matches!(
            open_leaf_reader(&drives, "ghost:/folder/memo", None),
            Err(ContentError::DriveNotFound { .. })
        ));
        assert!(matches!(
            open_leaf_reader(&drives, "", None),
            Err(ContentError::InvalidPath { .. })
        ));
    }

    #[test]
    fn writer_truncates_then_appends() {
        let dir = tempfile::tempdir().unwrap();
        let mut drives = mounted(dir.path());

        {
            let mut writer = open_leaf_writer(&mut drives, "lib:/folder/memo", None)
                .unwrap()
                .unwrap();
            writer.write_lines(&["fresh", "content"]).unwrap();
            writer.close().unwrap();
        }

        let mut reader = open_leaf_reader(&drives, "lib:/folder/memo", None)
            .unwrap()
            .unwrap();
        assert_eq!(reader.read_lines(0).unwrap(), vec!["fresh", "content"]);
    }

    #[test]
    fn writer_on_container_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut drives = mounted(dir.path());

        assert!(matches!(
            open_leaf_writer(&mut drives, "lib:/folder", None),
            Err(ContentError::NoContent { .. })
        ));
    }

    #[test]
    fn seek_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let mut drives = mounted(dir.path());

        let mut reader = open_leaf_reader(&drives, "lib:/folder/memo", None)
            .unwrap()
            .unwrap();
        assert!(matches!(reader.seek(3), Err(ContentError::SeekUnsupported)));

        let mut writer = open_leaf_writer(&mut drives, "lib:/folder/memo", None)
            .unwrap()
            .unwrap();
        assert!(matches!(writer.seek(0), Err(ContentError::SeekUnsupported)));
    }

    #[test]
    fn clear_content_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let mut drives = mounted(dir.path());

        clear_content(&mut drives, "lib:/folder/memo", None).unwrap();
        let mut reader = open_leaf_reader(&drives, "lib:/folder/memo", None)
            .unwrap()
            .unwrap();
        assert!(reader.read_lines(0).unwrap().is_empty());
    }

    #[test]
    fn clear_content_on_missing_leaf_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut drives = mounted(dir.path());

        assert!(matches!(
            clear_content(&mut drives, "lib:/folder/ghost", None),
            Err(ContentError::NotFound { .. })
        ));
    }
}
