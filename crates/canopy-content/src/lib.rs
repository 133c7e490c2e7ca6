//! Content streams for the canopy namespace.
//!
//! Navigation addresses nodes; content streams read and write what is
//! *inside* a leaf. A stream is a transient cursor over one node's payload
//! (or one real file), opened for either reading or writing, never both,
//! and released when closed or dropped. The owning drive context always
//! outlives its streams.
//!
//! Two stream families share the [`ContentReader`] / [`ContentWriter`]
//! contracts:
//!
//! - leaf streams ([`open_leaf_reader`], [`open_leaf_writer`]) over the
//!   payload of a leaf node in a mounted drive
//! - file streams ([`FileContentReader`], [`FileContentWriter`]) over real
//!   files on disk
//!
//! Containers have no content: opening a stream on one is a fatal
//! invalid-operation error. Opening a reader or writer at a path where no
//! leaf exists yields `Ok(None)`. Seeking is not supported by this content
//! model — every seek fails.
//!
//! This crate is independent of the navigation engine: it resolves paths
//! against a [`DriveSet`](canopy_drive::DriveSet) directly.

pub mod error;
pub mod file;
pub mod leaf;
pub mod traits;

pub use error::{ContentError, Result};
pub use file::{clear_file_content, FileContentReader, FileContentWriter};
pub use leaf::{clear_content, open_leaf_reader, open_leaf_writer, LeafReader, LeafWriter};
pub use traits::{ContentReader, ContentWriter};
