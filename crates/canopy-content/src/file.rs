//! Content streams over real files.
//!
//! The filesystem counterpart of the leaf streams: files are the leaves,
//! directories the containers. Readers and writers are buffered; writers
//! truncate at open and flush on close and on drop.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{ContentError, Result};
use crate::traits::{ContentReader, ContentWriter};

/// A buffered line reader over one file.
#[derive(Debug)]
pub struct FileContentReader {
    path: PathBuf,
    reader: BufReader<File>,
}

impl FileContentReader {
    /// Open a read cursor over the file at `path`.
    ///
    /// A directory target is a fatal error — directories have no content.
    /// Returns `Ok(None)` when no file exists there.
    pub fn open(path: &Path) -> Result<Option<Self>> {
        debug!(path = %path.display(), "open file reader");
        if path.is_dir() {
            return Err(ContentError::NoContent {
                path: path.display().to_string(),
            });
        }
        if !path.exists() {
            return Ok(None);
        }
        let file = File::open(path)?;
        Ok(Some(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
        }))
    }

    /// The file this reader was opened on.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContentReader for FileContentReader {
    fn read_lines(&mut self, count: i64) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        let to_end = count <= 0;
        loop {
            if !to_end && lines.len() as i64 >= count {
                break;
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                break;
            }
            while line.ends_with('\n') || line.ends_with('\r') {
                line.pop();
            }
            lines.push(line);
        }
        debug!(path = %self.path.display(), lines = lines.len(), "file content read");
        Ok(lines)
    }
}

/// A buffered line writer over one file, opened in truncate mode.
#[derive(Debug)]
pub struct FileContentWriter {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileContentWriter {
    /// Open a write cursor over the file at `path`, truncating it.
    ///
    /// A directory target is a fatal error. Returns `Ok(None)` when no
    /// file exists there — writing creates content, not items.
    pub fn open(path: &Path) -> Result<Option<Self>> {
        debug!(path = %path.display(), "open file writer");
        if path.is_dir() {
            return Err(ContentError::NoContent {
                path: path.display().to_string(),
            });
        }
        if !path.exists() {
            return Ok(None);
        }
        let file = OpenOptions::new().write(true).truncate(true).open(path)?;
        Ok(Some(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        }))
    }

    /// The file this writer was opened on.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContentWriter for FileContentWriter {
    fn write_lines(&mut self, lines: &[&str]) -> Result<()> {
        for line in lines {
            writeln!(self.writer, "{line}")?;
        }
        debug!(path = %self.path.display(), lines = lines.len(), "file content written");
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl Drop for FileContentWriter {
    fn drop(&mut self) {
        if let Err(err) = self.writer.flush() {
            warn!(path = %self.path.display(), error = %err, "flush on drop failed");
        }
    }
}

/// Truncate the file at `path`. A directory is a fatal error; so is a
/// missing file — there is nothing to clear.
pub fn clear_file_content(path: &Path) -> Result<()> {
    debug!(path = %path.display(), "clear file content");
    if path.is_dir() {
        return Err(ContentError::NoContent {
            path: path.display().to_string(),
        });
    }
    if !path.exists() {
        return Err(ContentError::NotFound {
            path: path.display().to_string(),
        });
    }
    OpenOptions::new().write(true).truncate(true).open(path)?;
    Ok(())
}
