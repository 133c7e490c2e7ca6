//! The [`ContentReader`] and [`ContentWriter`] stream contracts.

use crate::error::{ContentError, Result};

/// A transient, line-oriented read cursor over one item's content.
///
/// Readers are released by [`close`](ContentReader::close) or by dropping
/// them; release happens on every exit path.
pub trait ContentReader {
    /// Read up to `count` lines, stopping early at end of stream.
    ///
    /// `count <= 0` means "read to the end".
    fn read_lines(&mut self, count: i64) -> Result<Vec<String>>;

    /// Seeking is not supported by this content model.
    fn seek(&mut self, _offset: i64) -> Result<()> {
        Err(ContentError::SeekUnsupported)
    }

    /// Release the cursor. Idempotent.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A transient, line-oriented write cursor over one item's content.
///
/// Writers open in overwrite (truncate) mode and append each written line
/// in order. Buffered implementations flush on
/// [`close`](ContentWriter::close) and on drop.
pub trait ContentWriter {
    /// Append each line, in order.
    fn write_lines(&mut self, lines: &[&str]) -> Result<()>;

    /// Seeking is not supported by this content model.
    fn seek(&mut self, _offset: i64) -> Result<()> {
        Err(ContentError::SeekUnsupported)
    }

    /// Flush and release the cursor. Idempotent.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
