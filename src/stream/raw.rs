use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::io::RangeSource;

use super::position::{Cursor, fetch_exact};
use super::{SeekableByteStream, Whence};

/// Unbuffered reader: every non-empty read is one range fetch.
///
/// Good for a handful of scattered reads. For sequential or overlapping
/// access use [`BufferedSeekableReader`](super::BufferedSeekableReader).
pub struct RawSeekableReader<S: RangeSource + ?Sized> {
    source: Arc<S>,
    cursor: Cursor,
}

impl<S: RangeSource + ?Sized> RawSeekableReader<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            cursor: Cursor::default(),
        }
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    /// [`SeekableByteStream::read`], callable with `std::io::Read` in scope.
    pub fn read(&mut self, n: Option<usize>) -> Result<Vec<u8>> {
        SeekableByteStream::read(self, n)
    }

    /// [`SeekableByteStream::seek`], callable with `std::io::Seek` in scope.
    pub fn seek(&mut self, offset: i64, whence: Whence) -> Result<u64> {
        SeekableByteStream::seek(self, offset, whence)
    }
}

impl<S: RangeSource + ?Sized> SeekableByteStream for RawSeekableReader<S> {
    fn size(&self) -> u64 {
        self.source.size()
    }

    fn tell(&self) -> u64 {
        self.cursor.get()
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> Result<u64> {
        let size = self.size();
        self.cursor.seek(offset, whence, size)
    }

    fn seek_to(&mut self, position: u64) -> u64 {
        self.cursor.set(position)
    }

    fn read(&mut self, n: Option<usize>) -> Result<Vec<u8>> {
        let to_read = self.cursor.span(n, self.size());
        if to_read == 0 {
            return Ok(Vec::new());
        }

        let start = self.cursor.get();
        debug!(start, len = to_read, "range fetch");
        let data = fetch_exact(&*self.source, start, start + to_read)?;
        self.cursor.advance(to_read);
        Ok(data)
    }
}
