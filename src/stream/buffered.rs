use std::ops::Range;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::{Result, StreamError};
use crate::io::RangeSource;

use super::position::{Cursor, fetch_exact};
use super::{SeekableByteStream, Whence};

/// Default window size for buffered readers (64 KiB).
pub const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

/// How reads on a [`BufferedSeekableReader`] were served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Reads served entirely from the cached window
    pub hits: u64,
    /// Reads that fetched a new window
    pub misses: u64,
}

/// Contiguous bytes `[start, start + data.len())` of the object.
struct Window {
    start: u64,
    data: Vec<u8>,
}

impl Window {
    fn end(&self) -> u64 {
        self.start + self.data.len() as u64
    }

    fn contains(&self, start: u64, end: u64) -> bool {
        self.start <= start && end <= self.end()
    }

    fn slice(&self, start: u64, end: u64) -> &[u8] {
        let from = (start - self.start) as usize;
        let to = (end - self.start) as usize;
        &self.data[from..to]
    }
}

/// Reader that caches the most recently fetched window of the object.
///
/// A read whose span lies inside the window is copied out of it. Any other
/// read fetches a fresh window starting at the current position, sized to
/// the larger of the capacity and the request (never past the end of the
/// object), and throws the old window away. There is only ever one window.
pub struct BufferedSeekableReader<S: RangeSource + ?Sized> {
    source: Arc<S>,
    cursor: Cursor,
    capacity: usize,
    window: Option<Window>,
    stats: CacheStats,
}

impl<S: RangeSource + ?Sized> BufferedSeekableReader<S> {
    /// Create a reader with a window of `capacity` bytes.
    ///
    /// A zero capacity is rejected.
    pub fn new(source: Arc<S>, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(StreamError::invalid_argument(
                "buffer capacity must be positive",
            ));
        }
        Ok(Self::empty(source, capacity))
    }

    /// Create a reader with a [`DEFAULT_BUFFER_CAPACITY`] window.
    pub fn with_default_capacity(source: Arc<S>) -> Self {
        Self::empty(source, DEFAULT_BUFFER_CAPACITY)
    }

    fn empty(source: Arc<S>, capacity: usize) -> Self {
        Self {
            source,
            cursor: Cursor::default(),
            capacity,
            window: None,
            stats: CacheStats::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Span of the object currently cached, if any.
    pub fn window(&self) -> Option<Range<u64>> {
        self.window.as_ref().map(|w| w.start..w.end())
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
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

impl<S: RangeSource + ?Sized> SeekableByteStream for BufferedSeekableReader<S> {
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
        let size = self.size();
        let to_read = self.cursor.span(n, size);
        if to_read == 0 {
            return Ok(Vec::new());
        }

        let start = self.cursor.get();
        let end = start + to_read;

        if let Some(window) = self.window.as_ref().filter(|w| w.contains(start, end)) {
            trace!(start, end, "window hit");
            let data = window.slice(start, end).to_vec();
            self.stats.hits += 1;
            self.cursor.advance(to_read);
            return Ok(data);
        }

        let fetch_len = to_read.max(self.capacity as u64);
        let fetch_end = start.saturating_add(fetch_len).min(size);
        debug!(start, end = fetch_end, requested = to_read, "window miss");

        // The window is only replaced once the fetch has fully succeeded
        let data = fetch_exact(&*self.source, start, fetch_end)?;
        let window = self.window.insert(Window { start, data });
        let out = window.slice(start, end).to_vec();

        self.stats.misses += 1;
        self.cursor.advance(to_read);
        Ok(out)
    }
}
