//! Seekable, read-only byte streams over a [`RangeSource`](crate::io::RangeSource).
//!
//! Two readers implement [`SeekableByteStream`]:
//!
//! - [`RawSeekableReader`] issues exactly one range fetch per non-empty read.
//! - [`BufferedSeekableReader`] keeps the most recently fetched window and
//!   serves reads that fall inside it without touching the source. A miss
//!   fetches `max(capacity, request)` bytes from the current position and
//!   replaces the window.
//!
//! [`RangeReader`] picks one of the two at runtime.
//!
//! Reads at or past the end of the object return an empty buffer and leave
//! the position alone. Seeking past the end is allowed; seeking before the
//! start is an [`InvalidArgument`](crate::StreamError::InvalidArgument) error.

mod buffered;
mod position;
mod raw;
mod reader;
mod std_io;

pub use buffered::{BufferedSeekableReader, CacheStats, DEFAULT_BUFFER_CAPACITY};
pub use raw::RawSeekableReader;
pub use reader::RangeReader;

use crate::error::{Result, StreamError};

/// Origin for [`SeekableByteStream::seek`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Whence {
    /// From the start of the object
    #[default]
    Set,
    /// From the current position
    Cur,
    /// From the end of the object
    End,
}

/// File-like access to a fixed-size, read-only object.
///
/// `read` and `seek` share their names with [`std::io::Read`] and
/// [`std::io::Seek`], which the readers also implement. The concrete readers
/// carry inherent `read`/`seek` methods with this trait's signatures, so
/// method-call syntax on them picks this API even with the std traits in
/// scope. Through a generic `T: SeekableByteStream + Read` bound, use
/// `SeekableByteStream::read(&mut r, ..)` instead.
pub trait SeekableByteStream {
    /// Total size of the underlying object. Never fetches.
    fn size(&self) -> u64;

    /// Current logical position.
    fn tell(&self) -> u64;

    /// Move the position relative to `whence` and return the new position.
    ///
    /// Fails with [`StreamError::InvalidArgument`] when the target would be
    /// negative; the position is unchanged in that case. Targets past the end
    /// are fine.
    fn seek(&mut self, offset: i64, whence: Whence) -> Result<u64>;

    /// Move to an absolute position. Never fails: there is no upper bound.
    fn seek_to(&mut self, position: u64) -> u64;

    /// Read up to `n` bytes, or everything up to the end when `n` is `None`.
    ///
    /// Returns an empty buffer without moving the position when nothing is
    /// left to read.
    fn read(&mut self, n: Option<usize>) -> Result<Vec<u8>>;

    /// Read from the current position to the end of the object.
    fn read_to_end_bytes(&mut self) -> Result<Vec<u8>> {
        self.read(None)
    }

    fn readable(&self) -> bool {
        true
    }

    fn seekable(&self) -> bool {
        true
    }

    fn writable(&self) -> bool {
        false
    }

    /// Always fails: the stream is read-only.
    fn write(&mut self, _data: &[u8]) -> Result<usize> {
        Err(StreamError::NotSupported { operation: "write" })
    }

    /// Always fails: the stream is read-only.
    fn truncate(&mut self, _size: Option<u64>) -> Result<u64> {
        Err(StreamError::NotSupported {
            operation: "truncate",
        })
    }
}
