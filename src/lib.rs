//! # rangeseek
//!
//! Seekable, read-only byte streams over remote objects using Range requests.
//!
//! A [`RangeSource`] is anything with a fixed size that can hand back an
//! arbitrary byte range: an object behind an HTTP server that honours
//! `Range`, a local file, a buffer in memory. The readers in this crate put
//! file semantics on top of it (`seek`, `tell`, `read`) so callers never deal
//! with ranges themselves.
//!
//! ## Readers
//!
//! - [`RawSeekableReader`]: one range fetch per read, no caching
//! - [`BufferedSeekableReader`]: keeps the last fetched window and serves
//!   nearby reads from it
//! - [`RangeReader`]: either of the above, picked at runtime
//!
//! All of them implement [`SeekableByteStream`] as well as
//! [`std::io::Read`] and [`std::io::Seek`].
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use rangeseek::{BufferedSeekableReader, HttpRangeSource, SeekableByteStream, Whence};
//!
//! fn main() -> anyhow::Result<()> {
//!     let source = Arc::new(HttpRangeSource::new("https://example.com/data.bin")?);
//!     let mut reader = BufferedSeekableReader::new(source, 64 * 1024)?;
//!
//!     // Last 16 bytes of the object
//!     reader.seek(-16, Whence::End)?;
//!     let tail = reader.read(Some(16))?;
//!     println!("{} bytes at {}", tail.len(), reader.tell() - 16);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod error;
pub mod io;
pub mod stream;

pub use cli::Cli;
pub use error::{Result, StreamError};
pub use io::{
    CountingSource, HttpConfig, HttpRangeSource, LocalFileSource, MemorySource, RangeSource,
};
pub use stream::{
    BufferedSeekableReader, CacheStats, DEFAULT_BUFFER_CAPACITY, RangeReader, RawSeekableReader,
    SeekableByteStream, Whence,
};
