use std::sync::Arc;

use crate::error::Result;
use crate::io::RangeSource;

use super::{BufferedSeekableReader, RawSeekableReader, SeekableByteStream, Whence};

/// Either reader behind one type, chosen at runtime.
pub enum RangeReader<S: RangeSource + ?Sized> {
    Raw(RawSeekableReader<S>),
    Buffered(BufferedSeekableReader<S>),
}

impl<S: RangeSource + ?Sized> RangeReader<S> {
    /// Buffered with the given capacity, or raw when `capacity` is `None`.
    pub fn new(source: Arc<S>, capacity: Option<usize>) -> Result<Self> {
        Ok(match capacity {
            Some(capacity) => {
                RangeReader::Buffered(BufferedSeekableReader::new(source, capacity)?)
            }
            None => RangeReader::Raw(RawSeekableReader::new(source)),
        })
    }

    pub fn is_buffered(&self) -> bool {
        matches!(self, RangeReader::Buffered(_))
    }

    pub fn source(&self) -> &Arc<S> {
        match self {
            RangeReader::Raw(r) => r.source(),
            RangeReader::Buffered(r) => r.source(),
        }
    }

    /// [`SeekableByteStream::read`], callable with `std::io::Read` in scope.
    pub fn read(&mut self, n: Option<usize>) -> Result<Vec<u8>> {
        SeekableByteStream::read(self, n)
    }

    /// [`SeekableByteStream::seek`], callable with `std::io::Seek` in scope.
    pub fn seek(&mut self, offset: i64, whence: Whence) -> Result<u64> {
        SeekableByteStream::seek(self, offset, whence)
    }

    fn stream(&self) -> &dyn SeekableByteStream {
        match self {
            RangeReader::Raw(r) => r,
            RangeReader::Buffered(r) => r,
        }
    }

    fn stream_mut(&mut self) -> &mut dyn SeekableByteStream {
        match self {
            RangeReader::Raw(r) => r,
            RangeReader::Buffered(r) => r,
        }
    }
}

impl<S: RangeSource + ?Sized> From<RawSeekableReader<S>> for RangeReader<S> {
    fn from(reader: RawSeekableReader<S>) -> Self {
        RangeReader::Raw(reader)
    }
}

impl<S: RangeSource + ?Sized> From<BufferedSeekableReader<S>> for RangeReader<S> {
    fn from(reader: BufferedSeekableReader<S>) -> Self {
        RangeReader::Buffered(reader)
    }
}

impl<S: RangeSource + ?Sized> SeekableByteStream for RangeReader<S> {
    fn size(&self) -> u64 {
        self.stream().size()
    }

    fn tell(&self) -> u64 {
        self.stream().tell()
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> Result<u64> {
        self.stream_mut().seek(offset, whence)
    }

    fn seek_to(&mut self, position: u64) -> u64 {
        self.stream_mut().seek_to(position)
    }

    fn read(&mut self, n: Option<usize>) -> Result<Vec<u8>> {
        self.stream_mut().read(n)
    }

    fn readable(&self) -> bool {
        self.stream().readable()
    }

    fn seekable(&self) -> bool {
        self.stream().seekable()
    }

    fn writable(&self) -> bool {
        self.stream().writable()
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.stream_mut().write(data)
    }

    fn truncate(&mut self, size: Option<u64>) -> Result<u64> {
        self.stream_mut().truncate(size)
    }
}
