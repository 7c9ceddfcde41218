//! `std::io::{Read, Seek}` for the readers, so they can be handed to anything
//! that expects a `Read + Seek`.

use std::io::{self, SeekFrom};

use crate::io::RangeSource;

use super::{BufferedSeekableReader, RangeReader, RawSeekableReader, SeekableByteStream, Whence};

fn read_into<T: SeekableByteStream + ?Sized>(stream: &mut T, buf: &mut [u8]) -> io::Result<usize> {
    let data = stream.read(Some(buf.len()))?;
    buf[..data.len()].copy_from_slice(&data);
    Ok(data.len())
}

fn seek_from<T: SeekableByteStream + ?Sized>(stream: &mut T, pos: SeekFrom) -> io::Result<u64> {
    let position = match pos {
        SeekFrom::Start(position) => stream.seek_to(position),
        SeekFrom::Current(offset) => stream.seek(offset, Whence::Cur)?,
        SeekFrom::End(offset) => stream.seek(offset, Whence::End)?,
    };
    Ok(position)
}

impl<S: RangeSource + ?Sized> io::Read for RawSeekableReader<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        read_into(self, buf)
    }
}

impl<S: RangeSource + ?Sized> io::Seek for RawSeekableReader<S> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        seek_from(self, pos)
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.tell())
    }
}

impl<S: RangeSource + ?Sized> io::Read for BufferedSeekableReader<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        read_into(self, buf)
    }
}

impl<S: RangeSource + ?Sized> io::Seek for BufferedSeekableReader<S> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        seek_from(self, pos)
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.tell())
    }
}

impl<S: RangeSource + ?Sized> io::Read for RangeReader<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        read_into(self, buf)
    }
}

impl<S: RangeSource + ?Sized> io::Seek for RangeReader<S> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        seek_from(self, pos)
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.tell())
    }
}
