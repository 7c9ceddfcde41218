use crate::error::{Result, StreamError};
use crate::io::RangeSource;

use super::Whence;

/// Logical read cursor shared by both readers.
///
/// The cursor may sit past the end of the object; it only moves on a
/// successful seek or a non-empty read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Cursor {
    position: u64,
}

impl Cursor {
    pub(crate) fn get(&self) -> u64 {
        self.position
    }

    /// Absolute move; any `u64` is a valid position.
    pub(crate) fn set(&mut self, position: u64) -> u64 {
        self.position = position;
        position
    }

    pub(crate) fn seek(&mut self, offset: i64, whence: Whence, size: u64) -> Result<u64> {
        let base = match whence {
            Whence::Set => 0,
            Whence::Cur => self.position,
            Whence::End => size,
        };
        let target = i128::from(base) + i128::from(offset);

        if target < 0 {
            return Err(StreamError::invalid_argument(format!(
                "seek to negative position {target}"
            )));
        }
        let target = u64::try_from(target).map_err(|_| {
            StreamError::invalid_argument(format!("seek position {target} overflows"))
        })?;

        self.position = target;
        Ok(target)
    }

    /// Bytes a `read(n)` should return from here: `n` (or everything left when
    /// `None`) clamped to what remains before `size`.
    pub(crate) fn span(&self, n: Option<usize>, size: u64) -> u64 {
        let available = size.saturating_sub(self.position);
        match n {
            Some(n) => available.min(n as u64),
            None => available,
        }
    }

    pub(crate) fn advance(&mut self, len: u64) {
        self.position += len;
    }
}

/// Fetch `[start, end)` and insist on getting exactly that many bytes back.
pub(crate) fn fetch_exact<S: RangeSource + ?Sized>(
    source: &S,
    start: u64,
    end: u64,
) -> Result<Vec<u8>> {
    let data = source.fetch_range(start, end)?;
    let expected = end - start;
    if data.len() as u64 != expected {
        return Err(StreamError::ShortRead {
            expected,
            actual: data.len() as u64,
        });
    }
    Ok(data)
}
