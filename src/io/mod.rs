mod counting;
mod http;
mod local;
mod memory;

pub use counting::CountingSource;
pub use http::{HttpConfig, HttpRangeSource};
pub use local::LocalFileSource;
pub use memory::MemorySource;

use anyhow::Result;
use std::sync::Arc;

/// Trait for a fixed-size object that can be fetched by byte range
pub trait RangeSource: Send + Sync {
    /// Total size of the object in bytes
    fn size(&self) -> u64;

    /// Fetch the bytes in `[start, end)`.
    ///
    /// Callers guarantee `start <= end <= self.size()`. The returned buffer
    /// should hold exactly `end - start` bytes; readers treat anything else
    /// as a transport failure.
    fn fetch_range(&self, start: u64, end: u64) -> Result<Vec<u8>>;
}

impl<S: RangeSource + ?Sized> RangeSource for Arc<S> {
    fn size(&self) -> u64 {
        (**self).size()
    }

    fn fetch_range(&self, start: u64, end: u64) -> Result<Vec<u8>> {
        (**self).fetch_range(start, end)
    }
}

impl<S: RangeSource + ?Sized> RangeSource for Box<S> {
    fn size(&self) -> u64 {
        (**self).size()
    }

    fn fetch_range(&self, start: u64, end: u64) -> Result<Vec<u8>> {
        (**self).fetch_range(start, end)
    }
}

/// Reject ranges that fall outside `[0, size]` or run backwards.
pub(crate) fn check_range(start: u64, end: u64, size: u64) -> Result<()> {
    if start > end || end > size {
        anyhow::bail!("Invalid range {}..{} for object of {} bytes", start, end, size);
    }
    Ok(())
}
