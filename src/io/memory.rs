use super::{RangeSource, check_range};
use anyhow::Result;

/// In-memory object, mostly useful for tests and for wrapping data that is
/// already downloaded
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    data: Vec<u8>,
}

impl MemorySource {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl RangeSource for MemorySource {
    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn fetch_range(&self, start: u64, end: u64) -> Result<Vec<u8>> {
        check_range(start, end, self.size())?;
        Ok(self.data[start as usize..end as usize].to_vec())
    }
}
