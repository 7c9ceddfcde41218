use super::RangeSource;
use anyhow::Result;
use std::sync::atomic::{AtomicU64, Ordering};

/// Wraps a source and counts the range fetches that reach it.
///
/// Failed fetches are counted as calls but add nothing to
/// [`fetched_bytes`](Self::fetched_bytes).
pub struct CountingSource<S> {
    inner: S,
    fetches: AtomicU64,
    fetched_bytes: AtomicU64,
}

impl<S: RangeSource> CountingSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            fetches: AtomicU64::new(0),
            fetched_bytes: AtomicU64::new(0),
        }
    }

    /// Number of `fetch_range` calls so far
    pub fn fetches(&self) -> u64 {
        self.fetches.load(Ordering::Relaxed)
    }

    /// Total bytes returned by successful fetches
    pub fn fetched_bytes(&self) -> u64 {
        self.fetched_bytes.load(Ordering::Relaxed)
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: RangeSource> RangeSource for CountingSource<S> {
    fn size(&self) -> u64 {
        self.inner.size()
    }

    fn fetch_range(&self, start: u64, end: u64) -> Result<Vec<u8>> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        let data = self.inner.fetch_range(start, end)?;
        self.fetched_bytes
            .fetch_add(data.len() as u64, Ordering::Relaxed);
        Ok(data)
    }
}
