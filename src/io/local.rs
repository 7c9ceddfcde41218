use super::{RangeSource, check_range};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Local file source with positional reads
pub struct LocalFileSource {
    path: PathBuf,
    #[cfg(unix)]
    file: std::fs::File,
    #[cfg(not(unix))]
    file: std::sync::Mutex<std::fs::File>,
    size: u64,
}

impl LocalFileSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = std::fs::File::open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let size = file.metadata()?.len();

        Ok(Self {
            path,
            #[cfg(unix)]
            file,
            #[cfg(not(unix))]
            file: std::sync::Mutex::new(file),
            size,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RangeSource for LocalFileSource {
    fn size(&self) -> u64 {
        self.size
    }

    fn fetch_range(&self, start: u64, end: u64) -> Result<Vec<u8>> {
        check_range(start, end, self.size)?;
        let mut buf = vec![0u8; (end - start) as usize];
        if buf.is_empty() {
            return Ok(buf);
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::FileExt;
            self.file.read_exact_at(&mut buf, start)?;
        }

        #[cfg(not(unix))]
        {
            use std::io::{Read, Seek, SeekFrom};
            // No pread here, so seek and read under the lock
            let mut file = self
                .file
                .lock()
                .map_err(|_| anyhow::anyhow!("File handle lock poisoned"))?;
            file.seek(SeekFrom::Start(start))?;
            file.read_exact(&mut buf)?;
        }

        Ok(buf)
    }
}
