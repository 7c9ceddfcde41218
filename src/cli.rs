use clap::{Parser, ValueEnum};

use crate::stream::{DEFAULT_BUFFER_CAPACITY, Whence};

#[derive(Parser, Debug)]
#[command(name = "rangeseek")]
#[command(version)]
#[command(about = "Read byte ranges from local files or HTTP URLs", long_about = None)]
#[command(after_help = "Examples:\n  \
  rangeseek data.bin -o 1024 -n 16          dump 16 bytes at offset 1024\n  \
  rangeseek -o -16 -w end https://example.com/data.bin   last 16 bytes of a remote object\n  \
  rangeseek --raw --stats https://example.com/data.bin > copy.bin")]
pub struct Cli {
    /// File path or HTTP URL
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Seek offset (may be negative with -w cur or -w end)
    #[arg(short = 'o', long, default_value_t = 0, allow_negative_numbers = true)]
    pub offset: i64,

    /// Origin of the seek offset
    #[arg(short = 'w', long, value_enum, default_value_t = Origin::Set)]
    pub whence: Origin,

    /// Number of bytes to read (default: to the end)
    #[arg(short = 'n', long, value_name = "BYTES")]
    pub length: Option<u64>,

    /// Buffer window size in bytes
    #[arg(short = 'b', long, value_name = "BYTES", default_value_t = DEFAULT_BUFFER_CAPACITY)]
    pub buffer: usize,

    /// Disable buffering: one range request per read
    #[arg(long)]
    pub raw: bool,

    /// Print fetch and cache statistics to stderr
    #[arg(long)]
    pub stats: bool,

    /// Quiet mode
    #[arg(short = 'q')]
    pub quiet: bool,
}

/// Command line spelling of [`Whence`]
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Set,
    Cur,
    End,
}

impl From<Origin> for Whence {
    fn from(origin: Origin) -> Self {
        match origin {
            Origin::Set => Whence::Set,
            Origin::Cur => Whence::Cur,
            Origin::End => Whence::End,
        }
    }
}

impl Cli {
    pub fn is_http_url(&self) -> bool {
        self.file.starts_with("http://") || self.file.starts_with("https://")
    }

    /// Buffer capacity to use, `None` in raw mode
    pub fn capacity(&self) -> Option<usize> {
        (!self.raw).then_some(self.buffer)
    }

    /// Largest single read issued while copying to stdout
    pub fn chunk_size(&self) -> usize {
        self.buffer.max(1)
    }
}
