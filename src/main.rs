//! Main entry point for the rangeseek CLI application.
//!
//! Opens a local file or an HTTP URL as a seekable stream, seeks, and copies
//! the requested bytes to stdout.

use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use rangeseek::{
    Cli, CountingSource, HttpRangeSource, LocalFileSource, RangeReader, RangeSource,
    SeekableByteStream,
};

/// `RUST_LOG` directives on top of an `info` default
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&std::env::var("RUST_LOG").unwrap_or_default()))
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    if cli.is_http_url() {
        // Keep a typed handle so transfer statistics can be reported
        let http = Arc::new(HttpRangeSource::new(cli.file.clone())?);
        let source = Arc::new(CountingSource::new(http.clone()));
        dump(source.clone(), &cli)?;

        if cli.stats {
            print_stats(&*source, &cli);
            eprintln!(
                "Total bytes transferred: {}",
                format_size(http.transferred_bytes())
            );
        }
    } else {
        let local = Arc::new(LocalFileSource::open(&cli.file)?);
        let source = Arc::new(CountingSource::new(local));
        dump(source.clone(), &cli)?;

        if cli.stats {
            print_stats(&*source, &cli);
        }
    }

    Ok(())
}

/// Seek as requested and copy up to `--length` bytes to stdout.
fn dump<S: RangeSource + 'static>(source: Arc<CountingSource<S>>, cli: &Cli) -> Result<()> {
    let mut reader = RangeReader::new(source, cli.capacity())?;
    let start = reader.seek(cli.offset, cli.whence.into())?;

    let mut remaining = cli.length.unwrap_or(u64::MAX);
    let mut stdout = std::io::stdout().lock();
    let chunk_size = cli.chunk_size() as u64;

    while remaining > 0 {
        let want = remaining.min(chunk_size) as usize;
        let chunk = reader.read(Some(want))?;
        if chunk.is_empty() {
            break;
        }
        stdout.write_all(&chunk)?;
        remaining -= chunk.len() as u64;
    }
    stdout.flush()?;

    if !cli.quiet {
        tracing::info!(
            start,
            end = reader.tell(),
            size = reader.size(),
            "copied {}",
            format_size(reader.tell() - start)
        );
    }

    if let (true, RangeReader::Buffered(buffered)) = (cli.stats, &reader) {
        let stats = buffered.stats();
        eprintln!("Cache hits: {}, misses: {}", stats.hits, stats.misses);
    }

    Ok(())
}

fn print_stats<S: RangeSource>(source: &CountingSource<S>, cli: &Cli) {
    let mode = if cli.raw { "raw" } else { "buffered" };
    eprintln!(
        "Range fetches ({}): {}, bytes fetched: {}",
        mode,
        source.fetches(),
        format_size(source.fetched_bytes())
    );
}

/// Format a byte size into a human-readable string.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_size(500), "500 bytes");
/// assert_eq!(format_size(1536), "1.50 KB");
/// assert_eq!(format_size(1048576), "1.00 MB");
/// ```
fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
