//! Integration tests for the seekable readers.
//!
//! Both readers run against the same in-memory object so their results can be
//! compared byte for byte, and a counting wrapper shows how many range
//! fetches reached the source.

use std::io::Write;
use std::sync::Arc;

use rangeseek::{
    BufferedSeekableReader, CountingSource, LocalFileSource, MemorySource, RangeReader,
    RawSeekableReader, SeekableByteStream, StreamError, Whence,
};
use rstest::rstest;

const CHANGELOG: &str = "2015-09-04\n\nModification to: misc,bas\n\nDetails can be found in\n\
changelog_details/20150904_misc_bas\n\n2015-08-31\n\nModification to: technical\n\n\
Details can be found in\nchangelog_details/20150831_technical\n\n2015-08-24\n\n\
Modification to: alignment_indices\n\nDetails can be found in\n\
changelog_details/20150824_alignment_indices\n";

type Counted = CountingSource<MemorySource>;

#[derive(Debug, Clone, Copy)]
enum Kind {
    Raw,
    Buffered(usize),
}

fn open(kind: Kind, data: &[u8]) -> (Arc<Counted>, RangeReader<Counted>) {
    let source = Arc::new(CountingSource::new(MemorySource::new(data)));
    let reader = match kind {
        Kind::Raw => RawSeekableReader::new(source.clone()).into(),
        Kind::Buffered(capacity) => BufferedSeekableReader::new(source.clone(), capacity)
            .unwrap()
            .into(),
    };
    (source, reader)
}

#[rstest]
fn capabilities(#[values(Kind::Raw, Kind::Buffered(64))] kind: Kind) {
    let (_, mut reader) = open(kind, CHANGELOG.as_bytes());
    assert!(reader.readable());
    assert!(reader.seekable());
    assert!(!reader.writable());

    assert!(matches!(
        reader.write(b""),
        Err(StreamError::NotSupported { .. })
    ));
    assert!(matches!(
        reader.truncate(None),
        Err(StreamError::NotSupported { .. })
    ));
}

#[rstest]
fn read_all(#[values(Kind::Raw, Kind::Buffered(64))] kind: Kind) {
    let content = CHANGELOG.as_bytes();
    let (_, mut reader) = open(kind, content);

    assert_eq!(reader.read(None).unwrap(), content);
    assert_eq!(reader.size(), content.len() as u64);
    assert_eq!(reader.tell(), reader.size());
}

#[rstest]
fn sequential_reads_concatenate(
    #[values(
        Kind::Raw,
        Kind::Buffered(1),
        Kind::Buffered(7),
        Kind::Buffered(64),
        Kind::Buffered(4096)
    )]
    kind: Kind,
    #[values(1, 3, 16, 100, 1000)] n: usize,
) {
    let content = CHANGELOG.as_bytes();
    let (_, mut reader) = open(kind, content);

    let mut out = Vec::new();
    loop {
        let chunk = reader.read(Some(n)).unwrap();
        if chunk.is_empty() {
            break;
        }
        assert!(chunk.len() <= n);
        out.extend_from_slice(&chunk);
    }
    assert_eq!(out, content);
    assert_eq!(reader.tell(), content.len() as u64);
}

#[rstest]
fn seek_scenario(#[values(Kind::Raw, Kind::Buffered(64))] kind: Kind) {
    let content = CHANGELOG.as_bytes();
    let size = content.len() as u64;
    let (_, mut reader) = open(kind, content);

    // read the first 16 bytes
    assert_eq!(reader.read(Some(16)).unwrap(), &content[..16]);
    assert_eq!(reader.tell(), 16);

    // back to the start
    reader.seek(0, Whence::Set).unwrap();
    assert_eq!(reader.read(Some(16)).unwrap(), &content[..16]);

    // relative forward
    reader.seek(16, Whence::Cur).unwrap();
    assert_eq!(reader.read(Some(16)).unwrap(), &content[32..48]);

    // relative backward
    reader.seek(-16, Whence::Cur).unwrap();
    assert_eq!(reader.read(Some(16)).unwrap(), &content[32..48]);

    // relative to end
    reader.seek(-16, Whence::End).unwrap();
    assert_eq!(reader.read(Some(16)).unwrap(), &content[content.len() - 16..]);
    assert_eq!(reader.tell(), size);

    // before the start
    let before = reader.tell();
    for (offset, whence) in [
        (-(size as i64) - 1, Whence::Cur),
        (-1, Whence::Set),
        (-(size as i64) - 1, Whence::End),
    ] {
        assert!(matches!(
            reader.seek(offset, whence),
            Err(StreamError::InvalidArgument { .. })
        ));
        assert_eq!(reader.tell(), before);
    }

    // past the end
    reader.seek(16, Whence::End).unwrap();
    assert!(reader.read(Some(16)).unwrap().is_empty());
    assert_eq!(reader.tell(), size + 16);
}

#[rstest]
fn tell_follows_seek(#[values(Kind::Raw, Kind::Buffered(64))] kind: Kind) {
    let (_, mut reader) = open(kind, CHANGELOG.as_bytes());
    let size = reader.size();

    assert_eq!(reader.seek(40, Whence::Set).unwrap(), 40);
    assert_eq!(reader.tell(), 40);

    let before = reader.tell();
    reader.seek(-25, Whence::Cur).unwrap();
    assert_eq!(reader.tell(), before - 25);

    reader.seek(-7, Whence::End).unwrap();
    assert_eq!(reader.tell(), size - 7);

    reader.seek(1000, Whence::End).unwrap();
    assert_eq!(reader.tell(), size + 1000);
}

#[rstest]
fn reads_past_end_are_idempotent(
    #[values(Kind::Raw, Kind::Buffered(64))] kind: Kind,
    #[values(0, 1, 50)] past: i64,
) {
    let (source, mut reader) = open(kind, CHANGELOG.as_bytes());
    let target = reader.seek(past, Whence::End).unwrap();

    for _ in 0..3 {
        assert!(reader.read(Some(16)).unwrap().is_empty());
        assert!(reader.read(None).unwrap().is_empty());
        assert_eq!(reader.tell(), target);
    }
    assert_eq!(source.fetches(), 0);
}

#[rstest]
fn random_access_matches_reference(
    #[values(Kind::Raw, Kind::Buffered(8), Kind::Buffered(64))] kind: Kind,
) {
    let content = CHANGELOG.as_bytes();
    let (_, mut reader) = open(kind, content);

    // A fixed, scattered access pattern: forward, backward, overlapping
    let spans = [
        (100, 20),
        (0, 1),
        (5, 60),
        (210, 30),
        (64, 64),
        (63, 2),
        (content.len() - 1, 1),
        (0, content.len()),
        (150, 0),
        (33, 33),
    ];
    for (start, len) in spans {
        reader.seek(start as i64, Whence::Set).unwrap();
        assert_eq!(
            reader.read(Some(len)).unwrap(),
            &content[start..start + len],
            "span {start}..{}",
            start + len
        );
        assert_eq!(reader.tell(), (start + len) as u64);
    }
}

#[test]
fn buffered_large_read_is_one_window() {
    let content = CHANGELOG.as_bytes();
    let source = Arc::new(CountingSource::new(MemorySource::new(content)));
    let mut reader = BufferedSeekableReader::new(source.clone(), 64).unwrap();

    reader.seek(0, Whence::Set).unwrap();
    assert_eq!(reader.read(Some(16)).unwrap(), &content[..16]);
    assert_eq!(reader.read(Some(128)).unwrap(), &content[16..16 + 128]);
    assert_eq!(source.fetches(), 2);

    let window = reader.window().unwrap();
    assert!(window.end - window.start >= 128);

    reader.seek(128, Whence::Set).unwrap();
    assert_eq!(reader.read(Some(16)).unwrap(), &content[128..144]);
    assert_eq!(source.fetches(), 2);
}

#[test]
fn buffered_hits_do_not_fetch() {
    let content = CHANGELOG.as_bytes();
    let source = Arc::new(CountingSource::new(MemorySource::new(content)));
    let mut reader = BufferedSeekableReader::new(source.clone(), 64).unwrap();

    reader.seek(20, Whence::Set).unwrap();
    reader.read(Some(4)).unwrap();
    let window = reader.window().unwrap();
    assert_eq!(window, 20..84);

    for start in [20u64, 30, 50, 80] {
        let len = (window.end - start).min(4) as usize;
        reader.seek(start as i64, Whence::Set).unwrap();
        let s = start as usize;
        assert_eq!(reader.read(Some(len)).unwrap(), &content[s..s + len]);
    }
    assert_eq!(source.fetches(), 1);
    assert_eq!(reader.stats().hits, 4);
}

#[test]
fn buffered_reduces_fetches_for_small_sequential_reads() {
    let content = CHANGELOG.as_bytes();

    let (raw_source, mut raw) = open(Kind::Raw, content);
    let (buf_source, mut buffered) = open(Kind::Buffered(64), content);

    while !raw.read(Some(4)).unwrap().is_empty() {}
    while !buffered.read(Some(4)).unwrap().is_empty() {}

    let expected_raw = content.len().div_ceil(4) as u64;
    let expected_buffered = content.len().div_ceil(64) as u64;
    assert_eq!(raw_source.fetches(), expected_raw);
    assert_eq!(buf_source.fetches(), expected_buffered);
}

#[test]
fn readers_share_one_source() {
    let content = CHANGELOG.as_bytes();
    let source = Arc::new(MemorySource::new(content));

    let mut a = RawSeekableReader::new(source.clone());
    let mut b = BufferedSeekableReader::new(source, 32).unwrap();

    a.seek(10, Whence::Set).unwrap();
    assert_eq!(a.read(Some(5)).unwrap(), &content[10..15]);
    assert_eq!(b.tell(), 0);
    assert_eq!(b.read(Some(5)).unwrap(), &content[..5]);
    assert_eq!(a.tell(), 15);
}

#[test]
fn local_file_behaves_like_memory() {
    let content = CHANGELOG.as_bytes();
    let mut temp = tempfile::NamedTempFile::new().unwrap();
    temp.write_all(content).unwrap();
    temp.flush().unwrap();

    let source = Arc::new(LocalFileSource::open(temp.path()).unwrap());
    let mut reader = BufferedSeekableReader::new(source, 64).unwrap();

    reader.seek(-16, Whence::End).unwrap();
    assert_eq!(reader.read(Some(16)).unwrap(), &content[content.len() - 16..]);
    reader.seek(0, Whence::Set).unwrap();
    assert_eq!(reader.read(None).unwrap(), content);
}
