#![allow(dead_code)]

use std::fmt::Debug;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Seek, SeekFrom, Write};
use unread::{BytesSource, Chunk, TextSource, UnreadStream};

pub const SIMPLE_STRING: &str = "one\ntwo\nthree\n";
pub const UNICODE_STRING: &str = "one\ntwü\nthrée\n";
pub const BYTE_STRING: &[u8] = b"one\ntwo\nthree\n";

pub trait BufReadSeek: BufRead + Seek {}

impl<T: BufRead + Seek> BufReadSeek for T {}

pub type Reader = Box<dyn BufReadSeek>;

/// Chunks we can compare and print in assertions.
pub trait TestChunk: Chunk + Clone + PartialEq + Debug {}

impl<T: Chunk + Clone + PartialEq + Debug> TestChunk for T {}

pub enum AnyStream {
    Text(UnreadStream<TextSource<Reader>>),
    Bytes(UnreadStream<BytesSource<Reader>>),
}

/// Run a generic check function on a stream of either kind.
macro_rules! for_each_stream {
    ($streams:expr, $check:ident) => {
        for stream in $streams {
            match stream {
                $crate::common::AnyStream::Text(f) => $check(f),
                $crate::common::AnyStream::Bytes(f) => $check(f),
            }
        }
    };
}

pub fn long_lines() -> Vec<u8> {
    let mut data = Vec::new();
    for (digit, count) in [(b'1', 11111), (b'2', 22222), (b'3', 33333)] {
        data.extend(std::iter::repeat(digit).take(count));
        data.push(b'\n');
    }
    data
}

pub fn temp_file_with(data: &[u8]) -> File {
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(data).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();
    file
}

fn text(reader: impl BufRead + Seek + 'static) -> AnyStream {
    AnyStream::Text(UnreadStream::new(TextSource::new(Box::new(reader))))
}

fn bytes(reader: impl BufRead + Seek + 'static) -> AnyStream {
    AnyStream::Bytes(UnreadStream::new(BytesSource::new(Box::new(reader))))
}

/// Streams that each contain exactly three lines, each line at least 3
/// characters long (plus the newline).
pub fn three_line_files() -> Vec<AnyStream> {
    let long = long_lines();
    vec![
        text(Cursor::new(SIMPLE_STRING.as_bytes().to_vec())),
        text(Cursor::new(UNICODE_STRING.as_bytes().to_vec())),
        bytes(Cursor::new(BYTE_STRING.to_vec())),
        text(BufReader::new(temp_file_with(SIMPLE_STRING.as_bytes()))),
        text(BufReader::new(temp_file_with(UNICODE_STRING.as_bytes()))),
        bytes(BufReader::new(temp_file_with(BYTE_STRING))),
        bytes(BufReader::new(temp_file_with(&long))),
        text(BufReader::new(temp_file_with(&long))),
        text(BufReader::with_capacity(1, temp_file_with(SIMPLE_STRING.as_bytes()))),
        text(BufReader::with_capacity(1, temp_file_with(UNICODE_STRING.as_bytes()))),
        bytes(BufReader::with_capacity(1, temp_file_with(BYTE_STRING))),
        bytes(BufReader::with_capacity(1, temp_file_with(&long))),
        text(BufReader::with_capacity(1, temp_file_with(&long))),
    ]
}

pub fn cat<C: TestChunk>(a: &C, b: &C) -> C {
    let mut joined = a.clone();
    joined.append(b.clone());
    joined
}

pub fn starts_with<C: TestChunk>(whole: &C, prefix: &C) -> bool {
    whole.clone().split_units(prefix.unit_len()).0 == *prefix
}

/// Everything after the first `n` units.
pub fn skip<C: TestChunk>(c: &C, n: usize) -> C {
    c.clone().split_units(n).1
}
