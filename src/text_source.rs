use crate::read_chunk::{ReadChunk, ReadLine, SeekChunk, SeekableQuery};
use crate::read_size::ReadSize;
use std::io;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use utf8_chars::BufReadCharsExt;

/// UTF-8 text source over a buffered reader.
///
/// Sizes count chars, not bytes. Seek positions are byte offsets into the
/// underlying reader; seeking into the middle of a multi-byte char makes the
/// next read fail with `InvalidData`.
pub struct TextSource<R: BufRead> {
    reader: R,
}

impl<R: BufRead> TextSource<R> {
    pub fn new(reader: R) -> Self {
        TextSource { reader }
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_chars_until(&mut self, limit: usize, stop_at_newline: bool) -> io::Result<String> {
        let mut s = String::new();
        for _ in 0..limit {
            match self.reader.read_char()? {
                None => break,
                Some(c) => {
                    s.push(c);
                    if stop_at_newline && c == '\n' {
                        break;
                    }
                }
            }
        }
        Ok(s)
    }
}

impl<R: Read> TextSource<BufReader<R>> {
    /// Wrap an unbuffered reader in a `BufReader` with the given capacity.
    pub fn with_capacity(capacity: usize, reader: R) -> Self {
        TextSource::new(BufReader::with_capacity(capacity, reader))
    }
}

impl<R: BufRead> ReadChunk for TextSource<R> {
    type Chunk = String;

    fn read(&mut self, size: ReadSize) -> io::Result<String> {
        match size {
            ReadSize::ToEnd => {
                let mut s = String::new();
                self.reader.read_to_string(&mut s)?;
                Ok(s)
            }
            ReadSize::AtMost(n) => self.read_chars_until(n, false),
        }
    }
}

impl<R: BufRead> ReadLine for TextSource<R> {
    fn readline(&mut self, size: ReadSize) -> io::Result<String> {
        match size {
            ReadSize::ToEnd => {
                let mut s = String::new();
                self.reader.read_line(&mut s)?;
                Ok(s)
            }
            ReadSize::AtMost(n) => self.read_chars_until(n, true),
        }
    }
}

impl<R: BufRead + Seek> SeekableQuery for TextSource<R> {
    fn seekable(&mut self) -> io::Result<bool> {
        Ok(true)
    }
}

impl<R: BufRead + Seek> SeekChunk for TextSource<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.reader.seek(pos)
    }
}
