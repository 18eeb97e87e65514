use crate::read_chunk::{ReadChunk, ReadLine, SeekChunk, SeekableQuery};
use crate::read_size::ReadSize;
use std::io;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};

/// Byte source over any reader.
///
/// Bounded reads keep reading until they have the requested number of bytes
/// or the reader is exhausted, like a buffered binary stream would.
/// `readline()` needs a buffered reader.
pub struct BytesSource<R: Read> {
    reader: R,
}

impl<R: Read> BytesSource<R> {
    pub fn new(reader: R) -> Self {
        BytesSource { reader }
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> BytesSource<BufReader<R>> {
    pub fn with_capacity(capacity: usize, reader: R) -> Self {
        BytesSource::new(BufReader::with_capacity(capacity, reader))
    }
}

impl<R: Read> ReadChunk for BytesSource<R> {
    type Chunk = Vec<u8>;

    fn read(&mut self, size: ReadSize) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        match size {
            ReadSize::ToEnd => self.reader.read_to_end(&mut buf)?,
            ReadSize::AtMost(n) => self.reader.by_ref().take(n as u64).read_to_end(&mut buf)?,
        };
        Ok(buf)
    }
}

impl<R: BufRead> ReadLine for BytesSource<R> {
    fn readline(&mut self, size: ReadSize) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        match size {
            ReadSize::ToEnd => self.reader.read_until(b'\n', &mut buf)?,
            ReadSize::AtMost(n) => self
                .reader
                .by_ref()
                .take(n as u64)
                .read_until(b'\n', &mut buf)?,
        };
        Ok(buf)
    }
}

impl<R: Read + Seek> SeekableQuery for BytesSource<R> {
    fn seekable(&mut self) -> io::Result<bool> {
        Ok(true)
    }
}

impl<R: Read + Seek> SeekChunk for BytesSource<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.reader.seek(pos)
    }
}
