use crate::chunk::Chunk;
use crate::read_size::ReadSize;
use std::io;
use std::io::SeekFrom;

/// A forward-only source of text or byte chunks.
///
/// This is the one capability a source must have to get pushback support.
/// A read returning an empty chunk for a non-zero size means end of stream.
pub trait ReadChunk {
    type Chunk: Chunk;

    fn read(&mut self, size: ReadSize) -> io::Result<Self::Chunk>;
}

/// Sources that can read up to and including the next `\n`.
pub trait ReadLine: ReadChunk {
    fn readline(&mut self, size: ReadSize) -> io::Result<Self::Chunk>;
}

/// Sources that can tell whether seeking them is possible.
pub trait SeekableQuery {
    fn seekable(&mut self) -> io::Result<bool>;
}

/// Sources that can move their cursor.
pub trait SeekChunk {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64>;
}

impl<S: ReadChunk + ?Sized> ReadChunk for &mut S {
    type Chunk = S::Chunk;

    fn read(&mut self, size: ReadSize) -> io::Result<Self::Chunk> {
        (**self).read(size)
    }
}

impl<S: ReadLine + ?Sized> ReadLine for &mut S {
    fn readline(&mut self, size: ReadSize) -> io::Result<Self::Chunk> {
        (**self).readline(size)
    }
}

impl<S: SeekableQuery + ?Sized> SeekableQuery for &mut S {
    fn seekable(&mut self) -> io::Result<bool> {
        (**self).seekable()
    }
}

impl<S: SeekChunk + ?Sized> SeekChunk for &mut S {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        (**self).seek(pos)
    }
}
