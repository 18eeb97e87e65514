use crate::chunk::Chunk;
use crate::error::PushbackError;
use crate::read_chunk::{ReadChunk, ReadLine, SeekChunk, SeekableQuery};
use crate::read_size::ReadSize;
use log::{debug, trace};
use std::io;
use std::io::SeekFrom;

/// Stream wrapper that allows pushing data back with [`unread`](Self::unread).
///
/// Pushed-back data is returned by subsequent reads before anything else is
/// read from the wrapped source. Data pushed later comes out first.
///
/// `readline()`, `seekable()` and `seek()` are only available when the wrapped
/// source supports them. While pushed-back data is pending the stream reports
/// itself as unseekable and refuses to seek, because the position of the
/// source no longer matches what the reader has consumed.
///
/// The wrapper owns its source but never closes it; use
/// [`into_inner`](Self::into_inner) to get it back. It is meant for one
/// consumer at a time: sharing it needs external synchronization.
pub struct UnreadStream<S: ReadChunk> {
    inner: S,
    // never Some(empty)
    pending: Option<S::Chunk>,
}

impl<S: ReadChunk> UnreadStream<S> {
    pub fn new(inner: S) -> Self {
        UnreadStream {
            inner,
            pending: None,
        }
    }

    /// Push `data` back so that it is returned by the next read.
    pub fn unread(&mut self, data: S::Chunk) {
        if data.is_empty() {
            return;
        }
        trace!("unread: {} unit(s) pushed back", data.unit_len());
        match self.pending.as_mut() {
            None => self.pending = Some(data),
            Some(pending) => pending.prepend(data),
        }
    }

    pub fn read(&mut self, size: ReadSize) -> io::Result<S::Chunk> {
        let pending = match self.pending.take() {
            None => return self.inner.read(size),
            Some(pending) => pending,
        };
        match size {
            ReadSize::AtMost(n) if n <= pending.unit_len() => {
                trace!("read: serving {} unit(s) from pushed-back data", n);
                Ok(self.serve_from_pending(pending, n))
            }
            _ => {
                let len = pending.unit_len();
                trace!(
                    "read: serving all {} pushed-back unit(s), then reading {:?} from source",
                    len,
                    size.minus(len)
                );
                let more = self.inner.read(size.minus(len));
                self.join_with_source(pending, more)
            }
        }
    }

    pub fn read_to_end(&mut self) -> io::Result<S::Chunk> {
        self.read(ReadSize::ToEnd)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Pushed-back data that hasn't been read yet.
    pub fn pending(&self) -> Option<&S::Chunk> {
        self.pending.as_ref()
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Mutable access to the source.
    ///
    /// Reading from the source directly bypasses any pending data.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Unwrap the source, discarding pending data.
    pub fn into_inner(self) -> S {
        self.inner
    }

    pub fn into_parts(self) -> (S, Option<S::Chunk>) {
        (self.inner, self.pending)
    }

    /// Fails with [`PushbackError::SeekUnsupported`] while pushed-back data
    /// is pending.
    ///
    /// For seeking the source through [`get_mut`](Self::get_mut) when its
    /// positions don't fit [`SeekFrom`].
    pub fn check_seek(&self) -> io::Result<()> {
        match &self.pending {
            None => Ok(()),
            Some(pending) => {
                let pending = pending.unit_len();
                debug!("refusing to seek: {} unit(s) pending", pending);
                Err(PushbackError::SeekUnsupported { pending }.into())
            }
        }
    }

    fn serve_from_pending(&mut self, pending: S::Chunk, n: usize) -> S::Chunk {
        let (head, rest) = pending.split_units(n);
        if !rest.is_empty() {
            self.pending = Some(rest);
        }
        head
    }

    /// Concatenate all pending data with the result of a source read.
    ///
    /// The pending data is kept if the source read failed.
    fn join_with_source(
        &mut self,
        pending: S::Chunk,
        more: io::Result<S::Chunk>,
    ) -> io::Result<S::Chunk> {
        match more {
            Ok(more) => {
                let mut data = pending;
                data.append(more);
                Ok(data)
            }
            Err(e) => {
                self.pending = Some(pending);
                Err(e)
            }
        }
    }
}

impl<S: ReadLine> UnreadStream<S> {
    /// Read up to and including the next `\n`.
    ///
    /// If the pushed-back data contains no newline it is returned together
    /// with the rest of the current line of the source.
    ///
    /// A bounded `size` caps the line also when it is served from pushed-back
    /// data, as with `io.IOBase.readline(size)`.
    pub fn readline(&mut self, size: ReadSize) -> io::Result<S::Chunk> {
        let pending = match self.pending.take() {
            None => return self.inner.readline(size),
            Some(pending) => pending,
        };
        if let Some(newline_pos) = pending.find_newline() {
            let line_len = newline_pos + 1;
            let n = size.limit().map_or(line_len, |limit| limit.min(line_len));
            trace!("readline: line of {} unit(s) found in pushed-back data", line_len);
            return Ok(self.serve_from_pending(pending, n));
        }
        let len = pending.unit_len();
        match size.limit() {
            Some(limit) if limit <= len => Ok(self.serve_from_pending(pending, limit)),
            _ => {
                trace!(
                    "readline: {} pushed-back unit(s) without newline, completing line from source",
                    len
                );
                let more = self.inner.readline(size.minus(len));
                self.join_with_source(pending, more)
            }
        }
    }

    pub fn lines(&mut self) -> Lines<'_, S> {
        Lines { stream: self }
    }
}

impl<S: ReadChunk + SeekableQuery> UnreadStream<S> {
    /// `false` while pushed-back data is pending, else whatever the source says.
    pub fn seekable(&mut self) -> io::Result<bool> {
        if self.pending.is_some() {
            return Ok(false);
        }
        self.inner.seekable()
    }
}

impl<S: ReadChunk + SeekChunk> UnreadStream<S> {
    /// Seek the source. Fails with [`PushbackError::SeekUnsupported`] while
    /// pushed-back data is pending, whatever `pos` is.
    pub fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.check_seek()?;
        self.inner.seek(pos)
    }
}

impl<S: ReadChunk<Chunk = Vec<u8>>> io::Read for UnreadStream<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let data = UnreadStream::read(self, ReadSize::AtMost(buf.len()))?;
        // sources may return more than asked for
        let (data, excess) = data.split_units(buf.len());
        self.unread(excess);
        buf[..data.len()].copy_from_slice(&data);
        Ok(data.len())
    }
}

impl<S: ReadChunk> From<S> for UnreadStream<S> {
    fn from(inner: S) -> Self {
        UnreadStream::new(inner)
    }
}

/// Iterator over the lines of an [`UnreadStream`], see [`UnreadStream::lines`].
pub struct Lines<'a, S: ReadLine> {
    stream: &'a mut UnreadStream<S>,
}

impl<'a, S: ReadLine> Iterator for Lines<'a, S> {
    type Item = io::Result<S::Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.stream.readline(ReadSize::ToEnd) {
            Ok(line) if line.is_empty() => None,
            r => Some(r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read_size::ReadSize::{AtMost, ToEnd};
    use crate::text_source::TextSource;
    use crate::bytes_source::BytesSource;
    use std::io::Cursor;

    fn text(s: &'static str) -> UnreadStream<TextSource<Cursor<&'static [u8]>>> {
        UnreadStream::new(TextSource::new(Cursor::new(s.as_bytes())))
    }

    fn bytes(b: &'static [u8]) -> UnreadStream<BytesSource<Cursor<&'static [u8]>>> {
        UnreadStream::new(BytesSource::new(Cursor::new(b)))
    }

    #[test]
    fn example_from_documentation() {
        let mut f = text("one\ntwo\nthree");
        assert_eq!(f.readline(ToEnd).unwrap(), "one\n");
        let data = f.readline(ToEnd).unwrap();
        assert_eq!(data, "two\n");
        f.unread(data.clone());
        let data = f.readline(ToEnd).unwrap();
        assert_eq!(data, "two\n");
        f.unread(data);
        f.unread("more than ".to_owned());
        assert_eq!(f.read_to_end().unwrap(), "more than two\nthree");
    }

    #[test]
    fn unread_before_any_read() {
        let mut f = text("one\ntwü\nthrée\n");
        f.unread("Start!".to_owned());
        let data = f.read(AtMost(9)).unwrap();
        assert_eq!(data, "Start!one");
    }

    #[test]
    fn unread_then_readline_completes_line_from_source() {
        let mut f = text("one\ntwo\nthree\n");
        f.unread("Start!".to_owned());
        assert_eq!(f.readline(ToEnd).unwrap(), "Start!one\n");
        assert_eq!(f.readline(ToEnd).unwrap(), "two\n");
    }

    #[test]
    fn partial_read_keeps_the_rest_pending() {
        let mut f = bytes(b"one\ntwo\nthree\n");
        let data1 = f.read(AtMost(3)).unwrap();
        let data2 = f.read(AtMost(3)).unwrap();
        f.unread(data2);
        f.unread(data1);
        assert_eq!(f.read(AtMost(4)).unwrap(), b"one\n");
        assert_eq!(f.pending().unwrap(), b"tw");
        assert_eq!(f.read(AtMost(2)).unwrap(), b"tw");
        assert!(!f.has_pending());
        assert_eq!(f.read(AtMost(2)).unwrap(), b"o\n");
    }

    #[test]
    fn zero_size_read_touches_nothing() {
        let mut f = text("abc");
        f.unread("x".to_owned());
        assert_eq!(f.read(AtMost(0)).unwrap(), "");
        assert_eq!(f.pending().map(String::as_str), Some("x"));
    }

    #[test]
    fn empty_unread_is_ignored() {
        let mut f = text("abc");
        f.unread(String::new());
        assert!(!f.has_pending());
    }

    #[test]
    fn bounded_readline_stops_inside_pending_data() {
        let mut f = text("source\n");
        f.unread("abcdef\n".to_owned());
        assert_eq!(f.readline(AtMost(4)).unwrap(), "abcd");
        assert_eq!(f.readline(AtMost(1)).unwrap(), "e");
        assert_eq!(f.readline(ToEnd).unwrap(), "f\n");
        assert_eq!(f.readline(ToEnd).unwrap(), "source\n");
    }

    #[test]
    fn bounded_readline_caps_line_found_in_pending_data() {
        let mut f = bytes(b"source\n");
        f.unread(b"abcdef\n".to_vec());
        assert_eq!(f.readline(AtMost(2)).unwrap(), b"ab");
        assert_eq!(f.pending().unwrap(), b"cdef\n");
        assert_eq!(f.readline(ToEnd).unwrap(), b"cdef\n");
    }

    #[test]
    fn check_seek_follows_pending_data() {
        let mut f = bytes(b"0123");
        assert!(f.check_seek().is_ok());
        f.unread(b"x".to_vec());
        let err = f.check_seek().unwrap_err();
        assert!(PushbackError::is_seek_unsupported(&err));
        f.read(AtMost(1)).unwrap();
        assert!(f.check_seek().is_ok());
    }

    #[test]
    fn bounded_readline_without_newline_reads_remaining_size_from_source() {
        let mut f = text("source\n");
        f.unread("ab".to_owned());
        assert_eq!(f.readline(AtMost(5)).unwrap(), "absou");
        assert_eq!(f.readline(ToEnd).unwrap(), "rce\n");
    }

    #[test]
    fn lines_include_pushed_back_data() {
        let mut f = text("b\nc");
        f.unread("a\n".to_owned());
        let lines: Vec<String> = f.lines().collect::<io::Result<_>>().unwrap();
        assert_eq!(lines, vec!["a\n", "b\n", "c"]);
    }

    #[test]
    fn std_read_sees_pending_bytes() {
        use std::io::Read;
        let mut f = bytes(b"world");
        f.unread(b"hello ".to_vec());
        let mut out = String::new();
        f.read_to_string(&mut out).unwrap();
        assert_eq!(out, "hello world");
    }

    #[test]
    fn seek_rejected_while_pending_then_allowed() {
        let mut f = bytes(b"0123456789");
        let data = f.read(AtMost(4)).unwrap();
        assert!(f.seekable().unwrap());
        f.unread(data);
        assert!(!f.seekable().unwrap());
        for pos in [SeekFrom::Start(0), SeekFrom::Current(-1), SeekFrom::End(0)] {
            let err = f.seek(pos).unwrap_err();
            assert!(PushbackError::is_seek_unsupported(&err));
        }
        f.read(AtMost(4)).unwrap();
        assert!(f.seekable().unwrap());
        assert_eq!(f.seek(SeekFrom::Current(-2)).unwrap(), 2);
        assert_eq!(f.read(AtMost(3)).unwrap(), b"234");
    }

    struct FailingSource;

    impl ReadChunk for FailingSource {
        type Chunk = Vec<u8>;

        fn read(&mut self, _size: ReadSize) -> io::Result<Vec<u8>> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "boom"))
        }
    }

    #[test]
    fn source_errors_propagate_and_keep_pending_data() {
        let mut f = UnreadStream::new(FailingSource);
        f.unread(b"abc".to_vec());
        let err = f.read(AtMost(5)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
        assert_eq!(f.read(AtMost(3)).unwrap(), b"abc");
        assert_eq!(f.read(ToEnd).unwrap_err().kind(), io::ErrorKind::ConnectionReset);
    }

    #[test]
    fn borrowed_source_is_handed_back_intact() {
        let mut source = BytesSource::new(Cursor::new(&b"abcdef"[..]));
        {
            let mut f = UnreadStream::new(&mut source);
            let data = f.read(AtMost(2)).unwrap();
            f.unread(data);
            let (_, pending) = f.into_parts();
            assert_eq!(pending.unwrap(), b"ab");
        }
        assert_eq!(source.read(AtMost(10)).unwrap(), b"cdef");
    }
}
