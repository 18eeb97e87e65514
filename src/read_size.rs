/// How much a single `read()`/`readline()` call may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadSize {
    /// Everything up to the end of the stream (Python's `size=-1`).
    ToEnd,
    /// At most this many units.
    AtMost(usize),
}

impl ReadSize {
    /// Remaining size after `n` units have already been served.
    pub fn minus(self, n: usize) -> ReadSize {
        match self {
            ReadSize::ToEnd => ReadSize::ToEnd,
            ReadSize::AtMost(size) => ReadSize::AtMost(size.saturating_sub(n)),
        }
    }

    pub fn limit(self) -> Option<usize> {
        match self {
            ReadSize::ToEnd => None,
            ReadSize::AtMost(size) => Some(size),
        }
    }
}

impl Default for ReadSize {
    fn default() -> Self {
        ReadSize::ToEnd
    }
}

// any negative size means "read to end", as for Python streams
impl From<isize> for ReadSize {
    fn from(size: isize) -> ReadSize {
        if size < 0 {
            ReadSize::ToEnd
        } else {
            ReadSize::AtMost(size as usize)
        }
    }
}

impl From<usize> for ReadSize {
    fn from(size: usize) -> ReadSize {
        ReadSize::AtMost(size)
    }
}

impl From<Option<isize>> for ReadSize {
    fn from(size: Option<isize>) -> ReadSize {
        size.map_or(ReadSize::ToEnd, ReadSize::from)
    }
}
