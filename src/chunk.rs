use crate::unicode_utils::{char_boundary, char_len, find_newline_char};
use compact_str::CompactString;

/// A unit of stream consumption: a run of chars (text) or bytes.
///
/// Lengths and positions are counted in the stream's own units, so for text
/// streams a multi-byte character counts as one, the same way sizes passed to
/// `read()` count characters on a text stream and bytes on a binary one.
pub trait Chunk: Default {
    /// Human-readable name of the chunk kind, used in error messages.
    const KIND: &'static str;

    /// Length in units.
    fn unit_len(&self) -> usize;

    fn is_empty(&self) -> bool;

    /// Split after the first `n` units, returning `(prefix, rest)`.
    fn split_units(self, n: usize) -> (Self, Self);

    /// Put `front` before the current contents.
    fn prepend(&mut self, front: Self);

    /// Put `back` after the current contents.
    fn append(&mut self, back: Self);

    /// Unit position of the first line terminator (`\n`).
    fn find_newline(&self) -> Option<usize>;
}

impl Chunk for String {
    const KIND: &'static str = "text";

    fn unit_len(&self) -> usize {
        char_len(self)
    }

    fn is_empty(&self) -> bool {
        String::is_empty(self)
    }

    fn split_units(mut self, n: usize) -> (Self, Self) {
        let rest = self.split_off(char_boundary(&self, n));
        (self, rest)
    }

    fn prepend(&mut self, front: Self) {
        self.insert_str(0, &front);
    }

    fn append(&mut self, back: Self) {
        self.push_str(&back);
    }

    fn find_newline(&self) -> Option<usize> {
        find_newline_char(self)
    }
}

impl Chunk for CompactString {
    const KIND: &'static str = "text";

    fn unit_len(&self) -> usize {
        char_len(self)
    }

    fn is_empty(&self) -> bool {
        CompactString::is_empty(self)
    }

    fn split_units(mut self, n: usize) -> (Self, Self) {
        let at = char_boundary(&self, n);
        let rest = CompactString::from(&self[at..]);
        self.truncate(at);
        (self, rest)
    }

    fn prepend(&mut self, front: Self) {
        let mut joined = front;
        joined.push_str(self);
        *self = joined;
    }

    fn append(&mut self, back: Self) {
        self.push_str(&back);
    }

    fn find_newline(&self) -> Option<usize> {
        find_newline_char(self)
    }
}

impl Chunk for Vec<u8> {
    const KIND: &'static str = "bytes";

    fn unit_len(&self) -> usize {
        self.len()
    }

    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }

    fn split_units(mut self, n: usize) -> (Self, Self) {
        let rest = self.split_off(n.min(self.len()));
        (self, rest)
    }

    fn prepend(&mut self, front: Self) {
        let mut joined = front;
        joined.extend_from_slice(self);
        *self = joined;
    }

    fn append(&mut self, mut back: Self) {
        Vec::append(self, &mut back);
    }

    fn find_newline(&self) -> Option<usize> {
        self.iter().position(|&b| b == b'\n')
    }
}
