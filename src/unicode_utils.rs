use utf8_width::get_width;

/// Byte offset of the `n`-th char of `s`, or `s.len()` if it has fewer chars.
#[inline]
pub fn char_boundary(s: &str, n: usize) -> usize {
    let bytes = s.as_bytes();
    let mut offset = 0;
    for _ in 0..n {
        if offset >= bytes.len() {
            return bytes.len();
        }
        // a &str is valid UTF-8, so every char starts with a non-zero width byte
        offset += get_width(bytes[offset]).max(1);
    }
    offset.min(bytes.len())
}

/// Number of chars in `s`.
#[inline]
pub fn char_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut offset = 0;
    let mut n = 0;
    while offset < bytes.len() {
        offset += get_width(bytes[offset]).max(1);
        n += 1;
    }
    n
}

/// Char index of the first `'\n'` in `s`.
pub fn find_newline_char(s: &str) -> Option<usize> {
    let byte_pos = s.find('\n')?;
    Some(char_len(&s[..byte_pos]))
}
