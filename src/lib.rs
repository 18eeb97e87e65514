//! Pushback ("unread") for streams and pushback ("unnext") for iterators.
//!
//! [`UnreadStream`] wraps a chunked text or byte source and lets callers push
//! data back so the next `read()`/`readline()` returns it first.
//! [`UnnextIter`] does the same for items of any iterator. In both cases the
//! most recently pushed data comes out first, and the wrapped source is never
//! rewound.
//!
//! ```
//! use std::io::Cursor;
//! use unread::{ReadSize, TextSource, UnreadStream};
//!
//! let mut f = UnreadStream::new(TextSource::new(Cursor::new("one\ntwo\nthree")));
//! assert_eq!(f.readline(ReadSize::ToEnd)?, "one\n");
//! let line = f.readline(ReadSize::ToEnd)?;
//! f.unread(line);
//! f.unread("more than ".to_owned());
//! assert_eq!(f.read_to_end()?, "more than two\nthree");
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! With the `python` feature the same wrappers are available to Python as
//! `unread.add_unread(stream)` and `unread.add_unnext(iterable)`.

mod bytes_source;
mod chunk;
mod error;
mod read_chunk;
mod read_size;
mod text_source;
mod unicode_utils;
mod unnext;
mod unread_stream;

#[cfg(feature = "python")]
mod py_bytes_stream;
#[cfg(feature = "python")]
mod py_common;
#[cfg(feature = "python")]
mod py_err;
#[cfg(feature = "python")]
mod py_text_stream;
#[cfg(feature = "python")]
mod py_unnext;
#[cfg(feature = "python")]
mod py_unread;
#[cfg(feature = "python")]
mod stream_data;

pub use crate::bytes_source::BytesSource;
pub use crate::chunk::Chunk;
pub use crate::error::PushbackError;
pub use crate::read_chunk::{ReadChunk, ReadLine, SeekChunk, SeekableQuery};
pub use crate::read_size::ReadSize;
pub use crate::text_source::TextSource;
pub use crate::unnext::{UnnextIter, Unnextable};
pub use crate::unread_stream::{Lines, UnreadStream};

#[cfg(feature = "python")]
pub use crate::py_unnext::{add_unnext, PyUnnextIterator};
#[cfg(feature = "python")]
pub use crate::py_unread::{add_unread, PyUnreadStream};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Pushback for Python streams and iterators, written in Rust.
#[cfg(feature = "python")]
#[pymodule]
#[pyo3(name = "unread")]
fn py_module(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyUnreadStream>()?;
    m.add_class::<PyUnnextIterator>()?;
    m.add_function(wrap_pyfunction!(add_unread, m)?)?;
    m.add_function(wrap_pyfunction!(add_unnext, m)?)?;
    Ok(())
}
