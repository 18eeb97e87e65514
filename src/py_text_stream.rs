use crate::py_common::py_size;
use crate::py_err::io_err_from_py;
use crate::read_chunk::{ReadChunk, ReadLine, SeekableQuery};
use crate::read_size::ReadSize;
use pyo3::{PyObject, PyResult, Python};
use std::io;

/// Python file-like object (= stream) that outputs text.
///
/// Calls the object's methods as they are; whether `readline` and `seekable`
/// exist must be checked before calling them (see `Capabilities`).
pub struct PyTextStream {
    inner: PyObject,
}

impl PyTextStream {
    pub fn new(inner: PyObject) -> Self {
        PyTextStream { inner }
    }

    pub fn object(&self) -> &PyObject {
        &self.inner
    }

    fn call_for_string(&mut self, method: &str, size: ReadSize) -> io::Result<String> {
        Python::with_gil(|py| -> PyResult<String> {
            self.inner
                .as_ref(py)
                .call_method1(method, (py_size(size),))?
                .extract::<String>()
        })
        .map_err(io_err_from_py)
    }
}

impl ReadChunk for PyTextStream {
    type Chunk = String;

    // TODO Find out if there is a way to transfer this string in a zero-copy way from Py to Rs.
    fn read(&mut self, size: ReadSize) -> io::Result<String> {
        self.call_for_string("read", size)
    }
}

impl ReadLine for PyTextStream {
    fn readline(&mut self, size: ReadSize) -> io::Result<String> {
        self.call_for_string("readline", size)
    }
}

impl SeekableQuery for PyTextStream {
    fn seekable(&mut self) -> io::Result<bool> {
        Python::with_gil(|py| -> PyResult<bool> {
            self.inner.as_ref(py).call_method0("seekable")?.extract::<bool>()
        })
        .map_err(io_err_from_py)
    }
}
