use crate::py_common::py_size;
use crate::py_err::io_err_from_py;
use crate::read_chunk::{ReadChunk, ReadLine, SeekableQuery};
use crate::read_size::ReadSize;
use pyo3::{PyObject, PyResult, Python};
use std::io;

/// Python file-like object (= stream) that outputs bytes.
pub struct PyBytesStream {
    inner: PyObject,
}

impl PyBytesStream {
    pub fn new(inner: PyObject) -> Self {
        PyBytesStream { inner }
    }

    pub fn object(&self) -> &PyObject {
        &self.inner
    }

    fn call_for_bytes(&mut self, method: &str, size: ReadSize) -> io::Result<Vec<u8>> {
        Python::with_gil(|py| -> PyResult<Vec<u8>> {
            Ok(self
                .inner
                .as_ref(py)
                .call_method1(method, (py_size(size),))?
                .extract::<&[u8]>()?
                .to_vec())
        })
        .map_err(io_err_from_py)
    }
}

impl ReadChunk for PyBytesStream {
    type Chunk = Vec<u8>;

    fn read(&mut self, size: ReadSize) -> io::Result<Vec<u8>> {
        self.call_for_bytes("read", size)
    }
}

impl ReadLine for PyBytesStream {
    fn readline(&mut self, size: ReadSize) -> io::Result<Vec<u8>> {
        self.call_for_bytes("readline", size)
    }
}

impl SeekableQuery for PyBytesStream {
    fn seekable(&mut self) -> io::Result<bool> {
        Python::with_gil(|py| -> PyResult<bool> {
            self.inner.as_ref(py).call_method0("seekable")?.extract::<bool>()
        })
        .map_err(io_err_from_py)
    }
}
