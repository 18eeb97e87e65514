use crate::error::PushbackError;
use crate::py_bytes_stream::PyBytesStream;
use crate::py_common::{has_func, Capabilities};
use crate::py_err::py_err_from_io;
use crate::py_text_stream::PyTextStream;
use crate::read_size::ReadSize;
use crate::stream_data::StreamData;
use crate::unread_stream::UnreadStream;
use log::debug;
use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyString};

enum ReadReturnType {
    String,
    Bytes,
    Other(String),
}

enum Inner {
    Text(UnreadStream<PyTextStream>),
    Bytes(UnreadStream<PyBytesStream>),
}

/// A Python stream with `unread()` support.
///
/// Create with `add_unread(stream)`. `readline()`, `seekable()` and `seek()`
/// raise `AttributeError` if the wrapped stream doesn't have them. Other
/// attributes (`close()`, `tell()`, `closed`, ...) are those of the wrapped
/// stream, and the wrapper is a context manager like the stream itself.
#[pyclass(name = "UnreadStream")]
pub struct PyUnreadStream {
    inner: Inner,
    capabilities: Capabilities,
}

#[pymethods]
impl PyUnreadStream {
    /// Push `data` back so that the next read returns it first.
    ///
    /// `data` must be of the same type (str or bytes) as the stream's data.
    #[pyo3(signature = (data, /))]
    #[pyo3(text_signature = "($self, data, /)")]
    fn unread(&mut self, data: StreamData) -> PyResult<()> {
        match &mut self.inner {
            Inner::Text(s) => s.unread(data.into_text()?),
            Inner::Bytes(s) => s.unread(data.into_bytes()?),
        }
        Ok(())
    }

    #[pyo3(signature = (size = None, /))]
    #[pyo3(text_signature = "($self, size=-1, /)")]
    fn read(&mut self, size: Option<isize>) -> PyResult<StreamData> {
        let size = ReadSize::from(size);
        match &mut self.inner {
            Inner::Text(s) => s.read(size).map(StreamData::Text),
            Inner::Bytes(s) => s.read(size).map(StreamData::Bytes),
        }
        .map_err(py_err_from_io)
    }

    #[pyo3(signature = (size = None, /))]
    #[pyo3(text_signature = "($self, size=-1, /)")]
    fn readline(&mut self, size: Option<isize>) -> PyResult<StreamData> {
        self.require(self.capabilities.readline, "readline")?;
        let size = ReadSize::from(size);
        match &mut self.inner {
            Inner::Text(s) => s.readline(size).map(StreamData::Text),
            Inner::Bytes(s) => s.readline(size).map(StreamData::Bytes),
        }
        .map_err(py_err_from_io)
    }

    fn seekable(&mut self) -> PyResult<bool> {
        self.require(self.capabilities.seekable, "seekable")?;
        match &mut self.inner {
            Inner::Text(s) => s.seekable(),
            Inner::Bytes(s) => s.seekable(),
        }
        .map_err(py_err_from_io)
    }

    /// Seek the wrapped stream. Raises `OSError` while pushed-back data is
    /// pending.
    #[pyo3(signature = (offset, whence = 0, /))]
    #[pyo3(text_signature = "($self, offset, whence=0, /)")]
    fn seek(&mut self, py: Python<'_>, offset: PyObject, whence: i32) -> PyResult<PyObject> {
        self.require(self.capabilities.seek, "seek")?;
        match &self.inner {
            Inner::Text(s) => s.check_seek(),
            Inner::Bytes(s) => s.check_seek(),
        }
        .map_err(py_err_from_io)?;
        // text stream positions are opaque cookies that can exceed 64 bits
        self.stream(py).call_method1(py, "seek", (offset, whence))
    }

    /// Pushed-back data that hasn't been read yet, or None.
    #[getter]
    fn pending(&self) -> Option<StreamData> {
        match &self.inner {
            Inner::Text(s) => s.pending().cloned().map(StreamData::Text),
            Inner::Bytes(s) => s.pending().cloned().map(StreamData::Bytes),
        }
    }

    /// The wrapped stream. Closing it is up to the caller.
    #[getter]
    fn stream(&self, py: Python<'_>) -> PyObject {
        match &self.inner {
            Inner::Text(s) => s.get_ref().object().clone_ref(py),
            Inner::Bytes(s) => s.get_ref().object().clone_ref(py),
        }
    }

    fn __iter__(slf: PyRef<'_, Self>) -> PyRef<'_, Self> {
        slf
    }

    fn __enter__(slf: PyRef<'_, Self>) -> PyResult<PyRef<'_, Self>> {
        let py = slf.py();
        let stream = slf.stream(py);
        if has_func(stream.as_ref(py), "__enter__")? {
            stream.call_method0(py, "__enter__")?;
        }
        Ok(slf)
    }

    fn __exit__(
        &mut self,
        py: Python<'_>,
        exc_type: PyObject,
        exc_value: PyObject,
        traceback: PyObject,
    ) -> PyResult<bool> {
        let stream = self.stream(py);
        let stream = stream.as_ref(py);
        if has_func(stream, "__exit__")? {
            return stream
                .call_method1("__exit__", (exc_type, exc_value, traceback))?
                .is_true();
        }
        if has_func(stream, "close")? {
            stream.call_method0("close")?;
        }
        Ok(false)
    }

    /// Only called for attributes the wrapper doesn't have itself.
    fn __getattr__(&self, py: Python<'_>, name: &str) -> PyResult<PyObject> {
        self.stream(py).getattr(py, name)
    }

    fn __next__(&mut self) -> PyResult<Option<StreamData>> {
        let line = self.readline(None)?;
        Ok(match &line {
            StreamData::Text(s) if s.is_empty() => None,
            StreamData::Bytes(b) if b.is_empty() => None,
            _ => Some(line),
        })
    }
}

impl PyUnreadStream {
    fn require(&self, present: bool, name: &'static str) -> PyResult<()> {
        if present {
            Ok(())
        } else {
            Err(PushbackError::MissingCapability(name).into())
        }
    }
}

/// Wrap a Python file-like object so that data can be pushed back into it.
///
/// Args:
///   stream: object with a `read()` method returning str or bytes. Its
///     `readline()`, `seekable()` and `seek()` methods are supported too, if
///     present.
#[pyfunction]
#[pyo3(text_signature = "(stream, /)")]
pub fn add_unread(stream: PyObject, py: Python<'_>) -> PyResult<PyUnreadStream> {
    let obj = stream.as_ref(py);
    if !has_func(obj, "read")? {
        return Err(PushbackError::UnsupportedSource(format!(
            "object of type '{}' has no 'read()' function",
            obj.get_type().name()?
        ))
        .into());
    }
    let capabilities = Capabilities::probe(obj)?;
    let read_return_type = {
        let read_result = obj.call_method1("read", (0,))?;
        if read_result.is_instance_of::<PyString>()? {
            ReadReturnType::String
        } else if read_result.is_instance_of::<PyBytes>()? {
            ReadReturnType::Bytes
        } else {
            ReadReturnType::Other(format!("{}", read_result.get_type()))
        }
    };
    let inner = match read_return_type {
        ReadReturnType::String => Inner::Text(UnreadStream::new(PyTextStream::new(stream))),
        ReadReturnType::Bytes => Inner::Bytes(UnreadStream::new(PyBytesStream::new(stream))),
        ReadReturnType::Other(t) => {
            return Err(PushbackError::UnsupportedSource(format!(
                "unsuitable stream data type '{}'",
                t
            ))
            .into())
        }
    };
    debug!(
        "wrapped {} stream",
        match inner {
            Inner::Text(_) => "text",
            Inner::Bytes(_) => "bytes",
        }
    );
    Ok(PyUnreadStream {
        inner,
        capabilities,
    })
}
