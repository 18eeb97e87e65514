/// Python error utilities.
use crate::error::PushbackError;
use pyo3::exceptions::{PyAttributeError, PyOSError, PyTypeError};
use pyo3::{prelude::PyErr, types::PyTraceback, Python};
use std::fmt::{Display, Error, Formatter};
use std::io;

// outer

pub trait TracebackDisplay<'a> {
    fn traceback_display(&'a self) -> Box<dyn 'a + Display>;
}

impl<'a> TracebackDisplay<'a> for PyErr {
    fn traceback_display(&'a self) -> Box<dyn 'a + Display> {
        Box::new(PyErrTracebackDisplayer { py_err: self })
    }
}

/// Carry a Python exception through Rust I/O code.
///
/// [`py_err_from_io`] unpacks it again so that it is re-raised unchanged.
pub fn io_err_from_py(e: PyErr) -> io::Error {
    log::trace!("Python stream raised {}\n{}", e, e.traceback_display());
    io::Error::new(io::ErrorKind::Other, e)
}

pub fn py_err_from_io(e: io::Error) -> PyErr {
    let wraps_ours = e
        .get_ref()
        .map_or(false, |inner| inner.is::<PyErr>() || inner.is::<PushbackError>());
    if !wraps_ours {
        return PyErr::from(e);
    }
    let inner = match e.into_inner() {
        Some(inner) => inner,
        None => return PyOSError::new_err("unknown I/O error"),
    };
    match inner.downcast::<PyErr>() {
        Ok(py_err) => *py_err,
        Err(inner) => match inner.downcast::<PushbackError>() {
            Ok(e) => PyErr::from(*e),
            Err(inner) => PyOSError::new_err(inner.to_string()),
        },
    }
}

impl From<PushbackError> for PyErr {
    fn from(e: PushbackError) -> PyErr {
        match e {
            PushbackError::UnsupportedSource(_) | PushbackError::MissingCapability(_) => {
                PyAttributeError::new_err(e.to_string())
            }
            PushbackError::NotIterable(_) | PushbackError::KindMismatch { .. } => {
                PyTypeError::new_err(e.to_string())
            }
            PushbackError::SeekUnsupported { .. } => PyOSError::new_err(e.to_string()),
            PushbackError::Io(e) => py_err_from_io(e),
        }
    }
}

// inner

struct PyErrTracebackDisplayer<'a> {
    py_err: &'a PyErr,
}

impl<'a> Display for PyErrTracebackDisplayer<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        String::fmt(
            &Python::with_gil(|py| {
                self.py_err.traceback(py).map_or(
                    Ok("(no traceback available)".to_string()),
                    PyTraceback::format,
                )
            })
            .unwrap_or("(error getting traceback)".to_string()),
            f,
        )
    }
}
