use crate::chunk::Chunk;
use crate::error::PushbackError;
use pyo3::types::{PyBytes, PyString};
use pyo3::{FromPyObject, IntoPy, PyAny, PyObject, PyResult, Python};

/// A chunk of either kind, as exchanged with Python.
pub enum StreamData {
    Text(String),
    Bytes(Vec<u8>),
}

impl StreamData {
    pub fn kind(&self) -> &'static str {
        match self {
            StreamData::Text(_) => <String as Chunk>::KIND,
            StreamData::Bytes(_) => <Vec<u8> as Chunk>::KIND,
        }
    }

    pub fn into_text(self) -> Result<String, PushbackError> {
        match self {
            StreamData::Text(s) => Ok(s),
            other => Err(PushbackError::KindMismatch {
                expected: <String as Chunk>::KIND,
                found: other.kind(),
            }),
        }
    }

    pub fn into_bytes(self) -> Result<Vec<u8>, PushbackError> {
        match self {
            StreamData::Bytes(b) => Ok(b),
            other => Err(PushbackError::KindMismatch {
                expected: <Vec<u8> as Chunk>::KIND,
                found: other.kind(),
            }),
        }
    }
}

impl<'source> FromPyObject<'source> for StreamData {
    fn extract(ob: &'source PyAny) -> PyResult<Self> {
        if ob.is_instance_of::<PyString>()? {
            Ok(StreamData::Text(ob.extract()?))
        } else if ob.is_instance_of::<PyBytes>()? {
            Ok(StreamData::Bytes(ob.downcast::<PyBytes>()?.as_bytes().to_vec()))
        } else {
            Err(PushbackError::KindMismatch {
                expected: "text or bytes",
                found: "non-stream",
            }
            .into())
        }
    }
}

impl IntoPy<PyObject> for StreamData {
    fn into_py(self, py: Python<'_>) -> PyObject {
        match self {
            StreamData::Text(s) => s.into_py(py),
            StreamData::Bytes(b) => PyBytes::new(py, &b).into(),
        }
    }
}
