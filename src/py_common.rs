use crate::read_size::ReadSize;
use log::debug;
use pyo3::types::PyType;
use pyo3::{PyAny, PyResult};

/// Python's convention for "no limit" is a size of -1.
pub fn py_size(size: ReadSize) -> isize {
    match size {
        ReadSize::ToEnd => -1,
        ReadSize::AtMost(n) => isize::try_from(n).unwrap_or(isize::MAX),
    }
}

/// Whether `obj` is an instance (not a class) with a callable attribute `name`.
pub fn has_func(obj: &PyAny, name: &str) -> PyResult<bool> {
    if obj.is_instance_of::<PyType>()? {
        return Ok(false);
    }
    Ok(obj.hasattr(name)? && obj.getattr(name)?.is_callable())
}

/// Which optional stream operations a Python object provides.
///
/// Probed once, when the object gets wrapped.
#[derive(Debug, Clone, Copy, Default)]
pub struct Capabilities {
    pub readline: bool,
    pub seekable: bool,
    pub seek: bool,
}

impl Capabilities {
    pub fn probe(obj: &PyAny) -> PyResult<Self> {
        let caps = Capabilities {
            readline: has_func(obj, "readline")?,
            seekable: has_func(obj, "seekable")?,
            seek: has_func(obj, "seek")?,
        };
        debug!("probed stream capabilities: {:?}", caps);
        Ok(caps)
    }
}
