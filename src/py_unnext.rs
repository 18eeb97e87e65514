use crate::error::PushbackError;
use crate::unnext::UnnextIter;
use pyo3::prelude::*;
use pyo3::types::PyIterator;

/// A Python iterator driven from Rust.
///
/// Exceptions raised by the iterator are yielded as `Err` items.
struct PyIterSource {
    iter: Py<PyIterator>,
}

impl Iterator for PyIterSource {
    type Item = PyResult<PyObject>;

    fn next(&mut self) -> Option<Self::Item> {
        Python::with_gil(|py| {
            let mut iter = self.iter.as_ref(py);
            iter.next().map(|item| item.map(PyObject::from))
        })
    }
}

/// A Python iterator with `unnext()` support.
///
/// Create with `add_unnext(iterable)`. It is its own iterator, so items pushed
/// back inside a `for` loop over it are seen by that loop and by any nested
/// loop over the same object.
#[pyclass(name = "UnnextIterator")]
pub struct PyUnnextIterator {
    inner: UnnextIter<PyIterSource>,
}

#[pymethods]
impl PyUnnextIterator {
    /// Push `item` back so that it is the next one returned.
    #[pyo3(signature = (item, /))]
    #[pyo3(text_signature = "($self, item, /)")]
    fn unnext(&mut self, item: PyObject) {
        self.inner.unnext(Ok(item));
    }

    fn __iter__(slf: PyRef<'_, Self>) -> PyRef<'_, Self> {
        slf
    }

    fn __next__(&mut self) -> PyResult<Option<PyObject>> {
        self.inner.next().transpose()
    }
}

/// Wrap an iterable so that items can be pushed back into it.
///
/// Args:
///   iterable: anything `iter()` accepts.
#[pyfunction]
#[pyo3(text_signature = "(iterable, /)")]
pub fn add_unnext(iterable: &PyAny) -> PyResult<PyUnnextIterator> {
    let iter = iterable.iter().map_err(|e| {
        PushbackError::NotIterable(format!(
            "{} ({})",
            iterable.get_type().name().unwrap_or("<unknown type>"),
            e
        ))
    })?;
    Ok(PyUnnextIterator {
        inner: UnnextIter::new(PyIterSource { iter: iter.into() }),
    })
}
