//! ffi.rs
//!
//! Python surface of the bridge.
//!
//! Design notes:
//! - Standard entry points copy the source out of the `bytes` object and
//!   release the GIL while the codec runs.
//! - Pinned entry points borrow the `bytes` object's memory directly, so they
//!   keep the GIL for the whole call. Every other Python thread in the process
//!   waits meanwhile: avoid them for large inputs or latency-sensitive
//!   threaded programs.
//! - `None` as source raises `ValueError` before anything is allocated.
//! - Capacity failures raise `MemoryError`; codec failures raise `ZstdError`
//!   with args `(message, code, name)`.
use std::ffi::CString;
use std::ptr;
use std::sync::OnceLock;

use log::debug;
use pyo3::create_exception;
use pyo3::exceptions::{PyBufferError, PyException, PyMemoryError, PyRuntimeError, PyValueError};
use pyo3::ffi as pyffi;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use zbridge_core::{
    AccessMode, Bridge, BridgeError, CompressedView as CoreView, CopyOut, OutputAdapter, ViewOut,
};

create_exception!(rust_zbridge, ZstdError, PyException);

fn bridge() -> &'static Bridge {
    static BRIDGE: OnceLock<Bridge> = OnceLock::new();
    BRIDGE.get_or_init(Bridge::zstd)
}

/// Python exception a bridge error is raised as, with its args.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RaisedAs {
    ValueError(String),
    MemoryError(String),
    ZstdError { message: String, code: u32, name: String },
    RuntimeError(String),
}

impl From<BridgeError> for RaisedAs {
    fn from(err: BridgeError) -> Self {
        let message = err.to_string();
        match err {
            BridgeError::NullSource { .. } => RaisedAs::ValueError(message),
            BridgeError::CapacityExceeded { .. } => RaisedAs::MemoryError(message),
            BridgeError::Native(failure) => RaisedAs::ZstdError {
                message,
                code: failure.code(),
                name: failure.name().into_owned(),
            },
            _ => RaisedAs::RuntimeError(message),
        }
    }
}

impl From<RaisedAs> for PyErr {
    fn from(raised: RaisedAs) -> Self {
        match raised {
            RaisedAs::ValueError(message) => PyValueError::new_err(message),
            RaisedAs::MemoryError(message) => PyMemoryError::new_err(message),
            RaisedAs::ZstdError { message, code, name } => ZstdError::new_err((message, code, name)),
            RaisedAs::RuntimeError(message) => PyRuntimeError::new_err(message),
        }
    }
}

fn to_py_err(err: BridgeError) -> PyErr {
    RaisedAs::from(err).into()
}

/// Standard calls work on a private copy, so the GIL can go.
fn releases_gil(mode: AccessMode) -> bool {
    !mode.is_pinned()
}

fn run<A>(
    py: Python<'_>,
    src: Option<&Bound<'_, PyBytes>>,
    level: Option<i32>,
    mode: AccessMode,
) -> PyResult<A::Output>
where
    A: OutputAdapter,
    A::Output: Send,
{
    let bridge = bridge();
    let level = level.unwrap_or(bridge.config().default_level);
    let Some(src) = src else {
        return bridge
            .compress_with::<A>(None, level, mode)
            .map_err(to_py_err);
    };

    let result = if releases_gil(mode) {
        let owned = src.as_bytes().to_vec();
        py.allow_threads(|| bridge.compress_with::<A>(Some(owned.as_slice()), level, mode))
    } else {
        debug!("pinned call holding the GIL for {} bytes", src.as_bytes().len());
        bridge.compress_with::<A>(Some(src.as_bytes()), level, mode)
    };
    result.map_err(to_py_err)
}

/// Read-only view over the compressed prefix of a larger buffer.
///
/// Supports the buffer protocol (`memoryview(view)`, `bytes(view)`).
#[pyclass(name = "CompressedView", module = "rust_zbridge")]
pub struct PyCompressedView {
    inner: CoreView,
}

#[pymethods]
impl PyCompressedView {
    fn __len__(&self) -> usize {
        self.inner.len()
    }

    /// Length of the allocation the view keeps alive.
    #[getter]
    fn capacity(&self) -> usize {
        self.inner.backing_len()
    }

    fn tobytes<'py>(&self, py: Python<'py>) -> Bound<'py, PyBytes> {
        PyBytes::new_bound(py, self.inner.as_slice())
    }

    fn __bytes__<'py>(&self, py: Python<'py>) -> Bound<'py, PyBytes> {
        self.tobytes(py)
    }

    fn __repr__(&self) -> String {
        format!("CompressedView(len={}, capacity={})", self.inner.len(), self.inner.backing_len())
    }

    unsafe fn __getbuffer__(
        slf: Bound<'_, Self>,
        view: *mut pyffi::Py_buffer,
        flags: libc::c_int,
    ) -> PyResult<()> {
        if view.is_null() {
            return Err(PyBufferError::new_err("view is null"));
        }
        if (flags & pyffi::PyBUF_WRITABLE) == pyffi::PyBUF_WRITABLE {
            return Err(PyBufferError::new_err("CompressedView is read-only"));
        }

        let (buf, len) = {
            let this = slf.borrow();
            let data = this.inner.as_slice();
            (data.as_ptr(), data.len())
        };

        // The view object owns the allocation; Python keeps it alive via `obj`.
        (*view).obj = slf.into_any().into_ptr();
        (*view).buf = buf as *mut libc::c_void;
        (*view).len = len as isize;
        (*view).readonly = 1;
        (*view).itemsize = 1;
        (*view).format = if (flags & pyffi::PyBUF_FORMAT) == pyffi::PyBUF_FORMAT {
            CString::new("B").map_err(|e| PyBufferError::new_err(e.to_string()))?.into_raw()
        } else {
            ptr::null_mut()
        };
        (*view).ndim = 1;
        (*view).shape = if (flags & pyffi::PyBUF_ND) == pyffi::PyBUF_ND {
            &mut (*view).len
        } else {
            ptr::null_mut()
        };
        (*view).strides = if (flags & pyffi::PyBUF_STRIDES) == pyffi::PyBUF_STRIDES {
            &mut (*view).itemsize
        } else {
            ptr::null_mut()
        };
        (*view).suboffsets = ptr::null_mut();
        (*view).internal = ptr::null_mut();
        Ok(())
    }

    unsafe fn __releasebuffer__(&self, view: *mut pyffi::Py_buffer) {
        if !(*view).format.is_null() {
            drop(CString::from_raw((*view).format));
        }
    }
}

/// Compress `src`; returns a new `bytes` object.
#[pyfunction]
#[pyo3(signature = (src, level = None))]
fn compress<'py>(
    py: Python<'py>,
    src: Option<Bound<'py, PyBytes>>,
    level: Option<i32>,
) -> PyResult<Bound<'py, PyBytes>> {
    let out = run::<CopyOut>(py, src.as_ref(), level, AccessMode::Standard)?;
    Ok(PyBytes::new_bound(py, &out))
}

/// Like `compress`, but holds the GIL and reads `src` in place.
#[pyfunction]
#[pyo3(signature = (src, level = None))]
fn compress_pinned<'py>(
    py: Python<'py>,
    src: Option<Bound<'py, PyBytes>>,
    level: Option<i32>,
) -> PyResult<Bound<'py, PyBytes>> {
    let out = run::<CopyOut>(py, src.as_ref(), level, AccessMode::Pinned)?;
    Ok(PyBytes::new_bound(py, &out))
}

/// Compress `src`; returns a `CompressedView` without copying the result.
#[pyfunction]
#[pyo3(signature = (src, level = None))]
fn compress_to_view<'py>(
    py: Python<'py>,
    src: Option<Bound<'py, PyBytes>>,
    level: Option<i32>,
) -> PyResult<PyCompressedView> {
    let inner = run::<ViewOut>(py, src.as_ref(), level, AccessMode::Standard)?;
    Ok(PyCompressedView { inner })
}

/// Pinned access and view output.
#[pyfunction]
#[pyo3(signature = (src, level = None))]
fn compress_pinned_to_view<'py>(
    py: Python<'py>,
    src: Option<Bound<'py, PyBytes>>,
    level: Option<i32>,
) -> PyResult<PyCompressedView> {
    let inner = run::<ViewOut>(py, src.as_ref(), level, AccessMode::Pinned)?;
    Ok(PyCompressedView { inner })
}

/// Worst-case compressed size for `src_len` bytes.
#[pyfunction]
fn compress_bound(src_len: usize) -> u64 {
    bridge().compress_bound(src_len)
}

pub fn register(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("ZstdError", py.get_type_bound::<ZstdError>())?;
    m.add_class::<PyCompressedView>()?;
    m.add_function(wrap_pyfunction!(compress, m)?)?;
    m.add_function(wrap_pyfunction!(compress_pinned, m)?)?;
    m.add_function(wrap_pyfunction!(compress_to_view, m)?)?;
    m.add_function(wrap_pyfunction!(compress_pinned_to_view, m)?)?;
    m.add_function(wrap_pyfunction!(compress_bound, m)?)?;
    Ok(())
}
