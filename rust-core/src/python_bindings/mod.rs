//! PyO3 bindings for the Python frame consumer

use pyo3::exceptions::{PyIndexError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::error::EngineError;

mod animation_bindings;
mod spectrum_bindings;

/// Python module definition
#[pymodule]
fn windowed_fft(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<animation_bindings::PyFftAnimation>()?;
    m.add_class::<spectrum_bindings::PySpectralAnalyzer>()?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::compare_spectra, m)?)?;

    Ok(())
}

/// Map engine errors onto the closest Python exception
pub(crate) fn to_py_err(err: EngineError) -> PyErr {
    match err {
        EngineError::NoSuchFrame { .. } => PyIndexError::new_err(err.to_string()),
        EngineError::MismatchedLength { .. }
        | EngineError::SignalTooShort(_)
        | EngineError::Configuration(_) => PyValueError::new_err(err.to_string()),
        _ => PyRuntimeError::new_err(err.to_string()),
    }
}
