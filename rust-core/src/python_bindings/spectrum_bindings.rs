//! Python bindings for single-window spectrum analysis

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::to_py_err;
use crate::config::DEFAULT_FLOOR_DB;
use crate::signal::Signal;
use crate::spectrum::{self, SpectralAnalyzer, Transform};

/// Spectral analyzer exposed to Python
#[pyclass(name = "SpectralAnalyzer")]
pub struct PySpectralAnalyzer {
    analyzer: SpectralAnalyzer,
}

#[pymethods]
impl PySpectralAnalyzer {
    /// Create a new spectral analyzer
    ///
    /// Args:
    ///     window_span: Samples per analysis window
    ///     transform: 'complex' (all bins) or 'real' (non-negative bins)
    ///     floor_db: Value used for zero-magnitude bins
    #[new]
    #[pyo3(signature = (window_span, transform="complex", floor_db=DEFAULT_FLOOR_DB))]
    fn new(window_span: usize, transform: &str, floor_db: f64) -> PyResult<Self> {
        let transform = transform.parse::<Transform>().map_err(to_py_err)?;
        Ok(Self {
            analyzer: SpectralAnalyzer::new(window_span, transform, floor_db),
        })
    }

    /// Analyze one window and return its log power in dB
    ///
    /// Args:
    ///     samples: Exactly window_span samples as numpy array
    fn log_power<'py>(
        &mut self,
        py: Python<'py>,
        samples: PyReadonlyArray1<f64>,
    ) -> PyResult<&'py PyArray1<f64>> {
        let frame = self
            .analyzer
            .analyze_samples(0, &samples.as_array().to_vec())
            .map_err(to_py_err)?;
        Ok(PyArray1::from_slice(py, frame.log_power()))
    }

    /// Analyze one window and return its (real, imag) components
    fn components<'py>(
        &mut self,
        py: Python<'py>,
        samples: PyReadonlyArray1<f64>,
    ) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
        let frame = self
            .analyzer
            .analyze_samples(0, &samples.as_array().to_vec())
            .map_err(to_py_err)?;
        Ok((PyArray1::from_slice(py, frame.real()), PyArray1::from_slice(py, frame.imag())))
    }

    /// Get frequency bins in Hz for sampling interval dt
    fn frequency_bins<'py>(&self, py: Python<'py>, dt: f64) -> &'py PyArray1<f64> {
        PyArray1::from_vec(py, self.analyzer.frequency_bins(dt))
    }

    /// Get number of frequency bins
    fn num_bins(&self) -> usize {
        self.analyzer.num_bins()
    }
}

/// Compare the whole-signal spectra of two equal-length captures
///
/// Returns:
///     Dictionary with keys 'frequency_bins', 'reference_db', 'other_db',
///     'difference_db'
#[pyfunction]
#[pyo3(signature = (times, reference, other, transform="complex", floor_db=DEFAULT_FLOOR_DB))]
pub fn compare_spectra(
    py: Python<'_>,
    times: PyReadonlyArray1<f64>,
    reference: PyReadonlyArray1<f64>,
    other: PyReadonlyArray1<f64>,
    transform: &str,
    floor_db: f64,
) -> PyResult<PyObject> {
    let times = times.as_array().to_vec();
    let reference = Signal::new(times.clone(), reference.as_array().to_vec()).map_err(to_py_err)?;
    let other = Signal::new(times, other.as_array().to_vec()).map_err(to_py_err)?;
    let transform = transform.parse::<Transform>().map_err(to_py_err)?;

    let comparison =
        spectrum::compare_spectra(&reference, &other, transform, floor_db).map_err(to_py_err)?;

    let dict = PyDict::new(py);
    dict.set_item("frequency_bins", PyArray1::from_vec(py, comparison.frequency_bins))?;
    dict.set_item("reference_db", PyArray1::from_vec(py, comparison.reference_db))?;
    dict.set_item("other_db", PyArray1::from_vec(py, comparison.other_db))?;
    dict.set_item("difference_db", PyArray1::from_vec(py, comparison.difference_db))?;
    Ok(dict.into())
}
