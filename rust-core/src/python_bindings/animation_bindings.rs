//! Python bindings for the precomputed FFT animation

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::to_py_err;
use crate::animation::{precompute, ChartLimits, FrameView, PrecomputedFrames};
use crate::config::EngineConfig;
use crate::signal::Signal;
use crate::spectrum::Transform;

/// Precomputed sliding-window FFT exposed to Python
///
/// Holds its own copy of the signal so frames can be read at any time.
#[pyclass(name = "FftAnimation")]
pub struct PyFftAnimation {
    signal: Signal,
    frames: PrecomputedFrames,
}

impl PyFftAnimation {
    fn view(&self, index: usize) -> PyResult<FrameView<'_>> {
        self.frames.view(&self.signal, index).map_err(to_py_err)
    }
}

#[pymethods]
impl PyFftAnimation {
    /// Precompute every frame of the animation
    ///
    /// Args:
    ///     times: Sample times as numpy array (uniform spacing)
    ///     samples: Sample values as numpy array
    ///     fps: Frames per second
    ///     total_time: Playback length in seconds
    ///     split_factor: Window span is len(samples) // split_factor
    ///     autoscale_limits: Per-frame chart limits instead of global ones
    ///     transform: 'complex' (all bins) or 'real' (non-negative bins)
    #[new]
    #[pyo3(signature = (times, samples, fps=60, total_time=10, split_factor=2, autoscale_limits=false, transform="complex"))]
    fn new(
        times: PyReadonlyArray1<f64>,
        samples: PyReadonlyArray1<f64>,
        fps: u32,
        total_time: u32,
        split_factor: u32,
        autoscale_limits: bool,
        transform: &str,
    ) -> PyResult<Self> {
        let signal = Signal::new(times.as_array().to_vec(), samples.as_array().to_vec())
            .map_err(to_py_err)?;

        let mut config = EngineConfig::new(fps, total_time, split_factor, autoscale_limits);
        config.analysis.transform = transform.parse::<Transform>().map_err(to_py_err)?;

        let frames = precompute(&signal, &config).map_err(to_py_err)?;
        Ok(Self { signal, frames })
    }

    /// Number of valid frames
    fn __len__(&self) -> usize {
        self.frames.len()
    }

    /// Number of scheduled frames dropped because their window did not fit
    fn skipped_frames(&self) -> usize {
        self.frames.skipped_frames()
    }

    /// Samples per analysis window
    fn window_span(&self) -> usize {
        self.frames.schedule().window_span()
    }

    /// Playback delay between frames in milliseconds
    fn frame_interval_ms(&self) -> u64 {
        self.frames.schedule().frame_interval_ms()
    }

    /// Get frequency bins in Hz (all bins)
    fn frequency_bins<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.frames.frequency_bins())
    }

    /// Get the time-domain signal
    ///
    /// Returns:
    ///     Tuple of (times, samples)
    fn signal<'py>(&self, py: Python<'py>) -> (&'py PyArray1<f64>, &'py PyArray1<f64>) {
        (
            PyArray1::from_slice(py, self.signal.times()),
            PyArray1::from_slice(py, self.signal.samples()),
        )
    }

    /// Get window boundary markers of a frame
    ///
    /// Returns:
    ///     Tuple of (left, right), each a pair of ([x, x], [top, bottom])
    fn markers(&self, index: usize) -> PyResult<(([f64; 2], [f64; 2]), ([f64; 2], [f64; 2]))> {
        let view = self.view(index)?;
        let (left, right) = (view.left_marker(), view.right_marker());
        Ok(((left.x, left.y), (right.x, right.y)))
    }

    /// Get the truncated power spectrum of a frame
    ///
    /// Returns:
    ///     Tuple of (frequencies, log power in dB)
    fn power_series<'py>(
        &self,
        py: Python<'py>,
        index: usize,
    ) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
        let (freqs, power) = self.view(index)?.power_series();
        Ok((PyArray1::from_slice(py, freqs), PyArray1::from_slice(py, power)))
    }

    /// Get the real and imaginary FFT components of a frame
    fn fft_points<'py>(
        &self,
        py: Python<'py>,
        index: usize,
    ) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
        let (re, im) = self.view(index)?.fft_points();
        Ok((PyArray1::from_slice(py, re), PyArray1::from_slice(py, im)))
    }

    /// Get chart limits of a frame
    ///
    /// Returns:
    ///     Dictionary with keys 'time', 'frequency', 'log_power', 'real',
    ///     'imag' mapping to (min, max), or None if no limits exist
    fn limits(&self, py: Python<'_>, index: usize) -> PyResult<Option<PyObject>> {
        match self.view(index)?.limits() {
            Some(limits) => limits_dict(py, &limits).map(Some),
            None => Ok(None),
        }
    }
}

fn limits_dict(py: Python<'_>, limits: &ChartLimits) -> PyResult<PyObject> {
    let dict = PyDict::new(py);
    dict.set_item("time", (limits.time.min, limits.time.max))?;
    dict.set_item("frequency", (limits.frequency.min, limits.frequency.max))?;
    dict.set_item("log_power", (limits.log_power.min, limits.log_power.max))?;
    dict.set_item("real", (limits.real.min, limits.real.max))?;
    dict.set_item("imag", (limits.imag.min, limits.imag.max))?;
    Ok(dict.into())
}
