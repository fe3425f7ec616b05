//! Per-window spectral analysis
//!
//! Turns the samples of one analysis window into a [`SpectralFrame`]: the
//! complex spectrum, its log power and its real/imaginary split.

use ndarray::Array2;
use num_complex::Complex;

use super::fft::{FftEngine, Transform};
use crate::animation::window::ExtractedWindow;
use crate::error::Result;

/// Log power of one bin, `10 * log10(|z|)`
///
/// Zero (or non-finite) magnitudes have no logarithm and map to `floor_db`,
/// as does anything that would land below it.
#[inline]
pub fn log_power_db(z: Complex<f64>, floor_db: f64) -> f64 {
    let magnitude = z.norm();
    if magnitude > 0.0 {
        (10.0 * magnitude.log10()).max(floor_db)
    } else {
        floor_db
    }
}

/// Spectral result of one animation frame
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralFrame {
    frame_index: usize,
    complex_fft: Vec<Complex<f64>>,
    log_power: Vec<f64>,
    real: Vec<f64>,
    imag: Vec<f64>,
}

impl SpectralFrame {
    /// Derive log power and components from a complex spectrum
    pub fn from_spectrum(frame_index: usize, complex_fft: Vec<Complex<f64>>, floor_db: f64) -> Self {
        let log_power = complex_fft.iter().map(|&z| log_power_db(z, floor_db)).collect();
        let real = complex_fft.iter().map(|z| z.re).collect();
        let imag = complex_fft.iter().map(|z| z.im).collect();

        Self {
            frame_index,
            complex_fft,
            log_power,
            real,
            imag,
        }
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn complex_fft(&self) -> &[Complex<f64>] {
        &self.complex_fft
    }

    /// Log power per bin in dB
    pub fn log_power(&self) -> &[f64] {
        &self.log_power
    }

    pub fn real(&self) -> &[f64] {
        &self.real
    }

    pub fn imag(&self) -> &[f64] {
        &self.imag
    }

    pub fn num_bins(&self) -> usize {
        self.complex_fft.len()
    }

    /// Rebuild the complex spectrum from the real and imaginary series
    pub fn recombine(&self) -> Vec<Complex<f64>> {
        self.real
            .iter()
            .zip(self.imag.iter())
            .map(|(&re, &im)| Complex::new(re, im))
            .collect()
    }

    /// Components as a 2 x bins array, row 0 real and row 1 imaginary
    pub fn components(&self) -> Array2<f64> {
        Array2::from_shape_fn((2, self.num_bins()), |(row, k)| {
            if row == 0 {
                self.real[k]
            } else {
                self.imag[k]
            }
        })
    }

    /// Bin with the highest log power (first one on ties)
    pub fn peak_bin(&self) -> Option<usize> {
        self.log_power
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (k, &p)| match best {
                Some((_, bp)) if bp >= p => best,
                _ => Some((k, p)),
            })
            .map(|(k, _)| k)
    }
}

/// Spectral analyzer for a fixed window span
pub struct SpectralAnalyzer {
    fft_engine: FftEngine,
    floor_db: f64,
}

impl SpectralAnalyzer {
    /// Create new analyzer
    ///
    /// # Arguments
    /// * `window_span` - Samples per analysis window
    /// * `transform` - Full complex or one-sided transform
    /// * `floor_db` - Floor sentinel for zero-magnitude bins
    pub fn new(window_span: usize, transform: Transform, floor_db: f64) -> Self {
        Self {
            fft_engine: FftEngine::new(window_span, transform),
            floor_db,
        }
    }

    /// Analyze the window extracted for one frame
    pub fn analyze_window(&mut self, window: &ExtractedWindow<'_>) -> Result<SpectralFrame> {
        self.analyze_samples(window.interval.frame_index, window.samples)
    }

    /// Analyze a raw block of exactly `window_span` samples
    pub fn analyze_samples(&mut self, frame_index: usize, samples: &[f64]) -> Result<SpectralFrame> {
        let spectrum = self.fft_engine.compute(samples)?;
        Ok(SpectralFrame::from_spectrum(frame_index, spectrum, self.floor_db))
    }

    /// Frequency of every bin in Hz, shared by all frames
    pub fn frequency_bins(&self, dt: f64) -> Vec<f64> {
        self.fft_engine.frequency_axis(dt)
    }

    pub fn num_bins(&self) -> usize {
        self.fft_engine.num_bins()
    }

    pub fn floor_db(&self) -> f64 {
        self.floor_db
    }
}
