//! FFT engine for fixed-length analysis windows
//!
//! Transforms exactly `fft_size` samples, no zero-padding. The full complex
//! transform (rustfft) keeps every bin including the negative frequencies;
//! the one-sided transform (realfft) keeps bins 0..=fft_size/2.

use num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use rustfft::{Fft, FftPlanner};
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

use super::frequency::{fft_frequencies, rfft_frequencies};
use crate::error::{EngineError, Result};

/// Which discrete Fourier transform the analyzer runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    /// Full complex transform, `fft_size` bins
    #[default]
    Complex,
    /// Real-to-complex transform, `fft_size / 2 + 1` bins
    Real,
}

impl FromStr for Transform {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "complex" => Ok(Transform::Complex),
            "real" => Ok(Transform::Real),
            other => Err(EngineError::Configuration(format!(
                "unknown transform '{}' (expected 'complex' or 'real')",
                other
            ))),
        }
    }
}

enum Plan {
    Complex(Arc<dyn Fft<f64>>),
    Real(Arc<dyn RealToComplex<f64>>),
}

/// FFT engine for real-valued signal windows
pub struct FftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    transform: Transform,

    plan: Plan,

    /// Reusable input buffer, realfft overwrites its input
    input_buffer: Vec<f64>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - Number of samples per transform
    /// * `transform` - Full complex or one-sided real transform
    pub fn new(fft_size: usize, transform: Transform) -> Self {
        let plan = match transform {
            Transform::Complex => {
                let mut planner = FftPlanner::<f64>::new();
                Plan::Complex(planner.plan_fft_forward(fft_size))
            }
            Transform::Real => {
                let mut planner = RealFftPlanner::<f64>::new();
                Plan::Real(planner.plan_fft_forward(fft_size))
            }
        };

        Self {
            fft_size,
            transform,
            plan,
            input_buffer: vec![0.0; fft_size],
        }
    }

    /// Compute the complex spectrum of one window
    ///
    /// # Arguments
    /// * `window` - Exactly `fft_size` samples
    ///
    /// # Returns
    /// `num_bins()` complex bins in standard FFT order
    pub fn compute(&mut self, window: &[f64]) -> Result<Vec<Complex<f64>>> {
        if window.len() != self.fft_size {
            return Err(EngineError::Fft(format!(
                "expected {} samples, got {}",
                self.fft_size,
                window.len()
            )));
        }

        match &self.plan {
            Plan::Complex(fft) => {
                let mut buffer: Vec<Complex<f64>> =
                    window.iter().map(|&s| Complex::new(s, 0.0)).collect();
                fft.process(&mut buffer);
                Ok(buffer)
            }
            Plan::Real(r2c) => {
                self.input_buffer.copy_from_slice(window);
                let mut output = r2c.make_output_vec();
                r2c.process(&mut self.input_buffer, &mut output)
                    .map_err(|e| EngineError::Fft(e.to_string()))?;
                Ok(output)
            }
        }
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Get number of frequency bins produced per window
    pub fn num_bins(&self) -> usize {
        match self.transform {
            Transform::Complex => self.fft_size,
            Transform::Real => self.fft_size / 2 + 1,
        }
    }

    /// Frequency of every output bin in Hz, for sampling interval `dt`
    pub fn frequency_axis(&self, dt: f64) -> Vec<f64> {
        match self.transform {
            Transform::Complex => fft_frequencies(self.fft_size, dt),
            Transform::Real => rfft_frequencies(self.fft_size, dt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_fft_dc_signal() {
        let mut fft = FftEngine::new(100, Transform::Complex);

        let signal = vec![1.0; 100];
        let spectrum = fft.compute(&signal).unwrap();

        assert_eq!(spectrum.len(), 100);
        assert!((spectrum[0].re - 100.0).abs() < 1e-9);
        assert!(spectrum[10].norm() < 1e-9);
    }

    #[test]
    fn test_fft_sine_wave() {
        let mut fft = FftEngine::new(1024, Transform::Complex);

        // 64 full periods inside the window
        let signal: Vec<f64> = (0..1024)
            .map(|n| (2.0 * PI * 64.0 * n as f64 / 1024.0).sin())
            .collect();

        let spectrum = fft.compute(&signal).unwrap();

        // Real input: energy mirrored at bin 64 and bin 1024 - 64
        assert!((spectrum[64].norm() - 512.0).abs() < 1e-6);
        assert!((spectrum[960].norm() - 512.0).abs() < 1e-6);
        assert!(spectrum[100].norm() < 1e-6);
    }

    #[test]
    fn test_real_matches_complex_half() {
        let signal: Vec<f64> = (0..64).map(|n| (0.3 * n as f64).cos() + 0.1 * n as f64).collect();

        let full = FftEngine::new(64, Transform::Complex).compute(&signal).unwrap();
        let half = FftEngine::new(64, Transform::Real).compute(&signal).unwrap();

        assert_eq!(half.len(), 33);
        for (a, b) in half.iter().zip(full.iter()) {
            assert!((a - b).norm() < 1e-9);
        }
    }

    #[test]
    fn test_wrong_window_length() {
        let mut fft = FftEngine::new(16, Transform::Complex);
        let result = fft.compute(&[0.0; 8]);
        assert!(matches!(result, Err(EngineError::Fft(_))));
    }

    #[test]
    fn test_transform_from_str() {
        assert_eq!("complex".parse::<Transform>().unwrap(), Transform::Complex);
        assert_eq!("Real".parse::<Transform>().unwrap(), Transform::Real);
        assert!("hann".parse::<Transform>().is_err());
    }

    #[test]
    fn test_num_bins() {
        assert_eq!(FftEngine::new(25, Transform::Complex).num_bins(), 25);
        assert_eq!(FftEngine::new(25, Transform::Real).num_bins(), 13);
        assert_eq!(FftEngine::new(8, Transform::Real).frequency_axis(1.0).len(), 5);
    }
}
