//! Captured waveform with its sample-time axis
//!
//! The engine only reads the time step from the first two time points.
//! Non-uniform spacing is not detected and leaves the frequency axis
//! meaningless.

use crate::error::{EngineError, Result};

/// Ordered pair of equal-length time and sample sequences
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    times: Vec<f64>,
    samples: Vec<f64>,
}

impl Signal {
    /// Create signal from explicit time points
    ///
    /// # Arguments
    /// * `times` - Sample times, strictly increasing with uniform spacing
    /// * `samples` - Sample values, same length as `times`
    pub fn new(times: Vec<f64>, samples: Vec<f64>) -> Result<Self> {
        if times.len() != samples.len() {
            return Err(EngineError::MismatchedLength {
                times: times.len(),
                samples: samples.len(),
            });
        }
        if samples.len() < 2 {
            return Err(EngineError::SignalTooShort(samples.len()));
        }

        Ok(Self { times, samples })
    }

    /// Create signal sampled every `dt` seconds starting at t = 0
    pub fn from_uniform(samples: Vec<f64>, dt: f64) -> Result<Self> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(EngineError::Configuration(format!(
                "time step must be positive (found: {})",
                dt
            )));
        }
        let times = (0..samples.len()).map(|i| i as f64 * dt).collect();
        Self::new(times, samples)
    }

    /// Copy of this signal with the first `count` samples replaced by `fill`
    ///
    /// Used to compare a capture against a version with its leading part
    /// blanked out.
    pub fn with_masked_prefix(&self, count: usize, fill: f64) -> Self {
        let mut samples = self.samples.clone();
        let end = count.min(samples.len());
        samples[..end].fill(fill);

        Self {
            times: self.times.clone(),
            samples,
        }
    }

    /// Number of samples (N)
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false, construction rejects signals shorter than 2 samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sampling interval taken from the first two time points
    pub fn dt(&self) -> f64 {
        self.times[1] - self.times[0]
    }

    /// Smallest and largest sample value
    pub fn sample_range(&self) -> (f64, f64) {
        min_max(&self.samples)
    }

    /// Smallest and largest time point
    pub fn time_range(&self) -> (f64, f64) {
        min_max(&self.times)
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}
