//! Whole-signal spectrum comparison
//!
//! Transforms two captures of the same length over their full extent and
//! reports how their log power differs per bin, e.g. a capture against a
//! copy with its leading samples blanked out.

use super::analysis::SpectralAnalyzer;
use super::fft::Transform;
use crate::error::{EngineError, Result};
use crate::signal::Signal;

/// Log power spectra of two signals and their difference
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumComparison {
    pub frequency_bins: Vec<f64>,
    pub reference_db: Vec<f64>,
    pub other_db: Vec<f64>,
    /// `reference_db - other_db` per bin
    pub difference_db: Vec<f64>,
}

impl SpectrumComparison {
    /// Leading `count` bins of every series
    pub fn truncated(&self, count: usize) -> SpectrumComparison {
        let n = count.min(self.frequency_bins.len());
        SpectrumComparison {
            frequency_bins: self.frequency_bins[..n].to_vec(),
            reference_db: self.reference_db[..n].to_vec(),
            other_db: self.other_db[..n].to_vec(),
            difference_db: self.difference_db[..n].to_vec(),
        }
    }
}

/// Compare the spectra of two equal-length signals
///
/// # Arguments
/// * `reference` - Baseline signal, also provides the time step
/// * `other` - Signal compared against the baseline
/// * `transform` - Full complex or one-sided transform
/// * `floor_db` - Floor sentinel for zero-magnitude bins
pub fn compare_spectra(
    reference: &Signal,
    other: &Signal,
    transform: Transform,
    floor_db: f64,
) -> Result<SpectrumComparison> {
    if reference.len() != other.len() {
        return Err(EngineError::Configuration(format!(
            "compared signals differ in length: {} vs {}",
            reference.len(),
            other.len()
        )));
    }

    let mut analyzer = SpectralAnalyzer::new(reference.len(), transform, floor_db);
    let reference_frame = analyzer.analyze_samples(0, reference.samples())?;
    let other_frame = analyzer.analyze_samples(0, other.samples())?;

    let difference_db = reference_frame
        .log_power()
        .iter()
        .zip(other_frame.log_power().iter())
        .map(|(a, b)| a - b)
        .collect();

    Ok(SpectrumComparison {
        frequency_bins: analyzer.frequency_bins(reference.dt()),
        reference_db: reference_frame.log_power().to_vec(),
        other_db: other_frame.log_power().to_vec(),
        difference_db,
    })
}
