//! Spectral analysis with FFT

pub mod fft;
pub mod frequency;
pub mod analysis;
pub mod compare;

pub use fft::{FftEngine, Transform};
pub use analysis::{SpectralAnalyzer, SpectralFrame};
pub use compare::{compare_spectra, SpectrumComparison};
