//! Error types for the windowed FFT engine
//!
//! Only fatal conditions live here. Frames that would read past the end of
//! the signal and zero-magnitude bins are handled in place and never surface
//! as errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Size of data lists is mismatched: {times} time points vs {samples} samples")]
    MismatchedLength { times: usize, samples: usize },

    #[error("Signal needs at least 2 samples to define a time step (found: {0})")]
    SignalTooShort(usize),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("No such frame: {index} (available frames: {available})")]
    NoSuchFrame { index: usize, available: usize },

    #[error("FFT processing failed: {0}")]
    Fft(String),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, EngineError>;
