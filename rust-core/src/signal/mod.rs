//! Time-domain signals handed to the engine

pub mod waveform;

pub use waveform::Signal;
