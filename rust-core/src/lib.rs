//! Windowed FFT - Sliding-window spectral analysis engine
//! 
//! Walks an analysis window across a captured signal on a fixed frame
//! schedule and precomputes the spectrum of every frame for animated display.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![allow(non_local_definitions)]

pub mod error;
pub mod config;
pub mod signal;
pub mod spectrum;
pub mod animation;
#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{EngineError, Result};
pub use config::{load_config, EngineConfig};
pub use signal::Signal;
pub use spectrum::{SpectralAnalyzer, SpectralFrame, Transform};
pub use animation::{precompute, FrameView, PrecomputedFrames, WindowedFftEngine};
