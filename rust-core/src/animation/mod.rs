//! Sliding-window FFT animation frames
//!
//! Schedule, window extraction, spectral pre-computation and chart limits
//! for a moving analysis window over a captured signal.

pub mod schedule;
pub mod window;
pub mod scale;
pub mod engine;

pub use schedule::{FrameSchedule, FrameSlot};
pub use window::{BoundaryMarker, ExtractedWindow, WindowExtractor, WindowInterval};
pub use scale::{AxisLimits, ChartLimits, ScaleMode};
pub use engine::{precompute, FrameIter, FrameRecord, FrameView, PrecomputedFrames, WindowedFftEngine};
