//! Frame schedule: which sample each animation frame starts its window at
//!
//! The window advances by a real-valued step of `(N - window_span) /
//! frame_count` samples per frame; each frame starts at the floor of its
//! accumulated offset.

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};

/// One scheduled animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSlot {
    pub frame_index: usize,
    /// First sample of the analysis window
    pub data_index: usize,
}

/// Immutable mapping from frame index to window start
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSchedule {
    signal_len: usize,
    window_span: usize,
    fps: u32,
    step: f64,
    frames: Vec<FrameSlot>,
}

impl FrameSchedule {
    /// Build schedule with `window_span = floor(N / split_factor)`
    ///
    /// # Arguments
    /// * `signal_len` - Number of samples N
    /// * `split_factor` - Divides the signal length into the window span
    /// * `fps` - Frames per second
    /// * `total_time` - Playback length in seconds
    pub fn new(signal_len: usize, split_factor: u32, fps: u32, total_time: u32) -> Result<Self> {
        if split_factor == 0 {
            return Err(EngineError::Configuration("split_factor must be at least 1".into()));
        }
        let window_span = signal_len / split_factor as usize;
        if window_span == 0 {
            return Err(EngineError::Configuration(format!(
                "signal of {} samples is too short for split factor {}",
                signal_len, split_factor
            )));
        }

        Self::with_window_span(signal_len, window_span, fps, total_time)
    }

    /// Build schedule with an explicit window span
    ///
    /// A span longer than the signal is accepted; every frame of such a
    /// schedule is out of range.
    pub fn with_window_span(
        signal_len: usize,
        window_span: usize,
        fps: u32,
        total_time: u32,
    ) -> Result<Self> {
        if window_span == 0 {
            return Err(EngineError::Configuration("window_span must be at least 1".into()));
        }
        if fps == 0 || total_time == 0 {
            return Err(EngineError::Configuration(format!(
                "fps and total_time must be at least 1 (found: fps={}, total_time={})",
                fps, total_time
            )));
        }
        let frame_count = (fps as usize)
            .checked_mul(total_time as usize)
            .ok_or_else(|| EngineError::Configuration("frame count overflows".into()))?;

        let step = signal_len.saturating_sub(window_span) as f64 / frame_count as f64;
        let frames = (0..frame_count)
            .map(|i| FrameSlot {
                frame_index: i,
                data_index: (i as f64 * step).floor() as usize,
            })
            .collect();

        Ok(Self {
            signal_len,
            window_span,
            fps,
            step,
            frames,
        })
    }

    /// Build schedule from engine configuration
    pub fn from_config(signal_len: usize, config: &EngineConfig) -> Result<Self> {
        let animation = &config.animation;
        match config.analysis.window_span {
            Some(span) => {
                Self::with_window_span(signal_len, span, animation.fps, animation.total_time)
            }
            None => Self::new(
                signal_len,
                config.analysis.split_factor,
                animation.fps,
                animation.total_time,
            ),
        }
    }

    pub fn frames(&self) -> &[FrameSlot] {
        &self.frames
    }

    /// Always `fps * total_time`
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn window_span(&self) -> usize {
        self.window_span
    }

    pub fn signal_len(&self) -> usize {
        self.signal_len
    }

    /// Window advance per frame in samples
    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// One past the last sample read by the slot's window
    pub fn last_index(&self, slot: FrameSlot) -> usize {
        slot.data_index.saturating_add(self.window_span)
    }

    /// Whether the slot's window lies entirely inside the signal
    pub fn is_in_range(&self, slot: FrameSlot) -> bool {
        self.last_index(slot) <= self.signal_len
    }

    pub fn in_range_count(&self) -> usize {
        self.frames.iter().filter(|&&slot| self.is_in_range(slot)).count()
    }

    /// Playback delay between frames in whole milliseconds
    pub fn frame_interval_ms(&self) -> u64 {
        1000 / self.fps as u64
    }

    /// Playback time of a frame in seconds
    pub fn timestamp(&self, frame_index: usize) -> f64 {
        frame_index as f64 / self.fps as f64
    }
}
