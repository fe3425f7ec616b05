//! Windowed FFT engine
//!
//! Runs the whole analysis in one pass before playback: for every scheduled
//! frame the window is extracted first and handed straight to the spectral
//! analyzer. The resulting records are never modified afterwards; consumers
//! read them through [`FrameView`]s.

use ndarray::Array2;

use super::scale::{time_limits, AxisLimits, ChartLimits, ScaleMode};
use super::schedule::FrameSchedule;
use super::window::{BoundaryMarker, WindowExtractor, WindowInterval};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::signal::Signal;
use crate::spectrum::frequency::display_bin_count;
use crate::spectrum::{SpectralAnalyzer, SpectralFrame};

/// Window and spectrum of one valid frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    pub interval: WindowInterval,
    pub spectrum: SpectralFrame,
}

/// Every valid frame of one analysis run, in frame order
#[derive(Debug, Clone, PartialEq)]
pub struct PrecomputedFrames {
    schedule: FrameSchedule,
    frequency_bins: Vec<f64>,
    display_bins: usize,
    records: Vec<FrameRecord>,
    skipped: usize,
    scale_mode: ScaleMode,
    time_limits: AxisLimits,
    global_limits: Option<ChartLimits>,
}

/// Run the pre-computation pass over all scheduled frames
///
/// Configuration problems abort before any frame is computed. Frames whose
/// window would run past the end of the signal are left out.
pub fn precompute(signal: &Signal, config: &EngineConfig) -> Result<PrecomputedFrames> {
    config.validate()?;
    let schedule = FrameSchedule::from_config(signal.len(), config)?;
    let window_span = schedule.window_span();

    let extractor = WindowExtractor::new(signal, window_span, config.display.marker_offset);
    let mut analyzer =
        SpectralAnalyzer::new(window_span, config.analysis.transform, config.analysis.floor_db);
    let frequency_bins = analyzer.frequency_bins(signal.dt());
    let display_bins = display_bin_count(frequency_bins.len(), config.display.display_fraction);

    log::info!(
        "Pre-calculating {} frames (window span {}, step {:.3} samples, {} bins)",
        schedule.frame_count(),
        window_span,
        schedule.step(),
        frequency_bins.len()
    );

    let mut records = Vec::with_capacity(schedule.frame_count());
    let mut skipped = 0;
    for &slot in schedule.frames() {
        let Some(window) = extractor.extract(signal, slot) else {
            skipped += 1;
            continue;
        };
        let spectrum = analyzer.analyze_window(&window)?;
        records.push(FrameRecord {
            interval: window.interval,
            spectrum,
        });
    }

    if records.is_empty() {
        log::warn!(
            "No frame fits: window span {} exceeds signal of {} samples",
            window_span,
            signal.len()
        );
    } else if skipped > 0 {
        log::info!("Skipped {} out-of-range frames", skipped);
    }

    let scale_mode = ScaleMode::from_autoscale(config.display.autoscale_limits);
    let time_limits = time_limits(signal, records.iter().map(|r| &r.interval));
    let global_limits = match scale_mode {
        ScaleMode::Static => ChartLimits::global(
            time_limits,
            &frequency_bins[..display_bins],
            records.iter().map(|r| &r.spectrum),
        ),
        ScaleMode::Autoscale => None,
    };

    Ok(PrecomputedFrames {
        schedule,
        frequency_bins,
        display_bins,
        records,
        skipped,
        scale_mode,
        time_limits,
        global_limits,
    })
}

impl PrecomputedFrames {
    /// Number of valid frames
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Scheduled frames left out because their window did not fit
    pub fn skipped_frames(&self) -> usize {
        self.skipped
    }

    pub fn schedule(&self) -> &FrameSchedule {
        &self.schedule
    }

    /// Frequency of every bin, shared by all frames
    pub fn frequency_bins(&self) -> &[f64] {
        &self.frequency_bins
    }

    /// Leading bins handed to the power chart
    pub fn display_bins(&self) -> usize {
        self.display_bins
    }

    pub fn scale_mode(&self) -> ScaleMode {
        self.scale_mode
    }

    /// Limits fixed for the whole playback, `None` in autoscale mode
    pub fn global_limits(&self) -> Option<&ChartLimits> {
        self.global_limits.as_ref()
    }

    pub fn records(&self) -> &[FrameRecord] {
        &self.records
    }

    /// Read-only view of valid frame `index`
    ///
    /// Valid frames always form a prefix of the schedule, so `index` is
    /// also the frame index.
    pub fn view<'a>(&'a self, signal: &'a Signal, index: usize) -> Result<FrameView<'a>> {
        let record = self.records.get(index).ok_or(EngineError::NoSuchFrame {
            index,
            available: self.records.len(),
        })?;

        Ok(FrameView {
            signal,
            record,
            frames: self,
        })
    }

    /// Iterate valid frames in frame order
    pub fn iter<'a>(&'a self, signal: &'a Signal) -> FrameIter<'a> {
        FrameIter {
            signal,
            frames: self,
            next: 0,
        }
    }

    /// Log power of all frames, one row per frame
    pub fn log_power_matrix(&self) -> Array2<f64> {
        let bins = self.frequency_bins.len();
        Array2::from_shape_fn((self.records.len(), bins), |(row, k)| {
            self.records[row].spectrum.log_power()[k]
        })
    }
}

/// Engine bound to the signal it analysed
pub struct WindowedFftEngine<'s> {
    signal: &'s Signal,
    frames: PrecomputedFrames,
}

impl<'s> WindowedFftEngine<'s> {
    /// Validate configuration and precompute every frame
    pub fn new(signal: &'s Signal, config: &EngineConfig) -> Result<Self> {
        let frames = precompute(signal, config)?;
        Ok(Self { signal, frames })
    }

    pub fn frame(&self, index: usize) -> Result<FrameView<'_>> {
        self.frames.view(self.signal, index)
    }

    pub fn iter(&self) -> FrameIter<'_> {
        self.frames.iter(self.signal)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn signal(&self) -> &'s Signal {
        self.signal
    }

    pub fn frames(&self) -> &PrecomputedFrames {
        &self.frames
    }

    pub fn frequency_bins(&self) -> &[f64] {
        self.frames.frequency_bins()
    }

    /// Release the precomputed frames, dropping the signal borrow
    pub fn into_frames(self) -> PrecomputedFrames {
        self.frames
    }
}

impl<'a, 's> IntoIterator for &'a WindowedFftEngine<'s> {
    type Item = FrameView<'a>;
    type IntoIter = FrameIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Everything the consumer needs to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    signal: &'a Signal,
    record: &'a FrameRecord,
    frames: &'a PrecomputedFrames,
}

impl<'a> FrameView<'a> {
    pub fn frame_index(&self) -> usize {
        self.record.interval.frame_index
    }

    /// Playback time of this frame in seconds
    pub fn timestamp(&self) -> f64 {
        self.frames.schedule.timestamp(self.frame_index())
    }

    pub fn interval(&self) -> &'a WindowInterval {
        &self.record.interval
    }

    pub fn spectrum(&self) -> &'a SpectralFrame {
        &self.record.spectrum
    }

    pub fn left_marker(&self) -> &'a BoundaryMarker {
        &self.record.interval.left
    }

    pub fn right_marker(&self) -> &'a BoundaryMarker {
        &self.record.interval.right
    }

    /// Full time-domain signal, identical for every frame
    pub fn signal_series(&self) -> (&'a [f64], &'a [f64]) {
        (self.signal.times(), self.signal.samples())
    }

    /// Samples covered by this frame's window
    pub fn window_samples(&self) -> &'a [f64] {
        let interval = &self.record.interval;
        &self.signal.samples()[interval.first_index..interval.last_index]
    }

    /// Truncated frequency axis and matching log power
    pub fn power_series(&self) -> (&'a [f64], &'a [f64]) {
        let shown = self.frames.display_bins;
        (
            &self.frames.frequency_bins[..shown],
            &self.record.spectrum.log_power()[..shown],
        )
    }

    /// Real and imaginary parts of every bin
    pub fn fft_points(&self) -> (&'a [f64], &'a [f64]) {
        (self.record.spectrum.real(), self.record.spectrum.imag())
    }

    /// Chart limits for this frame
    ///
    /// Static mode returns the shared global limits; autoscale mode derives
    /// them from this frame alone.
    pub fn limits(&self) -> Option<ChartLimits> {
        match self.frames.scale_mode {
            ScaleMode::Static => self.frames.global_limits,
            ScaleMode::Autoscale => ChartLimits::for_frame(
                self.frames.time_limits,
                &self.frames.frequency_bins[..self.frames.display_bins],
                &self.record.spectrum,
            ),
        }
    }
}

/// Finite, restartable iterator over valid frames
#[derive(Debug, Clone)]
pub struct FrameIter<'a> {
    signal: &'a Signal,
    frames: &'a PrecomputedFrames,
    next: usize,
}

impl<'a> Iterator for FrameIter<'a> {
    type Item = FrameView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let view = self.frames.view(self.signal, self.next).ok()?;
        self.next += 1;
        Some(view)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.frames.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FrameIter<'_> {}
