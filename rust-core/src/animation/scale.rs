//! Chart limits for the frame consumer
//!
//! Static mode scans every precomputed frame once and fixes the limits for
//! the whole playback. Autoscale mode derives them from a single frame.

use super::window::WindowInterval;
use crate::signal::Signal;
use crate::spectrum::SpectralFrame;

/// Relative padding of the time axis, fraction of its span
pub const TIME_MARGIN: f64 = 0.02;
/// Relative padding of horizontal autoscaled axes (frequency, real)
pub const AUTOSCALE_X_MARGIN: f64 = 0.05;
/// Relative padding of vertical autoscaled axes (log power, imaginary)
pub const AUTOSCALE_Y_MARGIN: f64 = 0.1;

/// How chart limits are chosen during playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleMode {
    /// Global limits computed once from all frames
    Static,
    /// Limits recomputed from each frame's own data
    Autoscale,
}

impl ScaleMode {
    pub fn from_autoscale(autoscale_limits: bool) -> Self {
        if autoscale_limits {
            ScaleMode::Autoscale
        } else {
            ScaleMode::Static
        }
    }
}

/// Closed range of one chart axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLimits {
    pub min: f64,
    pub max: f64,
}

impl AxisLimits {
    /// Smallest and largest value, NaN entries ignored
    ///
    /// Returns `None` when there is nothing to measure.
    pub fn of(values: &[f64]) -> Option<Self> {
        let (min, max) = values
            .iter()
            .filter(|v| !v.is_nan())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

        (min <= max).then_some(Self { min, max })
    }

    /// Widen each bound by a fraction of its own magnitude
    pub fn padded(self, margin: f64) -> Self {
        Self {
            min: self.min - (margin * self.min).abs(),
            max: self.max + (margin * self.max).abs(),
        }
    }

    /// Widen both bounds by a fraction of the range width
    pub fn padded_by_span(self, margin: f64) -> Self {
        let pad = (margin * (self.max - self.min)).abs();
        Self {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Limits for every axis the consumer draws
///
/// `time` is the horizontal axis of the signal chart, `frequency` and
/// `log_power` span the power chart, `real` and `imag` the component scatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLimits {
    pub time: AxisLimits,
    pub frequency: AxisLimits,
    pub log_power: AxisLimits,
    pub real: AxisLimits,
    pub imag: AxisLimits,
}

impl ChartLimits {
    /// Global limits over all precomputed frames
    ///
    /// # Arguments
    /// * `time` - Time-axis limits of the signal chart
    /// * `display_frequencies` - Frequency bins shown on the power chart
    /// * `frames` - Every precomputed frame
    pub fn global<'a, I>(time: AxisLimits, display_frequencies: &[f64], frames: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a SpectralFrame>,
    {
        let display_bins = display_frequencies.len();
        let frequency = AxisLimits::of(display_frequencies)?;

        let mut log_power: Option<AxisLimits> = None;
        let mut real: Option<AxisLimits> = None;
        let mut imag: Option<AxisLimits> = None;
        for frame in frames {
            let shown = display_bins.min(frame.num_bins());
            log_power = merge(log_power, AxisLimits::of(&frame.log_power()[..shown]));
            real = merge(real, AxisLimits::of(frame.real()));
            imag = merge(imag, AxisLimits::of(frame.imag()));
        }

        Some(Self {
            time,
            frequency,
            log_power: log_power?,
            real: real?,
            imag: imag?,
        })
    }

    /// Limits derived from one frame only
    pub fn for_frame(time: AxisLimits, display_frequencies: &[f64], frame: &SpectralFrame) -> Option<Self> {
        let shown = display_frequencies.len().min(frame.num_bins());

        Some(Self {
            time,
            frequency: AxisLimits::of(display_frequencies)?.padded(AUTOSCALE_X_MARGIN),
            log_power: AxisLimits::of(&frame.log_power()[..shown])?.padded(AUTOSCALE_Y_MARGIN),
            real: AxisLimits::of(frame.real())?.padded(AUTOSCALE_X_MARGIN),
            imag: AxisLimits::of(frame.imag())?.padded(AUTOSCALE_Y_MARGIN),
        })
    }
}

/// Time-axis limits covering the signal and every window marker
pub fn time_limits<'a, I>(signal: &Signal, intervals: I) -> AxisLimits
where
    I: IntoIterator<Item = &'a WindowInterval>,
{
    let (start, end) = signal.time_range();
    let covered = intervals.into_iter().fold(AxisLimits { min: start, max: end }, |acc, iv| {
        acc.union(AxisLimits {
            min: iv.start_time(),
            max: iv.end_time(),
        })
    });

    covered.padded_by_span(TIME_MARGIN)
}

fn merge(acc: Option<AxisLimits>, next: Option<AxisLimits>) -> Option<AxisLimits> {
    match (acc, next) {
        (Some(a), Some(b)) => Some(a.union(b)),
        (a, b) => a.or(b),
    }
}
