//! Window extraction and boundary markers
//!
//! For every in-range frame the extractor slices the analysis window out of
//! the signal and builds the two vertical marker lines that show the window
//! on the time-domain chart.

use super::schedule::FrameSlot;
use crate::signal::Signal;

/// Vertical extent shared by all boundary markers
///
/// Derived once from the whole signal, padded by a fraction of the
/// extreme sample values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerExtent {
    pub top: f64,
    pub bottom: f64,
}

impl MarkerExtent {
    pub fn from_signal(signal: &Signal, offset: f64) -> Self {
        let (lo, hi) = signal.sample_range();
        Self {
            top: hi + (offset * hi).abs(),
            bottom: lo - (offset * lo).abs(),
        }
    }
}

/// Two-point vertical line segment, coordinates in plotting order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryMarker {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl BoundaryMarker {
    fn vertical(x: f64, extent: MarkerExtent) -> Self {
        Self {
            x: [x, x],
            y: [extent.top, extent.bottom],
        }
    }
}

/// Sample range analysed by one frame plus its markers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowInterval {
    pub frame_index: usize,
    pub first_index: usize,
    /// Exclusive end, `first_index + window_span`
    pub last_index: usize,
    pub left: BoundaryMarker,
    pub right: BoundaryMarker,
}

impl WindowInterval {
    pub fn span(&self) -> usize {
        self.last_index - self.first_index
    }

    pub fn start_time(&self) -> f64 {
        self.left.x[0]
    }

    pub fn end_time(&self) -> f64 {
        self.right.x[0]
    }
}

/// Window interval together with the samples it covers
#[derive(Debug, Clone, Copy)]
pub struct ExtractedWindow<'a> {
    pub interval: WindowInterval,
    pub samples: &'a [f64],
}

/// Slices analysis windows out of a signal
pub struct WindowExtractor {
    window_span: usize,
    extent: MarkerExtent,
}

impl WindowExtractor {
    /// Create extractor
    ///
    /// # Arguments
    /// * `signal` - Signal whose extremes size the markers
    /// * `window_span` - Samples per window
    /// * `marker_offset` - Relative padding of the markers beyond the extremes
    pub fn new(signal: &Signal, window_span: usize, marker_offset: f64) -> Self {
        Self {
            window_span,
            extent: MarkerExtent::from_signal(signal, marker_offset),
        }
    }

    /// Extract the window of one scheduled frame
    ///
    /// Returns `None` when the window would read past the last sample.
    pub fn extract<'a>(&self, signal: &'a Signal, slot: FrameSlot) -> Option<ExtractedWindow<'a>> {
        let n = signal.len();
        let first_index = slot.data_index;
        let last_index = match first_index.checked_add(self.window_span) {
            Some(last) if last <= n => last,
            _ => {
                log::debug!(
                    "Skipping frame {}: window at sample {} (span {}) exceeds {} samples",
                    slot.frame_index,
                    first_index,
                    self.window_span,
                    n
                );
                return None;
            }
        };

        let times = signal.times();
        let x_start = times[first_index];
        // Window reaching the last sample ends one time step after it
        let x_end = if last_index < n {
            times[last_index]
        } else {
            times[n - 1] + signal.dt()
        };

        Some(ExtractedWindow {
            interval: WindowInterval {
                frame_index: slot.frame_index,
                first_index,
                last_index,
                left: BoundaryMarker::vertical(x_start, self.extent),
                right: BoundaryMarker::vertical(x_end, self.extent),
            },
            samples: &signal.samples()[first_index..last_index],
        })
    }

    pub fn window_span(&self) -> usize {
        self.window_span
    }

    pub fn extent(&self) -> MarkerExtent {
        self.extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize) -> Signal {
        let samples = (0..len).map(|i| i as f64 - 4.0).collect();
        Signal::from_uniform(samples, 0.5).unwrap()
    }

    #[test]
    fn test_extract_window() {
        let signal = ramp(20);
        let extractor = WindowExtractor::new(&signal, 5, 0.1);

        let window = extractor
            .extract(&signal, FrameSlot { frame_index: 2, data_index: 3 })
            .unwrap();

        assert_eq!(window.samples, &[-1.0, 0.0, 1.0, 2.0, 3.0]);
        assert_eq!(window.interval.frame_index, 2);
        assert_eq!(window.interval.first_index, 3);
        assert_eq!(window.interval.last_index, 8);
        assert_eq!(window.interval.span(), 5);
        assert_eq!(window.interval.left.x, [1.5, 1.5]);
        assert_eq!(window.interval.right.x, [4.0, 4.0]);
    }

    #[test]
    fn test_marker_extent_is_global() {
        let signal = ramp(20);
        let extractor = WindowExtractor::new(&signal, 5, 0.1);

        // Samples span -4..=15
        let extent = extractor.extent();
        assert!((extent.top - 16.5).abs() < 1e-12);
        assert!((extent.bottom + 4.4).abs() < 1e-12);

        let early = extractor.extract(&signal, FrameSlot { frame_index: 0, data_index: 0 }).unwrap();
        let late = extractor.extract(&signal, FrameSlot { frame_index: 1, data_index: 15 }).unwrap();
        assert_eq!(early.interval.left.y, late.interval.right.y);
        assert_eq!(early.interval.left.y, [extent.top, extent.bottom]);
    }

    #[test]
    fn test_window_touching_end() {
        let signal = ramp(10);
        let extractor = WindowExtractor::new(&signal, 4, 0.1);

        let window = extractor
            .extract(&signal, FrameSlot { frame_index: 0, data_index: 6 })
            .unwrap();

        assert_eq!(window.samples.len(), 4);
        assert_eq!(window.interval.last_index, 10);
        assert!((window.interval.end_time() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_skipped() {
        let signal = ramp(10);
        let extractor = WindowExtractor::new(&signal, 4, 0.1);

        assert!(extractor.extract(&signal, FrameSlot { frame_index: 0, data_index: 7 }).is_none());
        assert!(extractor
            .extract(&signal, FrameSlot { frame_index: 0, data_index: usize::MAX })
            .is_none());
    }
}
