//! Bin-to-frequency mapping

/// Frequencies of a full `n`-point transform sampled every `dt` seconds
///
/// Bin `k` maps to `k / (n * dt)` for `k <= n / 2`; higher bins wrap around
/// to the negative frequency `(k - n) / (n * dt)`.
pub fn fft_frequencies(n: usize, dt: f64) -> Vec<f64> {
    let scale = 1.0 / (n as f64 * dt);
    (0..n)
        .map(|k| {
            if k <= n / 2 {
                k as f64 * scale
            } else {
                (k as f64 - n as f64) * scale
            }
        })
        .collect()
}

/// Non-negative frequencies of a one-sided `n`-point transform
pub fn rfft_frequencies(n: usize, dt: f64) -> Vec<f64> {
    let scale = 1.0 / (n as f64 * dt);
    (0..=n / 2).map(|k| k as f64 * scale).collect()
}

/// Number of leading bins shown on the power chart
///
/// Never less than one bin, so a display always has something to draw.
pub fn display_bin_count(num_bins: usize, fraction: f64) -> usize {
    ((num_bins as f64 * fraction) as usize).clamp(1, num_bins.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_axis_even() {
        let freqs = fft_frequencies(8, 1.0);

        assert_eq!(freqs.len(), 8);
        assert_eq!(freqs[0], 0.0);
        assert_eq!(freqs[2], 0.25);
        assert_eq!(freqs[4], 0.5);
        assert_eq!(freqs[5], -0.375);
        assert_eq!(freqs[7], -0.125);
    }

    #[test]
    fn test_full_axis_odd() {
        let freqs = fft_frequencies(5, 0.1);

        assert_eq!(freqs.len(), 5);
        assert!((freqs[1] - 2.0).abs() < 1e-12);
        assert!((freqs[2] - 4.0).abs() < 1e-12);
        assert!((freqs[3] + 4.0).abs() < 1e-12);
        assert!((freqs[4] + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_one_sided_axis() {
        let freqs = rfft_frequencies(1024, 1.0 / 48000.0);

        assert_eq!(freqs.len(), 513);
        assert_eq!(freqs[0], 0.0);
        assert!((freqs[512] - 24000.0).abs() < 1e-6);
    }

    #[test]
    fn test_display_bin_count() {
        assert_eq!(display_bin_count(4000, 0.25), 1000);
        assert_eq!(display_bin_count(25, 0.25), 6);
        assert_eq!(display_bin_count(3, 0.25), 1);
        assert_eq!(display_bin_count(8, 1.0), 8);
    }
}
