//! End-to-end runs of the pre-computation pass on small, hand-checkable
//! signals.

use windowed_fft::animation::{precompute, WindowedFftEngine};
use windowed_fft::{EngineConfig, EngineError, Signal};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn indexed(samples: Vec<f64>) -> Signal {
    let times = (0..samples.len()).map(|i| i as f64).collect();
    Signal::new(times, samples).unwrap()
}

#[test]
fn period_four_signal_single_frame() {
    init_logging();
    let signal = indexed(vec![0.0, 1.0, 0.0, -1.0, 0.0, 1.0, 0.0, -1.0]);
    let config = EngineConfig::new(1, 1, 1, false);

    let engine = WindowedFftEngine::new(&signal, &config).unwrap();
    assert_eq!(engine.len(), 1);

    let view = engine.frame(0).unwrap();
    assert_eq!(view.interval().first_index, 0);
    assert_eq!(view.interval().last_index, 8);

    let freqs = engine.frequency_bins();
    assert_eq!(freqs.len(), 8);
    assert_eq!(freqs[0], 0.0);

    let power = view.spectrum().log_power();
    let peak = view.spectrum().peak_bin().unwrap();
    assert_eq!(freqs[peak].abs(), 0.25);

    // Everything away from +-1/4 cycles/sample is numerically zero
    for (k, &p) in power.iter().enumerate() {
        if freqs[k].abs() != 0.25 {
            assert!(p < power[peak] - 100.0, "bin {} holds {} dB", k, p);
        }
    }
}

#[test]
fn zero_signal_hits_floor_everywhere() {
    init_logging();
    let signal = indexed(vec![0.0; 64]);
    let config = EngineConfig::new(4, 2, 2, false);

    let engine = WindowedFftEngine::new(&signal, &config).unwrap();
    assert_eq!(engine.len(), 8);

    let floor = config.analysis.floor_db;
    for view in &engine {
        assert!(view.spectrum().log_power().iter().all(|&p| p == floor));
    }

    let limits = engine.frames().global_limits().unwrap();
    assert_eq!(limits.log_power.min, floor);
    assert_eq!(limits.log_power.max, floor);
}

#[test]
fn quarter_split_never_reads_past_end() {
    init_logging();
    let samples = (0..100).map(|i| ((i * 7) % 11) as f64 - 5.0).collect();
    let signal = indexed(samples);
    let config = EngineConfig::new(25, 2, 4, false);

    let engine = WindowedFftEngine::new(&signal, &config).unwrap();
    let schedule = engine.frames().schedule();

    assert_eq!(schedule.window_span(), 25);
    assert_eq!(schedule.frame_count(), 50);
    assert_eq!(engine.len() + engine.frames().skipped_frames(), 50);

    for view in &engine {
        let interval = view.interval();
        assert!(interval.first_index <= 75);
        assert!(interval.last_index <= 100);
        assert_eq!(view.window_samples().len(), 25);
    }
}

#[test]
fn signal_equal_to_window_span() {
    init_logging();
    let signal = indexed(vec![1.0, -2.0, 3.0, -4.0, 5.0]);
    let mut config = EngineConfig::new(1, 1, 1, false);
    config.analysis.window_span = Some(5);

    let frames = precompute(&signal, &config).unwrap();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames.records()[0].interval.first_index, 0);

    config.analysis.window_span = Some(6);
    let frames = precompute(&signal, &config).unwrap();
    assert!(frames.is_empty());
    assert_eq!(frames.skipped_frames(), 1);
}

#[test]
fn precompute_is_deterministic() {
    init_logging();
    let samples = (0..333).map(|i| (i as f64 * 0.37).sin() + (i as f64 * 0.05).cos()).collect();
    let signal = indexed(samples);
    let config = EngineConfig::new(12, 2, 3, false);

    let first = precompute(&signal, &config).unwrap();
    let second = precompute(&signal, &config).unwrap();

    assert_eq!(first, second);
    for (a, b) in first.records().iter().zip(second.records()) {
        assert_eq!(a.spectrum.recombine(), b.spectrum.complex_fft());
    }
}

#[test]
fn mismatched_signal_rejected_before_any_work() {
    init_logging();
    let result = Signal::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0]);
    assert!(matches!(result, Err(EngineError::MismatchedLength { .. })));
}

#[test]
fn frame_limits_follow_scale_mode() {
    init_logging();
    let samples = (0..240).map(|i| if (i / 30) % 2 == 0 { 1.0 } else { -0.5 }).collect();
    let signal = indexed(samples);

    let fixed = WindowedFftEngine::new(&signal, &EngineConfig::new(6, 1, 3, false)).unwrap();
    let first = fixed.frame(0).unwrap().limits().unwrap();
    let last = fixed.frame(fixed.len() - 1).unwrap().limits().unwrap();
    assert_eq!(first, last);

    let auto = WindowedFftEngine::new(&signal, &EngineConfig::new(6, 1, 3, true)).unwrap();
    for view in &auto {
        let limits = view.limits().unwrap();
        let (_, power) = view.power_series();
        assert!(power.iter().all(|&p| limits.log_power.contains(p)));
    }
}
