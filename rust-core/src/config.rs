//! Engine configuration
//!
//! All settings can be given in code through [`EngineConfig::new`] or read
//! from a TOML file. Keys missing from the file fall back to the defaults of
//! the animated FFT experiment (60 fps, 10 s, split factor 2).

use serde::Deserialize;
use std::path::Path;

use crate::error::{EngineError, Result};
use crate::spectrum::Transform;

/// Floor sentinel for log-power bins whose magnitude is zero (dB)
pub const DEFAULT_FLOOR_DB: f64 = -200.0;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnimationConfig {
    /// Frames rendered per second of playback
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Playback length in seconds
    #[serde(default = "default_total_time")]
    pub total_time: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisConfig {
    /// Window span is `floor(N / split_factor)`
    #[serde(default = "default_split_factor")]
    pub split_factor: u32,
    /// Explicit window span, replaces the split factor when set
    #[serde(default)]
    pub window_span: Option<usize>,
    #[serde(default)]
    pub transform: Transform,
    /// Value substituted for the log power of zero-magnitude bins
    #[serde(default = "default_floor_db")]
    pub floor_db: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DisplayConfig {
    /// Recompute chart limits from each frame instead of once globally
    #[serde(default)]
    pub autoscale_limits: bool,
    /// Leading fraction of the frequency bins handed to the power chart
    #[serde(default = "default_display_fraction")]
    pub display_fraction: f64,
    /// Relative vertical padding of the window boundary markers
    #[serde(default = "default_marker_offset")]
    pub marker_offset: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            total_time: default_total_time(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            split_factor: default_split_factor(),
            window_span: None,
            transform: Transform::default(),
            floor_db: default_floor_db(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            autoscale_limits: false,
            display_fraction: default_display_fraction(),
            marker_offset: default_marker_offset(),
        }
    }
}

fn default_fps() -> u32 { 60 }
fn default_total_time() -> u32 { 10 }
fn default_split_factor() -> u32 { 2 }
fn default_floor_db() -> f64 { DEFAULT_FLOOR_DB }
fn default_display_fraction() -> f64 { 0.25 }
fn default_marker_offset() -> f64 { 0.1 }

impl EngineConfig {
    /// Create a configuration from the four required animation settings
    ///
    /// # Arguments
    /// * `fps` - Frames per second
    /// * `total_time` - Playback length in seconds
    /// * `split_factor` - Signal length divided by window span
    /// * `autoscale_limits` - Per-frame chart limits instead of global ones
    pub fn new(fps: u32, total_time: u32, split_factor: u32, autoscale_limits: bool) -> Self {
        Self {
            animation: AnimationConfig { fps, total_time },
            analysis: AnalysisConfig {
                split_factor,
                ..AnalysisConfig::default()
            },
            display: DisplayConfig {
                autoscale_limits,
                ..DisplayConfig::default()
            },
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every setting that would make the frame schedule meaningless
    pub fn validate(&self) -> Result<()> {
        if self.animation.fps == 0 {
            return Err(EngineError::Configuration("fps must be at least 1".into()));
        }
        if self.animation.total_time == 0 {
            return Err(EngineError::Configuration("total_time must be at least 1 second".into()));
        }
        if self.analysis.split_factor == 0 {
            return Err(EngineError::Configuration("split_factor must be at least 1".into()));
        }
        if self.analysis.window_span == Some(0) {
            return Err(EngineError::Configuration("window_span must be at least 1".into()));
        }
        if !self.analysis.floor_db.is_finite() {
            return Err(EngineError::Configuration(format!(
                "floor_db must be finite (found: {})",
                self.analysis.floor_db
            )));
        }
        let fraction = self.display.display_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(EngineError::Configuration(format!(
                "display_fraction must be in (0, 1] (found: {})",
                fraction
            )));
        }
        if !(self.display.marker_offset.is_finite() && self.display.marker_offset >= 0.0) {
            return Err(EngineError::Configuration(format!(
                "marker_offset must be a non-negative number (found: {})",
                self.display.marker_offset
            )));
        }
        Ok(())
    }
}

/// Load and validate configuration from a TOML file
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = EngineConfig::from_toml_str(&content)?;
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_experiment() {
        let config = EngineConfig::default();

        assert_eq!(config.animation.fps, 60);
        assert_eq!(config.animation.total_time, 10);
        assert_eq!(config.analysis.split_factor, 2);
        assert_eq!(config.analysis.transform, Transform::Complex);
        assert!(!config.display.autoscale_limits);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [animation]
            fps = 120

            [analysis]
            transform = "real"
            "#,
        )
        .unwrap();

        assert_eq!(config.animation.fps, 120);
        assert_eq!(config.animation.total_time, 10);
        assert_eq!(config.analysis.transform, Transform::Real);
        assert_eq!(config.analysis.floor_db, DEFAULT_FLOOR_DB);
        assert_eq!(config.display.display_fraction, 0.25);
    }

    #[test]
    fn test_zero_values_rejected() {
        let result = EngineConfig::from_toml_str("[animation]\nfps = 0\n");
        assert!(matches!(result, Err(EngineError::Configuration(_))));

        let config = EngineConfig::new(30, 0, 2, false);
        assert!(matches!(config.validate(), Err(EngineError::Configuration(_))));

        let config = EngineConfig::new(30, 1, 0, false);
        assert!(matches!(config.validate(), Err(EngineError::Configuration(_))));
    }

    #[test]
    fn test_display_fraction_bounds() {
        let mut config = EngineConfig::new(1, 1, 1, false);
        config.display.display_fraction = 0.0;
        assert!(config.validate().is_err());

        config.display.display_fraction = 1.0;
        assert!(config.validate().is_ok());

        config.display.display_fraction = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let result = EngineConfig::from_toml_str("[animation\nfps = 1");
        assert!(matches!(result, Err(EngineError::Toml(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_config(Path::new("/nonexistent/windowed-fft.toml"));
        assert!(matches!(result, Err(EngineError::Io(_))));
    }
}
