//! Build parameters and configuration file loading.

use crate::reduce::{BarPolicy, UnknownPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Parameters for one barcode build.
///
/// An explicit frame stride takes precedence over the time-based stride:
/// when `stride_frames` is set, `stride_seconds` is ignored entirely rather
/// than merged. Defaults follow the CLI: sample one frame per second, bars
/// one pixel wide, cover the whole video, keep the image in memory only.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Strip reduction policy.
    pub policy: BarPolicy,
    /// Sample every Nth frame. When set, overrides `stride_seconds`.
    pub stride_frames: Option<u64>,
    /// Sample one frame every N seconds (ignored if `stride_frames` is set).
    pub stride_seconds: u64,
    /// Width in pixels of each bar in the barcode.
    pub bar_width: u32,
    /// Fraction of the video's total frames to cover, in `(0, 1]`.
    pub stop_fraction: f64,
    /// Persist the finished barcode as a PNG.
    pub persist: bool,
    /// Directory for the persisted PNG; current directory when unset.
    pub output_dir: Option<PathBuf>,
}

impl BuildOptions {
    /// Creates options for `policy` with the default parameters.
    pub fn new(policy: BarPolicy) -> Self {
        Self {
            policy,
            stride_frames: None,
            stride_seconds: 1,
            bar_width: 1,
            stop_fraction: 1.0,
            persist: false,
            output_dir: None,
        }
    }

    /// Validates the parameters, before any frame is read.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bar_width == 0 {
            return Err(ConfigError::InvalidBarWidth);
        }
        if self.stride_seconds == 0 {
            return Err(ConfigError::InvalidStrideSeconds);
        }
        if self.stride_frames == Some(0) {
            return Err(ConfigError::InvalidStrideFrames);
        }
        if !self.stop_fraction.is_finite() || self.stop_fraction <= 0.0 || self.stop_fraction > 1.0
        {
            return Err(ConfigError::InvalidStopFraction(self.stop_fraction));
        }
        Ok(())
    }

    /// Resolves the effective frame stride for a source running at `fps`.
    ///
    /// An explicit frame stride wins outright; otherwise the stride is
    /// `trunc(fps) * stride_seconds`. A resolved stride of zero (fps below
    /// one) is coerced to one so sampling always advances.
    pub fn resolve_stride(&self, fps: f64) -> u64 {
        match self.stride_frames {
            Some(frames) => frames.max(1),
            None => ((fps.max(0.0).trunc() as u64) * self.stride_seconds).max(1),
        }
    }

    /// Filename the barcode is persisted under.
    ///
    /// When an explicit frame stride is used, the seconds slot in the name
    /// falls back to 1, matching the stride resolution rule.
    pub fn output_filename(&self) -> String {
        let seconds = if self.stride_frames.is_some() {
            1
        } else {
            self.stride_seconds
        };
        format!("barcode_{}_{}.png", self.policy.name(), seconds)
    }

    /// Full path the barcode is persisted to.
    pub fn output_path(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.join(self.output_filename()),
            None => PathBuf::from(self.output_filename()),
        }
    }
}

/// Configuration validation and loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The policy name is not one of the known policies.
    #[error(transparent)]
    Policy(#[from] UnknownPolicy),
    /// `bar_width` must be at least one pixel.
    #[error("bar width must be a positive number of pixels")]
    InvalidBarWidth,
    /// `stride_seconds` must be at least one second.
    #[error("stride seconds must be a positive number of seconds")]
    InvalidStrideSeconds,
    /// An explicit `stride_frames` of zero would never advance.
    #[error("stride frames must be a positive number of frames")]
    InvalidStrideFrames,
    /// `stop_fraction` must lie in `(0, 1]`.
    #[error("stop fraction {0} is outside (0, 1]")]
    InvalidStopFraction(f64),
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    FileRead(String),
    /// The configuration file could not be parsed.
    #[error("failed to parse config file: {0}")]
    Parse(String),
}

/// Optional TOML configuration file.
///
/// Holds the same fields as the CLI options; every field is optional so
/// explicit CLI flags can override file values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    /// Strip reduction policy.
    pub policy: Option<BarPolicy>,
    /// Sample every Nth frame.
    pub stride_frames: Option<u64>,
    /// Sample one frame every N seconds.
    pub stride_seconds: Option<u64>,
    /// Width in pixels of each bar.
    pub bar_width: Option<u32>,
    /// Fraction of the video to cover.
    pub stop_fraction: Option<f64>,
    /// Persist the finished barcode as a PNG.
    pub save: Option<bool>,
    /// Directory for the persisted PNG.
    pub output_dir: Option<PathBuf>,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileRead(e.to_string()))?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_valid() {
        let options = BuildOptions::new(BarPolicy::Average);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_zero_bar_width_invalid() {
        let mut options = BuildOptions::new(BarPolicy::Squeeze);
        options.bar_width = 0;
        assert!(matches!(
            options.validate(),
            Err(ConfigError::InvalidBarWidth)
        ));
    }

    #[test]
    fn test_stop_fraction_bounds() {
        let mut options = BuildOptions::new(BarPolicy::Squeeze);
        options.stop_fraction = 0.0;
        assert!(options.validate().is_err());
        options.stop_fraction = 1.5;
        assert!(options.validate().is_err());
        options.stop_fraction = 1.0;
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_explicit_stride_overrides_seconds() {
        let mut options = BuildOptions::new(BarPolicy::Average);
        options.stride_seconds = 30;
        options.stride_frames = Some(7);
        assert_eq!(options.resolve_stride(30.0), 7);
        // The filename's seconds slot falls back to 1 as well.
        assert_eq!(options.output_filename(), "barcode_average_1.png");
    }

    #[test]
    fn test_time_based_stride_resolution() {
        let mut options = BuildOptions::new(BarPolicy::Average);
        options.stride_seconds = 30;
        // Scenario: 30 seconds at 30 fps is 900 frames.
        assert_eq!(options.resolve_stride(30.0), 900);
        // Fractional rates truncate before multiplying.
        assert_eq!(options.resolve_stride(29.97), 29 * 30);
        assert_eq!(options.output_filename(), "barcode_average_30.png");
    }

    #[test]
    fn test_zero_resolved_stride_coerced() {
        let options = BuildOptions::new(BarPolicy::Average);
        assert_eq!(options.resolve_stride(0.5), 1);
    }

    #[test]
    fn test_file_config_round_trip() {
        let toml_text = r#"
            policy = "squeeze"
            stride_seconds = 30
            bar_width = 2
            stop_fraction = 0.5
            save = true
        "#;
        let config: FileConfig = toml::from_str(toml_text).unwrap();
        assert_eq!(config.policy, Some(BarPolicy::Squeeze));
        assert_eq!(config.stride_seconds, Some(30));
        assert_eq!(config.bar_width, Some(2));
        assert_eq!(config.stop_fraction, Some(0.5));
        assert_eq!(config.save, Some(true));
        assert!(config.stride_frames.is_none());
    }
}
