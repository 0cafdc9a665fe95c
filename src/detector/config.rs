use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_THRESHOLD: f64 = 0.25;
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_SMOOTHING_ALPHA: f64 = 0.15;
pub const DEFAULT_CALIBRATION_FRAMES: u32 = 60; // ~1s at 60fps
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Detector tuning. Fixed for the life of a detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// RMS level a frame must exceed to count as a clap.
    pub threshold: f64,
    /// Minimum spacing between events.
    pub debounce_ms: u64,
    /// EMA weight given to the newest frame.
    pub smoothing_alpha: f64,
    /// Optional EMA weight for falling levels.
    pub release_alpha: Option<f64>,
    /// Frames averaged into the noise floor. 0 disables calibration.
    pub calibration_frames: u32,
    pub epsilon: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            smoothing_alpha: DEFAULT_SMOOTHING_ALPHA,
            release_alpha: None,
            calibration_frames: DEFAULT_CALIBRATION_FRAMES,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl DetectorConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(ConfigError::Threshold(self.threshold));
        }
        check_alpha("smoothing_alpha", self.smoothing_alpha)?;
        if let Some(release) = self.release_alpha {
            check_alpha("release_alpha", release)?;
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(ConfigError::Epsilon(self.epsilon));
        }
        Ok(())
    }
}

fn check_alpha(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::Alpha { name, value })
    }
}
