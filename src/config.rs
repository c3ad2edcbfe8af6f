//! Configuration management for dynamic parameter tuning
//!
//! This module provides runtime configuration loading from JSON files,
//! enabling threshold experiments without recompilation. The hysteresis
//! thresholds for note stabilization and the spectrum bin count for noise
//! calibration can be adjusted via the config file.
//!
//! Values are only checked for structural validity here; the component
//! constructors reject unusable values (zero thresholds, zero bin count)
//! with typed errors.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub stabilizer: StabilizerConfig,
    pub calibration: CalibrationConfig,
}

/// Note stabilization hysteresis parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StabilizerConfig {
    /// Consecutive matching detections required before a note counts as
    /// confirmed (and silence bridging applies to it)
    pub match_threshold: u32,
    /// Consecutive silent ticks tolerated before a confirmed note is cleared
    pub silence_threshold: u32,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            // A single-frame glitch must not count as a confirmed note,
            // so two repeats are required on top of the first detection
            match_threshold: 2,
            silence_threshold: 3,
        }
    }
}

/// Noise calibration accumulator parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Number of bins in the estimator's magnitude spectrum
    pub spectrum_size: usize,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            spectrum_size: 1024,
        }
    }
}

impl Default for AppConfig {
    /// Default configuration values (fallback if config file not found)
    fn default() -> Self {
        Self {
            stabilizer: StabilizerConfig::default(),
            calibration: CalibrationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// * `AppConfig` - Loaded configuration, or the defaults if the file
    ///   doesn't exist or the JSON is invalid
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.stabilizer.match_threshold, 2);
        assert_eq!(config.stabilizer.silence_threshold, 3);
        assert_eq!(config.calibration.spectrum_size, 1024);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(
            parsed.stabilizer.match_threshold,
            config.stabilizer.match_threshold
        );
        assert_eq!(
            parsed.calibration.spectrum_size,
            config.calibration.spectrum_size
        );
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = AppConfig::load_from_file("does/not/exist.json");
        assert_eq!(config.stabilizer.match_threshold, 2);
        assert_eq!(config.calibration.spectrum_size, 1024);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("pitch_tracker_config_test.json");
        let json = r#"{
            "stabilizer": { "match_threshold": 4, "silence_threshold": 6 },
            "calibration": { "spectrum_size": 512 }
        }"#;
        fs::write(&path, json).unwrap();

        let config = AppConfig::load_from_file(&path);
        assert_eq!(config.stabilizer.match_threshold, 4);
        assert_eq!(config.stabilizer.silence_threshold, 6);
        assert_eq!(config.calibration.spectrum_size, 512);

        let _ = fs::remove_file(&path);
    }
}
