//! Host settings
//!
//! Read from an optional JSON file next to the binary; anything missing falls
//! back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{MAX_FRAME_DELTA, TARGET_TPS};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Host configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; `None` derives one from the clock at launch
    pub seed: Option<u64>,
    /// Host tick cadence
    pub target_tps: u32,
    /// Longest frame time passed to the simulation (seconds)
    pub max_frame_delta: f32,
    /// Length of the headless attract run (seconds)
    pub demo_seconds: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            target_tps: TARGET_TPS,
            max_frame_delta: MAX_FRAME_DELTA,
            demo_seconds: 30.0,
        }
    }
}

impl Settings {
    /// Settings file looked up in the working directory
    pub const FILE_NAME: &'static str = "escape-arcade.json";

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load the settings file if present, otherwise defaults
    pub fn load() -> Self {
        let path = Path::new(Self::FILE_NAME);
        if !path.exists() {
            log::info!("Using default settings");
            return Self::default();
        }
        match Self::from_path(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.target_tps == 0 {
            return Err(SettingsError::Invalid {
                field: "target_tps",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_frame_delta.is_nan() || self.max_frame_delta <= 0.0 {
            return Err(SettingsError::Invalid {
                field: "max_frame_delta",
                reason: format!("must be positive, got {}", self.max_frame_delta),
            });
        }
        if self.demo_seconds.is_nan() || self.demo_seconds < 0.0 {
            return Err(SettingsError::Invalid {
                field: "demo_seconds",
                reason: format!("must not be negative, got {}", self.demo_seconds),
            });
        }
        Ok(())
    }

    /// Nominal frame time at the configured cadence
    pub fn frame_time(&self) -> f32 {
        1.0 / self.target_tps.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.seed, None);
        assert_eq!(s.target_tps, 60);
        assert_eq!(s.max_frame_delta, 0.1);
        assert!(s.validate().is_ok());
        assert!((s.frame_time() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "seed": 42 }"#).unwrap();
        assert_eq!(s.seed, Some(42));
        assert_eq!(s.target_tps, 60);
        assert_eq!(s.demo_seconds, 30.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Settings::from_json(r#"{ "target_tps": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "target_tps", .. }));

        let err = Settings::from_json(r#"{ "max_frame_delta": -1.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "max_frame_delta", .. }));
        assert!(err.to_string().contains("max_frame_delta"));
    }

    #[test]
    fn test_parse_and_io_errors() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));

        let err = Settings::from_path("/definitely/missing/escape-arcade.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }

    #[test]
    fn test_round_trip_through_json() {
        let s = Settings {
            seed: Some(7),
            demo_seconds: 5.0,
            ..Default::default()
        };
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), s);
    }
}
