//! Pipeline tuning loaded from scan_config.json.
//!
//! If the config file doesn't exist, default values are used. The file is
//! read fresh at startup, so thresholds can be adjusted against real sample
//! cards without rebuilding.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunable thresholds for the analysis pipeline and the provider request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Minimum provider confidence for a fragment to enter the pipeline
    pub min_confidence: f32,
    /// Per-feature annotation cap in the provider request
    pub max_results: u32,
    /// Resolved-number count below which the card is flagged low-detection
    pub low_detection_threshold: usize,
    /// HTTP timeout for the provider request, in seconds
    pub request_timeout_secs: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.3,
            max_results: 100,
            low_detection_threshold: 15,
            request_timeout_secs: 30,
        }
    }
}

impl ScanConfig {
    /// Load config from file, or return defaults if file doesn't exist.
    pub fn load(config_path: &Path) -> Self {
        if config_path.exists() {
            match fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => {
                        crate::log(&format!("Loaded scan config from {}", config_path.display()));
                        return config;
                    }
                    Err(e) => {
                        crate::log(&format!(
                            "Failed to parse scan config: {}. Using defaults.",
                            e
                        ));
                    }
                },
                Err(e) => {
                    crate::log(&format!(
                        "Failed to read scan config: {}. Using defaults.",
                        e
                    ));
                }
            }
        }
        Self::default()
    }

    /// Save default config to file (for reference).
    pub fn save_default(config_path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&Self::default()).unwrap();
        fs::write(config_path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.min_confidence, 0.3);
        assert_eq!(config.max_results, 100);
        assert_eq!(config.low_detection_threshold, 15);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScanConfig::load(&dir.path().join("scan_config.json"));
        assert_eq!(config.min_confidence, 0.3);
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan_config.json");
        fs::write(&path, r#"{ "min_confidence": 0.5 }"#).unwrap();

        let config = ScanConfig::load(&path);
        assert_eq!(config.min_confidence, 0.5);
        assert_eq!(config.max_results, 100);
    }

    #[test]
    fn test_load_broken_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan_config.json");
        fs::write(&path, "not json").unwrap();

        let config = ScanConfig::load(&path);
        assert_eq!(config.min_confidence, 0.3);
    }

    #[test]
    fn test_save_default_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan_config.json");
        ScanConfig::save_default(&path).unwrap();

        let config = ScanConfig::load(&path);
        assert_eq!(config.max_results, ScanConfig::default().max_results);
    }
}
