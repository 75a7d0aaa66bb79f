/// Persisted client options
///
/// Stored as JSON in the user's config directory:
/// - Linux: ~/.config/thyro-scan/settings.json
/// - macOS: ~/Library/Application Support/thyro-scan/settings.json
/// - Windows: %APPDATA%\thyro-scan\settings.json

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::report::FilenameStrategy;

fn default_backend_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

/// Client options covering the two deployment variants of the backend UI:
/// one shows the raw sigmoid score next to the percentage and names reports
/// after the backend's fixed attachment name, the other hides the score and
/// timestamps each report.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    /// Base URL of the diagnostic backend
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Show the raw model score (4 decimal places) alongside the percentage
    #[serde(default)]
    pub include_raw_score: bool,
    /// Naming scheme for downloaded reports
    #[serde(default)]
    pub filename_strategy: FilenameStrategy,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            backend_url: default_backend_url(),
            include_raw_score: false,
            filename_strategy: FilenameStrategy::Timestamped,
        }
    }
}

impl Settings {
    /// Load settings from disk, falling back to defaults when the file is
    /// missing or unreadable. A missing file is seeded with the defaults so
    /// users have something to edit.
    pub fn load() -> Self {
        let path = Self::path();

        match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => settings,
                Err(e) => {
                    eprintln!("⚠️  Ignoring malformed {}: {}", path.display(), e);
                    Settings::default()
                }
            },
            Err(_) => {
                let settings = Settings::default();
                settings.persist();
                settings
            }
        }
    }

    /// Best-effort write of the current settings; failures only warn.
    fn persist(&self) {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return;
            }
        }
        if let Ok(json) = serde_json::to_string_pretty(self) {
            let _ = std::fs::write(&path, json);
        }
    }

    /// Get the path where settings are stored
    fn path() -> PathBuf {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(std::env::temp_dir);

        path.push("thyro-scan");
        path.push("settings.json");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.backend_url, "http://127.0.0.1:8000");
        assert!(!settings.include_raw_score);
        assert_eq!(settings.filename_strategy, FilenameStrategy::Timestamped);
    }

    #[test]
    fn test_roundtrip() {
        let settings = Settings {
            backend_url: "http://imaging.lab:9000".to_string(),
            include_raw_score: true,
            filename_strategy: FilenameStrategy::Fixed,
        };

        let json = serde_json::to_string(&settings).unwrap();
        let restored: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, restored);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        // Hand-edited settings files may only set one field
        let restored: Settings =
            serde_json::from_str(r#"{"include_raw_score": true}"#).unwrap();
        assert!(restored.include_raw_score);
        assert_eq!(restored.backend_url, "http://127.0.0.1:8000");
        assert_eq!(restored.filename_strategy, FilenameStrategy::Timestamped);
    }
}
