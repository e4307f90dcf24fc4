//! User settings stored as settings.json in the app data directory

use crate::constants::{DEFAULT_PAGE_SIZE, PAGE_SIZES};
use crate::theme::ThemeMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    pub theme_mode: ThemeMode,

    // Dictionary table
    pub page_size: usize,

    // Paths
    pub last_export_dir: Option<String>,

    /// `bundled`, `file:<path>` or an http(s) URL
    pub data_source: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            theme_mode: ThemeMode::Light,
            page_size: DEFAULT_PAGE_SIZE,
            last_export_dir: None,
            data_source: "bundled".to_string(),
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        let mut settings: Self = match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        };

        if !PAGE_SIZES.contains(&settings.page_size) {
            warn!(page_size = settings.page_size, "Unsupported page size, resetting");
            settings.page_size = DEFAULT_PAGE_SIZE;
        }
        settings
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    /// Where the export dialog opens: last used directory, else Documents
    pub fn export_dir_or_default(&self) -> PathBuf {
        self.last_export_dir
            .as_ref()
            .map(PathBuf::from)
            .filter(|p| p.is_dir())
            .or_else(dirs::document_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path());
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.theme_mode, ThemeMode::Light);
    }

    #[test]
    fn dark_mode_survives_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            theme_mode: ThemeMode::Dark,
            page_size: 20,
            ..Default::default()
        };
        settings.save(dir.path());

        let loaded = Settings::load(dir.path());
        assert_eq!(loaded.theme_mode, ThemeMode::Dark);
        assert_eq!(loaded.page_size, 20);
    }

    #[test]
    fn partial_and_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        std::fs::write(&path, r#"{"theme_mode": "dark", "page_size": 7}"#).unwrap();
        let loaded = Settings::load(dir.path());
        assert_eq!(loaded.theme_mode, ThemeMode::Dark);
        assert_eq!(loaded.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(loaded.data_source, "bundled");

        std::fs::write(&path, "not json").unwrap();
        assert_eq!(Settings::load(dir.path()), Settings::default());
    }
}
