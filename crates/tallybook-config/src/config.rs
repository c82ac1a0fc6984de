/// Application configuration: load, save, and sanitize.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Theme mode: "System", "Dark", or "Light".
    pub theme: String,
    pub zoom_level: f32,
    pub max_zoom_level: f32,
    pub show_full_path_in_title: bool,
    /// Whether to reopen the last workbook on startup.
    pub restore_last_file: bool,
    /// Path of the last workbook that was open. Empty = none.
    pub last_file: String,
    /// Whether to remember the last folder used in open/save dialogs.
    pub remember_last_folder: bool,
    /// Last folder used in an open/save dialog (persisted across sessions).
    pub last_used_folder: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: "System".to_string(),
            zoom_level: 1.0,
            max_zoom_level: 15.0,
            show_full_path_in_title: true,
            restore_last_file: true,
            last_file: String::new(),
            remember_last_folder: true,
            last_used_folder: String::new(),
        }
    }
}

impl AppConfig {
    /// Returns the config file path: exe directory + `tallybook.json`.
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|d| d.join("tallybook.json")))
            .unwrap_or_else(|| PathBuf::from("tallybook.json"))
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (missing file, parse error, etc.).
    pub fn load_or_create(path: &std::path::Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                    Ok(mut config) => {
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            // Return defaults on error (don't overwrite broken file)
            let mut config = Self::default();
            config.sanitize();
            config
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Clamps values to valid ranges and resets invalid fields.
    pub fn sanitize(&mut self) {
        self.max_zoom_level = self.max_zoom_level.max(1.0);
        self.zoom_level = self.zoom_level.clamp(0.5, self.max_zoom_level);

        let valid_modes = ["System", "Dark", "Light"];
        if !valid_modes.contains(&self.theme.as_str()) {
            self.theme = "System".to_string();
        }
    }
}
