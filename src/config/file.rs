//! Settings file loading
//!
//! Handles loading settings from TOML files.

use crate::config::Settings;
use crate::error::ConfigError;

use std::path::{Path, PathBuf};

/// Application directory under the user config dir
const APP_DIR: &str = "hello-cli";
/// Settings file name
const FILE_NAME: &str = "config.toml";

/// Settings file handler
pub struct SettingsFile;

impl SettingsFile {
    /// Load settings from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;

        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the first default location that exists
    pub fn load_default() -> Option<Settings> {
        for path in Self::default_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load(&path) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return Some(settings);
                }
                Err(e) => log::warn!("Ignoring {}: {}", path.display(), e),
            }
        }
        None
    }

    /// Get default settings file paths
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // User config
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join(APP_DIR).join(FILE_NAME));
        }

        // Current directory
        paths.push(PathBuf::from(format!("{}.toml", APP_DIR)));

        paths
    }
}
