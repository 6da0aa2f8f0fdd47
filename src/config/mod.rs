//! Configuration system
//!
//! [`Config`] is the per-invocation context filled in by group commands.
//! [`Settings`] come from an optional TOML file and tune the console.

pub mod file;

pub use file::SettingsFile;

use serde::Deserialize;
use std::path::PathBuf;

/// Context shared by every command on an invocation chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Print extra diagnostic lines
    pub verbose: bool,
    /// Directory reported to the user
    pub home_directory: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            home_directory: PathBuf::from("."),
        }
    }
}

/// Settings file contents
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Console settings
    pub output: OutputSettings,
}

/// Console settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputSettings {
    /// Allow escape sequences on interactive terminals
    pub color: bool,
    /// Pager command line
    pub pager: String,
    /// Screen height assumed when the terminal cannot report one
    pub fallback_rows: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            color: true,
            pager: "less -R".to_string(),
            fallback_rows: 24,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.verbose);
        assert_eq!(config.home_directory, PathBuf::from("."));
    }

    #[test]
    fn test_partial_settings() {
        let settings: Settings = toml::from_str("[output]\ncolor = false\n").unwrap();
        assert!(!settings.output.color);
        assert_eq!(settings.output.pager, "less -R");
        assert_eq!(settings.output.fallback_rows, 24);
    }

    #[test]
    fn test_empty_settings() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }
}
