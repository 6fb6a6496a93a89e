//! Configuration file support for the converter.
//!
//! Loads settings from `~/.config/cab2adif/config.toml` on Linux
//! (or platform-appropriate location on other OSes).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Application configuration loaded from TOML file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default log level when RUST_LOG and --log-level are not set.
    pub log_level: String,

    /// Print the statistics report after each conversion.
    pub print_stats: bool,

    /// File extension for output files derived from the input path.
    pub output_extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            print_stats: true,
            output_extension: "adi".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but is malformed.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                toml::from_str(&content)
                    .with_context(|| format!("Invalid TOML in config file: {}", path.display()))
            }
            _ => Ok(Config::default()),
        }
    }

    /// Returns the path to the config file.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cab2adif/config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, "info");
        assert!(config.print_stats);
        assert_eq!(config.output_extension, "adi");
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml = r#"
            log_level = "debug"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.log_level, "debug");
        // Other fields should use defaults
        assert!(config.print_stats);
        assert_eq!(config.output_extension, "adi");
    }

    #[test]
    fn test_parse_full_toml() {
        let toml = r#"
            log_level = "warn"
            print_stats = false
            output_extension = "adif"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.log_level, "warn");
        assert!(!config.print_stats);
        assert_eq!(config.output_extension, "adif");
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(toml::from_str::<Config>("print_stats = \"maybe\"").is_err());
    }
}
