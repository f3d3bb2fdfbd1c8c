//! Configuration management for the CLI.

use std::fs;
use std::path::PathBuf;

use caltrack_domain::ActivitySign;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Journal file location
    #[serde(default = "default_journal_path")]
    pub journal_path: PathBuf,

    /// Stored sign convention for activity calories
    #[serde(default)]
    pub activity_sign: ActivitySign,

    /// Output settings
    #[serde(default)]
    pub settings: Settings,
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (id-only) format
    Quiet,
}

impl Config {
    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".caltrack").join("config.toml"))
    }

    /// Load configuration from file or create default.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            journal_path: default_journal_path(),
            activity_sign: ActivitySign::default(),
            settings: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_journal_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".caltrack")
        .join("entries.ndjson")
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert!(matches!(config.settings.format, OutputFormat::Table));
        assert!(matches!(config.activity_sign, ActivitySign::Positive));
        assert!(config.journal_path.ends_with(".caltrack/entries.ndjson"));
    }

    #[test]
    fn test_config_toml_round_trip() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(back.settings.color, config.settings.color);
        assert_eq!(back.journal_path, config.journal_path);
    }

    #[test]
    fn test_partial_toml_applies_defaults() {
        let config: Config = toml::from_str("journal_path = \"/tmp/j.ndjson\"").unwrap();
        assert_eq!(config.journal_path, PathBuf::from("/tmp/j.ndjson"));
        assert!(config.settings.color);
        assert!(matches!(config.activity_sign, ActivitySign::Positive));
    }
}
