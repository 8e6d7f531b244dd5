//! TOML-based CLI configuration.
//!
//! Stored at `~/.config/glance/config.toml`. Everything is optional and
//! defaults apply, so a missing file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

fn default_true() -> bool {
    true
}

/// Store-related settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Override for the goal store directory. Defaults to the platform
    /// data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Output-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print emitted JSON.
    #[serde(default = "default_true")]
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty_json: true }
    }
}

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Default configuration file path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("glance").join("config.toml"))
    }

    /// Load from the default path; a missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let Some(path) = Self::default_path() else {
            return Ok(Self::default());
        };
        Self::load_from(&path)
    }

    /// Load from an explicit path; a missing file yields defaults.
    pub fn load_from(path: &PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })
    }

    /// Save to the default path, creating parent directories.
    pub fn save(&self) -> Result<(), ConfigError> {
        let Some(path) = Self::default_path() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::SaveFailed {
                path: path.clone(),
                message: e.to_string(),
            })?;
        }
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, raw).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Apply a `key = value` update for the supported dotted keys.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "store.data_dir" => {
                self.store.data_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
                Ok(())
            }
            "output.pretty_json" => {
                self.output.pretty_json =
                    value.parse().map_err(|_| ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: format!("expected true or false, got '{value}'"),
                    })?;
                Ok(())
            }
            _ => Err(ConfigError::UnknownKey(key.to_string())),
        }
    }
}
