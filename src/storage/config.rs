//! Configuration management
//!
//! Priority for the server URL: CLI argument > config.toml > REDASH_URL
//! environment variable > built-in default.

use super::Result;
use crate::api::client::DEFAULT_HOST;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Redash server URL
    pub url: Option<String>,
    /// Per-request timeout; unset means no timeout
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from file, falling back to defaults when it does not exist
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
            message: format!("Failed to parse config file: {}", e),
        })
    }

    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|e| StorageError::ConfigParseError {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(&config_path, toml_content).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().ok_or(StorageError::ConfigDirNotFound)?;
        Ok(home_dir
            .join(".config")
            .join("redash-admin")
            .join("config.toml"))
    }

    /// Get URL with fallback to environment variable
    pub fn get_url(&self) -> Option<String> {
        self.url
            .clone()
            .or_else(|| std::env::var("REDASH_URL").ok().filter(|s| !s.is_empty()))
    }

    /// URL to connect to, defaulting to a local server
    pub fn effective_url(&self) -> String {
        self.get_url().unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    pub fn set_url(&mut self, url: String) {
        self.url = Some(url);
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
