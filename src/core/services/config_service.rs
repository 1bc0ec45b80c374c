//! Configuration service for the `config` commands

use crate::AppError;
use crate::error::ConfigError;
use crate::storage::config::Config;
use std::path::PathBuf;

pub struct ConfigService {
    config: Config,
    path: Option<PathBuf>,
}

impl ConfigService {
    /// `path` overrides the default config file location
    pub fn new(config: Config, path: Option<PathBuf>) -> Self {
        Self { config, path }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn set_url(&mut self, url: String) -> Result<(), AppError> {
        crate::utils::validation::validate_url(&url)?;
        self.config.set_url(url);
        Ok(())
    }

    pub fn set_timeout(&mut self, secs: u64) -> Result<(), AppError> {
        if secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs".to_string(),
                value: secs.to_string(),
                reason: "timeout must be at least one second".to_string(),
            }
            .into());
        }
        self.config.timeout_secs = Some(secs);
        Ok(())
    }

    pub fn save(&self) -> Result<(), AppError> {
        self.config.save(self.path.clone()).map_err(|e| e.into())
    }

    /// Where the configuration is read from and written to
    pub fn location(&self) -> Result<PathBuf, AppError> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::config_file_path()?),
        }
    }
}
