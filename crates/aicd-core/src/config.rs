//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use aicd_client::ClientConfig;

use crate::error::CoreError;
use crate::Result;

pub const ENV_API_URL: &str = "AICD_API_URL";
pub const ENV_API_KEY: &str = "AICD_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "AICD_TIMEOUT_SECS";
pub const ENV_DATA_DIR: &str = "AICD_DATA_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Settings database holding the persistent session token
    pub database_path: PathBuf,
    /// Detection service connection
    pub api: ClientConfig,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("aicd.db"),
            api: ClientConfig::default(),
        }
    }

    pub fn data_dir() -> PathBuf {
        if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
            return PathBuf::from(dir);
        }

        dirs::data_local_dir()
            .map(|d| d.join("AICD"))
            .unwrap_or_else(|| PathBuf::from(".aicd"))
    }

    /// Defaults overridden by `AICD_*` environment variables.
    ///
    /// Not validated yet: finish with [`Config::with_api_overrides`] so
    /// command-line values can replace a bad environment value first.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply explicit connection overrides, then validate the result
    pub fn with_api_overrides(
        mut self,
        base_url: Option<String>,
        api_key: Option<String>,
    ) -> Result<Self> {
        if let Some(url) = base_url {
            self.api.base_url = url;
        }
        if let Some(key) = api_key {
            self.api.api_key = key;
        }

        self.validate()?;
        Ok(self)
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api.base_url = url;
        }

        if let Some(key) = lookup(ENV_API_KEY) {
            self.api.api_key = key;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.api.timeout_secs = raw.trim().parse().map_err(|_| {
                CoreError::Config(format!(
                    "{} must be a whole number of seconds, got {:?}",
                    ENV_TIMEOUT_SECS, raw
                ))
            })?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.api
            .validate()
            .map_err(|e| CoreError::Config(e.to_string()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}
