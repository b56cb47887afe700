//! Configuration management.
//!
//! Credentials are deliberately not part of the configuration; callers
//! supply them per request.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::cache::CacheStore;
use crate::error::StoreError;
use crate::persistence::{default_cache_root, default_config_path, write_atomic};

/// Default API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.eveonline.com";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL that document paths are appended to.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Directory holding the `sheets` cache. Defaults to the config dir.
    #[serde(default)]
    pub cache_root: Option<PathBuf>,
    /// Request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Polling interval in seconds for watch mode.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
    /// Log level for `evemon` targets.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_refresh_interval() -> u64 {
    60
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            cache_root: None,
            request_timeout_secs: default_request_timeout(),
            refresh_interval_secs: default_refresh_interval(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        default_config_path()
    }

    /// Loads configuration from a specific path.
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Saves configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        write_atomic(path, content.as_bytes())?;

        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Checks values that serde cannot.
    pub fn validate(&self) -> Result<(), StoreError> {
        let url = Url::parse(&self.api_base_url)
            .map_err(|e| StoreError::Config(format!("api_base_url: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(StoreError::Config(format!(
                "api_base_url must be http(s), got {}",
                url.scheme()
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(StoreError::Config(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        if self.refresh_interval_secs == 0 {
            return Err(StoreError::Config(
                "refresh_interval_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the configured cache root, or the default one.
    pub fn cache_root(&self) -> PathBuf {
        self.cache_root.clone().unwrap_or_else(default_cache_root)
    }

    /// Returns a cache store at the configured root.
    pub fn cache_store(&self) -> CacheStore {
        CacheStore::new(self.cache_root())
    }

    /// Returns the request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Returns the polling interval.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}
