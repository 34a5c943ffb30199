//! Client configuration model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{FinboardError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:1337";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const ENV_API_URL: &str = "FINBOARD_API_URL";
pub const ENV_STORAGE_DIR: &str = "FINBOARD_STORAGE_DIR";
pub const ENV_LOG_LEVEL: &str = "FINBOARD_LOG_LEVEL";

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the backend, without trailing slash
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub search_debounce_ms: u64,
    /// Where the key/value store lives. Defaults to the platform data dir.
    pub storage_dir: Option<PathBuf>,
    /// Default tracing filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// When set, logs also go to a daily rolling file here
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            storage_dir: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_dir: None,
        }
    }
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Rejects settings that would make every request fail.
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(FinboardError::config(
                "request_timeout_secs must be at least 1",
            ));
        }
        Ok(())
    }

    /// Applies `FINBOARD_*` overrides read through `lookup`.
    ///
    /// Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = read(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(dir) = read(ENV_STORAGE_DIR) {
            self.storage_dir = Some(PathBuf::from(dir));
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        self.api_url = self.api_url.trim_end_matches('/').to_string();
    }
}
