//! Configuration loading.
//!
//! Reads `config.toml` (default: `~/.config/finboard/config.toml`), falls back
//! to defaults when the file is missing, then applies `FINBOARD_*`
//! environment overrides.

use crate::paths::FinboardPaths;
use finboard_core::config::ClientConfig;
use finboard_core::{FinboardError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub struct ConfigService;

impl ConfigService {
    /// Loads the configuration from `path`, or from the default location.
    pub fn load(path: Option<&Path>) -> Result<ClientConfig> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };
        let mut config = Self::load_file(&path)?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parses a config file without environment overrides.
    ///
    /// A missing or blank file yields the defaults.
    pub fn load_file(path: &Path) -> Result<ClientConfig> {
        if !path.exists() {
            tracing::debug!("[ConfigService] No config at {:?}, using defaults", path);
            return Ok(ClientConfig::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(ClientConfig::default());
        }

        let config: ClientConfig = toml::from_str(&content).map_err(|e| {
            FinboardError::config(format!("Invalid config file {}: {}", path.display(), e))
        })?;
        config.validate()?;
        tracing::debug!("[ConfigService] Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn default_path() -> Result<PathBuf> {
        FinboardPaths::config_file().map_err(|e| FinboardError::config(e.to_string()))
    }
}
