//! Unified path management for finboard files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/finboard/          # Config directory
//! └── config.toml              # Client configuration
//!
//! ~/.local/share/finboard/     # Data directory
//! └── store/                   # Key/value store (token, financialData)
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "finboard";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Platform-specific locations for finboard.
pub struct FinboardPaths;

impl FinboardPaths {
    /// Returns the configuration directory (e.g., `~/.config/finboard/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the data directory (e.g., `~/.local/share/finboard/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Default directory of the file-backed key/value store.
    pub fn store_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("store"))
    }
}
