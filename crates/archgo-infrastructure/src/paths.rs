//! Unified path management for Architect-Go files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/archgo/            # Config directory
//! ├── config.toml              # Application configuration
//! └── secret.json              # API keys
//!
//! ~/.local/share/archgo/       # Data directory
//! ├── vault.json               # Saved analysis results
//! └── logs/                    # Application logs
//!     └── archgo.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "archgo";

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

impl From<PathError> for archgo_core::ArchGoError {
    fn from(err: PathError) -> Self {
        archgo_core::ArchGoError::config(err.to_string())
    }
}

/// Platform path resolution for Architect-Go.
pub struct ArchGoPaths;

impl ArchGoPaths {
    /// Returns the configuration directory (e.g., `~/.config/archgo/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the data directory (e.g., `~/.local/share/archgo/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Keep this file at 600 permissions.
    pub fn secret_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }

    pub fn vault_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("vault.json"))
    }

    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("logs"))
    }
}
