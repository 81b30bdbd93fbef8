//! Path management for people-directory configuration files.
//!
//! ```text
//! ~/.config/people-directory/   # Config directory (platform dependent)
//! └── config.toml               # Client configuration
//! ```

use std::path::PathBuf;
use thiserror::Error;

const APP_DIR_NAME: &str = "people-directory";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Platform config directory could not be determined.
    #[error("Cannot find configuration directory")]
    ConfigDirNotFound,
}

/// Path resolution for people-directory.
pub struct PeoplePaths;

impl PeoplePaths {
    /// Returns the configuration directory (e.g., `~/.config/people-directory/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }
}
