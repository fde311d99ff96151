//! Path management for userlist configuration files.
//!
//! ```text
//! ~/.config/userlist/          # Config directory
//! └── config.toml              # Backend connection settings
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

const APP_DIR: &str = "userlist";

pub struct UserListPaths;

impl UserListPaths {
    /// Returns the userlist configuration directory (e.g. `~/.config/userlist/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_lives_in_app_dir() {
        // Not every CI sandbox has a config dir; only check shape when it does.
        if let Ok(path) = UserListPaths::config_file() {
            assert!(path.ends_with("userlist/config.toml"));
        }
    }
}
