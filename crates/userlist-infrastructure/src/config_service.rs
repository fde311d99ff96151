//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the backend configuration
//! from the configuration file (~/.config/userlist/config.toml), falling back
//! to environment variables for every field the file leaves out.
//!
//! Priority per field: config.toml > environment variable > built-in default.

use crate::dto::{BackendSection, ConfigFile};
use crate::paths::UserListPaths;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use userlist_core::config::{BackendConfig, DEFAULT_TABLE, DEFAULT_TIMEOUT_SECS};
use userlist_core::error::{Result, UserListError};

pub const ENV_URL: &str = "USERLIST_SUPABASE_URL";
pub const ENV_ANON_KEY: &str = "USERLIST_SUPABASE_ANON_KEY";
pub const ENV_TABLE: &str = "USERLIST_TABLE";
pub const ENV_TIMEOUT_SECS: &str = "USERLIST_TIMEOUT_SECS";

/// Configuration service that loads and caches the backend configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Explicit config file; `None` means the default location.
    path: Option<PathBuf>,
    /// Cached configuration loaded from file and environment.
    config: Arc<RwLock<Option<BackendConfig>>>,
}

impl ConfigService {
    /// Creates a ConfigService reading the default config file location.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a ConfigService reading an explicit config file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the backend configuration, loading it if not cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or if the
    /// merged configuration is incomplete or invalid.
    pub fn get_config(&self) -> Result<BackendConfig> {
        {
            let read_lock = self
                .config
                .read()
                .map_err(|_| UserListError::internal("config cache lock poisoned"))?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load_config()?;

        {
            let mut write_lock = self
                .config
                .write()
                .map_err(|_| UserListError::internal("config cache lock poisoned"))?;
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    fn load_config(&self) -> Result<BackendConfig> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => UserListPaths::config_file().map_err(|e| UserListError::config(e.to_string()))?,
        };

        let file = read_config_file(&path)?;
        let config = resolve(file.backend, |key| std::env::var(key).ok())?;

        tracing::info!(
            "[ConfigService] Loaded backend config: url={}, table={}, timeout={}s",
            config.url,
            config.table,
            config.timeout_secs
        );

        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads `config.toml`. A missing file is not an error: it yields an empty
/// configuration so that the environment alone can drive the client.
pub fn read_config_file(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!(
            "[ConfigService] No config file at {}, using environment only",
            path.display()
        );
        return Ok(ConfigFile::default());
    }

    let content = std::fs::read_to_string(path)?;
    let file: ConfigFile = toml::from_str(&content)?;
    Ok(file)
}

/// Merges the file section with environment lookups and validates the result.
///
/// `env` is the variable lookup, `std::env::var` in production.
pub fn resolve<F>(section: Option<BackendSection>, env: F) -> Result<BackendConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let section = section.unwrap_or_default();

    let url = section
        .url
        .or_else(|| env(ENV_URL))
        .ok_or_else(|| {
            UserListError::config(format!(
                "backend url not found in config.toml or {}",
                ENV_URL
            ))
        })?;

    let anon_key = section
        .anon_key
        .or_else(|| env(ENV_ANON_KEY))
        .ok_or_else(|| {
            UserListError::config(format!(
                "backend anon_key not found in config.toml or {}",
                ENV_ANON_KEY
            ))
        })?;

    let table = section
        .table
        .or_else(|| env(ENV_TABLE))
        .unwrap_or_else(|| DEFAULT_TABLE.to_string());

    let timeout_secs = match section.timeout_secs {
        Some(secs) => secs,
        None => match env(ENV_TIMEOUT_SECS) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                UserListError::config(format!("{} is not a number: '{}'", ENV_TIMEOUT_SECS, raw))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        },
    };

    BackendConfig::new(url, anon_key)
        .with_table(table)
        .with_timeout_secs(timeout_secs)
        .validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_resolve_from_environment_only() {
        let config = resolve(
            None,
            env_of(&[(ENV_URL, "https://proj.supabase.co/"), (ENV_ANON_KEY, "anon")]),
        )
        .unwrap();

        assert_eq!(config.url, "https://proj.supabase.co");
        assert_eq!(config.anon_key, "anon");
        assert_eq!(config.table, "curd");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_file_values_win_over_environment() {
        let section = BackendSection {
            url: Some("https://file.supabase.co".to_string()),
            anon_key: None,
            table: Some("people".to_string()),
            timeout_secs: Some(5),
        };
        let config = resolve(
            Some(section),
            env_of(&[
                (ENV_URL, "https://env.supabase.co"),
                (ENV_ANON_KEY, "env-key"),
                (ENV_TABLE, "ignored"),
                (ENV_TIMEOUT_SECS, "99"),
            ]),
        )
        .unwrap();

        assert_eq!(config.url, "https://file.supabase.co");
        assert_eq!(config.anon_key, "env-key");
        assert_eq!(config.table, "people");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let err = resolve(None, env_of(&[(ENV_URL, "https://proj.supabase.co")])).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains(ENV_ANON_KEY));
    }

    #[test]
    fn test_bad_timeout_in_environment() {
        let err = resolve(
            None,
            env_of(&[
                (ENV_URL, "https://proj.supabase.co"),
                (ENV_ANON_KEY, "anon"),
                (ENV_TIMEOUT_SECS, "soon"),
            ]),
        )
        .unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_read_missing_file_is_empty() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let file = read_config_file(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(file, ConfigFile::default());
    }

    #[test]
    fn test_read_invalid_file_is_serialization_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[backend\nurl = ").unwrap();

        match read_config_file(&path).unwrap_err() {
            UserListError::Serialization { format, .. } => assert_eq!(format, "TOML"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
