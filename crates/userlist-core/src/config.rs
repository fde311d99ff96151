//! Backend configuration.
//!
//! Holds the connection settings for the remote table. Loading from disk and
//! environment lives in the infrastructure layer; this module only defines
//! the validated shape.

use crate::error::{Result, UserListError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Table mirrored when none is configured.
pub const DEFAULT_TABLE: &str = "curd";

/// Per-request timeout when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Connection settings for the backend-as-a-service project.
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Project base URL, e.g. `https://xyzcompany.supabase.co`
    pub url: String,
    /// Public (anon) API key
    pub anon_key: String,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            table: default_table(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Checks the settings and normalizes the URL (no trailing slash).
    ///
    /// # Errors
    ///
    /// Returns `UserListError::Config` if the URL is not http(s), or the key,
    /// table or timeout is empty/zero.
    pub fn validate(mut self) -> Result<Self> {
        let url = self.url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(UserListError::config(format!(
                "backend url must start with http:// or https:// (got '{}')",
                url
            )));
        }
        if self.anon_key.trim().is_empty() {
            return Err(UserListError::config("backend anon_key is empty"));
        }
        if self.table.trim().is_empty() {
            return Err(UserListError::config("table name is empty"));
        }
        if self.timeout_secs == 0 {
            return Err(UserListError::config("timeout_secs must be greater than 0"));
        }
        self.url = url;
        Ok(self)
    }

    /// REST endpoint of the configured table.
    pub fn table_endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.url, self.table)
    }
}

// anon_key stays out of logs
impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("anon_key", &"<redacted>")
            .field("table", &self.table)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BackendConfig::new("https://example.supabase.co", "key");
        assert_eq!(config.table, "curd");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_validate_trims_trailing_slash() {
        let config = BackendConfig::new("https://example.supabase.co/", "key")
            .validate()
            .unwrap();
        assert_eq!(config.url, "https://example.supabase.co");
        assert_eq!(
            config.table_endpoint(),
            "https://example.supabase.co/rest/v1/curd"
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(BackendConfig::new("example.supabase.co", "key").validate().unwrap_err().is_config());
        assert!(BackendConfig::new("https://x.co", " ").validate().unwrap_err().is_config());
        assert!(BackendConfig::new("https://x.co", "k").with_table("").validate().is_err());
        assert!(BackendConfig::new("https://x.co", "k").with_timeout_secs(0).validate().is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = BackendConfig::new("https://x.co", "super-secret");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let config: BackendConfig =
            toml::from_str("url = \"https://x.co\"\nanon_key = \"k\"\n").unwrap();
        assert_eq!(config.table, DEFAULT_TABLE);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
