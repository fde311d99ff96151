//! On-disk configuration DTOs.
//!
//! Every field is optional here; missing values are filled from the
//! environment by `ConfigService` before `BackendConfig` is validated.

use serde::{Deserialize, Serialize};

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub backend: Option<BackendSection>,
}

/// `[backend]` table of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendSection {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub anon_key: Option<String>,
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}
