//! Configuration type definitions for qsync.
//!
//! These types are deserialized from TOML config files.
//!
//! # Example Configuration
//!
//! ```toml
//! [warnings]
//! enabled = false
//!
//! [export]
//! blacklist = ["page", "auth_token"]
//! drop_empty_values = true
//! ```

use serde::{Deserialize, Serialize};

/// Main configuration loaded from TOML config files.
///
/// Loaded from:
/// 1. User config: `~/.qsync/config.toml`
/// 2. Project config: `./.qsync/config.toml`
///
/// Project config values override user config values.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct QsyncConfig {
    /// Configuration warnings surfaced while building widgets
    #[serde(default)]
    pub warnings: WarningsConfig,

    /// Query-string export settings
    #[serde(default)]
    pub export: ExportConfig,
}

/// Warning configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct WarningsConfig {
    /// Whether to emit warnings for option sets whose values cannot be read
    /// back from the URL. Default: true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Export configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ExportConfig {
    /// Keys that are never written to the query string.
    #[serde(default)]
    pub blacklist: Vec<String>,

    /// Also drop keys whose value is the empty string. Default: false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop_empty_values: Option<bool>,
}
