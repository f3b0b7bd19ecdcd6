//! # Configuration System
//!
//! Hierarchical TOML configuration for qsync.
//!
//! ## Configuration Hierarchy
//!
//! 1. **Hardcoded defaults**
//! 2. **User config** - `~/.qsync/config.toml`
//! 3. **Project config** - `./.qsync/config.toml`
//!
//! ## Usage Example
//!
//! ```toml
//! # ./.qsync/config.toml
//! [warnings]
//! enabled = true
//!
//! [export]
//! blacklist = ["session_token"]
//! ```
//!
//! ```rust,no_run
//! use qsync_core::config::QsyncConfig;
//!
//! fn example() -> Result<(), qsync_core::errors::ConfigError> {
//!     let config = QsyncConfig::load_hierarchy()?;
//!     let _blacklist = config.blacklist();
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use loading::{load_config_file, merge_configs};
pub use types::{ExportConfig, QsyncConfig, WarningsConfig};
pub use validation::validate_config;

use crate::errors::ConfigError;
use crate::keys::{Blacklist, ExportPolicy};

impl QsyncConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_config(self)
    }

    /// The configured blacklist as a ready-to-use set.
    pub fn blacklist(&self) -> Blacklist {
        self.export.blacklist.iter().cloned().collect()
    }

    /// Export policy for "set"/"add" style exports.
    pub fn export_policy(&self) -> ExportPolicy {
        ExportPolicy {
            keep_none: false,
            drop_empty: self.export.drop_empty_values(),
        }
    }
}
