//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.qsync/config.toml`
//! 3. **Project config** - `./.qsync/config.toml`
//! 4. **CLI arguments** - Command-line flags (highest priority)

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::types::{ExportConfig, QsyncConfig, WarningsConfig};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

/// Load configuration from the hierarchy of config files.
///
/// Missing config files are not errors. Unreadable or malformed files are.
pub fn load_hierarchy() -> Result<QsyncConfig, ConfigError> {
    let mut config = QsyncConfig::default();

    if let Some(path) = user_config_path() {
        config = merge_optional(config, &path)?;
    }

    let project_path = std::env::current_dir()?.join(".qsync").join("config.toml");
    config = merge_optional(config, &project_path)?;

    validate_config(&config)?;
    Ok(config)
}

fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".qsync").join("config.toml"))
}

fn merge_optional(base: QsyncConfig, path: &Path) -> Result<QsyncConfig, ConfigError> {
    match load_config_file(path) {
        Ok(loaded) => {
            debug!(event = "core.config.file_loaded", path = %path.display());
            Ok(merge_configs(base, loaded))
        }
        Err(ConfigError::ConfigNotFound { .. }) => Ok(base),
        Err(e) => Err(e),
    }
}

/// Load a single configuration file.
pub fn load_config_file(path: &Path) -> Result<QsyncConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    };
    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        message: format!("'{}': {}", path.display(), e),
    })
}

/// Merge two configurations, with `override_config` taking precedence.
///
/// Optional fields are replaced only when the override sets them. Blacklists
/// are unioned so a project can add keys but never un-blacklist a user key.
pub fn merge_configs(base: QsyncConfig, override_config: QsyncConfig) -> QsyncConfig {
    let mut blacklist = base.export.blacklist;
    for key in override_config.export.blacklist {
        if !blacklist.contains(&key) {
            blacklist.push(key);
        }
    }

    QsyncConfig {
        warnings: WarningsConfig {
            enabled: override_config.warnings.enabled.or(base.warnings.enabled),
        },
        export: ExportConfig {
            blacklist,
            drop_empty_values: override_config
                .export
                .drop_empty_values
                .or(base.export.drop_empty_values),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_override_wins_when_set() {
        let base = QsyncConfig {
            warnings: WarningsConfig {
                enabled: Some(false),
            },
            export: ExportConfig {
                blacklist: vec!["page".to_string()],
                drop_empty_values: Some(true),
            },
        };
        let override_config = QsyncConfig {
            warnings: WarningsConfig { enabled: None },
            export: ExportConfig {
                blacklist: vec!["token".to_string(), "page".to_string()],
                drop_empty_values: Some(false),
            },
        };

        let merged = merge_configs(base, override_config);
        assert!(!merged.warnings.enabled());
        assert!(!merged.export.drop_empty_values());
        assert_eq!(merged.export.blacklist, vec!["page", "token"]);
    }

    #[test]
    fn test_load_config_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config_file(&dir.path().join("config.toml"));
        assert!(matches!(result, Err(ConfigError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_load_config_file_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[export\nblacklist = 3").unwrap();
        let err = load_config_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_load_config_file_reads_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[warnings]\nenabled = false\n\n[export]\nblacklist = [\"secret\"]\n",
        )
        .unwrap();
        let config = load_config_file(&path).unwrap();
        assert!(!config.warnings.enabled());
        assert_eq!(config.export.blacklist, vec!["secret"]);
        assert!(!config.export.drop_empty_values());
    }

    #[test]
    fn test_merge_optional_skips_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let base = QsyncConfig::default();
        let merged = merge_optional(base.clone(), &dir.path().join("absent.toml")).unwrap();
        assert_eq!(merged, base);
    }
}
