use crate::config::types::QsyncConfig;
use crate::errors::ConfigError;

/// Validate a loaded configuration.
pub fn validate_config(config: &QsyncConfig) -> Result<(), ConfigError> {
    if let Some(position) = config
        .export
        .blacklist
        .iter()
        .position(|key| key.trim().is_empty())
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!("export.blacklist entry {} is empty", position),
        });
    }
    Ok(())
}
