use tracing::warn;

use qsync_core::config::QsyncConfig;
use qsync_core::{Codec, EnumType, NumericType, Value};

/// Load configuration with warning on errors.
///
/// Falls back to defaults if config loading fails, but notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
pub fn load_config_with_warning() -> QsyncConfig {
    match QsyncConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.qsync/config.toml and ./.qsync/config.toml for syntax errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            QsyncConfig::default()
        }
    }
}

/// Parse a command-line value as JSON, treating anything that is not valid
/// JSON as a plain string.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::from(raw))
}

/// Codec named on the command line or in a manifest.
pub fn codec_from_name(
    name: &str,
    bool_fallback: bool,
    enum_type: Option<&EnumType>,
) -> Result<Codec, String> {
    match name {
        "str" => Ok(Codec::Passthrough),
        "int" => Ok(Codec::Numeric(NumericType::Int)),
        "float" => Ok(Codec::Numeric(NumericType::Float)),
        "bool" => Ok(Codec::Bool {
            fallback: bool_fallback,
        }),
        "bytes" => Ok(Codec::Bytes),
        "enum" => enum_type
            .cloned()
            .map(Codec::Enum)
            .ok_or_else(|| "codec 'enum' needs an [widget.enum] table".to_string()),
        other => Err(format!("Unknown codec '{}'", other)),
    }
}

/// Split `key=<json>` into its parts.
pub fn parse_assignment(raw: &str) -> Result<(String, Value), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), parse_value(value))),
        _ => Err(format!("Expected key=<value>, got '{}'", raw)),
    }
}
