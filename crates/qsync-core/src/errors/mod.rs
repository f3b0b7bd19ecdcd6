use std::error::Error;

use crate::codec::errors::CodecError;
use crate::keys::errors::KeyFilterError;
use crate::query::errors::QueryError;
use crate::widgets::errors::WidgetError;

/// Base trait for all qsync errors
pub trait QsyncError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error was caused by caller input rather than a host failure
    fn is_user_error(&self) -> bool {
        false
    }
}

/// Crate-wide error returned by widget bootstrap and query-string callbacks.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    KeyFilter(#[from] KeyFilterError),
    #[error(transparent)]
    Widget(#[from] WidgetError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl QsyncError for SyncError {
    fn error_code(&self) -> &'static str {
        match self {
            SyncError::Codec(e) => e.error_code(),
            SyncError::Query(e) => e.error_code(),
            SyncError::KeyFilter(e) => e.error_code(),
            SyncError::Widget(e) => e.error_code(),
            SyncError::Config(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            SyncError::Codec(e) => e.is_user_error(),
            SyncError::Query(e) => e.is_user_error(),
            SyncError::KeyFilter(e) => e.is_user_error(),
            SyncError::Widget(e) => e.is_user_error(),
            SyncError::Config(e) => e.is_user_error(),
        }
    }
}

/// Common result type for the library
pub type SyncResult<T> = Result<T, SyncError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found at '{path}'")]
    ConfigNotFound { path: String },

    #[error("Failed to parse config file: {message}")]
    ConfigParseError { message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("IO error reading config: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl QsyncError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ConfigNotFound { .. } => "CONFIG_NOT_FOUND",
            ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ConfigError::ConfigParseError { .. } | ConfigError::InvalidConfiguration { .. }
        )
    }
}
