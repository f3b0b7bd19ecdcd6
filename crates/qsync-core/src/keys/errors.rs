use crate::errors::QsyncError;

#[derive(Debug, thiserror::Error)]
pub enum KeyFilterError {
    #[error(
        "Arguments to query string functions must be non-str collections, e.g. a list of keys; got the bare string '{value}' as keys"
    )]
    BareStringKeys { value: String },

    #[error(
        "Arguments to query string functions must be non-str collections, e.g. a list of patterns; got the bare string '{value}' as patterns"
    )]
    BareStringPatterns { value: String },

    #[error("Invalid key pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl QsyncError for KeyFilterError {
    fn error_code(&self) -> &'static str {
        match self {
            KeyFilterError::BareStringKeys { .. } => "KEYS_BARE_STRING",
            KeyFilterError::BareStringPatterns { .. } => "PATTERNS_BARE_STRING",
            KeyFilterError::InvalidPattern { .. } => "PATTERN_INVALID",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}
