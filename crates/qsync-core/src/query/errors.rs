use crate::codec::errors::CodecError;
use crate::errors::QsyncError;

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Got multiple values for query string key '{key}': {values:?}")]
    MultipleValues { key: String, values: Vec<String> },

    #[error("Failed to decode query string key '{key}': {source}")]
    Decode {
        key: String,
        #[source]
        source: CodecError,
    },
}

impl QsyncError for QueryError {
    fn error_code(&self) -> &'static str {
        match self {
            QueryError::MultipleValues { .. } => "QUERY_MULTIPLE_VALUES",
            QueryError::Decode { .. } => "QUERY_DECODE_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_values_display() {
        let error = QueryError::MultipleValues {
            key: "c".to_string(),
            values: vec!["3".to_string(), "4".to_string()],
        };
        assert_eq!(
            error.to_string(),
            r#"Got multiple values for query string key 'c': ["3", "4"]"#
        );
    }

    #[test]
    fn test_decode_error_keeps_source() {
        let error = QueryError::Decode {
            key: "n".to_string(),
            source: CodecError::InvalidNumber {
                raw: "x".to_string(),
                expected: "int",
            },
        };
        assert_eq!(error.error_code(), "QUERY_DECODE_FAILED");
        assert!(std::error::Error::source(&error).is_some());
    }
}
