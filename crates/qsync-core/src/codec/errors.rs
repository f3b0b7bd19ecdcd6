use crate::errors::QsyncError;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("'{raw}' is not a valid {expected}")]
    InvalidNumber { raw: String, expected: &'static str },

    #[error("'{value}' is not a valid member of '{enum_name}'")]
    UnknownEnumMember { value: String, enum_name: String },

    #[error("Custom codec '{codec}' rejected '{raw}': {message}")]
    Custom {
        codec: String,
        raw: String,
        message: String,
    },
}

impl QsyncError for CodecError {
    fn error_code(&self) -> &'static str {
        match self {
            CodecError::InvalidNumber { .. } => "CODEC_INVALID_NUMBER",
            CodecError::UnknownEnumMember { .. } => "CODEC_UNKNOWN_ENUM_MEMBER",
            CodecError::Custom { .. } => "CODEC_CUSTOM_FAILED",
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
    fn test_codec_error_display() {
        let error = CodecError::UnknownEnumMember {
            value: "invalid".to_string(),
            enum_name: "AnEnum".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "'invalid' is not a valid member of 'AnEnum'"
        );
        assert_eq!(error.error_code(), "CODEC_UNKNOWN_ENUM_MEMBER");
    }
}
