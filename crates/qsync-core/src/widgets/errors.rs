use crate::errors::QsyncError;
use crate::value::OptionKind;

#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("{widget} requires a non-empty 'key' argument")]
    MissingKey { widget: &'static str },

    #[error(
        "None may not be passed as an option to {widget}; it cannot be written to the URL query string. \
         Pass None as the default instead. Got options: [{}]",
        .options.join(", ")
    )]
    NoneOption {
        widget: &'static str,
        options: Vec<String>,
    },

    #[error("Expected an int or float type for number input, got {found} from '{argument}'")]
    NonNumericType {
        found: OptionKind,
        argument: &'static str,
    },

    #[error(
        "Some query string options were not contained in the available options for multiselect key '{key}'. Missing values: [{}]",
        .missing.join(", ")
    )]
    MissingOptions { key: String, missing: Vec<String> },

    #[error("Widget '{key}' rejected its arguments: {message}")]
    Render { key: String, message: String },
}

impl QsyncError for WidgetError {
    fn error_code(&self) -> &'static str {
        match self {
            WidgetError::MissingKey { .. } => "WIDGET_MISSING_KEY",
            WidgetError::NoneOption { .. } => "WIDGET_NONE_OPTION",
            WidgetError::NonNumericType { .. } => "WIDGET_NON_NUMERIC_TYPE",
            WidgetError::MissingOptions { .. } => "WIDGET_MISSING_OPTIONS",
            WidgetError::Render { .. } => "WIDGET_RENDER_FAILED",
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
    fn test_missing_options_display() {
        let error = WidgetError::MissingOptions {
            key: "multi".to_string(),
            missing: vec!["7".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Some query string options were not contained in the available options for multiselect key 'multi'. Missing values: [7]"
        );
        assert_eq!(error.error_code(), "WIDGET_MISSING_OPTIONS");
    }

    #[test]
    fn test_non_numeric_type_display() {
        let error = WidgetError::NonNumericType {
            found: OptionKind::Str,
            argument: "min_value",
        };
        assert!(error.to_string().contains("got str from 'min_value'"));
    }
}
