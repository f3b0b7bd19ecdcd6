use crate::value::Value;
use crate::widgets::errors::WidgetError;
use crate::widgets::types::{WidgetArgs, WidgetKind};

/// The widget key, which every bootstrap routine requires.
pub fn require_key(kind: WidgetKind, args: &WidgetArgs) -> Result<String, WidgetError> {
    match args.key.as_deref() {
        Some(key) if !key.is_empty() => Ok(key.to_string()),
        _ => Err(WidgetError::MissingKey {
            widget: kind.api_name(),
        }),
    }
}

/// Reject option sets containing `None`, which cannot be told apart from
/// "not in the URL" once written.
pub fn ensure_no_none_options(kind: WidgetKind, options: &[Value]) -> Result<(), WidgetError> {
    if options.iter().any(Value::is_none) {
        return Err(WidgetError::NoneOption {
            widget: kind.api_name(),
            options: options.iter().map(ToString::to_string).collect(),
        });
    }
    Ok(())
}
