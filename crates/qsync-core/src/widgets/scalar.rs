//! Bootstrap for text, boolean and number widgets.

use std::collections::BTreeMap;

use tracing::debug;

use crate::codec::{Codec, NumericType};
use crate::context::SyncContext;
use crate::errors::SyncResult;
use crate::query::{QueryError, QueryParams, read_scalar};
use crate::session::SessionState;
use crate::value::Value;
use crate::widgets::autoupdate::compose_on_change;
use crate::widgets::errors::WidgetError;
use crate::widgets::renderer::WidgetRenderer;
use crate::widgets::types::{NumberDefault, WidgetArgs, WidgetDefault, WidgetKind, WidgetRequest};
use crate::widgets::validation::require_key;

/// Number type a number widget works in.
///
/// Taken from the default if it is a number, else from the first of
/// `min_value`, `max_value` and `step` that is given, else float.
pub fn infer_numeric_type(
    default: NumberDefault,
    passthrough: &BTreeMap<String, Value>,
) -> Result<NumericType, WidgetError> {
    match default {
        NumberDefault::Int(_) => return Ok(NumericType::Int),
        NumberDefault::Float(_) => return Ok(NumericType::Float),
        NumberDefault::Min | NumberDefault::Empty => {}
    }
    for argument in ["min_value", "max_value", "step"] {
        if let Some(value) = passthrough.get(argument) {
            let found = value.kind();
            return NumericType::from_kind(&found)
                .ok_or(WidgetError::NonNumericType { found, argument });
        }
    }
    Ok(NumericType::Float)
}

impl<S, Q, R> SyncContext<S, Q, R>
where
    S: SessionState,
    Q: QueryParams,
    R: WidgetRenderer,
{
    /// Single-line text input. A `None` default means the widget starts empty
    /// and clearing it removes the key from the URL.
    pub fn text_input_qs(&mut self, args: WidgetArgs, default: impl Into<Value>) -> SyncResult<Value> {
        self.text_widget(WidgetKind::TextInput, args, default.into())
    }

    /// Multi-line text input.
    pub fn text_area_qs(&mut self, args: WidgetArgs, default: impl Into<Value>) -> SyncResult<Value> {
        self.text_widget(WidgetKind::TextArea, args, default.into())
    }

    /// Checkbox. `1`/`true` and `0`/`false` are understood in any case;
    /// anything else leaves `default`.
    pub fn checkbox_qs(&mut self, args: WidgetArgs, default: bool) -> SyncResult<Value> {
        self.bool_widget(WidgetKind::Checkbox, args, default)
    }

    /// Toggle switch, read like [`checkbox_qs`](Self::checkbox_qs).
    pub fn toggle_qs(&mut self, args: WidgetArgs, default: bool) -> SyncResult<Value> {
        self.bool_widget(WidgetKind::Toggle, args, default)
    }

    /// Number input.
    ///
    /// A URL value that does not parse as the widget's number type is
    /// ignored and the widget starts from `default`.
    pub fn number_input_qs(&mut self, args: WidgetArgs, default: NumberDefault) -> SyncResult<Value> {
        let kind = WidgetKind::NumberInput;
        let key = require_key(kind, &args)?;
        let numeric = infer_numeric_type(default, &args.passthrough)?;

        match read_scalar(&self.query, &key, Value::None, &Codec::Numeric(numeric)) {
            Ok(Value::None) => {}
            Ok(value) => self.seed(&key, value),
            Err(QueryError::Decode { source, .. }) => {
                debug!(
                    event = "core.widget.number_fallback",
                    key = %key,
                    expected = numeric.as_str(),
                    error = %source
                );
            }
            Err(e) => return Err(e.into()),
        }

        let on_change = compose_on_change(&key, args.autoupdate, default.is_empty(), args.on_change);
        self.render(WidgetRequest {
            kind,
            label: args.label,
            key,
            options: Vec::new(),
            default: default.to_widget_default(),
            on_change,
            passthrough: args.passthrough,
        })
    }

    fn text_widget(&mut self, kind: WidgetKind, args: WidgetArgs, default: Value) -> SyncResult<Value> {
        let key = require_key(kind, &args)?;
        let value = read_scalar(&self.query, &key, default.clone(), &args.codec)?;
        self.seed(&key, value);
        self.finish_scalar(kind, args, key, default)
    }

    fn bool_widget(&mut self, kind: WidgetKind, args: WidgetArgs, default: bool) -> SyncResult<Value> {
        let key = require_key(kind, &args)?;
        let codec = Codec::Bool { fallback: default };
        let value = read_scalar(&self.query, &key, Value::Bool(default), &codec)?;
        self.seed(&key, value);
        self.finish_scalar(kind, args, key, Value::Bool(default))
    }

    fn finish_scalar(
        &mut self,
        kind: WidgetKind,
        args: WidgetArgs,
        key: String,
        default: Value,
    ) -> SyncResult<Value> {
        let on_change = compose_on_change(&key, args.autoupdate, default.is_none(), args.on_change);
        self.render(WidgetRequest {
            kind,
            label: args.label,
            key,
            options: Vec::new(),
            default: WidgetDefault::Value(default),
            on_change,
            passthrough: args.passthrough,
        })
    }
}
