use std::collections::BTreeMap;
use std::fmt;

use crate::codec::Codec;
use crate::value::Value;
use crate::writer::{Callback, CallbackChain};

/// Widget kinds wrapped by the bootstrap routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WidgetKind {
    TextInput,
    TextArea,
    Selectbox,
    Radio,
    Multiselect,
    Checkbox,
    Toggle,
    NumberInput,
}

impl WidgetKind {
    /// Name of the bootstrap routine, as used in error messages.
    pub fn api_name(&self) -> &'static str {
        match self {
            WidgetKind::TextInput => "text_input_qs",
            WidgetKind::TextArea => "text_area_qs",
            WidgetKind::Selectbox => "selectbox_qs",
            WidgetKind::Radio => "radio_qs",
            WidgetKind::Multiselect => "multiselect_qs",
            WidgetKind::Checkbox => "checkbox_qs",
            WidgetKind::Toggle => "toggle_qs",
            WidgetKind::NumberInput => "number_input_qs",
        }
    }

    pub fn takes_options(&self) -> bool {
        matches!(
            self,
            WidgetKind::Selectbox | WidgetKind::Radio | WidgetKind::Multiselect
        )
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WidgetKind::TextInput => "text_input",
            WidgetKind::TextArea => "text_area",
            WidgetKind::Selectbox => "selectbox",
            WidgetKind::Radio => "radio",
            WidgetKind::Multiselect => "multiselect",
            WidgetKind::Checkbox => "checkbox",
            WidgetKind::Toggle => "toggle",
            WidgetKind::NumberInput => "number_input",
        };
        write!(f, "{}", name)
    }
}

/// Arguments shared by every bootstrap routine.
///
/// `key` is optional here only so that its absence can be reported; every
/// routine rejects a missing or empty key.
#[derive(Debug, Clone, Default)]
pub struct WidgetArgs {
    pub label: String,
    pub key: Option<String>,
    pub autoupdate: bool,
    pub codec: Codec,
    pub on_change: Option<Callback>,
    /// Forwarded verbatim to the renderer.
    pub passthrough: BTreeMap<String, Value>,
}

impl WidgetArgs {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn autoupdate(mut self, autoupdate: bool) -> Self {
        self.autoupdate = autoupdate;
        self
    }

    pub fn codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    pub fn on_change(mut self, callback: Callback) -> Self {
        self.on_change = Some(callback);
        self
    }

    pub fn arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.passthrough.insert(name.into(), value.into());
        self
    }
}

/// Initial value handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetDefault {
    Value(Value),
    /// Index into the options; `None` means no selection.
    Index(Option<usize>),
    /// Number input starting at its `min_value`.
    Min,
}

/// Default for [`number_input_qs`](crate::context::SyncContext::number_input_qs).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum NumberDefault {
    #[default]
    Min,
    Empty,
    Int(i64),
    Float(f64),
}

impl NumberDefault {
    pub fn is_empty(&self) -> bool {
        matches!(self, NumberDefault::Empty)
    }

    pub(crate) fn to_widget_default(self) -> WidgetDefault {
        match self {
            NumberDefault::Min => WidgetDefault::Min,
            NumberDefault::Empty => WidgetDefault::Value(Value::None),
            NumberDefault::Int(i) => WidgetDefault::Value(Value::Int(i)),
            NumberDefault::Float(x) => WidgetDefault::Value(Value::Float(x)),
        }
    }
}

/// Everything the renderer receives for one widget.
#[derive(Debug, Clone)]
pub struct WidgetRequest {
    pub kind: WidgetKind,
    pub label: String,
    pub key: String,
    pub options: Vec<Value>,
    pub default: WidgetDefault,
    pub on_change: Option<CallbackChain>,
    pub passthrough: BTreeMap<String, Value>,
}
