use std::fmt;
use std::rc::Rc;

use crate::codec::errors::CodecError;
use crate::value::{EnumType, OptionKind, Value};

/// Signature of a caller-supplied decode function.
pub type DecodeFn = dyn Fn(&str) -> Result<Value, CodecError>;

/// A named, caller-supplied decode function.
#[derive(Clone)]
pub struct CustomCodec {
    name: String,
    func: Rc<DecodeFn>,
}

impl CustomCodec {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, raw: &str) -> Result<Value, CodecError> {
        (self.func)(raw)
    }
}

impl fmt::Debug for CustomCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomCodec")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Numeric flavour expected by a number widget or inferred from options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericType {
    Int,
    Float,
}

impl NumericType {
    /// Numeric type of a value tag, if it has one.
    pub fn from_kind(kind: &OptionKind) -> Option<Self> {
        match kind {
            OptionKind::Int => Some(NumericType::Int),
            OptionKind::Float => Some(NumericType::Float),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NumericType::Int => "int",
            NumericType::Float => "float",
        }
    }
}

/// How raw query-string values are turned into typed values.
///
/// Resolved once when a widget is constructed; reads never re-infer.
#[derive(Debug, Clone, Default)]
pub enum Codec {
    /// Identity: raw strings come back as `Value::Str`.
    #[default]
    Passthrough,
    Custom(CustomCodec),
    Numeric(NumericType),
    Bytes,
    /// Lenient boolean; unrecognised input yields `fallback`.
    Bool { fallback: bool },
    Enum(EnumType),
}

impl Codec {
    pub fn custom<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&str) -> Result<Value, CodecError> + 'static,
    {
        Codec::Custom(CustomCodec {
            name: name.into(),
            func: Rc::new(func),
        })
    }

    pub fn is_passthrough(&self) -> bool {
        matches!(self, Codec::Passthrough)
    }

    /// Short name used in logs.
    pub fn name(&self) -> &str {
        match self {
            Codec::Passthrough => "str",
            Codec::Custom(custom) => custom.name(),
            Codec::Numeric(numeric) => numeric.as_str(),
            Codec::Bytes => "bytes",
            Codec::Bool { .. } => "bool",
            Codec::Enum(enum_type) => enum_type.name(),
        }
    }
}

/// Non-fatal configuration problem detected while setting up a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: Option<String>,
    pub detected_kinds: Vec<OptionKind>,
    pub message: String,
}
