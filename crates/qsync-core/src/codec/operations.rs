//! Decoding raw query-string values and choosing a codec for an option set.

use std::collections::BTreeSet;

use crate::codec::errors::CodecError;
use crate::codec::types::{Codec, ConfigWarning, NumericType};
use crate::value::{EnumMember, EnumType, OptionKind, Value};

impl Codec {
    /// Decode one raw query-string value.
    pub fn decode(&self, raw: &str) -> Result<Value, CodecError> {
        match self {
            Codec::Passthrough => Ok(Value::Str(raw.to_string())),
            Codec::Custom(custom) => custom.call(raw),
            Codec::Numeric(numeric) => decode_number(raw, *numeric),
            Codec::Bytes => Ok(Value::Bytes(raw.as_bytes().to_vec())),
            Codec::Bool { fallback } => Ok(Value::Bool(convert_bool(raw, *fallback))),
            Codec::Enum(enum_type) => decode_enum_member(enum_type, raw).map(Value::Enum),
        }
    }
}

/// Parse a number of the requested type. Surrounding whitespace is ignored.
pub fn decode_number(raw: &str, numeric: NumericType) -> Result<Value, CodecError> {
    let trimmed = raw.trim();
    let invalid = || CodecError::InvalidNumber {
        raw: raw.to_string(),
        expected: numeric.as_str(),
    };
    match numeric {
        NumericType::Int => trimmed.parse::<i64>().map(Value::Int).map_err(|_| invalid()),
        NumericType::Float => trimmed
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| invalid()),
    }
}

/// Case-insensitive boolean: `1`/`true` and `0`/`false`, anything else is `fallback`.
pub fn convert_bool(raw: &str, fallback: bool) -> bool {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" => true,
        "0" | "false" => false,
        _ => fallback,
    }
}

/// Look up an enum member from `Member` or `<EnumName>.Member`.
pub fn decode_enum_member(enum_type: &EnumType, raw: &str) -> Result<EnumMember, CodecError> {
    let name = raw
        .strip_prefix(enum_type.name())
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(raw);
    enum_type
        .member(name)
        .ok_or_else(|| CodecError::UnknownEnumMember {
            value: name.to_string(),
            enum_name: enum_type.name().to_string(),
        })
}

/// Build a decode function that turns strings into members of `enum_type`.
pub fn make_enum_codec(enum_type: &EnumType) -> impl Fn(&str) -> Result<EnumMember, CodecError> {
    let enum_type = enum_type.clone();
    move |raw| decode_enum_member(&enum_type, raw)
}

/// Outcome of [`infer_codec`].
#[derive(Debug, Clone)]
pub struct Inference {
    pub codec: Codec,
    pub warning: Option<ConfigWarning>,
}

/// Pick the codec for a selection widget.
///
/// An explicit codec always wins. With the passthrough codec and a non-string
/// option set, a uniform int, float or bytes set gets the matching numeric or
/// bytes codec, and options from a single enum type get that enum's codec.
/// Anything else keeps passthrough and carries a warning, since the options
/// cannot be rebuilt from their query-string text.
pub fn infer_codec(options: &[Value], codec: Codec) -> Inference {
    if !codec.is_passthrough() || options.iter().all(|opt| opt.kind() == OptionKind::Str) {
        return Inference {
            codec,
            warning: None,
        };
    }

    let kinds: BTreeSet<OptionKind> = options.iter().map(Value::kind).collect();
    if kinds.len() == 1 {
        let inferred = match (kinds.iter().next(), options.first()) {
            (Some(OptionKind::Int), _) => Some(Codec::Numeric(NumericType::Int)),
            (Some(OptionKind::Float), _) => Some(Codec::Numeric(NumericType::Float)),
            (Some(OptionKind::Bytes), _) => Some(Codec::Bytes),
            (Some(OptionKind::Enum(_)), Some(Value::Enum(member))) => {
                Some(Codec::Enum(member.enum_type().clone()))
            }
            _ => None,
        };
        if let Some(codec) = inferred {
            return Inference {
                codec,
                warning: None,
            };
        }
    }

    let detected_kinds: Vec<OptionKind> = kinds.into_iter().collect();
    let found = detected_kinds
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let message = format!(
        "Options of a select or multi-select widget are not strings (found {found}), \
         no codec was given and none could be deduced. Values read back from the URL \
         will be strings and will not match the options. Pass a codec that converts \
         the URL text back into an option, for example a custom int-or-float parser \
         for mixed numeric options."
    );
    Inference {
        codec,
        warning: Some(ConfigWarning {
            key: None,
            detected_kinds,
            message,
        }),
    }
}
