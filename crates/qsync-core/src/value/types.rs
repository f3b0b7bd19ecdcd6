//! Value types shared by session state, option sets and the query string.
//!
//! Widget values are a closed sum type. The tag of a value (its
//! [`OptionKind`]) drives codec inference for option sets, so it is computed
//! once from the value instead of being probed at each call site.

use std::fmt;
use std::sync::Arc;

/// An enumeration type known to the application.
///
/// Members are identified by name. Query strings carry either the bare
/// member name or `<EnumName>.<MemberName>`. Cloning is cheap, every member
/// value holds a handle back to its type.
#[derive(Debug, Clone)]
pub struct EnumType(Arc<EnumDef>);

#[derive(Debug)]
struct EnumDef {
    name: String,
    members: Vec<String>,
}

impl EnumType {
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(Arc::new(EnumDef {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn members(&self) -> &[String] {
        &self.0.members
    }

    /// Look up a member by its bare name.
    pub fn member(&self, name: &str) -> Option<EnumMember> {
        self.0
            .members
            .iter()
            .find(|m| m.as_str() == name)
            .map(|m| EnumMember {
                enum_type: self.clone(),
                name: m.clone(),
            })
    }

    /// All members, in declaration order, as option values.
    pub fn values(&self) -> Vec<Value> {
        self.0
            .members
            .iter()
            .map(|m| {
                Value::Enum(EnumMember {
                    enum_type: self.clone(),
                    name: m.clone(),
                })
            })
            .collect()
    }
}

impl PartialEq for EnumType {
    fn eq(&self, other: &Self) -> bool {
        self.0.name == other.0.name && self.0.members == other.0.members
    }
}

impl Eq for EnumType {}

/// A single member of an [`EnumType`].
#[derive(Debug, Clone)]
pub struct EnumMember {
    enum_type: EnumType,
    name: String,
}

impl EnumMember {
    pub fn enum_type(&self) -> &EnumType {
        &self.enum_type
    }

    pub fn enum_name(&self) -> &str {
        self.enum_type.name()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for EnumMember {
    fn eq(&self, other: &Self) -> bool {
        self.enum_name() == other.enum_name() && self.name == other.name
    }
}

impl Eq for EnumMember {}

impl fmt::Display for EnumMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.enum_name(), self.name)
    }
}

/// A widget or session-state value.
///
/// `Value::None` is the absent-value sentinel: it means "no value / not in
/// the URL" and is never written to the query string.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Bytes(Vec<u8>),
    Enum(EnumMember),
    List(Vec<Value>),
}

/// Type tag of a [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionKind {
    None,
    Str,
    Int,
    Float,
    Bool,
    Bytes,
    Enum(String),
    List,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::None => write!(f, "none"),
            OptionKind::Str => write!(f, "str"),
            OptionKind::Int => write!(f, "int"),
            OptionKind::Float => write!(f, "float"),
            OptionKind::Bool => write!(f, "bool"),
            OptionKind::Bytes => write!(f, "bytes"),
            OptionKind::Enum(name) => write!(f, "enum {}", name),
            OptionKind::List => write!(f, "list"),
        }
    }
}

impl Value {
    pub fn kind(&self) -> OptionKind {
        match self {
            Value::None => OptionKind::None,
            Value::Str(_) => OptionKind::Str,
            Value::Int(_) => OptionKind::Int,
            Value::Float(_) => OptionKind::Float,
            Value::Bool(_) => OptionKind::Bool,
            Value::Bytes(_) => OptionKind::Bytes,
            Value::Enum(member) => OptionKind::Enum(member.enum_name().to_string()),
            Value::List(_) => OptionKind::List,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn is_empty_str(&self) -> bool {
        matches!(self, Value::Str(s) if s.is_empty())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric view of an `Int` or `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Strings written to the query string for this value.
    ///
    /// Lists produce one entry per element (a repeated key); `None` produces
    /// nothing.
    pub fn to_query_values(&self) -> Vec<String> {
        match self {
            Value::None => Vec::new(),
            Value::List(items) => items
                .iter()
                .filter(|item| !item.is_none())
                .map(|item| item.to_string())
                .collect(),
            other => vec![other.to_string()],
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Str(s) => write!(f, "{}", s),
            Value::Int(i) => write!(f, "{}", i),
            // Debug keeps the fractional part, so 6.0 stays distinguishable from 6
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Bytes(bytes) => write!(f, "{}", String::from_utf8_lossy(bytes)),
            Value::Enum(member) => write!(f, "{}", member),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<EnumMember> for Value {
    fn from(member: EnumMember) -> Self {
        Value::Enum(member)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(maybe: Option<T>) -> Self {
        maybe.map_or(Value::None, Into::into)
    }
}

/// Build a list of string values.
pub fn str_values<I, S>(items: I) -> Vec<Value>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(|s| Value::Str(s.into())).collect()
}

/// Convert a default into a list: lists are used as-is, `None` becomes an
/// empty list and any other scalar becomes a one-item list.
pub fn ensure_list(value: Value) -> Vec<Value> {
    match value {
        Value::None => Vec::new(),
        Value::List(items) => items,
        other => vec![other],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_query_format() {
        assert_eq!(Value::from("hello world").to_string(), "hello world");
        assert_eq!(Value::Int(6).to_string(), "6");
        assert_eq!(Value::Float(6.0).to_string(), "6.0");
        assert_eq!(Value::Float(4.5).to_string(), "4.5");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Bytes(b"abc".to_vec()).to_string(), "abc");
    }

    #[test]
    fn test_enum_member_display_is_qualified() {
        let color = EnumType::new("Color", ["Red", "Green"]);
        let red = color.member("Red").unwrap();
        assert_eq!(red.to_string(), "Color.Red");
        assert_eq!(Value::Enum(red).kind(), OptionKind::Enum("Color".to_string()));
        assert!(color.member("Blue").is_none());
    }

    #[test]
    fn test_to_query_values() {
        assert!(Value::None.to_query_values().is_empty());
        assert_eq!(Value::Int(3).to_query_values(), vec!["3"]);
        assert_eq!(
            Value::List(vec![Value::from("a"), Value::None, Value::Int(2)]).to_query_values(),
            vec!["a", "2"]
        );
    }

    #[test]
    fn test_ensure_list() {
        assert_eq!(ensure_list(Value::from("abc")), vec![Value::from("abc")]);
        assert_eq!(
            ensure_list(Value::Bytes(b"abc".to_vec())),
            vec![Value::Bytes(b"abc".to_vec())]
        );
        assert_eq!(
            ensure_list(Value::List(vec![Value::Int(5), Value::Int(6)])),
            vec![Value::Int(5), Value::Int(6)]
        );
        assert_eq!(ensure_list(Value::Int(5)), vec![Value::Int(5)]);
        assert!(ensure_list(Value::None).is_empty());
    }

    #[test]
    fn test_option_into_value() {
        assert_eq!(Value::from(None::<String>), Value::None);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }
}
