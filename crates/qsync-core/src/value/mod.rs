mod convert;
pub mod types;

pub use types::{EnumMember, EnumType, OptionKind, Value, ensure_list, str_values};
