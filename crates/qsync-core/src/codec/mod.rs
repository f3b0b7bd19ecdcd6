//! Scalar codec: raw query-string text to typed [`Value`](crate::value::Value)s.

pub mod errors;
pub mod operations;
pub mod types;
pub mod urlencoded;

pub use errors::CodecError;
pub use operations::{
    Inference, convert_bool, decode_enum_member, decode_number, infer_codec, make_enum_codec,
};
pub use types::{Codec, ConfigWarning, CustomCodec, DecodeFn, NumericType};
