//! Reading typed values for a key out of the query string.

use tracing::debug;

use crate::codec::Codec;
use crate::query::errors::QueryError;
use crate::query::params::QueryParams;
use crate::value::Value;

fn decode_all(key: &str, raw: Vec<String>, codec: &Codec) -> Result<Vec<Value>, QueryError> {
    raw.iter()
        .map(|value| {
            codec.decode(value).map_err(|source| QueryError::Decode {
                key: key.to_string(),
                source,
            })
        })
        .collect()
}

/// Read the single value for `key`.
///
/// Returns `default` when the key is absent. More than one value for the key
/// is an error, and so is a value the codec rejects.
pub fn read_scalar<Q: QueryParams + ?Sized>(
    query: &Q,
    key: &str,
    default: Value,
    codec: &Codec,
) -> Result<Value, QueryError> {
    let raw = query.get_all(key);
    match raw.len() {
        0 => Ok(default),
        1 => {
            let mut decoded = decode_all(key, raw, codec)?;
            Ok(decoded.remove(0))
        }
        _ => Err(QueryError::MultipleValues {
            key: key.to_string(),
            values: raw,
        }),
    }
}

/// Read every value for `key`, in query order, or `default` if it is absent.
pub fn read_list<Q: QueryParams + ?Sized>(
    query: &Q,
    key: &str,
    default: Vec<Value>,
    codec: &Codec,
) -> Result<Vec<Value>, QueryError> {
    let raw = query.get_all(key);
    if raw.is_empty() {
        return Ok(default);
    }
    decode_all(key, raw, codec)
}

/// Position in `options` of the value given for `key`.
///
/// Falls back to `default_index` when the key is absent, has several values,
/// fails to decode or decodes to something that is not an option.
pub fn read_index<Q: QueryParams + ?Sized>(
    query: &Q,
    key: &str,
    options: &[Value],
    default_index: Option<usize>,
    codec: &Codec,
) -> Option<usize> {
    let value = match read_scalar(query, key, Value::None, codec) {
        Ok(Value::None) => return default_index,
        Ok(value) => value,
        Err(e) => {
            debug!(
                event = "core.query.read_index_fallback",
                key = key,
                error = %e
            );
            return default_index;
        }
    };

    match options.iter().position(|opt| *opt == value) {
        Some(index) => Some(index),
        None => {
            debug!(
                event = "core.query.value_not_in_options",
                key = key,
                value = %value
            );
            default_index
        }
    }
}
