use clap::ArgMatches;
use tracing::{error, info};

use qsync_core::{MemoryQueryParams, Value, ensure_list, read_list, read_scalar};

use super::helpers::{codec_from_name, parse_value};

pub(crate) fn handle_read_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let key = matches
        .get_one::<String>("key")
        .ok_or("Key argument is required")?;
    let query_text = matches
        .get_one::<String>("query")
        .map(String::as_str)
        .unwrap_or("");
    let as_list = matches.get_flag("list");
    let codec_name = matches
        .get_one::<String>("codec")
        .map(String::as_str)
        .unwrap_or("str");
    let default = matches
        .get_one::<String>("default")
        .map(|raw| parse_value(raw))
        .unwrap_or(Value::None);

    info!(
        event = "cli.read_started",
        key = %key,
        codec = codec_name,
        as_list = as_list
    );

    let bool_fallback = default.as_bool().unwrap_or(false);
    let codec = codec_from_name(codec_name, bool_fallback, None)?;
    let query = MemoryQueryParams::parse(query_text);

    let result = if as_list {
        read_list(&query, key, ensure_list(default), &codec).map(Value::List)
    } else {
        read_scalar(&query, key, default, &codec)
    };

    match result {
        Ok(value) => {
            println!("{}", serde_json::to_string(&value)?);
            info!(event = "cli.read_completed", key = %key);
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to read '{}': {}", key, e);
            error!(event = "cli.read_failed", key = %key, error = %e);
            qsync_core::events::log_app_error(&e);
            Err(e.into())
        }
    }
}
