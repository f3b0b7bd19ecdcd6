use std::collections::BTreeMap;

use clap::ArgMatches;
use tracing::{error, info};

use qsync_core::{KeyArg, KeySelector, SessionState, SyncContext, Value};

use super::helpers::load_config_with_warning;

pub(crate) fn handle_permalink_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let state_json = matches
        .get_one::<String>("state")
        .ok_or("State argument is required")?;
    let keys: Option<KeyArg> = matches
        .get_many::<String>("keys")
        .map(|keys| keys.cloned().collect());
    let patterns: KeyArg = matches
        .get_many::<String>("regex")
        .map(|patterns| patterns.cloned().collect())
        .unwrap_or(KeyArg::Many(Vec::new()));
    let extra_blacklist: Vec<String> = matches
        .get_many::<String>("blacklist")
        .map(|keys| keys.cloned().collect())
        .unwrap_or_default();

    info!(event = "cli.permalink_started");

    let state: BTreeMap<String, Value> = serde_json::from_str(state_json).map_err(|e| {
        eprintln!("❌ --state must be a JSON object: {}", e);
        error!(event = "cli.permalink_failed", error = %e);
        e
    })?;

    let config = load_config_with_warning();
    let mut ctx = SyncContext::in_memory("").with_config(&config);
    for key in extra_blacklist {
        ctx.blacklist_key(key);
    }
    for (key, value) in state {
        ctx.session_mut().insert(&key, value);
    }

    let link = KeySelector::new(keys, patterns)
        .map_err(qsync_core::SyncError::from)
        .and_then(|selector| ctx.make_permalink(&selector));

    match link {
        Ok(link) => {
            println!("{}", link);
            info!(event = "cli.permalink_completed", length = link.len());
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to build permalink: {}", e);
            error!(event = "cli.permalink_failed", error = %e);
            Err(e.into())
        }
    }
}
