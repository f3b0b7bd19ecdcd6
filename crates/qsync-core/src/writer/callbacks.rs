//! Callback factories that write session state into the query string.
//!
//! Every factory takes an already-built [`KeySelector`], so malformed
//! patterns are rejected before a callback exists. The bare-string check
//! runs when the callback fires, against live state.

use std::collections::BTreeMap;

use tracing::info;

use crate::context::SyncScope;
use crate::errors::SyncResult;
use crate::keys::KeySelector;
use crate::query::QueryMap;
use crate::value::Value;
use crate::writer::chain::Callback;

fn to_entries(projection: BTreeMap<String, Value>) -> QueryMap {
    projection
        .into_iter()
        .map(|(key, value)| {
            let values = value.to_query_values();
            (key, values)
        })
        .collect()
}

fn selected_entries(
    scope: &SyncScope<'_>,
    selector: &KeySelector,
    keep_none: bool,
) -> SyncResult<QueryMap> {
    let projection = selector.project(
        &*scope.session,
        scope.blacklist,
        scope.export_policy(keep_none),
    )?;
    Ok(to_entries(projection))
}

/// Replace the whole query string with the selected keys.
pub fn set_qs_callback(selector: KeySelector) -> Callback {
    Callback::new("set_qs", move |scope| {
        let entries = selected_entries(scope, &selector, false)?;
        scope.query.replace(&entries);
        info!(event = "core.export.set_completed", keys = entries.len());
        Ok(())
    })
}

/// Add or overwrite the selected keys, leaving every other key in place.
///
/// Never removes a key: `None` values are skipped, and so are empty lists.
pub fn add_qs_callback(selector: KeySelector) -> Callback {
    Callback::new("add_qs", move |scope| {
        let entries: QueryMap = selected_entries(scope, &selector, false)?
            .into_iter()
            .filter(|(_, values)| !values.is_empty())
            .collect();
        scope.query.update(&entries);
        info!(event = "core.export.add_completed", keys = entries.len());
        Ok(())
    })
}

/// Like [`add_qs_callback`], but a selected key whose session value is
/// `None` is removed from the query string.
pub fn update_qs_callback(selector: KeySelector) -> Callback {
    Callback::new("update_qs", move |scope| {
        let entries = selected_entries(scope, &selector, true)?;
        let removed = entries.iter().filter(|(_, v)| v.is_empty()).count();
        scope.query.update(&entries);
        info!(
            event = "core.export.update_completed",
            keys = entries.len(),
            removed = removed
        );
        Ok(())
    })
}

/// Remove the selected keys from the query string, or everything when the
/// selector is unfiltered. Session state is not touched.
///
/// Keys are resolved against session state like every other export, so a
/// URL key with no session entry is left in place. Blacklisted keys are
/// left alone.
pub fn clear_qs_callback(selector: KeySelector) -> Callback {
    Callback::new("clear_qs", move |scope| {
        if selector.is_unfiltered() {
            scope.query.clear();
            info!(event = "core.export.clear_completed", scope = "all");
            return Ok(());
        }
        let resolved = selector.resolve(&scope.session.keys(), scope.blacklist)?;
        for key in &resolved {
            scope.query.remove(key);
        }
        info!(event = "core.export.clear_completed", keys = resolved.len());
        Ok(())
    })
}
