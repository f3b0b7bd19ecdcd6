use crate::keys::KeySelector;
use crate::writer::{Callback, CallbackChain, add_qs_callback, update_qs_callback};

/// Change handler for a widget.
///
/// With autoupdate, a query-string write for `key` runs before the caller's
/// callback. A widget whose default is `None` gets the update policy, so
/// clearing it removes the key from the URL; otherwise the add policy is used.
pub fn compose_on_change(
    key: &str,
    autoupdate: bool,
    default_is_none: bool,
    existing: Option<Callback>,
) -> Option<CallbackChain> {
    if !autoupdate {
        return existing.map(CallbackChain::single);
    }
    let selector = KeySelector::keys([key]);
    let pre_update = if default_is_none {
        update_qs_callback(selector)
    } else {
        add_qs_callback(selector)
    };
    Some(CallbackChain::wrapping(pre_update, existing))
}
