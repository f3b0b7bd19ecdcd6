use crate::keys::{Blacklist, ExportPolicy};
use crate::query::QueryParams;
use crate::session::SessionState;

/// Per-context behaviour switches, normally taken from `QsyncConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSettings {
    /// Surface configuration warnings for option sets that cannot round-trip.
    pub warnings_enabled: bool,
    /// Also prune empty-string values from exports.
    pub drop_empty_values: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            warnings_enabled: true,
            drop_empty_values: false,
        }
    }
}

impl SyncSettings {
    pub fn export_policy(&self, keep_none: bool) -> ExportPolicy {
        ExportPolicy {
            keep_none,
            drop_empty: self.drop_empty_values,
        }
    }
}

/// What a callback can see and change while it runs.
///
/// Session state and query parameters are mutable; the blacklist and settings
/// are fixed for the duration of the call.
pub struct SyncScope<'a> {
    pub session: &'a mut dyn SessionState,
    pub query: &'a mut dyn QueryParams,
    pub blacklist: &'a Blacklist,
    pub settings: SyncSettings,
}

impl SyncScope<'_> {
    pub fn export_policy(&self, keep_none: bool) -> ExportPolicy {
        self.settings.export_policy(keep_none)
    }
}
