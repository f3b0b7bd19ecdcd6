use std::collections::BTreeSet;

use tracing::info;

/// Keys that are never exported to the query string, whatever the selector.
///
/// Usually filled once at startup from configuration, then shared read-only
/// by every export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    keys: BTreeSet<String>,
}

impl Blacklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: impl Into<String>) {
        let key = key.into();
        info!(event = "core.blacklist.key_added", key = %key);
        self.keys.insert(key);
    }

    /// Remove `key`. Does nothing if it is not blacklisted.
    pub fn remove(&mut self, key: &str) {
        if self.keys.remove(key) {
            info!(event = "core.blacklist.key_removed", key = key);
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Blacklist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let mut blacklist = Blacklist::new();
        blacklist.add("blacklisted_key");
        assert!(blacklist.contains("blacklisted_key"));
        blacklist.remove("blacklisted_key");
        assert!(!blacklist.contains("blacklisted_key"));
        assert!(blacklist.is_empty());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut blacklist: Blacklist = ["a"].into_iter().collect();
        blacklist.remove("not-there");
        assert_eq!(blacklist.iter().collect::<Vec<_>>(), vec!["a"]);
    }
}
