//! Session-state boundary.
//!
//! The host owns the real store and mutates it on every widget interaction.
//! This crate only reads it, seeds missing keys with [`SessionState::set_default`],
//! and hands it to the renderer.

use std::collections::BTreeMap;

use crate::value::Value;

/// String-keyed store of current widget values for one user session.
pub trait SessionState {
    fn get(&self, key: &str) -> Option<&Value>;

    /// All keys currently present.
    fn keys(&self) -> Vec<String>;

    fn insert(&mut self, key: &str, value: Value);

    fn remove(&mut self, key: &str) -> Option<Value>;

    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert `value` only if `key` is absent. Returns whether it was inserted.
    fn set_default(&mut self, key: &str, value: Value) -> bool {
        if self.contains_key(key) {
            return false;
        }
        self.insert(key, value);
        true
    }
}

/// In-process session store with deterministic key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySessionState {
    values: BTreeMap<String, Value>,
}

impl MemorySessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for MemorySessionState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl SessionState for MemorySessionState {
    fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    fn insert(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }
}
