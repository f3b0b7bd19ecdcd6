//! Query-string boundary.

use std::fmt;

use crate::codec::urlencoded::{decode_query, encode_pairs};

/// Ordered key to values mapping, as written to or read from a URL.
pub type QueryMap = Vec<(String, Vec<String>)>;

/// Flat multi-map of the browser URL's query parameters.
pub trait QueryParams {
    /// Every raw value for `key`, in URL order. Empty if the key is absent.
    fn get_all(&self, key: &str) -> Vec<String>;

    fn keys(&self) -> Vec<String>;

    /// Replace the values of each listed key, appending keys not yet present.
    /// Keys that are not listed keep their values. An empty value list
    /// removes the key.
    fn update(&mut self, entries: &[(String, Vec<String>)]);

    fn remove(&mut self, key: &str);

    fn clear(&mut self);

    fn contains_key(&self, key: &str) -> bool {
        !self.get_all(key).is_empty()
    }

    fn to_query_map(&self) -> QueryMap {
        self.keys()
            .into_iter()
            .map(|key| {
                let values = self.get_all(&key);
                (key, values)
            })
            .collect()
    }

    /// Make the query string contain exactly `entries`.
    fn replace(&mut self, entries: &[(String, Vec<String>)]) {
        self.clear();
        self.update(entries);
    }

    /// The encoded query string with a leading `?`.
    fn to_query_string(&self) -> String {
        let map = self.to_query_map();
        let pairs = map
            .iter()
            .flat_map(|(k, values)| values.iter().map(move |v| (k.as_str(), v.as_str())));
        format!("?{}", encode_pairs(pairs))
    }
}

/// Insertion-ordered in-memory query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryQueryParams {
    entries: QueryMap,
}

impl MemoryQueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an encoded query string, with or without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let mut params = Self::new();
        for (key, value) in decode_query(query) {
            match params.entries.iter_mut().find(|(k, _)| *k == key) {
                Some((_, values)) => values.push(value),
                None => params.entries.push((key, vec![value])),
            }
        }
        params
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl QueryParams for MemoryQueryParams {
    fn get_all(&self, key: &str) -> Vec<String> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.clone())
            .unwrap_or_default()
    }

    fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    fn update(&mut self, entries: &[(String, Vec<String>)]) {
        for (key, values) in entries {
            if values.is_empty() {
                self.remove(key);
                continue;
            }
            match self.entries.iter_mut().find(|(k, _)| k == key) {
                Some((_, existing)) => *existing = values.clone(),
                None => self.entries.push((key.clone(), values.clone())),
            }
        }
    }

    fn remove(&mut self, key: &str) {
        self.entries.retain(|(k, _)| k != key);
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Display for MemoryQueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_query_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, values: &[&str]) -> (String, Vec<String>) {
        (
            key.to_string(),
            values.iter().map(|v| v.to_string()).collect(),
        )
    }

    #[test]
    fn test_parse_groups_repeated_keys() {
        let params = MemoryQueryParams::parse("a=1&b=2&c=3&c=4");
        assert_eq!(params.get_all("a"), vec!["1"]);
        assert_eq!(params.get_all("c"), vec!["3", "4"]);
        assert!(params.get_all("d").is_empty());
        assert_eq!(params.keys(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_update_replaces_and_appends() {
        let mut params = MemoryQueryParams::parse("?a1=hi&b2=old");
        params.update(&[entry("b2", &["3"]), entry("z", &["1", "2"])]);
        assert_eq!(params.to_query_string(), "?a1=hi&b2=3&z=1&z=2");
    }

    #[test]
    fn test_update_with_empty_values_removes_key() {
        let mut params = MemoryQueryParams::parse("a=1&b=2");
        params.update(&[entry("a", &[])]);
        assert_eq!(params.keys(), vec!["b"]);
    }

    #[test]
    fn test_replace_and_clear() {
        let mut params = MemoryQueryParams::parse("a=1&b=2");
        params.replace(&[entry("c", &["hello world"])]);
        assert_eq!(params.to_string(), "?c=hello+world");
        params.clear();
        assert!(params.is_empty());
        assert_eq!(params.to_query_string(), "?");
    }

    #[test]
    fn test_roundtrip_through_encoding() {
        let params = MemoryQueryParams::parse("multi=Streamlit&multi=QS&multi=Rocks&q=Don%27t+Know");
        assert_eq!(params.get_all("q"), vec!["Don't Know"]);
        assert_eq!(MemoryQueryParams::parse(&params.to_query_string()), params);
    }
}
