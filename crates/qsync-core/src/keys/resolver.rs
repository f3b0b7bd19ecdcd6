//! Selecting which session-state keys an export covers.

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::keys::blacklist::Blacklist;
use crate::keys::errors::KeyFilterError;
use crate::session::SessionState;
use crate::value::Value;

/// A key or pattern argument as it arrives from untyped input.
///
/// A bare string is accepted here so that it can be reported precisely: it is
/// almost always a mistake for a one-element list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyArg {
    Many(Vec<String>),
    Bare(String),
}

impl KeyArg {
    pub fn is_empty(&self) -> bool {
        match self {
            KeyArg::Many(items) => items.is_empty(),
            KeyArg::Bare(s) => s.is_empty(),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for KeyArg {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        KeyArg::Many(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone)]
enum Patterns {
    Compiled(Vec<(String, Regex)>),
    Bare(String),
}

/// Which entries to drop from an export projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportPolicy {
    /// Keep keys whose value is `Value::None`.
    pub keep_none: bool,
    /// Drop keys whose value is the empty string.
    pub drop_empty: bool,
}

/// Explicit keys and/or patterns naming the session keys to export.
///
/// Patterns match at the start of the key only.
#[derive(Debug, Clone)]
pub struct KeySelector {
    keys: Option<KeyArg>,
    patterns: Patterns,
}

impl Default for KeySelector {
    fn default() -> Self {
        Self::all()
    }
}

impl KeySelector {
    /// Every key in session state.
    pub fn all() -> Self {
        Self {
            keys: None,
            patterns: Patterns::Compiled(Vec::new()),
        }
    }

    /// Exactly the listed keys (those present in session state).
    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: Some(keys.into_iter().collect()),
            patterns: Patterns::Compiled(Vec::new()),
        }
    }

    /// Build from untyped arguments. Patterns are compiled here, so a bad
    /// pattern fails before any callback is created.
    pub fn new(keys: Option<KeyArg>, patterns: KeyArg) -> Result<Self, KeyFilterError> {
        let patterns = match patterns {
            KeyArg::Bare(s) => Patterns::Bare(s),
            KeyArg::Many(items) => Patterns::Compiled(compile_patterns(items)?),
        };
        Ok(Self { keys, patterns })
    }

    /// Add start-anchored patterns to the selection.
    pub fn with_patterns<I, S>(self, patterns: I) -> Result<Self, KeyFilterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let compiled = compile_patterns(patterns.into_iter().map(Into::into))?;
        let patterns = match self.patterns {
            Patterns::Compiled(mut existing) => {
                existing.extend(compiled);
                Patterns::Compiled(existing)
            }
            bare @ Patterns::Bare(_) => bare,
        };
        Ok(Self {
            keys: self.keys,
            patterns,
        })
    }

    /// True when neither keys nor patterns narrow the selection.
    pub fn is_unfiltered(&self) -> bool {
        let no_keys = self.keys.as_ref().is_none_or(KeyArg::is_empty);
        let no_patterns = match &self.patterns {
            Patterns::Compiled(items) => items.is_empty(),
            Patterns::Bare(s) => s.is_empty(),
        };
        no_keys && no_patterns
    }

    /// Resolve against `candidates` (normally the session keys), dropping
    /// blacklisted keys.
    ///
    /// With no keys and no patterns every candidate is selected. Otherwise the
    /// result is the explicit keys that are candidates, plus every candidate
    /// matching a pattern.
    pub fn resolve(
        &self,
        candidates: &[String],
        blacklist: &Blacklist,
    ) -> Result<BTreeSet<String>, KeyFilterError> {
        let patterns = match &self.patterns {
            Patterns::Bare(value) => {
                return Err(KeyFilterError::BareStringPatterns {
                    value: value.clone(),
                });
            }
            Patterns::Compiled(patterns) => patterns,
        };
        let keys = match &self.keys {
            Some(KeyArg::Bare(value)) => {
                return Err(KeyFilterError::BareStringKeys {
                    value: value.clone(),
                });
            }
            Some(KeyArg::Many(keys)) => Some(keys),
            None => None,
        };

        let selected: BTreeSet<String> = match keys {
            None if patterns.is_empty() => candidates.iter().cloned().collect(),
            _ => {
                let explicit = keys.map(|keys| {
                    candidates
                        .iter()
                        .filter(|c| keys.contains(*c))
                        .cloned()
                        .collect::<BTreeSet<_>>()
                });
                let matched = candidates
                    .iter()
                    .filter(|c| patterns.iter().any(|(_, re)| re.is_match(c)))
                    .cloned();
                explicit.unwrap_or_default().into_iter().chain(matched).collect()
            }
        };

        Ok(selected
            .into_iter()
            .filter(|key| !blacklist.contains(key))
            .collect())
    }

    /// The selected session entries, after blacklist and value pruning.
    pub fn project<S: SessionState + ?Sized>(
        &self,
        session: &S,
        blacklist: &Blacklist,
        policy: ExportPolicy,
    ) -> Result<BTreeMap<String, Value>, KeyFilterError> {
        let resolved = self.resolve(&session.keys(), blacklist)?;
        Ok(resolved
            .into_iter()
            .filter_map(|key| {
                let value = session.get(&key)?;
                if value.is_none() && !policy.keep_none {
                    return None;
                }
                if policy.drop_empty && value.is_empty_str() {
                    return None;
                }
                Some((key, value.clone()))
            })
            .collect())
    }
}

fn compile_patterns<I>(patterns: I) -> Result<Vec<(String, Regex)>, KeyFilterError>
where
    I: IntoIterator<Item = String>,
{
    patterns
        .into_iter()
        .map(|pattern| {
            Regex::new(&format!("^(?:{})", pattern))
                .map(|re| (pattern.clone(), re))
                .map_err(|source| KeyFilterError::InvalidPattern { pattern, source })
        })
        .collect()
}
