//! Directive storage.
//!
//! # Responsibilities
//! - Hold a stanza's directives in first-insertion order
//! - Promote repeated keys from a single value to a value list
//! - Normalize directive keys (shortcut expansion, leading capital)
//!
//! # Design Decisions
//! - Shortcut table is a static constant; expansion is a pure lookup
//! - Values are an explicit enum, consumers pattern-match on it
//! - Backed by `IndexMap` so order never depends on hashing

use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Short directive keys and the canonical names they expand to.
pub const SHORTCUTS: &[(&str, &str)] = &[
    ("T", "Title"),
    ("U", "URL"),
    ("H", "Host"),
    ("HJ", "HostJavascript"),
    ("D", "Domain"),
    ("DJ", "DomainJavascript"),
];

/// Directives with a fixed spelling, matched case-insensitively.
const CANONICAL_KEYS: &[&str] = &[
    "Title",
    "URL",
    "Host",
    "HostJavascript",
    "Domain",
    "DomainJavascript",
    "Group",
    "IncludeFile",
];

/// Normalize a raw directive key.
///
/// Shortcuts are resolved on the upper-cased key, known directives get their
/// canonical spelling, and anything else has its first character upper-cased.
pub fn normalize_key(raw: &str) -> String {
    let upper = raw.to_uppercase();
    if let Some((_, long)) = SHORTCUTS.iter().find(|(short, _)| *short == upper) {
        return (*long).to_string();
    }
    if let Some(known) = CANONICAL_KEYS.iter().find(|k| k.eq_ignore_ascii_case(raw)) {
        return (*known).to_string();
    }

    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Value of a single directive key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DirectiveValue {
    Single(String),
    Multi(Vec<String>),
}

impl DirectiveValue {
    /// The first value, regardless of variant.
    pub fn first(&self) -> Option<&str> {
        match self {
            DirectiveValue::Single(v) => Some(v),
            DirectiveValue::Multi(vs) => vs.first().map(String::as_str),
        }
    }

    /// All values in insertion order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            DirectiveValue::Single(v) => vec![v.as_str()],
            DirectiveValue::Multi(vs) => vs.iter().map(String::as_str).collect(),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            DirectiveValue::Single(existing) => {
                let first = std::mem::take(existing);
                *self = DirectiveValue::Multi(vec![first, value]);
            }
            DirectiveValue::Multi(vs) => vs.push(value),
        }
    }
}

/// Insertion-ordered directive key to value(s) map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DirectiveMap {
    entries: IndexMap<String, DirectiveValue>,
}

impl DirectiveMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, normalizing the key first.
    ///
    /// A repeated key keeps its original position and gains the new value.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        let key = normalize_key(key);
        let value = value.into();
        match self.entries.get_mut(&key) {
            Some(existing) => existing.push(value),
            None => {
                self.entries.insert(key, DirectiveValue::Single(value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&DirectiveValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove a key, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<DirectiveValue> {
        self.entries.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DirectiveValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decoded entries go through `insert`, so keys are normalized and aliases
/// merge exactly as they do when parsing text.
impl<'de> Deserialize<'de> for DirectiveMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = IndexMap::<String, DirectiveValue>::deserialize(deserializer)?;
        let mut map = DirectiveMap::new();
        for (key, value) in raw {
            match value {
                DirectiveValue::Single(v) => map.insert(&key, v),
                DirectiveValue::Multi(vs) if vs.is_empty() => {
                    return Err(de::Error::custom(format!("directive {key:?} has no values")));
                }
                DirectiveValue::Multi(vs) => {
                    for v in vs {
                        map.insert(&key, v);
                    }
                }
            }
        }
        Ok(map)
    }
}
