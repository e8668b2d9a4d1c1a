//! Stanza matching logic.
//!
//! # Responsibilities
//! - Match a query URL against a stored origin
//! - Match stanza names by prefix
//! - Combine conditions with AND semantics
//!
//! # Design Decisions
//! - Specificity lives in the stored origin: scheme and port only constrain
//!   the query when the stored origin names them
//! - Host matching compares lower-cased hosts
//! - Empty condition list = always matches (wildcard)

use crate::routing::origin::{origins_of, Origin};
use crate::stanza::model::Stanza;

/// Returns true if `query_url` falls under `stored_origin`.
///
/// Either side failing to parse is a non-match.
pub fn origin_matches(query_url: &str, stored_origin: &str) -> bool {
    match (Origin::parse(query_url), Origin::parse(stored_origin)) {
        (Ok(query), Ok(stored)) => stored.covers(&query),
        _ => false,
    }
}

/// Trait for matching stanzas against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the stanza matches this condition.
    fn matches(&self, stanza: &Stanza) -> bool;
}

/// Matches stanzas whose name starts with a prefix.
#[derive(Debug, Clone)]
pub struct NamePrefixMatcher {
    prefix: String,
    ignore_case: bool,
}

impl NamePrefixMatcher {
    /// Create a case-sensitive prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ignore_case: false,
        }
    }

    /// Create a prefix matcher that ignores case on both sides.
    pub fn ignoring_case(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into().to_lowercase(),
            ignore_case: true,
        }
    }
}

impl Matcher for NamePrefixMatcher {
    fn matches(&self, stanza: &Stanza) -> bool {
        if self.ignore_case {
            stanza.name.to_lowercase().starts_with(&self.prefix)
        } else {
            stanza.name.starts_with(&self.prefix)
        }
    }
}

/// Matches stanzas with at least one origin covering a query URL.
#[derive(Debug, Clone)]
pub struct OriginMatcher {
    query: Option<Origin>,
}

impl OriginMatcher {
    /// Create an origin matcher. An unparsable URL matches nothing.
    pub fn new(url: &str) -> Self {
        let query = match Origin::parse(url) {
            Ok(origin) => Some(origin),
            Err(err) => {
                tracing::warn!(url, error = %err, "Query URL has no usable origin");
                None
            }
        };
        Self { query }
    }
}

impl Matcher for OriginMatcher {
    fn matches(&self, stanza: &Stanza) -> bool {
        let Some(query) = &self.query else {
            return false;
        };
        // Stops at the first covering origin.
        origins_of(stanza)
            .iter()
            .filter_map(|origin| Origin::parse(origin).ok())
            .any(|stored| stored.covers(query))
    }
}

/// Combines multiple matchers with AND semantics.
#[derive(Debug, Default)]
pub struct AndMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AndMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }
}

impl Matcher for AndMatcher {
    fn matches(&self, stanza: &Stanza) -> bool {
        self.matchers.iter().all(|m| m.matches(stanza))
    }
}
