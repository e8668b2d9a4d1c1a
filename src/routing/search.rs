//! Stanza lookup.
//!
//! # Responsibilities
//! - Find stanzas by name prefix and/or query URL
//! - Report hits as 1-based positions with names
//!
//! # Design Decisions
//! - Both criteria given = intersection of the two hit sets
//! - No criteria = every stanza (the empty AND matches everything)
//! - Hits are ordered by position

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::routing::matcher::{AndMatcher, Matcher, NamePrefixMatcher, OriginMatcher};
use crate::stanza::model::{stanzas_from_json, Stanza};
use crate::stanza::types::StanzaResult;

/// Search criteria. Absent fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchQuery {
    /// Name prefix.
    pub name: Option<String>,

    /// URL whose origin must be covered by one of the stanza's origins.
    pub url: Option<String>,

    /// Compare name prefixes case-insensitively.
    pub ignore_case: bool,
}

impl SearchQuery {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn by_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Compile the criteria into a single matcher.
    pub fn matcher(&self) -> AndMatcher {
        let mut matchers: Vec<Box<dyn Matcher>> = Vec::new();
        if let Some(url) = &self.url {
            matchers.push(Box::new(OriginMatcher::new(url)));
        }
        if let Some(name) = &self.name {
            let matcher = if self.ignore_case {
                NamePrefixMatcher::ignoring_case(name.as_str())
            } else {
                NamePrefixMatcher::new(name.as_str())
            };
            matchers.push(Box::new(matcher));
        }
        AndMatcher::new(matchers)
    }
}

/// A matching stanza: 1-based position and name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SearchHit {
    pub position: usize,
    pub name: String,
}

/// Find every stanza satisfying all given criteria.
pub fn search(stanzas: &[Stanza], query: &SearchQuery) -> BTreeSet<SearchHit> {
    let matcher = query.matcher();
    stanzas
        .iter()
        .enumerate()
        .filter(|(_, stanza)| matcher.matches(stanza))
        .map(|(index, stanza)| SearchHit {
            position: index + 1,
            name: stanza.name.clone(),
        })
        .collect()
}

/// Search a JSON array of stanza records.
///
/// Fails with `TypeMismatch` when `stanzas` is not such an array.
pub fn search_json(stanzas: &Value, query: &SearchQuery) -> StanzaResult<BTreeSet<SearchHit>> {
    let stanzas = stanzas_from_json(stanzas)?;
    Ok(search(&stanzas, query))
}
