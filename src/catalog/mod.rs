//! Position-addressed stanza collection.
//!
//! # Responsibilities
//! - Own the ordered stanza list of one proxy configuration
//! - Insert, replace, move, and remove stanzas by 1-based position
//! - Produce listing and detail views for front ends
//!
//! # Design Decisions
//! - Order is meaningful (directive precedence) and is never re-sorted
//! - Stanzas themselves are replaced, never edited in place
//! - Not synchronized; callers sharing a catalog across threads lock it

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::routing::origin::origins_of;
use crate::routing::search::{search, SearchQuery};
use crate::stanza::directives::DirectiveMap;
use crate::stanza::extract::contains_marker;
use crate::stanza::model::{stanzas_from_json, Stanza};
use crate::stanza::parser::StanzaParser;
use crate::stanza::serializer::render;
use crate::stanza::types::{StanzaError, StanzaResult};

/// Listing entry for one stanza.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StanzaSummary {
    pub position: usize,
    pub name: String,
    pub origins: BTreeSet<String>,
}

/// Full view of one stanza.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StanzaDetail {
    pub position: usize,
    pub name: String,
    pub group: String,
    pub directives: DirectiveMap,
    pub origins: BTreeSet<String>,
}

/// Error type for loading a catalog from disk.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Stanza(#[from] StanzaError),
}

/// Ordered stanzas of one proxy configuration.
#[derive(Debug, Clone, Default)]
pub struct ProxyCatalog {
    stanzas: Vec<Stanza>,
    parser: StanzaParser,
}

impl ProxyCatalog {
    /// Create a catalog from already-parsed stanzas.
    pub fn new(stanzas: Vec<Stanza>, parser: StanzaParser) -> Self {
        Self { stanzas, parser }
    }

    /// Parse a whole configuration document.
    pub fn from_text(text: &str, parser: StanzaParser) -> StanzaResult<Self> {
        Ok(Self::new(parser.parse_all(text)?, parser))
    }

    /// Build from a JSON array of stanza records.
    pub fn from_json(value: &Value, parser: StanzaParser) -> StanzaResult<Self> {
        Ok(Self::new(stanzas_from_json(value)?, parser))
    }

    /// Load a configuration file. `.json` files are read as stanza records,
    /// anything else as stanza text.
    pub fn load_file(path: &Path, parser: StanzaParser) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        let catalog = if path.extension().is_some_and(|ext| ext == "json") {
            let value: Value = serde_json::from_str(&content)?;
            Self::from_json(&value, parser)?
        } else {
            Self::from_text(&content, parser)?
        };
        tracing::info!(path = %path.display(), stanzas = catalog.len(), "Loaded stanza catalog");
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.stanzas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stanzas.is_empty()
    }

    pub fn stanzas(&self) -> &[Stanza] {
        &self.stanzas
    }

    /// Swap in a freshly loaded stanza list.
    pub fn replace_all(&mut self, stanzas: Vec<Stanza>) {
        self.stanzas = stanzas;
    }

    pub fn get(&self, position: usize) -> StanzaResult<&Stanza> {
        let index = self.index_of(position)?;
        Ok(&self.stanzas[index])
    }

    /// Parse a stanza body and append it. Returns its position.
    pub fn append(&mut self, body: &str) -> StanzaResult<usize> {
        let stanza = self.parse_body(body)?;
        self.stanzas.push(stanza);
        Ok(self.stanzas.len())
    }

    /// Parse a stanza body and insert it at `position` (`len + 1` appends).
    pub fn insert(&mut self, position: usize, body: &str) -> StanzaResult<()> {
        if position == 0 || position > self.stanzas.len() + 1 {
            return Err(self.out_of_range(position));
        }
        let stanza = self.parse_body(body)?;
        self.stanzas.insert(position - 1, stanza);
        Ok(())
    }

    /// Parse a stanza body and put it in place of the stanza at `position`.
    pub fn replace(&mut self, position: usize, body: &str) -> StanzaResult<Stanza> {
        let index = self.index_of(position)?;
        let stanza = self.parse_body(body)?;
        Ok(std::mem::replace(&mut self.stanzas[index], stanza))
    }

    /// Move the stanza at `from` so it ends up at `to`.
    pub fn move_stanza(&mut self, from: usize, to: usize) -> StanzaResult<()> {
        let from_index = self.index_of(from)?;
        let to_index = self.index_of(to)?;
        if from_index != to_index {
            let stanza = self.stanzas.remove(from_index);
            self.stanzas.insert(to_index, stanza);
        }
        Ok(())
    }

    pub fn remove(&mut self, position: usize) -> StanzaResult<Stanza> {
        let index = self.index_of(position)?;
        Ok(self.stanzas.remove(index))
    }

    /// Listing filtered by `query`; no criteria lists everything.
    pub fn summaries(&self, query: &SearchQuery) -> Vec<StanzaSummary> {
        search(&self.stanzas, query)
            .into_iter()
            .map(|hit| StanzaSummary {
                origins: origins_of(&self.stanzas[hit.position - 1]),
                position: hit.position,
                name: hit.name,
            })
            .collect()
    }

    pub fn detail(&self, position: usize) -> StanzaResult<StanzaDetail> {
        let stanza = self.get(position)?;
        Ok(StanzaDetail {
            position,
            name: stanza.name.clone(),
            group: stanza.group.clone(),
            directives: stanza.directives.clone(),
            origins: origins_of(stanza),
        })
    }

    /// Canonical configuration text for the whole catalog.
    pub fn render(&self) -> String {
        render(&self.stanzas)
    }

    /// Parse a stanza body, warning about lines that would read as block
    /// markers once rendered: such a catalog does not survive a re-parse.
    fn parse_body(&self, body: &str) -> StanzaResult<Stanza> {
        let stanza = self.parser.parse_stanza(body)?;
        for (index, line) in body.lines().enumerate() {
            if contains_marker(line) {
                tracing::warn!(
                    line = index + 1,
                    text = line.trim(),
                    "Stanza line contains a block marker and will not re-parse as written"
                );
            }
        }
        Ok(stanza)
    }

    fn index_of(&self, position: usize) -> StanzaResult<usize> {
        if position == 0 || position > self.stanzas.len() {
            return Err(self.out_of_range(position));
        }
        Ok(position - 1)
    }

    fn out_of_range(&self, position: usize) -> StanzaError {
        StanzaError::PositionOutOfRange {
            position,
            len: self.stanzas.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "\
#### Sage Knowledge START ####
Title Sage Knowledge
URL http://knowledge.sagepub.com
#### Sage Knowledge END ####
#### IPA Source START ####
Title IPA Source
URL https://www.ipasource.com
#### IPA Source END ####
#### Mango START ####
Title Mango for Libraries - Chicago
Group Languages
URL https://connect.mangolanguages.com/mbicl/start
#### Mango END ####
";

    fn catalog() -> ProxyCatalog {
        ProxyCatalog::from_text(TEXT, StanzaParser::default()).unwrap()
    }

    fn names(catalog: &ProxyCatalog) -> Vec<&str> {
        catalog.stanzas().iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_move_stanza() {
        let mut catalog = catalog();
        catalog.move_stanza(3, 1).unwrap();
        assert_eq!(
            names(&catalog),
            vec!["Mango for Libraries - Chicago", "Sage Knowledge", "IPA Source"]
        );

        catalog.move_stanza(1, 3).unwrap();
        assert_eq!(
            names(&catalog),
            vec!["Sage Knowledge", "IPA Source", "Mango for Libraries - Chicago"]
        );

        catalog.move_stanza(2, 2).unwrap();
        assert_eq!(names(&catalog)[1], "IPA Source");
    }

    #[test]
    fn test_positions_out_of_range() {
        let mut catalog = catalog();
        assert_eq!(
            catalog.get(0).unwrap_err(),
            StanzaError::PositionOutOfRange { position: 0, len: 3 }
        );
        assert!(catalog.remove(4).is_err());
        assert!(catalog.move_stanza(1, 4).is_err());
        assert!(catalog.insert(5, "Title Late").is_err());
    }

    #[test]
    fn test_insert_append_replace_remove() {
        let mut catalog = catalog();

        assert_eq!(catalog.append("Title JSTOR\nURL https://www.jstor.org").unwrap(), 4);
        catalog.insert(1, "Title Academic Search\nURL http://search.ebscohost.com").unwrap();
        assert_eq!(names(&catalog)[0], "Academic Search");
        assert_eq!(catalog.len(), 5);

        let old = catalog.replace(2, "Title Sage Research Methods\nURL http://methods.sagepub.com").unwrap();
        assert_eq!(old.name, "Sage Knowledge");
        assert_eq!(catalog.get(2).unwrap().name, "Sage Research Methods");

        let removed = catalog.remove(5).unwrap();
        assert_eq!(removed.name, "JSTOR");
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_malformed_body_leaves_catalog_untouched() {
        let mut catalog = catalog();
        assert!(matches!(
            catalog.append("Title Broken\nURL"),
            Err(StanzaError::MalformedDirective { line: 2, .. })
        ));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_summaries_and_detail() {
        let catalog = catalog();
        let all = catalog.summaries(&SearchQuery::default());
        assert_eq!(all.len(), 3);
        assert!(all[1].origins.contains("https://www.ipasource.com"));

        let detail = catalog.detail(3).unwrap();
        assert_eq!(detail.group, "Languages");
        assert!(!detail.directives.contains_key("Group"));
        assert!(detail.origins.contains("https://connect.mangolanguages.com"));

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["position"], 3);
        assert_eq!(json["directives"]["Title"], "Mango for Libraries - Chicago");
    }

    #[test]
    fn test_from_json_rejects_non_list() {
        let err = ProxyCatalog::from_json(&serde_json::json!(42), StanzaParser::default()).unwrap_err();
        assert_eq!(err, StanzaError::TypeMismatch("a number".into()));
    }

    #[test]
    fn test_marker_in_body_does_not_survive_render() {
        let mut catalog = catalog();
        catalog.append("Title LEGEND Books\nURL http://legend.example").unwrap();
        assert_eq!(catalog.len(), 4);

        let reparsed = StanzaParser::default().parse_all(&catalog.render()).unwrap();
        assert_ne!(reparsed.as_slice(), catalog.stanzas());
        assert!(reparsed[3].directives.is_empty());
    }

    #[test]
    fn test_load_json_file_keeps_directive_order() {
        let text = "\
#### Mango START ####
Title Mango
URL https://connect.mangolanguages.com
DJ mangolanguages.com
HJ http://libraries.mangolanguages.com
#### Mango END ####
";
        let stanzas = StanzaParser::default().parse_all(text).unwrap();
        let path = std::env::temp_dir().join("stanza_gateway_catalog_order.json");
        fs::write(&path, serde_json::to_string(&stanzas).unwrap()).unwrap();

        let catalog = ProxyCatalog::load_file(&path, StanzaParser::default()).unwrap();
        let keys: Vec<_> = catalog.get(1).unwrap().directives.keys().collect();
        assert_eq!(keys, vec!["Title", "URL", "DomainJavascript", "HostJavascript"]);
        assert_eq!(catalog.stanzas(), stanzas.as_slice());
        assert_eq!(catalog.render(), crate::stanza::serializer::render(&stanzas));

        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join("stanza_gateway_catalog_load.txt");
        fs::write(&path, TEXT).unwrap();

        let catalog = ProxyCatalog::load_file(&path, StanzaParser::default()).unwrap();
        assert_eq!(catalog.len(), 3);

        std::fs::remove_file(&path).unwrap_or_default();
    }
}
