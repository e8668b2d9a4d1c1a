//! The stanza record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::stanza::directives::DirectiveMap;
use crate::stanza::types::{StanzaError, StanzaResult};

/// Group assigned to stanzas without a `Group` directive.
pub const DEFAULT_GROUP: &str = "Default";

/// One named resource-access block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StanzaRecord")]
pub struct Stanza {
    /// Display name resolved from `Title` or `IncludeFile`.
    pub name: String,

    /// Classification label, stored outside the directive map.
    pub group: String,

    /// Remaining directives in source order.
    pub directives: DirectiveMap,
}

impl Stanza {
    /// Build a stanza from parsed directives.
    ///
    /// `Group` is pulled out of the map (first value wins). The name is the
    /// `Title`, else the last path segment of `IncludeFile`, else empty.
    pub fn from_directives(mut directives: DirectiveMap) -> Self {
        let group = directives
            .remove("Group")
            .and_then(|v| v.first().map(str::to_string))
            .unwrap_or_else(|| DEFAULT_GROUP.to_string());

        let name = resolve_name(&directives);

        Self {
            name,
            group,
            directives,
        }
    }
}

/// Serialized shape of a stanza, checked before it becomes a `Stanza`.
#[derive(Debug, Deserialize)]
struct StanzaRecord {
    name: String,
    group: String,
    directives: DirectiveMap,
}

impl TryFrom<StanzaRecord> for Stanza {
    type Error = String;

    /// Rebuilds the stanza from its directives so decoded records obey the
    /// same group and name rules as parsed text.
    fn try_from(record: StanzaRecord) -> Result<Self, Self::Error> {
        let mut directives = record.directives;
        match directives.get("Group").and_then(|v| v.first()) {
            Some(group) if group != record.group => {
                return Err(format!(
                    "group {:?} conflicts with Group directive {:?}",
                    record.group, group
                ));
            }
            Some(_) => {}
            None => directives.insert("Group", record.group),
        }

        let stanza = Stanza::from_directives(directives);
        if stanza.name != record.name {
            return Err(format!(
                "name {:?} does not match directives (resolves to {:?})",
                record.name, stanza.name
            ));
        }
        Ok(stanza)
    }
}

/// Decode a JSON array of stanza records, as produced by serializing `Vec<Stanza>`.
pub fn stanzas_from_json(value: &Value) -> StanzaResult<Vec<Stanza>> {
    let items = match value {
        Value::Array(items) => items,
        other => return Err(StanzaError::TypeMismatch(json_kind(other).to_string())),
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            Stanza::deserialize(item).map_err(|e| {
                StanzaError::TypeMismatch(format!("{} at index {index} ({e})", json_kind(item)))
            })
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn resolve_name(directives: &DirectiveMap) -> String {
    if let Some(title) = directives.get("Title").and_then(|v| v.first()) {
        return title.to_string();
    }
    directives
        .get("IncludeFile")
        .and_then(|v| v.first())
        .map(|path| path.rsplit(['/', '\\']).next().unwrap_or(path).to_string())
        .unwrap_or_default()
}
