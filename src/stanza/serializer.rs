//! Rendering stanzas back to configuration text.

use crate::stanza::directives::DirectiveValue;
use crate::stanza::model::Stanza;

/// Render stanzas in order as marker-delimited blocks.
///
/// Each block carries its `Group` line first, then one line per directive
/// value, and is followed by a blank line.
pub fn render(stanzas: &[Stanza]) -> String {
    let mut lines: Vec<String> = Vec::new();
    for stanza in stanzas {
        lines.push(format!("#### {} START ####", stanza.name));
        lines.push(format!("Group {}", stanza.group));
        for (key, value) in stanza.directives.iter() {
            match value {
                DirectiveValue::Single(v) => lines.push(format!("{key} {v}")),
                DirectiveValue::Multi(vs) => {
                    lines.extend(vs.iter().map(|v| format!("{key} {v}")));
                }
            }
        }
        lines.push(format!("#### {} END   ####", stanza.name));
        lines.push(String::new());
    }
    lines.join("\n")
}
