//! Directive and stanza parsing.
//!
//! # Responsibilities
//! - Split a directive line into key and value
//! - Build `Stanza` records from extracted blocks
//! - Apply the configured policy to malformed lines and open blocks
//!
//! # Design Decisions
//! - Key and value are separated by the first whitespace run
//! - Default policy aborts on the first malformed directive so a given input
//!   always produces the same stanza list or the same error

use serde::{Deserialize, Serialize};

use crate::stanza::directives::{normalize_key, DirectiveMap};
use crate::stanza::extract::{extract_blocks, SourceLine};
use crate::stanza::model::Stanza;
use crate::stanza::types::{StanzaError, StanzaResult};

/// What to do with a directive line that has no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Fail the whole parse.
    #[default]
    Abort,
    /// Drop the stanza containing the line.
    SkipStanza,
    /// Drop only the offending line.
    SkipLine,
}

/// What to do with a `START` that is never closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnterminatedPolicy {
    /// Discard the collected lines and log a warning.
    #[default]
    Discard,
    /// Fail with `UnterminatedBlock`.
    Error,
}

/// Parser behavior switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ParseOptions {
    pub malformed_directive: MalformedPolicy,
    pub unterminated_block: UnterminatedPolicy,
}

/// Parse one directive line into a normalized `(key, value)` pair.
///
/// `line_number` is only used for error reporting.
pub fn parse_directive_line(line: &str, line_number: usize) -> StanzaResult<(String, String)> {
    let trimmed = line.trim();
    let malformed = || StanzaError::MalformedDirective {
        line: line_number,
        text: trimmed.to_string(),
    };

    let split = trimmed.find(char::is_whitespace).ok_or_else(malformed)?;
    let (raw_key, rest) = trimmed.split_at(split);
    let value = rest.trim();
    if value.is_empty() {
        return Err(malformed());
    }

    Ok((normalize_key(raw_key), value.to_string()))
}

/// Builds stanzas from configuration text.
#[derive(Debug, Clone, Copy, Default)]
pub struct StanzaParser {
    options: ParseOptions,
}

impl StanzaParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parse every marker-delimited stanza in `text`, in source order.
    pub fn parse_all(&self, text: &str) -> StanzaResult<Vec<Stanza>> {
        let extraction = extract_blocks(text);

        if let Some(line) = extraction.unterminated {
            match self.options.unterminated_block {
                UnterminatedPolicy::Error => return Err(StanzaError::UnterminatedBlock { line }),
                UnterminatedPolicy::Discard => {
                    tracing::warn!(line, "Discarding stanza block with no END marker");
                }
            }
        }

        let mut stanzas = Vec::with_capacity(extraction.blocks.len());
        for block in &extraction.blocks {
            match self.parse_lines(&block.lines) {
                Ok(stanza) => stanzas.push(stanza),
                Err(err) if self.options.malformed_directive == MalformedPolicy::SkipStanza => {
                    tracing::warn!(
                        block_line = block.start_line,
                        error = %err,
                        "Skipping stanza with malformed directive"
                    );
                }
                Err(err) => return Err(err),
            }
        }

        tracing::debug!(stanzas = stanzas.len(), "Parsed stanza configuration");
        Ok(stanzas)
    }

    /// Parse a single stanza body: directive lines without markers.
    ///
    /// Blank lines and `#` comments are skipped.
    pub fn parse_stanza(&self, body: &str) -> StanzaResult<Stanza> {
        let lines: Vec<SourceLine<'_>> = body
            .lines()
            .enumerate()
            .map(|(index, line)| SourceLine {
                number: index + 1,
                text: line.trim(),
            })
            .filter(|line| !line.text.is_empty() && !line.text.starts_with('#'))
            .collect();
        self.parse_lines(&lines)
    }

    fn parse_lines(&self, lines: &[SourceLine<'_>]) -> StanzaResult<Stanza> {
        let mut directives = DirectiveMap::new();
        for line in lines {
            match parse_directive_line(line.text, line.number) {
                Ok((key, value)) => directives.insert(&key, value),
                Err(err) if self.options.malformed_directive == MalformedPolicy::SkipLine => {
                    tracing::warn!(error = %err, "Skipping malformed directive");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(Stanza::from_directives(directives))
    }
}

/// Parse with default options: abort on malformed lines, discard open blocks.
pub fn parse_all(text: &str) -> StanzaResult<Vec<Stanza>> {
    StanzaParser::default().parse_all(text)
}
