//! Stanza error definitions.

use thiserror::Error;

/// Errors that can occur while parsing, matching, or addressing stanzas.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StanzaError {
    /// A directive line inside a block has no whitespace separating key and value.
    #[error("Malformed directive on line {line}: {text:?}")]
    MalformedDirective { line: usize, text: String },

    /// A `START` marker was never closed before end of input.
    #[error("Unterminated stanza block opened on line {line}")]
    UnterminatedBlock { line: usize },

    /// A URL-like directive value could not be reduced to an origin.
    #[error("Invalid origin {value:?}: {reason}")]
    InvalidOrigin { value: String, reason: String },

    /// Input was not an ordered sequence of stanza records.
    #[error("Expected a list of stanzas, got {0}")]
    TypeMismatch(String),

    /// A 1-based position fell outside the stanza list.
    #[error("Stanza position {position} out of range (1..={len})")]
    PositionOutOfRange { position: usize, len: usize },
}

/// Result type for stanza operations.
pub type StanzaResult<T> = Result<T, StanzaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StanzaError::MalformedDirective {
            line: 4,
            text: "URL".into(),
        };
        assert_eq!(err.to_string(), "Malformed directive on line 4: \"URL\"");

        let err = StanzaError::PositionOutOfRange { position: 7, len: 3 };
        assert!(err.to_string().contains("1..=3"));
    }
}
