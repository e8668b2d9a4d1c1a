//! Stanza block extraction.
//!
//! # Responsibilities
//! - Split raw configuration text into per-stanza line groups
//! - Drop blank lines, comments, and the marker lines themselves
//! - Report blocks left open at end of input
//!
//! # Design Decisions
//! - Markers are plain substring matches on `START` / `END`, so a comment or
//!   title containing either word is read as a marker
//! - `START` is checked before `END`; a line containing both opens a block
//! - A second `START` while collecting restarts the buffer (no nesting)

/// A trimmed source line with its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// Lines collected between one `START` and its `END`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock<'a> {
    /// Line number of the opening marker.
    pub start_line: usize,
    pub lines: Vec<SourceLine<'a>>,
}

/// Result of scanning a whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction<'a> {
    pub blocks: Vec<RawBlock<'a>>,
    /// Opening line of a block still collecting at end of input.
    pub unterminated: Option<usize>,
}

const START_MARKER: &str = "START";
const END_MARKER: &str = "END";

/// Whether a line would be read as a block marker.
pub fn contains_marker(line: &str) -> bool {
    line.contains(START_MARKER) || line.contains(END_MARKER)
}

/// Scan `text` for marker-delimited stanza blocks, in source order.
pub fn extract_blocks(text: &str) -> Extraction<'_> {
    let mut extraction = Extraction::default();
    let mut current: Option<RawBlock<'_>> = None;

    for (index, line) in text.lines().enumerate() {
        let number = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed.contains(START_MARKER) {
            if let Some(open) = current.take() {
                tracing::debug!(
                    opened = open.start_line,
                    restarted = number,
                    "Nested START marker restarts block"
                );
            }
            current = Some(RawBlock {
                start_line: number,
                lines: Vec::new(),
            });
        } else if trimmed.contains(END_MARKER) {
            if let Some(block) = current.take() {
                extraction.blocks.push(block);
            }
        } else if let Some(block) = current.as_mut() {
            if !trimmed.starts_with('#') {
                block.lines.push(SourceLine {
                    number,
                    text: trimmed,
                });
            }
        }
    }

    extraction.unterminated = current.map(|block| block.start_line);
    extraction
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(block: &RawBlock<'a>) -> Vec<&'a str> {
        block.lines.iter().map(|l| l.text).collect()
    }

    #[test]
    fn test_extracts_blocks_in_order() {
        let text = "\
# header comment

#### One START ####
Title One
URL http://one.example

#### One END ####
#### Two START ####
  Title Two
#### Two END ####
";
        let extraction = extract_blocks(text);
        assert_eq!(extraction.blocks.len(), 2);
        assert_eq!(texts(&extraction.blocks[0]), vec!["Title One", "URL http://one.example"]);
        assert_eq!(texts(&extraction.blocks[1]), vec!["Title Two"]);
        assert_eq!(extraction.blocks[1].start_line, 8);
        assert_eq!(extraction.unterminated, None);
    }

    #[test]
    fn test_drops_comments_inside_block() {
        let text = "#### A START ####\n# note\nTitle A\n#### A END ####\n";
        let extraction = extract_blocks(text);
        assert_eq!(texts(&extraction.blocks[0]), vec!["Title A"]);
        assert_eq!(extraction.blocks[0].lines[0].number, 3);
    }

    #[test]
    fn test_dangling_start_yields_no_block() {
        let text = "#### A START ####\nTitle A\n#### A END ####\n#### B START ####\nTitle B\n";
        let extraction = extract_blocks(text);
        assert_eq!(extraction.blocks.len(), 1);
        assert_eq!(extraction.unterminated, Some(4));
    }

    #[test]
    fn test_second_start_restarts_buffer() {
        let text = "#### A START ####\nTitle A\n#### B START ####\nTitle B\n#### B END ####\n";
        let extraction = extract_blocks(text);
        assert_eq!(extraction.blocks.len(), 1);
        assert_eq!(texts(&extraction.blocks[0]), vec!["Title B"]);
    }

    #[test]
    fn test_lines_outside_blocks_ignored() {
        let text = "Title Stray\n#### A START ####\nTitle A\n#### A END ####\nURL http://stray.example\n";
        let extraction = extract_blocks(text);
        assert_eq!(extraction.blocks.len(), 1);
        assert_eq!(texts(&extraction.blocks[0]), vec!["Title A"]);
    }

    #[test]
    fn test_contains_marker() {
        assert!(contains_marker("Title LEGEND Books"));
        assert!(contains_marker("#### A START ####"));
        assert!(!contains_marker("URL http://a.example/start"));
    }

    #[test]
    fn test_marker_substring_in_directive_is_misread() {
        // Loose substring matching: a value containing "START" opens a new block
        // and a value containing "END" closes the current one.
        let text = "#### A START ####\nTitle RESTART Guide\nURL http://a.example\n#### A END ####\n";
        let extraction = extract_blocks(text);
        assert_eq!(texts(&extraction.blocks[0]), vec!["URL http://a.example"]);

        let text = "#### B START ####\nTitle LEGENDS\nURL http://b.example\n#### B END ####\n";
        let extraction = extract_blocks(text);
        assert_eq!(extraction.blocks.len(), 1);
        assert!(extraction.blocks[0].lines.is_empty());
    }
}
