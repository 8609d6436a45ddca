// src/extract/qualify.rs
// =============================================================================
// Decides whether a document is worth writing to disk.
//
// Redirect stubs, error pages and empty shells all render to little more than
// a title and the provenance line. A document is kept only when:
// - its rendered markdown, trimmed, has more than MIN_LINES lines (blank
//   separator lines count, exactly as they appear in the written file), and
// - the body (everything after the preamble) holds at least MIN_BODY_CHARS
//   characters once trimmed
// =============================================================================

use std::fmt;

use super::Document;

const MIN_LINES: usize = 2;
const MIN_BODY_CHARS: usize = 100;

/// Why a document was not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Too few lines to hold anything beyond the preamble
    Empty { lines: usize },
    /// Some body text, but less than the threshold
    InsufficientContent { chars: usize },
    /// An index with no pages in it
    NoEntries,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Empty { lines } => write!(f, "empty page ({} lines)", lines),
            SkipReason::InsufficientContent { chars } => {
                write!(f, "insufficient content ({} of {} chars)", chars, MIN_BODY_CHARS)
            }
            SkipReason::NoEntries => write!(f, "no entries"),
        }
    }
}

/// `Ok(())` when the document qualifies, otherwise the reason it does not.
pub fn qualify(document: &Document) -> Result<(), SkipReason> {
    let lines = document.to_markdown().trim().split('\n').count();
    if lines <= MIN_LINES {
        return Err(SkipReason::Empty { lines });
    }

    let chars = document.body().join("\n").trim().chars().count();
    if chars < MIN_BODY_CHARS {
        return Err(SkipReason::InsufficientContent { chars });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{BlockKind, ContentBlock};

    fn doc(title: Option<&str>, paragraphs: &[&str]) -> Document {
        Document {
            source_url: "https://example.com/".to_string(),
            title: title.map(str::to_string),
            blocks: paragraphs
                .iter()
                .map(|p| ContentBlock::new(BlockKind::Paragraph, *p))
                .collect(),
        }
    }

    #[test]
    fn test_preamble_only_has_no_content() {
        // "# Home", blank, provenance: three lines, but an empty body
        assert_eq!(
            qualify(&doc(Some("Home"), &[])),
            Err(SkipReason::InsufficientContent { chars: 0 })
        );
    }

    #[test]
    fn test_provenance_only_is_empty() {
        assert_eq!(qualify(&doc(None, &[])), Err(SkipReason::Empty { lines: 1 }));
    }

    #[test]
    fn test_short_body_is_rejected() {
        let result = qualify(&doc(Some("Home"), &["0123456789"]));
        assert_eq!(result, Err(SkipReason::InsufficientContent { chars: 10 }));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let exact = "x".repeat(100);
        assert_eq!(qualify(&doc(Some("Home"), &[exact.as_str()])), Ok(()));

        let short = "x".repeat(99);
        assert!(qualify(&doc(Some("Home"), &[short.as_str()])).is_err());
    }

    #[test]
    fn test_body_lines_are_counted_together() {
        let half = "y".repeat(50);
        // 50 + newline + 50 = 101 characters
        assert_eq!(qualify(&doc(Some("Home"), &[half.as_str(), half.as_str()])), Ok(()));
    }

    #[test]
    fn test_untitled_single_paragraph_qualifies() {
        // provenance, blank separator, paragraph
        let long = "z".repeat(150);
        assert_eq!(qualify(&doc(None, &[long.as_str()])), Ok(()));
    }

    #[test]
    fn test_preamble_does_not_count_toward_threshold() {
        let long_title = "T".repeat(300);
        assert!(qualify(&doc(Some(long_title.as_str()), &["short"])).is_err());
    }
}
