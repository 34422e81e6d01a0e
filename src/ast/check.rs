//! Structural checks over a document tree.
//!
//! Hosts reject trees whose spans are inconsistent, so every tree the crate
//! produces should pass [`check`].

use thiserror::Error;

use super::{DocumentNode, Location, NodeType, TextRange};

/// A structural defect found in a document tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AstError {
    #[error("{node} range [{start}, {end}) is inverted")]
    InvertedRange {
        node: NodeType,
        start: usize,
        end: usize,
    },
    #[error("{node} location {start} -> {end} is inverted")]
    InvertedLocation {
        node: NodeType,
        start: String,
        end: String,
    },
    #[error("{node} location uses line 0; lines are 1-indexed")]
    ZeroLine { node: NodeType },
    #[error("{child} [{child_start}, {child_end}) escapes parent {parent} [{parent_start}, {parent_end})")]
    OutOfParent {
        parent: NodeType,
        parent_start: usize,
        parent_end: usize,
        child: NodeType,
        child_start: usize,
        child_end: usize,
    },
    #[error("paragraph {index} starts at {start}, before the previous paragraph ends at {previous_end}")]
    Unordered {
        index: usize,
        start: usize,
        previous_end: usize,
    },
    #[error("paragraph {index} span differs from its content node")]
    ParagraphSpanMismatch { index: usize },
    #[error("range [{start}, {end}) exceeds source length {len}")]
    OutOfSource { start: usize, end: usize, len: usize },
}

/// Verify that a document tree is internally consistent.
///
/// Checks that ranges and locations are ordered, lines are 1-indexed,
/// children fall within their parent and appear in source order, each
/// paragraph shares its content node's span, and no range runs past
/// the end of the source text.
pub fn check(doc: &DocumentNode) -> Result<(), AstError> {
    check_span(NodeType::Document, &doc.range, &doc.loc)?;

    let source_len = doc.raw.len();
    let mut previous_end = None;

    for (index, paragraph) in doc.children.iter().enumerate() {
        check_span(NodeType::Paragraph, &paragraph.range, &paragraph.loc)?;
        check_within(NodeType::Document, &doc.range, NodeType::Paragraph, &paragraph.range)?;

        if paragraph.range.end > source_len {
            return Err(AstError::OutOfSource {
                start: paragraph.range.start,
                end: paragraph.range.end,
                len: source_len,
            });
        }

        if let Some(previous_end) = previous_end {
            if paragraph.range.start < previous_end {
                return Err(AstError::Unordered {
                    index,
                    start: paragraph.range.start,
                    previous_end,
                });
            }
        }
        previous_end = Some(paragraph.range.end);

        let content = paragraph.content();
        check_span(NodeType::Str, &content.range, &content.loc)?;
        check_within(NodeType::Paragraph, &paragraph.range, NodeType::Str, &content.range)?;

        if content.range != paragraph.range || content.loc != paragraph.loc {
            return Err(AstError::ParagraphSpanMismatch { index });
        }
    }

    Ok(())
}

fn check_span(node: NodeType, range: &TextRange, loc: &Location) -> Result<(), AstError> {
    if range.start > range.end {
        return Err(AstError::InvertedRange {
            node,
            start: range.start,
            end: range.end,
        });
    }
    if loc.start.line == 0 || loc.end.line == 0 {
        return Err(AstError::ZeroLine { node });
    }
    if loc.start > loc.end {
        return Err(AstError::InvertedLocation {
            node,
            start: loc.start.to_string(),
            end: loc.end.to_string(),
        });
    }
    Ok(())
}

fn check_within(
    parent: NodeType,
    parent_range: &TextRange,
    child: NodeType,
    child_range: &TextRange,
) -> Result<(), AstError> {
    if parent_range.contains(child_range) {
        return Ok(());
    }
    Err(AstError::OutOfParent {
        parent,
        parent_start: parent_range.start,
        parent_end: parent_range.end,
        child,
        child_start: child_range.start,
        child_end: child_range.end,
    })
}
