//! KDoc comment classification and prose extraction.
//!
//! A KDoc comment opens with `/**`. Comments opening with `/***` are a
//! common decorative banner style and are not documentation, even though
//! they share the prefix.
//!
//! # Stripped decoration
//!
//! ```text
//! /**             <- opener removed
//!  * Adds two     <- leading whitespace, one `*`, one space removed
//!  *
//!  * @param a ... <- tags pass through verbatim
//!  */             <- closer removed
//! ```

use lazy_static::lazy_static;
use regex::Regex;

use crate::ast::{Location, ParagraphNode, Position, StrNode, TextRange};
use crate::parser::RawCommentMatch;

/// Opening delimiter of a documentation comment.
const DOC_OPEN: &str = "/**";
/// Opening delimiter of a decorative block comment that is not documentation.
const BANNER_OPEN: &str = "/***";
/// Closing delimiter of any block comment.
const CLOSE_LEN: usize = "*/".len();

lazy_static! {
    /// Leading decoration column of a KDoc line: indentation, one `*`, one space.
    static ref LINE_DECORATION: Regex = Regex::new(r"^\s*\*\s?").unwrap();
}

/// Prose recovered from a documentation comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    /// Comment text with delimiters and line decoration removed.
    pub content: String,
    /// Number of bytes before the first content byte (the opener).
    pub prefix_len: usize,
}

/// Returns true if `text` is a KDoc comment.
///
/// Only the opening characters are examined.
pub fn is_doc_comment(text: &str) -> bool {
    text.starts_with(DOC_OPEN) && !text.starts_with(BANNER_OPEN)
}

/// Strip comment syntax from a KDoc comment.
///
/// `text` should satisfy [`is_doc_comment`]. Degenerate comments such as
/// `/**/` yield empty content rather than failing.
pub fn extract_content(text: &str) -> ExtractedContent {
    let prefix_len = DOC_OPEN.len();
    let inner = text
        .len()
        .checked_sub(CLOSE_LEN)
        .filter(|&end| end >= prefix_len)
        .and_then(|end| text.get(prefix_len..end))
        .unwrap_or("");

    ExtractedContent {
        content: strip_decoration(inner),
        prefix_len,
    }
}

/// Remove the decoration column from every line, then trim the result.
fn strip_decoration(inner: &str) -> String {
    inner
        .split('\n')
        .map(|line| LINE_DECORATION.replace(line, ""))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Build the content node for a comment.
///
/// The start is moved past the opener; the end stays at the comment's end.
pub fn build_str_node(comment: &RawCommentMatch) -> StrNode {
    let ExtractedContent {
        content,
        prefix_len,
    } = extract_content(&comment.text);

    let range = TextRange::new(comment.start_byte + prefix_len, comment.end_byte);
    let loc = Location::new(
        Position::new(comment.start_point.row + 1, comment.start_point.column + prefix_len),
        Position::new(comment.end_point.row + 1, comment.end_point.column),
    );

    StrNode::new(content, range, loc)
}

/// Build the paragraph node for a comment, or `None` if it is not KDoc.
pub fn build_paragraph_node(comment: &RawCommentMatch) -> Option<ParagraphNode> {
    if !is_doc_comment(&comment.text) {
        return None;
    }

    let content = build_str_node(comment);
    Some(ParagraphNode::new(comment.text.clone(), content))
}
