//! Comment extraction from source text.
//!
//! This module provides:
//! - `RawCommentMatch`: a located multi-line comment as reported by a parser
//! - `CommentSource` trait: abstract "parse, then query comments" interface
//! - Tree-sitter implementation and per-language configurations

use std::collections::HashSet;

use thiserror::Error;

pub mod languages;
pub mod treesitter;

/// Errors from the parsing collaborator.
///
/// These are never produced by the comment classifier or document assembler;
/// they only come from setting up or running the underlying parser.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("incompatible grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("invalid comment query: {0}")]
    Query(#[from] tree_sitter::QueryError),
    #[error("grammar defines none of the comment node kinds {0:?}")]
    NoCommentNode(&'static [&'static str]),
    #[error("parser produced no tree")]
    NoTree,
    #[error("parser lock poisoned")]
    Poisoned,
}

/// A row/column point, both 0-indexed, as reported by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub row: usize,
    pub column: usize,
}

impl Point {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl From<tree_sitter::Point> for Point {
    fn from(p: tree_sitter::Point) -> Self {
        Self {
            row: p.row,
            column: p.column,
        }
    }
}

/// A multi-line comment located in the source text.
///
/// May or may not be a documentation comment; see
/// [`crate::comment::is_doc_comment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommentMatch {
    /// Comment text including the `/*` and `*/` delimiters.
    pub text: String,
    /// Start byte offset (0-indexed).
    pub start_byte: usize,
    /// End byte offset (exclusive).
    pub end_byte: usize,
    pub start_point: Point,
    pub end_point: Point,
}

impl RawCommentMatch {
    /// Build a match from a tree-sitter node over `source`.
    pub fn from_node(node: tree_sitter::Node, source: &[u8]) -> Self {
        Self {
            text: node.utf8_text(source).unwrap_or("").to_string(),
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_point: node.start_position().into(),
            end_point: node.end_position().into(),
        }
    }
}

/// Something that can turn source text into the list of its multi-line comments.
///
/// Implementations return every multi-line comment, documentation or not,
/// in any order and possibly with duplicates; [`order_matches`] normalizes
/// the result before it reaches the assembler.
pub trait CommentSource: Send + Sync {
    /// Return the language this source handles (e.g., "kotlin").
    fn language(&self) -> &str;

    /// Parse `source` and collect every multi-line comment in it.
    fn comments(&self, source: &str) -> Result<Vec<RawCommentMatch>, ParseError>;
}

/// Deduplicate matches by start offset (first occurrence wins) and sort
/// them ascending by start offset.
pub fn order_matches(matches: Vec<RawCommentMatch>) -> Vec<RawCommentMatch> {
    let mut seen = HashSet::new();
    let mut unique: Vec<RawCommentMatch> = matches
        .into_iter()
        .filter(|m| seen.insert(m.start_byte))
        .collect();
    unique.sort_by_key(|m| m.start_byte);
    unique
}
