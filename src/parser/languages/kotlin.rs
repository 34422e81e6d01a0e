//! Kotlin language configuration for tree-sitter parsing.

use crate::parser::treesitter::{Config, TreeSitterCommentSource};
use crate::parser::ParseError;

/// Node kinds for `/* ... */` comments across the Kotlin grammars.
///
/// The fwcd grammar calls the node `multiline_comment`; the
/// tree-sitter-grammars rewrite calls it `block_comment`.
const COMMENT_KINDS: &[&str] = &["multiline_comment", "block_comment"];

/// File extensions handled for Kotlin sources and scripts.
pub const EXTENSIONS: &[&str] = &[".kt", ".kts"];

/// Kotlin comment source configuration.
pub fn config() -> Config {
    Config {
        language: tree_sitter_kotlin_ng::LANGUAGE.into(),
        language_name: "kotlin",
        comment_kinds: COMMENT_KINDS,
        comment_capture: "comment",
    }
}

/// Create a new Kotlin comment source.
pub fn new_source() -> Result<TreeSitterCommentSource, ParseError> {
    TreeSitterCommentSource::new(config())
}
