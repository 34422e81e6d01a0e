//! Tree-sitter based comment source.
//!
//! The parser and the compiled comment query are created once per instance
//! and reused for every file. `tree_sitter::Parser` is not `Sync`, so it sits
//! behind a mutex; the query is only ever read.

use std::sync::Mutex;

use streaming_iterator::StreamingIterator;
use tracing::debug;
use tree_sitter::{Language, Parser as TsParser, Query, QueryCursor};

use super::{CommentSource, ParseError, RawCommentMatch};

/// Configuration for a tree-sitter comment source.
#[derive(Clone)]
pub struct Config {
    /// The tree-sitter language
    pub language: Language,
    /// Language name (e.g., "kotlin")
    pub language_name: &'static str,
    /// Node kinds that may name a multi-line comment in this grammar.
    /// The first one the grammar defines is queried.
    pub comment_kinds: &'static [&'static str],
    /// Capture name used in the generated query
    pub comment_capture: &'static str,
}

impl Config {
    /// Pick the comment node kind this grammar actually defines.
    fn resolve_comment_kind(&self) -> Result<&'static str, ParseError> {
        self.comment_kinds
            .iter()
            .copied()
            .find(|kind| self.language.id_for_node_kind(kind, true) != 0)
            .ok_or(ParseError::NoCommentNode(self.comment_kinds))
    }

    /// Build the query pattern matching every multi-line comment node.
    pub fn comment_query(&self) -> Result<String, ParseError> {
        let kind = self.resolve_comment_kind()?;
        Ok(format!("({}) @{}", kind, self.comment_capture))
    }
}

/// Comment source backed by a tree-sitter grammar.
pub struct TreeSitterCommentSource {
    config: Config,
    parser: Mutex<TsParser>,
    query: Query,
    capture_index: u32,
}

impl TreeSitterCommentSource {
    /// Create a comment source, compiling the parser and query up front.
    pub fn new(config: Config) -> Result<Self, ParseError> {
        let mut parser = TsParser::new();
        parser.set_language(&config.language)?;

        let pattern = config.comment_query()?;
        let query = Query::new(&config.language, &pattern)?;
        let capture_index = query
            .capture_index_for_name(config.comment_capture)
            .unwrap_or(0);

        debug!(language = config.language_name, %pattern, "compiled comment query");

        Ok(Self {
            config,
            parser: Mutex::new(parser),
            query,
            capture_index,
        })
    }
}

impl CommentSource for TreeSitterCommentSource {
    fn language(&self) -> &str {
        self.config.language_name
    }

    fn comments(&self, source: &str) -> Result<Vec<RawCommentMatch>, ParseError> {
        let bytes = source.as_bytes();
        let mut parser = self.parser.lock().map_err(|_| ParseError::Poisoned)?;
        let tree = parser.parse(bytes, None).ok_or(ParseError::NoTree)?;

        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.query, tree.root_node(), bytes);

        let mut comments = Vec::new();
        while let Some(m) = matches.next() {
            for capture in m.captures {
                if capture.index == self.capture_index {
                    comments.push(RawCommentMatch::from_node(capture.node, bytes));
                }
            }
        }

        debug!(
            language = self.config.language_name,
            count = comments.len(),
            has_errors = tree.root_node().has_error(),
            "collected multi-line comments"
        );

        Ok(comments)
    }
}
