//! KDoc processor for Kotlin sources.

use std::path::Path;

use tracing::debug;

use crate::ast::DocumentNode;
use crate::document::convert;
use crate::parser::languages::kotlin;
use crate::parser::{order_matches, CommentSource, ParseError};

use super::{LintMessage, PostProcessResult, Processor};

/// File path reported when the host supplies none.
pub const DEFAULT_FILE_PATH: &str = "<kotlin>";

/// Extracts KDoc comments from Kotlin files.
///
/// Owns one comment source (parser plus compiled query) for its lifetime.
pub struct KDocProcessor {
    source: Box<dyn CommentSource>,
    default_file_path: String,
}

impl KDocProcessor {
    pub const EXTENSIONS: &'static [&'static str] = kotlin::EXTENSIONS;

    /// Create a processor backed by the Kotlin tree-sitter grammar.
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self::with_source(Box::new(kotlin::new_source()?)))
    }

    /// Create a processor over any comment source.
    pub fn with_source(source: Box<dyn CommentSource>) -> Self {
        Self {
            source,
            default_file_path: DEFAULT_FILE_PATH.to_string(),
        }
    }

    /// Override the placeholder path used when post-processing without a path.
    pub fn default_file_path(mut self, path: impl Into<String>) -> Self {
        self.default_file_path = path.into();
        self
    }
}

impl Processor for KDocProcessor {
    fn name(&self) -> &str {
        "kdoc"
    }

    fn available_extensions(&self) -> &'static [&'static str] {
        Self::EXTENSIONS
    }

    fn pre_process(&self, text: &str, file_path: Option<&Path>) -> Result<DocumentNode, ParseError> {
        let matches = order_matches(self.source.comments(text)?);
        let doc = convert(&matches, text);

        debug!(
            path = ?file_path,
            language = self.source.language(),
            paragraphs = doc.children.len(),
            "pre-processed"
        );

        Ok(doc)
    }

    fn post_process(&self, messages: Vec<LintMessage>, file_path: Option<&str>) -> PostProcessResult {
        PostProcessResult {
            messages,
            file_path: file_path.unwrap_or(self.default_file_path.as_str()).to_string(),
        }
    }
}
