//! kdoc-prose - KDoc extraction for prose linters.
//!
//! kdoc-prose finds the KDoc comments in Kotlin source text and exposes
//! their prose as a small document tree (Document -> Paragraph -> Str)
//! that spell checkers and style linters can analyze. Every node keeps
//! byte ranges and line/column locations into the original file, so
//! findings map straight back to the source.
//!
//! # Architecture
//!
//! - `parser`: tree-sitter comment sources behind the `CommentSource` trait
//! - `comment`: KDoc classification and decoration stripping
//! - `document`: assembles paragraphs into the document tree
//! - `ast`: node types and the structural checker
//! - `processor`: host-facing pre/post-processing interface and registry
//! - `config`, `report`, `cli`: the command-line front end
//!
//! # Adding a New Language
//!
//! Add a configuration in `src/parser/languages/`, implement `Processor`
//! for it, and register its extensions in `processor::register_all`.

pub mod ast;
pub mod cli;
pub mod comment;
pub mod config;
pub mod document;
pub mod parser;
pub mod processor;
pub mod report;

pub use ast::{DocumentNode, ParagraphNode, StrNode};
pub use comment::{extract_content, is_doc_comment};
pub use document::convert;
pub use parser::{CommentSource, ParseError, RawCommentMatch};
pub use processor::{for_extension, KDocProcessor, LintMessage, PostProcessResult, Processor};

/// Initialize all subsystems.
///
/// Call this once at startup.
pub fn init() {
    processor::register_all();
}
