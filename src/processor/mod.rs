//! Host-facing processor interface.
//!
//! A linting host drives a processor in two steps:
//! 1. `pre_process`: source text -> prose document tree
//! 2. `post_process`: the host's messages -> messages tagged with a file path
//!
//! Processors are looked up by file extension through a global registry.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::ast::DocumentNode;
use crate::parser::ParseError;

mod kdoc;

pub use kdoc::{KDocProcessor, DEFAULT_FILE_PATH};

/// Severity of a lint message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A finding reported by the host against a document tree.
///
/// Processors pass these through without inspecting them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintMessage {
    pub rule_id: String,
    pub message: String,
    /// Byte offset into the original source.
    pub index: usize,
    /// Line (1-indexed).
    pub line: usize,
    /// Column (0-indexed).
    pub column: usize,
    pub severity: Severity,
}

/// Messages for one file, ready to hand back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostProcessResult {
    pub messages: Vec<LintMessage>,
    pub file_path: String,
}

/// A source-language adapter for a prose linting host.
pub trait Processor: Send + Sync {
    /// Return the processor name (e.g., "kdoc").
    fn name(&self) -> &str;

    /// File extensions handled, with the leading dot (e.g., ".kt").
    fn available_extensions(&self) -> &'static [&'static str];

    /// Turn source text into a prose document tree.
    ///
    /// `file_path` is informational only. Errors come from the parser layer
    /// and are passed through unchanged.
    fn pre_process(&self, text: &str, file_path: Option<&Path>) -> Result<DocumentNode, ParseError>;

    /// Attach a file path to the host's messages, leaving them untouched.
    fn post_process(&self, messages: Vec<LintMessage>, file_path: Option<&str>) -> PostProcessResult;
}

/// Factory function type for creating processor instances.
pub type ProcessorFactory = fn() -> Result<Box<dyn Processor>, ParseError>;

lazy_static::lazy_static! {
    /// Global processor registry mapping file extensions to processor factories.
    static ref REGISTRY: RwLock<HashMap<String, ProcessorFactory>> = RwLock::new(HashMap::new());
}

/// Register a processor factory for a file extension.
/// Extension should include the dot (e.g., ".kt").
pub fn register(ext: &str, factory: ProcessorFactory) {
    let mut registry = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    registry.insert(ext.to_string(), factory);
}

/// Create a processor for the given file extension.
/// Returns `Ok(None)` if no processor is registered for the extension.
pub fn for_extension(ext: &str) -> Result<Option<Box<dyn Processor>>, ParseError> {
    let factory = {
        let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
        registry.get(ext).copied()
    };
    factory.map(|factory| factory()).transpose()
}

/// Return all registered file extensions, sorted.
pub fn supported_extensions() -> Vec<String> {
    let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    let mut extensions: Vec<String> = registry.keys().cloned().collect();
    extensions.sort();
    extensions
}

fn new_kdoc_processor() -> Result<Box<dyn Processor>, ParseError> {
    Ok(Box::new(KDocProcessor::new()?))
}

/// Register every built-in processor.
pub fn register_all() {
    for ext in KDocProcessor::EXTENSIONS {
        register(ext, new_kdoc_processor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockProcessor;

    impl Processor for MockProcessor {
        fn name(&self) -> &str {
            "mock"
        }

        fn available_extensions(&self) -> &'static [&'static str] {
            &[".mock"]
        }

        fn pre_process(&self, text: &str, _file_path: Option<&Path>) -> Result<DocumentNode, ParseError> {
            Ok(DocumentNode::empty(text.to_string()))
        }

        fn post_process(&self, messages: Vec<LintMessage>, file_path: Option<&str>) -> PostProcessResult {
            PostProcessResult {
                messages,
                file_path: file_path.unwrap_or("<mock>").to_string(),
            }
        }
    }

    fn mock_factory() -> Result<Box<dyn Processor>, ParseError> {
        Ok(Box::new(MockProcessor))
    }

    #[test]
    fn test_registry() {
        register(".mock", mock_factory);

        let processor = for_extension(".mock").unwrap();
        assert!(processor.is_some());

        let processor = processor.unwrap();
        assert_eq!(processor.name(), "mock");

        let doc = processor.pre_process("text", None).unwrap();
        assert!(doc.is_empty());
        assert!(supported_extensions().contains(&".mock".to_string()));
    }

    #[test]
    fn test_unregistered_extension() {
        let processor = for_extension(".unknown").unwrap();
        assert!(processor.is_none());
    }

    #[test]
    fn test_register_all_includes_kotlin() {
        register_all();

        let extensions = supported_extensions();
        assert!(extensions.contains(&".kt".to_string()));
        assert!(extensions.contains(&".kts".to_string()));

        let processor = for_extension(".kts").unwrap().unwrap();
        assert_eq!(processor.name(), "kdoc");
    }

    #[test]
    fn test_message_serialization() {
        let message = LintMessage {
            rule_id: "spelling".to_string(),
            message: "Unknown word".to_string(),
            index: 7,
            line: 2,
            column: 4,
            severity: Severity::Warning,
        };

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["ruleId"], "spelling");
        assert_eq!(json["severity"], "warning");
    }
}
