//! Output formatting for extracted documents.
//!
//! Supports two output formats:
//! - Pretty: colored terminal listing of every KDoc paragraph
//! - JSON: the full document trees, for feeding a linting host

use colored::*;
use serde::Serialize;
use std::io::Write;

use crate::ast::DocumentNode;
use crate::processor::{LintMessage, PostProcessResult, Severity};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Pretty,
    Json,
}

/// Everything produced for one input file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub file_path: String,
    pub document: DocumentNode,
    pub messages: Vec<LintMessage>,
}

impl FileReport {
    /// Combine a document with its post-processed messages.
    pub fn new(document: DocumentNode, post: PostProcessResult) -> Self {
        Self {
            file_path: post.file_path,
            document,
            messages: post.messages,
        }
    }

    /// Whether any message is an error.
    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.severity == Severity::Error)
    }
}

/// Write reports as a JSON array.
pub fn write_json<W: Write>(out: &mut W, reports: &[FileReport]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, reports)?;
    writeln!(out)?;
    Ok(())
}

/// Write reports in human-readable form.
pub fn write_pretty<W: Write>(out: &mut W, reports: &[FileReport]) -> anyhow::Result<()> {
    let mut paragraphs = 0;

    for report in reports {
        writeln!(
            out,
            "{} ({} KDoc)",
            report.file_path.bold(),
            report.document.children.len()
        )?;

        for paragraph in &report.document.children {
            let content = paragraph.content();
            writeln!(out, "  {}", content.loc.start.to_string().cyan())?;
            if content.value.is_empty() {
                writeln!(out, "    {}", "(empty)".dimmed())?;
            }
            for line in content.value.lines() {
                writeln!(out, "    {}", line)?;
            }
        }

        for message in &report.messages {
            let severity = match message.severity {
                Severity::Error => message.severity.to_string().red(),
                Severity::Warning => message.severity.to_string().yellow(),
                Severity::Info => message.severity.to_string().blue(),
            };
            writeln!(
                out,
                "  {} {}:{} {} [{}]",
                severity, message.line, message.column, message.message, message.rule_id
            )?;
        }

        paragraphs += report.document.children.len();
    }

    writeln!(out)?;
    writeln!(
        out,
        "{} file(s), {} KDoc paragraph(s)",
        reports.len(),
        paragraphs
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Location, ParagraphNode, Position, StrNode, TextRange};

    fn sample_report() -> FileReport {
        let content = StrNode::new(
            "Adds numbers.\n@param a first".to_string(),
            TextRange::new(3, 40),
            Location::new(Position::new(2, 3), Position::new(5, 3)),
        );
        let paragraph = ParagraphNode::new("/** ... */".to_string(), content);
        let document = DocumentNode::spanning(" ".repeat(50), vec![paragraph]);
        FileReport::new(
            document,
            PostProcessResult {
                messages: Vec::new(),
                file_path: "src/Math.kt".to_string(),
            },
        )
    }

    #[test]
    fn test_write_json() {
        let mut out = Vec::new();
        write_json(&mut out, &[sample_report()]).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json[0]["filePath"], "src/Math.kt");
        assert_eq!(json[0]["document"]["type"], "Document");
        assert_eq!(
            json[0]["document"]["children"][0]["children"][0]["value"],
            "Adds numbers.\n@param a first"
        );
    }

    #[test]
    fn test_write_pretty() {
        colored::control::set_override(false);

        let mut out = Vec::new();
        write_pretty(&mut out, &[sample_report()]).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("src/Math.kt (1 KDoc)"));
        assert!(text.contains("  2:3"));
        assert!(text.contains("    @param a first"));
        assert!(text.contains("1 file(s), 1 KDoc paragraph(s)"));
    }

    #[test]
    fn test_has_errors() {
        let mut report = sample_report();
        assert!(!report.has_errors());

        report.messages.push(LintMessage {
            rule_id: "ast-check".to_string(),
            message: "broken".to_string(),
            index: 0,
            line: 1,
            column: 0,
            severity: Severity::Error,
        });
        assert!(report.has_errors());
    }
}
