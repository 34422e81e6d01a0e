//! Assembles the document tree from a file's comment matches.

use tracing::debug;

use crate::ast::{DocumentNode, ParagraphNode};
use crate::comment::{build_paragraph_node, is_doc_comment};
use crate::parser::RawCommentMatch;

/// Convert comment matches into a document node for `source`.
///
/// `matches` must already be deduplicated and sorted by start offset
/// (see [`crate::parser::order_matches`]); paragraphs keep that order.
/// Non-documentation comments are dropped. With no paragraphs left the
/// result is an empty, zero-width document.
pub fn convert(matches: &[RawCommentMatch], source: &str) -> DocumentNode {
    let doc_comments = matches.iter().filter(|m| is_doc_comment(&m.text));

    let children: Vec<ParagraphNode> = doc_comments.filter_map(build_paragraph_node).collect();

    debug!(
        comments = matches.len(),
        paragraphs = children.len(),
        "assembled document"
    );

    DocumentNode::spanning(source.to_string(), children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Position, TextRange};
    use crate::parser::Point;

    /// Build matches the way a parser would report them for `source`.
    fn matches_in(source: &str) -> Vec<RawCommentMatch> {
        let mut matches = Vec::new();
        let mut search_from = 0;
        while let Some(offset) = source[search_from..].find("/*") {
            let start = search_from + offset;
            let end = match source[start + 2..].find("*/") {
                Some(close) => start + 2 + close + 2,
                None => break,
            };
            matches.push(RawCommentMatch {
                text: source[start..end].to_string(),
                start_byte: start,
                end_byte: end,
                start_point: point_at(source, start),
                end_point: point_at(source, end),
            });
            search_from = end;
        }
        matches
    }

    fn point_at(source: &str, byte: usize) -> Point {
        let before = &source[..byte];
        let row = before.matches('\n').count();
        let column = byte - before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        Point::new(row, column)
    }

    #[test]
    fn test_single_doc_comment() {
        let source = "/**\n * Hello\n */\nfun main() {}\n";
        let doc = convert(&matches_in(source), source);

        assert_eq!(doc.children.len(), 1);
        assert_eq!(doc.children[0].content().value, "Hello");
        assert_eq!(doc.raw, source);
        assert_eq!(doc.range, TextRange::new(3, 16));
        assert_eq!(doc.loc.start, Position::new(1, 3));
        assert_eq!(doc.loc.end, Position::new(3, 3));
    }

    #[test]
    fn test_order_preserved_around_plain_comments() {
        let source = "/** one */\n/* plain */\n/*** banner ***/\n/** two */\n/* x */\n/** three */\n";
        let doc = convert(&matches_in(source), source);

        let texts: Vec<&str> = doc.texts().collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
        assert_eq!(doc.range.start, doc.children[0].range.start);
        assert_eq!(doc.range.end, doc.children[2].range.end);
        assert_eq!(doc.loc.end, doc.children[2].loc.end);
    }

    #[test]
    fn test_no_doc_comments_yields_empty_document() {
        let source = "// line\n/* block */\n/*** banner ***/\nfun main() {}\n";
        let doc = convert(&matches_in(source), source);

        assert!(doc.children.is_empty());
        assert_eq!(doc.range, TextRange::new(0, 0));
        assert_eq!(doc.loc.start, Position::new(1, 0));
        assert_eq!(doc.loc.end, Position::new(1, 0));
        assert_eq!(doc.raw, source);
    }

    #[test]
    fn test_empty_input() {
        let doc = convert(&[], "");
        assert!(doc.is_empty());
        assert_eq!(doc.range, TextRange::new(0, 0));
    }

    #[test]
    fn test_does_not_reorder_input() {
        let source = "/** a */\n/** b */\n";
        let mut matches = matches_in(source);
        matches.reverse();

        let doc = convert(&matches, source);
        let texts: Vec<&str> = doc.texts().collect();
        assert_eq!(texts, vec!["b", "a"]);
    }

    #[test]
    fn test_conversion_is_idempotent() {
        let source = "/**\n * First.\n */\nfun a() {}\n\n/** Second. */\nfun b() {}\n";
        let matches = matches_in(source);

        assert_eq!(convert(&matches, source), convert(&matches, source));
    }

    #[test]
    fn test_result_passes_ast_check() {
        let source = "/**\n * First.\n */\nfun a() {}\n/** */\nfun b() {}\n/**/\n";
        let doc = convert(&matches_in(source), source);

        assert_eq!(doc.children.len(), 3);
        assert_eq!(crate::ast::check(&doc), Ok(()));
    }
}
