//! Prose document tree handed to the linting host.
//!
//! The tree is deliberately shallow:
//!
//! ```text
//! Document
//! └── Paragraph   (one per KDoc comment)
//!     └── Str     (the comment prose, decoration stripped)
//! ```
//!
//! Ranges are byte offsets into the original source (`[start, end)`).
//! Locations use 1-indexed lines and 0-indexed columns, which is what
//! prose linters expect.

mod check;

pub use check::{check, AstError};

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

/// Node type tag, serialized as the `type` field of every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeType {
    Document,
    Paragraph,
    Str,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Document => "Document",
            NodeType::Paragraph => "Paragraph",
            NodeType::Str => "Str",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Byte range `[start, end)` into the source text.
///
/// Serialized as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn empty() -> Self {
        Self { start: 0, end: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `other` lies entirely inside this range.
    pub fn contains(&self, other: &TextRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl Serialize for TextRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.start, self.end].serialize(serializer)
    }
}

/// A line/column position (line 1-indexed, column 0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Start and end positions of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub start: Position,
    pub end: Position,
}

impl Location {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Location of a document with no content: line 1, column 0 at both ends.
    pub const fn origin() -> Self {
        let origin = Position::new(1, 0);
        Self {
            start: origin,
            end: origin,
        }
    }
}

/// Leaf node carrying the prose of one documentation comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrNode {
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub raw: String,
    pub value: String,
    pub range: TextRange,
    pub loc: Location,
}

impl StrNode {
    pub fn new(value: String, range: TextRange, loc: Location) -> Self {
        Self {
            node_type: NodeType::Str,
            raw: value.clone(),
            value,
            range,
            loc,
        }
    }
}

/// One documentation comment as a block of prose.
///
/// A paragraph always has exactly one [`StrNode`] child, and shares its span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParagraphNode {
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// The full comment text, delimiters included.
    pub raw: String,
    pub range: TextRange,
    pub loc: Location,
    #[serde(rename = "children", serialize_with = "serialize_single_child")]
    content: StrNode,
}

impl ParagraphNode {
    /// Wrap a content node; the paragraph takes over its range and location.
    pub fn new(raw: String, content: StrNode) -> Self {
        Self {
            node_type: NodeType::Paragraph,
            raw,
            range: content.range,
            loc: content.loc,
            content,
        }
    }

    /// The sole child of this paragraph.
    pub fn content(&self) -> &StrNode {
        &self.content
    }

    /// Children as a slice, for uniform traversal. Always one element.
    pub fn children(&self) -> &[StrNode] {
        std::slice::from_ref(&self.content)
    }
}

fn serialize_single_child<S: Serializer>(child: &StrNode, serializer: S) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(1))?;
    seq.serialize_element(child)?;
    seq.end()
}

/// Root of the tree for one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentNode {
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// The whole source text.
    pub raw: String,
    pub range: TextRange,
    pub loc: Location,
    pub children: Vec<ParagraphNode>,
}

impl DocumentNode {
    /// A document with no paragraphs: zero-width range at the origin.
    pub fn empty(raw: String) -> Self {
        Self {
            node_type: NodeType::Document,
            raw,
            range: TextRange::empty(),
            loc: Location::origin(),
            children: Vec::new(),
        }
    }

    /// A document spanning from its first to its last paragraph.
    ///
    /// Falls back to [`DocumentNode::empty`] when `children` is empty.
    pub fn spanning(raw: String, children: Vec<ParagraphNode>) -> Self {
        let (first, last) = match (children.first(), children.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Self::empty(raw),
        };

        let range = TextRange::new(first.range.start, last.range.end);
        let loc = Location::new(first.loc.start, last.loc.end);

        Self {
            node_type: NodeType::Document,
            raw,
            range,
            loc,
            children,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Iterate over the prose of every paragraph in source order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|p| p.content().value.as_str())
    }
}
