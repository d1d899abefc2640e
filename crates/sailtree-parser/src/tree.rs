//! The concrete syntax tree produced by the parser.
//!
//! Nodes reference the source by byte range and never own text; the source
//! buffer must outlive any slicing done through [`Node::text`]. Hidden
//! auxiliary symbols (`_node`, `document_repeat1`) are collapsed during
//! parsing and never materialize as nodes.

use sailtree_core::{Span, Symbol};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt::Write as _;

/// A node in the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) symbol: Symbol,
    pub(crate) span: Span,
    pub(crate) padding: Span,
    pub(crate) error: bool,
    pub(crate) children: Vec<Node>,
}

impl Node {
    /// A leaf covering `span`, with `padding` bytes absorbed before it.
    pub(crate) fn leaf(symbol: Symbol, padding: Span, span: Span) -> Self {
        Self {
            symbol,
            span,
            padding,
            error: false,
            children: Vec::new(),
        }
    }

    /// A zero-width error marker at `offset`.
    pub(crate) fn error_at(offset: usize) -> Self {
        Self {
            symbol: Symbol::Error,
            span: Span::empty(offset),
            padding: Span::empty(offset),
            error: true,
            children: Vec::new(),
        }
    }

    /// An interior node spanning its children.
    pub(crate) fn interior(symbol: Symbol, children: Vec<Node>, error: bool) -> Self {
        let span = match (children.first(), children.last()) {
            (Some(first), Some(last)) => {
                Span::new(first.padded_span().start, last.span.end)
            }
            _ => Span::empty(0),
        };
        Self {
            symbol,
            span,
            padding: Span::empty(span.start),
            error,
            children,
        }
    }

    /// The grammar symbol of this node.
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// The published name of this node's symbol.
    pub fn kind(&self) -> &'static str {
        self.symbol.name()
    }

    /// Content byte range.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Byte range including leading absorbed bytes (the `<%` opener for a
    /// directive leaf).
    pub fn padded_span(&self) -> Span {
        Span::new(self.padding.start, self.span.end)
    }

    /// First content byte.
    pub fn start_byte(&self) -> usize {
        self.span.start
    }

    /// One past the last content byte.
    pub fn end_byte(&self) -> usize {
        self.span.end
    }

    /// Whether this node is the synthesized error marker.
    pub fn is_error(&self) -> bool {
        self.symbol == Symbol::Error
    }

    /// Whether this node or any descendant is erroneous.
    pub fn has_error(&self) -> bool {
        self.error || self.children.iter().any(Node::has_error)
    }

    /// Whether hosts can query this node by name.
    pub fn is_named(&self) -> bool {
        self.symbol.is_named()
    }

    /// Whether this node appears in rendered trees.
    pub fn is_visible(&self) -> bool {
        self.symbol.is_visible()
    }

    /// All children, in source order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Number of children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// The `i`th child, if any.
    pub fn child(&self, i: usize) -> Option<&Node> {
        self.children.get(i)
    }

    /// Children that are both named and visible.
    pub fn named_children(&self) -> impl Iterator<Item = &Node> {
        self.children
            .iter()
            .filter(|c| c.is_named() && c.is_visible())
    }

    /// Slice the node's content out of `source`.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.start..self.span.end]
    }

    /// Grow a text leaf to cover up to `end` (adjacent-run merging).
    pub(crate) fn extend_to(&mut self, end: usize) {
        debug_assert!(self.symbol == Symbol::HtmlPart);
        self.span.end = end;
    }

    /// The node with all ranges moved by `delta` bytes.
    pub(crate) fn shifted(&self, delta: isize) -> Node {
        Node {
            symbol: self.symbol,
            span: self.span.shifted(delta),
            padding: self.padding.shifted(delta),
            error: self.error,
            children: self.children.iter().map(|c| c.shifted(delta)).collect(),
        }
    }

    /// Render as an s-expression over named visible nodes, with `(ERROR)`
    /// markers for synthesized nodes.
    pub fn to_sexp(&self) -> String {
        let mut out = String::new();
        self.write_sexp(&mut out);
        out
    }

    fn write_sexp(&self, out: &mut String) {
        if self.is_error() {
            out.push_str("(ERROR)");
            return;
        }
        if !(self.is_named() && self.is_visible()) {
            return;
        }
        out.push('(');
        out.push_str(self.kind());
        for child in &self.children {
            let mark = out.len();
            out.push(' ');
            let before = out.len();
            child.write_sexp(out);
            if out.len() == before {
                out.truncate(mark);
            }
        }
        out.push(')');
    }

    fn write_ranges(&self, out: &mut String, depth: usize, spans: bool) {
        if self.is_visible() || self.is_error() {
            for _ in 0..depth {
                out.push_str("  ");
            }
            if spans {
                let _ = writeln!(out, "{} [{}, {})", self.kind(), self.span.start, self.span.end);
            } else {
                let _ = writeln!(out, "{}", self.kind());
            }
            for child in &self.children {
                child.write_ranges(out, depth + 1, spans);
            }
        } else {
            for child in &self.children {
                child.write_ranges(out, depth, spans);
            }
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("Node", 5)?;
        st.serialize_field("kind", self.kind())?;
        st.serialize_field("start", &self.span.start)?;
        st.serialize_field("end", &self.span.end)?;
        st.serialize_field("error", &self.error)?;
        st.serialize_field("children", &self.children)?;
        st.end()
    }
}

/// A parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    root: Node,
    source_len: usize,
}

impl Tree {
    pub(crate) fn new(root: Node, source_len: usize) -> Self {
        Self { root, source_len }
    }

    /// The document root.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Length in bytes of the source the tree was built from.
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    /// Whether any node in the tree is erroneous.
    pub fn has_error(&self) -> bool {
        self.root.has_error()
    }

    /// Render the whole tree as an s-expression.
    pub fn to_sexp(&self) -> String {
        self.root.to_sexp()
    }

    /// Render an indented listing of visible nodes, optionally with byte
    /// ranges.
    pub fn ranges(&self, spans: bool) -> String {
        let mut out = String::new();
        self.root.write_ranges(&mut out, 0, spans);
        out
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}
