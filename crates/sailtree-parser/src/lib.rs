//! Sailtree Parser
//!
//! The incremental lexer/parser pair for sailfish templates. A template
//! interleaves literal HTML text with `<% ... %>` code blocks; this crate
//! produces a concrete syntax tree classifying every span as text, a code
//! block with its directive flavor, a comment, or the document root.
//!
//! # Overview
//!
//! The parser drives the lexer: it requests one token at a time in one of
//! two start states, depending on whether the cursor sits inside a code
//! block. Errors are grammatical, never fatal; the tree always covers the
//! entire input.
//!
//! # Example
//!
//! ```
//! use sailtree_parser::Parser;
//!
//! let mut parser = Parser::new();
//! let tree = parser.parse("a<%= b %>c");
//! assert_eq!(
//!     tree.to_sexp(),
//!     "(document (html_part) (sailfish_part (rust_code)) (html_part))"
//! );
//! ```

pub mod incremental;
pub mod language;
pub mod lexer;
pub mod tree;

pub use incremental::{RangeOracle, ReuseOracle};
pub use language::{language, Language};
pub use lexer::{lex, Cursor, LexMode, Lexer, LexerDriver, Token, DIRECTIVE_BYTES};
pub use tree::{Node, Tree};

use log::{debug, trace};
use sailtree_core::{InputEdit, Span, Symbol};
use std::collections::VecDeque;

/// States of the push-down automaton.
///
/// The state determines which lexer start state the next token request
/// uses; [`language()`] publishes the same mapping by numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Collecting document nodes in text context
    Document = 0,
    /// After a directive, expecting the code body
    BlockCode = 1,
    /// After the code body, expecting `%>`
    BlockClose = 2,
}

impl ParseState {
    /// The lexer start state this parse state requests tokens in.
    pub fn lex_mode(self) -> LexMode {
        match self {
            ParseState::Document => LexMode::Text,
            ParseState::BlockCode | ParseState::BlockClose => LexMode::Code,
        }
    }
}

/// Parser for sailfish template documents.
///
/// A parser instance may be reused across documents but is not safe for
/// cross-thread mutation; run one instance per thread.
#[derive(Debug, Default)]
pub struct Parser;

impl Parser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse a complete document.
    pub fn parse(&mut self, source: &str) -> Tree {
        self.parse_bytes(source.as_bytes())
    }

    /// Parse a complete document from raw bytes.
    pub fn parse_bytes(&mut self, source: &[u8]) -> Tree {
        let children = parse_tail(source, 0, Vec::new(), VecDeque::new());
        build_tree(children, source.len())
    }

    /// Reparse after an edit, reusing unchanged subtrees of `old_tree`.
    ///
    /// `old_tree` must be the parse of the pre-edit source and `source`
    /// the post-edit bytes. The result is structurally identical to a
    /// from-scratch parse of `source`.
    pub fn reparse(&mut self, source: &str, old_tree: &Tree, edit: InputEdit) -> Tree {
        self.reparse_with_oracle(source, old_tree, edit, &RangeOracle)
    }

    /// Reparse with a caller-supplied reusable-subtree oracle.
    pub fn reparse_with_oracle(
        &mut self,
        source: &str,
        old_tree: &Tree,
        edit: InputEdit,
        oracle: &dyn ReuseOracle,
    ) -> Tree {
        incremental::reparse(source.as_bytes(), old_tree, edit, oracle)
    }
}

pub(crate) fn build_tree(children: Vec<Node>, source_len: usize) -> Tree {
    let mut root = Node::interior(Symbol::Document, children, false);
    root.span = Span::new(0, source_len);
    root.padding = Span::empty(0);
    Tree::new(root, source_len)
}

/// Parse from `offset` to end of input, appending onto `children`.
///
/// `suffix` holds reusable post-edit nodes in source order (empty for a
/// full parse). Whenever the cursor reaches the front candidate's start at
/// a document boundary, the whole suffix is spliced in and parsing stops;
/// candidates the cursor lexes past are dropped.
pub(crate) fn parse_tail(
    source: &[u8],
    offset: usize,
    mut children: Vec<Node>,
    mut suffix: VecDeque<Node>,
) -> Vec<Node> {
    let lexer = Lexer::new(source);
    let mut cursor = offset;
    let mut state = ParseState::Document;
    // Children of the block currently being assembled.
    let mut pending: Vec<Node> = Vec::new();

    loop {
        if state == ParseState::Document {
            while suffix
                .front()
                .map_or(false, |n| n.padded_span().start < cursor)
            {
                let dropped = suffix.pop_front();
                trace!("dropped overrun reuse candidate {:?}", dropped.map(|n| n.kind()));
            }
            if suffix
                .front()
                .map_or(false, |n| n.padded_span().start == cursor)
            {
                debug!("splicing {} reused nodes at byte {}", suffix.len(), cursor);
                children.extend(suffix.drain(..));
                return children;
            }
        }

        let tok = lexer.token_at(cursor, state.lex_mode());
        trace!("{:?}: {} at [{}, {})", state, tok.symbol, tok.span.start, tok.span.end);
        cursor = tok.resume_at();

        match (state, tok.symbol) {
            (ParseState::Document, Symbol::HtmlPart) => {
                push_text(&mut children, tok);
            }
            (ParseState::Document, Symbol::Comment) => {
                children.push(comment_node(source, tok));
            }
            (ParseState::Document, Symbol::Directive) => {
                pending.push(Node::leaf(tok.symbol, tok.padding, tok.span));
                state = ParseState::BlockCode;
            }
            (ParseState::Document, Symbol::End) => {
                return children;
            }
            (ParseState::BlockCode, Symbol::RustCode) => {
                pending.push(Node::leaf(tok.symbol, tok.padding, tok.span));
                state = ParseState::BlockClose;
            }
            (ParseState::BlockCode, Symbol::Close) => {
                // Empty code body: `<%=%>` and friends.
                let at = tok.padded_span().start;
                pending.push(Node::leaf(
                    Symbol::RustCode,
                    Span::empty(at),
                    Span::empty(at),
                ));
                pending.push(Node::leaf(tok.symbol, tok.padding, tok.span));
                children.push(Node::interior(
                    Symbol::SailfishPart,
                    std::mem::take(&mut pending),
                    false,
                ));
                state = ParseState::Document;
            }
            (ParseState::BlockClose, Symbol::Close) => {
                pending.push(Node::leaf(tok.symbol, tok.padding, tok.span));
                children.push(Node::interior(
                    Symbol::SailfishPart,
                    std::mem::take(&mut pending),
                    false,
                ));
                state = ParseState::Document;
            }
            (ParseState::BlockCode, Symbol::End) => {
                debug!("missing close after directive; synthesizing at EOF");
                pending.push(Node::leaf(
                    Symbol::RustCode,
                    Span::empty(cursor),
                    Span::empty(cursor),
                ));
                pending.push(Node::error_at(cursor));
                children.push(Node::interior(
                    Symbol::SailfishPart,
                    std::mem::take(&mut pending),
                    true,
                ));
                return children;
            }
            (ParseState::BlockClose, Symbol::End) => {
                debug!("missing close after code body; synthesizing at EOF");
                pending.push(Node::error_at(cursor));
                children.push(Node::interior(
                    Symbol::SailfishPart,
                    std::mem::take(&mut pending),
                    true,
                ));
                return children;
            }
            (st, sym) => {
                // RECOVER: skip the offending byte and retry in the same
                // mode. Unreachable with the shipped lexer, which only
                // produces terminals each state accepts.
                debug!("recover: unexpected {} in {:?}", sym, st);
                cursor = tok.padded_span().start + 1;
            }
        }
    }
}

/// Append a text token, merging with an adjacent text leaf so no two
/// neighbors are both text.
fn push_text(children: &mut Vec<Node>, tok: Token) {
    if let Some(last) = children.last_mut() {
        if last.symbol() == Symbol::HtmlPart && last.span().end == tok.padding.start {
            last.extend_to(tok.span.end);
            return;
        }
    }
    children.push(Node::leaf(tok.symbol, tok.padding, tok.span));
}

/// Build a comment node, flagging a body that ran to EOF without `%>`.
fn comment_node(source: &[u8], tok: Token) -> Node {
    let mut node = Node::leaf(tok.symbol, tok.padding, tok.span);
    let span = tok.span;
    let terminated = span.len() >= 5 && source[span.end - 2..span.end] == *b"%>";
    if !terminated {
        node.children.push(Node::error_at(span.end));
        node.error = true;
    }
    node
}
