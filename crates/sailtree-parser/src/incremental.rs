//! Incremental reparse after an edit.
//!
//! Block boundaries are anchored at the literal byte sequences `<%` and
//! `%>`, so a subtree whose bytes are untouched parses the same way
//! regardless of what changed around it. Reparse keeps document children
//! on both sides of the damaged interval: a prefix that ends before the
//! damage, and a suffix that is spliced back in once relexing reaches its
//! first node at a document boundary.

use crate::tree::{Node, Tree};
use crate::{build_tree, parse_tail};
use log::debug;
use sailtree_core::{InputEdit, Symbol};
use std::collections::VecDeque;

/// Host-supplied policy for reusing subtrees across an edit.
///
/// Nodes are judged in pre-edit coordinates. The default implementation,
/// [`RangeOracle`], derives its answers purely from byte ranges; a host
/// with richer damage information (e.g. batched edits) can narrow reuse
/// further, but must never widen it beyond these rules.
pub trait ReuseOracle {
    /// May `node`, ending at or before the damage, be kept as-is?
    fn reuse_prefix(&self, node: &Node, edit: &InputEdit) -> bool;

    /// May `node`, starting at or after the damage, anchor a splice?
    fn reuse_suffix(&self, node: &Node, edit: &InputEdit) -> bool;
}

/// Byte-range reuse rules derived from the grammar's anchoring.
#[derive(Debug, Default, Clone, Copy)]
pub struct RangeOracle;

impl ReuseOracle for RangeOracle {
    fn reuse_prefix(&self, node: &Node, edit: &InputEdit) -> bool {
        // Erroneous nodes ran to EOF and would absorb appended bytes.
        if node.has_error() {
            return false;
        }
        let end = node.padded_span().end;
        match node.symbol() {
            // A text run ends at a validated opener; the three opener
            // bytes after the run must also be untouched or the run could
            // now extend into the edit.
            Symbol::HtmlPart => end + 3 <= edit.start,
            _ => end <= edit.start,
        }
    }

    fn reuse_suffix(&self, node: &Node, edit: &InputEdit) -> bool {
        node.padded_span().start >= edit.old_end
    }
}

/// Reparse `source` (post-edit bytes) against `old_tree` (pre-edit parse).
pub(crate) fn reparse(
    source: &[u8],
    old_tree: &Tree,
    edit: InputEdit,
    oracle: &dyn ReuseOracle,
) -> Tree {
    let delta = edit.delta();
    let old_children = old_tree.root().children();

    let mut children: Vec<Node> = Vec::new();
    let mut idx = 0;
    while idx < old_children.len() && oracle.reuse_prefix(&old_children[idx], &edit) {
        children.push(old_children[idx].clone());
        idx += 1;
    }
    let anchor = children.last().map_or(0, |n| n.span().end);

    // The suffix must be a contiguous tail, so accepted nodes are gathered
    // back to front and abandoned at the first rejection.
    let mut suffix: VecDeque<Node> = VecDeque::new();
    for node in old_children[idx..].iter().rev() {
        if !oracle.reuse_suffix(node, &edit) {
            break;
        }
        suffix.push_front(node.shifted(delta));
    }

    debug!(
        "reparse: kept {} prefix node(s), relex from byte {}, {} suffix candidate(s)",
        children.len(),
        anchor,
        suffix.len()
    );

    let children = parse_tail(source, anchor, children, suffix);
    build_tree(children, source.len())
}
