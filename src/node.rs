//! The pattern graph: node storage, edges, and the tagged node-kind union.
//!
//! A compiled [`crate::Pattern`] is an arena of [`Node`]s addressed by
//! [`NodeId`]. `next`/`previous` model the owning horizontal chain; `upstream`
//! /`downstream` are non-owning reentry edges used once a [`GroupNode`]'s
//! inner chain runs out of siblings. Keeping everything in one arena, as
//! recommended for single-owner languages, means these back-edges never need
//! a second owner: they're just another `Option<NodeId>`.

use std::fmt;
use std::sync::Arc;

/// Index into a [`crate::Pattern`]'s node arena.
pub(crate) type NodeId = usize;

/// A user predicate over one element of the input sequence.
pub(crate) type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// A half-open span `[start, end)` into the input sequence.
///
/// Index `0` of [`crate::Match::groups`] is always the whole match; the
/// remaining entries are capture groups, sorted by ascending `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Edges and quantifier/anchor attributes shared by every node kind.
#[derive(Clone)]
pub(crate) struct NodeHeader {
    pub next: Option<NodeId>,
    pub previous: Option<NodeId>,
    pub upstream: Option<NodeId>,
    pub downstream: Option<NodeId>,
    pub min: usize,
    pub max: usize,
    pub must_be_first: bool,
    pub must_be_last: bool,
    pub tag: Option<String>,
}

impl NodeHeader {
    pub fn new() -> Self {
        NodeHeader {
            next: None,
            previous: None,
            upstream: None,
            downstream: None,
            min: 1,
            max: 1,
            must_be_first: false,
            must_be_last: false,
            tag: None,
        }
    }
}

/// Wraps an `entry` sub-graph as a single capturing unit.
pub(crate) struct GroupNode {
    pub entry: NodeId,
}

/// An ordered list of alternative sub-patterns, tried in declaration order.
pub(crate) struct AlternativeNode {
    pub alternatives: Vec<NodeId>,
}

/// The tagged union of the three pattern node kinds.
pub(crate) enum NodeKind<T> {
    Atomic(Predicate<T>),
    Group(GroupNode),
    Alternative(AlternativeNode),
}

pub(crate) struct Node<T> {
    pub header: NodeHeader,
    pub kind: NodeKind<T>,
}

impl<T> Node<T> {
    pub fn atomic(pred: Predicate<T>) -> Self {
        Node {
            header: NodeHeader::new(),
            kind: NodeKind::Atomic(pred),
        }
    }

    pub fn group(entry: NodeId) -> Self {
        Node {
            header: NodeHeader::new(),
            kind: NodeKind::Group(GroupNode { entry }),
        }
    }

    pub fn alternative(alternatives: Vec<NodeId>) -> Self {
        Node {
            header: NodeHeader::new(),
            kind: NodeKind::Alternative(AlternativeNode { alternatives }),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group(_))
    }
}

/// Arena of pattern nodes. Grows only at build time; read-only afterward.
pub(crate) type Arena<T> = Vec<Node<T>>;

/// Follows `next` edges from `start` to the last node with no successor.
pub(crate) fn chain_tail<T>(start: NodeId, arena: &Arena<T>) -> NodeId {
    let mut cur = start;
    while let Some(next) = arena[cur].header.next {
        cur = next;
    }
    cur
}

/// The effective `must_be_first` of a node: a [`GroupNode`] ORs its
/// own flag with its entry point's.
pub(crate) fn effective_must_be_first<T>(node_id: NodeId, arena: &Arena<T>) -> bool {
    let node = &arena[node_id];
    if node.header.must_be_first {
        return true;
    }
    match &node.kind {
        NodeKind::Group(g) => effective_must_be_first(g.entry, arena),
        _ => false,
    }
}

/// The effective `must_be_last` of a node: a [`GroupNode`] ORs its
/// own flag with the flag of the last node of its entry point's chain.
pub(crate) fn effective_must_be_last<T>(node_id: NodeId, arena: &Arena<T>) -> bool {
    let node = &arena[node_id];
    if node.header.must_be_last {
        return true;
    }
    match &node.kind {
        NodeKind::Group(g) => {
            let tail = chain_tail(g.entry, arena);
            effective_must_be_last(tail, arena)
        }
        _ => false,
    }
}

/// Renders the graph reachable from `root` as one line per node —
/// its kind, tag, and `(min, max)` quantifier bounds — indented by
/// nesting depth under groups and alternative branches. Untagged nodes
/// print `_` in place of a tag.
pub(crate) fn describe<T>(root: NodeId, arena: &Arena<T>) -> String {
    let mut out = String::new();
    describe_chain(Some(root), arena, 0, &mut out);
    out
}

fn describe_chain<T>(mut node_id: Option<NodeId>, arena: &Arena<T>, depth: usize, out: &mut String) {
    while let Some(id) = node_id {
        describe_node(id, arena, depth, out);
        node_id = arena[id].header.next;
    }
}

fn describe_node<T>(node_id: NodeId, arena: &Arena<T>, depth: usize, out: &mut String) {
    let node = &arena[node_id];
    let indent = "  ".repeat(depth);
    let tag = node.header.tag.as_deref().unwrap_or("_");
    let bounds = (node.header.min, node.header.max);
    match &node.kind {
        NodeKind::Atomic(_) => {
            out.push_str(&format!("{indent}atomic tag={tag} count=({}, {})\n", bounds.0, bounds.1));
        }
        NodeKind::Group(g) => {
            out.push_str(&format!("{indent}group tag={tag} count=({}, {})\n", bounds.0, bounds.1));
            describe_chain(Some(g.entry), arena, depth + 1, out);
        }
        NodeKind::Alternative(alt) => {
            out.push_str(&format!("{indent}alternative tag={tag} count=({}, {})\n", bounds.0, bounds.1));
            for &branch in &alt.alternatives {
                describe_node(branch, arena, depth + 1, out);
            }
        }
    }
}
