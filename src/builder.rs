//! The fluent builder façade that wires a [`crate::Pattern`]'s graph.
//!
//! The construction surface is a thin adapter over the core graph — so this
//! module favors idiomatic, separately-named Rust methods (`token`,
//! `token_eq`, `group`, `or`, `or_eq`, `or_group`) over trying to overload a
//! single `token(...)` the way a host language with real overloading would.
//! The wiring underneath each of them (`append_as_sibling`, the alternation
//! merge) is the in-scope core and is identical regardless of which method
//! triggered it.
//!
//! Parallels `Pattern::new`'s validate-then-build shape and an append-style
//! chain construction for wiring nodes one at a time.

use std::fmt;
use std::sync::Arc;

use crate::alternative::merge_alternative;
use crate::group::wire_sibling_after;
use crate::node::{Arena, Node, NodeId, Predicate};
use crate::quantifier::{QuantifierBounds, MAX_REPEAT};
use crate::Pattern;

/// Build-time misuse. Runtime match failures never produce this type —
/// they're represented as `false`/`None`/empty iterators instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// A quantifier, `.tag()`, or `.ending()` was applied with no pending
    /// token, or `count(min, max)` was called with `min > max`.
    InvalidBuilderOp(String),
    /// Reserved for an alternative with zero branches. The builder's own
    /// `.or*()` methods always add exactly one branch per call, so this
    /// can't currently be produced through the public API; it's kept as an
    /// explicit variant rather than an `unreachable!()` so a future
    /// alternative-from-iterator constructor has somewhere to report it.
    EmptyTrailingAlternative,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::InvalidBuilderOp(msg) => write!(f, "invalid builder operation: {msg}"),
            PatternError::EmptyTrailingAlternative => {
                write!(f, "alternative has no branches")
            }
        }
    }
}

impl std::error::Error for PatternError {}

/// Fluent constructor for a [`crate::Pattern`] over element type `T`.
///
/// ```
/// use seqrex::PatternBuilder;
///
/// let pattern = PatternBuilder::<i32>::new()
///     .token(|n: &i32| *n == 15)
///     .token(|n: &i32| *n == 42).one_or_more().unwrap()
///     .build();
///
/// let seq = [2, 15, 42, 42, 15];
/// let mut m = pattern.matcher(&seq);
/// assert!(m.find());
/// assert_eq!((m.start(), m.end()), (Some(1), Some(4)));
/// ```
pub struct PatternBuilder<T> {
    arena: Arena<T>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    pending_first_anchor: bool,
    last_added: Option<NodeId>,
}

impl<T> Default for PatternBuilder<T> {
    fn default() -> Self {
        PatternBuilder {
            arena: Vec::new(),
            head: None,
            tail: None,
            pending_first_anchor: false,
            last_added: None,
        }
    }
}

impl<T: Send + Sync + 'static> PatternBuilder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `must_be_first` on the next token added. Has no effect
    /// if called again after a token has already been appended.
    pub fn beginning(mut self) -> Self {
        self.pending_first_anchor = true;
        self
    }

    /// A token whose predicate always matches.
    pub fn any(mut self) -> Self {
        let always: Predicate<T> = Arc::new(|_| true);
        self.push_atomic(always);
        self
    }

    /// A token matching one item via a user predicate.
    pub fn token(mut self, pred: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.push_atomic(Arc::new(pred));
        self
    }

    /// A nested group, built by a sub-builder closure.
    pub fn group(mut self, f: impl FnOnce(PatternBuilder<T>) -> PatternBuilder<T>) -> Self {
        let group_id = self.build_subgroup(f);
        self.append(group_id);
        self
    }

    /// Sets `must_be_last` on the last node added.
    pub fn ending(mut self) -> Result<Self, PatternError> {
        let last = self.require_pending("ending()")?;
        self.arena[last].header.must_be_last = true;
        Ok(self)
    }

    /// A debug label for the last node added.
    pub fn tag(mut self, label: impl Into<String>) -> Result<Self, PatternError> {
        let last = self.require_pending("tag()")?;
        self.arena[last].header.tag = Some(label.into());
        Ok(self)
    }

    /// Applies quantifier bounds `(min, max)` to the last node added.
    /// Fails if nothing is pending, or if `min > max`.
    pub fn count(mut self, min: usize, max: usize) -> Result<Self, PatternError> {
        let bounds = QuantifierBounds::range(min, max);
        if !bounds.is_valid() {
            return Err(PatternError::InvalidBuilderOp(format!(
                "count({min}, {max}): min must not exceed max"
            )));
        }
        let last = self.require_pending("count()")?;
        self.arena[last].header.min = bounds.min;
        self.arena[last].header.max = bounds.max;
        Ok(self)
    }

    /// `count(n, n)`.
    pub fn count_exact(self, n: usize) -> Result<Self, PatternError> {
        self.count(n, n)
    }

    /// `count(0, 1)`.
    pub fn zero_or_one(self) -> Result<Self, PatternError> {
        self.count(0, 1)
    }

    /// `count(0, MAX)`.
    pub fn zero_or_more(self) -> Result<Self, PatternError> {
        self.count(0, MAX_REPEAT)
    }

    /// `count(1, MAX)`.
    pub fn one_or_more(self) -> Result<Self, PatternError> {
        self.count(1, MAX_REPEAT)
    }

    /// Merges the pending token with a predicate alternative.
    pub fn or(mut self, pred: impl Fn(&T) -> bool + Send + Sync + 'static) -> Result<Self, PatternError> {
        self.arena.push(Node::atomic(Arc::new(pred)));
        let branch = self.arena.len() - 1;
        self.merge_or(branch)?;
        Ok(self)
    }

    /// Merges the pending token with a nested-pattern alternative.
    pub fn or_group(
        mut self,
        f: impl FnOnce(PatternBuilder<T>) -> PatternBuilder<T>,
    ) -> Result<Self, PatternError> {
        let group_id = self.build_subgroup(f);
        self.merge_or(group_id)?;
        Ok(self)
    }

    /// Finalizes the graph, wrapping the whole chain in an outer group so
    /// the whole match is always capture index 0.
    pub fn build(mut self) -> Pattern<T> {
        let entry = self.head.unwrap_or_else(|| {
            let always: Predicate<T> = Arc::new(|_| true);
            self.arena.push(Node::atomic(always));
            self.arena.len() - 1
        });
        self.arena.push(Node::group(entry));
        let root = self.arena.len() - 1;
        Pattern::from_parts(self.arena, root)
    }

    fn require_pending(&self, op: &str) -> Result<NodeId, PatternError> {
        self.last_added
            .ok_or_else(|| PatternError::InvalidBuilderOp(format!("{op} with no pending token")))
    }

    fn push_atomic(&mut self, pred: Predicate<T>) {
        self.arena.push(Node::atomic(pred));
        let id = self.arena.len() - 1;
        self.append(id);
    }

    /// `append_as_sibling`: attach `node_id` to the chain tail, set
    /// back-pointers, and wire any dangling group upstream through it.
    fn append(&mut self, node_id: NodeId) {
        if self.pending_first_anchor {
            self.arena[node_id].header.must_be_first = true;
            self.pending_first_anchor = false;
        }
        match self.tail {
            None => self.head = Some(node_id),
            Some(t) => {
                self.arena[t].header.next = Some(node_id);
                self.arena[node_id].header.previous = Some(t);
                wire_sibling_after(t, node_id, &mut self.arena);
            }
        }
        self.tail = Some(node_id);
        self.last_added = Some(node_id);
    }

    /// Builds a fresh [`crate::node::GroupNode`] from a sub-builder closure,
    /// sharing this builder's arena so every node lives in one place — the
    /// arena is the lifetime anchor. Returns the new
    /// group's node id without attaching it anywhere; callers decide
    /// whether to append it to the chain (`.group()`) or merge it as an
    /// alternative branch (`.or_group()`).
    fn build_subgroup(&mut self, f: impl FnOnce(PatternBuilder<T>) -> PatternBuilder<T>) -> NodeId {
        let sub_arena = std::mem::take(&mut self.arena);
        let sub = PatternBuilder {
            arena: sub_arena,
            head: None,
            tail: None,
            pending_first_anchor: false,
            last_added: None,
        };
        let built = f(sub);
        let mut arena = built.arena;
        let entry = built.head.unwrap_or_else(|| {
            let always: Predicate<T> = Arc::new(|_| true);
            arena.push(Node::atomic(always));
            arena.len() - 1
        });
        arena.push(Node::group(entry));
        let group_id = arena.len() - 1;
        self.arena = arena;
        group_id
    }

    /// `.or(X)`: replace the last chain node with `Alternative(last,
    /// branch)`, or extend an existing trailing alternative.
    fn merge_or(&mut self, branch: NodeId) -> Result<(), PatternError> {
        let tail = self.require_pending("or()")?;
        let alt_id = merge_alternative(tail, branch, &mut self.arena);
        if self.tail == Some(tail) {
            self.tail = Some(alt_id);
        }
        if self.head == Some(tail) {
            self.head = Some(alt_id);
        }
        self.last_added = Some(alt_id);
        Ok(())
    }
}

impl<T: PartialEq + Send + Sync + 'static> PatternBuilder<T> {
    /// A token matching one item by equality.
    pub fn token_eq(self, sample: T) -> Self {
        self.token(move |item: &T| *item == sample)
    }

    /// Merges the pending token with an equality alternative.
    pub fn or_eq(self, sample: T) -> Result<Self, PatternError> {
        self.or(move |item: &T| *item == sample)
    }
}
