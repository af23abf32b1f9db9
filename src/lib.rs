//! # seqrex
//!
//! A regex-inspired pattern-matching engine over arbitrary-typed, ordered
//! sequences (`&[T]`), not just strings. A [`Pattern`] compiles once into a
//! read-only graph and is cheaply cloned and shared across threads;
//! searching an input borrows the pattern and owns its own cursor through a
//! [`Matcher`].
//!
//! ## Quick start
//!
//! ```rust
//! use seqrex::PatternBuilder;
//!
//! // 15, followed by one or more 42s.
//! let pattern = PatternBuilder::<i32>::new()
//!     .token(|n: &i32| *n == 15)
//!     .token(|n: &i32| *n == 42).one_or_more().unwrap()
//!     .build();
//!
//! let seq = [2, 15, 42, 42, 15];
//! let mut m = pattern.matcher(&seq);
//! assert!(m.find());
//! assert_eq!((m.start(), m.end()), (Some(1), Some(4)));
//! ```
//!
//! ## Groups and captures
//!
//! ```rust
//! use seqrex::PatternBuilder;
//!
//! let pattern = PatternBuilder::<char>::new()
//!     .group(|g| g.token_eq('a').token_eq('b').token_eq('c')).one_or_more().unwrap()
//!     .token_eq('d')
//!     .build();
//!
//! let seq: Vec<char> = "abcabcde".chars().collect();
//! let mut m = pattern.matcher(&seq);
//! assert!(m.find());
//! assert_eq!(m.groups().unwrap().len(), 2);
//! assert_eq!(m.groups().unwrap()[1], seqrex::Span::new(3, 6));
//! ```
//!
//! ## A worked search, replace, and split
//!
//! ```rust
//! use seqrex::PatternBuilder;
//!
//! let pattern = PatternBuilder::<i32>::new().token_eq(42).build();
//! let seq = [2, 15, 42, 42, 15];
//!
//! let all_starts: Vec<usize> = pattern
//!     .matcher(&seq)
//!     .find_iter()
//!     .map(|m| m.start())
//!     .collect();
//! assert_eq!(all_starts, vec![2, 3]);
//!
//! let replaced = pattern.matcher(&seq).replace_with(0);
//! assert_eq!(replaced, vec![2, 15, 0, 0, 15]);
//!
//! let pieces: Vec<&[i32]> = pattern.matcher(&seq).split().collect();
//! assert_eq!(pieces, vec![&seq[0..2], &seq[3..3], &seq[4..5]]);
//! ```

mod alternative;
mod builder;
mod capture;
mod group;
mod matcher;
mod matching;
mod node;
mod quantifier;

pub use builder::{PatternBuilder, PatternError};
pub use capture::Captures;
pub use matcher::{FindIter, Match, Matcher, SplitIter};
pub use node::Span;
pub use quantifier::{QuantifierBounds, MAX_REPEAT};

use std::sync::Arc;

use node::{Arena, NodeId};

/// A compiled, read-only pattern graph over element type `T`.
///
/// Cloning a `Pattern` is cheap (an `Arc` bump): the arena is never mutated
/// after [`PatternBuilder::build`], so independent [`Matcher`]s over the
/// same `Pattern` can run concurrently, each owning its own cursor.
pub struct Pattern<T> {
    inner: Arc<PatternInner<T>>,
}

struct PatternInner<T> {
    arena: Arena<T>,
    root: NodeId,
}

impl<T> Pattern<T> {
    pub(crate) fn from_parts(arena: Arena<T>, root: NodeId) -> Self {
        Pattern {
            inner: Arc::new(PatternInner { arena, root }),
        }
    }

    pub(crate) fn arena(&self) -> &Arena<T> {
        &self.inner.arena
    }

    pub(crate) fn root(&self) -> NodeId {
        self.inner.root
    }

    /// Opens a new [`Matcher`] over `items`, borrowing both this pattern and
    /// the input for the matcher's lifetime.
    pub fn matcher<'p, 't>(&'p self, items: &'t [T]) -> Matcher<'p, 't, T> {
        Matcher::new(self, items)
    }

    /// Renders the pattern graph for inspection: one line per node with its
    /// kind, tag, and quantifier bounds, indented by nesting depth. Useful
    /// for diagnosing why a hand-built pattern doesn't match as expected.
    pub fn describe(&self) -> String {
        node::describe(self.root(), self.arena())
    }
}

impl<T> Clone for Pattern<T> {
    fn clone(&self) -> Self {
        Pattern {
            inner: Arc::clone(&self.inner),
        }
    }
}
