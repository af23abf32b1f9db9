//! Capture accumulation and the public [`Captures`] view.
//!
//! Parallels a `Captures` type that stores `(start, end)` pairs indexed by
//! group number and exposes
//! `get`/`pos`/`len`. This crate's groups aren't identified by a fixed
//! index assigned at build time — groups here are defined purely by sort
//! order of their spans — so [`Captures`] here is a thin slice-indexing
//! wrapper over
//! [`crate::Match::groups`] rather than a name/index table.

use crate::node::Span;

/// Collects capture spans for one [`crate::matching::find_quantified`] call.
///
/// Only meaningful for a quantified node that is itself a `Group`: each
/// iteration of the greedy loop contributes that iteration's own span,
/// replacing the previous iteration's span ("last iteration wins"),
/// plus whatever nested captures the iteration's sub-match already carried.
/// For a non-group node, `self_is_group` is `false` and no self-span is ever
/// recorded — nested captures still pass through untouched, since an
/// alternative whose chosen branch is a group must still surface that
/// group's captures.
pub(crate) struct CaptureAccumulator {
    self_is_group: bool,
    captures: Vec<Span>,
    previous_self_span: Option<Span>,
}

impl CaptureAccumulator {
    pub fn new(self_is_group: bool) -> Self {
        CaptureAccumulator {
            self_is_group,
            captures: Vec::new(),
            previous_self_span: None,
        }
    }

    /// Record one greedy-loop iteration: `span` is this iteration's own
    /// match `[start, end)`; `nested` are the captures the iteration's
    /// sub-match already produced.
    pub fn push_iteration(&mut self, span: Span, nested: &[Span]) {
        if self.self_is_group {
            if let Some(prev) = self.previous_self_span {
                if let Some(pos) = self.captures.iter().position(|s| *s == prev) {
                    self.captures.remove(pos);
                }
            }
            self.captures.push(span);
            self.previous_self_span = Some(span);
        }
        self.captures.extend_from_slice(nested);
    }

    /// A read-only, sorted snapshot of the captures recorded so far, for the
    /// early-exit look-ahead test, which may need to inspect the
    /// in-progress captures without consuming the accumulator.
    pub fn snapshot(&self) -> Vec<Span> {
        let mut snapshot = self.captures.clone();
        sort_spans(&mut snapshot);
        snapshot
    }

    /// Consume the accumulator, returning its captures sorted by ascending
    /// `start`. The sort is stable, so among equal-`start` spans
    /// (e.g. a group's own span and the enclosing group's, which both begin
    /// where the match begins) whichever was recorded first — always the
    /// outer one, since `push_iteration` records its own span before
    /// appending nested captures — stays first.
    pub fn into_sorted(mut self) -> Vec<Span> {
        sort_spans(&mut self.captures);
        self.captures
    }
}

/// Sorts a capture list by ascending `start` only, stably, matching the
/// accumulator's own output rule: groups are emitted sorted by start. Used
/// once matches combine across sibling and upstream recursion, where two
/// already-sorted lists get merged.
pub(crate) fn sort_spans(spans: &mut [Span]) {
    spans.sort_by_key(|s| s.start);
}

/// A borrowing, ergonomic view over a completed [`crate::Match`]'s groups,
/// letting a caller slice the original input directly by group index
/// instead of manually indexing `start`/`end`.
#[derive(Debug, Clone, Copy)]
pub struct Captures<'t, T> {
    items: &'t [T],
    groups: &'t [Span],
}

impl<'t, T> Captures<'t, T> {
    pub(crate) fn new(items: &'t [T], groups: &'t [Span]) -> Self {
        Captures { items, groups }
    }

    /// The number of groups, including the whole match at index 0.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The span of group `index`, or `None` if it doesn't exist — an
    /// out-of-range group is surfaced as an absent value, never an error.
    pub fn span(&self, index: usize) -> Option<Span> {
        self.groups.get(index).copied()
    }

    /// The slice of the original input matched by group `index`.
    pub fn group_slice(&self, index: usize) -> Option<&'t [T]> {
        self.span(index).map(|s| &self.items[s.start..s.end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_group_keeps_only_last_iteration() {
        let mut acc = CaptureAccumulator::new(true);
        acc.push_iteration(Span::new(0, 3), &[]);
        acc.push_iteration(Span::new(3, 6), &[]);
        assert_eq!(acc.into_sorted(), vec![Span::new(3, 6)]);
    }

    #[test]
    fn non_group_never_records_a_self_span() {
        let mut acc = CaptureAccumulator::new(false);
        acc.push_iteration(Span::new(0, 3), &[Span::new(1, 2)]);
        assert_eq!(acc.into_sorted(), vec![Span::new(1, 2)]);
    }

    #[test]
    fn nested_captures_pass_through_group_iterations() {
        let mut acc = CaptureAccumulator::new(true);
        acc.push_iteration(Span::new(0, 6), &[Span::new(0, 3)]);
        let result = acc.into_sorted();
        // Tied starts keep insertion order: the enclosing group's own span
        // is always recorded before its nested captures, so it stays
        // first — this is what guarantees index 0 is the whole match.
        assert_eq!(result, vec![Span::new(0, 6), Span::new(0, 3)]);
    }

    #[test]
    fn captures_view_indexes_input_by_group() {
        let items = [10, 20, 30, 40];
        let groups = [Span::new(0, 4), Span::new(1, 3)];
        let caps = Captures::new(&items, &groups);
        assert_eq!(caps.group_slice(0), Some(&items[..]));
        assert_eq!(caps.group_slice(1), Some(&items[1..3]));
        assert_eq!(caps.group_slice(2), None);
    }
}
