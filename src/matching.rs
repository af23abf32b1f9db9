//! The Finder: `find_one` dispatch over the three node kinds, and
//! `find_quantified`, the core quantifier-aware greedy recursion.
//!
//! Parallels `QuantifiedPattern::match_at`'s greedy-consumption shape (try
//! the element repeatedly, respect min/max, stop on failure), generalized
//! with the sibling/upstream reentry and early-exit look-ahead that
//! char-only regex syntax never needed a generic engine to model explicitly.

use crate::capture::{sort_spans, CaptureAccumulator};
use crate::node::{Arena, NodeId, NodeKind, Span};

/// The result of a match attempt against one node: either `FAIL`
/// (`success == false`, in which case the other fields are meaningless) or
/// a successful `[start, end)` span with accumulated captures.
///
/// `complete` distinguishes a genuine consumption from a zero-length
/// optional-tail fallback; see `Matcher::find`'s complete-vs-challenger
/// logic in `matcher.rs`.
#[derive(Clone)]
pub(crate) struct RawMatch {
    pub success: bool,
    pub start: usize,
    pub end: usize,
    pub complete: bool,
    pub captures: Vec<Span>,
}

impl RawMatch {
    pub fn fail() -> Self {
        RawMatch {
            success: false,
            start: 0,
            end: 0,
            complete: false,
            captures: Vec::new(),
        }
    }

    pub fn success(start: usize, end: usize, complete: bool, captures: Vec<Span>) -> Self {
        RawMatch {
            success: true,
            start,
            end,
            complete,
            captures,
        }
    }

    /// A zero-length, complete match at `pos` with no captures — the
    /// `default`/identity continuation used when there is no sibling to
    /// delegate to, or as the look-ahead baseline at `cursor + 1`.
    pub fn identity(pos: usize) -> Self {
        RawMatch::success(pos, pos, true, Vec::new())
    }

    pub fn size(&self) -> usize {
        self.end - self.start
    }
}

/// `find_one`: a single atomic-equivalent match attempt against `node_id`,
/// dispatched by node kind. Quantifier bounds on `node_id` are
/// not consulted here — that's `find_quantified`'s job; `find_one` always
/// means "one occurrence of whatever this node represents".
pub(crate) fn find_one<T>(node_id: NodeId, items: &[T], pos: usize, arena: &Arena<T>) -> RawMatch {
    match &arena[node_id].kind {
        NodeKind::Atomic(pred) => {
            if pos < items.len() && pred(&items[pos]) {
                RawMatch::success(pos, pos + 1, true, Vec::new())
            } else {
                RawMatch::fail()
            }
        }
        NodeKind::Group(g) => find_quantified(g.entry, items, pos, arena),
        NodeKind::Alternative(alt) => {
            for &candidate in &alt.alternatives {
                let attempt = find_one(candidate, items, pos, arena);
                if attempt.success {
                    return with_branch_span(candidate, attempt, arena);
                }
            }
            RawMatch::fail()
        }
    }
}

/// An alternative produces captures only when the chosen branch is a
/// group — its own span is recorded as a capture only when that branch is
/// itself a group, mirroring the self-span bookkeeping `find_quantified`
/// does for a node reached through the main chain.
fn with_branch_span<T>(candidate: NodeId, attempt: RawMatch, arena: &Arena<T>) -> RawMatch {
    if !matches!(arena[candidate].kind, NodeKind::Group(_)) {
        return attempt;
    }
    let mut captures = vec![Span::new(attempt.start, attempt.end)];
    captures.extend(attempt.captures);
    sort_spans(&mut captures);
    RawMatch::success(attempt.start, attempt.end, attempt.complete, captures)
}

fn sibling_match<T>(next: Option<NodeId>, items: &[T], pos: usize, arena: &Arena<T>, default: RawMatch) -> RawMatch {
    match next {
        None => default,
        Some(n) => find_quantified(n, items, pos, arena),
    }
}

fn upstream_match<T>(node_id: NodeId, items: &[T], pos: usize, arena: &Arena<T>) -> RawMatch {
    let header = &arena[node_id].header;
    if header.next.is_some() || header.upstream.is_none() {
        RawMatch::fail()
    } else {
        find_quantified(header.upstream.unwrap(), items, pos, arena)
    }
}

/// Combines an accumulated prefix `(pos, acc)` with a successful `tail`
/// continuation into one match spanning `[pos, tail.end)`. Fails if `tail`
/// failed. `prefix_complete` is the AND of every iteration's own
/// completeness recorded into `acc` so far — the combined result is
/// complete only if both the prefix and the tail are.
fn combine_with_tail(pos: usize, acc: CaptureAccumulator, tail: RawMatch, prefix_complete: bool) -> RawMatch {
    if !tail.success {
        return RawMatch::fail();
    }
    let mut captures = acc.into_sorted();
    captures.extend(tail.captures);
    sort_spans(&mut captures);
    RawMatch::success(pos, tail.end, prefix_complete && tail.complete, captures)
}

/// A bare `success(pos, end)` with no sibling/upstream stitched in — used by
/// early-exit decisions 2 and 3, where the continuation belongs to
/// an enclosing `find_quantified` frame, not this one. Completeness is
/// whatever the accumulated prefix's was; there's no tail here to AND in.
fn bare_success(pos: usize, end: usize, acc_snapshot: &[Span], prefix_complete: bool) -> RawMatch {
    RawMatch::success(pos, end, prefix_complete, acc_snapshot.to_vec())
}

/// `success(pos, c) ∧ tail` — used by early-exit decisions 1 and 4, where
/// `next` belongs to this same chain and so is stitched in directly.
fn stitch_tail(pos: usize, acc_snapshot: &[Span], tail: RawMatch, prefix_complete: bool) -> RawMatch {
    if !tail.success {
        return RawMatch::fail();
    }
    let mut captures = acc_snapshot.to_vec();
    captures.extend(tail.captures);
    sort_spans(&mut captures);
    RawMatch::success(pos, tail.end, prefix_complete && tail.complete, captures)
}

/// The early-exit look-ahead test. `c` is the cursor after the
/// iteration just recorded by the caller; `acc_snapshot` is the
/// accumulator's captures as of that iteration; `prefix_complete` is the
/// AND of every iteration's own completeness up to and including `c`.
/// Returns `Some` with the decision to return immediately, or `None` to
/// keep looping.
fn early_exit<T>(
    node_id: NodeId,
    items: &[T],
    pos: usize,
    c: usize,
    acc_snapshot: &[Span],
    prefix_complete: bool,
    arena: &Arena<T>,
) -> Option<RawMatch> {
    let next = arena[node_id].header.next;

    let cur_n = find_one(node_id, items, c, arena);
    let sib = sibling_match(next, items, c, arena, RawMatch::fail());
    let sib_next = sibling_match(next, items, c + 1, arena, RawMatch::identity(c + 1));
    let up = upstream_match(node_id, items, c, arena);
    let up_next = upstream_match(node_id, items, c + 1, arena);

    if !cur_n.success && sib.success {
        return Some(stitch_tail(pos, acc_snapshot, sib, prefix_complete));
    }
    if cur_n.success && up.success && !up_next.success {
        return Some(bare_success(pos, c, acc_snapshot, prefix_complete));
    }
    if !cur_n.success && up.success {
        return Some(bare_success(pos, c, acc_snapshot, prefix_complete));
    }
    if cur_n.success && sib.success && !sib_next.success {
        return Some(stitch_tail(pos, acc_snapshot, sib, prefix_complete));
    }
    None
}

/// The core algorithm: quantifier-aware greedy search with
/// sibling/upstream reentry and capture bookkeeping.
pub(crate) fn find_quantified<T>(node_id: NodeId, items: &[T], pos: usize, arena: &Arena<T>) -> RawMatch {
    let (min, max, next) = {
        let header = &arena[node_id].header;
        (header.min, header.max, header.next)
    };
    let self_is_group = arena[node_id].is_group();

    let mut cursor = pos;
    let mut count = 0usize;
    let mut current = find_one(node_id, items, cursor, arena);

    // Step 2: zero-match shortcut.
    if !current.success && min == 0 {
        let up = upstream_match(node_id, items, cursor, arena);
        if up.success {
            return RawMatch::success(pos, cursor, false, Vec::new());
        }
        if next.is_some() {
            let sib = sibling_match(next, items, cursor, arena, RawMatch::fail());
            if sib.success {
                return sib;
            }
        }
        return RawMatch::success(pos, cursor, false, Vec::new());
    }

    // Step 3: hard fail.
    if !current.success && min > 0 {
        return RawMatch::fail();
    }

    // Step 4: greedy consumption loop. `prefix_complete` tracks whether
    // every iteration recorded so far was itself a genuine consumption,
    // not a zero-length fallback — the overall result can only be complete
    // if the whole prefix was, regardless of what the tail reports.
    let mut acc = CaptureAccumulator::new(self_is_group);
    let mut prefix_complete = true;
    while current.success {
        prefix_complete = prefix_complete && current.complete;
        acc.push_iteration(Span::new(current.start, current.end), &current.captures);
        count += 1;
        cursor = current.end;

        if count == max {
            let tail = sibling_match(next, items, cursor, arena, RawMatch::identity(cursor));
            return combine_with_tail(pos, acc, tail, prefix_complete);
        } else if count >= min {
            // Early-exit test needs a snapshot of captures recorded so far;
            // accumulator isn't `Clone` by design (it owns dedup state), so
            // we peek via a throwaway clone of its sorted contents.
            let snapshot = acc.snapshot();
            if let Some(result) = early_exit(node_id, items, pos, cursor, &snapshot, prefix_complete, arena) {
                return result;
            }
        }

        current = find_one(node_id, items, cursor, arena);
    }

    // Step 5: loop ended because `current` stopped succeeding.
    if min == max || count < min {
        return RawMatch::fail();
    }
    let tail = sibling_match(next, items, cursor, arena, RawMatch::identity(cursor));
    combine_with_tail(pos, acc, tail, prefix_complete)
}
