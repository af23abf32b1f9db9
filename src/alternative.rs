//! Alternation: the `.or()` construction that replaces the chain's tail
//! node with an [`crate::node::AlternativeNode`], or extends an existing one.
//!
//! Parallels the first-match-wins loop used for `GroupContent::Alternation`
//! in `Group::match_base_at`, adapted from a string-literal list to a list
//! of arbitrary sub-pattern node ids.

use crate::node::{Arena, Node, NodeId, NodeKind};

/// Merges `alternative` into the chain ending at `tail_before`: if the tail
/// is already an [`crate::node::AlternativeNode`], appends to it in place;
/// otherwise replaces the tail with a fresh one holding `[tail_before,
/// alternative]`, preserving `previous`/`downstream` so nothing upstream of
/// the old tail dangles.
///
/// Returns the id of the (possibly new) alternative node, which becomes the
/// builder's new chain tail.
pub(crate) fn merge_alternative<T>(
    tail_before: NodeId,
    alternative: NodeId,
    arena: &mut Arena<T>,
) -> NodeId {
    if let NodeKind::Alternative(alt) = &mut arena[tail_before].kind {
        alt.alternatives.push(alternative);
        return tail_before;
    }

    let previous = arena[tail_before].header.previous;
    let downstream = arena[tail_before].header.downstream;

    arena.push(Node::alternative(vec![tail_before, alternative]));
    let alt_id = arena.len() - 1;

    arena[tail_before].header.previous = None;
    arena[tail_before].header.downstream = None;

    arena[alt_id].header.previous = previous;
    arena[alt_id].header.downstream = downstream;
    if let Some(p) = previous {
        arena[p].header.next = Some(alt_id);
    }
    if let Some(d) = downstream {
        arena[d].header.upstream = Some(alt_id);
    }

    // A later sibling attached after this alternative is wired through via
    // `crate::group::wire_sibling_after` on whichever branch is itself a
    // group, at the point that sibling is appended.
    alt_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn atomic(arena: &mut Arena<i32>) -> NodeId {
        arena.push(Node::atomic(Arc::new(|_: &i32| true)));
        arena.len() - 1
    }

    #[test]
    fn first_or_replaces_tail_with_alternative() {
        let mut arena: Arena<i32> = Vec::new();
        let a = atomic(&mut arena);
        let b = atomic(&mut arena);

        let alt_id = merge_alternative(a, b, &mut arena);

        match &arena[alt_id].kind {
            NodeKind::Alternative(alt) => assert_eq!(alt.alternatives, vec![a, b]),
            _ => panic!("expected alternative node"),
        }
    }

    #[test]
    fn second_or_extends_existing_alternative() {
        let mut arena: Arena<i32> = Vec::new();
        let a = atomic(&mut arena);
        let b = atomic(&mut arena);
        let alt_id = merge_alternative(a, b, &mut arena);
        let c = atomic(&mut arena);

        let alt_id2 = merge_alternative(alt_id, c, &mut arena);
        assert_eq!(alt_id, alt_id2);

        match &arena[alt_id].kind {
            NodeKind::Alternative(alt) => assert_eq!(alt.alternatives, vec![a, b, c]),
            _ => panic!("expected alternative node"),
        }
    }

    #[test]
    fn preserves_previous_link_through_replacement() {
        let mut arena: Arena<i32> = Vec::new();
        let head = atomic(&mut arena);
        let a = atomic(&mut arena);
        arena[head].header.next = Some(a);
        arena[a].header.previous = Some(head);
        let b = atomic(&mut arena);

        let alt_id = merge_alternative(a, b, &mut arena);

        assert_eq!(arena[head].header.next, Some(alt_id));
        assert_eq!(arena[alt_id].header.previous, Some(head));
    }
}
