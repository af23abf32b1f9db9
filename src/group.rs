//! Group wiring: the rule that fills in a group's dangling inner
//! `upstream` edge once a sibling is attached after the group (or after an
//! alternative whose last branch is a group).
//!
//! A [`crate::node::GroupNode`] itself is just `entry: NodeId` (defined in
//! `node.rs` alongside the other node kinds, to keep the arena's tagged
//! union in one place). This module holds the wiring behavior that's
//! specific to groups: finding a group's open inner chain tail and
//! connecting it to whatever comes after the group in the outer chain.

use crate::node::{chain_tail, Arena, NodeId, NodeKind};

/// Called whenever `sibling` is appended immediately after `tail_id` in a
/// chain. If `tail_id` is a [`crate::node::GroupNode`], walks into its
/// entry chain and fills in the open inner tail's `upstream`. If
/// `tail_id` is an [`crate::node::AlternativeNode`] whose last alternative
/// is itself a group, recurses into that alternative: an alternative's
/// last branch, when it is itself a group, has its entry
/// point's last node's upstream wired to the alternative's next. A no-op
/// for atomics and for alternatives whose last branch isn't a group.
pub(crate) fn wire_sibling_after<T>(tail_id: NodeId, sibling: NodeId, arena: &mut Arena<T>) {
    match &arena[tail_id].kind {
        NodeKind::Group(g) => {
            let entry = g.entry;
            wire_chain_tail(entry, sibling, arena);
        }
        NodeKind::Alternative(alt) => {
            if let Some(&last) = alt.alternatives.last() {
                if matches!(arena[last].kind, NodeKind::Group(_)) {
                    wire_sibling_after(last, sibling, arena);
                }
            }
        }
        NodeKind::Atomic(_) => {}
    }
}

/// Walks to the tail of the chain rooted at `entry`, recursively wires any
/// group/alternative-of-group nested at that tail, then fills in the tail's
/// own `upstream`/`downstream` pair if still unset.
fn wire_chain_tail<T>(entry: NodeId, sibling: NodeId, arena: &mut Arena<T>) {
    let tail = chain_tail(entry, arena);
    wire_sibling_after(tail, sibling, arena);
    if arena[tail].header.upstream.is_none() {
        arena[tail].header.upstream = Some(sibling);
        arena[sibling].header.downstream = Some(tail);
    }
}
