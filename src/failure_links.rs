//! Breadth-first construction of failure links and output propagation
//! (§4.D): once every keyword has been added, this walks the trie level
//! by level, pointing each state's failure link at the deepest proper
//! suffix of its path that is also a trie path, and merging that
//! target's outputs into the state's own.

use crate::state::{State, StateId};
use std::collections::VecDeque;

/// Returns the child of `state` on `c` under the root's self-loop
/// convention: the root maps any code unit without a direct child to
/// itself, so this never returns `None` when `state` is the root.
fn goto_or_root<O>(arena: &[State<O>], state: StateId, c: u16) -> Option<StateId> {
    match arena[state.index()].get(c) {
        Some(child) => Some(child),
        None if state == StateId::ROOT => Some(StateId::ROOT),
        None => None,
    }
}

/// Builds failure links for every state in `arena`, breadth-first from
/// the root, and propagates outputs along them.
pub fn build_failure_links<O: PartialEq + Clone>(arena: &mut [State<O>]) {
    let mut queue = VecDeque::new();

    let root_children = arena[StateId::ROOT.index()].keys();
    for c in root_children {
        let child = arena[StateId::ROOT.index()].get(c).unwrap();
        arena[child.index()].fail = Some(StateId::ROOT);
        mark_incoming_fail(arena, StateId::ROOT);
        queue.push_back(child);
    }

    while let Some(s) = queue.pop_front() {
        let edges: Vec<(u16, StateId)> = arena[s.index()]
            .edges
            .as_ref()
            .expect("failure-link pass runs before path compression")
            .iter()
            .collect();

        for (c, t) in edges {
            queue.push_back(t);

            let mut f = arena[s.index()].fail.unwrap_or(StateId::ROOT);
            while f != StateId::ROOT && goto_or_root(arena, f, c).is_none() {
                f = arena[f.index()].fail.unwrap_or(StateId::ROOT);
            }
            let target = goto_or_root(arena, f, c).unwrap_or(StateId::ROOT);

            arena[t.index()].fail = Some(target);
            mark_incoming_fail(arena, target);

            let propagated = arena[target.index()].outputs.clone();
            arena[t.index()].outputs.extend_from(&propagated);
        }
    }
}

fn mark_incoming_fail<O>(arena: &mut [State<O>], target: StateId) {
    arena[target.index()].incoming_fail = true;
}
