//! Collapses chains of single-child, output-free, no-incoming-failure
//! states into a "fast path" (§4.E): a substring plus a parallel array of
//! pre-resolved failure-link destinations, so matching can skip straight
//! through runs of otherwise-unremarkable trie states.
//!
//! Not present in the teacher crate — this is the novel contribution this
//! system adds on top of a conventional Aho-Corasick build (see
//! DESIGN.md), implemented directly from the algorithm spec.md §4.E
//! describes. The depth-first "collapse, then keep walking from the
//! terminal" traversal uses an explicit stack rather than recursion, so a
//! long chain of keywords sharing a deep common path cannot overflow the
//! call stack.

use crate::state::{State, StateId};

/// Runs the path-compression pass over every state in `arena`. Must run
/// after failure links have been built ([`crate::failure_links::build_failure_links`]),
/// and must run exactly once.
pub fn compress_paths<O>(arena: &mut [State<O>]) {
    let mut stack = vec![StateId::ROOT];
    while let Some(id) = stack.pop() {
        if arena[id.index()].is_compressible() {
            let terminal = collapse_chain(arena, id);
            stack.push(terminal);
        } else {
            for c in arena[id.index()].keys() {
                stack.push(arena[id.index()].get(c).unwrap());
            }
        }
    }
}

/// Walks the unique-edge chain starting at `start`, which must already be
/// known compressible. Installs a fast path on `start` when the chain
/// spans more than one code unit; always returns the chain's terminal
/// state (the first state reached that is not itself compressible), for
/// the caller to continue the traversal from.
fn collapse_chain<O>(arena: &mut [State<O>], start: StateId) -> StateId {
    let mut fast_path = Vec::new();
    let mut fast_transitions = Vec::new();
    let mut cur = start;

    loop {
        let c = arena[cur.index()]
            .keys()
            .into_iter()
            .next()
            .expect("compressible state has exactly one edge");
        let child = arena[cur.index()].get(c).unwrap();

        fast_path.push(c);
        fast_transitions.push(arena[cur.index()].fail.unwrap_or(StateId::ROOT));
        cur = child;

        if !arena[cur.index()].is_compressible() {
            break;
        }
    }

    if fast_path.len() > 1 {
        fast_transitions.push(cur);
        let state = &mut arena[start.index()];
        state.fast_path = Some(fast_path);
        state.fast_transitions = Some(fast_transitions);
        state.edges = None;
        state.fail = None;
    }

    cur
}
