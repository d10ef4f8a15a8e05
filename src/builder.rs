//! The add phase: extending the goto-trie and tagging output-bearing
//! states.
//!
//! These operate directly on an automaton's arena (`Vec<State<O>>`)
//! rather than through an owning `Builder` object, since the arena's
//! cyclic cross-references (failure links, fast-path targets) are
//! modeled as plain indices (see [`crate::state::StateId`]) owned by a
//! single `Automaton`.

use crate::state::{State, StateId};

/// Returns the child of `state` reached on code unit `c`, creating it
/// (with `depth = state.depth + 1`) if absent.
pub fn extend<O>(arena: &mut Vec<State<O>>, state: StateId, c: u16) -> StateId {
    if let Some(child) = arena[state.index()].get(c) {
        return child;
    }
    let depth = arena[state.index()].depth + 1;
    let new_id = StateId::new(arena.len());
    arena.push(State::child(depth));
    arena[state.index()]
        .edges
        .as_mut()
        .expect("extend() called on a compressed state")
        .put(c, new_id);
    new_id
}

/// Walks/extends the trie from `state` along every code unit of `keyword`,
/// returning the terminal state.
pub fn extend_all<O>(arena: &mut Vec<State<O>>, state: StateId, keyword: &[u16]) -> StateId {
    let mut current = state;
    for &c in keyword {
        current = extend(arena, current, c);
    }
    current
}

/// Inserts `output` into `state`'s output set, idempotent by equality.
pub fn add_output<O: PartialEq + Clone>(arena: &mut [State<O>], state: StateId, output: O) {
    arena[state.index()].outputs.insert(output);
}
