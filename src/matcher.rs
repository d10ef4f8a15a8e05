//! The single-pass search step (§4.F): combines goto edges, failure
//! links, and fast paths into one `step` function, and exposes it as a
//! lazy, resumable iterator of [`SearchResult`]s.

use crate::state::{OutputSet, State, StateId};

/// Outcome of a single call to [`step`].
enum StepResult {
    /// Landed on `StateId` having consumed input up to `usize`.
    Next(StateId, usize),
    /// The input was exhausted partway through a fast path. Spec.md
    /// models this as a distinguished sentinel state with no edges and
    /// no outputs; here it is a plain enum variant rather than an extra
    /// arena entry, since Rust's `Option`-shaped control flow already
    /// expresses "no further state" without needing a magic index.
    Empty,
}

/// Follows goto edges and failure links for code unit `c`, starting the
/// search at `cur`. Implements the root self-loop convention of data
/// model invariant 2: `goto(s, c) = s.edges[c]` if present, else
/// `goto(fail(s), c)`, with the root mapping any absent edge to itself.
fn follow_failure<O>(arena: &[State<O>], mut cur: StateId, c: u16) -> StateId {
    loop {
        if let Some(next) = arena[cur.index()].get(c) {
            return next;
        }
        if cur == StateId::ROOT {
            return StateId::ROOT;
        }
        cur = arena[cur.index()].fail.unwrap_or(StateId::ROOT);
    }
}

/// Advances the search by one `step` from `(state, index)` in `input`.
///
/// Callers must not invoke this once `index == input.len()`; the search
/// loop in [`ProgressiveSearch`] checks this before every call for the
/// non-fast-path case, and the fast-path case checks it internally for
/// each code unit it consumes.
fn step<O>(arena: &[State<O>], state: StateId, input: &[u16], index: usize) -> StepResult {
    let st = &arena[state.index()];
    match (&st.fast_path, &st.fast_transitions) {
        (Some(fast_path), Some(fast_transitions)) => {
            let mut idx = index;
            for (i, &expected) in fast_path.iter().enumerate() {
                if idx == input.len() {
                    return StepResult::Empty;
                }
                let c = input[idx];
                idx += 1;
                if c != expected {
                    let next = follow_failure(arena, fast_transitions[i], c);
                    return StepResult::Next(next, idx);
                }
            }
            StepResult::Next(fast_transitions[fast_path.len()], idx)
        }
        _ => {
            let c = input[index];
            let next = follow_failure(arena, state, c);
            StepResult::Next(next, index + 1)
        }
    }
}

/// One reported match point: every output that co-occurs at `last_index`
/// (including outputs reached only through failure-link propagation).
pub struct SearchResult<'a, O> {
    outputs: &'a OutputSet<O>,
    last_index: usize,
}

impl<'a, O> SearchResult<'a, O> {
    /// The outputs co-located at `last_index`.
    pub fn outputs(&self) -> impl Iterator<Item = &'a O> {
        self.outputs.iter()
    }

    /// The code-unit index immediately after the matched text.
    pub fn last_index(&self) -> usize {
        self.last_index
    }
}

/// Lazy, resumable search over `input`, yielding a [`SearchResult`] each
/// time the automaton lands on an output-bearing state.
///
/// Restartable only by constructing a fresh iterator; its entire state is
/// `(state, index)`, matching spec.md's note that the iterator carries
/// nothing but the current automaton state and input position.
pub struct ProgressiveSearch<'a, 'b, O> {
    arena: &'a [State<O>],
    input: &'b [u16],
    state: StateId,
    index: usize,
    done: bool,
}

impl<'a, 'b, O> ProgressiveSearch<'a, 'b, O> {
    pub(crate) fn new(arena: &'a [State<O>], input: &'b [u16]) -> Self {
        ProgressiveSearch {
            arena,
            input,
            state: StateId::ROOT,
            index: 0,
            done: false,
        }
    }
}

impl<'a, 'b, O> Iterator for ProgressiveSearch<'a, 'b, O> {
    type Item = SearchResult<'a, O>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            if self.index >= self.input.len() {
                self.done = true;
                return None;
            }

            match step(self.arena, self.state, self.input, self.index) {
                StepResult::Empty => {
                    self.done = true;
                    return None;
                }
                StepResult::Next(next_state, next_index) => {
                    self.state = next_state;
                    self.index = next_index;

                    let outputs = &self.arena[self.state.index()].outputs;
                    if !outputs.is_empty() {
                        return Some(SearchResult {
                            outputs,
                            last_index: self.index,
                        });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{add_output, extend_all};
    use crate::failure_links::build_failure_links;
    use crate::path_compression::compress_paths;

    fn build(keywords: &[&str]) -> Vec<State<String>> {
        let mut arena = vec![State::root()];
        for kw in keywords {
            let units: Vec<u16> = kw.encode_utf16().collect();
            let terminal = extend_all(&mut arena, StateId::ROOT, &units);
            add_output(&mut arena, terminal, kw.to_string());
        }
        build_failure_links(&mut arena);
        compress_paths(&mut arena);
        arena
    }

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn classic_ushers_progressive_search_last_indices_strictly_increase() {
        let arena = build(&["he", "she", "his", "hers"]);
        let input = units("ushers");
        let search = ProgressiveSearch::new(&arena, &input);

        let mut last_indices = Vec::new();
        for result in search {
            last_indices.push(result.last_index());
        }
        // "she" and "he" share a landing state (failure-link propagation
        // puts both outputs in one SearchResult), so only two distinct
        // last_index values are emitted.
        assert_eq!(last_indices, vec![4, 6]);
    }

    #[test]
    fn nested_x_xx_xxx_emits_growing_output_sets() {
        let arena = build(&["x", "xx", "xxx"]);
        let input = units("xxx");
        let mut search = ProgressiveSearch::new(&arena, &input);

        let r1 = search.next().unwrap();
        assert_eq!(r1.last_index(), 1);
        assert_eq!(r1.outputs().count(), 1);

        let r2 = search.next().unwrap();
        assert_eq!(r2.last_index(), 2);
        assert_eq!(r2.outputs().count(), 2);

        let r3 = search.next().unwrap();
        assert_eq!(r3.last_index(), 3);
        assert_eq!(r3.outputs().count(), 3);

        assert!(search.next().is_none());
    }

    #[test]
    fn path_compressed_search_matches_hello_world() {
        let arena = build(&["hello", "world"]);
        let input = units("helloworld");
        let results: Vec<usize> = ProgressiveSearch::new(&arena, &input)
            .map(|r| r.last_index())
            .collect();
        assert_eq!(results, vec![5, 10]);
    }

    #[test]
    fn truncated_fast_path_input_yields_no_match() {
        let arena = build(&["helloworld"]);
        let input = units("helloworl");
        let results: Vec<usize> = ProgressiveSearch::new(&arena, &input)
            .map(|r| r.last_index())
            .collect();
        assert!(results.is_empty());
    }

    #[test]
    fn early_termination_inside_fast_path() {
        let arena = build(&["abcdefg"]);
        let input = units("abcde");
        let results: Vec<usize> = ProgressiveSearch::new(&arena, &input)
            .map(|r| r.last_index())
            .collect();
        assert!(results.is_empty());
    }

    #[test]
    fn empty_input_yields_no_results() {
        let arena = build(&["a"]);
        let input: Vec<u16> = Vec::new();
        assert!(ProgressiveSearch::new(&arena, &input).next().is_none());
    }
}
