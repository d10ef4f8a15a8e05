//! Converts the raw `SearchResult` stream into a sorted, optionally
//! non-overlapping, optionally token-aligned list of [`OutputResult`]s
//! (§4.G).

use crate::error::{AutomatonError, Result};
use crate::matcher::ProgressiveSearch;
use crate::state::State;
use std::marker::PhantomData;

/// Computes how many input code units a match on a given output spans.
///
/// Contract: for any real match, `size_of(output)` MUST equal
/// `end_index - start_index`, since lowering derives `start_index` as
/// `last_index - size_of(output)`.
pub trait OutputSizeCalculator<O> {
    /// Number of input code units a match on `output` spans.
    fn size_of(&self, output: &O) -> usize;
}

/// Default calculator for string-like outputs: the keyword's own
/// UTF-16 code-unit length. Only meaningful when outputs are the
/// keywords themselves (the `add(keyword)` shorthand); anything else
/// needs an explicit [`OutputSizeCalculator`].
pub struct StrLenCalculator<O> {
    // `fn() -> O` rather than `O` so this marker never constrains the
    // calculator's own `Send`/`Sync`-ness to whatever `O` happens to be.
    _marker: PhantomData<fn() -> O>,
}

impl<O> StrLenCalculator<O> {
    /// Builds a calculator that measures a match by the output's own
    /// UTF-16 code-unit length.
    pub fn new() -> Self {
        StrLenCalculator {
            _marker: PhantomData,
        }
    }
}

impl<O> Default for StrLenCalculator<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: AsRef<str>> OutputSizeCalculator<O> for StrLenCalculator<O> {
    fn size_of(&self, output: &O) -> usize {
        output.as_ref().encode_utf16().count()
    }
}

/// Default calculator for `Vec<u16>` outputs: the match's own length in
/// code units. A separate type from [`StrLenCalculator`] since `Vec<u16>`
/// does not implement `AsRef<str>` and coherence forbids a second impl
/// of the same trait for the same type through a shared generic struct.
#[derive(Default)]
pub struct Utf16LenCalculator;

impl OutputSizeCalculator<Vec<u16>> for Utf16LenCalculator {
    fn size_of(&self, output: &Vec<u16>) -> usize {
        output.len()
    }
}

/// Produces token boundaries for an input. Modeled as an opaque boundary
/// oracle: two parallel, ascending arrays of token start/end offsets.
pub trait Tokenizer {
    /// Returns `(starts, ends)`: both ascending, `starts[i] < ends[i]`,
    /// tokens non-overlapping. `Err` propagates as
    /// [`AutomatonError::Tokenizer`].
    fn tokenize(&self, input: &[u16]) -> std::result::Result<(Vec<usize>, Vec<usize>), String>;
}

/// Creates a fresh [`Tokenizer`] per search (mirrors the teacher's
/// `Extractor`-as-injectable-collaborator shape).
pub trait TokenizerFactory {
    /// Builds a fresh [`Tokenizer`] for one `complete_search` call.
    fn create(&self) -> Box<dyn Tokenizer>;
}

/// A single resolved match: one output and the code-unit span it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputResult<O> {
    output: O,
    start_index: usize,
    end_index: usize,
}

impl<O> OutputResult<O> {
    /// The matched output value.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Code-unit offset where the match begins, inclusive.
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// Code-unit offset where the match ends, exclusive.
    pub fn end_index(&self) -> usize {
        self.end_index
    }
}

fn overlaps(a: &(usize, usize), b: &(usize, usize)) -> bool {
    let (s1, e1) = *a;
    let (s2, e2) = *b;
    (s1 <= s2 && s2 < e1) || (s1 < e2 && e2 <= e1)
}

fn dominates(a: &(usize, usize), b: &(usize, usize)) -> bool {
    let (s1, e1) = *a;
    let (s2, e2) = *b;
    s1 < s2 || (s1 == s2 && e1 > e2)
}

/// "Left-most, then longest wins", applied in a single forward pass over
/// the already start_index-sorted list. Index `i` is not advanced on a
/// removal, since the new neighbor at `i` may also overlap; this is the
/// source's simpler (non-backtracking) dominance semantics, preserved
/// deliberately per spec.md §4.G.
fn remove_overlaps<O>(list: &mut Vec<OutputResult<O>>) {
    let mut i = 0;
    while i + 1 < list.len() {
        let a = (list[i].start_index, list[i].end_index);
        let b = (list[i + 1].start_index, list[i + 1].end_index);
        if !overlaps(&a, &b) {
            i += 1;
        } else if dominates(&a, &b) {
            list.remove(i + 1);
        } else {
            list.remove(i);
        }
    }
}

fn token_aligned(starts: &[usize], ends: &[usize], start: usize, end: usize) -> bool {
    let i = match starts.binary_search(&start) {
        Ok(i) => i,
        Err(_) => return false,
    };
    let j = match ends.binary_search(&end) {
        Ok(j) => j,
        Err(_) => return false,
    };
    i <= j
}

/// Runs the full post-processing pipeline: lowering, optional token
/// filtering, sorting, and optional overlap removal.
pub fn complete_search<O: Clone + PartialEq>(
    arena: &[State<O>],
    input: &[u16],
    allow_overlapping: bool,
    only_tokens: bool,
    calculator: &(dyn OutputSizeCalculator<O> + Send + Sync),
    tokenizer_factory: Option<&(dyn TokenizerFactory + Send + Sync)>,
) -> Result<Vec<OutputResult<O>>> {
    let mut results = Vec::new();
    let search = ProgressiveSearch::new(arena, input);
    for hit in search {
        let last_index = hit.last_index();
        for output in hit.outputs() {
            let size = calculator.size_of(output);
            results.push(OutputResult {
                output: output.clone(),
                start_index: last_index.saturating_sub(size),
                end_index: last_index,
            });
        }
    }

    if only_tokens {
        let factory = tokenizer_factory.ok_or_else(|| {
            AutomatonError::Tokenizer("only_tokens requires a tokenizer factory".to_string())
        })?;
        let tokenizer = factory.create();
        let (starts, ends) = tokenizer
            .tokenize(input)
            .map_err(AutomatonError::Tokenizer)?;
        results.retain(|r| token_aligned(&starts, &ends, r.start_index, r.end_index));
    }

    results.sort_by_key(|r| r.start_index);

    if !allow_overlapping {
        remove_overlaps(&mut results);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(start: usize, end: usize) -> OutputResult<&'static str> {
        OutputResult {
            output: "x",
            start_index: start,
            end_index: end,
        }
    }

    #[test]
    fn she_hers_overlap_removal_keeps_leftmost_longest() {
        // S2 from spec.md: [she(1,4), he(2,4), hers(2,6)] -> [she(1,4)]
        let mut list = vec![r(1, 4), r(2, 4), r(2, 6)];
        remove_overlaps(&mut list);
        assert_eq!(list.len(), 1);
        assert_eq!((list[0].start_index, list[0].end_index), (1, 4));
    }

    #[test]
    fn nested_xxx_overlap_removal_keeps_longest() {
        // S3 from spec.md: sorted [x(0,1), xx(0,2), xxx(0,3)] -> [xxx(0,3)]
        let mut list = vec![r(0, 1), r(0, 2), r(0, 3)];
        remove_overlaps(&mut list);
        assert_eq!(list.len(), 1);
        assert_eq!((list[0].start_index, list[0].end_index), (0, 3));
    }

    #[test]
    fn disjoint_results_all_survive() {
        let mut list = vec![r(0, 5), r(5, 10)];
        remove_overlaps(&mut list);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn token_alignment_accepts_exact_token_span_only() {
        let starts = vec![0usize, 5, 10];
        let ends = vec![3usize, 9, 15];
        assert!(token_aligned(&starts, &ends, 0, 3));
        assert!(token_aligned(&starts, &ends, 5, 15));
        // Spans multiple whole tokens (0 through 1): still aligned, since
        // both endpoints land exactly on token boundaries.
        assert!(token_aligned(&starts, &ends, 0, 9));
        assert!(!token_aligned(&starts, &ends, 1, 3));
        assert!(!token_aligned(&starts, &ends, 0, 4));
    }

    #[test]
    fn str_len_calculator_counts_code_units_not_bytes() {
        let calc = StrLenCalculator::<String>::new();
        assert_eq!(calc.size_of(&"hers".to_string()), 4);
    }

    #[test]
    fn utf16_len_calculator_counts_vec_u16_length() {
        let calc = Utf16LenCalculator;
        let output: Vec<u16> = "hers".encode_utf16().collect();
        assert_eq!(calc.size_of(&output), 4);
    }
}
