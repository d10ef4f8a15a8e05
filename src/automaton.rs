//! Ties the arena, add phase, failure-link/path-compression passes, and
//! search/post-processing stages together into the two-phase public
//! object described by spec.md §5: a mutable build phase followed by an
//! immutable, freely-concurrent search phase.
//!
//! Grounded on the teacher's builder-produces-frozen-reader split
//! (`DatabaseBuilder`/`Database` in `mmdb_builder.rs`/`database.rs`),
//! generalized from an mmap'd on-disk format to a plain in-memory arena
//! (persistence is an explicit non-goal here).

use crate::builder;
use crate::error::{AutomatonError, Result};
use crate::failure_links::build_failure_links;
use crate::matcher::ProgressiveSearch;
use crate::path_compression::compress_paths;
use crate::post_process::{self, OutputResult, OutputSizeCalculator, StrLenCalculator, TokenizerFactory};
use crate::state::{State, StateId};

/// Configures an [`Automaton`] before any keywords are added.
pub struct AutomatonBuilder<O> {
    output_size_calculator: Option<Box<dyn OutputSizeCalculator<O> + Send + Sync>>,
    tokenizer_factory: Option<Box<dyn TokenizerFactory + Send + Sync>>,
}

impl<O> AutomatonBuilder<O> {
    /// Starts with no calculator and no tokenizer factory configured.
    pub fn new() -> Self {
        AutomatonBuilder {
            output_size_calculator: None,
            tokenizer_factory: None,
        }
    }

    /// Supplies the calculator `complete_search` uses to turn a match's
    /// `last_index` into a `start_index`. Required unless `O` is a
    /// string-like type built via [`AutomatonBuilder::with_str_outputs`].
    pub fn output_size_calculator(
        mut self,
        calculator: Box<dyn OutputSizeCalculator<O> + Send + Sync>,
    ) -> Self {
        self.output_size_calculator = Some(calculator);
        self
    }

    /// Supplies the tokenizer factory `complete_search(.., only_tokens:
    /// true)` uses to obtain token boundaries.
    pub fn tokenizer_factory(mut self, factory: Box<dyn TokenizerFactory + Send + Sync>) -> Self {
        self.tokenizer_factory = Some(factory);
        self
    }

    /// Produces an empty, unprepared [`Automaton`] ready for `add`/`add_with_output`.
    pub fn build(self) -> Automaton<O> {
        Automaton {
            arena: vec![State::root()],
            prepared: false,
            output_size_calculator: self.output_size_calculator,
            tokenizer_factory: self.tokenizer_factory,
        }
    }
}

impl<O> Default for AutomatonBuilder<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: AsRef<str> + 'static> AutomatonBuilder<O> {
    /// Convenience constructor for the common case where outputs are
    /// keyword-shaped strings: installs [`StrLenCalculator`] as the
    /// default `OutputSizeCalculator`.
    pub fn with_str_outputs() -> Self {
        AutomatonBuilder::new().output_size_calculator(Box::new(StrLenCalculator::new()))
    }
}

/// A multi-pattern Aho-Corasick automaton with path-compressed fast
/// paths, over a UTF-16 code-unit alphabet.
///
/// Lifecycle: `add`/`add_with_output` may be called until [`Automaton::prepare`]
/// is called; afterward the automaton is frozen and only search methods
/// may be used. Searches take `&self` and touch no shared mutable state,
/// so a prepared automaton may be searched concurrently from multiple
/// threads as long as each carries its own search cursor.
pub struct Automaton<O> {
    arena: Vec<State<O>>,
    prepared: bool,
    output_size_calculator: Option<Box<dyn OutputSizeCalculator<O> + Send + Sync>>,
    tokenizer_factory: Option<Box<dyn TokenizerFactory + Send + Sync>>,
}

impl<O: PartialEq + Clone> Automaton<O> {
    /// Adds `keyword` with an explicit `output` value.
    pub fn add_with_output(&mut self, keyword: &str, output: O) -> Result<()> {
        if self.prepared {
            return Err(AutomatonError::AlreadyPrepared);
        }
        let units: Vec<u16> = keyword.encode_utf16().collect();
        if units.is_empty() {
            return Err(AutomatonError::EmptyKeyword);
        }
        let terminal = builder::extend_all(&mut self.arena, StateId::ROOT, &units);
        builder::add_output(&mut self.arena, terminal, output);
        Ok(())
    }

    /// Runs the failure-link pass followed by the path-compression
    /// pass, and freezes the automaton for searching.
    pub fn prepare(&mut self) -> Result<()> {
        if self.prepared {
            return Err(AutomatonError::AlreadyPrepared);
        }
        build_failure_links(&mut self.arena);
        compress_paths(&mut self.arena);
        self.prepared = true;
        Ok(())
    }

    /// True once [`Automaton::prepare`] has run; only then may the
    /// automaton be searched.
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Begins a lazy, resumable search over `input` (a sequence of
    /// UTF-16 code units). Each call to `next()` runs the automaton
    /// until it lands on an output-bearing state.
    pub fn progressive_search<'a, 'b>(
        &'a self,
        input: &'b [u16],
    ) -> Result<ProgressiveSearch<'a, 'b, O>> {
        if !self.prepared {
            return Err(AutomatonError::NotPrepared);
        }
        Ok(ProgressiveSearch::new(&self.arena, input))
    }

    /// Runs a full search over `input` and post-processes the matches
    /// into a sorted, optionally non-overlapping, optionally
    /// token-aligned list.
    pub fn complete_search(
        &self,
        input: &[u16],
        allow_overlapping: bool,
        only_tokens: bool,
    ) -> Result<Vec<OutputResult<O>>> {
        if !self.prepared {
            return Err(AutomatonError::NotPrepared);
        }
        let calculator = self
            .output_size_calculator
            .as_deref()
            .ok_or(AutomatonError::MissingOutputSizeCalculator)?;
        post_process::complete_search(
            &self.arena,
            input,
            allow_overlapping,
            only_tokens,
            calculator,
            self.tokenizer_factory.as_deref(),
        )
    }
}

impl<O: From<String> + PartialEq + Clone> Automaton<O> {
    /// Adds `keyword`, using the keyword itself as the output value.
    pub fn add(&mut self, keyword: &str) -> Result<()> {
        self.add_with_output(keyword, O::from(keyword.to_string()))
    }
}
