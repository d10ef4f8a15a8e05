//! ahocorasick-fastpath - Multi-pattern Aho-Corasick search with path
//! compression
//!
//! Builds an automaton from a fixed set of keyword strings (each tagged
//! with a caller-supplied output value) that reports every occurrence of
//! every keyword in one linear pass over an input. Internally, chains of
//! otherwise-unremarkable trie states are collapsed into "fast paths" — a
//! simplified variant of the path-compression optimization described by
//! Tuck et al. (2004) — so matching can skip straight through runs of
//! single-child states instead of following their goto/failure links one
//! code unit at a time.
//!
//! # Quick start
//!
//! ```rust
//! use ahocorasick_fastpath::AutomatonBuilder;
//!
//! let mut automaton = AutomatonBuilder::<String>::with_str_outputs().build();
//! automaton.add("he").unwrap();
//! automaton.add("she").unwrap();
//! automaton.add("his").unwrap();
//! automaton.add("hers").unwrap();
//! automaton.prepare().unwrap();
//!
//! let input: Vec<u16> = "ushers".encode_utf16().collect();
//! let matches = automaton.complete_search(&input, true, false).unwrap();
//! for m in &matches {
//!     println!("{} @ {}..{}", m.output(), m.start_index(), m.end_index());
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Builder (add phase)          ─┐
//!   EdgeList + State (trie)     │  mutable build phase
//!                                ▼
//! prepare()
//!   FailureLinkPass  (BFS, output propagation)
//!   PathCompressionPass (fast-path collapse)
//!                                │  frozen search phase
//!                                ▼
//! Matcher (progressive_search)  →  PostProcessor (complete_search)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// The goto-trie + failure link + output set + optional fast path node.
pub mod state;

/// Sparse code-unit-keyed map from a state to its child states.
pub mod edge_list;

/// The add phase: trie extension and output tagging.
pub mod builder;

/// Breadth-first failure-link construction and output propagation.
pub mod failure_links;

/// The fast-path collapse pass.
pub mod path_compression;

/// The single-pass search step and its lazy, resumable iterator.
pub mod matcher;

/// Match lowering, token-boundary filtering, sorting, and overlap
/// removal.
pub mod post_process;

/// Ties the above into the public two-phase `Automaton` object.
pub mod automaton;

/// Error types for the automaton's lifecycle and collaborator boundaries.
pub mod error;

pub use automaton::{Automaton, AutomatonBuilder};
pub use error::{AutomatonError, Result};
pub use matcher::{ProgressiveSearch, SearchResult};
pub use post_process::{
    OutputResult, OutputSizeCalculator, StrLenCalculator, Tokenizer, TokenizerFactory,
    Utf16LenCalculator,
};
pub use state::{OutputSet, StateId};
