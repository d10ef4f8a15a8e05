/// Error types for the automaton's lifecycle and collaborator boundaries
use std::fmt;

/// Result type alias used throughout this crate
pub type Result<T> = std::result::Result<T, AutomatonError>;

/// Main error type for automaton operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    /// A search was attempted before `prepare()` was called
    NotPrepared,

    /// `add`/`add_with_output`/`prepare` was called after `prepare()`
    AlreadyPrepared,

    /// A zero-length keyword was passed to `add`/`add_with_output`
    EmptyKeyword,

    /// A tokenizer failed while producing token boundaries for
    /// `complete_search(.., only_tokens = true, ..)`
    Tokenizer(String),

    /// `complete_search` needs an `OutputSizeCalculator` (to turn a
    /// `last_index` into a `start_index`) but none was configured and
    /// the output type has no built-in default.
    MissingOutputSizeCalculator,
}

impl fmt::Display for AutomatonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutomatonError::NotPrepared => {
                write!(f, "automaton has not been prepared; call prepare() first")
            }
            AutomatonError::AlreadyPrepared => {
                write!(f, "automaton is already prepared and is now immutable")
            }
            AutomatonError::EmptyKeyword => write!(f, "empty keywords are not accepted"),
            AutomatonError::Tokenizer(msg) => write!(f, "tokenizer failure: {}", msg),
            AutomatonError::MissingOutputSizeCalculator => write!(
                f,
                "complete_search requires an OutputSizeCalculator for this output type"
            ),
        }
    }
}

impl std::error::Error for AutomatonError {}

impl From<String> for AutomatonError {
    fn from(msg: String) -> Self {
        AutomatonError::Tokenizer(msg)
    }
}

impl From<&str> for AutomatonError {
    fn from(msg: &str) -> Self {
        AutomatonError::Tokenizer(msg.to_string())
    }
}
