//! Errors raised when an automaton is driven incorrectly.
//!
//! Malformed input text is reported through the parser's diagnostics; the
//! errors here indicate caller misuse and are returned immediately.

use thiserror::Error;

use crate::identifier::Id;

/// Misuse of a parsed automaton.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("condition vector has {actual} characters, expected {expected}")]
    VectorLength { expected: usize, actual: usize },

    #[error(
        "condition vector contains `{character}` at offset {offset}; only `0` and `1` are allowed"
    )]
    VectorCharacter { character: char, offset: usize },

    #[error("conditional `{id}` was evaluated before a value was assigned")]
    UndeterminedCondition { id: Id },

    #[error("no conditional vertex with index {0}")]
    UnknownConditional(usize),

    #[error(
        "{count} conditional vertices need 2^{count} runs, but at most {limit} may be enumerated"
    )]
    TooManyConditionals { count: usize, limit: usize },
}
