//! LSA Core Types and Definitions
//!
//! This crate provides the foundational types for Logical Scheme Algorithms
//! (LSA). It includes:
//!
//! - **Identifiers**: String-interned element labels ([`identifier::Id`])
//! - **Elements**: The closed set of graph nodes ([`element`] module)
//! - **Automaton**: The element arena, jump-point registry and condition
//!   state ([`automaton::Automaton`])
//! - **Condition vectors**: Validated `0`/`1` assignments ([`condition`] module)
//! - **Matrix schema contract**: [`matrix::MatrixSchemaBuilder`]

pub mod automaton;
pub mod condition;
pub mod element;
pub mod error;
pub mod identifier;
pub mod matrix;

pub use automaton::Automaton;
pub use error::UsageError;
