//! Error and diagnostic system for the LSA parser.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Multiple labeled spans for rich error context
//! - Severity levels
//! - Diagnostic collector for accumulating multiple errors
//!
//! # Overview
//!
//! Lexing, parsing and validation never stop at the first problem. Each
//! phase emits [`Diagnostic`]s into a shared collector, and only the
//! top-level [`parse`](crate::parse) turns the collected errors into a
//! single [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use lsa_parser::error::{Diagnostic, ErrorCode};
//! # use lsa_parser::Span;
//!
//! let diag = Diagnostic::error("jump point `↓1` is declared more than once")
//!     .with_code(ErrorCode::E105)
//!     .with_position(6)
//!     .with_label(Span::new(14..18), "duplicate declaration")
//!     .with_secondary_label(Span::new(3..7), "first declared here")
//!     .with_help("give each jump point a unique number");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
