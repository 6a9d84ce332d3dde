//! Error types for LSA operations.
//!
//! This module provides the main error type [`LsaError`] which wraps the
//! error conditions of parsing and analysing a scheme.

use std::io;

use thiserror::Error;

use lsa_core::UsageError;
use lsa_parser::error::ParseError;

/// The main error type for LSA operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries every diagnostic of a failed parse together
/// with the normalized scheme text its spans refer to.
#[derive(Debug, Error)]
pub enum LsaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Usage error: {0}")]
    Usage(#[from] UsageError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl LsaError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
