//! # LSA Parser
//!
//! Parser for the Logical Scheme Algorithm notation. This crate provides the
//! pipeline from raw scheme text to a validated [`Automaton`].
//!
//! ## Usage
//!
//! ```
//! # use lsa_parser::{parse, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let parsed = parse("Yн X0 (↑1 | Y0 w↑2) ↓1 Y1 ↓2 Yк")?;
//!     assert_eq!(parsed.automaton.conditional_count(), 1);
//!     Ok(())
//! }
//! ```

pub mod error;
mod lexer;
mod parser;
mod preprocess;
mod span;
mod tokens;
mod validate;

pub use lexer::tokenize;
pub use preprocess::preprocess;
pub use span::Span;
pub use tokens::{ConditionalPrefix, PositionedToken, Token};

use log::info;

use lsa_core::Automaton;

use error::{Diagnostic, DiagnosticCollector, ParseError};

/// Result of running the parsing pipeline.
#[derive(Debug, Clone)]
pub struct Parsed {
    /// The element graph.
    pub automaton: Automaton,
    /// Tokens of the normalized text, indexed by element position.
    pub tokens: Vec<PositionedToken>,
    /// Diagnostics that did not stop the parse. After [`parse`] succeeds
    /// these are all warnings.
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse scheme text, keeping every diagnostic next to the best-effort graph.
///
/// The pipeline is:
///
/// 1. **Preprocess** - Strip grouping characters and normalize case
/// 2. **Tokenize** - Convert the normalized text to tokens
/// 3. **Parse** - Build the element graph
/// 4. **Validate** - Check the graph invariants
///
/// Spans in the diagnostics refer to the normalized text, which is
/// available as [`Automaton::logical_schema`].
pub fn parse_with_diagnostics(source: &str) -> Parsed {
    let normalized = preprocess(source);
    let mut diagnostics = DiagnosticCollector::new();

    let tokens = lexer::tokenize_into(&normalized, &mut diagnostics);
    let mut automaton = parser::build_automaton(&normalized, &tokens, &mut diagnostics);
    validate::validate(&mut automaton, &tokens, &mut diagnostics);

    Parsed {
        automaton,
        tokens,
        diagnostics: diagnostics.into_diagnostics(),
    }
}

/// Parse scheme text into a validated automaton.
///
/// # Returns
///
/// Returns the [`Parsed`] scheme with its warnings, or a [`ParseError`]
/// listing every diagnostic in source order when any error was found.
pub fn parse(source: &str) -> Result<Parsed, ParseError> {
    let Parsed {
        automaton,
        tokens,
        diagnostics,
    } = parse_with_diagnostics(source);

    let mut collector = DiagnosticCollector::new();
    collector.extend(diagnostics);
    let warnings = collector.finish()?;

    info!(
        elements = automaton.elements().len(),
        warnings = warnings.len();
        "Parsed scheme"
    );
    Ok(Parsed {
        automaton,
        tokens,
        diagnostics: warnings,
    })
}
