//! LSA - parsing, simulation and loop analysis for Logical Scheme Algorithms.
//!
//! A scheme such as `Yн X0 (↑1 | Y0 w↑2) ↓1 Y1 ↓2 Yк` is parsed into a
//! [`Scheme`], which can then be run under fixed condition vectors, run
//! interactively, or enumerated over every assignment to find loops.

pub mod config;

mod error;
mod loops;
mod report;
mod scheme;
mod simulate;
mod structure;

pub use lsa_core::{UsageError, automaton, condition, element, identifier, matrix};

pub use error::LsaError;
pub use loops::{Loop, LoopReport};
pub use scheme::Scheme;
pub use simulate::{ConditionOracle, RunOutcome, RunTrace};
pub use structure::{SchemeGraph, Transition};

use log::{debug, info, warn};

use lsa_parser::{
    Parsed,
    error::{Diagnostic, ErrorCode},
    preprocess,
};

use config::AppConfig;

/// Builder for parsing LSA schemes under a configuration.
///
/// # Examples
///
/// ```rust
/// use lsa::{SchemeBuilder, config::AppConfig};
///
/// let builder = SchemeBuilder::new(AppConfig::default());
/// let mut scheme = builder
///     .parse("Yн X0 (↑1 | Y0 w↑2) ↓1 Y1 ↓2 Yк")
///     .expect("Failed to parse");
///
/// let trace = scheme.run_with("1", false).expect("Failed to run");
/// assert_eq!(trace.to_string(), "Yн X0 ↑1 Y1 ↓2 Yк");
/// ```
#[derive(Debug, Default)]
pub struct SchemeBuilder {
    config: AppConfig,
}

impl SchemeBuilder {
    /// Create a new scheme builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including analysis limits
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse scheme text into a [`Scheme`].
    ///
    /// This preprocesses, tokenizes, parses and validates the text, then
    /// reports elements that cannot be reached from the start as warnings.
    ///
    /// # Errors
    ///
    /// Returns [`LsaError::Parse`] with every diagnostic when the scheme is
    /// malformed, or when any warning is found and
    /// `analysis.warnings_as_errors` is enabled.
    pub fn parse(&self, source: &str) -> Result<Scheme, LsaError> {
        info!("Parsing scheme");
        let normalized = preprocess(source);

        let Parsed {
            automaton,
            tokens,
            diagnostics,
        } = lsa_parser::parse(source)
            .map_err(|err| LsaError::new_parse_error(err, normalized.as_str()))?;

        let mut scheme = Scheme::new(
            automaton,
            tokens,
            Vec::new(),
            self.config.analysis().max_conditionals(),
        );
        let mut warnings = diagnostics;
        warnings.extend(unreachable_warnings(&scheme));

        if self.config.analysis().warnings_as_errors() && !warnings.is_empty() {
            warn!(warnings = warnings.len(); "Warnings treated as errors");
            let errors = warnings.into_iter().map(Diagnostic::into_error).collect::<Vec<_>>();
            return Err(LsaError::new_parse_error(errors.into(), normalized));
        }

        debug!(
            elements = scheme.automaton().elements().len(),
            conditionals = scheme.conditional_count(),
            warnings = warnings.len();
            "Scheme parsed successfully"
        );
        scheme.set_warnings(warnings);
        Ok(scheme)
    }
}

fn unreachable_warnings(scheme: &Scheme) -> Vec<Diagnostic> {
    let automaton = scheme.automaton();
    scheme
        .unreachable()
        .into_iter()
        .map(|element| {
            let element = automaton.element(element);
            let position = element.position();
            let mut diagnostic = Diagnostic::warning(format!(
                "`{}` can never be reached from the start",
                element.id()
            ))
            .with_code(ErrorCode::W201)
            .with_position(position);
            if let Some(token) = scheme.tokens().get(position) {
                diagnostic = diagnostic.with_label(token.span, "unreachable element");
            }
            diagnostic
        })
        .collect()
}
