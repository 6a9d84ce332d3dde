//! The core diagnostic type for the LSA error system.
//!
//! A [`Diagnostic`] represents a single error or warning with optional
//! error code, token position, multiple labeled source spans, and help text.

use std::fmt;

use crate::{
    error::{Severity, error_code::ErrorCode, label::Label},
    span::Span,
};

/// A rich diagnostic message with source location information.
///
/// Diagnostics provide detailed information about errors and warnings,
/// including:
/// - A severity level
/// - An optional error code for documentation and searchability
/// - The index of the offending token, when there is one
/// - A primary message describing the issue
/// - One or more labeled source spans
/// - Optional help text with suggestions
///
/// # Example
///
/// ```text
/// error[E105]: jump point `↓1` is declared more than once (token 6)
///   |
/// 1 | Yн X1 ↑1 ↓1 Y1 ↓1 Yк
///   |          --    ^^ duplicate declaration
///   |          |
///   |          first declared here
///   |
///   = help: give each jump point a unique number
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    position: Option<usize>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use lsa_parser::error::{Diagnostic, ErrorCode};
    /// # use lsa_parser::Span;
    ///
    /// let span = Span::new(3..5);
    /// let diag = Diagnostic::error("jump to undeclared point `↓4`")
    ///     .with_code(ErrorCode::E202)
    ///     .with_label(span, "no matching jump point")
    ///     .with_help("declare `↓4` where control should continue");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the token index the diagnostic refers to, if any.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the span of the first primary label.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find(|label| label.is_primary())
            .map(Label::span)
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the token index.
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Turn a warning into an error, keeping everything else.
    pub fn into_error(mut self) -> Self {
        self.severity = Severity::Error;
        self
    }

    /// Create a new diagnostic with the given severity and message.
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            position: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E001]: message (token 3)"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(position) = self.position {
            write!(f, " (token {})", position)?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::new(Severity::Error, "test error");

        assert!(diag.severity().is_error());
        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.position().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_with_secondary_label() {
        let diag = Diagnostic::error("jump point declared twice")
            .with_secondary_label(Span::new(3..7), "first declared here")
            .with_label(Span::new(10..14), "duplicate here");

        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_secondary());
        assert_eq!(diag.primary_span(), Some(Span::new(10..14)));
    }

    #[test]
    fn test_diagnostic_display_with_code_and_position() {
        let diag = Diagnostic::error("missing end marker")
            .with_code(ErrorCode::E101)
            .with_position(1);

        assert_eq!(
            diag.to_string(),
            "error[E101]: missing end marker (token 1)"
        );
    }

    #[test]
    fn test_diagnostic_display_without_code() {
        let diag = Diagnostic::warning("element is never reached");

        assert_eq!(diag.to_string(), "warning: element is never reached");
    }

    #[test]
    fn test_into_error_promotes_warning() {
        let diag = Diagnostic::warning("inferred successor")
            .with_code(ErrorCode::W200)
            .into_error();

        assert!(diag.severity().is_error());
        assert_eq!(diag.code(), Some(ErrorCode::W200));
    }
}
