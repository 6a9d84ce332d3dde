//! Rendering of scheme diagnostics and run failures with miette.
//!
//! A failed parse is reported once per diagnostic, each pointing into the
//! normalized scheme text. Every other failure becomes a single report with
//! an `lsa::` code and, where one exists, a hint on how to fix the command
//! line or the configuration.

use std::fmt;

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan,
    Severity as MietteSeverity, SourceCode, SourceSpan,
};

use lsa::{LsaError, UsageError};
use lsa_parser::{
    Span,
    error::{Diagnostic, Severity},
};

/// One renderable problem found while processing a scheme.
#[derive(Debug)]
pub enum Report<'a> {
    /// A parser or validator diagnostic, with the text its spans refer to.
    Scheme {
        diagnostic: &'a Diagnostic,
        scheme: &'a str,
    },
    /// A failure that has no location in the scheme.
    Failure(&'a LsaError),
}

impl<'a> Report<'a> {
    /// Split `err` into reports, one per diagnostic of a failed parse.
    pub fn from_error(err: &'a LsaError) -> Vec<Self> {
        match err {
            LsaError::Parse { err, src } => Self::scheme(err.diagnostics(), src),
            _ => vec![Self::Failure(err)],
        }
    }

    /// Wrap diagnostics that refer to the normalized `scheme` text.
    pub fn scheme(diagnostics: &'a [Diagnostic], scheme: &'a str) -> Vec<Self> {
        diagnostics
            .iter()
            .map(|diagnostic| Self::Scheme { diagnostic, scheme })
            .collect()
    }

    /// Render with miette's graphical handler.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if GraphicalReportHandler::new()
            .render_report(&mut out, self)
            .is_err()
        {
            out = self.to_string();
        }
        out
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scheme { diagnostic, .. } => f.write_str(diagnostic.message()),
            Self::Failure(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Report<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Scheme { .. } => None,
            Self::Failure(err) => std::error::Error::source(*err),
        }
    }
}

impl MietteDiagnostic for Report<'_> {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        let code = match self {
            Self::Scheme { diagnostic, .. } => diagnostic.code()?.as_str(),
            Self::Failure(LsaError::Parse { .. }) => return None,
            Self::Failure(LsaError::Io(_)) => "lsa::io",
            Self::Failure(LsaError::Usage(_)) => "lsa::usage",
            Self::Failure(LsaError::Config(_)) => "lsa::config",
        };
        Some(Box::new(code))
    }

    fn severity(&self) -> Option<MietteSeverity> {
        let Self::Scheme { diagnostic, .. } = self else {
            return Some(MietteSeverity::Error);
        };
        Some(match diagnostic.severity() {
            Severity::Error => MietteSeverity::Error,
            Severity::Warning => MietteSeverity::Warning,
        })
    }

    fn help<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        match self {
            Self::Scheme { diagnostic, .. } => {
                let help = diagnostic.help()?;
                Some(Box::new(help))
            }
            Self::Failure(LsaError::Usage(usage)) => usage_help(usage),
            Self::Failure(LsaError::Config(_)) => Some(Box::new(
                "configuration is read from --config, then `lsa/config.toml`, \
                 then the platform config directory",
            )),
            Self::Failure(LsaError::Io(_)) => {
                Some(Box::new("check that the scheme file exists and is readable"))
            }
            Self::Failure(LsaError::Parse { .. }) => None,
        }
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        match self {
            Self::Scheme { scheme, .. } => Some(scheme as &dyn SourceCode),
            Self::Failure(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let Self::Scheme { diagnostic, .. } = self else {
            return None;
        };
        if diagnostic.labels().is_empty() {
            return None;
        }
        Some(Box::new(diagnostic.labels().iter().map(|label| {
            let message = Some(label.message().to_string());
            let span = source_span(label.span());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

fn usage_help(usage: &UsageError) -> Option<Box<dyn fmt::Display + '_>> {
    let help = match usage {
        UsageError::VectorLength { expected, .. } => format!(
            "pass {expected} digits with --conditions, one `0` or `1` per conditional vertex"
        ),
        UsageError::VectorCharacter { .. } => {
            "write the vector with `0` and `1` only, e.g. `--conditions 0110`".to_string()
        }
        UsageError::TooManyConditionals { .. } => {
            "raise `analysis.max_conditionals` in the configuration, or check single \
             vectors with `lsa run`"
                .to_string()
        }
        UsageError::UndeterminedCondition { .. } | UsageError::UnknownConditional(_) => {
            return None;
        }
    };
    Some(Box::new(help))
}

fn source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

#[cfg(test)]
mod tests {
    use lsa::condition::ConditionVector;
    use lsa_parser::error::{ErrorCode, ParseError};

    use super::*;

    #[test]
    fn test_parse_error_reports_each_diagnostic() {
        let diagnostics = vec![
            Diagnostic::error("scheme must begin with the start marker `Yн`")
                .with_code(ErrorCode::E100)
                .with_label(Span::new(0..2), "found `Y1`"),
            Diagnostic::error("jump `↑3` has no matching jump point `↓3`")
                .with_code(ErrorCode::E202)
                .with_label(Span::new(6..10), "unresolved jump")
                .with_help("add `↓3` where the jump should land"),
        ];
        let err = LsaError::new_parse_error(ParseError::from(diagnostics), "Y1 Y2 ↑3 Yк");

        let reports = Report::from_error(&err);

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].code().unwrap().to_string(), "E100");
        assert_eq!(reports[1].code().unwrap().to_string(), "E202");
        assert_eq!(
            reports[1].help().unwrap().to_string(),
            "add `↓3` where the jump should land"
        );
        assert!(reports[0].source_code().is_some());
    }

    #[test]
    fn test_vector_length_help_names_expected_count() {
        let usage = ConditionVector::parse("1", 2).unwrap_err();
        let err = LsaError::from(usage);

        let reports = Report::from_error(&err);

        assert_eq!(reports.len(), 1);
        assert_eq!(
            reports[0].to_string(),
            "Usage error: condition vector has 1 characters, expected 2"
        );
        assert_eq!(reports[0].code().unwrap().to_string(), "lsa::usage");
        assert!(reports[0].help().unwrap().to_string().starts_with("pass 2 digits"));
        assert!(reports[0].labels().is_none());
    }

    #[test]
    fn test_enumeration_limit_points_at_config() {
        let err = LsaError::from(UsageError::TooManyConditionals { count: 20, limit: 16 });
        let report = Report::Failure(&err);
        assert!(report.help().unwrap().to_string().contains("analysis.max_conditionals"));
    }

    #[test]
    fn test_config_error_lists_search_order() {
        let err = LsaError::Config("Missing configuration file: lsa.toml".to_string());
        let report = Report::Failure(&err);

        assert_eq!(report.code().unwrap().to_string(), "lsa::config");
        assert!(report.help().unwrap().to_string().contains("lsa/config.toml"));
    }

    #[test]
    fn test_unreachable_warning_keeps_severity() {
        let warnings = vec![
            Diagnostic::warning("`Y2` can never be reached from the start")
                .with_code(ErrorCode::W201)
                .with_label(Span::new(11..13), "unreachable element"),
        ];

        let reports = Report::scheme(&warnings, "Yн Y1 Yк Y2");

        assert_eq!(reports[0].severity(), Some(MietteSeverity::Warning));
        let rendered = reports[0].render();
        assert!(rendered.contains("W201"));
        assert!(rendered.contains("unreachable element"));
    }

    #[test]
    fn test_duplicate_jump_point_labels() {
        let diagnostic = Diagnostic::error("jump point `↓1` is declared more than once")
            .with_code(ErrorCode::E105)
            .with_label(Span::new(12..16), "duplicate declaration")
            .with_secondary_label(Span::new(6..10), "first declared here");
        let report = Report::Scheme {
            diagnostic: &diagnostic,
            scheme: "Yн Y1 ↓1 Y2 ↓1 Yк",
        };

        let labels: Vec<_> = report.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert!(labels[0].primary());
        assert!(!labels[1].primary());
        assert_eq!(labels[1].label(), Some("first declared here"));
    }
}
