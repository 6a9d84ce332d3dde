//! Configuration types for scheme analysis.
//!
//! All types implement [`serde::Deserialize`] for loading from external
//! sources such as TOML files.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining analysis and output settings.
//! - [`AnalysisConfig`] - Limits and strictness of parsing and enumeration.
//! - [`OutputConfig`] - How runs are rendered.
//!
//! # Example
//!
//! ```
//! # use lsa::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.analysis().max_conditionals(), 20);
//! assert!(!config.output().verbose());
//! ```

use serde::Deserialize;

/// Default cap on the number of conditional vertices enumerated exhaustively.
pub const DEFAULT_MAX_CONDITIONALS: usize = 20;

/// Top-level configuration combining analysis and output settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Analysis configuration section.
    #[serde(default)]
    analysis: AnalysisConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(analysis: AnalysisConfig, output: OutputConfig) -> Self {
        Self { analysis, output }
    }

    /// Returns the analysis configuration.
    pub fn analysis(&self) -> &AnalysisConfig {
        &self.analysis
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }
}

/// Limits and strictness of parsing and enumeration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Largest conditional count for which all `2^n` assignments are run.
    max_conditionals: usize,

    /// Treat parser warnings as errors.
    warnings_as_errors: bool,
}

impl AnalysisConfig {
    /// Creates a new [`AnalysisConfig`].
    ///
    /// # Arguments
    ///
    /// * `max_conditionals` - Enumeration cap on conditional vertices.
    /// * `warnings_as_errors` - Fail the parse on any warning.
    pub fn new(max_conditionals: usize, warnings_as_errors: bool) -> Self {
        Self {
            max_conditionals,
            warnings_as_errors,
        }
    }

    pub fn max_conditionals(&self) -> usize {
        self.max_conditionals
    }

    pub fn warnings_as_errors(&self) -> bool {
        self.warnings_as_errors
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_conditionals: DEFAULT_MAX_CONDITIONALS,
            warnings_as_errors: false,
        }
    }
}

/// How runs are rendered.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Print element descriptions instead of bare ids.
    verbose: bool,
}

impl OutputConfig {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [analysis]
            warnings_as_errors = true
            "#,
        )
        .unwrap();

        assert!(config.analysis().warnings_as_errors());
        assert_eq!(config.analysis().max_conditionals(), DEFAULT_MAX_CONDITIONALS);
        assert!(!config.output().verbose());
    }

    #[test]
    fn test_full_config() {
        let config: AppConfig = toml::from_str(
            r#"
            [analysis]
            max_conditionals = 8

            [output]
            verbose = true
            "#,
        )
        .unwrap();

        assert_eq!(config.analysis().max_conditionals(), 8);
        assert!(config.output().verbose());
    }
}
