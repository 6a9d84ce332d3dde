//! CLI logic for the LSA tool.
//!
//! This module contains the core CLI logic: it loads the configuration,
//! parses the scheme file and dispatches to the selected subcommand.

pub mod report;

mod args;
mod config;
mod prompt;

pub use args::{Args, Command};
pub use prompt::Prompt;

use std::fs;

use log::{info, warn};

use lsa::{LsaError, SchemeBuilder};

use report::Report;

/// Run the LSA CLI application
///
/// Processes the input file and returns the text to print.
///
/// # Errors
///
/// Returns `LsaError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Malformed condition vectors or too many conditionals to enumerate
pub fn run(args: &Args) -> Result<String, LsaError> {
    let input = args.command.input();
    info!(input_path = input; "Processing scheme");

    let app_config = config::load_config(args.config.as_ref())?;
    let verbose = args.verbose || app_config.output().verbose();

    let source = fs::read_to_string(input)?;

    let builder = SchemeBuilder::new(app_config);
    let mut scheme = builder.parse(&source)?;
    for warning in Report::scheme(scheme.warnings(), scheme.automaton().logical_schema()) {
        warn!("{}", warning.render());
    }

    let output = match &args.command {
        Command::Tokens { .. } => scheme.get_tokens(),
        Command::Run { conditions, .. } => {
            let trace = scheme.run_with(conditions, verbose)?;
            info!(outcome:% = trace.outcome(); "Run finished");
            format!("{trace}\n")
        }
        Command::Step { .. } => {
            let mut prompt = Prompt::stdio();
            let trace = scheme.run_interactive(&mut prompt, verbose)?;
            format!("{trace}\n")
        }
        Command::Loops { .. } => scheme.get_all_loops()?,
        Command::Results { .. } => scheme.get_results()?,
    };

    info!(input_path = input; "Scheme processed successfully");
    Ok(output)
}
