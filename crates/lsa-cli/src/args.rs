//! Command-line argument definitions for the LSA CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Each subcommand selects one way of executing or analysing
//! the scheme file; global flags control configuration and logging.

use clap::{Parser, Subcommand};

/// Command-line arguments for the LSA tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Print element descriptions instead of bare ids
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

/// What to do with the scheme.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the tokens of the scheme
    Tokens {
        /// Path to the input scheme file
        input: String,
    },

    /// Run the scheme under one condition vector
    Run {
        /// Path to the input scheme file
        input: String,

        /// One `0`/`1` per conditional vertex, in order; empty when there are none
        #[arg(short = 'x', long, default_value = "")]
        conditions: String,
    },

    /// Run the scheme, asking for each condition on stdin
    Step {
        /// Path to the input scheme file
        input: String,
    },

    /// Find the loops reachable under any condition vector
    Loops {
        /// Path to the input scheme file
        input: String,
    },

    /// Run every condition vector and print each path
    Results {
        /// Path to the input scheme file
        input: String,
    },
}

impl Command {
    /// Path of the scheme file the command reads.
    pub fn input(&self) -> &str {
        match self {
            Command::Tokens { input }
            | Command::Run { input, .. }
            | Command::Step { input }
            | Command::Loops { input }
            | Command::Results { input } => input,
        }
    }
}
