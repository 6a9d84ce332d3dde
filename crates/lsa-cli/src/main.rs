//! LSA CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use lsa_cli::{Args, report::Report};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting LSA");
    debug!(args:?; "Parsed arguments");

    match lsa_cli::run(&args) {
        Ok(output) => print!("{output}"),
        Err(err) => {
            // Render each diagnostic independently
            for report in Report::from_error(&err) {
                error!("{}", report.render());
            }
            process::exit(1);
        }
    }

    info!("Completed successfully");
}
