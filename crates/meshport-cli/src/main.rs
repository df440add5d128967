//! Meshport CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info, warn};
use miette::GraphicalReportHandler;

use meshport_cli::{
    Args,
    error_adapter::{render, to_reportables, warning_reportables},
};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logger(&args.log_level);
    debug!(args:?; "Parsed arguments");

    let reporter = GraphicalReportHandler::new();

    match meshport_cli::run(&args) {
        Ok(summary) => {
            // Warnings never fail the conversion, but they keep their source snippets.
            for reportable in warning_reportables(&summary) {
                warn!("{}", render(&reporter, &reportable));
            }
            info!(output_file:? = summary.output(); "Completed successfully");
        }
        Err(err) => {
            for reportable in to_reportables(&err) {
                error!("{}", render(&reporter, &reportable));
            }
            process::exit(1);
        }
    }
}

/// Unknown level names fall back to `warn`.
fn init_logger(level: &str) {
    let log_level = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Meshport");
}
