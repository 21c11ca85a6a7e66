//! Keysweep CLI - find credentials and key material in a directory tree and
//! collect them as plain copies or an encrypted archive.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use clap::Parser;
use progress::CliProgress;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);
    let show_progress = CliProgress::should_show(cli.quiet, cli.json);

    let result = match &cli.command {
        cli::Commands::Scan(args) => commands::scan::execute(args, &*formatter),
        cli::Commands::Mirror(args) => {
            commands::mirror::execute(args, &*formatter, show_progress)
        }
        cli::Commands::Archive(args) => {
            commands::archive::execute(args, &*formatter, show_progress)
        }
        cli::Commands::Completion { shell } => {
            commands::completion::execute(*shell);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            formatter.format_error(cli.command.operation(), &err);
            ExitCode::FAILURE
        }
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over the flags.
fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}
