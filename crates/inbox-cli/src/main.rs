//! Inbox CLI - Command-line utility for storing, listing and trashing
//! documents under a storage root.

mod cli;
mod commands;
mod error;
mod output;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use output::OutputFormatter;
use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing .env file is normal
    let _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let formatter = output::formatter_for(&cli);

    match run(&cli, &*formatter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            formatter.format_error(cli.command.operation(), &err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &cli::Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let root = cli.root.as_deref();

    match &cli.command {
        cli::Commands::List(args) => commands::list::execute(args, root, formatter),
        cli::Commands::Store(args) => commands::store::execute(args, root, formatter),
        cli::Commands::Delete(args) => commands::delete::execute(args, root, formatter),
        cli::Commands::Health => commands::health::execute(formatter),
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the level picked by the flags.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}
