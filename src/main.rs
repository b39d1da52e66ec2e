//! Chainbuild CLI - sequential package chain builder
//!
//! Entry point for the chainbuild command-line application.

use clap::Parser;

use chainbuild::cli::output::display_error;
use chainbuild::cli::Cli;
use chainbuild::config::defaults::EXIT_FATAL;

fn main() {
    let cli = Cli::parse();

    // Diagnostics go to stderr so --json output stays parseable
    let level = if cli.quiet {
        tracing::Level::ERROR
    } else {
        match cli.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.run() {
        Ok(report) => std::process::exit(report.exit_code()),
        Err(e) => {
            display_error(&e);
            std::process::exit(EXIT_FATAL);
        }
    }
}
