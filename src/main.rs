//! CradleCoach CLI entry point.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cradlecoach::cli::{Cli, execute};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    match execute(cli) {
        Ok(output) => {
            let mut stdout = io::stdout().lock();
            let _ = writeln!(stdout, "{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            let mut stderr = io::stderr().lock();
            let _ = writeln!(stderr, "Error: {e}");
            ExitCode::FAILURE
        }
    }
}
