//! Command-line interface for the `sift` article search tool.

use std::{io, process::ExitCode};

use sift::cli::{
    CommandContext,
    args::{Commands, parse_cli},
    commands,
};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "SIFT_LOG";

fn main() -> ExitCode {
    init_tracing();

    let cli = parse_cli();

    let ctx = match &cli.command {
        Commands::Init(_) => CommandContext::load_cwd_only(),
        _ => CommandContext::load(cli.corpus.as_deref()),
    };
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &ctx)
}

/// Installs the log subscriber, writing to stderr so JSON output stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
