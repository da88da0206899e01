//! Command implementations and dispatch.

pub mod check;
pub mod init;
pub mod meta;
pub mod search;
pub mod status;
pub mod suggest;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Search(cmd) => search::run(ctx, &cmd),
        Commands::Suggest(cmd) => suggest::run(ctx, &cmd),
        Commands::Meta(cmd) => meta::run(ctx, &cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Status => status::run(ctx),
        Commands::Check => check::run(ctx),
    }
}
