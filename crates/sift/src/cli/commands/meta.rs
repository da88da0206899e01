//! Implementation of `sift meta`.

use std::process::ExitCode;

use crate::cli::{
    args::MetaCommand,
    context::CommandContext,
    output::{print_json, print_metadata},
};

/// Prints the corpus authors, sources and publish-date span.
pub fn run(ctx: &CommandContext, cmd: &MetaCommand) -> ExitCode {
    let engine = match ctx.engine() {
        Ok(engine) => engine,
        Err(code) => return code,
    };
    let metadata = engine.metadata();

    if cmd.output.json {
        return print_json(&metadata);
    }

    print_metadata(&metadata);
    ExitCode::SUCCESS
}
