//! Implementation of `sift suggest`.

use std::process::ExitCode;

use crate::cli::{
    args::SuggestCommand,
    context::CommandContext,
    output::{print_json, print_suggestions},
};

/// Prints spelling corrections and related terms for the query text.
pub fn run(ctx: &CommandContext, cmd: &SuggestCommand) -> ExitCode {
    let engine = match ctx.engine() {
        Ok(engine) => engine,
        Err(code) => return code,
    };
    let suggestions = engine.suggest(&cmd.text.join(" "));

    if cmd.output.json {
        return print_json(&suggestions);
    }

    print_suggestions(&suggestions);
    ExitCode::SUCCESS
}
