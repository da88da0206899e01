//! Implementation of `sift status`.

use std::process::ExitCode;

use sift_config::{CONFIG_ENV, discover_config_files, env_config_path};
use sift_index::{BuildStats, CorpusStatus, detect_corpus_status};

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Shows configuration files, corpus status, index statistics and effective settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    println!("{}", subheader("Config files:"));
    let config_files = discover_config_files(&ctx.cwd);
    if config_files.is_empty() {
        println!("   {}", dim("(none found, run 'sift init' to create one)"));
    }
    let explicit = env_config_path().map(|path| ctx.cwd.join(path));
    for path in &config_files {
        if explicit.as_ref() == Some(path) {
            println!("   {} {}", path.display(), dim(&format!("({CONFIG_ENV})")));
        } else {
            println!("   {}", path.display());
        }
    }
    println!();

    let status = detect_corpus_status(config);
    println!("{}", subheader("Corpus:"));
    match &status {
        CorpusStatus::NotConfigured => println!("   {}", warning(status.description())),
        CorpusStatus::Missing { path } => println!(
            "   {} {}",
            path.display(),
            warning(&format!("[{}]", status.description()))
        ),
        CorpusStatus::Unreadable { path, reason } => {
            println!(
                "   {} {}",
                path.display(),
                warning(&format!("[{}]", status.description()))
            );
            println!("   {}", dim(reason));
        }
        CorpusStatus::Ready { path, records } => println!(
            "   {} {}",
            path.display(),
            dim(&format!("({records} records)"))
        ),
    }
    println!();

    if status.is_ready() {
        let engine = match ctx.engine() {
            Ok(engine) => engine,
            Err(code) => return code,
        };
        println!("{}", subheader("Index:"));
        print_stats(engine.index().stats());
        println!();
    }

    println!("{}", subheader("Effective settings:"));
    for line in config.settings_to_toml().lines() {
        println!("   {line}");
    }

    ExitCode::SUCCESS
}

/// Prints the counters from the latest index build.
fn print_stats(stats: &BuildStats) {
    println!("   articles: {}", stats.articles_indexed);
    println!("   terms: {}", stats.terms);
    if stats.is_clean() {
        println!("   dropped records: 0");
    } else {
        println!(
            "   dropped records: {} {}",
            stats.records_dropped(),
            dim(&format!(
                "({} skipped, {} without id, {} duplicate ids)",
                stats.records_skipped, stats.missing_ids, stats.duplicate_ids
            ))
        );
    }
    println!("   unparsed dates: {}", stats.unparsed_dates);
}
