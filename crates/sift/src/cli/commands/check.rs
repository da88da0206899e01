//! Implementation of `sift check`.

use std::{iter, process::ExitCode};

use sift_config::{Config, ConfigWarning, discover_config_files};
use sift_text::Normalizer;

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, success, warning},
};

/// Validates configuration and reports issues.
///
/// Exits with failure when any warning is found.
pub fn run(ctx: &CommandContext) -> ExitCode {
    if discover_config_files(&ctx.cwd).is_empty() && ctx.config.corpus.path.is_none() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("sift init")
        );
        return ExitCode::SUCCESS;
    }

    let config = &ctx.config;
    let warnings = config.validate();
    let synonym_issues = synonym_issues(config);

    if warnings.is_empty() && synonym_issues.is_empty() {
        println!("{}", success("No issues found."));
        return ExitCode::SUCCESS;
    }

    let total = warnings.len() + synonym_issues.len();
    println!("{}", subheader(&format!("Warnings ({total}):")));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    for issue in &synonym_issues {
        println!("   {}", warning(issue));
    }
    println!();

    print_hints(&warnings);
    if !synonym_issues.is_empty() {
        println!(
            "{}",
            dim("Hint: synonym entries must be single words that are not stop-words")
        );
    }

    ExitCode::FAILURE
}

/// Finds synonym entries that do not normalize to exactly one index term.
///
/// Such entries can never match anything in the index, so the group silently loses them.
fn synonym_issues(config: &Config) -> Vec<String> {
    let normalizer = Normalizer::new(config.index.min_term_length);
    let mut issues = Vec::new();

    for (head, members) in &config.synonyms {
        for entry in iter::once(head).chain(members) {
            let terms = normalizer.normalize(entry);
            match terms.len() {
                1 => {}
                0 => issues.push(format!(
                    "synonym '{entry}' in group '{head}' normalizes to nothing"
                )),
                n => issues.push(format!(
                    "synonym '{entry}' in group '{head}' splits into {n} terms"
                )),
            }
        }
    }

    issues
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        match w {
            ConfigWarning::NoCorpusDefined => {
                println!(
                    "{}",
                    dim("Hint: set [corpus] path in .sift.toml or pass --corpus <PATH>")
                );
            }
            ConfigWarning::CorpusMissing { .. } | ConfigWarning::CorpusNotFile { .. } => {
                println!(
                    "{}",
                    dim("Hint: corpus paths are relative to the config file that names them")
                );
            }
            _ => {}
        }
    }
}
