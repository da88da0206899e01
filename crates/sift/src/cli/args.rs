//! Clap argument definitions for the `sift` CLI.

use std::{path::PathBuf, process::exit};

use clap::{Args, Parser, Subcommand, error::ErrorKind};
use sift_index::QueryRequest;

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Article search with typo tolerance and synonyms")]
#[command(version)]
pub struct Cli {
    /// Corpus JSON file, overriding the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub corpus: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared output mode flags.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `sift search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Query text; several words are searched together. Omit to list every article
    pub text: Vec<String>,

    /// Earliest publish date (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// Latest publish date (YYYY-MM-DD covers the whole day)
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,

    /// Only articles from this source (can be specified multiple times)
    #[arg(short = 's', long = "source", value_name = "SOURCE")]
    pub sources: Vec<String>,

    /// Only articles by this author (can be specified multiple times)
    #[arg(short = 'a', long = "author", value_name = "AUTHOR")]
    pub authors: Vec<String>,

    /// Result order: newest, oldest, title, relevance [default: relevance]
    #[arg(long)]
    pub sort: Option<String>,

    /// Page number, starting at 1 [default: 1]
    #[arg(short = 'p', long, allow_negative_numbers = true)]
    pub page: Option<i64>,

    /// Results per page, 1 to 100 [default: 10]
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub page_size: Option<i64>,

    /// Expand synonyms, match typos and include suggestions
    #[arg(long)]
    pub advanced: bool,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

impl SearchCommand {
    /// Builds the unvalidated request for the engine.
    pub fn to_request(&self) -> QueryRequest {
        QueryRequest {
            text: self.text.join(" "),
            from: self.from.clone(),
            to: self.to.clone(),
            sources: self.sources.clone(),
            authors: self.authors.clone(),
            sort: self.sort.clone(),
            page: self.page,
            page_size: self.page_size,
            advanced: self.advanced,
        }
    }
}

/// Arguments for `sift suggest`.
#[derive(Args, Debug, Clone)]
pub struct SuggestCommand {
    /// Query text to check
    #[arg(required = true)]
    pub text: Vec<String>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `sift meta`.
#[derive(Args, Debug, Clone)]
pub struct MetaCommand {
    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `sift init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.sift.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `sift` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search the corpus and print ranked articles
    #[command(after_help = "\
MATCHING:
  Query text is lowercased and split into terms; stop-words and one-letter terms
  are dropped. An article matches if it contains any query term in its title,
  body or keywords. Articles with more of the terms, or with terms in the
  title, rank higher.

ADVANCED MODE:
  --advanced also searches synonyms of each term (weighted lower) and, for terms
  that appear nowhere in the corpus, similar spellings (weighted lower still).

EXAMPLES:
  sift search 인공지능 반도체
  sift search ai --from 2025-01-01 --to 2025-06-30
  sift search --source Daily --sort newest
  sift search 인공지늠 --advanced
  sift search 경제 -n 20 -p 2 --json")]
    Search(SearchCommand),

    /// Suggest spelling corrections and related terms
    Suggest(SuggestCommand),

    /// List authors, sources and the publish-date span of the corpus
    Meta(MetaCommand),

    /// Initialize sift configuration in current directory
    Init(InitCommand),

    /// Show configuration, corpus and index statistics
    Status,

    /// Validate configuration and diagnose issues
    Check,
}

/// Parses CLI arguments.
///
/// Help and version requests exit with 0; usage errors exit with 1.
pub fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                print!("{}", e.render());
                exit(0);
            }
            eprint!("{}", e.render());
            exit(1);
        }
    }
}
