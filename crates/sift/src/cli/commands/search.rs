//! Implementation of `sift search`.

use std::process::ExitCode;

use serde::Serialize;
use sift_index::{FuzzyReport, Query, ResolvedHit, SearchResponse, Suggestions, TermKind};
use tracing::debug;

use crate::cli::{
    args::SearchCommand,
    context::CommandContext,
    output::{dim, page_summary, print_json, print_suggestions, results_table, subheader},
};

/// Validates the request, searches the corpus and prints one page of results.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let query = match Query::from_request(cmd.to_request(), ctx.config.search.page_size) {
        Ok(query) => query,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    debug!(?query, "validated search request");

    let engine = match ctx.engine() {
        Ok(engine) => engine,
        Err(code) => return code,
    };
    let response = engine.search(&query);

    if cmd.output.json {
        return print_json(&JsonSearch::new(&response));
    }

    print_response(&response, query.page_size());
    ExitCode::SUCCESS
}

/// JSON shape of a search: the page fields with hits resolved to articles.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSearch<'a> {
    /// Articles on this page with their scores.
    results: Vec<ResolvedHit<'a>>,
    /// Matching articles across all pages.
    total_count: usize,
    /// 1-based page number.
    current_page: usize,
    /// Number of pages.
    total_pages: usize,
    /// Whether a later page exists.
    has_next_page: bool,
    /// Whether an earlier page exists.
    has_prev_page: bool,
    /// Expansion report for advanced queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    fuzzy: Option<&'a FuzzyReport>,
    /// Suggestions for advanced queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestions: Option<&'a Suggestions>,
}

impl<'a> JsonSearch<'a> {
    /// Borrows the response into its JSON shape.
    fn new(response: &'a SearchResponse) -> Self {
        let page = &response.page;
        Self {
            results: response.resolve(),
            total_count: page.total_count,
            current_page: page.current_page,
            total_pages: page.total_pages,
            has_next_page: page.has_next_page,
            has_prev_page: page.has_prev_page,
            fuzzy: response.fuzzy.as_ref(),
            suggestions: response.suggestions.as_ref(),
        }
    }
}

/// Prints the results table, the pagination line and any advanced report.
fn print_response(response: &SearchResponse, page_size: usize) {
    let page = &response.page;
    let hits = response.resolve();

    if hits.is_empty() {
        println!("{}", dim("No matching articles."));
    } else {
        let first_rank = (page.current_page - 1) * page_size + 1;
        println!("{}", results_table(&hits, first_rank));
    }
    println!("{}", dim(&page_summary(page)));

    if let Some(report) = &response.fuzzy {
        println!();
        print_report(report);
    }

    if let Some(suggestions) = &response.suggestions
        && !suggestions.is_empty()
    {
        println!();
        print_suggestions(suggestions);
    }
}

/// Prints how an advanced query was expanded.
fn print_report(report: &FuzzyReport) {
    println!(
        "{} {} exact, {} via synonyms or typos",
        subheader("Matches:"),
        report.exact_match_count,
        report.fuzzy_match_count
    );

    let synonyms: Vec<String> = report
        .expansion
        .terms
        .iter()
        .filter(|term| term.kind == TermKind::Synonym)
        .map(|term| format!("{} → {}", term.original, term.term))
        .collect();
    if !synonyms.is_empty() {
        println!("{} {}", subheader("Synonyms:"), synonyms.join(", "));
    }

    for found in &report.expansion.fuzzy_matches {
        println!(
            "{} {} → {} {}",
            subheader("Typo:"),
            found.original,
            found.fuzzy,
            dim(&format!("({:.2})", found.similarity))
        );
    }
}
