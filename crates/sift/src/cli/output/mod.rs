//! Rendering and JSON serialization for CLI output.

mod style;

use std::process::ExitCode;

use comfy_table::{Cell, CellAlignment, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;
use sift_index::{Article, Metadata, ResolvedHit, SearchPage, Suggestions};

pub use self::style::{dim, subheader, success, warning};

/// Longest title shown in a results table, in characters.
const MAX_TITLE_CHARS: usize = 60;

/// Prints a value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Formats an article's publish date as `YYYY-MM-DD`, or an empty string.
pub fn format_date(article: &Article) -> String {
    article
        .published_at
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Shortens `text` to at most `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Builds the results table for one page of hits.
///
/// `first_rank` is the 1-based rank of the first hit on the page.
pub fn results_table(hits: &[ResolvedHit<'_>], first_rank: usize) -> Table {
    let scored = hits.iter().any(|hit| hit.score.is_some());

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut heading = vec!["#", "Title", "Source", "Author", "Date", "Min"];
    if scored {
        heading.push("Score");
    }
    table.set_header(heading);

    for (offset, hit) in hits.iter().enumerate() {
        let article = hit.article;
        let mut row = vec![
            Cell::new(first_rank + offset).set_alignment(CellAlignment::Right),
            Cell::new(truncate(&article.title, MAX_TITLE_CHARS)),
            Cell::new(&article.source),
            Cell::new(&article.author),
            Cell::new(format_date(article)),
            Cell::new(article.reading_time).set_alignment(CellAlignment::Right),
        ];
        if scored {
            let score = hit.score.map(|s| format!("{s:.3}")).unwrap_or_default();
            row.push(Cell::new(score).set_alignment(CellAlignment::Right));
        }
        table.add_row(row);
    }

    table
}

/// Formats the pagination summary line for a page.
pub fn page_summary(page: &SearchPage) -> String {
    let noun = if page.total_count == 1 {
        "result"
    } else {
        "results"
    };
    let mut summary = format!(
        "page {} of {}, {} {noun}",
        page.current_page,
        page.total_pages.max(1),
        page.total_count
    );
    if page.has_next_page {
        summary.push_str(&format!(", next: -p {}", page.current_page + 1));
    }
    summary
}

/// Prints spelling corrections and related terms.
pub fn print_suggestions(suggestions: &Suggestions) {
    if suggestions.is_empty() {
        println!("{}", dim("No suggestions."));
        return;
    }

    if !suggestions.corrections.is_empty() {
        println!("{}", subheader("Did you mean:"));
        for correction in &suggestions.corrections {
            println!(
                "   {} {} {}",
                correction.original,
                dim("→"),
                correction.suggestions.join(", ")
            );
        }
    }

    if !suggestions.related.is_empty() {
        println!("{}", subheader("Related terms:"));
        println!("   {}", suggestions.related.join(", "));
    }
}

/// Prints corpus metadata.
pub fn print_metadata(metadata: &Metadata) {
    println!("{}", subheader(&format!("Sources ({}):", metadata.sources.len())));
    print_list(&metadata.sources);
    println!();

    println!("{}", subheader(&format!("Authors ({}):", metadata.authors.len())));
    print_list(&metadata.authors);
    println!();

    println!("{}", subheader("Published:"));
    match &metadata.date_range {
        Some(span) => println!(
            "   {} {} {}",
            span.earliest.format("%Y-%m-%d"),
            dim("to"),
            span.latest.format("%Y-%m-%d")
        ),
        None => println!("   {}", dim("(no dated articles)")),
    }
}

/// Prints one indented line per item, or a placeholder.
fn print_list(items: &[String]) {
    if items.is_empty() {
        println!("   {}", dim("(none)"));
    }
    for item in items {
        println!("   {item}");
    }
}
