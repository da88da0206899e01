//! Corpus-wide metadata for populating filter choices.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Earliest and latest publish dates in the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateSpan {
    /// Earliest publish date.
    pub earliest: DateTime<Utc>,
    /// Latest publish date.
    pub latest: DateTime<Utc>,
}

/// Known authors, sources and the publish-date span of one index build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Distinct non-empty authors, sorted ascending.
    pub authors: Vec<String>,
    /// Distinct non-empty sources, sorted ascending.
    pub sources: Vec<String>,
    /// Span of parsed publish dates, `None` when no article has one.
    pub date_range: Option<DateSpan>,
}

/// Accumulates [`Metadata`] while articles are indexed.
#[derive(Debug, Default)]
pub(crate) struct MetadataBuilder {
    /// Authors seen so far.
    authors: BTreeSet<String>,
    /// Sources seen so far.
    sources: BTreeSet<String>,
    /// Span of dates seen so far.
    date_range: Option<DateSpan>,
}

impl MetadataBuilder {
    /// Records one article's author, source and publish date.
    pub(crate) fn observe(&mut self, author: &str, source: &str, date: Option<DateTime<Utc>>) {
        if !author.is_empty() {
            self.authors.insert(author.to_string());
        }
        if !source.is_empty() {
            self.sources.insert(source.to_string());
        }
        if let Some(date) = date {
            self.date_range = Some(match self.date_range {
                None => DateSpan {
                    earliest: date,
                    latest: date,
                },
                Some(span) => DateSpan {
                    earliest: span.earliest.min(date),
                    latest: span.latest.max(date),
                },
            });
        }
    }

    /// Finishes the build.
    pub(crate) fn finish(self) -> Metadata {
        Metadata {
            authors: self.authors.into_iter().collect(),
            sources: self.sources.into_iter().collect(),
            date_range: self.date_range,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn collects_sorted_unique_values() {
        let mut builder = MetadataBuilder::default();
        builder.observe("Park", "Herald", None);
        builder.observe("Kim", "", None);
        builder.observe("Park", "Daily", None);
        builder.observe("", "Herald", None);

        let metadata = builder.finish();

        assert_eq!(metadata.authors, vec!["Kim", "Park"]);
        assert_eq!(metadata.sources, vec!["Daily", "Herald"]);
        assert!(metadata.date_range.is_none());
    }

    #[test]
    fn tracks_date_span() {
        let early = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
        let middle = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2025, 2, 3, 4, 5, 6).unwrap();

        let mut builder = MetadataBuilder::default();
        builder.observe("", "", Some(middle));
        builder.observe("", "", Some(late));
        builder.observe("", "", None);
        builder.observe("", "", Some(early));

        let span = builder.finish().date_range.unwrap();
        assert_eq!(span.earliest, early);
        assert_eq!(span.latest, late);
    }

    #[test]
    fn serializes_camel_case() {
        let metadata = MetadataBuilder::default().finish();
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"authors": [], "sources": [], "dateRange": null})
        );
    }
}
