//! Article records.
//!
//! Corpus records arrive as loosely shaped JSON. [`RawArticle::from_value`] pulls the
//! fields sift cares about out of one record, accepting a few common field-name aliases,
//! and reports why a record cannot be used. The [`Indexer`](crate::Indexer) turns each
//! usable raw article into an immutable, search-enhanced [`Article`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Field names accepted for the markup-bearing body, in lookup order.
const BODY_FIELDS: &[&str] = &["body", "content", "html"];

/// Field names accepted for the publish date, in lookup order.
const DATE_FIELDS: &[&str] = &["publishDate", "publishedAt", "published_at", "date"];

/// A search-enhanced article, derived from one corpus record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Unique, stable identifier.
    pub id: String,
    /// Headline.
    pub title: String,
    /// Body with markup stripped.
    pub searchable_content: String,
    /// Author name, empty when unknown.
    pub author: String,
    /// Publication or outlet name, empty when unknown.
    pub source: String,
    /// Publish time, if the record carried a parseable date.
    pub published_at: Option<DateTime<Utc>>,
    /// Most frequent terms of the article, most frequent first.
    pub keywords: Vec<String>,
    /// Number of whitespace-separated words in the searchable content.
    pub word_count: usize,
    /// Estimated reading time in whole minutes.
    pub reading_time: usize,
}

/// Why a corpus record was not indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordDefect {
    /// The record is not a JSON object.
    NotAnObject,
    /// The body field is present but is not a string.
    BodyNotString,
    /// The record has no usable identifier.
    MissingId,
}

impl RecordDefect {
    /// Returns a short description for log output.
    pub fn description(&self) -> &'static str {
        match self {
            Self::NotAnObject => "record is not an object",
            Self::BodyNotString => "body is not a string",
            Self::MissingId => "record has no id",
        }
    }
}

/// The fields of one corpus record, before indexing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawArticle {
    /// Identifier; numeric ids are converted to strings.
    pub id: String,
    /// Headline.
    pub title: String,
    /// Markup-bearing body.
    pub body: String,
    /// Author name.
    pub author: String,
    /// Publication or outlet name.
    pub source: String,
    /// Publish date exactly as supplied.
    pub publish_date: Option<String>,
}

impl RawArticle {
    /// Extracts a raw article from one JSON record.
    ///
    /// Records must be objects. The body is read from `body`, `content` or `html` and
    /// must be a string when present (`null` counts as absent). The id may be a non-blank
    /// string or a number. Other fields are optional and default to empty.
    pub fn from_value(value: &Value) -> Result<Self, RecordDefect> {
        let Value::Object(record) = value else {
            return Err(RecordDefect::NotAnObject);
        };

        let body = match first_present(record, BODY_FIELDS) {
            None => String::new(),
            Some(Value::String(body)) => body.clone(),
            Some(_) => return Err(RecordDefect::BodyNotString),
        };

        let id = match record.get("id") {
            Some(Value::String(id)) if !id.trim().is_empty() => id.trim().to_string(),
            Some(Value::Number(id)) => id.to_string(),
            _ => return Err(RecordDefect::MissingId),
        };

        Ok(Self {
            id,
            title: string_field(record, "title"),
            body,
            author: string_field(record, "author").trim().to_string(),
            source: string_field(record, "source").trim().to_string(),
            publish_date: first_present(record, DATE_FIELDS)
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }
}

/// Returns the first non-null value among `fields`.
fn first_present<'a>(record: &'a Map<String, Value>, fields: &[&str]) -> Option<&'a Value> {
    fields
        .iter()
        .filter_map(|field| record.get(*field))
        .find(|value| !value.is_null())
}

/// Returns a string field, or an empty string when absent or not a string.
fn string_field(record: &Map<String, Value>, field: &str) -> String {
    record
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Parses a publish date.
///
/// Accepts RFC 3339 (`2024-03-01T09:30:00+09:00`), `YYYY-MM-DD HH:MM:SS` (taken as UTC)
/// and `YYYY-MM-DD` (midnight UTC). Anything else yields `None`.
pub fn parse_publish_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(parsed.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}
