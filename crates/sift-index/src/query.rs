//! Query types.
//!
//! Callers describe a search with a loosely typed [`QueryRequest`] (strings and integers,
//! as they arrive from a command line or a request body). [`Query::try_from`] validates
//! it into the strict [`Query`] the planner works with, so the planner never sees an
//! unknown sort mode, a page below 1 or a page size outside `[1, 100]`.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sift_config::{MAX_PAGE_SIZE, MIN_PAGE_SIZE};

use crate::{Article, QueryError, article::parse_publish_date};

/// Page size used when a request does not name one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Publish date, newest first. Undated articles last.
    Newest,
    /// Publish date, oldest first. Undated articles last.
    Oldest,
    /// Title, case-insensitive ascending.
    Title,
    /// Relevance score, highest first.
    #[default]
    Relevance,
}

impl SortMode {
    /// Returns the mode's name as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Title => "title",
            Self::Relevance => "relevance",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "title" => Ok(Self::Title),
            "relevance" => Ok(Self::Relevance),
            _ => Err(QueryError::UnknownSort {
                value: s.to_string(),
            }),
        }
    }
}

/// Inclusive publish-date window. Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFilter {
    /// Earliest accepted publish time.
    pub start: Option<DateTime<Utc>>,
    /// Latest accepted publish time.
    pub end: Option<DateTime<Utc>>,
}

impl DateFilter {
    /// Returns true if `date` lies inside the window.
    ///
    /// Undated articles never match an active filter.
    pub fn contains(&self, date: Option<DateTime<Utc>>) -> bool {
        let Some(date) = date else {
            return false;
        };
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }

    /// Returns true if neither bound is set.
    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Result filters: conjunctive across kinds, disjunctive within a list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    /// Publish-date window.
    pub date_range: Option<DateFilter>,
    /// Accepted sources. Empty accepts any source.
    pub sources: Vec<String>,
    /// Accepted authors. Empty accepts any author.
    pub authors: Vec<String>,
}

impl Filters {
    /// Returns true if `article` passes every active filter.
    pub fn matches(&self, article: &Article) -> bool {
        let date_ok = self
            .date_range
            .is_none_or(|range| range.is_open() || range.contains(article.published_at));
        let source_ok = self.sources.is_empty() || self.sources.contains(&article.source);
        let author_ok = self.authors.is_empty() || self.authors.contains(&article.author);
        date_ok && source_ok && author_ok
    }

    /// Returns true if no filter is active.
    pub fn is_empty(&self) -> bool {
        self.date_range.is_none_or(|range| range.is_open())
            && self.sources.is_empty()
            && self.authors.is_empty()
    }
}

/// A validated search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Free text; blank matches every article.
    text: String,
    /// Result filters.
    filters: Filters,
    /// Result ordering.
    sort: SortMode,
    /// 1-based page number.
    page: usize,
    /// Results per page, within `[MIN_PAGE_SIZE, MAX_PAGE_SIZE]`.
    page_size: usize,
    /// Enables synonym expansion, fuzzy matching and suggestions.
    advanced: bool,
}

impl Default for Query {
    fn default() -> Self {
        Self::new("")
    }
}

impl Query {
    /// Creates a relevance-sorted query for the first page.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            filters: Filters::default(),
            sort: SortMode::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            advanced: false,
        }
    }

    /// Validates a request, using `default_page_size` when it names none.
    pub fn from_request(
        request: QueryRequest,
        default_page_size: usize,
    ) -> Result<Self, QueryError> {
        let sort = match request.sort.as_deref() {
            Some(sort) => sort.parse()?,
            None => SortMode::default(),
        };

        let page = match request.page {
            None => 1,
            Some(page) if page >= 1 => usize::try_from(page).unwrap_or(usize::MAX),
            Some(page) => return Err(QueryError::InvalidPage { value: page }),
        };

        let page_size = match request.page_size {
            None => default_page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE),
            Some(size) => usize::try_from(size)
                .ok()
                .filter(|size| (MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(size))
                .ok_or(QueryError::PageSizeOutOfRange {
                    value: size,
                    min: MIN_PAGE_SIZE,
                    max: MAX_PAGE_SIZE,
                })?,
        };

        let start = parse_bound(request.from.as_deref(), "from", Bound::Start)?;
        let end = parse_bound(request.to.as_deref(), "to", Bound::End)?;
        let date_range = (start.is_some() || end.is_some()).then_some(DateFilter { start, end });

        Ok(Self {
            text: request.text,
            filters: Filters {
                date_range,
                sources: non_blank(request.sources),
                authors: non_blank(request.authors),
            },
            sort,
            page,
            page_size,
            advanced: request.advanced,
        })
    }

    /// Sets the result filters.
    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    /// Sets the result ordering.
    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// Sets the page number. Pages start at 1; 0 is treated as 1.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the page size, clamped to the accepted range.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE);
        self
    }

    /// Enables or disables advanced matching.
    pub fn with_advanced(mut self, advanced: bool) -> Self {
        self.advanced = advanced;
        self
    }

    /// Returns the free text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns true if the text has no non-whitespace characters.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Returns the result filters.
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Returns the result ordering.
    pub fn sort(&self) -> SortMode {
        self.sort
    }

    /// Returns the 1-based page number.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns true if advanced matching is requested.
    pub fn is_advanced(&self) -> bool {
        self.advanced
    }
}

impl TryFrom<QueryRequest> for Query {
    type Error = QueryError;

    fn try_from(request: QueryRequest) -> Result<Self, Self::Error> {
        Self::from_request(request, DEFAULT_PAGE_SIZE)
    }
}

/// A search request as supplied by a caller, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryRequest {
    /// Free text.
    pub text: String,
    /// Earliest publish date, `YYYY-MM-DD` or RFC 3339.
    pub from: Option<String>,
    /// Latest publish date, `YYYY-MM-DD` (whole day) or RFC 3339.
    pub to: Option<String>,
    /// Accepted sources.
    pub sources: Vec<String>,
    /// Accepted authors.
    pub authors: Vec<String>,
    /// Sort mode name.
    pub sort: Option<String>,
    /// 1-based page number.
    pub page: Option<i64>,
    /// Results per page.
    pub page_size: Option<i64>,
    /// Enables synonym expansion, fuzzy matching and suggestions.
    pub advanced: bool,
}

/// Which end of a date window is being parsed.
#[derive(Debug, Clone, Copy)]
enum Bound {
    /// A date-only start begins at midnight.
    Start,
    /// A date-only end covers the whole day.
    End,
}

/// Parses one bound of a date window.
fn parse_bound(
    raw: Option<&str>,
    name: &'static str,
    bound: Bound,
) -> Result<Option<DateTime<Utc>>, QueryError> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };

    let invalid = || QueryError::InvalidDate {
        bound: name,
        value: raw.to_string(),
    };

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let time = match bound {
            Bound::Start => date.and_hms_opt(0, 0, 0),
            Bound::End => date.and_hms_nano_opt(23, 59, 59, 999_999_999),
        };
        return time.map(|t| Some(t.and_utc())).ok_or_else(invalid);
    }

    parse_publish_date(raw).map(Some).ok_or_else(invalid)
}

/// Drops blank entries and trims the rest.
fn non_blank(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}
