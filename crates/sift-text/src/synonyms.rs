//! Synonym table for query expansion.
//!
//! Synonyms are declared as groups of equivalent terms. Within a group the relation is
//! symmetric: every member lists every other member. A term that belongs to several
//! groups collects the members of all of them. The relation is not transitive across
//! groups.
//!
//! Every member is run through the [`Normalizer`] before it is stored, so lookups use the
//! same canonical form as the inverted index. Members that do not normalize to exactly
//! one term (blank entries, stop-words, multi-word phrases) are ignored.

use std::{
    collections::{BTreeMap, HashMap},
    iter,
};

use crate::normalizer::Normalizer;

/// Synonym groups shipped with sift.
static BUILTIN_GROUPS: &[&[&str]] = &[
    &["ai", "인공지능", "에이아이"],
    &["ev", "전기차", "전기자동차"],
    &["semiconductor", "반도체", "chip"],
    &["economy", "경제"],
    &["politics", "정치"],
    &["election", "선거", "투표"],
    &["government", "정부"],
    &["president", "대통령"],
    &["stock", "주식", "증시"],
    &["market", "시장"],
    &["climate", "기후"],
    &["startup", "스타트업", "벤처"],
    &["crypto", "암호화폐", "가상화폐", "가상자산"],
    &["covid", "코로나"],
    &["health", "건강", "보건"],
    &["education", "교육"],
    &["technology", "기술", "tech"],
];

/// Term to equivalent-terms lookup.
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    /// Normalized term -> its equivalents, in declaration order.
    entries: HashMap<String, Vec<String>>,
}

impl SynonymTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table holding the built-in groups.
    pub fn builtin(normalizer: &Normalizer) -> Self {
        let mut table = Self::new();
        for group in BUILTIN_GROUPS {
            table.add_group(normalizer, group.iter().copied());
        }
        table
    }

    /// Creates a table holding the built-in groups plus configured ones.
    ///
    /// Each configured entry forms a group of its head term and the listed terms.
    pub fn with_configured(
        normalizer: &Normalizer,
        configured: &BTreeMap<String, Vec<String>>,
    ) -> Self {
        let mut table = Self::builtin(normalizer);
        for (head, terms) in configured {
            table.add_group(
                normalizer,
                iter::once(head.as_str()).chain(terms.iter().map(String::as_str)),
            );
        }
        table
    }

    /// Adds a group of equivalent terms.
    pub fn add_group<'a>(
        &mut self,
        normalizer: &Normalizer,
        members: impl IntoIterator<Item = &'a str>,
    ) {
        let mut group: Vec<String> = Vec::new();
        for member in members {
            let mut terms = normalizer.normalize(member);
            if terms.len() != 1 {
                continue;
            }
            let term = terms.remove(0);
            if !group.contains(&term) {
                group.push(term);
            }
        }

        for term in &group {
            let equivalents = self.entries.entry(term.clone()).or_default();
            for other in &group {
                if other != term && !equivalents.contains(other) {
                    equivalents.push(other.clone());
                }
            }
        }
        self.entries.retain(|_, equivalents| !equivalents.is_empty());
    }

    /// Returns the equivalents of a normalized term.
    pub fn lookup(&self, term: &str) -> &[String] {
        self.entries
            .get(term)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the number of terms that have at least one equivalent.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table holds no synonyms.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
