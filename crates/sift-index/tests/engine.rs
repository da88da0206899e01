#![allow(clippy::tests_outside_test_module)]
//! End-to-end tests for the search engine over file and memory stores.

use std::{collections::BTreeMap, fs, path::Path, sync::Arc, thread, time::Duration};

use serde_json::{Value, json};
use sift_config::Config;
use sift_index::{
    FileStore, MemoryStore, Query, QueryRequest, SearchEngine, SearchResponse, SortMode,
    TermKind,
};
use tempfile::TempDir;

fn articles() -> Value {
    json!([
        {
            "id": "a1",
            "title": "AI 기술 혁신",
            "body": "<p>인공지능 기술이 산업을 바꾼다</p>",
            "author": "Kim",
            "source": "Daily",
            "publishDate": "2025-03-01"
        },
        {
            "id": "a2",
            "title": "전기차 시장 동향",
            "content": "전기차 판매가 늘고 배터리 가격이 내려간다",
            "author": "Lee",
            "source": "Herald",
            "publishedAt": "2025-06-15T09:00:00Z"
        },
        {
            "id": "a3",
            "title": "Semiconductor outlook",
            "body": "Chip makers expect AI demand to lift the semiconductor market",
            "author": "Park",
            "source": "Daily",
            "date": "2024-01-01"
        }
    ])
}

fn write_corpus(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn file_engine() -> (TempDir, SearchEngine<FileStore>) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("articles.json");
    write_corpus(&path, &articles());
    let engine = SearchEngine::new(FileStore::new(path), &Config::default());
    (temp, engine)
}

fn ids(response: &SearchResponse) -> Vec<String> {
    response.page.ids().map(str::to_string).collect()
}

#[test]
fn test_exact_match_scenario() {
    let (_temp, engine) = file_engine();
    let response = engine.search(&Query::new("AI"));

    let resolved = response.resolve();
    assert_eq!(resolved[0].article.id, "a1");
    assert!(resolved[0].score.unwrap() > 0.0);
    assert!(response.fuzzy.is_none());
    assert!(response.suggestions.is_none());
}

#[test]
fn test_empty_query_scenario() {
    let (_temp, engine) = file_engine();
    let query = Query::try_from(QueryRequest {
        page_size: Some(5),
        ..Default::default()
    })
    .unwrap();
    let response = engine.search(&query);

    assert_eq!(response.page.total_count, 3);
    assert_eq!(response.page.total_pages, 1);
}

#[test]
fn test_date_filter_scenario() {
    let (_temp, engine) = file_engine();
    let query = Query::try_from(QueryRequest {
        from: Some("2025-01-01".to_string()),
        to: Some("2025-12-31".to_string()),
        sort: Some("oldest".to_string()),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(ids(&engine.search(&query)), ["a1", "a2"]);
}

#[test]
fn test_fuzzy_correction_scenario() {
    let (_temp, engine) = file_engine();
    let response = engine.search(&Query::new("인공지늠").with_advanced(true));

    assert_eq!(ids(&response), ["a1"]);
    let report = response.fuzzy.as_ref().unwrap();
    assert_eq!(report.fuzzy_match_count, 1);
    assert_eq!(report.expansion.fuzzy_matches[0].fuzzy, "인공지능");

    let suggestions = response.suggestions.as_ref().unwrap();
    assert_eq!(suggestions.corrections[0].suggestions[0], "인공지능");
    assert_eq!(engine.suggest("인공지늠").corrections[0].original, "인공지늠");
}

#[test]
fn test_out_of_range_page_scenario() {
    let (_temp, engine) = file_engine();
    let response = engine.search(&Query::new("").with_page(999));

    assert!(response.page.is_empty());
    assert!(response.page.has_prev_page);
    assert!(!response.page.has_next_page);
    assert!(response.resolve().is_empty());
}

#[test]
fn test_configured_synonyms_expand_queries() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("articles.json");
    write_corpus(&path, &articles());

    let mut synonyms = BTreeMap::new();
    synonyms.insert("outlook".to_string(), vec!["전망".to_string()]);
    let config = Config {
        synonyms,
        ..Default::default()
    };
    let engine = SearchEngine::new(FileStore::new(path), &config);

    let response = engine.search(&Query::new("전망").with_advanced(true));
    assert_eq!(ids(&response), ["a3"]);
    let expansion = &response.fuzzy.as_ref().unwrap().expansion;
    assert!(
        expansion
            .terms
            .iter()
            .any(|t| t.term == "outlook" && t.kind == TermKind::Synonym)
    );
}

#[test]
fn test_metadata_reflects_corpus() {
    let (_temp, engine) = file_engine();
    let metadata = engine.metadata();

    assert_eq!(metadata.authors, ["Kim", "Lee", "Park"]);
    assert_eq!(metadata.sources, ["Daily", "Herald"]);
    let span = metadata.date_range.unwrap();
    assert_eq!(span.earliest.date_naive().to_string(), "2024-01-01");
    assert_eq!(span.latest.date_naive().to_string(), "2025-06-15");
}

#[test]
fn test_corpus_change_is_picked_up() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("articles.json");
    write_corpus(&path, &articles());
    let engine = SearchEngine::new(FileStore::new(&path), &Config::default());

    assert_eq!(engine.search(&Query::new("")).page.total_count, 3);
    let generation = engine.generation();

    // Grow the file so the signature changes even on coarse mtime clocks
    let mut grown = articles();
    if let Value::Array(records) = &mut grown {
        records.push(json!({"id": "a4", "title": "New arrival", "body": "fresh news"}));
    }
    thread::sleep(Duration::from_millis(10));
    write_corpus(&path, &grown);

    assert_eq!(engine.search(&Query::new("")).page.total_count, 4);
    assert_eq!(engine.generation(), generation + 1);
}

#[test]
fn test_missing_corpus_yields_empty_results() {
    let temp = TempDir::new().unwrap();
    let engine = SearchEngine::new(
        FileStore::new(temp.path().join("absent.json")),
        &Config::default(),
    );

    let response = engine.search(&Query::new("ai"));
    assert_eq!(response.page.total_count, 0);
    assert!(engine.metadata().date_range.is_none());
}

#[test]
fn test_memory_store_and_invalidate() {
    let engine = SearchEngine::new(
        MemoryStore::new(vec![json!({"id": "m1", "title": "Market wrap", "body": ""})]),
        &Config::default(),
    );
    assert_eq!(ids(&engine.search(&Query::new("market"))), ["m1"]);

    engine
        .store()
        .replace(vec![json!({"id": "m2", "title": "Market open", "body": ""})]);
    assert_eq!(ids(&engine.search(&Query::new("market"))), ["m2"]);

    let before = engine.generation();
    engine.invalidate();
    engine.index();
    assert_eq!(engine.generation(), before + 1);
}

#[test]
fn test_response_serializes_camel_case() {
    let (_temp, engine) = file_engine();
    let response = engine.search(
        &Query::new("ai")
            .with_sort(SortMode::Newest)
            .with_advanced(true),
    );
    let value = serde_json::to_value(&response).unwrap();

    assert!(value.get("totalCount").is_some());
    assert!(value.get("hasNextPage").is_some());
    assert!(value["fuzzy"].get("exactMatchCount").is_some());
    assert!(value["suggestions"].get("related").is_some());
    assert!(value.get("snapshot").is_none());
}

#[test]
fn test_engine_is_shared_across_threads() {
    let (_temp, engine) = file_engine();
    let engine = Arc::new(engine);

    let totals: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&engine);
                scope.spawn(move || engine.search(&Query::new("")).page.total_count)
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(totals.iter().all(|&total| total == 3));
    assert_eq!(engine.generation(), 1);
}
