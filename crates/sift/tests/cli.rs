//! CLI integration tests for sift commands.
//!
//! These tests focus on exit codes and the JSON output, not on table formatting which may
//! change.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

/// Helper to create a temp directory for tests.
fn temp_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to get a sift command.
fn sift() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("sift").unwrap()
}

/// Helper to run `sift` with HOME isolated to the provided directory.
fn sift_with_home(home: &Path) -> Command {
    let mut cmd = sift();
    cmd.env("HOME", home);
    cmd.env_remove("SIFT_LOG");
    cmd.env_remove("SIFT_CONFIG");
    cmd
}

/// Strips ANSI escape sequences from a string.
fn strip_ansi(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            output.push(ch);
        }
    }

    output
}

/// Three articles covering Korean and English text, two sources and two years.
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

/// A site directory with a corpus and a config naming it, plus an isolated home.
struct Site {
    /// Site directory holding `.sift.toml` and `articles.json`.
    dir: TempDir,
    /// Home directory with no global config.
    home: TempDir,
}

impl Site {
    /// Creates a site whose config names `articles.json`.
    fn new() -> Self {
        Self::with_config("[corpus]\npath = \"articles.json\"\n")
    }

    /// Creates a site with the given `.sift.toml` contents.
    fn with_config(config: &str) -> Self {
        let dir = temp_dir();
        let home = temp_dir();
        fs::write(
            dir.path().join("articles.json"),
            serde_json::to_string_pretty(&articles()).unwrap(),
        )
        .unwrap();
        fs::write(dir.path().join(".sift.toml"), config).unwrap();
        Self { dir, home }
    }

    /// Returns a command running in the site directory.
    fn cmd(&self) -> Command {
        let mut cmd = sift_with_home(self.home.path());
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Runs a command that must succeed and parses its stdout as JSON.
    fn json(&self, args: &[&str]) -> Value {
        let output = self.cmd().args(args).arg("--json").output().unwrap();
        assert!(
            output.status.success(),
            "{args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).unwrap()
    }

    /// Runs a command that must succeed and returns its stdout without styling.
    fn stdout(&self, args: &[&str]) -> String {
        let output = self.cmd().args(args).output().unwrap();
        assert!(
            output.status.success(),
            "{args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        strip_ansi(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Collects result ids from a search JSON document.
fn result_ids(value: &Value) -> Vec<String> {
    value["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}

mod init {
    use super::*;

    #[test]
    fn creates_config_file() {
        let dir = temp_dir();
        let home = temp_dir();

        sift_with_home(home.path())
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .success()
            .stdout(predicate::str::contains("Created"));

        let contents = fs::read_to_string(dir.path().join(".sift.toml")).unwrap();
        assert!(contents.contains("# [corpus]"));
        assert!(!home.path().join(".sift.toml").exists());
    }

    #[test]
    fn fails_if_config_exists() {
        let dir = temp_dir();
        let home = temp_dir();
        fs::write(dir.path().join(".sift.toml"), "existing").unwrap();

        sift_with_home(home.path())
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));

        let contents = fs::read_to_string(dir.path().join(".sift.toml")).unwrap();
        assert_eq!(contents, "existing");
    }

    #[test]
    fn force_overwrites_existing() {
        let dir = temp_dir();
        let home = temp_dir();
        fs::write(dir.path().join(".sift.toml"), "old content").unwrap();

        sift_with_home(home.path())
            .current_dir(dir.path())
            .args(["init", "--force"])
            .assert()
            .success();

        let contents = fs::read_to_string(dir.path().join(".sift.toml")).unwrap();
        assert!(!contents.contains("old content"));
    }

    #[test]
    fn works_with_invalid_existing_config() {
        let dir = temp_dir();
        let home = temp_dir();
        fs::write(dir.path().join(".sift.toml"), "not [valid toml").unwrap();

        sift_with_home(home.path())
            .current_dir(dir.path())
            .args(["init", "--force"])
            .assert()
            .success();
    }

    #[test]
    fn global_writes_home_config() {
        let dir = temp_dir();
        let home = temp_dir();

        sift_with_home(home.path())
            .current_dir(dir.path())
            .args(["init", "--global"])
            .assert()
            .success();

        let contents = fs::read_to_string(home.path().join(".sift.toml")).unwrap();
        assert!(contents.contains("# [synonyms]"));
        assert!(!dir.path().join(".sift.toml").exists());
    }
}

mod search {
    use super::*;

    #[test]
    fn ranks_title_match_first() {
        let site = Site::new();
        let value = site.json(&["search", "AI"]);

        assert_eq!(value["totalCount"], 2);
        assert_eq!(result_ids(&value)[0], "a1");
        assert!(value["results"][0]["score"].as_f64().unwrap() > 0.0);
        assert!(value.get("fuzzy").is_none());
    }

    #[test]
    fn uses_config_named_by_environment() {
        let site = Site::new();
        let elsewhere = temp_dir();

        let output = sift_with_home(site.home.path())
            .current_dir(elsewhere.path())
            .env("SIFT_CONFIG", site.dir.path().join(".sift.toml"))
            .args(["search", "semiconductor", "--json"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let value: Value = serde_json::from_slice(&output.stdout).unwrap();

        assert_eq!(result_ids(&value), ["a3"]);
    }

    #[test]
    fn missing_environment_config_fails() {
        let site = Site::new();

        site.cmd()
            .env("SIFT_CONFIG", "absent.toml")
            .args(["search", "ai"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("absent.toml"));
    }

    #[test]
    fn blank_query_lists_every_article() {
        let site = Site::new();
        let value = site.json(&["search"]);

        assert_eq!(value["totalCount"], 3);
        assert_eq!(value["totalPages"], 1);
        assert_eq!(value["hasNextPage"], false);
    }

    #[test]
    fn filters_by_source() {
        let site = Site::new();
        let value = site.json(&["search", "--source", "Herald"]);

        assert_eq!(result_ids(&value), ["a2"]);
    }

    #[test]
    fn filters_by_date_and_sorts_oldest_first() {
        let site = Site::new();
        let value = site.json(&[
            "search",
            "--from",
            "2025-01-01",
            "--to",
            "2025-12-31",
            "--sort",
            "oldest",
        ]);

        assert_eq!(result_ids(&value), ["a1", "a2"]);
    }

    #[test]
    fn pages_through_results() {
        let site = Site::new();
        let value = site.json(&["search", "--sort", "title", "-n", "2", "-p", "2"]);

        assert_eq!(value["currentPage"], 2);
        assert_eq!(value["totalPages"], 2);
        assert_eq!(value["hasPrevPage"], true);
        assert_eq!(result_ids(&value).len(), 1);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let site = Site::new();
        let value = site.json(&["search", "-p", "99"]);

        assert!(result_ids(&value).is_empty());
        assert_eq!(value["totalCount"], 3);
        assert_eq!(value["hasPrevPage"], true);
    }

    #[test]
    fn advanced_corrects_typos() {
        let site = Site::new();
        let value = site.json(&["search", "인공지늠", "--advanced"]);

        assert_eq!(result_ids(&value), ["a1"]);
        assert_eq!(value["fuzzy"]["fuzzyMatchCount"], 1);
        assert_eq!(
            value["fuzzy"]["expansion"]["fuzzyMatches"][0]["fuzzy"],
            "인공지능"
        );
        assert_eq!(
            value["suggestions"]["corrections"][0]["suggestions"][0],
            "인공지능"
        );
    }

    #[test]
    fn table_output_shows_titles() {
        let site = Site::new();
        let stdout = site.stdout(&["search", "AI"]);

        assert!(stdout.contains("AI 기술 혁신"));
        assert!(stdout.contains("page 1 of 1, 2 results"));
    }

    #[test]
    fn unknown_sort_fails() {
        let site = Site::new();
        site.cmd()
            .args(["search", "--sort", "popular"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown sort mode"));
    }

    #[test]
    fn out_of_range_page_size_fails() {
        let site = Site::new();
        site.cmd()
            .args(["search", "-n", "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("page size"));
    }

    #[test]
    fn malformed_date_fails() {
        let site = Site::new();
        site.cmd()
            .args(["search", "--from", "yesterday"])
            .assert()
            .failure();
    }

    #[test]
    fn fails_without_corpus() {
        let dir = temp_dir();
        let home = temp_dir();

        sift_with_home(home.path())
            .current_dir(dir.path())
            .args(["search", "ai"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("no corpus configured"));
    }

    #[test]
    fn fails_when_corpus_is_missing() {
        let dir = temp_dir();
        let home = temp_dir();
        fs::write(
            dir.path().join(".sift.toml"),
            "[corpus]\npath = \"absent.json\"\n",
        )
        .unwrap();

        sift_with_home(home.path())
            .current_dir(dir.path())
            .args(["search", "ai"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("could not load corpus"));
    }

    #[test]
    fn corpus_flag_overrides_config() {
        let site = Site::new();
        let other = site.dir.path().join("other.json");
        fs::write(
            &other,
            json!([{"id": "o1", "title": "Other AI news", "body": ""}]).to_string(),
        )
        .unwrap();

        let value = site.json(&["search", "ai", "--corpus", "other.json"]);
        assert_eq!(result_ids(&value), ["o1"]);
    }

    #[test]
    fn corpus_flag_works_without_config() {
        let dir = temp_dir();
        let home = temp_dir();
        fs::write(dir.path().join("a.json"), articles().to_string()).unwrap();

        let output = sift_with_home(home.path())
            .current_dir(dir.path())
            .args(["--corpus", "a.json", "search", "--json"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let value: Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["totalCount"], 3);
    }
}

mod suggest {
    use super::*;

    #[test]
    fn suggests_corrections_as_json() {
        let site = Site::new();
        let value = site.json(&["suggest", "인공지늠"]);

        assert_eq!(value["corrections"][0]["original"], "인공지늠");
        assert_eq!(value["corrections"][0]["suggestions"][0], "인공지능");
    }

    #[test]
    fn prints_corrections() {
        let site = Site::new();
        let stdout = site.stdout(&["suggest", "인공지늠"]);

        assert!(stdout.contains("Did you mean:"));
        assert!(stdout.contains("인공지늠 → 인공지능"));
    }

    #[test]
    fn requires_text() {
        let site = Site::new();
        site.cmd().arg("suggest").assert().failure();
    }
}

mod meta {
    use super::*;

    #[test]
    fn lists_authors_sources_and_dates() {
        let site = Site::new();
        let value = site.json(&["meta"]);

        assert_eq!(value["authors"], json!(["Kim", "Lee", "Park"]));
        assert_eq!(value["sources"], json!(["Daily", "Herald"]));
        assert!(
            value["dateRange"]["earliest"]
                .as_str()
                .unwrap()
                .starts_with("2024-01-01")
        );
        assert!(
            value["dateRange"]["latest"]
                .as_str()
                .unwrap()
                .starts_with("2025-06-15")
        );
    }

    #[test]
    fn prints_sections() {
        let site = Site::new();
        let stdout = site.stdout(&["meta"]);

        assert!(stdout.contains("Sources (2):"));
        assert!(stdout.contains("Authors (3):"));
        assert!(stdout.contains("2024-01-01 to 2025-06-15"));
    }
}

mod status {
    use super::*;

    #[test]
    fn shows_corpus_and_index() {
        let site = Site::new();
        let stdout = site.stdout(&["status"]);

        assert!(stdout.contains("Config files:"));
        assert!(stdout.contains("(3 records)"));
        assert!(stdout.contains("articles: 3"));
        assert!(stdout.contains("page_size = 10"));
    }

    #[test]
    fn reports_missing_corpus() {
        let site = Site::with_config("[corpus]\npath = \"absent.json\"\n");
        let stdout = site.stdout(&["status"]);

        assert!(stdout.contains("[missing]"));
        assert!(!stdout.contains("Index:"));
    }

    #[test]
    fn lists_config_named_by_environment() {
        let site = Site::new();
        let elsewhere = temp_dir();

        let output = sift_with_home(site.home.path())
            .current_dir(elsewhere.path())
            .env("SIFT_CONFIG", site.dir.path().join(".sift.toml"))
            .arg("status")
            .output()
            .unwrap();
        assert!(output.status.success());
        let stdout = strip_ansi(&String::from_utf8_lossy(&output.stdout));

        assert!(stdout.contains("(SIFT_CONFIG)"));
        assert!(stdout.contains("(3 records)"));
    }

    #[test]
    fn works_without_config() {
        let dir = temp_dir();
        let home = temp_dir();

        sift_with_home(home.path())
            .current_dir(dir.path())
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("not configured"));
    }
}

mod check {
    use super::*;

    #[test]
    fn valid_config_passes() {
        let site = Site::new();
        let stdout = site.stdout(&["check"]);

        assert!(stdout.contains("No issues found."));
    }

    #[test]
    fn missing_corpus_fails() {
        let site = Site::with_config("[corpus]\npath = \"absent.json\"\n");
        site.cmd()
            .arg("check")
            .assert()
            .failure()
            .stdout(predicate::str::contains("does not exist"));
    }

    #[test]
    fn stopword_synonym_fails() {
        let site = Site::with_config(
            "[corpus]\npath = \"articles.json\"\n\n[synonyms]\nai = [\"the\"]\n",
        );
        site.cmd()
            .arg("check")
            .assert()
            .failure()
            .stdout(predicate::str::contains("normalizes to nothing"));
    }

    #[test]
    fn no_config_is_not_an_error() {
        let dir = temp_dir();
        let home = temp_dir();

        sift_with_home(home.path())
            .current_dir(dir.path())
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("No configuration files found."));
    }

    #[test]
    fn invalid_toml_fails() {
        let site = Site::with_config("[corpus\npath = ");
        site.cmd()
            .arg("check")
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }
}
