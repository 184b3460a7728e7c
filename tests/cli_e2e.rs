//! End-to-end CLI tests for chatstats.
//!
//! These tests verify the complete CLI workflow by running the actual binary
//! with various arguments and checking the output.
//!
//! # Test Categories
//!
//! - **Basic functionality**: Text summary on stdout
//! - **Output formats**: Text, JSON, CSV generation
//! - **Filters**: Query and case sensitivity
//! - **Pagination**: Page selection and clamping
//! - **Config**: Loading and rejecting config files
//! - **Error handling**: Proper error messages for bad input
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Creates a temporary directory with test fixtures.
fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");

    let basic = r#"[
  {"content": "Lunch at noon?", "timestamp": "2024-01-15T10:30:00+00:00",
   "author": {"id": "1", "username": "alice", "global_name": "Alice"}},
  {"content": "sure, lunch works", "timestamp": "2024-01-15T10:31:00+00:00",
   "author": {"id": "2", "username": "bob", "global_name": null}},
  {"content": "https://tenor.com/view/happy-dance-123", "timestamp": "2024-03-02T08:00:00+00:00",
   "author": {"id": "1", "username": "alice", "global_name": "Alice"}},
  {"content": "ping <@2> see https://example.com/a?b=1&c=2", "timestamp": "2024-03-05T09:00:00+00:00",
   "author": {"id": "1", "username": "alice", "global_name": "Alice"},
   "mentions": [{"id": "2", "username": "bob", "global_name": "Bobby"}]}
]"#;
    fs::write(dir.path().join("basic.json"), basic).unwrap();

    // 120 messages in one month, for pagination
    let many: Vec<String> = (0..120)
        .map(|i| {
            format!(
                r#"{{"content": "message {i}", "timestamp": "2024-05-01T00:00:{:02}Z", "author": {{"id": "1", "username": "alice", "global_name": "Alice"}}}}"#,
                i % 60
            )
        })
        .collect();
    fs::write(
        dir.path().join("many.json"),
        format!("[{}]", many.join(",\n")),
    )
    .unwrap();

    fs::write(dir.path().join("empty.json"), "[]").unwrap();
    fs::write(dir.path().join("not_array.json"), r#"{"messages": []}"#).unwrap();
    fs::write(dir.path().join("invalid.json"), "{ not json").unwrap();
    fs::write(
        dir.path().join("bad_timestamp.json"),
        r#"[{"content": "x", "timestamp": "yesterday", "author": {"id": "1", "username": "a"}}]"#,
    )
    .unwrap();

    fs::write(dir.path().join("small_pages.json"), r#"{"page_size": 2}"#).unwrap();
    fs::write(dir.path().join("bad_config.json"), r#"{"page_size": 0}"#).unwrap();

    dir
}

fn chatstats_cmd() -> Command {
    let cmd = std::process::Command::new(env!("CARGO_BIN_EXE_chatstats"));
    Command::from_std(cmd)
}

fn fixture(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_str().unwrap().to_string()
}

fn output_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

mod basic_functionality {
    use super::*;

    #[test]
    fn test_text_summary() {
        let fixtures = setup_fixtures();

        chatstats_cmd()
            .arg(fixture(&fixtures, "basic.json"))
            .assert()
            .success()
            .stdout(predicate::str::contains("📦 chatstats"))
            .stdout(predicate::str::contains("Found 4 messages"))
            .stdout(predicate::str::contains("Jan 2024 - Mar 2024 (4 results)"))
            .stdout(predicate::str::contains("Feb 2024"))
            .stdout(predicate::str::contains("@alice"))
            .stdout(predicate::str::contains("[embed] https://tenor.com/view/happy-dance-123"));
    }

    #[test]
    fn test_empty_export() {
        let fixtures = setup_fixtures();

        chatstats_cmd()
            .arg(fixture(&fixtures, "empty.json"))
            .assert()
            .success()
            .stdout(predicate::str::contains("Found 0 messages"))
            .stdout(predicate::str::contains("No data"));
    }
}

// ============================================================================
// Output Format Tests
// ============================================================================

mod output_formats {
    use super::*;

    #[test]
    fn test_json_to_stdout_is_pure_json() {
        let fixtures = setup_fixtures();

        let output = chatstats_cmd()
            .args([fixture(&fixtures, "basic.json").as_str(), "-f", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["summary"]["total_messages"], 4);
        assert_eq!(value["time_series"].as_array().unwrap().len(), 3);
        assert_eq!(value["time_series"][1]["month"], "Feb 2024");
        assert_eq!(value["monthly_totals"][1]["messages"], 0);
        assert_eq!(value["distribution"][0]["label"], "@alice");
        assert_eq!(value["distribution"][0]["count"], 3);
    }

    #[test]
    fn test_json_feed_rendering() {
        let fixtures = setup_fixtures();

        let output = chatstats_cmd()
            .args([fixture(&fixtures, "basic.json").as_str(), "-f", "json"])
            .output()
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let items = value["page"]["items"].as_array().unwrap();

        assert_eq!(items.len(), 4);
        assert_eq!(items[2]["is_embed"], true);
        assert_eq!(items[2]["embed_url"], "https://tenor.com/view/happy-dance-123");
        let html = items[3]["html"].as_str().unwrap();
        assert!(html.contains(r#"<span class="mention">@Bobby</span>"#));
        assert!(html.contains(r#"href="https://example.com/a?b=1&amp;c=2""#));
    }

    #[test]
    fn test_json_to_file() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "report.json");

        chatstats_cmd()
            .args([
                fixture(&fixtures, "basic.json").as_str(),
                "-f",
                "json",
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Done"));

        let content = fs::read_to_string(&output).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["legend"][0]["color"], "var(--chart-1)");
    }

    #[test]
    fn test_csv_to_stdout() {
        let fixtures = setup_fixtures();

        chatstats_cmd()
            .args([fixture(&fixtures, "basic.json").as_str(), "-f", "csv"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("Month;"))
            .stdout(predicate::str::contains("Feb 2024;0;0"))
            .stdout(predicate::str::contains("📦").not());
    }

    #[test]
    fn test_csv_to_file_is_parseable() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "series.csv");

        chatstats_cmd()
            .args([
                fixture(&fixtures, "basic.json").as_str(),
                "-f",
                "csv",
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .from_path(&output)
            .unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "Month");
        assert_eq!(reader.records().count(), 3);
    }

    #[test]
    fn test_text_to_file() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "summary.txt");

        chatstats_cmd()
            .args([
                fixture(&fixtures, "basic.json").as_str(),
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.starts_with("Range:"));
        assert!(!content.contains("📦"));
    }
}

// ============================================================================
// Filter Tests
// ============================================================================

mod filters {
    use super::*;

    #[test]
    fn test_query_case_insensitive_by_default() {
        let fixtures = setup_fixtures();

        chatstats_cmd()
            .args([fixture(&fixtures, "basic.json").as_str(), "-q", "LUNCH"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Matching:  2"))
            .stdout(predicate::str::contains("Jan 2024 - Jan 2024 (2 results)"));
    }

    #[test]
    fn test_query_case_sensitive() {
        let fixtures = setup_fixtures();

        chatstats_cmd()
            .args([
                fixture(&fixtures, "basic.json").as_str(),
                "-q",
                "Lunch",
                "--case-sensitive",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Matching:  1"));
    }

    #[test]
    fn test_query_highlights_in_json() {
        let fixtures = setup_fixtures();

        let output = chatstats_cmd()
            .args([
                fixture(&fixtures, "basic.json").as_str(),
                "-q",
                "lunch",
                "-f",
                "json",
            ])
            .output()
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["page"]["items"][0]["html"], "<mark>Lunch</mark> at noon?");
        assert_eq!(value["page"]["items"][1]["html"], "sure, <mark>lunch</mark> works");
    }

    #[test]
    fn test_query_without_matches() {
        let fixtures = setup_fixtures();

        chatstats_cmd()
            .args([fixture(&fixtures, "basic.json").as_str(), "-q", "zebra"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No data"));
    }
}

// ============================================================================
// Pagination Tests
// ============================================================================

mod pagination {
    use super::*;

    fn page_json(args: &[&str]) -> serde_json::Value {
        let output = chatstats_cmd().args(args).output().unwrap();
        assert!(output.status.success());
        serde_json::from_slice::<serde_json::Value>(&output.stdout).unwrap()["page"].clone()
    }

    #[test]
    fn test_default_first_page() {
        let fixtures = setup_fixtures();
        let page = page_json(&[&fixture(&fixtures, "many.json"), "-f", "json"]);
        assert_eq!(page["current_page"], 1);
        assert_eq!(page["last_page"], 3);
        assert_eq!(page["page_links"], serde_json::json!([1, 2, 3]));
        assert_eq!(page["items"].as_array().unwrap().len(), 50);
    }

    #[test]
    fn test_last_page() {
        let fixtures = setup_fixtures();
        let page = page_json(&[&fixture(&fixtures, "many.json"), "-f", "json", "-p", "3"]);
        assert_eq!(page["items"].as_array().unwrap().len(), 20);
        assert_eq!(page["items"][0]["content"], "message 100");
        assert_eq!(page["page_links"], serde_json::json!([2, 3]));
        assert_eq!(page["has_next"], false);
    }

    #[test]
    fn test_page_clamped() {
        let fixtures = setup_fixtures();
        let page = page_json(&[&fixture(&fixtures, "many.json"), "-f", "json", "-p", "99"]);
        assert_eq!(page["current_page"], 3);
    }

    #[test]
    fn test_text_page_strip() {
        let fixtures = setup_fixtures();

        chatstats_cmd()
            .args([fixture(&fixtures, "many.json").as_str(), "-p", "2"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Page 2/3  1 [2] 3"))
            .stdout(predicate::str::contains("message 50"));
    }
}

// ============================================================================
// Config Tests
// ============================================================================

mod config {
    use super::*;

    #[test]
    fn test_config_page_size() {
        let fixtures = setup_fixtures();

        let output = chatstats_cmd()
            .args([
                fixture(&fixtures, "basic.json").as_str(),
                "--config",
                fixture(&fixtures, "small_pages.json").as_str(),
                "-f",
                "json",
            ])
            .output()
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["page"]["last_page"], 2);
        assert_eq!(value["page"]["items"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let fixtures = setup_fixtures();

        chatstats_cmd()
            .args([
                fixture(&fixtures, "basic.json").as_str(),
                "--config",
                fixture(&fixtures, "bad_config.json").as_str(),
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("page_size must be at least 1"));
    }

    #[test]
    fn test_missing_config_file() {
        let fixtures = setup_fixtures();

        chatstats_cmd()
            .args([
                fixture(&fixtures, "basic.json").as_str(),
                "--config",
                "/nonexistent/stats.json",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("IO error"));
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod error_handling {
    use super::*;

    #[test]
    fn test_missing_input() {
        chatstats_cmd()
            .arg("/nonexistent/export.json")
            .assert()
            .failure()
            .stderr(predicate::str::contains("❌ Error"));
    }

    #[test]
    fn test_invalid_json() {
        let fixtures = setup_fixtures();

        chatstats_cmd()
            .arg(fixture(&fixtures, "invalid.json"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to parse message export"))
            .stderr(predicate::str::contains("invalid.json"));
    }

    #[test]
    fn test_not_an_array() {
        let fixtures = setup_fixtures();

        chatstats_cmd()
            .arg(fixture(&fixtures, "not_array.json"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("expected a top-level array, found an object"));
    }

    #[test]
    fn test_bad_timestamp() {
        let fixtures = setup_fixtures();

        chatstats_cmd()
            .arg(fixture(&fixtures, "bad_timestamp.json"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid timestamp 'yesterday' in message 0"));
    }

    #[test]
    fn test_invalid_format_flag() {
        let fixtures = setup_fixtures();

        chatstats_cmd()
            .args([fixture(&fixtures, "basic.json").as_str(), "-f", "xml"])
            .assert()
            .failure();
    }
}

// ============================================================================
// Help and Version Tests
// ============================================================================

mod help_and_version {
    use super::*;

    #[test]
    fn test_help() {
        chatstats_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--query"))
            .stdout(predicate::str::contains("--case-sensitive"))
            .stdout(predicate::str::contains("EXAMPLES"));
    }

    #[test]
    fn test_version() {
        chatstats_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_debug_logging_goes_to_stderr() {
        let fixtures = setup_fixtures();

        let output = chatstats_cmd()
            .args([
                fixture(&fixtures, "basic.json").as_str(),
                "-f",
                "json",
                "--log-level",
                "debug",
            ])
            .output()
            .unwrap();
        assert!(output.status.success());
        // stdout stays valid JSON
        serde_json::from_slice::<serde_json::Value>(&output.stdout).unwrap();
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("loaded message export"));
    }

    #[test]
    fn test_rust_log_used_without_flag() {
        let fixtures = setup_fixtures();

        let output = chatstats_cmd()
            .env("RUST_LOG", "debug")
            .args([fixture(&fixtures, "basic.json").as_str(), "-f", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("loaded message export"));
    }

    #[test]
    fn test_invalid_log_level_falls_back_to_warn() {
        let fixtures = setup_fixtures();

        let output = chatstats_cmd()
            .env_remove("RUST_LOG")
            .args([
                fixture(&fixtures, "basic.json").as_str(),
                "-f",
                "json",
                "--log-level",
                "chatstats=loud",
            ])
            .output()
            .unwrap();
        assert!(output.status.success());
        serde_json::from_slice::<serde_json::Value>(&output.stdout).unwrap();
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(!stderr.contains("loaded message export"));
    }
}
