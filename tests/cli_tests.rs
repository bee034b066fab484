//! End-to-end runs of the `oddsboard` binary against a temporary database.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use chrono::{Duration, Utc};
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

struct Board {
    dir: TempDir,
    config: PathBuf,
}

impl Board {
    fn new() -> Self {
        Self::with_config("")
    }

    fn with_config(extra: &str) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let db = dir.path().join("board.db");
        let config = dir.path().join("oddsboard.toml");
        let contents = format!(
            "[logging]\nlevel = \"warn\"\n\n[database]\npath = \"{}\"\n{extra}",
            db.display()
        );
        fs::write(&config, contents).expect("write config");
        Self { dir, config }
    }

    fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("oddsboard");
        cmd.env_remove("ODDSBOARD_DATABASE")
            .env_remove("RUST_LOG")
            .current_dir(self.dir.path())
            .arg("--config")
            .arg(&self.config);
        cmd
    }

    /// Run with `--json` and return the line carrying the command result.
    fn json(&self, args: &[&str]) -> Value {
        let output = self.cmd().arg("--json").args(args).output().expect("run");
        assert!(
            output.status.success(),
            "{args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        command_line(&output.stdout)
    }

    fn create_offer(&self, name: &str) -> String {
        let body = json!({
            "name": name,
            "enabled": true,
            "playLink": format!("https://{name}.example"),
            "promoInfo": "Free bet",
        });
        let result = self.json(&["offer", "create", "--data", &body.to_string()]);
        result["entity"]["id"].as_str().expect("id").to_string()
    }

    fn offer_names(&self) -> Vec<String> {
        let result = self.json(&["offer", "list", "--disabled"]);
        result["page"]["items"]
            .as_array()
            .expect("items")
            .iter()
            .map(|item| item["name"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

fn command_line(stdout: &[u8]) -> Value {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter_map(|line| serde_json::from_str::<Value>(line).ok())
        .find(|value| value.get("command").is_some())
        .expect("a JSON command line on stdout")
}

fn odd_body(home: &str, kickoff: chrono::DateTime<Utc>) -> String {
    json!({
        "eventDateTime": kickoff.to_rfc3339(),
        "league": "Premier League",
        "homeTeam": home,
        "awayTeam": "Chelsea",
        "odds": {
            "A": { "oneX": { "homeWin": 2.1, "draw": 3.0, "awayWin": 3.5 } },
            "B": { "oneX": { "homeWin": 2.3, "draw": 2.9, "awayWin": 3.6 }, "suspended": true }
        }
    })
    .to_string()
}

#[test]
fn test_help() {
    cargo_bin_cmd!("oddsboard")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("offer"))
        .stdout(predicate::str::contains("odd"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version() {
    cargo_bin_cmd!("oddsboard")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("oddsboard"));
}

#[test]
fn test_offer_lifecycle() {
    let board = Board::new();
    let _alpha = board.create_offer("alpha");
    let beta = board.create_offer("beta");
    let gamma = board.create_offer("gamma");
    assert_eq!(board.offer_names(), ["alpha", "beta", "gamma"]);

    let moved = board.json(&["offer", "reorder", &gamma, "1"]);
    assert_eq!(moved["entity"]["order"], 1);
    assert_eq!(board.offer_names(), ["gamma", "alpha", "beta"]);

    let removed = board.json(&["offer", "delete", &beta]);
    assert_eq!(removed["removed"]["order"], 3);

    let page = board.json(&["offer", "list"]);
    assert_eq!(page["page"]["totalCount"], 2);
    assert_eq!(page["page"]["items"][1]["order"], 2);
}

#[test]
fn test_offer_list_table() {
    let board = Board::new();
    board.create_offer("alpha");

    board
        .cmd()
        .args(["offer", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha"))
        .stdout(predicate::str::contains("page 1 of 1 (1 total)"));
}

#[test]
fn test_update_changes_fields_but_not_rank() {
    let board = Board::new();
    board.create_offer("alpha");
    let beta = board.create_offer("beta");

    let updated = board.json(&[
        "offer",
        "update",
        &beta,
        "--data",
        r#"{"rating": 4.5, "enabled": false}"#,
    ]);
    assert_eq!(updated["entity"]["order"], 2);
    assert_eq!(updated["entity"]["rating"], 4.5);

    let visible = board.json(&["offer", "list"]);
    assert_eq!(visible["page"]["totalCount"], 1);
}

#[test]
fn test_reorder_out_of_range_fails() {
    let board = Board::new();
    let alpha = board.create_offer("alpha");
    board.create_offer("beta");

    board
        .cmd()
        .args(["offer", "reorder", &alpha, "5"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("order 5 is outside 1..=2"));
    assert_eq!(board.offer_names(), ["alpha", "beta"]);
}

#[test]
fn test_unknown_id_reports_not_found() {
    let board = Board::new();

    board
        .cmd()
        .args(["odd", "get", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "the odd with the given ID does not exist: missing",
        ));
}

#[test]
fn test_create_rejects_unknown_fields() {
    let board = Board::new();

    board
        .cmd()
        .args(["offer", "create", "--data", r#"{"name":"x","colour":"red"}"#])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid body"));
}

#[test]
fn test_create_reads_body_from_file() {
    let board = Board::new();
    let body = board.dir.path().join("odd.json");
    fs::write(&body, odd_body("Arsenal", Utc::now() + Duration::days(2))).expect("write body");

    let created = board.json(&["odd", "create", "--file", &body.to_string_lossy()]);
    let best = &created["entity"]["bestCalculatedOdds"];
    assert_eq!(best["homeWin"]["bookie"], "A");
    assert_eq!(best["homeWin"]["value"], 2.1);
    assert_eq!(best["awayWin"]["value"], 3.5);
}

#[test]
fn test_malformed_submission_is_rejected() {
    let board = Board::new();
    let body = json!({
        "eventDateTime": (Utc::now() + Duration::days(1)).to_rfc3339(),
        "league": "Serie A",
        "homeTeam": "Inter",
        "awayTeam": "Milan",
        "odds": { "A": { "suspended": false } }
    });

    board
        .cmd()
        .args(["odd", "create", "--data", &body.to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("oneX not provided for bookie A"));

    let page = board.json(&["odd", "list", "--disabled"]);
    assert_eq!(page["page"]["totalCount"], 0);
}

#[test]
fn test_prune_removes_started_events() {
    let board = Board::new();
    let now = Utc::now();
    board.json(&["odd", "create", "--data", &odd_body("Past", now - Duration::days(1))]);
    board.json(&["odd", "create", "--data", &odd_body("Future", now + Duration::days(1))]);

    let pruned = board.json(&["odd", "prune", "--before", &now.to_rfc3339()]);
    assert_eq!(pruned["pruned"], 1);

    let page = board.json(&["odd", "list"]);
    assert_eq!(page["page"]["items"][0]["homeTeam"], "Future");
    assert_eq!(page["page"]["items"][0]["order"], 1);
}

#[test]
fn test_page_size_above_cap_is_rejected() {
    let board = Board::with_config("\n[listing]\nmax_page_size = 5\n");

    board
        .cmd()
        .args(["offer", "list", "--size", "6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pageSize"));
}

#[test]
fn test_config_validate_reports_invalid_value() {
    let board = Board::with_config("pool_size = 0\n");

    board
        .cmd()
        .args(["config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pool_size"));
}

#[test]
fn test_config_show_applies_database_override() {
    let board = Board::new();
    let elsewhere = board.dir.path().join("elsewhere.db");

    let output = board
        .cmd()
        .env("ODDSBOARD_DATABASE", &elsewhere)
        .args(["--json", "config", "show"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let shown = command_line(&output.stdout);
    assert_eq!(shown["from_file"], true);
    assert_eq!(
        Path::new(shown["config"]["database"]["path"].as_str().expect("path")),
        elsewhere
    );
}

#[test]
fn test_json_errors_are_structured() {
    let board = Board::new();

    let output = board
        .cmd()
        .args(["--json", "offer", "delete", "ghost"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));

    let line: Value = String::from_utf8_lossy(&output.stderr)
        .lines()
        .filter_map(|line| serde_json::from_str::<Value>(line).ok())
        .find(|value| value.get("type").is_some())
        .expect("JSON error line");
    assert_eq!(line["type"], "error");
}
