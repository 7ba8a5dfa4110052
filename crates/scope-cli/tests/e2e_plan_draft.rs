//! E2E tests for the writing commands: `plan`, `draft` and config errors.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn scope_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("scope"));
    cmd.current_dir(dir);
    cmd.env("SCOPE_LOG", "error");
    cmd.env_remove("FORMAT");
    cmd
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn success_json(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

fn failure_code(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(!output.status.success(), "command unexpectedly succeeded");
    let err: Value = serde_json::from_slice(&output.stderr).expect("JSON error on stderr");
    err["error"]["error_code"].as_str().unwrap().to_string()
}

const CANDIDATES: &str = r#"[
  {"category": "learn", "slug": "l6", "title": "L6", "priority": 6},
  {"category": "learn", "slug": "l9", "title": "L9", "priority": 9},
  {"category": "learn", "slug": "l8", "title": "L8", "priority": 8},
  {"category": "learn", "slug": "l7", "title": "L7", "priority": 7},
  {"bucket": "markets", "slug": "m5", "title": "M5", "priority": 5},
  {"bucket": "markets", "slug": "m4", "title": "M4", "priority": 4},
  {"category": "best", "slug": "b10", "title": "B10", "priority": 10}
]"#;

fn slugs(plan: &Value) -> Vec<String> {
    plan["plan"]["selected"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["slug"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// plan
// ---------------------------------------------------------------------------

#[test]
fn plan_follows_foundation_mix() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "topics.json", CANDIDATES);

    let plan = success_json(
        scope_cmd(dir.path()).args(["plan", "--candidates", "topics.json", "--json"]),
    );
    assert_eq!(plan["phase"]["resolution"], "defaulted");
    assert_eq!(plan["candidates_considered"], 7);
    assert_eq!(slugs(&plan), vec!["l9", "l8", "l7", "m5", "m4"]);
    assert_eq!(plan["plan"]["unfilled_slots"], 0);
    assert!(plan.get("run_log").is_none());
}

#[test]
fn plan_reads_candidates_from_stdin() {
    let dir = TempDir::new().unwrap();
    let plan = success_json(
        scope_cmd(dir.path())
            .args(["plan", "--candidates", "-", "--budget", "2", "--json"])
            .write_stdin(format!("```json\n{CANDIDATES}\n```")),
    );
    assert_eq!(slugs(&plan), vec!["l9", "m5"]);
}

#[test]
fn plan_record_writes_run_log() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "topics.json", CANDIDATES);

    let plan = success_json(scope_cmd(dir.path()).args([
        "plan",
        "--candidates",
        "topics.json",
        "--record",
        "--json",
    ]));
    let path = plan["run_log"].as_str().expect("run log path");
    assert!(path.contains("runs"));

    let log: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(log["phase"], "foundation");
    assert_eq!(log["budget"], 5);
    assert_eq!(log["articles_planned"], 5);
    assert_eq!(log["slots"]["learn"], 3);
    assert_eq!(log["slots"]["markets"], 2);
    assert_eq!(log["plan"].as_array().unwrap().len(), 5);
}

#[test]
fn plan_include_gaps_adds_core_topics() {
    let dir = TempDir::new().unwrap();
    let plan = success_json(scope_cmd(dir.path()).args([
        "plan",
        "--include-gaps",
        "--budget",
        "3",
        "--json",
    ]));
    assert_eq!(plan["candidates_considered"], 12);
    // Only learn topics exist, so the markets share goes unfilled.
    assert_eq!(slugs(&plan).len(), 2);
    assert_eq!(plan["plan"]["unfilled_slots"], 1);
}

#[test]
fn plan_budget_defaults_to_config() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "topics.json", CANDIDATES);
    write(dir.path(), ".scope/config.toml", "[agent]\nmax_articles_per_run = 1\n");
    let plan = success_json(
        scope_cmd(dir.path()).args(["plan", "--candidates", "topics.json", "--json"]),
    );
    assert_eq!(plan["plan"]["budget"], 1);
    assert_eq!(slugs(&plan), vec!["l9"]);
}

#[test]
fn plan_missing_candidates_file_fails() {
    let dir = TempDir::new().unwrap();
    let code = failure_code(
        scope_cmd(dir.path()).args(["plan", "--candidates", "nope.json", "--json"]),
    );
    assert_eq!(code, "E3001");
}

#[test]
fn plan_malformed_candidates_plan_nothing() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "topics.json", "not json at all");
    let plan = success_json(
        scope_cmd(dir.path()).args(["plan", "--candidates", "topics.json", "--json"]),
    );
    assert_eq!(plan["candidates_considered"], 0);
    assert!(slugs(&plan).is_empty());
}

#[test]
fn plan_pretty_output_names_phase() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "topics.json", CANDIDATES);
    scope_cmd(dir.path())
        .args(["plan", "--candidates", "topics.json", "--format", "pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily plan: Foundation phase"))
        .stdout(predicate::str::contains("/learn/l9"));
}

// ---------------------------------------------------------------------------
// draft
// ---------------------------------------------------------------------------

const DRAFT: &str = r#"{
  "category": "learn",
  "slug": "odds-101",
  "title": "Odds 101",
  "content": "Odds are prices. See [Kalshi](/learn/what-is-kalshi).",
  "meta_description": "How odds work.",
  "target_keywords": ["Odds", "pricing"]
}"#;

#[test]
fn draft_saves_into_content_tree() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "draft.json", DRAFT);

    let saved = success_json(scope_cmd(dir.path()).args(["draft", "draft.json", "--json"]));
    assert_eq!(saved["url"], "/learn/odds-101");

    let file = dir.path().join("content/learn/odds-101.md");
    let text = fs::read_to_string(&file).unwrap();
    assert!(text.starts_with("---\n"));
    assert!(text.contains("status: draft"));
    assert!(text.contains("Odds are prices."));

    let rows = success_json(scope_cmd(dir.path()).args(["inventory", "--json"]));
    assert_eq!(rows[0]["url"], "/learn/odds-101");
    assert_eq!(rows[0]["status"], "draft");
    assert_eq!(rows[0]["outbound_links"][0], "/learn/what-is-kalshi");
}

#[test]
fn draft_refuses_to_overwrite_without_force() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "draft.json", DRAFT);
    scope_cmd(dir.path()).args(["draft", "draft.json"]).assert().success();

    let code = failure_code(scope_cmd(dir.path()).args(["draft", "draft.json", "--json"]));
    assert_eq!(code, "E5001");

    scope_cmd(dir.path())
        .args(["draft", "draft.json", "--force"])
        .assert()
        .success();
}

#[test]
fn draft_from_stdin() {
    let dir = TempDir::new().unwrap();
    scope_cmd(dir.path())
        .args(["draft", "-"])
        .write_stdin(DRAFT)
        .assert()
        .success();
    assert!(dir.path().join("content/learn/odds-101.md").is_file());
}

#[test]
fn draft_rejects_bad_json() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "draft.json", r#"{"slug": "x"}"#);
    let code = failure_code(scope_cmd(dir.path()).args(["draft", "draft.json", "--json"]));
    assert_eq!(code, "E3002");
}

#[test]
fn draft_rejects_slug_that_leaves_the_category_dir() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "draft.json",
        &DRAFT.replace("\"odds-101\"", "\"../../escaped\""),
    );
    let code = failure_code(scope_cmd(dir.path()).args(["draft", "draft.json", "--json"]));
    assert_eq!(code, "E3002");
    assert!(!dir.path().join("escaped.md").exists());
    assert!(!dir.path().join("content").exists());
}

// ---------------------------------------------------------------------------
// config and completions
// ---------------------------------------------------------------------------

#[test]
fn malformed_config_fails_every_command() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), ".scope/config.toml", "[agent\nbroken");
    let code = failure_code(scope_cmd(dir.path()).args(["phase", "--json"]));
    assert_eq!(code, "E1001");
}

#[test]
fn invalid_config_value_is_reported() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        ".scope/config.toml",
        "[linking]\nmax_internal_links_per_article = 0\n",
    );
    let code = failure_code(scope_cmd(dir.path()).args(["gaps", "--json"]));
    assert_eq!(code, "E1002");
}

#[test]
fn nonzero_foundation_threshold_is_reported() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        ".scope/config.toml",
        "[phases.foundation]\nmin_published = 10\n",
    );
    let code = failure_code(scope_cmd(dir.path()).args(["phase", "--json"]));
    assert_eq!(code, "E1002");
}

#[test]
fn config_error_text_carries_suggestion() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), ".scope/config.toml", "[agent\nbroken");
    scope_cmd(dir.path())
        .args(["phase", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: Config file parse error"))
        .stderr(predicate::str::contains("suggestion:"));
}

#[test]
fn completions_do_not_need_a_valid_config() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), ".scope/config.toml", "[agent\nbroken");
    scope_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scope"));
}
