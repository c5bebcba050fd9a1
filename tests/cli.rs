//! End-to-end tests for the `msetcheck` binary: exit codes, JSON output and
//! how flags combine with a config file.

mod common;

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use common::fixture_path;
use tempfile::TempDir;

const OK: i32 = 0;
const FAILED: i32 = 1;
const INVALID: i32 = 2;

/// Run the msetcheck binary Cargo built for this test run.
fn run_msetcheck(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_msetcheck"))
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run msetcheck")
}

fn exit_code(output: &Output) -> i32 {
    output.status.code().expect("msetcheck was killed by a signal")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write temp file");
    path_arg(&path)
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

// ============================================================================
// CHECK
// ============================================================================

#[test]
fn test_check_verified_fixture_exits_ok() {
    let fixture = path_arg(&fixture_path("multiset-convert-simple1.gobra"));
    let output = run_msetcheck(&["check", &fixture]);
    assert_eq!(exit_code(&output), OK, "{:?}", output);
}

#[test]
fn test_check_falsified_fixture_exits_failed() {
    let fixture = path_arg(&fixture_path("multiset-union-is-not-max.gobra"));
    let output = run_msetcheck(&["check", &fixture]);
    assert_eq!(exit_code(&output), FAILED, "{:?}", output);
}

#[test]
fn test_check_json_reports_verdicts() {
    let fixture = path_arg(&fixture_path("multiset-union-is-not-max.gobra"));
    let output = run_msetcheck(&["check", "--json", &fixture]);
    assert_eq!(exit_code(&output), FAILED);

    let reports: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let functions = reports[0]["functions"].as_array().unwrap();
    assert_eq!(functions.len(), 2);
    assert_eq!(reports[0]["package"], "pkg");
    for function in functions {
        assert_eq!(function["directives"][0]["verdict"]["status"], "falsified");
    }
}

#[test]
fn test_check_syntax_error_exits_invalid() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "broken.gobra", "package p\nfunc f( {");
    let output = run_msetcheck(&["check", &file]);
    assert_eq!(exit_code(&output), INVALID);
}

#[test]
fn test_check_long_chain_is_rejected_not_a_crash() {
    let dir = TempDir::new().unwrap();
    let chain = vec!["1"; 100_000].join(" + ");
    let file = write_file(
        &dir,
        "chain.gobra",
        &format!("package p\nfunc f() {{ assert {} == 0 }}", chain),
    );
    let output = run_msetcheck(&["check", &file]);
    assert_eq!(exit_code(&output), INVALID, "{:?}", output.stderr);
    assert!(String::from_utf8_lossy(&output.stderr).contains("too deep"));
}

#[test]
fn test_check_bad_config_exits_invalid() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "config.json", r#"{ "int_pool": [] }"#);
    let fixture = path_arg(&fixture_path("multiset-convert-simple1.gobra"));
    let output = run_msetcheck(&["check", "--config", &config, &fixture]);
    assert_eq!(exit_code(&output), INVALID);

    let output = run_msetcheck(&["check", "--max-len", "1000", &fixture]);
    assert_eq!(exit_code(&output), INVALID);
}

#[test]
fn test_check_missing_file_exits_invalid() {
    let dir = TempDir::new().unwrap();
    let missing = path_arg(&dir.path().join("absent.gobra"));
    let output = run_msetcheck(&["check", &missing]);
    assert_eq!(exit_code(&output), INVALID);
}

#[test]
fn test_int_pool_flag_overrides_config_file() {
    let dir = TempDir::new().unwrap();
    let source = write_file(
        &dir,
        "five.gobra",
        "package p\nfunc f(x int) { assert x != 5 }",
    );
    let config = write_file(&dir, "config.json", r#"{ "int_pool": [0, 1] }"#);

    let output = run_msetcheck(&["check", "--config", &config, &source]);
    assert_eq!(exit_code(&output), OK);

    let output = run_msetcheck(&["check", "--config", &config, "--int-pool", "-3,5", &source]);
    assert_eq!(exit_code(&output), FAILED);

    let output = run_msetcheck(&[
        "check", "--config", &config, "--int-pool", "-3,5", "--json", &source,
    ]);
    let reports: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let verdict = &reports[0]["functions"][0]["directives"][0]["verdict"];
    assert_eq!(verdict["status"], "falsified");
    assert_eq!(verdict["counterexample"][0]["value"], "5");
}

// ============================================================================
// EVAL
// ============================================================================

#[test]
fn test_eval_prints_value_and_type() {
    let output = run_msetcheck(&["eval", "mset(seq[int] { 2, 1, 2 }) union mset[int] { 3 }"]);
    assert_eq!(exit_code(&output), OK);
    assert_eq!(stdout(&output).trim(), "mset[int]{1, 2, 2, 3} : mset[int]");
}

#[test]
fn test_eval_overflow_exits_failed() {
    let output = run_msetcheck(&["eval", "9223372036854775807 + 1"]);
    assert_eq!(exit_code(&output), FAILED);
    assert!(String::from_utf8_lossy(&output.stderr).contains("overflow"));
}

#[test]
fn test_eval_type_error_exits_invalid() {
    let output = run_msetcheck(&["eval", "1 union true"]);
    assert_eq!(exit_code(&output), INVALID);

    let output = run_msetcheck(&["eval", "(1 +"]);
    assert_eq!(exit_code(&output), INVALID);
}

// ============================================================================
// LAWS
// ============================================================================

#[test]
fn test_laws_json_lists_every_law() {
    let output = run_msetcheck(&["laws", "--json", "--max-len", "2", "--int-pool", "0,1,2"]);
    assert_eq!(exit_code(&output), OK);

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    // C(3 + 2, 2)
    assert_eq!(report["domain_size"], 10);
    let outcomes = report["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 9);
    assert!(outcomes.iter().all(|o| o["counterexample"].is_null()));
}

#[test]
fn test_laws_rejects_oversized_domains() {
    let output = run_msetcheck(&["laws", "--max-len", "100"]);
    assert_eq!(exit_code(&output), INVALID);

    let output = run_msetcheck(&["laws", "--max-len", "8", "--int-pool", "0,1,2,3,4,5,6,7,8,9"]);
    assert_eq!(exit_code(&output), INVALID);
}
