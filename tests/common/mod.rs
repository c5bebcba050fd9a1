//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::path::PathBuf;

use msetcheck::check::{check_path, CheckConfig, FileReport, FunctionReport, Verdict};
use msetcheck::Multiset;
use proptest::prelude::*;

// ============================================================================
// FIXTURES
// ============================================================================

/// Directory containing the `.gobra` fixtures.
pub const FIXTURES_DIR: &str = "data/fixtures";

/// Absolute path to a fixture, independent of the test's working directory.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join(FIXTURES_DIR)
        .join(name)
}

/// Check a fixture with the default bounds. Panics if it can't be checked.
pub fn check_fixture(name: &str) -> FileReport {
    check_fixture_with(name, &CheckConfig::default())
}

pub fn check_fixture_with(name: &str, config: &CheckConfig) -> FileReport {
    check_path(&fixture_path(name), config)
        .unwrap_or_else(|e| panic!("fixture {} failed to check: {}", name, e))
}

/// Look a function up by name.
pub fn function<'a>(report: &'a FileReport, name: &str) -> &'a FunctionReport {
    report
        .functions
        .iter()
        .find(|f| f.name == name)
        .unwrap_or_else(|| panic!("no function {} in {}", name, report.path))
}

/// Case count of a verified directive; panics with the verdict otherwise.
pub fn verified_cases(verdict: &Verdict) -> usize {
    match verdict {
        Verdict::Verified { cases } => *cases,
        other => panic!("expected verified, got {:?}", other),
    }
}

/// Bounds small enough for tests that check many sources.
pub fn small_config() -> CheckConfig {
    CheckConfig {
        int_pool: vec![0, 1, 2],
        max_collection_len: 2,
        ..CheckConfig::default()
    }
}

// ============================================================================
// STRATEGIES
// ============================================================================

/// Small-alphabet multisets, so generated pairs actually share elements.
pub fn multiset_strategy() -> impl Strategy<Value = Multiset<u8>> {
    prop::collection::vec(0u8..5, 0..8).prop_map(|v| v.into_iter().collect())
}

/// Multisets built from explicit counts, including large multiplicities.
pub fn counted_multiset_strategy() -> impl Strategy<Value = Multiset<u8>> {
    prop::collection::vec((0u8..5, 1usize..50), 0..5).prop_map(|pairs| {
        let mut m = Multiset::new();
        for (value, n) in pairs {
            m.insert_n(value, n);
        }
        m
    })
}
