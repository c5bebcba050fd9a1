//! Loading checker bounds from JSON files.

use std::fs;

use msetcheck::check::{check_path, CheckConfig};

use crate::common::fixture_path;

#[test]
fn test_load_partial_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bounds.json");
    fs::write(&path, r#"{ "int_pool": [7, -7], "max_collection_len": 1 }"#).unwrap();

    let config = CheckConfig::load(&path).unwrap();
    assert_eq!(config.int_pool, vec![7, -7]);
    assert_eq!(config.max_collection_len, 1);
    assert_eq!(config.max_cases, CheckConfig::default().max_cases);
    assert_eq!(config.int_domain(), vec![-7, 7]);
}

#[test]
fn test_missing_or_invalid_config_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(CheckConfig::load(&dir.path().join("absent.json")).is_err());

    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{ "max_cases": 0 }"#).unwrap();
    let err = CheckConfig::load(&path).unwrap_err();
    assert!(err.contains("max_cases"), "{}", err);
}

#[test]
fn test_bounds_change_case_counts() {
    let config = CheckConfig {
        int_pool: vec![0, 1],
        max_collection_len: 1,
        ..CheckConfig::default()
    };
    let report = check_path(&fixture_path("multiset-convert-simple1.gobra"), &config).unwrap();
    // {}, {0}, {1}
    assert_eq!(report.functions[0].cases, 3);
    assert_eq!(report.functions[1].cases, 9);
    assert!(report.passed());
}

#[test]
fn test_config_round_trips_through_json() {
    let config = CheckConfig::default();
    let text = serde_json::to_string(&config).unwrap();
    assert_eq!(CheckConfig::from_json(&text).unwrap(), config);
}
