// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the fixture front end.
//!
//! Any byte string must either be rejected with a positioned error or go all
//! the way through parsing, type checking and a tightly bounded check. None
//! of those stages may panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use msetcheck::check::{check_source, CheckConfig, CheckError};
use msetcheck::lang::{eval, parse_expr, type_of, Env, Scope};

fuzz_target!(|data: &[u8]| {
    let Ok(src) = std::str::from_utf8(data) else {
        return;
    };

    // Whole files, with bounds small enough to keep each run fast
    let config = CheckConfig {
        int_pool: vec![-1, 0, i64::MAX],
        max_collection_len: 1,
        max_cases: 64,
        nested_pool_limit: 2,
    };
    match check_source("fuzz", src, &config) {
        Ok(report) => {
            for function in &report.functions {
                assert!(function.cases + function.vacuous_cases <= config.max_cases);
            }
        }
        Err(CheckError::Syntax { error, .. }) => assert!(error.line >= 1 && error.col >= 1),
        Err(CheckError::Type { error, .. }) => assert!(error.line >= 1 && error.col >= 1),
        Err(e) => panic!("unexpected error kind: {}", e),
    }

    // Closed expressions: a well-typed one evaluates or reports an error
    if let Ok(expr) = parse_expr(src) {
        if type_of(&expr, &Scope::new()).is_ok() {
            let _ = eval(&expr, &Env::new());
        }
    }
});
