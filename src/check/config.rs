// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Checker bounds, loadable from JSON.
//!
//! ```json
//! { "int_pool": [-1, 0, 1], "max_collection_len": 2 }
//! ```
//!
//! Missing fields take their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Largest `max_collection_len` a configuration may ask for.
pub const MAX_COLLECTION_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Values an `int` parameter ranges over.
    pub int_pool: Vec<i64>,
    /// Largest collection (total size, counting repeats) in any domain.
    pub max_collection_len: usize,
    /// Cases tried per function before giving up and flagging `truncated`.
    pub max_cases: usize,
    /// How many inner values a nested collection domain draws from.
    pub nested_pool_limit: usize,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            int_pool: vec![-1, 0, 1, 2, 42],
            max_collection_len: 3,
            max_cases: 20_000,
            nested_pool_limit: 6,
        }
    }
}

impl CheckConfig {
    pub fn from_json(text: &str) -> Result<Self, String> {
        let config: CheckConfig =
            serde_json::from_str(text).map_err(|e| format!("Invalid config JSON: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.int_pool.is_empty() {
            return Err("int_pool must not be empty".into());
        }
        if self.max_cases == 0 {
            return Err("max_cases must be at least 1".into());
        }
        if self.max_collection_len > MAX_COLLECTION_LEN {
            return Err(format!(
                "max_collection_len must be at most {}, got {}",
                MAX_COLLECTION_LEN, self.max_collection_len
            ));
        }
        if self.nested_pool_limit == 0 {
            return Err("nested_pool_limit must be at least 1".into());
        }
        Ok(())
    }

    /// The pool with duplicates removed, in ascending order.
    pub fn int_domain(&self) -> Vec<i64> {
        let mut pool = self.int_pool.clone();
        pool.sort_unstable();
        pool.dedup();
        pool
    }
}
