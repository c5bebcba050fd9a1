// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bounded checking of fixture files.
//!
//! There is no SMT solver here. Every parameter ranges over a small finite
//! domain (see [`domain`]) and each `assert`/`ensures` is evaluated
//! concretely in every combination. A `Verified` verdict therefore means "no
//! counterexample within the bounds", which for the conversion laws is a
//! strong smoke test and for a false law almost always finds the witness in
//! the first few cases.
//!
//! ```text
//! source ──parse──▶ SourceFile ──typeck──▶ Scope per function
//!                                              │
//!                     CheckConfig ──domains──▶ engine ──▶ FileReport
//! ```

pub mod config;
pub mod domain;
pub mod engine;
pub mod parallel;
pub mod report;

use std::fmt;
use std::fs;
use std::path::Path;

pub use config::{CheckConfig, MAX_COLLECTION_LEN};
pub use engine::check_function;
pub use parallel::check_paths;
pub use report::{
    Binding, Counterexample, DirectiveKind, DirectiveReport, FileReport, FunctionReport, Verdict,
};

use crate::lang::{check_file, parse_file, SyntaxError, TypeError};

/// Anything that stops a file from being checked at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    Io { path: String, message: String },
    Syntax { path: String, error: SyntaxError },
    Type { path: String, error: TypeError },
    Config(String),
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckError::Io { path, message } => write!(f, "{}: {}", path, message),
            CheckError::Syntax { path, error } => write!(f, "{}:{}", path, error),
            CheckError::Type { path, error } => write!(f, "{}:{}", path, error),
            CheckError::Config(message) => write!(f, "invalid configuration: {}", message),
        }
    }
}

impl std::error::Error for CheckError {}

/// Check source text. `path` is only used for labelling.
pub fn check_source(path: &str, src: &str, config: &CheckConfig) -> Result<FileReport, CheckError> {
    config.validate().map_err(CheckError::Config)?;

    let file = parse_file(src).map_err(|error| CheckError::Syntax {
        path: path.to_string(),
        error,
    })?;
    let scopes = check_file(&file).map_err(|error| CheckError::Type {
        path: path.to_string(),
        error,
    })?;

    let functions = file
        .functions
        .iter()
        .zip(&scopes)
        .map(|(function, scope)| check_function(src, function, scope, config))
        .collect();

    Ok(FileReport {
        path: path.to_string(),
        package: file.package,
        functions,
    })
}

/// Read and check one file.
pub fn check_path(path: &Path, config: &CheckConfig) -> Result<FileReport, CheckError> {
    let label = path.display().to_string();
    let src = fs::read_to_string(path).map_err(|e| CheckError::Io {
        path: label.clone(),
        message: format!("Failed to read: {}", e),
    })?;
    check_source(&label, &src, config)
}
