// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Checking many files at once.
//!
//! Files are independent, so with the `parallel` feature they go through
//! `par_iter()` and tick a shared progress bar. Results come back in input
//! order either way.

#[cfg(feature = "parallel")]
use std::path::Path;
use std::path::PathBuf;

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{check_path, CheckConfig, CheckError, FileReport};

#[cfg(feature = "parallel")]
fn create_progress_style() -> Option<ProgressStyle> {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .ok()
    .map(|style| style.progress_chars("━━╸"))
}

/// Check every path. One result per path, in the same order.
#[cfg(feature = "parallel")]
pub fn check_paths(
    paths: &[PathBuf],
    config: &CheckConfig,
    show_progress: bool,
) -> Vec<Result<FileReport, CheckError>> {
    let progress = if show_progress {
        ProgressBar::new(paths.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Some(style) = create_progress_style() {
        progress.set_style(style);
    }
    progress.set_prefix("Checking");

    let results: Vec<_> = paths
        .par_iter()
        .map(|path| {
            let result = check_path(path, config);
            progress.inc(1);
            progress.set_message(file_name(path));
            result
        })
        .collect();

    progress.finish_with_message(format!("checked {} files", paths.len()));
    results
}

/// Check every path. One result per path, in the same order.
#[cfg(not(feature = "parallel"))]
pub fn check_paths(
    paths: &[PathBuf],
    config: &CheckConfig,
    _show_progress: bool,
) -> Vec<Result<FileReport, CheckError>> {
    paths.iter().map(|path| check_path(path, config)).collect()
}

#[cfg(feature = "parallel")]
fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn results_keep_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = Vec::new();
        for (i, body) in ["assert true", "assert false", "assert 1 == 1"].iter().enumerate() {
            let path = dir.path().join(format!("f{}.gobra", i));
            fs::write(&path, format!("package p\nfunc f() {{ {} }}", body)).unwrap();
            paths.push(path);
        }
        paths.push(PathBuf::from("/nonexistent.gobra"));

        let results = check_paths(&paths, &CheckConfig::default(), false);
        assert_eq!(results.len(), 4);
        assert!(results[0].as_ref().unwrap().passed());
        assert!(!results[1].as_ref().unwrap().passed());
        assert!(results[2].as_ref().unwrap().passed());
        assert!(results[3].is_err());
    }
}
