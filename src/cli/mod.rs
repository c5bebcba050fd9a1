// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the msetcheck command-line interface.
//!
//! Three subcommands: `check` runs the bounded checker over fixture files,
//! `eval` evaluates a single closed expression, and `laws` runs the multiset
//! law suite over a sampled `mset[int]` domain.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "msetcheck",
    about = "Bounded checker for multiset conversion fixtures",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check every assert and ensures clause in fixture files
    Check {
        /// Fixture files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// JSON file with checker bounds (flags below override it)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Comma-separated integers that int parameters range over
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        int_pool: Option<Vec<i64>>,

        /// Largest collection size in any parameter domain
        #[arg(long)]
        max_len: Option<usize>,

        /// Cases tried per function before truncating
        #[arg(long)]
        max_cases: Option<usize>,

        /// Print reports as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Type-check and evaluate a closed expression
    Eval {
        /// Expression, e.g. "mset(seq[int]{1, 1, 2}) == mset[int]{2, 1, 1}"
        #[arg(allow_hyphen_values = true)]
        expr: String,
    },

    /// Check the multiset laws over bounded mset[int] samples
    Laws {
        /// Largest multiset size in the sample domain
        #[arg(long, default_value = "3")]
        max_len: usize,

        /// Comma-separated element pool
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_value = "0,1,2")]
        int_pool: Vec<i64>,

        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}
