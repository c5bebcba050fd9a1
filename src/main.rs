// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use clap::Parser;

use msetcheck::check::{check_paths, CheckConfig, CheckError, FileReport, MAX_COLLECTION_LEN};
use msetcheck::lang::{eval, parse_expr, type_of, Env, Scope};
use msetcheck::verify::{bounded_multiset_count, bounded_multisets, run_laws, LawReport};

mod cli;
use cli::display::{self, themed, BOLD, GREEN, RED, YELLOW};
use cli::{Cli, Commands};

/// Every directive verified.
const EXIT_OK: i32 = 0;
/// Something was falsified or errored.
const EXIT_FAILED: i32 = 1;
/// Input could not be checked at all.
const EXIT_INVALID: i32 = 2;

/// Largest sample domain `laws` will run; binary laws visit every pair.
const MAX_LAW_SAMPLES: usize = 1_000;

fn main() {
    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Check {
            files,
            config,
            int_pool,
            max_len,
            max_cases,
            json,
        } => match build_config(config, int_pool, max_len, max_cases) {
            Ok(config) => run_check(&files, &config, json),
            Err(e) => {
                eprintln!("❌ {}", e);
                EXIT_INVALID
            }
        },
        Commands::Eval { expr } => run_eval(&expr),
        Commands::Laws {
            max_len,
            int_pool,
            json,
        } => run_law_suite(&int_pool, max_len, json),
    };

    std::process::exit(code);
}

/// Load the config file (if any), then let flags override it.
fn build_config(
    path: Option<PathBuf>,
    int_pool: Option<Vec<i64>>,
    max_len: Option<usize>,
    max_cases: Option<usize>,
) -> Result<CheckConfig, String> {
    let mut config = match path {
        Some(path) => CheckConfig::load(&path)?,
        None => CheckConfig::default(),
    };
    if let Some(pool) = int_pool {
        config.int_pool = pool;
    }
    if let Some(max_len) = max_len {
        config.max_collection_len = max_len;
    }
    if let Some(max_cases) = max_cases {
        config.max_cases = max_cases;
    }
    config.validate()?;
    Ok(config)
}

fn run_check(files: &[PathBuf], config: &CheckConfig, json: bool) -> i32 {
    let show_progress = !json && files.len() > 1 && atty::is(atty::Stream::Stderr);
    let results = check_paths(files, config, show_progress);

    let mut reports: Vec<&FileReport> = Vec::new();
    let mut invalid = false;
    for result in &results {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                invalid = true;
                report_error(e);
            }
        }
    }

    if json {
        match serde_json::to_string_pretty(&reports) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("❌ Failed to serialize report: {}", e);
                return EXIT_INVALID;
            }
        }
    } else {
        for report in &reports {
            print_file_report(report);
        }
    }

    let (verified, falsified, errored) = reports.iter().fold((0, 0, 0), |acc, r| {
        let (v, f, e) = r.tally();
        (acc.0 + v, acc.1 + f, acc.2 + e)
    });
    let failed_functions = reports
        .iter()
        .flat_map(|r| &r.functions)
        .filter(|f| !f.errors.is_empty())
        .count();

    if invalid {
        eprintln!("❌ {} of {} files could not be checked", results.len() - reports.len(), results.len());
        EXIT_INVALID
    } else if falsified > 0 || errored > 0 || failed_functions > 0 {
        eprintln!(
            "❌ {} verified, {} falsified, {} errored",
            verified, falsified, errored
        );
        EXIT_FAILED
    } else {
        eprintln!("✅ {} directives verified in {} files", verified, reports.len());
        EXIT_OK
    }
}

fn report_error(e: &CheckError) {
    eprintln!("❌ {}", e);
}

fn print_file_report(report: &FileReport) {
    display::section_top(&format!("{} (package {})", report.path, report.package));
    for (i, function) in report.functions.iter().enumerate() {
        let header = format!("func {} (line {})", function.name, function.line);
        if i > 0 {
            display::section_mid(&header);
        } else {
            display::row(&format!(" {}", themed(display::CYAN, &[BOLD], &header)));
        }
        display::row(&format!(
            " {}",
            display::case_summary(function.cases, function.vacuous_cases, function.truncated)
        ));
        if function.vacuous {
            display::row(&format!(
                " {}",
                themed(YELLOW, &[], "⚠️  no case satisfied the preconditions")
            ));
        }
        for directive in &function.directives {
            for line in display::directive_lines(directive) {
                display::row(&line);
            }
        }
        for error in &function.errors {
            let text = display::truncate_text(error, display::BOX_WIDTH - 8);
            display::row(&format!(" {} {}", themed(YELLOW, &[BOLD], "[ERR ]"), text));
        }
    }
    display::section_bot();
}

fn run_eval(src: &str) -> i32 {
    let expr = match parse_expr(src) {
        Ok(expr) => expr,
        Err(e) => {
            eprintln!("❌ {}", e);
            return EXIT_INVALID;
        }
    };
    let ty = match type_of(&expr, &Scope::new()) {
        Ok(ty) => ty,
        Err(e) => {
            eprintln!("❌ {}", e);
            return EXIT_INVALID;
        }
    };
    match eval(&expr, &Env::new()) {
        Ok(value) => {
            println!("{} : {}", value.render(&ty), themed(display::MAGENTA, &[], &ty.to_string()));
            EXIT_OK
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            EXIT_FAILED
        }
    }
}

fn run_law_suite(pool: &[i64], max_len: usize, json: bool) -> i32 {
    if pool.is_empty() {
        eprintln!("❌ int pool must not be empty");
        return EXIT_INVALID;
    }
    if max_len > MAX_COLLECTION_LEN {
        eprintln!("❌ --max-len must be at most {}, got {}", MAX_COLLECTION_LEN, max_len);
        return EXIT_INVALID;
    }
    let mut distinct = pool.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    let samples = bounded_multiset_count(distinct.len(), max_len);
    if samples > MAX_LAW_SAMPLES {
        eprintln!(
            "❌ {} samples exceed the limit of {}; shrink --max-len or --int-pool",
            samples, MAX_LAW_SAMPLES
        );
        return EXIT_INVALID;
    }
    let domain = bounded_multisets(&distinct, max_len);
    let report = run_laws(&domain, &distinct);

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("❌ Failed to serialize report: {}", e);
                return EXIT_INVALID;
            }
        }
    } else {
        print_law_report(&report, pool, max_len);
    }

    if report.all_passed() {
        eprintln!("✅ {} laws hold ({} cases)", report.outcomes.len(), report.total_cases());
        EXIT_OK
    } else {
        let failed = report.outcomes.iter().filter(|o| !o.passed()).count();
        eprintln!("❌ {} of {} laws failed", failed, report.outcomes.len());
        EXIT_FAILED
    }
}

fn print_law_report(report: &LawReport, pool: &[i64], max_len: usize) {
    display::double_header();
    display::title("MULTISET LAWS");
    display::double_footer();

    let pool_text: Vec<String> = pool.iter().map(i64::to_string).collect();
    display::section_top(&format!(
        "mset[int] over {{{}}}, size ≤ {}: {} samples",
        pool_text.join(", "),
        max_len,
        report.domain_size
    ));
    for outcome in &report.outcomes {
        display::row(&display::law_line(outcome));
        let statement = themed(display::GRAY, &[], outcome.statement);
        display::row(&format!("        {}", statement));
        if let Some(cex) = &outcome.counterexample {
            let text = display::truncate_text(cex, display::BOX_WIDTH - 10);
            display::row(&format!("        {}", themed(RED, &[], &text)));
        }
    }
    display::section_bot();

    let verdict = if report.all_passed() {
        themed(GREEN, &[BOLD], "all laws hold")
    } else {
        themed(RED, &[BOLD], "counterexamples found")
    };
    println!(" {}", verdict);
}
