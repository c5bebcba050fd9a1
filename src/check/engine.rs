// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-function case enumeration.
//!
//! Each case binds the parameters, assumes `requires`, runs the body and then
//! checks `ensures`. A failed `assert` does not stop the case: later code runs
//! as if it held, which is what a verifier does after reporting the failure.

use std::collections::HashSet;

use super::config::CheckConfig;
use super::domain::{domain_of, domain_size, Cases};
use super::report::{
    Binding, Counterexample, DirectiveKind, DirectiveReport, FunctionReport, Verdict,
};
use crate::lang::{eval, eval_bool, Env, EvalError, Expr, Function, Scope, Stmt, Value};

struct Directive<'a> {
    kind: DirectiveKind,
    expr: &'a Expr,
    held: usize,
    failure: Option<Verdict>,
}

impl Directive<'_> {
    fn observe(&mut self, result: Result<bool, EvalError>, env: &Env, scope: &Scope) {
        if self.failure.is_some() {
            return;
        }
        match result {
            Ok(true) => self.held += 1,
            Ok(false) => {
                self.failure = Some(Verdict::Falsified {
                    counterexample: counterexample(env, scope),
                });
            }
            Err(e) => {
                self.failure = Some(Verdict::Errored {
                    message: e.to_string(),
                });
            }
        }
    }

    fn into_report(self, src: &str) -> DirectiveReport {
        DirectiveReport {
            kind: self.kind,
            line: self.expr.span.line,
            text: source_text(src, self.expr),
            verdict: self.failure.unwrap_or(Verdict::Verified { cases: self.held }),
        }
    }
}

enum Outcome {
    Completed,
    Vacuous,
    Aborted,
}

/// Check one type-checked function. `scope` is the one `check_function`
/// returned for it; `src` is the text it was parsed from.
pub fn check_function(
    src: &str,
    function: &Function,
    scope: &Scope,
    config: &CheckConfig,
) -> FunctionReport {
    let domains: Vec<Vec<Value>> = function
        .params
        .iter()
        .map(|param| domain_of(&param.ty, config))
        .collect();
    let cases = Cases::new(&domains);
    let total = function
        .params
        .iter()
        .fold(1usize, |acc, param| acc.saturating_mul(domain_size(&param.ty, config)));
    let truncated = total > config.max_cases;

    let mut directives: Vec<Directive> = function
        .body
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::Assert { expr, .. } => Some(expr),
            _ => None,
        })
        .map(|expr| (DirectiveKind::Assert, expr))
        .chain(function.ensures.iter().map(|e| (DirectiveKind::Ensures, e)))
        .map(|(kind, expr)| Directive {
            kind,
            expr,
            held: 0,
            failure: None,
        })
        .collect();
    let assert_count = directives
        .iter()
        .filter(|d| d.kind == DirectiveKind::Assert)
        .count();

    let mut completed = 0;
    let mut vacuous_cases = 0;
    let mut errors = Vec::new();
    let mut seen_errors = HashSet::new();
    let mut record_error = |e: EvalError, env: &Env| {
        let message = e.to_string();
        if seen_errors.insert(message.clone()) {
            errors.push(format!("{} (with {})", message, counterexample(env, scope)));
        }
    };

    for case in cases.take(config.max_cases) {
        let mut env = Env::new();
        for (param, value) in function.params.iter().zip(case) {
            env.bind(param.name.as_str(), value);
        }

        let mut outcome = Outcome::Completed;
        for clause in &function.requires {
            match eval_bool(clause, &env) {
                Ok(true) => {}
                Ok(false) => outcome = Outcome::Vacuous,
                Err(e) => {
                    record_error(e, &env);
                    outcome = Outcome::Aborted;
                }
            }
            if !matches!(outcome, Outcome::Completed) {
                break;
            }
        }

        let mut next_assert = 0;
        if matches!(outcome, Outcome::Completed) {
            for stmt in &function.body {
                match stmt {
                    Stmt::Ghost { name, value, .. } => match eval(value, &env) {
                        Ok(v) => env.bind(name.as_str(), v),
                        Err(e) => {
                            record_error(e, &env);
                            outcome = Outcome::Aborted;
                        }
                    },
                    Stmt::Assume { expr, .. } => match eval_bool(expr, &env) {
                        Ok(true) => {}
                        Ok(false) => outcome = Outcome::Vacuous,
                        Err(e) => {
                            record_error(e, &env);
                            outcome = Outcome::Aborted;
                        }
                    },
                    Stmt::Assert { expr, .. } => {
                        let result = eval_bool(expr, &env);
                        directives[next_assert].observe(result, &env, scope);
                        next_assert += 1;
                    }
                }
                if !matches!(outcome, Outcome::Completed) {
                    break;
                }
            }
        }

        match outcome {
            Outcome::Completed => {
                completed += 1;
                for directive in &mut directives[assert_count..] {
                    let result = eval_bool(directive.expr, &env);
                    directive.observe(result, &env, scope);
                }
            }
            Outcome::Vacuous => vacuous_cases += 1,
            Outcome::Aborted => {}
        }
    }

    FunctionReport {
        name: function.name.clone(),
        line: function.span.line,
        cases: completed,
        vacuous_cases,
        truncated,
        vacuous: completed == 0,
        directives: directives.into_iter().map(|d| d.into_report(src)).collect(),
        errors,
    }
}

fn counterexample(env: &Env, scope: &Scope) -> Counterexample {
    Counterexample {
        bindings: env
            .iter()
            .map(|(name, value)| Binding {
                name: name.to_string(),
                value: match scope.get(name) {
                    Some(ty) => value.render(ty),
                    None => value.to_string(),
                },
            })
            .collect(),
    }
}

fn source_text(src: &str, expr: &Expr) -> String {
    src.get(expr.span.start..expr.span.end)
        .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}
