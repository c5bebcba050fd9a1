// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Check results, serializable for `--json`.

use std::fmt;

use serde::Serialize;

/// One variable in a counterexample, already rendered as a literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub name: String,
    pub value: String,
}

/// Parameter and ghost bindings at the point an obligation failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Counterexample {
    pub bindings: Vec<Binding>,
}

impl fmt::Display for Counterexample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bindings.is_empty() {
            return f.write_str("(no bindings)");
        }
        for (i, binding) in self.bindings.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} = {}", binding.name, binding.value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    /// Held in every case that reached it.
    Verified { cases: usize },
    /// First failing case.
    Falsified { counterexample: Counterexample },
    /// Evaluation failed, e.g. on integer overflow.
    Errored { message: String },
}

impl Verdict {
    pub fn is_verified(&self) -> bool {
        matches!(self, Verdict::Verified { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveKind {
    Assert,
    Ensures,
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DirectiveKind::Assert => "assert",
            DirectiveKind::Ensures => "ensures",
        })
    }
}

/// A proof obligation: an `assert` statement or an `ensures` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectiveReport {
    pub kind: DirectiveKind,
    pub line: usize,
    /// Source text of the asserted expression.
    pub text: String,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionReport {
    pub name: String,
    pub line: usize,
    /// Cases that ran to the end of the body.
    pub cases: usize,
    /// Cases cut short by a false `requires` or `assume`.
    pub vacuous_cases: usize,
    /// The parameter product exceeded `max_cases`.
    pub truncated: bool,
    /// No case got past the preconditions.
    pub vacuous: bool,
    pub directives: Vec<DirectiveReport>,
    /// Evaluation failures outside any directive (ghost bindings, assumptions).
    pub errors: Vec<String>,
}

impl FunctionReport {
    pub fn passed(&self) -> bool {
        self.errors.is_empty() && self.directives.iter().all(|d| d.verdict.is_verified())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: String,
    pub package: String,
    pub functions: Vec<FunctionReport>,
}

impl FileReport {
    pub fn passed(&self) -> bool {
        self.functions.iter().all(FunctionReport::passed)
    }

    pub fn directives(&self) -> impl Iterator<Item = &DirectiveReport> {
        self.functions.iter().flat_map(|f| f.directives.iter())
    }

    /// (verified, falsified, errored)
    pub fn tally(&self) -> (usize, usize, usize) {
        self.directives()
            .fold((0, 0, 0), |(ok, bad, err), d| match d.verdict {
                Verdict::Verified { .. } => (ok + 1, bad, err),
                Verdict::Falsified { .. } => (ok, bad + 1, err),
                Verdict::Errored { .. } => (ok, bad, err + 1),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_json_is_tagged() {
        let verdict = Verdict::Falsified {
            counterexample: Counterexample {
                bindings: vec![Binding {
                    name: "x".into(),
                    value: "1".into(),
                }],
            },
        };
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["status"], "falsified");
        assert_eq!(json["counterexample"][0]["name"], "x");

        let json = serde_json::to_value(Verdict::Verified { cases: 3 }).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "verified", "cases": 3 }));
    }

    #[test]
    fn counterexample_display() {
        let cex = Counterexample {
            bindings: vec![
                Binding {
                    name: "a".into(),
                    value: "mset[int]{1}".into(),
                },
                Binding {
                    name: "b".into(),
                    value: "mset[int]{}".into(),
                },
            ],
        };
        assert_eq!(cex.to_string(), "a = mset[int]{1}, b = mset[int]{}");
        assert_eq!(Counterexample { bindings: vec![] }.to_string(), "(no bindings)");
    }
}
