// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The multiset law suite, checked exhaustively over bounded domains.
//!
//! Six laws describe how conversion interacts with the rest of the algebra, and
//! three more pin down the pointwise multiplicity rules the operators use. A
//! law holds on a bounded domain when it holds for every multiset (pair, or
//! element/multiset pair) drawn from it. There's no symbolic reasoning here:
//! small domains, every case, first counterexample wins.

use std::fmt::{Debug, Display};

use serde::Serialize;

use crate::convert::mset;
use crate::multiset::Multiset;

/// One algebraic law.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Law {
    ConversionIdentity,
    DoubleConversion,
    UnionCommutes,
    IntersectionCommutes,
    DifferenceCommutes,
    MembershipPreserved,
    UnionIsSum,
    IntersectionIsMin,
    DifferenceIsTruncated,
}

/// What a law quantifies over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// `∀ m`
    Unary,
    /// `∀ a b`
    Binary,
    /// `∀ x m`
    Membership,
}

impl Law {
    pub const ALL: [Law; 9] = [
        Law::ConversionIdentity,
        Law::DoubleConversion,
        Law::UnionCommutes,
        Law::IntersectionCommutes,
        Law::DifferenceCommutes,
        Law::MembershipPreserved,
        Law::UnionIsSum,
        Law::IntersectionIsMin,
        Law::DifferenceIsTruncated,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Law::ConversionIdentity => "conversion_identity",
            Law::DoubleConversion => "double_conversion",
            Law::UnionCommutes => "union_commutes",
            Law::IntersectionCommutes => "intersection_commutes",
            Law::DifferenceCommutes => "difference_commutes",
            Law::MembershipPreserved => "membership_preserved",
            Law::UnionIsSum => "union_is_sum",
            Law::IntersectionIsMin => "intersection_is_min",
            Law::DifferenceIsTruncated => "difference_is_truncated",
        }
    }

    pub fn statement(self) -> &'static str {
        match self {
            Law::ConversionIdentity => "mset(m) == m",
            Law::DoubleConversion => "mset(mset(m)) == m",
            Law::UnionCommutes => "mset(a union b) == mset(a) union mset(b)",
            Law::IntersectionCommutes => {
                "mset(a intersection b) == mset(a) intersection mset(b)"
            }
            Law::DifferenceCommutes => "mset(a setminus b) == mset(a) setminus mset(b)",
            Law::MembershipPreserved => "x in mset(m) == x in m",
            Law::UnionIsSum => "(a union b)[x] == a[x] + b[x]",
            Law::IntersectionIsMin => "(a intersection b)[x] == min(a[x], b[x])",
            Law::DifferenceIsTruncated => "(a setminus b)[x] == max(0, a[x] - b[x])",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Law::ConversionIdentity | Law::DoubleConversion => Arity::Unary,
            Law::MembershipPreserved => Arity::Membership,
            _ => Arity::Binary,
        }
    }

    /// Evaluate a unary law on `m`. Non-unary laws return `true`.
    pub fn holds_unary<T: Ord + Clone>(self, m: &Multiset<T>) -> bool {
        match self {
            Law::ConversionIdentity => mset(m) == *m,
            Law::DoubleConversion => mset(&mset(m)) == *m,
            _ => true,
        }
    }

    /// Evaluate a binary law on `(a, b)`. Non-binary laws return `true`.
    pub fn holds_binary<T: Ord + Clone>(self, a: &Multiset<T>, b: &Multiset<T>) -> bool {
        let keys = || a.counts().chain(b.counts()).map(|(x, _)| x);
        match self {
            Law::UnionCommutes => mset(&a.union(b)) == mset(a).union(&mset(b)),
            Law::IntersectionCommutes => {
                mset(&a.intersection(b)) == mset(a).intersection(&mset(b))
            }
            Law::DifferenceCommutes => mset(&a.difference(b)) == mset(a).difference(&mset(b)),
            Law::UnionIsSum => {
                let u = a.union(b);
                keys().all(|x| u.count(x) == a.count(x).saturating_add(b.count(x)))
            }
            Law::IntersectionIsMin => {
                let i = a.intersection(b);
                keys().all(|x| i.count(x) == a.count(x).min(b.count(x)))
                    && i.counts().all(|(x, _)| a.contains(x) && b.contains(x))
            }
            Law::DifferenceIsTruncated => {
                let d = a.difference(b);
                keys().all(|x| d.count(x) == a.count(x).saturating_sub(b.count(x)))
                    && d.counts().all(|(x, _)| a.contains(x))
            }
            _ => true,
        }
    }

    /// Evaluate the membership law on `(x, m)`.
    pub fn holds_membership<T: Ord + Clone>(self, x: &T, m: &Multiset<T>) -> bool {
        match self {
            Law::MembershipPreserved => mset(m).contains(x) == m.contains(x),
            _ => true,
        }
    }
}

/// Outcome of one law over a domain.
#[derive(Debug, Clone, Serialize)]
pub struct LawOutcome {
    pub law: Law,
    pub statement: &'static str,
    pub cases: usize,
    /// First failing case, rendered.
    pub counterexample: Option<String>,
}

impl LawOutcome {
    pub fn passed(&self) -> bool {
        self.counterexample.is_none()
    }
}

/// Outcome of the whole suite.
#[derive(Debug, Clone, Serialize)]
pub struct LawReport {
    pub domain_size: usize,
    pub outcomes: Vec<LawOutcome>,
}

impl LawReport {
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(LawOutcome::passed)
    }

    pub fn total_cases(&self) -> usize {
        self.outcomes.iter().map(|o| o.cases).sum()
    }
}

/// Every multiset over `elements` whose total size is at most `max_len`.
///
/// Combinations with repetition, smallest first: `C(n + k, k)` multisets for
/// `n` distinct elements and bound `k`. Duplicate entries in `elements` are
/// ignored.
pub fn bounded_multisets<T: Ord + Clone>(elements: &[T], max_len: usize) -> Vec<Multiset<T>> {
    bounded_multisets_upto(elements, max_len, usize::MAX)
}

/// The first `limit` multisets `bounded_multisets` would return, built
/// without materializing the rest.
pub fn bounded_multisets_upto<T: Ord + Clone>(
    elements: &[T],
    max_len: usize,
    limit: usize,
) -> Vec<Multiset<T>> {
    let mut distinct: Vec<T> = elements.to_vec();
    distinct.sort();
    distinct.dedup();

    let mut out = vec![Multiset::new()];
    let mut frontier: Vec<(usize, Multiset<T>)> = vec![(0, Multiset::new())];
    for _ in 0..max_len {
        if out.len() >= limit {
            break;
        }
        let mut next = Vec::new();
        'grow: for (start, base) in &frontier {
            for (i, value) in distinct.iter().enumerate().skip(*start) {
                if out.len() + next.len() >= limit {
                    break 'grow;
                }
                let mut grown = base.clone();
                grown.insert(value.clone());
                next.push((i, grown));
            }
        }
        out.extend(next.iter().map(|(_, m)| m.clone()));
        frontier = next;
    }
    out.truncate(limit);
    out
}

/// How many multisets `bounded_multisets` returns for `distinct` elements,
/// saturating at `usize::MAX`.
pub fn bounded_multiset_count(distinct: usize, max_len: usize) -> usize {
    // C(n + k - 1, k) from C(n + k - 2, k - 1)
    let n = distinct as u128;
    let mut term: u128 = 1;
    let mut total: u128 = 1;
    for k in 1..=max_len as u128 {
        term = match term.checked_mul(n + k - 1) {
            Some(product) => product / k,
            None => return usize::MAX,
        };
        if term == 0 {
            break;
        }
        total = match total.checked_add(term) {
            Some(sum) => sum,
            None => return usize::MAX,
        };
    }
    usize::try_from(total).unwrap_or(usize::MAX)
}

/// Run every law over `domain` (and `elements` for membership).
pub fn run_laws<T>(domain: &[Multiset<T>], elements: &[T]) -> LawReport
where
    T: Ord + Clone + Display + Debug,
{
    let outcomes = Law::ALL
        .iter()
        .map(|&law| run_law(law, domain, elements))
        .collect();
    LawReport {
        domain_size: domain.len(),
        outcomes,
    }
}

fn run_law<T>(law: Law, domain: &[Multiset<T>], elements: &[T]) -> LawOutcome
where
    T: Ord + Clone + Display + Debug,
{
    let mut cases = 0;
    let mut counterexample = None;

    match law.arity() {
        Arity::Unary => {
            for m in domain {
                cases += 1;
                if !law.holds_unary(m) {
                    counterexample = Some(format!("m = {}", m));
                    break;
                }
            }
        }
        Arity::Binary => {
            'outer: for a in domain {
                for b in domain {
                    cases += 1;
                    if !law.holds_binary(a, b) {
                        counterexample = Some(format!("a = {}, b = {}", a, b));
                        break 'outer;
                    }
                }
            }
        }
        Arity::Membership => {
            'outer: for x in elements {
                for m in domain {
                    cases += 1;
                    if !law.holds_membership(x, m) {
                        counterexample = Some(format!("x = {}, m = {}", x, m));
                        break 'outer;
                    }
                }
            }
        }
    }

    LawOutcome {
        law,
        statement: law.statement(),
        cases,
        counterexample,
    }
}
