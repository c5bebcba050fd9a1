// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Finite value domains per type, and the lazy product over parameters.
//!
//! Domains grow fast with nesting: `mset[mset[int]]` at bound 3 over the
//! default pool is already hundreds of values, so nested collections only
//! draw from the first `nested_pool_limit` inner values.
//!
//! The product varies its last parameter fastest, so the first `max_cases`
//! cases never reach past the first `max_cases` values of any domain. Domains
//! are built only that far; `domain_size` counts the full size without
//! building it.

use std::collections::BTreeSet;

use super::config::CheckConfig;
use crate::lang::{Type, Value};
use crate::verify::{bounded_multiset_count, bounded_multisets_upto};

/// The first `config.max_cases` values of `ty` within the configured bounds,
/// smallest collections first.
pub fn domain_of(ty: &Type, config: &CheckConfig) -> Vec<Value> {
    values_of(ty, config, config.max_cases)
}

/// Number of values of `ty` within the configured bounds, saturating at
/// `usize::MAX`.
pub fn domain_size(ty: &Type, config: &CheckConfig) -> usize {
    let max_len = config.max_collection_len;
    match ty {
        Type::Int => config.int_domain().len(),
        Type::Bool => 2,
        Type::Mset(elem) => bounded_multiset_count(pool_size(elem, config), max_len),
        Type::Set(elem) => subset_count(pool_size(elem, config), max_len),
        Type::Seq(elem) => sequence_count(pool_size(elem, config), max_len),
    }
}

fn values_of(ty: &Type, config: &CheckConfig, limit: usize) -> Vec<Value> {
    let max_len = config.max_collection_len;
    match ty {
        Type::Int => config
            .int_domain()
            .into_iter()
            .take(limit)
            .map(Value::Int)
            .collect(),
        Type::Bool => [false, true].into_iter().take(limit).map(Value::Bool).collect(),
        Type::Mset(elem) => bounded_multisets_upto(&element_pool(elem, config), max_len, limit)
            .into_iter()
            .map(Value::Mset)
            .collect(),
        Type::Set(elem) => bounded_subsets(&element_pool(elem, config), max_len, limit)
            .into_iter()
            .map(Value::Set)
            .collect(),
        Type::Seq(elem) => bounded_sequences(&element_pool(elem, config), max_len, limit)
            .into_iter()
            .map(Value::Seq)
            .collect(),
    }
}

fn element_pool(elem: &Type, config: &CheckConfig) -> Vec<Value> {
    let limit = if elem.is_collection() {
        config.nested_pool_limit
    } else {
        usize::MAX
    };
    values_of(elem, config, limit)
}

fn pool_size(elem: &Type, config: &CheckConfig) -> usize {
    let size = domain_size(elem, config);
    if elem.is_collection() {
        size.min(config.nested_pool_limit)
    } else {
        size
    }
}

/// The first `limit` subsets of `pool` with at most `max_len` members,
/// smallest first.
pub fn bounded_subsets<T: Ord + Clone>(
    pool: &[T],
    max_len: usize,
    limit: usize,
) -> Vec<BTreeSet<T>> {
    let mut distinct: Vec<T> = pool.to_vec();
    distinct.sort();
    distinct.dedup();

    let mut out = vec![BTreeSet::new()];
    let mut frontier: Vec<(usize, BTreeSet<T>)> = vec![(0, BTreeSet::new())];
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
                next.push((i + 1, grown));
            }
        }
        out.extend(next.iter().map(|(_, s)| s.clone()));
        frontier = next;
    }
    out.truncate(limit);
    out
}

/// The first `limit` sequences over `pool` of length at most `max_len`,
/// shortest first.
pub fn bounded_sequences<T: Clone>(pool: &[T], max_len: usize, limit: usize) -> Vec<Vec<T>> {
    let mut out = vec![Vec::new()];
    let mut frontier: Vec<Vec<T>> = vec![Vec::new()];
    for _ in 0..max_len {
        if out.len() >= limit {
            break;
        }
        let mut next = Vec::new();
        'grow: for base in &frontier {
            for value in pool {
                if out.len() + next.len() >= limit {
                    break 'grow;
                }
                let mut grown = base.clone();
                grown.push(value.clone());
                next.push(grown);
            }
        }
        out.extend(next.iter().cloned());
        frontier = next;
    }
    out.truncate(limit);
    out
}

/// `Σ_{k ≤ max_len} C(n, k)`, saturating.
fn subset_count(n: usize, max_len: usize) -> usize {
    let mut term: u128 = 1;
    let mut total: u128 = 1;
    for k in 1..=max_len.min(n) as u128 {
        term = match term.checked_mul(n as u128 - k + 1) {
            Some(product) => product / k,
            None => return usize::MAX,
        };
        total = match total.checked_add(term) {
            Some(sum) => sum,
            None => return usize::MAX,
        };
    }
    usize::try_from(total).unwrap_or(usize::MAX)
}

/// `Σ_{k ≤ max_len} n^k`, saturating.
fn sequence_count(n: usize, max_len: usize) -> usize {
    let mut term: usize = 1;
    let mut total: usize = 1;
    for _ in 0..max_len {
        term = term.saturating_mul(n);
        if term == 0 {
            break;
        }
        total = total.saturating_add(term);
    }
    total
}

/// Cartesian product of domains, yielded one assignment at a time.
///
/// The last domain varies fastest. An empty list of domains yields exactly one
/// (empty) assignment; any empty domain yields none.
pub struct Cases<'a> {
    domains: &'a [Vec<Value>],
    odometer: Vec<usize>,
    done: bool,
}

impl<'a> Cases<'a> {
    pub fn new(domains: &'a [Vec<Value>]) -> Self {
        Self {
            domains,
            odometer: vec![0; domains.len()],
            done: domains.iter().any(Vec::is_empty),
        }
    }

    /// Size of the product of the domains as built, saturating.
    pub fn total(&self) -> usize {
        self.domains
            .iter()
            .fold(1usize, |acc, d| acc.saturating_mul(d.len()))
    }
}

impl Iterator for Cases<'_> {
    type Item = Vec<Value>;

    fn next(&mut self) -> Option<Vec<Value>> {
        if self.done {
            return None;
        }
        let case = self
            .odometer
            .iter()
            .zip(self.domains)
            .map(|(&i, domain)| domain[i].clone())
            .collect();

        // advance, rightmost digit first
        self.done = true;
        for slot in (0..self.odometer.len()).rev() {
            self.odometer[slot] += 1;
            if self.odometer[slot] < self.domains[slot].len() {
                self.done = false;
                break;
            }
            self.odometer[slot] = 0;
        }
        Some(case)
    }
}
