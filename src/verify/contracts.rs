// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the multiset laws.
//!
//! Debug-mode assertions that the conversion and operator laws hold for the
//! concrete values at hand. They:
//!
//! 1. Are **zero-cost in release builds** (use `debug_assert!`)
//! 2. Fail with a message naming the law ("Contract violation: ...")
//! 3. Are called by the evaluator after every `mset(..)` and set-algebra step
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract                       | Law                                          |
//! |--------------------------------|----------------------------------------------|
//! | `check_conversion_identity`    | `mset(m) == m`                               |
//! | `check_double_conversion`      | `mset(mset(m)) == m`                         |
//! | `check_union_commutes`         | `mset(a union b) == mset(a) union mset(b)`   |
//! | `check_intersection_commutes`  | `mset(a intersection b) == ...`              |
//! | `check_difference_commutes`    | `mset(a setminus b) == ...`                  |
//! | `check_membership_preserved`   | `x in mset(m) == x in m`                     |
//! | `check_union_counts`           | `(a union b)[x] == a[x] + b[x]`              |
//! | `check_intersection_counts`    | `(a intersection b)[x] == min(a[x], b[x])`   |
//! | `check_difference_counts`      | `(a setminus b)[x] == max(0, a[x] - b[x])`   |

use std::fmt::Debug;

use super::types::check_well_formed;
use crate::convert::mset;
use crate::multiset::Multiset;

// ============================================================================
// CONVERSION CONTRACTS
// ============================================================================

/// `mset(m) == m`, and the result is well-formed.
#[inline]
pub fn check_conversion_identity<T: Ord + Clone + Debug>(m: &Multiset<T>) {
    let converted = mset(m);
    debug_assert!(
        check_well_formed(&converted).is_ok(),
        "Contract violation: WellFormed - mset({:?}) produced an ill-formed multiset",
        m
    );
    debug_assert_eq!(
        &converted, m,
        "Contract violation: conversion_identity - mset(m) != m"
    );
}

/// `mset(mset(m)) == m`.
#[inline]
pub fn check_double_conversion<T: Ord + Clone + Debug>(m: &Multiset<T>) {
    debug_assert_eq!(
        &mset(&mset(m)),
        m,
        "Contract violation: double_conversion - mset(mset(m)) != m"
    );
}

/// `x in mset(m) == x in m`.
#[inline]
pub fn check_membership_preserved<T: Ord + Clone + Debug>(x: &T, m: &Multiset<T>) {
    debug_assert_eq!(
        mset(m).contains(x),
        m.contains(x),
        "Contract violation: membership_preserved - {:?} in mset(m) != {:?} in m",
        x,
        x
    );
}

// ============================================================================
// DISTRIBUTIVITY CONTRACTS
// ============================================================================

#[inline]
pub fn check_union_commutes<T: Ord + Clone + Debug>(a: &Multiset<T>, b: &Multiset<T>) {
    debug_assert_eq!(
        mset(&a.union(b)),
        mset(a).union(&mset(b)),
        "Contract violation: union_commutes - mset({:?} union {:?})",
        a,
        b
    );
}

#[inline]
pub fn check_intersection_commutes<T: Ord + Clone + Debug>(a: &Multiset<T>, b: &Multiset<T>) {
    debug_assert_eq!(
        mset(&a.intersection(b)),
        mset(a).intersection(&mset(b)),
        "Contract violation: intersection_commutes - mset({:?} intersection {:?})",
        a,
        b
    );
}

#[inline]
pub fn check_difference_commutes<T: Ord + Clone + Debug>(a: &Multiset<T>, b: &Multiset<T>) {
    debug_assert_eq!(
        mset(&a.difference(b)),
        mset(a).difference(&mset(b)),
        "Contract violation: difference_commutes - mset({:?} setminus {:?})",
        a,
        b
    );
}

// ============================================================================
// POINTWISE MULTIPLICITY CONTRACTS
// ============================================================================

/// Every element of either operand has the summed count in the union.
#[inline]
pub fn check_union_counts<T: Ord + Clone + Debug>(
    a: &Multiset<T>,
    b: &Multiset<T>,
    result: &Multiset<T>,
) {
    for (x, _) in a.counts().chain(b.counts()) {
        debug_assert_eq!(
            result.count(x),
            a.count(x).saturating_add(b.count(x)),
            "Contract violation: union_counts - count of {:?}",
            x
        );
    }
    debug_assert_eq!(
        result.len(),
        a.len().saturating_add(b.len()),
        "Contract violation: union_counts - len {} != {} + {}",
        result.len(),
        a.len(),
        b.len()
    );
}

#[inline]
pub fn check_intersection_counts<T: Ord + Clone + Debug>(
    a: &Multiset<T>,
    b: &Multiset<T>,
    result: &Multiset<T>,
) {
    for (x, _) in a.counts().chain(b.counts()) {
        debug_assert_eq!(
            result.count(x),
            a.count(x).min(b.count(x)),
            "Contract violation: intersection_counts - count of {:?}",
            x
        );
    }
    debug_assert!(
        result.is_subset_of(a) && result.is_subset_of(b),
        "Contract violation: intersection_counts - result not contained in both operands"
    );
}

#[inline]
pub fn check_difference_counts<T: Ord + Clone + Debug>(
    a: &Multiset<T>,
    b: &Multiset<T>,
    result: &Multiset<T>,
) {
    for (x, _) in a.counts().chain(b.counts()) {
        debug_assert_eq!(
            result.count(x),
            a.count(x).saturating_sub(b.count(x)),
            "Contract violation: difference_counts - count of {:?}",
            x
        );
    }
    debug_assert!(
        result.is_subset_of(a),
        "Contract violation: difference_counts - result not contained in left operand"
    );
}
