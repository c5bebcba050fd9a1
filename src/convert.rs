// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `mset(x)`: conversion of collection-like values into multisets.
//!
//! On a value that is already a multiset the conversion is the identity, which
//! is where the conversion laws come from:
//!
//! - `mset(m) == m`
//! - `mset(mset(m)) == m`
//! - `mset(a ∘ b) == mset(a) ∘ mset(b)` for `∘ ∈ {union, intersection, setminus}`
//! - `x in mset(m) == x in m`
//!
//! Sequences convert by counting occurrences, sets give every member
//! multiplicity one.

use std::collections::BTreeSet;

use crate::multiset::Multiset;

/// Values with a canonical multiset view.
pub trait ToMultiset {
    type Elem: Ord;

    fn to_multiset(&self) -> Multiset<Self::Elem>;
}

/// The conversion operator. Identity on multisets.
#[inline]
pub fn mset<C: ToMultiset + ?Sized>(value: &C) -> Multiset<C::Elem> {
    value.to_multiset()
}

impl<T: Ord + Clone> ToMultiset for Multiset<T> {
    type Elem = T;

    fn to_multiset(&self) -> Multiset<T> {
        self.clone()
    }
}

impl<T: Ord + Clone> ToMultiset for [T] {
    type Elem = T;

    fn to_multiset(&self) -> Multiset<T> {
        self.iter().cloned().collect()
    }
}

impl<T: Ord + Clone> ToMultiset for Vec<T> {
    type Elem = T;

    fn to_multiset(&self) -> Multiset<T> {
        self.as_slice().to_multiset()
    }
}

impl<T: Ord + Clone, const N: usize> ToMultiset for [T; N] {
    type Elem = T;

    fn to_multiset(&self) -> Multiset<T> {
        self.as_slice().to_multiset()
    }
}

impl<T: Ord + Clone> ToMultiset for BTreeSet<T> {
    type Elem = T;

    fn to_multiset(&self) -> Multiset<T> {
        self.iter().cloned().collect()
    }
}

impl<T: Ord + Clone> ToMultiset for Option<T> {
    type Elem = T;

    fn to_multiset(&self) -> Multiset<T> {
        self.iter().cloned().collect()
    }
}
