// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The multiset value: an element → multiplicity map.
//!
//! A `Multiset<T>` stores each distinct element once, together with how many
//! times it occurs. Absent elements have multiplicity zero, and a stored element
//! never does, so two multisets are equal exactly when every element has the
//! same multiplicity in both. That is extensional equality for free: the derived
//! `PartialEq` on the backing `BTreeMap` is already the right one.
//!
//! The backing map is ordered rather than hashed so multisets are themselves
//! `Ord + Hash` and can be elements of other multisets (`mset[mset[int]]`).
//!
//! # Operator semantics
//!
//! | Operation      | Multiplicity of `x`            |
//! |----------------|--------------------------------|
//! | `union`        | `a[x] + b[x]`                  |
//! | `intersection` | `min(a[x], b[x])`              |
//! | `difference`   | `max(0, a[x] - b[x])`          |
//!
//! Union is additive. That matches the multiset theory the fixture's host
//! verifier is built on, where `union` of two multisets sums counts.
//!
//! Every operation is total. Multiplicities and `len` saturate at
//! `usize::MAX`; `checked_union` and `try_from_counts` report
//! `CountOverflow` instead.
//!
//! # Invariants
//!
//! - **WellFormed**: `∀ (x, n) ∈ counts. n > 0`
//! - **Len**: `len = min(Σ counts, usize::MAX)`
//!
//! Every mutating method maintains both; `verify::check_well_formed` checks them.

use std::collections::btree_map::{self, BTreeMap};
use std::collections::BTreeSet;
use std::fmt;
use std::iter::FromIterator;
use std::ops::{Add, BitAnd, Sub};

use serde::de::{Deserialize, Deserializer, Error as _};
use serde::ser::{Serialize, Serializer};

use crate::verify::InvariantError;

/// A finite multiset over an ordered element type.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Multiset<T: Ord> {
    counts: BTreeMap<T, usize>,
    len: usize,
}

impl<T: Ord> Multiset<T> {
    /// The empty multiset.
    pub fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
            len: 0,
        }
    }

    /// A multiset holding `value` exactly once.
    pub fn singleton(value: T) -> Self {
        let mut m = Self::new();
        m.insert(value);
        m
    }

    /// Build a multiset from explicit `(element, multiplicity)` pairs.
    ///
    /// Repeated elements have their counts summed. A zero count is rejected
    /// rather than silently dropped: a caller writing `(x, 0)` almost certainly
    /// has an off-by-one somewhere upstream.
    pub fn try_from_counts<I>(pairs: I) -> Result<Self, InvariantError>
    where
        I: IntoIterator<Item = (T, usize)>,
    {
        let mut m = Self::new();
        for (position, (value, n)) in pairs.into_iter().enumerate() {
            if n == 0 {
                return Err(InvariantError::ZeroMultiplicity { position });
            }
            m.len = m
                .len
                .checked_add(n)
                .ok_or(InvariantError::CountOverflow { position })?;
            let slot = m.counts.entry(value).or_insert(0);
            *slot = slot
                .checked_add(n)
                .ok_or(InvariantError::CountOverflow { position })?;
        }
        Ok(m)
    }

    /// Add one occurrence of `value`.
    pub fn insert(&mut self, value: T) {
        self.insert_n(value, 1);
    }

    /// Add `n` occurrences of `value`, saturating at `usize::MAX`.
    /// Inserting zero copies is a no-op.
    pub fn insert_n(&mut self, value: T, n: usize) {
        if n == 0 {
            return;
        }
        let slot = self.counts.entry(value).or_insert(0);
        *slot = slot.saturating_add(n);
        self.len = self.len.saturating_add(n);
    }

    /// Remove one occurrence of `value`. Returns `false` if it was absent.
    pub fn remove_one(&mut self, value: &T) -> bool {
        match self.counts.get_mut(value) {
            Some(n) if *n > 1 => *n -= 1,
            Some(_) => {
                self.counts.remove(value);
            }
            None => return false,
        }
        // a saturated len no longer says how far below the cap the sum is
        self.len = if self.len == usize::MAX {
            self.saturating_total()
        } else {
            self.len - 1
        };
        true
    }

    fn saturating_total(&self) -> usize {
        self.counts.values().fold(0, |acc: usize, &n| acc.saturating_add(n))
    }

    /// Multiplicity of `value`; zero when absent.
    #[inline]
    pub fn count(&self, value: &T) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Membership: `value` occurs at least once.
    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        self.counts.contains_key(value)
    }

    /// Total size, i.e. the sum of all multiplicities.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of distinct elements.
    #[inline]
    pub fn distinct_len(&self) -> usize {
        self.counts.len()
    }

    /// No occurrences at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Every element, repeated by its multiplicity, in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.counts.iter(),
            current: None,
        }
    }

    /// `(element, multiplicity)` pairs in ascending element order.
    pub fn counts(&self) -> impl Iterator<Item = (&T, usize)> + '_ {
        self.counts.iter().map(|(value, &n)| (value, n))
    }

    /// Elements with positive multiplicity.
    pub fn support(&self) -> BTreeSet<&T> {
        self.counts.keys().collect()
    }

    /// Pointwise `self[x] <= other[x]`.
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.len <= other.len && self.counts().all(|(value, n)| n <= other.count(value))
    }

    /// No element is present in both.
    pub fn is_disjoint_from(&self, other: &Self) -> bool {
        let (small, large) = if self.distinct_len() <= other.distinct_len() {
            (self, other)
        } else {
            (other, self)
        };
        small.counts.keys().all(|value| !large.contains(value))
    }
}

impl<T: Ord + Clone> Multiset<T> {
    /// Additive union: multiplicities are summed, saturating at `usize::MAX`.
    pub fn union(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for (value, n) in other.counts() {
            out.insert_n(value.clone(), n);
        }
        out
    }

    /// Additive union, or `CountOverflow` if the total size would not fit.
    ///
    /// `position` is the index, in `other`'s ascending order, of the pair
    /// that overflowed.
    pub fn checked_union(&self, other: &Self) -> Result<Self, InvariantError> {
        let mut out = self.clone();
        for (position, (value, n)) in other.counts().enumerate() {
            out.len = out
                .len
                .checked_add(n)
                .ok_or(InvariantError::CountOverflow { position })?;
            let slot = out.counts.entry(value.clone()).or_insert(0);
            *slot = slot.saturating_add(n);
        }
        Ok(out)
    }

    /// Pointwise minimum of multiplicities.
    pub fn intersection(&self, other: &Self) -> Self {
        let (small, large) = if self.distinct_len() <= other.distinct_len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut out = Self::new();
        for (value, n) in small.counts() {
            out.insert_n(value.clone(), n.min(large.count(value)));
        }
        out
    }

    /// Truncated pointwise subtraction (`setminus`).
    pub fn difference(&self, other: &Self) -> Self {
        let mut out = Self::new();
        for (value, n) in self.counts() {
            out.insert_n(value.clone(), n.saturating_sub(other.count(value)));
        }
        out
    }
}

impl<T: Ord> Default for Multiset<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for Multiset<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut m = Self::new();
        m.extend(iter);
        m
    }
}

impl<T: Ord> Extend<T> for Multiset<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for Multiset<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

/// Iterator over a multiset's elements, with repetition.
pub struct Iter<'a, T> {
    inner: btree_map::Iter<'a, T, usize>,
    current: Option<(&'a T, usize)>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        loop {
            match self.current {
                Some((value, remaining)) if remaining > 0 => {
                    self.current = Some((value, remaining - 1));
                    return Some(value);
                }
                _ => {
                    let (value, &n) = self.inner.next()?;
                    self.current = Some((value, n));
                }
            }
        }
    }
}

impl<'a, T: Ord> IntoIterator for &'a Multiset<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T: Ord + Clone> Add for &Multiset<T> {
    type Output = Multiset<T>;

    fn add(self, rhs: Self) -> Multiset<T> {
        self.union(rhs)
    }
}

impl<T: Ord + Clone> BitAnd for &Multiset<T> {
    type Output = Multiset<T>;

    fn bitand(self, rhs: Self) -> Multiset<T> {
        self.intersection(rhs)
    }
}

impl<T: Ord + Clone> Sub for &Multiset<T> {
    type Output = Multiset<T>;

    fn sub(self, rhs: Self) -> Multiset<T> {
        self.difference(rhs)
    }
}

impl<T: Ord + fmt::Display> fmt::Display for Multiset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str("}")
    }
}

impl<T: Ord + fmt::Debug> fmt::Debug for Multiset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.counts.iter()).finish()
    }
}

// Serialized as `[[element, count], ...]` so non-string elements survive JSON.
impl<T: Ord + Serialize> Serialize for Multiset<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.counts.iter())
    }
}

impl<'de, T: Ord + Deserialize<'de>> Deserialize<'de> for Multiset<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pairs = Vec::<(T, usize)>::deserialize(deserializer)?;
        Multiset::try_from_counts(pairs).map_err(D::Error::custom)
    }
}
