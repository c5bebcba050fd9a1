// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Invariant errors and the well-formedness check for multisets.
//!
//! `Multiset` keeps its invariants by construction: the only public way to
//! feed it raw counts is `try_from_counts`, which rejects anything that would
//! break them. `check_well_formed` re-derives the structural invariants from
//! scratch and is what the contracts and the property tests lean on.
//!
//! | Invariant   | Statement                              | Violation          |
//! |-------------|----------------------------------------|--------------------|
//! | `WellFormed`| `∀ (x, n) ∈ counts. n > 0`             | `ZeroMultiplicity` |
//! | `Len`       | `len = min(Σ counts, usize::MAX)`      | `LenMismatch`      |
//! | `Exact`     | `Σ counts ≤ usize::MAX`                | `CountOverflow`    |
//!
//! `Exact` is enforced where counts enter exactly: `try_from_counts` (and so
//! deserialization) and `checked_union`. The plain operators saturate.

use std::fmt;

use crate::multiset::Multiset;

/// Error type for invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// A `(element, 0)` pair was supplied, or a stored count is zero.
    ZeroMultiplicity { position: usize },
    /// Summing multiplicities overflowed `usize`.
    CountOverflow { position: usize },
    /// The cached total size disagrees with the sum of the counts.
    LenMismatch { cached: usize, actual: usize },
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantError::ZeroMultiplicity { position } => {
                write!(f, "multiplicity at position {} is zero", position)
            }
            InvariantError::CountOverflow { position } => {
                write!(f, "multiplicity overflow at position {}", position)
            }
            InvariantError::LenMismatch { cached, actual } => {
                write!(f, "len() {} != sum of counts {}", cached, actual)
            }
        }
    }
}

impl std::error::Error for InvariantError {}

/// Check the `WellFormed` and `Len` invariants.
pub fn check_well_formed<T: Ord>(m: &Multiset<T>) -> Result<(), InvariantError> {
    let mut actual: usize = 0;
    for (position, (_, n)) in m.counts().enumerate() {
        if n == 0 {
            return Err(InvariantError::ZeroMultiplicity { position });
        }
        actual = actual.saturating_add(n);
    }
    if actual != m.len() {
        return Err(InvariantError::LenMismatch {
            cached: m.len(),
            actual,
        });
    }
    Ok(())
}
