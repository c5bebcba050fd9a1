// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Kani model checking proofs for the multiset operators.
//!
//! A multiset over a universe of `UNIVERSE` elements is modelled as an array
//! of counts, which is exactly what `Multiset<T>` stores per distinct key.
//! The operators here mirror the pointwise rules in `src/multiset.rs`.
//!
//! Run with: `cargo kani`
//!
//! ## Verified Properties
//!
//! 1. **No overflow**: union of counts below `MAX_COUNT` never overflows
//! 2. **Cancellation**: `(a union b) setminus b == a`
//! 3. **Decomposition**: `(a setminus b) union (a intersection b) == a`
//! 4. **Commutativity**: union and intersection are symmetric
//! 5. **Length**: `len(a union b) == len(a) + len(b)`

/// Distinct elements in the modelled universe.
pub const UNIVERSE: usize = 4;

/// Largest count the proofs quantify over.
pub const MAX_COUNT: u32 = 1 << 16;

pub type Counts = [u32; UNIVERSE];

// ============================================================================
// POINTWISE OPERATORS (mirrors src/multiset.rs)
// ============================================================================

/// Additive union. `None` if any count overflows.
pub fn union(a: &Counts, b: &Counts) -> Option<Counts> {
    let mut out = [0; UNIVERSE];
    for i in 0..UNIVERSE {
        out[i] = a[i].checked_add(b[i])?;
    }
    Some(out)
}

/// Pointwise minimum.
pub fn intersection(a: &Counts, b: &Counts) -> Counts {
    let mut out = [0; UNIVERSE];
    for i in 0..UNIVERSE {
        out[i] = a[i].min(b[i]);
    }
    out
}

/// Truncated subtraction.
pub fn difference(a: &Counts, b: &Counts) -> Counts {
    let mut out = [0; UNIVERSE];
    for i in 0..UNIVERSE {
        out[i] = a[i].saturating_sub(b[i]);
    }
    out
}

/// Total size, counting repeats.
pub fn len(a: &Counts) -> u64 {
    a.iter().map(|&n| u64::from(n)).sum()
}

/// Sub-multiset: every count bounded by the other's.
pub fn is_subset(a: &Counts, b: &Counts) -> bool {
    (0..UNIVERSE).all(|i| a[i] <= b[i])
}

// ============================================================================
// KANI MODEL CHECKING PROOFS
// ============================================================================

#[cfg(kani)]
mod kani_proofs {
    use super::*;

    fn any_counts() -> Counts {
        let mut counts = [0; UNIVERSE];
        for slot in counts.iter_mut() {
            *slot = kani::any_where(|&n: &u32| n <= MAX_COUNT);
        }
        counts
    }

    #[kani::proof]
    #[kani::unwind(5)]
    fn verify_union_never_overflows_in_range() {
        let a = any_counts();
        let b = any_counts();
        kani::assert(union(&a, &b).is_some(), "bounded counts must not overflow");
    }

    #[kani::proof]
    #[kani::unwind(5)]
    fn verify_union_then_difference_cancels() {
        let a = any_counts();
        let b = any_counts();
        if let Some(u) = union(&a, &b) {
            kani::assert(difference(&u, &b) == a, "(a + b) - b must equal a");
        }
    }

    #[kani::proof]
    #[kani::unwind(5)]
    fn verify_difference_and_intersection_decompose() {
        let a = any_counts();
        let b = any_counts();
        let rebuilt = union(&difference(&a, &b), &intersection(&a, &b));
        kani::assert(rebuilt == Some(a), "(a - b) + min(a, b) must equal a");
    }

    #[kani::proof]
    #[kani::unwind(5)]
    fn verify_operators_commute() {
        let a = any_counts();
        let b = any_counts();
        kani::assert(union(&a, &b) == union(&b, &a), "union must commute");
        kani::assert(
            intersection(&a, &b) == intersection(&b, &a),
            "intersection must commute",
        );
    }

    #[kani::proof]
    #[kani::unwind(5)]
    fn verify_union_length_is_sum() {
        let a = any_counts();
        let b = any_counts();
        if let Some(u) = union(&a, &b) {
            kani::assert(len(&u) == len(&a) + len(&b), "len must be additive");
        }
    }

    #[kani::proof]
    #[kani::unwind(5)]
    fn verify_results_are_sub_multisets() {
        let a = any_counts();
        let b = any_counts();
        kani::assert(is_subset(&intersection(&a, &b), &a), "a ∩ b ⊆ a");
        kani::assert(is_subset(&difference(&a, &b), &a), "a ∖ b ⊆ a");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operators_on_known_counts() {
        let a = [2, 0, 1, 5];
        let b = [1, 3, 0, 5];
        assert_eq!(union(&a, &b), Some([3, 3, 1, 10]));
        assert_eq!(intersection(&a, &b), [1, 0, 0, 5]);
        assert_eq!(difference(&a, &b), [1, 0, 1, 0]);
        assert_eq!(len(&a), 8);
    }

    #[test]
    fn test_union_overflow_is_detected() {
        let a = [u32::MAX, 0, 0, 0];
        let b = [1, 0, 0, 0];
        assert_eq!(union(&a, &b), None);
    }

    #[test]
    fn test_decomposition_on_known_counts() {
        let a = [4, 1, 0, 7];
        let b = [2, 3, 9, 7];
        let rebuilt = union(&difference(&a, &b), &intersection(&a, &b));
        assert_eq!(rebuilt, Some(a));
    }
}
