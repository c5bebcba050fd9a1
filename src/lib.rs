// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Multisets, the `mset(..)` conversion, and a bounded checker for the
//! conversion laws written as ghost-code fixtures.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ multiset.rs  │────▶│ convert.rs   │────▶│   verify/    │
//! │ (Multiset,   │     │ (ToMultiset, │     │ (contracts,  │
//! │  ∪ ∩ ∖ #)    │     │  mset)       │     │  law suite)  │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!        │                                         │
//!        ▼                                         ▼
//! ┌──────────────────────────────┐     ┌──────────────────────┐
//! │            lang/             │────▶│        check/        │
//! │ lexer → parser → typeck →    │     │ domains, cases,      │
//! │ eval over Value              │     │ verdicts, reports    │
//! └──────────────────────────────┘     └──────────────────────┘
//! ```
//!
//! # Laws
//!
//! | Law                      | Statement                                   |
//! |--------------------------|---------------------------------------------|
//! | conversion identity      | `mset(m) == m`                              |
//! | double conversion        | `mset(mset(m)) == m`                        |
//! | union commutes           | `mset(a union b) == mset(a) union mset(b)`  |
//! | intersection commutes    | same, with `intersection`                   |
//! | difference commutes      | same, with `setminus`                       |
//! | membership preserved     | `x in mset(m) == x in m`                    |
//!
//! Union is additive: `#(x, a union b) == #(x, a) + #(x, b)`.
//!
//! # Usage
//!
//! ```
//! use msetcheck::check::{check_source, CheckConfig};
//!
//! let src = "package p\nfunc f(ghost m mset[int]) { assert mset(m) == m }";
//! let report = check_source("f.gobra", src, &CheckConfig::default()).unwrap();
//! assert!(report.passed());
//! ```

pub mod check;
pub mod convert;
pub mod lang;
pub mod multiset;
pub mod verify;

pub use convert::{mset, ToMultiset};
pub use multiset::Multiset;
pub use verify::InvariantError;

#[cfg(test)]
mod tests {
    //! Property tests for the multiset algebra against a sorted-vector model.

    use super::*;
    use proptest::prelude::*;

    fn sorted(mut v: Vec<u8>) -> Vec<u8> {
        v.sort_unstable();
        v
    }

    /// Multiset difference on sorted vectors: drop one match per element of `b`.
    fn model_difference(a: &[u8], b: &[u8]) -> Vec<u8> {
        let mut rest = b.to_vec();
        let mut out = Vec::new();
        for &x in a {
            if let Some(pos) = rest.iter().position(|&y| y == x) {
                rest.remove(pos);
            } else {
                out.push(x);
            }
        }
        sorted(out)
    }

    fn model_intersection(a: &[u8], b: &[u8]) -> Vec<u8> {
        let mut rest = b.to_vec();
        let mut out = Vec::new();
        for &x in a {
            if let Some(pos) = rest.iter().position(|&y| y == x) {
                rest.remove(pos);
                out.push(x);
            }
        }
        sorted(out)
    }

    fn elems(m: &Multiset<u8>) -> Vec<u8> {
        m.iter().copied().collect()
    }

    proptest! {
        #[test]
        fn prop_iteration_is_sorted_input(v in prop::collection::vec(0u8..8, 0..12)) {
            let m: Multiset<u8> = v.iter().copied().collect();
            prop_assert_eq!(elems(&m), sorted(v.clone()));
            prop_assert_eq!(m.len(), v.len());
            prop_assert!(verify::check_well_formed(&m).is_ok());
        }

        #[test]
        fn prop_operators_match_model(
            a in prop::collection::vec(0u8..6, 0..10),
            b in prop::collection::vec(0u8..6, 0..10),
        ) {
            let ma: Multiset<u8> = a.iter().copied().collect();
            let mb: Multiset<u8> = b.iter().copied().collect();

            let mut sum = a.clone();
            sum.extend(&b);
            prop_assert_eq!(elems(&ma.union(&mb)), sorted(sum));
            prop_assert_eq!(elems(&ma.intersection(&mb)), model_intersection(&a, &b));
            prop_assert_eq!(elems(&ma.difference(&mb)), model_difference(&a, &b));
        }

        #[test]
        fn prop_conversion_commutes(
            a in prop::collection::vec(0u8..6, 0..10),
            b in prop::collection::vec(0u8..6, 0..10),
        ) {
            let ma = mset(&a);
            let mb = mset(&b);
            prop_assert_eq!(mset(&ma), ma.clone());
            prop_assert_eq!(mset(&mset(&ma)), ma.clone());
            prop_assert_eq!(mset(&ma.union(&mb)), mset(&ma).union(&mset(&mb)));
            prop_assert_eq!(mset(&ma.intersection(&mb)), mset(&ma).intersection(&mset(&mb)));
            prop_assert_eq!(mset(&ma.difference(&mb)), mset(&ma).difference(&mset(&mb)));
        }

        #[test]
        fn prop_membership_matches_contains(
            v in prop::collection::vec(0u8..6, 0..10),
            x in 0u8..8,
        ) {
            let m = mset(&v);
            prop_assert_eq!(mset(&m).contains(&x), v.contains(&x));
            prop_assert_eq!(m.count(&x), v.iter().filter(|&&y| y == x).count());
        }
    }
}
