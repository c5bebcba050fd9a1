//! Reference oracles for differential testing.
//!
//! A multiset is modelled as an unsorted `Vec` of occurrences. Every oracle is
//! a linear scan that is obviously correct, and the optimized `BTreeMap`
//! representation must agree with it on every input.

use msetcheck::Multiset;
use proptest::prelude::*;

use crate::common::{counted_multiset_strategy, multiset_strategy};

// =============================================================================
// ORACLE IMPLEMENTATIONS
// =============================================================================

/// Count occurrences by scanning.
pub fn oracle_count(items: &[u8], x: u8) -> usize {
    items.iter().filter(|&&y| y == x).count()
}

/// Concatenation: every occurrence from both sides.
pub fn oracle_union(a: &[u8], b: &[u8]) -> Vec<u8> {
    a.iter().chain(b).copied().collect()
}

/// Keep an occurrence from `a` only while `b` still has a matching one.
pub fn oracle_intersection(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut remaining = b.to_vec();
    let mut out = Vec::new();
    for &x in a {
        if let Some(pos) = remaining.iter().position(|&y| y == x) {
            remaining.swap_remove(pos);
            out.push(x);
        }
    }
    out
}

/// Cancel one occurrence from `a` per occurrence in `b`.
pub fn oracle_difference(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut out = a.to_vec();
    for &x in b {
        if let Some(pos) = out.iter().position(|&y| y == x) {
            out.swap_remove(pos);
        }
    }
    out
}

/// Sub-multiset: every element of `a` is matched by a distinct one of `b`.
pub fn oracle_subset(a: &[u8], b: &[u8]) -> bool {
    oracle_difference(a, b).is_empty()
}

fn occurrences(m: &Multiset<u8>) -> Vec<u8> {
    m.iter().copied().collect()
}

fn same_multiset(actual: &Multiset<u8>, expected: &[u8]) -> bool {
    let mut sorted = expected.to_vec();
    sorted.sort_unstable();
    occurrences(actual) == sorted
}

// =============================================================================
// DIFFERENTIAL PROPERTIES
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_count_matches_oracle(m in multiset_strategy(), x in 0u8..6) {
        let items = occurrences(&m);
        prop_assert_eq!(m.count(&x), oracle_count(&items, x));
        prop_assert_eq!(m.contains(&x), oracle_count(&items, x) > 0);
    }

    #[test]
    fn prop_union_matches_oracle(a in multiset_strategy(), b in multiset_strategy()) {
        let expected = oracle_union(&occurrences(&a), &occurrences(&b));
        prop_assert!(same_multiset(&a.union(&b), &expected));
    }

    #[test]
    fn prop_intersection_matches_oracle(a in multiset_strategy(), b in multiset_strategy()) {
        let expected = oracle_intersection(&occurrences(&a), &occurrences(&b));
        prop_assert!(same_multiset(&a.intersection(&b), &expected));
    }

    #[test]
    fn prop_difference_matches_oracle(a in multiset_strategy(), b in multiset_strategy()) {
        let expected = oracle_difference(&occurrences(&a), &occurrences(&b));
        prop_assert!(same_multiset(&a.difference(&b), &expected));
    }

    #[test]
    fn prop_subset_matches_oracle(a in multiset_strategy(), b in multiset_strategy()) {
        let (ia, ib) = (occurrences(&a), occurrences(&b));
        prop_assert_eq!(a.is_subset_of(&b), oracle_subset(&ia, &ib));
    }

    #[test]
    fn prop_large_counts_match_oracle(a in counted_multiset_strategy(), b in counted_multiset_strategy()) {
        let (ia, ib) = (occurrences(&a), occurrences(&b));
        prop_assert!(same_multiset(&a.union(&b), &oracle_union(&ia, &ib)));
        prop_assert!(same_multiset(&a.difference(&b), &oracle_difference(&ia, &ib)));
        prop_assert_eq!(a.union(&b).len(), a.len() + b.len());
    }

    #[test]
    fn prop_remove_one_matches_oracle(m in multiset_strategy(), x in 0u8..6) {
        let mut items = occurrences(&m);
        let mut m = m;
        let removed = m.remove_one(&x);
        let expected = match items.iter().position(|&y| y == x) {
            Some(pos) => {
                items.swap_remove(pos);
                true
            }
            None => false,
        };
        prop_assert_eq!(removed, expected);
        prop_assert!(same_multiset(&m, &items));
    }
}

// =============================================================================
// ORACLE SANITY
// =============================================================================

#[test]
fn oracles_agree_on_known_cases() {
    assert_eq!(oracle_count(&[1, 1, 2], 1), 2);
    assert_eq!(oracle_union(&[1], &[1, 2]).len(), 3);
    assert_eq!(oracle_intersection(&[1, 1, 2], &[1, 3]), vec![1]);
    let mut diff = oracle_difference(&[1, 1, 2], &[1, 3]);
    diff.sort_unstable();
    assert_eq!(diff, vec![1, 2]);
    assert!(oracle_subset(&[1], &[1, 2]));
    assert!(!oracle_subset(&[1, 1], &[1, 2]));
}
