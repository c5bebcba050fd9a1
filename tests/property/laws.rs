//! Conversion laws over random multisets, and the exhaustive law suite.

use std::collections::BTreeSet;

use msetcheck::verify::{bounded_multisets, check_well_formed, run_laws, Law};
use msetcheck::{mset, Multiset};
use proptest::prelude::*;

use crate::common::{counted_multiset_strategy, multiset_strategy};

proptest! {
    #[test]
    fn prop_every_law_holds(a in multiset_strategy(), b in counted_multiset_strategy(), x in 0u8..6) {
        for law in Law::ALL {
            prop_assert!(law.holds_unary(&a), "{} failed on {}", law.name(), a);
            prop_assert!(law.holds_binary(&a, &b), "{} failed on {}, {}", law.name(), a, b);
            prop_assert!(law.holds_membership(&x, &a), "{} failed on {}, {}", law.name(), x, a);
        }
    }

    #[test]
    fn prop_operators_stay_well_formed(a in counted_multiset_strategy(), b in multiset_strategy()) {
        prop_assert!(check_well_formed(&a.union(&b)).is_ok());
        prop_assert!(check_well_formed(&a.intersection(&b)).is_ok());
        prop_assert!(check_well_formed(&a.difference(&b)).is_ok());
    }

    #[test]
    fn prop_algebraic_identities(a in multiset_strategy(), b in multiset_strategy(), c in multiset_strategy()) {
        prop_assert_eq!(a.union(&b), b.union(&a));
        prop_assert_eq!(a.intersection(&b), b.intersection(&a));
        prop_assert_eq!(a.union(&b).union(&c), a.union(&b.union(&c)));
        prop_assert_eq!(a.union(&b).difference(&b), a.clone());
        prop_assert!(a.intersection(&b).is_subset_of(&a));
        prop_assert!(a.difference(&b).is_subset_of(&a));
        prop_assert!(a.is_subset_of(&a.union(&b)));
    }

    #[test]
    fn prop_sequence_conversion_counts(v in prop::collection::vec(0u8..5, 0..12)) {
        let m = mset(&v);
        prop_assert_eq!(m.len(), v.len());
        for x in 0u8..5 {
            prop_assert_eq!(m.count(&x), v.iter().filter(|&&y| y == x).count());
        }
    }

    #[test]
    fn prop_set_conversion_has_unit_counts(v in prop::collection::vec(0u8..5, 0..12)) {
        let set: BTreeSet<u8> = v.into_iter().collect();
        let m = mset(&set);
        prop_assert_eq!(m.len(), set.len());
        prop_assert!(m.counts().all(|(_, n)| n == 1));
    }

    #[test]
    fn prop_nested_conversion_is_identity(inner in prop::collection::vec(multiset_strategy(), 0..4)) {
        let outer: Multiset<Multiset<u8>> = inner.into_iter().collect();
        prop_assert_eq!(mset(&outer), outer.clone());
        prop_assert_eq!(mset(&mset(&outer)), outer);
    }
}

#[test]
fn law_suite_passes_on_bounded_domain() {
    let pool = [-1i64, 0, 1, 2];
    let domain = bounded_multisets(&pool, 3);
    // C(4 + 3, 3)
    assert_eq!(domain.len(), 35);

    let report = run_laws(&domain, &pool);
    assert!(report.all_passed(), "{:?}", report);
    assert_eq!(report.outcomes.len(), Law::ALL.len());
    for outcome in &report.outcomes {
        assert!(outcome.cases > 0, "{} ran no cases", outcome.law.name());
    }
}

#[test]
fn law_report_serializes() {
    let domain = bounded_multisets(&[0u8, 1], 1);
    let report = run_laws(&domain, &[0u8, 1]);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["domain_size"], 3);
    assert!(json["outcomes"][0]["counterexample"].is_null());
}
