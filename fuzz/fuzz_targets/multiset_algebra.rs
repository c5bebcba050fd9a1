// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the multiset operators.
//!
//! The fuzzer builds two multisets from explicit counts and checks every law
//! plus the structural invariants on each result.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use msetcheck::verify::{check_well_formed, Law};
use msetcheck::{mset, Multiset};

#[derive(Debug, Arbitrary)]
struct Input {
    a: Vec<(u8, u16)>,
    b: Vec<(u8, u16)>,
    element: u8,
}

fn build(pairs: &[(u8, u16)]) -> Option<Multiset<u8>> {
    // Zero counts are rejected by construction; the fuzzer will hit that path too
    Multiset::try_from_counts(pairs.iter().map(|&(x, n)| (x, usize::from(n)))).ok()
}

fuzz_target!(|input: Input| {
    let (Some(a), Some(b)) = (build(&input.a), build(&input.b)) else {
        return;
    };

    for result in [a.union(&b), a.intersection(&b), a.difference(&b)] {
        assert!(check_well_formed(&result).is_ok());
    }

    for law in Law::ALL {
        assert!(law.holds_unary(&a), "{} failed", law.name());
        assert!(law.holds_binary(&a, &b), "{} failed", law.name());
        assert!(law.holds_membership(&input.element, &a), "{} failed", law.name());
    }

    assert_eq!(mset(&a).len(), a.len());
    assert_eq!(a.union(&b).len(), a.len() + b.len());
});
