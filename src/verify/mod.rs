// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The verification layer: invariants, runtime contracts, and the law suite.
//!
//! Three complementary approaches to catching bugs:
//!
//! 1. **Invariant checks** (`check_well_formed`) that re-derive a multiset's
//!    structural invariants from its counts.
//!
//! 2. **Runtime contracts** that panic in debug builds when an algebraic law
//!    fails on the values at hand. Zero-cost in release.
//!
//! 3. **The law suite** that checks every law over every value of a bounded
//!    domain and reports the first counterexample.

mod types;
pub mod contracts;
pub mod laws;

pub use laws::{
    bounded_multiset_count, bounded_multisets, bounded_multisets_upto, run_laws, Law, LawOutcome,
    LawReport,
};
pub use types::*;
