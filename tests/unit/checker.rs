//! Bounded checker behaviour on the shipped fixtures and on inline sources.

use msetcheck::check::{check_source, CheckError, DirectiveKind, Verdict};

use crate::common::{check_fixture, check_fixture_with, function, small_config, verified_cases};

#[test]
fn test_collection_fixture_verifies() {
    let report = check_fixture("multiset-convert-collections.gobra");
    assert!(report.passed(), "{:#?}", report);

    // 1 + 5 + 25 + 125 sequences, times 5 ints
    assert_eq!(function(&report, "fromSeq").cases, 780);

    let from_set = function(&report, "fromSet");
    assert_eq!(from_set.directives.last().map(|d| d.kind), Some(DirectiveKind::Ensures));
    assert!(from_set.vacuous_cases > 0);

    // six inner multisets, bound 3: C(6 + 3, 3)
    assert_eq!(function(&report, "nested").cases, 84);
}

#[test]
fn test_max_union_fixture_is_falsified() {
    let report = check_fixture_with("multiset-union-is-not-max.gobra", &small_config());
    assert!(!report.passed());
    assert_eq!(report.tally(), (0, 2, 0));

    let idempotent = function(&report, "unionIsIdempotent");
    let Verdict::Falsified { counterexample } = &idempotent.directives[0].verdict else {
        panic!("expected falsified");
    };
    assert_eq!(counterexample.to_string(), "a = mset[int]{0}");
}

#[test]
fn test_nested_counterexamples_render_typed() {
    let src = "package p
func f(ghost mm mset[mset[int]]) {
  assert len(mm) == 0
}";
    let report = check_source("inline", src, &small_config()).unwrap();
    let Verdict::Falsified { counterexample } = &report.functions[0].directives[0].verdict else {
        panic!("expected falsified");
    };
    assert_eq!(counterexample.to_string(), "mm = mset[mset[int]]{mset[int]{}}");
}

#[test]
fn test_directive_text_comes_from_source() {
    let src = "package p\nfunc f(ghost m mset[int]) {\n  assert mset(mset(m))   ==\n     m\n}";
    let report = check_source("inline", src, &small_config()).unwrap();
    let directive = &report.functions[0].directives[0];
    assert_eq!(directive.text, "mset(mset(m)) == m");
    assert_eq!(directive.line, 3);
    assert_eq!(verified_cases(&directive.verdict), 10);
}

#[test]
fn test_assume_false_makes_function_vacuous() {
    let src = "package p\nfunc f(x int) { assume false\n assert x == 7 }";
    let report = check_source("inline", src, &small_config()).unwrap();
    let f = &report.functions[0];
    assert!(f.vacuous);
    assert_eq!(f.vacuous_cases, 3);
    assert_eq!(f.directives[0].verdict, Verdict::Verified { cases: 0 });
}

#[test]
fn test_report_json_shape() {
    let report = check_fixture_with("multiset-union-is-not-max.gobra", &small_config());
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["package"], "pkg");
    let directive = &json["functions"][0]["directives"][0];
    assert_eq!(directive["kind"], "assert");
    assert_eq!(directive["verdict"]["status"], "falsified");
    assert!(directive["verdict"]["counterexample"].is_array());
}

#[test]
fn test_type_errors_stop_checking() {
    let src = "package p\nfunc f(ghost m mset[int]) { assert m == 1 }";
    let err = check_source("inline", src, &small_config()).unwrap_err();
    let CheckError::Type { error, .. } = err else {
        panic!("expected a type error");
    };
    assert_eq!(error.line, 2);
}
