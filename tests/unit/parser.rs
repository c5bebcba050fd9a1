//! Front-end tests: parsing, type checking and evaluation of fixture syntax.

use msetcheck::lang::{
    check_file, eval, parse_expr, parse_file, tokenize, type_of, BinOp, Env, ExprKind, Scope,
    Stmt, TokenKind, Type, Value,
};

fn eval_closed(src: &str) -> Value {
    let expr = parse_expr(src).unwrap();
    type_of(&expr, &Scope::new()).unwrap();
    eval(&expr, &Env::new()).unwrap()
}

#[test]
fn test_fixture_parses_into_five_functions() {
    let src = std::fs::read_to_string(crate::common::fixture_path("multiset-convert-simple1.gobra"))
        .unwrap();
    let file = parse_file(&src).unwrap();
    assert_eq!(file.package, "pkg");
    let names: Vec<&str> = file.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["example1", "example2", "example3", "example4", "example5"]);

    let example1 = &file.functions[0];
    assert!(example1.params[0].ghost);
    assert_eq!(example1.params[0].ty, Type::mset(Type::Int));
    assert!(matches!(example1.body[0], Stmt::Ghost { ref name, .. } if name == "n"));

    let example5 = &file.functions[4];
    assert_eq!(example5.ensures.len(), 1);
    assert!(example5.body.is_empty());

    check_file(&file).unwrap();
}

#[test]
fn test_membership_binds_tighter_than_equality() {
    let expr = parse_expr("x in mset(m) == x in m").unwrap();
    let ExprKind::Binary(BinOp::Eq, lhs, rhs) = expr.kind else {
        panic!("expected ==, got {:?}", expr.kind);
    };
    assert!(matches!(lhs.kind, ExprKind::Binary(BinOp::In, _, _)));
    assert!(matches!(rhs.kind, ExprKind::Binary(BinOp::In, _, _)));
}

#[test]
fn test_keywords_and_comments_lex() {
    let tokens = tokenize("ghost n := mset(m) // trailing\n/* block */ assert").unwrap();
    let kinds: Vec<&TokenKind> = tokens.iter().map(|t| &t.kind).collect();
    assert_eq!(kinds.first(), Some(&&TokenKind::Ghost));
    assert!(kinds.contains(&&TokenKind::Assert));
    assert_eq!(kinds.last(), Some(&&TokenKind::Eof));
}

#[test]
fn test_syntax_errors_have_positions() {
    let err = parse_file("package p\n\nfunc f() { assert }").unwrap_err();
    assert_eq!(err.line, 3);
    assert!(err.to_string().contains("syntax error"));

    assert!(parse_expr("mset[int] { 1, ").is_err());
    assert!(parse_file("func f() {}").is_err());
}

#[test]
fn test_closed_expressions_evaluate() {
    assert_eq!(eval_closed("mset(mset[bool] { true, false, true }) == mset[bool] { true, false, true }"), Value::Bool(true));
    assert_eq!(eval_closed("len(mset(seq[int]{3, 3, 4}))"), Value::Int(3));
    assert_eq!(eval_closed("3 # mset(seq[int]{3, 3, 4})"), Value::Int(2));
    assert_eq!(eval_closed("mset[int]{1} union mset[int]{1} == mset[int]{1, 1}"), Value::Bool(true));
    assert_eq!(eval_closed("mset[int]{1, 1} intersection mset[int]{1} == mset[int]{1}"), Value::Bool(true));
    assert_eq!(eval_closed("mset[int]{1} setminus mset[int]{1, 1} == mset[int]{}"), Value::Bool(true));
}

#[test]
fn test_typed_rendering_of_results() {
    let expr = parse_expr("mset[mset[int]] { mset[int] { 42 } }").unwrap();
    let ty = type_of(&expr, &Scope::new()).unwrap();
    let value = eval(&expr, &Env::new()).unwrap();
    assert_eq!(value.render(&ty), "mset[mset[int]]{mset[int]{42}}");
    assert_eq!(ty.to_string(), "mset[mset[int]]");
}

#[test]
fn test_type_errors_are_caught_before_evaluation() {
    for src in [
        "mset(1)",
        "1 in 2",
        "mset[int]{1} union set[int]{1}",
        "mset[int]{1} == mset[bool]{true}",
        "true + 1",
        "len(3)",
    ] {
        let expr = parse_expr(src).unwrap();
        assert!(type_of(&expr, &Scope::new()).is_err(), "{} should not type-check", src);
    }
}
