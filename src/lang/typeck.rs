// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Static type checking.
//!
//! Runs before any evaluation so the checker never has to report a type
//! confusion as a falsified assertion. Each function gets its own scope:
//! parameters first, then ghost locals in declaration order. Contracts
//! (`requires`/`ensures`) only see parameters.

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::ast::{BinOp, Expr, ExprKind, Function, SourceFile, Stmt, Type, UnaryOp};
use super::lexer::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeError {
    pub line: usize,
    pub col: usize,
    pub message: String,
}

impl TypeError {
    fn at(span: Span, message: impl Into<String>) -> Self {
        Self {
            line: span.line,
            col: span.col,
            message: message.into(),
        }
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: type error: {}", self.line, self.col, self.message)
    }
}

impl std::error::Error for TypeError {}

/// Every name visible in a function body, with its type, in binding order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    bindings: Vec<(String, Type)>,
    index: HashMap<String, usize>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, name: &str, ty: Type, span: Span) -> Result<(), TypeError> {
        if self.index.contains_key(name) {
            return Err(TypeError::at(span, format!("'{}' is already declared", name)));
        }
        self.index.insert(name.to_string(), self.bindings.len());
        self.bindings.push((name.to_string(), ty));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Type> {
        self.index.get(name).map(|&i| &self.bindings[i].1)
    }

    pub fn bindings(&self) -> &[(String, Type)] {
        &self.bindings
    }
}

/// Check every function in a file. Returns one scope per function.
pub fn check_file(file: &SourceFile) -> Result<Vec<Scope>, TypeError> {
    let mut seen = HashSet::new();
    let mut scopes = Vec::with_capacity(file.functions.len());
    for function in &file.functions {
        if !seen.insert(function.name.as_str()) {
            return Err(TypeError::at(
                function.span,
                format!("function '{}' is declared twice", function.name),
            ));
        }
        scopes.push(check_function(function)?);
    }
    Ok(scopes)
}

pub fn check_function(function: &Function) -> Result<Scope, TypeError> {
    let mut scope = Scope::new();
    for param in &function.params {
        scope.bind(&param.name, param.ty.clone(), param.span)?;
    }

    for clause in function.requires.iter().chain(&function.ensures) {
        expect_type(clause, &scope, &Type::Bool)?;
    }

    for stmt in &function.body {
        match stmt {
            Stmt::Ghost { name, value, span } => {
                let ty = type_of(value, &scope)?;
                scope.bind(name, ty, *span)?;
            }
            Stmt::Assert { expr, .. } | Stmt::Assume { expr, .. } => {
                expect_type(expr, &scope, &Type::Bool)?;
            }
        }
    }
    Ok(scope)
}

fn expect_type(expr: &Expr, scope: &Scope, expected: &Type) -> Result<(), TypeError> {
    let actual = type_of(expr, scope)?;
    if actual == *expected {
        Ok(())
    } else {
        Err(TypeError::at(
            expr.span,
            format!("expected {}, found {}", expected, actual),
        ))
    }
}

/// Infer the type of an expression.
pub fn type_of(expr: &Expr, scope: &Scope) -> Result<Type, TypeError> {
    match &expr.kind {
        ExprKind::Int(_) => Ok(Type::Int),
        ExprKind::Bool(_) => Ok(Type::Bool),
        ExprKind::Var(name) => scope
            .get(name)
            .cloned()
            .ok_or_else(|| TypeError::at(expr.span, format!("unknown identifier '{}'", name))),
        ExprKind::Unary(UnaryOp::Not, operand) => {
            expect_type(operand, scope, &Type::Bool)?;
            Ok(Type::Bool)
        }
        ExprKind::Unary(UnaryOp::Neg, operand) => {
            expect_type(operand, scope, &Type::Int)?;
            Ok(Type::Int)
        }
        ExprKind::Binary(op, lhs, rhs) => binary_type(*op, lhs, rhs, expr.span, scope),
        ExprKind::Convert(operand) => match type_of(operand, scope)? {
            Type::Mset(elem) | Type::Seq(elem) | Type::Set(elem) => Ok(Type::Mset(elem)),
            other => Err(TypeError::at(
                operand.span,
                format!("mset(..) needs a collection, found {}", other),
            )),
        },
        ExprKind::Len(operand) => {
            let ty = type_of(operand, scope)?;
            if ty.is_collection() {
                Ok(Type::Int)
            } else {
                Err(TypeError::at(
                    operand.span,
                    format!("len(..) needs a collection, found {}", ty),
                ))
            }
        }
        ExprKind::Literal { ty, elems } => {
            let Some(elem_ty) = ty.elem() else {
                return Err(TypeError::at(expr.span, format!("{} has no literal form", ty)));
            };
            for elem in elems {
                expect_type(elem, scope, elem_ty)?;
            }
            Ok(ty.clone())
        }
    }
}

fn binary_type(
    op: BinOp,
    lhs: &Expr,
    rhs: &Expr,
    span: Span,
    scope: &Scope,
) -> Result<Type, TypeError> {
    match op {
        BinOp::Implies | BinOp::Or | BinOp::And => {
            expect_type(lhs, scope, &Type::Bool)?;
            expect_type(rhs, scope, &Type::Bool)?;
            Ok(Type::Bool)
        }
        BinOp::Eq | BinOp::Ne => {
            let left = type_of(lhs, scope)?;
            expect_type(rhs, scope, &left)?;
            Ok(Type::Bool)
        }
        BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
            expect_type(lhs, scope, &Type::Int)?;
            expect_type(rhs, scope, &Type::Int)?;
            Ok(Type::Bool)
        }
        BinOp::Add | BinOp::Sub | BinOp::Mul => {
            expect_type(lhs, scope, &Type::Int)?;
            expect_type(rhs, scope, &Type::Int)?;
            Ok(Type::Int)
        }
        BinOp::In => {
            let container = type_of(rhs, scope)?;
            let Some(elem) = container.elem() else {
                return Err(TypeError::at(
                    rhs.span,
                    format!("'in' needs a collection on the right, found {}", container),
                ));
            };
            expect_type(lhs, scope, elem)?;
            Ok(Type::Bool)
        }
        BinOp::Count => {
            let container = type_of(rhs, scope)?;
            let Type::Mset(elem) = &container else {
                return Err(TypeError::at(
                    rhs.span,
                    format!("'#' needs a multiset on the right, found {}", container),
                ));
            };
            expect_type(lhs, scope, elem)?;
            Ok(Type::Int)
        }
        BinOp::Union | BinOp::Intersection | BinOp::Setminus | BinOp::Subset => {
            let left = type_of(lhs, scope)?;
            if !matches!(left, Type::Mset(_) | Type::Set(_)) {
                return Err(TypeError::at(
                    span,
                    format!("'{}' needs multisets or sets, found {}", op.symbol(), left),
                ));
            }
            expect_type(rhs, scope, &left)?;
            Ok(if op == BinOp::Subset { Type::Bool } else { left })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::parser::{parse_expr, parse_file};

    fn scope_with(bindings: &[(&str, Type)]) -> Scope {
        let mut scope = Scope::new();
        for (name, ty) in bindings {
            scope.bind(name, ty.clone(), Span::default()).unwrap();
        }
        scope
    }

    fn infer(src: &str, scope: &Scope) -> Result<Type, TypeError> {
        type_of(&parse_expr(src).unwrap(), scope)
    }

    #[test]
    fn conversion_yields_multiset() {
        let scope = scope_with(&[
            ("m", Type::mset(Type::Int)),
            ("s", Type::seq(Type::Bool)),
            ("t", Type::set(Type::Int)),
        ]);
        assert_eq!(infer("mset(m)", &scope), Ok(Type::mset(Type::Int)));
        assert_eq!(infer("mset(s)", &scope), Ok(Type::mset(Type::Bool)));
        assert_eq!(infer("mset(t)", &scope), Ok(Type::mset(Type::Int)));

        let scope = scope_with(&[("x", Type::Int), ("m", Type::mset(Type::Int))]);
        assert_eq!(infer("x in mset(m) == x in m", &scope), Ok(Type::Bool));
    }

    #[test]
    fn nested_literal_types() {
        let scope = Scope::new();
        assert_eq!(
            infer("mset[mset[int]] { mset[int] { 42 } }", &scope),
            Ok(Type::mset(Type::mset(Type::Int)))
        );
        let err = infer("mset[int] { true }", &scope).unwrap_err();
        assert!(err.message.contains("expected int, found bool"));
    }

    #[test]
    fn set_algebra_needs_matching_collections() {
        let scope = scope_with(&[
            ("a", Type::mset(Type::Int)),
            ("b", Type::mset(Type::Bool)),
            ("s", Type::set(Type::Int)),
            ("q", Type::seq(Type::Int)),
        ]);
        assert!(infer("a union a", &scope).is_ok());
        assert!(infer("s intersection s", &scope).is_ok());
        assert!(infer("a union b", &scope).is_err());
        assert!(infer("a union s", &scope).is_err());
        let err = infer("q setminus q", &scope).unwrap_err();
        assert!(err.message.contains("'setminus'"));
    }

    #[test]
    fn count_needs_multiset() {
        let scope = scope_with(&[("a", Type::mset(Type::Int)), ("s", Type::set(Type::Int))]);
        assert_eq!(infer("(1 # a) + 1", &scope), Ok(Type::Int));
        assert!(infer("1 # s", &scope).is_err());
    }

    #[test]
    fn unknown_identifiers_are_reported() {
        let err = infer("y == 1", &Scope::new()).unwrap_err();
        assert!(err.message.contains("unknown identifier 'y'"));
    }

    #[test]
    fn contracts_do_not_see_ghost_locals() {
        let file = parse_file(
            "package p\nensures k == 1\nfunc f() { ghost k := 1 }",
        )
        .unwrap();
        let err = check_file(&file).unwrap_err();
        assert!(err.message.contains("unknown identifier 'k'"));
    }

    #[test]
    fn duplicates_are_rejected() {
        let file = parse_file("package p\nfunc f(x int) { ghost x := 2 }").unwrap();
        assert!(check_file(&file).unwrap_err().message.contains("already declared"));

        let file = parse_file("package p\nfunc f() {}\nfunc f() {}").unwrap();
        assert!(check_file(&file).unwrap_err().message.contains("declared twice"));
    }

    #[test]
    fn scope_records_binding_order() {
        let file = parse_file(
            "package p\nfunc f(ghost m mset[int]) { ghost n := mset(m)\n assert n == m }",
        )
        .unwrap();
        let scopes = check_file(&file).unwrap();
        let names: Vec<&str> = scopes[0].bindings().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["m", "n"]);
    }

    #[test]
    fn assertions_must_be_boolean() {
        let file = parse_file("package p\nfunc f() { assert 1 + 2 }").unwrap();
        let err = check_file(&file).unwrap_err();
        assert!(err.message.contains("expected bool, found int"));
    }
}
