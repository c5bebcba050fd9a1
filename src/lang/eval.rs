// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Concrete evaluation of type-checked expressions.
//!
//! The type checker has already run, so a `Mismatch` here means the caller
//! skipped it; it is reported rather than panicking. The only errors a
//! well-typed program can hit are integer overflow and unbound names.
//!
//! Every multiset step is followed by the matching runtime contract from
//! `verify::contracts`, so debug builds double as a check on `Multiset`.

use std::fmt;

use super::ast::{BinOp, Expr, ExprKind, Type, UnaryOp};
use super::lexer::Span;
use super::value::Value;
use crate::convert::mset;
use crate::multiset::Multiset;
use crate::verify::contracts;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalErrorKind {
    Overflow(&'static str),
    Unbound(String),
    Mismatch(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalError {
    pub line: usize,
    pub col: usize,
    pub kind: EvalErrorKind,
}

impl EvalError {
    fn at(span: Span, kind: EvalErrorKind) -> Self {
        Self {
            line: span.line,
            col: span.col,
            kind,
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: ", self.line, self.col)?;
        match &self.kind {
            EvalErrorKind::Overflow(op) => write!(f, "integer overflow in '{}'", op),
            EvalErrorKind::Unbound(name) => write!(f, "'{}' is not bound", name),
            EvalErrorKind::Mismatch(what) => write!(f, "ill-typed operands: {}", what),
        }
    }
}

impl std::error::Error for EvalError {}

/// Variable bindings, in binding order. Later bindings shadow earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Env {
    vars: Vec<(String, Value)>,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.vars.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars
            .iter()
            .rev()
            .find(|(bound, _)| bound == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.vars.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Evaluate an expression to a boolean.
pub fn eval_bool(expr: &Expr, env: &Env) -> Result<bool, EvalError> {
    let value = eval(expr, env)?;
    value
        .as_bool()
        .ok_or_else(|| mismatch(expr.span, format!("expected bool, got {}", value)))
}

/// Evaluate an expression.
pub fn eval(expr: &Expr, env: &Env) -> Result<Value, EvalError> {
    match &expr.kind {
        ExprKind::Int(n) => Ok(Value::Int(*n)),
        ExprKind::Bool(b) => Ok(Value::Bool(*b)),
        ExprKind::Var(name) => env
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::at(expr.span, EvalErrorKind::Unbound(name.clone()))),
        ExprKind::Unary(UnaryOp::Not, operand) => Ok(Value::Bool(!eval_bool(operand, env)?)),
        ExprKind::Unary(UnaryOp::Neg, operand) => {
            let n = int_of(operand, env)?;
            n.checked_neg()
                .map(Value::Int)
                .ok_or_else(|| EvalError::at(expr.span, EvalErrorKind::Overflow("-")))
        }
        ExprKind::Binary(op, lhs, rhs) => binary(*op, lhs, rhs, expr.span, env),
        ExprKind::Convert(operand) => convert(eval(operand, env)?, operand.span),
        ExprKind::Len(operand) => {
            let len = match eval(operand, env)? {
                Value::Seq(items) => items.len(),
                Value::Set(items) => items.len(),
                Value::Mset(items) => items.len(),
                other => {
                    return Err(mismatch(operand.span, format!("len of {}", other)));
                }
            };
            to_int(len, expr.span, "len")
        }
        ExprKind::Literal { ty, elems } => {
            let items = elems
                .iter()
                .map(|elem| eval(elem, env))
                .collect::<Result<Vec<_>, _>>()?;
            match ty {
                Type::Mset(_) => Ok(Value::Mset(items.into_iter().collect())),
                Type::Seq(_) => Ok(Value::Seq(items)),
                Type::Set(_) => Ok(Value::Set(items.into_iter().collect())),
                Type::Int | Type::Bool => Err(mismatch(expr.span, format!("{} literal", ty))),
            }
        }
    }
}

fn mismatch(span: Span, what: String) -> EvalError {
    EvalError::at(span, EvalErrorKind::Mismatch(what))
}

fn int_of(expr: &Expr, env: &Env) -> Result<i64, EvalError> {
    let value = eval(expr, env)?;
    value
        .as_int()
        .ok_or_else(|| mismatch(expr.span, format!("expected int, got {}", value)))
}

fn to_int(n: usize, span: Span, op: &'static str) -> Result<Value, EvalError> {
    i64::try_from(n)
        .map(Value::Int)
        .map_err(|_| EvalError::at(span, EvalErrorKind::Overflow(op)))
}

fn convert(value: Value, span: Span) -> Result<Value, EvalError> {
    match value {
        Value::Mset(m) => {
            contracts::check_conversion_identity(&m);
            contracts::check_double_conversion(&m);
            Ok(Value::Mset(mset(&m)))
        }
        Value::Seq(items) => Ok(Value::Mset(mset(&items))),
        Value::Set(items) => Ok(Value::Mset(mset(&items))),
        other => Err(mismatch(span, format!("mset({})", other))),
    }
}

fn binary(op: BinOp, lhs: &Expr, rhs: &Expr, span: Span, env: &Env) -> Result<Value, EvalError> {
    // Short-circuiting connectives evaluate the right side lazily.
    match op {
        BinOp::And => return Ok(Value::Bool(eval_bool(lhs, env)? && eval_bool(rhs, env)?)),
        BinOp::Or => return Ok(Value::Bool(eval_bool(lhs, env)? || eval_bool(rhs, env)?)),
        BinOp::Implies => return Ok(Value::Bool(!eval_bool(lhs, env)? || eval_bool(rhs, env)?)),
        _ => {}
    }

    let left = eval(lhs, env)?;
    let right = eval(rhs, env)?;

    match (op, left, right) {
        (BinOp::Eq, a, b) => Ok(Value::Bool(a == b)),
        (BinOp::Ne, a, b) => Ok(Value::Bool(a != b)),
        (BinOp::Lt, Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a < b)),
        (BinOp::Le, Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a <= b)),
        (BinOp::Gt, Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a > b)),
        (BinOp::Ge, Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a >= b)),
        (BinOp::Add, Value::Int(a), Value::Int(b)) => checked(a.checked_add(b), span, "+"),
        (BinOp::Sub, Value::Int(a), Value::Int(b)) => checked(a.checked_sub(b), span, "-"),
        (BinOp::Mul, Value::Int(a), Value::Int(b)) => checked(a.checked_mul(b), span, "*"),

        (BinOp::In, x, Value::Mset(m)) => {
            contracts::check_membership_preserved(&x, &m);
            Ok(Value::Bool(m.contains(&x)))
        }
        (BinOp::In, x, Value::Set(s)) => Ok(Value::Bool(s.contains(&x))),
        (BinOp::In, x, Value::Seq(s)) => Ok(Value::Bool(s.contains(&x))),
        (BinOp::Count, x, Value::Mset(m)) => to_int(m.count(&x), span, "#"),

        (BinOp::Subset, Value::Mset(a), Value::Mset(b)) => Ok(Value::Bool(a.is_subset_of(&b))),
        (BinOp::Subset, Value::Set(a), Value::Set(b)) => Ok(Value::Bool(a.is_subset(&b))),

        (BinOp::Union, Value::Mset(a), Value::Mset(b)) => mset_union(&a, &b, span).map(Value::Mset),
        (BinOp::Intersection, Value::Mset(a), Value::Mset(b)) => {
            Ok(Value::Mset(mset_intersection(&a, &b)))
        }
        (BinOp::Setminus, Value::Mset(a), Value::Mset(b)) => {
            Ok(Value::Mset(mset_difference(&a, &b)))
        }

        (BinOp::Union, Value::Set(a), Value::Set(b)) => {
            Ok(Value::Set(a.union(&b).cloned().collect()))
        }
        (BinOp::Intersection, Value::Set(a), Value::Set(b)) => {
            Ok(Value::Set(a.intersection(&b).cloned().collect()))
        }
        (BinOp::Setminus, Value::Set(a), Value::Set(b)) => {
            Ok(Value::Set(a.difference(&b).cloned().collect()))
        }

        (op, a, b) => Err(mismatch(
            span,
            format!("{} {} {}", a, op.symbol(), b),
        )),
    }
}

fn checked(result: Option<i64>, span: Span, op: &'static str) -> Result<Value, EvalError> {
    result
        .map(Value::Int)
        .ok_or_else(|| EvalError::at(span, EvalErrorKind::Overflow(op)))
}

fn mset_union(
    a: &Multiset<Value>,
    b: &Multiset<Value>,
    span: Span,
) -> Result<Multiset<Value>, EvalError> {
    let result = a
        .checked_union(b)
        .map_err(|_| EvalError::at(span, EvalErrorKind::Overflow("union")))?;
    contracts::check_union_counts(a, b, &result);
    contracts::check_union_commutes(a, b);
    Ok(result)
}

fn mset_intersection(a: &Multiset<Value>, b: &Multiset<Value>) -> Multiset<Value> {
    let result = a.intersection(b);
    contracts::check_intersection_counts(a, b, &result);
    contracts::check_intersection_commutes(a, b);
    result
}

fn mset_difference(a: &Multiset<Value>, b: &Multiset<Value>) -> Multiset<Value> {
    let result = a.difference(b);
    contracts::check_difference_counts(a, b, &result);
    contracts::check_difference_commutes(a, b);
    result
}
