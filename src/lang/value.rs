// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime values of the fixture language.
//!
//! `Value` is totally ordered so it can sit inside a `Multiset` or a
//! `BTreeSet`, which is all nesting needs. The order itself is arbitrary but
//! deterministic, and it makes domain enumeration and counterexamples stable
//! from run to run.

use std::collections::BTreeSet;
use std::fmt::{self, Write as _};

use crate::lang::ast::Type;
use crate::multiset::Multiset;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Seq(Vec<Value>),
    Set(BTreeSet<Value>),
    Mset(Multiset<Value>),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Render in literal syntax, e.g. `mset[int]{1, 1, 2}`.
    ///
    /// Falls back to the untyped form if `ty` doesn't describe this value.
    pub fn render(&self, ty: &Type) -> String {
        let mut out = String::new();
        self.render_into(ty, &mut out);
        out
    }

    fn render_into(&self, ty: &Type, out: &mut String) {
        let elem_ty = match (self, ty) {
            (Value::Seq(_), Type::Seq(elem))
            | (Value::Set(_), Type::Set(elem))
            | (Value::Mset(_), Type::Mset(elem)) => elem.as_ref(),
            _ => {
                let _ = write!(out, "{}", self);
                return;
            }
        };
        let items: Vec<&Value> = match self {
            Value::Seq(items) => items.iter().collect(),
            Value::Set(items) => items.iter().collect(),
            Value::Mset(items) => items.iter().collect(),
            Value::Int(_) | Value::Bool(_) => Vec::new(),
        };
        let _ = write!(out, "{}{{", ty);
        for (i, value) in items.into_iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            value.render_into(elem_ty, out);
        }
        out.push('}');
    }
}

fn write_items<'a>(
    f: &mut fmt::Formatter<'_>,
    prefix: &str,
    items: impl Iterator<Item = &'a Value>,
) -> fmt::Result {
    write!(f, "{}{{", prefix)?;
    for (i, value) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", value)?;
    }
    f.write_str("}")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Seq(items) => write_items(f, "seq", items.iter()),
            Value::Set(items) => write_items(f, "set", items.iter()),
            Value::Mset(items) => write_items(f, "mset", items.iter()),
        }
    }
}
