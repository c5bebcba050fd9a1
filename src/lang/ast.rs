// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Syntax tree for fixture sources.

use std::fmt;

use super::lexer::Span;

/// Static types. Collections nest arbitrarily.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Bool,
    Mset(Box<Type>),
    Seq(Box<Type>),
    Set(Box<Type>),
}

impl Type {
    pub fn mset(elem: Type) -> Type {
        Type::Mset(Box::new(elem))
    }

    pub fn seq(elem: Type) -> Type {
        Type::Seq(Box::new(elem))
    }

    pub fn set(elem: Type) -> Type {
        Type::Set(Box::new(elem))
    }

    /// Element type of a collection, `None` for scalars.
    pub fn elem(&self) -> Option<&Type> {
        match self {
            Type::Mset(elem) | Type::Seq(elem) | Type::Set(elem) => Some(elem),
            Type::Int | Type::Bool => None,
        }
    }

    pub fn is_collection(&self) -> bool {
        self.elem().is_some()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => f.write_str("int"),
            Type::Bool => f.write_str("bool"),
            Type::Mset(elem) => write!(f, "mset[{}]", elem),
            Type::Seq(elem) => write!(f, "seq[{}]", elem),
            Type::Set(elem) => write!(f, "set[{}]", elem),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Implies,
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    In,
    Subset,
    /// `x # m`: multiplicity of `x` in `m`.
    Count,
    Union,
    Setminus,
    Add,
    Sub,
    Intersection,
    Mul,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Implies => "==>",
            BinOp::Or => "||",
            BinOp::And => "&&",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::In => "in",
            BinOp::Subset => "subset",
            BinOp::Count => "#",
            BinOp::Union => "union",
            BinOp::Setminus => "setminus",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Intersection => "intersection",
            BinOp::Mul => "*",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind {
    Int(i64),
    Bool(bool),
    Var(String),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    /// `mset(e)`
    Convert(Box<Expr>),
    /// `len(e)`
    Len(Box<Expr>),
    /// `mset[T]{a, b}`, `seq[T]{..}`, `set[T]{..}`; `ty` is the full collection type.
    Literal { ty: Type, elems: Vec<Expr> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: Type,
    pub ghost: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `ghost x := e`
    Ghost { name: String, value: Expr, span: Span },
    Assert { expr: Expr, span: Span },
    Assume { expr: Expr, span: Span },
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Ghost { span, .. } | Stmt::Assert { span, .. } | Stmt::Assume { span, .. } => {
                *span
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub span: Span,
    pub params: Vec<Param>,
    pub requires: Vec<Expr>,
    pub ensures: Vec<Expr>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub package: String,
    pub functions: Vec<Function>,
}
