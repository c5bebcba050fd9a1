// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The fixture language: a small ghost-code subset with multisets,
//! sequences and sets.
//!
//! Pipeline: [`tokenize`] → [`parse_file`] → [`check_file`] → [`eval`].
//! Each stage reports its own error type with a line and column.

pub mod ast;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod typeck;
pub mod value;

pub use ast::{BinOp, Expr, ExprKind, Function, Param, SourceFile, Stmt, Type, UnaryOp};
pub use eval::{eval, eval_bool, Env, EvalError, EvalErrorKind};
pub use lexer::{tokenize, Span, SyntaxError, Token, TokenKind};
pub use parser::{parse_expr, parse_file};
pub use typeck::{check_file, check_function, type_of, Scope, TypeError};
pub use value::Value;
