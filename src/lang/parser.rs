// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Recursive-descent parser for fixture sources.
//!
//! Precedence, loosest first:
//!
//! | Level | Operators                          | Assoc |
//! |-------|------------------------------------|-------|
//! | 1     | `==>`                              | right |
//! | 2     | `\|\|`                             | left  |
//! | 3     | `&&`                               | left  |
//! | 4     | `== != < <= > >=`                  | left  |
//! | 5     | `in subset #`                      | left  |
//! | 6     | `union setminus + -`               | left  |
//! | 7     | `intersection *`                   | left  |
//! | 8     | unary `! -`                        | —     |
//!
//! Membership binds tighter than equality, so `x in mset(m) == x in m`
//! compares two membership tests.

use super::ast::{BinOp, Expr, ExprKind, Function, Param, SourceFile, Stmt, Type, UnaryOp};
use super::lexer::{tokenize, Span, SyntaxError, Token, TokenKind};

/// Parse a complete source file.
pub fn parse_file(src: &str) -> Result<SourceFile, SyntaxError> {
    let mut parser = Parser::new(tokenize(src)?);
    let file = parser.file()?;
    parser.expect_eof()?;
    Ok(file)
}

/// Parse a single expression (the whole input must be consumed).
pub fn parse_expr(src: &str) -> Result<Expr, SyntaxError> {
    let mut parser = Parser::new(tokenize(src)?);
    let expr = parser.expr()?;
    parser.expect_eof()?;
    Ok(expr)
}

/// Deepest nesting of parentheses, unary operators, `==>` chains and types.
const MAX_NESTING: usize = 64;

/// Deepest expression tree, where each operator of a left-associative chain
/// adds a level. Type checking and evaluation recurse this deep.
const MAX_TREE_DEPTH: usize = 256;

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    tree_depth: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            tree_depth: 0,
        }
    }

    fn nested<T>(
        &mut self,
        parse: fn(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<T, SyntaxError> {
        if self.depth >= MAX_NESTING || self.tree_depth >= MAX_TREE_DEPTH {
            return Err(SyntaxError::at(self.span(), "nesting too deep"));
        }
        self.depth += 1;
        self.tree_depth += 1;
        let result = parse(self);
        self.depth -= 1;
        self.tree_depth -= 1;
        result
    }

    fn peek(&self) -> &TokenKind {
        &self.tokens[self.pos.min(self.tokens.len() - 1)].kind
    }

    fn peek_at(&self, offset: usize) -> &TokenKind {
        &self.tokens[(self.pos + offset).min(self.tokens.len() - 1)].kind
    }

    fn span(&self) -> Span {
        self.tokens[self.pos.min(self.tokens.len() - 1)].span
    }

    /// Span of the most recently consumed token.
    fn prev_span(&self) -> Span {
        self.tokens[self.pos.saturating_sub(1)].span
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos.min(self.tokens.len() - 1)].clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, SyntaxError> {
        if *self.peek() == kind {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    fn expect_ident(&mut self, what: &str) -> Result<(String, Span), SyntaxError> {
        match self.peek().clone() {
            TokenKind::Ident(name) => {
                let span = self.advance().span;
                Ok((name, span))
            }
            _ => Err(self.unexpected(what)),
        }
    }

    fn expect_eof(&self) -> Result<(), SyntaxError> {
        match self.peek() {
            TokenKind::Eof => Ok(()),
            _ => Err(self.unexpected("end of input")),
        }
    }

    fn unexpected(&self, expected: &str) -> SyntaxError {
        SyntaxError::at(
            self.span(),
            format!("expected {}, found {}", expected, self.peek()),
        )
    }

    // ------------------------------------------------------------------
    // Items
    // ------------------------------------------------------------------

    fn file(&mut self) -> Result<SourceFile, SyntaxError> {
        self.expect(TokenKind::Package)?;
        let (package, _) = self.expect_ident("package name")?;
        let mut functions = Vec::new();
        while *self.peek() != TokenKind::Eof {
            functions.push(self.function()?);
        }
        Ok(SourceFile { package, functions })
    }

    fn function(&mut self) -> Result<Function, SyntaxError> {
        let start = self.span();
        let mut requires = Vec::new();
        let mut ensures = Vec::new();
        loop {
            match self.peek() {
                TokenKind::Requires => {
                    self.advance();
                    requires.push(self.expr()?);
                }
                TokenKind::Ensures => {
                    self.advance();
                    ensures.push(self.expr()?);
                }
                TokenKind::Func => break,
                _ => return Err(self.unexpected("'func', 'requires' or 'ensures'")),
            }
        }

        self.expect(TokenKind::Func)?;
        let (name, _) = self.expect_ident("function name")?;
        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        if *self.peek() != TokenKind::RParen {
            loop {
                params.push(self.param()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;

        self.expect(TokenKind::LBrace)?;
        let mut body = Vec::new();
        while !matches!(self.peek(), TokenKind::RBrace | TokenKind::Eof) {
            body.push(self.stmt()?);
            while self.eat(&TokenKind::Semicolon) {}
        }
        self.expect(TokenKind::RBrace)?;

        Ok(Function {
            name,
            span: start.to(self.prev_span()),
            params,
            requires,
            ensures,
            body,
        })
    }

    fn param(&mut self) -> Result<Param, SyntaxError> {
        let start = self.span();
        let ghost = self.eat(&TokenKind::Ghost);
        let (name, _) = self.expect_ident("parameter name")?;
        let ty = self.ty()?;
        Ok(Param {
            name,
            ty,
            ghost,
            span: start.to(self.prev_span()),
        })
    }

    fn stmt(&mut self) -> Result<Stmt, SyntaxError> {
        let start = self.span();
        match self.peek() {
            TokenKind::Ghost => {
                self.advance();
                let (name, _) = self.expect_ident("ghost variable name")?;
                self.expect(TokenKind::Define)?;
                let value = self.expr()?;
                Ok(Stmt::Ghost {
                    name,
                    value,
                    span: start.to(self.prev_span()),
                })
            }
            TokenKind::Assert => {
                self.advance();
                let expr = self.expr()?;
                Ok(Stmt::Assert {
                    expr,
                    span: start.to(self.prev_span()),
                })
            }
            TokenKind::Assume => {
                self.advance();
                let expr = self.expr()?;
                Ok(Stmt::Assume {
                    expr,
                    span: start.to(self.prev_span()),
                })
            }
            _ => Err(self.unexpected("'ghost', 'assert' or 'assume'")),
        }
    }

    fn ty(&mut self) -> Result<Type, SyntaxError> {
        let wrap: fn(Type) -> Type = match self.peek() {
            TokenKind::IntType => {
                self.advance();
                return Ok(Type::Int);
            }
            TokenKind::BoolType => {
                self.advance();
                return Ok(Type::Bool);
            }
            TokenKind::Mset => Type::mset,
            TokenKind::Seq => Type::seq,
            TokenKind::Set => Type::set,
            _ => return Err(self.unexpected("a type")),
        };
        self.advance();
        self.expect(TokenKind::LBracket)?;
        let elem = self.nested(Self::ty)?;
        self.expect(TokenKind::RBracket)?;
        Ok(wrap(elem))
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    fn expr(&mut self) -> Result<Expr, SyntaxError> {
        self.nested(Self::implies)
    }

    fn implies(&mut self) -> Result<Expr, SyntaxError> {
        let lhs = self.or()?;
        if self.eat(&TokenKind::Implies) {
            let rhs = self.nested(Self::implies)?;
            return Ok(binary(BinOp::Implies, lhs, rhs));
        }
        Ok(lhs)
    }

    fn or(&mut self) -> Result<Expr, SyntaxError> {
        self.left_assoc(Self::and, |kind| match kind {
            TokenKind::OrOr => Some(BinOp::Or),
            _ => None,
        })
    }

    fn and(&mut self) -> Result<Expr, SyntaxError> {
        self.left_assoc(Self::comparison, |kind| match kind {
            TokenKind::AndAnd => Some(BinOp::And),
            _ => None,
        })
    }

    fn comparison(&mut self) -> Result<Expr, SyntaxError> {
        self.left_assoc(Self::membership, |kind| match kind {
            TokenKind::EqEq => Some(BinOp::Eq),
            TokenKind::NotEq => Some(BinOp::Ne),
            TokenKind::Lt => Some(BinOp::Lt),
            TokenKind::Le => Some(BinOp::Le),
            TokenKind::Gt => Some(BinOp::Gt),
            TokenKind::Ge => Some(BinOp::Ge),
            _ => None,
        })
    }

    fn membership(&mut self) -> Result<Expr, SyntaxError> {
        self.left_assoc(Self::additive, |kind| match kind {
            TokenKind::In => Some(BinOp::In),
            TokenKind::Subset => Some(BinOp::Subset),
            TokenKind::Hash => Some(BinOp::Count),
            _ => None,
        })
    }

    fn additive(&mut self) -> Result<Expr, SyntaxError> {
        self.left_assoc(Self::multiplicative, |kind| match kind {
            TokenKind::Union => Some(BinOp::Union),
            TokenKind::Setminus => Some(BinOp::Setminus),
            TokenKind::Plus => Some(BinOp::Add),
            TokenKind::Minus => Some(BinOp::Sub),
            _ => None,
        })
    }

    fn multiplicative(&mut self) -> Result<Expr, SyntaxError> {
        self.left_assoc(Self::unary, |kind| match kind {
            TokenKind::Intersection => Some(BinOp::Intersection),
            TokenKind::Star => Some(BinOp::Mul),
            _ => None,
        })
    }

    fn left_assoc(
        &mut self,
        next: fn(&mut Self) -> Result<Expr, SyntaxError>,
        op_for: fn(&TokenKind) -> Option<BinOp>,
    ) -> Result<Expr, SyntaxError> {
        let lhs = next(self)?;
        let outer = self.tree_depth;
        let result = self.chain(lhs, next, op_for);
        self.tree_depth = outer;
        result
    }

    fn chain(
        &mut self,
        mut lhs: Expr,
        next: fn(&mut Self) -> Result<Expr, SyntaxError>,
        op_for: fn(&TokenKind) -> Option<BinOp>,
    ) -> Result<Expr, SyntaxError> {
        while let Some(op) = op_for(self.peek()) {
            if self.tree_depth >= MAX_TREE_DEPTH {
                return Err(SyntaxError::at(self.span(), "expression too deep"));
            }
            self.tree_depth += 1;
            self.advance();
            let rhs = next(self)?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, SyntaxError> {
        let start = self.span();
        let op = match self.peek() {
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            _ => return self.primary(),
        };
        self.advance();
        let operand = self.nested(Self::unary)?;

        // `-<literal>` is a single literal
        if op == UnaryOp::Neg {
            if let ExprKind::Int(value) = operand.kind {
                if let Some(negated) = value.checked_neg() {
                    return Ok(Expr {
                        kind: ExprKind::Int(negated),
                        span: start.to(operand.span),
                    });
                }
            }
        }

        let span = start.to(operand.span);
        Ok(Expr {
            kind: ExprKind::Unary(op, Box::new(operand)),
            span,
        })
    }

    fn primary(&mut self) -> Result<Expr, SyntaxError> {
        let start = self.span();
        match self.peek().clone() {
            TokenKind::Int(value) => {
                self.advance();
                Ok(Expr {
                    kind: ExprKind::Int(value),
                    span: start,
                })
            }
            TokenKind::True | TokenKind::False => {
                let value = *self.peek() == TokenKind::True;
                self.advance();
                Ok(Expr {
                    kind: ExprKind::Bool(value),
                    span: start,
                })
            }
            TokenKind::Ident(name) => {
                self.advance();
                Ok(Expr {
                    kind: ExprKind::Var(name),
                    span: start,
                })
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(Expr {
                    kind: inner.kind,
                    span: start.to(self.prev_span()),
                })
            }
            TokenKind::Mset if *self.peek_at(1) == TokenKind::LParen => {
                let operand = self.call_arg()?;
                Ok(Expr {
                    kind: ExprKind::Convert(Box::new(operand)),
                    span: start.to(self.prev_span()),
                })
            }
            TokenKind::Len => {
                let operand = self.call_arg()?;
                Ok(Expr {
                    kind: ExprKind::Len(Box::new(operand)),
                    span: start.to(self.prev_span()),
                })
            }
            TokenKind::Mset | TokenKind::Seq | TokenKind::Set => self.literal(),
            _ => Err(self.unexpected("an expression")),
        }
    }

    /// `name ( expr )`, returning the inner expression.
    fn call_arg(&mut self) -> Result<Expr, SyntaxError> {
        self.advance();
        self.expect(TokenKind::LParen)?;
        let operand = self.expr()?;
        self.expect(TokenKind::RParen)?;
        Ok(operand)
    }

    fn literal(&mut self) -> Result<Expr, SyntaxError> {
        let start = self.span();
        let ty = self.ty()?;
        self.expect(TokenKind::LBrace)?;
        let mut elems = Vec::new();
        if *self.peek() != TokenKind::RBrace {
            loop {
                elems.push(self.expr()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
                // trailing comma
                if *self.peek() == TokenKind::RBrace {
                    break;
                }
            }
        }
        self.expect(TokenKind::RBrace)?;
        Ok(Expr {
            kind: ExprKind::Literal { ty, elems },
            span: start.to(self.prev_span()),
        })
    }
}

fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    let span = lhs.span.to(rhs.span);
    Expr {
        kind: ExprKind::Binary(op, Box::new(lhs), Box::new(rhs)),
        span,
    }
}
