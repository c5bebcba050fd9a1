// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tokenizer for fixture sources.
//!
//! Newlines carry no meaning: every statement starts with a keyword, so the
//! parser can tell where one ends without them. Comments (`//` and `/* */`)
//! are skipped here and never reach the parser.

use std::fmt;

/// Source location. `start..end` are byte offsets; `line`/`col` are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub col: usize,
}

impl Span {
    /// Smallest span covering both.
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start,
            end: other.end.max(self.end),
            line: self.line,
            col: self.col,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Ident(String),
    Int(i64),

    // keywords
    Package,
    Func,
    Ghost,
    Assert,
    Assume,
    Requires,
    Ensures,
    True,
    False,
    Union,
    Intersection,
    Setminus,
    Subset,
    In,
    Mset,
    Seq,
    Set,
    IntType,
    BoolType,
    Len,

    // punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Define,

    // operators
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    AndAnd,
    OrOr,
    Bang,
    Implies,
    Plus,
    Minus,
    Star,
    Hash,

    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Ident(name) => return write!(f, "identifier '{}'", name),
            TokenKind::Int(value) => return write!(f, "integer {}", value),
            TokenKind::Package => "'package'",
            TokenKind::Func => "'func'",
            TokenKind::Ghost => "'ghost'",
            TokenKind::Assert => "'assert'",
            TokenKind::Assume => "'assume'",
            TokenKind::Requires => "'requires'",
            TokenKind::Ensures => "'ensures'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Union => "'union'",
            TokenKind::Intersection => "'intersection'",
            TokenKind::Setminus => "'setminus'",
            TokenKind::Subset => "'subset'",
            TokenKind::In => "'in'",
            TokenKind::Mset => "'mset'",
            TokenKind::Seq => "'seq'",
            TokenKind::Set => "'set'",
            TokenKind::IntType => "'int'",
            TokenKind::BoolType => "'bool'",
            TokenKind::Len => "'len'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Define => "':='",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::AndAnd => "'&&'",
            TokenKind::OrOr => "'||'",
            TokenKind::Bang => "'!'",
            TokenKind::Implies => "'==>'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Hash => "'#'",
            TokenKind::Eof => "end of input",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Lexing or parsing failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub line: usize,
    pub col: usize,
    pub message: String,
}

impl SyntaxError {
    pub fn at(span: Span, message: impl Into<String>) -> Self {
        Self {
            line: span.line,
            col: span.col,
            message: message.into(),
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: syntax error: {}", self.line, self.col, self.message)
    }
}

impl std::error::Error for SyntaxError {}

fn keyword(word: &str) -> Option<TokenKind> {
    let kind = match word {
        "package" => TokenKind::Package,
        "func" => TokenKind::Func,
        "ghost" => TokenKind::Ghost,
        "assert" => TokenKind::Assert,
        "assume" => TokenKind::Assume,
        "requires" => TokenKind::Requires,
        "ensures" => TokenKind::Ensures,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "union" => TokenKind::Union,
        "intersection" => TokenKind::Intersection,
        "setminus" => TokenKind::Setminus,
        "subset" => TokenKind::Subset,
        "in" => TokenKind::In,
        "mset" => TokenKind::Mset,
        "seq" => TokenKind::Seq,
        "set" => TokenKind::Set,
        "int" => TokenKind::IntType,
        "bool" => TokenKind::BoolType,
        "len" => TokenKind::Len,
        _ => return None,
    };
    Some(kind)
}

struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn here(&self) -> Span {
        Span {
            start: self.pos,
            end: self.pos,
            line: self.line,
            col: self.col,
        }
    }

    /// Advance past one character (which may be multi-byte).
    fn bump(&mut self) {
        let Some(c) = self.src[self.pos..].chars().next() else {
            return;
        };
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
    }

    fn skip_trivia(&mut self) -> Result<(), SyntaxError> {
        loop {
            match (self.peek(), self.peek_at(1)) {
                (Some(c), _) if c.is_ascii_whitespace() => self.bump(),
                (Some(b'/'), Some(b'/')) => {
                    while !matches!(self.peek(), None | Some(b'\n')) {
                        self.bump();
                    }
                }
                (Some(b'/'), Some(b'*')) => {
                    let open = self.here();
                    self.bump();
                    self.bump();
                    loop {
                        match (self.peek(), self.peek_at(1)) {
                            (Some(b'*'), Some(b'/')) => {
                                self.bump();
                                self.bump();
                                break;
                            }
                            (Some(_), _) => self.bump(),
                            (None, _) => {
                                return Err(SyntaxError::at(open, "unterminated block comment"))
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, SyntaxError> {
        self.skip_trivia()?;
        let start = self.here();
        let Some(c) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                span: start,
            });
        };

        let kind = if c.is_ascii_alphabetic() || c == b'_' {
            while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == b'_') {
                self.bump();
            }
            let word = &self.src[start.start..self.pos];
            keyword(word).unwrap_or_else(|| TokenKind::Ident(word.to_string()))
        } else if c.is_ascii_digit() {
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.bump();
            }
            let digits = &self.src[start.start..self.pos];
            let value = digits.parse::<i64>().map_err(|_| {
                SyntaxError::at(start, format!("integer literal {} out of range", digits))
            })?;
            TokenKind::Int(value)
        } else {
            self.punct(start)?
        };

        Ok(Token {
            kind,
            span: Span {
                end: self.pos,
                ..start
            },
        })
    }

    fn punct(&mut self, start: Span) -> Result<TokenKind, SyntaxError> {
        let two = |lexer: &mut Self, kind: TokenKind| {
            lexer.bump();
            lexer.bump();
            kind
        };
        let one = |lexer: &mut Self, kind: TokenKind| {
            lexer.bump();
            kind
        };

        let c = self.peek().unwrap_or(0);
        let next = self.peek_at(1);
        let kind = match (c, next) {
            (b'=', Some(b'=')) if self.peek_at(2) == Some(b'>') => {
                self.bump();
                two(self, TokenKind::Implies)
            }
            (b'=', Some(b'=')) => two(self, TokenKind::EqEq),
            (b'!', Some(b'=')) => two(self, TokenKind::NotEq),
            (b'<', Some(b'=')) => two(self, TokenKind::Le),
            (b'>', Some(b'=')) => two(self, TokenKind::Ge),
            (b'&', Some(b'&')) => two(self, TokenKind::AndAnd),
            (b'|', Some(b'|')) => two(self, TokenKind::OrOr),
            (b':', Some(b'=')) => two(self, TokenKind::Define),
            (b'<', _) => one(self, TokenKind::Lt),
            (b'>', _) => one(self, TokenKind::Gt),
            (b'!', _) => one(self, TokenKind::Bang),
            (b'+', _) => one(self, TokenKind::Plus),
            (b'-', _) => one(self, TokenKind::Minus),
            (b'*', _) => one(self, TokenKind::Star),
            (b'#', _) => one(self, TokenKind::Hash),
            (b'(', _) => one(self, TokenKind::LParen),
            (b')', _) => one(self, TokenKind::RParen),
            (b'{', _) => one(self, TokenKind::LBrace),
            (b'}', _) => one(self, TokenKind::RBrace),
            (b'[', _) => one(self, TokenKind::LBracket),
            (b']', _) => one(self, TokenKind::RBracket),
            (b',', _) => one(self, TokenKind::Comma),
            (b';', _) => one(self, TokenKind::Semicolon),
            _ => {
                let ch = self.src[self.pos..].chars().next().unwrap_or('?');
                return Err(SyntaxError::at(
                    start,
                    format!("unexpected character '{}'", ch),
                ));
            }
        };
        Ok(kind)
    }
}

/// Tokenize a whole source file. The last token is always `Eof`.
pub fn tokenize(src: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut lexer = Lexer::new(src);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn keywords_and_idents() {
        assert_eq!(
            kinds("ghost n := mset(m)"),
            vec![
                TokenKind::Ghost,
                TokenKind::Ident("n".into()),
                TokenKind::Define,
                TokenKind::Mset,
                TokenKind::LParen,
                TokenKind::Ident("m".into()),
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn implies_is_not_eqeq_then_gt() {
        assert_eq!(
            kinds("a ==> b == c"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::Implies,
                TokenKind::Ident("b".into()),
                TokenKind::EqEq,
                TokenKind::Ident("c".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            kinds("// line\n42 /* block\n comment */ true"),
            vec![TokenKind::Int(42), TokenKind::True, TokenKind::Eof]
        );
    }

    #[test]
    fn spans_track_lines() {
        let tokens = tokenize("package pkg\n\nfunc f").unwrap();
        let func = &tokens[2];
        assert_eq!(func.kind, TokenKind::Func);
        assert_eq!((func.span.line, func.span.col), (3, 1));
        assert_eq!((func.span.start, func.span.end), (13, 17));
    }

    #[test]
    fn bad_input_reports_position() {
        let err = tokenize("assert x @ y").unwrap_err();
        assert_eq!((err.line, err.col), (1, 10));
        assert!(err.message.contains('@'));

        let err = tokenize("/* open").unwrap_err();
        assert!(err.message.contains("unterminated"));

        let err = tokenize("99999999999999999999").unwrap_err();
        assert!(err.message.contains("out of range"));
    }
}
