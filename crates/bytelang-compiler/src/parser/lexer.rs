//! Lexeme classification for statement heads and arguments.
//!
//! A statement line is split on whitespace first; each lexeme is then
//! classified on its own and must be matched by a single token in full.

use logos::Logos;

/// Kind of the first lexeme of a statement.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadToken {
    /// `.name`
    #[regex(r"\.[_a-zA-Z0-9]+")]
    Directive,

    /// `name:`
    #[regex(r"[_a-zA-Z0-9]+:")]
    Mark,

    /// `name`
    #[regex(r"[_a-zA-Z0-9]+")]
    Instruction,
}

/// Kind of an argument lexeme, in matcher priority order.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentToken {
    /// `0`, `42`, `-1_000`
    #[regex(r"0|[+-]?[1-9][0-9_]*")]
    Decimal,

    /// `0b1010_0101`
    #[regex(r"0[bB][01_]+")]
    Binary,

    /// `017`, `-0_777`
    #[regex(r"[+-]?0[0-7_]+")]
    Octal,

    /// `0xFF_FF`
    #[regex(r"0[xX][0-9a-fA-F_]+")]
    Hex,

    /// `3.14`, `-1.5e-3`
    #[regex(r"[+-]?[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    Exponent,

    /// `'A'`
    #[regex(r"'[^\n]'")]
    Char,

    #[regex(r"[_a-zA-Z][_a-zA-Z0-9]*")]
    Identifier,
}

impl HeadToken {
    /// Classify a whole lexeme; partial matches do not count.
    pub fn classify(lexeme: &str) -> Option<Self> {
        let mut lexer = Self::lexer(lexeme);
        match lexer.next() {
            Some(Ok(token)) if lexer.span() == (0..lexeme.len()) => Some(token),
            _ => None,
        }
    }
}

impl ArgumentToken {
    /// Classify a whole lexeme; partial matches do not count.
    pub fn classify(lexeme: &str) -> Option<Self> {
        let mut lexer = Self::lexer(lexeme);
        match lexer.next() {
            Some(Ok(token)) if lexer.span() == (0..lexeme.len()) => Some(token),
            _ => None,
        }
    }
}
