use std::fmt;

use crate::Symbol;

pub mod fo;

pub use fo::{parse_fo_formula, parse_fo_term};

pub type ParseResult<T> = Result<T, ParseErr>;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ParseErr {
    Expected(String, String),
    EmptyFormula,
    UnknownChar(char, usize),
    IncorrectRelArity(Symbol, usize, usize),
    IncorrectFnArity(Symbol, usize, usize),
    ConstAndFn(Symbol),
    VarApplied(Symbol),
    VarAsFormula(Symbol),
}

impl fmt::Display for ParseErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErr::Expected(expected, got) => write!(f, "Expected {} but got {}", expected, got),
            ParseErr::EmptyFormula => write!(f, "Expected a formula but got empty input"),
            ParseErr::UnknownChar(c, pos) => {
                write!(f, "Unexpected character '{}' at position {}", c, pos)
            }
            ParseErr::IncorrectRelArity(r, expected, got) => write!(
                f,
                "Relation '{}' should have arity {} but has {}",
                r, expected, got
            ),
            ParseErr::IncorrectFnArity(r, expected, got) => write!(
                f,
                "Function '{}' should have arity {} but has {}",
                r, expected, got
            ),
            ParseErr::ConstAndFn(s) => {
                write!(f, "Identifier '{}' is used both as a constant and a function", s)
            }
            ParseErr::VarApplied(s) => {
                write!(f, "Bound variable '{}' cannot be applied to arguments", s)
            }
            ParseErr::VarAsFormula(s) => {
                write!(f, "Bound variable '{}' cannot be used as a formula", s)
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenKind {
    And,
    Or,
    Not,
    Impl,
    Equiv,
    Eq,
    NotEq,
    LParen,
    RParen,
    Comma,
    Colon,
    Ident,
    All,
    Ex,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::And => "&",
            TokenKind::Or => "|",
            TokenKind::Not => "!",
            TokenKind::Impl => "->",
            TokenKind::Equiv => "<->",
            TokenKind::Eq => "=",
            TokenKind::NotEq => "!=",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Ident => "identifier",
            TokenKind::All => "\\all",
            TokenKind::Ex => "\\ex",
        };

        write!(f, "{}", s)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token<'t> {
    pub kind: TokenKind,
    pub spelling: &'t str,
    pub src_pos: usize,
}

impl<'t> fmt::Display for Token<'t> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.spelling)
    }
}

// Longer spellings first, so `<->` is not read as `<` and `->`.
const SYMBOLS: &[(&str, TokenKind)] = &[
    ("<->", TokenKind::Equiv),
    ("<=>", TokenKind::Equiv),
    ("\\all", TokenKind::All),
    ("/all", TokenKind::All),
    ("\\ex", TokenKind::Ex),
    ("/ex", TokenKind::Ex),
    ("->", TokenKind::Impl),
    ("=>", TokenKind::Impl),
    ("!=", TokenKind::NotEq),
    ("&", TokenKind::And),
    ("|", TokenKind::Or),
    ("!", TokenKind::Not),
    ("=", TokenKind::Eq),
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
    (",", TokenKind::Comma),
    (":", TokenKind::Colon),
    ("*", TokenKind::All),
    ("?", TokenKind::Ex),
];

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Splits a formula into tokens. Whitespace separates tokens and is
/// otherwise ignored.
pub struct Tokenizer<'t> {
    src: &'t str,
    pos: usize,
}

impl<'t> Tokenizer<'t> {
    pub fn new(src: &'t str) -> Self {
        Self { src, pos: 0 }
    }
}

impl<'t> Iterator for Tokenizer<'t> {
    type Item = ParseResult<Token<'t>>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.src[self.pos..];
        let trimmed = rest.trim_start();
        self.pos += rest.len() - trimmed.len();
        let c = trimmed.chars().next()?;
        let src_pos = self.pos;

        let (kind, len) = if is_ident_char(c) {
            let len = trimmed.find(|c| !is_ident_char(c)).unwrap_or(trimmed.len());
            (TokenKind::Ident, len)
        } else {
            let symbol = SYMBOLS.iter().find(|(s, _)| {
                // Keyword quantifiers must not run into an identifier.
                trimmed.starts_with(s)
                    && !(s.len() > 1
                        && s.ends_with(|c: char| c.is_ascii_alphabetic())
                        && trimmed[s.len()..].starts_with(is_ident_char))
            });
            match symbol {
                Some((s, kind)) => (*kind, s.len()),
                None => {
                    self.pos = self.src.len();
                    return Some(Err(ParseErr::UnknownChar(c, src_pos)));
                }
            }
        };

        self.pos += len;
        Some(Ok(Token {
            kind,
            spelling: &self.src[src_pos..src_pos + len],
            src_pos,
        }))
    }
}
