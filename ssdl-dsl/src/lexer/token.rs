//! Lexer token types

use crate::error::LexError;
use ssdl_core::{Geolocation, Timestamp};

/// Token kinds for the SSDL grammar.
///
/// Primitive literals carry their decoded payloads: the lexer is the single
/// place where the primitive grammars of the value model live, so a
/// `Timestamp` or `Geolocation` token is already validated when the parser
/// sees it. Failures become [`TokenKind::Error`] tokens instead of aborting
/// the scan, which keeps error reporting positional.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Section keywords (always preceded by `.` at top level)
    Service,
    Data,
    Application,
    Deployment,

    // Literals
    Str(String),
    Integer(i64),
    Double(f64),
    Boolean(bool),
    Timestamp(Timestamp),
    Geolocation(Geolocation),
    Identifier(String),

    // Delimiters
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Colon,
    Comma,
    Dot,

    // Special
    Eof,
    Error(LexError),
}

/// Source location span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Default for Span {
    fn default() -> Self {
        Self {
            start: 0,
            end: 0,
            line: 1,
            column: 1,
        }
    }
}

/// A token with its kind and source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}
