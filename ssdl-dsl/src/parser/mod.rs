//! Parser module for the SSDL grammar
//!
//! [`Parser`] is a cursor over the token vector produced by the lexer. The
//! record and section grammars live in [`document`], the primitive/composite
//! value grammars in [`value`]; this module holds the shared cursor
//! machinery and error constructors.

pub mod document;
pub mod value;

use crate::error::{ErrorKind, ParseError, StructuralError};
use crate::lexer::{Lexer, Span, Token, TokenKind};
use ssdl_core::Ssdl;

/// Maximum snippet length attached to an error, in characters.
const SNIPPET_LEN: usize = 32;

/// Parse SSDL source text into a document tree.
///
/// The single entry point of the crate. Fails fast: the first violation in
/// left-to-right, outer-to-inner order aborts the parse.
pub fn parse(source: &str) -> Result<Ssdl, ParseError> {
    let tokens = Lexer::new(source).tokenize();
    Parser::new(source, tokens).parse_document()
}

/// Recursive-descent parser over a token vector.
pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser for tokens lexed from `source`. The source is kept
    /// around only to cut error snippets.
    pub fn new(source: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
        }
    }

    // ========================================================================
    // Cursor helpers
    // ========================================================================

    pub(crate) fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub(crate) fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current().kind) == std::mem::discriminant(kind)
    }

    /// Surface a lexer error token at the point it would be consumed. Lex
    /// errors are deliberately not pre-scanned: an earlier structural error
    /// must win over a later lex error.
    pub(crate) fn guard_lex(&self) -> Result<(), ParseError> {
        if let TokenKind::Error(e) = &self.current().kind {
            return Err(self.error(e.clone()));
        }
        Ok(())
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        self.guard_lex()?;
        if self.check(&kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(describe_kind(&kind)))
        }
    }

    /// Expect a bare identifier usable as a mapping key or record field name.
    /// Section keywords double as keys.
    pub(crate) fn expect_key(&mut self) -> Result<String, ParseError> {
        self.guard_lex()?;
        let key = match &self.current().kind {
            TokenKind::Identifier(s) => s.clone(),
            TokenKind::Boolean(b) => b.to_string(),
            TokenKind::Service => "service".to_string(),
            TokenKind::Data => "data".to_string(),
            TokenKind::Application => "application".to_string(),
            TokenKind::Deployment => "deployment".to_string(),
            _ => return Err(self.unexpected("identifier")),
        };
        self.advance();
        Ok(key)
    }

    pub(crate) fn expect_string(&mut self) -> Result<String, ParseError> {
        self.guard_lex()?;
        match &self.current().kind {
            TokenKind::Str(s) => {
                let s = s.clone();
                self.advance();
                Ok(s)
            }
            _ => Err(self.unexpected("string literal")),
        }
    }

    pub(crate) fn expect_integer(&mut self) -> Result<(i64, Span), ParseError> {
        self.guard_lex()?;
        match self.current().kind {
            TokenKind::Integer(n) => {
                let span = self.current().span;
                self.advance();
                Ok((n, span))
            }
            _ => Err(self.unexpected("integer literal")),
        }
    }

    pub(crate) fn optional_comma(&mut self) {
        if self.check(&TokenKind::Comma) {
            self.advance();
        }
    }

    // ========================================================================
    // Error constructors
    // ========================================================================

    pub(crate) fn error(&self, kind: impl Into<ErrorKind>) -> ParseError {
        self.error_at(self.current().span, kind)
    }

    pub(crate) fn error_at(&self, span: Span, kind: impl Into<ErrorKind>) -> ParseError {
        ParseError {
            kind: kind.into(),
            offset: span.start,
            line: span.line,
            column: span.column,
            snippet: snippet(self.source, span.start),
            context: None,
        }
    }

    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        let kind = if self.is_at_end() {
            StructuralError::UnexpectedEof
        } else {
            StructuralError::UnexpectedToken {
                expected: expected.to_string(),
                found: found_text(&self.current().kind),
            }
        };
        self.error(kind)
    }
}

/// Bounded snippet of the source starting at `offset`, cut on a char
/// boundary.
fn snippet(source: &str, offset: usize) -> String {
    let rest = source.get(offset..).unwrap_or("");
    let rest = rest.trim_end();
    match rest.char_indices().nth(SNIPPET_LEN) {
        Some((cut, _)) => format!("{}...", &rest[..cut]),
        None => rest.to_string(),
    }
}

/// Human-readable name of a token kind in "expected ..." position.
fn describe_kind(kind: &TokenKind) -> &'static str {
    match kind {
        TokenKind::Service => "`service`",
        TokenKind::Data => "`data`",
        TokenKind::Application => "`application`",
        TokenKind::Deployment => "`deployment`",
        TokenKind::Str(_) => "string literal",
        TokenKind::Integer(_) => "integer literal",
        TokenKind::Double(_) => "double literal",
        TokenKind::Boolean(_) => "boolean literal",
        TokenKind::Timestamp(_) => "timestamp literal",
        TokenKind::Geolocation(_) => "geolocation literal",
        TokenKind::Identifier(_) => "identifier",
        TokenKind::LBrace => "`{`",
        TokenKind::RBrace => "`}`",
        TokenKind::LBracket => "`[`",
        TokenKind::RBracket => "`]`",
        TokenKind::Colon => "`:`",
        TokenKind::Comma => "`,`",
        TokenKind::Dot => "`.`",
        TokenKind::Eof => "end of input",
        TokenKind::Error(_) => "token",
    }
}

/// Human-readable rendering of a token kind in "found ..." position.
fn found_text(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Str(s) => format!("string {:?}", s),
        TokenKind::Integer(n) => format!("integer {}", n),
        TokenKind::Double(n) => format!("double {}", n),
        TokenKind::Boolean(b) => format!("boolean {}", b),
        TokenKind::Timestamp(t) => format!("timestamp {}", t),
        TokenKind::Geolocation(g) => format!("geolocation {}", g),
        TokenKind::Identifier(s) => format!("identifier `{}`", s),
        other => describe_kind(other).to_string(),
    }
}
