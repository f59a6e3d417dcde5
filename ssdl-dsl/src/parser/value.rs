//! Primitive and composite value grammars
//!
//! Values, tags, versions and URIs plus the generic mapping/sequence drivers
//! every record parser delegates to. Each operation is a pure function of the
//! cursor position: it either returns the decoded value with the cursor
//! advanced past it, or an error at the offending token.

use super::Parser;
use crate::error::{LexError, ParseError, StructuralError, ValidationError};
use crate::lexer::{Span, TokenKind};
use ssdl_core::{Mapping, Sequence, Uri, Value, ValueType, Version};
use std::str::FromStr;

impl<'a> Parser<'a> {
    /// Parse one primitive value literal.
    pub(crate) fn parse_value(&mut self) -> Result<Value, ParseError> {
        self.guard_lex()?;
        let value = match &self.current().kind {
            TokenKind::Str(s) => Value::Str(s.clone()),
            TokenKind::Integer(n) => Value::Integer(*n),
            TokenKind::Double(n) => Value::Double(*n),
            TokenKind::Boolean(b) => Value::Boolean(*b),
            TokenKind::Timestamp(t) => Value::Timestamp(*t),
            TokenKind::Geolocation(g) => Value::Geolocation(*g),
            // `True`, `FALSE` and friends are almost-booleans; report them as
            // such rather than as a generic unexpected identifier.
            TokenKind::Identifier(s) if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false") => {
                return Err(self.error(LexError::BadBoolean { found: s.clone() }));
            }
            _ => return Err(self.unexpected("value literal")),
        };
        self.advance();
        Ok(value)
    }

    /// Parse a value-type tag (`String`, `Integer`, ...) as used in
    /// visualization format schemas.
    pub(crate) fn parse_value_type(&mut self) -> Result<ValueType, ParseError> {
        self.parse_tag("value type")
    }

    /// Parse a bare identifier into a fixed tag enum. An identifier outside
    /// the enum's tag set is a validation error naming the tag.
    pub(crate) fn parse_tag<T: FromStr>(&mut self, kind: &str) -> Result<T, ParseError> {
        self.guard_lex()?;
        match &self.current().kind {
            TokenKind::Identifier(s) => match T::from_str(s) {
                Ok(tag) => {
                    self.advance();
                    Ok(tag)
                }
                Err(_) => Err(self.error(ValidationError::UnknownTag {
                    kind: kind.to_string(),
                    tag: s.clone(),
                })),
            },
            _ => Err(self.unexpected(kind)),
        }
    }

    /// Parse a version triple: three whitespace-separated non-negative
    /// integers (`1 0 2`).
    pub(crate) fn parse_version(&mut self) -> Result<Version, ParseError> {
        let major = self.parse_version_component()?;
        let minor = self.parse_version_component()?;
        let patch = self.parse_version_component()?;
        Ok(Version::new(major, minor, patch))
    }

    fn parse_version_component(&mut self) -> Result<u64, ParseError> {
        let (n, span) = self.expect_integer()?;
        if n < 0 {
            return Err(self.error_at(
                span,
                ValidationError::InvalidValue {
                    field: "version".to_string(),
                    reason: format!("component {} is negative", n),
                },
            ));
        }
        Ok(n as u64)
    }

    /// Parse a quoted absolute URI.
    pub(crate) fn parse_uri(&mut self) -> Result<Uri, ParseError> {
        let span = self.current().span;
        let literal = self.expect_string()?;
        Uri::parse(&literal)
            .map_err(|_| self.error_at(span, LexError::MalformedUri { literal }))
    }

    /// Parse a mapping literal `{ key: value ... }`, delegating each value to
    /// `elem`. Separator commas are optional. A repeated key is a structural
    /// error naming the key and both positions; element failures propagate
    /// with the entry name attached as context.
    pub(crate) fn parse_mapping<T, F>(
        &mut self,
        what: &str,
        mut elem: F,
    ) -> Result<Mapping<T>, ParseError>
    where
        F: FnMut(&mut Self) -> Result<T, ParseError>,
    {
        self.expect(TokenKind::LBrace)?;

        let mut map = Mapping::new();
        let mut seen = Vec::new();

        while !self.check(&TokenKind::RBrace) {
            self.guard_lex()?;
            let key_span = self.current().span;
            let key = self.expect_key()?;

            // The repeat is a violation at the key token itself, so it must
            // win over anything wrong inside the duplicate entry's value.
            if let Some((_, first)) = seen.iter().find(|(k, _): &&(String, Span)| *k == key) {
                return Err(self.error_at(
                    key_span,
                    StructuralError::DuplicateKey {
                        key,
                        first_line: first.line,
                        first_column: first.column,
                    },
                ));
            }

            self.expect(TokenKind::Colon)?;
            let value = elem(self)
                .map_err(|e| e.in_context(format!("entry `{}` of {}", key, what)))?;

            seen.push((key.clone(), key_span));
            map.insert(key, value);

            self.optional_comma();
        }

        self.expect(TokenKind::RBrace)?;
        Ok(map)
    }

    /// Parse a sequence literal `[ elem, elem ]`, delegating each element to
    /// `elem`. Empty sequences are legal.
    pub(crate) fn parse_sequence<T, F>(
        &mut self,
        what: &str,
        mut elem: F,
    ) -> Result<Sequence<T>, ParseError>
    where
        F: FnMut(&mut Self) -> Result<T, ParseError>,
    {
        self.expect(TokenKind::LBracket)?;

        let mut seq = Sequence::new();

        while !self.check(&TokenKind::RBracket) {
            self.guard_lex()?;
            if self.is_at_end() {
                return Err(self.unexpected("`]`"));
            }
            let index = seq.len();
            let value = elem(self)
                .map_err(|e| e.in_context(format!("element {} of {}", index, what)))?;
            seq.push(value);
            self.optional_comma();
        }

        self.expect(TokenKind::RBracket)?;
        Ok(seq)
    }
}
