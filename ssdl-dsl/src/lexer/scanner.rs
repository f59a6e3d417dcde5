//! Lexer implementation

use super::token::*;
use crate::error::LexError;
use ssdl_core::{Geolocation, Timestamp};
use std::iter::Peekable;
use std::str::CharIndices;

/// Lexer for SSDL source text.
///
/// Carries the primitive grammars of the value model: integers, doubles,
/// booleans, quoted strings, ISO-8601 timestamps and ISO-6709 geolocations
/// all become decoded literal tokens here. A token that fails its grammar is
/// emitted as an `Error` token so the parser can report it at the position
/// where it would have been consumed.
pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    line: usize,
    column: usize,
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            line: 1,
            column: 1,
            pos: 0,
        }
    }

    /// Tokenize the entire source into a vector of tokens.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        tokens
    }

    /// Get the next token from the source.
    fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        let start_pos = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        let kind = match self.peek_char() {
            None => TokenKind::Eof,
            Some(c) => match c {
                '{' => {
                    self.advance();
                    TokenKind::LBrace
                }
                '}' => {
                    self.advance();
                    TokenKind::RBrace
                }
                '[' => {
                    self.advance();
                    TokenKind::LBracket
                }
                ']' => {
                    self.advance();
                    TokenKind::RBracket
                }
                ':' => {
                    self.advance();
                    TokenKind::Colon
                }
                ',' => {
                    self.advance();
                    TokenKind::Comma
                }
                '.' => {
                    self.advance();
                    TokenKind::Dot
                }

                '"' => self.scan_string(),

                '+' => {
                    self.advance();
                    if self.peek_char().map(|c| c.is_ascii_digit()).unwrap_or(false) {
                        self.scan_geolocation(start_pos)
                    } else {
                        TokenKind::Error(LexError::UnexpectedCharacter('+'))
                    }
                }

                '-' => {
                    self.advance();
                    if self.peek_char().map(|c| c.is_ascii_digit()).unwrap_or(false) {
                        self.scan_number(start_pos, true)
                    } else {
                        TokenKind::Error(LexError::UnexpectedCharacter('-'))
                    }
                }

                c if c.is_ascii_digit() => self.scan_number(start_pos, false),

                c if c.is_ascii_alphabetic() || c == '_' => self.scan_identifier(),

                c => {
                    self.advance();
                    TokenKind::Error(LexError::UnexpectedCharacter(c))
                }
            },
        };

        Token {
            kind,
            span: Span {
                start: start_pos,
                end: self.pos,
                line: start_line,
                column: start_col,
            },
        }
    }

    /// Scan an identifier, keyword or boolean literal.
    fn scan_identifier(&mut self) -> TokenKind {
        let start = self.pos;

        while let Some(c) = self.peek_char() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        // Keywords are case-sensitive: `Service` is the scope tag, `service`
        // the section keyword.
        match &self.source[start..self.pos] {
            "service" => TokenKind::Service,
            "data" => TokenKind::Data,
            "application" => TokenKind::Application,
            "deployment" => TokenKind::Deployment,
            "true" => TokenKind::Boolean(true),
            "false" => TokenKind::Boolean(false),
            ident => TokenKind::Identifier(ident.to_string()),
        }
    }

    /// Scan a string literal with escape sequences.
    fn scan_string(&mut self) -> TokenKind {
        self.advance(); // consume opening quote
        let mut value = String::new();

        loop {
            match self.peek_char() {
                None => return TokenKind::Error(LexError::UnterminatedString),
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.peek_char() {
                        Some('n') => {
                            self.advance();
                            value.push('\n');
                        }
                        Some('t') => {
                            self.advance();
                            value.push('\t');
                        }
                        Some('r') => {
                            self.advance();
                            value.push('\r');
                        }
                        Some('\\') => {
                            self.advance();
                            value.push('\\');
                        }
                        Some('"') => {
                            self.advance();
                            value.push('"');
                        }
                        _ => value.push('\\'),
                    }
                }
                Some('\n') => {
                    self.advance();
                    self.line += 1;
                    self.column = 1;
                    value.push('\n');
                }
                Some(c) => {
                    self.advance();
                    value.push(c);
                }
            }
        }

        TokenKind::Str(value)
    }

    /// Scan an integer or double literal starting at `start` (the sign, if
    /// any, is already consumed). A four-digit run followed by `-` hands over
    /// to the timestamp grammar; a signed number followed directly by another
    /// sign or a solidus hands over to the geolocation grammar.
    fn scan_number(&mut self, start: usize, signed: bool) -> TokenKind {
        let int_start = self.pos;
        while self.peek_char().map(|c| c.is_ascii_digit()).unwrap_or(false) {
            self.advance();
        }

        if !signed && self.pos - int_start == 4 && self.peek_char() == Some('-') {
            return self.scan_timestamp(start);
        }

        let mut is_double = false;

        if self.peek_char() == Some('.') {
            self.advance();
            let frac_start = self.pos;
            while self.peek_char().map(|c| c.is_ascii_digit()).unwrap_or(false) {
                self.advance();
            }
            if self.pos == frac_start {
                return TokenKind::Error(LexError::MalformedNumber {
                    literal: self.source[start..self.pos].to_string(),
                });
            }
            is_double = true;
        }

        if signed && matches!(self.peek_char(), Some('+') | Some('-') | Some('/')) {
            return self.scan_geolocation(start);
        }

        if matches!(self.peek_char(), Some('e') | Some('E')) {
            self.advance();
            if matches!(self.peek_char(), Some('+') | Some('-')) {
                self.advance();
            }
            let exp_start = self.pos;
            while self.peek_char().map(|c| c.is_ascii_digit()).unwrap_or(false) {
                self.advance();
            }
            if self.pos == exp_start {
                return TokenKind::Error(LexError::MalformedNumber {
                    literal: self.source[start..self.pos].to_string(),
                });
            }
            is_double = true;
        }

        let text = &self.source[start..self.pos];
        if is_double {
            // f64::from_str maps overflow to infinity; an infinite double has
            // no textual form that re-lexes, so it is rejected here.
            match text.parse::<f64>() {
                Ok(n) if n.is_finite() => TokenKind::Double(n),
                _ => TokenKind::Error(LexError::MalformedNumber {
                    literal: text.to_string(),
                }),
            }
        } else {
            match text.parse::<i64>() {
                Ok(n) => TokenKind::Integer(n),
                Err(_) => TokenKind::Error(LexError::IntegerOverflow {
                    literal: text.to_string(),
                }),
            }
        }
    }

    /// Scan an ISO-8601 date-time starting at `start`.
    fn scan_timestamp(&mut self, start: usize) -> TokenKind {
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() || matches!(c, '-' | ':' | 'T' | '.') {
                self.advance();
            } else {
                break;
            }
        }

        let literal = &self.source[start..self.pos];
        match literal.parse::<Timestamp>() {
            Ok(stamp) => TokenKind::Timestamp(stamp),
            Err(_) => TokenKind::Error(LexError::MalformedTimestamp {
                literal: literal.to_string(),
            }),
        }
    }

    /// Scan an ISO-6709 coordinate starting at `start`.
    fn scan_geolocation(&mut self, start: usize) -> TokenKind {
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | '/') {
                self.advance();
            } else {
                break;
            }
        }

        let literal = &self.source[start..self.pos];
        match literal.parse::<Geolocation>() {
            Ok(geo) => TokenKind::Geolocation(geo),
            Err(ssdl_core::CoordinateError::OutOfRange) => {
                TokenKind::Error(LexError::CoordinateOutOfRange {
                    literal: literal.to_string(),
                })
            }
            Err(ssdl_core::CoordinateError::Malformed) => {
                TokenKind::Error(LexError::MalformedCoordinate {
                    literal: literal.to_string(),
                })
            }
        }
    }

    /// Skip whitespace and comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek_char() {
                Some(' ') | Some('\t') | Some('\r') => {
                    self.advance();
                }
                Some('\n') => {
                    self.advance();
                    self.line += 1;
                    self.column = 1;
                }
                Some('/') => {
                    let next = self.peek_next_char();
                    if next == Some('/') {
                        // Line comment
                        while let Some(c) = self.peek_char() {
                            if c == '\n' {
                                break;
                            }
                            self.advance();
                        }
                    } else if next == Some('*') {
                        // Block comment
                        self.advance(); // /
                        self.advance(); // *
                        loop {
                            match self.peek_char() {
                                None => break,
                                Some('*') if self.peek_next_char() == Some('/') => {
                                    self.advance();
                                    self.advance();
                                    break;
                                }
                                Some('\n') => {
                                    self.advance();
                                    self.line += 1;
                                    self.column = 1;
                                }
                                _ => {
                                    self.advance();
                                }
                            }
                        }
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next_char(&self) -> Option<char> {
        let mut iter = self.source[self.pos..].char_indices();
        iter.next();
        iter.next().map(|(_, c)| c)
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((i, c)) = self.chars.next() {
            self.pos = i + c.len_utf8();
            self.column += 1;
            Some(c)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn single(source: &str) -> TokenKind {
        let mut kinds = kinds(source);
        assert_eq!(kinds.len(), 2, "expected one token plus Eof: {:?}", kinds);
        assert_eq!(kinds.pop(), Some(TokenKind::Eof));
        kinds.pop().unwrap()
    }

    #[test]
    fn test_punctuation_and_keywords() {
        assert_eq!(
            kinds(".service { } [ ] : , ."),
            vec![
                TokenKind::Dot,
                TokenKind::Service,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Colon,
                TokenKind::Comma,
                TokenKind::Dot,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(single("data"), TokenKind::Data);
        assert_eq!(single("Data"), TokenKind::Identifier("Data".into()));
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            single(r#""a\"b\\c\nd""#),
            TokenKind::Str("a\"b\\c\nd".into())
        );
    }

    #[test]
    fn test_raw_newline_in_string_advances_line() {
        let tokens = Lexer::new("\"two\nlines\" after").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Str("two\nlines".into()));
        let after = tokens
            .iter()
            .find(|t| matches!(&t.kind, TokenKind::Identifier(s) if s == "after"))
            .unwrap();
        assert_eq!(after.span.line, 2);
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(
            single("\"abc"),
            TokenKind::Error(LexError::UnterminatedString)
        );
    }

    #[test]
    fn test_integers_and_doubles_are_distinct() {
        assert_eq!(single("45"), TokenKind::Integer(45));
        assert_eq!(single("-45"), TokenKind::Integer(-45));
        assert_eq!(single("45.0"), TokenKind::Double(45.0));
        assert_eq!(single("270.95"), TokenKind::Double(270.95));
        assert_eq!(single("1e3"), TokenKind::Double(1000.0));
        assert_eq!(single("1.5e-2"), TokenKind::Double(0.015));
    }

    #[test]
    fn test_integer_overflow() {
        assert!(matches!(
            single("9223372036854775808"),
            TokenKind::Error(LexError::IntegerOverflow { .. })
        ));
        assert_eq!(
            single("-9223372036854775808"),
            TokenKind::Integer(i64::MIN)
        );
    }

    #[test]
    fn test_double_overflow() {
        assert!(matches!(
            single("1e400"),
            TokenKind::Error(LexError::MalformedNumber { .. })
        ));
        assert!(matches!(
            single("-2e308"),
            TokenKind::Error(LexError::MalformedNumber { .. })
        ));
    }

    #[test]
    fn test_dangling_fraction() {
        assert!(matches!(
            single("12."),
            TokenKind::Error(LexError::MalformedNumber { .. })
        ));
    }

    #[test]
    fn test_booleans() {
        assert_eq!(single("true"), TokenKind::Boolean(true));
        assert_eq!(single("false"), TokenKind::Boolean(false));
        // Not a boolean token; the parser decides what to make of it.
        assert_eq!(single("True"), TokenKind::Identifier("True".into()));
    }

    #[test]
    fn test_timestamp() {
        let kind = single("2023-12-24T12:00:00");
        match kind {
            TokenKind::Timestamp(t) => {
                assert_eq!(t.to_string(), "2023-12-24 12:00:00");
            }
            other => panic!("expected timestamp, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_timestamp() {
        assert!(matches!(
            single("2023-13-99T00:00:00"),
            TokenKind::Error(LexError::MalformedTimestamp { .. })
        ));
    }

    #[test]
    fn test_four_digit_integer_is_not_a_timestamp() {
        assert_eq!(single("2023"), TokenKind::Integer(2023));
    }

    #[test]
    fn test_geolocation() {
        let kind = single("+40.416775-3.703790/");
        match kind {
            TokenKind::Geolocation(g) => {
                assert_eq!(g.latitude, 40.416775);
                assert_eq!(g.longitude, -3.703790);
                assert_eq!(g.altitude, None);
            }
            other => panic!("expected geolocation, got {:?}", other),
        }
    }

    #[test]
    fn test_geolocation_negative_latitude() {
        let kind = single("-33.868820+151.209290/");
        assert!(matches!(kind, TokenKind::Geolocation(_)));
    }

    #[test]
    fn test_geolocation_out_of_range() {
        assert!(matches!(
            single("+91.0+10.0/"),
            TokenKind::Error(LexError::CoordinateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_dangling_sign() {
        assert!(matches!(
            single("+"),
            TokenKind::Error(LexError::UnexpectedCharacter('+'))
        ));
        assert!(matches!(
            kinds("- 1").first(),
            Some(TokenKind::Error(LexError::UnexpectedCharacter('-')))
        ));
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("// line\n42 /* block\nspanning */ 43"),
            vec![TokenKind::Integer(42), TokenKind::Integer(43), TokenKind::Eof]
        );
    }

    #[test]
    fn test_error_token_does_not_stop_lexing() {
        let kinds = kinds("@ 42");
        assert_eq!(kinds.len(), 3);
        assert!(matches!(
            kinds[0],
            TokenKind::Error(LexError::UnexpectedCharacter('@'))
        ));
        assert_eq!(kinds[1], TokenKind::Integer(42));
    }

    #[test]
    fn test_spans_track_lines_and_columns() {
        let tokens = Lexer::new(".service {\n    name: \"x\"\n}").tokenize();
        let name = tokens
            .iter()
            .find(|t| matches!(&t.kind, TokenKind::Identifier(s) if s == "name"))
            .unwrap();
        assert_eq!(name.span.line, 2);
        assert_eq!(name.span.column, 5);
        let close = tokens
            .iter()
            .find(|t| t.kind == TokenKind::RBrace)
            .unwrap();
        assert_eq!(close.span.line, 3);
        assert_eq!(close.span.column, 1);
    }
}
