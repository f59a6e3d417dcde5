//! Parse error taxonomy
//!
//! Three error families, one wrapper. [`LexError`] covers primitive tokens
//! that do not match their grammar, [`StructuralError`] covers document-shape
//! violations, and [`ValidationError`] covers well-formed but schema-violating
//! content. [`ParseError`] pairs a kind with the source position and a bounded
//! snippet of the unconsumed input, so one error is enough to locate and fix
//! the offending text.

use serde::{Deserialize, Serialize};
use ssdl_core::ValueType;
use std::fmt;
use thiserror::Error;

/// A primitive token that does not match its grammar.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum LexError {
    #[error("unexpected character: {0:?}")]
    UnexpectedCharacter(char),

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("integer literal out of 64-bit range: {literal}")]
    IntegerOverflow { literal: String },

    #[error("malformed numeric literal: {literal}")]
    MalformedNumber { literal: String },

    /// Booleans are exactly `true` or `false`, case-sensitive.
    #[error("malformed boolean token: {found} (expected `true` or `false`)")]
    BadBoolean { found: String },

    #[error("malformed ISO-8601 timestamp: {literal}")]
    MalformedTimestamp { literal: String },

    #[error("malformed ISO-6709 coordinate: {literal}")]
    MalformedCoordinate { literal: String },

    #[error("coordinate out of range: {literal}")]
    CoordinateOutOfRange { literal: String },

    #[error("malformed URI: {literal}")]
    MalformedUri { literal: String },
}

/// A document-shape violation.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum StructuralError {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("duplicate key `{key}` (first defined at line {first_line}, column {first_column})")]
    DuplicateKey {
        key: String,
        first_line: usize,
        first_column: usize,
    },

    #[error("duplicate section `{key}`")]
    DuplicateSection { key: String },

    #[error("unknown section `{key}`")]
    UnknownSection { key: String },

    #[error("unknown field `{field}` in {record}")]
    UnknownField { record: String, field: String },
}

/// Well-formed content that violates the document schema.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("missing section `{key}`")]
    MissingSection { key: String },

    #[error("missing required field `{field}` in {record}")]
    MissingField { record: String, field: String },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("unknown {kind} tag: {tag}")]
    UnknownTag { kind: String, tag: String },

    #[error("unknown visualization type: {tag}")]
    UnknownVisualization { tag: String },

    #[error("format field `{field}`: expected {expected}, found {found}")]
    FormatTypeMismatch {
        field: String,
        expected: ValueType,
        found: ValueType,
    },

    #[error("format is missing required field `{field}` of type {expected}")]
    MissingFormatField { field: String, expected: ValueType },

    #[error("format field `{field}` is not part of the {vis} schema")]
    UnknownFormatField { field: String, vis: String },
}

/// Union of the three error families.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ErrorKind {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    #[error("structural error: {0}")]
    Structural(#[from] StructuralError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// A parse failure with full source context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseError {
    pub kind: ErrorKind,
    /// Byte offset into the source.
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    /// Bounded slice of the source starting at `offset`.
    pub snippet: String,
    /// What was being parsed when the error surfaced, attached by the
    /// innermost composite or section parser.
    pub context: Option<String>,
}

impl ParseError {
    /// Attach context unless an inner parser already did.
    pub fn in_context(mut self, context: impl Into<String>) -> Self {
        if self.context.is_none() {
            self.context = Some(context.into());
        }
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {}, column {}",
            self.kind, self.line, self.column
        )?;
        if let Some(context) = &self.context {
            write!(f, " while parsing {}", context)?;
        }
        if !self.snippet.is_empty() {
            write!(f, " (near `{}`)", self.snippet)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}
