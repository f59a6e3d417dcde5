//! SSDL DSL - Parser for Smart-Service Description Language documents
//!
//! Turns raw SSDL text into the validated, typed document tree defined by
//! `ssdl-core`.
//!
//! Architecture:
//! ```text
//! SSDL Source (.ssdl text)
//!     ↓
//! Lexer (tokens with spans, typed literals)
//!     ↓
//! Parser (recursive descent over tokens)
//!     ↓
//! Registry (visualization format type-check)
//!     ↓
//! Ssdl document tree
//!     ↓
//! Pretty Printer (canonical text, for round-trip testing)
//! ```
//!
//! The single entry point is [`parse`]; a failed parse yields one
//! fully-contextualized [`ParseError`] for the first violation encountered in
//! left-to-right, outer-to-inner order. Parsing is a pure function of the
//! source text: no I/O, no shared state, safe to call from any thread.

pub mod error;
pub mod lexer;
pub mod parser;
pub mod pretty_printer;
pub mod registry;

// Re-export key types for convenience
pub use error::{ErrorKind, LexError, ParseError, StructuralError, ValidationError};
pub use lexer::{Lexer, Span, Token, TokenKind};
pub use parser::{parse, Parser};
pub use pretty_printer::{pretty_print, round_trip};
