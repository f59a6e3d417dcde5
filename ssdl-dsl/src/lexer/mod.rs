//! Lexer module for the SSDL grammar

pub mod scanner;
pub mod token;

pub use scanner::*;
pub use token::*;
