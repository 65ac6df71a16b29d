//! Lexer for Lox using logos.
//!
//! Turns source text into the token stream the parser consumes. Lexical
//! errors (unterminated strings, stray characters) are reported to the
//! diagnostic queue and skipped, so one pass surfaces all of them.

mod lexer;

pub use lexer::{lex, Lexer};
