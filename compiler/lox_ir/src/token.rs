//! Token types for the Lox lexer.
//!
//! A token exposes `{kind, lexeme, literal, line}`, the shape both the
//! parser and diagnostics work from, plus a byte span for tooling.

use super::Span;
use std::fmt;

/// Literal payload of a `String` or `Number` token, and of literal expressions.
#[derive(Clone, PartialEq, Debug)]
pub enum Literal {
    Nil,
    Bool(bool),
    Number(f64),
    Str(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Nil => write!(f, "nil"),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Number(n) => write!(f, "{n}"),
            Literal::Str(s) => write!(f, "{s}"),
        }
    }
}

/// A token with its source text and position.
#[derive(Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<Literal>,
    /// 1-based source line.
    pub line: u32,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32, span: Span) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            literal: None,
            line,
            span,
        }
    }

    #[must_use]
    pub fn with_literal(mut self, literal: Literal) -> Self {
        self.literal = Some(literal);
        self
    }

    /// The end-of-file marker closing every token stream.
    pub fn eof(line: u32, offset: u32) -> Self {
        Token::new(TokenKind::Eof, "", line, Span::point(offset))
    }

    /// Create a dummy token for tests and synthesized nodes.
    pub fn dummy(kind: TokenKind, lexeme: &str) -> Self {
        Token::new(kind, lexeme, 0, Span::DUMMY)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?}", self.kind, self.lexeme)?;
        if let Some(literal) = &self.literal {
            write!(f, " = {literal}")?;
        }
        write!(f, " @ line {} ({})", self.line, self.span)
    }
}

/// Token kinds for Lox.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // Single-character tokens
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,
    Question,
    Colon,
    Backslash,

    // One or two character tokens
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,

    // Literals
    Identifier,
    String,
    Number,

    // Keywords
    And,
    As,
    Break,
    Class,
    Debug,
    Else,
    False,
    For,
    Fun,
    If,
    Import,
    Nil,
    Or,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    Eof,
}

impl TokenKind {
    /// Source-level spelling for fixed tokens, `None` for literals and identifiers.
    pub const fn as_symbol(self) -> Option<&'static str> {
        let s = match self {
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Minus => "-",
            Self::Plus => "+",
            Self::Semicolon => ";",
            Self::Slash => "/",
            Self::Star => "*",
            Self::Question => "?",
            Self::Colon => ":",
            Self::Backslash => "\\",
            Self::Bang => "!",
            Self::BangEqual => "!=",
            Self::Equal => "=",
            Self::EqualEqual => "==",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::PlusEqual => "+=",
            Self::MinusEqual => "-=",
            Self::StarEqual => "*=",
            Self::SlashEqual => "/=",
            Self::And => "and",
            Self::As => "as",
            Self::Break => "break",
            Self::Class => "class",
            Self::Debug => "debug",
            Self::Else => "else",
            Self::False => "false",
            Self::For => "for",
            Self::Fun => "fun",
            Self::If => "if",
            Self::Import => "import",
            Self::Nil => "nil",
            Self::Or => "or",
            Self::Return => "return",
            Self::Super => "super",
            Self::This => "this",
            Self::True => "true",
            Self::Var => "var",
            Self::While => "while",
            Self::Identifier | Self::String | Self::Number | Self::Eof => return None,
        };
        Some(s)
    }

    /// Whether a statement may start at this token during error recovery.
    pub const fn starts_declaration(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Fun | Self::Var | Self::For | Self::If | Self::While | Self::Return
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_symbol() {
            Some(s) => write!(f, "{s}"),
            None => write!(f, "{self:?}"),
        }
    }
}

#[cfg(test)]
mod tests;
