//! Token cursor for navigating the token stream.

use lox_ir::{Token, TokenKind};

use crate::ParseError;

/// Position in a token slice that always ends with `Eof`.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Cursor { tokens, pos: 0 }
    }

    /// The current token. Past the end this keeps returning the last token.
    #[inline]
    pub fn peek(&self) -> &'a Token {
        self.nth(0)
    }

    /// The token after the current one.
    #[inline]
    pub fn peek_next(&self) -> &'a Token {
        self.nth(1)
    }

    fn nth(&self, offset: usize) -> &'a Token {
        let idx = (self.pos + offset).min(self.tokens.len().saturating_sub(1));
        &self.tokens[idx]
    }

    /// The most recently consumed token.
    #[inline]
    pub fn previous(&self) -> &'a Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.tokens.is_empty() || self.peek().kind == TokenKind::Eof
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    pub fn advance(&mut self) -> &'a Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        self.previous()
    }

    /// Consume the current token if it is any of `kinds`.
    pub fn match_any(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|&k| self.check(k)) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind` or fail with `message` at the current token.
    pub fn consume(&mut self, kind: TokenKind, message: &str) -> Result<&'a Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::expected(self.peek(), message))
        }
    }
}
