//! Panic-mode recovery.

use lox_ir::TokenKind;
use tracing::trace;

use crate::Parser;

impl Parser<'_, '_> {
    /// Skip tokens until a likely statement boundary: just past a `;`, or
    /// just before a keyword that starts a declaration or statement.
    pub(crate) fn synchronize(&mut self) {
        let start_line = self.cursor.peek().line;
        self.cursor.advance();
        while !self.cursor.is_at_end() {
            if self.cursor.previous().kind == TokenKind::Semicolon {
                break;
            }
            if self.cursor.peek().kind.starts_declaration() {
                break;
            }
            self.cursor.advance();
        }
        trace!(
            from_line = start_line,
            to_line = self.cursor.peek().line,
            "parser resynchronized"
        );
    }
}
