//! Recursive descent parser for Lox.
//!
//! Produces `Vec<Stmt>` from the lexer's tokens. Every expression node is
//! stamped with a fresh `NodeId`. Syntax errors go to the diagnostic queue;
//! the parser then resynchronizes at the next statement boundary so one
//! pass reports as many independent errors as possible.
//!
//! Desugaring done here, so later phases never see the surface forms:
//! - `for` loops become blocks around `while`
//! - `a op= b` becomes `a = a op b`
//! - `print expr;` becomes a call of the global `print`
//! - `\params expr` lambdas get an implicit `return`

mod cursor;
mod error;
mod grammar;
mod recovery;

use lox_diagnostic::DiagnosticQueue;
use lox_ir::{NodeIdGen, Stmt, Token};

use cursor::Cursor;
pub use error::ParseError;

/// Maximum number of call arguments or function parameters.
pub const MAX_ARGS: usize = 255;

/// Parser state for one compilation unit.
pub struct Parser<'t, 'q> {
    cursor: Cursor<'t>,
    ids: NodeIdGen,
    queue: &'q mut DiagnosticQueue,
}

impl<'t, 'q> Parser<'t, 'q> {
    pub fn new(tokens: &'t [Token], queue: &'q mut DiagnosticQueue) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            ids: NodeIdGen::new(),
            queue,
        }
    }

    /// Parse declarations until end of input.
    pub fn parse(mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();
        while !self.cursor.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }
        statements
    }

    /// Report an error that does not abort the current declaration.
    fn report(&mut self, error: ParseError) {
        self.queue.push(error.into_diagnostic());
    }
}

/// Parse a token stream, reporting syntax errors into `queue`.
pub fn parse(tokens: &[Token], queue: &mut DiagnosticQueue) -> Vec<Stmt> {
    Parser::new(tokens, queue).parse()
}
