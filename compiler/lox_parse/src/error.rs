//! Parse errors.
//!
//! A `ParseError` unwinds the current declaration; the parser reports it,
//! resynchronizes, and carries on with the next declaration.

use lox_diagnostic::{Diagnostic, ErrorCode, ErrorPosition};
use lox_ir::Token;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub code: ErrorCode,
    pub position: ErrorPosition,
    pub message: String,
}

impl ParseError {
    /// A required token was missing.
    #[cold]
    pub fn expected(found: &Token, message: &str) -> Self {
        ParseError {
            code: ErrorCode::E1001,
            position: ErrorPosition::at_token(found),
            message: message.to_string(),
        }
    }

    /// No expression starts at `found`.
    #[cold]
    pub fn expected_expression(found: &Token) -> Self {
        ParseError {
            code: ErrorCode::E1002,
            position: ErrorPosition::at_token(found),
            message: "Expect expression.".to_string(),
        }
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        Diagnostic::error(self.code)
            .with_message(self.message)
            .at(self.position)
    }
}
