use std::fmt;

use lox_ir::{Token, TokenKind};

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "Error"),
            Severity::Warning => write!(f, "Warning"),
        }
    }
}

/// Where on a line a diagnostic points.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Location {
    /// At a specific token, rendered as `at 'lexeme'`.
    Lexeme(String),
    /// At the end of input.
    End,
    /// The line alone (runtime errors, module errors).
    Unplaced,
}

/// Line plus location, the position every diagnostic carries.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ErrorPosition {
    pub line: u32,
    pub location: Location,
}

impl ErrorPosition {
    /// Position of a token; the EOF token renders as `at end`.
    pub fn at_token(token: &Token) -> Self {
        let location = if token.kind == TokenKind::Eof {
            Location::End
        } else {
            Location::Lexeme(token.lexeme.clone())
        };
        ErrorPosition {
            line: token.line,
            location,
        }
    }

    pub fn at_lexeme(line: u32, lexeme: impl Into<String>) -> Self {
        ErrorPosition {
            line,
            location: Location::Lexeme(lexeme.into()),
        }
    }

    pub fn line(line: u32) -> Self {
        ErrorPosition {
            line,
            location: Location::Unplaced,
        }
    }
}

/// A reported problem with the code and position needed to render it.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    pub severity: Severity,
    /// Main error message.
    pub message: String,
    pub position: ErrorPosition,
    /// Source file the diagnostic belongs to, when known.
    pub file: Option<String>,
    /// Additional notes providing context.
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            severity: Severity::Error,
            message: String::new(),
            position: ErrorPosition::line(0),
            file: None,
            notes: Vec::new(),
        }
    }

    /// Set the main message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn at(mut self, position: ErrorPosition) -> Self {
        self.position = position;
        self
    }

    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Add a note providing additional context.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn line(&self) -> u32 {
        self.position.line
    }

    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    pub fn is_runtime(&self) -> bool {
        self.code.is_runtime()
    }
}

/// Renders the classic Lox format:
///
/// ```text
/// [line 3] Error at 'x': Already a variable with this name in this scope.
/// [line 7] Error at end: Expect ';' after value.
/// [line 9] Error: Operands must be numbers.
/// ```
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "[file {file}] ")?;
        }
        write!(f, "[line {}] {}", self.position.line, self.severity)?;
        match &self.position.location {
            Location::Lexeme(lexeme) => write!(f, " at '{lexeme}'")?,
            Location::End => write!(f, " at end")?,
            Location::Unplaced => {}
        }
        write!(f, ": {}", self.message)
    }
}
