//! Runtime errors.
//!
//! `EvalErrorKind` is the structured category; factory functions build an
//! `EvalError` with both the kind and the user-facing Lox message. Every
//! error carries the source line it is reported at.

use std::fmt;

use lox_diagnostic::{Diagnostic, ErrorCode, ErrorPosition};

use crate::Value;

/// Result of evaluating an expression.
pub type EvalResult = Result<Value, EvalError>;

/// Typed runtime error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// Operator or builtin applied to values of the wrong type.
    OperandMismatch,
    NotCallable,
    ArityMismatch {
        expected: usize,
        got: usize,
    },
    UndefinedVariable {
        name: String,
    },
    UndefinedProperty {
        name: String,
    },
    /// Property read or write on a value that has none.
    NoProperties,
    SuperclassNotClass,
    /// Array size or index that is not a usable number.
    InvalidArrayOperand,
    IndexOutOfBounds {
        index: i64,
        len: usize,
    },
    NotAnArray,
    InvalidAssignmentTarget,
    AssertionFailed,
    StackOverflow {
        depth: usize,
    },
    /// `import` of a module that is missing or failed to compile.
    ModuleFailed {
        name: String,
    },
    /// The interpreter's own bookkeeping went wrong (bad lexical address,
    /// escaped `break`). Never caused by a well-resolved program.
    Internal,
}

impl EvalErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::OperandMismatch => ErrorCode::E3001,
            Self::NotCallable => ErrorCode::E3002,
            Self::ArityMismatch { .. } => ErrorCode::E3003,
            Self::UndefinedVariable { .. } => ErrorCode::E3004,
            Self::UndefinedProperty { .. } => ErrorCode::E3005,
            Self::NoProperties => ErrorCode::E3006,
            Self::SuperclassNotClass => ErrorCode::E3007,
            Self::InvalidArrayOperand => ErrorCode::E3008,
            Self::IndexOutOfBounds { .. } => ErrorCode::E3009,
            Self::NotAnArray => ErrorCode::E3010,
            Self::InvalidAssignmentTarget => ErrorCode::E3011,
            Self::AssertionFailed => ErrorCode::E3012,
            Self::StackOverflow { .. } => ErrorCode::E3013,
            Self::ModuleFailed { .. } => ErrorCode::E3014,
            Self::Internal => ErrorCode::E3999,
        }
    }
}

/// A runtime error: what went wrong and on which line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub message: String,
    /// Source line, or 0 until the evaluator attaches one.
    pub line: u32,
}

impl EvalError {
    fn new(kind: EvalErrorKind, line: u32, message: impl Into<String>) -> Self {
        EvalError {
            kind,
            message: message.into(),
            line,
        }
    }

    /// Attach `line` unless the error already has one.
    #[must_use]
    pub fn or_line(mut self, line: u32) -> Self {
        if self.line == 0 {
            self.line = line;
        }
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.message)
            .at(ErrorPosition::line(self.line))
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] {}", self.line, self.message)
    }
}

impl std::error::Error for EvalError {}

// Operator errors

#[cold]
pub fn operands_must_be_numbers(line: u32) -> EvalError {
    EvalError::new(EvalErrorKind::OperandMismatch, line, "Operands must be numbers.")
}

#[cold]
pub fn operand_must_be_number(line: u32) -> EvalError {
    EvalError::new(EvalErrorKind::OperandMismatch, line, "Operand must be a number.")
}

#[cold]
pub fn operands_must_be_numbers_or_strings(line: u32) -> EvalError {
    EvalError::new(
        EvalErrorKind::OperandMismatch,
        line,
        "Operands must be two numbers or two strings.",
    )
}

// Calls

#[cold]
pub fn not_callable(line: u32) -> EvalError {
    EvalError::new(
        EvalErrorKind::NotCallable,
        line,
        "Can only call functions and classes.",
    )
}

#[cold]
pub fn arity_mismatch(line: u32, expected: usize, got: usize) -> EvalError {
    EvalError::new(
        EvalErrorKind::ArityMismatch { expected, got },
        line,
        format!("Expected {expected} arguments but got {got}."),
    )
}

#[cold]
pub fn stack_overflow(line: u32, depth: usize) -> EvalError {
    EvalError::new(
        EvalErrorKind::StackOverflow { depth },
        line,
        format!("Stack overflow: more than {depth} nested calls."),
    )
}

// Names and properties

#[cold]
pub fn undefined_variable(line: u32, name: &str) -> EvalError {
    EvalError::new(
        EvalErrorKind::UndefinedVariable {
            name: name.to_string(),
        },
        line,
        format!("Undefined variable '{name}'."),
    )
}

#[cold]
pub fn undefined_property(line: u32, name: &str) -> EvalError {
    EvalError::new(
        EvalErrorKind::UndefinedProperty {
            name: name.to_string(),
        },
        line,
        format!("Undefined property '{name}'."),
    )
}

#[cold]
pub fn no_properties(line: u32) -> EvalError {
    EvalError::new(
        EvalErrorKind::NoProperties,
        line,
        "Only instances or modules have properties.",
    )
}

#[cold]
pub fn only_instances_have_fields(line: u32) -> EvalError {
    EvalError::new(EvalErrorKind::NoProperties, line, "Only instances have fields.")
}

#[cold]
pub fn superclass_not_class(line: u32) -> EvalError {
    EvalError::new(
        EvalErrorKind::SuperclassNotClass,
        line,
        "Superclass must be a class.",
    )
}

#[cold]
pub fn invalid_assignment_target(line: u32) -> EvalError {
    EvalError::new(
        EvalErrorKind::InvalidAssignmentTarget,
        line,
        "Invalid left value to assignment operator.",
    )
}

// Arrays

#[cold]
pub fn array_size_not_number(line: u32) -> EvalError {
    EvalError::new(
        EvalErrorKind::InvalidArrayOperand,
        line,
        "Array size must be a number.",
    )
}

#[cold]
pub fn array_size_negative(line: u32) -> EvalError {
    EvalError::new(
        EvalErrorKind::InvalidArrayOperand,
        line,
        "Array size can't be negative.",
    )
}

#[cold]
pub fn array_size_too_large(line: u32, limit: usize) -> EvalError {
    EvalError::new(
        EvalErrorKind::InvalidArrayOperand,
        line,
        format!("Array size can't exceed {limit}."),
    )
}

#[cold]
pub fn array_index_not_number(line: u32) -> EvalError {
    EvalError::new(
        EvalErrorKind::InvalidArrayOperand,
        line,
        "Array index must be a number.",
    )
}

#[cold]
pub fn index_out_of_bounds(line: u32, index: i64, len: usize) -> EvalError {
    EvalError::new(
        EvalErrorKind::IndexOutOfBounds { index, len },
        line,
        format!("Array index {index} out of bounds for length {len}."),
    )
}

#[cold]
pub fn not_an_array(line: u32) -> EvalError {
    EvalError::new(EvalErrorKind::NotAnArray, line, "Cannot index non array object.")
}

// Natives

#[cold]
pub fn assertion_failed(line: u32, message: String) -> EvalError {
    EvalError::new(EvalErrorKind::AssertionFailed, line, message)
}

#[cold]
pub fn sleep_out_of_range(line: u32) -> EvalError {
    EvalError::new(
        EvalErrorKind::OperandMismatch,
        line,
        "Sleep duration is out of range.",
    )
}

#[cold]
pub fn assertion_condition_not_bool(line: u32) -> EvalError {
    EvalError::new(
        EvalErrorKind::OperandMismatch,
        line,
        "Assertion condition must be a boolean.",
    )
}

// Modules

#[cold]
pub fn module_failed(line: u32, name: &str) -> EvalError {
    EvalError::new(
        EvalErrorKind::ModuleFailed {
            name: name.to_string(),
        },
        line,
        format!("Could not parse module {name}."),
    )
}

#[cold]
pub fn internal_error(line: u32, detail: impl fmt::Display) -> EvalError {
    EvalError::new(
        EvalErrorKind::Internal,
        line,
        format!("Internal interpreter error: {detail}."),
    )
}
