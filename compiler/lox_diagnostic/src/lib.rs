//! Diagnostic system for Lox.
//!
//! Every phase reports into a shared [`DiagnosticQueue`] instead of
//! printing or aborting:
//! - lexer, parser and resolver call `report_compile_error`
//! - the interpreter's top-level driver calls `report_runtime_error`
//!
//! Rendering (and the choice of exit status) belongs to the caller, which
//! drains the queue through a [`DiagnosticEmitter`].

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod queue;

pub use diagnostic::{Diagnostic, ErrorPosition, Location, Severity};
pub use emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
pub use error_code::{ErrorCode, Phase};
pub use queue::{DiagnosticConfig, DiagnosticQueue};
