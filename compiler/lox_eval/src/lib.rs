//! Lox Eval - tree-walking interpreter for Lox.
//!
//! # Architecture
//!
//! - `Environment`: slot-addressed scopes shared by closures
//! - `Value`: dynamically-typed runtime values (`Heap` and `LocalScope`
//!   handles for everything reference-like)
//! - `Function`, `Class`, `InstanceData`, `Module`: the runtime object model
//! - `Interpreter`: executes a resolved `Program`, one module per unit,
//!   initializing each imported module at most once
//! - `NativeCallable`: the bridge for builtins (`print`, `clock`, `assert`, `sleep`)
//!
//! Non-local exits (`return`, `break`) travel as `Completion` values, never
//! as errors. Runtime errors are `EvalError`s propagated with `?`.

mod environment;
pub mod errors;
mod interpreter;
mod natives;
mod object;
mod operators;
mod print_handler;
mod value;

pub use environment::{Environment, LocalScope};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Completion, ExecResult, Frame, Interpreter, InterpreterBuilder};
pub use natives::{install_natives, NativeCallable};
pub use object::{Class, Function, InstanceData, Module};
pub use operators::{evaluate_binary, evaluate_unary};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use value::{Heap, Value, MAX_ARRAY_LEN};
