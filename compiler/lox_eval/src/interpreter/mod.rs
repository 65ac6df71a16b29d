//! The tree-walking interpreter.
//!
//! One `Interpreter` runs one `Program`. Each compilation unit becomes a
//! `Module` the first time it is imported (the entry unit is imported by
//! [`Interpreter::run_main`]); later imports share that module.
//!
//! Evaluation state that changes with lexical position travels in a
//! [`Frame`]: the module whose globals and address table are in effect, and
//! the innermost local environment. Nothing about "the current module" is
//! stored on the interpreter itself, so a module body can import another
//! module in the middle of running.

mod builder;
mod call;
mod exec;
mod expr;
mod import;
mod scope_guard;

use std::rc::Rc;

use lox_diagnostic::DiagnosticQueue;
use lox_ir::NodeId;
use lox_resolve::{Program, MAIN_UNIT};
use rustc_hash::FxHashMap;

pub use builder::InterpreterBuilder;

use crate::errors::{internal_error, undefined_variable, EvalError, EvalResult};
use crate::{Environment, Heap, Module, SharedPrintHandler, Value};

/// Calls allowed to nest before a runtime stack overflow error.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 2048;

/// How a statement finished.
#[derive(Clone, Debug, PartialEq)]
pub enum Completion {
    Normal,
    /// `return`, unwinding to the nearest call.
    Returned(Value),
    /// `break`, unwinding to the nearest loop.
    Broke,
}

/// Result of executing a statement.
pub type ExecResult = Result<Completion, EvalError>;

/// Lexical context of the code being evaluated.
pub struct Frame {
    pub module: Heap<Module>,
    /// Innermost local scope; `None` at a module's top level, where
    /// declarations become module globals.
    pub env: Option<Environment>,
}

impl Frame {
    /// Context for a module's top-level statements.
    pub fn top_level(module: Heap<Module>) -> Self {
        Frame { module, env: None }
    }

    /// Context for a function body running in `env`.
    pub fn new(module: Heap<Module>, env: Environment) -> Self {
        Frame {
            module,
            env: Some(env),
        }
    }

    /// Bind a new name: the next slot of the local scope, or a global.
    ///
    /// Returns the slot for local bindings.
    pub fn define(&self, name: &str, value: Value) -> Option<usize> {
        match &self.env {
            Some(env) => Some(env.define(value)),
            None => {
                self.module.define_global(name, value);
                None
            }
        }
    }

    /// Overwrite a binding made by [`Frame::define`] in this same scope.
    fn redefine(&self, name: &str, slot: Option<usize>, value: Value) -> Result<(), EvalError> {
        match (&self.env, slot) {
            (Some(env), Some(slot)) => env.assign_at(0, slot, value),
            _ => {
                self.module.define_global(name, value);
                Ok(())
            }
        }
    }

    fn local_env(&self, line: u32) -> Result<&Environment, EvalError> {
        self.env
            .as_ref()
            .ok_or_else(|| internal_error(line, "local address outside of any scope"))
    }

    /// Read the variable `name` referenced by node `id`.
    pub fn lookup(&self, id: NodeId, name: &str, line: u32) -> EvalResult {
        match self.module.location(id) {
            Some(location) => self
                .local_env(line)?
                .get_at(location.depth, location.slot)
                .map_err(|err| err.or_line(line)),
            None => self
                .module
                .get_global(name)
                .ok_or_else(|| undefined_variable(line, name)),
        }
    }

    /// Store into the variable `name` referenced by node `id`.
    pub fn assign(&self, id: NodeId, name: &str, value: Value, line: u32) -> Result<(), EvalError> {
        match self.module.location(id) {
            Some(location) => self
                .local_env(line)?
                .assign_at(location.depth, location.slot, value)
                .map_err(|err| err.or_line(line)),
            None if self.module.assign_global(name, value) => Ok(()),
            None => Err(undefined_variable(line, name)),
        }
    }
}

/// Executes a resolved [`Program`].
pub struct Interpreter {
    program: Rc<Program>,
    /// Initialized modules by fully-qualified name.
    modules: FxHashMap<String, Heap<Module>>,
    print_handler: SharedPrintHandler,
    call_depth: usize,
    max_call_depth: usize,
}

impl Interpreter {
    /// An interpreter printing to stdout.
    pub fn new(program: Rc<Program>) -> Self {
        InterpreterBuilder::new(program).build()
    }

    /// Destination of `print` and `debug` output.
    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// A module that has been initialized, by fully-qualified name.
    pub fn module(&self, name: &str) -> Option<Heap<Module>> {
        self.modules.get(name).cloned()
    }

    /// Run the entry unit to completion.
    pub fn run_main(&mut self) -> Result<Heap<Module>, EvalError> {
        self.import_module(MAIN_UNIT, 0)
    }

    /// Run the entry unit, reporting a runtime error into `queue`.
    ///
    /// Returns `true` if the program ran without error.
    pub fn run(&mut self, queue: &mut DiagnosticQueue) -> bool {
        match self.run_main() {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(code = %err.code(), line = err.line, "runtime error");
                queue.push(err.into_diagnostic());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests;
