//! `InterpreterBuilder` for configuring an `Interpreter`.

use std::rc::Rc;

use lox_resolve::Program;
use rustc_hash::FxHashMap;

use super::{Interpreter, DEFAULT_MAX_CALL_DEPTH};
use crate::{stdout_handler, SharedPrintHandler};

/// Builder for [`Interpreter`].
///
/// Output goes to stdout unless a print handler is given; tests pass a
/// buffer handler and read the captured text back.
pub struct InterpreterBuilder {
    program: Rc<Program>,
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: usize,
}

impl InterpreterBuilder {
    pub fn new(program: Rc<Program>) -> Self {
        InterpreterBuilder {
            program,
            print_handler: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Set where `print` and `debug` write.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Set how deeply calls may nest before a stack overflow error.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            program: self.program,
            modules: FxHashMap::default(),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            call_depth: 0,
            max_call_depth: self.max_call_depth,
        }
    }
}
