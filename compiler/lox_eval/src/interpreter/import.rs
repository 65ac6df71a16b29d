//! Module initialization.

use std::rc::Rc;

use tracing::{debug, trace};

use super::{Completion, Frame, Interpreter};
use crate::errors::{internal_error, module_failed, EvalError};
use crate::{install_natives, Heap, Module};

impl Interpreter {
    /// The module named `name`, running its body first if this is the
    /// first import. `line` is the importing statement's line.
    ///
    /// The module is cached before its body runs, so an import cycle sees
    /// the partially initialized module instead of running it again.
    pub(crate) fn import_module(&mut self, name: &str, line: u32) -> Result<Heap<Module>, EvalError> {
        if let Some(module) = self.modules.get(name) {
            trace!(module = name, "module already initialized");
            return Ok(module.clone());
        }

        let unit = match self.program.get(name) {
            Some(unit) if !unit.has_errors => Rc::clone(unit),
            _ => return Err(module_failed(line, name)),
        };

        debug!(module = name, "initializing module");
        let module = Heap::new(Module::new(unit));
        install_natives(&module);
        self.modules.insert(name.to_string(), module.clone());
        self.execute_module(&module)?;
        Ok(module)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(module = %module.name))]
    fn execute_module(&mut self, module: &Heap<Module>) -> Result<(), EvalError> {
        let unit = Rc::clone(&module.unit);
        let mut frame = Frame::top_level(module.clone());
        for stmt in &unit.statements {
            match self.execute(stmt, &mut frame)? {
                Completion::Normal => {}
                Completion::Returned(_) => {
                    return Err(internal_error(0, "'return' escaped a module body"));
                }
                Completion::Broke => {
                    return Err(internal_error(0, "'break' escaped a module body"));
                }
            }
        }
        Ok(())
    }
}
