//! Calling functions, classes and natives.

use std::rc::Rc;

use lox_stack::ensure_sufficient_stack;

use super::{Completion, Frame, Interpreter};
use crate::errors::{arity_mismatch, internal_error, not_callable, stack_overflow, EvalResult};
use crate::{Environment, Function, Value};

impl Interpreter {
    /// Call `callee` with already-evaluated arguments.
    ///
    /// The argument count is checked before anything runs.
    pub fn call_value(&mut self, callee: Value, args: Vec<Value>, line: u32) -> EvalResult {
        match callee {
            Value::Function(function) => {
                check_arity(function.arity(), args.len(), line)?;
                self.call_function(&function, args, line)
            }
            Value::Class(class) => {
                check_arity(class.arity(), args.len(), line)?;
                let instance = Value::instance(class.clone());
                if let Some(init) = class.initializer() {
                    let bound = init.bind(instance.clone());
                    self.call_function(&bound, args, line)?;
                }
                Ok(instance)
            }
            Value::Native(native) => {
                check_arity(native.arity(), args.len(), line)?;
                native.invoke(self, line, args)
            }
            _ => Err(not_callable(line)),
        }
    }

    fn call_function(&mut self, function: &Function, args: Vec<Value>, line: u32) -> EvalResult {
        if self.call_depth >= self.max_call_depth {
            return Err(stack_overflow(line, self.max_call_depth));
        }

        let env = Environment::new(function.closure.clone());
        for arg in args {
            env.define(arg);
        }
        let mut frame = Frame::new(function.module.clone(), env);
        let decl = Rc::clone(&function.decl);

        self.call_depth += 1;
        let result = ensure_sufficient_stack(|| self.execute_block(&decl.body, &mut frame));
        self.call_depth -= 1;

        let completion = result?;
        if function.is_initializer {
            return function.bound_this();
        }
        match completion {
            Completion::Normal => Ok(Value::Nil),
            Completion::Returned(value) => Ok(value),
            Completion::Broke => Err(internal_error(line, "'break' escaped a function body")),
        }
    }
}

#[inline]
fn check_arity(expected: usize, got: usize, line: u32) -> Result<(), crate::EvalError> {
    if expected == got {
        Ok(())
    } else {
        Err(arity_mismatch(line, expected, got))
    }
}
