//! Statement execution.

use std::rc::Rc;

use lox_ir::{qualified_name, ClassDecl, Stmt};
use lox_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;

use super::{Completion, ExecResult, Frame, Interpreter};
use crate::errors::superclass_not_class;
use crate::{Class, Function, Heap, Value};

impl Interpreter {
    pub(crate) fn execute(&mut self, stmt: &Stmt, frame: &mut Frame) -> ExecResult {
        ensure_sufficient_stack(|| self.execute_inner(stmt, frame))
    }

    fn execute_inner(&mut self, stmt: &Stmt, frame: &mut Frame) -> ExecResult {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr, frame)?;
                Ok(Completion::Normal)
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition, frame)?.is_truthy() {
                    self.execute(then_branch, frame)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch, frame)
                } else {
                    Ok(Completion::Normal)
                }
            }
            Stmt::While { condition, body } => {
                while self.evaluate(condition, frame)?.is_truthy() {
                    match self.execute(body, frame)? {
                        Completion::Normal => {}
                        Completion::Broke => break,
                        returned @ Completion::Returned(_) => return Ok(returned),
                    }
                }
                Ok(Completion::Normal)
            }
            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(init) => self.evaluate(init, frame)?,
                    None => Value::Nil,
                };
                frame.define(&name.name, value);
                Ok(Completion::Normal)
            }
            Stmt::Function(decl) => {
                let function = Function::new(
                    Rc::clone(decl),
                    frame.env.clone(),
                    frame.module.clone(),
                    false,
                );
                frame.define(decl.name_str(), Value::Function(Heap::new(function)));
                Ok(Completion::Normal)
            }
            Stmt::Class(decl) => self.declare_class(decl, frame),
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(value) => self.evaluate(value, frame)?,
                    None => Value::Nil,
                };
                Ok(Completion::Returned(value))
            }
            Stmt::Block(statements) => {
                let mut scoped = frame.scoped();
                self.execute_block(statements, &mut scoped)
            }
            Stmt::Import { path, alias } => {
                let name = qualified_name(path);
                let line = path.first().map_or(alias.line, |segment| segment.line);
                let module = self.import_module(&name, line)?;
                frame.define(&alias.name, Value::Module(module));
                Ok(Completion::Normal)
            }
            Stmt::Debug { line } => {
                self.print_handler.println(&format!("[DEBUG] Line {line}"));
                Ok(Completion::Normal)
            }
            Stmt::Break { .. } => Ok(Completion::Broke),
        }
    }

    /// Run `statements` in `frame` until one completes abnormally.
    pub(crate) fn execute_block(&mut self, statements: &[Stmt], frame: &mut Frame) -> ExecResult {
        for stmt in statements {
            match self.execute(stmt, frame)? {
                Completion::Normal => {}
                exit => return Ok(exit),
            }
        }
        Ok(Completion::Normal)
    }

    fn declare_class(&mut self, decl: &ClassDecl, frame: &mut Frame) -> ExecResult {
        let superclass = match &decl.superclass {
            Some(expr) => match self.evaluate(expr, frame)? {
                Value::Class(class) => Some(class),
                _ => return Err(superclass_not_class(expr.line)),
            },
            None => None,
        };

        // Bound to nil first so method bodies can refer to the class.
        let slot = frame.define(&decl.name.name, Value::Nil);

        let methods = match &superclass {
            Some(superclass) => {
                let scoped = frame.scoped();
                scoped.define("super", Value::Class(superclass.clone()));
                class_methods(decl, &scoped)
            }
            None => class_methods(decl, frame),
        };

        let class = Class::new(decl.name.name.as_str(), superclass, methods);
        frame
            .redefine(&decl.name.name, slot, Value::Class(Heap::new(class)))
            .map_err(|err| err.or_line(decl.name.line))?;
        Ok(Completion::Normal)
    }
}

/// Method table of `decl`, each method closing over `frame`'s scope.
fn class_methods(decl: &ClassDecl, frame: &Frame) -> FxHashMap<String, Heap<Function>> {
    decl.methods
        .iter()
        .map(|method| {
            let name = method.name_str();
            let function = Function::new(
                Rc::clone(method),
                frame.env.clone(),
                frame.module.clone(),
                name == "init",
            );
            (name.to_string(), Heap::new(function))
        })
        .collect()
}
