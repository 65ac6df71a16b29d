//! Expression evaluation.

use std::rc::Rc;

use lox_ir::{Expr, ExprKind, LogicalOp};
use lox_stack::ensure_sufficient_stack;

use super::{Frame, Interpreter};
use crate::errors::{
    array_index_not_number, array_size_negative, array_size_not_number, array_size_too_large,
    index_out_of_bounds, internal_error, invalid_assignment_target, no_properties, not_an_array,
    only_instances_have_fields, undefined_property, undefined_variable, EvalError, EvalResult,
};
use crate::{
    evaluate_binary, evaluate_unary, Function, Heap, InstanceData, LocalScope, Value, MAX_ARRAY_LEN,
};

impl Interpreter {
    pub(crate) fn evaluate(&mut self, expr: &Expr, frame: &mut Frame) -> EvalResult {
        ensure_sufficient_stack(|| self.evaluate_inner(expr, frame))
    }

    fn evaluate_inner(&mut self, expr: &Expr, frame: &mut Frame) -> EvalResult {
        match &expr.kind {
            ExprKind::Literal(literal) => Ok(Value::from_literal(literal)),
            ExprKind::Grouping(inner) => self.evaluate(inner, frame),
            ExprKind::Unary { op, operand } => {
                let operand = self.evaluate(operand, frame)?;
                evaluate_unary(*op, operand, expr.line)
            }
            ExprKind::Binary { left, op, right } => {
                let left = self.evaluate(left, frame)?;
                let right = self.evaluate(right, frame)?;
                evaluate_binary(*op, left, right, expr.line)
            }
            ExprKind::Logical { left, op, right } => {
                let left = self.evaluate(left, frame)?;
                let decided = match op {
                    LogicalOp::Or => left.is_truthy(),
                    LogicalOp::And => !left.is_truthy(),
                };
                if decided {
                    Ok(left)
                } else {
                    self.evaluate(right, frame)
                }
            }
            ExprKind::Ternary {
                condition,
                then_expr,
                else_expr,
            } => {
                if self.evaluate(condition, frame)?.is_truthy() {
                    self.evaluate(then_expr, frame)
                } else {
                    self.evaluate(else_expr, frame)
                }
            }
            ExprKind::Call { callee, arguments } => {
                let callee = self.evaluate(callee, frame)?;
                let mut args = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    args.push(self.evaluate(argument, frame)?);
                }
                self.call_value(callee, args, expr.line)
            }
            ExprKind::Get { object, name } => match self.evaluate(object, frame)? {
                Value::Instance(instance) => InstanceData::get(&instance, &name.name)
                    .ok_or_else(|| undefined_property(name.line, &name.name)),
                Value::Module(module) => module
                    .get_global(&name.name)
                    .ok_or_else(|| undefined_variable(name.line, &name.name)),
                _ => Err(no_properties(name.line)),
            },
            ExprKind::Assign { target, value } => self.assign(target, value, frame),
            ExprKind::This => frame.lookup(expr.id, "this", expr.line),
            ExprKind::Super { method } => {
                let location = frame
                    .module
                    .location(expr.id)
                    .ok_or_else(|| internal_error(expr.line, "unresolved 'super'"))?;
                let receiver_depth = location
                    .depth
                    .checked_sub(1)
                    .ok_or_else(|| internal_error(expr.line, "'super' without a receiver scope"))?;
                let env = frame.local_env(expr.line)?;
                let superclass = env
                    .get_at(location.depth, location.slot)
                    .map_err(|err| err.or_line(expr.line))?;
                let receiver = env
                    .get_at(receiver_depth, 0)
                    .map_err(|err| err.or_line(expr.line))?;
                let Value::Class(superclass) = superclass else {
                    return Err(internal_error(expr.line, "'super' is not bound to a class"));
                };
                let found = superclass
                    .find_method(&method.name)
                    .ok_or_else(|| undefined_property(method.line, &method.name))?;
                Ok(Value::Function(Heap::new(found.bind(receiver))))
            }
            ExprKind::ArrayCreation { size } => {
                let size = self.evaluate(size, frame)?;
                let size = size
                    .as_number()
                    .ok_or_else(|| array_size_not_number(expr.line))?;
                if size < 0.0 {
                    return Err(array_size_negative(expr.line));
                }
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    reason = "size is non-negative; fractional sizes truncate, huge ones saturate"
                )]
                let len = size.trunc() as usize;
                Value::array(len).ok_or_else(|| array_size_too_large(expr.line, MAX_ARRAY_LEN))
            }
            ExprKind::ArrayIndex { array, index } => {
                let array = self.evaluate(array, frame)?;
                let index = self.evaluate(index, frame)?;
                let (cells, i) = array_slot(&array, &index, expr.line)?;
                let value = cells.borrow().get(i).cloned();
                value.ok_or_else(|| internal_error(expr.line, "array shrank during indexing"))
            }
            ExprKind::Variable(name) => frame.lookup(expr.id, &name.name, name.line),
            ExprKind::Function(decl) => {
                let function = Function::new(
                    Rc::clone(decl),
                    frame.env.clone(),
                    frame.module.clone(),
                    false,
                );
                Ok(Value::Function(Heap::new(function)))
            }
        }
    }

    /// `target = value`. Subterms of the target evaluate before `value`.
    fn assign(&mut self, target: &Expr, value: &Expr, frame: &mut Frame) -> EvalResult {
        match &target.kind {
            ExprKind::Variable(name) => {
                let value = self.evaluate(value, frame)?;
                frame.assign(target.id, &name.name, value.clone(), name.line)?;
                Ok(value)
            }
            ExprKind::Get { object, name } => {
                let Value::Instance(instance) = self.evaluate(object, frame)? else {
                    return Err(only_instances_have_fields(name.line));
                };
                let value = self.evaluate(value, frame)?;
                instance
                    .borrow_mut()
                    .set_field(name.name.as_str(), value.clone());
                Ok(value)
            }
            ExprKind::ArrayIndex { array, index } => {
                let array = self.evaluate(array, frame)?;
                let index = self.evaluate(index, frame)?;
                let value = self.evaluate(value, frame)?;
                let (cells, i) = array_slot(&array, &index, target.line)?;
                if let Some(cell) = cells.borrow_mut().get_mut(i) {
                    *cell = value.clone();
                }
                Ok(value)
            }
            _ => Err(invalid_assignment_target(target.line)),
        }
    }
}

/// Check an indexing operation, returning the array's cells and the
/// in-bounds position. Fractional indices truncate toward zero.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "bounds are checked in f64 before converting"
)]
fn array_slot(
    array: &Value,
    index: &Value,
    line: u32,
) -> Result<(LocalScope<Vec<Value>>, usize), EvalError> {
    let Value::Array(cells) = array else {
        return Err(not_an_array(line));
    };
    let index = index
        .as_number()
        .ok_or_else(|| array_index_not_number(line))?
        .trunc();
    let len = cells.borrow().len();
    if index >= 0.0 && index < len as f64 {
        Ok((cells.clone(), index as usize))
    } else {
        Err(index_out_of_bounds(line, index as i64, len))
    }
}
