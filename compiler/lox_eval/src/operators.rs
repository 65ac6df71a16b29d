//! Binary and unary operator semantics.
//!
//! Both operands are already evaluated; short-circuiting `and`/`or` never
//! reach this module. Dispatch is a plain match over the operator and the
//! operand types.

use lox_ir::{BinaryOp, UnaryOp};

use crate::errors::{
    operand_must_be_number, operands_must_be_numbers, operands_must_be_numbers_or_strings,
    EvalResult,
};
use crate::Value;

/// Apply `op` to two evaluated operands.
///
/// Division follows IEEE 754: `1 / 0` is `Infinity`, `0 / 0` is `NaN`.
#[allow(
    clippy::needless_pass_by_value,
    reason = "operands are consumed from the evaluator's temporaries"
)]
pub fn evaluate_binary(op: BinaryOp, left: Value, right: Value, line: u32) -> EvalResult {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::NotEq => Ok(Value::Bool(left != right)),
        BinaryOp::Add => match (&left, &right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::Str(a), Value::Str(b)) => {
                let mut joined = String::with_capacity(a.len() + b.len());
                joined.push_str(a);
                joined.push_str(b);
                Ok(Value::string(joined))
            }
            _ => Err(operands_must_be_numbers_or_strings(line)),
        },
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
            let (a, b) = numbers(&left, &right, line)?;
            Ok(Value::Number(match op {
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                _ => a / b,
            }))
        }
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            let (a, b) = numbers(&left, &right, line)?;
            Ok(Value::Bool(match op {
                BinaryOp::Lt => a < b,
                BinaryOp::LtEq => a <= b,
                BinaryOp::Gt => a > b,
                _ => a >= b,
            }))
        }
    }
}

/// Apply a prefix operator.
#[allow(
    clippy::needless_pass_by_value,
    reason = "mirrors evaluate_binary's calling convention"
)]
pub fn evaluate_unary(op: UnaryOp, operand: Value, line: u32) -> EvalResult {
    match op {
        UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
        UnaryOp::Neg => operand
            .as_number()
            .map(|n| Value::Number(-n))
            .ok_or_else(|| operand_must_be_number(line)),
    }
}

#[inline]
fn numbers(left: &Value, right: &Value, line: u32) -> Result<(f64, f64), crate::EvalError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(operands_must_be_numbers(line)),
    }
}
