//! Native functions seeded into every module's globals.

use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::errors::{
    arity_mismatch, assertion_condition_not_bool, assertion_failed, operand_must_be_number,
    sleep_out_of_range, EvalResult,
};
use crate::{Heap, Interpreter, Module, Value};

/// A builtin implemented in Rust.
///
/// The interpreter checks the argument count against `arity` before
/// calling `invoke`.
pub trait NativeCallable {
    fn name(&self) -> &'static str;

    fn arity(&self) -> usize;

    /// Run the builtin. `line` is the call site, for error reporting.
    fn invoke(&self, interpreter: &mut Interpreter, line: u32, args: Vec<Value>) -> EvalResult;
}

/// `print(value)`: writes the value's text and a newline.
struct Print;

impl NativeCallable for Print {
    fn name(&self) -> &'static str {
        "print"
    }

    fn arity(&self) -> usize {
        1
    }

    fn invoke(&self, interpreter: &mut Interpreter, line: u32, args: Vec<Value>) -> EvalResult {
        let [value] = args.as_slice() else {
            return Err(arity_mismatch(line, 1, args.len()));
        };
        interpreter.print_handler().println(&value.to_string());
        Ok(Value::Nil)
    }
}

/// `clock()`: seconds since the UNIX epoch.
struct Clock;

impl NativeCallable for Clock {
    fn name(&self) -> &'static str {
        "clock"
    }

    fn arity(&self) -> usize {
        0
    }

    fn invoke(&self, _: &mut Interpreter, _: u32, _: Vec<Value>) -> EvalResult {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0.0, |elapsed| elapsed.as_secs_f64());
        Ok(Value::Number(seconds))
    }
}

/// `assert(condition, message)`: a runtime error carrying `message` when
/// `condition` is false.
struct Assert;

impl NativeCallable for Assert {
    fn name(&self) -> &'static str {
        "assert"
    }

    fn arity(&self) -> usize {
        2
    }

    fn invoke(&self, _: &mut Interpreter, line: u32, args: Vec<Value>) -> EvalResult {
        let [condition, message] = args.as_slice() else {
            return Err(arity_mismatch(line, 2, args.len()));
        };
        match condition {
            Value::Bool(true) => Ok(Value::Nil),
            Value::Bool(false) => Err(assertion_failed(line, message.to_string())),
            _ => Err(assertion_condition_not_bool(line)),
        }
    }
}

/// `sleep(ms)`: blocks the whole interpreter.
struct Sleep;

impl NativeCallable for Sleep {
    fn name(&self) -> &'static str {
        "sleep"
    }

    fn arity(&self) -> usize {
        1
    }

    fn invoke(&self, _: &mut Interpreter, line: u32, args: Vec<Value>) -> EvalResult {
        let [Value::Number(millis)] = args.as_slice() else {
            return Err(operand_must_be_number(line));
        };
        // Zero, negative and NaN durations return at once.
        if millis.is_nan() || *millis <= 0.0 {
            return Ok(Value::Nil);
        }
        let duration =
            Duration::try_from_secs_f64(millis / 1000.0).map_err(|_| sleep_out_of_range(line))?;
        thread::sleep(duration);
        Ok(Value::Nil)
    }
}

/// Define every native as a global of `module`.
pub fn install_natives(module: &Module) {
    let natives = [
        Heap::native(Print),
        Heap::native(Clock),
        Heap::native(Assert),
        Heap::native(Sleep),
    ];
    for native in natives {
        module.define_global(native.name(), Value::Native(native));
    }
}

#[cfg(test)]
mod tests;
