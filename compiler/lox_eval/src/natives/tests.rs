use std::rc::Rc;
use std::time::Instant;

use lox_resolve::{CompilationUnit, Program};
use pretty_assertions::assert_eq;

use super::*;
use crate::{buffer_handler, EvalErrorKind, InterpreterBuilder};

fn interpreter() -> Interpreter {
    InterpreterBuilder::new(Rc::new(Program::new()))
        .print_handler(buffer_handler())
        .build()
}

fn natives() -> Module {
    let module = Module::new(Rc::new(CompilationUnit::failed("m")));
    install_natives(&module);
    module
}

fn native(name: &str) -> Heap<dyn NativeCallable> {
    match natives().get_global(name) {
        Some(Value::Native(native)) => native,
        other => panic!("{name} is not a native: {other:?}"),
    }
}

#[test]
fn test_install_defines_every_native() {
    let module = natives();
    assert_eq!(module.global_names(), vec!["assert", "clock", "print", "sleep"]);
    assert_eq!(native("print").arity(), 1);
    assert_eq!(native("clock").arity(), 0);
    assert_eq!(native("assert").arity(), 2);
    assert_eq!(native("sleep").arity(), 1);
    assert_eq!(Value::Native(native("clock")).to_string(), "<native fn clock>");
}

#[test]
fn test_print_writes_stringified_value() {
    let mut interp = interpreter();
    let print = native("print");
    let result = print.invoke(&mut interp, 1, vec![Value::Number(2.0)]);
    assert_eq!(result, Ok(Value::Nil));
    print.invoke(&mut interp, 1, vec![Value::Nil]).unwrap();
    assert_eq!(interp.print_handler().output(), "2\nnil\n");
}

#[test]
fn test_clock_is_seconds_since_epoch() {
    let mut interp = interpreter();
    let Ok(Value::Number(now)) = native("clock").invoke(&mut interp, 1, vec![]) else {
        panic!("clock did not return a number");
    };
    // 2020-01-01T00:00:00Z
    assert!(now > 1_577_836_800.0);
}

#[test]
fn test_assert() {
    let mut interp = interpreter();
    let assert = native("assert");

    let ok = assert.invoke(&mut interp, 3, vec![Value::Bool(true), Value::string("msg")]);
    assert_eq!(ok, Ok(Value::Nil));

    let err = assert
        .invoke(&mut interp, 3, vec![Value::Bool(false), Value::string("boom")])
        .unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::AssertionFailed);
    assert_eq!(err.message, "boom");
    assert_eq!(err.line, 3);

    let err = assert
        .invoke(&mut interp, 3, vec![Value::Nil, Value::string("boom")])
        .unwrap_err();
    assert_eq!(err.message, "Assertion condition must be a boolean.");
}

#[test]
fn test_sleep() {
    let mut interp = interpreter();
    let sleep = native("sleep");

    let start = Instant::now();
    assert_eq!(sleep.invoke(&mut interp, 1, vec![Value::Number(5.0)]), Ok(Value::Nil));
    assert!(start.elapsed().as_millis() >= 5);

    assert_eq!(sleep.invoke(&mut interp, 1, vec![Value::Number(-5.0)]), Ok(Value::Nil));
    assert_eq!(sleep.invoke(&mut interp, 1, vec![Value::Number(f64::NAN)]), Ok(Value::Nil));

    for millis in [1e300, f64::INFINITY] {
        let err = sleep
            .invoke(&mut interp, 4, vec![Value::Number(millis)])
            .unwrap_err();
        assert_eq!(err.message, "Sleep duration is out of range.");
        assert_eq!(err.line, 4);
    }

    let err = sleep
        .invoke(&mut interp, 1, vec![Value::string("soon")])
        .unwrap_err();
    assert_eq!(err.message, "Operand must be a number.");
}

#[test]
fn test_wrong_argument_count_is_rejected() {
    let mut interp = interpreter();
    let err = native("print").invoke(&mut interp, 2, vec![]).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::ArityMismatch { expected: 1, got: 0 });
}
