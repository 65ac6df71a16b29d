use std::rc::Rc;

use lox_diagnostic::DiagnosticQueue;
use lox_lexer::lex;
use lox_parse::parse;
use lox_resolve::{resolve, CompilationUnit, Program, MAIN_UNIT};
use pretty_assertions::assert_eq;

use super::*;
use crate::{buffer_handler, EvalErrorKind};

fn compile(units: &[(&str, &str)]) -> Rc<Program> {
    let mut queue = DiagnosticQueue::new();
    let mut program = Program::new();
    for (name, source) in units {
        let tokens = lex(source, &mut queue);
        let stmts = parse(&tokens, &mut queue);
        program.insert(resolve(*name, stmts, &mut queue));
    }
    assert!(!queue.has_errors(), "compile errors: {:?}", queue.diagnostics());
    Rc::new(program)
}

fn interpreter(source: &str) -> Interpreter {
    InterpreterBuilder::new(compile(&[(MAIN_UNIT, source)]))
        .print_handler(buffer_handler())
        .build()
}

#[test]
fn test_top_level_declarations_become_globals() {
    let mut interp = interpreter("var a = 1; fun f() {} class C {}");
    let main = interp.run_main().unwrap();
    assert_eq!(main.get_global("a"), Some(Value::Number(1.0)));
    assert!(matches!(main.get_global("f"), Some(Value::Function(_))));
    assert!(matches!(main.get_global("C"), Some(Value::Class(_))));
    assert!(matches!(main.get_global("print"), Some(Value::Native(_))));
}

#[test]
fn test_module_is_cached_after_run() {
    let mut interp = interpreter("var a = 1;");
    assert!(interp.module(MAIN_UNIT).is_none());
    let main = interp.run_main().unwrap();
    assert!(interp.module(MAIN_UNIT).is_some_and(|m| Heap::ptr_eq(&m, &main)));
}

#[test]
fn test_scoped_frame_restores_env() {
    let module = Heap::new(Module::new(Rc::new(CompilationUnit::failed("m"))));
    let mut frame = Frame::top_level(module);
    {
        let scoped = frame.scoped();
        assert_eq!(scoped.define("x", Value::Nil), Some(0));
        assert!(scoped.env.is_some());
    }
    assert!(frame.env.is_none());
    assert_eq!(frame.define("x", Value::Nil), None);
}

#[test]
fn test_nested_scopes_chain() {
    let module = Heap::new(Module::new(Rc::new(CompilationUnit::failed("m"))));
    let mut frame = Frame::top_level(module);
    let mut outer = frame.scoped();
    outer.define("a", Value::Number(1.0));
    let inner = outer.scoped();
    assert_eq!(inner.env.as_ref().map(Environment::chain_len), Some(2));
    assert_eq!(
        inner.env.as_ref().map(|env| env.get_at(1, 0)),
        Some(Ok(Value::Number(1.0)))
    );
}

#[test]
fn test_error_inside_nested_block_reports_its_line() {
    let mut interp = interpreter(
        "fun f() { { var a = 1; return a + nil; } }\n\
         f();",
    );
    let err = interp.run_main().unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::OperandMismatch);
    assert_eq!(err.line, 1);
}

#[test]
fn test_call_depth_limit() {
    let program = compile(&[(MAIN_UNIT, "fun f(n) { return f(n + 1); }\nf(0);")]);
    let mut interp = InterpreterBuilder::new(program)
        .print_handler(buffer_handler())
        .max_call_depth(50)
        .build();
    let err = interp.run_main().unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 50 });
    assert_eq!(interp.call_depth, 0);
}

#[test]
fn test_call_depth_resets_between_calls() {
    let mut interp = interpreter("fun f(n) { if (n > 0) f(n - 1); }\nf(10); f(10);");
    assert!(interp.run_main().is_ok());
    assert_eq!(interp.call_depth, 0);
}

#[test]
fn test_run_reports_runtime_diagnostic() {
    let mut interp = interpreter("var a = 1;\nprint a + \"x\";");
    let mut queue = DiagnosticQueue::new();
    assert!(!interp.run(&mut queue));
    assert!(queue.had_runtime_error());
    assert!(!queue.had_compile_error());
    assert_eq!(queue.diagnostics()[0].line(), 2);
}

#[test]
fn test_missing_entry_unit() {
    let mut interp = InterpreterBuilder::new(Rc::new(Program::new())).build();
    let err = interp.run_main().unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::ModuleFailed {
            name: MAIN_UNIT.to_string()
        }
    );
}

#[test]
fn test_debug_statement_prints_line() {
    let mut interp = interpreter("\n\ndebug;");
    interp.run_main().unwrap();
    assert_eq!(interp.print_handler().output(), "[DEBUG] Line 3\n");
}

#[test]
fn test_call_value_from_host() {
    let mut interp = interpreter("fun add(a, b) { return a + b; }");
    let main = interp.run_main().unwrap();
    let add = main.get_global("add").unwrap();
    let sum = interp.call_value(add.clone(), vec![Value::Number(1.0), Value::Number(2.0)], 0);
    assert_eq!(sum, Ok(Value::Number(3.0)));

    let err = interp.call_value(add, vec![], 7).unwrap_err();
    assert_eq!(err.message, "Expected 2 arguments but got 0.");
    assert_eq!(err.line, 7);
}
