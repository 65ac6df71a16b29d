//! Module initialization and cross-module access.

use std::rc::Rc;

use lox_diagnostic::DiagnosticQueue;
use lox_eval::{buffer_handler, EvalError, EvalErrorKind, Interpreter, InterpreterBuilder, Value};
use lox_lexer::lex;
use lox_parse::parse;
use lox_resolve::{resolve, CompilationUnit, Program, MAIN_UNIT};
use pretty_assertions::assert_eq;

fn program(units: &[(&str, &str)]) -> Program {
    let mut queue = DiagnosticQueue::new();
    let mut program = Program::new();
    for (name, source) in units {
        let tokens = lex(source, &mut queue);
        let stmts = parse(&tokens, &mut queue);
        program.insert(resolve(*name, stmts, &mut queue));
    }
    assert!(!queue.has_errors(), "compile errors: {:?}", queue.diagnostics());
    program
}

fn interpreter(program: Program) -> Interpreter {
    InterpreterBuilder::new(Rc::new(program))
        .print_handler(buffer_handler())
        .build()
}

fn run(units: &[(&str, &str)]) -> (String, Result<(), EvalError>) {
    let mut interp = interpreter(program(units));
    let result = interp.run_main().map(|_| ());
    (interp.print_handler().take_output(), result)
}

#[test]
fn test_import_binds_module_alias() {
    let (output, result) = run(&[
        (MAIN_UNIT, "import lib.math as m;\nprint m.square(4);\nprint m;"),
        ("lib.math", "fun square(x) { return x * x; }"),
    ]);
    assert_eq!(result, Ok(()));
    assert_eq!(output, "16\n<module lib.math>\n");
}

#[test]
fn test_diamond_import_runs_module_once() {
    let (output, result) = run(&[
        (
            MAIN_UNIT,
            "import left as l;\nimport right as r;\nl.bump();\nprint r.read();",
        ),
        ("left", "import shared as s;\nfun bump() { s.bump(); }"),
        ("right", "import shared as s;\nfun read() { return s.count; }"),
        (
            "shared",
            "print \"init shared\";\nvar count = 0;\nfun bump() { count = count + 1; }",
        ),
    ]);
    assert_eq!(result, Ok(()));
    assert_eq!(output, "init shared\n1\n");
}

#[test]
fn test_importers_share_module_identity() {
    let (output, result) = run(&[
        (
            MAIN_UNIT,
            "import a as a;\nimport b as b;\nprint a.shared() == b.shared();",
        ),
        ("a", "import common as c;\nfun shared() { return c; }"),
        ("b", "import common as c;\nfun shared() { return c; }"),
        ("common", "var x = 1;"),
    ]);
    assert_eq!(result, Ok(()));
    assert_eq!(output, "true\n");
}

#[test]
fn test_module_globals_are_separate() {
    let (output, result) = run(&[
        (MAIN_UNIT, "var x = \"main\";\nimport other as o;\no.show();\nprint x;"),
        ("other", "var x = \"other\";\nfun show() { print x; }"),
    ]);
    assert_eq!(result, Ok(()));
    assert_eq!(output, "other\nmain\n");
}

#[test]
fn test_functions_keep_their_module_addresses() {
    // Node ids are per unit, so a closure from another module must resolve
    // locals through its own module's table.
    let (output, result) = run(&[
        (
            MAIN_UNIT,
            "import counter as c;\n{ var a = 1; var b = 2; print c.make()(); }",
        ),
        (
            "counter",
            "fun make() { var n = 41; return \\ n + 1; }",
        ),
    ]);
    assert_eq!(result, Ok(()));
    assert_eq!(output, "42\n");
}

#[test]
fn test_classes_across_modules() {
    let (output, result) = run(&[
        (
            MAIN_UNIT,
            "import shapes as s;\n\
             var Shape = s.Shape;\n\
             class Square < Shape { name() { return \"square \" + super.name(); } }\n\
             print Square().name();",
        ),
        ("shapes", "class Shape { name() { return \"shape\"; } }"),
    ]);
    assert_eq!(result, Ok(()));
    assert_eq!(output, "square shape\n");
}

#[test]
fn test_import_inside_block_is_local() {
    let (output, result) = run(&[
        (MAIN_UNIT, "{\n import util as u;\n print u.v;\n}\nprint u;"),
        ("util", "var v = 3;"),
    ]);
    assert_eq!(output, "3\n");
    let err = result.unwrap_err();
    assert_eq!(err.message, "Undefined variable 'u'.");
    assert_eq!(err.line, 5);
}

#[test]
fn test_mutual_imports_do_not_loop() {
    let (output, result) = run(&[
        (MAIN_UNIT, "import ping as p;\nprint p.name;"),
        ("ping", "var name = \"ping\";\nimport pong as q;"),
        ("pong", "import ping as p;\nprint p.name;"),
    ]);
    assert_eq!(result, Ok(()));
    assert_eq!(output, "ping\nping\n");
}

#[test]
fn test_undefined_module_member() {
    let (_, result) = run(&[
        (MAIN_UNIT, "import util as u;\n\nprint u.nope;"),
        ("util", "var v = 3;"),
    ]);
    let err = result.unwrap_err();
    assert_eq!(err.message, "Undefined variable 'nope'.");
    assert_eq!(err.line, 3);
}

#[test]
fn test_import_of_failed_module_is_a_runtime_error() {
    let mut program = program(&[(MAIN_UNIT, "print \"before\";\n\nimport broken as b;")]);
    program.insert(CompilationUnit::failed("broken"));
    let mut interp = interpreter(program);

    let err = interp.run_main().unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::ModuleFailed {
            name: "broken".into()
        }
    );
    assert_eq!(err.message, "Could not parse module broken.");
    assert_eq!(err.line, 3);
    assert_eq!(interp.print_handler().output(), "before\n");
}

#[test]
fn test_import_of_unknown_module_is_a_runtime_error() {
    let (_, result) = run(&[(MAIN_UNIT, "import nowhere.at.all as n;")]);
    assert_eq!(
        result.unwrap_err().message,
        "Could not parse module nowhere.at.all."
    );
}

#[test]
fn test_module_value_exposes_globals_to_host() {
    let mut interp = interpreter(program(&[
        (MAIN_UNIT, "import lib as l;"),
        ("lib", "var answer = 42;"),
    ]));
    interp.run_main().unwrap();
    let lib = interp.module("lib").unwrap();
    assert_eq!(lib.get_global("answer"), Some(Value::Number(42.0)));
    assert!(lib.get_global("print").is_some());
}
