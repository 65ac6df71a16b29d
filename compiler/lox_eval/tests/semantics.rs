//! End-to-end semantics: source text through lexer, parser, resolver and
//! interpreter, checking what the program prints.

use std::rc::Rc;

use lox_diagnostic::DiagnosticQueue;
use lox_eval::{buffer_handler, EvalError, EvalErrorKind, InterpreterBuilder};
use lox_lexer::lex;
use lox_parse::parse;
use lox_resolve::{resolve, Program, MAIN_UNIT};
use pretty_assertions::assert_eq;

/// Compile `units` (the first is the entry) and run them, returning the
/// printed output and the runtime error, if any.
fn run_units(units: &[(&str, &str)]) -> (String, Option<EvalError>) {
    let mut queue = DiagnosticQueue::new();
    let mut program = Program::new();
    for (i, (name, source)) in units.iter().enumerate() {
        let name = if i == 0 { MAIN_UNIT } else { name };
        let tokens = lex(source, &mut queue);
        let stmts = parse(&tokens, &mut queue);
        program.insert(resolve(name, stmts, &mut queue));
    }
    assert!(!queue.has_errors(), "compile errors: {:?}", queue.diagnostics());

    let handler = buffer_handler();
    let mut interpreter = InterpreterBuilder::new(Rc::new(program))
        .print_handler(handler.clone())
        .build();
    let error = interpreter.run_main().err();
    (handler.take_output(), error)
}

fn run(source: &str) -> String {
    let (output, error) = run_units(&[(MAIN_UNIT, source)]);
    assert!(error.is_none(), "runtime error: {error:?}");
    output
}

fn run_err(source: &str) -> EvalError {
    let (_, error) = run_units(&[(MAIN_UNIT, source)]);
    error.unwrap_or_else(|| panic!("expected a runtime error"))
}

fn lines(output: &str) -> Vec<&str> {
    output.lines().collect()
}

// Scoping

#[test]
fn test_block_shadowing() {
    let output = run("var a = 1; { var a = 2; print a; } print a;");
    assert_eq!(lines(&output), vec!["2", "1"]);
}

#[test]
fn test_closure_sees_later_assignment_to_captured_variable() {
    let output = run(
        "var f;
         {
           var a = 1;
           fun show() { print a; }
           f = show;
           a = 2;
         }
         f();",
    );
    assert_eq!(output, "2\n");
}

#[test]
fn test_closures_bind_lexically() {
    let output = run(
        "var a = \"global\";
         {
           fun show() { print a; }
           show();
           var a = \"block\";
           show();
         }",
    );
    assert_eq!(lines(&output), vec!["global", "global"]);
}

#[test]
fn test_counter_closure() {
    let output = run(
        "fun makeCounter() {
           var i = 0;
           fun count() { i = i + 1; return i; }
           return count;
         }
         var counter = makeCounter();
         counter();
         print counter();",
    );
    assert_eq!(output, "2\n");
}

#[test]
fn test_globals_may_be_redeclared() {
    assert_eq!(run("var a = 1; var a = 2; print a;"), "2\n");
}

#[test]
fn test_undefined_global() {
    let err = run_err("print missing;");
    assert_eq!(err.message, "Undefined variable 'missing'.");
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "missing".into()
        }
    );

    let err = run_err("\nmissing = 1;");
    assert_eq!(err.message, "Undefined variable 'missing'.");
    assert_eq!(err.line, 2);
}

// Operators

#[test]
fn test_arithmetic_and_strings() {
    assert_eq!(run("print 1 + 2 * 3 - 4 / 2;"), "5\n");
    assert_eq!(run("print \"a\" + \"b\";"), "ab\n");
    assert_eq!(run("print 1 / 0;"), "Infinity\n");
    assert_eq!(run("print -(1 / 0);"), "-Infinity\n");
    assert_eq!(run("print 0 / 0;"), "NaN\n");
}

#[test]
fn test_mixed_addition_is_a_type_error() {
    let err = run_err("print 1 + \"x\";");
    assert_eq!(err.kind, EvalErrorKind::OperandMismatch);
    assert_eq!(err.message, "Operands must be two numbers or two strings.");
}

#[test]
fn test_logical_operators_yield_operands() {
    let output = run(
        "print nil or \"yes\";
         print 1 and 2;
         print false and missing;
         print true or missing;",
    );
    assert_eq!(lines(&output), vec!["yes", "2", "false", "true"]);
}

#[test]
fn test_ternary_evaluates_one_branch() {
    let output = run("print true ? 1 : missing; print nil ? missing : 2;");
    assert_eq!(lines(&output), vec!["1", "2"]);
}

#[test]
fn test_truthiness() {
    let output = run("print !0; print !\"\"; print !nil; print !false;");
    assert_eq!(lines(&output), vec!["false", "false", "true", "true"]);
}

#[test]
fn test_equality() {
    let output = run(
        "print nil == nil;
         print 1 == \"1\";
         print \"a\" == \"a\";
         print nil == false;
         print 2 != 2;",
    );
    assert_eq!(lines(&output), vec!["true", "false", "true", "false", "false"]);
}

#[test]
fn test_compound_assignment() {
    let output = run(
        "var a = 10; a += 5; a -= 3; a *= 2; a /= 4; print a;
         var s = \"x\"; s += \"y\"; print s;",
    );
    assert_eq!(lines(&output), vec!["6", "xy"]);
}

// Control flow

#[test]
fn test_while_and_for() {
    let output = run(
        "var i = 0; while (i < 3) { print i; i = i + 1; }
         for (var j = 0; j < 2; j = j + 1) print j * 10;",
    );
    assert_eq!(lines(&output), vec!["0", "1", "2", "0", "10"]);
}

#[test]
fn test_break_exits_innermost_loop() {
    let output = run(
        "for (var i = 0; i < 3; i += 1) {
           var j = 0;
           while (true) {
             if (j == 2) break;
             j += 1;
           }
           print i + j;
           if (i == 1) break;
         }",
    );
    assert_eq!(lines(&output), vec!["2", "3"]);
}

#[test]
fn test_return_unwinds_through_loops() {
    let output = run(
        "fun find() {
           for (var i = 0; i < 10; i += 1) {
             while (true) { if (i == 3) return i; break; }
           }
           return -1;
         }
         print find();",
    );
    assert_eq!(output, "3\n");
}

#[test]
fn test_function_without_return_yields_nil() {
    assert_eq!(run("fun f() {} print f();"), "nil\n");
    assert_eq!(run("fun f() { return; } print f();"), "nil\n");
}

#[test]
fn test_recursion() {
    let output = run(
        "fun fib(n) { if (n < 2) return n; return fib(n - 1) + fib(n - 2); }
         print fib(15);",
    );
    assert_eq!(output, "610\n");
}

// Calls

#[test]
fn test_arity_mismatch() {
    let err = run_err("fun f(a, b) {}\nf(1);");
    assert_eq!(err.message, "Expected 2 arguments but got 1.");
    assert_eq!(err.kind, EvalErrorKind::ArityMismatch { expected: 2, got: 1 });
    assert_eq!(err.line, 2);
}

#[test]
fn test_calling_non_callable() {
    let err = run_err("\"not a function\"();");
    assert_eq!(err.message, "Can only call functions and classes.");
}

#[test]
fn test_arguments_evaluate_left_to_right() {
    let output = run(
        "fun say(x) { print x; return x; }
         fun three(a, b, c) {}
         three(say(1), say(2), say(3));",
    );
    assert_eq!(lines(&output), vec!["1", "2", "3"]);
}

#[test]
fn test_lambdas_and_anonymous_functions() {
    let output = run(
        "var add = \\a, b a + b;
         print add(2, 3);
         var twice = fun (f, x) { return f(f(x)); };
         print twice(\\n n * 2, 5);
         print \\ 1;",
    );
    assert_eq!(lines(&output), vec!["5", "20", "<fn>"]);
}

#[test]
fn test_stringify_callables() {
    let output = run("fun f() {} class C {} print f; print C; print C(); print clock;");
    assert_eq!(
        lines(&output),
        vec!["<fn f>", "<cls C>", "C instance", "<native fn clock>"]
    );
}

#[test]
fn test_deep_recursion_overflows_cleanly() {
    let err = run_err("fun f() { f(); } f();");
    assert!(matches!(err.kind, EvalErrorKind::StackOverflow { .. }));
}

// Classes

#[test]
fn test_fields_and_methods() {
    let output = run(
        "class Point {
           init(x, y) { this.x = x; this.y = y; }
           sum() { return this.x + this.y; }
         }
         var p = Point(1, 2);
         print p.sum();
         p.x = 10;
         print p.sum();",
    );
    assert_eq!(lines(&output), vec!["3", "12"]);
}

#[test]
fn test_init_yields_instance() {
    let output = run(
        "class A { init() { this.v = 1; } }
         var a = A();
         print a;
         print a.init() == a;
         class B { init() { return; } }
         print B();",
    );
    assert_eq!(lines(&output), vec!["A instance", "true", "B instance"]);
}

#[test]
fn test_inherited_method_binds_subclass_instance() {
    let output = run(
        "class A { greet() { print this.name; } }
         class B < A { init() { this.name = \"b\"; } }
         B().greet();",
    );
    assert_eq!(output, "b\n");
}

#[test]
fn test_super_call() {
    let output = run(
        "class A { greet() { print \"A\"; } }
         class B < A { greet() { super.greet(); print \"B\"; } }
         B().greet();",
    );
    assert_eq!(lines(&output), vec!["A", "B"]);
}

#[test]
fn test_super_from_nested_closure() {
    let output = run(
        "class A { name() { return \"A\"; } }
         class B < A {
           name() {
             fun inner() { return \\ super.name() + \"B\"; }
             return inner()();
           }
         }
         class C < B {}
         print C().name();",
    );
    assert_eq!(output, "AB\n");
}

#[test]
fn test_super_skips_own_override_in_grandchild() {
    let output = run(
        "class A { m() { return \"A\"; } }
         class B < A { m() { return \"B\" + super.m(); } }
         class C < B { m() { return \"C\" + super.m(); } }
         print C().m();",
    );
    assert_eq!(output, "CBA\n");
}

#[test]
fn test_bound_method_remembers_receiver() {
    let output = run(
        "class Box { init(v) { this.v = v; } get() { return this.v; } }
         var m = Box(7).get;
         print m();",
    );
    assert_eq!(output, "7\n");
}

#[test]
fn test_fields_shadow_methods() {
    let output = run(
        "class A { m() { return 1; } }
         var a = A();
         a.m = \\ 2;
         print a.m();",
    );
    assert_eq!(output, "2\n");
}

#[test]
fn test_local_class_can_reference_itself() {
    let output = run(
        "{
           class Node {
             make() { return Node(); }
           }
           print Node().make();
         }",
    );
    assert_eq!(output, "Node instance\n");
}

#[test]
fn test_class_errors() {
    assert_eq!(
        run_err("var NotClass = 1;\nclass A < NotClass {}").message,
        "Superclass must be a class."
    );
    assert_eq!(
        run_err("class A {}\nA().missing;").message,
        "Undefined property 'missing'."
    );
    assert_eq!(
        run_err("class A {} class B < A { m() { return super.missing; } }\nB().m();").message,
        "Undefined property 'missing'."
    );
    assert_eq!(
        run_err("var x = 1;\nx.y;").message,
        "Only instances or modules have properties."
    );
    assert_eq!(run_err("var x = 1;\nx.y = 2;").message, "Only instances have fields.");
    assert_eq!(
        run_err("class A { init(a) {} }\nA();").message,
        "Expected 1 arguments but got 0."
    );
}

// Arrays

#[test]
fn test_arrays() {
    let output = run(
        "var a = [3]{};
         print a;
         a[0] = 1;
         a[1.9] = \"two\";
         print a;
         print a[1];
         a[2] = a[0] + 1;
         print a[2];",
    );
    assert_eq!(
        lines(&output),
        vec!["[nil, nil, nil]", "[1, two, nil]", "two", "2"]
    );
}

#[test]
fn test_arrays_are_shared_by_reference() {
    let output = run(
        "var a = [1]{};
         var b = a;
         b[0] = \"x\";
         print a[0];
         print a == b;",
    );
    assert_eq!(lines(&output), vec!["x", "true"]);
}

#[test]
fn test_array_errors() {
    let err = run_err("var a = [2]{};\nprint a[2];");
    assert_eq!(err.kind, EvalErrorKind::IndexOutOfBounds { index: 2, len: 2 });
    assert_eq!(err.line, 2);
    assert_eq!(
        run_err("var a = [2]{}; a[-1] = 0;").message,
        "Array index -1 out of bounds for length 2."
    );
    assert_eq!(
        run_err("var a = [2]{}; a[\"0\"];").message,
        "Array index must be a number."
    );
    assert_eq!(run_err("var a = 1; a[0];").message, "Cannot index non array object.");
    assert_eq!(run_err("[\"3\"]{};").message, "Array size must be a number.");
    assert_eq!(run_err("[-1]{};").message, "Array size can't be negative.");

    let too_large = run_err(
        "var n = 1;\nfor (var i = 0; i < 40; i = i + 1) n = n * 10;\nvar a = [n]{};",
    );
    assert_eq!(too_large.kind, EvalErrorKind::InvalidArrayOperand);
    assert_eq!(too_large.line, 3);
    assert_eq!(too_large.message, "Array size can't exceed 16777216.");
    assert_eq!(run_err("[1 / 0]{};").kind, EvalErrorKind::InvalidArrayOperand);
}

// Natives

#[test]
fn test_assert_native() {
    assert_eq!(run("assert(1 < 2, \"fine\");"), "");
    let err = run_err("\nassert(1 > 2, \"math is broken\");");
    assert_eq!(err.kind, EvalErrorKind::AssertionFailed);
    assert_eq!(err.message, "math is broken");
    assert_eq!(err.line, 2);
}

#[test]
fn test_print_as_function_value() {
    let output = run("var p = print; p(\"via alias\"); print(1);");
    assert_eq!(lines(&output), vec!["via alias", "1"]);
}

#[test]
fn test_output_before_error_is_kept() {
    let (output, error) = run_units(&[(MAIN_UNIT, "print 1;\nprint -\"x\";\nprint 2;")]);
    assert_eq!(output, "1\n");
    let error = error.unwrap_or_else(|| panic!("expected a runtime error"));
    assert_eq!(error.message, "Operand must be a number.");
    assert_eq!(error.line, 2);
}
