//! Runs every sample program under `tests/lox/`. Each one checks itself
//! with `assert`, so a program passes when it compiles and runs cleanly.

use std::fs;
use std::path::{Path, PathBuf};

use lox_diagnostic::DiagnosticQueue;
use lox_eval::buffer_handler;
use loxc::{run_program, FileSourceLoader, MemorySourceLoader, Outcome};
use pretty_assertions::assert_eq;

fn samples_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("lox")
}

fn sample_files() -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(samples_dir())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "lox"))
        .collect();
    files.sort();
    files
}

#[test]
fn test_sample_programs_run_cleanly() {
    let files = sample_files();
    assert!(!files.is_empty(), "no sample programs found");

    let loader = FileSourceLoader::new(samples_dir());
    let mut failures = Vec::new();
    for file in &files {
        let source = fs::read_to_string(file).unwrap();
        let mut queue = DiagnosticQueue::new();
        let outcome = run_program(&source, &loader, buffer_handler(), &mut queue);
        if outcome != Outcome::Success {
            let name = file.file_name().unwrap().to_string_lossy().into_owned();
            for diagnostic in queue.diagnostics() {
                failures.push(format!("{name}: {diagnostic}"));
            }
        }
    }
    assert!(failures.is_empty(), "failures:\n{}", failures.join("\n"));
}

fn run(source: &str, loader: &MemorySourceLoader) -> (Outcome, String, Vec<String>) {
    let handler = buffer_handler();
    let mut queue = DiagnosticQueue::new();
    let outcome = run_program(source, loader, handler.clone(), &mut queue);
    let diagnostics = queue.diagnostics().iter().map(ToString::to_string).collect();
    (outcome, handler.take_output(), diagnostics)
}

#[test]
fn test_block_shadowing_example() {
    let (outcome, output, _) = run(
        "var a = 1; { var a = 2; print a; } print a;",
        &MemorySourceLoader::new(),
    );
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(output, "2\n1\n");
}

#[test]
fn test_super_example() {
    let (outcome, output, _) = run(
        "class A { greet() { print \"A\"; } } \
         class B < A { greet() { super.greet(); print \"B\"; } } \
         B().greet();",
        &MemorySourceLoader::new(),
    );
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(output, "A\nB\n");
}

#[test]
fn test_diamond_import_initializes_once() {
    let loader = MemorySourceLoader::new()
        .with("left", "import base as b;\nfun get() { return b.value; }")
        .with("right", "import base as b;\nfun set(v) { b.set(v); }")
        .with(
            "base",
            "print \"base init\";\nvar value = 0;\nfun set(v) { value = v; }",
        );
    let (outcome, output, _) = run(
        "import left as l;\nimport right as r;\nr.set(9);\nprint l.get();",
        &loader,
    );
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(output, "base init\n9\n");
}

#[test]
fn test_compile_errors_are_all_reported() {
    let (outcome, output, diagnostics) = run(
        "var a = 1;\nvar = 2;\n{ var b = b; }\nreturn 3;",
        &MemorySourceLoader::new(),
    );
    assert_eq!(outcome, Outcome::CompileError);
    assert_eq!(output, "");
    assert_eq!(
        diagnostics,
        vec![
            "[line 2] Error at '=': Expect variable name.".to_string(),
            "[line 3] Error at 'b': Can't read local variable in its own initializer.".to_string(),
            "[line 4] Error at 'return': Can't return from top-level code.".to_string(),
        ]
    );
}

#[test]
fn test_runtime_error_stops_execution() {
    let (outcome, output, diagnostics) = run(
        "print \"start\";\nvar x = 1 + \"x\";\nprint \"unreachable\";",
        &MemorySourceLoader::new(),
    );
    assert_eq!(outcome, Outcome::RuntimeError);
    assert_eq!(output, "start\n");
    assert_eq!(
        diagnostics,
        vec!["[line 2] Error: Operands must be two numbers or two strings.".to_string()]
    );
}
