//! The `check` command: compile without running.

use std::path::Path;

use lox_diagnostic::DiagnosticQueue;

use super::{emit_diagnostics, module_root, read_file};
use crate::{compile, exit_code, FileSourceLoader};

/// Compile the program at `path` and every module it imports.
pub fn check_file(path: &str, root: Option<&Path>) -> i32 {
    let Some(source) = read_file(path) else {
        return exit_code::NO_INPUT;
    };
    let loader = FileSourceLoader::new(module_root(path, root));
    let mut queue = DiagnosticQueue::new();
    let program = compile(&source, &loader, &mut queue);

    if queue.had_compile_error() {
        emit_diagnostics(&mut queue, true);
        return exit_code::COMPILE_ERROR;
    }
    let units = program.len();
    let noun = if units == 1 { "unit" } else { "units" };
    println!("{path}: {units} {noun} compiled, no errors");
    exit_code::SUCCESS
}
