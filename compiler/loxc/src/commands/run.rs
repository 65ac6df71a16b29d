//! The `run` command: compile a program and its imports, then execute it.

use std::path::Path;

use lox_diagnostic::DiagnosticQueue;
use lox_eval::stdout_handler;
use tracing::debug;

use super::{emit_diagnostics, module_root, read_file};
use crate::{exit_code, run_program, FileSourceLoader};

/// Run the Lox program at `path`.
///
/// Imports resolve under `root`, defaulting to the file's directory.
pub fn run_file(path: &str, root: Option<&Path>) -> i32 {
    let Some(source) = read_file(path) else {
        return exit_code::NO_INPUT;
    };
    let loader = FileSourceLoader::new(module_root(path, root));
    debug!(path, root = %loader.root().display(), "running program");

    let mut queue = DiagnosticQueue::new();
    let outcome = run_program(&source, &loader, stdout_handler(), &mut queue);
    emit_diagnostics(&mut queue, false);
    outcome.exit_code()
}
