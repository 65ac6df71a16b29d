//! Command handlers for the `lox` CLI.
//!
//! Each handler returns the process exit status; `main` does the exiting.
//! Shared helpers for reading input and rendering diagnostics live here.

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use lox_diagnostic::{ColorMode, DiagnosticEmitter, DiagnosticQueue, TerminalEmitter};

mod check;
mod debug;
mod explain;
mod run;

pub use check::check_file;
pub use debug::{lex_file, parse_file};
pub use explain::explain_error;
pub use run::run_file;

/// Read a source file, printing a readable error on failure.
fn read_file(path: &str) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            let msg = match e.kind() {
                io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
                io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            None
        }
    }
}

/// Directory imports are resolved against: `--root`, else the directory
/// holding the entry file.
fn module_root(path: &str, root: Option<&Path>) -> PathBuf {
    match root {
        Some(root) => root.to_path_buf(),
        None => Path::new(path)
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
    }
}

/// Print every queued diagnostic to stderr.
fn emit_diagnostics(queue: &mut DiagnosticQueue, summary: bool) {
    let is_tty = io::stderr().is_terminal();
    let mut emitter = TerminalEmitter::stderr(ColorMode::Auto, is_tty);
    let error_count = queue.error_count();
    let suppressed = queue.suppressed_count();
    emitter.emit_all(&queue.flush());
    if suppressed > 0 {
        eprintln!("({suppressed} further errors not shown)");
    }
    if summary {
        emitter.emit_summary(error_count);
    }
    emitter.flush();
}

#[cfg(test)]
mod tests;
