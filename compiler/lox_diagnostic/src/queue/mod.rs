//! Diagnostic queue: the error collector every phase reports into.
//!
//! Features:
//! - Separate counts for compile-time and runtime errors (exit status 65 vs 70)
//! - Deduplication of identical reports
//! - Error limit to keep cascades readable
//!
//! Desugaring can present the same subexpression to the resolver twice
//! (`a.b += 1` evaluates `a` for both the read and the write), so identical
//! reports are expected and dropped.

use rustc_hash::FxHashSet;

use crate::{Diagnostic, ErrorCode, ErrorPosition};

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors kept (0 = unlimited).
    pub error_limit: usize,
    /// Drop a diagnostic identical to one already queued.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 100,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// Create a config with no limits (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

/// Collects diagnostics from every phase of one run.
#[derive(Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    seen: FxHashSet<Diagnostic>,
    compile_errors: usize,
    runtime_errors: usize,
    /// Errors dropped after the limit was reached.
    suppressed: usize,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            seen: FxHashSet::default(),
            compile_errors: 0,
            runtime_errors: 0,
            suppressed: 0,
            config,
        }
    }

    /// Queue a diagnostic. Returns `false` if it was dropped as a duplicate
    /// or because the error limit was reached.
    pub fn push(&mut self, diagnostic: Diagnostic) -> bool {
        if self.config.deduplicate && self.seen.contains(&diagnostic) {
            return false;
        }
        if diagnostic.is_error() {
            // Counts always grow so `had_*_error` stays truthful past the limit.
            if diagnostic.is_runtime() {
                self.runtime_errors += 1;
            } else {
                self.compile_errors += 1;
            }
            if self.limit_reached() {
                self.suppressed += 1;
                return false;
            }
        }
        if self.config.deduplicate {
            self.seen.insert(diagnostic.clone());
        }
        self.diagnostics.push(diagnostic);
        true
    }

    /// Report a lexer, parser, resolver or module-loading error.
    pub fn report_compile_error(
        &mut self,
        code: ErrorCode,
        position: ErrorPosition,
        message: impl Into<String>,
    ) {
        self.push(Diagnostic::error(code).with_message(message).at(position));
    }

    /// Report an error raised while a program runs.
    pub fn report_runtime_error(&mut self, code: ErrorCode, line: u32, message: impl Into<String>) {
        self.push(
            Diagnostic::error(code)
                .with_message(message)
                .at(ErrorPosition::line(line)),
        );
    }

    pub fn had_compile_error(&self) -> bool {
        self.compile_errors > 0
    }

    pub fn had_runtime_error(&self) -> bool {
        self.runtime_errors > 0
    }

    pub fn has_errors(&self) -> bool {
        self.compile_errors + self.runtime_errors > 0
    }

    /// Compile-time errors reported so far, including suppressed ones.
    pub fn compile_error_count(&self) -> usize {
        self.compile_errors
    }

    pub fn error_count(&self) -> usize {
        self.compile_errors + self.runtime_errors
    }

    pub fn suppressed_count(&self) -> usize {
        self.suppressed
    }

    fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count() > self.config.error_limit
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Take every queued diagnostic: compile-time ones first, each group in
    /// report order.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let mut all = std::mem::take(&mut self.diagnostics);
        all.sort_by_key(Diagnostic::is_runtime);
        all
    }

    /// Forget everything reported so far.
    pub fn reset(&mut self) {
        self.diagnostics.clear();
        self.seen.clear();
        self.compile_errors = 0;
        self.runtime_errors = 0;
        self.suppressed = 0;
    }
}
