//! Whole-program compilation.

use std::collections::VecDeque;
use std::rc::Rc;

use lox_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode, ErrorPosition};
use lox_eval::{InterpreterBuilder, SharedPrintHandler};
use lox_ir::{qualified_name, Stmt};
use lox_lexer::lex;
use lox_parse::parse;
use lox_resolve::{resolve, CompilationUnit, Program, MAIN_UNIT};
use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::{exit_code, SourceLoader};

/// How a program run ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    CompileError,
    RuntimeError,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Success => exit_code::SUCCESS,
            Outcome::CompileError => exit_code::COMPILE_ERROR,
            Outcome::RuntimeError => exit_code::RUNTIME_ERROR,
        }
    }
}

/// Lex, parse and resolve one source text.
///
/// Diagnostics land in `queue`, tagged with `name` unless this is the
/// entry unit. The unit is marked failed if any phase reported an error.
pub fn compile_unit(name: &str, source: &str, queue: &mut DiagnosticQueue) -> CompilationUnit {
    let mut local = DiagnosticQueue::new();
    let tokens = lex(source, &mut local);
    let statements = parse(&tokens, &mut local);
    let mut unit = resolve(name, statements, &mut local);
    unit.has_errors |= local.had_compile_error();

    for diagnostic in local.flush() {
        queue.push(tag(diagnostic, name));
    }
    unit
}

fn tag(diagnostic: Diagnostic, unit: &str) -> Diagnostic {
    if unit == MAIN_UNIT {
        diagnostic
    } else {
        diagnostic.in_file(unit)
    }
}

/// A module waiting to be compiled, and who asked for it first.
struct Request {
    name: String,
    importer: String,
    line: u32,
}

/// Compile `entry_source` and, breadth first, every module it imports.
///
/// Each module name is compiled once no matter how many units import it.
/// A module that cannot be loaded or compiled is reported at the first
/// import that named it and recorded as a failed unit, so importing it at
/// run time is an error.
#[tracing::instrument(level = "debug", skip_all)]
pub fn compile(
    entry_source: &str,
    loader: &dyn SourceLoader,
    queue: &mut DiagnosticQueue,
) -> Program {
    let mut program = Program::new();
    let mut pending = VecDeque::new();
    let mut seen = FxHashSet::default();
    seen.insert(MAIN_UNIT.to_string());

    let entry = compile_unit(MAIN_UNIT, entry_source, queue);
    enqueue_imports(&entry, &mut pending, &mut seen);
    program.insert(entry);

    while let Some(request) = pending.pop_front() {
        debug!(module = %request.name, importer = %request.importer, "compiling module");
        let unit = match loader.load_source(&request.name) {
            Ok(source) => {
                let unit = compile_unit(&request.name, &source, queue);
                if unit.has_errors {
                    report_module_error(queue, ErrorCode::E4002, &request, None);
                }
                unit
            }
            Err(err) => {
                warn!(module = %request.name, error = %err, "module source unavailable");
                report_module_error(queue, ErrorCode::E4001, &request, Some(err.to_string()));
                CompilationUnit::failed(request.name.as_str())
            }
        };
        enqueue_imports(&unit, &mut pending, &mut seen);
        program.insert(unit);
    }

    debug!(units = program.len(), errors = program.has_errors(), "compiled program");
    program
}

fn enqueue_imports(
    unit: &CompilationUnit,
    pending: &mut VecDeque<Request>,
    seen: &mut FxHashSet<String>,
) {
    for name in &unit.imports {
        if seen.insert(name.clone()) {
            pending.push_back(Request {
                name: name.clone(),
                importer: unit.name.clone(),
                line: import_line(&unit.statements, name).unwrap_or(0),
            });
        }
    }
}

fn report_module_error(
    queue: &mut DiagnosticQueue,
    code: ErrorCode,
    request: &Request,
    note: Option<String>,
) {
    let mut diagnostic = Diagnostic::error(code)
        .with_message(format!("Could not parse module {}.", request.name))
        .at(ErrorPosition::line(request.line));
    if let Some(note) = note {
        diagnostic = diagnostic.with_note(note);
    }
    queue.push(tag(diagnostic, &request.importer));
}

/// Line of the first `import` of `name` in `statements`, at any depth.
fn import_line(statements: &[Stmt], name: &str) -> Option<u32> {
    statements.iter().find_map(|stmt| match stmt {
        Stmt::Import { path, .. } if qualified_name(path) == name => {
            path.first().map(|segment| segment.line)
        }
        Stmt::Block(body) => import_line(body, name),
        Stmt::If {
            then_branch,
            else_branch,
            ..
        } => import_line(std::slice::from_ref(then_branch.as_ref()), name).or_else(|| {
            else_branch
                .as_deref()
                .and_then(|branch| import_line(std::slice::from_ref(branch), name))
        }),
        Stmt::While { body, .. } => import_line(std::slice::from_ref(body.as_ref()), name),
        Stmt::Function(decl) => import_line(&decl.body, name),
        Stmt::Class(class) => class
            .methods
            .iter()
            .find_map(|method| import_line(&method.body, name)),
        _ => None,
    })
}

/// Compile `entry_source` and run it if it compiled cleanly.
///
/// `print` output goes to `print_handler`; every diagnostic lands in
/// `queue`.
pub fn run_program(
    entry_source: &str,
    loader: &dyn SourceLoader,
    print_handler: SharedPrintHandler,
    queue: &mut DiagnosticQueue,
) -> Outcome {
    let program = compile(entry_source, loader, queue);
    if queue.had_compile_error() || program.has_errors() {
        return Outcome::CompileError;
    }

    let mut interpreter = InterpreterBuilder::new(Rc::new(program))
        .print_handler(print_handler)
        .build();
    if interpreter.run(queue) {
        Outcome::Success
    } else {
        Outcome::RuntimeError
    }
}
