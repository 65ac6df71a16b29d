//! Debug commands: `lex` and `parse` for inspecting the front end.

use lox_diagnostic::DiagnosticQueue;
use lox_ir::AstPrinter;
use lox_lexer::lex;
use lox_parse::parse;

use super::{emit_diagnostics, read_file};
use crate::exit_code;

/// Print the token stream of one file.
pub fn lex_file(path: &str) -> i32 {
    let Some(content) = read_file(path) else {
        return exit_code::NO_INPUT;
    };
    let mut queue = DiagnosticQueue::new();
    let tokens = lex(&content, &mut queue);

    println!("Tokens for '{}' ({} tokens):", path, tokens.len());
    for token in &tokens {
        println!("  {token:?}");
    }
    finish(&mut queue)
}

/// Print the syntax tree of one file, one top-level statement per line.
pub fn parse_file(path: &str) -> i32 {
    let Some(content) = read_file(path) else {
        return exit_code::NO_INPUT;
    };
    let mut queue = DiagnosticQueue::new();
    let tokens = lex(&content, &mut queue);
    let statements = parse(&tokens, &mut queue);

    let tree = AstPrinter::print_program(&statements);
    if !tree.is_empty() {
        println!("{tree}");
    }
    finish(&mut queue)
}

fn finish(queue: &mut DiagnosticQueue) -> i32 {
    if queue.had_compile_error() {
        emit_diagnostics(queue, true);
        exit_code::COMPILE_ERROR
    } else {
        exit_code::SUCCESS
    }
}
