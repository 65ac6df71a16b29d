//! Lox CLI.

use std::path::PathBuf;

use loxc::commands::{check_file, explain_error, lex_file, parse_file, run_file};
use loxc::exit_code;

fn main() {
    loxc::init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();
    std::process::exit(dispatch(args));
}

fn dispatch(args: Vec<String>) -> i32 {
    let (root, args) = match take_root(args) {
        Ok(split) => split,
        Err(message) => return usage_error(&message),
    };
    let root = root.as_deref();

    let Some(command) = args.first() else {
        print_usage();
        return exit_code::USAGE;
    };
    let operand = args.get(1).map(String::as_str);
    if args.len() > 2 {
        return usage_error(&format!("unexpected argument '{}'", args[2]));
    }

    match (command.as_str(), operand) {
        ("run", Some(path)) => run_file(path, root),
        ("check", Some(path)) => check_file(path, root),
        ("lex", Some(path)) => lex_file(path),
        ("parse", Some(path)) => parse_file(path),
        ("explain" | "--explain", Some(code)) => explain_error(code),
        ("run" | "check" | "lex" | "parse", None) => {
            usage_error(&format!("missing file for '{command}'"))
        }
        ("explain" | "--explain", None) => usage_error("missing error code, e.g. E2001"),
        ("help" | "--help" | "-h", None) => {
            print_usage();
            exit_code::SUCCESS
        }
        ("version" | "--version" | "-V", None) => {
            println!("lox {}", env!("CARGO_PKG_VERSION"));
            exit_code::SUCCESS
        }
        (path, None) if path.ends_with(".lox") => run_file(path, root),
        _ => usage_error(&format!("unknown command '{command}'")),
    }
}

/// Pull `--root <dir>` (or `--root=<dir>`) out of the argument list.
fn take_root(args: Vec<String>) -> Result<(Option<PathBuf>, Vec<String>), String> {
    let mut root = None;
    let mut rest = Vec::with_capacity(args.len());
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--root" {
            let dir = iter.next().ok_or("'--root' needs a directory")?;
            root = Some(PathBuf::from(dir));
        } else if let Some(dir) = arg.strip_prefix("--root=") {
            root = Some(PathBuf::from(dir));
        } else {
            rest.push(arg);
        }
    }
    Ok((root, rest))
}

fn usage_error(message: &str) -> i32 {
    eprintln!("error: {message}");
    eprintln!();
    print_usage();
    exit_code::USAGE
}

fn print_usage() {
    eprintln!("Lox - a tree-walking interpreter");
    eprintln!();
    eprintln!("Usage: lox [--root <dir>] <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <file.lox>      Compile and run a program");
    eprintln!("  <file.lox>          Same as 'run'");
    eprintln!("  check <file.lox>    Compile a program and its imports without running");
    eprintln!("  lex <file.lox>      Print the token stream");
    eprintln!("  parse <file.lox>    Print the syntax tree");
    eprintln!("  explain <code>      Describe an error code (e.g. E2001)");
    eprintln!("  help                Show this help message");
    eprintln!("  version             Show version information");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --root <dir>        Directory imports are resolved against");
    eprintln!("                      (default: the directory of the entry file)");
    eprintln!();
    eprintln!("Exit status: 0 ok, 64 usage, 65 compile error, 66 unreadable input,");
    eprintln!("70 runtime error. Set RUST_LOG (e.g. RUST_LOG=lox_eval=debug) for traces.");
}
