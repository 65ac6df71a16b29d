use std::path::{Path, PathBuf};

use lox_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

use super::explain::explanation;
use super::*;
use crate::exit_code;

#[test]
fn test_module_root_defaults_to_entry_directory() {
    assert_eq!(module_root("proj/src/main.lox", None), PathBuf::from("proj/src"));
    assert_eq!(module_root("main.lox", None), PathBuf::from(""));
    assert_eq!(
        module_root("proj/main.lox", Some(Path::new("/lib"))),
        PathBuf::from("/lib")
    );
}

#[test]
fn test_explanation_text() {
    assert_eq!(
        explanation(ErrorCode::E2002),
        "E2002: local variable read in its own initializer (compile error)"
    );
    assert!(explanation(ErrorCode::E3001).ends_with("(runtime error)"));
}

#[test]
fn test_explain_exit_codes() {
    assert_eq!(explain_error("e2001"), exit_code::SUCCESS);
    assert_eq!(explain_error("E9999"), exit_code::USAGE);
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.lox");
    let missing = missing.to_string_lossy();
    assert_eq!(run_file(&missing, None), exit_code::NO_INPUT);
    assert_eq!(check_file(&missing, None), exit_code::NO_INPUT);
    assert_eq!(lex_file(&missing), exit_code::NO_INPUT);
    assert_eq!(parse_file(&missing), exit_code::NO_INPUT);
}

#[test]
fn test_check_and_run_exit_codes() {
    let dir = tempfile::tempdir().unwrap();
    let ok = dir.path().join("ok.lox");
    let bad = dir.path().join("bad.lox");
    let crash = dir.path().join("crash.lox");
    std::fs::write(&ok, "var a = 1;").unwrap();
    std::fs::write(&bad, "var = 1;").unwrap();
    std::fs::write(&crash, "var a = -nil;").unwrap();

    assert_eq!(check_file(&ok.to_string_lossy(), None), exit_code::SUCCESS);
    assert_eq!(check_file(&bad.to_string_lossy(), None), exit_code::COMPILE_ERROR);
    assert_eq!(run_file(&bad.to_string_lossy(), None), exit_code::COMPILE_ERROR);
    assert_eq!(run_file(&crash.to_string_lossy(), None), exit_code::RUNTIME_ERROR);
    assert_eq!(parse_file(&bad.to_string_lossy()), exit_code::COMPILE_ERROR);
    assert_eq!(lex_file(&bad.to_string_lossy()), exit_code::SUCCESS);
}
