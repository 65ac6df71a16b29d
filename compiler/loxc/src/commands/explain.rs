//! The `explain` command: describe a diagnostic code.

use lox_diagnostic::ErrorCode;

use crate::exit_code;

/// Print what the error code `code_str` (`E2003`) means.
pub fn explain_error(code_str: &str) -> i32 {
    let Some(code) = ErrorCode::from_str_code(&code_str.to_ascii_uppercase()) else {
        eprintln!("Unknown error code: {code_str}");
        eprintln!();
        eprintln!("Codes have the format EXXXX where X is a digit.");
        eprintln!("Examples: E0001, E1001, E2001, E3001");
        return exit_code::USAGE;
    };
    println!("{}", explanation(code));
    exit_code::SUCCESS
}

pub(super) fn explanation(code: ErrorCode) -> String {
    let phase = if code.is_runtime() {
        "runtime error"
    } else {
        "compile error"
    };
    format!("{code}: {} ({phase})", code.description())
}
