//! Lox compiler driver.
//!
//! Ties the phases together for whole programs:
//! - [`SourceLoader`]: where imported module text comes from
//! - [`compile`]: breadth-first compilation of the entry unit and every
//!   module it transitively imports, each at most once
//! - [`run_program`]: compile, then interpret if compilation succeeded
//! - [`commands`]: the `lox` subcommands
//!
//! Exit statuses follow the sysexits convention the Lox tools have always
//! used; see [`exit_code`].

pub mod commands;
mod compile;
mod loader;
mod tracing_setup;

pub use compile::{compile, compile_unit, run_program, Outcome};
pub use loader::{FileSourceLoader, LoadError, MemorySourceLoader, SourceLoader};
pub use tracing_setup::init_tracing;

/// Process exit statuses of the `lox` binary.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    /// Bad command line.
    pub const USAGE: i32 = 64;
    /// A lex, parse, resolve or module-loading error.
    pub const COMPILE_ERROR: i32 = 65;
    /// The input file could not be read.
    pub const NO_INPUT: i32 = 66;
    /// A runtime error.
    pub const RUNTIME_ERROR: i32 = 70;
}
