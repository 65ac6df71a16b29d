//! Static resolver for Lox.
//!
//! One pass over a unit's statements that mirrors every scope the
//! interpreter will create at run time. Each variable, `this` and `super`
//! expression that refers to a local gets a lexical address
//! (`VariableLocation`); expressions without an address are globals of the
//! unit's module. Scope violations are reported to the diagnostic queue and
//! resolution carries on, so one pass surfaces all of them.

mod resolver;
mod unit;

pub use resolver::{resolve, Resolver};
pub use unit::{CompilationUnit, Program, VariableLocation, MAIN_UNIT};
