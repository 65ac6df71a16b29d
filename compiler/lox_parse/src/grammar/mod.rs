//! Grammar rules, split into statements and expressions.

mod expr;
mod stmt;

use crate::ParseError;

type ParseResult<T> = Result<T, ParseError>;
