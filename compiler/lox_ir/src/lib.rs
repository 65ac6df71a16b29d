//! Lox IR - syntax types shared by every phase.
//!
//! This crate contains the core data structures of the Lox toolchain:
//! - Spans and line numbers for source locations
//! - Tokens produced by the lexer
//! - AST nodes (`Stmt`, `Expr`, `FunctionDecl`, `ClassDecl`)
//! - `NodeId`, the stable identity the resolver keys addresses on
//!
//! Every expression node carries a `NodeId` assigned at parse time. The
//! resolver's address table and the interpreter both key on it, so no phase
//! relies on pointer identity of AST nodes.

pub mod ast;
mod node_id;
mod span;
mod token;

pub use ast::{
    qualified_name, AstPrinter, BinaryOp, ClassDecl, Expr, ExprKind, FunctionDecl, Ident,
    LogicalOp, Stmt, UnaryOp,
};
pub use node_id::{NodeId, NodeIdGen};
pub use span::Span;
pub use token::{Literal, Token, TokenKind};
