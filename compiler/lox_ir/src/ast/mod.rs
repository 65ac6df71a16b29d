//! AST node types.
//!
//! Statements and expressions are closed enums; every phase matches on them
//! exhaustively. Function declarations sit behind `Rc` because runtime
//! closures keep a handle to the body they execute.

mod operators;
mod printer;

use std::rc::Rc;

use crate::{Literal, NodeId, Span};

pub use operators::{BinaryOp, LogicalOp, UnaryOp};
pub use printer::AstPrinter;

/// A name as written in source, with where it was written.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ident {
    pub name: String,
    pub line: u32,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, line: u32, span: Span) -> Self {
        Ident {
            name: name.into(),
            line,
            span,
        }
    }

    /// An identifier the parser made up (desugaring), with no source span.
    pub fn synthetic(name: &str, line: u32) -> Self {
        Ident::new(name, line, Span::DUMMY)
    }
}

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    /// Key into the resolver's address table.
    pub id: NodeId,
    /// Line reported by runtime errors raised while evaluating this node.
    pub line: u32,
    pub kind: ExprKind,
}

impl Expr {
    pub fn new(id: NodeId, line: u32, kind: ExprKind) -> Self {
        Expr { id, line, kind }
    }

    /// Whether this expression may appear on the left of `=`.
    pub fn is_assignable(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Variable(_) | ExprKind::Get { .. } | ExprKind::ArrayIndex { .. }
        )
    }
}

/// Expression variants.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    Logical {
        left: Box<Expr>,
        op: LogicalOp,
        right: Box<Expr>,
    },
    /// `condition ? then_expr : else_expr`
    Ternary {
        condition: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    Grouping(Box<Expr>),
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
    /// Property access: `object.name`
    Get {
        object: Box<Expr>,
        name: Ident,
    },
    /// `target = value`, where target is a `Variable`, `Get` or `ArrayIndex`.
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    This,
    /// `super.method`
    Super {
        method: Ident,
    },
    /// `[size]{}`
    ArrayCreation {
        size: Box<Expr>,
    },
    /// `array[index]`
    ArrayIndex {
        array: Box<Expr>,
        index: Box<Expr>,
    },
    Variable(Ident),
    /// Anonymous function literal.
    Function(Rc<FunctionDecl>),
}

/// A function body with its parameters.
///
/// Named for declarations and methods; `name` is `None` for lambdas.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDecl {
    pub name: Option<Ident>,
    pub params: Vec<Ident>,
    pub body: Vec<Stmt>,
    pub line: u32,
}

impl FunctionDecl {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Display name: the declared name, or empty for lambdas.
    pub fn name_str(&self) -> &str {
        self.name.as_ref().map_or("", |n| n.name.as_str())
    }
}

/// `class Name < Superclass { methods }`
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    pub name: Ident,
    /// Always an `ExprKind::Variable` when present.
    pub superclass: Option<Expr>,
    pub methods: Vec<Rc<FunctionDecl>>,
}

/// Statement node.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    Expression(Expr),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    Var {
        name: Ident,
        initializer: Option<Expr>,
    },
    Function(Rc<FunctionDecl>),
    Class(ClassDecl),
    Return {
        line: u32,
        value: Option<Expr>,
    },
    Block(Vec<Stmt>),
    /// `import a.b.c as alias;`
    Import {
        path: Vec<Ident>,
        alias: Ident,
    },
    Debug {
        line: u32,
    },
    Break {
        line: u32,
    },
}

/// Join an import path into its fully-qualified dotted name.
pub fn qualified_name(path: &[Ident]) -> String {
    let mut out = String::new();
    for (i, segment) in path.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push_str(&segment.name);
    }
    out
}
