//! S-expression rendering of the AST.
//!
//! Used by `lox parse` and by parser tests, where comparing one line of
//! text beats comparing nested node structures.

use std::fmt::Write;

use super::{qualified_name, ClassDecl, Expr, ExprKind, FunctionDecl, Stmt};
use crate::Literal;

/// Renders statements and expressions as parenthesized prefix forms.
#[derive(Default)]
pub struct AstPrinter {
    out: String,
}

impl AstPrinter {
    /// Render a whole program, one top-level statement per line.
    pub fn print_program(stmts: &[Stmt]) -> String {
        let mut printer = AstPrinter::default();
        for (i, stmt) in stmts.iter().enumerate() {
            if i > 0 {
                printer.out.push('\n');
            }
            printer.stmt(stmt);
        }
        printer.out
    }

    pub fn print_stmt(stmt: &Stmt) -> String {
        let mut printer = AstPrinter::default();
        printer.stmt(stmt);
        printer.out
    }

    pub fn print_expr(expr: &Expr) -> String {
        let mut printer = AstPrinter::default();
        printer.expr(expr);
        printer.out
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(expr) => {
                self.expr(expr);
                self.out.push(';');
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.out.push_str("(if ");
                self.expr(condition);
                self.out.push(' ');
                self.stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.out.push(' ');
                    self.stmt(else_branch);
                }
                self.out.push(')');
            }
            Stmt::While { condition, body } => {
                self.out.push_str("(while ");
                self.expr(condition);
                self.out.push(' ');
                self.stmt(body);
                self.out.push(')');
            }
            Stmt::Var { name, initializer } => {
                let _ = write!(self.out, "(var {}", name.name);
                if let Some(init) = initializer {
                    self.out.push(' ');
                    self.expr(init);
                }
                self.out.push(')');
            }
            Stmt::Function(decl) => self.function(decl),
            Stmt::Class(class) => self.class(class),
            Stmt::Return { value, .. } => {
                self.out.push_str("(return");
                if let Some(value) = value {
                    self.out.push(' ');
                    self.expr(value);
                }
                self.out.push(')');
            }
            Stmt::Block(stmts) => {
                self.out.push_str("(block");
                self.stmts(stmts);
                self.out.push(')');
            }
            Stmt::Import { path, alias } => {
                let _ = write!(self.out, "(import {} as {})", qualified_name(path), alias.name);
            }
            Stmt::Debug { .. } => self.out.push_str("(debug)"),
            Stmt::Break { .. } => self.out.push_str("(break)"),
        }
    }

    fn stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.out.push(' ');
            self.stmt(stmt);
        }
    }

    fn function(&mut self, decl: &FunctionDecl) {
        self.out.push_str("(fun ");
        if let Some(name) = &decl.name {
            self.out.push_str(&name.name);
            self.out.push(' ');
        }
        self.out.push('(');
        for (i, param) in decl.params.iter().enumerate() {
            if i > 0 {
                self.out.push(' ');
            }
            self.out.push_str(&param.name);
        }
        self.out.push(')');
        self.stmts(&decl.body);
        self.out.push(')');
    }

    fn class(&mut self, class: &ClassDecl) {
        let _ = write!(self.out, "(class {}", class.name.name);
        if let Some(superclass) = &class.superclass {
            self.out.push_str(" < ");
            self.expr(superclass);
        }
        for method in &class.methods {
            self.out.push(' ');
            self.function(method);
        }
        self.out.push(')');
    }

    fn expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Literal(lit) => match lit {
                Literal::Str(s) => {
                    let _ = write!(self.out, "\"{s}\"");
                }
                other => {
                    let _ = write!(self.out, "{other}");
                }
            },
            ExprKind::Unary { op, operand } => {
                self.parenthesize(op.as_symbol(), &[operand.as_ref()]);
            }
            ExprKind::Binary { left, op, right } => {
                self.parenthesize(op.as_symbol(), &[left.as_ref(), right.as_ref()]);
            }
            ExprKind::Logical { left, op, right } => {
                self.parenthesize(op.as_symbol(), &[left.as_ref(), right.as_ref()]);
            }
            ExprKind::Ternary {
                condition,
                then_expr,
                else_expr,
            } => self.parenthesize(
                "?:",
                &[condition.as_ref(), then_expr.as_ref(), else_expr.as_ref()],
            ),
            ExprKind::Grouping(inner) => self.parenthesize("group", &[inner.as_ref()]),
            ExprKind::Call { callee, arguments } => {
                self.out.push_str("(call ");
                self.expr(callee);
                for arg in arguments {
                    self.out.push(' ');
                    self.expr(arg);
                }
                self.out.push(')');
            }
            ExprKind::Get { object, name } => {
                self.out.push_str("(. ");
                self.expr(object);
                let _ = write!(self.out, " {})", name.name);
            }
            ExprKind::Assign { target, value } => {
                self.parenthesize("=", &[target.as_ref(), value.as_ref()]);
            }
            ExprKind::This => self.out.push_str("this"),
            ExprKind::Super { method } => {
                let _ = write!(self.out, "(super {})", method.name);
            }
            ExprKind::ArrayCreation { size } => self.parenthesize("array", &[size.as_ref()]),
            ExprKind::ArrayIndex { array, index } => {
                self.parenthesize("[]", &[array.as_ref(), index.as_ref()]);
            }
            ExprKind::Variable(name) => self.out.push_str(&name.name),
            ExprKind::Function(decl) => self.function(decl),
        }
    }

    fn parenthesize(&mut self, head: &str, parts: &[&Expr]) {
        self.out.push('(');
        self.out.push_str(head);
        for part in parts {
            self.out.push(' ');
            self.expr(part);
        }
        self.out.push(')');
    }
}
