//! The resolver pass.

mod scope;

use std::mem;

use lox_diagnostic::{DiagnosticQueue, ErrorCode, ErrorPosition};
use lox_ir::{qualified_name, ClassDecl, Expr, ExprKind, FunctionDecl, Ident, NodeId, Stmt};
use lox_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{CompilationUnit, VariableLocation};
use scope::{BindingState, Scope};

/// Kind of function body being resolved.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

/// Kind of class body being resolved.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum ClassType {
    None,
    Class,
    Subclass,
}

/// Resolver state for one compilation unit.
pub struct Resolver<'q> {
    /// Innermost scope last. Empty at top level, where names are globals.
    scopes: Vec<Scope>,
    locals: FxHashMap<NodeId, VariableLocation>,
    imports: Vec<String>,
    function: FunctionType,
    class: ClassType,
    loop_depth: u32,
    errors: usize,
    queue: &'q mut DiagnosticQueue,
}

impl<'q> Resolver<'q> {
    pub fn new(queue: &'q mut DiagnosticQueue) -> Self {
        Resolver {
            scopes: Vec::new(),
            locals: FxHashMap::default(),
            imports: Vec::new(),
            function: FunctionType::None,
            class: ClassType::None,
            loop_depth: 0,
            errors: 0,
            queue,
        }
    }

    /// Resolve a unit's top-level statements.
    pub fn resolve(mut self, name: impl Into<String>, statements: Vec<Stmt>) -> CompilationUnit {
        let name = name.into();
        self.resolve_stmts(&statements);
        debug!(
            unit = %name,
            locals = self.locals.len(),
            imports = self.imports.len(),
            errors = self.errors,
            "resolved unit"
        );
        CompilationUnit {
            name,
            statements,
            locals: self.locals,
            imports: self.imports,
            has_errors: self.errors > 0,
        }
    }

    fn resolve_stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.resolve_stmt(stmt);
        }
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        ensure_sufficient_stack(|| match stmt {
            Stmt::Expression(expr) => self.resolve_expr(expr),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(condition);
                self.resolve_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.resolve_stmt(else_branch);
                }
            }
            Stmt::While { condition, body } => {
                self.resolve_expr(condition);
                self.loop_depth += 1;
                self.resolve_stmt(body);
                self.loop_depth -= 1;
            }
            Stmt::Var { name, initializer } => {
                self.declare(name);
                if let Some(initializer) = initializer {
                    self.resolve_expr(initializer);
                }
                self.define(name);
            }
            Stmt::Function(decl) => {
                if let Some(name) = &decl.name {
                    self.declare(name);
                    self.define(name);
                }
                self.resolve_function(decl, FunctionType::Function);
            }
            Stmt::Class(class) => self.resolve_class(class),
            Stmt::Return { line, value } => {
                if self.function == FunctionType::None {
                    self.error(
                        ErrorCode::E2003,
                        ErrorPosition::at_lexeme(*line, "return"),
                        "Can't return from top-level code.",
                    );
                }
                if let Some(value) = value {
                    if self.function == FunctionType::Initializer {
                        self.error(
                            ErrorCode::E2004,
                            ErrorPosition::at_lexeme(*line, "return"),
                            "Can't return a value from an initializer.",
                        );
                    }
                    self.resolve_expr(value);
                }
            }
            Stmt::Block(stmts) => {
                self.begin_scope();
                self.resolve_stmts(stmts);
                self.end_scope();
            }
            Stmt::Import { path, alias } => {
                let module = qualified_name(path);
                if !self.imports.contains(&module) {
                    self.imports.push(module);
                }
                self.declare(alias);
                self.define(alias);
            }
            Stmt::Debug { .. } => {}
            Stmt::Break { line } => {
                if self.loop_depth == 0 {
                    self.error(
                        ErrorCode::E2009,
                        ErrorPosition::at_lexeme(*line, "break"),
                        "Can't break outside of a loop.",
                    );
                }
            }
        });
    }

    /// Scopes pushed here must match what class execution and method
    /// binding create at run time: `super` (only with a superclass), then
    /// `this`, then the method's own parameter scope.
    fn resolve_class(&mut self, class: &ClassDecl) {
        let enclosing = mem::replace(&mut self.class, ClassType::Class);
        self.declare(&class.name);
        self.define(&class.name);

        if let Some(superclass) = &class.superclass {
            if let ExprKind::Variable(super_name) = &superclass.kind {
                if super_name.name == class.name.name {
                    self.error(
                        ErrorCode::E2008,
                        ErrorPosition::at_lexeme(super_name.line, &super_name.name),
                        "A class can't inherit from itself.",
                    );
                }
            }
            self.class = ClassType::Subclass;
            self.resolve_expr(superclass);
            self.begin_scope();
            self.define_synthetic("super");
        }

        self.begin_scope();
        self.define_synthetic("this");

        for method in &class.methods {
            let kind = if method.name_str() == "init" {
                FunctionType::Initializer
            } else {
                FunctionType::Method
            };
            self.resolve_function(method, kind);
        }

        self.end_scope();
        if class.superclass.is_some() {
            self.end_scope();
        }
        self.class = enclosing;
    }

    fn resolve_function(&mut self, decl: &FunctionDecl, kind: FunctionType) {
        let enclosing_function = mem::replace(&mut self.function, kind);
        // A `break` inside the body can't target a loop around the function.
        let enclosing_loops = mem::replace(&mut self.loop_depth, 0);

        self.begin_scope();
        for param in &decl.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve_stmts(&decl.body);
        self.end_scope();

        self.loop_depth = enclosing_loops;
        self.function = enclosing_function;
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        ensure_sufficient_stack(|| match &expr.kind {
            ExprKind::Literal(_) => {}
            ExprKind::Unary { operand, .. } => self.resolve_expr(operand),
            ExprKind::Binary { left, right, .. } | ExprKind::Logical { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }
            ExprKind::Ternary {
                condition,
                then_expr,
                else_expr,
            } => {
                self.resolve_expr(condition);
                self.resolve_expr(then_expr);
                self.resolve_expr(else_expr);
            }
            ExprKind::Grouping(inner) => self.resolve_expr(inner),
            ExprKind::Call { callee, arguments } => {
                self.resolve_expr(callee);
                for argument in arguments {
                    self.resolve_expr(argument);
                }
            }
            ExprKind::Get { object, .. } => self.resolve_expr(object),
            ExprKind::Assign { target, value } => {
                self.resolve_expr(value);
                match &target.kind {
                    ExprKind::Variable(name) => self.resolve_local(target.id, &name.name),
                    _ => self.resolve_expr(target),
                }
            }
            ExprKind::This => {
                if self.class == ClassType::None {
                    self.error(
                        ErrorCode::E2005,
                        ErrorPosition::at_lexeme(expr.line, "this"),
                        "Can't use 'this' outside of a class.",
                    );
                    return;
                }
                self.resolve_local(expr.id, "this");
            }
            ExprKind::Super { .. } => {
                match self.class {
                    ClassType::None => {
                        self.error(
                            ErrorCode::E2006,
                            ErrorPosition::at_lexeme(expr.line, "super"),
                            "Can't use 'super' outside of a class.",
                        );
                    }
                    ClassType::Class => {
                        self.error(
                            ErrorCode::E2007,
                            ErrorPosition::at_lexeme(expr.line, "super"),
                            "Can't use 'super' in a class with no superclass.",
                        );
                    }
                    ClassType::Subclass => {}
                }
                self.resolve_local(expr.id, "super");
            }
            ExprKind::ArrayCreation { size } => self.resolve_expr(size),
            ExprKind::ArrayIndex { array, index } => {
                self.resolve_expr(array);
                self.resolve_expr(index);
            }
            ExprKind::Variable(name) => {
                let in_own_initializer = self
                    .scopes
                    .last()
                    .and_then(|scope| scope.get(&name.name))
                    .is_some_and(|binding| binding.state == BindingState::Declared);
                if in_own_initializer {
                    self.error(
                        ErrorCode::E2002,
                        ErrorPosition::at_lexeme(name.line, &name.name),
                        "Can't read local variable in its own initializer.",
                    );
                }
                self.resolve_local(expr.id, &name.name);
            }
            ExprKind::Function(decl) => self.resolve_function(decl, FunctionType::Function),
        });
    }

    /// Record the address of the innermost binding of `name`, if any.
    /// No binding means a global, which gets no entry.
    fn resolve_local(&mut self, id: NodeId, name: &str) {
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if let Some(binding) = scope.get(name) {
                self.locals
                    .insert(id, VariableLocation::new(depth, binding.slot));
                return;
            }
        }
    }

    fn begin_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &Ident) {
        let Some(scope) = self.scopes.last_mut() else {
            return;
        };
        if !scope.declare(&name.name) {
            self.error(
                ErrorCode::E2001,
                ErrorPosition::at_lexeme(name.line, &name.name),
                "Already a variable with this name in this scope.",
            );
        }
    }

    fn define(&mut self, name: &Ident) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.define(&name.name);
        }
    }

    fn define_synthetic(&mut self, name: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.define(name);
        }
    }

    fn error(&mut self, code: ErrorCode, position: ErrorPosition, message: &str) {
        self.errors += 1;
        self.queue.report_compile_error(code, position, message);
    }
}

/// Resolve `statements` as the unit `name`, reporting into `queue`.
pub fn resolve(
    name: impl Into<String>,
    statements: Vec<Stmt>,
    queue: &mut DiagnosticQueue,
) -> CompilationUnit {
    Resolver::new(queue).resolve(name, statements)
}
