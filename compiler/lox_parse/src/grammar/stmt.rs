//! Declaration and statement parsing.

use std::rc::Rc;

use lox_diagnostic::{ErrorCode, ErrorPosition};
use lox_ir::{ClassDecl, Expr, ExprKind, FunctionDecl, Ident, Literal, Stmt, TokenKind};
use lox_stack::ensure_sufficient_stack;

use super::ParseResult;
use crate::{ParseError, Parser, MAX_ARGS};

impl Parser<'_, '_> {
    /// Parse one declaration, recovering from a syntax error by reporting it
    /// and skipping to the next statement boundary.
    pub(crate) fn declaration(&mut self) -> Option<Stmt> {
        match ensure_sufficient_stack(|| self.declaration_inner()) {
            Ok(stmt) => Some(stmt),
            Err(error) => {
                self.report(error);
                self.synchronize();
                None
            }
        }
    }

    fn declaration_inner(&mut self) -> ParseResult<Stmt> {
        if self.cursor.match_any(&[TokenKind::Class]) {
            return self.class_declaration();
        }
        // `fun (` starts an anonymous function expression instead.
        if self.cursor.check(TokenKind::Fun)
            && self.cursor.peek_next().kind == TokenKind::Identifier
        {
            self.cursor.advance();
            return Ok(Stmt::Function(self.function("function")?));
        }
        if self.cursor.match_any(&[TokenKind::Var]) {
            return self.var_declaration();
        }
        self.statement()
    }

    fn class_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.ident("Expect class name.")?;

        let superclass = if self.cursor.match_any(&[TokenKind::Less]) {
            let superclass = self.ident("Expect superclass name.")?;
            Some(self.node(superclass.line, ExprKind::Variable(superclass)))
        } else {
            None
        };

        self.cursor
            .consume(TokenKind::LeftBrace, "Expect '{' before class body.")?;
        let mut methods = Vec::new();
        while !self.cursor.check(TokenKind::RightBrace) && !self.cursor.is_at_end() {
            methods.push(self.function("method")?);
        }
        self.cursor
            .consume(TokenKind::RightBrace, "Expect '}' after class body.")?;

        Ok(Stmt::Class(ClassDecl {
            name,
            superclass,
            methods,
        }))
    }

    /// `IDENT "(" params? ")" block`, after `fun` or inside a class body.
    pub(crate) fn function(&mut self, kind: &str) -> ParseResult<Rc<FunctionDecl>> {
        let name = self.ident(&format!("Expect {kind} name."))?;
        self.cursor
            .consume(TokenKind::LeftParen, &format!("Expect '(' after {kind} name."))?;
        let params = if self.cursor.check(TokenKind::RightParen) {
            Vec::new()
        } else {
            self.parameter_list()?
        };
        self.cursor
            .consume(TokenKind::RightParen, "Expect ')' after parameters.")?;
        let body = self.function_body(kind)?;
        Ok(Rc::new(FunctionDecl {
            line: name.line,
            name: Some(name),
            params,
            body,
        }))
    }

    /// One or more comma separated parameter names.
    pub(crate) fn parameter_list(&mut self) -> ParseResult<Vec<Ident>> {
        let mut params = Vec::new();
        loop {
            if params.len() >= MAX_ARGS {
                let error = ParseError {
                    code: ErrorCode::E1004,
                    position: ErrorPosition::at_token(self.cursor.peek()),
                    message: format!("Can't have more than {MAX_ARGS} parameters."),
                };
                self.report(error);
            }
            params.push(self.ident("Expect parameter name.")?);
            if !self.cursor.match_any(&[TokenKind::Comma]) {
                return Ok(params);
            }
        }
    }

    pub(crate) fn function_body(&mut self, kind: &str) -> ParseResult<Vec<Stmt>> {
        self.cursor
            .consume(TokenKind::LeftBrace, &format!("Expect '{{' before {kind} body."))?;
        self.block_statements()
    }

    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.ident("Expect variable name.")?;
        let initializer = if self.cursor.match_any(&[TokenKind::Equal]) {
            Some(self.expression()?)
        } else {
            None
        };
        self.cursor
            .consume(TokenKind::Semicolon, "Expect ';' after variable declaration.")?;
        Ok(Stmt::Var { name, initializer })
    }

    fn statement(&mut self) -> ParseResult<Stmt> {
        ensure_sufficient_stack(|| {
            if self.cursor.match_any(&[TokenKind::For]) {
                return self.for_statement();
            }
            if self.cursor.match_any(&[TokenKind::If]) {
                return self.if_statement();
            }
            if self.cursor.match_any(&[TokenKind::Return]) {
                return self.return_statement();
            }
            if self.cursor.match_any(&[TokenKind::While]) {
                return self.while_statement();
            }
            if self.cursor.match_any(&[TokenKind::LeftBrace]) {
                return Ok(Stmt::Block(self.block_statements()?));
            }
            if self.cursor.match_any(&[TokenKind::Import]) {
                return self.import_statement();
            }
            if self.cursor.match_any(&[TokenKind::Debug]) {
                let line = self.cursor.previous().line;
                self.cursor
                    .consume(TokenKind::Semicolon, "Expect ';' after value.")?;
                return Ok(Stmt::Debug { line });
            }
            if self.cursor.match_any(&[TokenKind::Break]) {
                let line = self.cursor.previous().line;
                self.cursor
                    .consume(TokenKind::Semicolon, "Expect ';' after break statement.")?;
                return Ok(Stmt::Break { line });
            }
            if self.at_print_statement() {
                return self.print_statement();
            }
            self.expression_statement()
        })
    }

    /// `for (init; cond; incr) body` becomes
    /// `{ init; while (cond) { body; incr; } }`.
    fn for_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.cursor.previous().line;
        self.cursor
            .consume(TokenKind::LeftParen, "Expect '(' after 'for'.")?;

        let initializer = if self.cursor.match_any(&[TokenKind::Semicolon]) {
            None
        } else if self.cursor.match_any(&[TokenKind::Var]) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if self.cursor.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.cursor
            .consume(TokenKind::Semicolon, "Expect ';' after loop condition.")?;

        let increment = if self.cursor.check(TokenKind::RightParen) {
            None
        } else {
            Some(self.expression()?)
        };
        self.cursor
            .consume(TokenKind::RightParen, "Expect ')' after for clauses.")?;

        let mut body = self.statement()?;
        if let Some(increment) = increment {
            body = Stmt::Block(vec![body, Stmt::Expression(increment)]);
        }
        let condition = match condition {
            Some(condition) => condition,
            None => self.node(line, ExprKind::Literal(Literal::Bool(true))),
        };
        body = Stmt::While {
            condition,
            body: Box::new(body),
        };
        if let Some(initializer) = initializer {
            body = Stmt::Block(vec![initializer, body]);
        }
        Ok(body)
    }

    fn if_statement(&mut self) -> ParseResult<Stmt> {
        self.cursor
            .consume(TokenKind::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.cursor
            .consume(TokenKind::RightParen, "Expect ')' after if condition.")?;
        let then_branch = Box::new(self.statement()?);
        let else_branch = if self.cursor.match_any(&[TokenKind::Else]) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };
        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.cursor.previous().line;
        let value = if self.cursor.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.cursor
            .consume(TokenKind::Semicolon, "Expect ';' after return value.")?;
        Ok(Stmt::Return { line, value })
    }

    fn while_statement(&mut self) -> ParseResult<Stmt> {
        self.cursor
            .consume(TokenKind::LeftParen, "Expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.cursor
            .consume(TokenKind::RightParen, "Expect ')' after condition.")?;
        let body = Box::new(self.statement()?);
        Ok(Stmt::While { condition, body })
    }

    /// Declarations up to and including the closing `}`.
    fn block_statements(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();
        while !self.cursor.check(TokenKind::RightBrace) && !self.cursor.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }
        self.cursor
            .consume(TokenKind::RightBrace, "Expect '}' after block.")?;
        Ok(statements)
    }

    fn import_statement(&mut self) -> ParseResult<Stmt> {
        let mut path = vec![self.ident("Expected identifier.")?];
        while self.cursor.match_any(&[TokenKind::Dot]) {
            path.push(self.ident("Expected identifier.")?);
        }
        self.cursor
            .consume(TokenKind::As, "Expected 'as' qualifier.")?;
        let alias = self.ident("Expected module qualifier.")?;
        self.cursor
            .consume(TokenKind::Semicolon, "Expect ';' after import statement.")?;
        Ok(Stmt::Import { path, alias })
    }

    /// `print` is an ordinary global; `print expr;` without parentheses is
    /// accepted when the next token can only begin an operand.
    fn at_print_statement(&self) -> bool {
        let current = self.cursor.peek();
        current.kind == TokenKind::Identifier
            && current.lexeme == "print"
            && matches!(
                self.cursor.peek_next().kind,
                TokenKind::Number
                    | TokenKind::String
                    | TokenKind::Identifier
                    | TokenKind::True
                    | TokenKind::False
                    | TokenKind::Nil
                    | TokenKind::This
                    | TokenKind::Super
                    | TokenKind::Minus
                    | TokenKind::Bang
                    | TokenKind::Backslash
                    | TokenKind::Fun
            )
    }

    fn print_statement(&mut self) -> ParseResult<Stmt> {
        let keyword = self.cursor.advance();
        let value = self.expression()?;
        self.cursor
            .consume(TokenKind::Semicolon, "Expect ';' after value.")?;
        let name = Ident::new("print", keyword.line, keyword.span);
        let callee = self.node(keyword.line, ExprKind::Variable(name));
        let call = self.node(
            keyword.line,
            ExprKind::Call {
                callee: Box::new(callee),
                arguments: vec![value],
            },
        );
        Ok(Stmt::Expression(call))
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.cursor
            .consume(TokenKind::Semicolon, "Expect ';' after value.")?;
        Ok(Stmt::Expression(expr))
    }

    pub(crate) fn ident(&mut self, message: &str) -> ParseResult<Ident> {
        let token = self.cursor.consume(TokenKind::Identifier, message)?;
        Ok(Ident::new(token.lexeme.clone(), token.line, token.span))
    }

    pub(crate) fn node(&mut self, line: u32, kind: ExprKind) -> Expr {
        Expr::new(self.ids.fresh(), line, kind)
    }
}
