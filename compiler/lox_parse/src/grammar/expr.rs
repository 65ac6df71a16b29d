//! Expression parsing, lowest precedence first.
//!
//! ```text
//! assignment -> compound ( "=" assignment )?
//! compound   -> ternary ( ( "+=" | "-=" | "*=" | "/=" ) ternary )*
//! ternary    -> or ( "?" ternary ":" ternary )?
//! or         -> and ( "or" and )*
//! and        -> equality ( "and" equality )*
//! equality   -> comparison ( ( "!=" | "==" ) comparison )*
//! comparison -> term ( ( ">" | ">=" | "<" | "<=" ) term )*
//! term       -> factor ( ( "-" | "+" ) factor )*
//! factor     -> unary ( ( "/" | "*" ) unary )*
//! unary      -> ( "!" | "-" ) unary | call
//! call       -> primary ( "(" args? ")" | "." IDENT | "[" expression "]" )*
//! ```

use std::rc::Rc;

use lox_diagnostic::{ErrorCode, ErrorPosition};
use lox_ir::{
    BinaryOp, Expr, ExprKind, FunctionDecl, Ident, Literal, LogicalOp, Stmt, Token, TokenKind,
    UnaryOp,
};
use lox_stack::ensure_sufficient_stack;

use super::ParseResult;
use crate::{ParseError, Parser, MAX_ARGS};

const COMPOUND_OPERATORS: [TokenKind; 4] = [
    TokenKind::PlusEqual,
    TokenKind::MinusEqual,
    TokenKind::StarEqual,
    TokenKind::SlashEqual,
];

impl Parser<'_, '_> {
    pub(crate) fn expression(&mut self) -> ParseResult<Expr> {
        ensure_sufficient_stack(|| self.assignment())
    }

    fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.compound_assignment()?;

        if self.cursor.match_any(&[TokenKind::Equal]) {
            let equals = self.cursor.previous();
            let value = self.assignment()?;
            if expr.is_assignable() {
                return Ok(self.node(
                    equals.line,
                    ExprKind::Assign {
                        target: Box::new(expr),
                        value: Box::new(value),
                    },
                ));
            }
            // Not fatal: the parser is still in a sane state.
            self.report(invalid_target(equals));
        }

        Ok(expr)
    }

    /// `a op= b` lowers to `a = a op b`. The read of `a` is a clone of the
    /// target and shares its node ids.
    fn compound_assignment(&mut self) -> ParseResult<Expr> {
        let mut expr = self.ternary()?;

        while self.cursor.match_any(&COMPOUND_OPERATORS) {
            let operator = self.cursor.previous();
            let Some(op) = BinaryOp::from_token(operator.kind) else {
                return Err(ParseError::expected_expression(operator));
            };
            let right = self.ternary()?;

            if !expr.is_assignable() {
                self.report(invalid_target(operator));
                expr = self.node(
                    operator.line,
                    ExprKind::Binary {
                        left: Box::new(expr),
                        op,
                        right: Box::new(right),
                    },
                );
                continue;
            }

            let value = self.node(
                operator.line,
                ExprKind::Binary {
                    left: Box::new(expr.clone()),
                    op,
                    right: Box::new(right),
                },
            );
            expr = self.node(
                operator.line,
                ExprKind::Assign {
                    target: Box::new(expr),
                    value: Box::new(value),
                },
            );
        }

        Ok(expr)
    }

    fn ternary(&mut self) -> ParseResult<Expr> {
        let condition = self.or()?;

        if self.cursor.match_any(&[TokenKind::Question]) {
            let question = self.cursor.previous();
            let then_expr = self.ternary()?;
            self.cursor
                .consume(TokenKind::Colon, "Expected ':' in ternary expression")?;
            let else_expr = self.ternary()?;
            return Ok(self.node(
                question.line,
                ExprKind::Ternary {
                    condition: Box::new(condition),
                    then_expr: Box::new(then_expr),
                    else_expr: Box::new(else_expr),
                },
            ));
        }

        Ok(condition)
    }

    fn or(&mut self) -> ParseResult<Expr> {
        self.logical(TokenKind::Or, LogicalOp::Or, Self::and)
    }

    fn and(&mut self) -> ParseResult<Expr> {
        self.logical(TokenKind::And, LogicalOp::And, Self::equality)
    }

    fn logical(
        &mut self,
        token: TokenKind,
        op: LogicalOp,
        operand: fn(&mut Self) -> ParseResult<Expr>,
    ) -> ParseResult<Expr> {
        let mut expr = operand(self)?;
        while self.cursor.match_any(&[token]) {
            let line = self.cursor.previous().line;
            let right = operand(self)?;
            expr = self.node(
                line,
                ExprKind::Logical {
                    left: Box::new(expr),
                    op,
                    right: Box::new(right),
                },
            );
        }
        Ok(expr)
    }

    fn equality(&mut self) -> ParseResult<Expr> {
        self.binary(&[TokenKind::BangEqual, TokenKind::EqualEqual], Self::comparison)
    }

    fn comparison(&mut self) -> ParseResult<Expr> {
        self.binary(
            &[
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
            ],
            Self::term,
        )
    }

    fn term(&mut self) -> ParseResult<Expr> {
        self.binary(&[TokenKind::Minus, TokenKind::Plus], Self::factor)
    }

    fn factor(&mut self) -> ParseResult<Expr> {
        self.binary(&[TokenKind::Slash, TokenKind::Star], Self::unary)
    }

    /// One left-associative precedence level.
    fn binary(
        &mut self,
        operators: &[TokenKind],
        operand: fn(&mut Self) -> ParseResult<Expr>,
    ) -> ParseResult<Expr> {
        let mut expr = operand(self)?;
        while self.cursor.match_any(operators) {
            let operator = self.cursor.previous();
            let Some(op) = BinaryOp::from_token(operator.kind) else {
                return Err(ParseError::expected_expression(operator));
            };
            let right = operand(self)?;
            expr = self.node(
                operator.line,
                ExprKind::Binary {
                    left: Box::new(expr),
                    op,
                    right: Box::new(right),
                },
            );
        }
        Ok(expr)
    }

    fn unary(&mut self) -> ParseResult<Expr> {
        if self.cursor.match_any(&[TokenKind::Bang, TokenKind::Minus]) {
            let operator = self.cursor.previous();
            let op = if operator.kind == TokenKind::Bang {
                UnaryOp::Not
            } else {
                UnaryOp::Neg
            };
            let operand = ensure_sufficient_stack(|| self.unary())?;
            return Ok(self.node(
                operator.line,
                ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
            ));
        }
        self.call()
    }

    fn call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;

        loop {
            if self.cursor.match_any(&[TokenKind::LeftParen]) {
                expr = self.finish_call(expr)?;
            } else if self.cursor.match_any(&[TokenKind::Dot]) {
                let name = self.ident("Expect property name after '.'.")?;
                expr = self.node(
                    name.line,
                    ExprKind::Get {
                        object: Box::new(expr),
                        name,
                    },
                );
            } else if self.cursor.match_any(&[TokenKind::LeftBracket]) {
                let index = self.expression()?;
                let bracket = self
                    .cursor
                    .consume(TokenKind::RightBracket, "Expected ']' in array indexing.")?;
                expr = self.node(
                    bracket.line,
                    ExprKind::ArrayIndex {
                        array: Box::new(expr),
                        index: Box::new(index),
                    },
                );
            } else {
                return Ok(expr);
            }
        }
    }

    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let mut arguments = Vec::new();
        if !self.cursor.check(TokenKind::RightParen) {
            loop {
                if arguments.len() >= MAX_ARGS {
                    let error = ParseError {
                        code: ErrorCode::E1004,
                        position: ErrorPosition::at_token(self.cursor.peek()),
                        message: format!("Can't have more than {MAX_ARGS} arguments."),
                    };
                    self.report(error);
                }
                arguments.push(self.expression()?);
                if !self.cursor.match_any(&[TokenKind::Comma]) {
                    break;
                }
            }
        }
        let paren = self
            .cursor
            .consume(TokenKind::RightParen, "Expect ')' after arguments.")?;

        Ok(self.node(
            paren.line,
            ExprKind::Call {
                callee: Box::new(callee),
                arguments,
            },
        ))
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        let token = self.cursor.peek();
        let kind = match token.kind {
            TokenKind::False => ExprKind::Literal(Literal::Bool(false)),
            TokenKind::True => ExprKind::Literal(Literal::Bool(true)),
            TokenKind::Nil => ExprKind::Literal(Literal::Nil),
            TokenKind::Number | TokenKind::String => {
                ExprKind::Literal(token.literal.clone().unwrap_or(Literal::Nil))
            }
            TokenKind::This => ExprKind::This,
            TokenKind::Identifier => {
                let name = self.ident("Expect expression.")?;
                return Ok(self.node(token.line, ExprKind::Variable(name)));
            }
            TokenKind::Super => {
                self.cursor.advance();
                self.cursor
                    .consume(TokenKind::Dot, "Expect '.' after 'super'.")?;
                let method = self.ident("Expect superclass method name.")?;
                return Ok(self.node(token.line, ExprKind::Super { method }));
            }
            TokenKind::LeftParen => {
                self.cursor.advance();
                let inner = self.expression()?;
                self.cursor
                    .consume(TokenKind::RightParen, "Expect ')' after expression.")?;
                return Ok(self.node(inner.line, ExprKind::Grouping(Box::new(inner))));
            }
            TokenKind::LeftBracket => {
                self.cursor.advance();
                return self.array_creation();
            }
            TokenKind::Backslash => {
                self.cursor.advance();
                return self.lambda(token);
            }
            TokenKind::Fun => {
                self.cursor.advance();
                return self.anonymous_function(token);
            }
            _ => return Err(ParseError::expected_expression(token)),
        };
        self.cursor.advance();
        Ok(self.node(token.line, kind))
    }

    /// `"[" expression "]" "{" "}"`, after the opening bracket.
    fn array_creation(&mut self) -> ParseResult<Expr> {
        let size = self.expression()?;
        let bracket = self.cursor.consume(
            TokenKind::RightBracket,
            "Expect closing square bracket in array creation.",
        )?;
        self.cursor
            .consume(TokenKind::LeftBrace, "Expect opening brace in array creation.")?;
        self.cursor
            .consume(TokenKind::RightBrace, "Expect closing brace in array creation.")?;
        Ok(self.node(
            bracket.line,
            ExprKind::ArrayCreation {
                size: Box::new(size),
            },
        ))
    }

    /// `\a, b { ... }` or `\a, b expr`. The expression form returns its value.
    fn lambda(&mut self, backslash: &Token) -> ParseResult<Expr> {
        let params = if self.cursor.check(TokenKind::Identifier) {
            self.parameter_list()?
        } else {
            Vec::new()
        };

        let body = if self.cursor.check(TokenKind::LeftBrace) {
            self.function_body("lambda")?
        } else {
            let value = self.expression()?;
            vec![Stmt::Return {
                line: backslash.line,
                value: Some(value),
            }]
        };

        Ok(self.function_literal(backslash.line, params, body))
    }

    /// `fun (params) { ... }` in expression position.
    fn anonymous_function(&mut self, keyword: &Token) -> ParseResult<Expr> {
        self.cursor
            .consume(TokenKind::LeftParen, "Expect '(' after 'fun'.")?;
        let params = if self.cursor.check(TokenKind::RightParen) {
            Vec::new()
        } else {
            self.parameter_list()?
        };
        self.cursor
            .consume(TokenKind::RightParen, "Expect ')' after parameters.")?;
        let body = self.function_body("function")?;
        Ok(self.function_literal(keyword.line, params, body))
    }

    fn function_literal(&mut self, line: u32, params: Vec<Ident>, body: Vec<Stmt>) -> Expr {
        let decl = FunctionDecl {
            name: None,
            params,
            body,
            line,
        };
        self.node(line, ExprKind::Function(Rc::new(decl)))
    }
}

#[cold]
fn invalid_target(at: &Token) -> ParseError {
    ParseError {
        code: ErrorCode::E1003,
        position: ErrorPosition::at_token(at),
        message: "Invalid assignment target.".to_string(),
    }
}
