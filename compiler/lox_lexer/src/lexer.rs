use logos::Logos;
use lox_diagnostic::{DiagnosticQueue, ErrorCode, ErrorPosition};
use lox_ir::{Literal, Span, Token, TokenKind};
use tracing::trace;

/// Raw token from logos, before line tracking and literal conversion.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\f]+")] // Skip horizontal whitespace
enum RawToken {
    // === Comments ===
    #[regex(r"//[^\n]*")]
    LineComment,

    // === Newlines ===
    #[token("\n")]
    Newline,

    // === Keywords ===
    #[token("and")]
    And,
    #[token("as")]
    As,
    #[token("break")]
    Break,
    #[token("class")]
    Class,
    #[token("debug")]
    Debug,
    #[token("else")]
    Else,
    #[token("false")]
    False,
    #[token("for")]
    For,
    #[token("fun")]
    Fun,
    #[token("if")]
    If,
    #[token("import")]
    Import,
    #[token("nil")]
    Nil,
    #[token("or")]
    Or,
    #[token("return")]
    Return,
    #[token("super")]
    Super,
    #[token("this")]
    This,
    #[token("true")]
    True,
    #[token("var")]
    Var,
    #[token("while")]
    While,

    // === Operators ===
    #[token("!=")]
    BangEqual,
    #[token("==")]
    EqualEqual,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("+=")]
    PlusEqual,
    #[token("-=")]
    MinusEqual,
    #[token("*=")]
    StarEqual,
    #[token("/=")]
    SlashEqual,
    #[token("!")]
    Bang,
    #[token("=")]
    Equal,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
    #[token("\\")]
    Backslash,

    // === Delimiters ===
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(";")]
    Semicolon,

    // === Literals ===
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,
    #[regex(r#""[^"]*""#)]
    String,
    /// A string running to end of input without its closing quote.
    #[regex(r#""[^"]*"#)]
    UnterminatedString,
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

impl RawToken {
    /// Token kind for everything that maps one-to-one.
    fn fixed_kind(self) -> Option<TokenKind> {
        let kind = match self {
            RawToken::And => TokenKind::And,
            RawToken::As => TokenKind::As,
            RawToken::Break => TokenKind::Break,
            RawToken::Class => TokenKind::Class,
            RawToken::Debug => TokenKind::Debug,
            RawToken::Else => TokenKind::Else,
            RawToken::False => TokenKind::False,
            RawToken::For => TokenKind::For,
            RawToken::Fun => TokenKind::Fun,
            RawToken::If => TokenKind::If,
            RawToken::Import => TokenKind::Import,
            RawToken::Nil => TokenKind::Nil,
            RawToken::Or => TokenKind::Or,
            RawToken::Return => TokenKind::Return,
            RawToken::Super => TokenKind::Super,
            RawToken::This => TokenKind::This,
            RawToken::True => TokenKind::True,
            RawToken::Var => TokenKind::Var,
            RawToken::While => TokenKind::While,
            RawToken::BangEqual => TokenKind::BangEqual,
            RawToken::EqualEqual => TokenKind::EqualEqual,
            RawToken::LessEqual => TokenKind::LessEqual,
            RawToken::GreaterEqual => TokenKind::GreaterEqual,
            RawToken::PlusEqual => TokenKind::PlusEqual,
            RawToken::MinusEqual => TokenKind::MinusEqual,
            RawToken::StarEqual => TokenKind::StarEqual,
            RawToken::SlashEqual => TokenKind::SlashEqual,
            RawToken::Bang => TokenKind::Bang,
            RawToken::Equal => TokenKind::Equal,
            RawToken::Less => TokenKind::Less,
            RawToken::Greater => TokenKind::Greater,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Question => TokenKind::Question,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Backslash => TokenKind::Backslash,
            RawToken::LeftParen => TokenKind::LeftParen,
            RawToken::RightParen => TokenKind::RightParen,
            RawToken::LeftBracket => TokenKind::LeftBracket,
            RawToken::RightBracket => TokenKind::RightBracket,
            RawToken::LeftBrace => TokenKind::LeftBrace,
            RawToken::RightBrace => TokenKind::RightBrace,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::Ident => TokenKind::Identifier,
            RawToken::LineComment
            | RawToken::Newline
            | RawToken::Number
            | RawToken::String
            | RawToken::UnterminatedString => return None,
        };
        Some(kind)
    }
}

/// Lexer over one unit's source text.
pub struct Lexer<'src> {
    source: &'src str,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer { source }
    }

    /// Lex the whole source. The result always ends with an `Eof` token.
    pub fn lex_all(&self, queue: &mut DiagnosticQueue) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut logos = RawToken::lexer(self.source);
        let mut line: u32 = 1;

        while let Some(token_result) = logos.next() {
            let span = Span::from_range(logos.span());
            let slice = logos.slice();

            match token_result {
                Ok(RawToken::LineComment) => {}
                Ok(RawToken::Newline) => line += 1,
                Ok(RawToken::Number) => match slice.parse::<f64>() {
                    Ok(value) => tokens.push(
                        Token::new(TokenKind::Number, slice, line, span)
                            .with_literal(Literal::Number(value)),
                    ),
                    Err(_) => queue.report_compile_error(
                        ErrorCode::E0002,
                        ErrorPosition::line(line),
                        "Invalid number literal.",
                    ),
                },
                Ok(RawToken::String) => {
                    let content = &slice[1..slice.len() - 1];
                    tokens.push(
                        Token::new(TokenKind::String, slice, line, span)
                            .with_literal(Literal::Str(content.to_string())),
                    );
                    line += count_newlines(slice);
                }
                Ok(RawToken::UnterminatedString) => {
                    line += count_newlines(slice);
                    queue.report_compile_error(
                        ErrorCode::E0001,
                        ErrorPosition::line(line),
                        "Unterminated string.",
                    );
                }
                Ok(raw) => {
                    if let Some(kind) = raw.fixed_kind() {
                        tokens.push(Token::new(kind, slice, line, span));
                    }
                }
                Err(()) => {
                    trace!(line, slice, "unexpected character");
                    queue.report_compile_error(
                        ErrorCode::E0002,
                        ErrorPosition::line(line),
                        "Unexpected character.",
                    );
                }
            }
        }

        let end = u32::try_from(self.source.len()).unwrap_or(u32::MAX);
        tokens.push(Token::eof(line, end));
        tokens
    }
}

fn count_newlines(text: &str) -> u32 {
    let count = text.bytes().filter(|&b| b == b'\n').count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Lex `source`, reporting errors into `queue`.
pub fn lex(source: &str, queue: &mut DiagnosticQueue) -> Vec<Token> {
    Lexer::new(source).lex_all(queue)
}

#[cfg(test)]
mod tests;
