use lox_diagnostic::DiagnosticQueue;
use pretty_assertions::assert_eq;

use super::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    let mut queue = DiagnosticQueue::new();
    let tokens = lex(source, &mut queue);
    assert!(!queue.has_errors(), "unexpected errors: {:?}", queue.diagnostics());
    tokens.into_iter().map(|t| t.kind).collect()
}

#[test]
fn test_lex_punctuation_and_operators() {
    assert_eq!(
        kinds("( ) [ ] { } , . ; ? : \\ ! != = == < <= > >= + += - -= * *= / /="),
        vec![
            TokenKind::LeftParen,
            TokenKind::RightParen,
            TokenKind::LeftBracket,
            TokenKind::RightBracket,
            TokenKind::LeftBrace,
            TokenKind::RightBrace,
            TokenKind::Comma,
            TokenKind::Dot,
            TokenKind::Semicolon,
            TokenKind::Question,
            TokenKind::Colon,
            TokenKind::Backslash,
            TokenKind::Bang,
            TokenKind::BangEqual,
            TokenKind::Equal,
            TokenKind::EqualEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::Plus,
            TokenKind::PlusEqual,
            TokenKind::Minus,
            TokenKind::MinusEqual,
            TokenKind::Star,
            TokenKind::StarEqual,
            TokenKind::Slash,
            TokenKind::SlashEqual,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_keywords_vs_identifiers() {
    assert_eq!(
        kinds("import as class classy assert var _x"),
        vec![
            TokenKind::Import,
            TokenKind::As,
            TokenKind::Class,
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::Var,
            TokenKind::Identifier,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_literals() {
    let mut queue = DiagnosticQueue::new();
    let tokens = lex("12 3.25 \"hi there\"", &mut queue);
    assert_eq!(tokens[0].literal, Some(Literal::Number(12.0)));
    assert_eq!(tokens[1].literal, Some(Literal::Number(3.25)));
    assert_eq!(tokens[2].literal, Some(Literal::Str("hi there".into())));
    assert_eq!(tokens[2].lexeme, "\"hi there\"");
}

#[test]
fn test_lex_number_followed_by_dot() {
    // `1.` is a number then a dot; fraction digits are required.
    assert_eq!(
        kinds("1.foo"),
        vec![
            TokenKind::Number,
            TokenKind::Dot,
            TokenKind::Identifier,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_comments_and_lines() {
    let mut queue = DiagnosticQueue::new();
    let tokens = lex("var a; // trailing\n\n// whole line\nprint a;", &mut queue);
    let lines: Vec<u32> = tokens.iter().map(|t| t.line).collect();
    assert_eq!(lines, vec![1, 1, 1, 4, 4, 4, 4]);
    assert_eq!(tokens[3].lexeme, "print");
}

#[test]
fn test_lex_multiline_string_advances_line() {
    let mut queue = DiagnosticQueue::new();
    let tokens = lex("\"a\nb\" x", &mut queue);
    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[1].line, 2);
    assert_eq!(tokens[1].lexeme, "x");
}

#[test]
fn test_lex_unterminated_string() {
    let mut queue = DiagnosticQueue::new();
    let tokens = lex("var s = \"abc", &mut queue);
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![
            TokenKind::Var,
            TokenKind::Identifier,
            TokenKind::Equal,
            TokenKind::Eof
        ]
    );
    assert_eq!(queue.diagnostics().len(), 1);
    assert_eq!(
        queue.diagnostics()[0].to_string(),
        "[line 1] Error: Unterminated string."
    );
}

#[test]
fn test_lex_unexpected_character_continues() {
    let mut queue = DiagnosticQueue::new();
    let tokens = lex("a #\nb @ c", &mut queue);
    assert_eq!(tokens.len(), 4);
    assert_eq!(queue.error_count(), 2);
    assert_eq!(
        queue.diagnostics()[0].to_string(),
        "[line 1] Error: Unexpected character."
    );
}

#[test]
fn test_lex_spans() {
    let mut queue = DiagnosticQueue::new();
    let tokens = lex("var name", &mut queue);
    assert_eq!(tokens[1].span, Span::new(4, 8));
    assert_eq!(tokens[2].span, Span::point(8));
}

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_lexer {
    use super::super::lex;
    use lox_diagnostic::DiagnosticQueue;
    use lox_ir::{Literal, TokenKind};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn numbers_lex_to_their_value(int in 0u32..1_000_000, frac in 0u32..1000) {
            let text = format!("{int}.{frac}");
            let mut queue = DiagnosticQueue::new();
            let tokens = lex(&text, &mut queue);
            prop_assert_eq!(tokens.len(), 2);
            prop_assert_eq!(tokens[0].kind, TokenKind::Number);
            let expected: f64 = text.parse().unwrap_or_default();
            prop_assert_eq!(tokens[0].literal.clone(), Some(Literal::Number(expected)));
        }

        #[test]
        fn lexing_never_panics_and_ends_with_eof(source in "\\PC{0,64}") {
            let mut queue = DiagnosticQueue::new();
            let tokens = lex(&source, &mut queue);
            prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        }
    }
}
