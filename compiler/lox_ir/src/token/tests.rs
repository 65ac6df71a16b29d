use super::*;

#[test]
fn test_symbols() {
    assert_eq!(TokenKind::PlusEqual.as_symbol(), Some("+="));
    assert_eq!(TokenKind::Import.as_symbol(), Some("import"));
    assert_eq!(TokenKind::Identifier.as_symbol(), None);
    assert_eq!(TokenKind::Backslash.to_string(), "\\");
    assert_eq!(TokenKind::Eof.to_string(), "Eof");
}

#[test]
fn test_sync_points() {
    for kind in [TokenKind::Class, TokenKind::Return, TokenKind::While] {
        assert!(kind.starts_declaration());
    }
    assert!(!TokenKind::Semicolon.starts_declaration());
    assert!(!TokenKind::Import.starts_declaration());
}

#[test]
fn test_token_literal() {
    let token = Token::dummy(TokenKind::Number, "1.5").with_literal(Literal::Number(1.5));
    assert_eq!(token.literal, Some(Literal::Number(1.5)));
    assert_eq!(format!("{token:?}"), "Number \"1.5\" = 1.5 @ line 0 (0..0)");
}
