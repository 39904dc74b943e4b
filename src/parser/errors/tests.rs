//! Integration tests for the errors module

use super::*;
use crate::parser::{TokenError, TokenId, TokenKind, parse};
use text_size::{TextRange, TextSize};

#[test]
fn test_error_code_exhaustiveness() {
    let codes = [ErrorCode::E0101, ErrorCode::E0201, ErrorCode::E0202, ErrorCode::E0203];

    for code in codes {
        assert!(
            !code.default_message().is_empty(),
            "code {:?} has empty default_message()",
            code
        );
        assert!(
            !code.category_description().is_empty(),
            "code {:?} has empty category_description()",
            code
        );

        let s = code.as_str();
        assert!(s.starts_with('E'), "code {:?} doesn't start with E", code);
        assert_eq!(s.len(), 5, "code {:?} should be 5 chars", code);
    }
}

#[test]
fn test_complete_error_workflow() {
    let parse = parse("Smith Jones\n\nAnn ~ Bob\n");
    let errors = parse.errors();

    let invalid = errors.iter().find(|e| e.code == ErrorCode::E0101);
    let range = TextRange::new(TextSize::new(17), TextSize::new(18));
    assert!(invalid.is_some_and(|e| e.range == range));
    assert!(invalid.is_some_and(|e| e.severity == Severity::Warning));
    assert!(errors.iter().all(|e| e.token.is_some()));
}

#[test]
fn test_flagged_token_round_trip() {
    let mut parse = parse("Ann");
    parse.tokens[0].error = Some(TokenError::Unexpected);

    let errors = parse.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, ErrorCode::E0201);
    assert_eq!(errors[0].token, Some(TokenId(0)));
    assert_eq!(parse.tokens[0].kind, TokenKind::Surname);
}

#[test]
fn test_severity_by_code() {
    let parse = parse("Ann - Bob = 1. Cid\n\n2. Dee\n");
    let errors = parse.errors();

    let codes: Vec<_> = errors.iter().map(|e| (e.code, e.severity)).collect();
    assert_eq!(
        codes,
        vec![
            (ErrorCode::E0202, Severity::Error),
            (ErrorCode::E0203, Severity::Warning),
        ]
    );
    assert!(errors[0].severity.is_error());
    assert_eq!(Severity::default(), Severity::Error);
}
