//! Tests for parser error cases.

mod common;
use common::*;

use tern_sql::dialect::GenericDialect;
use tern_sql::lexer::{LexError, Span, Token, TokenKind};
use tern_sql::{ErrorKind, ParseError, Parser};

// ===================================================================
// Exhaustion
// ===================================================================

#[test]
fn end_of_input_is_exhaustion() {
    for sql in [
        "SELECT",
        "SELECT a FROM",
        "SELECT (1 + 2",
        "SELECT a FROM t WHERE",
        "SELECT a FROM t ORDER",
        "SELECT a FROM t GROUP",
        "SELECT a AS",
        "SELECT a NOT",
        "SELECT a IS NOT",
        "SELECT CAST(a AS",
        "WITH x AS (SELECT 1)",
        "INSERT INTO t DEFAULT",
        "CREATE TABLE t (id INT PRIMARY",
        "CREATE MATERIALIZED",
        "ALTER TABLE t DROP COLUMN IF",
        "COPY t FROM",
    ] {
        let err = parse_err(sql);
        assert_eq!(err.kind(), ErrorKind::Exhaustion, "{sql}: {err}");
        assert_eq!(err.span(), None, "{sql}");
    }
}

#[test]
fn exhaustion_names_what_was_expected() {
    let err = parse_err("DELETE");
    assert_eq!(
        err,
        ParseError::Exhausted {
            expected: String::from("FROM"),
        }
    );
    assert_eq!(err.to_string(), "unexpected end of input: expected FROM");
}

#[test]
fn trailing_whitespace_and_comments_count_as_end() {
    let err = parse_err("SELECT a FROM /* table goes here */ \n -- nothing\n");
    assert_eq!(err.kind(), ErrorKind::Exhaustion);
}

// ===================================================================
// Grammar violations and unexpected tokens
// ===================================================================

#[test]
fn missing_delimiter_reports_previous_token() {
    let err = parse_err("SELECT (1 + 2 FROM t");
    let ParseError::GrammarViolation {
        after,
        expected,
        found,
    } = &err
    else {
        panic!("expected grammar violation, got {err:?}");
    };
    assert_eq!(after, "2");
    assert_eq!(expected, "`)`");
    assert!(found.is_keyword(tern_sql::lexer::Keyword::From));
    assert_eq!(err.span(), Some(Span::new(14, 18)));
}

#[test]
fn violation_at_start_of_input() {
    let tokens = vec![Token::from(TokenKind::Comma)];
    let err = Parser::new(tokens)
        .expect_token(&TokenKind::LeftParen)
        .unwrap_err();
    assert!(matches!(
        err,
        ParseError::GrammarViolation { ref after, .. } if after == "start of input"
    ));
}

#[test]
fn reserved_word_where_identifier_expected() {
    let err = parse_err("SELECT * FROM select");
    assert_eq!(err.kind(), ErrorKind::UnexpectedToken);
    assert_eq!(err.span(), Some(Span::new(14, 20)));
}

#[test]
fn quoted_reserved_word_is_an_identifier() {
    let s = parse_select("SELECT \"from\" FROM \"select\"");
    assert_eq!(s.from.len(), 1);
}

// ===================================================================
// Literals
// ===================================================================

#[test]
fn malformed_numeric_lexemes() {
    let err = parse_err("SELECT 1.2.3");
    let ParseError::MalformedLiteral {
        literal,
        target,
        span,
        ..
    } = &err
    else {
        panic!("expected malformed literal, got {err:?}");
    };
    assert_eq!(literal, "1.2.3");
    assert_eq!(*target, "float");
    assert_eq!(*span, Span::new(7, 12));

    assert_eq!(
        parse_err("SELECT 99999999999999999999").kind(),
        ErrorKind::MalformedLiteral
    );
}

#[test]
fn lexer_errors_are_wrapped() {
    let err = parse_err("SELECT 'unterminated");
    assert_eq!(err.kind(), ErrorKind::Lex);
    assert!(matches!(
        err,
        ParseError::Lex(LexError::UnterminatedString { .. })
    ));
    assert_eq!(parse_err("SELECT a ? b").kind(), ErrorKind::Lex);
}

// ===================================================================
// Recursion limit
// ===================================================================

#[test]
fn configured_recursion_limit() {
    let sql = format!("{}1{}", "(".repeat(20), ")".repeat(20));
    let err = Parser::from_sql(&GenericDialect, &sql)
        .unwrap()
        .with_recursion_limit(10)
        .parse_expr()
        .unwrap_err();
    assert_eq!(err, ParseError::RecursionLimit { limit: 10 });

    let mut parser = Parser::from_sql(&GenericDialect, &sql)
        .unwrap()
        .with_recursion_limit(64);
    assert!(parser.parse_expr().is_ok());
}

#[test]
fn nested_subqueries_count_towards_the_limit() {
    let sql = format!(
        "SELECT {}1{}",
        "(SELECT ".repeat(12),
        ")".repeat(12)
    );
    let err = Parser::from_sql(&GenericDialect, &sql)
        .unwrap()
        .with_recursion_limit(12)
        .parse_statement()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RecursionLimit);
}

/// Builds `depth` levels of `open` around `core`, closed by `close`.
fn nest(open: &str, core: &str, close: &str, depth: usize) -> String {
    format!("{}{core}{}", open.repeat(depth), close.repeat(depth))
}

#[test]
fn deep_nesting_fails_cleanly_with_default_limit() {
    init_tracing();
    for depth in [60, 150, 10_000] {
        for sql in [
            String::from("SELECT ") + &nest("(", "1", ")", depth),
            String::from("SELECT ") + &nest("(SELECT ", "1", ")", depth),
            nest("SELECT * FROM (", "SELECT 1", ") t", depth),
            String::from("SELECT 1") + &nest(" UNION (SELECT 1", "", ")", depth),
            String::from("SELECT ") + &nest("CASE WHEN ", "1", " THEN 1 END", depth),
            String::from("SELECT ") + &nest("NOT ", "a", "", depth),
            String::from("SELECT ") + &nest("f(", "1", ")", depth),
        ] {
            let err = tern_sql::parse_sql(&GenericDialect, &sql).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::RecursionLimit, "{}", &sql[..40]);
            assert_eq!(
                *err.root_cause(),
                ParseError::RecursionLimit {
                    limit: tern_sql::parser::DEFAULT_RECURSION_LIMIT
                }
            );
        }
    }
}

#[test]
fn moderate_nesting_stays_within_default_limit() {
    for sql in [
        String::from("SELECT ") + &nest("(", "1", ")", 40),
        nest("SELECT * FROM (", "SELECT 1", ") t", 12),
        String::from("SELECT ") + &nest("(SELECT ", "1", ")", 12),
        String::from("SELECT ") + &nest("CASE WHEN ", "1", " THEN 1 END", 40),
    ] {
        assert!(tern_sql::parse_sql(&GenericDialect, &sql).is_ok(), "{sql}");
    }
}

// ===================================================================
// Context
// ===================================================================

#[test]
fn context_wraps_but_kind_looks_through() {
    let err = parse_err("CREATE VIEW v AS WITH c AS (SELECT 1 +) SELECT 1");
    assert_eq!(err.kind(), ErrorKind::UnexpectedToken);
    let message = err.to_string();
    assert!(message.starts_with("in definition of view `v`"), "{message}");
    assert!(message.contains("in common table expression `c`"), "{message}");
    assert!(matches!(
        err.root_cause(),
        ParseError::UnexpectedToken { .. }
    ));
}
