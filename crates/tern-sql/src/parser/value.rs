//! Literal values.

use super::error::ParseError;
use super::Parser;
use crate::ast::Literal;
use crate::lexer::{Keyword, Token, TokenKind};

impl Parser {
    /// Parses a literal: TRUE, FALSE, NULL, a number or a string.
    ///
    /// A number whose lexeme contains `.` becomes a float, otherwise an
    /// `i64`. Lexemes that do not convert, and tokens that are not values at
    /// all, are reported as malformed literals.
    pub fn parse_value(&mut self) -> Result<Literal, ParseError> {
        let token = self
            .next_token()
            .ok_or_else(|| ParseError::exhausted("a literal value"))?;
        match &token.kind {
            TokenKind::Word(w) => match w.keyword() {
                Some(Keyword::True) => Ok(Literal::Boolean(true)),
                Some(Keyword::False) => Ok(Literal::Boolean(false)),
                Some(Keyword::Null) => Ok(Literal::Null),
                _ => Err(not_a_literal(&token)),
            },
            TokenKind::Number(lexeme) if lexeme.contains('.') => lexeme
                .parse::<f64>()
                .map(Literal::Float)
                .map_err(|e| malformed(lexeme, "float", &e, &token)),
            TokenKind::Number(lexeme) => lexeme
                .parse::<i64>()
                .map(Literal::Integer)
                .map_err(|e| malformed(lexeme, "integer", &e, &token)),
            TokenKind::SingleQuotedString(s) => Ok(Literal::String(s.clone())),
            TokenKind::NationalStringLiteral(s) => Ok(Literal::NationalString(s.clone())),
            _ => Err(not_a_literal(&token)),
        }
    }

    /// Parses an unsigned size, precision or scale.
    pub fn parse_literal_uint(&mut self) -> Result<u16, ParseError> {
        let token = self
            .next_token()
            .ok_or_else(|| ParseError::exhausted("an unsigned integer"))?;
        match &token.kind {
            TokenKind::Number(lexeme) => lexeme
                .parse::<u16>()
                .map_err(|e| malformed(lexeme, "unsigned integer", &e, &token)),
            _ => Err(ParseError::unexpected("an unsigned integer", token)),
        }
    }
}

fn malformed(
    lexeme: &str,
    target: &'static str,
    reason: &impl core::fmt::Display,
    token: &Token,
) -> ParseError {
    ParseError::MalformedLiteral {
        literal: String::from(lexeme),
        target,
        reason: reason.to_string(),
        span: token.span,
    }
}

fn not_a_literal(token: &Token) -> ParseError {
    ParseError::MalformedLiteral {
        literal: token.kind.to_string(),
        target: "value",
        reason: String::from("token is not a value"),
        span: token.span,
    }
}
