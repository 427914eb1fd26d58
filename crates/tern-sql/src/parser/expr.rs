//! Expression parsing by precedence climbing.

use super::error::ParseError;
use super::pratt::{infix_precedence, token_to_binary_op, token_to_unary_op, PREC_COMPARISON};
use super::Parser;
use crate::ast::{BinaryOp, Expr, Function, ObjectName};
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    /// Parses an expression.
    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_subexpr(0)
    }

    /// Parses an expression whose operators all bind tighter than `precedence`.
    pub fn parse_subexpr(&mut self, precedence: u8) -> Result<Expr, ParseError> {
        self.with_depth(|p| {
            let mut expr = p.parse_prefix()?;
            loop {
                let next = p.next_precedence();
                if precedence >= next {
                    break;
                }
                expr = p.parse_infix(expr, next)?;
            }
            Ok(expr)
        })
    }

    /// Returns the binding power of the upcoming infix operator, 0 if there is none.
    fn next_precedence(&mut self) -> u8 {
        let Some(token) = self.peek_token() else {
            return 0;
        };
        if !token.is_keyword(Keyword::Not) {
            return infix_precedence(&token.kind, None);
        }
        let mark = self.mark();
        let not = self.next_token();
        let following = self.peek_token().map(|t| t.kind.clone());
        self.reset(mark);
        not.map_or(0, |not| infix_precedence(&not.kind, following.as_ref()))
    }

    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        let token = self
            .next_token()
            .ok_or_else(|| ParseError::exhausted("an expression"))?;

        if let Some((op, precedence)) = token_to_unary_op(&token.kind) {
            let operand = self.parse_subexpr(precedence)?;
            return Ok(Expr::unary(op, operand));
        }

        match &token.kind {
            TokenKind::Word(w) => match w.keyword() {
                Some(Keyword::True | Keyword::False | Keyword::Null) => {
                    self.prev_token();
                    Ok(Expr::Literal(self.parse_value()?))
                }
                Some(Keyword::Case) => self.parse_case_expr(),
                Some(Keyword::Cast) => self.parse_cast_expr(),
                Some(Keyword::Exists) => {
                    self.expect_token(&TokenKind::LeftParen)?;
                    let query = self.parse_query()?;
                    self.expect_token(&TokenKind::RightParen)?;
                    Ok(Expr::Exists(Box::new(query)))
                }
                _ if w.reserved => Err(ParseError::unexpected("an expression", token)),
                _ => {
                    self.prev_token();
                    self.parse_identifier_expr()
                }
            },
            TokenKind::Number(_)
            | TokenKind::SingleQuotedString(_)
            | TokenKind::NationalStringLiteral(_) => {
                self.prev_token();
                Ok(Expr::Literal(self.parse_value()?))
            }
            TokenKind::LeftParen => {
                let expr = if self.peek_keyword(Keyword::Select) || self.peek_keyword(Keyword::With)
                {
                    Expr::Subquery(Box::new(self.parse_query()?))
                } else {
                    Expr::Nested(Box::new(self.parse_expr()?))
                };
                self.expect_token(&TokenKind::RightParen)?;
                Ok(expr)
            }
            _ => Err(ParseError::unexpected("an expression", token)),
        }
    }

    /// Parses `name`, `a.b.c` or a function call `name(...)`.
    fn parse_identifier_expr(&mut self) -> Result<Expr, ParseError> {
        let name = self.parse_object_name()?;
        if self.consume_token(&TokenKind::LeftParen) {
            return self.parse_function_args(name);
        }
        Ok(match <[_; 1]>::try_from(name.0) {
            Ok([ident]) => Expr::Identifier(ident),
            Err(parts) => Expr::QualifiedIdentifier(ObjectName(parts)),
        })
    }

    /// Parses the arguments of a call after the opening parenthesis.
    fn parse_function_args(&mut self, name: ObjectName) -> Result<Expr, ParseError> {
        let distinct = self.parse_keyword(Keyword::Distinct);

        let args = if self.peek_token_is(&TokenKind::RightParen) {
            vec![]
        } else if self.consume_token(&TokenKind::Star) {
            vec![Expr::Wildcard]
        } else {
            self.parse_comma_separated(Self::parse_expr)?
        };
        self.expect_token(&TokenKind::RightParen)?;

        Ok(Expr::Function(Function {
            name,
            args,
            distinct,
        }))
    }

    fn parse_infix(&mut self, expr: Expr, precedence: u8) -> Result<Expr, ParseError> {
        let token = self
            .next_token()
            .ok_or_else(|| ParseError::exhausted("an operator"))?;

        if let Some(op) = token_to_binary_op(&token.kind) {
            let right = self.parse_subexpr(precedence)?;
            return Ok(Expr::binary(expr, op, right));
        }

        match token.as_word().and_then(crate::lexer::Word::keyword) {
            Some(Keyword::Is) => {
                if self.parse_keyword(Keyword::Null) {
                    Ok(Expr::IsNull(Box::new(expr)))
                } else if self.parse_keyword(Keyword::Not) {
                    self.expect_keyword(Keyword::Null)?;
                    Ok(Expr::IsNotNull(Box::new(expr)))
                } else {
                    Err(self.violation("NULL or NOT NULL"))
                }
            }
            Some(Keyword::Not) => {
                if self.parse_keyword(Keyword::In) {
                    self.parse_in(expr, true)
                } else if self.parse_keyword(Keyword::Between) {
                    self.parse_between(expr, true)
                } else if self.parse_keyword(Keyword::Like) {
                    let right = self.parse_subexpr(PREC_COMPARISON)?;
                    Ok(Expr::binary(expr, BinaryOp::NotLike, right))
                } else {
                    Err(self.violation("IN, BETWEEN or LIKE"))
                }
            }
            Some(Keyword::In) => self.parse_in(expr, false),
            Some(Keyword::Between) => self.parse_between(expr, false),
            _ if token.kind == TokenKind::DoubleColon => Ok(Expr::Cast {
                expr: Box::new(expr),
                data_type: self.parse_data_type()?,
            }),
            _ => Err(ParseError::unexpected("an infix operator", token)),
        }
    }

    /// Parses the rest of `expr [NOT] IN (...)` after IN.
    fn parse_in(&mut self, expr: Expr, negated: bool) -> Result<Expr, ParseError> {
        self.expect_token(&TokenKind::LeftParen)?;
        let in_expr = if self.peek_keyword(Keyword::Select) || self.peek_keyword(Keyword::With) {
            Expr::InSubquery {
                expr: Box::new(expr),
                subquery: Box::new(self.parse_query()?),
                negated,
            }
        } else {
            Expr::InList {
                expr: Box::new(expr),
                list: self.parse_comma_separated(Self::parse_expr)?,
                negated,
            }
        };
        self.expect_token(&TokenKind::RightParen)?;
        Ok(in_expr)
    }

    /// Parses the rest of `expr [NOT] BETWEEN low AND high` after BETWEEN.
    ///
    /// The bounds stop below logical AND, so the connecting AND is never
    /// read as a conjunction.
    fn parse_between(&mut self, expr: Expr, negated: bool) -> Result<Expr, ParseError> {
        let low = self.parse_subexpr(PREC_COMPARISON)?;
        self.expect_keyword(Keyword::And)?;
        let high = self.parse_subexpr(PREC_COMPARISON)?;
        Ok(Expr::Between {
            expr: Box::new(expr),
            negated,
            low: Box::new(low),
            high: Box::new(high),
        })
    }

    /// Parses `CASE [operand] WHEN ... THEN ... [ELSE ...] END` after CASE.
    fn parse_case_expr(&mut self) -> Result<Expr, ParseError> {
        let operand = if self.peek_keyword(Keyword::When) {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };

        self.expect_keyword(Keyword::When)?;
        let mut conditions = vec![];
        let mut results = vec![];
        loop {
            conditions.push(self.parse_expr()?);
            self.expect_keyword(Keyword::Then)?;
            results.push(self.parse_expr()?);
            if !self.parse_keyword(Keyword::When) {
                break;
            }
        }

        let else_result = if self.parse_keyword(Keyword::Else) {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect_keyword(Keyword::End)?;

        Ok(Expr::Case {
            operand,
            conditions,
            results,
            else_result,
        })
    }

    /// Parses `CAST(expr AS type)` after CAST.
    fn parse_cast_expr(&mut self) -> Result<Expr, ParseError> {
        self.expect_token(&TokenKind::LeftParen)?;
        let expr = self.parse_expr()?;
        self.expect_keyword(Keyword::As)?;
        let data_type = self.parse_data_type()?;
        self.expect_token(&TokenKind::RightParen)?;
        Ok(Expr::Cast {
            expr: Box::new(expr),
            data_type,
        })
    }

    /// Parses `( expr )`.
    pub(super) fn parse_parenthesized_expr(&mut self) -> Result<Expr, ParseError> {
        self.expect_token(&TokenKind::LeftParen)?;
        let expr = self.parse_expr()?;
        self.expect_token(&TokenKind::RightParen)?;
        Ok(expr)
    }
}
