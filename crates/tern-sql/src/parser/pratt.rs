//! Binding powers for the Pratt expression parser.
//!
//! Higher binds tighter. A token that is not an infix operator has power 0,
//! which is also what end of input yields, so the climbing loop stops there.

use crate::ast::{BinaryOp, SetOperator, UnaryOp};
use crate::lexer::{Keyword, TokenKind};

pub const PREC_OR: u8 = 5;
pub const PREC_AND: u8 = 10;
/// Prefix NOT.
pub const PREC_NOT: u8 = 15;
pub const PREC_IS: u8 = 17;
/// Comparisons, IN, BETWEEN and LIKE, negated or not.
pub const PREC_COMPARISON: u8 = 20;
pub const PREC_ADDITIVE: u8 = 30;
pub const PREC_MULTIPLICATIVE: u8 = 40;
/// Prefix `+` and `-`.
pub const PREC_UNARY: u8 = 45;
/// Postfix `::type`.
pub const PREC_CAST: u8 = 50;

pub const PREC_UNION: u8 = 10;
pub const PREC_INTERSECT: u8 = 20;

/// Returns the keyword a token spells, if any.
fn keyword_of(kind: &TokenKind) -> Option<Keyword> {
    match kind {
        TokenKind::Word(word) => word.keyword(),
        _ => None,
    }
}

/// Returns the infix binding power of `kind`.
///
/// `following` is the token after `kind`, `None` at end of input. It is
/// only consulted for NOT, which is infix solely as the first half of
/// NOT IN, NOT BETWEEN and NOT LIKE and then binds like the plain predicate.
/// A trailing NOT still counts as infix so the missing predicate is reported
/// as exhaustion.
#[must_use]
pub fn infix_precedence(kind: &TokenKind, following: Option<&TokenKind>) -> u8 {
    match kind {
        TokenKind::Eq
        | TokenKind::NotEq
        | TokenKind::Lt
        | TokenKind::LtEq
        | TokenKind::Gt
        | TokenKind::GtEq => PREC_COMPARISON,
        TokenKind::Plus | TokenKind::Minus => PREC_ADDITIVE,
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => PREC_MULTIPLICATIVE,
        TokenKind::DoubleColon => PREC_CAST,
        TokenKind::Word(_) => match keyword_of(kind) {
            Some(Keyword::Or) => PREC_OR,
            Some(Keyword::And) => PREC_AND,
            Some(Keyword::Is) => PREC_IS,
            Some(Keyword::In | Keyword::Between | Keyword::Like) => PREC_COMPARISON,
            Some(Keyword::Not) => match following.map(keyword_of) {
                None | Some(Some(Keyword::In | Keyword::Between | Keyword::Like)) => {
                    PREC_COMPARISON
                }
                Some(_) => 0,
            },
            _ => 0,
        },
        _ => 0,
    }
}

/// Converts a token to the binary operator it denotes as a plain infix.
#[must_use]
pub fn token_to_binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Percent => Some(BinaryOp::Mod),
        TokenKind::Eq => Some(BinaryOp::Eq),
        TokenKind::NotEq => Some(BinaryOp::NotEq),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::LtEq => Some(BinaryOp::LtEq),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::GtEq => Some(BinaryOp::GtEq),
        _ => match keyword_of(kind) {
            Some(Keyword::And) => Some(BinaryOp::And),
            Some(Keyword::Or) => Some(BinaryOp::Or),
            Some(Keyword::Like) => Some(BinaryOp::Like),
            _ => None,
        },
    }
}

/// Converts a token to a prefix operator and the power its operand is parsed at.
#[must_use]
pub fn token_to_unary_op(kind: &TokenKind) -> Option<(UnaryOp, u8)> {
    match kind {
        TokenKind::Plus => Some((UnaryOp::Plus, PREC_UNARY)),
        TokenKind::Minus => Some((UnaryOp::Minus, PREC_UNARY)),
        _ if keyword_of(kind) == Some(Keyword::Not) => Some((UnaryOp::Not, PREC_NOT)),
        _ => None,
    }
}

/// Returns the set operator a token starts and its binding power.
#[must_use]
pub fn set_operator(kind: &TokenKind) -> Option<(SetOperator, u8)> {
    match keyword_of(kind)? {
        Keyword::Union => Some((SetOperator::Union, PREC_UNION)),
        Keyword::Except => Some((SetOperator::Except, PREC_UNION)),
        Keyword::Intersect => Some((SetOperator::Intersect, PREC_INTERSECT)),
        _ => None,
    }
}
