//! SQL Dialect support.
//!
//! A dialect decides the lexical details the reference lexer needs: which
//! characters start and continue an identifier, which characters delimit a
//! quoted identifier, and which words are reserved. The parser never consults
//! the dialect directly; it only sees the reserved flag on each [`Word`].
//!
//! [`Word`]: crate::lexer::Word

mod generic;
mod postgres;

pub use generic::GenericDialect;
pub use postgres::PostgreSqlDialect;

use crate::lexer::Keyword;

/// Trait for SQL dialect-specific lexical behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns true if `ch` can start an unquoted identifier.
    fn is_identifier_start(&self, ch: char) -> bool {
        ch.is_alphabetic() || ch == '_'
    }

    /// Returns true if `ch` can continue an unquoted identifier.
    fn is_identifier_part(&self, ch: char) -> bool {
        ch.is_alphanumeric() || ch == '_'
    }

    /// Returns true if `ch` opens a delimited (quoted) identifier.
    fn is_delimited_identifier_start(&self, ch: char) -> bool {
        ch == self.identifier_quote()
    }

    /// Returns the preferred identifier quote character.
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Returns true if `word` is reserved and cannot be used as a bare identifier.
    fn is_reserved_keyword(&self, word: &str) -> bool {
        Keyword::from_str(word).is_some_and(|kw| kw.is_reserved())
    }
}
