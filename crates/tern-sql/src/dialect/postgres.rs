//! PostgreSQL dialect.

use super::Dialect;
use crate::lexer::Keyword;

/// PostgreSQL lexical rules.
///
/// `LEFT` and `RIGHT` double as function names in PostgreSQL, so they are not
/// reserved here; the parser still refuses them as implicit aliases.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgreSqlDialect;

impl PostgreSqlDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for PostgreSqlDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn is_identifier_part(&self, ch: char) -> bool {
        ch.is_alphanumeric() || ch == '_' || ch == '$'
    }

    fn is_reserved_keyword(&self, word: &str) -> bool {
        match Keyword::from_str(word) {
            Some(Keyword::Left | Keyword::Right) => false,
            Some(kw) => kw.is_reserved(),
            None => false,
        }
    }
}
