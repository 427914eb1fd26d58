//! # tern-sql
//!
//! A recursive descent SQL parser with Pratt expression parsing over a
//! rewindable token stream.
//!
//! This crate provides:
//! - A parser core that turns a `Vec<Token>` into [`Statement`]s
//! - A reference lexer and two dialects for going straight from text
//! - Structured errors that never abort the host process
//!
//! ## Parsing text
//!
//! ```rust
//! use tern_sql::ast::{SetExpr, Statement};
//! use tern_sql::dialect::GenericDialect;
//!
//! let statements = tern_sql::parse_sql(
//!     &GenericDialect,
//!     "WITH recent AS (SELECT id FROM orders) SELECT count(*) FROM recent;",
//! )
//! .unwrap();
//!
//! let Statement::Query(query) = &statements[0] else { panic!() };
//! assert_eq!(query.ctes.len(), 1);
//! assert!(matches!(query.body, SetExpr::Select(_)));
//! ```
//!
//! ## Bringing your own tokens
//!
//! The parser does not depend on the bundled lexer. Any token source can
//! build [`Token`]s directly:
//!
//! ```rust
//! use tern_sql::lexer::{Token, TokenKind};
//! use tern_sql::Parser;
//!
//! let tokens = vec![
//!     Token::from(TokenKind::Number(String::from("1"))),
//!     Token::from(TokenKind::Plus),
//!     Token::from(TokenKind::Number(String::from("2"))),
//! ];
//! let expr = Parser::new(tokens).parse_expr().unwrap();
//! assert!(matches!(expr, tern_sql::ast::Expr::Binary { .. }));
//! ```

pub mod ast;
pub mod dialect;
pub mod lexer;
pub mod parser;

pub use ast::{Expr, Query, Statement};
pub use dialect::{Dialect, GenericDialect, PostgreSqlDialect};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{ErrorKind, ParseError, Parser};

/// Tokenizes and parses `sql` into a list of statements.
pub fn parse_sql(dialect: &dyn Dialect, sql: &str) -> Result<Vec<Statement>, ParseError> {
    Parser::from_sql(dialect, sql)?.parse_statements()
}
