//! SQL Lexer/Tokenizer
//!
//! A reference lexer producing the token sequence the parser consumes.
//! Whitespace and comments are kept as tokens; the parser's cursor skips them.

mod error;
mod span;
mod token;
mod tokenizer;

pub use error::LexError;
pub use span::Span;
pub use token::{Keyword, Token, TokenKind, Whitespace, Word};
pub use tokenizer::Lexer;
