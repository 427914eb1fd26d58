//! SQL Parser
//!
//! A hand-written recursive descent parser with Pratt expression parsing,
//! running over a rewindable [`TokenStream`]. Productions that try more than
//! one alternative save the cursor with [`Parser::mark`] and restore it with
//! [`Parser::reset`] when an alternative does not match.

mod cursor;
mod data_type;
mod error;
mod expr;
#[allow(clippy::module_inception)]
mod parser;
mod pratt;
mod query;
mod value;

pub use cursor::{Mark, TokenStream};
pub use error::{ErrorKind, ParseError};
pub use parser::{Parser, DEFAULT_RECURSION_LIMIT};
