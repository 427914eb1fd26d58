//! Lexer error types.

use super::Span;

/// An error raised while turning source text into tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// A `'...'` literal ran to the end of input.
    #[error("unterminated string literal starting at {span}")]
    UnterminatedString {
        /// Where the literal starts.
        span: Span,
    },

    /// A delimited identifier ran to the end of input.
    #[error("unterminated quoted identifier starting at {span}")]
    UnterminatedQuotedIdentifier {
        /// Where the identifier starts.
        span: Span,
    },

    /// A `/* ... */` comment ran to the end of input.
    #[error("unterminated block comment starting at {span}")]
    UnterminatedComment {
        /// Where the comment starts.
        span: Span,
    },

    /// A character that starts no token.
    #[error("unexpected character {ch:?} at {span}")]
    UnexpectedChar {
        /// The offending character.
        ch: char,
        /// Its location.
        span: Span,
    },
}
