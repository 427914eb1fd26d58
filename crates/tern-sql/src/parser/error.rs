//! Parser error types.

use crate::lexer::{LexError, Span, Token};

/// A parse error.
///
/// Every failure is an ordinary value; the parser never panics on bad input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// The input ended where more tokens were required.
    #[error("unexpected end of input: expected {expected}")]
    Exhausted {
        /// What the parser was looking for.
        expected: String,
    },

    /// A token that starts no production valid at this point.
    #[error("unexpected token `{found}` at {span}: expected {expected}", span = .found.span)]
    UnexpectedToken {
        /// What the parser was looking for.
        expected: String,
        /// The offending token.
        found: Token,
    },

    /// A literal whose text does not convert to its target type.
    #[error("malformed {target} literal `{literal}` at {span}: {reason}")]
    MalformedLiteral {
        /// The literal text.
        literal: String,
        /// The type it was converted to.
        target: &'static str,
        /// Why conversion failed.
        reason: String,
        /// Its location.
        span: Span,
    },

    /// A mandatory token is missing inside a production that already started.
    #[error("expected {expected} after `{after}`, found `{found}` at {span}", span = .found.span)]
    GrammarViolation {
        /// The token the production started from, or was last consumed.
        after: String,
        /// What the parser was looking for.
        expected: String,
        /// The offending token.
        found: Token,
    },

    /// Nesting exceeded the parser's recursion limit.
    #[error("recursion limit of {limit} exceeded")]
    RecursionLimit {
        /// The configured limit.
        limit: usize,
    },

    /// The source text could not be tokenized.
    #[error("lexer error: {0}")]
    Lex(#[from] LexError),

    /// An error annotated with the production it happened in.
    #[error("{context}: {source}")]
    Context {
        /// Where the error happened.
        context: String,
        /// The underlying error.
        source: Box<ParseError>,
    },
}

/// The category of a [`ParseError`], looking through any context wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Exhaustion,
    UnexpectedToken,
    MalformedLiteral,
    GrammarViolation,
    RecursionLimit,
    Lex,
}

impl ParseError {
    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: Token) -> Self {
        Self::UnexpectedToken {
            expected: expected.into(),
            found,
        }
    }

    /// Creates an "unexpected end of input" error.
    #[must_use]
    pub fn exhausted(expected: impl Into<String>) -> Self {
        Self::Exhausted {
            expected: expected.into(),
        }
    }

    /// Wraps this error with a description of where it happened.
    #[must_use]
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping context wrappers.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Context { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Returns the category of the innermost error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self.root_cause() {
            Self::Exhausted { .. } => ErrorKind::Exhaustion,
            Self::UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
            Self::MalformedLiteral { .. } => ErrorKind::MalformedLiteral,
            Self::GrammarViolation { .. } => ErrorKind::GrammarViolation,
            Self::RecursionLimit { .. } => ErrorKind::RecursionLimit,
            Self::Lex(_) | Self::Context { .. } => ErrorKind::Lex,
        }
    }

    /// Returns the source location of the innermost error, if it has one.
    #[must_use]
    pub fn span(&self) -> Option<Span> {
        match self.root_cause() {
            Self::UnexpectedToken { found, .. } | Self::GrammarViolation { found, .. } => {
                Some(found.span)
            }
            Self::MalformedLiteral { span, .. } => Some(*span),
            Self::Lex(
                LexError::UnterminatedString { span }
                | LexError::UnterminatedQuotedIdentifier { span }
                | LexError::UnterminatedComment { span }
                | LexError::UnexpectedChar { span, .. },
            ) => Some(*span),
            _ => None,
        }
    }
}
