//! A rewindable cursor over a token buffer.
//!
//! Whitespace and comments stay in the buffer so that indices line up with
//! what the lexer produced; every movement skips them transparently.

use crate::lexer::Token;

/// A saved cursor position, restored with [`TokenStream::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mark(usize);

impl Mark {
    /// Returns the raw buffer index this mark points at.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// An owned token buffer with a single movable index.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
    index: usize,
}

impl TokenStream {
    /// Creates a cursor positioned before the first token.
    #[must_use]
    pub const fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, index: 0 }
    }

    /// Returns the raw buffer position, whitespace included.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the underlying buffer.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns the next non-whitespace token without moving.
    #[must_use]
    pub fn peek(&self) -> Option<&Token> {
        self.tokens[self.index..].iter().find(|t| !t.is_whitespace())
    }

    /// Consumes and returns the next non-whitespace token.
    ///
    /// At end of input the index stays where it was.
    pub fn advance(&mut self) -> Option<&Token> {
        let offset = self.tokens[self.index..]
            .iter()
            .position(|t| !t.is_whitespace())?;
        let at = self.index + offset;
        self.index = at + 1;
        self.tokens.get(at)
    }

    /// Steps back over one non-whitespace token and the whitespace before it.
    ///
    /// This undoes exactly one [`advance`](Self::advance). At index zero it
    /// does nothing.
    pub fn retreat(&mut self) {
        let mut at = self.index;
        while at > 0 && self.tokens[at - 1].is_whitespace() {
            at -= 1;
        }
        if at == 0 {
            self.index = 0;
            return;
        }
        at -= 1;
        while at > 0 && self.tokens[at - 1].is_whitespace() {
            at -= 1;
        }
        self.index = at;
    }

    /// Returns the most recently consumed non-whitespace token.
    #[must_use]
    pub fn previous(&self) -> Option<&Token> {
        self.tokens[..self.index]
            .iter()
            .rev()
            .find(|t| !t.is_whitespace())
    }

    /// Returns true if only whitespace remains.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.peek().is_none()
    }

    /// Saves the current position.
    #[must_use]
    pub const fn mark(&self) -> Mark {
        Mark(self.index)
    }

    /// Restores a position saved by [`mark`](Self::mark).
    pub fn reset(&mut self, mark: Mark) {
        self.index = mark.0.min(self.tokens.len());
    }
}
