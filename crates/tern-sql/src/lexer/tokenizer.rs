//! SQL Tokenizer implementation.

use tracing::debug;

use super::{LexError, Span, Token, TokenKind, Whitespace, Word};
use crate::dialect::Dialect;

/// A lexer that tokenizes SQL input according to a [`Dialect`].
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// Lexical rules.
    dialect: &'a dyn Dialect,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub fn new(input: &'a str, dialect: &'a dyn Dialect) -> Self {
        Self {
            input,
            dialect,
            pos: 0,
            start: 0,
        }
    }

    /// Tokenizes the entire input, whitespace and comments included.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] on unterminated literals, identifiers or
    /// comments, and on characters that start no token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        debug!(tokens = tokens.len(), dialect = self.dialect.name(), "tokenized input");
        Ok(tokens)
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Advances if the current character is `expected`.
    fn advance_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Creates a span from start to current position.
    const fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// Creates a token with the current span.
    const fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.make_span())
    }

    /// Scans the next token, or `None` at end of input.
    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.start = self.pos;
        let Some(c) = self.advance() else {
            return Ok(None);
        };

        let kind = match c {
            ' ' => TokenKind::Whitespace(Whitespace::Space),
            '\t' => TokenKind::Whitespace(Whitespace::Tab),
            '\n' => TokenKind::Whitespace(Whitespace::Newline),
            '\r' => {
                self.advance_if('\n');
                TokenKind::Whitespace(Whitespace::Newline)
            }

            '-' if self.peek() == Some('-') => {
                self.advance();
                self.scan_line_comment()
            }
            '/' if self.peek() == Some('*') => {
                self.advance();
                self.scan_block_comment()?
            }

            // National string literal, otherwise an identifier starting with N
            'N' | 'n' if self.peek() == Some('\'') => {
                TokenKind::NationalStringLiteral(self.scan_string()?)
            }

            '\'' => {
                self.pos = self.start;
                TokenKind::SingleQuotedString(self.scan_string()?)
            }

            c if self.dialect.is_delimited_identifier_start(c) => {
                self.scan_quoted_identifier(c)?
            }

            c if c.is_ascii_digit() => {
                self.pos = self.start;
                self.scan_number()
            }

            c if self.dialect.is_identifier_start(c) => {
                self.pos = self.start;
                self.scan_word()
            }

            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '.' => TokenKind::Dot,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '=' => TokenKind::Eq,
            ':' => {
                if self.advance_if(':') {
                    TokenKind::DoubleColon
                } else {
                    TokenKind::Colon
                }
            }
            '<' => {
                if self.advance_if('=') {
                    TokenKind::LtEq
                } else if self.advance_if('>') {
                    TokenKind::NotEq
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.advance_if('=') {
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            '!' if self.advance_if('=') => TokenKind::NotEq,
            c if c.is_whitespace() => TokenKind::Whitespace(Whitespace::Space),

            ch => {
                return Err(LexError::UnexpectedChar {
                    ch,
                    span: self.make_span(),
                });
            }
        };

        Ok(Some(self.make_token(kind)))
    }

    /// Scans `-- ...` after the two dashes; the line break is left for the next token.
    fn scan_line_comment(&mut self) -> TokenKind {
        let body_start = self.pos;
        while self.peek().is_some_and(|c| c != '\n' && c != '\r') {
            self.advance();
        }
        TokenKind::Whitespace(Whitespace::SingleLineComment(String::from(
            &self.input[body_start..self.pos],
        )))
    }

    /// Scans `/* ... */` after the opening delimiter.
    fn scan_block_comment(&mut self) -> Result<TokenKind, LexError> {
        let body_start = self.pos;
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    let body = String::from(&self.input[body_start..self.pos - 1]);
                    self.advance();
                    return Ok(TokenKind::Whitespace(Whitespace::MultiLineComment(body)));
                }
                Some(_) => {}
                None => {
                    return Err(LexError::UnterminatedComment {
                        span: self.make_span(),
                    });
                }
            }
        }
    }

    /// Scans an unquoted identifier or keyword.
    fn scan_word(&mut self) -> TokenKind {
        while self.peek().is_some_and(|c| self.dialect.is_identifier_part(c)) {
            self.advance();
        }
        let text = &self.input[self.start..self.pos];
        let reserved = self.dialect.is_reserved_keyword(text);
        TokenKind::Word(Word::new(text, None, reserved))
    }

    /// Scans a delimited identifier; the opening quote is already consumed.
    fn scan_quoted_identifier(&mut self, quote: char) -> Result<TokenKind, LexError> {
        let mut value = String::new();
        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    if self.advance_if(quote) {
                        value.push(quote);
                    } else {
                        return Ok(TokenKind::Word(Word::new(value, Some(quote), false)));
                    }
                }
                Some(c) => value.push(c),
                None => {
                    return Err(LexError::UnterminatedQuotedIdentifier {
                        span: self.make_span(),
                    });
                }
            }
        }
    }

    /// Scans a numeric lexeme: digits and dots, kept verbatim.
    ///
    /// Validation happens in the parser so that a malformed lexeme like
    /// `1.2.3` surfaces as a literal error with the token attached.
    fn scan_number(&mut self) -> TokenKind {
        while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '.') {
            self.advance();
        }
        TokenKind::Number(String::from(&self.input[self.start..self.pos]))
    }

    /// Scans a single-quoted string starting at the current position.
    fn scan_string(&mut self) -> Result<String, LexError> {
        self.advance(); // opening quote
        let mut value = String::new();
        loop {
            match self.advance() {
                Some('\'') => {
                    if self.advance_if('\'') {
                        value.push('\'');
                    } else {
                        return Ok(value);
                    }
                }
                Some(c) => value.push(c),
                None => {
                    return Err(LexError::UnterminatedString {
                        span: self.make_span(),
                    });
                }
            }
        }
    }
}
