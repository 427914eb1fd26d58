//! The data type sub-grammar.

use super::error::ParseError;
use super::Parser;
use crate::ast::DataType;
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    /// Parses a data type, as in `CAST(x AS type)`, `x::type` or a column definition.
    ///
    /// Names the grammar does not know become [`DataType::Custom`].
    pub fn parse_data_type(&mut self) -> Result<DataType, ParseError> {
        let token = self
            .next_token()
            .ok_or_else(|| ParseError::exhausted("a data type"))?;

        let data_type = match token.as_word().and_then(crate::lexer::Word::keyword) {
            Some(Keyword::Boolean) => DataType::Boolean,
            Some(Keyword::Real) => DataType::Real,
            Some(Keyword::Smallint) => DataType::SmallInt,
            Some(Keyword::Int | Keyword::Integer) => DataType::Int,
            Some(Keyword::Bigint) => DataType::BigInt,
            Some(Keyword::Uuid) => DataType::Uuid,
            Some(Keyword::Date) => DataType::Date,
            Some(Keyword::Regclass) => DataType::Regclass,
            Some(Keyword::Bytea) => DataType::Bytea,
            Some(Keyword::Float) => DataType::Float(self.parse_optional_precision()?),
            Some(Keyword::Varchar) => DataType::Varchar(self.parse_optional_precision()?),
            Some(Keyword::Char | Keyword::Character) => {
                if self.parse_keyword(Keyword::Varying) {
                    DataType::Varchar(self.parse_optional_precision()?)
                } else {
                    DataType::Char(self.parse_optional_precision()?)
                }
            }
            Some(Keyword::Double) => {
                self.expect_keyword(Keyword::Precision)?;
                DataType::Double
            }
            Some(Keyword::Timestamp | Keyword::Time) => {
                if self.parse_keyword(Keyword::With) || self.parse_keyword(Keyword::Without) {
                    self.expect_keyword(Keyword::Time)?;
                    self.expect_keyword(Keyword::Zone)?;
                }
                DataType::Time
            }
            Some(Keyword::Text) => {
                if self.consume_token(&TokenKind::LeftBracket) {
                    self.expect_token(&TokenKind::RightBracket)?;
                    DataType::Array(Box::new(DataType::Text))
                } else {
                    DataType::Text
                }
            }
            Some(Keyword::Numeric | Keyword::Decimal | Keyword::Dec) => {
                let (precision, scale) = self.parse_optional_precision_scale()?;
                DataType::Decimal { precision, scale }
            }
            _ => {
                self.prev_token();
                DataType::Custom(self.parse_object_name()?)
            }
        };

        Ok(data_type)
    }

    /// Parses an optional `(n)`.
    fn parse_optional_precision(&mut self) -> Result<Option<u16>, ParseError> {
        if !self.consume_token(&TokenKind::LeftParen) {
            return Ok(None);
        }
        let n = self.parse_literal_uint()?;
        self.expect_token(&TokenKind::RightParen)?;
        Ok(Some(n))
    }

    /// Parses an optional `(p)` or `(p, s)`.
    fn parse_optional_precision_scale(&mut self) -> Result<(Option<u16>, Option<u16>), ParseError> {
        if !self.consume_token(&TokenKind::LeftParen) {
            return Ok((None, None));
        }
        let precision = self.parse_literal_uint()?;
        let scale = if self.consume_token(&TokenKind::Comma) {
            Some(self.parse_literal_uint()?)
        } else {
            None
        };
        self.expect_token(&TokenKind::RightParen)?;
        Ok((Some(precision), scale))
    }
}
