//! Token types shared by the lexer and the parser.

use core::fmt;

use super::Span;

/// Keyword names the parser knows how to match.
///
/// Whether a keyword is *reserved* (cannot be used as a bare identifier) is a
/// dialect decision recorded on each [`Word`]; the parser itself only ever
/// compares keyword names case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Queries
    Select,
    From,
    Where,
    Group,
    By,
    Having,
    Order,
    Limit,
    Offset,
    Distinct,
    All,
    As,
    With,
    Union,
    Intersect,
    Except,
    Asc,
    Desc,
    Nulls,
    First,
    Last,
    Row,
    Rows,

    // Joins
    Join,
    Inner,
    Left,
    Right,
    Full,
    Outer,
    Cross,
    Natural,
    On,
    Using,

    // Predicates and expressions
    And,
    Or,
    Not,
    In,
    Is,
    Null,
    True,
    False,
    Between,
    Like,
    Case,
    When,
    Then,
    Else,
    End,
    Cast,
    Exists,

    // Statements
    Insert,
    Into,
    Values,
    Default,
    Delete,
    Create,
    Table,
    View,
    Materialized,
    If,
    Alter,
    Add,
    Drop,
    Column,
    Rename,
    To,
    Cascade,
    Copy,
    Stdin,
    Stdout,

    // Constraints
    Constraint,
    Primary,
    Key,
    Unique,
    Foreign,
    References,
    Check,

    // Data types
    Boolean,
    Real,
    Double,
    Precision,
    Smallint,
    Int,
    Integer,
    Bigint,
    Float,
    Char,
    Character,
    Varying,
    Varchar,
    Numeric,
    Decimal,
    Dec,
    Date,
    Time,
    Timestamp,
    Without,
    Zone,
    Text,
    Bytea,
    Uuid,
    Regclass,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SELECT" => Some(Self::Select),
            "FROM" => Some(Self::From),
            "WHERE" => Some(Self::Where),
            "GROUP" => Some(Self::Group),
            "BY" => Some(Self::By),
            "HAVING" => Some(Self::Having),
            "ORDER" => Some(Self::Order),
            "LIMIT" => Some(Self::Limit),
            "OFFSET" => Some(Self::Offset),
            "DISTINCT" => Some(Self::Distinct),
            "ALL" => Some(Self::All),
            "AS" => Some(Self::As),
            "WITH" => Some(Self::With),
            "UNION" => Some(Self::Union),
            "INTERSECT" => Some(Self::Intersect),
            "EXCEPT" => Some(Self::Except),
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            "NULLS" => Some(Self::Nulls),
            "FIRST" => Some(Self::First),
            "LAST" => Some(Self::Last),
            "ROW" => Some(Self::Row),
            "ROWS" => Some(Self::Rows),
            "JOIN" => Some(Self::Join),
            "INNER" => Some(Self::Inner),
            "LEFT" => Some(Self::Left),
            "RIGHT" => Some(Self::Right),
            "FULL" => Some(Self::Full),
            "OUTER" => Some(Self::Outer),
            "CROSS" => Some(Self::Cross),
            "NATURAL" => Some(Self::Natural),
            "ON" => Some(Self::On),
            "USING" => Some(Self::Using),
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "NOT" => Some(Self::Not),
            "IN" => Some(Self::In),
            "IS" => Some(Self::Is),
            "NULL" => Some(Self::Null),
            "TRUE" => Some(Self::True),
            "FALSE" => Some(Self::False),
            "BETWEEN" => Some(Self::Between),
            "LIKE" => Some(Self::Like),
            "CASE" => Some(Self::Case),
            "WHEN" => Some(Self::When),
            "THEN" => Some(Self::Then),
            "ELSE" => Some(Self::Else),
            "END" => Some(Self::End),
            "CAST" => Some(Self::Cast),
            "EXISTS" => Some(Self::Exists),
            "INSERT" => Some(Self::Insert),
            "INTO" => Some(Self::Into),
            "VALUES" => Some(Self::Values),
            "DEFAULT" => Some(Self::Default),
            "DELETE" => Some(Self::Delete),
            "CREATE" => Some(Self::Create),
            "TABLE" => Some(Self::Table),
            "VIEW" => Some(Self::View),
            "MATERIALIZED" => Some(Self::Materialized),
            "IF" => Some(Self::If),
            "ALTER" => Some(Self::Alter),
            "ADD" => Some(Self::Add),
            "DROP" => Some(Self::Drop),
            "COLUMN" => Some(Self::Column),
            "RENAME" => Some(Self::Rename),
            "TO" => Some(Self::To),
            "CASCADE" => Some(Self::Cascade),
            "COPY" => Some(Self::Copy),
            "STDIN" => Some(Self::Stdin),
            "STDOUT" => Some(Self::Stdout),
            "CONSTRAINT" => Some(Self::Constraint),
            "PRIMARY" => Some(Self::Primary),
            "KEY" => Some(Self::Key),
            "UNIQUE" => Some(Self::Unique),
            "FOREIGN" => Some(Self::Foreign),
            "REFERENCES" => Some(Self::References),
            "CHECK" => Some(Self::Check),
            "BOOLEAN" => Some(Self::Boolean),
            "REAL" => Some(Self::Real),
            "DOUBLE" => Some(Self::Double),
            "PRECISION" => Some(Self::Precision),
            "SMALLINT" => Some(Self::Smallint),
            "INT" => Some(Self::Int),
            "INTEGER" => Some(Self::Integer),
            "BIGINT" => Some(Self::Bigint),
            "FLOAT" => Some(Self::Float),
            "CHAR" => Some(Self::Char),
            "CHARACTER" => Some(Self::Character),
            "VARYING" => Some(Self::Varying),
            "VARCHAR" => Some(Self::Varchar),
            "NUMERIC" => Some(Self::Numeric),
            "DECIMAL" => Some(Self::Decimal),
            "DEC" => Some(Self::Dec),
            "DATE" => Some(Self::Date),
            "TIME" => Some(Self::Time),
            "TIMESTAMP" => Some(Self::Timestamp),
            "WITHOUT" => Some(Self::Without),
            "ZONE" => Some(Self::Zone),
            "TEXT" => Some(Self::Text),
            "BYTEA" => Some(Self::Bytea),
            "UUID" => Some(Self::Uuid),
            "REGCLASS" => Some(Self::Regclass),
            _ => None,
        }
    }

    /// Returns the keyword as an upper-case string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::Group => "GROUP",
            Self::By => "BY",
            Self::Having => "HAVING",
            Self::Order => "ORDER",
            Self::Limit => "LIMIT",
            Self::Offset => "OFFSET",
            Self::Distinct => "DISTINCT",
            Self::All => "ALL",
            Self::As => "AS",
            Self::With => "WITH",
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::Nulls => "NULLS",
            Self::First => "FIRST",
            Self::Last => "LAST",
            Self::Row => "ROW",
            Self::Rows => "ROWS",
            Self::Join => "JOIN",
            Self::Inner => "INNER",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Full => "FULL",
            Self::Outer => "OUTER",
            Self::Cross => "CROSS",
            Self::Natural => "NATURAL",
            Self::On => "ON",
            Self::Using => "USING",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::In => "IN",
            Self::Is => "IS",
            Self::Null => "NULL",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Between => "BETWEEN",
            Self::Like => "LIKE",
            Self::Case => "CASE",
            Self::When => "WHEN",
            Self::Then => "THEN",
            Self::Else => "ELSE",
            Self::End => "END",
            Self::Cast => "CAST",
            Self::Exists => "EXISTS",
            Self::Insert => "INSERT",
            Self::Into => "INTO",
            Self::Values => "VALUES",
            Self::Default => "DEFAULT",
            Self::Delete => "DELETE",
            Self::Create => "CREATE",
            Self::Table => "TABLE",
            Self::View => "VIEW",
            Self::Materialized => "MATERIALIZED",
            Self::If => "IF",
            Self::Alter => "ALTER",
            Self::Add => "ADD",
            Self::Drop => "DROP",
            Self::Column => "COLUMN",
            Self::Rename => "RENAME",
            Self::To => "TO",
            Self::Cascade => "CASCADE",
            Self::Copy => "COPY",
            Self::Stdin => "STDIN",
            Self::Stdout => "STDOUT",
            Self::Constraint => "CONSTRAINT",
            Self::Primary => "PRIMARY",
            Self::Key => "KEY",
            Self::Unique => "UNIQUE",
            Self::Foreign => "FOREIGN",
            Self::References => "REFERENCES",
            Self::Check => "CHECK",
            Self::Boolean => "BOOLEAN",
            Self::Real => "REAL",
            Self::Double => "DOUBLE",
            Self::Precision => "PRECISION",
            Self::Smallint => "SMALLINT",
            Self::Int => "INT",
            Self::Integer => "INTEGER",
            Self::Bigint => "BIGINT",
            Self::Float => "FLOAT",
            Self::Char => "CHAR",
            Self::Character => "CHARACTER",
            Self::Varying => "VARYING",
            Self::Varchar => "VARCHAR",
            Self::Numeric => "NUMERIC",
            Self::Decimal => "DECIMAL",
            Self::Dec => "DEC",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Without => "WITHOUT",
            Self::Zone => "ZONE",
            Self::Text => "TEXT",
            Self::Bytea => "BYTEA",
            Self::Uuid => "UUID",
            Self::Regclass => "REGCLASS",
        }
    }

    /// Returns true if the keyword is reserved in standard SQL.
    ///
    /// Dialects start from this set and may widen or narrow it.
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        matches!(
            self,
            Self::Select
                | Self::From
                | Self::Where
                | Self::Group
                | Self::By
                | Self::Having
                | Self::Order
                | Self::Limit
                | Self::Offset
                | Self::Distinct
                | Self::All
                | Self::As
                | Self::With
                | Self::Union
                | Self::Intersect
                | Self::Except
                | Self::Join
                | Self::Inner
                | Self::Left
                | Self::Right
                | Self::Full
                | Self::Outer
                | Self::Cross
                | Self::Natural
                | Self::On
                | Self::Using
                | Self::And
                | Self::Or
                | Self::Not
                | Self::In
                | Self::Is
                | Self::Null
                | Self::True
                | Self::False
                | Self::Between
                | Self::Like
                | Self::Case
                | Self::When
                | Self::Then
                | Self::Else
                | Self::End
                | Self::Cast
                | Self::Exists
                | Self::Insert
                | Self::Into
                | Self::Values
                | Self::Default
                | Self::Delete
                | Self::Create
                | Self::Table
                | Self::Alter
                | Self::Copy
                | Self::Constraint
                | Self::Primary
                | Self::Unique
                | Self::Foreign
                | Self::References
                | Self::Check
        )
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An identifier or keyword as it appeared in the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    /// The raw text, without surrounding quotes.
    pub value: String,
    /// The quote character if the word was a delimited identifier.
    pub quote_style: Option<char>,
    /// Whether the dialect reserves this word. Quoted words are never reserved.
    pub reserved: bool,
}

impl Word {
    /// Creates a word.
    #[must_use]
    pub fn new(value: impl Into<String>, quote_style: Option<char>, reserved: bool) -> Self {
        Self {
            value: value.into(),
            quote_style,
            reserved: reserved && quote_style.is_none(),
        }
    }

    /// Creates an unquoted word, reserved iff it names a standard reserved keyword.
    #[must_use]
    pub fn unquoted(value: impl Into<String>) -> Self {
        let value = value.into();
        let reserved = Keyword::from_str(&value).is_some_and(|kw| kw.is_reserved());
        Self::new(value, None, reserved)
    }

    /// Returns the keyword this word spells, if any. Quoted words never spell a keyword.
    #[must_use]
    pub fn keyword(&self) -> Option<Keyword> {
        if self.quote_style.is_some() {
            return None;
        }
        Keyword::from_str(&self.value)
    }

    /// Returns true if this is an unquoted word equal to `keyword`, ignoring case.
    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.quote_style.is_none() && self.value.eq_ignore_ascii_case(keyword.as_str())
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quote_style {
            Some(q) => {
                let escaped = self.value.replace(q, &format!("{q}{q}"));
                write!(f, "{q}{escaped}{q}")
            }
            None => f.write_str(&self.value),
        }
    }
}

/// Whitespace and comments. The parser skips these transparently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Whitespace {
    Space,
    Newline,
    Tab,
    /// `-- ...` up to, not including, the line break.
    SingleLineComment(String),
    /// `/* ... */` without the delimiters.
    MultiLineComment(String),
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Words and literals
    /// Identifier or keyword.
    Word(Word),
    /// Numeric lexeme, kept verbatim (e.g., `42`, `3.14`).
    Number(String),
    /// `'hello'`
    SingleQuotedString(String),
    /// `N'hello'`
    NationalStringLiteral(String),
    /// Whitespace or a comment.
    Whitespace(Whitespace),

    // Operators
    /// =
    Eq,
    /// <> or !=
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// ::
    DoubleColon,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// :
    Colon,
}

impl TokenKind {
    /// Convenience constructor for an unquoted word.
    #[must_use]
    pub fn word(value: impl Into<String>) -> Self {
        Self::Word(Word::unquoted(value))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(w) => write!(f, "{w}"),
            Self::Number(n) => f.write_str(n),
            Self::SingleQuotedString(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Self::NationalStringLiteral(s) => write!(f, "N'{}'", s.replace('\'', "''")),
            Self::Whitespace(Whitespace::Space) => f.write_str(" "),
            Self::Whitespace(Whitespace::Newline) => f.write_str("\n"),
            Self::Whitespace(Whitespace::Tab) => f.write_str("\t"),
            Self::Whitespace(Whitespace::SingleLineComment(c)) => write!(f, "--{c}"),
            Self::Whitespace(Whitespace::MultiLineComment(c)) => write!(f, "/*{c}*/"),
            Self::Eq => f.write_str("="),
            Self::NotEq => f.write_str("<>"),
            Self::Lt => f.write_str("<"),
            Self::LtEq => f.write_str("<="),
            Self::Gt => f.write_str(">"),
            Self::GtEq => f.write_str(">="),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Star => f.write_str("*"),
            Self::Slash => f.write_str("/"),
            Self::Percent => f.write_str("%"),
            Self::DoubleColon => f.write_str("::"),
            Self::LeftParen => f.write_str("("),
            Self::RightParen => f.write_str(")"),
            Self::LeftBracket => f.write_str("["),
            Self::RightBracket => f.write_str("]"),
            Self::Comma => f.write_str(","),
            Self::Semicolon => f.write_str(";"),
            Self::Dot => f.write_str("."),
            Self::Colon => f.write_str(":"),
        }
    }
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true for whitespace and comments.
    #[must_use]
    pub const fn is_whitespace(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace(_))
    }

    /// Returns the word payload if this token is a word.
    #[must_use]
    pub const fn as_word(&self) -> Option<&Word> {
        match &self.kind {
            TokenKind::Word(w) => Some(w),
            _ => None,
        }
    }

    /// Returns true if this token is an unquoted word equal to `keyword`.
    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.as_word().is_some_and(|w| w.is_keyword(keyword))
    }
}

impl From<TokenKind> for Token {
    fn from(kind: TokenKind) -> Self {
        Self::new(kind, Span::default())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}
