//! Expression AST types.

use core::fmt;

use super::{DataType, Query};

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Integer literal.
    Integer(i64),
    /// Float literal.
    Float(f64),
    /// Boolean literal.
    Boolean(bool),
    /// NULL literal.
    Null,
    /// String literal, `'...'`.
    String(String),
    /// National string literal, `N'...'`.
    NationalString(String),
}

/// An identifier, optionally delimited.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    /// The identifier text without quotes.
    pub value: String,
    /// The quote character, if delimited.
    pub quote_style: Option<char>,
}

impl Ident {
    /// Creates an undelimited identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quote_style: None,
        }
    }

    /// Creates a delimited identifier.
    #[must_use]
    pub fn with_quote(quote: char, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quote_style: Some(quote),
        }
    }
}

impl fmt::Display for Ident {
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

/// A possibly qualified name such as `schema.table`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectName(pub Vec<Ident>);

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,

    // Pattern matching
    Like,
    NotLike,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `+expr`
    Plus,
    /// `-expr`
    Minus,
    /// Logical NOT
    Not,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Not => "NOT",
        }
    }
}

/// A function call expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// The function name.
    pub name: ObjectName,
    /// The arguments. `count(*)` has a single [`Expr::Wildcard`].
    pub args: Vec<Expr>,
    /// Whether DISTINCT was specified.
    pub distinct: bool,
}

/// An SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// An unqualified identifier, e.g. a column name.
    Identifier(Ident),

    /// A multi-part identifier, e.g. `table.column`.
    QualifiedIdentifier(ObjectName),

    /// A literal value.
    Literal(Literal),

    /// A unary expression.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
    },

    /// A binary expression.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
    },

    /// `expr [NOT] BETWEEN low AND high`
    Between {
        /// The expression to check.
        expr: Box<Expr>,
        /// Whether this is NOT BETWEEN.
        negated: bool,
        /// Lower bound.
        low: Box<Expr>,
        /// Upper bound.
        high: Box<Expr>,
    },

    /// `expr [NOT] IN (list)`
    InList {
        /// The expression to check.
        expr: Box<Expr>,
        /// The candidate values.
        list: Vec<Expr>,
        /// Whether this is NOT IN.
        negated: bool,
    },

    /// `expr [NOT] IN (subquery)`
    InSubquery {
        /// The expression to check.
        expr: Box<Expr>,
        /// The subquery.
        subquery: Box<Query>,
        /// Whether this is NOT IN.
        negated: bool,
    },

    /// `expr IS NULL`
    IsNull(Box<Expr>),

    /// `expr IS NOT NULL`
    IsNotNull(Box<Expr>),

    /// CASE expression.
    ///
    /// `conditions` and `results` are parallel and always the same length.
    Case {
        /// Operand for simple CASE (CASE expr WHEN ...).
        operand: Option<Box<Expr>>,
        /// WHEN expressions.
        conditions: Vec<Expr>,
        /// THEN expressions.
        results: Vec<Expr>,
        /// ELSE expression.
        else_result: Option<Box<Expr>>,
    },

    /// `CAST(expr AS type)` or `expr::type`.
    Cast {
        /// The expression to cast.
        expr: Box<Expr>,
        /// The target type.
        data_type: DataType,
    },

    /// A parenthesized expression.
    Nested(Box<Expr>),

    /// A function call.
    Function(Function),

    /// `EXISTS (subquery)`
    Exists(Box<Query>),

    /// A scalar subquery.
    Subquery(Box<Query>),

    /// `*` as a function argument.
    Wildcard,
}

impl Expr {
    /// Creates an identifier expression.
    #[must_use]
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Identifier(Ident::new(name))
    }

    /// Creates an integer literal expression.
    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Self::Literal(Literal::Integer(value))
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(left: Self, op: BinaryOp, right: Self) -> Self {
        Self::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a unary expression.
    #[must_use]
    pub fn unary(op: UnaryOp, operand: Self) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }
}

impl From<Ident> for Expr {
    fn from(ident: Ident) -> Self {
        Self::Identifier(ident)
    }
}

impl From<Literal> for Expr {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}
