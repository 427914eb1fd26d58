//! SQL data type definitions.

use core::fmt;

use super::ObjectName;

/// SQL data types recognised by the type grammar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    // Boolean
    /// Boolean.
    Boolean,

    // Integer types
    /// Small integer (2 bytes).
    SmallInt,
    /// Integer (4 bytes).
    Int,
    /// Big integer (8 bytes).
    BigInt,

    // Floating point and exact numerics
    /// Real (4-byte float).
    Real,
    /// Double precision (8-byte float).
    Double,
    /// Float with optional precision in bits.
    Float(Option<u16>),
    /// Exact numeric. Both parts are absent unless written.
    Decimal {
        /// Total number of digits.
        precision: Option<u16>,
        /// Number of digits after decimal point.
        scale: Option<u16>,
    },

    // String types
    /// Fixed-length character string.
    Char(Option<u16>),
    /// Variable-length character string.
    Varchar(Option<u16>),
    /// Text (variable length, no limit).
    Text,

    // Binary types
    /// Byte array.
    Bytea,

    // Date/time types
    /// Date.
    Date,
    /// Time or timestamp, with or without time zone.
    Time,

    // Other
    /// UUID.
    Uuid,
    /// `PostgreSQL` object identifier of a relation.
    Regclass,
    /// Array of the element type, written `elem[]`.
    Array(Box<DataType>),
    /// Any type name the grammar does not know.
    Custom(ObjectName),
}

impl DataType {
    /// Returns the SQL representation of the data type.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Boolean => String::from("BOOLEAN"),
            Self::SmallInt => String::from("SMALLINT"),
            Self::Int => String::from("INT"),
            Self::BigInt => String::from("BIGINT"),
            Self::Real => String::from("REAL"),
            Self::Double => String::from("DOUBLE PRECISION"),
            Self::Float(size) => with_size("FLOAT", *size),
            Self::Decimal { precision, scale } => match (precision, scale) {
                (Some(p), Some(s)) => format!("NUMERIC({p}, {s})"),
                (Some(p), None) => format!("NUMERIC({p})"),
                _ => String::from("NUMERIC"),
            },
            Self::Char(size) => with_size("CHAR", *size),
            Self::Varchar(size) => with_size("VARCHAR", *size),
            Self::Text => String::from("TEXT"),
            Self::Bytea => String::from("BYTEA"),
            Self::Date => String::from("DATE"),
            Self::Time => String::from("TIMESTAMP"),
            Self::Uuid => String::from("UUID"),
            Self::Regclass => String::from("REGCLASS"),
            Self::Array(inner) => format!("{}[]", inner.to_sql()),
            Self::Custom(name) => name.to_string(),
        }
    }
}

fn with_size(name: &str, size: Option<u16>) -> String {
    match size {
        Some(n) => format!("{name}({n})"),
        None => String::from(name),
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
