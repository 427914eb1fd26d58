//! SQL statement AST types.

use super::expression::{Expr, Ident, ObjectName};
use super::query::Query;
use super::types::DataType;

/// A SQL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// SELECT or WITH query.
    Query(Box<Query>),
    /// INSERT statement.
    Insert(InsertStatement),
    /// DELETE statement.
    Delete(DeleteStatement),
    /// CREATE TABLE statement.
    CreateTable(CreateTableStatement),
    /// CREATE [MATERIALIZED] VIEW statement.
    CreateView(CreateViewStatement),
    /// ALTER TABLE statement.
    AlterTable(AlterTableStatement),
    /// COPY statement.
    Copy(CopyStatement),
}

/// An INSERT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    /// Target table.
    pub table: ObjectName,
    /// Column names (optional).
    pub columns: Vec<Ident>,
    /// Values to insert.
    pub source: InsertSource,
}

/// Source of data for INSERT.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    /// VALUES (...), (...), ...
    Values(Vec<Vec<Expr>>),
    /// SELECT ... or WITH ...
    Query(Box<Query>),
    /// DEFAULT VALUES
    DefaultValues,
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    /// Target table.
    pub table: ObjectName,
    /// WHERE clause.
    pub selection: Option<Expr>,
}

/// A CREATE TABLE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStatement {
    /// Whether IF NOT EXISTS was specified.
    pub if_not_exists: bool,
    /// Table name.
    pub name: ObjectName,
    /// Column definitions in declaration order.
    pub columns: Vec<ColumnDef>,
    /// Table-level constraints.
    pub constraints: Vec<TableConstraint>,
}

/// A column definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// Column name.
    pub name: Ident,
    /// Data type.
    pub data_type: DataType,
    /// Column options in the order written.
    pub options: Vec<ColumnOptionDef>,
}

impl ColumnDef {
    /// Returns true if the column carries a NOT NULL option.
    #[must_use]
    pub fn is_not_null(&self) -> bool {
        self.options
            .iter()
            .any(|o| matches!(o.option, ColumnOption::NotNull))
    }

    /// Returns the DEFAULT expression, if any.
    #[must_use]
    pub fn default_value(&self) -> Option<&Expr> {
        self.options.iter().find_map(|o| match &o.option {
            ColumnOption::Default(expr) => Some(expr),
            _ => None,
        })
    }
}

/// A column option, optionally named with `CONSTRAINT name`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnOptionDef {
    /// Constraint name.
    pub name: Option<Ident>,
    /// The option.
    pub option: ColumnOption,
}

/// Column options.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnOption {
    /// NULL
    Null,
    /// NOT NULL
    NotNull,
    /// DEFAULT expr
    Default(Expr),
    /// PRIMARY KEY
    PrimaryKey,
    /// UNIQUE
    Unique,
    /// REFERENCES table [(columns)]
    References {
        /// Referenced table.
        table: ObjectName,
        /// Referenced columns.
        columns: Vec<Ident>,
    },
    /// CHECK (expr)
    Check(Expr),
}

/// Table-level constraints.
#[derive(Debug, Clone, PartialEq)]
pub enum TableConstraint {
    /// `[CONSTRAINT name] PRIMARY KEY (cols)` or `UNIQUE (cols)`.
    Unique {
        /// Constraint name.
        name: Option<Ident>,
        /// Constrained columns.
        columns: Vec<Ident>,
        /// Whether this is a primary key.
        is_primary: bool,
    },
    /// `[CONSTRAINT name] FOREIGN KEY (cols) REFERENCES table [(cols)]`.
    ForeignKey {
        /// Constraint name.
        name: Option<Ident>,
        /// Referencing columns.
        columns: Vec<Ident>,
        /// Referenced table.
        foreign_table: ObjectName,
        /// Referenced columns.
        referred_columns: Vec<Ident>,
    },
    /// `[CONSTRAINT name] CHECK (expr)`.
    Check {
        /// Constraint name.
        name: Option<Ident>,
        /// The check expression.
        expr: Expr,
    },
}

/// A CREATE VIEW statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateViewStatement {
    /// Whether MATERIALIZED was specified.
    pub materialized: bool,
    /// View name.
    pub name: ObjectName,
    /// Renamed output columns.
    pub columns: Vec<Ident>,
    /// The defining query.
    pub query: Box<Query>,
}

/// An ALTER TABLE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct AlterTableStatement {
    /// Table name.
    pub name: ObjectName,
    /// The operation.
    pub operation: AlterTableOperation,
}

/// ALTER TABLE operations.
#[derive(Debug, Clone, PartialEq)]
pub enum AlterTableOperation {
    /// ADD [COLUMN] column_def
    AddColumn(ColumnDef),
    /// ADD table_constraint
    AddConstraint(TableConstraint),
    /// DROP [COLUMN] [IF EXISTS] name [CASCADE]
    DropColumn {
        /// Column name.
        name: Ident,
        /// Whether IF EXISTS was specified.
        if_exists: bool,
        /// Whether CASCADE was specified.
        cascade: bool,
    },
    /// RENAME COLUMN old TO new
    RenameColumn {
        /// Current name.
        old_name: Ident,
        /// New name.
        new_name: Ident,
    },
    /// RENAME TO new
    RenameTable {
        /// New table name.
        new_name: ObjectName,
    },
}

/// A COPY statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CopyStatement {
    /// Table name.
    pub table: ObjectName,
    /// Column list (optional).
    pub columns: Vec<Ident>,
    /// FROM or TO.
    pub direction: CopyDirection,
    /// Where the data comes from or goes to.
    pub target: CopyTarget,
}

/// Copy direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyDirection {
    /// COPY ... FROM
    From,
    /// COPY ... TO
    To,
}

/// Copy endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyTarget {
    /// STDIN
    Stdin,
    /// STDOUT
    Stdout,
    /// A quoted file name.
    File(String),
}
