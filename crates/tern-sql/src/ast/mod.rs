//! Abstract Syntax Tree (AST) types for SQL statements.
//!
//! Every composite node owns its children outright; the parser hands back
//! a complete tree or an error, never a partial one.

mod expression;
mod query;
mod statement;
mod types;

pub use expression::{BinaryOp, Expr, Function, Ident, Literal, ObjectName, UnaryOp};
pub use query::{
    Cte, JoinClause, JoinConstraint, JoinType, NullOrdering, OrderBy, OrderDirection, Query,
    Select, SelectItem, SetExpr, SetOperator, TableAlias, TableRef,
};
pub use statement::{
    AlterTableOperation, AlterTableStatement, ColumnDef, ColumnOption, ColumnOptionDef,
    CopyDirection, CopyStatement, CopyTarget, CreateTableStatement, CreateViewStatement,
    DeleteStatement, InsertSource, InsertStatement, Statement, TableConstraint,
};
pub use types::DataType;
