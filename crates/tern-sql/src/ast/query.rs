//! Query AST types: CTEs, set expressions, SELECT and FROM.

use super::expression::{Expr, Ident, ObjectName};

/// A complete query: `[WITH ...] body [ORDER BY ...] [LIMIT ...] [OFFSET ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Common table expressions in declaration order.
    pub ctes: Vec<Cte>,
    /// The set expression producing rows.
    pub body: SetExpr,
    /// ORDER BY entries.
    pub order_by: Vec<OrderBy>,
    /// LIMIT expression. `LIMIT ALL` is recorded as `None`.
    pub limit: Option<Expr>,
    /// OFFSET expression.
    pub offset: Option<Expr>,
}

impl Query {
    /// Returns the SELECT if the body is a plain SELECT.
    #[must_use]
    pub const fn as_select(&self) -> Option<&Select> {
        match &self.body {
            SetExpr::Select(select) => Some(select),
            _ => None,
        }
    }
}

/// A common table expression, `alias AS (query)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cte {
    /// The name the CTE is bound to.
    pub alias: Ident,
    /// The defining query.
    pub query: Query,
}

/// The body of a query.
#[derive(Debug, Clone, PartialEq)]
pub enum SetExpr {
    /// A SELECT block.
    Select(Box<Select>),
    /// A parenthesized query used as a set operand.
    Query(Box<Query>),
    /// `left op [ALL|DISTINCT] right`.
    SetOperation {
        /// Left operand.
        left: Box<SetExpr>,
        /// Operator.
        op: SetOperator,
        /// Whether ALL was specified.
        all: bool,
        /// Right operand.
        right: Box<SetExpr>,
    },
}

/// Set operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOperator {
    Union,
    Except,
    Intersect,
}

impl SetOperator {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::Except => "EXCEPT",
            Self::Intersect => "INTERSECT",
        }
    }
}

/// A SELECT block.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    /// Whether DISTINCT was specified.
    pub distinct: bool,
    /// The select list.
    pub projection: Vec<SelectItem>,
    /// Comma-separated FROM entries, each possibly carrying joins.
    pub from: Vec<TableRef>,
    /// WHERE clause.
    pub selection: Option<Expr>,
    /// GROUP BY expressions.
    pub group_by: Vec<Expr>,
    /// HAVING clause.
    pub having: Option<Expr>,
}

/// One entry of a select list.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    /// An expression with an optional alias.
    Expr {
        /// The expression.
        expr: Expr,
        /// The alias, from `AS alias` or a bare trailing identifier.
        alias: Option<Ident>,
    },
    /// `*`
    Wildcard,
    /// `qualifier.*`
    QualifiedWildcard(ObjectName),
}

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Null ordering for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullOrdering {
    /// NULLs come first.
    First,
    /// NULLs come last.
    Last,
}

impl NullOrdering {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

/// An ORDER BY entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    /// The expression to order by.
    pub expr: Expr,
    /// The direction (ASC or DESC).
    pub direction: OrderDirection,
    /// Null ordering (optional).
    pub nulls: Option<NullOrdering>,
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// INNER JOIN.
    Inner,
    /// LEFT OUTER JOIN.
    Left,
    /// RIGHT OUTER JOIN.
    Right,
    /// FULL OUTER JOIN.
    Full,
    /// CROSS JOIN.
    Cross,
}

impl JoinType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}

/// How the rows of a join are matched.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinConstraint {
    /// `ON expr`
    On(Expr),
    /// `USING (col, ...)`
    Using(Vec<Ident>),
    /// `NATURAL ... JOIN`
    Natural,
    /// CROSS JOIN, which takes no constraint.
    None,
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    /// The type of join.
    pub join_type: JoinType,
    /// The table to join.
    pub table: TableRef,
    /// The join constraint.
    pub constraint: JoinConstraint,
}

/// `AS alias [(col, ...)]` on a table factor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableAlias {
    /// The alias.
    pub name: Ident,
    /// Renamed columns.
    pub columns: Vec<Ident>,
}

/// A table reference in a FROM clause.
#[derive(Debug, Clone, PartialEq)]
pub enum TableRef {
    /// A named table.
    Table {
        /// Table name, optionally schema-qualified.
        name: ObjectName,
        /// Alias.
        alias: Option<TableAlias>,
    },
    /// A derived table, `(query) [AS] alias`.
    Derived {
        /// The subquery.
        subquery: Box<Query>,
        /// Alias.
        alias: Option<TableAlias>,
    },
    /// A joined table.
    Join {
        /// Left side of the join.
        left: Box<TableRef>,
        /// The join clause.
        join: Box<JoinClause>,
    },
}

impl TableRef {
    /// Creates an unaliased reference to a single-part table name.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self::Table {
            name: ObjectName(vec![Ident::new(name)]),
            alias: None,
        }
    }

    /// Returns the alias of a table or derived factor.
    #[must_use]
    pub const fn alias(&self) -> Option<&TableAlias> {
        match self {
            Self::Table { alias, .. } | Self::Derived { alias, .. } => alias.as_ref(),
            Self::Join { .. } => None,
        }
    }
}
