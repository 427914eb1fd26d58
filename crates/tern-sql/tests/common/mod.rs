#![allow(dead_code)]

use std::fmt::Write;

use tern_sql::ast::{
    Expr, JoinConstraint, Literal, Query, Select, SelectItem, SetExpr, Statement, TableRef,
};
use tern_sql::dialect::{Dialect, GenericDialect};
use tern_sql::{ParseError, Parser};

/// Routes parser tracing output through the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .try_init();
}

pub fn parse_with(dialect: &dyn Dialect, sql: &str) -> Vec<Statement> {
    tern_sql::parse_sql(dialect, sql)
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"))
}

pub fn parse(sql: &str) -> Statement {
    let mut statements = parse_with(&GenericDialect, sql);
    assert_eq!(statements.len(), 1, "Expected one statement in: {sql}");
    statements.remove(0)
}

pub fn parse_err(sql: &str) -> ParseError {
    tern_sql::parse_sql(&GenericDialect, sql)
        .expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_query(sql: &str) -> Query {
    match parse(sql) {
        Statement::Query(q) => *q,
        other => panic!("Expected query, got {other:?}"),
    }
}

pub fn parse_select(sql: &str) -> Select {
    parse_query(sql)
        .as_select()
        .cloned()
        .unwrap_or_else(|| panic!("Expected plain SELECT: {sql}"))
}

/// Parses a standalone expression and checks nothing is left over.
pub fn parse_expr(sql: &str) -> Expr {
    let mut parser = Parser::from_sql(&GenericDialect, sql)
        .unwrap_or_else(|e| panic!("Failed to tokenize: {sql}\nError: {e}"));
    let expr = parser
        .parse_expr()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"));
    assert!(
        parser.peek_token().is_none(),
        "Trailing tokens after expression: {sql}"
    );
    expr
}

pub fn parse_expr_err(sql: &str) -> ParseError {
    Parser::from_sql(&GenericDialect, sql)
        .and_then(|mut p| p.parse_expr())
        .expect_err(&format!("Expected parse error for: {sql}"))
}

/// The projected expression of `SELECT <expr>`.
pub fn select_expr(sql: &str) -> Expr {
    match parse_select(sql).projection.into_iter().next() {
        Some(SelectItem::Expr { expr, .. }) => expr,
        other => panic!("Expected expression item, got {other:?}"),
    }
}

/// Verifies that rendering a parsed query and parsing it again gives the same tree.
pub fn round_trip(sql: &str) {
    let ast1 = parse_query(sql);
    let rendered = render_query(&ast1);
    let ast2 = parse_query(&rendered);
    assert_eq!(
        ast1, ast2,
        "Round-trip failed.\n  Input:    {sql}\n  Rendered: {rendered}"
    );
}

/// Same as [`round_trip`] for a standalone expression.
pub fn round_trip_expr(sql: &str) {
    let ast1 = parse_expr(sql);
    let rendered = render_expr(&ast1);
    let ast2 = parse_expr(&rendered);
    assert_eq!(
        ast1, ast2,
        "Round-trip failed.\n  Input:    {sql}\n  Rendered: {rendered}"
    );
}

// ===================================================================
// Test-only SQL renderer
// ===================================================================
//
// Renders parsed trees back to text. Parentheses are only emitted where the
// tree itself records them (`Expr::Nested`, `SetExpr::Query`), so the output
// re-parses to the same shape.

fn join<T>(items: &[T], f: impl Fn(&T) -> String) -> String {
    items.iter().map(f).collect::<Vec<_>>().join(", ")
}

pub fn render_literal(literal: &Literal) -> String {
    match literal {
        Literal::Integer(n) => n.to_string(),
        Literal::Float(v) => format!("{v:?}"),
        Literal::Boolean(true) => String::from("TRUE"),
        Literal::Boolean(false) => String::from("FALSE"),
        Literal::Null => String::from("NULL"),
        Literal::String(s) => format!("'{}'", s.replace('\'', "''")),
        Literal::NationalString(s) => format!("N'{}'", s.replace('\'', "''")),
    }
}

pub fn render_expr(expr: &Expr) -> String {
    match expr {
        Expr::Identifier(ident) => ident.to_string(),
        Expr::QualifiedIdentifier(name) => name.to_string(),
        Expr::Literal(literal) => render_literal(literal),
        Expr::Unary { op, operand } => format!("{} {}", op.as_str(), render_expr(operand)),
        Expr::Binary { left, op, right } => {
            format!("{} {} {}", render_expr(left), op.as_str(), render_expr(right))
        }
        Expr::Between {
            expr,
            negated,
            low,
            high,
        } => format!(
            "{} {}BETWEEN {} AND {}",
            render_expr(expr),
            if *negated { "NOT " } else { "" },
            render_expr(low),
            render_expr(high)
        ),
        Expr::InList {
            expr,
            list,
            negated,
        } => format!(
            "{} {}IN ({})",
            render_expr(expr),
            if *negated { "NOT " } else { "" },
            join(list, render_expr)
        ),
        Expr::InSubquery {
            expr,
            subquery,
            negated,
        } => format!(
            "{} {}IN ({})",
            render_expr(expr),
            if *negated { "NOT " } else { "" },
            render_query(subquery)
        ),
        Expr::IsNull(e) => format!("{} IS NULL", render_expr(e)),
        Expr::IsNotNull(e) => format!("{} IS NOT NULL", render_expr(e)),
        Expr::Case {
            operand,
            conditions,
            results,
            else_result,
        } => {
            let mut out = String::from("CASE");
            if let Some(operand) = operand {
                write!(out, " {}", render_expr(operand)).unwrap();
            }
            for (condition, result) in conditions.iter().zip(results) {
                write!(
                    out,
                    " WHEN {} THEN {}",
                    render_expr(condition),
                    render_expr(result)
                )
                .unwrap();
            }
            if let Some(else_result) = else_result {
                write!(out, " ELSE {}", render_expr(else_result)).unwrap();
            }
            out.push_str(" END");
            out
        }
        Expr::Cast { expr, data_type } => format!("CAST({} AS {data_type})", render_expr(expr)),
        Expr::Nested(e) => format!("({})", render_expr(e)),
        Expr::Function(f) => format!(
            "{}({}{})",
            f.name,
            if f.distinct { "DISTINCT " } else { "" },
            join(&f.args, render_expr)
        ),
        Expr::Exists(q) => format!("EXISTS ({})", render_query(q)),
        Expr::Subquery(q) => format!("({})", render_query(q)),
        Expr::Wildcard => String::from("*"),
    }
}

pub fn render_query(query: &Query) -> String {
    let mut out = String::new();
    if !query.ctes.is_empty() {
        let ctes = join(&query.ctes, |cte| {
            format!("{} AS ({})", cte.alias, render_query(&cte.query))
        });
        write!(out, "WITH {ctes} ").unwrap();
    }
    out.push_str(&render_set_expr(&query.body));
    if !query.order_by.is_empty() {
        let items = join(&query.order_by, |o| {
            let mut item = format!("{} {}", render_expr(&o.expr), o.direction.as_str());
            if let Some(nulls) = &o.nulls {
                write!(item, " {}", nulls.as_str()).unwrap();
            }
            item
        });
        write!(out, " ORDER BY {items}").unwrap();
    }
    if let Some(limit) = &query.limit {
        write!(out, " LIMIT {}", render_expr(limit)).unwrap();
    }
    if let Some(offset) = &query.offset {
        write!(out, " OFFSET {}", render_expr(offset)).unwrap();
    }
    out
}

fn render_set_expr(body: &SetExpr) -> String {
    match body {
        SetExpr::Select(select) => render_select(select),
        SetExpr::Query(query) => format!("({})", render_query(query)),
        SetExpr::SetOperation {
            left,
            op,
            all,
            right,
        } => format!(
            "{} {}{} {}",
            render_set_expr(left),
            op.as_str(),
            if *all { " ALL" } else { "" },
            render_set_expr(right)
        ),
    }
}

fn render_select(select: &Select) -> String {
    let mut out = String::from("SELECT ");
    if select.distinct {
        out.push_str("DISTINCT ");
    }
    out.push_str(&join(&select.projection, |item| match item {
        SelectItem::Wildcard => String::from("*"),
        SelectItem::QualifiedWildcard(name) => format!("{name}.*"),
        SelectItem::Expr { expr, alias } => match alias {
            Some(alias) => format!("{} AS {alias}", render_expr(expr)),
            None => render_expr(expr),
        },
    }));
    if !select.from.is_empty() {
        write!(out, " FROM {}", join(&select.from, render_table_ref)).unwrap();
    }
    if let Some(selection) = &select.selection {
        write!(out, " WHERE {}", render_expr(selection)).unwrap();
    }
    if !select.group_by.is_empty() {
        write!(out, " GROUP BY {}", join(&select.group_by, render_expr)).unwrap();
    }
    if let Some(having) = &select.having {
        write!(out, " HAVING {}", render_expr(having)).unwrap();
    }
    out
}

fn render_table_ref(table: &TableRef) -> String {
    let with_alias = |base: String, alias: Option<&tern_sql::ast::TableAlias>| match alias {
        None => base,
        Some(alias) if alias.columns.is_empty() => format!("{base} AS {}", alias.name),
        Some(alias) => format!(
            "{base} AS {} ({})",
            alias.name,
            join(&alias.columns, ToString::to_string)
        ),
    };
    match table {
        TableRef::Table { name, alias } => with_alias(name.to_string(), alias.as_ref()),
        TableRef::Derived { subquery, alias } => {
            with_alias(format!("({})", render_query(subquery)), alias.as_ref())
        }
        TableRef::Join { left, join: clause } => {
            let left = render_table_ref(left);
            let right = render_table_ref(&clause.table);
            let join_type = clause.join_type.as_str();
            match &clause.constraint {
                JoinConstraint::On(expr) => {
                    format!("{left} {join_type} {right} ON {}", render_expr(expr))
                }
                JoinConstraint::Using(columns) => format!(
                    "{left} {join_type} {right} USING ({})",
                    join(columns, ToString::to_string)
                ),
                JoinConstraint::Natural => format!("{left} NATURAL {join_type} {right}"),
                JoinConstraint::None => format!("{left} {join_type} {right}"),
            }
        }
    }
}
