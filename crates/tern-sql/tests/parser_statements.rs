//! Tests for DML and DDL statements and statement batches.

mod common;
use common::*;

use tern_sql::ast::{
    AlterTableOperation, BinaryOp, ColumnOption, CopyDirection, CopyTarget, DataType, Expr,
    Ident, InsertSource, Literal, ObjectName, Statement, TableConstraint,
};
use tern_sql::dialect::PostgreSqlDialect;
use tern_sql::ErrorKind;

fn idents(names: &[&str]) -> Vec<Ident> {
    names.iter().copied().map(Ident::new).collect()
}

// ===================================================================
// INSERT
// ===================================================================

#[test]
fn insert_values_with_columns() {
    let Statement::Insert(insert) =
        parse("INSERT INTO users (id, name) VALUES (1, 'alice'), (2, 'bob')")
    else {
        panic!("expected INSERT");
    };
    assert_eq!(insert.table.to_string(), "users");
    assert_eq!(insert.columns, idents(&["id", "name"]));
    let InsertSource::Values(rows) = insert.source else {
        panic!("expected VALUES");
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[1],
        vec![
            Expr::integer(2),
            Expr::Literal(Literal::String(String::from("bob")))
        ]
    );
}

#[test]
fn insert_from_query() {
    let Statement::Insert(insert) = parse("INSERT INTO archive SELECT * FROM users WHERE old")
    else {
        panic!("expected INSERT");
    };
    assert!(insert.columns.is_empty());
    assert!(matches!(insert.source, InsertSource::Query(_)));

    let Statement::Insert(insert) = parse("INSERT INTO archive (SELECT * FROM users)") else {
        panic!("expected INSERT");
    };
    assert!(insert.columns.is_empty());
    assert!(matches!(insert.source, InsertSource::Query(_)));
}

#[test]
fn insert_default_values() {
    let Statement::Insert(insert) = parse("INSERT INTO counters DEFAULT VALUES") else {
        panic!("expected INSERT");
    };
    assert_eq!(insert.source, InsertSource::DefaultValues);
}

#[test]
fn insert_errors() {
    assert_eq!(
        parse_err("INSERT users VALUES (1)").kind(),
        ErrorKind::GrammarViolation
    );
    assert_eq!(
        parse_err("INSERT INTO users (id) VALUES (1").kind(),
        ErrorKind::Exhaustion
    );
    assert_eq!(
        parse_err("INSERT INTO users (id) 1").kind(),
        ErrorKind::UnexpectedToken
    );
}

// ===================================================================
// DELETE
// ===================================================================

#[test]
fn delete_with_and_without_where() {
    let Statement::Delete(delete) = parse("DELETE FROM sessions") else {
        panic!("expected DELETE");
    };
    assert!(delete.selection.is_none());

    let Statement::Delete(delete) = parse("DELETE FROM app.sessions WHERE expires < now()") else {
        panic!("expected DELETE");
    };
    assert_eq!(
        delete.table,
        ObjectName(vec![Ident::new("app"), Ident::new("sessions")])
    );
    assert!(matches!(
        delete.selection,
        Some(Expr::Binary {
            op: BinaryOp::Lt,
            ..
        })
    ));
}

// ===================================================================
// CREATE TABLE / VIEW
// ===================================================================

#[test]
fn create_table_with_column_options() {
    let Statement::CreateTable(create) = parse(
        "CREATE TABLE IF NOT EXISTS accounts (
            id BIGINT PRIMARY KEY,
            email VARCHAR(255) NOT NULL UNIQUE,
            owner_id INT REFERENCES users (id),
            balance NUMERIC(12, 2) DEFAULT 0 CONSTRAINT positive CHECK (balance >= 0),
            note TEXT NULL
        )",
    ) else {
        panic!("expected CREATE TABLE");
    };
    assert!(create.if_not_exists);
    assert_eq!(create.name.to_string(), "accounts");
    assert_eq!(create.columns.len(), 5);

    let email = &create.columns[1];
    assert_eq!(email.data_type, DataType::Varchar(Some(255)));
    assert!(email.is_not_null());

    let owner = &create.columns[2];
    assert_eq!(
        owner.options[0].option,
        ColumnOption::References {
            table: ObjectName(vec![Ident::new("users")]),
            columns: idents(&["id"]),
        }
    );

    let balance = &create.columns[3];
    assert_eq!(balance.default_value(), Some(&Expr::integer(0)));
    assert_eq!(balance.options[1].name, Some(Ident::new("positive")));
    assert!(matches!(balance.options[1].option, ColumnOption::Check(_)));

    assert!(!create.columns[4].is_not_null());
}

#[test]
fn create_table_with_table_constraints() {
    let Statement::CreateTable(create) = parse(
        "CREATE TABLE line_items (
            order_id INT,
            line INT,
            PRIMARY KEY (order_id, line),
            CONSTRAINT fk_order FOREIGN KEY (order_id) REFERENCES orders (id),
            UNIQUE (line),
            CHECK (line > 0)
        )",
    ) else {
        panic!("expected CREATE TABLE");
    };
    assert_eq!(create.columns.len(), 2);
    assert_eq!(create.constraints.len(), 4);
    assert_eq!(
        create.constraints[0],
        TableConstraint::Unique {
            name: None,
            columns: idents(&["order_id", "line"]),
            is_primary: true,
        }
    );
    assert_eq!(
        create.constraints[1],
        TableConstraint::ForeignKey {
            name: Some(Ident::new("fk_order")),
            columns: idents(&["order_id"]),
            foreign_table: ObjectName(vec![Ident::new("orders")]),
            referred_columns: idents(&["id"]),
        }
    );
    assert!(matches!(
        create.constraints[3],
        TableConstraint::Check { name: None, .. }
    ));
}

#[test]
fn create_table_errors() {
    assert_eq!(
        parse_err("CREATE TABLE t (id INT CONSTRAINT c)").kind(),
        ErrorKind::GrammarViolation
    );
    assert_eq!(
        parse_err("CREATE TABLE t (select INT)").kind(),
        ErrorKind::UnexpectedToken
    );
    assert_eq!(
        parse_err("CREATE INDEX i ON t (a)").kind(),
        ErrorKind::GrammarViolation
    );
}

#[test]
fn create_views() {
    let Statement::CreateView(view) =
        parse("CREATE VIEW active (id, name) AS SELECT id, name FROM users WHERE active")
    else {
        panic!("expected CREATE VIEW");
    };
    assert!(!view.materialized);
    assert_eq!(view.columns, idents(&["id", "name"]));
    assert!(view.query.as_select().is_some());

    let Statement::CreateView(view) =
        parse("CREATE MATERIALIZED VIEW totals AS SELECT sum(amount) FROM payments")
    else {
        panic!("expected CREATE VIEW");
    };
    assert!(view.materialized);
    assert!(view.columns.is_empty());
}

#[test]
fn view_errors_name_the_view() {
    let err = parse_err("CREATE VIEW v AS SELECT FROM t");
    assert!(err.to_string().contains("`v`"), "{err}");
    assert_eq!(err.kind(), ErrorKind::UnexpectedToken);
}

// ===================================================================
// ALTER TABLE
// ===================================================================

#[test]
fn alter_table_operations() {
    let op = |sql: &str| match parse(sql) {
        Statement::AlterTable(alter) => alter.operation,
        other => panic!("Expected ALTER TABLE, got {other:?}"),
    };

    let AlterTableOperation::AddColumn(column) =
        op("ALTER TABLE users ADD COLUMN age INT NOT NULL")
    else {
        panic!("expected ADD COLUMN");
    };
    assert_eq!(column.name, Ident::new("age"));
    assert!(column.is_not_null());

    assert!(matches!(
        op("ALTER TABLE users ADD nickname TEXT"),
        AlterTableOperation::AddColumn(_)
    ));
    assert!(matches!(
        op("ALTER TABLE users ADD CONSTRAINT uq_email UNIQUE (email)"),
        AlterTableOperation::AddConstraint(TableConstraint::Unique { .. })
    ));
    assert_eq!(
        op("ALTER TABLE users DROP COLUMN IF EXISTS age CASCADE"),
        AlterTableOperation::DropColumn {
            name: Ident::new("age"),
            if_exists: true,
            cascade: true,
        }
    );
    assert_eq!(
        op("ALTER TABLE users RENAME COLUMN name TO full_name"),
        AlterTableOperation::RenameColumn {
            old_name: Ident::new("name"),
            new_name: Ident::new("full_name"),
        }
    );
    assert_eq!(
        op("ALTER TABLE users RENAME TO customers"),
        AlterTableOperation::RenameTable {
            new_name: ObjectName(vec![Ident::new("customers")]),
        }
    );
}

#[test]
fn alter_table_errors() {
    assert_eq!(
        parse_err("ALTER TABLE users TRUNCATE").kind(),
        ErrorKind::GrammarViolation
    );
    assert_eq!(
        parse_err("ALTER TABLE users RENAME a b").kind(),
        ErrorKind::GrammarViolation
    );
}

// ===================================================================
// COPY
// ===================================================================

#[test]
fn copy_from_stdin_and_to_file() {
    let Statement::Copy(copy) = parse("COPY users (id, name) FROM STDIN") else {
        panic!("expected COPY");
    };
    assert_eq!(copy.columns, idents(&["id", "name"]));
    assert_eq!(copy.direction, CopyDirection::From);
    assert_eq!(copy.target, CopyTarget::Stdin);

    let Statement::Copy(copy) = parse("COPY users TO '/tmp/users.csv'") else {
        panic!("expected COPY");
    };
    assert_eq!(copy.direction, CopyDirection::To);
    assert_eq!(copy.target, CopyTarget::File(String::from("/tmp/users.csv")));
}

#[test]
fn copy_stream_must_match_direction() {
    assert_eq!(
        parse_err("COPY users FROM STDOUT").kind(),
        ErrorKind::GrammarViolation
    );
    assert_eq!(
        parse_err("COPY users TO STDIN").kind(),
        ErrorKind::GrammarViolation
    );
}

// ===================================================================
// Batches
// ===================================================================

#[test]
fn semicolon_separated_batch() {
    init_tracing();
    let statements = parse_with(
        &PostgreSqlDialect,
        ";; CREATE TABLE t (id INT); INSERT INTO t VALUES (1);\n-- done\nSELECT * FROM t;",
    );
    assert_eq!(statements.len(), 3);
    assert!(matches!(statements[0], Statement::CreateTable(_)));
    assert!(matches!(statements[1], Statement::Insert(_)));
    assert!(matches!(statements[2], Statement::Query(_)));
}

#[test]
fn empty_input_is_an_empty_batch() {
    assert!(parse_with(&PostgreSqlDialect, "").is_empty());
    assert!(parse_with(&PostgreSqlDialect, " ;\n; /* nothing */ ").is_empty());
}

#[test]
fn statements_need_a_delimiter() {
    let err = parse_err("SELECT 1 SELECT 2");
    assert_eq!(err.kind(), ErrorKind::UnexpectedToken);
}

#[test]
fn unknown_statement_keyword() {
    assert_eq!(parse_err("UPDATE t SET a = 1").kind(), ErrorKind::UnexpectedToken);
    assert_eq!(parse_err("42").kind(), ErrorKind::UnexpectedToken);
}
