//! SQL Parser implementation: cursor access, keyword matching, statement dispatch and DML/DDL.

use tracing::{debug, trace};

use super::cursor::{Mark, TokenStream};
use super::error::ParseError;
use crate::ast::{
    AlterTableOperation, AlterTableStatement, ColumnDef, ColumnOption, ColumnOptionDef,
    CopyDirection, CopyStatement, CopyTarget, CreateTableStatement, CreateViewStatement,
    DeleteStatement, Ident, InsertSource, InsertStatement, ObjectName, Statement,
    TableConstraint,
};
use crate::dialect::Dialect;
use crate::lexer::{Keyword, Lexer, Token, TokenKind};

/// Default bound on nesting depth.
///
/// Subexpressions, queries, set operands and derived tables each take one
/// level. The default keeps the deepest accepted input within a 2 MiB thread
/// stack in unoptimized builds.
pub const DEFAULT_RECURSION_LIMIT: usize = 50;

const STATEMENT_START: &str = "SELECT, WITH, `(`, CREATE, DELETE, INSERT, ALTER or COPY";

/// SQL Parser.
///
/// Owns its token buffer; every method threads the cursor through `&mut self`.
#[derive(Debug, Clone)]
pub struct Parser {
    pub(super) stream: TokenStream,
    depth: usize,
    recursion_limit: usize,
}

impl Parser {
    /// Creates a parser over tokens produced by any lexer.
    #[must_use]
    pub const fn new(tokens: Vec<Token>) -> Self {
        Self {
            stream: TokenStream::new(tokens),
            depth: 0,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Tokenizes `sql` with the built-in lexer and creates a parser over it.
    pub fn from_sql(dialect: &dyn Dialect, sql: &str) -> Result<Self, ParseError> {
        let tokens = Lexer::new(sql, dialect).tokenize()?;
        Ok(Self::new(tokens))
    }

    /// Sets the maximum nesting depth of expressions and queries.
    ///
    /// Raising it past [`DEFAULT_RECURSION_LIMIT`] needs a correspondingly
    /// larger stack on the parsing thread.
    #[must_use]
    pub const fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// Parses a semicolon-separated sequence of statements until end of input.
    ///
    /// Empty statements are skipped. Two statements must be separated by a
    /// semicolon.
    pub fn parse_statements(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut statements = Vec::new();
        let mut expecting_delimiter = false;
        loop {
            while self.consume_token(&TokenKind::Semicolon) {
                expecting_delimiter = false;
            }
            let Some(token) = self.peek_token() else {
                break;
            };
            if expecting_delimiter {
                return Err(ParseError::unexpected("end of statement", token.clone()));
            }
            statements.push(self.parse_statement()?);
            expecting_delimiter = true;
        }
        debug!(statements = statements.len(), "parsed statement batch");
        Ok(statements)
    }

    /// Parses a single SQL statement.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let token = self
            .next_token()
            .ok_or_else(|| ParseError::exhausted(STATEMENT_START))?;
        let keyword = token.as_word().and_then(crate::lexer::Word::keyword);
        trace!(keyword = %token, "dispatching statement");
        if token.kind == TokenKind::LeftParen {
            self.prev_token();
            return Ok(Statement::Query(Box::new(self.parse_query()?)));
        }
        match keyword {
            Some(Keyword::Select | Keyword::With) => {
                self.prev_token();
                Ok(Statement::Query(Box::new(self.parse_query()?)))
            }
            Some(Keyword::Insert) => Ok(Statement::Insert(self.parse_insert()?)),
            Some(Keyword::Delete) => Ok(Statement::Delete(self.parse_delete()?)),
            Some(Keyword::Create) => self.parse_create(),
            Some(Keyword::Alter) => Ok(Statement::AlterTable(self.parse_alter_table()?)),
            Some(Keyword::Copy) => Ok(Statement::Copy(self.parse_copy()?)),
            _ => Err(ParseError::unexpected(STATEMENT_START, token)),
        }
    }

    /// Parses `INSERT INTO name [(cols)] {VALUES ... | query | DEFAULT VALUES}`.
    fn parse_insert(&mut self) -> Result<InsertStatement, ParseError> {
        self.expect_keyword(Keyword::Into)?;
        let table = self.parse_object_name()?;

        let columns = if self.peek_token_is(&TokenKind::LeftParen) && !self.peek_query_in_parens()
        {
            self.parse_parenthesized_identifiers()?
        } else {
            vec![]
        };

        let source = if self.parse_keyword(Keyword::Values) {
            let rows = self.parse_comma_separated(|p| {
                p.expect_token(&TokenKind::LeftParen)?;
                let row = p.parse_comma_separated(Self::parse_expr)?;
                p.expect_token(&TokenKind::RightParen)?;
                Ok(row)
            })?;
            InsertSource::Values(rows)
        } else if self.parse_keyword(Keyword::Default) {
            self.expect_keyword(Keyword::Values)?;
            InsertSource::DefaultValues
        } else if self.peek_keyword(Keyword::Select)
            || self.peek_keyword(Keyword::With)
            || self.peek_token_is(&TokenKind::LeftParen)
        {
            InsertSource::Query(Box::new(self.parse_query()?))
        } else {
            return self.expected("VALUES, DEFAULT VALUES or a query");
        };

        Ok(InsertStatement {
            table,
            columns,
            source,
        })
    }

    /// Parses `DELETE FROM name [WHERE expr]`.
    fn parse_delete(&mut self) -> Result<DeleteStatement, ParseError> {
        self.expect_keyword(Keyword::From)?;
        let table = self.parse_object_name()?;
        let selection = if self.parse_keyword(Keyword::Where) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(DeleteStatement { table, selection })
    }

    fn parse_create(&mut self) -> Result<Statement, ParseError> {
        if self.parse_keyword(Keyword::Table) {
            Ok(Statement::CreateTable(self.parse_create_table()?))
        } else if self.parse_keyword(Keyword::Materialized) {
            self.expect_keyword(Keyword::View)?;
            Ok(Statement::CreateView(self.parse_create_view(true)?))
        } else if self.parse_keyword(Keyword::View) {
            Ok(Statement::CreateView(self.parse_create_view(false)?))
        } else {
            Err(self.violation("TABLE, VIEW or MATERIALIZED VIEW"))
        }
    }

    fn parse_create_table(&mut self) -> Result<CreateTableStatement, ParseError> {
        let if_not_exists = self.parse_if(&[Keyword::Not, Keyword::Exists])?;
        let name = self.parse_object_name()?;
        self.expect_token(&TokenKind::LeftParen)?;

        let mut columns = vec![];
        let mut constraints = vec![];
        loop {
            if self.peek_table_constraint() {
                constraints.push(self.parse_table_constraint()?);
            } else {
                columns.push(self.parse_column_def()?);
            }
            if !self.consume_token(&TokenKind::Comma) {
                break;
            }
        }
        self.expect_token(&TokenKind::RightParen)?;

        Ok(CreateTableStatement {
            if_not_exists,
            name,
            columns,
            constraints,
        })
    }

    fn parse_create_view(&mut self, materialized: bool) -> Result<CreateViewStatement, ParseError> {
        let name = self.parse_object_name()?;
        let columns = self.parse_optional_parenthesized_identifiers()?;
        self.expect_keyword(Keyword::As)?;
        let query = self
            .parse_query()
            .map_err(|e| e.context(format!("in definition of view `{name}`")))?;
        Ok(CreateViewStatement {
            materialized,
            name,
            columns,
            query: Box::new(query),
        })
    }

    /// Parses `name type [option ...]`.
    pub(super) fn parse_column_def(&mut self) -> Result<ColumnDef, ParseError> {
        let name = self.parse_identifier()?;
        let data_type = self.parse_data_type()?;
        let mut options = vec![];
        loop {
            let constraint_name = if self.parse_keyword(Keyword::Constraint) {
                Some(self.parse_identifier()?)
            } else {
                None
            };
            match self.parse_optional_column_option()? {
                Some(option) => options.push(ColumnOptionDef {
                    name: constraint_name,
                    option,
                }),
                None if constraint_name.is_some() => {
                    return Err(self.violation("a column constraint"));
                }
                None => break,
            }
        }
        Ok(ColumnDef {
            name,
            data_type,
            options,
        })
    }

    fn parse_optional_column_option(&mut self) -> Result<Option<ColumnOption>, ParseError> {
        let option = if self.parse_keyword(Keyword::Not) {
            self.expect_keyword(Keyword::Null)?;
            ColumnOption::NotNull
        } else if self.parse_keyword(Keyword::Null) {
            ColumnOption::Null
        } else if self.parse_keyword(Keyword::Default) {
            ColumnOption::Default(self.parse_expr()?)
        } else if self.parse_keyword(Keyword::Primary) {
            self.expect_keyword(Keyword::Key)?;
            ColumnOption::PrimaryKey
        } else if self.parse_keyword(Keyword::Unique) {
            ColumnOption::Unique
        } else if self.parse_keyword(Keyword::References) {
            let table = self.parse_object_name()?;
            let columns = self.parse_optional_parenthesized_identifiers()?;
            ColumnOption::References { table, columns }
        } else if self.parse_keyword(Keyword::Check) {
            ColumnOption::Check(self.parse_parenthesized_expr()?)
        } else {
            return Ok(None);
        };
        Ok(Some(option))
    }

    fn peek_table_constraint(&self) -> bool {
        [
            Keyword::Constraint,
            Keyword::Primary,
            Keyword::Unique,
            Keyword::Foreign,
            Keyword::Check,
        ]
        .into_iter()
        .any(|kw| self.peek_keyword(kw))
    }

    pub(super) fn parse_table_constraint(&mut self) -> Result<TableConstraint, ParseError> {
        let name = if self.parse_keyword(Keyword::Constraint) {
            Some(self.parse_identifier()?)
        } else {
            None
        };

        if self.parse_keyword(Keyword::Primary) {
            self.expect_keyword(Keyword::Key)?;
            Ok(TableConstraint::Unique {
                name,
                columns: self.parse_parenthesized_identifiers()?,
                is_primary: true,
            })
        } else if self.parse_keyword(Keyword::Unique) {
            Ok(TableConstraint::Unique {
                name,
                columns: self.parse_parenthesized_identifiers()?,
                is_primary: false,
            })
        } else if self.parse_keyword(Keyword::Foreign) {
            self.expect_keyword(Keyword::Key)?;
            let columns = self.parse_parenthesized_identifiers()?;
            self.expect_keyword(Keyword::References)?;
            let foreign_table = self.parse_object_name()?;
            let referred_columns = self.parse_optional_parenthesized_identifiers()?;
            Ok(TableConstraint::ForeignKey {
                name,
                columns,
                foreign_table,
                referred_columns,
            })
        } else if self.parse_keyword(Keyword::Check) {
            Ok(TableConstraint::Check {
                name,
                expr: self.parse_parenthesized_expr()?,
            })
        } else {
            Err(self.violation("PRIMARY KEY, UNIQUE, FOREIGN KEY or CHECK"))
        }
    }

    fn parse_alter_table(&mut self) -> Result<AlterTableStatement, ParseError> {
        self.expect_keyword(Keyword::Table)?;
        let name = self.parse_object_name()?;

        let operation = if self.parse_keyword(Keyword::Add) {
            if self.peek_table_constraint() {
                AlterTableOperation::AddConstraint(self.parse_table_constraint()?)
            } else {
                self.parse_keyword(Keyword::Column);
                AlterTableOperation::AddColumn(self.parse_column_def()?)
            }
        } else if self.parse_keyword(Keyword::Drop) {
            self.parse_keyword(Keyword::Column);
            let if_exists = self.parse_if(&[Keyword::Exists])?;
            let name = self.parse_identifier()?;
            let cascade = self.parse_keyword(Keyword::Cascade);
            AlterTableOperation::DropColumn {
                name,
                if_exists,
                cascade,
            }
        } else if self.parse_keyword(Keyword::Rename) {
            if self.parse_keyword(Keyword::To) {
                AlterTableOperation::RenameTable {
                    new_name: self.parse_object_name()?,
                }
            } else {
                self.parse_keyword(Keyword::Column);
                let old_name = self.parse_identifier()?;
                self.expect_keyword(Keyword::To)?;
                let new_name = self.parse_identifier()?;
                AlterTableOperation::RenameColumn { old_name, new_name }
            }
        } else {
            return Err(self.violation("ADD, DROP or RENAME"));
        };

        Ok(AlterTableStatement { name, operation })
    }

    /// Parses `COPY name [(cols)] FROM {STDIN | 'file'}` or `... TO {STDOUT | 'file'}`.
    fn parse_copy(&mut self) -> Result<CopyStatement, ParseError> {
        let table = self.parse_object_name()?;
        let columns = self.parse_optional_parenthesized_identifiers()?;

        let (direction, stream_keyword) = if self.parse_keyword(Keyword::From) {
            (CopyDirection::From, Keyword::Stdin)
        } else if self.parse_keyword(Keyword::To) {
            (CopyDirection::To, Keyword::Stdout)
        } else {
            return Err(self.violation("FROM or TO"));
        };

        let target = if self.parse_keyword(stream_keyword) {
            if direction == CopyDirection::From {
                CopyTarget::Stdin
            } else {
                CopyTarget::Stdout
            }
        } else if let Some(TokenKind::SingleQuotedString(path)) =
            self.peek_token().map(|t| t.kind.clone())
        {
            self.next_token();
            CopyTarget::File(path)
        } else {
            return Err(self.violation(&format!("{stream_keyword} or a quoted file name")));
        };

        Ok(CopyStatement {
            table,
            columns,
            direction,
            target,
        })
    }

    // --- Identifiers and lists ---

    /// Parses a single identifier. Reserved unquoted words are rejected.
    pub(super) fn parse_identifier(&mut self) -> Result<Ident, ParseError> {
        let token = self
            .next_token()
            .ok_or_else(|| ParseError::exhausted("an identifier"))?;
        match &token.kind {
            TokenKind::Word(w) if w.quote_style.is_some() || !w.reserved => Ok(Ident {
                value: w.value.clone(),
                quote_style: w.quote_style,
            }),
            _ => Err(ParseError::unexpected("an identifier", token)),
        }
    }

    /// Parses a dot-separated name such as `schema.table`.
    pub(super) fn parse_object_name(&mut self) -> Result<ObjectName, ParseError> {
        let mut parts = vec![self.parse_identifier()?];
        while self.consume_token(&TokenKind::Dot) {
            parts.push(self.parse_identifier()?);
        }
        Ok(ObjectName(parts))
    }

    /// Parses `(ident, ...)`.
    pub(super) fn parse_parenthesized_identifiers(&mut self) -> Result<Vec<Ident>, ParseError> {
        self.expect_token(&TokenKind::LeftParen)?;
        let idents = self.parse_comma_separated(Self::parse_identifier)?;
        self.expect_token(&TokenKind::RightParen)?;
        Ok(idents)
    }

    /// Parses `(ident, ...)` if the next token is `(`, else returns an empty list.
    pub(super) fn parse_optional_parenthesized_identifiers(
        &mut self,
    ) -> Result<Vec<Ident>, ParseError> {
        if self.peek_token_is(&TokenKind::LeftParen) {
            self.parse_parenthesized_identifiers()
        } else {
            Ok(vec![])
        }
    }

    /// Parses one or more items separated by commas.
    pub(super) fn parse_comma_separated<T>(
        &mut self,
        mut f: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut values = vec![];
        loop {
            values.push(f(self)?);
            if !self.consume_token(&TokenKind::Comma) {
                break;
            }
        }
        Ok(values)
    }

    /// Parses an optional `IF` guard; once IF is seen, `rest` is mandatory.
    fn parse_if(&mut self, rest: &[Keyword]) -> Result<bool, ParseError> {
        if !self.parse_keyword(Keyword::If) {
            return Ok(false);
        }
        for &keyword in rest {
            self.expect_keyword(keyword)?;
        }
        Ok(true)
    }

    /// Returns true if the next tokens are `(` followed by SELECT or WITH.
    pub(super) fn peek_query_in_parens(&mut self) -> bool {
        let mark = self.mark();
        let found = self.consume_token(&TokenKind::LeftParen)
            && (self.peek_keyword(Keyword::Select) || self.peek_keyword(Keyword::With));
        self.reset(mark);
        found
    }

    /// Runs `f` one nesting level deeper, failing once the recursion limit is hit.
    pub(super) fn with_depth<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.recursion_limit {
            return Err(ParseError::RecursionLimit {
                limit: self.recursion_limit,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // --- Cursor ---

    /// Returns the next non-whitespace token without consuming it.
    #[must_use]
    pub fn peek_token(&self) -> Option<&Token> {
        self.stream.peek()
    }

    /// Consumes and returns the next non-whitespace token.
    pub fn next_token(&mut self) -> Option<Token> {
        self.stream.advance().cloned()
    }

    /// Un-consumes the last token returned by [`next_token`](Self::next_token).
    pub fn prev_token(&mut self) {
        self.stream.retreat();
    }

    /// Saves the cursor position.
    #[must_use]
    pub const fn mark(&self) -> Mark {
        self.stream.mark()
    }

    /// Restores a position saved by [`mark`](Self::mark).
    pub fn reset(&mut self, mark: Mark) {
        trace!(index = mark.index(), "rewinding speculative parse");
        self.stream.reset(mark);
    }

    /// Returns the raw cursor position.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.stream.index()
    }

    // --- Matchers ---

    /// Returns true if the next token is the unquoted keyword `keyword`.
    #[must_use]
    pub fn peek_keyword(&self, keyword: Keyword) -> bool {
        self.peek_token().is_some_and(|t| t.is_keyword(keyword))
    }

    /// Consumes the next token if it is the unquoted keyword `keyword`.
    pub fn parse_keyword(&mut self, keyword: Keyword) -> bool {
        if self.peek_keyword(keyword) {
            self.stream.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the whole keyword sequence, or nothing.
    pub fn parse_keywords(&mut self, keywords: &[Keyword]) -> bool {
        let mark = self.mark();
        for &keyword in keywords {
            if !self.parse_keyword(keyword) {
                self.reset(mark);
                return false;
            }
        }
        true
    }

    /// Consumes `keyword` or fails.
    pub fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.parse_keyword(keyword) {
            Ok(())
        } else {
            Err(self.violation(keyword.as_str()))
        }
    }

    /// Returns true if the next token has kind `kind`.
    #[must_use]
    pub fn peek_token_is(&self, kind: &TokenKind) -> bool {
        self.peek_token().is_some_and(|t| t.kind == *kind)
    }

    /// Consumes the next token if it has kind `kind`.
    pub fn consume_token(&mut self, kind: &TokenKind) -> bool {
        if self.peek_token_is(kind) {
            self.stream.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a token of kind `kind` or fails.
    pub fn expect_token(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.consume_token(kind) {
            Ok(())
        } else {
            Err(self.violation(&format!("`{kind}`")))
        }
    }

    // --- Errors ---

    /// Fails because no production matches the next token.
    pub(super) fn expected<T>(&self, expected: &str) -> Result<T, ParseError> {
        Err(self.peek_token().map_or_else(
            || ParseError::exhausted(expected),
            |found| ParseError::unexpected(expected, found.clone()),
        ))
    }

    /// A mandatory token is missing after what was consumed so far.
    pub(super) fn violation(&self, expected: &str) -> ParseError {
        match self.peek_token() {
            None => ParseError::exhausted(expected),
            Some(found) => ParseError::GrammarViolation {
                after: self
                    .stream
                    .previous()
                    .map_or_else(|| String::from("start of input"), ToString::to_string),
                expected: String::from(expected),
                found: found.clone(),
            },
        }
    }
}
