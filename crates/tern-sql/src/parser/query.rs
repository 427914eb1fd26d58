//! Queries: CTEs, set expressions, SELECT blocks and FROM clauses.

use super::error::ParseError;
use super::pratt::set_operator;
use super::Parser;
use crate::ast::{
    Cte, Ident, JoinClause, JoinConstraint, JoinType, NullOrdering, ObjectName, OrderBy,
    OrderDirection, Query, Select, SelectItem, SetExpr, TableAlias, TableRef,
};
use crate::lexer::{Keyword, TokenKind};

/// Keywords that end a select item or table factor, so they never start an
/// implicit alias even when the dialect leaves them unreserved.
const CLAUSE_KEYWORDS: &[Keyword] = &[
    Keyword::From,
    Keyword::Where,
    Keyword::Group,
    Keyword::Having,
    Keyword::Order,
    Keyword::Limit,
    Keyword::Offset,
    Keyword::Join,
    Keyword::Inner,
    Keyword::Left,
    Keyword::Right,
    Keyword::Full,
    Keyword::Outer,
    Keyword::Cross,
    Keyword::Natural,
    Keyword::On,
    Keyword::Using,
    Keyword::Union,
    Keyword::Intersect,
    Keyword::Except,
];

impl Parser {
    /// Parses a query: `[WITH cte, ...] body [ORDER BY ...] [LIMIT ...] [OFFSET ...]`.
    pub fn parse_query(&mut self) -> Result<Query, ParseError> {
        self.with_depth(|p| {
            let ctes = if p.parse_keyword(Keyword::With) {
                p.parse_comma_separated(Self::parse_cte)?
            } else {
                vec![]
            };

            let body = p.parse_set_expr(0)?;

            let order_by = if p.parse_keyword(Keyword::Order) {
                p.expect_keyword(Keyword::By)?;
                p.parse_comma_separated(Self::parse_order_by)?
            } else {
                vec![]
            };

            let limit = if p.parse_keyword(Keyword::Limit) {
                if p.parse_keyword(Keyword::All) {
                    None
                } else {
                    Some(p.parse_expr()?)
                }
            } else {
                None
            };

            let offset = if p.parse_keyword(Keyword::Offset) {
                let offset = p.parse_expr()?;
                if !p.parse_keyword(Keyword::Row) {
                    p.parse_keyword(Keyword::Rows);
                }
                Some(offset)
            } else {
                None
            };

            Ok(Query {
                ctes,
                body,
                order_by,
                limit,
                offset,
            })
        })
    }

    /// Parses `alias AS (query)`.
    fn parse_cte(&mut self) -> Result<Cte, ParseError> {
        let alias = self.parse_identifier()?;
        self.expect_keyword(Keyword::As)?;
        self.expect_token(&TokenKind::LeftParen)?;
        let query = self
            .parse_query()
            .map_err(|e| e.context(format!("in common table expression `{alias}`")))?;
        self.expect_token(&TokenKind::RightParen)?;
        Ok(Cte { alias, query })
    }

    /// Parses set operands joined by operators binding tighter than `precedence`.
    fn parse_set_expr(&mut self, precedence: u8) -> Result<SetExpr, ParseError> {
        let mut expr = self.parse_set_operand()?;
        loop {
            let Some((op, next)) = self.peek_token().and_then(|t| set_operator(&t.kind)) else {
                break;
            };
            if precedence >= next {
                break;
            }
            self.next_token();
            let all = self.parse_keyword(Keyword::All);
            if !all {
                self.parse_keyword(Keyword::Distinct);
            }
            let right = self.parse_set_expr(next)?;
            expr = SetExpr::SetOperation {
                left: Box::new(expr),
                op,
                all,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn parse_set_operand(&mut self) -> Result<SetExpr, ParseError> {
        self.with_depth(|p| {
            if p.peek_keyword(Keyword::Select) {
                Ok(SetExpr::Select(Box::new(p.parse_select()?)))
            } else if p.consume_token(&TokenKind::LeftParen) {
                let query = p.parse_query()?;
                p.expect_token(&TokenKind::RightParen)?;
                Ok(SetExpr::Query(Box::new(query)))
            } else {
                p.expected("SELECT or a parenthesized query")
            }
        })
    }

    /// Parses a SELECT block up to, not including, ORDER BY.
    pub fn parse_select(&mut self) -> Result<Select, ParseError> {
        self.expect_keyword(Keyword::Select)?;

        let distinct = if self.parse_keyword(Keyword::Distinct) {
            true
        } else {
            self.parse_keyword(Keyword::All);
            false
        };

        let projection = self.parse_comma_separated(Self::parse_select_item)?;

        let from = if self.parse_keyword(Keyword::From) {
            self.parse_comma_separated(Self::parse_table_ref)?
        } else {
            vec![]
        };

        let selection = if self.parse_keyword(Keyword::Where) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let group_by = if self.parse_keyword(Keyword::Group) {
            self.expect_keyword(Keyword::By)?;
            self.parse_comma_separated(Self::parse_expr)?
        } else {
            vec![]
        };

        let having = if self.parse_keyword(Keyword::Having) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        Ok(Select {
            distinct,
            projection,
            from,
            selection,
            group_by,
            having,
        })
    }

    /// Parses `*`, `qualifier.*` or `expr [[AS] alias]`.
    fn parse_select_item(&mut self) -> Result<SelectItem, ParseError> {
        if self.consume_token(&TokenKind::Star) {
            return Ok(SelectItem::Wildcard);
        }

        let mark = self.mark();
        if let Some(qualifier) = self.try_parse_qualified_wildcard() {
            return Ok(SelectItem::QualifiedWildcard(qualifier));
        }
        self.reset(mark);

        let expr = self.parse_expr()?;
        let alias = self.parse_optional_alias()?;
        Ok(SelectItem::Expr { expr, alias })
    }

    /// Consumes `name[.name]*.*`, or returns `None` leaving the cursor anywhere.
    fn try_parse_qualified_wildcard(&mut self) -> Option<ObjectName> {
        let mut parts = vec![];
        loop {
            parts.push(self.parse_identifier().ok()?);
            if !self.consume_token(&TokenKind::Dot) {
                return None;
            }
            if self.consume_token(&TokenKind::Star) {
                return Some(ObjectName(parts));
            }
        }
    }

    /// Parses `AS alias`, or a bare word that cannot start the next clause.
    fn parse_optional_alias(&mut self) -> Result<Option<Ident>, ParseError> {
        if self.parse_keyword(Keyword::As) {
            return Ok(Some(self.parse_identifier()?));
        }
        let implicit = self.peek_token().and_then(|t| t.as_word()).is_some_and(|w| {
            w.quote_style.is_some()
                || (!w.reserved && !w.keyword().is_some_and(|kw| CLAUSE_KEYWORDS.contains(&kw)))
        });
        if implicit {
            Ok(Some(self.parse_identifier()?))
        } else {
            Ok(None)
        }
    }

    fn parse_optional_table_alias(&mut self) -> Result<Option<TableAlias>, ParseError> {
        let Some(name) = self.parse_optional_alias()? else {
            return Ok(None);
        };
        let columns = self.parse_optional_parenthesized_identifiers()?;
        Ok(Some(TableAlias { name, columns }))
    }

    /// Parses one FROM entry with any joins that follow it.
    fn parse_table_ref(&mut self) -> Result<TableRef, ParseError> {
        let mut table = self.parse_table_factor()?;

        loop {
            let natural = self.parse_keyword(Keyword::Natural);
            let join_type = if self.parse_keyword(Keyword::Join) {
                JoinType::Inner
            } else if self.parse_keyword(Keyword::Inner) {
                self.expect_keyword(Keyword::Join)?;
                JoinType::Inner
            } else if self.parse_keyword(Keyword::Cross) {
                self.expect_keyword(Keyword::Join)?;
                JoinType::Cross
            } else if let Some(join_type) = self.parse_outer_join_type() {
                self.parse_keyword(Keyword::Outer);
                self.expect_keyword(Keyword::Join)?;
                join_type
            } else if natural {
                return Err(self.violation("JOIN"));
            } else {
                break;
            };

            let right = self.parse_table_factor()?;

            let constraint = if natural {
                JoinConstraint::Natural
            } else if join_type == JoinType::Cross {
                JoinConstraint::None
            } else if self.parse_keyword(Keyword::On) {
                JoinConstraint::On(self.parse_expr()?)
            } else if self.parse_keyword(Keyword::Using) {
                JoinConstraint::Using(self.parse_parenthesized_identifiers()?)
            } else {
                return Err(self.violation("ON or USING"));
            };

            table = TableRef::Join {
                left: Box::new(table),
                join: Box::new(JoinClause {
                    join_type,
                    table: right,
                    constraint,
                }),
            };
        }

        Ok(table)
    }

    fn parse_outer_join_type(&mut self) -> Option<JoinType> {
        if self.parse_keyword(Keyword::Left) {
            Some(JoinType::Left)
        } else if self.parse_keyword(Keyword::Right) {
            Some(JoinType::Right)
        } else if self.parse_keyword(Keyword::Full) {
            Some(JoinType::Full)
        } else {
            None
        }
    }

    /// Parses a table name or a derived table, with optional alias.
    fn parse_table_factor(&mut self) -> Result<TableRef, ParseError> {
        if self.consume_token(&TokenKind::LeftParen) {
            return self.with_depth(|p| {
                let subquery = p
                    .parse_query()
                    .map_err(|e| e.context("in derived table"))?;
                p.expect_token(&TokenKind::RightParen)?;
                let alias = p.parse_optional_table_alias()?;
                Ok(TableRef::Derived {
                    subquery: Box::new(subquery),
                    alias,
                })
            });
        }

        let name = self.parse_object_name()?;
        let alias = self.parse_optional_table_alias()?;
        Ok(TableRef::Table { name, alias })
    }

    /// Parses `expr [ASC|DESC] [NULLS FIRST|LAST]`.
    fn parse_order_by(&mut self) -> Result<OrderBy, ParseError> {
        let expr = self.parse_expr()?;

        let direction = if self.parse_keyword(Keyword::Desc) {
            OrderDirection::Desc
        } else {
            self.parse_keyword(Keyword::Asc);
            OrderDirection::Asc
        };

        let nulls = if self.parse_keyword(Keyword::Nulls) {
            if self.parse_keyword(Keyword::First) {
                Some(NullOrdering::First)
            } else if self.parse_keyword(Keyword::Last) {
                Some(NullOrdering::Last)
            } else {
                return Err(self.violation("FIRST or LAST"));
            }
        } else {
            None
        };

        Ok(OrderBy {
            expr,
            direction,
            nulls,
        })
    }
}
