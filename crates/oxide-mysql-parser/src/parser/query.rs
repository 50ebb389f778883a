//! `SELECT`, `UNION` and table references.

use super::parser::Grammar;
use super::Result;
use crate::ast::{
    ByItem, ColumnName, ExprNode, FieldList, GroupByClause, HavingClause, IndexHint,
    IndexHintScope, IndexHintType, Join, JoinType, Limit, OnCondition, OrderByClause,
    PositionExpr, ResultSetNode, SelectField, SelectLockType, SelectStmt, StmtNode, TableName,
    TableRefsClause, TableSource, UnionStmt, WildCardField, WindowSpec,
};
use crate::lexer::{Keyword, TokenKind};

/// A parsed query expression.
pub(super) enum Query {
    Select(Box<SelectStmt>),
    Union(Box<UnionStmt>),
}

impl Query {
    pub(super) fn into_stmt(self) -> StmtNode {
        match self {
            Self::Select(select) => StmtNode::Select(select),
            Self::Union(union) => StmtNode::Union(union),
        }
    }

    pub(super) fn into_result_set(self) -> ResultSetNode {
        match self {
            Self::Select(select) => ResultSetNode::Select(select),
            Self::Union(union) => ResultSetNode::Union(union),
        }
    }
}

/// Unwraps a join holding a single result set.
fn join_node(join: Join) -> ResultSetNode {
    if join.right.is_none() && join.on.is_none() && join.using.is_empty() {
        return *join.left;
    }
    ResultSetNode::Join(Box::new(join))
}

impl Grammar<'_> {
    /// Parses a select or a union of selects.
    pub(super) fn parse_query(&mut self) -> Result<Query> {
        let start = self.offset();
        let first = self.parse_union_member()?;
        if !self.check_keyword(Keyword::Union) {
            let trailing = self.check_keyword(Keyword::Order) || self.check_keyword(Keyword::Limit);
            if first.is_in_braces && trailing {
                let mut union = UnionStmt::default();
                union
                    .select_list
                    .selects
                    .push(ResultSetNode::Select(first));
                union.order_by = self.parse_order_by(true)?;
                union.limit = self.parse_limit()?;
                union.text = Some(self.text_from(start));
                return Ok(Query::Union(Box::new(union)));
            }
            return Ok(Query::Select(first));
        }

        let mut selects = vec![first];
        while self.check_keyword(Keyword::Union) {
            if let Some(prev) = selects.last() {
                if !prev.is_in_braces && (prev.order_by.is_some() || prev.limit.is_some()) {
                    return Err(self.error());
                }
            }
            self.advance();
            let distinct = if self.eat_keyword(Keyword::All) {
                false
            } else {
                self.eat_keyword(Keyword::Distinct);
                true
            };
            let mut member = self.parse_union_member()?;
            member.is_after_union_distinct = distinct;
            selects.push(member);
        }

        let mut union = UnionStmt::default();
        if let Some(last) = selects.last_mut() {
            if last.is_in_braces {
                union.order_by = self.parse_order_by(true)?;
                union.limit = self.parse_limit()?;
            } else {
                union.order_by = last.order_by.take().map(|mut order_by| {
                    order_by.for_union = true;
                    order_by
                });
                union.limit = last.limit.take();
            }
        }
        union.select_list.selects = selects.into_iter().map(ResultSetNode::Select).collect();
        union.text = Some(self.text_from(start));
        Ok(Query::Union(Box::new(union)))
    }

    /// A select, or a parenthesized select with any number of parentheses.
    fn parse_union_member(&mut self) -> Result<Box<SelectStmt>> {
        if self.check(TokenKind::LeftParen) {
            let start = self.offset();
            self.advance();
            let mut select = self.nested(Self::parse_union_member)?;
            self.expect(TokenKind::RightParen)?;
            select.is_in_braces = true;
            select.text = Some(self.text_from(start));
            return Ok(select);
        }
        self.parse_select()
    }

    fn parse_select(&mut self) -> Result<Box<SelectStmt>> {
        let start = self.offset();
        self.expect_keyword(Keyword::Select)?;
        let mut select = Box::new(SelectStmt {
            table_hints: self.parse_hints()?,
            ..SelectStmt::default()
        });
        if self.eat_keyword(Keyword::Distinct) || self.eat_keyword(Keyword::Distinctrow) {
            select.distinct = true;
        } else {
            self.eat_keyword(Keyword::All);
        }
        select.fields = self.parse_field_list()?;

        if self.eat_keyword(Keyword::From) && !self.eat_keyword(Keyword::Dual) {
            select.from = Some(self.parse_table_refs()?);
        }
        if self.eat_keyword(Keyword::Where) {
            select.where_clause = Some(Box::new(self.parse_expr()?));
        }
        if self.check_keyword(Keyword::Group) {
            let clause_start = self.offset();
            self.advance();
            self.expect_keyword(Keyword::By)?;
            let items = self.parse_by_items()?;
            select.group_by = Some(GroupByClause {
                items,
                text: Some(self.text_from(clause_start)),
            });
        }
        if self.check_keyword(Keyword::Having) {
            let clause_start = self.offset();
            self.advance();
            let expr = self.parse_expr()?;
            select.having = Some(HavingClause {
                expr: Box::new(expr),
                text: Some(self.text_from(clause_start)),
            });
        }
        if self.config.enable_window_func && self.eat_keyword(Keyword::Window) {
            select.window_specs = self.parse_named_windows()?;
        }
        select.order_by = self.parse_order_by(false)?;
        select.limit = self.parse_limit()?;
        select.lock_tp = self.parse_lock()?;
        select.text = Some(self.text_from(start));
        Ok(select)
    }

    fn parse_field_list(&mut self) -> Result<FieldList> {
        let start = self.offset();
        let mut fields = Vec::new();
        loop {
            fields.push(self.parse_select_field()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(FieldList {
            fields,
            text: Some(self.text_from(start)),
        })
    }

    fn parse_select_field(&mut self) -> Result<SelectField> {
        let start = self.offset();
        if self.eat(TokenKind::Star) {
            return Ok(SelectField {
                wild_card: Some(WildCardField::default()),
                expr: None,
                as_name: None,
                text: Some(self.text_from(start)),
            });
        }
        if let Some(wild_card) = self.try_qualified_wildcard() {
            return Ok(SelectField {
                wild_card: Some(wild_card),
                expr: None,
                as_name: None,
                text: Some(self.text_from(start)),
            });
        }

        let expr = self.parse_expr()?;
        let text = self.text_from(start);
        let as_name = self.parse_field_alias()?;
        let mut field = SelectField::expr(expr);
        field.as_name = as_name;
        field.text = Some(text);
        Ok(field)
    }

    /// `t.*` or `db.t.*`.
    fn try_qualified_wildcard(&mut self) -> Option<WildCardField> {
        if !self.is_ident() || self.nth_kind(1) != TokenKind::Dot {
            return None;
        }
        if self.nth_kind(2) == TokenKind::Star {
            let table = self.advance().lit;
            self.advance();
            self.advance();
            return Some(WildCardField {
                schema: None,
                table: Some(table),
            });
        }
        let qualified = self.nth_kind(2).is_identifier()
            && self.nth_kind(3) == TokenKind::Dot
            && self.nth_kind(4) == TokenKind::Star;
        if qualified {
            let schema = self.advance().lit;
            self.advance();
            let table = self.advance().lit;
            self.advance();
            self.advance();
            return Some(WildCardField {
                schema: Some(schema),
                table: Some(table),
            });
        }
        None
    }

    fn parse_field_alias(&mut self) -> Result<Option<String>> {
        if self.eat_keyword(Keyword::As) {
            if self.is_ident() || self.check(TokenKind::StringLit) {
                return Ok(Some(self.advance().lit));
            }
            return Err(self.error());
        }
        if self.is_ident() || self.check(TokenKind::StringLit) {
            return Ok(Some(self.advance().lit));
        }
        Ok(None)
    }

    /// `ORDER BY items`, marked as belonging to a union when `for_union`.
    pub(super) fn parse_order_by(&mut self, for_union: bool) -> Result<Option<OrderByClause>> {
        if !self.check_keyword(Keyword::Order) {
            return Ok(None);
        }
        let start = self.offset();
        self.advance();
        self.expect_keyword(Keyword::By)?;
        let items = self.parse_by_items()?;
        Ok(Some(OrderByClause {
            items,
            for_union,
            text: Some(self.text_from(start)),
        }))
    }

    pub(super) fn parse_by_items(&mut self) -> Result<Vec<ByItem>> {
        let mut items = Vec::new();
        loop {
            items.push(self.parse_by_item()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(items)
    }

    fn parse_by_item(&mut self) -> Result<ByItem> {
        let start = self.offset();
        let ends_item = matches!(
            self.nth_kind(1),
            TokenKind::Comma
                | TokenKind::RightParen
                | TokenKind::Semicolon
                | TokenKind::Eof
                | TokenKind::Keyword(
                    Keyword::Asc
                        | Keyword::Desc
                        | Keyword::Limit
                        | Keyword::Having
                        | Keyword::Order
                        | Keyword::Union
                        | Keyword::For
                        | Keyword::Lock
                        | Keyword::Window
                        | Keyword::Rows
                        | Keyword::Range
                )
        );
        let position = if self.check(TokenKind::IntLit) && ends_item {
            self.peek().lit.parse::<u64>().ok()
        } else {
            None
        };
        let expr = match position {
            Some(n) => {
                self.advance();
                ExprNode::Position(PositionExpr {
                    n,
                    refer: None,
                    text: Some(self.text_from(start)),
                })
            }
            None => self.parse_expr()?,
        };
        let desc = if self.eat_keyword(Keyword::Desc) {
            true
        } else {
            self.eat_keyword(Keyword::Asc);
            false
        };
        Ok(ByItem {
            expr: Box::new(expr),
            desc,
            text: Some(self.text_from(start)),
        })
    }

    /// `LIMIT n`, `LIMIT o, n` or `LIMIT n OFFSET o`.
    pub(super) fn parse_limit(&mut self) -> Result<Option<Limit>> {
        if !self.check_keyword(Keyword::Limit) {
            return Ok(None);
        }
        let start = self.offset();
        self.advance();
        let first = self.parse_limit_item()?;
        let (count, offset) = if self.eat(TokenKind::Comma) {
            (self.parse_limit_item()?, Some(first))
        } else if self.eat_word("OFFSET") {
            (first, Some(self.parse_limit_item()?))
        } else {
            (first, None)
        };
        Ok(Some(Limit {
            count: Box::new(count),
            offset: offset.map(Box::new),
            text: Some(self.text_from(start)),
        }))
    }

    fn parse_limit_item(&mut self) -> Result<ExprNode> {
        match self.peek_kind() {
            TokenKind::IntLit | TokenKind::ParamMarker => self.parse_primary(),
            _ => Err(self.error()),
        }
    }

    fn parse_lock(&mut self) -> Result<SelectLockType> {
        if self.eat_keyword(Keyword::For) {
            self.expect_keyword(Keyword::Update)?;
            return Ok(SelectLockType::ForUpdate);
        }
        if self.eat_keyword(Keyword::Lock) {
            self.expect_keyword(Keyword::In)?;
            self.expect_word("SHARE")?;
            self.expect_word("MODE")?;
            return Ok(SelectLockType::InShareMode);
        }
        Ok(SelectLockType::None)
    }

    /// `WINDOW w AS (spec), ...`
    fn parse_named_windows(&mut self) -> Result<Vec<WindowSpec>> {
        let mut specs = Vec::new();
        loop {
            let start = self.offset();
            let name = self.expect_ident()?;
            self.expect_keyword(Keyword::As)?;
            self.expect(TokenKind::LeftParen)?;
            let mut spec = self.parse_window_body()?;
            self.expect(TokenKind::RightParen)?;
            spec.name = Some(name);
            spec.text = Some(self.text_from(start));
            specs.push(spec);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(specs)
    }

    // --- Table references ---

    /// Comma-separated joined tables.
    pub(super) fn parse_table_refs(&mut self) -> Result<TableRefsClause> {
        let start = self.offset();
        let mut join = self.parse_joined_table()?;
        while self.eat(TokenKind::Comma) {
            let right = self.parse_joined_table()?;
            join = Join::cross(join_node(join), join_node(right));
        }
        let mut refs = TableRefsClause::new(join);
        refs.text = Some(self.text_from(start));
        Ok(refs)
    }

    fn parse_joined_table(&mut self) -> Result<Join> {
        let start = self.offset();
        let mut left = self.parse_table_factor()?;
        loop {
            let mut natural = false;
            let mut straight = false;
            let tp = match self.peek_kind() {
                TokenKind::Keyword(Keyword::Join) => {
                    self.advance();
                    JoinType::Cross
                }
                TokenKind::Keyword(Keyword::Inner | Keyword::Cross) => {
                    self.advance();
                    self.expect_keyword(Keyword::Join)?;
                    JoinType::Cross
                }
                TokenKind::Keyword(Keyword::StraightJoin) => {
                    self.advance();
                    straight = true;
                    JoinType::Cross
                }
                TokenKind::Keyword(Keyword::Left | Keyword::Right) => self.parse_outer_join()?,
                TokenKind::Keyword(Keyword::Natural) => {
                    self.advance();
                    natural = true;
                    if self.check_keyword(Keyword::Left) || self.check_keyword(Keyword::Right) {
                        self.parse_outer_join()?
                    } else {
                        self.expect_keyword(Keyword::Join)?;
                        JoinType::Cross
                    }
                }
                _ => break,
            };
            let right = self.parse_table_factor()?;
            let mut join = Join::cross(left, right);
            join.tp = tp;
            join.natural = natural;
            join.straight = straight;
            if !natural {
                if self.check_keyword(Keyword::On) {
                    let on_start = self.offset();
                    self.advance();
                    let expr = self.parse_expr()?;
                    join.on = Some(OnCondition {
                        expr: Box::new(expr),
                        text: Some(self.text_from(on_start)),
                    });
                } else if self.eat_keyword(Keyword::Using) {
                    join.using = self.parse_column_list()?;
                } else if tp != JoinType::Cross {
                    return Err(self.error());
                }
            }
            join.text = Some(self.text_from(start));
            left = ResultSetNode::Join(Box::new(join));
        }
        Ok(match left {
            ResultSetNode::Join(join) => *join,
            other => Join::single(other),
        })
    }

    /// `LEFT|RIGHT [OUTER] JOIN`
    fn parse_outer_join(&mut self) -> Result<JoinType> {
        let tp = if self.eat_keyword(Keyword::Left) {
            JoinType::Left
        } else {
            self.expect_keyword(Keyword::Right)?;
            JoinType::Right
        };
        self.eat_keyword(Keyword::Outer);
        self.expect_keyword(Keyword::Join)?;
        Ok(tp)
    }

    /// `(col, ...)`
    pub(super) fn parse_column_list(&mut self) -> Result<Vec<ColumnName>> {
        self.expect(TokenKind::LeftParen)?;
        let mut columns = Vec::new();
        loop {
            columns.push(self.parse_column_name()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RightParen)?;
        Ok(columns)
    }

    fn parse_table_factor(&mut self) -> Result<ResultSetNode> {
        let start = self.offset();
        if self.check(TokenKind::LeftParen) {
            self.advance();
            let derived = self.check_keyword(Keyword::Select)
                || (self.is_query_start(0) && !self.is_joined_group());
            if derived {
                let query = self.nested(Self::parse_query)?;
                self.expect(TokenKind::RightParen)?;
                let as_name = self.parse_table_alias()?;
                return Ok(ResultSetNode::TableSource(Box::new(TableSource {
                    source: query.into_result_set(),
                    as_name,
                    text: Some(self.text_from(start)),
                })));
            }
            let refs = self.nested(Self::parse_table_refs)?;
            self.expect(TokenKind::RightParen)?;
            return Ok(match refs.table_refs {
                ResultSetNode::Join(join) => join_node(*join),
                other => other,
            });
        }

        let mut table = self.parse_table_name()?;
        let as_name = self.parse_table_alias()?;
        table.index_hints = self.parse_index_hints()?;
        Ok(ResultSetNode::TableSource(Box::new(TableSource {
            source: ResultSetNode::TableName(Box::new(table)),
            as_name,
            text: Some(self.text_from(start)),
        })))
    }

    /// Returns true if more table references follow the parenthesized
    /// group at the cursor, as in `((SELECT ...) t JOIN u)`.
    fn is_joined_group(&self) -> bool {
        let mut depth = 0usize;
        let mut i = 0;
        loop {
            match self.nth_kind(i) {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return !matches!(
                            self.nth_kind(i + 1),
                            TokenKind::RightParen
                                | TokenKind::Keyword(Keyword::Union | Keyword::Order | Keyword::Limit)
                        );
                    }
                }
                TokenKind::Eof => return false,
                _ => {}
            }
            i += 1;
        }
    }

    /// `[schema.]name`
    pub(super) fn parse_table_name(&mut self) -> Result<TableName> {
        let start = self.offset();
        let first = self.expect_ident()?;
        let mut table = if self.check(TokenKind::Dot) && self.nth_kind(1).is_identifier() {
            self.advance();
            let name = self.advance().lit;
            TableName {
                schema: Some(first),
                ..TableName::new(name)
            }
        } else {
            TableName::new(first)
        };
        table.text = Some(self.text_from(start));
        Ok(table)
    }

    /// `[AS] alias`
    pub(super) fn parse_table_alias(&mut self) -> Result<Option<String>> {
        if self.eat_keyword(Keyword::As) {
            return self.expect_ident().map(Some);
        }
        if self.is_ident() {
            return Ok(Some(self.advance().lit));
        }
        Ok(None)
    }

    fn parse_index_hints(&mut self) -> Result<Vec<IndexHint>> {
        let mut hints = Vec::new();
        loop {
            let hint_type = match self.peek_kind() {
                TokenKind::Keyword(Keyword::Use) => IndexHintType::Use,
                TokenKind::Keyword(Keyword::Ignore) => IndexHintType::Ignore,
                TokenKind::Keyword(Keyword::Force) => IndexHintType::Force,
                _ => return Ok(hints),
            };
            self.advance();
            if !(self.eat_keyword(Keyword::Index) || self.eat_keyword(Keyword::Key)) {
                return Err(self.error());
            }
            let scope = if self.eat_keyword(Keyword::For) {
                if self.eat_keyword(Keyword::Join) {
                    IndexHintScope::Join
                } else if self.eat_keyword(Keyword::Order) {
                    self.expect_keyword(Keyword::By)?;
                    IndexHintScope::OrderBy
                } else {
                    self.expect_keyword(Keyword::Group)?;
                    self.expect_keyword(Keyword::By)?;
                    IndexHintScope::GroupBy
                }
            } else {
                IndexHintScope::All
            };
            self.expect(TokenKind::LeftParen)?;
            let mut index_names = Vec::new();
            while !self.check(TokenKind::RightParen) {
                if self.check_keyword(Keyword::Primary) {
                    index_names.push(self.advance().lit);
                } else {
                    index_names.push(self.expect_ident()?);
                }
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RightParen)?;
            hints.push(IndexHint {
                hint_type,
                scope,
                index_names,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{parse_one, parser};
    use super::*;
    use crate::restore::{restore_sql, RestoreFlags};

    fn restore(sql: &str) -> String {
        restore_sql(&parse_one(sql), RestoreFlags::DEFAULT).unwrap()
    }

    #[test]
    fn test_select_clauses() {
        assert_eq!(
            restore("select distinct a as x, t.* from t where a > 1 group by a having count(a) > 1 order by 1 desc limit 10 offset 5 for update"),
            "SELECT DISTINCT `a` AS `x`, `t`.* FROM `t` WHERE `a`>1 GROUP BY `a` HAVING COUNT(`a`)>1 ORDER BY 1 DESC LIMIT 5,10 FOR UPDATE"
        );
    }

    #[test]
    fn test_select_dual() {
        assert_eq!(restore("select 1 from dual where 1"), "SELECT 1 FROM DUAL WHERE 1");
        assert_eq!(restore("select 1 from dual"), "SELECT 1");
    }

    #[test]
    fn test_order_by_position() {
        let StmtNode::Select(select) = parse_one("select a from t order by 2, a + 1") else {
            unreachable!();
        };
        let items = &select.order_by.as_ref().unwrap().items;
        assert!(matches!(*items[0].expr, ExprNode::Position(PositionExpr { n: 2, .. })));
        assert!(matches!(*items[1].expr, ExprNode::BinaryOperation(_)));
    }

    #[test]
    fn test_union_takes_trailing_order_and_limit() {
        let StmtNode::Union(union) = parse_one("select a from t union all select b from u order by a limit 1") else {
            unreachable!();
        };
        assert_eq!(union.select_list.selects.len(), 2);
        assert!(union.order_by.as_ref().unwrap().for_union);
        assert!(union.limit.is_some());
        let ResultSetNode::Select(last) = &union.select_list.selects[1] else {
            unreachable!();
        };
        assert!(!last.is_after_union_distinct);
        assert!(last.order_by.is_none());
    }

    #[test]
    fn test_union_rejects_order_by_before_union() {
        assert!(parser()
            .parse("select a from t order by a union select b from u", "", "")
            .is_err());
        assert_eq!(
            restore("(select a from t order by a) union (select b from u) limit 2"),
            "(SELECT `a` FROM `t` ORDER BY `a`) UNION (SELECT `b` FROM `u`) LIMIT 2"
        );
    }

    #[test]
    fn test_braced_select_with_limit_is_a_union() {
        let stmt = parse_one("((select 1)) limit 1");
        let StmtNode::Union(union) = stmt else {
            unreachable!();
        };
        assert_eq!(union.select_list.selects.len(), 1);
    }

    #[test]
    fn test_joins() {
        assert_eq!(
            restore("select * from a, b join c on a.x = c.x left outer join d using (k)"),
            "SELECT * FROM `a` JOIN ((`b` JOIN `c` ON `a`.`x`=`c`.`x`) LEFT JOIN `d` USING (`k`))"
        );
        assert_eq!(
            restore("select * from a natural join b straight_join c"),
            "SELECT * FROM (`a` NATURAL JOIN `b`) STRAIGHT_JOIN `c`"
        );
        assert!(parser().parse("select * from a left join b", "", "").is_err());
    }

    #[test]
    fn test_derived_table_and_index_hints() {
        assert_eq!(
            restore("select * from (select 1) as d, db.t x use index (i1, primary) force key for order by ()"),
            "SELECT * FROM (SELECT 1) AS `d` JOIN `db`.`t` AS `x` USE INDEX (`i1`, `primary`) FORCE INDEX FOR ORDER BY ()"
        );
    }

    #[test]
    fn test_lock_in_share_mode() {
        assert_eq!(
            restore("select a from t lock in share mode"),
            "SELECT `a` FROM `t` LOCK IN SHARE MODE"
        );
    }

    #[test]
    fn test_field_text() {
        let StmtNode::Select(select) = parse_one("select a+1  x, 'b' from t") else {
            unreachable!();
        };
        assert_eq!(select.fields.fields[0].text.as_deref(), Some("a+1"));
        assert_eq!(select.fields.fields[0].as_name.as_deref(), Some("x"));
    }
}
