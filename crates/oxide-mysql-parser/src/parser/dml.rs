//! `INSERT`, `REPLACE`, `UPDATE` and `DELETE`.

use super::parser::Grammar;
use super::Result;
use crate::ast::{
    Assignment, DeleteStmt, DeleteTableList, ExprNode, InsertStmt, Join, ResultSetNode,
    TableName, TableRefsClause, TableSource, UpdateStmt,
};
use crate::lexer::{Keyword, TokenKind};

impl Grammar<'_> {
    pub(super) fn parse_insert(&mut self) -> Result<InsertStmt> {
        let is_replace = self.eat_keyword(Keyword::Replace);
        if !is_replace {
            self.expect_keyword(Keyword::Insert)?;
        }
        let table_hints = self.parse_hints()?;
        let ignore = self.eat_keyword(Keyword::Ignore);
        self.eat_keyword(Keyword::Into);

        let start = self.offset();
        let name = self.parse_table_name()?;
        let mut table = TableRefsClause::new(Join::single(ResultSetNode::TableSource(Box::new(
            TableSource {
                source: ResultSetNode::TableName(Box::new(name)),
                as_name: None,
                text: Some(self.text_from(start)),
            },
        ))));
        table.text = Some(self.text_from(start));

        let mut stmt = InsertStmt {
            is_replace,
            ignore,
            table,
            columns: Vec::new(),
            lists: Vec::new(),
            setlist: Vec::new(),
            select: None,
            on_duplicate: Vec::new(),
            table_hints,
            text: None,
        };

        if self.check(TokenKind::LeftParen) && !self.is_query_start(0) {
            self.advance();
            while !self.check(TokenKind::RightParen) {
                stmt.columns.push(self.parse_column_name()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RightParen)?;
        }

        if self.eat_keyword(Keyword::Values) || self.eat_word("VALUE") {
            loop {
                stmt.lists.push(self.parse_value_row()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        } else if self.eat_keyword(Keyword::Set) {
            if !stmt.columns.is_empty() {
                return Err(self.error());
            }
            stmt.setlist = self.parse_assignments()?;
        } else if self.is_query_start(0) {
            stmt.select = Some(Box::new(self.parse_query()?.into_result_set()));
        } else {
            return Err(self.error());
        }

        if self.eat_keyword(Keyword::On) {
            self.expect_word("DUPLICATE")?;
            self.expect_keyword(Keyword::Key)?;
            self.expect_keyword(Keyword::Update)?;
            stmt.on_duplicate = self.parse_assignments()?;
        }
        Ok(stmt)
    }

    /// `(expr, ...)`, possibly empty.
    fn parse_value_row(&mut self) -> Result<Vec<ExprNode>> {
        self.expect(TokenKind::LeftParen)?;
        let mut row = Vec::new();
        while !self.check(TokenKind::RightParen) {
            row.push(self.parse_expr()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RightParen)?;
        Ok(row)
    }

    /// `col = expr, ...`
    pub(super) fn parse_assignments(&mut self) -> Result<Vec<Assignment>> {
        let mut list = Vec::new();
        loop {
            let start = self.offset();
            let column = self.parse_column_name()?;
            if !(self.eat(TokenKind::Eq) || self.eat(TokenKind::Assign)) {
                return Err(self.error());
            }
            let expr = self.parse_expr()?;
            list.push(Assignment {
                column,
                expr: Box::new(expr),
                text: Some(self.text_from(start)),
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(list)
    }

    pub(super) fn parse_update(&mut self) -> Result<UpdateStmt> {
        self.expect_keyword(Keyword::Update)?;
        let table_hints = self.parse_hints()?;
        let ignore = self.eat_keyword(Keyword::Ignore);
        let table_refs = self.parse_table_refs()?;
        let multiple_table = matches!(
            &table_refs.table_refs,
            ResultSetNode::Join(join) if join.right.is_some()
        );
        self.expect_keyword(Keyword::Set)?;
        let list = self.parse_assignments()?;
        let where_clause = self.parse_where()?;
        let (order_by, limit) = if multiple_table {
            (None, None)
        } else {
            (self.parse_order_by(false)?, self.parse_limit()?)
        };
        Ok(UpdateStmt {
            table_refs,
            list,
            where_clause,
            order_by,
            limit,
            ignore,
            multiple_table,
            table_hints,
            text: None,
        })
    }

    pub(super) fn parse_delete(&mut self) -> Result<DeleteStmt> {
        self.expect_keyword(Keyword::Delete)?;
        let table_hints = self.parse_hints()?;
        let ignore = self.eat_keyword(Keyword::Ignore);
        let mut stmt = if self.eat_keyword(Keyword::From) {
            self.parse_delete_from()?
        } else {
            let tables = self.parse_delete_table_list()?;
            self.expect_keyword(Keyword::From)?;
            let table_refs = self.parse_table_refs()?;
            DeleteStmt {
                table_refs,
                tables: Some(tables),
                where_clause: None,
                order_by: None,
                limit: None,
                ignore: false,
                is_multi_table: true,
                before_from: true,
                table_hints: Vec::new(),
                text: None,
            }
        };
        stmt.ignore = ignore;
        stmt.table_hints = table_hints;
        stmt.where_clause = self.parse_where()?;
        if !stmt.is_multi_table {
            stmt.order_by = self.parse_order_by(false)?;
            stmt.limit = self.parse_limit()?;
        }
        Ok(stmt)
    }

    /// After `DELETE FROM`: a single table, or `t1, t2 USING refs`.
    fn parse_delete_from(&mut self) -> Result<DeleteStmt> {
        let start = self.offset();
        let multi = matches!(self.nth_kind(1), TokenKind::Comma | TokenKind::Keyword(Keyword::Using))
            || self.nth_kind(2) == TokenKind::Star
            || (self.nth_kind(1) == TokenKind::Dot
                && matches!(
                    self.nth_kind(3),
                    TokenKind::Comma | TokenKind::Dot | TokenKind::Keyword(Keyword::Using)
                ));
        if multi {
            let tables = self.parse_delete_table_list()?;
            self.expect_keyword(Keyword::Using)?;
            let table_refs = self.parse_table_refs()?;
            return Ok(DeleteStmt {
                table_refs,
                tables: Some(tables),
                where_clause: None,
                order_by: None,
                limit: None,
                ignore: false,
                is_multi_table: true,
                before_from: false,
                table_hints: Vec::new(),
                text: None,
            });
        }

        let name = self.parse_table_name()?;
        let as_name = self.parse_table_alias()?;
        let mut table_refs = TableRefsClause::new(Join::single(ResultSetNode::TableSource(
            Box::new(TableSource {
                source: ResultSetNode::TableName(Box::new(name)),
                as_name,
                text: Some(self.text_from(start)),
            }),
        )));
        table_refs.text = Some(self.text_from(start));
        Ok(DeleteStmt {
            table_refs,
            tables: None,
            where_clause: None,
            order_by: None,
            limit: None,
            ignore: false,
            is_multi_table: false,
            before_from: false,
            table_hints: Vec::new(),
            text: None,
        })
    }

    /// `t1[.*], t2[.*], ...`
    fn parse_delete_table_list(&mut self) -> Result<DeleteTableList> {
        let start = self.offset();
        let mut tables = Vec::new();
        loop {
            tables.push(self.parse_delete_table()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(DeleteTableList {
            tables,
            text: Some(self.text_from(start)),
        })
    }

    fn parse_delete_table(&mut self) -> Result<TableName> {
        let start = self.offset();
        let first = self.expect_ident()?;
        let mut table = TableName::new(first);
        if self.eat(TokenKind::Dot) {
            if self.eat(TokenKind::Star) {
                table.text = Some(self.text_from(start));
                return Ok(table);
            }
            let name = self.expect_ident()?;
            table.schema = Some(std::mem::replace(&mut table.name, name));
            if self.eat(TokenKind::Dot) {
                self.expect(TokenKind::Star)?;
            }
        }
        table.text = Some(self.text_from(start));
        Ok(table)
    }

    pub(super) fn parse_where(&mut self) -> Result<Option<Box<ExprNode>>> {
        if self.eat_keyword(Keyword::Where) {
            return Ok(Some(Box::new(self.parse_expr()?)));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{parse_one, parser};
    use crate::ast::StmtNode;
    use crate::restore::{restore_sql, RestoreFlags};

    fn restore(sql: &str) -> String {
        restore_sql(&parse_one(sql), RestoreFlags::DEFAULT).unwrap()
    }

    #[test]
    fn test_insert_values() {
        assert_eq!(
            restore("insert ignore t (a, b) value (1, 'x'), () on duplicate key update a = values(a)"),
            "INSERT IGNORE INTO `t` (`a`,`b`) VALUES (1,'x'),() ON DUPLICATE KEY UPDATE `a`=VALUES(`a`)"
        );
    }

    #[test]
    fn test_insert_set_and_select() {
        assert_eq!(
            restore("replace into db.t set a = 1, b := default"),
            "REPLACE INTO `db`.`t` SET `a`=1,`b`=DEFAULT"
        );
        assert_eq!(
            restore("insert into t (select * from u)"),
            "INSERT INTO `t` (SELECT * FROM `u`)"
        );
        assert_eq!(
            restore("insert into t(a) select a from u"),
            "INSERT INTO `t` (`a`) SELECT `a` FROM `u`"
        );
    }

    #[test]
    fn test_insert_requires_a_source() {
        assert!(parser().parse("insert into t", "", "").is_err());
        assert!(parser().parse("insert into t (a) set a = 1", "", "").is_err());
    }

    #[test]
    fn test_update() {
        assert_eq!(
            restore("update ignore t set a = a + 1 where b = 2 order by c limit 3"),
            "UPDATE IGNORE `t` SET `a`=`a`+1 WHERE `b`=2 ORDER BY `c` LIMIT 3"
        );
        let StmtNode::Update(update) = parse_one("update t1, t2 set t1.a = t2.a") else {
            unreachable!();
        };
        assert!(update.multiple_table);
    }

    #[test]
    fn test_delete_forms() {
        assert_eq!(
            restore("delete from t as x where a = 1 limit 1"),
            "DELETE FROM `t` AS `x` WHERE `a`=1 LIMIT 1"
        );
        assert_eq!(
            restore("delete t1, t2.* from t1 join t2 on t1.id = t2.id"),
            "DELETE `t1`, `t2` FROM `t1` JOIN `t2` ON `t1`.`id`=`t2`.`id`"
        );
        assert_eq!(
            restore("delete from t1, t2 using t1, t2 where t1.a = t2.a"),
            "DELETE FROM `t1`, `t2` USING `t1` JOIN `t2` WHERE `t1`.`a`=`t2`.`a`"
        );
        let StmtNode::Delete(delete) = parse_one("delete from t1, t2 using t1, t2") else {
            unreachable!();
        };
        assert!(delete.is_multi_table);
        assert!(!delete.before_from);
    }
}
