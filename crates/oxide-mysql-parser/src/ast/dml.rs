//! Data manipulation statements and their clauses.

use super::expression::{ColumnName, ExprNode};
use super::functions::WindowSpec;
use super::hint::{restore_hints, TableOptimizerHint};
use super::node::{impl_has_text, Node};
use super::statement::ResultSetNode;
use super::visitor::{accept_each, accept_opt, Accept, Flow, Visitor};
use crate::restore::{Restore, RestoreCtx, Result};

/// Kind of join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinType {
    /// `JOIN`, `INNER JOIN`, `CROSS JOIN`, comma.
    #[default]
    Cross,
    /// `LEFT [OUTER] JOIN`
    Left,
    /// `RIGHT [OUTER] JOIN`
    Right,
}

/// A join of two result sets, or a single one when `right` is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// Left side.
    pub left: Box<ResultSetNode>,
    /// Right side.
    pub right: Option<Box<ResultSetNode>>,
    /// Join kind.
    pub tp: JoinType,
    /// `ON` condition.
    pub on: Option<OnCondition>,
    /// `USING` columns.
    pub using: Vec<ColumnName>,
    /// `NATURAL`
    pub natural: bool,
    /// `STRAIGHT_JOIN`
    pub straight: bool,
    /// Cached source text.
    pub text: Option<String>,
}

impl Join {
    /// A join holding a single result set.
    #[must_use]
    pub fn single(left: ResultSetNode) -> Self {
        Self {
            left: Box::new(left),
            right: None,
            tp: JoinType::Cross,
            on: None,
            using: Vec::new(),
            natural: false,
            straight: false,
            text: None,
        }
    }

    /// A cross join of two result sets.
    #[must_use]
    pub fn cross(left: ResultSetNode, right: ResultSetNode) -> Self {
        Self {
            right: Some(Box::new(right)),
            ..Self::single(left)
        }
    }

    pub(crate) fn accept_fields(&mut self, v: &mut dyn Visitor) -> Flow {
        self.left.accept(v)?;
        accept_opt(&mut self.right, v)?;
        accept_opt(&mut self.on, v)?;
        accept_each(&mut self.using, v)
    }
}

impl Restore for Join {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        let nested = ctx.join_level != 0;
        if nested {
            ctx.write_plain("(")?;
        }
        ctx.join_level += 1;
        self.left.restore(ctx)?;
        ctx.join_level -= 1;
        if let Some(right) = &self.right {
            if self.natural {
                ctx.write_keyword(" NATURAL")?;
            }
            match self.tp {
                JoinType::Left => ctx.write_keyword(" LEFT")?,
                JoinType::Right => ctx.write_keyword(" RIGHT")?,
                JoinType::Cross => {}
            }
            if self.straight {
                ctx.write_keyword(" STRAIGHT_JOIN ")?;
            } else {
                ctx.write_keyword(" JOIN ")?;
            }
            ctx.join_level += 1;
            right.restore(ctx)?;
            ctx.join_level -= 1;
            if let Some(on) = &self.on {
                ctx.write_keyword(" ON ")?;
                on.restore(ctx)?;
            }
            if !self.using.is_empty() {
                ctx.write_keyword(" USING ")?;
                ctx.write_plain("(")?;
                ctx.write_list(&self.using, ",")?;
                ctx.write_plain(")")?;
            }
        }
        if nested {
            ctx.write_plain(")")?;
        }
        Ok(())
    }
}

/// `USE`, `IGNORE` or `FORCE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexHintType {
    /// `USE INDEX`
    Use,
    /// `IGNORE INDEX`
    Ignore,
    /// `FORCE INDEX`
    Force,
}

/// What an index hint applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexHintScope {
    /// No `FOR` clause.
    All,
    /// `FOR JOIN`
    Join,
    /// `FOR ORDER BY`
    OrderBy,
    /// `FOR GROUP BY`
    GroupBy,
}

/// `USE INDEX (a, b)` and friends after a table name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHint {
    /// Hint kind.
    pub hint_type: IndexHintType,
    /// Scope.
    pub scope: IndexHintScope,
    /// Index names. `PRIMARY` is kept as written.
    pub index_names: Vec<String>,
}

impl Restore for IndexHint {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword(match self.hint_type {
            IndexHintType::Use => "USE INDEX ",
            IndexHintType::Ignore => "IGNORE INDEX ",
            IndexHintType::Force => "FORCE INDEX ",
        })?;
        match self.scope {
            IndexHintScope::All => {}
            IndexHintScope::Join => ctx.write_keyword("FOR JOIN ")?,
            IndexHintScope::OrderBy => ctx.write_keyword("FOR ORDER BY ")?,
            IndexHintScope::GroupBy => ctx.write_keyword("FOR GROUP BY ")?,
        }
        ctx.write_plain("(")?;
        ctx.write_names(&self.index_names, ", ")?;
        ctx.write_plain(")")
    }
}

/// A possibly qualified table name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableName {
    /// Schema.
    pub schema: Option<String>,
    /// Table.
    pub name: String,
    /// Index hints, in declaration order.
    pub index_hints: Vec<IndexHint>,
    /// Cached source text.
    pub text: Option<String>,
}

impl TableName {
    /// Creates an unqualified table name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    fn restore_name(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        if let Some(schema) = &self.schema {
            ctx.write_name(schema)?;
            ctx.write_plain(".")?;
        }
        ctx.write_name(&self.name)
    }

    fn restore_index_hints(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        for hint in &self.index_hints {
            ctx.write_plain(" ")?;
            hint.restore(ctx)?;
        }
        Ok(())
    }
}

impl Restore for TableName {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        self.restore_name(ctx)?;
        self.restore_index_hints(ctx)
    }
}

impl Accept for TableName {
    fn as_node(&mut self) -> Node<'_> {
        Node::TableName(self)
    }

    fn accept_children(&mut self, _: &mut dyn Visitor) -> Flow {
        Flow::Continue(())
    }
}

/// A table, derived table or union in a `FROM` clause, with its alias.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSource {
    /// The source.
    pub source: ResultSetNode,
    /// Alias.
    pub as_name: Option<String>,
    /// Cached source text.
    pub text: Option<String>,
}

impl Restore for TableSource {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        let write_alias = |ctx: &mut RestoreCtx<'_>| match &self.as_name {
            Some(name) => {
                ctx.write_keyword(" AS ")?;
                ctx.write_name(name)
            }
            None => Ok(()),
        };
        match &self.source {
            ResultSetNode::TableName(table) => {
                table.restore_name(ctx)?;
                write_alias(ctx)?;
                table.restore_index_hints(ctx)
            }
            ResultSetNode::Select(_) | ResultSetNode::Union(_) => {
                ctx.write_plain("(")?;
                self.source.restore(ctx)?;
                ctx.write_plain(")")?;
                write_alias(ctx)
            }
            _ => {
                self.source.restore(ctx)?;
                write_alias(ctx)
            }
        }
    }
}

/// `ON expr` of a join.
#[derive(Debug, Clone, PartialEq)]
pub struct OnCondition {
    /// Condition.
    pub expr: Box<ExprNode>,
    /// Cached source text.
    pub text: Option<String>,
}

impl Restore for OnCondition {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        self.expr.restore(ctx)
    }
}

impl Accept for OnCondition {
    fn as_node(&mut self) -> Node<'_> {
        Node::OnCondition(self)
    }

    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow {
        self.expr.accept(v)
    }
}

/// The table references of `FROM`, `UPDATE` and `DELETE`. The parser
/// always stores a [`ResultSetNode::Join`].
#[derive(Debug, Clone, PartialEq)]
pub struct TableRefsClause {
    /// Root of the join tree.
    pub table_refs: ResultSetNode,
    /// Cached source text.
    pub text: Option<String>,
}

impl TableRefsClause {
    /// Wraps a join tree.
    #[must_use]
    pub fn new(join: Join) -> Self {
        Self {
            table_refs: ResultSetNode::Join(Box::new(join)),
            text: None,
        }
    }
}

impl Restore for TableRefsClause {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        self.table_refs.restore(ctx)
    }
}

impl Accept for TableRefsClause {
    fn as_node(&mut self) -> Node<'_> {
        Node::TableRefsClause(self)
    }

    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow {
        self.table_refs.accept(v)
    }
}

/// `*`, `t.*` or `db.t.*`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WildCardField {
    /// Schema qualifier.
    pub schema: Option<String>,
    /// Table qualifier.
    pub table: Option<String>,
}

impl Restore for WildCardField {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        if let Some(schema) = &self.schema {
            ctx.write_name(schema)?;
            ctx.write_plain(".")?;
        }
        if let Some(table) = &self.table {
            ctx.write_name(table)?;
            ctx.write_plain(".")?;
        }
        ctx.write_plain("*")
    }
}

/// One entry of a select list.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectField {
    /// Set for wildcard entries.
    pub wild_card: Option<WildCardField>,
    /// Set for expression entries.
    pub expr: Option<Box<ExprNode>>,
    /// Alias.
    pub as_name: Option<String>,
    /// Cached source text.
    pub text: Option<String>,
}

impl SelectField {
    /// An expression entry without alias.
    #[must_use]
    pub fn expr(expr: ExprNode) -> Self {
        Self {
            wild_card: None,
            expr: Some(Box::new(expr)),
            as_name: None,
            text: None,
        }
    }
}

impl Restore for SelectField {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        if let Some(wild_card) = &self.wild_card {
            wild_card.restore(ctx)?;
        }
        if let Some(expr) = &self.expr {
            expr.restore(ctx)?;
        }
        if let Some(name) = &self.as_name {
            ctx.write_keyword(" AS ")?;
            ctx.write_name(name)?;
        }
        Ok(())
    }
}

impl Accept for SelectField {
    fn as_node(&mut self) -> Node<'_> {
        Node::SelectField(self)
    }

    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow {
        accept_opt(&mut self.expr, v)
    }
}

/// A select list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldList {
    /// Entries.
    pub fields: Vec<SelectField>,
    /// Cached source text.
    pub text: Option<String>,
}

impl Restore for FieldList {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_list(&self.fields, ", ")
    }
}

impl Accept for FieldList {
    fn as_node(&mut self) -> Node<'_> {
        Node::FieldList(self)
    }

    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow {
        accept_each(&mut self.fields, v)
    }
}

/// An `ORDER BY`, `GROUP BY` or `PARTITION BY` item.
#[derive(Debug, Clone, PartialEq)]
pub struct ByItem {
    /// Expression or select-list position.
    pub expr: Box<ExprNode>,
    /// `DESC`
    pub desc: bool,
    /// Cached source text.
    pub text: Option<String>,
}

impl Restore for ByItem {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        self.expr.restore(ctx)?;
        if self.desc {
            ctx.write_keyword(" DESC")?;
        }
        Ok(())
    }
}

impl Accept for ByItem {
    fn as_node(&mut self) -> Node<'_> {
        Node::ByItem(self)
    }

    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow {
        self.expr.accept(v)
    }
}

/// `GROUP BY`
#[derive(Debug, Clone, PartialEq)]
pub struct GroupByClause {
    /// Items.
    pub items: Vec<ByItem>,
    /// Cached source text.
    pub text: Option<String>,
}

impl Restore for GroupByClause {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword("GROUP BY ")?;
        ctx.write_list(&self.items, ",")
    }
}

impl Accept for GroupByClause {
    fn as_node(&mut self) -> Node<'_> {
        Node::GroupByClause(self)
    }

    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow {
        accept_each(&mut self.items, v)
    }
}

/// `HAVING`
#[derive(Debug, Clone, PartialEq)]
pub struct HavingClause {
    /// Condition.
    pub expr: Box<ExprNode>,
    /// Cached source text.
    pub text: Option<String>,
}

impl Restore for HavingClause {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword("HAVING ")?;
        self.expr.restore(ctx)
    }
}

impl Accept for HavingClause {
    fn as_node(&mut self) -> Node<'_> {
        Node::HavingClause(self)
    }

    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow {
        self.expr.accept(v)
    }
}

/// `ORDER BY`
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByClause {
    /// Items.
    pub items: Vec<ByItem>,
    /// Belongs to a union rather than one of its selects.
    pub for_union: bool,
    /// Cached source text.
    pub text: Option<String>,
}

impl Restore for OrderByClause {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword("ORDER BY ")?;
        ctx.write_list(&self.items, ",")
    }
}

impl Accept for OrderByClause {
    fn as_node(&mut self) -> Node<'_> {
        Node::OrderByClause(self)
    }

    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow {
        accept_each(&mut self.items, v)
    }
}

/// `LIMIT [offset,] count`
#[derive(Debug, Clone, PartialEq)]
pub struct Limit {
    /// Row count.
    pub count: Box<ExprNode>,
    /// Rows skipped.
    pub offset: Option<Box<ExprNode>>,
    /// Cached source text.
    pub text: Option<String>,
}

impl Restore for Limit {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword("LIMIT ")?;
        if let Some(offset) = &self.offset {
            offset.restore(ctx)?;
            ctx.write_plain(",")?;
        }
        self.count.restore(ctx)
    }
}

impl Accept for Limit {
    fn as_node(&mut self) -> Node<'_> {
        Node::Limit(self)
    }

    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow {
        self.count.accept(v)?;
        accept_opt(&mut self.offset, v)
    }
}

/// `col = expr`
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Target column.
    pub column: ColumnName,
    /// Value.
    pub expr: Box<ExprNode>,
    /// Cached source text.
    pub text: Option<String>,
}

impl Restore for Assignment {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        self.column.restore(ctx)?;
        ctx.write_plain("=")?;
        self.expr.restore(ctx)
    }
}

impl Accept for Assignment {
    fn as_node(&mut self) -> Node<'_> {
        Node::Assignment(self)
    }

    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow {
        self.column.accept(v)?;
        self.expr.accept(v)
    }
}

/// Row locking of a select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectLockType {
    /// No locking clause.
    #[default]
    None,
    /// `FOR UPDATE`
    ForUpdate,
    /// `LOCK IN SHARE MODE`
    InShareMode,
}

/// A `SELECT`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectStmt {
    /// Optimizer hints.
    pub table_hints: Vec<TableOptimizerHint>,
    /// `DISTINCT` / `DISTINCTROW`
    pub distinct: bool,
    /// Select list.
    pub fields: FieldList,
    /// `FROM`; `None` also for `FROM DUAL`.
    pub from: Option<TableRefsClause>,
    /// `WHERE`
    pub where_clause: Option<Box<ExprNode>>,
    /// `GROUP BY`
    pub group_by: Option<GroupByClause>,
    /// `HAVING`
    pub having: Option<HavingClause>,
    /// Named windows of the `WINDOW` clause.
    pub window_specs: Vec<WindowSpec>,
    /// `ORDER BY`
    pub order_by: Option<OrderByClause>,
    /// `LIMIT`
    pub limit: Option<Limit>,
    /// Locking clause.
    pub lock_tp: SelectLockType,
    /// Preceded by `UNION` or `UNION DISTINCT` inside a union.
    pub is_after_union_distinct: bool,
    /// Written in parentheses.
    pub is_in_braces: bool,
    /// Cached source text.
    pub text: Option<String>,
}

impl SelectStmt {
    pub(crate) fn accept_fields(&mut self, v: &mut dyn Visitor) -> Flow {
        accept_each(&mut self.table_hints, v)?;
        self.fields.accept(v)?;
        accept_opt(&mut self.from, v)?;
        accept_opt(&mut self.where_clause, v)?;
        accept_opt(&mut self.group_by, v)?;
        accept_opt(&mut self.having, v)?;
        accept_each(&mut self.window_specs, v)?;
        accept_opt(&mut self.order_by, v)?;
        accept_opt(&mut self.limit, v)
    }
}

impl Restore for SelectStmt {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        if self.is_in_braces {
            ctx.write_plain("(")?;
        }
        ctx.write_keyword("SELECT ")?;
        restore_hints(&self.table_hints, ctx)?;
        if self.distinct {
            ctx.write_keyword("DISTINCT ")?;
        }
        self.fields.restore(ctx)?;
        if let Some(from) = &self.from {
            ctx.write_keyword(" FROM ")?;
            from.restore(ctx)?;
        } else if self.where_clause.is_some() {
            ctx.write_keyword(" FROM DUAL")?;
        }
        if let Some(where_clause) = &self.where_clause {
            ctx.write_keyword(" WHERE ")?;
            where_clause.restore(ctx)?;
        }
        if let Some(group_by) = &self.group_by {
            ctx.write_plain(" ")?;
            group_by.restore(ctx)?;
        }
        if let Some(having) = &self.having {
            ctx.write_plain(" ")?;
            having.restore(ctx)?;
        }
        if !self.window_specs.is_empty() {
            ctx.write_keyword(" WINDOW ")?;
            ctx.write_list(&self.window_specs, ",")?;
        }
        if let Some(order_by) = &self.order_by {
            ctx.write_plain(" ")?;
            order_by.restore(ctx)?;
        }
        if let Some(limit) = &self.limit {
            ctx.write_plain(" ")?;
            limit.restore(ctx)?;
        }
        match self.lock_tp {
            SelectLockType::None => {}
            SelectLockType::ForUpdate => ctx.write_keyword(" FOR UPDATE")?,
            SelectLockType::InShareMode => ctx.write_keyword(" LOCK IN SHARE MODE")?,
        }
        if self.is_in_braces {
            ctx.write_plain(")")?;
        }
        Ok(())
    }
}

/// The selects of a union. Every entry is a [`ResultSetNode::Select`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnionSelectList {
    /// Member selects.
    pub selects: Vec<ResultSetNode>,
    /// Cached source text.
    pub text: Option<String>,
}

impl Restore for UnionSelectList {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        for (i, select) in self.selects.iter().enumerate() {
            if i > 0 {
                let distinct = matches!(select, ResultSetNode::Select(s) if s.is_after_union_distinct);
                if distinct {
                    ctx.write_keyword(" UNION ")?;
                } else {
                    ctx.write_keyword(" UNION ALL ")?;
                }
            }
            select.restore(ctx)?;
        }
        Ok(())
    }
}

impl Accept for UnionSelectList {
    fn as_node(&mut self) -> Node<'_> {
        Node::UnionSelectList(self)
    }

    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow {
        accept_each(&mut self.selects, v)
    }
}

/// `select UNION [ALL] select ...`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnionStmt {
    /// Member selects.
    pub select_list: UnionSelectList,
    /// Trailing `ORDER BY`.
    pub order_by: Option<OrderByClause>,
    /// Trailing `LIMIT`.
    pub limit: Option<Limit>,
    /// Cached source text.
    pub text: Option<String>,
}

impl UnionStmt {
    pub(crate) fn accept_fields(&mut self, v: &mut dyn Visitor) -> Flow {
        self.select_list.accept(v)?;
        accept_opt(&mut self.order_by, v)?;
        accept_opt(&mut self.limit, v)
    }
}

impl Restore for UnionStmt {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        self.select_list.restore(ctx)?;
        if let Some(order_by) = &self.order_by {
            ctx.write_plain(" ")?;
            order_by.restore(ctx)?;
        }
        if let Some(limit) = &self.limit {
            ctx.write_plain(" ")?;
            limit.restore(ctx)?;
        }
        Ok(())
    }
}

/// `INSERT` or `REPLACE`.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStmt {
    /// `REPLACE` rather than `INSERT`.
    pub is_replace: bool,
    /// `IGNORE`
    pub ignore: bool,
    /// Target table.
    pub table: TableRefsClause,
    /// Column list.
    pub columns: Vec<ColumnName>,
    /// `VALUES` rows.
    pub lists: Vec<Vec<ExprNode>>,
    /// `SET col = expr, ...`
    pub setlist: Vec<Assignment>,
    /// `INSERT ... SELECT` source.
    pub select: Option<Box<ResultSetNode>>,
    /// `ON DUPLICATE KEY UPDATE`
    pub on_duplicate: Vec<Assignment>,
    /// Optimizer hints.
    pub table_hints: Vec<TableOptimizerHint>,
    /// Cached source text.
    pub text: Option<String>,
}

impl InsertStmt {
    pub(crate) fn accept_fields(&mut self, v: &mut dyn Visitor) -> Flow {
        accept_each(&mut self.table_hints, v)?;
        self.table.accept(v)?;
        accept_each(&mut self.columns, v)?;
        for row in &mut self.lists {
            accept_each(row, v)?;
        }
        accept_each(&mut self.setlist, v)?;
        accept_opt(&mut self.select, v)?;
        accept_each(&mut self.on_duplicate, v)
    }
}

impl Restore for InsertStmt {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword(if self.is_replace { "REPLACE " } else { "INSERT " })?;
        restore_hints(&self.table_hints, ctx)?;
        if self.ignore {
            ctx.write_keyword("IGNORE ")?;
        }
        ctx.write_keyword("INTO ")?;
        self.table.restore(ctx)?;
        if !self.columns.is_empty() {
            ctx.write_plain(" (")?;
            ctx.write_list(&self.columns, ",")?;
            ctx.write_plain(")")?;
        }
        if !self.lists.is_empty() {
            ctx.write_keyword(" VALUES ")?;
            for (i, row) in self.lists.iter().enumerate() {
                if i > 0 {
                    ctx.write_plain(",")?;
                }
                ctx.write_plain("(")?;
                ctx.write_list(row, ",")?;
                ctx.write_plain(")")?;
            }
        }
        if let Some(select) = &self.select {
            ctx.write_plain(" ")?;
            select.restore(ctx)?;
        }
        if !self.setlist.is_empty() {
            ctx.write_keyword(" SET ")?;
            ctx.write_list(&self.setlist, ",")?;
        }
        if !self.on_duplicate.is_empty() {
            ctx.write_keyword(" ON DUPLICATE KEY UPDATE ")?;
            ctx.write_list(&self.on_duplicate, ",")?;
        }
        Ok(())
    }
}

/// Target tables of a multi-table `DELETE`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeleteTableList {
    /// Tables rows are deleted from.
    pub tables: Vec<TableName>,
    /// Cached source text.
    pub text: Option<String>,
}

impl Restore for DeleteTableList {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_list(&self.tables, ", ")
    }
}

impl Accept for DeleteTableList {
    fn as_node(&mut self) -> Node<'_> {
        Node::DeleteTableList(self)
    }

    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow {
        accept_each(&mut self.tables, v)
    }
}

/// `DELETE`
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStmt {
    /// Tables read.
    pub table_refs: TableRefsClause,
    /// Tables deleted from, for multi-table deletes.
    pub tables: Option<DeleteTableList>,
    /// `WHERE`
    pub where_clause: Option<Box<ExprNode>>,
    /// `ORDER BY`
    pub order_by: Option<OrderByClause>,
    /// `LIMIT`
    pub limit: Option<Limit>,
    /// `IGNORE`
    pub ignore: bool,
    /// Multi-table form.
    pub is_multi_table: bool,
    /// `DELETE t1 FROM ...` rather than `DELETE FROM t1 USING ...`.
    pub before_from: bool,
    /// Optimizer hints.
    pub table_hints: Vec<TableOptimizerHint>,
    /// Cached source text.
    pub text: Option<String>,
}

impl DeleteStmt {
    pub(crate) fn accept_fields(&mut self, v: &mut dyn Visitor) -> Flow {
        accept_each(&mut self.table_hints, v)?;
        self.table_refs.accept(v)?;
        accept_opt(&mut self.tables, v)?;
        accept_opt(&mut self.where_clause, v)?;
        accept_opt(&mut self.order_by, v)?;
        accept_opt(&mut self.limit, v)
    }
}

impl Restore for DeleteStmt {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword("DELETE ")?;
        restore_hints(&self.table_hints, ctx)?;
        if self.ignore {
            ctx.write_keyword("IGNORE ")?;
        }
        match (&self.tables, self.is_multi_table) {
            (Some(tables), true) if self.before_from => {
                tables.restore(ctx)?;
                ctx.write_keyword(" FROM ")?;
                self.table_refs.restore(ctx)?;
            }
            (Some(tables), true) => {
                ctx.write_keyword("FROM ")?;
                tables.restore(ctx)?;
                ctx.write_keyword(" USING ")?;
                self.table_refs.restore(ctx)?;
            }
            _ => {
                ctx.write_keyword("FROM ")?;
                self.table_refs.restore(ctx)?;
            }
        }
        if let Some(where_clause) = &self.where_clause {
            ctx.write_keyword(" WHERE ")?;
            where_clause.restore(ctx)?;
        }
        if let Some(order_by) = &self.order_by {
            ctx.write_plain(" ")?;
            order_by.restore(ctx)?;
        }
        if let Some(limit) = &self.limit {
            ctx.write_plain(" ")?;
            limit.restore(ctx)?;
        }
        Ok(())
    }
}

/// `UPDATE`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStmt {
    /// Updated tables.
    pub table_refs: TableRefsClause,
    /// `SET` assignments.
    pub list: Vec<Assignment>,
    /// `WHERE`
    pub where_clause: Option<Box<ExprNode>>,
    /// `ORDER BY`
    pub order_by: Option<OrderByClause>,
    /// `LIMIT`
    pub limit: Option<Limit>,
    /// `IGNORE`
    pub ignore: bool,
    /// More than one table is referenced.
    pub multiple_table: bool,
    /// Optimizer hints.
    pub table_hints: Vec<TableOptimizerHint>,
    /// Cached source text.
    pub text: Option<String>,
}

impl UpdateStmt {
    pub(crate) fn accept_fields(&mut self, v: &mut dyn Visitor) -> Flow {
        accept_each(&mut self.table_hints, v)?;
        self.table_refs.accept(v)?;
        accept_each(&mut self.list, v)?;
        accept_opt(&mut self.where_clause, v)?;
        accept_opt(&mut self.order_by, v)?;
        accept_opt(&mut self.limit, v)
    }
}

impl Restore for UpdateStmt {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword("UPDATE ")?;
        restore_hints(&self.table_hints, ctx)?;
        if self.ignore {
            ctx.write_keyword("IGNORE ")?;
        }
        self.table_refs.restore(ctx)?;
        ctx.write_keyword(" SET ")?;
        ctx.write_list(&self.list, ",")?;
        if let Some(where_clause) = &self.where_clause {
            ctx.write_keyword(" WHERE ")?;
            where_clause.restore(ctx)?;
        }
        if let Some(order_by) = &self.order_by {
            ctx.write_plain(" ")?;
            order_by.restore(ctx)?;
        }
        if let Some(limit) = &self.limit {
            ctx.write_plain(" ")?;
            limit.restore(ctx)?;
        }
        Ok(())
    }
}

impl_has_text!(
    Join,
    TableName,
    TableSource,
    OnCondition,
    TableRefsClause,
    SelectField,
    FieldList,
    ByItem,
    GroupByClause,
    HavingClause,
    OrderByClause,
    Limit,
    Assignment,
    SelectStmt,
    UnionSelectList,
    UnionStmt,
    InsertStmt,
    DeleteTableList,
    DeleteStmt,
    UpdateStmt,
);
