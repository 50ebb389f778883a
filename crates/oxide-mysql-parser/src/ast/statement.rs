//! Statement and result-set capability enums, plus the small statements.

use super::ddl::{CreateTableStmt, DropTableStmt};
use super::dml::{DeleteStmt, InsertStmt, Join, SelectStmt, TableName, TableSource, UnionStmt, UpdateStmt};
use super::expression::ExprNode;
use super::node::{impl_has_text, HasText, Node};
use super::visitor::{accept_each, Accept, Flow, Visitor};
use crate::restore::{Restore, RestoreCtx, Result};

/// A top-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum StmtNode {
    /// `SELECT`
    Select(Box<SelectStmt>),
    /// `... UNION ...`
    Union(Box<UnionStmt>),
    /// `INSERT` / `REPLACE`
    Insert(Box<InsertStmt>),
    /// `UPDATE`
    Update(Box<UpdateStmt>),
    /// `DELETE`
    Delete(Box<DeleteStmt>),
    /// `CREATE TABLE`
    CreateTable(Box<CreateTableStmt>),
    /// `DROP TABLE`
    DropTable(DropTableStmt),
    /// `EXPLAIN`
    Explain(ExplainStmt),
    /// `DO`
    Do(DoStmt),
    /// `SET`
    Set(SetStmt),
    /// `USE`
    Use(UseStmt),
    /// `BEGIN` / `START TRANSACTION`
    Begin(BeginStmt),
    /// `COMMIT`
    Commit(CommitStmt),
    /// `ROLLBACK`
    Rollback(RollbackStmt),
}

/// A node producing rows.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultSetNode {
    /// A select.
    Select(Box<SelectStmt>),
    /// A union.
    Union(Box<UnionStmt>),
    /// An aliased table, derived table or union inside a join.
    TableSource(Box<TableSource>),
    /// A table name inside a table source.
    TableName(Box<TableName>),
    /// A join.
    Join(Box<Join>),
}

/// `EXPLAIN [ANALYZE] stmt`
#[derive(Debug, Clone, PartialEq)]
pub struct ExplainStmt {
    /// Explained statement.
    pub stmt: Box<StmtNode>,
    /// `ANALYZE` runs the statement.
    pub analyze: bool,
    /// Cached source text.
    pub text: Option<String>,
}

/// `DO expr, ...`
#[derive(Debug, Clone, PartialEq)]
pub struct DoStmt {
    /// Evaluated expressions.
    pub exprs: Vec<ExprNode>,
    /// Cached source text.
    pub text: Option<String>,
}

/// One assignment of a `SET` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableAssignment {
    /// Variable name.
    pub name: String,
    /// Assigned value.
    pub value: Box<ExprNode>,
    /// Global scope.
    pub is_global: bool,
    /// System variable.
    pub is_system: bool,
    /// Cached source text.
    pub text: Option<String>,
}

/// `SET var = expr, ...`
#[derive(Debug, Clone, PartialEq)]
pub struct SetStmt {
    /// Assignments.
    pub variables: Vec<VariableAssignment>,
    /// Cached source text.
    pub text: Option<String>,
}

/// `USE db`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseStmt {
    /// Database.
    pub db_name: String,
    /// Cached source text.
    pub text: Option<String>,
}

/// `BEGIN` / `START TRANSACTION`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BeginStmt {
    /// Cached source text.
    pub text: Option<String>,
}

/// `COMMIT`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitStmt {
    /// Cached source text.
    pub text: Option<String>,
}

/// `ROLLBACK`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RollbackStmt {
    /// Cached source text.
    pub text: Option<String>,
}

impl_has_text!(
    ExplainStmt,
    DoStmt,
    VariableAssignment,
    SetStmt,
    UseStmt,
    BeginStmt,
    CommitStmt,
    RollbackStmt,
);

macro_rules! for_each_stmt {
    ($self:expr, $s:ident => $body:expr) => {
        match $self {
            StmtNode::Select($s) => $body,
            StmtNode::Union($s) => $body,
            StmtNode::Insert($s) => $body,
            StmtNode::Update($s) => $body,
            StmtNode::Delete($s) => $body,
            StmtNode::CreateTable($s) => $body,
            StmtNode::DropTable($s) => $body,
            StmtNode::Explain($s) => $body,
            StmtNode::Do($s) => $body,
            StmtNode::Set($s) => $body,
            StmtNode::Use($s) => $body,
            StmtNode::Begin($s) => $body,
            StmtNode::Commit($s) => $body,
            StmtNode::Rollback($s) => $body,
        }
    };
}

macro_rules! for_each_result_set {
    ($self:expr, $r:ident => $body:expr) => {
        match $self {
            ResultSetNode::Select($r) => $body,
            ResultSetNode::Union($r) => $body,
            ResultSetNode::TableSource($r) => $body,
            ResultSetNode::TableName($r) => $body,
            ResultSetNode::Join($r) => $body,
        }
    };
}

impl StmtNode {
    /// Returns the statement kind name.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Select(_) => "SelectStmt",
            Self::Union(_) => "UnionStmt",
            Self::Insert(_) => "InsertStmt",
            Self::Update(_) => "UpdateStmt",
            Self::Delete(_) => "DeleteStmt",
            Self::CreateTable(_) => "CreateTableStmt",
            Self::DropTable(_) => "DropTableStmt",
            Self::Explain(_) => "ExplainStmt",
            Self::Do(_) => "DoStmt",
            Self::Set(_) => "SetStmt",
            Self::Use(_) => "UseStmt",
            Self::Begin(_) => "BeginStmt",
            Self::Commit(_) => "CommitStmt",
            Self::Rollback(_) => "RollbackStmt",
        }
    }
}

impl ResultSetNode {
    /// Returns the result-set kind name.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Select(_) => "SelectStmt",
            Self::Union(_) => "UnionStmt",
            Self::TableSource(_) => "TableSource",
            Self::TableName(_) => "TableName",
            Self::Join(_) => "Join",
        }
    }
}

impl HasText for StmtNode {
    fn text(&self) -> Option<&str> {
        for_each_stmt!(self, s => s.text())
    }

    fn set_text(&mut self, text: Option<String>) {
        for_each_stmt!(self, s => s.set_text(text));
    }
}

impl HasText for ResultSetNode {
    fn text(&self) -> Option<&str> {
        for_each_result_set!(self, r => r.text())
    }

    fn set_text(&mut self, text: Option<String>) {
        for_each_result_set!(self, r => r.set_text(text));
    }
}

impl Restore for StmtNode {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        for_each_stmt!(self, s => s.restore(ctx))
    }
}

impl Restore for ResultSetNode {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        for_each_result_set!(self, r => r.restore(ctx))
    }
}

impl Accept for StmtNode {
    fn as_node(&mut self) -> Node<'_> {
        Node::Stmt(self)
    }

    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow {
        match self {
            Self::Select(s) => s.accept_fields(v),
            Self::Union(s) => s.accept_fields(v),
            Self::Insert(s) => s.accept_fields(v),
            Self::Update(s) => s.accept_fields(v),
            Self::Delete(s) => s.accept_fields(v),
            Self::CreateTable(s) => s.accept_fields(v),
            Self::DropTable(s) => s.accept_fields(v),
            Self::Explain(s) => s.stmt.accept(v),
            Self::Do(s) => accept_each(&mut s.exprs, v),
            Self::Set(s) => accept_each(&mut s.variables, v),
            Self::Use(_) | Self::Begin(_) | Self::Commit(_) | Self::Rollback(_) => {
                Flow::Continue(())
            }
        }
    }
}

impl Accept for ResultSetNode {
    fn as_node(&mut self) -> Node<'_> {
        Node::ResultSet(self)
    }

    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow {
        match self {
            Self::Select(s) => s.accept_fields(v),
            Self::Union(u) => u.accept_fields(v),
            Self::TableSource(t) => t.source.accept(v),
            Self::TableName(_) => Flow::Continue(()),
            Self::Join(j) => j.accept_fields(v),
        }
    }
}

impl Accept for VariableAssignment {
    fn as_node(&mut self) -> Node<'_> {
        Node::VariableAssignment(self)
    }

    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow {
        self.value.accept(v)
    }
}

impl Restore for ExplainStmt {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword("EXPLAIN ")?;
        if self.analyze {
            ctx.write_keyword("ANALYZE ")?;
        }
        self.stmt.restore(ctx)
    }
}

impl Restore for DoStmt {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword("DO ")?;
        ctx.write_list(&self.exprs, ", ")
    }
}

impl Restore for VariableAssignment {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        if self.is_system {
            ctx.write_plain("@@")?;
            ctx.write_keyword(if self.is_global { "GLOBAL" } else { "SESSION" })?;
            ctx.write_plain(".")?;
        } else {
            ctx.write_plain("@")?;
        }
        ctx.write_name(&self.name)?;
        ctx.write_plain("=")?;
        self.value.restore(ctx)
    }
}

impl Restore for SetStmt {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword("SET ")?;
        ctx.write_list(&self.variables, ", ")
    }
}

impl Restore for UseStmt {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword("USE ")?;
        ctx.write_name(&self.db_name)
    }
}

impl Restore for BeginStmt {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword("START TRANSACTION")
    }
}

impl Restore for CommitStmt {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword("COMMIT")
    }
}

impl Restore for RollbackStmt {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword("ROLLBACK")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expression::ColumnName;
    use crate::restore::{restore_sql, RestoreFlags};

    #[test]
    fn test_restore_transaction_statements() {
        let cases = [
            (StmtNode::Begin(BeginStmt::default()), "START TRANSACTION"),
            (StmtNode::Commit(CommitStmt::default()), "COMMIT"),
            (StmtNode::Rollback(RollbackStmt::default()), "ROLLBACK"),
        ];
        for (stmt, expected) in cases {
            assert_eq!(restore_sql(&stmt, RestoreFlags::DEFAULT).unwrap(), expected);
        }
    }

    #[test]
    fn test_restore_set_assignments() {
        let stmt = StmtNode::Set(SetStmt {
            variables: vec![
                VariableAssignment {
                    name: "autocommit".to_owned(),
                    value: Box::new(ExprNode::column(ColumnName::new("on"))),
                    is_global: true,
                    is_system: true,
                    text: None,
                },
                VariableAssignment {
                    name: "u".to_owned(),
                    value: Box::new(ExprNode::column(ColumnName::new("b"))),
                    is_global: false,
                    is_system: false,
                    text: None,
                },
            ],
            text: None,
        });
        assert_eq!(
            restore_sql(&stmt, RestoreFlags::DEFAULT).unwrap(),
            "SET @@GLOBAL.`autocommit`=`on`, @`u`=`b`"
        );
    }

    #[test]
    fn test_statement_text() {
        let mut stmt = StmtNode::Use(UseStmt {
            db_name: "test".to_owned(),
            text: None,
        });
        stmt.set_text(Some("use test".to_owned()));
        assert_eq!(stmt.text(), Some("use test"));
        assert_eq!(stmt.kind_name(), "UseStmt");
        assert_eq!(
            restore_sql(&stmt, RestoreFlags::DEFAULT).unwrap(),
            "USE `test`"
        );
    }
}
