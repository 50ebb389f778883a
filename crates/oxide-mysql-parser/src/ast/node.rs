//! Node capabilities shared by every tree element.

use super::ddl::{ColumnDef, ColumnOption, Constraint, IndexColName, ReferenceDef};
use super::dml::{
    Assignment, ByItem, DeleteTableList, FieldList, GroupByClause, HavingClause, Limit,
    OnCondition, OrderByClause, SelectField, TableName, TableRefsClause, UnionSelectList,
};
use super::expression::{ColumnName, ExprNode, WhenClause};
use super::functions::{FrameClause, PartitionByClause, WindowSpec};
use super::hint::TableOptimizerHint;
use super::statement::{ResultSetNode, StmtNode, VariableAssignment};

/// Access to the source text a node was parsed from.
///
/// The parser sets the text of every statement to its slice of the input.
/// Restored or hand-built trees carry no text.
pub trait HasText {
    /// Returns the cached source text.
    fn text(&self) -> Option<&str>;

    /// Replaces the cached source text.
    fn set_text(&mut self, text: Option<String>);
}

macro_rules! impl_has_text {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::ast::HasText for $ty {
                fn text(&self) -> Option<&str> {
                    self.text.as_deref()
                }

                fn set_text(&mut self, text: Option<String>) {
                    self.text = text;
                }
            }
        )+
    };
}

pub(crate) use impl_has_text;

/// A mutable view of one node, handed to [`Visitor`](super::Visitor)
/// callbacks.
///
/// Statements, expressions and result sets arrive as their capability
/// enums, so a visitor may replace them in place. Clause nodes arrive as
/// their concrete types.
#[derive(Debug)]
pub enum Node<'a> {
    /// A statement.
    Stmt(&'a mut StmtNode),
    /// An expression.
    Expr(&'a mut ExprNode),
    /// A result set source.
    ResultSet(&'a mut ResultSetNode),
    /// Select list.
    FieldList(&'a mut FieldList),
    /// Select list entry.
    SelectField(&'a mut SelectField),
    /// `FROM` clause.
    TableRefsClause(&'a mut TableRefsClause),
    /// A table name outside a join, as in `DROP TABLE`.
    TableName(&'a mut TableName),
    /// `ON` condition.
    OnCondition(&'a mut OnCondition),
    /// `GROUP BY`
    GroupByClause(&'a mut GroupByClause),
    /// `HAVING`
    HavingClause(&'a mut HavingClause),
    /// `ORDER BY`
    OrderByClause(&'a mut OrderByClause),
    /// `ORDER BY` / `GROUP BY` / `PARTITION BY` item.
    ByItem(&'a mut ByItem),
    /// `LIMIT`
    Limit(&'a mut Limit),
    /// `col = expr` in `UPDATE` or `INSERT ... SET`.
    Assignment(&'a mut Assignment),
    /// A column name outside an expression.
    ColumnName(&'a mut ColumnName),
    /// `WHEN ... THEN ...`
    WhenClause(&'a mut WhenClause),
    /// Window specification.
    WindowSpec(&'a mut WindowSpec),
    /// `PARTITION BY` of a window.
    PartitionByClause(&'a mut PartitionByClause),
    /// Window frame.
    FrameClause(&'a mut FrameClause),
    /// Optimizer hint.
    TableOptimizerHint(&'a mut TableOptimizerHint),
    /// Target tables of a multi-table `DELETE`.
    DeleteTableList(&'a mut DeleteTableList),
    /// Selects joined by `UNION`.
    UnionSelectList(&'a mut UnionSelectList),
    /// Column definition.
    ColumnDef(&'a mut ColumnDef),
    /// Column option.
    ColumnOption(&'a mut ColumnOption),
    /// Table constraint.
    Constraint(&'a mut Constraint),
    /// Indexed column.
    IndexColName(&'a mut IndexColName),
    /// Foreign key reference.
    ReferenceDef(&'a mut ReferenceDef),
    /// `SET` assignment.
    VariableAssignment(&'a mut VariableAssignment),
}

macro_rules! dispatch {
    ($node:expr, $n:ident => $body:expr) => {
        match $node {
            Node::Stmt($n) => $body,
            Node::Expr($n) => $body,
            Node::ResultSet($n) => $body,
            Node::FieldList($n) => $body,
            Node::SelectField($n) => $body,
            Node::TableRefsClause($n) => $body,
            Node::TableName($n) => $body,
            Node::OnCondition($n) => $body,
            Node::GroupByClause($n) => $body,
            Node::HavingClause($n) => $body,
            Node::OrderByClause($n) => $body,
            Node::ByItem($n) => $body,
            Node::Limit($n) => $body,
            Node::Assignment($n) => $body,
            Node::ColumnName($n) => $body,
            Node::WhenClause($n) => $body,
            Node::WindowSpec($n) => $body,
            Node::PartitionByClause($n) => $body,
            Node::FrameClause($n) => $body,
            Node::TableOptimizerHint($n) => $body,
            Node::DeleteTableList($n) => $body,
            Node::UnionSelectList($n) => $body,
            Node::ColumnDef($n) => $body,
            Node::ColumnOption($n) => $body,
            Node::Constraint($n) => $body,
            Node::IndexColName($n) => $body,
            Node::ReferenceDef($n) => $body,
            Node::VariableAssignment($n) => $body,
        }
    };
}

impl Node<'_> {
    /// Returns the node's cached source text.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        dispatch!(self, n => n.text())
    }

    /// Replaces the node's cached source text.
    pub fn set_text(&mut self, text: Option<String>) {
        dispatch!(self, n => n.set_text(text));
    }

    /// Returns the name of the node kind, down to the concrete type.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Stmt(s) => s.kind_name(),
            Self::Expr(e) => e.kind_name(),
            Self::ResultSet(r) => r.kind_name(),
            Self::FieldList(_) => "FieldList",
            Self::SelectField(_) => "SelectField",
            Self::TableRefsClause(_) => "TableRefsClause",
            Self::TableName(_) => "TableName",
            Self::OnCondition(_) => "OnCondition",
            Self::GroupByClause(_) => "GroupByClause",
            Self::HavingClause(_) => "HavingClause",
            Self::OrderByClause(_) => "OrderByClause",
            Self::ByItem(_) => "ByItem",
            Self::Limit(_) => "Limit",
            Self::Assignment(_) => "Assignment",
            Self::ColumnName(_) => "ColumnName",
            Self::WhenClause(_) => "WhenClause",
            Self::WindowSpec(_) => "WindowSpec",
            Self::PartitionByClause(_) => "PartitionByClause",
            Self::FrameClause(_) => "FrameClause",
            Self::TableOptimizerHint(_) => "TableOptimizerHint",
            Self::DeleteTableList(_) => "DeleteTableList",
            Self::UnionSelectList(_) => "UnionSelectList",
            Self::ColumnDef(_) => "ColumnDef",
            Self::ColumnOption(_) => "ColumnOption",
            Self::Constraint(_) => "Constraint",
            Self::IndexColName(_) => "IndexColName",
            Self::ReferenceDef(_) => "ReferenceDef",
            Self::VariableAssignment(_) => "VariableAssignment",
        }
    }
}
