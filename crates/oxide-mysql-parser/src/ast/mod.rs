//! Syntax tree: node types, traversal and rendering.
//!
//! Statements, expressions and result sets are closed sets modelled as
//! enums ([`StmtNode`], [`ExprNode`], [`ResultSetNode`]) wrapping concrete
//! structs. Every node owns its children, caches its source text through
//! [`HasText`], walks its children for a [`Visitor`] through [`Accept`] and
//! renders SQL through [`Restore`](crate::restore::Restore).

mod ddl;
mod dml;
mod expression;
mod functions;
mod hint;
mod node;
mod opcode;
mod refer;
mod statement;
mod types;
mod util;
mod value;
mod visitor;

pub use ddl::{
    ColumnDef, ColumnOption, ColumnOptionKind, Constraint, ConstraintType, CreateTableStmt,
    DropTableStmt, IndexColName, IndexOption, IndexType, ReferOption, ReferenceDef, TableOption,
};
pub use dml::{
    Assignment, ByItem, DeleteStmt, DeleteTableList, FieldList, GroupByClause, HavingClause,
    IndexHint, IndexHintScope, IndexHintType, InsertStmt, Join, JoinType, Limit, OnCondition,
    OrderByClause, SelectField, SelectLockType, SelectStmt, TableName, TableRefsClause,
    TableSource, UnionSelectList, UnionStmt, UpdateStmt, WildCardField,
};
pub use expression::{
    BetweenExpr, BinaryOperationExpr, CaseExpr, ColumnName, ColumnNameExpr, CompareSubqueryExpr,
    DefaultExpr, ExistsSubqueryExpr, ExprNode, IsNullExpr, IsTruthExpr, MaxValueExpr,
    ParenthesesExpr, PatternInExpr, PatternLikeExpr, PatternRegexpExpr, PositionExpr, RowExpr,
    SetCollationExpr, SubqueryExpr, UnaryOperationExpr, ValuesExpr, VariableExpr, WhenClause,
};
pub use functions::{
    AggregateFuncExpr, BoundType, CastFunctionType, FrameBound, FrameClause, FrameType,
    FuncCallExpr, FuncCastExpr, PartitionByClause, WindowFuncExpr, WindowSpec, AGGREGATE_FUNCS,
    WINDOW_FUNCS,
};
pub use hint::{HintData, HintTable, TableOptimizerHint};
pub use node::{HasText, Node};
pub use opcode::Opcode;
pub use refer::{ResultField, ResultFieldRef, ResultFieldTable};
pub use statement::{
    BeginStmt, CommitStmt, DoStmt, ExplainStmt, ResultSetNode, RollbackStmt, SetStmt, StmtNode,
    UseStmt, VariableAssignment,
};
pub use types::{CastType, DataType, TypeName};
pub use util::{clean_text, is_read_only, TextCleaner};
pub use value::{Literal, ParamMarkerExpr, ValueExpr, ValueFactory};
pub use visitor::{accept_each, Accept, Flow, Signal, Visitor};
