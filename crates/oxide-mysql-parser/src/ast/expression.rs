//! Expression nodes.

use super::functions::{AggregateFuncExpr, FuncCallExpr, FuncCastExpr, WindowFuncExpr};
use super::node::{impl_has_text, HasText, Node};
use super::opcode::Opcode;
use super::refer::ResultFieldRef;
use super::statement::ResultSetNode;
use super::value::{ParamMarkerExpr, ValueExpr};
use super::visitor::{accept_each, Accept, Flow, Visitor};
use crate::restore::{Restore, RestoreCtx, RestoreError, Result};

/// Anything with a value.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprNode {
    /// Literal value built by the injected value factory.
    Value(Box<dyn ValueExpr>),
    /// `?`
    ParamMarker(Box<dyn ParamMarkerExpr>),
    /// `expr [NOT] BETWEEN left AND right`
    Between(BetweenExpr),
    /// `l op r`
    BinaryOperation(BinaryOperationExpr),
    /// `CASE ... END`
    Case(CaseExpr),
    /// `(SELECT ...)`
    Subquery(SubqueryExpr),
    /// `l op ANY|ALL (SELECT ...)`
    CompareSubquery(CompareSubqueryExpr),
    /// Column reference.
    ColumnName(ColumnNameExpr),
    /// `DEFAULT` or `DEFAULT(col)`
    Default(DefaultExpr),
    /// `[NOT] EXISTS (SELECT ...)`
    Exists(ExistsSubqueryExpr),
    /// `expr [NOT] IN (...)`
    PatternIn(PatternInExpr),
    /// `expr IS [NOT] NULL`
    IsNull(IsNullExpr),
    /// `expr IS [NOT] TRUE|FALSE`
    IsTruth(IsTruthExpr),
    /// `expr [NOT] LIKE pattern [ESCAPE c]`
    PatternLike(PatternLikeExpr),
    /// `(expr)`
    Paren(ParenthesesExpr),
    /// Select-list ordinal in `ORDER BY` / `GROUP BY`.
    Position(PositionExpr),
    /// `expr [NOT] REGEXP pattern`
    PatternRegexp(PatternRegexpExpr),
    /// `ROW(a, b)` or `(a, b)`
    Row(RowExpr),
    /// `op v`
    UnaryOperation(UnaryOperationExpr),
    /// `VALUES(col)` in `ON DUPLICATE KEY UPDATE`
    Values(ValuesExpr),
    /// `@a`, `@@a`, `@a := expr`
    Variable(VariableExpr),
    /// `MAXVALUE` partition bound.
    MaxValue(MaxValueExpr),
    /// `expr COLLATE name`
    SetCollation(SetCollationExpr),
    /// Scalar function call.
    FuncCall(FuncCallExpr),
    /// `CAST(expr AS type)`, `CONVERT(expr, type)`
    FuncCast(FuncCastExpr),
    /// Aggregate function call.
    AggregateFunc(AggregateFuncExpr),
    /// Window function call.
    WindowFunc(WindowFuncExpr),
}

/// `expr [NOT] BETWEEN left AND right`
#[derive(Debug, Clone, PartialEq)]
pub struct BetweenExpr {
    /// Tested expression.
    pub expr: Box<ExprNode>,
    /// Lower bound.
    pub left: Box<ExprNode>,
    /// Upper bound.
    pub right: Box<ExprNode>,
    /// `NOT BETWEEN`.
    pub not: bool,
    /// Cached source text.
    pub text: Option<String>,
}

/// A binary operation.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperationExpr {
    /// Operator.
    pub op: Opcode,
    /// Left operand.
    pub l: Box<ExprNode>,
    /// Right operand.
    pub r: Box<ExprNode>,
    /// Cached source text.
    pub text: Option<String>,
}

/// `WHEN expr THEN result`
#[derive(Debug, Clone, PartialEq)]
pub struct WhenClause {
    /// Condition, or value compared against the `CASE` operand.
    pub expr: Box<ExprNode>,
    /// Result when matched.
    pub result: Box<ExprNode>,
    /// Cached source text.
    pub text: Option<String>,
}

/// `CASE [value] WHEN ... [ELSE ...] END`
#[derive(Debug, Clone, PartialEq)]
pub struct CaseExpr {
    /// Operand of a simple `CASE`.
    pub value: Option<Box<ExprNode>>,
    /// `WHEN` branches.
    pub when_clauses: Vec<WhenClause>,
    /// `ELSE` result.
    pub else_clause: Option<Box<ExprNode>>,
    /// Cached source text.
    pub text: Option<String>,
}

/// A parenthesized query used as a value.
#[derive(Debug, Clone, PartialEq)]
pub struct SubqueryExpr {
    /// The query, a select or union.
    pub query: Box<ResultSetNode>,
    /// Cached source text.
    pub text: Option<String>,
}

/// `l op ANY (subquery)` or `l op ALL (subquery)`
#[derive(Debug, Clone, PartialEq)]
pub struct CompareSubqueryExpr {
    /// Left operand.
    pub l: Box<ExprNode>,
    /// Comparison operator.
    pub op: Opcode,
    /// The subquery.
    pub r: Box<ExprNode>,
    /// `ALL` rather than `ANY`/`SOME`.
    pub all: bool,
    /// Cached source text.
    pub text: Option<String>,
}

/// A possibly qualified column name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnName {
    /// Schema qualifier.
    pub schema: Option<String>,
    /// Table qualifier.
    pub table: Option<String>,
    /// Column.
    pub name: String,
    /// Cached source text.
    pub text: Option<String>,
}

impl ColumnName {
    /// Creates an unqualified column name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A column reference in an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNameExpr {
    /// The column.
    pub name: ColumnName,
    /// Resolved field, filled in by name resolution.
    pub refer: Option<ResultFieldRef>,
    /// Cached source text.
    pub text: Option<String>,
}

/// `DEFAULT` or `DEFAULT(col)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultExpr {
    /// Column whose default is taken.
    pub name: Option<ColumnName>,
    /// Cached source text.
    pub text: Option<String>,
}

/// `[NOT] EXISTS (subquery)`
#[derive(Debug, Clone, PartialEq)]
pub struct ExistsSubqueryExpr {
    /// The subquery.
    pub sel: Box<ExprNode>,
    /// `NOT EXISTS`.
    pub not: bool,
    /// Cached source text.
    pub text: Option<String>,
}

/// `expr [NOT] IN (list)` or `expr [NOT] IN (subquery)`
#[derive(Debug, Clone, PartialEq)]
pub struct PatternInExpr {
    /// Tested expression.
    pub expr: Box<ExprNode>,
    /// Candidate values.
    pub list: Vec<ExprNode>,
    /// `NOT IN`.
    pub not: bool,
    /// Subquery supplying the candidates.
    pub sel: Option<Box<ExprNode>>,
    /// Cached source text.
    pub text: Option<String>,
}

/// `expr IS [NOT] NULL`
#[derive(Debug, Clone, PartialEq)]
pub struct IsNullExpr {
    /// Tested expression.
    pub expr: Box<ExprNode>,
    /// `IS NOT NULL`.
    pub not: bool,
    /// Cached source text.
    pub text: Option<String>,
}

/// `expr IS [NOT] TRUE` or `expr IS [NOT] FALSE`
#[derive(Debug, Clone, PartialEq)]
pub struct IsTruthExpr {
    /// Tested expression.
    pub expr: Box<ExprNode>,
    /// `IS NOT`.
    pub not: bool,
    /// Tested truth value.
    pub true_val: bool,
    /// Cached source text.
    pub text: Option<String>,
}

/// `expr [NOT] LIKE pattern [ESCAPE c]`
#[derive(Debug, Clone, PartialEq)]
pub struct PatternLikeExpr {
    /// Tested expression.
    pub expr: Box<ExprNode>,
    /// Pattern.
    pub pattern: Box<ExprNode>,
    /// `NOT LIKE`.
    pub not: bool,
    /// Escape character, `\` unless given.
    pub escape: char,
    /// Cached source text.
    pub text: Option<String>,
}

/// `(expr)`
#[derive(Debug, Clone, PartialEq)]
pub struct ParenthesesExpr {
    /// Inner expression.
    pub expr: Box<ExprNode>,
    /// Cached source text.
    pub text: Option<String>,
}

/// A 1-based select-list position (`ORDER BY 2`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionExpr {
    /// Position.
    pub n: u64,
    /// Resolved field, filled in by name resolution.
    pub refer: Option<ResultFieldRef>,
    /// Cached source text.
    pub text: Option<String>,
}

/// `expr [NOT] REGEXP pattern`
#[derive(Debug, Clone, PartialEq)]
pub struct PatternRegexpExpr {
    /// Tested expression.
    pub expr: Box<ExprNode>,
    /// Pattern.
    pub pattern: Box<ExprNode>,
    /// `NOT REGEXP`.
    pub not: bool,
    /// Cached source text.
    pub text: Option<String>,
}

/// A row constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct RowExpr {
    /// Row values.
    pub values: Vec<ExprNode>,
    /// Cached source text.
    pub text: Option<String>,
}

/// A unary operation.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOperationExpr {
    /// Operator.
    pub op: Opcode,
    /// Operand.
    pub v: Box<ExprNode>,
    /// Cached source text.
    pub text: Option<String>,
}

/// `VALUES(col)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuesExpr {
    /// The column whose inserted value is taken.
    pub column: ColumnName,
    /// Cached source text.
    pub text: Option<String>,
}

/// A user or system variable, optionally assigned with `:=`.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableExpr {
    /// Variable name, without `@`, `@@` or scope.
    pub name: String,
    /// Global scope.
    pub is_global: bool,
    /// System (`@@`) rather than user (`@`) variable.
    pub is_system: bool,
    /// The scope was written out (`@@global.x`, `@@session.x`).
    pub explicit_scope: bool,
    /// Assigned value for `@a := expr`.
    pub value: Option<Box<ExprNode>>,
    /// Cached source text.
    pub text: Option<String>,
}

/// `MAXVALUE` in a partition definition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MaxValueExpr {
    /// Cached source text.
    pub text: Option<String>,
}

/// `expr COLLATE name`
#[derive(Debug, Clone, PartialEq)]
pub struct SetCollationExpr {
    /// Operand.
    pub expr: Box<ExprNode>,
    /// Collation name, lower case.
    pub collate: String,
    /// Cached source text.
    pub text: Option<String>,
}

impl_has_text!(
    BetweenExpr,
    BinaryOperationExpr,
    WhenClause,
    CaseExpr,
    SubqueryExpr,
    CompareSubqueryExpr,
    ColumnName,
    ColumnNameExpr,
    DefaultExpr,
    ExistsSubqueryExpr,
    PatternInExpr,
    IsNullExpr,
    IsTruthExpr,
    PatternLikeExpr,
    ParenthesesExpr,
    PositionExpr,
    PatternRegexpExpr,
    RowExpr,
    UnaryOperationExpr,
    ValuesExpr,
    VariableExpr,
    MaxValueExpr,
    SetCollationExpr,
);

macro_rules! for_each_expr {
    ($self:expr, $e:ident => $body:expr, value $v:ident => $vbody:expr, marker $p:ident => $pbody:expr) => {
        match $self {
            ExprNode::Value($v) => $vbody,
            ExprNode::ParamMarker($p) => $pbody,
            ExprNode::Between($e) => $body,
            ExprNode::BinaryOperation($e) => $body,
            ExprNode::Case($e) => $body,
            ExprNode::Subquery($e) => $body,
            ExprNode::CompareSubquery($e) => $body,
            ExprNode::ColumnName($e) => $body,
            ExprNode::Default($e) => $body,
            ExprNode::Exists($e) => $body,
            ExprNode::PatternIn($e) => $body,
            ExprNode::IsNull($e) => $body,
            ExprNode::IsTruth($e) => $body,
            ExprNode::PatternLike($e) => $body,
            ExprNode::Paren($e) => $body,
            ExprNode::Position($e) => $body,
            ExprNode::PatternRegexp($e) => $body,
            ExprNode::Row($e) => $body,
            ExprNode::UnaryOperation($e) => $body,
            ExprNode::Values($e) => $body,
            ExprNode::Variable($e) => $body,
            ExprNode::MaxValue($e) => $body,
            ExprNode::SetCollation($e) => $body,
            ExprNode::FuncCall($e) => $body,
            ExprNode::FuncCast($e) => $body,
            ExprNode::AggregateFunc($e) => $body,
            ExprNode::WindowFunc($e) => $body,
        }
    };
}

impl ExprNode {
    /// Wraps a column reference.
    #[must_use]
    pub const fn column(name: ColumnName) -> Self {
        Self::ColumnName(ColumnNameExpr {
            name,
            refer: None,
            text: None,
        })
    }

    /// Combines two expressions with a binary operator.
    #[must_use]
    pub fn binary(op: Opcode, l: Self, r: Self) -> Self {
        Self::BinaryOperation(BinaryOperationExpr {
            op,
            l: Box::new(l),
            r: Box::new(r),
            text: None,
        })
    }

    /// Wraps an expression in parentheses.
    #[must_use]
    pub fn paren(expr: Self) -> Self {
        Self::Paren(ParenthesesExpr {
            expr: Box::new(expr),
            text: None,
        })
    }

    /// Returns the variant name, for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Value(_) => "ValueExpr",
            Self::ParamMarker(_) => "ParamMarkerExpr",
            Self::Between(_) => "BetweenExpr",
            Self::BinaryOperation(_) => "BinaryOperationExpr",
            Self::Case(_) => "CaseExpr",
            Self::Subquery(_) => "SubqueryExpr",
            Self::CompareSubquery(_) => "CompareSubqueryExpr",
            Self::ColumnName(_) => "ColumnNameExpr",
            Self::Default(_) => "DefaultExpr",
            Self::Exists(_) => "ExistsSubqueryExpr",
            Self::PatternIn(_) => "PatternInExpr",
            Self::IsNull(_) => "IsNullExpr",
            Self::IsTruth(_) => "IsTruthExpr",
            Self::PatternLike(_) => "PatternLikeExpr",
            Self::Paren(_) => "ParenthesesExpr",
            Self::Position(_) => "PositionExpr",
            Self::PatternRegexp(_) => "PatternRegexpExpr",
            Self::Row(_) => "RowExpr",
            Self::UnaryOperation(_) => "UnaryOperationExpr",
            Self::Values(_) => "ValuesExpr",
            Self::Variable(_) => "VariableExpr",
            Self::MaxValue(_) => "MaxValueExpr",
            Self::SetCollation(_) => "SetCollationExpr",
            Self::FuncCall(_) => "FuncCallExpr",
            Self::FuncCast(_) => "FuncCastExpr",
            Self::AggregateFunc(_) => "AggregateFuncExpr",
            Self::WindowFunc(_) => "WindowFuncExpr",
        }
    }
}

impl HasText for ExprNode {
    fn text(&self) -> Option<&str> {
        for_each_expr!(self, e => e.text(), value v => v.text(), marker p => p.text())
    }

    fn set_text(&mut self, text: Option<String>) {
        for_each_expr!(
            self,
            e => e.set_text(text),
            value v => v.set_text(text),
            marker p => p.set_text(text)
        );
    }
}

impl Restore for ExprNode {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        for_each_expr!(self, e => e.restore(ctx), value v => v.restore(ctx), marker p => p.restore(ctx))
    }
}

impl Accept for ExprNode {
    fn as_node(&mut self) -> Node<'_> {
        Node::Expr(self)
    }

    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow {
        match self {
            Self::Value(_) | Self::ParamMarker(_) | Self::Position(_) | Self::MaxValue(_) => {
                Flow::Continue(())
            }
            Self::Between(e) => {
                e.expr.accept(v)?;
                e.left.accept(v)?;
                e.right.accept(v)
            }
            Self::BinaryOperation(e) => {
                e.l.accept(v)?;
                e.r.accept(v)
            }
            Self::Case(e) => {
                if let Some(value) = &mut e.value {
                    value.accept(v)?;
                }
                accept_each(&mut e.when_clauses, v)?;
                if let Some(else_clause) = &mut e.else_clause {
                    else_clause.accept(v)?;
                }
                Flow::Continue(())
            }
            Self::Subquery(e) => e.query.accept(v),
            Self::CompareSubquery(e) => {
                e.l.accept(v)?;
                e.r.accept(v)
            }
            Self::ColumnName(e) => e.name.accept(v),
            Self::Default(e) => match &mut e.name {
                Some(name) => name.accept(v),
                None => Flow::Continue(()),
            },
            Self::Exists(e) => e.sel.accept(v),
            Self::PatternIn(e) => {
                e.expr.accept(v)?;
                accept_each(&mut e.list, v)?;
                if let Some(sel) = &mut e.sel {
                    sel.accept(v)?;
                }
                Flow::Continue(())
            }
            Self::IsNull(e) => e.expr.accept(v),
            Self::IsTruth(e) => e.expr.accept(v),
            Self::PatternLike(e) => {
                e.expr.accept(v)?;
                e.pattern.accept(v)
            }
            Self::Paren(e) => e.expr.accept(v),
            Self::PatternRegexp(e) => {
                e.expr.accept(v)?;
                e.pattern.accept(v)
            }
            Self::Row(e) => accept_each(&mut e.values, v),
            Self::UnaryOperation(e) => e.v.accept(v),
            Self::Values(e) => e.column.accept(v),
            Self::Variable(e) => match &mut e.value {
                Some(value) => value.accept(v),
                None => Flow::Continue(()),
            },
            Self::SetCollation(e) => e.expr.accept(v),
            Self::FuncCall(e) => accept_each(&mut e.args, v),
            Self::FuncCast(e) => e.expr.accept(v),
            Self::AggregateFunc(e) => accept_each(&mut e.args, v),
            Self::WindowFunc(e) => {
                accept_each(&mut e.args, v)?;
                e.spec.accept(v)
            }
        }
    }
}

impl Accept for WhenClause {
    fn as_node(&mut self) -> Node<'_> {
        Node::WhenClause(self)
    }

    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow {
        self.expr.accept(v)?;
        self.result.accept(v)
    }
}

impl Accept for ColumnName {
    fn as_node(&mut self) -> Node<'_> {
        Node::ColumnName(self)
    }

    fn accept_children(&mut self, _: &mut dyn Visitor) -> Flow {
        Flow::Continue(())
    }
}

impl Restore for BetweenExpr {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        self.expr.restore(ctx)?;
        if self.not {
            ctx.write_keyword(" NOT BETWEEN ")?;
        } else {
            ctx.write_keyword(" BETWEEN ")?;
        }
        self.left.restore(ctx)?;
        ctx.write_keyword(" AND ")?;
        self.right.restore(ctx)
    }
}

impl Restore for BinaryOperationExpr {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        self.l.restore(ctx)?;
        self.op.restore_infix(ctx)?;
        self.r.restore(ctx)
    }
}

impl Restore for WhenClause {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword("WHEN ")?;
        self.expr.restore(ctx)?;
        ctx.write_keyword(" THEN ")?;
        self.result.restore(ctx)
    }
}

impl Restore for CaseExpr {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword("CASE")?;
        if let Some(value) = &self.value {
            ctx.write_plain(" ")?;
            value.restore(ctx)?;
        }
        for clause in &self.when_clauses {
            ctx.write_plain(" ")?;
            clause.restore(ctx)?;
        }
        if let Some(else_clause) = &self.else_clause {
            ctx.write_keyword(" ELSE ")?;
            else_clause.restore(ctx)?;
        }
        ctx.write_keyword(" END")
    }
}

impl Restore for SubqueryExpr {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_plain("(")?;
        self.query.restore(ctx)?;
        ctx.write_plain(")")
    }
}

impl Restore for CompareSubqueryExpr {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        self.l.restore(ctx)?;
        self.op.restore(ctx)?;
        if self.all {
            ctx.write_keyword(" ALL ")?;
        } else {
            ctx.write_keyword(" ANY ")?;
        }
        self.r.restore(ctx)
    }
}

impl Restore for ColumnName {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        if let Some(schema) = &self.schema {
            ctx.write_name(schema)?;
            ctx.write_plain(".")?;
        }
        if let Some(table) = &self.table {
            ctx.write_name(table)?;
            ctx.write_plain(".")?;
        }
        ctx.write_name(&self.name)
    }
}

impl Restore for ColumnNameExpr {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        self.name.restore(ctx)
    }
}

impl Restore for DefaultExpr {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword("DEFAULT")?;
        if let Some(name) = &self.name {
            ctx.write_plain("(")?;
            name.restore(ctx)?;
            ctx.write_plain(")")?;
        }
        Ok(())
    }
}

impl Restore for ExistsSubqueryExpr {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        if self.not {
            ctx.write_keyword("NOT EXISTS ")?;
        } else {
            ctx.write_keyword("EXISTS ")?;
        }
        self.sel.restore(ctx)
    }
}

impl Restore for PatternInExpr {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        self.expr.restore(ctx)?;
        if self.not {
            ctx.write_keyword(" NOT IN ")?;
        } else {
            ctx.write_keyword(" IN ")?;
        }
        if let Some(sel) = &self.sel {
            return sel.restore(ctx);
        }
        ctx.write_plain("(")?;
        ctx.write_list(&self.list, ",")?;
        ctx.write_plain(")")
    }
}

impl Restore for IsNullExpr {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        self.expr.restore(ctx)?;
        if self.not {
            ctx.write_keyword(" IS NOT NULL")
        } else {
            ctx.write_keyword(" IS NULL")
        }
    }
}

impl Restore for IsTruthExpr {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        self.expr.restore(ctx)?;
        ctx.write_keyword(if self.not { " IS NOT" } else { " IS" })?;
        ctx.write_keyword(if self.true_val { " TRUE" } else { " FALSE" })
    }
}

impl Restore for PatternLikeExpr {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        self.expr.restore(ctx)?;
        if self.not {
            ctx.write_keyword(" NOT LIKE ")?;
        } else {
            ctx.write_keyword(" LIKE ")?;
        }
        self.pattern.restore(ctx)?;
        if self.escape != '\\' {
            ctx.write_keyword(" ESCAPE ")?;
            ctx.write_string(self.escape.encode_utf8(&mut [0; 4]))?;
        }
        Ok(())
    }
}

impl Restore for ParenthesesExpr {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_plain("(")?;
        self.expr.restore(ctx)?;
        ctx.write_plain(")")
    }
}

impl Restore for PositionExpr {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_fmt_plain(format_args!("{}", self.n))
    }
}

impl Restore for PatternRegexpExpr {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        self.expr.restore(ctx)?;
        if self.not {
            ctx.write_keyword(" NOT REGEXP ")?;
        } else {
            ctx.write_keyword(" REGEXP ")?;
        }
        self.pattern.restore(ctx)
    }
}

impl Restore for RowExpr {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword("ROW")?;
        ctx.write_plain("(")?;
        ctx.write_list(&self.values, ",")?;
        ctx.write_plain(")")
    }
}

impl Restore for UnaryOperationExpr {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        self.op.restore(ctx)?;
        if self.op.is_keyword() {
            ctx.write_plain(" ")?;
        }
        self.v.restore(ctx)
    }
}

impl Restore for ValuesExpr {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword("VALUES")?;
        ctx.write_plain("(")?;
        self.column.restore(ctx)?;
        ctx.write_plain(")")
    }
}

impl Restore for VariableExpr {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        if self.is_system {
            ctx.write_plain("@@")?;
            if self.explicit_scope {
                ctx.write_keyword(if self.is_global { "GLOBAL" } else { "SESSION" })?;
                ctx.write_plain(".")?;
            }
        } else {
            ctx.write_plain("@")?;
        }
        ctx.write_name(&self.name)?;
        if let Some(value) = &self.value {
            ctx.write_plain(":=")?;
            value.restore(ctx)?;
        }
        Ok(())
    }
}

impl Restore for MaxValueExpr {
    fn restore(&self, _: &mut RestoreCtx<'_>) -> Result<()> {
        Err(RestoreError::NotImplemented("MaxValueExpr"))
    }
}

impl Restore for SetCollationExpr {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        self.expr.restore(ctx)?;
        ctx.write_keyword(" COLLATE ")?;
        ctx.write_plain(&self.collate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::restore::{restore_sql, RestoreFlags};

    fn col(name: &str) -> ExprNode {
        ExprNode::column(ColumnName::new(name))
    }

    fn sql(expr: &ExprNode) -> String {
        restore_sql(expr, RestoreFlags::DEFAULT).unwrap()
    }

    #[test]
    fn test_restore_qualified_column() {
        let name = ColumnName {
            schema: Some("db".to_owned()),
            table: Some("t".to_owned()),
            name: "a`b".to_owned(),
            text: None,
        };
        assert_eq!(sql(&ExprNode::column(name)), "`db`.`t`.`a``b`");
    }

    #[test]
    fn test_restore_operators() {
        let expr = ExprNode::binary(
            Opcode::LogicAnd,
            ExprNode::binary(Opcode::Plus, col("a"), col("b")),
            ExprNode::paren(col("c")),
        );
        assert_eq!(sql(&expr), "`a`+`b` AND (`c`)");
        let spaced = restore_sql(
            &expr,
            RestoreFlags::DEFAULT | RestoreFlags::SPACES_AROUND_BINARY_OPERATION,
        )
        .unwrap();
        assert_eq!(spaced, "`a` + `b` AND (`c`)");
    }

    #[test]
    fn test_restore_predicates() {
        let between = ExprNode::Between(BetweenExpr {
            expr: Box::new(col("a")),
            left: Box::new(col("b")),
            right: Box::new(col("c")),
            not: true,
            text: None,
        });
        assert_eq!(sql(&between), "`a` NOT BETWEEN `b` AND `c`");

        let is_truth = ExprNode::IsTruth(IsTruthExpr {
            expr: Box::new(col("a")),
            not: true,
            true_val: false,
            text: None,
        });
        assert_eq!(sql(&is_truth), "`a` IS NOT FALSE");

        let like = ExprNode::PatternLike(PatternLikeExpr {
            expr: Box::new(col("a")),
            pattern: Box::new(col("b")),
            not: false,
            escape: '|',
            text: None,
        });
        assert_eq!(sql(&like), "`a` LIKE `b` ESCAPE '|'");
    }

    #[test]
    fn test_restore_variables() {
        let global = ExprNode::Variable(VariableExpr {
            name: "sql_mode".to_owned(),
            is_global: true,
            is_system: true,
            explicit_scope: true,
            value: None,
            text: None,
        });
        assert_eq!(sql(&global), "@@GLOBAL.`sql_mode`");
        let assign = ExprNode::Variable(VariableExpr {
            name: "a".to_owned(),
            is_global: false,
            is_system: false,
            explicit_scope: false,
            value: Some(Box::new(col("b"))),
            text: None,
        });
        assert_eq!(sql(&assign), "@`a`:=`b`");
    }

    #[test]
    fn test_max_value_is_not_implemented() {
        let expr = ExprNode::MaxValue(MaxValueExpr::default());
        let err = restore_sql(&expr, RestoreFlags::DEFAULT).unwrap_err();
        assert!(matches!(err, RestoreError::NotImplemented("MaxValueExpr")));
    }

    #[test]
    fn test_text_round_trip() {
        let mut expr = col("a");
        assert_eq!(expr.text(), None);
        expr.set_text(Some("a".to_owned()));
        assert_eq!(expr.text(), Some("a"));
        assert_eq!(expr.kind_name(), "ColumnNameExpr");
    }
}
