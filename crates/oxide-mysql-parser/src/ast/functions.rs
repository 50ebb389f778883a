//! Function call nodes: scalar, cast, aggregate and window functions.

use super::dml::{ByItem, OrderByClause};
use super::expression::ExprNode;
use super::node::{impl_has_text, Node};
use super::types::CastType;
use super::visitor::{accept_each, accept_opt, Accept, Flow, Visitor};
use crate::restore::{Restore, RestoreCtx, Result};

/// Names of the aggregate functions, lower case.
pub const AGGREGATE_FUNCS: &[&str] = &[
    "avg",
    "bit_and",
    "bit_or",
    "bit_xor",
    "count",
    "group_concat",
    "json_arrayagg",
    "json_objectagg",
    "max",
    "min",
    "std",
    "stddev",
    "stddev_pop",
    "stddev_samp",
    "sum",
    "var_pop",
    "var_samp",
    "variance",
];

/// Names of the functions that exist only as window functions, lower case.
pub const WINDOW_FUNCS: &[&str] = &[
    "cume_dist",
    "dense_rank",
    "first_value",
    "lag",
    "last_value",
    "lead",
    "nth_value",
    "ntile",
    "percent_rank",
    "rank",
    "row_number",
];

/// A scalar function call.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncCallExpr {
    /// Function name, lower case.
    pub fn_name: String,
    /// Arguments.
    pub args: Vec<ExprNode>,
    /// Cached source text.
    pub text: Option<String>,
}

/// Spelling of a cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastFunctionType {
    /// `CAST(expr AS type)`
    Cast,
    /// `CONVERT(expr, type)`
    Convert,
    /// `BINARY expr`
    BinaryOperator,
}

/// A type conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncCastExpr {
    /// Converted expression.
    pub expr: Box<ExprNode>,
    /// Target type.
    pub tp: CastType,
    /// How the cast was written.
    pub function_type: CastFunctionType,
    /// Cached source text.
    pub text: Option<String>,
}

/// An aggregate function call.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateFuncExpr {
    /// Function name, lower case.
    pub f: String,
    /// Arguments. `COUNT(*)` is stored as `COUNT(1)`.
    pub args: Vec<ExprNode>,
    /// `DISTINCT` argument.
    pub distinct: bool,
    /// Cached source text.
    pub text: Option<String>,
}

/// A window function call.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowFuncExpr {
    /// Function name, lower case.
    pub f: String,
    /// Arguments.
    pub args: Vec<ExprNode>,
    /// `DISTINCT` argument of an aggregate used as a window function.
    pub distinct: bool,
    /// `IGNORE NULLS`
    pub ignore_null: bool,
    /// `FROM LAST` of `NTH_VALUE`
    pub from_last: bool,
    /// The `OVER` window.
    pub spec: WindowSpec,
    /// Cached source text.
    pub text: Option<String>,
}

/// A window, inline in `OVER (...)` or named in a `WINDOW` clause.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowSpec {
    /// Name defined by `WINDOW name AS (...)`, or referenced by `OVER name`.
    pub name: Option<String>,
    /// Window this one refines, as in `OVER (w ORDER BY a)`.
    pub reference: Option<String>,
    /// `PARTITION BY`
    pub partition_by: Option<PartitionByClause>,
    /// `ORDER BY`
    pub order_by: Option<OrderByClause>,
    /// Frame.
    pub frame: Option<FrameClause>,
    /// `OVER name`, without a parenthesized body.
    pub only_alias: bool,
    /// Cached source text.
    pub text: Option<String>,
}

/// `PARTITION BY` of a window.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionByClause {
    /// Partitioning items.
    pub items: Vec<ByItem>,
    /// Cached source text.
    pub text: Option<String>,
}

/// Unit of a window frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    /// `ROWS`
    Rows,
    /// `RANGE`
    Ranges,
}

/// Direction of a frame bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundType {
    /// `... FOLLOWING`
    Following,
    /// `... PRECEDING`
    Preceding,
    /// `CURRENT ROW`
    CurrentRow,
}

/// One end of a window frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBound {
    /// Direction.
    pub kind: BoundType,
    /// `UNBOUNDED PRECEDING` / `UNBOUNDED FOLLOWING`
    pub unbounded: bool,
    /// Offset expression.
    pub expr: Option<Box<ExprNode>>,
}

impl FrameBound {
    /// `CURRENT ROW`
    #[must_use]
    pub const fn current_row() -> Self {
        Self {
            kind: BoundType::CurrentRow,
            unbounded: false,
            expr: None,
        }
    }
}

/// A window frame. A frame written with a single bound ends at
/// `CURRENT ROW`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameClause {
    /// Unit.
    pub tp: FrameType,
    /// Start bound.
    pub start: FrameBound,
    /// End bound.
    pub end: FrameBound,
    /// Cached source text.
    pub text: Option<String>,
}

impl_has_text!(
    FuncCallExpr,
    FuncCastExpr,
    AggregateFuncExpr,
    WindowFuncExpr,
    WindowSpec,
    PartitionByClause,
    FrameClause,
);

impl Restore for FuncCallExpr {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword(&self.fn_name)?;
        ctx.write_plain("(")?;
        ctx.write_list(&self.args, ", ")?;
        ctx.write_plain(")")
    }
}

impl Restore for FuncCastExpr {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        match self.function_type {
            CastFunctionType::Cast => {
                ctx.write_keyword("CAST")?;
                ctx.write_plain("(")?;
                self.expr.restore(ctx)?;
                ctx.write_keyword(" AS ")?;
                self.tp.restore(ctx)?;
                ctx.write_plain(")")
            }
            CastFunctionType::Convert => {
                ctx.write_keyword("CONVERT")?;
                ctx.write_plain("(")?;
                self.expr.restore(ctx)?;
                ctx.write_plain(", ")?;
                self.tp.restore(ctx)?;
                ctx.write_plain(")")
            }
            CastFunctionType::BinaryOperator => {
                ctx.write_keyword("BINARY ")?;
                self.expr.restore(ctx)
            }
        }
    }
}

impl Restore for AggregateFuncExpr {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword(&self.f)?;
        ctx.write_plain("(")?;
        if self.distinct {
            ctx.write_keyword("DISTINCT ")?;
        }
        ctx.write_list(&self.args, ", ")?;
        ctx.write_plain(")")
    }
}

impl Restore for WindowFuncExpr {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword(&self.f)?;
        ctx.write_plain("(")?;
        if self.distinct {
            ctx.write_keyword("DISTINCT ")?;
        }
        ctx.write_list(&self.args, ", ")?;
        ctx.write_plain(")")?;
        if self.from_last {
            ctx.write_keyword(" FROM LAST")?;
        }
        if self.ignore_null {
            ctx.write_keyword(" IGNORE NULLS")?;
        }
        ctx.write_keyword(" OVER ")?;
        self.spec.restore(ctx)
    }
}

impl Restore for WindowSpec {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        if let Some(name) = &self.name {
            ctx.write_name(name)?;
            if self.only_alias {
                return Ok(());
            }
            ctx.write_keyword(" AS ")?;
        }
        ctx.write_plain("(")?;
        let mut sep = "";
        if let Some(reference) = &self.reference {
            ctx.write_name(reference)?;
            sep = " ";
        }
        if let Some(partition_by) = &self.partition_by {
            ctx.write_plain(sep)?;
            partition_by.restore(ctx)?;
            sep = " ";
        }
        if let Some(order_by) = &self.order_by {
            ctx.write_plain(sep)?;
            order_by.restore(ctx)?;
            sep = " ";
        }
        if let Some(frame) = &self.frame {
            ctx.write_plain(sep)?;
            frame.restore(ctx)?;
        }
        ctx.write_plain(")")
    }
}

impl Restore for PartitionByClause {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword("PARTITION BY ")?;
        ctx.write_list(&self.items, ", ")
    }
}

impl Restore for FrameBound {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        if self.kind == BoundType::CurrentRow {
            return ctx.write_keyword("CURRENT ROW");
        }
        if self.unbounded {
            ctx.write_keyword("UNBOUNDED")?;
        } else if let Some(expr) = &self.expr {
            expr.restore(ctx)?;
        }
        match self.kind {
            BoundType::Preceding => ctx.write_keyword(" PRECEDING"),
            _ => ctx.write_keyword(" FOLLOWING"),
        }
    }
}

impl Restore for FrameClause {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        match self.tp {
            FrameType::Rows => ctx.write_keyword("ROWS")?,
            FrameType::Ranges => ctx.write_keyword("RANGE")?,
        }
        ctx.write_keyword(" BETWEEN ")?;
        self.start.restore(ctx)?;
        ctx.write_keyword(" AND ")?;
        self.end.restore(ctx)
    }
}

impl Accept for WindowSpec {
    fn as_node(&mut self) -> Node<'_> {
        Node::WindowSpec(self)
    }

    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow {
        accept_opt(&mut self.partition_by, v)?;
        accept_opt(&mut self.order_by, v)?;
        accept_opt(&mut self.frame, v)
    }
}

impl Accept for PartitionByClause {
    fn as_node(&mut self) -> Node<'_> {
        Node::PartitionByClause(self)
    }

    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow {
        accept_each(&mut self.items, v)
    }
}

impl Accept for FrameClause {
    fn as_node(&mut self) -> Node<'_> {
        Node::FrameClause(self)
    }

    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow {
        accept_opt(&mut self.start.expr, v)?;
        accept_opt(&mut self.end.expr, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expression::ColumnName;
    use crate::restore::{restore_sql, RestoreFlags};

    fn col(name: &str) -> ExprNode {
        ExprNode::column(ColumnName::new(name))
    }

    #[test]
    fn test_restore_function_call() {
        let call = FuncCallExpr {
            fn_name: "concat".to_owned(),
            args: vec![col("a"), col("b")],
            text: None,
        };
        assert_eq!(
            restore_sql(&call, RestoreFlags::DEFAULT).unwrap(),
            "CONCAT(`a`, `b`)"
        );
    }

    #[test]
    fn test_restore_casts() {
        let mut cast = FuncCastExpr {
            expr: Box::new(col("a")),
            tp: CastType::Unsigned,
            function_type: CastFunctionType::Cast,
            text: None,
        };
        assert_eq!(
            restore_sql(&cast, RestoreFlags::DEFAULT).unwrap(),
            "CAST(`a` AS UNSIGNED)"
        );
        cast.function_type = CastFunctionType::Convert;
        assert_eq!(
            restore_sql(&cast, RestoreFlags::DEFAULT).unwrap(),
            "CONVERT(`a`, UNSIGNED)"
        );
    }

    #[test]
    fn test_restore_window_spec() {
        let spec = WindowSpec {
            reference: Some("w".to_owned()),
            frame: Some(FrameClause {
                tp: FrameType::Rows,
                start: FrameBound {
                    kind: BoundType::Preceding,
                    unbounded: true,
                    expr: None,
                },
                end: FrameBound::current_row(),
                text: None,
            }),
            ..WindowSpec::default()
        };
        let func = WindowFuncExpr {
            f: "row_number".to_owned(),
            args: Vec::new(),
            distinct: false,
            ignore_null: false,
            from_last: false,
            spec,
            text: None,
        };
        assert_eq!(
            restore_sql(&func, RestoreFlags::DEFAULT).unwrap(),
            "ROW_NUMBER() OVER (`w` ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)"
        );
    }

    #[test]
    fn test_restore_named_window_reference() {
        let spec = WindowSpec {
            name: Some("w".to_owned()),
            only_alias: true,
            ..WindowSpec::default()
        };
        assert_eq!(restore_sql(&spec, RestoreFlags::DEFAULT).unwrap(), "`w`");
    }
}
