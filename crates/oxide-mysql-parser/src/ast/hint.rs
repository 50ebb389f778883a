//! Optimizer hints written as `/*+ ... */` after a statement keyword.

use super::node::{impl_has_text, Node};
use super::visitor::{Accept, Flow, Visitor};
use crate::restore::{Restore, RestoreCtx, Result};

/// A table named in a hint: `[db.]table[@qb]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HintTable {
    /// Schema.
    pub db_name: Option<String>,
    /// Table.
    pub table_name: String,
    /// Query block the table belongs to.
    pub qb_name: Option<String>,
}

impl Restore for HintTable {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        if let Some(db) = &self.db_name {
            ctx.write_name(db)?;
            ctx.write_plain(".")?;
        }
        ctx.write_name(&self.table_name)?;
        if let Some(qb) = &self.qb_name {
            ctx.write_plain("@")?;
            ctx.write_name(qb)?;
        }
        Ok(())
    }
}

/// Hint argument beyond tables and indexes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HintData {
    /// No argument.
    #[default]
    None,
    /// `MAX_EXECUTION_TIME(n)`
    Uint(u64),
    /// `MEMORY_QUOTA(n MB)`, in bytes.
    MemoryQuota(i64),
    /// `USE_TOJA(TRUE)`
    Bool(bool),
    /// Storage engine of `READ_FROM_STORAGE`, upper case.
    Store(String),
}

/// One optimizer hint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableOptimizerHint {
    /// Hint name, lower case.
    pub hint_name: String,
    /// Query block the hint applies to, or the name given by `QB_NAME`.
    pub qb_name: Option<String>,
    /// Tables.
    pub tables: Vec<HintTable>,
    /// Indexes of index hints.
    pub indexes: Vec<String>,
    /// Extra argument.
    pub data: HintData,
    /// Cached source text.
    pub text: Option<String>,
}

impl_has_text!(TableOptimizerHint);

const BYTES_PER_MB: i64 = 1024 * 1024;

impl TableOptimizerHint {
    fn restore_tables(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        for (i, table) in self.tables.iter().enumerate() {
            if i > 0 {
                ctx.write_plain(", ")?;
            }
            table.restore(ctx)?;
        }
        Ok(())
    }
}

impl Restore for TableOptimizerHint {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword(&self.hint_name)?;
        ctx.write_plain("(")?;
        if let Some(qb) = &self.qb_name {
            if self.hint_name == "qb_name" {
                ctx.write_name(qb)?;
                return ctx.write_plain(")");
            }
            ctx.write_plain("@")?;
            ctx.write_name(qb)?;
            if !self.tables.is_empty() || self.data != HintData::None {
                ctx.write_plain(" ")?;
            }
        }
        match &self.data {
            HintData::None => {
                self.restore_tables(ctx)?;
                if !self.indexes.is_empty() {
                    ctx.write_plain(" ")?;
                    ctx.write_names(&self.indexes, ", ")?;
                }
            }
            HintData::Uint(n) => ctx.write_fmt_plain(format_args!("{n}"))?,
            HintData::MemoryQuota(bytes) => {
                ctx.write_fmt_plain(format_args!("{} ", bytes / BYTES_PER_MB))?;
                ctx.write_keyword("MB")?;
            }
            HintData::Bool(b) => ctx.write_keyword(if *b { "TRUE" } else { "FALSE" })?,
            HintData::Store(store) => {
                ctx.write_keyword(store)?;
                ctx.write_plain("[")?;
                self.restore_tables(ctx)?;
                ctx.write_plain("]")?;
            }
        }
        ctx.write_plain(")")
    }
}

impl Accept for TableOptimizerHint {
    fn as_node(&mut self) -> Node<'_> {
        Node::TableOptimizerHint(self)
    }

    fn accept_children(&mut self, _: &mut dyn Visitor) -> Flow {
        Flow::Continue(())
    }
}

/// Restores a hint list as `/*+ H1(...) H2(...)*/ `.
pub(crate) fn restore_hints(hints: &[TableOptimizerHint], ctx: &mut RestoreCtx<'_>) -> Result<()> {
    if hints.is_empty() {
        return Ok(());
    }
    ctx.write_plain("/*+ ")?;
    ctx.write_list(hints, " ")?;
    ctx.write_plain("*/ ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::restore::{restore_sql, RestoreFlags};

    fn table(name: &str) -> HintTable {
        HintTable {
            table_name: name.to_owned(),
            ..HintTable::default()
        }
    }

    fn sql(hint: &TableOptimizerHint) -> String {
        restore_sql(hint, RestoreFlags::DEFAULT).unwrap()
    }

    #[test]
    fn test_restore_join_hint() {
        let hint = TableOptimizerHint {
            hint_name: "hash_join".to_owned(),
            qb_name: Some("sel_1".to_owned()),
            tables: vec![table("t1"), table("t2")],
            ..TableOptimizerHint::default()
        };
        assert_eq!(sql(&hint), "HASH_JOIN(@`sel_1` `t1`, `t2`)");
    }

    #[test]
    fn test_restore_index_hint() {
        let hint = TableOptimizerHint {
            hint_name: "use_index".to_owned(),
            tables: vec![table("t")],
            indexes: vec!["a".to_owned(), "b".to_owned()],
            ..TableOptimizerHint::default()
        };
        assert_eq!(sql(&hint), "USE_INDEX(`t` `a`, `b`)");
    }

    #[test]
    fn test_restore_data_hints() {
        let quota = TableOptimizerHint {
            hint_name: "memory_quota".to_owned(),
            data: HintData::MemoryQuota(1024 * 1024 * 1024),
            ..TableOptimizerHint::default()
        };
        assert_eq!(sql(&quota), "MEMORY_QUOTA(1024 MB)");

        let store = TableOptimizerHint {
            hint_name: "read_from_storage".to_owned(),
            tables: vec![table("t")],
            data: HintData::Store("TIFLASH".to_owned()),
            ..TableOptimizerHint::default()
        };
        assert_eq!(sql(&store), "READ_FROM_STORAGE(TIFLASH[`t`])");

        let qb = TableOptimizerHint {
            hint_name: "qb_name".to_owned(),
            qb_name: Some("q".to_owned()),
            ..TableOptimizerHint::default()
        };
        assert_eq!(sql(&qb), "QB_NAME(`q`)");
    }

    #[test]
    fn test_restore_hint_list() {
        let hints = vec![
            TableOptimizerHint {
                hint_name: "hash_agg".to_owned(),
                ..TableOptimizerHint::default()
            },
            TableOptimizerHint {
                hint_name: "max_execution_time".to_owned(),
                data: HintData::Uint(1000),
                ..TableOptimizerHint::default()
            },
        ];
        let mut out = String::new();
        let mut ctx = RestoreCtx::new(RestoreFlags::DEFAULT, &mut out);
        restore_hints(&hints, &mut ctx).unwrap();
        assert_eq!(out, "/*+ HASH_AGG() MAX_EXECUTION_TIME(1000)*/ ");
    }
}
