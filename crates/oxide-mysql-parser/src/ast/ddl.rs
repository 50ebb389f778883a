//! Data definition statements.

use super::dml::TableName;
use super::expression::{ColumnName, ExprNode};
use super::node::{impl_has_text, Node};
use super::types::DataType;
use super::visitor::{accept_each, accept_opt, Accept, Flow, Visitor};
use crate::restore::{Restore, RestoreCtx, Result};

/// Referential action of a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferOption {
    /// `RESTRICT`
    Restrict,
    /// `CASCADE`
    Cascade,
    /// `SET NULL`
    SetNull,
    /// `NO ACTION`
    NoAction,
    /// `SET DEFAULT`
    SetDefault,
}

impl ReferOption {
    /// Returns the SQL spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::NoAction => "NO ACTION",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// A column of an index or a foreign key, with an optional prefix length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexColName {
    /// Column.
    pub column: ColumnName,
    /// Prefix length.
    pub length: Option<u32>,
    /// Cached source text.
    pub text: Option<String>,
}

impl Restore for IndexColName {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        self.column.restore(ctx)?;
        if let Some(length) = self.length {
            ctx.write_fmt_plain(format_args!("({length})"))?;
        }
        Ok(())
    }
}

impl Accept for IndexColName {
    fn as_node(&mut self) -> Node<'_> {
        Node::IndexColName(self)
    }

    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow {
        self.column.accept(v)
    }
}

/// `REFERENCES t (cols) [ON DELETE opt] [ON UPDATE opt]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDef {
    /// Referenced table.
    pub table: TableName,
    /// Referenced columns.
    pub cols: Vec<IndexColName>,
    /// `ON DELETE`
    pub on_delete: Option<ReferOption>,
    /// `ON UPDATE`
    pub on_update: Option<ReferOption>,
    /// Cached source text.
    pub text: Option<String>,
}

impl Restore for ReferenceDef {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword("REFERENCES ")?;
        self.table.restore(ctx)?;
        ctx.write_plain("(")?;
        ctx.write_list(&self.cols, ", ")?;
        ctx.write_plain(")")?;
        if let Some(opt) = self.on_delete {
            ctx.write_keyword(" ON DELETE ")?;
            ctx.write_keyword(opt.as_str())?;
        }
        if let Some(opt) = self.on_update {
            ctx.write_keyword(" ON UPDATE ")?;
            ctx.write_keyword(opt.as_str())?;
        }
        Ok(())
    }
}

impl Accept for ReferenceDef {
    fn as_node(&mut self) -> Node<'_> {
        Node::ReferenceDef(self)
    }

    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow {
        self.table.accept(v)?;
        accept_each(&mut self.cols, v)
    }
}

/// One attribute of a column definition.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnOptionKind {
    /// `NOT NULL`
    NotNull,
    /// `NULL`
    Null,
    /// `DEFAULT expr`
    Default(Box<ExprNode>),
    /// `AUTO_INCREMENT`
    AutoIncrement,
    /// `PRIMARY KEY`
    PrimaryKey,
    /// `UNIQUE [KEY]`
    UniqueKey,
    /// `COMMENT 'text'`
    Comment(String),
    /// `ON UPDATE expr`
    OnUpdate(Box<ExprNode>),
    /// `[GENERATED ALWAYS] AS (expr) [STORED|VIRTUAL]`
    Generated {
        /// Generating expression.
        expr: Box<ExprNode>,
        /// `STORED` rather than `VIRTUAL`.
        stored: bool,
    },
    /// `REFERENCES ...`
    References(ReferenceDef),
    /// `COLLATE name`
    Collate(String),
}

/// A column option node.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnOption {
    /// The option.
    pub kind: ColumnOptionKind,
    /// Cached source text.
    pub text: Option<String>,
}

impl ColumnOption {
    /// Wraps an option kind.
    #[must_use]
    pub const fn new(kind: ColumnOptionKind) -> Self {
        Self { kind, text: None }
    }
}

impl Restore for ColumnOption {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        match &self.kind {
            ColumnOptionKind::NotNull => ctx.write_keyword("NOT NULL"),
            ColumnOptionKind::Null => ctx.write_keyword("NULL"),
            ColumnOptionKind::Default(expr) => {
                ctx.write_keyword("DEFAULT ")?;
                expr.restore(ctx)
            }
            ColumnOptionKind::AutoIncrement => ctx.write_keyword("AUTO_INCREMENT"),
            ColumnOptionKind::PrimaryKey => ctx.write_keyword("PRIMARY KEY"),
            ColumnOptionKind::UniqueKey => ctx.write_keyword("UNIQUE KEY"),
            ColumnOptionKind::Comment(comment) => {
                ctx.write_keyword("COMMENT ")?;
                ctx.write_string(comment)
            }
            ColumnOptionKind::OnUpdate(expr) => {
                ctx.write_keyword("ON UPDATE ")?;
                expr.restore(ctx)
            }
            ColumnOptionKind::Generated { expr, stored } => {
                ctx.write_keyword("GENERATED ALWAYS AS")?;
                ctx.write_plain("(")?;
                expr.restore(ctx)?;
                ctx.write_plain(")")?;
                ctx.write_keyword(if *stored { " STORED" } else { " VIRTUAL" })
            }
            ColumnOptionKind::References(refer) => refer.restore(ctx),
            ColumnOptionKind::Collate(collate) => {
                ctx.write_keyword("COLLATE ")?;
                ctx.write_plain(collate)
            }
        }
    }
}

impl Accept for ColumnOption {
    fn as_node(&mut self) -> Node<'_> {
        Node::ColumnOption(self)
    }

    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow {
        match &mut self.kind {
            ColumnOptionKind::Default(expr)
            | ColumnOptionKind::OnUpdate(expr)
            | ColumnOptionKind::Generated { expr, .. } => expr.accept(v),
            ColumnOptionKind::References(refer) => refer.accept(v),
            _ => Flow::Continue(()),
        }
    }
}

/// A column definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// Column name.
    pub name: ColumnName,
    /// Type.
    pub tp: DataType,
    /// Options, in declaration order.
    pub options: Vec<ColumnOption>,
    /// Cached source text.
    pub text: Option<String>,
}

impl Restore for ColumnDef {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        self.name.restore(ctx)?;
        ctx.write_plain(" ")?;
        self.tp.restore(ctx)?;
        for option in &self.options {
            ctx.write_plain(" ")?;
            option.restore(ctx)?;
        }
        Ok(())
    }
}

impl Accept for ColumnDef {
    fn as_node(&mut self) -> Node<'_> {
        Node::ColumnDef(self)
    }

    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow {
        self.name.accept(v)?;
        accept_each(&mut self.options, v)
    }
}

/// Kind of table constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintType {
    /// `PRIMARY KEY`
    PrimaryKey,
    /// `INDEX` / `KEY`
    Index,
    /// `UNIQUE [INDEX|KEY]`
    Unique,
    /// `FOREIGN KEY`
    ForeignKey,
    /// `FULLTEXT [INDEX|KEY]`
    Fulltext,
}

/// Index algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    /// `USING BTREE`
    BTree,
    /// `USING HASH`
    Hash,
}

/// Options after an index key list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndexOption {
    /// `USING BTREE|HASH`
    pub using: Option<IndexType>,
    /// `COMMENT 'text'`
    pub comment: Option<String>,
}

impl IndexOption {
    /// Returns true if no option is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.using.is_none() && self.comment.is_none()
    }
}

impl Restore for IndexOption {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        let mut sep = "";
        if let Some(using) = self.using {
            ctx.write_keyword(match using {
                IndexType::BTree => "USING BTREE",
                IndexType::Hash => "USING HASH",
            })?;
            sep = " ";
        }
        if let Some(comment) = &self.comment {
            ctx.write_plain(sep)?;
            ctx.write_keyword("COMMENT ")?;
            ctx.write_string(comment)?;
        }
        Ok(())
    }
}

/// A table constraint or index definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    /// Kind.
    pub tp: ConstraintType,
    /// Constraint or index name.
    pub name: Option<String>,
    /// Key columns.
    pub keys: Vec<IndexColName>,
    /// Reference of a foreign key.
    pub refer: Option<ReferenceDef>,
    /// Index options.
    pub option: IndexOption,
    /// Cached source text.
    pub text: Option<String>,
}

impl Restore for Constraint {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        if self.tp == ConstraintType::ForeignKey {
            ctx.write_keyword("CONSTRAINT ")?;
            if let Some(name) = &self.name {
                ctx.write_name(name)?;
                ctx.write_plain(" ")?;
            }
            ctx.write_keyword("FOREIGN KEY ")?;
        } else {
            ctx.write_keyword(match self.tp {
                ConstraintType::PrimaryKey => "PRIMARY KEY",
                ConstraintType::Index => "INDEX",
                ConstraintType::Unique => "UNIQUE KEY",
                _ => "FULLTEXT KEY",
            })?;
            if let (Some(name), false) = (&self.name, self.tp == ConstraintType::PrimaryKey) {
                ctx.write_plain(" ")?;
                ctx.write_name(name)?;
            }
        }
        ctx.write_plain("(")?;
        ctx.write_list(&self.keys, ", ")?;
        ctx.write_plain(")")?;
        if !self.option.is_empty() {
            ctx.write_plain(" ")?;
            self.option.restore(ctx)?;
        }
        if let Some(refer) = &self.refer {
            ctx.write_plain(" ")?;
            refer.restore(ctx)?;
        }
        Ok(())
    }
}

impl Accept for Constraint {
    fn as_node(&mut self) -> Node<'_> {
        Node::Constraint(self)
    }

    fn accept_children(&mut self, v: &mut dyn Visitor) -> Flow {
        accept_each(&mut self.keys, v)?;
        accept_opt(&mut self.refer, v)
    }
}

/// A table option of `CREATE TABLE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOption {
    /// `ENGINE = name`
    Engine(String),
    /// `[DEFAULT] CHARACTER SET = name`, lower case.
    Charset(String),
    /// `[DEFAULT] COLLATE = name`, lower case.
    Collate(String),
    /// `AUTO_INCREMENT = n`
    AutoIncrement(u64),
    /// `COMMENT = 'text'`
    Comment(String),
}

impl Restore for TableOption {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        match self {
            Self::Engine(engine) => {
                ctx.write_keyword("ENGINE ")?;
                ctx.write_plain("= ")?;
                ctx.write_plain(engine)
            }
            Self::Charset(charset) => {
                ctx.write_keyword("DEFAULT CHARACTER SET ")?;
                ctx.write_plain("= ")?;
                ctx.write_keyword(charset)
            }
            Self::Collate(collate) => {
                ctx.write_keyword("DEFAULT COLLATE ")?;
                ctx.write_plain("= ")?;
                ctx.write_plain(collate)
            }
            Self::AutoIncrement(n) => {
                ctx.write_keyword("AUTO_INCREMENT ")?;
                ctx.write_fmt_plain(format_args!("= {n}"))
            }
            Self::Comment(comment) => {
                ctx.write_keyword("COMMENT ")?;
                ctx.write_plain("= ")?;
                ctx.write_string(comment)
            }
        }
    }
}

/// `CREATE TABLE`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStmt {
    /// `IF NOT EXISTS`
    pub if_not_exists: bool,
    /// Created table.
    pub table: TableName,
    /// Source of `CREATE TABLE t LIKE s`.
    pub refer_table: Option<TableName>,
    /// Column definitions.
    pub cols: Vec<ColumnDef>,
    /// Constraints and indexes.
    pub constraints: Vec<Constraint>,
    /// Table options.
    pub options: Vec<TableOption>,
    /// Cached source text.
    pub text: Option<String>,
}

impl CreateTableStmt {
    pub(crate) fn accept_fields(&mut self, v: &mut dyn Visitor) -> Flow {
        self.table.accept(v)?;
        accept_opt(&mut self.refer_table, v)?;
        accept_each(&mut self.cols, v)?;
        accept_each(&mut self.constraints, v)
    }
}

impl Restore for CreateTableStmt {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword("CREATE TABLE ")?;
        if self.if_not_exists {
            ctx.write_keyword("IF NOT EXISTS ")?;
        }
        self.table.restore(ctx)?;
        if let Some(refer) = &self.refer_table {
            ctx.write_keyword(" LIKE ")?;
            return refer.restore(ctx);
        }
        ctx.write_plain(" (")?;
        ctx.write_list(&self.cols, ",")?;
        for (i, constraint) in self.constraints.iter().enumerate() {
            if i > 0 || !self.cols.is_empty() {
                ctx.write_plain(",")?;
            }
            constraint.restore(ctx)?;
        }
        ctx.write_plain(")")?;
        for option in &self.options {
            ctx.write_plain(" ")?;
            option.restore(ctx)?;
        }
        Ok(())
    }
}

/// `DROP TABLE [IF EXISTS] t, ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTableStmt {
    /// `IF EXISTS`
    pub if_exists: bool,
    /// Dropped tables.
    pub tables: Vec<TableName>,
    /// Cached source text.
    pub text: Option<String>,
}

impl DropTableStmt {
    pub(crate) fn accept_fields(&mut self, v: &mut dyn Visitor) -> Flow {
        accept_each(&mut self.tables, v)
    }
}

impl Restore for DropTableStmt {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword("DROP TABLE ")?;
        if self.if_exists {
            ctx.write_keyword("IF EXISTS ")?;
        }
        ctx.write_list(&self.tables, ", ")
    }
}

impl_has_text!(
    IndexColName,
    ReferenceDef,
    ColumnOption,
    ColumnDef,
    Constraint,
    CreateTableStmt,
    DropTableStmt,
);
