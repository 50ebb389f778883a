//! # oxide-mysql-driver
//!
//! Literal values and parameter markers for the `oxide-mysql-parser` syntax
//! tree.
//!
//! The parser hands every literal it reads to a
//! [`ValueFactory`]. [`DriverFactory`] answers with a [`DatumExpr`] holding
//! a [`Datum`], and with a [`ParamMarker`] for each `?`.
//!
//! ```rust
//! use std::sync::Arc;
//! use oxide_mysql_driver::DriverFactory;
//! use oxide_mysql_parser::{restore_sql, Parser, RestoreFlags};
//!
//! let parser = Parser::new(Arc::new(DriverFactory));
//! let stmt = parser.parse_one("select 0x0a, 'it''s', ?", "", "").unwrap();
//! assert_eq!(
//!     restore_sql(&stmt, RestoreFlags::DEFAULT).unwrap(),
//!     "SELECT x'0a', 'it''s', ?"
//! );
//! ```

use std::any::Any;
use std::fmt;

use oxide_mysql_parser::ast::{Literal, ParamMarkerExpr, ValueExpr, ValueFactory};
use oxide_mysql_parser::restore::{Restore, RestoreCtx, RestoreError, Result};

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    /// `NULL`
    Null,
    /// `TRUE` / `FALSE`
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer above `i64::MAX`.
    Uint(u64),
    /// Fixed-point number as written.
    Decimal(String),
    /// Floating-point number.
    Float(f64),
    /// Character string.
    String(String),
    /// Bytes of a hexadecimal literal.
    Hex(Vec<u8>),
    /// Bytes of a bit literal.
    Bit(Vec<u8>),
}

impl From<Literal> for Datum {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Null => Self::Null,
            Literal::Bool(b) => Self::Bool(b),
            Literal::Int(n) => Self::Int(n),
            Literal::Uint(n) => Self::Uint(n),
            Literal::Decimal(d) => Self::Decimal(d),
            Literal::Float(f) => Self::Float(f),
            Literal::String(s) => Self::String(s),
            Literal::Hex(bytes) => Self::Hex(bytes),
            Literal::Bit(bytes) => Self::Bit(bytes),
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(b) => f.write_str(if *b { "1" } else { "0" }),
            Self::Int(n) => write!(f, "{n}"),
            Self::Uint(n) => write!(f, "{n}"),
            Self::Decimal(d) => f.write_str(d),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
            Self::Hex(bytes) => {
                f.write_str("0x")?;
                bytes.iter().try_for_each(|b| write!(f, "{b:02x}"))
            }
            Self::Bit(bytes) => {
                f.write_str("0b")?;
                bytes.iter().try_for_each(|b| write!(f, "{b:08b}"))
            }
        }
    }
}

impl Restore for Datum {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        match self {
            Self::Null => ctx.write_keyword("NULL"),
            Self::Bool(b) => ctx.write_keyword(if *b { "TRUE" } else { "FALSE" }),
            Self::Int(n) => ctx.write_fmt_plain(format_args!("{n}")),
            Self::Uint(n) => ctx.write_fmt_plain(format_args!("{n}")),
            Self::Decimal(d) => ctx.write_plain(d),
            Self::Float(x) if !x.is_finite() => {
                Err(RestoreError::NotImplemented("non-finite float"))
            }
            Self::Float(x) => ctx.write_fmt_plain(format_args!("{x:e}")),
            Self::String(s) => ctx.write_string(s),
            Self::Hex(bytes) => {
                ctx.write_plain("x'")?;
                for b in bytes {
                    ctx.write_fmt_plain(format_args!("{b:02x}"))?;
                }
                ctx.write_plain("'")
            }
            Self::Bit(bytes) => {
                ctx.write_plain("b'")?;
                for b in bytes {
                    ctx.write_fmt_plain(format_args!("{b:08b}"))?;
                }
                ctx.write_plain("'")
            }
        }
    }
}

/// A value node holding a [`Datum`].
#[derive(Debug, Clone, PartialEq)]
pub struct DatumExpr {
    /// The value.
    pub datum: Datum,
    text: Option<String>,
}

impl DatumExpr {
    /// Creates a value node without source text.
    #[must_use]
    pub const fn new(datum: Datum) -> Self {
        Self { datum, text: None }
    }
}

impl Restore for DatumExpr {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        self.datum.restore(ctx)
    }
}

impl ValueExpr for DatumExpr {
    fn datum_string(&self) -> String {
        self.datum.to_string()
    }

    fn clone_value(&self) -> Box<dyn ValueExpr> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_value(&self, other: &dyn Any) -> bool {
        other
            .downcast_ref::<Self>()
            .is_some_and(|other| other.datum == self.datum)
    }

    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn set_text(&mut self, text: Option<String>) {
        self.text = text;
    }
}

/// A `?` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamMarker {
    offset: usize,
    order: usize,
    text: Option<String>,
}

impl ParamMarker {
    /// Creates the marker found at byte `offset`.
    #[must_use]
    pub const fn new(offset: usize) -> Self {
        Self {
            offset,
            order: 0,
            text: None,
        }
    }
}

impl Restore for ParamMarker {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_plain("?")
    }
}

impl ValueExpr for ParamMarker {
    fn datum_string(&self) -> String {
        "?".to_owned()
    }

    fn clone_value(&self) -> Box<dyn ValueExpr> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_value(&self, other: &dyn Any) -> bool {
        other
            .downcast_ref::<Self>()
            .is_some_and(|other| other.order == self.order)
    }

    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn set_text(&mut self, text: Option<String>) {
        self.text = text;
    }
}

impl ParamMarkerExpr for ParamMarker {
    fn offset(&self) -> usize {
        self.offset
    }

    fn order(&self) -> usize {
        self.order
    }

    fn set_order(&mut self, order: usize) {
        self.order = order;
    }

    fn clone_marker(&self) -> Box<dyn ParamMarkerExpr> {
        Box::new(self.clone())
    }
}

/// Builds [`DatumExpr`] and [`ParamMarker`] nodes for the parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriverFactory;

impl ValueFactory for DriverFactory {
    fn value_expr(&self, literal: Literal) -> Box<dyn ValueExpr> {
        Box::new(DatumExpr::new(literal.into()))
    }

    fn param_marker(&self, offset: usize) -> Box<dyn ParamMarkerExpr> {
        Box::new(ParamMarker::new(offset))
    }
}
