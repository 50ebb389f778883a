//! Value expressions supplied by an external value implementation.
//!
//! The syntax tree never fixes how literal values are represented. The
//! grammar hands each literal to a [`ValueFactory`] given to the parser at
//! construction time, and stores whatever [`ValueExpr`] it returns.

use std::any::Any;
use std::fmt;

use crate::restore::Restore;

/// A literal as written in SQL text, before any value conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `NULL`
    Null,
    /// `TRUE` / `FALSE`
    Bool(bool),
    /// Integer that fits `i64`.
    Int(i64),
    /// Integer above `i64::MAX` that fits `u64`.
    Uint(u64),
    /// Fixed-point number, kept as its source digits.
    Decimal(String),
    /// Floating-point number.
    Float(f64),
    /// String literal, unescaped.
    String(String),
    /// Hexadecimal literal bytes.
    Hex(Vec<u8>),
    /// Bit literal bytes, big-endian.
    Bit(Vec<u8>),
}

/// A value expression node.
pub trait ValueExpr: Restore + fmt::Debug + Send + Sync {
    /// Returns the value rendered for display, without SQL quoting.
    fn datum_string(&self) -> String;

    /// Returns a boxed copy.
    fn clone_value(&self) -> Box<dyn ValueExpr>;

    /// Returns `self` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Structural equality against another value of any type.
    fn eq_value(&self, other: &dyn Any) -> bool;

    /// Returns the cached source text.
    fn text(&self) -> Option<&str>;

    /// Replaces the cached source text.
    fn set_text(&mut self, text: Option<String>);
}

/// A `?` placeholder in a prepared statement.
pub trait ParamMarkerExpr: ValueExpr {
    /// Byte offset of the `?` in the statement text.
    fn offset(&self) -> usize;

    /// Zero-based position among the statement's markers.
    fn order(&self) -> usize;

    /// Sets the position among the statement's markers.
    fn set_order(&mut self, order: usize);

    /// Returns a boxed copy.
    fn clone_marker(&self) -> Box<dyn ParamMarkerExpr>;
}

/// Builds value nodes for the grammar.
pub trait ValueFactory: Send + Sync {
    /// Builds a value node for a literal.
    fn value_expr(&self, literal: Literal) -> Box<dyn ValueExpr>;

    /// Builds a parameter marker found at byte `offset`.
    fn param_marker(&self, offset: usize) -> Box<dyn ParamMarkerExpr>;
}

impl PartialEq for dyn ValueExpr {
    fn eq(&self, other: &Self) -> bool {
        self.eq_value(other.as_any())
    }
}

impl PartialEq for dyn ParamMarkerExpr {
    fn eq(&self, other: &Self) -> bool {
        self.eq_value(other.as_any())
    }
}

impl Clone for Box<dyn ValueExpr> {
    fn clone(&self) -> Self {
        self.clone_value()
    }
}

impl Clone for Box<dyn ParamMarkerExpr> {
    fn clone(&self) -> Self {
        self.clone_marker()
    }
}
