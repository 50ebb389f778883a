//! SQL Parser
//!
//! A hand-written recursive descent parser with Pratt expression parsing.
//! Literal values are built by the [`ValueFactory`] the parser is created
//! with, so the syntax tree never depends on a value representation.

mod ddl;
mod dml;
mod error;
mod expr;
mod hint;
#[allow(clippy::module_inception)]
mod parser;
mod pratt;
mod query;

use std::fmt;
use std::sync::Arc;

use tracing::debug;

pub use error::{codes, HintWarning, ParseError};

use crate::ast::{StmtNode, ValueFactory};
use crate::config::ParserConfig;
use crate::lexer::{Charset, Collation, TokenKind};
use parser::Grammar;

/// Result alias for parser operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Parses MySQL statements into syntax trees.
///
/// A parser is immutable once built and can be shared between threads.
///
/// ```
/// use std::sync::Arc;
/// use oxide_mysql_driver::DriverFactory;
/// use oxide_mysql_parser::Parser;
///
/// let parser = Parser::new(Arc::new(DriverFactory));
/// let (stmts, warnings) = parser.parse("select 1; select 2", "", "").unwrap();
/// assert_eq!(stmts.len(), 2);
/// assert!(warnings.is_empty());
/// ```
pub struct Parser {
    config: ParserConfig,
    factory: Arc<dyn ValueFactory>,
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Parser {
    /// Creates a parser with the default configuration.
    #[must_use]
    pub fn new(factory: Arc<dyn ValueFactory>) -> Self {
        Self::with_config(ParserConfig::default(), factory)
    }

    /// Creates a parser with the given configuration.
    #[must_use]
    pub fn with_config(config: ParserConfig, factory: Arc<dyn ValueFactory>) -> Self {
        Self { config, factory }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses every statement of `sql`.
    ///
    /// `charset` and `collation` name the client connection's character
    /// set; empty values fall back to the configured defaults. They are
    /// checked against the charset table, but `sql` is already decoded
    /// text and is always scanned as UTF-8. The first statement that fails to parse fails the call.
    /// Problems inside optimizer hints never do; they are returned as
    /// warnings.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for an unknown charset or collation, or for
    /// the first statement that is not valid SQL.
    pub fn parse(
        &self,
        sql: &str,
        charset: &str,
        collation: &str,
    ) -> Result<(Vec<StmtNode>, Vec<HintWarning>)> {
        let mut grammar = self.grammar(sql, charset, collation)?;
        let mut stmts = Vec::new();
        while let Some(stmt) = grammar.next_statement() {
            stmts.push(stmt?);
        }
        Ok((stmts, grammar.warnings))
    }

    /// Parses `sql`, which must hold exactly one statement.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if `sql` does not parse, or holds no
    /// statement or more than one.
    pub fn parse_one(&self, sql: &str, charset: &str, collation: &str) -> Result<StmtNode> {
        let mut grammar = self.grammar(sql, charset, collation)?;
        let Some(stmt) = grammar.next_statement() else {
            return Err(grammar.error());
        };
        let stmt = stmt?;
        while grammar.eat(TokenKind::Semicolon) {}
        if !grammar.check(TokenKind::Eof) {
            return Err(grammar.error());
        }
        Ok(stmt)
    }

    /// Parses every statement of `sql` on its own: a failing statement is
    /// reported in its slot and parsing resumes after the next `;`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] only for an unknown charset or collation.
    pub fn parse_each(
        &self,
        sql: &str,
        charset: &str,
        collation: &str,
    ) -> Result<(Vec<Result<StmtNode>>, Vec<HintWarning>)> {
        let mut grammar = self.grammar(sql, charset, collation)?;
        let mut results = Vec::new();
        while let Some(stmt) = grammar.next_statement() {
            results.push(stmt);
        }
        Ok((results, grammar.warnings))
    }

    fn grammar<'a>(&'a self, sql: &'a str, charset: &str, collation: &str) -> Result<Grammar<'a>> {
        self.resolve_charset(charset, collation)?;
        Ok(Grammar::new(sql, &self.config, self.factory.as_ref()))
    }

    /// Resolves a charset and collation pair.
    ///
    /// A collation alone implies its charset. With neither given the
    /// configured pair applies, then `utf8mb4`.
    fn resolve_charset(&self, charset: &str, collation: &str) -> Result<Charset> {
        let (charset, collation) = if charset.is_empty() && collation.is_empty() {
            (self.config.charset.as_str(), self.config.collation.as_str())
        } else {
            (charset, collation)
        };
        let collation = if collation.is_empty() {
            None
        } else {
            let found = Collation::lookup(collation)
                .ok_or_else(|| ParseError::UnknownCollation(collation.to_owned()))?;
            Some(found)
        };
        let resolved = if charset.is_empty() {
            collation.map_or(Charset::Utf8mb4, |c| c.charset)
        } else {
            Charset::lookup(charset).ok_or_else(|| ParseError::UnknownCharset(charset.to_owned()))?
        };
        if let Some(collation) = collation {
            if collation.charset != resolved {
                return Err(ParseError::CollationMismatch {
                    charset: resolved.name().to_owned(),
                    collation: collation.name.to_owned(),
                });
            }
        }
        debug!(charset = %resolved, "resolved client charset");
        Ok(resolved)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! A minimal value implementation for grammar tests.

    use std::any::Any;
    use std::sync::Arc;

    use super::Parser;
    use crate::ast::{Literal, ParamMarkerExpr, StmtNode, ValueExpr, ValueFactory};
    use crate::config::ParserConfig;
    use crate::restore::{Restore, RestoreCtx, Result};

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct TestValue {
        literal: Literal,
        text: Option<String>,
    }

    impl Restore for TestValue {
        fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
            match &self.literal {
                Literal::Null => ctx.write_keyword("NULL"),
                Literal::Bool(b) => ctx.write_keyword(if *b { "TRUE" } else { "FALSE" }),
                Literal::Int(n) => ctx.write_fmt_plain(format_args!("{n}")),
                Literal::Uint(n) => ctx.write_fmt_plain(format_args!("{n}")),
                Literal::Decimal(d) => ctx.write_plain(d),
                Literal::Float(f) => ctx.write_fmt_plain(format_args!("{f:e}")),
                Literal::String(s) => ctx.write_string(s),
                Literal::Hex(bytes) => {
                    ctx.write_plain("x'")?;
                    for b in bytes {
                        ctx.write_fmt_plain(format_args!("{b:02x}"))?;
                    }
                    ctx.write_plain("'")
                }
                Literal::Bit(bytes) => {
                    ctx.write_plain("b'")?;
                    for b in bytes {
                        ctx.write_fmt_plain(format_args!("{b:08b}"))?;
                    }
                    ctx.write_plain("'")
                }
            }
        }
    }

    impl ValueExpr for TestValue {
        fn datum_string(&self) -> String {
            format!("{:?}", self.literal)
        }

        fn clone_value(&self) -> Box<dyn ValueExpr> {
            Box::new(self.clone())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn eq_value(&self, other: &dyn Any) -> bool {
            other.downcast_ref::<Self>().is_some_and(|o| o.literal == self.literal)
        }

        fn text(&self) -> Option<&str> {
            self.text.as_deref()
        }

        fn set_text(&mut self, text: Option<String>) {
            self.text = text;
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) struct TestMarker {
        offset: usize,
        order: usize,
        text: Option<String>,
    }

    impl Restore for TestMarker {
        fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
            ctx.write_plain("?")
        }
    }

    impl ValueExpr for TestMarker {
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
            other.downcast_ref::<Self>().is_some_and(|o| o.order == self.order)
        }

        fn text(&self) -> Option<&str> {
            self.text.as_deref()
        }

        fn set_text(&mut self, text: Option<String>) {
            self.text = text;
        }
    }

    impl ParamMarkerExpr for TestMarker {
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

    pub(crate) struct TestFactory;

    impl ValueFactory for TestFactory {
        fn value_expr(&self, literal: Literal) -> Box<dyn ValueExpr> {
            Box::new(TestValue { literal, text: None })
        }

        fn param_marker(&self, offset: usize) -> Box<dyn ParamMarkerExpr> {
            Box::new(TestMarker {
                offset,
                order: 0,
                text: None,
            })
        }
    }

    pub(crate) fn parser() -> Parser {
        Parser::new(Arc::new(TestFactory))
    }

    pub(crate) fn parser_with(config: ParserConfig) -> Parser {
        Parser::with_config(config, Arc::new(TestFactory))
    }

    pub(crate) fn parse_one(sql: &str) -> StmtNode {
        parser().parse_one(sql, "", "").unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{parser, parser_with};
    use super::*;
    use crate::ast::HasText;

    #[test]
    fn test_parse_one_requires_a_single_statement() {
        assert!(parser().parse_one("select 1;", "", "").is_ok());
        assert!(parser().parse_one("", "", "").is_err());
        assert!(parser().parse_one(";;", "", "").is_err());
        assert!(parser().parse_one("select 1; select 2", "", "").is_err());
    }

    #[test]
    fn test_parse_each_keeps_going() {
        let (results, _) = parser()
            .parse_each("select 1; select from; select 3", "", "")
            .unwrap();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert_eq!(
            results[2].as_ref().map(|s| s.text().map(str::to_owned)),
            Ok(Some("select 3".to_owned()))
        );
    }

    #[test]
    fn test_charset_resolution() {
        let p = parser();
        assert_eq!(p.resolve_charset("", "").unwrap(), Charset::Utf8mb4);
        assert_eq!(p.resolve_charset("", "gbk_bin").unwrap(), Charset::Gbk);
        assert_eq!(p.resolve_charset("LATIN1", "").unwrap(), Charset::Latin1);
        assert!(matches!(
            p.resolve_charset("klingon", ""),
            Err(ParseError::UnknownCharset(_))
        ));
        assert!(matches!(
            p.resolve_charset("", "nope_ci"),
            Err(ParseError::UnknownCollation(_))
        ));
        assert_eq!(
            p.resolve_charset("utf8mb4", "latin1_bin").unwrap_err().code(),
            codes::COLLATION_CHARSET_MISMATCH
        );

        let configured = parser_with(ParserConfig::default().with_charset("gbk"));
        assert_eq!(configured.resolve_charset("", "").unwrap(), Charset::Gbk);
        assert_eq!(configured.resolve_charset("ascii", "").unwrap(), Charset::Ascii);
    }

    #[test]
    fn test_parser_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Parser>();
    }
}
