//! # oxide-mysql-parser
//!
//! A MySQL-dialect SQL front end.
//!
//! This crate provides:
//! - A charset-aware scanner that keeps optimizer hints visible
//! - A hand-written recursive descent parser with Pratt expression parsing
//! - A syntax tree with source text, in-place visitors and canonical restore
//! - Statement digests that identify queries differing only in literals
//!
//! The tree never fixes how literal values are represented. The parser is
//! built with a [`ValueFactory`](ast::ValueFactory) that turns each literal
//! into a value node; `oxide-mysql-driver` ships the default one.
//!
//! ## Parsing and Restoring
//!
//! ```rust
//! use std::sync::Arc;
//! use oxide_mysql_driver::DriverFactory;
//! use oxide_mysql_parser::{restore_sql, Parser, RestoreFlags};
//!
//! let parser = Parser::new(Arc::new(DriverFactory));
//! let stmt = parser.parse_one("select a, b from t where id = 1", "", "").unwrap();
//! assert_eq!(
//!     restore_sql(&stmt, RestoreFlags::DEFAULT).unwrap(),
//!     "SELECT `a`, `b` FROM `t` WHERE `id`=1"
//! );
//! ```
//!
//! ## Digests
//!
//! ```rust
//! use oxide_mysql_parser::digest::{digest_hash, digest_text};
//!
//! assert_eq!(digest_text("SELECT * FROM t WHERE a = 'x'"), "select * from t where a = ?");
//! assert_eq!(digest_hash("select 1"), digest_hash("select 2"));
//! ```

pub mod ast;
pub mod config;
pub mod digest;
pub mod lexer;
pub mod mode;
pub mod parser;
pub mod restore;

pub use ast::{is_read_only, ExprNode, HasText, ResultSetNode, StmtNode, ValueFactory, Visitor};
pub use config::ParserConfig;
pub use lexer::{scan, Charset, Token, TokenKind};
pub use mode::SqlMode;
pub use parser::{HintWarning, ParseError, Parser};
pub use restore::{restore_sql, Restore, RestoreError, RestoreFlags};
