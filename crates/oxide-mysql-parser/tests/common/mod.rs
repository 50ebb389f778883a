#![allow(dead_code)]

use std::sync::Arc;

use oxide_mysql_driver::DriverFactory;
use oxide_mysql_parser::ast::{self, SelectStmt};
use oxide_mysql_parser::{restore_sql, ParseError, Parser, ParserConfig, RestoreFlags, StmtNode};

pub fn parser() -> Parser {
    Parser::new(Arc::new(DriverFactory))
}

pub fn parser_with(config: ParserConfig) -> Parser {
    Parser::with_config(config, Arc::new(DriverFactory))
}

pub fn parse(sql: &str) -> StmtNode {
    parser()
        .parse_one(sql, "", "")
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    parser()
        .parse(sql, "", "")
        .expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_select(sql: &str) -> SelectStmt {
    match parse(sql) {
        StmtNode::Select(s) => *s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

/// Restores with the default flags.
pub fn restore(stmt: &StmtNode) -> String {
    restore_sql(stmt, RestoreFlags::DEFAULT)
        .unwrap_or_else(|e| panic!("Failed to restore {stmt:?}\nError: {e}"))
}

/// Parses then restores with the default flags.
pub fn restored(sql: &str) -> String {
    restore(&parse(sql))
}

/// Returns `stmt` without cached source text, for structural comparison.
pub fn clean_text(mut stmt: StmtNode) -> StmtNode {
    ast::clean_text(&mut stmt);
    stmt
}

/// Verifies that restore produces a fixed point: the restored SQL parses
/// to the same tree and restores to the same string again.
pub fn round_trip(sql: &str) {
    let ast1 = parse(sql);
    let rendered1 = restore(&ast1);
    let ast2 = parse(&rendered1);
    let rendered2 = restore(&ast2);
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
    assert_eq!(
        clean_text(ast1),
        clean_text(ast2),
        "Trees differ after round-trip.\n  Input:    {sql}\n  Restored: {rendered1}"
    );
}
