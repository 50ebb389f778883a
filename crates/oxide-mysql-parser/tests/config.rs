//! Loading parser settings from JSON.

mod common;
use common::*;
use oxide_mysql_parser::{ParserConfig, SqlMode};

#[test]
fn deserialize_full_config() {
    let config: ParserConfig = serde_json::from_str(
        r#"{
            "sql_mode": "ANSI_QUOTES,PIPES_AS_CONCAT",
            "charset": "gbk",
            "collation": "gbk_bin",
            "enable_window_func": true
        }"#,
    )
    .unwrap();
    assert_eq!(config.sql_mode, SqlMode::ANSI_QUOTES | SqlMode::PIPES_AS_CONCAT);
    assert_eq!(config.charset, "gbk");
    assert_eq!(config.collation, "gbk_bin");
    assert!(config.enable_window_func);
}

#[test]
fn missing_fields_take_defaults() {
    let config: ParserConfig = serde_json::from_str(r#"{"sql_mode": "ansi"}"#).unwrap();
    assert!(config.sql_mode.contains(SqlMode::ANSI_QUOTES));
    assert!(config.sql_mode.contains(SqlMode::ONLY_FULL_GROUP_BY));
    assert!(config.charset.is_empty());
    assert!(!config.enable_window_func);

    let empty: ParserConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, ParserConfig::default());
}

#[test]
fn unknown_sql_mode_is_rejected() {
    let err = serde_json::from_str::<ParserConfig>(r#"{"sql_mode": "ANSI_QUOTES,NOPE"}"#)
        .unwrap_err();
    assert!(err.to_string().contains("NOPE"));
}

#[test]
fn serialize_round_trip() {
    let config = ParserConfig::default()
        .with_sql_mode(SqlMode::NO_BACKSLASH_ESCAPES | SqlMode::HIGH_NOT_PRECEDENCE)
        .with_charset("latin1")
        .with_window_func(true);
    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["sql_mode"], "NO_BACKSLASH_ESCAPES,HIGH_NOT_PRECEDENCE");
    let back: ParserConfig = serde_json::from_value(json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn loaded_config_drives_the_parser() {
    let config: ParserConfig = serde_json::from_str(
        r#"{"sql_mode": "PIPES_AS_CONCAT,ANSI_QUOTES", "charset": "latin1"}"#,
    )
    .unwrap();
    let parser = parser_with(config);
    let stmt = parser.parse_one("select \"a\" || 'b'", "", "").unwrap();
    assert_eq!(restore(&stmt), "SELECT CONCAT(`a`, 'b')");
    assert!(parser.parse_one("select 1", "latin1", "latin1_swedish_ci").is_ok());
}

#[test]
fn no_backslash_escapes_mode() {
    let parser = parser_with(ParserConfig::default().with_sql_mode(SqlMode::NO_BACKSLASH_ESCAPES));
    let stmt = parser.parse_one(r"select 'a\n'", "", "").unwrap();
    assert_eq!(restore(&stmt), r"SELECT 'a\\n'");
}

#[test]
fn high_not_precedence_mode() {
    use oxide_mysql_parser::ExprNode;

    let sql = "select not a between 1 and 2";
    let default = parse_select(sql);
    assert!(matches!(
        default.fields.fields[0].expr.as_deref(),
        Some(ExprNode::UnaryOperation(_))
    ));

    let parser = parser_with(ParserConfig::default().with_sql_mode(SqlMode::HIGH_NOT_PRECEDENCE));
    let oxide_mysql_parser::StmtNode::Select(high) = parser.parse_one(sql, "", "").unwrap() else {
        panic!("Expected SELECT");
    };
    assert!(matches!(
        high.fields.fields[0].expr.as_deref(),
        Some(ExprNode::Between(_))
    ));
}
