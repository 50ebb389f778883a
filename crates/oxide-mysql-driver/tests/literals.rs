//! The parser hands each literal to the driver factory.

use std::sync::Arc;

use oxide_mysql_driver::{Datum, DatumExpr, DriverFactory, ParamMarker};
use oxide_mysql_parser::ast::{ExprNode, ParamMarkerExpr};
use oxide_mysql_parser::{Parser, StmtNode};

fn select_values(sql: &str) -> Vec<ExprNode> {
    let parser = Parser::new(Arc::new(DriverFactory));
    let stmt = parser
        .parse_one(sql, "", "")
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"));
    let StmtNode::Select(select) = stmt else {
        panic!("Expected SELECT: {sql}");
    };
    select
        .fields
        .fields
        .into_iter()
        .filter_map(|field| field.expr.map(|e| *e))
        .collect()
}

fn datum(expr: &ExprNode) -> &Datum {
    let ExprNode::Value(value) = expr else {
        panic!("Expected value, got {expr:?}");
    };
    &value
        .as_any()
        .downcast_ref::<DatumExpr>()
        .expect("value built by DriverFactory")
        .datum
}

#[test]
fn literal_kinds() {
    let values = select_values(
        "select null, true, 42, 18446744073709551615, 18446744073709551616, 1.50, 2e3, 'x', x'0f', b'11'",
    );
    let datums: Vec<&Datum> = values.iter().map(datum).collect();
    assert_eq!(
        datums,
        [
            &Datum::Null,
            &Datum::Bool(true),
            &Datum::Int(42),
            &Datum::Uint(u64::MAX),
            &Datum::Decimal("18446744073709551616".to_owned()),
            &Datum::Decimal("1.50".to_owned()),
            &Datum::Float(2000.0),
            &Datum::String("x".to_owned()),
            &Datum::Hex(vec![0x0f]),
            &Datum::Bit(vec![3]),
        ]
    );
}

#[test]
fn value_text_is_the_source() {
    let values = select_values("select 'a' 'b', 0x0F");
    assert_eq!(datum(&values[0]), &Datum::String("ab".to_owned()));
    let ExprNode::Value(hex) = &values[1] else {
        panic!("Expected value");
    };
    assert_eq!(hex.text(), Some("0x0F"));
    assert_eq!(hex.datum_string(), "0x0f");
}

#[test]
fn markers_are_numbered() {
    let values = select_values("select ?, 1, ?");
    let markers: Vec<(usize, usize)> = values
        .iter()
        .filter_map(|expr| match expr {
            ExprNode::ParamMarker(marker) => Some((marker.offset(), marker.order())),
            _ => None,
        })
        .collect();
    assert_eq!(markers, [(7, 0), (13, 1)]);

    let ExprNode::ParamMarker(first) = &values[0] else {
        panic!("Expected marker");
    };
    assert!(first.as_any().downcast_ref::<ParamMarker>().is_some());
}
