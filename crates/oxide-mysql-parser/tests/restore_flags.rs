//! Output of the restore flag combinations.

mod common;
use common::*;
use oxide_mysql_parser::restore::{restore_sql, Restore, RestoreCtx, RestoreError, RestoreFlags};

/// Writes one keyword, one string and one name.
struct Sample;

impl Restore for Sample {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<(), RestoreError> {
        ctx.write_keyword("Select")?;
        ctx.write_plain(" ")?;
        ctx.write_string("it's a\\b")?;
        ctx.write_plain(" ")?;
        ctx.write_name("Ab`c")
    }
}

fn sample(flags: RestoreFlags) -> String {
    restore_sql(&Sample, flags).unwrap()
}

#[test]
fn flag_matrix() {
    use RestoreFlags as F;
    let cases = [
        (F::NONE, "Select it's a\\b Ab`c"),
        (F::KEYWORD_UPPERCASE, "SELECT it's a\\b Ab`c"),
        (F::KEYWORD_LOWERCASE, "select it's a\\b Ab`c"),
        (F::STRING_SINGLE_QUOTES, "Select 'it''s a\\b' Ab`c"),
        (F::STRING_DOUBLE_QUOTES, "Select \"it's a\\b\" Ab`c"),
        (F::STRING_ESCAPE_BACKSLASH, "Select it's a\\\\b Ab`c"),
        (
            F::STRING_SINGLE_QUOTES.union(F::STRING_ESCAPE_BACKSLASH),
            "Select 'it''s a\\\\b' Ab`c",
        ),
        (F::NAME_UPPERCASE, "Select it's a\\b AB`C"),
        (F::NAME_LOWERCASE, "Select it's a\\b ab`c"),
        (F::NAME_BACK_QUOTES, "Select it's a\\b `Ab``c`"),
        (F::NAME_DOUBLE_QUOTES, "Select it's a\\b \"Ab`c\""),
        (
            F::NAME_LOWERCASE.union(F::NAME_BACK_QUOTES),
            "Select it's a\\b `ab``c`",
        ),
        (F::DEFAULT, "SELECT 'it''s a\\\\b' `Ab``c`"),
    ];
    for (flags, expected) in cases {
        assert_eq!(sample(flags), expected, "flags: {flags:?}");
    }
}

#[test]
fn earlier_flags_win() {
    use RestoreFlags as F;
    let both_keyword = F::KEYWORD_UPPERCASE.union(F::KEYWORD_LOWERCASE);
    assert!(sample(both_keyword).starts_with("SELECT "));
    let both_quotes = F::STRING_SINGLE_QUOTES.union(F::STRING_DOUBLE_QUOTES);
    assert!(sample(both_quotes).contains("'it''s a\\b'"));
    let both_names = F::NAME_DOUBLE_QUOTES.union(F::NAME_BACK_QUOTES);
    assert!(sample(both_names).ends_with("\"Ab`c\""));
}

struct Names(&'static [&'static str]);

impl Restore for Names {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<(), RestoreError> {
        ctx.write_names(self.0, ", ")
    }
}

#[test]
fn name_escaping() {
    let flags = RestoreFlags::DEFAULT;
    assert_eq!(restore_sql(&Names(&["ab`c"]), flags).unwrap(), "`ab``c`");
    assert_eq!(restore_sql(&Names(&[""]), flags).unwrap(), "``");
    assert_eq!(restore_sql(&Names(&["a", "b"]), flags).unwrap(), "`a`, `b`");
}

#[test]
fn statements_under_other_flags() {
    let stmt = parse("select a, 'x' from t where b = 1");
    let flags = RestoreFlags::KEYWORD_LOWERCASE
        .union(RestoreFlags::STRING_DOUBLE_QUOTES)
        .union(RestoreFlags::NAME_DOUBLE_QUOTES)
        .union(RestoreFlags::SPACES_AROUND_BINARY_OPERATION);
    assert_eq!(
        restore_sql(&stmt, flags).unwrap(),
        "select \"a\", \"x\" from \"t\" where \"b\" = 1"
    );
}

#[test]
fn max_value_is_not_restorable() {
    use oxide_mysql_parser::ast::{ExprNode, MaxValueExpr};

    let expr = ExprNode::MaxValue(MaxValueExpr::default());
    assert!(matches!(
        restore_sql(&expr, RestoreFlags::DEFAULT),
        Err(RestoreError::NotImplemented(_))
    ));
}

/// A sink that refuses every write.
struct Broken;

impl std::fmt::Write for Broken {
    fn write_str(&mut self, _: &str) -> std::fmt::Result {
        Err(std::fmt::Error)
    }
}

#[test]
fn sink_errors_propagate() {
    let stmt = parse("select 1");
    let mut sink = Broken;
    let mut ctx = RestoreCtx::new(RestoreFlags::DEFAULT, &mut sink);
    assert!(matches!(stmt.restore(&mut ctx), Err(RestoreError::Write(_))));
}
