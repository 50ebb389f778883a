//! Statement digests.
//!
//! A digest identifies statements that differ only in their literal
//! values. [`Digester::digest_text`] normalizes a statement: each literal
//! becomes `?`, literal lists collapse to `...`, hints and comments vanish,
//! and the remaining tokens are lower-cased and joined by single spaces.
//! [`Digester::digest_hash`] is the lower-case hex SHA-256 of that text.
//!
//! ```
//! use oxide_mysql_parser::digest::digest_text;
//!
//! assert_eq!(
//!     digest_text("select 1 from b where id in (1, 3, '3')"),
//!     "select ? from b where id in ( ... )"
//! );
//! ```

mod pool;

pub use pool::{DigesterPool, PooledDigester};

use sha2::{Digest, Sha256};

use crate::lexer::{Charset, Scanner, TokenKind};
use crate::mode::SqlMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Token(TokenKind),
    /// A replaced literal.
    Param,
    /// A replaced literal list.
    ParamList,
}

#[derive(Debug, Clone)]
struct DigestToken {
    kind: Kind,
    lit: String,
}

impl DigestToken {
    fn is(&self, lit: &str) -> bool {
        self.lit == lit
    }
}

/// Reusable digest state: a scanner, a token buffer and a hasher.
#[derive(Debug, Clone, Default)]
pub struct Digester {
    scanner: Scanner,
    tokens: Vec<DigestToken>,
    buffer: String,
    hasher: Sha256,
}

impl Digester {
    /// Creates a digester scanning with `mode`.
    #[must_use]
    pub fn new(mode: SqlMode) -> Self {
        Self {
            scanner: Scanner::new(Charset::default(), mode),
            ..Self::default()
        }
    }

    /// Changes the SQL mode used for later statements.
    pub fn set_mode(&mut self, mode: SqlMode) {
        self.scanner.set_mode(mode);
    }

    /// Returns the normalized text of `sql`.
    pub fn digest_text(&mut self, sql: &str) -> String {
        self.normalize(sql);
        let text = self.buffer.clone();
        self.buffer.clear();
        text
    }

    /// Returns the hex SHA-256 of the normalized text of `sql`.
    pub fn digest_hash(&mut self, sql: &str) -> String {
        self.normalize(sql);
        self.hasher.update(self.buffer.as_bytes());
        self.buffer.clear();
        format!("{:x}", self.hasher.finalize_reset())
    }

    fn normalize(&mut self, sql: &str) {
        self.scanner.reset(sql.as_bytes());
        loop {
            let token = self.scanner.next_token();
            match token.kind {
                TokenKind::Eof => break,
                TokenKind::HintEnd => {
                    self.reduce_hint();
                    continue;
                }
                _ => {}
            }
            let mut current = DigestToken {
                kind: Kind::Token(token.kind),
                lit: token.lit.to_lowercase(),
            };
            if is_lit(&current) {
                current = self.reduce_lit(current);
            }
            self.tokens.push(current);
        }
        self.scanner.reset(b"");
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                self.buffer.push(' ');
            }
            self.buffer.push_str(&token.lit);
        }
        self.tokens.clear();
    }

    /// Drops everything back to and including the hint start.
    fn reduce_hint(&mut self) {
        while let Some(token) = self.tokens.pop() {
            if token.kind == Kind::Token(TokenKind::HintBegin) {
                return;
            }
        }
    }

    fn reduce_lit(&mut self, mut current: DigestToken) -> DigestToken {
        // count(*) => count(?)
        if current.is("*") {
            if self.back(1).is_some_and(|last| last[0].is("(")) {
                return param();
            }
            return current;
        }

        // -1 => 1
        if self.is_prefixed_by_unary(current.kind) {
            self.tokens.pop();
        }

        // ?, ?, ? => ...
        if self
            .back(2)
            .is_some_and(|last| last[1].is(",") && matches!(last[0].kind, Kind::Param | Kind::ParamList))
        {
            self.tokens.truncate(self.tokens.len() - 2);
            current.kind = Kind::ParamList;
            current.lit = "...".to_owned();
            return current;
        }

        // order by 1 keeps its ordinal
        if current.kind == Kind::Token(TokenKind::IntLit) && self.is_order_or_group_by() {
            return current;
        }

        param()
    }

    fn back(&self, n: usize) -> Option<&[DigestToken]> {
        let len = self.tokens.len();
        (len >= n).then(|| &self.tokens[len - n..])
    }

    fn is_prefixed_by_unary(&self, kind: Kind) -> bool {
        if !is_num_lit(kind) {
            return false;
        }
        let Some(last) = self.back(1) else {
            return false;
        };
        if !last[0].is("-") && !last[0].is("+") {
            return false;
        }
        let Some(last2) = self.back(2) else {
            return true;
        };
        matches!(
            last2[0].lit.as_str(),
            "(" | "," | "+" | "-" | ">=" | "is" | "<=" | "=" | "<" | ">" | "select"
        )
    }

    fn is_order_or_group_by(&self) -> bool {
        // Skip an ordinal list: "order by 1, 2, 3".
        let mut n = 2;
        let mut last = loop {
            let Some(last) = self.back(n) else {
                return false;
            };
            if !last[1].is(",") {
                break last;
            }
            n += 2;
        };
        // "group by (1, 2)"
        if last[1].is("(") {
            match self.back(n + 1) {
                Some(wider) => last = wider,
                None => return false,
            }
        }
        (last[0].is("order") || last[0].is("group")) && last[1].is("by")
    }
}

fn param() -> DigestToken {
    DigestToken {
        kind: Kind::Param,
        lit: "?".to_owned(),
    }
}

const fn is_num_lit(kind: Kind) -> bool {
    matches!(
        kind,
        Kind::Token(TokenKind::IntLit | TokenKind::DecLit | TokenKind::FloatLit | TokenKind::HexLit)
    )
}

fn is_lit(token: &DigestToken) -> bool {
    is_num_lit(token.kind)
        || matches!(token.kind, Kind::Token(TokenKind::StringLit | TokenKind::BitLit))
        || token.is("*")
}

/// Returns the normalized text of `sql`.
///
/// Each call builds a fresh [`Digester`]; use a [`DigesterPool`] to reuse
/// them.
#[must_use]
pub fn digest_text(sql: &str) -> String {
    Digester::default().digest_text(sql)
}

/// Returns the hex SHA-256 digest of `sql`.
#[must_use]
pub fn digest_hash(sql: &str) -> String {
    Digester::default().digest_hash(sql)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_text() {
        let cases = [
            ("SELECT 1", "select ?"),
            ("select * from b where id = 1", "select * from b where id = ?"),
            (
                "select 1 from b where id in (1, 3, '3', 1, 2, 3, 4)",
                "select ? from b where id in ( ... )",
            ),
            (
                "select 1 from b where id in (1, a, 4)",
                "select ? from b where id in ( ? , a , ? )",
            ),
            ("select 1 from b order by 2", "select ? from b order by 2"),
            ("select /*+ a hint */ 1", "select ?"),
            ("select count(*) from t", "select count ( ? ) from t"),
            ("select a from t group by 1, 2", "select a from t group by 1 , 2"),
            ("select a from t group by (1, 2)", "select a from t group by ( 1 , 2 )"),
            ("select * from t where a = -1", "select * from t where a = ?"),
            ("select a - 1 from t", "select a - ? from t"),
            ("select x'1f', b'01', 0x1, 1.5e3", "select ..."),
        ];
        let mut digester = Digester::default();
        for (sql, expected) in cases {
            assert_eq!(digester.digest_text(sql), expected, "sql: {sql}");
        }
    }

    #[test]
    fn test_comments_are_not_part_of_the_digest() {
        assert_eq!(
            digest_text("select /* note */ a -- trailing\n from t # more"),
            "select a from t"
        );
    }

    #[test]
    fn test_hash_equal_for_same_shape() {
        let groups: [&[&str]; 3] = [
            &[
                "select * from b where id = 1",
                "select * from b where id = '1'",
                "select * from b where id =2",
            ],
            &[
                "select 2 from b, c where b.id = c.id where c.id > 1",
                "select 4 from b, c where b.id = c.id where c.id > 23",
            ],
            &["Select 3", "select 1"],
        ];
        for group in groups {
            let first = digest_hash(group[0]);
            for sql in &group[1..] {
                assert_eq!(digest_hash(sql), first, "sql: {sql}");
            }
        }
    }

    #[test]
    fn test_hash_differs_for_different_shape() {
        let sqls = [
            "select * from b where id = 1",
            "select a from b where id = 1",
            "select * from d where bid =1",
        ];
        let hashes: Vec<String> = sqls.iter().map(|sql| digest_hash(sql)).collect();
        assert_ne!(hashes[0], hashes[1]);
        assert_ne!(hashes[0], hashes[2]);
        assert_ne!(hashes[1], hashes[2]);
    }

    #[test]
    fn test_hash_is_sha256_of_text() {
        let hash = digest_hash("select 1");
        assert_eq!(hash.len(), 64);
        let expected = format!("{:x}", Sha256::digest(b"select ?"));
        assert_eq!(hash, expected);
    }

    #[test]
    fn test_ansi_quotes_mode() {
        let mut digester = Digester::new(SqlMode::ANSI_QUOTES);
        assert_eq!(digester.digest_text("select \"a\" from t"), "select a from t");
        digester.set_mode(SqlMode::NONE);
        assert_eq!(digester.digest_text("select \"a\" from t"), "select ? from t");
    }
}
