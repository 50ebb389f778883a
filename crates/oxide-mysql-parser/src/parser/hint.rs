//! Optimizer hints.
//!
//! A hint block never fails its statement. Each malformed or unsupported
//! hint is dropped with a [`HintWarning`] and parsing resumes at the next
//! hint in the block.

use tracing::debug;

use super::error::HintWarning;
use super::parser::{user_var_name, Grammar};
use super::Result;
use crate::ast::{HintData, HintTable, TableOptimizerHint};
use crate::lexer::{Keyword, TokenKind};

/// Join algorithm hints taking a table list.
const TABLE_HINTS: [&str; 9] = [
    "merge_join",
    "sm_join",
    "tidb_smj",
    "inl_join",
    "tidb_inlj",
    "inl_hash_join",
    "inl_merge_join",
    "hash_join",
    "tidb_hj",
];

const INDEX_HINTS: [&str; 3] = ["use_index", "ignore_index", "use_index_merge"];

const NO_ARG_HINTS: [&str; 6] = [
    "hash_agg",
    "stream_agg",
    "agg_to_cop",
    "no_index_merge",
    "read_consistent_replica",
    "use_plan_cache",
];

/// MySQL hints that are recognized and ignored.
const UNSUPPORTED_HINTS: [&str; 22] = [
    "bka",
    "no_bka",
    "bnl",
    "no_bnl",
    "no_icp",
    "mrr",
    "no_mrr",
    "no_range_optimization",
    "skip_scan",
    "no_skip_scan",
    "semijoin",
    "no_semijoin",
    "subquery",
    "merge",
    "no_merge",
    "index_merge",
    "join_fixed_order",
    "join_order",
    "join_prefix",
    "join_suffix",
    "set_var",
    "resource_group",
];

const STORES: [&str; 2] = ["tikv", "tiflash"];

type HintResult<T> = std::result::Result<T, HintWarning>;

impl Grammar<'_> {
    /// Parses a `/*+ ... */` block at the cursor, if there is one.
    pub(super) fn parse_hints(&mut self) -> Result<Vec<TableOptimizerHint>> {
        let mut hints = Vec::new();
        if !self.eat(TokenKind::HintBegin) {
            return Ok(hints);
        }
        loop {
            match self.peek_kind() {
                TokenKind::HintEnd => {
                    self.advance();
                    break;
                }
                TokenKind::Eof => return Err(self.error()),
                TokenKind::Comma => {
                    self.advance();
                    continue;
                }
                _ => {}
            }
            let mark = self.mark();
            match self.parse_hint() {
                Ok(parsed) => hints.extend(parsed),
                Err(warning) => {
                    debug!(code = warning.code, message = %warning.message, "optimizer hint dropped");
                    self.warnings.push(warning);
                    self.reset_to(mark);
                    self.skip_hint();
                }
            }
        }
        Ok(hints)
    }

    /// One hint: its name and parenthesized arguments.
    /// `READ_FROM_STORAGE` yields one hint per storage engine.
    fn parse_hint(&mut self) -> HintResult<Vec<TableOptimizerHint>> {
        let token = self.peek().clone();
        if !matches!(token.kind, TokenKind::Identifier | TokenKind::Keyword(_)) {
            return Err(self.hint_unexpected());
        }
        let name = token.lit.to_ascii_lowercase();
        if UNSUPPORTED_HINTS.contains(&name.as_str()) {
            return Err(HintWarning::unsupported(&token.lit));
        }
        self.advance();
        self.hint_expect(TokenKind::LeftParen)?;

        let mut hint = TableOptimizerHint {
            hint_name: name,
            ..TableOptimizerHint::default()
        };
        let name = hint.hint_name.as_str();
        if name == "qb_name" {
            hint.qb_name = Some(self.hint_ident()?);
            self.hint_expect(TokenKind::RightParen)?;
            return Ok(vec![hint]);
        }
        hint.qb_name = self.hint_qb_name();

        if TABLE_HINTS.contains(&name) {
            hint.tables = self.hint_tables()?;
        } else if INDEX_HINTS.contains(&name) {
            hint.tables = vec![self.hint_table()?];
            while self.is_ident() {
                hint.indexes.push(self.advance().lit);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        } else if name == "max_execution_time" {
            hint.data = HintData::Uint(self.hint_uint()?);
        } else if name == "memory_quota" {
            hint.data = HintData::MemoryQuota(self.hint_memory_quota()?);
        } else if name == "use_toja" {
            let value = if self.eat_keyword(Keyword::True) {
                true
            } else if self.eat_keyword(Keyword::False) {
                false
            } else {
                return Err(self.hint_unexpected());
            };
            hint.data = HintData::Bool(value);
        } else if name == "read_from_storage" {
            let hints = self.hint_stores(&hint)?;
            self.hint_expect(TokenKind::RightParen)?;
            return Ok(hints);
        } else if !NO_ARG_HINTS.contains(&name) {
            return Err(HintWarning::syntax(&token.lit, token.pos));
        }
        self.hint_expect(TokenKind::RightParen)?;
        Ok(vec![hint])
    }

    /// `TIKV[t1, t2], TIFLASH[t3]`
    fn hint_stores(&mut self, base: &TableOptimizerHint) -> HintResult<Vec<TableOptimizerHint>> {
        let mut hints = Vec::new();
        loop {
            let store = self.hint_ident()?;
            if !STORES.contains(&store.to_ascii_lowercase().as_str()) {
                return Err(HintWarning::syntax(&store, self.peek().pos));
            }
            self.hint_expect(TokenKind::LeftBracket)?;
            let tables = self.hint_tables()?;
            self.hint_expect(TokenKind::RightBracket)?;
            hints.push(TableOptimizerHint {
                tables,
                data: HintData::Store(store.to_ascii_uppercase()),
                ..base.clone()
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(hints)
    }

    /// `@qb` at the start of the argument list.
    fn hint_qb_name(&mut self) -> Option<String> {
        if self.check(TokenKind::SingleAtIdentifier) {
            let token = self.advance();
            return Some(user_var_name(&token.lit).to_owned());
        }
        None
    }

    fn hint_tables(&mut self) -> HintResult<Vec<HintTable>> {
        let mut tables = Vec::new();
        loop {
            tables.push(self.hint_table()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(tables)
    }

    /// `[db.]table[@qb]`
    fn hint_table(&mut self) -> HintResult<HintTable> {
        let mut table = HintTable {
            table_name: self.hint_ident()?,
            ..HintTable::default()
        };
        if self.eat(TokenKind::Dot) {
            table.db_name = Some(std::mem::replace(&mut table.table_name, self.hint_ident()?));
        }
        table.qb_name = self.hint_qb_name();
        Ok(table)
    }

    /// `n MB` or `n GB`, in bytes.
    fn hint_memory_quota(&mut self) -> HintResult<i64> {
        let n = self.hint_uint()?;
        let unit: u64 = if self.eat_word("MB") {
            1024 * 1024
        } else if self.eat_word("GB") {
            1024 * 1024 * 1024
        } else {
            return Err(self.hint_unexpected());
        };
        n.checked_mul(unit)
            .and_then(|bytes| i64::try_from(bytes).ok())
            .ok_or_else(HintWarning::memory_quota_overflow)
    }

    fn hint_uint(&mut self) -> HintResult<u64> {
        if !self.check(TokenKind::IntLit) {
            return Err(self.hint_unexpected());
        }
        let token = self.advance();
        token
            .lit
            .parse()
            .map_err(|_| HintWarning::invalid_integer(&token.lit))
    }

    fn hint_ident(&mut self) -> HintResult<String> {
        if self.is_ident() {
            return Ok(self.advance().lit);
        }
        Err(self.hint_unexpected())
    }

    fn hint_expect(&mut self, kind: TokenKind) -> HintResult<()> {
        if self.eat(kind) {
            return Ok(());
        }
        Err(self.hint_unexpected())
    }

    /// Warning for the current token: an invalid literal or a syntax error.
    fn hint_unexpected(&self) -> HintWarning {
        let token = self.peek();
        let what = match token.kind {
            TokenKind::DecLit => Some("decimal literal"),
            TokenKind::FloatLit => Some("floating point literal"),
            TokenKind::HexLit if !token.lit.starts_with("0x") => Some("hexadecimal literal"),
            TokenKind::BitLit if !token.lit.starts_with("0b") => Some("bit-value literal"),
            _ => None,
        };
        match what {
            Some(what) => HintWarning::invalid_token(what, &token.lit),
            None => HintWarning::syntax(&token.lit, token.pos),
        }
    }

    /// Skips the hint at the cursor: its name and any parenthesized
    /// arguments, stopping before the block end.
    fn skip_hint(&mut self) {
        if matches!(self.peek_kind(), TokenKind::HintEnd | TokenKind::Eof) {
            return;
        }
        self.advance();
        if !self.eat(TokenKind::LeftParen) {
            return;
        }
        let mut depth = 1usize;
        while depth > 0 {
            match self.peek_kind() {
                TokenKind::HintEnd | TokenKind::Eof => return,
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth -= 1,
                _ => {}
            }
            self.advance();
        }
    }
}
