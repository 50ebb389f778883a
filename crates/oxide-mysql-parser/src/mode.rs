//! SQL mode flags.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A set of MySQL `sql_mode` flags.
///
/// The scanner honours [`SqlMode::ANSI_QUOTES`] and
/// [`SqlMode::NO_BACKSLASH_ESCAPES`], the grammar honours
/// [`SqlMode::PIPES_AS_CONCAT`] and [`SqlMode::HIGH_NOT_PRECEDENCE`]. The
/// other flags are carried for the embedding server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SqlMode(u32);

/// Error returned when parsing an unknown `sql_mode` name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Variable 'sql_mode' can't be set to the value of '{0}'")]
pub struct UnknownSqlMode(pub String);

impl SqlMode {
    /// No flags.
    pub const NONE: Self = Self(0);
    /// `REAL` is a synonym for `FLOAT`.
    pub const REAL_AS_FLOAT: Self = Self(1 << 0);
    /// `||` concatenates strings instead of meaning `OR`.
    pub const PIPES_AS_CONCAT: Self = Self(1 << 1);
    /// `"` quotes identifiers instead of strings.
    pub const ANSI_QUOTES: Self = Self(1 << 2);
    /// Spaces are allowed between a function name and `(`.
    pub const IGNORE_SPACE: Self = Self(1 << 3);
    /// Reject queries whose select list refers to non-aggregated columns.
    pub const ONLY_FULL_GROUP_BY: Self = Self(1 << 4);
    /// Unsigned subtraction yields a signed result.
    pub const NO_UNSIGNED_SUBTRACTION: Self = Self(1 << 5);
    /// `\` is an ordinary character inside strings.
    pub const NO_BACKSLASH_ESCAPES: Self = Self(1 << 6);
    /// `NOT a BETWEEN b AND c` parses as `(NOT a) BETWEEN b AND c`.
    pub const HIGH_NOT_PRECEDENCE: Self = Self(1 << 7);
    /// Strict mode for transactional tables.
    pub const STRICT_TRANS_TABLES: Self = Self(1 << 8);
    /// Strict mode for all tables.
    pub const STRICT_ALL_TABLES: Self = Self(1 << 9);
    /// Reject `'0000-00-00'`.
    pub const NO_ZERO_DATE: Self = Self(1 << 10);
    /// Reject dates with a zero month or day.
    pub const NO_ZERO_IN_DATE: Self = Self(1 << 11);
    /// Division by zero is an error.
    pub const ERROR_FOR_DIVISION_BY_ZERO: Self = Self(1 << 12);
    /// Inserting 0 into an auto-increment column does not generate a value.
    pub const NO_AUTO_VALUE_ON_ZERO: Self = Self(1 << 13);
    /// The `ANSI` combination mode.
    pub const ANSI: Self = Self(
        Self::REAL_AS_FLOAT.0
            | Self::PIPES_AS_CONCAT.0
            | Self::ANSI_QUOTES.0
            | Self::IGNORE_SPACE.0
            | Self::ONLY_FULL_GROUP_BY.0,
    );

    const NAMES: &'static [(&'static str, Self)] = &[
        ("REAL_AS_FLOAT", Self::REAL_AS_FLOAT),
        ("PIPES_AS_CONCAT", Self::PIPES_AS_CONCAT),
        ("ANSI_QUOTES", Self::ANSI_QUOTES),
        ("IGNORE_SPACE", Self::IGNORE_SPACE),
        ("ONLY_FULL_GROUP_BY", Self::ONLY_FULL_GROUP_BY),
        ("NO_UNSIGNED_SUBTRACTION", Self::NO_UNSIGNED_SUBTRACTION),
        ("NO_BACKSLASH_ESCAPES", Self::NO_BACKSLASH_ESCAPES),
        ("HIGH_NOT_PRECEDENCE", Self::HIGH_NOT_PRECEDENCE),
        ("STRICT_TRANS_TABLES", Self::STRICT_TRANS_TABLES),
        ("STRICT_ALL_TABLES", Self::STRICT_ALL_TABLES),
        ("NO_ZERO_DATE", Self::NO_ZERO_DATE),
        ("NO_ZERO_IN_DATE", Self::NO_ZERO_IN_DATE),
        ("ERROR_FOR_DIVISION_BY_ZERO", Self::ERROR_FOR_DIVISION_BY_ZERO),
        ("NO_AUTO_VALUE_ON_ZERO", Self::NO_AUTO_VALUE_ON_ZERO),
    ];

    /// Returns true if every flag in `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of both sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns the set without the flags in `other`.
    #[must_use]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Returns true if no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl BitOr for SqlMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for SqlMode {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl FromStr for SqlMode {
    type Err = UnknownSqlMode;

    /// Parses the comma separated form used by `SET sql_mode = '...'`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mode = Self::NONE;
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let upper = part.to_ascii_uppercase();
            if upper == "ANSI" {
                mode |= Self::ANSI;
                continue;
            }
            match Self::NAMES.iter().find(|(name, _)| *name == upper) {
                Some((_, flag)) => mode |= *flag,
                None => return Err(UnknownSqlMode(part.to_owned())),
            }
        }
        Ok(mode)
    }
}

impl fmt::Display for SqlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, flag) in Self::NAMES {
            if self.contains(*flag) {
                if !first {
                    f.write_str(",")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl TryFrom<String> for SqlMode {
    type Error = UnknownSqlMode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SqlMode> for String {
    fn from(mode: SqlMode) -> Self {
        mode.to_string()
    }
}
