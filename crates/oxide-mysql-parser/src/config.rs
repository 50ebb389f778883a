//! Parser configuration.

use serde::{Deserialize, Serialize};

use crate::mode::SqlMode;

/// Settings shared by every statement a [`Parser`](crate::parser::Parser)
/// reads.
///
/// Empty `charset` and `collation` fall back to the connection default,
/// `utf8mb4` / `utf8mb4_bin`. The charset only changes how the scanner
/// steps over multi-byte characters.
///
/// ```
/// use oxide_mysql_parser::{ParserConfig, SqlMode};
///
/// let config = ParserConfig::default()
///     .with_sql_mode(SqlMode::ANSI_QUOTES)
///     .with_window_func(true);
/// assert!(config.enable_window_func);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// SQL mode, written as in `SET sql_mode = '...'`.
    pub sql_mode: SqlMode,
    /// Default client charset.
    pub charset: String,
    /// Default client collation.
    pub collation: String,
    /// Parse `OVER` clauses and `WINDOW` definitions.
    pub enable_window_func: bool,
}

impl ParserConfig {
    /// Sets the SQL mode.
    #[must_use]
    pub const fn with_sql_mode(mut self, sql_mode: SqlMode) -> Self {
        self.sql_mode = sql_mode;
        self
    }

    /// Sets the default charset.
    #[must_use]
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    /// Sets the default collation.
    #[must_use]
    pub fn with_collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = collation.into();
        self
    }

    /// Enables or disables window functions.
    #[must_use]
    pub const fn with_window_func(mut self, enable: bool) -> Self {
        self.enable_window_func = enable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParserConfig::default();
        assert_eq!(config.sql_mode, SqlMode::NONE);
        assert!(config.charset.is_empty());
        assert!(!config.enable_window_func);
    }

    #[test]
    fn test_builder() {
        let config = ParserConfig::default()
            .with_sql_mode(SqlMode::PIPES_AS_CONCAT)
            .with_charset("gbk")
            .with_collation("gbk_bin");
        assert_eq!(config.charset, "gbk");
        assert_eq!(config.collation, "gbk_bin");
        assert!(config.sql_mode.contains(SqlMode::PIPES_AS_CONCAT));
    }
}
