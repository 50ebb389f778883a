//! Canonical SQL rendering.
//!
//! Every node implements [`Restore`], writing itself back to SQL through a
//! [`RestoreCtx`]. The context applies the [`RestoreFlags`] case, quoting
//! and escaping rules, so node implementations only decide *what* is a
//! keyword, a string or a name. Re-parsing restored text yields a tree
//! equal to the original once cached source text is cleared.

use std::fmt;
use std::ops::BitOr;

/// Errors raised while restoring a node.
#[derive(Debug, thiserror::Error)]
pub enum RestoreError {
    /// The node kind has no SQL rendering.
    #[error("restore of {0} is not implemented")]
    NotImplemented(&'static str),

    /// The output sink failed.
    #[error("failed to write restored SQL: {0}")]
    Write(#[from] fmt::Error),
}

/// Result type for restore operations.
pub type Result<T> = std::result::Result<T, RestoreError>;

/// Options controlling how SQL is rendered.
///
/// The flags form groups: string quoting, keyword case, name case and name
/// quoting. When several flags of one group are set, the one declared first
/// wins, so `KEYWORD_UPPERCASE | KEYWORD_LOWERCASE` renders upper case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RestoreFlags(u32);

impl RestoreFlags {
    /// No flags: every helper writes its input unchanged.
    pub const NONE: Self = Self(0);
    /// Quote strings with `'`.
    pub const STRING_SINGLE_QUOTES: Self = Self(1 << 0);
    /// Quote strings with `"`.
    pub const STRING_DOUBLE_QUOTES: Self = Self(1 << 1);
    /// Escape `\` inside strings.
    pub const STRING_ESCAPE_BACKSLASH: Self = Self(1 << 2);
    /// Write keywords in upper case.
    pub const KEYWORD_UPPERCASE: Self = Self(1 << 3);
    /// Write keywords in lower case.
    pub const KEYWORD_LOWERCASE: Self = Self(1 << 4);
    /// Write names in upper case.
    pub const NAME_UPPERCASE: Self = Self(1 << 5);
    /// Write names in lower case.
    pub const NAME_LOWERCASE: Self = Self(1 << 6);
    /// Quote names with `"`.
    pub const NAME_DOUBLE_QUOTES: Self = Self(1 << 7);
    /// Quote names with `` ` ``.
    pub const NAME_BACK_QUOTES: Self = Self(1 << 8);
    /// Put spaces around symbolic binary operators (`a + b`).
    pub const SPACES_AROUND_BINARY_OPERATION: Self = Self(1 << 9);

    /// Single-quoted, backslash-escaped strings, upper-case keywords and
    /// back-quoted names.
    pub const DEFAULT: Self = Self(
        Self::STRING_SINGLE_QUOTES.0
            | Self::STRING_ESCAPE_BACKSLASH.0
            | Self::KEYWORD_UPPERCASE.0
            | Self::NAME_BACK_QUOTES.0,
    );

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
}

impl Default for RestoreFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl BitOr for RestoreFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Output sink plus rendering options, passed to every [`Restore`] call.
pub struct RestoreCtx<'a> {
    flags: RestoreFlags,
    out: &'a mut dyn fmt::Write,
    /// Nesting depth of joins being restored.
    pub(crate) join_level: usize,
}

impl fmt::Debug for RestoreCtx<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestoreCtx")
            .field("flags", &self.flags)
            .field("join_level", &self.join_level)
            .finish_non_exhaustive()
    }
}

impl<'a> RestoreCtx<'a> {
    /// Creates a context writing into `out`.
    pub fn new(flags: RestoreFlags, out: &'a mut dyn fmt::Write) -> Self {
        Self {
            flags,
            out,
            join_level: 0,
        }
    }

    /// Returns the rendering options.
    #[must_use]
    pub const fn flags(&self) -> RestoreFlags {
        self.flags
    }

    /// Writes a keyword, applying the keyword case flags.
    pub fn write_keyword(&mut self, keyword: &str) -> Result<()> {
        if self.flags.contains(RestoreFlags::KEYWORD_UPPERCASE) {
            self.out.write_str(&keyword.to_uppercase())?;
        } else if self.flags.contains(RestoreFlags::KEYWORD_LOWERCASE) {
            self.out.write_str(&keyword.to_lowercase())?;
        } else {
            self.out.write_str(keyword)?;
        }
        Ok(())
    }

    /// Writes a string literal, applying the quoting and escaping flags.
    pub fn write_string(&mut self, s: &str) -> Result<()> {
        let escaped;
        let s = if self.flags.contains(RestoreFlags::STRING_ESCAPE_BACKSLASH) {
            escaped = s.replace('\\', r"\\");
            escaped.as_str()
        } else {
            s
        };
        if self.flags.contains(RestoreFlags::STRING_SINGLE_QUOTES) {
            self.write_quoted(s, '\'')
        } else if self.flags.contains(RestoreFlags::STRING_DOUBLE_QUOTES) {
            self.write_quoted(s, '"')
        } else {
            self.out.write_str(s)?;
            Ok(())
        }
    }

    /// Writes a name, applying the name case and quoting flags.
    pub fn write_name(&mut self, name: &str) -> Result<()> {
        let cased;
        let name = if self.flags.contains(RestoreFlags::NAME_UPPERCASE) {
            cased = name.to_uppercase();
            cased.as_str()
        } else if self.flags.contains(RestoreFlags::NAME_LOWERCASE) {
            cased = name.to_lowercase();
            cased.as_str()
        } else {
            name
        };
        if self.flags.contains(RestoreFlags::NAME_DOUBLE_QUOTES) {
            self.write_quoted(name, '"')
        } else if self.flags.contains(RestoreFlags::NAME_BACK_QUOTES) {
            self.write_quoted(name, '`')
        } else {
            self.out.write_str(name)?;
            Ok(())
        }
    }

    /// Writes text unchanged.
    pub fn write_plain(&mut self, s: &str) -> Result<()> {
        self.out.write_str(s)?;
        Ok(())
    }

    /// Writes formatted text unchanged.
    pub fn write_fmt_plain(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        self.out.write_fmt(args)?;
        Ok(())
    }

    /// Writes `s` between `quote`s, doubling embedded quotes.
    fn write_quoted(&mut self, s: &str, quote: char) -> Result<()> {
        self.out.write_char(quote)?;
        for c in s.chars() {
            if c == quote {
                self.out.write_char(quote)?;
            }
            self.out.write_char(c)?;
        }
        self.out.write_char(quote)?;
        Ok(())
    }

    /// Restores `items` separated by `sep`.
    pub fn write_list<T: Restore>(&mut self, items: &[T], sep: &str) -> Result<()> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.write_plain(sep)?;
            }
            item.restore(self)?;
        }
        Ok(())
    }

    /// Writes `names` separated by `sep`.
    pub fn write_names<S: AsRef<str>>(&mut self, names: &[S], sep: &str) -> Result<()> {
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                self.write_plain(sep)?;
            }
            self.write_name(name.as_ref())?;
        }
        Ok(())
    }
}

/// A node that can render itself as SQL.
pub trait Restore {
    /// Writes this node's SQL to `ctx`.
    ///
    /// # Errors
    ///
    /// Returns [`RestoreError::NotImplemented`] for node kinds without a SQL
    /// rendering, and [`RestoreError::Write`] if the sink fails.
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()>;
}

impl<T: Restore + ?Sized> Restore for Box<T> {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        (**self).restore(ctx)
    }
}

/// Restores `node` into a new string.
///
/// # Errors
///
/// Propagates any error from the node's [`Restore`] implementation.
pub fn restore_sql<T: Restore + ?Sized>(node: &T, flags: RestoreFlags) -> Result<String> {
    let mut sql = String::new();
    let mut ctx = RestoreCtx::new(flags, &mut sql);
    node.restore(&mut ctx)?;
    Ok(sql)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(flags: RestoreFlags) -> String {
        let mut out = String::new();
        let mut ctx = RestoreCtx::new(flags, &mut out);
        ctx.write_keyword("key`.'\"Word\\").unwrap();
        ctx.write_plain(" ").unwrap();
        ctx.write_string("str`.'\"ing\\").unwrap();
        ctx.write_plain(" ").unwrap();
        ctx.write_name("na`.'\"Me\\").unwrap();
        out
    }

    #[test]
    fn test_flag_matrix() {
        let cases = [
            (RestoreFlags::NONE, "key`.'\"Word\\ str`.'\"ing\\ na`.'\"Me\\"),
            (
                RestoreFlags::STRING_SINGLE_QUOTES,
                "key`.'\"Word\\ 'str`.''\"ing\\' na`.'\"Me\\",
            ),
            (
                RestoreFlags::STRING_DOUBLE_QUOTES,
                "key`.'\"Word\\ \"str`.'\"\"ing\\\" na`.'\"Me\\",
            ),
            (
                RestoreFlags::STRING_ESCAPE_BACKSLASH,
                "key`.'\"Word\\ str`.'\"ing\\\\ na`.'\"Me\\",
            ),
            (
                RestoreFlags::KEYWORD_UPPERCASE,
                "KEY`.'\"WORD\\ str`.'\"ing\\ na`.'\"Me\\",
            ),
            (
                RestoreFlags::KEYWORD_LOWERCASE,
                "key`.'\"word\\ str`.'\"ing\\ na`.'\"Me\\",
            ),
            (
                RestoreFlags::NAME_UPPERCASE,
                "key`.'\"Word\\ str`.'\"ing\\ NA`.'\"ME\\",
            ),
            (
                RestoreFlags::NAME_LOWERCASE,
                "key`.'\"Word\\ str`.'\"ing\\ na`.'\"me\\",
            ),
            (
                RestoreFlags::NAME_DOUBLE_QUOTES,
                "key`.'\"Word\\ str`.'\"ing\\ \"na`.'\"\"Me\\\"",
            ),
            (
                RestoreFlags::NAME_BACK_QUOTES,
                "key`.'\"Word\\ str`.'\"ing\\ `na``.'\"Me\\`",
            ),
            (
                RestoreFlags::DEFAULT,
                "KEY`.'\"WORD\\ 'str`.''\"ing\\\\' `na``.'\"Me\\`",
            ),
        ];
        for (flags, expected) in cases {
            assert_eq!(render(flags), expected, "flags: {flags:?}");
        }
    }

    #[test]
    fn test_first_declared_flag_wins() {
        let cases = [
            (
                RestoreFlags::STRING_SINGLE_QUOTES | RestoreFlags::STRING_DOUBLE_QUOTES,
                "key`.'\"Word\\ 'str`.''\"ing\\' na`.'\"Me\\",
            ),
            (
                RestoreFlags::KEYWORD_UPPERCASE | RestoreFlags::KEYWORD_LOWERCASE,
                "KEY`.'\"WORD\\ str`.'\"ing\\ na`.'\"Me\\",
            ),
            (
                RestoreFlags::NAME_UPPERCASE | RestoreFlags::NAME_LOWERCASE,
                "key`.'\"Word\\ str`.'\"ing\\ NA`.'\"ME\\",
            ),
            (
                RestoreFlags::NAME_DOUBLE_QUOTES | RestoreFlags::NAME_BACK_QUOTES,
                "key`.'\"Word\\ str`.'\"ing\\ \"na`.'\"\"Me\\\"",
            ),
        ];
        for (flags, expected) in cases {
            assert_eq!(render(flags), expected, "flags: {flags:?}");
        }
    }

    #[test]
    fn test_write_name_escapes_back_quotes() {
        let names = ["", "abc", "ab`c", "ab``c", "ab` `c"];
        let mut out = String::new();
        let mut ctx = RestoreCtx::new(RestoreFlags::DEFAULT, &mut out);
        for name in names {
            ctx.write_name(name).unwrap();
            ctx.write_plain(";").unwrap();
        }
        assert_eq!(out, "``;`abc`;`ab``c`;`ab````c`;`ab`` ``c`;");
    }

    #[test]
    fn test_flag_set_operations() {
        let flags = RestoreFlags::DEFAULT.without(RestoreFlags::NAME_BACK_QUOTES);
        assert!(!flags.contains(RestoreFlags::NAME_BACK_QUOTES));
        assert!(flags.contains(RestoreFlags::KEYWORD_UPPERCASE));
        assert_eq!(RestoreFlags::default(), RestoreFlags::DEFAULT);
    }

    struct Failing;

    impl fmt::Write for Failing {
        fn write_str(&mut self, _: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_sink_failure_propagates() {
        let mut sink = Failing;
        let mut ctx = RestoreCtx::new(RestoreFlags::DEFAULT, &mut sink);
        assert!(matches!(ctx.write_keyword("select"), Err(RestoreError::Write(_))));
    }
}
