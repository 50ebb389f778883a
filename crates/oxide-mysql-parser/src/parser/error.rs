//! Parser error and warning types.

use crate::lexer::Pos;

/// MySQL error codes reported by the parser.
pub mod codes {
    /// `ER_PARSE_ERROR`
    pub const PARSE_ERROR: u16 = 1064;
    /// `ER_SYNTAX_ERROR`
    pub const SYNTAX_ERROR: u16 = 1149;
    /// `ER_UNKNOWN_CHARACTER_SET`
    pub const UNKNOWN_CHARACTER_SET: u16 = 1115;
    /// `ER_UNKNOWN_COLLATION`
    pub const UNKNOWN_COLLATION: u16 = 1273;
    /// `ER_COLLATION_CHARSET_MISMATCH`
    pub const COLLATION_CHARSET_MISMATCH: u16 = 1253;
    /// Unsupported optimizer hint.
    pub const HINT_UNSUPPORTED: u16 = 8061;
    /// Invalid token in an optimizer hint.
    pub const HINT_INVALID_TOKEN: u16 = 8062;
    /// `MEMORY_QUOTA` too large.
    pub const HINT_MEMORY_QUOTA_OVERFLOW: u16 = 8063;
    /// Optimizer hint syntax error.
    pub const HINT_SYNTAX: u16 = 8064;
    /// Integer out of range in an optimizer hint.
    pub const HINT_INVALID_INTEGER: u16 = 8065;
}

const SYNTAX_MESSAGE: &str = "You have an error in your SQL syntax; check the manual that \
                              corresponds to your MySQL server version for the right syntax to use";

/// Maximum length of the source excerpt kept in an error.
const NEAR_TEXT_LIMIT: usize = 80;

/// An error that stops a statement from parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The statement is not valid SQL.
    #[error("[{code}]{message} {pos} near \"{near}\"")]
    Syntax {
        /// MySQL error code.
        code: u16,
        /// What went wrong.
        message: String,
        /// Where the offending token starts.
        pos: Pos,
        /// Source text from the offending token on.
        near: String,
    },
    /// The charset name is not known.
    #[error("[1115]Unknown character set: '{0}'")]
    UnknownCharset(String),
    /// The collation name is not known.
    #[error("[1273]Unknown collation: '{0}'")]
    UnknownCollation(String),
    /// The collation belongs to another charset.
    #[error("[1253]COLLATION '{collation}' is not valid for CHARACTER SET '{charset}'")]
    CollationMismatch {
        /// Requested charset.
        charset: String,
        /// Requested collation.
        collation: String,
    },
}

impl ParseError {
    /// A syntax error at `pos`, quoting the source from there on.
    #[must_use]
    pub fn syntax(pos: Pos, src: &str) -> Self {
        Self::with_message(codes::PARSE_ERROR, SYNTAX_MESSAGE, pos, src)
    }

    /// An error with its own code and message.
    #[must_use]
    pub fn with_message(code: u16, message: impl Into<String>, pos: Pos, src: &str) -> Self {
        let rest = src.get(pos.offset..).unwrap_or_default();
        let near = match rest.char_indices().nth(NEAR_TEXT_LIMIT) {
            Some((end, _)) => &rest[..end],
            None => rest,
        };
        Self::Syntax {
            code,
            message: message.into(),
            pos,
            near: near.to_owned(),
        }
    }

    /// Returns the MySQL error code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::Syntax { code, .. } => *code,
            Self::UnknownCharset(_) => codes::UNKNOWN_CHARACTER_SET,
            Self::UnknownCollation(_) => codes::UNKNOWN_COLLATION,
            Self::CollationMismatch { .. } => codes::COLLATION_CHARSET_MISMATCH,
        }
    }

    /// Returns the position of a syntax error.
    #[must_use]
    pub const fn pos(&self) -> Option<Pos> {
        match self {
            Self::Syntax { pos, .. } => Some(*pos),
            _ => None,
        }
    }
}

/// A problem inside an optimizer hint. The hint is dropped and the
/// statement still parses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[{code}]{message}")]
pub struct HintWarning {
    /// MySQL error code, one of the `HINT_*` codes.
    pub code: u16,
    /// Human-readable message.
    pub message: String,
}

impl HintWarning {
    pub(crate) fn unsupported(name: &str) -> Self {
        Self {
            code: codes::HINT_UNSUPPORTED,
            message: format!("Optimizer hint {name} is not supported and is ignored"),
        }
    }

    pub(crate) fn invalid_token(what: &str, lit: &str) -> Self {
        Self {
            code: codes::HINT_INVALID_TOKEN,
            message: format!("Cannot use {what} '{lit}' in an optimizer hint"),
        }
    }

    pub(crate) fn memory_quota_overflow() -> Self {
        Self {
            code: codes::HINT_MEMORY_QUOTA_OVERFLOW,
            message: format!(
                "Max value of MEMORY_QUOTA is {} bytes, ignore this invalid limit",
                i64::MAX
            ),
        }
    }

    pub(crate) fn syntax(near: &str, pos: Pos) -> Self {
        Self {
            code: codes::HINT_SYNTAX,
            message: format!("Optimizer hint syntax error at {pos} near \"{near}\""),
        }
    }

    pub(crate) fn invalid_integer(lit: &str) -> Self {
        Self {
            code: codes::HINT_INVALID_INTEGER,
            message: format!("integer value is out of range in '{lit}'"),
        }
    }
}
