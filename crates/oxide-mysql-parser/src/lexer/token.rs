//! Token types for the SQL scanner.

use super::Pos;

macro_rules! keywords {
    ($($variant:ident => $text:literal,)*) => {
        /// Reserved words.
        ///
        /// Only reserved words are lexed as keywords. Non-reserved words such
        /// as `ENGINE` or `COMMIT` are identifiers that the grammar matches by
        /// their text, so they stay usable as table and column names.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $(
                #[doc = $text]
                $variant,
            )*
        }

        impl Keyword {
            /// Looks up a reserved word, ignoring ASCII case.
            #[must_use]
            #[allow(clippy::should_implement_trait)]
            pub fn from_str(s: &str) -> Option<Self> {
                match s.to_ascii_uppercase().as_str() {
                    $($text => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// Returns the upper-case spelling.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)*
                }
            }
        }
    };
}

keywords! {
    All => "ALL",
    Analyze => "ANALYZE",
    And => "AND",
    As => "AS",
    Asc => "ASC",
    Between => "BETWEEN",
    By => "BY",
    Cascade => "CASCADE",
    Case => "CASE",
    Character => "CHARACTER",
    Check => "CHECK",
    Collate => "COLLATE",
    Constraint => "CONSTRAINT",
    Convert => "CONVERT",
    Create => "CREATE",
    Cross => "CROSS",
    CurrentDate => "CURRENT_DATE",
    CurrentTime => "CURRENT_TIME",
    CurrentTimestamp => "CURRENT_TIMESTAMP",
    Default => "DEFAULT",
    Delete => "DELETE",
    Desc => "DESC",
    Distinct => "DISTINCT",
    Distinctrow => "DISTINCTROW",
    Div => "DIV",
    Drop => "DROP",
    Dual => "DUAL",
    Else => "ELSE",
    Exists => "EXISTS",
    Explain => "EXPLAIN",
    False => "FALSE",
    For => "FOR",
    Force => "FORCE",
    Foreign => "FOREIGN",
    From => "FROM",
    Fulltext => "FULLTEXT",
    Generated => "GENERATED",
    Group => "GROUP",
    Having => "HAVING",
    If => "IF",
    Ignore => "IGNORE",
    In => "IN",
    Index => "INDEX",
    Inner => "INNER",
    Insert => "INSERT",
    Into => "INTO",
    Is => "IS",
    Join => "JOIN",
    Key => "KEY",
    Keys => "KEYS",
    Left => "LEFT",
    Like => "LIKE",
    Limit => "LIMIT",
    Localtime => "LOCALTIME",
    Localtimestamp => "LOCALTIMESTAMP",
    Lock => "LOCK",
    Mod => "MOD",
    Natural => "NATURAL",
    Not => "NOT",
    Null => "NULL",
    On => "ON",
    Or => "OR",
    Order => "ORDER",
    Outer => "OUTER",
    Partition => "PARTITION",
    Primary => "PRIMARY",
    Range => "RANGE",
    References => "REFERENCES",
    Regexp => "REGEXP",
    Replace => "REPLACE",
    Restrict => "RESTRICT",
    Right => "RIGHT",
    Rlike => "RLIKE",
    Row => "ROW",
    Rows => "ROWS",
    Select => "SELECT",
    Set => "SET",
    Stored => "STORED",
    StraightJoin => "STRAIGHT_JOIN",
    Table => "TABLE",
    Then => "THEN",
    True => "TRUE",
    Union => "UNION",
    Unique => "UNIQUE",
    Unsigned => "UNSIGNED",
    Update => "UPDATE",
    Use => "USE",
    Using => "USING",
    Values => "VALUES",
    Virtual => "VIRTUAL",
    When => "WHEN",
    Where => "WHERE",
    Window => "WINDOW",
    With => "WITH",
    Xor => "XOR",
    Zerofill => "ZEROFILL",
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Names
    /// Bare identifier, including non-reserved words.
    Identifier,
    /// Back-quoted identifier, or double-quoted under `ANSI_QUOTES`.
    QuotedIdentifier,
    /// Reserved word.
    Keyword(Keyword),
    /// User variable (`@a`, `@'a'`).
    SingleAtIdentifier,
    /// System variable (`@@a`, `@@global.a`).
    DoubleAtIdentifier,

    // Literals
    /// String literal.
    StringLit,
    /// Integer literal.
    IntLit,
    /// Fixed-point literal (`1.5`, `.5`).
    DecLit,
    /// Floating-point literal (`1e5`).
    FloatLit,
    /// Hexadecimal literal (`0x1F`, `X'1F'`).
    HexLit,
    /// Bit literal (`0b101`, `B'101'`).
    BitLit,
    /// `?`
    ParamMarker,

    // Optimizer hints
    /// `/*+`
    HintBegin,
    /// `*/` closing a hint.
    HintEnd,

    // Operators
    /// =
    Eq,
    /// <=>
    NullEq,
    /// != or <>
    Ne,
    /// <
    Lt,
    /// <=
    Le,
    /// >
    Gt,
    /// >=
    Ge,
    /// <<
    LeftShift,
    /// >>
    RightShift,
    /// &&
    AndAnd,
    /// ||
    PipePipe,
    /// !
    Bang,
    /// :=
    Assign,
    /// ->
    JsonExtract,
    /// ->>
    JsonUnquoteExtract,
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// ^
    Caret,
    /// &
    Ampersand,
    /// |
    Pipe,
    /// ~
    Tilde,

    // Punctuation
    /// (
    LeftParen,
    /// )
    RightParen,
    /// {
    LeftBrace,
    /// }
    RightBrace,
    /// `[`, only inside optimizer hints.
    LeftBracket,
    /// `]`, only inside optimizer hints.
    RightBracket,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,

    // Special
    /// Input the scanner could not classify.
    Invalid,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Returns true for literal value tokens.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(
            self,
            Self::StringLit
                | Self::IntLit
                | Self::DecLit
                | Self::FloatLit
                | Self::HexLit
                | Self::BitLit
        )
    }

    /// Returns true for tokens that name something.
    #[must_use]
    pub const fn is_identifier(&self) -> bool {
        matches!(self, Self::Identifier | Self::QuotedIdentifier)
    }
}

/// A token with its literal text and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// Unescaped content for strings and quoted identifiers, the source text
    /// otherwise.
    pub lit: String,
    /// Where the token starts.
    pub pos: Pos,
    /// Byte offset just past the token.
    pub end: usize,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, lit: impl Into<String>, pos: Pos, end: usize) -> Self {
        Self {
            kind,
            lit: lit.into(),
            pos,
            end,
        }
    }

    /// Returns true if this is the end-of-input token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns true if this is the given reserved word.
    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }

    /// Returns true if this is a bare identifier spelled `word`, ignoring
    /// ASCII case.
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Identifier && self.lit.eq_ignore_ascii_case(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Keyword::from_str("SELECT"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("select"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("StRaIgHt_JoIn"), Some(Keyword::StraightJoin));
        assert_eq!(Keyword::from_str("engine"), None);
        assert_eq!(Keyword::from_str("users"), None);
    }

    #[test]
    fn test_keyword_as_str() {
        assert_eq!(Keyword::CurrentTimestamp.as_str(), "CURRENT_TIMESTAMP");
        assert_eq!(Keyword::Distinctrow.as_str(), "DISTINCTROW");
    }

    #[test]
    fn test_token_kind_is_literal() {
        assert!(TokenKind::IntLit.is_literal());
        assert!(TokenKind::HexLit.is_literal());
        assert!(!TokenKind::ParamMarker.is_literal());
        assert!(!TokenKind::Identifier.is_literal());
    }

    #[test]
    fn test_token_is_word() {
        let token = Token::new(TokenKind::Identifier, "Engine", Pos::START, 6);
        assert!(token.is_word("ENGINE"));
        let quoted = Token::new(TokenKind::QuotedIdentifier, "engine", Pos::START, 8);
        assert!(!quoted.is_word("ENGINE"));
    }
}
