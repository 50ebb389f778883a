//! SQL scanner implementation.

use super::{Charset, Keyword, Pos, Token, TokenKind};
use crate::mode::SqlMode;

/// A problem found while classifying input.
///
/// The scanner records the error and returns a [`TokenKind::Invalid`] token
/// in its place; it keeps going afterwards.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {pos}")]
pub struct LexicalError {
    /// What went wrong.
    pub message: String,
    /// Where the offending input starts.
    pub pos: Pos,
}

/// Scans `text` into tokens using the given charset and SQL mode.
///
/// The returned scanner is an iterator that ends after yielding the
/// [`TokenKind::Eof`] token.
#[must_use]
pub fn scan(text: impl AsRef<[u8]>, charset: Charset, mode: SqlMode) -> Scanner {
    let mut scanner = Scanner::new(charset, mode);
    scanner.reset(text.as_ref());
    scanner
}

/// A charset-aware, hint-aware scanner for MySQL SQL text.
///
/// The scanner owns a copy of its input so that it can be kept and
/// [`reset`](Self::reset) for new input without reallocating.
#[derive(Debug, Clone)]
pub struct Scanner {
    src: Vec<u8>,
    pos: usize,
    line: usize,
    col: usize,
    charset: Charset,
    mode: SqlMode,
    in_hint: bool,
    in_bang_comment: bool,
    last: Option<TokenKind>,
    finished: bool,
    errors: Vec<LexicalError>,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(Charset::default(), SqlMode::default())
    }
}

impl Scanner {
    /// Creates a scanner with empty input.
    #[must_use]
    pub const fn new(charset: Charset, mode: SqlMode) -> Self {
        Self {
            src: Vec::new(),
            pos: 0,
            line: 1,
            col: 0,
            charset,
            mode,
            in_hint: false,
            in_bang_comment: false,
            last: None,
            finished: false,
            errors: Vec::new(),
        }
    }

    /// Replaces the input and clears all scanning state.
    pub fn reset(&mut self, input: &[u8]) {
        self.src.clear();
        self.src.extend_from_slice(input);
        self.pos = 0;
        self.line = 1;
        self.col = 0;
        self.in_hint = false;
        self.in_bang_comment = false;
        self.last = None;
        self.finished = false;
        self.errors.clear();
    }

    /// Changes the SQL mode used for subsequent tokens.
    pub fn set_mode(&mut self, mode: SqlMode) {
        self.mode = mode;
    }

    /// Changes the charset used for subsequent tokens.
    pub fn set_charset(&mut self, charset: Charset) {
        self.charset = charset;
    }

    /// Returns the SQL mode.
    #[must_use]
    pub const fn mode(&self) -> SqlMode {
        self.mode
    }

    /// Returns the lexical errors recorded so far.
    #[must_use]
    pub fn errors(&self) -> &[LexicalError] {
        &self.errors
    }

    /// Returns the input being scanned.
    #[must_use]
    pub fn source(&self) -> &[u8] {
        &self.src
    }

    /// Scans the remaining input into a vector ending with `Eof`.
    #[must_use]
    pub fn tokenize(self) -> Vec<Token> {
        self.collect()
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek_at(&self, n: usize) -> Option<u8> {
        self.src.get(self.pos + n).copied()
    }

    fn at(&self, s: &[u8]) -> bool {
        self.src[self.pos..].starts_with(s)
    }

    fn advance(&mut self) {
        if let Some(&b) = self.src.get(self.pos) {
            self.pos += 1;
            if b == b'\n' {
                self.line += 1;
                self.col = 0;
            } else {
                self.col += 1;
            }
        }
    }

    fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Length of the character at the cursor, per the charset.
    fn char_len(&self) -> usize {
        self.charset.next_char_len(&self.src[self.pos..])
    }

    /// Advances over one whole character, copying its bytes into `buf`.
    fn copy_char(&mut self, buf: &mut Vec<u8>) {
        let n = self.char_len();
        buf.extend_from_slice(&self.src[self.pos..self.pos + n]);
        self.advance_n(n);
    }

    const fn mark(&self) -> Pos {
        Pos::new(self.line, self.col, self.pos)
    }

    fn text_from(&self, start: Pos) -> String {
        self.charset.decode(&self.src[start.offset..self.pos]).into_owned()
    }

    fn token(&mut self, kind: TokenKind, lit: String, start: Pos) -> Token {
        self.last = Some(kind);
        Token::new(kind, lit, start, self.pos)
    }

    fn op(&mut self, kind: TokenKind, len: usize, start: Pos) -> Token {
        self.advance_n(len);
        let lit = self.text_from(start);
        self.token(kind, lit, start)
    }

    fn invalid(&mut self, message: &str, start: Pos) -> Token {
        self.errors.push(LexicalError {
            message: message.to_owned(),
            pos: start,
        });
        let lit = self.text_from(start);
        self.token(TokenKind::Invalid, lit, start)
    }

    fn skip_line(&mut self) {
        while self.peek().is_some_and(|c| c != b'\n') {
            self.advance();
        }
    }

    /// Skips a `/* ... */` body after the opening delimiter.
    /// Returns false if the input ends first.
    fn skip_block_comment(&mut self) -> bool {
        while let Some(c) = self.peek() {
            if c == b'*' && self.peek_at(1) == Some(b'/') {
                self.advance_n(2);
                return true;
            }
            let n = self.char_len();
            self.advance_n(n);
        }
        false
    }

    /// Skips whitespace and comments. Returns an invalid token for an
    /// unterminated comment.
    fn skip_whitespace_and_comments(&mut self) -> Option<Token> {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C) => self.advance(),
                Some(b'#') => self.skip_line(),
                Some(b'-')
                    if self.peek_at(1) == Some(b'-')
                        && self.peek_at(2).is_none_or(|c| c <= b' ') =>
                {
                    self.skip_line();
                }
                Some(b'*')
                    if self.in_bang_comment && !self.in_hint && self.peek_at(1) == Some(b'/') =>
                {
                    self.in_bang_comment = false;
                    self.advance_n(2);
                }
                Some(b'/') if self.peek_at(1) == Some(b'*') => match self.peek_at(2) {
                    // Hint comments are tokens.
                    Some(b'+') => return None,
                    Some(b'!') => {
                        self.advance_n(3);
                        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                            self.advance();
                        }
                        self.in_bang_comment = true;
                    }
                    _ => {
                        let start = self.mark();
                        self.advance_n(2);
                        if !self.skip_block_comment() {
                            return Some(self.invalid("unterminated comment", start));
                        }
                    }
                },
                _ => return None,
            }
        }
    }

    /// Scans the next token.
    pub fn next_token(&mut self) -> Token {
        if let Some(invalid) = self.skip_whitespace_and_comments() {
            return invalid;
        }
        let start = self.mark();
        let Some(c) = self.peek() else {
            return self.token(TokenKind::Eof, String::new(), start);
        };

        match c {
            // Only `/*+` reaches here; other comments were skipped.
            b'/' if self.peek_at(1) == Some(b'*') => {
                self.in_hint = true;
                self.op(TokenKind::HintBegin, 3, start)
            }
            b'*' if self.in_hint && self.peek_at(1) == Some(b'/') => {
                self.in_hint = false;
                self.op(TokenKind::HintEnd, 2, start)
            }

            // Single-character tokens
            b'(' => self.op(TokenKind::LeftParen, 1, start),
            b')' => self.op(TokenKind::RightParen, 1, start),
            b'[' if self.in_hint => self.op(TokenKind::LeftBracket, 1, start),
            b']' if self.in_hint => self.op(TokenKind::RightBracket, 1, start),
            b'{' => self.op(TokenKind::LeftBrace, 1, start),
            b'}' => self.op(TokenKind::RightBrace, 1, start),
            b',' => self.op(TokenKind::Comma, 1, start),
            b';' => self.op(TokenKind::Semicolon, 1, start),
            b'+' => self.op(TokenKind::Plus, 1, start),
            b'*' => self.op(TokenKind::Star, 1, start),
            b'/' => self.op(TokenKind::Slash, 1, start),
            b'%' => self.op(TokenKind::Percent, 1, start),
            b'^' => self.op(TokenKind::Caret, 1, start),
            b'~' => self.op(TokenKind::Tilde, 1, start),
            b'?' => self.op(TokenKind::ParamMarker, 1, start),
            b'=' => self.op(TokenKind::Eq, 1, start),

            // Potentially multi-character tokens
            b'-' => {
                if self.at(b"->>") {
                    self.op(TokenKind::JsonUnquoteExtract, 3, start)
                } else if self.at(b"->") {
                    self.op(TokenKind::JsonExtract, 2, start)
                } else {
                    self.op(TokenKind::Minus, 1, start)
                }
            }
            b'<' => {
                if self.at(b"<=>") {
                    self.op(TokenKind::NullEq, 3, start)
                } else if self.at(b"<=") {
                    self.op(TokenKind::Le, 2, start)
                } else if self.at(b"<>") {
                    self.op(TokenKind::Ne, 2, start)
                } else if self.at(b"<<") {
                    self.op(TokenKind::LeftShift, 2, start)
                } else {
                    self.op(TokenKind::Lt, 1, start)
                }
            }
            b'>' => {
                if self.at(b">=") {
                    self.op(TokenKind::Ge, 2, start)
                } else if self.at(b">>") {
                    self.op(TokenKind::RightShift, 2, start)
                } else {
                    self.op(TokenKind::Gt, 1, start)
                }
            }
            b'!' => {
                if self.at(b"!=") {
                    self.op(TokenKind::Ne, 2, start)
                } else {
                    self.op(TokenKind::Bang, 1, start)
                }
            }
            b'&' => {
                if self.at(b"&&") {
                    self.op(TokenKind::AndAnd, 2, start)
                } else {
                    self.op(TokenKind::Ampersand, 1, start)
                }
            }
            b'|' => {
                if self.at(b"||") {
                    self.op(TokenKind::PipePipe, 2, start)
                } else {
                    self.op(TokenKind::Pipe, 1, start)
                }
            }
            b':' => {
                if self.at(b":=") {
                    self.op(TokenKind::Assign, 2, start)
                } else {
                    self.advance();
                    self.invalid("unexpected character ':'", start)
                }
            }
            b'.' => {
                let after_name = matches!(
                    self.last,
                    Some(TokenKind::Identifier | TokenKind::QuotedIdentifier)
                );
                if !after_name && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
                    self.scan_number(start)
                } else {
                    self.op(TokenKind::Dot, 1, start)
                }
            }

            // Quotes
            b'\'' => self.scan_string(start),
            b'"' if self.mode.contains(SqlMode::ANSI_QUOTES) => self.scan_quoted_identifier(start),
            b'"' => self.scan_string(start),
            b'`' => self.scan_quoted_identifier(start),

            b'@' => self.scan_variable(start),
            b'0'..=b'9' => self.scan_number(start),
            b'x' | b'X' if self.peek_at(1) == Some(b'\'') => self.scan_hex_string(start),
            b'b' | b'B' if self.peek_at(1) == Some(b'\'') => self.scan_bit_string(start),
            b'n' | b'N' if self.peek_at(1) == Some(b'\'') => {
                // National character set strings are plain strings here.
                self.advance();
                self.scan_string(start)
            }
            c if is_ident_start(c) => self.scan_identifier(start),
            _ => {
                let n = self.char_len();
                self.advance_n(n);
                self.invalid("unexpected character", start)
            }
        }
    }

    fn consume_ident_chars(&mut self) {
        while let Some(c) = self.peek() {
            if c >= 0x80 {
                let n = self.char_len();
                self.advance_n(n);
            } else if is_ident_char(c) {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Scans an identifier or reserved word.
    fn scan_identifier(&mut self, start: Pos) -> Token {
        self.consume_ident_chars();
        let text = self.text_from(start);
        // Names after `.` are never keywords: `t.key` is a column.
        if self.last != Some(TokenKind::Dot) {
            if let Some(keyword) = Keyword::from_str(&text) {
                return self.token(TokenKind::Keyword(keyword), text, start);
            }
        }
        self.token(TokenKind::Identifier, text, start)
    }

    /// Finishes an identifier whose prefix looked like a number (`1abc`).
    fn continue_identifier(&mut self, start: Pos) -> Token {
        self.consume_ident_chars();
        let text = self.text_from(start);
        self.token(TokenKind::Identifier, text, start)
    }

    /// Reads a quoted body after the opening quote. A doubled quote stands
    /// for one quote. Returns `None` if the input ends first.
    fn read_quoted(&mut self, quote: u8, escapes: bool) -> Option<Vec<u8>> {
        let mut buf = Vec::new();
        loop {
            let c = self.peek()?;
            if c == quote {
                if self.peek_at(1) == Some(quote) {
                    buf.push(quote);
                    self.advance_n(2);
                    continue;
                }
                self.advance();
                return Some(buf);
            }
            if c == b'\\' && escapes {
                self.advance();
                let e = self.peek()?;
                let unescaped = match e {
                    b'0' => 0,
                    b'b' => 0x08,
                    b'n' => b'\n',
                    b'r' => b'\r',
                    b't' => b'\t',
                    b'Z' => 0x1A,
                    b'%' | b'_' => {
                        buf.push(b'\\');
                        e
                    }
                    _ => {
                        self.copy_char(&mut buf);
                        continue;
                    }
                };
                buf.push(unescaped);
                self.advance();
                continue;
            }
            self.copy_char(&mut buf);
        }
    }

    /// Scans a string literal starting at its opening quote.
    fn scan_string(&mut self, start: Pos) -> Token {
        let Some(quote) = self.peek() else {
            return self.invalid("unterminated string literal", start);
        };
        self.advance();
        let escapes = !self.mode.contains(SqlMode::NO_BACKSLASH_ESCAPES);
        match self.read_quoted(quote, escapes) {
            Some(buf) => {
                let lit = self.charset.decode(&buf).into_owned();
                self.token(TokenKind::StringLit, lit, start)
            }
            None => self.invalid("unterminated string literal", start),
        }
    }

    /// Scans a back-quoted (or ANSI double-quoted) identifier.
    fn scan_quoted_identifier(&mut self, start: Pos) -> Token {
        let Some(quote) = self.peek() else {
            return self.invalid("unterminated quoted identifier", start);
        };
        self.advance();
        match self.read_quoted(quote, false) {
            Some(buf) => {
                let lit = self.charset.decode(&buf).into_owned();
                self.token(TokenKind::QuotedIdentifier, lit, start)
            }
            None => self.invalid("unterminated quoted identifier", start),
        }
    }

    /// Scans integer, decimal, float, `0x` hex and `0b` bit literals.
    fn scan_number(&mut self, start: Pos) -> Token {
        if self.peek() == Some(b'0') {
            match (self.peek_at(1), self.peek_at(2)) {
                (Some(b'x' | b'X'), Some(d)) if d.is_ascii_hexdigit() => {
                    self.advance_n(2);
                    while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                        self.advance();
                    }
                    return self.finish_prefixed_literal(TokenKind::HexLit, start);
                }
                (Some(b'b' | b'B'), Some(b'0' | b'1')) => {
                    self.advance_n(2);
                    while matches!(self.peek(), Some(b'0' | b'1')) {
                        self.advance();
                    }
                    return self.finish_prefixed_literal(TokenKind::BitLit, start);
                }
                _ => {}
            }
        }

        let mut kind = TokenKind::IntLit;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some(b'.') {
            kind = TokenKind::DecLit;
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let signed = matches!(self.peek_at(1), Some(b'+' | b'-'));
            let digit_at = if signed { 2 } else { 1 };
            if self.peek_at(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                kind = TokenKind::FloatLit;
                self.advance_n(digit_at);
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }
        if kind == TokenKind::IntLit && self.peek().is_some_and(is_ident_char_or_multibyte) {
            return self.continue_identifier(start);
        }
        let lit = self.text_from(start);
        self.token(kind, lit, start)
    }

    /// A `0x`/`0b` literal running straight into letters is an identifier.
    fn finish_prefixed_literal(&mut self, kind: TokenKind, start: Pos) -> Token {
        if self.peek().is_some_and(is_ident_char_or_multibyte) {
            return self.continue_identifier(start);
        }
        let lit = self.text_from(start);
        self.token(kind, lit, start)
    }

    /// Scans `X'..'`. The digit count must be even.
    fn scan_hex_string(&mut self, start: Pos) -> Token {
        self.advance_n(2);
        let digits_start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            self.advance();
        }
        let digits = self.pos - digits_start;
        if self.peek() != Some(b'\'') {
            self.skip_to_quote();
            return self.invalid("invalid hexadecimal literal", start);
        }
        self.advance();
        if digits % 2 != 0 {
            return self.invalid("hexadecimal literal needs an even number of digits", start);
        }
        let lit = self.text_from(start);
        self.token(TokenKind::HexLit, lit, start)
    }

    /// Scans `B'..'`.
    fn scan_bit_string(&mut self, start: Pos) -> Token {
        self.advance_n(2);
        while matches!(self.peek(), Some(b'0' | b'1')) {
            self.advance();
        }
        if self.peek() != Some(b'\'') {
            self.skip_to_quote();
            return self.invalid("invalid bit literal", start);
        }
        self.advance();
        let lit = self.text_from(start);
        self.token(TokenKind::BitLit, lit, start)
    }

    fn skip_to_quote(&mut self) {
        while let Some(c) = self.peek() {
            self.advance();
            if c == b'\'' {
                break;
            }
        }
    }

    /// Scans `@name`, `@'name'`, `@@name` and `@@global.name`.
    fn scan_variable(&mut self, start: Pos) -> Token {
        self.advance();
        if self.peek() != Some(b'@') {
            return match self.scan_variable_name() {
                Some(name) => self.token(TokenKind::SingleAtIdentifier, format!("@{name}"), start),
                None => self.invalid("missing user variable name", start),
            };
        }
        self.advance();
        let mut prefix = String::new();
        for scope in ["global.", "session.", "local."] {
            let rest = &self.src[self.pos..];
            if rest.len() >= scope.len() && rest[..scope.len()].eq_ignore_ascii_case(scope.as_bytes())
            {
                prefix = String::from_utf8_lossy(&rest[..scope.len()]).into_owned();
                self.advance_n(scope.len());
                break;
            }
        }
        match self.scan_variable_name() {
            Some(name) => {
                self.token(TokenKind::DoubleAtIdentifier, format!("@@{prefix}{name}"), start)
            }
            None => self.invalid("missing system variable name", start),
        }
    }

    fn scan_variable_name(&mut self) -> Option<String> {
        let c = self.peek()?;
        let bytes = match c {
            b'`' => {
                self.advance();
                self.read_quoted(b'`', false)?
            }
            b'\'' | b'"' => {
                self.advance();
                let escapes = !self.mode.contains(SqlMode::NO_BACKSLASH_ESCAPES);
                self.read_quoted(c, escapes)?
            }
            _ => {
                let name_start = self.pos;
                while let Some(c) = self.peek() {
                    if c >= 0x80 {
                        let n = self.char_len();
                        self.advance_n(n);
                    } else if is_ident_char(c) || c == b'.' {
                        self.advance();
                    } else {
                        break;
                    }
                }
                if self.pos == name_start {
                    return None;
                }
                self.src[name_start..self.pos].to_vec()
            }
        };
        Some(self.charset.decode(&bytes).into_owned())
    }
}

impl Iterator for Scanner {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.is_eof() {
            self.finished = true;
        }
        Some(token)
    }
}

const fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b'$' || c >= 0x80
}

const fn is_ident_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'$'
}

const fn is_ident_char_or_multibyte(c: u8) -> bool {
    is_ident_char(c) || c >= 0x80
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        scan(input, Charset::Utf8mb4, SqlMode::NONE).tokenize()
    }

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        tokens(input).into_iter().map(|t| t.kind).collect()
    }

    fn lits(input: &str) -> Vec<String> {
        tokens(input).into_iter().map(|t| t.lit).collect()
    }

    #[test]
    fn test_simple_select() {
        assert_eq!(
            token_kinds("SELECT id FROM users"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Identifier,
                TokenKind::Keyword(Keyword::From),
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_number_classification() {
        assert_eq!(
            token_kinds("1 1.5 .5 1e5 1.5E-3 0x1F X'1f' 0b101 B'01'"),
            vec![
                TokenKind::IntLit,
                TokenKind::DecLit,
                TokenKind::DecLit,
                TokenKind::FloatLit,
                TokenKind::FloatLit,
                TokenKind::HexLit,
                TokenKind::HexLit,
                TokenKind::BitLit,
                TokenKind::BitLit,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_digits_followed_by_letters_are_identifiers() {
        let toks = tokens("1abc 0x1g 123e");
        assert!(toks[..3].iter().all(|t| t.kind == TokenKind::Identifier));
        assert_eq!(toks[1].lit, "0x1g");
    }

    #[test]
    fn test_odd_hex_string_is_invalid() {
        let mut scanner = scan("X'abc' 1", Charset::Utf8mb4, SqlMode::NONE);
        let first = scanner.next_token();
        assert_eq!(first.kind, TokenKind::Invalid);
        assert_eq!(scanner.next_token().kind, TokenKind::IntLit);
        assert_eq!(scanner.errors().len(), 1);
    }

    #[test]
    fn test_dot_after_name_is_not_a_number() {
        assert_eq!(
            token_kinds("t.5"),
            vec![TokenKind::Identifier, TokenKind::Dot, TokenKind::IntLit, TokenKind::Eof]
        );
    }

    #[test]
    fn test_keyword_after_dot_is_identifier() {
        assert_eq!(
            token_kinds("t.key"),
            vec![TokenKind::Identifier, TokenKind::Dot, TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(lits(r"'a\nb'")[0], "a\nb");
        assert_eq!(lits(r"'it''s'")[0], "it's");
        assert_eq!(lits(r"'\%\_'")[0], r"\%\_");
        assert_eq!(lits(r"'\q'")[0], "q");
        assert_eq!(lits(r#""say \"hi\"""#)[0], "say \"hi\"");
    }

    #[test]
    fn test_no_backslash_escapes() {
        let toks = scan(r"'a\' 1", Charset::Utf8mb4, SqlMode::NO_BACKSLASH_ESCAPES).tokenize();
        assert_eq!(toks[0].kind, TokenKind::StringLit);
        assert_eq!(toks[0].lit, r"a\");
        assert_eq!(toks[1].kind, TokenKind::IntLit);
    }

    #[test]
    fn test_ansi_quotes() {
        let plain = token_kinds(r#""a""#);
        assert_eq!(plain[0], TokenKind::StringLit);
        let ansi = scan(r#""a""b""#, Charset::Utf8mb4, SqlMode::ANSI_QUOTES).tokenize();
        assert_eq!(ansi[0].kind, TokenKind::QuotedIdentifier);
        assert_eq!(ansi[0].lit, "a\"b");
    }

    #[test]
    fn test_back_quoted_identifier() {
        let toks = tokens("`ab``c` `select`");
        assert_eq!(toks[0].kind, TokenKind::QuotedIdentifier);
        assert_eq!(toks[0].lit, "ab`c");
        assert_eq!(toks[1].kind, TokenKind::QuotedIdentifier);
    }

    #[test]
    fn test_variables() {
        assert_eq!(
            lits("@a @'b c' @`d` @@sql_mode @@GLOBAL.sql_mode @@session.x"),
            vec!["@a", "@b c", "@d", "@@sql_mode", "@@GLOBAL.sql_mode", "@@session.x", ""]
        );
        let kinds = token_kinds("@a @@b");
        assert_eq!(kinds[0], TokenKind::SingleAtIdentifier);
        assert_eq!(kinds[1], TokenKind::DoubleAtIdentifier);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            token_kinds("<=> <= <> != << >> >= && || := -> ->> !"),
            vec![
                TokenKind::NullEq,
                TokenKind::Le,
                TokenKind::Ne,
                TokenKind::Ne,
                TokenKind::LeftShift,
                TokenKind::RightShift,
                TokenKind::Ge,
                TokenKind::AndAnd,
                TokenKind::PipePipe,
                TokenKind::Assign,
                TokenKind::JsonExtract,
                TokenKind::JsonUnquoteExtract,
                TokenKind::Bang,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            token_kinds("SELECT -- comment\n 1 # another\n /* block */ + 2"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::IntLit,
                TokenKind::Plus,
                TokenKind::IntLit,
                TokenKind::Eof,
            ]
        );
        // `--` without a following space is two minus signs.
        assert_eq!(
            token_kinds("1--1"),
            vec![
                TokenKind::IntLit,
                TokenKind::Minus,
                TokenKind::Minus,
                TokenKind::IntLit,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_executable_comment() {
        assert_eq!(
            token_kinds("SELECT /*!40100 SQL_NO_CACHE */ 1"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Identifier,
                TokenKind::IntLit,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_hint_markers() {
        assert_eq!(
            token_kinds("SELECT /*+ HASH_JOIN(t) */ 1"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::HintBegin,
                TokenKind::Identifier,
                TokenKind::LeftParen,
                TokenKind::Identifier,
                TokenKind::RightParen,
                TokenKind::HintEnd,
                TokenKind::IntLit,
                TokenKind::Eof,
            ]
        );
        // Outside a hint, `*/` is two operators.
        assert_eq!(
            token_kinds("2 */ 1"),
            vec![
                TokenKind::IntLit,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::IntLit,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_brackets_only_inside_hints() {
        let kinds = token_kinds("/*+ READ_FROM_STORAGE(TIKV[t]) */");
        assert_eq!(kinds[4], TokenKind::LeftBracket);
        assert_eq!(kinds[6], TokenKind::RightBracket);
        assert_eq!(token_kinds("[")[0], TokenKind::Invalid);
    }

    #[test]
    fn test_unterminated_input_is_invalid() {
        for input in ["'abc", "`abc", "/* abc", "@", "X'zz'"] {
            let kinds = token_kinds(input);
            assert_eq!(kinds[0], TokenKind::Invalid, "input: {input}");
            assert_eq!(*kinds.last().unwrap(), TokenKind::Eof, "input: {input}");
        }
    }

    #[test]
    fn test_positions() {
        let toks = tokens("SELECT\n  a,\n b");
        assert_eq!(toks[1].pos, Pos::new(2, 2, 9));
        assert_eq!(toks[3].pos, Pos::new(3, 1, 13));
        assert_eq!(toks[3].end, 14);
    }

    #[test]
    fn test_gbk_trail_byte_is_not_an_escape() {
        // 0xD5 0x5C is one GBK character whose trail byte equals `\`.
        let input: &[u8] = b"'\xd5\x5c' , 1";
        let gbk: Vec<TokenKind> = scan(input, Charset::Gbk, SqlMode::NONE)
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            gbk,
            vec![
                TokenKind::StringLit,
                TokenKind::Comma,
                TokenKind::IntLit,
                TokenKind::Eof,
            ]
        );
        // Read as UTF-8 the same bytes escape the closing quote.
        let utf8: Vec<TokenKind> = scan(input, Charset::Utf8mb4, SqlMode::NONE)
            .map(|t| t.kind)
            .collect();
        assert_eq!(utf8, vec![TokenKind::Invalid, TokenKind::Eof]);
    }

    #[test]
    fn test_literals_are_decoded_per_charset() {
        // `中` is 0xD6 0xD0 in GBK.
        let input: &[u8] = b"select '\xd6\xd0', `\xd6\xd0x`, \xd6\xd0";
        let toks = scan(input, Charset::Gbk, SqlMode::NONE).tokenize();
        assert_eq!(toks[1].kind, TokenKind::StringLit);
        assert_eq!(toks[1].lit, "中");
        assert_eq!(toks[3].kind, TokenKind::QuotedIdentifier);
        assert_eq!(toks[3].lit, "中x");
        assert_eq!(toks[5].kind, TokenKind::Identifier);
        assert_eq!(toks[5].lit, "中");

        let latin1 = scan(b"'caf\xe9'", Charset::Latin1, SqlMode::NONE).tokenize();
        assert_eq!(latin1[0].lit, "café");
    }

    #[test]
    fn test_reset_reuses_scanner() {
        let mut scanner = scan("'oops", Charset::Utf8mb4, SqlMode::NONE);
        assert_eq!(scanner.next_token().kind, TokenKind::Invalid);
        scanner.reset(b"1");
        assert!(scanner.errors().is_empty());
        assert_eq!(scanner.next_token().kind, TokenKind::IntLit);
        assert_eq!(scanner.next_token().kind, TokenKind::Eof);
    }
}
