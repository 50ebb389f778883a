//! Token cursor and statement dispatch.

use tracing::debug;

use super::error::{codes, HintWarning, ParseError};
use super::Result;
use crate::ast::{
    BeginStmt, ColumnName, CommitStmt, DoStmt, ExplainStmt, ExprNode, HasText, RollbackStmt,
    SetStmt, StmtNode, UseStmt, ValueFactory, VariableAssignment,
};
use crate::config::ParserConfig;
use crate::lexer::{scan, Charset, Keyword, LexicalError, Pos, Token, TokenKind};

/// Statement keywords that may carry an optimizer hint.
const HINTED: [Keyword; 5] = [
    Keyword::Select,
    Keyword::Insert,
    Keyword::Replace,
    Keyword::Update,
    Keyword::Delete,
];

/// Deepest nesting of expressions, queries and table references.
const MAX_DEPTH: usize = 64;

/// Recursive descent parser over a pre-scanned token buffer.
///
/// The buffer always ends with an `Eof` token, and the cursor never moves
/// past it.
pub(super) struct Grammar<'a> {
    pub(super) src: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    prev_end: usize,
    pub(super) config: &'a ParserConfig,
    pub(super) factory: &'a dyn ValueFactory,
    lexical_errors: Vec<LexicalError>,
    pub(super) param_count: usize,
    pub(super) warnings: Vec<HintWarning>,
    depth: usize,
}

impl<'a> Grammar<'a> {
    pub(super) fn new(
        src: &'a str,
        config: &'a ParserConfig,
        factory: &'a dyn ValueFactory,
    ) -> Self {
        let mut scanner = scan(src, Charset::Utf8mb4, config.sql_mode);
        let scanned: Vec<Token> = scanner.by_ref().collect();
        let lexical_errors = scanner.errors().to_vec();

        // Hint comments only mean something right after a statement keyword.
        let mut tokens = Vec::with_capacity(scanned.len());
        let mut in_dropped_hint = false;
        for token in scanned {
            if in_dropped_hint {
                in_dropped_hint = !matches!(token.kind, TokenKind::HintEnd | TokenKind::Eof);
                if token.kind != TokenKind::Eof {
                    continue;
                }
            }
            if token.kind == TokenKind::HintBegin {
                let hinted = tokens
                    .last()
                    .is_some_and(|prev: &Token| HINTED.iter().any(|kw| prev.is_keyword(*kw)));
                if !hinted {
                    in_dropped_hint = true;
                    continue;
                }
            }
            tokens.push(token);
        }
        if !tokens.last().is_some_and(Token::is_eof) {
            tokens.push(Token::new(
                TokenKind::Eof,
                "",
                Pos::new(1, 0, src.len()),
                src.len(),
            ));
        }

        Self {
            src,
            tokens,
            pos: 0,
            prev_end: 0,
            config,
            factory,
            lexical_errors,
            param_count: 0,
            warnings: Vec::new(),
            depth: 0,
        }
    }

    /// Parses the next statement, skipping empty ones.
    ///
    /// Returns `None` at the end of input. After an error the cursor is
    /// moved to the next `;`, so the following call starts on a fresh
    /// statement.
    pub(super) fn next_statement(&mut self) -> Option<Result<StmtNode>> {
        while self.eat(TokenKind::Semicolon) {}
        if self.check(TokenKind::Eof) {
            return None;
        }
        let result = self.statement_with_text();
        if let Err(err) = &result {
            debug!(error = %err, "statement failed to parse");
            while !matches!(self.peek_kind(), TokenKind::Semicolon | TokenKind::Eof) {
                self.advance();
            }
        }
        Some(result)
    }

    fn statement_with_text(&mut self) -> Result<StmtNode> {
        let start = self.offset();
        self.param_count = 0;
        self.depth = 0;
        let mut stmt = self.parse_statement()?;
        if !matches!(self.peek_kind(), TokenKind::Semicolon | TokenKind::Eof) {
            return Err(self.error());
        }
        stmt.set_text(Some(self.text_from(start)));
        Ok(stmt)
    }

    pub(super) fn parse_statement(&mut self) -> Result<StmtNode> {
        match self.peek_kind() {
            TokenKind::Keyword(Keyword::Select) | TokenKind::LeftParen => {
                Ok(self.parse_query()?.into_stmt())
            }
            TokenKind::Keyword(Keyword::Insert | Keyword::Replace) => {
                Ok(StmtNode::Insert(Box::new(self.parse_insert()?)))
            }
            TokenKind::Keyword(Keyword::Update) => {
                Ok(StmtNode::Update(Box::new(self.parse_update()?)))
            }
            TokenKind::Keyword(Keyword::Delete) => {
                Ok(StmtNode::Delete(Box::new(self.parse_delete()?)))
            }
            TokenKind::Keyword(Keyword::Create) => {
                Ok(StmtNode::CreateTable(Box::new(self.parse_create_table()?)))
            }
            TokenKind::Keyword(Keyword::Drop) => Ok(StmtNode::DropTable(self.parse_drop_table()?)),
            TokenKind::Keyword(Keyword::Explain | Keyword::Desc) => {
                Ok(StmtNode::Explain(self.parse_explain()?))
            }
            TokenKind::Keyword(Keyword::Set) => Ok(StmtNode::Set(self.parse_set()?)),
            TokenKind::Keyword(Keyword::Use) => {
                self.advance();
                let db_name = self.expect_ident()?;
                Ok(StmtNode::Use(UseStmt {
                    db_name,
                    text: None,
                }))
            }
            TokenKind::Identifier => self.parse_word_statement(),
            _ => Err(self.error()),
        }
    }

    /// Statements introduced by non-reserved words.
    fn parse_word_statement(&mut self) -> Result<StmtNode> {
        let word = self.peek().lit.to_ascii_uppercase();
        match word.as_str() {
            "DESCRIBE" => Ok(StmtNode::Explain(self.parse_explain()?)),
            "DO" => {
                self.advance();
                let exprs = self.parse_expr_list()?;
                Ok(StmtNode::Do(DoStmt { exprs, text: None }))
            }
            "BEGIN" => {
                self.advance();
                self.eat_word("WORK");
                Ok(StmtNode::Begin(BeginStmt::default()))
            }
            "START" => {
                self.advance();
                self.expect_word("TRANSACTION")?;
                Ok(StmtNode::Begin(BeginStmt::default()))
            }
            "COMMIT" => {
                self.advance();
                self.eat_word("WORK");
                Ok(StmtNode::Commit(CommitStmt::default()))
            }
            "ROLLBACK" => {
                self.advance();
                self.eat_word("WORK");
                Ok(StmtNode::Rollback(RollbackStmt::default()))
            }
            _ => Err(self.error()),
        }
    }

    fn parse_explain(&mut self) -> Result<ExplainStmt> {
        self.advance();
        let analyze = self.eat_keyword(Keyword::Analyze);
        let explainable = matches!(
            self.peek_kind(),
            TokenKind::Keyword(
                Keyword::Select
                    | Keyword::Insert
                    | Keyword::Replace
                    | Keyword::Update
                    | Keyword::Delete
            ) | TokenKind::LeftParen
        );
        if !explainable {
            return Err(self.error());
        }
        let start = self.offset();
        let mut stmt = self.parse_statement()?;
        stmt.set_text(Some(self.text_from(start)));
        Ok(ExplainStmt {
            stmt: Box::new(stmt),
            analyze,
            text: None,
        })
    }

    fn parse_set(&mut self) -> Result<SetStmt> {
        self.expect_keyword(Keyword::Set)?;
        let mut variables = Vec::new();
        loop {
            variables.push(self.parse_variable_assignment()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(SetStmt {
            variables,
            text: None,
        })
    }

    fn parse_variable_assignment(&mut self) -> Result<VariableAssignment> {
        let token = self.peek().clone();
        let (name, is_global, is_system) = match token.kind {
            TokenKind::SingleAtIdentifier => {
                self.advance();
                (user_var_name(&token.lit).to_owned(), false, false)
            }
            TokenKind::DoubleAtIdentifier => {
                self.advance();
                let (name, scope) = system_var_name(&token.lit);
                (name.to_owned(), scope == Some(true), true)
            }
            TokenKind::Identifier
                if ["GLOBAL", "SESSION", "LOCAL"].iter().any(|w| token.is_word(w)) =>
            {
                self.advance();
                let name = self.expect_ident()?;
                (name, token.is_word("GLOBAL"), true)
            }
            TokenKind::Identifier | TokenKind::QuotedIdentifier => {
                self.advance();
                (token.lit, false, true)
            }
            _ => return Err(self.error()),
        };
        if !(self.eat(TokenKind::Eq) || self.eat(TokenKind::Assign)) {
            return Err(self.error());
        }
        let value = if self.eat_keyword(Keyword::On) {
            ExprNode::column(ColumnName::new("ON"))
        } else {
            self.parse_expr()?
        };
        Ok(VariableAssignment {
            name,
            value: Box::new(value),
            is_global,
            is_system,
            text: None,
        })
    }

    // --- Cursor ---

    pub(super) fn nth(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    pub(super) fn peek(&self) -> &Token {
        self.nth(0)
    }

    pub(super) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub(super) fn nth_kind(&self, n: usize) -> TokenKind {
        self.nth(n).kind
    }

    /// Byte offset of the current token.
    pub(super) fn offset(&self) -> usize {
        self.peek().pos.offset
    }

    /// Moves past the current token and returns it.
    pub(super) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !token.is_eof() {
            self.pos += 1;
            self.prev_end = token.end;
        }
        token
    }

    /// Current cursor index, for backtracking inside hints.
    pub(super) const fn mark(&self) -> usize {
        self.pos
    }

    pub(super) fn reset_to(&mut self, mark: usize) {
        self.pos = mark;
    }

    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub(super) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.peek().is_keyword(keyword)
    }

    pub(super) fn check_word(&self, word: &str) -> bool {
        self.peek().is_word(word)
    }

    pub(super) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            return true;
        }
        false
    }

    pub(super) fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        self.eat(TokenKind::Keyword(keyword))
    }

    pub(super) fn eat_word(&mut self, word: &str) -> bool {
        if self.check_word(word) {
            self.advance();
            return true;
        }
        false
    }

    pub(super) fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        Err(self.error())
    }

    pub(super) fn expect_keyword(&mut self, keyword: Keyword) -> Result<()> {
        self.expect(TokenKind::Keyword(keyword)).map(drop)
    }

    pub(super) fn expect_word(&mut self, word: &str) -> Result<()> {
        if self.eat_word(word) {
            return Ok(());
        }
        Err(self.error())
    }

    /// Returns true if the current token is a name.
    pub(super) fn is_ident(&self) -> bool {
        self.peek_kind().is_identifier()
    }

    pub(super) fn expect_ident(&mut self) -> Result<String> {
        if self.is_ident() {
            return Ok(self.advance().lit);
        }
        Err(self.error())
    }

    /// Returns true if a query starts at token `n`, looking through any
    /// number of opening parentheses.
    pub(super) fn is_query_start(&self, n: usize) -> bool {
        let mut i = n;
        while self.nth_kind(i) == TokenKind::LeftParen {
            i += 1;
        }
        self.nth_kind(i) == TokenKind::Keyword(Keyword::Select)
    }

    /// Source text from byte `start` to the end of the last consumed token.
    pub(super) fn text_from(&self, start: usize) -> String {
        self.src
            .get(start..self.prev_end)
            .unwrap_or_default()
            .to_owned()
    }

    /// Runs `parse` one nesting level deeper, failing past [`MAX_DEPTH`].
    pub(super) fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::with_message(
                codes::PARSE_ERROR,
                format!("statement nesting exceeds {MAX_DEPTH} levels"),
                self.peek().pos,
                self.src,
            ));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// A syntax error at the current token.
    pub(super) fn error(&self) -> ParseError {
        self.error_at(self.peek())
    }

    pub(super) fn error_at(&self, token: &Token) -> ParseError {
        if token.kind == TokenKind::Invalid {
            let lexical = self
                .lexical_errors
                .iter()
                .find(|err| err.pos.offset == token.pos.offset);
            if let Some(err) = lexical {
                return ParseError::with_message(
                    codes::SYNTAX_ERROR,
                    err.message.clone(),
                    token.pos,
                    self.src,
                );
            }
        }
        ParseError::syntax(token.pos, self.src)
    }
}

/// Strips the `@` of a user variable token.
pub(super) fn user_var_name(lit: &str) -> &str {
    lit.strip_prefix('@').unwrap_or(lit)
}

/// Splits a system variable token into its name and scope: `Some(true)`
/// for `global.`, `Some(false)` for `session.` or `local.`, `None` when no
/// scope is written.
pub(super) fn system_var_name(lit: &str) -> (&str, Option<bool>) {
    let rest = lit.strip_prefix("@@").unwrap_or(lit);
    for (scope, global) in [("global.", true), ("session.", false), ("local.", false)] {
        if rest.len() > scope.len() && rest[..scope.len()].eq_ignore_ascii_case(scope) {
            return (&rest[scope.len()..], Some(global));
        }
    }
    (rest, None)
}
