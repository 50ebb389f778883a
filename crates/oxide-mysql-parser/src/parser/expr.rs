//! Expressions.

use super::parser::{system_var_name, user_var_name, Grammar};
use super::pratt::{
    self, infix_binding_power, prefix_binding_power, token_to_binary_op, token_to_unary_op,
};
use super::Result;
use crate::ast::{
    AggregateFuncExpr, BetweenExpr, BinaryOperationExpr, BoundType, CaseExpr, CastFunctionType,
    CastType, ColumnName, CompareSubqueryExpr, DefaultExpr, ExistsSubqueryExpr, ExprNode,
    FrameBound, FrameClause, FrameType, FuncCallExpr, FuncCastExpr, HasText, IsNullExpr,
    IsTruthExpr, Literal, PartitionByClause, PatternInExpr, PatternLikeExpr,
    PatternRegexpExpr, RowExpr, SetCollationExpr, SubqueryExpr, UnaryOperationExpr, ValuesExpr,
    VariableExpr, WhenClause, WindowFuncExpr, WindowSpec, AGGREGATE_FUNCS, WINDOW_FUNCS,
};
use crate::lexer::{Keyword, TokenKind};
use crate::mode::SqlMode;

/// Keywords that are also function names when followed by `(`.
const KEYWORD_FUNCS: [Keyword; 6] = [
    Keyword::If,
    Keyword::Left,
    Keyword::Right,
    Keyword::Replace,
    Keyword::Insert,
    Keyword::Mod,
];

/// Date and time keywords callable without parentheses.
const NILADIC_FUNCS: [Keyword; 5] = [
    Keyword::CurrentDate,
    Keyword::CurrentTime,
    Keyword::CurrentTimestamp,
    Keyword::Localtime,
    Keyword::Localtimestamp,
];

impl Grammar<'_> {
    pub(super) fn parse_expr(&mut self) -> Result<ExprNode> {
        self.parse_expr_bp(0)
    }

    pub(super) fn parse_expr_list(&mut self) -> Result<Vec<ExprNode>> {
        let mut exprs = Vec::new();
        loop {
            exprs.push(self.parse_expr()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(exprs)
    }

    pub(super) fn parse_expr_bp(&mut self, min_bp: u8) -> Result<ExprNode> {
        self.nested(|p| p.parse_operators(min_bp))
    }

    /// Pratt loop: a prefix expression, then every infix operator binding
    /// tighter than `min_bp`.
    fn parse_operators(&mut self, min_bp: u8) -> Result<ExprNode> {
        let start = self.offset();
        let mut lhs = self.parse_prefix()?;
        let mode = self.config.sql_mode;

        loop {
            let kind = self.peek_kind();
            let Some((l_bp, r_bp)) = infix_binding_power(&kind, &self.nth_kind(1), mode) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            self.advance();
            lhs = self.parse_infix(lhs, kind, r_bp)?;
            lhs.set_text(Some(self.text_from(start)));
        }
        Ok(lhs)
    }

    fn parse_infix(&mut self, lhs: ExprNode, op: TokenKind, r_bp: u8) -> Result<ExprNode> {
        let lhs = Box::new(lhs);
        match op {
            TokenKind::Keyword(Keyword::Collate) => {
                let collate = self.parse_collation_name()?;
                Ok(ExprNode::SetCollation(SetCollationExpr {
                    expr: lhs,
                    collate,
                    text: None,
                }))
            }
            TokenKind::Keyword(Keyword::Is) => self.parse_is(lhs),
            TokenKind::Keyword(Keyword::Not) => {
                let negated = self.advance();
                self.parse_predicate(lhs, negated.kind, true, r_bp)
            }
            TokenKind::Keyword(Keyword::In | Keyword::Between | Keyword::Like | Keyword::Regexp | Keyword::Rlike) => {
                self.parse_predicate(lhs, op, false, r_bp)
            }
            TokenKind::PipePipe if self.config.sql_mode.contains(SqlMode::PIPES_AS_CONCAT) => {
                let rhs = self.parse_expr_bp(r_bp)?;
                Ok(ExprNode::FuncCall(FuncCallExpr {
                    fn_name: "concat".to_owned(),
                    args: vec![*lhs, rhs],
                    text: None,
                }))
            }
            _ => {
                let Some(opcode) = token_to_binary_op(&op) else {
                    return Err(self.error());
                };
                if opcode.is_comparison() {
                    if let Some(all) = self.quantifier() {
                        self.advance();
                        let query = self.parse_subquery()?;
                        return Ok(ExprNode::CompareSubquery(CompareSubqueryExpr {
                            l: lhs,
                            op: opcode,
                            r: Box::new(query),
                            all,
                            text: None,
                        }));
                    }
                }
                let rhs = self.parse_expr_bp(r_bp)?;
                Ok(ExprNode::BinaryOperation(BinaryOperationExpr {
                    op: opcode,
                    l: lhs,
                    r: Box::new(rhs),
                    text: None,
                }))
            }
        }
    }

    /// `ALL`, `ANY` or `SOME` before a subquery: `Some(true)` for `ALL`.
    fn quantifier(&self) -> Option<bool> {
        let token = self.peek();
        let all = if token.is_keyword(Keyword::All) {
            true
        } else if token.is_word("ANY") || token.is_word("SOME") {
            false
        } else {
            return None;
        };
        let subquery = self.nth_kind(1) == TokenKind::LeftParen && self.is_query_start(1);
        subquery.then_some(all)
    }

    /// `IS [NOT] NULL|TRUE|FALSE|UNKNOWN`, after `IS`.
    fn parse_is(&mut self, expr: Box<ExprNode>) -> Result<ExprNode> {
        let not = self.eat_keyword(Keyword::Not);
        if self.eat_keyword(Keyword::Null) || self.eat_word("UNKNOWN") {
            return Ok(ExprNode::IsNull(IsNullExpr {
                expr,
                not,
                text: None,
            }));
        }
        let true_val = if self.eat_keyword(Keyword::True) {
            true
        } else if self.eat_keyword(Keyword::False) {
            false
        } else {
            return Err(self.error());
        };
        Ok(ExprNode::IsTruth(IsTruthExpr {
            expr,
            not,
            true_val,
            text: None,
        }))
    }

    /// `IN`, `BETWEEN`, `LIKE` and `REGEXP`, after the operator keyword.
    fn parse_predicate(
        &mut self,
        expr: Box<ExprNode>,
        op: TokenKind,
        not: bool,
        r_bp: u8,
    ) -> Result<ExprNode> {
        match op {
            TokenKind::Keyword(Keyword::In) => {
                if self.check(TokenKind::LeftParen) && self.nth_kind(1) == TokenKind::Keyword(Keyword::Select) {
                    let sel = self.parse_subquery()?;
                    return Ok(ExprNode::PatternIn(PatternInExpr {
                        expr,
                        list: Vec::new(),
                        not,
                        sel: Some(Box::new(sel)),
                        text: None,
                    }));
                }
                self.expect(TokenKind::LeftParen)?;
                let list = self.parse_expr_list()?;
                self.expect(TokenKind::RightParen)?;
                Ok(ExprNode::PatternIn(PatternInExpr {
                    expr,
                    list,
                    not,
                    sel: None,
                    text: None,
                }))
            }
            TokenKind::Keyword(Keyword::Between) => {
                let left = self.parse_expr_bp(pratt::BIT_OR)?;
                self.expect_keyword(Keyword::And)?;
                let right = self.parse_expr_bp(pratt::BIT_OR)?;
                Ok(ExprNode::Between(BetweenExpr {
                    expr,
                    left: Box::new(left),
                    right: Box::new(right),
                    not,
                    text: None,
                }))
            }
            TokenKind::Keyword(Keyword::Like) => {
                let pattern = self.parse_expr_bp(r_bp)?;
                let mut escape = '\\';
                if self.eat_word("ESCAPE") {
                    let token = self.expect(TokenKind::StringLit)?;
                    let mut chars = token.lit.chars();
                    escape = match (chars.next(), chars.next()) {
                        (None, _) => '\\',
                        (Some(c), None) => c,
                        _ => return Err(self.error_at(&token)),
                    };
                }
                Ok(ExprNode::PatternLike(PatternLikeExpr {
                    expr,
                    pattern: Box::new(pattern),
                    not,
                    escape,
                    text: None,
                }))
            }
            TokenKind::Keyword(Keyword::Regexp | Keyword::Rlike) => {
                let pattern = self.parse_expr_bp(r_bp)?;
                Ok(ExprNode::PatternRegexp(PatternRegexpExpr {
                    expr,
                    pattern: Box::new(pattern),
                    not,
                    text: None,
                }))
            }
            _ => Err(self.error()),
        }
    }

    fn parse_prefix(&mut self) -> Result<ExprNode> {
        let start = self.offset();
        let kind = self.peek_kind();
        let unary =
            prefix_binding_power(&kind, self.config.sql_mode).zip(token_to_unary_op(&kind));
        if let Some((bp, op)) = unary {
            self.advance();
            if kind == TokenKind::Keyword(Keyword::Not) && self.check_keyword(Keyword::Exists) {
                let mut expr = self.parse_prefix()?;
                if let ExprNode::Exists(exists) = &mut expr {
                    exists.not = !exists.not;
                    exists.text = Some(self.text_from(start));
                    return Ok(expr);
                }
                return Err(self.error());
            }
            let operand = self.parse_expr_bp(bp)?;
            return Ok(ExprNode::UnaryOperation(UnaryOperationExpr {
                op,
                v: Box::new(operand),
                text: Some(self.text_from(start)),
            }));
        }
        if self.check_word("BINARY") && self.starts_operand(1) {
            self.advance();
            let operand = self.parse_expr_bp(pratt::COLLATE)?;
            return Ok(ExprNode::FuncCast(FuncCastExpr {
                expr: Box::new(operand),
                tp: CastType::Binary(None),
                function_type: CastFunctionType::BinaryOperator,
                text: Some(self.text_from(start)),
            }));
        }
        let mut expr = self.parse_primary()?;
        if expr.text().is_none() {
            expr.set_text(Some(self.text_from(start)));
        }
        Ok(expr)
    }

    /// Returns true if the token at `n` can start an operand.
    fn starts_operand(&self, n: usize) -> bool {
        let kind = self.nth_kind(n);
        kind.is_literal()
            || kind.is_identifier()
            || matches!(
                kind,
                TokenKind::LeftParen
                    | TokenKind::ParamMarker
                    | TokenKind::SingleAtIdentifier
                    | TokenKind::DoubleAtIdentifier
                    | TokenKind::Minus
                    | TokenKind::Plus
                    | TokenKind::Tilde
                    | TokenKind::Bang
                    | TokenKind::Keyword(
                        Keyword::Null | Keyword::True | Keyword::False | Keyword::Case
                    )
            )
    }

    pub(super) fn parse_primary(&mut self) -> Result<ExprNode> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::IntLit
            | TokenKind::DecLit
            | TokenKind::FloatLit
            | TokenKind::HexLit
            | TokenKind::BitLit
            | TokenKind::StringLit
            | TokenKind::Keyword(Keyword::Null | Keyword::True | Keyword::False) => {
                self.parse_literal()
            }
            TokenKind::ParamMarker => {
                self.advance();
                let mut marker = self.factory.param_marker(token.pos.offset);
                marker.set_order(self.param_count);
                marker.set_text(Some(token.lit));
                self.param_count += 1;
                Ok(ExprNode::ParamMarker(marker))
            }
            TokenKind::SingleAtIdentifier => {
                self.advance();
                let value = if self.eat(TokenKind::Assign) {
                    Some(Box::new(self.parse_expr()?))
                } else {
                    None
                };
                Ok(ExprNode::Variable(VariableExpr {
                    name: user_var_name(&token.lit).to_owned(),
                    is_global: false,
                    is_system: false,
                    explicit_scope: false,
                    value,
                    text: None,
                }))
            }
            TokenKind::DoubleAtIdentifier => {
                self.advance();
                let (name, scope) = system_var_name(&token.lit);
                Ok(ExprNode::Variable(VariableExpr {
                    name: name.to_owned(),
                    is_global: scope == Some(true),
                    is_system: true,
                    explicit_scope: scope.is_some(),
                    value: None,
                    text: None,
                }))
            }
            TokenKind::LeftParen => self.parse_paren(),
            TokenKind::Keyword(Keyword::Case) => self.parse_case(),
            TokenKind::Keyword(Keyword::Exists) => {
                self.advance();
                let sel = self.parse_subquery()?;
                Ok(ExprNode::Exists(ExistsSubqueryExpr {
                    sel: Box::new(sel),
                    not: false,
                    text: None,
                }))
            }
            TokenKind::Keyword(Keyword::Default) => {
                self.advance();
                let name = if self.eat(TokenKind::LeftParen) {
                    let column = self.parse_column_name()?;
                    self.expect(TokenKind::RightParen)?;
                    Some(column)
                } else {
                    None
                };
                Ok(ExprNode::Default(DefaultExpr { name, text: None }))
            }
            TokenKind::Keyword(Keyword::Values) => {
                self.advance();
                self.expect(TokenKind::LeftParen)?;
                let column = self.parse_column_name()?;
                self.expect(TokenKind::RightParen)?;
                Ok(ExprNode::Values(ValuesExpr { column, text: None }))
            }
            TokenKind::Keyword(Keyword::Row) => {
                self.advance();
                self.expect(TokenKind::LeftParen)?;
                let values = self.parse_expr_list()?;
                self.expect(TokenKind::RightParen)?;
                Ok(ExprNode::Row(RowExpr { values, text: None }))
            }
            TokenKind::Keyword(Keyword::Convert) => {
                self.advance();
                self.expect(TokenKind::LeftParen)?;
                let expr = self.parse_expr()?;
                self.expect(TokenKind::Comma)?;
                let tp = self.parse_cast_type()?;
                self.expect(TokenKind::RightParen)?;
                Ok(ExprNode::FuncCast(FuncCastExpr {
                    expr: Box::new(expr),
                    tp,
                    function_type: CastFunctionType::Convert,
                    text: None,
                }))
            }
            TokenKind::Keyword(kw) if NILADIC_FUNCS.contains(&kw) => {
                self.advance();
                let args = if self.eat(TokenKind::LeftParen) {
                    let args = self.parse_call_args()?;
                    self.expect(TokenKind::RightParen)?;
                    args
                } else {
                    Vec::new()
                };
                Ok(ExprNode::FuncCall(FuncCallExpr {
                    fn_name: kw.as_str().to_ascii_lowercase(),
                    args,
                    text: None,
                }))
            }
            TokenKind::Keyword(kw)
                if KEYWORD_FUNCS.contains(&kw) && self.nth_kind(1) == TokenKind::LeftParen =>
            {
                self.advance();
                self.parse_function(&token.lit.to_ascii_lowercase())
            }
            TokenKind::Identifier if token.is_word("CAST") && self.nth_kind(1) == TokenKind::LeftParen => {
                self.advance();
                self.advance();
                let expr = self.parse_expr()?;
                self.expect_keyword(Keyword::As)?;
                let tp = self.parse_cast_type()?;
                self.expect(TokenKind::RightParen)?;
                Ok(ExprNode::FuncCast(FuncCastExpr {
                    expr: Box::new(expr),
                    tp,
                    function_type: CastFunctionType::Cast,
                    text: None,
                }))
            }
            TokenKind::Identifier if self.nth_kind(1) == TokenKind::LeftParen => {
                self.advance();
                self.parse_function(&token.lit.to_ascii_lowercase())
            }
            TokenKind::Identifier | TokenKind::QuotedIdentifier => {
                let start = self.offset();
                let column = ExprNode::column(self.parse_column_name()?);
                self.parse_json_path(column, start)
            }
            _ => Err(self.error()),
        }
    }

    /// `col->'$.path'` and `col->>'$.path'`.
    fn parse_json_path(&mut self, column: ExprNode, start: usize) -> Result<ExprNode> {
        let unquote = match self.peek_kind() {
            TokenKind::JsonExtract => false,
            TokenKind::JsonUnquoteExtract => true,
            _ => return Ok(column),
        };
        self.advance();
        if !self.check(TokenKind::StringLit) {
            return Err(self.error());
        }
        let path = self.parse_literal()?;
        let extract = ExprNode::FuncCall(FuncCallExpr {
            fn_name: "json_extract".to_owned(),
            args: vec![column, path],
            text: Some(self.text_from(start)),
        });
        if !unquote {
            return Ok(extract);
        }
        Ok(ExprNode::FuncCall(FuncCallExpr {
            fn_name: "json_unquote".to_owned(),
            args: vec![extract],
            text: Some(self.text_from(start)),
        }))
    }

    /// `name`, `t.name` or `db.t.name`.
    pub(super) fn parse_column_name(&mut self) -> Result<ColumnName> {
        let start = self.offset();
        let first = self.expect_ident()?;
        let mut parts = vec![first];
        while parts.len() < 3 && self.check(TokenKind::Dot) && self.nth_kind(1).is_identifier() {
            self.advance();
            parts.push(self.advance().lit);
        }
        let text = Some(self.text_from(start));
        let mut parts = parts.into_iter();
        let column = match (parts.next(), parts.next(), parts.next()) {
            (Some(name), None, None) => ColumnName {
                text,
                ..ColumnName::new(name)
            },
            (Some(table), Some(name), None) => ColumnName {
                table: Some(table),
                text,
                ..ColumnName::new(name)
            },
            (Some(schema), Some(table), Some(name)) => ColumnName {
                schema: Some(schema),
                table: Some(table),
                name,
                text,
            },
            _ => return Err(self.error()),
        };
        Ok(column)
    }

    /// A literal token handed to the value factory.
    fn parse_literal(&mut self) -> Result<ExprNode> {
        let start = self.offset();
        let token = self.advance();
        let literal = match token.kind {
            TokenKind::IntLit => int_literal(&token.lit),
            TokenKind::DecLit => Literal::Decimal(token.lit),
            TokenKind::FloatLit => match token.lit.parse::<f64>() {
                Ok(f) if f.is_finite() => Literal::Float(f),
                _ => return Err(self.error_at(&token)),
            },
            TokenKind::HexLit => match hex_bytes(&token.lit) {
                Some(bytes) => Literal::Hex(bytes),
                None => return Err(self.error_at(&token)),
            },
            TokenKind::BitLit => match bit_bytes(&token.lit) {
                Some(bytes) => Literal::Bit(bytes),
                None => return Err(self.error_at(&token)),
            },
            TokenKind::StringLit => {
                let mut s = token.lit;
                while self.check(TokenKind::StringLit) {
                    s.push_str(&self.advance().lit);
                }
                Literal::String(s)
            }
            TokenKind::Keyword(Keyword::True) => Literal::Bool(true),
            TokenKind::Keyword(Keyword::False) => Literal::Bool(false),
            TokenKind::Keyword(Keyword::Null) => Literal::Null,
            _ => return Err(self.error_at(&token)),
        };
        let mut value = self.factory.value_expr(literal);
        value.set_text(Some(self.text_from(start)));
        Ok(ExprNode::Value(value))
    }

    /// `(SELECT ...)`, `(expr)` or `(expr, expr, ...)`.
    fn parse_paren(&mut self) -> Result<ExprNode> {
        if self.nth_kind(1) == TokenKind::Keyword(Keyword::Select) {
            return self.parse_subquery();
        }
        self.expect(TokenKind::LeftParen)?;
        let first = self.parse_expr()?;
        if self.eat(TokenKind::Comma) {
            let mut values = vec![first];
            values.extend(self.parse_expr_list()?);
            self.expect(TokenKind::RightParen)?;
            return Ok(ExprNode::Row(RowExpr { values, text: None }));
        }
        self.expect(TokenKind::RightParen)?;
        Ok(ExprNode::paren(first))
    }

    /// A parenthesized query.
    fn parse_subquery(&mut self) -> Result<ExprNode> {
        let start = self.offset();
        self.expect(TokenKind::LeftParen)?;
        let query = self.parse_query()?;
        self.expect(TokenKind::RightParen)?;
        Ok(ExprNode::Subquery(SubqueryExpr {
            query: Box::new(query.into_result_set()),
            text: Some(self.text_from(start)),
        }))
    }

    fn parse_case(&mut self) -> Result<ExprNode> {
        self.expect_keyword(Keyword::Case)?;
        let value = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };
        let mut when_clauses = Vec::new();
        while self.check_keyword(Keyword::When) {
            let start = self.offset();
            self.advance();
            let expr = self.parse_expr()?;
            self.expect_keyword(Keyword::Then)?;
            let result = self.parse_expr()?;
            when_clauses.push(WhenClause {
                expr: Box::new(expr),
                result: Box::new(result),
                text: Some(self.text_from(start)),
            });
        }
        if when_clauses.is_empty() {
            return Err(self.error());
        }
        let else_clause = if self.eat_keyword(Keyword::Else) {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect_word("END")?;
        Ok(ExprNode::Case(CaseExpr {
            value,
            when_clauses,
            else_clause,
            text: None,
        }))
    }

    // --- Functions ---

    /// A call to `name`, with the cursor on the opening parenthesis.
    fn parse_function(&mut self, name: &str) -> Result<ExprNode> {
        self.expect(TokenKind::LeftParen)?;
        if AGGREGATE_FUNCS.contains(&name) {
            return self.parse_aggregate(name);
        }
        if self.config.enable_window_func && WINDOW_FUNCS.contains(&name) {
            let args = self.parse_call_args()?;
            self.expect(TokenKind::RightParen)?;
            let from_last = self.parse_from_first_last()?;
            let ignore_null = self.parse_null_treatment()?;
            if !self.eat_word("OVER") {
                return Err(self.error());
            }
            let spec = self.parse_window_spec()?;
            return Ok(ExprNode::WindowFunc(WindowFuncExpr {
                f: name.to_owned(),
                args,
                distinct: false,
                ignore_null,
                from_last,
                spec,
                text: None,
            }));
        }
        let args = self.parse_call_args()?;
        self.expect(TokenKind::RightParen)?;
        Ok(ExprNode::FuncCall(FuncCallExpr {
            fn_name: name.to_owned(),
            args,
            text: None,
        }))
    }

    /// Arguments up to, not including, the closing parenthesis.
    fn parse_call_args(&mut self) -> Result<Vec<ExprNode>> {
        if self.check(TokenKind::RightParen) {
            return Ok(Vec::new());
        }
        self.parse_expr_list()
    }

    fn parse_aggregate(&mut self, name: &str) -> Result<ExprNode> {
        let distinct = if self.eat_keyword(Keyword::Distinct) || self.eat_keyword(Keyword::Distinctrow) {
            true
        } else {
            self.eat_keyword(Keyword::All);
            false
        };
        let args = if name == "count" && !distinct && self.check(TokenKind::Star) {
            let star = self.advance();
            let mut one = self.factory.value_expr(Literal::Int(1));
            one.set_text(Some(star.lit));
            vec![ExprNode::Value(one)]
        } else {
            self.parse_call_args()?
        };
        self.expect(TokenKind::RightParen)?;

        if self.config.enable_window_func && self.eat_word("OVER") {
            let spec = self.parse_window_spec()?;
            return Ok(ExprNode::WindowFunc(WindowFuncExpr {
                f: name.to_owned(),
                args,
                distinct,
                ignore_null: false,
                from_last: false,
                spec,
                text: None,
            }));
        }
        Ok(ExprNode::AggregateFunc(AggregateFuncExpr {
            f: name.to_owned(),
            args,
            distinct,
            text: None,
        }))
    }

    /// `FROM FIRST | FROM LAST`: true for `LAST`.
    fn parse_from_first_last(&mut self) -> Result<bool> {
        let follows = self.check_keyword(Keyword::From)
            && (self.nth(1).is_word("FIRST") || self.nth(1).is_word("LAST"));
        if !follows {
            return Ok(false);
        }
        self.advance();
        Ok(self.advance().is_word("LAST"))
    }

    /// `RESPECT NULLS | IGNORE NULLS`: true for `IGNORE`.
    fn parse_null_treatment(&mut self) -> Result<bool> {
        let ignore = if self.eat_keyword(Keyword::Ignore) {
            true
        } else if self.eat_word("RESPECT") {
            false
        } else {
            return Ok(false);
        };
        self.expect_word("NULLS")?;
        Ok(ignore)
    }

    /// After `OVER`: a window name or a parenthesized specification.
    fn parse_window_spec(&mut self) -> Result<WindowSpec> {
        let start = self.offset();
        if self.is_ident() {
            let name = self.advance().lit;
            return Ok(WindowSpec {
                name: Some(name),
                only_alias: true,
                text: Some(self.text_from(start)),
                ..WindowSpec::default()
            });
        }
        self.expect(TokenKind::LeftParen)?;
        let mut spec = self.parse_window_body()?;
        self.expect(TokenKind::RightParen)?;
        spec.text = Some(self.text_from(start));
        Ok(spec)
    }

    /// `[ref] [PARTITION BY ...] [ORDER BY ...] [frame]`, inside the
    /// parentheses.
    pub(super) fn parse_window_body(&mut self) -> Result<WindowSpec> {
        let mut spec = WindowSpec::default();
        if self.is_ident() {
            spec.reference = Some(self.advance().lit);
        }
        if self.check_keyword(Keyword::Partition) {
            let start = self.offset();
            self.advance();
            self.expect_keyword(Keyword::By)?;
            let items = self.parse_by_items()?;
            spec.partition_by = Some(PartitionByClause {
                items,
                text: Some(self.text_from(start)),
            });
        }
        spec.order_by = self.parse_order_by(false)?;
        let tp = if self.check_keyword(Keyword::Rows) {
            Some(FrameType::Rows)
        } else if self.check_keyword(Keyword::Range) {
            Some(FrameType::Ranges)
        } else {
            None
        };
        if let Some(tp) = tp {
            let start = self.offset();
            self.advance();
            let (frame_start, frame_end) = if self.eat_keyword(Keyword::Between) {
                let frame_start = self.parse_frame_bound()?;
                self.expect_keyword(Keyword::And)?;
                (frame_start, self.parse_frame_bound()?)
            } else {
                (self.parse_frame_bound()?, FrameBound::current_row())
            };
            spec.frame = Some(FrameClause {
                tp,
                start: frame_start,
                end: frame_end,
                text: Some(self.text_from(start)),
            });
        }
        Ok(spec)
    }

    fn parse_frame_bound(&mut self) -> Result<FrameBound> {
        if self.eat_word("CURRENT") {
            self.expect_keyword(Keyword::Row)?;
            return Ok(FrameBound::current_row());
        }
        let (unbounded, expr) = if self.eat_word("UNBOUNDED") {
            (true, None)
        } else {
            (false, Some(Box::new(self.parse_expr_bp(pratt::BIT_OR)?)))
        };
        let kind = if self.eat_word("PRECEDING") {
            BoundType::Preceding
        } else if self.eat_word("FOLLOWING") {
            BoundType::Following
        } else {
            return Err(self.error());
        };
        Ok(FrameBound {
            kind,
            unbounded,
            expr,
        })
    }
}

/// An integer literal: `i64` if it fits, then `u64`, else decimal.
fn int_literal(lit: &str) -> Literal {
    if let Ok(n) = lit.parse::<i64>() {
        return Literal::Int(n);
    }
    if let Ok(n) = lit.parse::<u64>() {
        return Literal::Uint(n);
    }
    Literal::Decimal(lit.to_owned())
}

/// Bytes of `0x1F` or `X'1F'`. An odd digit count is padded on the left.
fn hex_bytes(lit: &str) -> Option<Vec<u8>> {
    let digits = if let Some(rest) = lit.strip_prefix("0x") {
        rest
    } else {
        lit.get(2..lit.len().checked_sub(1)?)?
    };
    let padded = if digits.len() % 2 == 1 {
        format!("0{digits}")
    } else {
        digits.to_owned()
    };
    (0..padded.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(padded.get(i..i + 2)?, 16).ok())
        .collect()
}

/// Bytes of `0b101` or `B'101'`, big-endian, padded to whole bytes.
fn bit_bytes(lit: &str) -> Option<Vec<u8>> {
    let digits = if let Some(rest) = lit.strip_prefix("0b") {
        rest
    } else {
        lit.get(2..lit.len().checked_sub(1)?)?
    };
    if digits.is_empty() {
        return Some(Vec::new());
    }
    let pad = (8 - digits.len() % 8) % 8;
    let padded = format!("{}{digits}", "0".repeat(pad));
    (0..padded.len())
        .step_by(8)
        .map(|i| u8::from_str_radix(padded.get(i..i + 8)?, 2).ok())
        .collect()
}
