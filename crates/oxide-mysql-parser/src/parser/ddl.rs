//! `CREATE TABLE`, `DROP TABLE` and data types.

use super::error::ParseError;
use super::parser::Grammar;
use super::pratt;
use super::Result;
use crate::ast::{
    CastType, ColumnDef, ColumnOption, ColumnOptionKind, Constraint, ConstraintType,
    CreateTableStmt, DataType, DropTableStmt, IndexColName, IndexOption, IndexType, ReferOption,
    ReferenceDef, TableOption, TypeName,
};
use crate::lexer::{Charset, Collation, Keyword, TokenKind};

impl Grammar<'_> {
    pub(super) fn parse_create_table(&mut self) -> Result<CreateTableStmt> {
        self.expect_keyword(Keyword::Create)?;
        self.expect_keyword(Keyword::Table)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let table = self.parse_table_name()?;
        let mut stmt = CreateTableStmt {
            if_not_exists,
            table,
            refer_table: None,
            cols: Vec::new(),
            constraints: Vec::new(),
            options: Vec::new(),
            text: None,
        };

        if self.eat_keyword(Keyword::Like) {
            stmt.refer_table = Some(self.parse_table_name()?);
            return Ok(stmt);
        }
        self.expect(TokenKind::LeftParen)?;
        if self.eat_keyword(Keyword::Like) {
            stmt.refer_table = Some(self.parse_table_name()?);
            self.expect(TokenKind::RightParen)?;
            return Ok(stmt);
        }
        loop {
            if self.is_constraint_start() {
                stmt.constraints.push(self.parse_constraint()?);
            } else {
                stmt.cols.push(self.parse_column_def()?);
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RightParen)?;
        stmt.options = self.parse_table_options()?;
        Ok(stmt)
    }

    fn parse_if_not_exists(&mut self) -> Result<bool> {
        if !self.eat_keyword(Keyword::If) {
            return Ok(false);
        }
        self.expect_keyword(Keyword::Not)?;
        self.expect_keyword(Keyword::Exists)?;
        Ok(true)
    }

    pub(super) fn parse_drop_table(&mut self) -> Result<DropTableStmt> {
        self.expect_keyword(Keyword::Drop)?;
        if !(self.eat_keyword(Keyword::Table) || self.eat_word("TABLES")) {
            return Err(self.error());
        }
        let if_exists = if self.eat_keyword(Keyword::If) {
            self.expect_keyword(Keyword::Exists)?;
            true
        } else {
            false
        };
        let mut tables = Vec::new();
        loop {
            tables.push(self.parse_table_name()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(DropTableStmt {
            if_exists,
            tables,
            text: None,
        })
    }

    fn is_constraint_start(&self) -> bool {
        matches!(
            self.peek_kind(),
            TokenKind::Keyword(
                Keyword::Constraint
                    | Keyword::Primary
                    | Keyword::Unique
                    | Keyword::Index
                    | Keyword::Key
                    | Keyword::Foreign
                    | Keyword::Fulltext
            )
        )
    }

    // --- Columns ---

    fn parse_column_def(&mut self) -> Result<ColumnDef> {
        let start = self.offset();
        let name = self.parse_column_name()?;
        let tp = self.parse_data_type()?;
        let mut options = Vec::new();
        while let Some(option) = self.parse_column_option()? {
            options.push(option);
        }
        Ok(ColumnDef {
            name,
            tp,
            options,
            text: Some(self.text_from(start)),
        })
    }

    fn parse_column_option(&mut self) -> Result<Option<ColumnOption>> {
        let start = self.offset();
        let kind = match self.peek_kind() {
            TokenKind::Keyword(Keyword::Not) => {
                self.advance();
                self.expect_keyword(Keyword::Null)?;
                ColumnOptionKind::NotNull
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                ColumnOptionKind::Null
            }
            TokenKind::Keyword(Keyword::Default) => {
                self.advance();
                let expr = self.parse_expr_bp(pratt::COLLATE + 1)?;
                ColumnOptionKind::Default(Box::new(expr))
            }
            TokenKind::Keyword(Keyword::Primary) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                ColumnOptionKind::PrimaryKey
            }
            TokenKind::Keyword(Keyword::Key) => {
                self.advance();
                ColumnOptionKind::PrimaryKey
            }
            TokenKind::Keyword(Keyword::Unique) => {
                self.advance();
                self.eat_keyword(Keyword::Key);
                ColumnOptionKind::UniqueKey
            }
            TokenKind::Keyword(Keyword::On) => {
                self.advance();
                self.expect_keyword(Keyword::Update)?;
                let expr = self.parse_expr_bp(pratt::COLLATE + 1)?;
                ColumnOptionKind::OnUpdate(Box::new(expr))
            }
            TokenKind::Keyword(Keyword::Generated | Keyword::As) => self.parse_generated()?,
            TokenKind::Keyword(Keyword::References) => {
                ColumnOptionKind::References(self.parse_reference_def()?)
            }
            TokenKind::Keyword(Keyword::Collate) => {
                self.advance();
                ColumnOptionKind::Collate(self.parse_collation_name()?)
            }
            TokenKind::Identifier if self.check_word("AUTO_INCREMENT") => {
                self.advance();
                ColumnOptionKind::AutoIncrement
            }
            TokenKind::Identifier if self.check_word("COMMENT") => {
                self.advance();
                ColumnOptionKind::Comment(self.expect(TokenKind::StringLit)?.lit)
            }
            _ => return Ok(None),
        };
        Ok(Some(ColumnOption {
            kind,
            text: Some(self.text_from(start)),
        }))
    }

    /// `[GENERATED ALWAYS] AS (expr) [STORED | VIRTUAL]`
    fn parse_generated(&mut self) -> Result<ColumnOptionKind> {
        if self.eat_keyword(Keyword::Generated) {
            self.expect_word("ALWAYS")?;
        }
        self.expect_keyword(Keyword::As)?;
        self.expect(TokenKind::LeftParen)?;
        let expr = self.parse_expr()?;
        self.expect(TokenKind::RightParen)?;
        let stored = if self.eat_keyword(Keyword::Stored) {
            true
        } else {
            self.eat_keyword(Keyword::Virtual);
            false
        };
        Ok(ColumnOptionKind::Generated {
            expr: Box::new(expr),
            stored,
        })
    }

    /// `REFERENCES t (cols) [ON DELETE opt] [ON UPDATE opt]`
    fn parse_reference_def(&mut self) -> Result<ReferenceDef> {
        let start = self.offset();
        self.expect_keyword(Keyword::References)?;
        let table = self.parse_table_name()?;
        let cols = self.parse_index_cols()?;
        let mut refer = ReferenceDef {
            table,
            cols,
            on_delete: None,
            on_update: None,
            text: None,
        };
        while self.check_keyword(Keyword::On) {
            match self.nth_kind(1) {
                TokenKind::Keyword(Keyword::Delete) => {
                    self.advance();
                    self.advance();
                    refer.on_delete = Some(self.parse_refer_option()?);
                }
                TokenKind::Keyword(Keyword::Update) => {
                    self.advance();
                    self.advance();
                    refer.on_update = Some(self.parse_refer_option()?);
                }
                _ => break,
            }
        }
        refer.text = Some(self.text_from(start));
        Ok(refer)
    }

    fn parse_refer_option(&mut self) -> Result<ReferOption> {
        if self.eat_keyword(Keyword::Restrict) {
            return Ok(ReferOption::Restrict);
        }
        if self.eat_keyword(Keyword::Cascade) {
            return Ok(ReferOption::Cascade);
        }
        if self.eat_keyword(Keyword::Set) {
            if self.eat_keyword(Keyword::Null) {
                return Ok(ReferOption::SetNull);
            }
            self.expect_keyword(Keyword::Default)?;
            return Ok(ReferOption::SetDefault);
        }
        if self.eat_word("NO") {
            self.expect_word("ACTION")?;
            return Ok(ReferOption::NoAction);
        }
        Err(self.error())
    }

    // --- Constraints ---

    fn parse_constraint(&mut self) -> Result<Constraint> {
        let start = self.offset();
        let mut name = None;
        if self.eat_keyword(Keyword::Constraint) && self.is_ident() {
            name = Some(self.advance().lit);
        }
        let tp = match self.peek_kind() {
            TokenKind::Keyword(Keyword::Primary) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                ConstraintType::PrimaryKey
            }
            TokenKind::Keyword(Keyword::Unique) => {
                self.advance();
                if !self.eat_keyword(Keyword::Key) {
                    self.eat_keyword(Keyword::Index);
                }
                ConstraintType::Unique
            }
            TokenKind::Keyword(Keyword::Index | Keyword::Key) => {
                self.advance();
                ConstraintType::Index
            }
            TokenKind::Keyword(Keyword::Foreign) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                ConstraintType::ForeignKey
            }
            TokenKind::Keyword(Keyword::Fulltext) => {
                self.advance();
                if !self.eat_keyword(Keyword::Key) {
                    self.eat_keyword(Keyword::Index);
                }
                ConstraintType::Fulltext
            }
            _ => return Err(self.error()),
        };
        if self.is_ident() {
            name = Some(self.advance().lit);
        }
        if tp == ConstraintType::PrimaryKey {
            name = None;
        }

        let mut option = IndexOption::default();
        self.parse_index_using(&mut option)?;
        let keys = self.parse_index_cols()?;
        loop {
            if self.check_keyword(Keyword::Using) {
                self.parse_index_using(&mut option)?;
            } else if self.eat_word("COMMENT") {
                option.comment = Some(self.expect(TokenKind::StringLit)?.lit);
            } else {
                break;
            }
        }
        let refer = if tp == ConstraintType::ForeignKey {
            Some(self.parse_reference_def()?)
        } else {
            None
        };
        Ok(Constraint {
            tp,
            name,
            keys,
            refer,
            option,
            text: Some(self.text_from(start)),
        })
    }

    fn parse_index_using(&mut self, option: &mut IndexOption) -> Result<()> {
        if !self.eat_keyword(Keyword::Using) {
            return Ok(());
        }
        option.using = if self.eat_word("BTREE") {
            Some(IndexType::BTree)
        } else if self.eat_word("HASH") {
            Some(IndexType::Hash)
        } else {
            return Err(self.error());
        };
        Ok(())
    }

    /// `(col[(len)] [ASC|DESC], ...)`
    fn parse_index_cols(&mut self) -> Result<Vec<IndexColName>> {
        self.expect(TokenKind::LeftParen)?;
        let mut cols = Vec::new();
        loop {
            let start = self.offset();
            let column = self.parse_column_name()?;
            let length = if self.eat(TokenKind::LeftParen) {
                let len = self.parse_u32()?;
                self.expect(TokenKind::RightParen)?;
                Some(len)
            } else {
                None
            };
            if !self.eat_keyword(Keyword::Asc) {
                self.eat_keyword(Keyword::Desc);
            }
            cols.push(IndexColName {
                column,
                length,
                text: Some(self.text_from(start)),
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RightParen)?;
        Ok(cols)
    }

    // --- Table options ---

    fn parse_table_options(&mut self) -> Result<Vec<TableOption>> {
        let mut options = Vec::new();
        loop {
            if !options.is_empty() {
                self.eat(TokenKind::Comma);
            }
            let option = if self.eat_word("ENGINE") {
                self.eat(TokenKind::Eq);
                if self.is_ident() || self.check(TokenKind::StringLit) {
                    TableOption::Engine(self.advance().lit)
                } else {
                    return Err(self.error());
                }
            } else if self.check_keyword(Keyword::Default)
                || self.check_keyword(Keyword::Character)
                || self.check_word("CHARSET")
                || self.check_keyword(Keyword::Collate)
            {
                self.eat_keyword(Keyword::Default);
                if self.eat_keyword(Keyword::Collate) {
                    self.eat(TokenKind::Eq);
                    TableOption::Collate(self.parse_collation_name()?)
                } else {
                    self.parse_charset_keyword()?;
                    self.eat(TokenKind::Eq);
                    TableOption::Charset(self.parse_charset_name()?)
                }
            } else if self.eat_word("AUTO_INCREMENT") {
                self.eat(TokenKind::Eq);
                TableOption::AutoIncrement(self.parse_u64()?)
            } else if self.eat_word("COMMENT") {
                self.eat(TokenKind::Eq);
                TableOption::Comment(self.expect(TokenKind::StringLit)?.lit)
            } else {
                if self.check(TokenKind::Comma) {
                    return Err(self.error());
                }
                return Ok(options);
            };
            options.push(option);
        }
    }

    /// `CHARACTER SET` or `CHARSET`.
    fn parse_charset_keyword(&mut self) -> Result<()> {
        if self.eat_keyword(Keyword::Character) {
            return self.expect_keyword(Keyword::Set);
        }
        self.expect_word("CHARSET")
    }

    /// A charset name, validated and returned in canonical form.
    fn parse_charset_name(&mut self) -> Result<String> {
        let token = self.peek().clone();
        let label = match token.kind {
            TokenKind::Identifier | TokenKind::QuotedIdentifier | TokenKind::StringLit => {
                token.lit
            }
            _ => return Err(self.error()),
        };
        self.advance();
        Charset::lookup(&label)
            .map(|cs| cs.name().to_owned())
            .ok_or(ParseError::UnknownCharset(label))
    }

    /// A collation name, validated and lowercased.
    pub(super) fn parse_collation_name(&mut self) -> Result<String> {
        let token = self.peek().clone();
        if !(token.kind.is_identifier() || token.kind == TokenKind::StringLit) {
            return Err(self.error());
        }
        self.advance();
        Collation::lookup(&token.lit)
            .map(|collation| collation.name.to_owned())
            .ok_or(ParseError::UnknownCollation(token.lit))
    }

    // --- Data types ---

    pub(super) fn parse_data_type(&mut self) -> Result<DataType> {
        let token = self.peek().clone();
        let tp = match token.kind {
            TokenKind::Identifier => TypeName::from_word(&token.lit),
            TokenKind::Keyword(Keyword::Set) => Some(TypeName::Set),
            TokenKind::Keyword(Keyword::Character) => Some(TypeName::Char),
            _ => None,
        };
        let Some(tp) = tp else {
            return Err(self.error());
        };
        self.advance();
        let mut data_type = DataType::new(tp);
        if tp == TypeName::Double {
            self.eat_word("PRECISION");
        }
        if token.is_word("BOOL") || token.is_word("BOOLEAN") {
            data_type.flen = Some(1);
        }

        if matches!(tp, TypeName::Enum | TypeName::Set) {
            self.expect(TokenKind::LeftParen)?;
            loop {
                data_type.elems.push(self.expect(TokenKind::StringLit)?.lit);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RightParen)?;
        } else if self.eat(TokenKind::LeftParen) {
            data_type.flen = Some(self.parse_u32()?);
            if self.eat(TokenKind::Comma) {
                data_type.decimal = Some(self.parse_u32()?);
            }
            self.expect(TokenKind::RightParen)?;
        }

        loop {
            if self.eat_keyword(Keyword::Unsigned) {
                data_type.unsigned = true;
            } else if self.eat_keyword(Keyword::Zerofill) {
                data_type.zerofill = true;
                data_type.unsigned = true;
            } else if !self.eat_word("SIGNED") {
                break;
            }
        }

        if self.check_keyword(Keyword::Character) || self.check_word("CHARSET") {
            self.parse_charset_keyword()?;
            data_type.charset = Some(self.parse_charset_name()?);
        }
        if self.check_keyword(Keyword::Collate) {
            self.advance();
            let collate = self.parse_collation_name()?;
            if let Some(charset) = &data_type.charset {
                let matches = Collation::lookup(&collate)
                    .is_some_and(|collation| collation.charset.name() == charset.as_str());
                if !matches {
                    return Err(ParseError::CollationMismatch {
                        charset: charset.clone(),
                        collation: collate,
                    });
                }
            }
            data_type.collate = Some(collate);
        }
        Ok(data_type)
    }

    /// The target type of `CAST` and `CONVERT`.
    pub(super) fn parse_cast_type(&mut self) -> Result<CastType> {
        let token = self.peek().clone();
        if token.is_keyword(Keyword::Character) {
            self.advance();
            return self.parse_char_cast();
        }
        if token.is_keyword(Keyword::Unsigned) {
            self.advance();
            if !self.eat_word("INT") {
                self.eat_word("INTEGER");
            }
            return Ok(CastType::Unsigned);
        }
        if token.kind != TokenKind::Identifier {
            return Err(self.error());
        }
        let word = token.lit.to_ascii_uppercase();
        self.advance();
        match word.as_str() {
            "BINARY" => Ok(CastType::Binary(self.parse_opt_len()?)),
            "CHAR" => self.parse_char_cast(),
            "DATE" => Ok(CastType::Date),
            "DATETIME" => Ok(CastType::DateTime(self.parse_opt_len()?)),
            "TIME" => Ok(CastType::Time(self.parse_opt_len()?)),
            "DECIMAL" => {
                let (mut precision, mut scale) = (None, None);
                if self.eat(TokenKind::LeftParen) {
                    precision = Some(self.parse_u32()?);
                    if self.eat(TokenKind::Comma) {
                        scale = Some(self.parse_u32()?);
                    }
                    self.expect(TokenKind::RightParen)?;
                }
                Ok(CastType::Decimal { precision, scale })
            }
            "SIGNED" => {
                if !self.eat_word("INT") {
                    self.eat_word("INTEGER");
                }
                Ok(CastType::Signed)
            }
            "JSON" => Ok(CastType::Json),
            "DOUBLE" => Ok(CastType::Double),
            _ => Err(self.error_at(&token)),
        }
    }

    fn parse_char_cast(&mut self) -> Result<CastType> {
        let len = self.parse_opt_len()?;
        let charset = if self.check_keyword(Keyword::Character) || self.check_word("CHARSET") {
            self.parse_charset_keyword()?;
            Some(self.parse_charset_name()?)
        } else {
            None
        };
        Ok(CastType::Char { len, charset })
    }

    /// `[(n)]`
    fn parse_opt_len(&mut self) -> Result<Option<u32>> {
        if !self.eat(TokenKind::LeftParen) {
            return Ok(None);
        }
        let len = self.parse_u32()?;
        self.expect(TokenKind::RightParen)?;
        Ok(Some(len))
    }

    fn parse_u32(&mut self) -> Result<u32> {
        if self.check(TokenKind::IntLit) {
            if let Ok(n) = self.peek().lit.parse() {
                self.advance();
                return Ok(n);
            }
        }
        Err(self.error())
    }

    fn parse_u64(&mut self) -> Result<u64> {
        if self.check(TokenKind::IntLit) {
            if let Ok(n) = self.peek().lit.parse() {
                self.advance();
                return Ok(n);
            }
        }
        Err(self.error())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{parse_one, parser};
    use crate::ast::StmtNode;
    use crate::parser::ParseError;
    use crate::restore::{restore_sql, RestoreFlags};

    fn restore(sql: &str) -> String {
        restore_sql(&parse_one(sql), RestoreFlags::DEFAULT).unwrap()
    }

    #[test]
    fn test_create_table() {
        assert_eq!(
            restore(
                "create table if not exists db.t (
                    id bigint(20) unsigned not null auto_increment,
                    name varchar(64) character set utf8mb4 collate utf8mb4_bin default '' comment 'n',
                    flag bool,
                    price decimal(10,2) zerofill,
                    primary key (id),
                    unique key uk (name(10)),
                    key idx using btree (name, id desc) comment 'x'
                ) engine = InnoDB default charset = utf8mb4 auto_increment 10 comment 'tbl'"
            ),
            "CREATE TABLE IF NOT EXISTS `db`.`t` (\
             `id` BIGINT(20) UNSIGNED NOT NULL AUTO_INCREMENT,\
             `name` VARCHAR(64) CHARACTER SET UTF8MB4 COLLATE utf8mb4_bin DEFAULT '' COMMENT 'n',\
             `flag` TINYINT(1),\
             `price` DECIMAL(10,2) UNSIGNED ZEROFILL,\
             PRIMARY KEY(`id`),\
             UNIQUE KEY `uk`(`name`(10)),\
             INDEX `idx`(`name`, `id`) USING BTREE COMMENT 'x') \
             ENGINE = InnoDB DEFAULT CHARACTER SET = UTF8MB4 AUTO_INCREMENT = 10 COMMENT = 'tbl'"
        );
    }

    #[test]
    fn test_foreign_key_and_generated_column() {
        assert_eq!(
            restore(
                "create table c (pid int references p (id) on delete cascade, \
                 v int as (pid + 1) stored, \
                 constraint fk foreign key (pid) references p (id) on update set null)"
            ),
            "CREATE TABLE `c` (\
             `pid` INT REFERENCES `p`(`id`) ON DELETE CASCADE,\
             `v` INT GENERATED ALWAYS AS(`pid`+1) STORED,\
             CONSTRAINT `fk` FOREIGN KEY (`pid`) REFERENCES `p`(`id`) ON UPDATE SET NULL)"
        );
    }

    #[test]
    fn test_create_table_like() {
        assert_eq!(restore("create table t like s"), "CREATE TABLE `t` LIKE `s`");
        assert_eq!(restore("create table t (like s)"), "CREATE TABLE `t` LIKE `s`");
    }

    #[test]
    fn test_collation_must_match_charset() {
        let err = parser()
            .parse("create table t (a char(1) charset latin1 collate utf8mb4_bin)", "", "")
            .unwrap_err();
        assert!(matches!(err, ParseError::CollationMismatch { .. }));
        let err = parser()
            .parse("create table t (a char(1) charset klingon)", "", "")
            .unwrap_err();
        assert_eq!(err, ParseError::UnknownCharset("klingon".to_owned()));
    }

    #[test]
    fn test_drop_table() {
        assert_eq!(
            restore("drop table if exists t1, db.t2"),
            "DROP TABLE IF EXISTS `t1`, `db`.`t2`"
        );
        assert!(matches!(parse_one("drop tables t"), StmtNode::DropTable(_)));
    }

    #[test]
    fn test_cast_types() {
        assert_eq!(
            restore("select cast(a as char(10) charset utf8), convert(b, signed integer), cast(c as decimal(5,2))"),
            "SELECT CAST(`a` AS CHAR(10) CHARACTER SET UTF8), CONVERT(`b`, SIGNED), CAST(`c` AS DECIMAL(5,2))"
        );
        assert!(parser().parse("select cast(a as blob)", "", "").is_err());
    }
}
