//! Column and cast data types.

use core::fmt;

use crate::restore::{Restore, RestoreCtx, Result};

/// Base name of a column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeName {
    /// `TINYINT`, also `BOOL` / `BOOLEAN` as `TINYINT(1)`.
    TinyInt,
    /// `SMALLINT`
    SmallInt,
    /// `MEDIUMINT`
    MediumInt,
    /// `INT` / `INTEGER`
    Int,
    /// `BIGINT`
    BigInt,
    /// `DECIMAL` / `NUMERIC` / `DEC` / `FIXED`
    Decimal,
    /// `FLOAT`
    Float,
    /// `DOUBLE` / `REAL`
    Double,
    /// `BIT`
    Bit,
    /// `DATE`
    Date,
    /// `TIME`
    Time,
    /// `DATETIME`
    DateTime,
    /// `TIMESTAMP`
    Timestamp,
    /// `YEAR`
    Year,
    /// `CHAR`
    Char,
    /// `VARCHAR`
    VarChar,
    /// `BINARY`
    Binary,
    /// `VARBINARY`
    VarBinary,
    /// `TINYTEXT`
    TinyText,
    /// `TEXT`
    Text,
    /// `MEDIUMTEXT`
    MediumText,
    /// `LONGTEXT`
    LongText,
    /// `TINYBLOB`
    TinyBlob,
    /// `BLOB`
    Blob,
    /// `MEDIUMBLOB`
    MediumBlob,
    /// `LONGBLOB`
    LongBlob,
    /// `ENUM(...)`
    Enum,
    /// `SET(...)`
    Set,
    /// `JSON`
    Json,
}

impl TypeName {
    /// Resolves a type keyword, including aliases such as `INTEGER` or
    /// `NUMERIC`. Matching ignores case.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        let tp = match word.to_ascii_uppercase().as_str() {
            "TINYINT" | "INT1" | "BOOL" | "BOOLEAN" => Self::TinyInt,
            "SMALLINT" | "INT2" => Self::SmallInt,
            "MEDIUMINT" | "INT3" | "MIDDLEINT" => Self::MediumInt,
            "INT" | "INTEGER" | "INT4" => Self::Int,
            "BIGINT" | "INT8" => Self::BigInt,
            "DECIMAL" | "NUMERIC" | "DEC" | "FIXED" => Self::Decimal,
            "FLOAT" | "FLOAT4" => Self::Float,
            "DOUBLE" | "REAL" | "FLOAT8" => Self::Double,
            "BIT" => Self::Bit,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "DATETIME" => Self::DateTime,
            "TIMESTAMP" => Self::Timestamp,
            "YEAR" => Self::Year,
            "CHAR" | "CHARACTER" => Self::Char,
            "VARCHAR" | "VARCHARACTER" => Self::VarChar,
            "BINARY" => Self::Binary,
            "VARBINARY" => Self::VarBinary,
            "TINYTEXT" => Self::TinyText,
            "TEXT" => Self::Text,
            "MEDIUMTEXT" | "LONG" => Self::MediumText,
            "LONGTEXT" => Self::LongText,
            "TINYBLOB" => Self::TinyBlob,
            "BLOB" => Self::Blob,
            "MEDIUMBLOB" => Self::MediumBlob,
            "LONGBLOB" => Self::LongBlob,
            "ENUM" => Self::Enum,
            "SET" => Self::Set,
            "JSON" => Self::Json,
            _ => return None,
        };
        Some(tp)
    }

    /// Returns the canonical SQL spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TinyInt => "TINYINT",
            Self::SmallInt => "SMALLINT",
            Self::MediumInt => "MEDIUMINT",
            Self::Int => "INT",
            Self::BigInt => "BIGINT",
            Self::Decimal => "DECIMAL",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Bit => "BIT",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::DateTime => "DATETIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Year => "YEAR",
            Self::Char => "CHAR",
            Self::VarChar => "VARCHAR",
            Self::Binary => "BINARY",
            Self::VarBinary => "VARBINARY",
            Self::TinyText => "TINYTEXT",
            Self::Text => "TEXT",
            Self::MediumText => "MEDIUMTEXT",
            Self::LongText => "LONGTEXT",
            Self::TinyBlob => "TINYBLOB",
            Self::Blob => "BLOB",
            Self::MediumBlob => "MEDIUMBLOB",
            Self::LongBlob => "LONGBLOB",
            Self::Enum => "ENUM",
            Self::Set => "SET",
            Self::Json => "JSON",
        }
    }

    /// Integer types accept `UNSIGNED` and `ZEROFILL`.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::TinyInt
                | Self::SmallInt
                | Self::MediumInt
                | Self::Int
                | Self::BigInt
                | Self::Decimal
                | Self::Float
                | Self::Double
        )
    }

    /// Character types accept `CHARACTER SET` and `COLLATE`.
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(
            self,
            Self::Char
                | Self::VarChar
                | Self::TinyText
                | Self::Text
                | Self::MediumText
                | Self::LongText
                | Self::Enum
                | Self::Set
        )
    }
}

/// A column type with its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataType {
    /// Base type.
    pub tp: TypeName,
    /// Display width, length, precision or fractional seconds.
    pub flen: Option<u32>,
    /// Scale of `DECIMAL`, `FLOAT` and `DOUBLE`.
    pub decimal: Option<u32>,
    /// `UNSIGNED`
    pub unsigned: bool,
    /// `ZEROFILL`
    pub zerofill: bool,
    /// `CHARACTER SET`, lower case.
    pub charset: Option<String>,
    /// `COLLATE`, lower case.
    pub collate: Option<String>,
    /// Members of `ENUM` and `SET`.
    pub elems: Vec<String>,
}

impl DataType {
    /// Creates a type with no attributes.
    #[must_use]
    pub const fn new(tp: TypeName) -> Self {
        Self {
            tp,
            flen: None,
            decimal: None,
            unsigned: false,
            zerofill: false,
            charset: None,
            collate: None,
            elems: Vec::new(),
        }
    }

    /// Sets the length.
    #[must_use]
    pub const fn with_len(mut self, flen: u32) -> Self {
        self.flen = Some(flen);
        self
    }

    /// Sets `UNSIGNED`.
    #[must_use]
    pub const fn unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }
}

impl Restore for DataType {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        ctx.write_keyword(self.tp.as_str())?;
        if matches!(self.tp, TypeName::Enum | TypeName::Set) {
            ctx.write_plain("(")?;
            for (i, elem) in self.elems.iter().enumerate() {
                if i > 0 {
                    ctx.write_plain(",")?;
                }
                ctx.write_string(elem)?;
            }
            ctx.write_plain(")")?;
        } else if let Some(flen) = self.flen {
            match self.decimal {
                Some(decimal) => ctx.write_fmt_plain(format_args!("({flen},{decimal})"))?,
                None => ctx.write_fmt_plain(format_args!("({flen})"))?,
            }
        }
        if self.unsigned {
            ctx.write_keyword(" UNSIGNED")?;
        }
        if self.zerofill {
            ctx.write_keyword(" ZEROFILL")?;
        }
        if let Some(charset) = &self.charset {
            ctx.write_keyword(" CHARACTER SET ")?;
            ctx.write_keyword(charset)?;
        }
        if let Some(collate) = &self.collate {
            ctx.write_keyword(" COLLATE ")?;
            ctx.write_plain(collate)?;
        }
        Ok(())
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sql = crate::restore::restore_sql(self, crate::restore::RestoreFlags::DEFAULT)
            .map_err(|_| fmt::Error)?;
        f.write_str(&sql)
    }
}

/// Target type of `CAST` and `CONVERT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastType {
    /// `BINARY[(n)]`
    Binary(Option<u32>),
    /// `CHAR[(n)] [CHARACTER SET cs]`
    Char {
        /// Length.
        len: Option<u32>,
        /// Character set, lower case.
        charset: Option<String>,
    },
    /// `DATE`
    Date,
    /// `DATETIME[(fsp)]`
    DateTime(Option<u32>),
    /// `DECIMAL[(m[,d])]`
    Decimal {
        /// Precision.
        precision: Option<u32>,
        /// Scale.
        scale: Option<u32>,
    },
    /// `TIME[(fsp)]`
    Time(Option<u32>),
    /// `SIGNED [INTEGER]`
    Signed,
    /// `UNSIGNED [INTEGER]`
    Unsigned,
    /// `JSON`
    Json,
    /// `DOUBLE`
    Double,
}

impl Restore for CastType {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        let paren = |ctx: &mut RestoreCtx<'_>, n: Option<u32>| match n {
            Some(n) => ctx.write_fmt_plain(format_args!("({n})")),
            None => Ok(()),
        };
        match self {
            Self::Binary(len) => {
                ctx.write_keyword("BINARY")?;
                paren(ctx, *len)
            }
            Self::Char { len, charset } => {
                ctx.write_keyword("CHAR")?;
                paren(ctx, *len)?;
                if let Some(charset) = charset {
                    ctx.write_keyword(" CHARACTER SET ")?;
                    ctx.write_keyword(charset)?;
                }
                Ok(())
            }
            Self::Date => ctx.write_keyword("DATE"),
            Self::DateTime(fsp) => {
                ctx.write_keyword("DATETIME")?;
                paren(ctx, *fsp)
            }
            Self::Decimal { precision, scale } => {
                ctx.write_keyword("DECIMAL")?;
                match (precision, scale) {
                    (Some(p), Some(s)) => ctx.write_fmt_plain(format_args!("({p},{s})")),
                    (Some(p), None) => ctx.write_fmt_plain(format_args!("({p})")),
                    _ => Ok(()),
                }
            }
            Self::Time(fsp) => {
                ctx.write_keyword("TIME")?;
                paren(ctx, *fsp)
            }
            Self::Signed => ctx.write_keyword("SIGNED"),
            Self::Unsigned => ctx.write_keyword("UNSIGNED"),
            Self::Json => ctx.write_keyword("JSON"),
            Self::Double => ctx.write_keyword("DOUBLE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::restore::{restore_sql, RestoreFlags};

    #[test]
    fn test_type_aliases() {
        assert_eq!(TypeName::from_word("integer"), Some(TypeName::Int));
        assert_eq!(TypeName::from_word("NUMERIC"), Some(TypeName::Decimal));
        assert_eq!(TypeName::from_word("real"), Some(TypeName::Double));
        assert_eq!(TypeName::from_word("money"), None);
    }

    #[test]
    fn test_data_type_restore() {
        let mut tp = DataType::new(TypeName::Decimal).unsigned();
        tp.flen = Some(10);
        tp.decimal = Some(2);
        assert_eq!(tp.to_string(), "DECIMAL(10,2) UNSIGNED");

        let mut tp = DataType::new(TypeName::VarChar).with_len(255);
        tp.charset = Some("utf8mb4".to_owned());
        tp.collate = Some("utf8mb4_bin".to_owned());
        assert_eq!(
            tp.to_string(),
            "VARCHAR(255) CHARACTER SET UTF8MB4 COLLATE utf8mb4_bin"
        );

        let mut tp = DataType::new(TypeName::Enum);
        tp.elems = vec!["a".to_owned(), "b'c".to_owned()];
        assert_eq!(tp.to_string(), "ENUM('a','b''c')");
    }

    #[test]
    fn test_cast_type_restore() {
        let cases = [
            (CastType::Signed, "SIGNED"),
            (CastType::Binary(Some(4)), "BINARY(4)"),
            (
                CastType::Char {
                    len: None,
                    charset: Some("utf8".to_owned()),
                },
                "CHAR CHARACTER SET UTF8",
            ),
            (
                CastType::Decimal {
                    precision: Some(5),
                    scale: Some(1),
                },
                "DECIMAL(5,1)",
            ),
            (CastType::DateTime(Some(6)), "DATETIME(6)"),
        ];
        for (tp, expected) in cases {
            assert_eq!(restore_sql(&tp, RestoreFlags::DEFAULT).unwrap(), expected);
        }
    }
}
