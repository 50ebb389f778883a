//! Operator codes for unary and binary expressions.

use crate::restore::{Restore, RestoreCtx, Result};

/// An operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// AND, &&
    LogicAnd,
    /// OR, ||
    LogicOr,
    /// XOR
    LogicXor,
    /// >=
    Ge,
    /// <=
    Le,
    /// =
    Eq,
    /// !=, <>
    Ne,
    /// <
    Lt,
    /// >
    Gt,
    /// <=>
    NullEq,
    /// +
    Plus,
    /// -
    Minus,
    /// &
    BitAnd,
    /// |
    BitOr,
    /// ^
    BitXor,
    /// %, MOD
    Mod,
    /// /
    Div,
    /// *
    Mul,
    /// DIV
    IntDiv,
    /// <<
    LeftShift,
    /// >>
    RightShift,
    /// NOT
    Not,
    /// !
    Not2,
    /// ~
    BitNeg,
}

impl Opcode {
    /// Returns the SQL spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LogicAnd => "AND",
            Self::LogicOr => "OR",
            Self::LogicXor => "XOR",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::NullEq => "<=>",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Mod => "%",
            Self::Div => "/",
            Self::Mul => "*",
            Self::IntDiv => "DIV",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::Not => "NOT",
            Self::Not2 => "!",
            Self::BitNeg => "~",
        }
    }

    /// Returns true if the operator is spelled as a word.
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(
            self,
            Self::LogicAnd | Self::LogicOr | Self::LogicXor | Self::IntDiv | Self::Not
        )
    }

    /// Returns true for comparison operators, which may take `ANY`/`ALL`
    /// subqueries.
    #[must_use]
    pub const fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Ge | Self::Le | Self::Eq | Self::Ne | Self::Lt | Self::Gt | Self::NullEq
        )
    }

    /// Writes the operator as a binary infix, with surrounding spaces for
    /// word operators or when the flags ask for them.
    pub(crate) fn restore_infix(self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        let spaced = self.is_keyword()
            || ctx
                .flags()
                .contains(crate::restore::RestoreFlags::SPACES_AROUND_BINARY_OPERATION);
        if spaced {
            ctx.write_plain(" ")?;
        }
        self.restore(ctx)?;
        if spaced {
            ctx.write_plain(" ")?;
        }
        Ok(())
    }
}

impl Restore for Opcode {
    fn restore(&self, ctx: &mut RestoreCtx<'_>) -> Result<()> {
        if self.is_keyword() {
            ctx.write_keyword(self.as_str())
        } else {
            ctx.write_plain(self.as_str())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::restore::{restore_sql, RestoreFlags};

    #[test]
    fn test_keyword_operators_follow_case_flags() {
        assert_eq!(restore_sql(&Opcode::LogicAnd, RestoreFlags::DEFAULT).unwrap(), "AND");
        assert_eq!(
            restore_sql(&Opcode::IntDiv, RestoreFlags::KEYWORD_LOWERCASE).unwrap(),
            "div"
        );
        assert_eq!(restore_sql(&Opcode::NullEq, RestoreFlags::DEFAULT).unwrap(), "<=>");
    }

    #[test]
    fn test_comparison_set() {
        assert!(Opcode::Eq.is_comparison());
        assert!(Opcode::NullEq.is_comparison());
        assert!(!Opcode::Plus.is_comparison());
    }
}
