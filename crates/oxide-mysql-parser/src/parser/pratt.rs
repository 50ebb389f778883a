//! Pratt expression parser for operator precedence.
//!
//! Binding powers follow MySQL, loosest first: `OR ||`, `XOR`, `AND &&`,
//! `NOT`, `BETWEEN`, comparisons with `IS LIKE REGEXP IN`, `|`, `&`,
//! `<< >>`, `+ -`, `* / DIV % MOD`, `^`, unary `- ~`, `!`, then
//! `BINARY` and `COLLATE`.

use crate::ast::Opcode;
use crate::lexer::{Keyword, TokenKind};
use crate::mode::SqlMode;

pub(super) const OR: u8 = 2;
pub(super) const XOR: u8 = 4;
pub(super) const AND: u8 = 6;
/// Operand of a prefix `NOT`.
pub(super) const NOT: u8 = 9;
pub(super) const BETWEEN: u8 = 10;
pub(super) const COMPARISON: u8 = 12;
pub(super) const BIT_OR: u8 = 14;
pub(super) const BIT_AND: u8 = 16;
pub(super) const SHIFT: u8 = 18;
pub(super) const ADDITIVE: u8 = 20;
pub(super) const MULTIPLICATIVE: u8 = 22;
pub(super) const BIT_XOR: u8 = 24;
pub(super) const CONCAT: u8 = 26;
pub(super) const UNARY: u8 = 28;
pub(super) const BANG: u8 = 30;
pub(super) const COLLATE: u8 = 32;

/// Returns the operand binding power of a prefix operator.
///
/// Returns `None` if the token is not a prefix operator.
#[must_use]
pub const fn prefix_binding_power(kind: &TokenKind, mode: SqlMode) -> Option<u8> {
    match kind {
        TokenKind::Minus | TokenKind::Plus | TokenKind::Tilde => Some(UNARY),
        TokenKind::Bang => Some(BANG),
        TokenKind::Keyword(Keyword::Not) if mode.contains(SqlMode::HIGH_NOT_PRECEDENCE) => {
            Some(BANG)
        }
        TokenKind::Keyword(Keyword::Not) => Some(NOT),
        _ => None,
    }
}

/// Returns the infix binding power for a token.
///
/// Returns `(left_bp, right_bp)` where:
/// - Higher binding power = binds tighter
/// - Left associative: left_bp < right_bp
///
/// `next` is the token after `kind`; `NOT` is only infix in `NOT IN`,
/// `NOT LIKE`, `NOT BETWEEN` and `NOT REGEXP`. Postfix operators (`IS`,
/// `COLLATE`) are reported here too.
///
/// Returns `None` if the token is not an infix operator.
#[must_use]
pub const fn infix_binding_power(
    kind: &TokenKind,
    next: &TokenKind,
    mode: SqlMode,
) -> Option<(u8, u8)> {
    let lbp = match kind {
        TokenKind::PipePipe if mode.contains(SqlMode::PIPES_AS_CONCAT) => CONCAT,
        TokenKind::Keyword(Keyword::Or) | TokenKind::PipePipe => OR,
        TokenKind::Keyword(Keyword::Xor) => XOR,
        TokenKind::Keyword(Keyword::And) | TokenKind::AndAnd => AND,
        TokenKind::Keyword(Keyword::Between) => BETWEEN,
        TokenKind::Keyword(Keyword::Not) => match next {
            TokenKind::Keyword(Keyword::Between) => BETWEEN,
            TokenKind::Keyword(Keyword::In | Keyword::Like | Keyword::Regexp | Keyword::Rlike) => {
                COMPARISON
            }
            _ => return None,
        },
        TokenKind::Eq
        | TokenKind::NullEq
        | TokenKind::Ne
        | TokenKind::Lt
        | TokenKind::Le
        | TokenKind::Gt
        | TokenKind::Ge
        | TokenKind::Keyword(
            Keyword::Is | Keyword::In | Keyword::Like | Keyword::Regexp | Keyword::Rlike,
        ) => COMPARISON,
        TokenKind::Pipe => BIT_OR,
        TokenKind::Ampersand => BIT_AND,
        TokenKind::LeftShift | TokenKind::RightShift => SHIFT,
        TokenKind::Plus | TokenKind::Minus => ADDITIVE,
        TokenKind::Star
        | TokenKind::Slash
        | TokenKind::Percent
        | TokenKind::Keyword(Keyword::Div | Keyword::Mod) => MULTIPLICATIVE,
        TokenKind::Caret => BIT_XOR,
        TokenKind::Keyword(Keyword::Collate) => COLLATE,
        _ => return None,
    };
    Some((lbp, lbp + 1))
}

/// Converts a token to a binary operator.
#[must_use]
pub const fn token_to_binary_op(kind: &TokenKind) -> Option<Opcode> {
    match kind {
        TokenKind::Keyword(Keyword::Or) | TokenKind::PipePipe => Some(Opcode::LogicOr),
        TokenKind::Keyword(Keyword::Xor) => Some(Opcode::LogicXor),
        TokenKind::Keyword(Keyword::And) | TokenKind::AndAnd => Some(Opcode::LogicAnd),
        TokenKind::Eq => Some(Opcode::Eq),
        TokenKind::NullEq => Some(Opcode::NullEq),
        TokenKind::Ne => Some(Opcode::Ne),
        TokenKind::Lt => Some(Opcode::Lt),
        TokenKind::Le => Some(Opcode::Le),
        TokenKind::Gt => Some(Opcode::Gt),
        TokenKind::Ge => Some(Opcode::Ge),
        TokenKind::Pipe => Some(Opcode::BitOr),
        TokenKind::Ampersand => Some(Opcode::BitAnd),
        TokenKind::Caret => Some(Opcode::BitXor),
        TokenKind::LeftShift => Some(Opcode::LeftShift),
        TokenKind::RightShift => Some(Opcode::RightShift),
        TokenKind::Plus => Some(Opcode::Plus),
        TokenKind::Minus => Some(Opcode::Minus),
        TokenKind::Star => Some(Opcode::Mul),
        TokenKind::Slash => Some(Opcode::Div),
        TokenKind::Keyword(Keyword::Div) => Some(Opcode::IntDiv),
        TokenKind::Percent | TokenKind::Keyword(Keyword::Mod) => Some(Opcode::Mod),
        _ => None,
    }
}

/// Converts a token to a unary operator.
#[must_use]
pub const fn token_to_unary_op(kind: &TokenKind) -> Option<Opcode> {
    match kind {
        TokenKind::Minus => Some(Opcode::Minus),
        TokenKind::Plus => Some(Opcode::Plus),
        TokenKind::Tilde => Some(Opcode::BitNeg),
        TokenKind::Bang => Some(Opcode::Not2),
        TokenKind::Keyword(Keyword::Not) => Some(Opcode::Not),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infix(kind: TokenKind) -> (u8, u8) {
        infix_binding_power(&kind, &TokenKind::Eof, SqlMode::NONE).unwrap()
    }

    #[test]
    fn test_precedence_ordering() {
        // Multiplication should bind tighter than addition
        assert!(infix(TokenKind::Star).0 > infix(TokenKind::Plus).0);

        // AND should bind tighter than XOR, which binds tighter than OR
        let and_bp = infix(TokenKind::Keyword(Keyword::And));
        let xor_bp = infix(TokenKind::Keyword(Keyword::Xor));
        let or_bp = infix(TokenKind::Keyword(Keyword::Or));
        assert!(and_bp.0 > xor_bp.0);
        assert!(xor_bp.0 > or_bp.0);

        // Comparison binds tighter than NOT, NOT tighter than AND
        let eq_bp = infix(TokenKind::Eq);
        assert!(eq_bp.0 > NOT);
        assert!(NOT > and_bp.0);

        // Bit operators bind tighter than comparisons
        assert!(infix(TokenKind::Pipe).0 > eq_bp.0);
        assert!(infix(TokenKind::Caret).0 > infix(TokenKind::Star).0);
    }

    #[test]
    fn test_left_associativity() {
        let (left, right) = infix(TokenKind::Plus);
        assert!(left < right);
    }

    #[test]
    fn test_not_is_infix_only_before_predicates() {
        let not = TokenKind::Keyword(Keyword::Not);
        let like = TokenKind::Keyword(Keyword::Like);
        let null = TokenKind::Keyword(Keyword::Null);
        assert_eq!(
            infix_binding_power(&not, &like, SqlMode::NONE),
            Some((COMPARISON, COMPARISON + 1))
        );
        assert_eq!(infix_binding_power(&not, &null, SqlMode::NONE), None);
    }

    #[test]
    fn test_mode_dependent_powers() {
        assert_eq!(infix(TokenKind::PipePipe).0, OR);
        let concat =
            infix_binding_power(&TokenKind::PipePipe, &TokenKind::Eof, SqlMode::PIPES_AS_CONCAT);
        assert_eq!(concat.map(|bp| bp.0), Some(CONCAT));

        let not = TokenKind::Keyword(Keyword::Not);
        assert_eq!(prefix_binding_power(&not, SqlMode::NONE), Some(NOT));
        assert_eq!(
            prefix_binding_power(&not, SqlMode::HIGH_NOT_PRECEDENCE),
            Some(BANG)
        );
    }

    #[test]
    fn test_token_to_binary_op() {
        assert_eq!(token_to_binary_op(&TokenKind::Plus), Some(Opcode::Plus));
        assert_eq!(token_to_binary_op(&TokenKind::AndAnd), Some(Opcode::LogicAnd));
        assert_eq!(
            token_to_binary_op(&TokenKind::Keyword(Keyword::Div)),
            Some(Opcode::IntDiv)
        );
        assert_eq!(token_to_binary_op(&TokenKind::LeftParen), None);
    }

    #[test]
    fn test_token_to_unary_op() {
        assert_eq!(token_to_unary_op(&TokenKind::Minus), Some(Opcode::Minus));
        assert_eq!(
            token_to_unary_op(&TokenKind::Keyword(Keyword::Not)),
            Some(Opcode::Not)
        );
        assert_eq!(token_to_unary_op(&TokenKind::Star), None);
    }
}
