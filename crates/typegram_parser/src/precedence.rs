//! Binary operator precedence.
//!
//! `as` and `satisfies` are contextual words, so they never show up as
//! token kinds here; the expression parser gives them `Relational` itself.

use typegram_ast::syntax_kind::SyntaxKind;

/// Precedence levels, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    Lowest = 0,
    Comma = 1,
    Assignment = 2,
    Conditional = 3,
    NullishCoalescing = 4,
    LogicalOr = 5,
    LogicalAnd = 6,
    BitwiseOr = 7,
    BitwiseXor = 8,
    BitwiseAnd = 9,
    Equality = 10,
    Relational = 11,
    Shift = 12,
    Additive = 13,
    Multiplicative = 14,
    Exponentiation = 15,
}

/// The precedence of `kind` as a binary operator, or `None` if it is not one.
pub fn binary_operator_precedence(kind: SyntaxKind) -> Option<OperatorPrecedence> {
    let precedence = match kind {
        SyntaxKind::QuestionQuestionToken => OperatorPrecedence::NullishCoalescing,
        SyntaxKind::BarBarToken => OperatorPrecedence::LogicalOr,
        SyntaxKind::AmpersandAmpersandToken => OperatorPrecedence::LogicalAnd,
        SyntaxKind::BarToken => OperatorPrecedence::BitwiseOr,
        SyntaxKind::CaretToken => OperatorPrecedence::BitwiseXor,
        SyntaxKind::AmpersandToken => OperatorPrecedence::BitwiseAnd,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsEqualsToken => OperatorPrecedence::Equality,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken
        | SyntaxKind::InstanceOfKeyword
        | SyntaxKind::InKeyword => OperatorPrecedence::Relational,
        SyntaxKind::LessThanLessThanToken
        | SyntaxKind::GreaterThanGreaterThanToken
        | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => OperatorPrecedence::Shift,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => OperatorPrecedence::Additive,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => {
            OperatorPrecedence::Multiplicative
        }
        SyntaxKind::AsteriskAsteriskToken => OperatorPrecedence::Exponentiation,
        _ => return None,
    };
    Some(precedence)
}

/// Whether an operator at `precedence` binds tighter than the operator to
/// its left at `left`. `**` groups to the right.
pub fn binds_tighter(kind: SyntaxKind, precedence: OperatorPrecedence, left: OperatorPrecedence) -> bool {
    if kind == SyntaxKind::AsteriskAsteriskToken {
        precedence >= left
    } else {
        precedence > left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplicative_binds_tighter_than_additive() {
        let mul = binary_operator_precedence(SyntaxKind::AsteriskToken).unwrap();
        let add = binary_operator_precedence(SyntaxKind::PlusToken).unwrap();
        assert!(mul > add);
    }

    #[test]
    fn test_exponent_is_right_associative() {
        let exp = OperatorPrecedence::Exponentiation;
        assert!(binds_tighter(SyntaxKind::AsteriskAsteriskToken, exp, exp));
        let add = OperatorPrecedence::Additive;
        assert!(!binds_tighter(SyntaxKind::PlusToken, add, add));
    }

    #[test]
    fn test_non_operators() {
        assert_eq!(binary_operator_precedence(SyntaxKind::EqualsToken), None);
        assert_eq!(binary_operator_precedence(SyntaxKind::CommaToken), None);
    }
}
