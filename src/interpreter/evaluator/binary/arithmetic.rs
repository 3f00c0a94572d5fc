use crate::ast::BinaryOperator;

/// Evaluates an arithmetic operation between two integers.
///
/// `+`, `-` and `*` wrap on overflow. `/` and `%` truncate toward zero, so
/// the remainder takes the sign of the dividend. Dividing by zero yields `0`.
/// Called only by [`super::core::apply_binary`] with an arithmetic operator.
///
/// # Parameters
/// - `op`: One of `Add`, `Sub`, `Mul`, `Div`, `Mod`.
/// - `left`: Left operand.
/// - `right`: Right operand.
#[must_use]
pub const fn apply_arithmetic(op: BinaryOperator, left: i32, right: i32) -> i32 {
    match op {
        BinaryOperator::Add => left.wrapping_add(right),
        BinaryOperator::Sub => left.wrapping_sub(right),
        BinaryOperator::Mul => left.wrapping_mul(right),
        BinaryOperator::Div if right == 0 => 0,
        BinaryOperator::Div => left.wrapping_div(right),
        BinaryOperator::Mod if right == 0 => 0,
        BinaryOperator::Mod => left.wrapping_rem(right),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn division_truncates_toward_zero() {
        assert_eq!(apply_arithmetic(BinaryOperator::Div, 7, 3), 2);
        assert_eq!(apply_arithmetic(BinaryOperator::Div, -6, 3), -2);
        assert_eq!(apply_arithmetic(BinaryOperator::Div, 6, -3), -2);
        assert_eq!(apply_arithmetic(BinaryOperator::Div, -7, 2), -3);
    }

    #[test]
    fn remainder_follows_dividend() {
        assert_eq!(apply_arithmetic(BinaryOperator::Mod, -7, 3), -1);
        assert_eq!(apply_arithmetic(BinaryOperator::Mod, 7, -3), 1);
        assert_eq!(apply_arithmetic(BinaryOperator::Mod, -7, -3), -1);
    }

    #[test]
    fn zero_divisor_yields_zero() {
        assert_eq!(apply_arithmetic(BinaryOperator::Div, 8, 0), 0);
        assert_eq!(apply_arithmetic(BinaryOperator::Mod, 7, 0), 0);
    }

    #[test]
    fn overflow_wraps() {
        assert_eq!(apply_arithmetic(BinaryOperator::Add, i32::MAX, 1), i32::MIN);
        assert_eq!(apply_arithmetic(BinaryOperator::Div, i32::MIN, -1), i32::MIN);
        assert_eq!(apply_arithmetic(BinaryOperator::Mod, i32::MIN, -1), 0);
    }
}
