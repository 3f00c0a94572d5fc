use crate::{ast::UnaryOperator, interpreter::evaluator::core::Truthiness};

/// Evaluates a unary operation on an integer.
///
/// Supported operators:
/// - `Not`: `1` if the operand is false under `truthiness`, otherwise `0`.
/// - `BitNot`: bitwise complement.
/// - `Negate`: two's-complement negation; `-i32::MIN` wraps to itself.
///
/// # Example
/// ```
/// use condexpr::{Truthiness, ast::UnaryOperator, interpreter::evaluator::unary::apply_unary};
///
/// assert_eq!(apply_unary(UnaryOperator::BitNot, 0, Truthiness::NonZero), -1);
/// assert_eq!(apply_unary(UnaryOperator::Not, -5, Truthiness::Positive), 1);
/// assert_eq!(apply_unary(UnaryOperator::Not, -5, Truthiness::NonZero), 0);
/// ```
#[must_use]
pub fn apply_unary(op: UnaryOperator, value: i32, truthiness: Truthiness) -> i32 {
    match op {
        UnaryOperator::Not => i32::from(!truthiness.test(value)),
        UnaryOperator::BitNot => !value,
        UnaryOperator::Negate => value.wrapping_neg(),
    }
}
