use crate::{ast::BinaryOperator, interpreter::evaluator::core::Truthiness};

/// Evaluates a logical operation between two integers.
///
/// Both operands are read as booleans under `truthiness` and the result is
/// always `1` or `0`, never one of the operands. Called only by
/// [`super::core::apply_binary`] with `And` or `Or`.
#[must_use]
pub fn apply_logic(op: BinaryOperator, left: i32, right: i32, truthiness: Truthiness) -> i32 {
    let left = truthiness.test(left);
    let right = truthiness.test(right);

    let holds = match op {
        BinaryOperator::And => left && right,
        BinaryOperator::Or => left || right,
        _ => false,
    };
    i32::from(holds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_are_zero_or_one() {
        assert_eq!(apply_logic(BinaryOperator::And, 3, 2, Truthiness::NonZero), 1);
        assert_eq!(apply_logic(BinaryOperator::Or, 0, 7, Truthiness::NonZero), 1);
        assert_eq!(apply_logic(BinaryOperator::Or, 0, -2, Truthiness::Positive), 0);
        assert_eq!(apply_logic(BinaryOperator::And, 5, -2, Truthiness::Positive), 0);
    }
}
