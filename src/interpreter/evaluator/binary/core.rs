use crate::{
    ast::BinaryOperator,
    interpreter::evaluator::{
        binary::{arithmetic::apply_arithmetic, comparison::apply_comparison, logic::apply_logic},
        core::Truthiness,
    },
};

/// Evaluates a binary operation between two integers.
///
/// Routes the operation to the arithmetic, comparison or logic handler.
/// Only the logical operators consult `truthiness`; every other operator is
/// the same under both policies.
///
/// # Example
/// ```
/// use condexpr::{
///     Truthiness, ast::BinaryOperator, interpreter::evaluator::binary::core::apply_binary,
/// };
///
/// assert_eq!(apply_binary(BinaryOperator::Add, 3, 4, Truthiness::NonZero), 7);
/// assert_eq!(apply_binary(BinaryOperator::Lt, 3, 4, Truthiness::NonZero), 1);
/// assert_eq!(apply_binary(BinaryOperator::And, -1, 4, Truthiness::Positive), 0);
/// ```
#[must_use]
pub fn apply_binary(op: BinaryOperator, left: i32, right: i32, truthiness: Truthiness) -> i32 {
    use BinaryOperator::{Add, And, Div, Eq, Ge, Gt, Le, Lt, Mod, Mul, NotEq, Or, Sub};

    match op {
        Add | Sub | Mul | Div | Mod => apply_arithmetic(op, left, right),
        Eq | NotEq | Lt | Le | Gt | Ge => apply_comparison(op, left, right),
        And | Or => apply_logic(op, left, right, truthiness),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_operator_reaches_its_handler() {
        use BinaryOperator::{Add, And, Div, Eq, Ge, Gt, Le, Lt, Mod, Mul, NotEq, Or, Sub};

        let cases = [(Add, 7),
                     (Sub, 3),
                     (Mul, 10),
                     (Div, 2),
                     (Mod, 1),
                     (Eq, 0),
                     (NotEq, 1),
                     (Lt, 0),
                     (Le, 0),
                     (Gt, 1),
                     (Ge, 1),
                     (And, 1),
                     (Or, 1)];

        for (op, expected) in cases {
            assert_eq!(apply_binary(op, 5, 2, Truthiness::NonZero), expected, "{op}");
        }
    }
}
