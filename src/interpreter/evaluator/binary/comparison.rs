use crate::ast::BinaryOperator;

/// Evaluates a relational or equality operation.
///
/// Compares the raw integers and yields `1` or `0`. Boolean literals take
/// part as `1` and `0`, so `1 == true` holds. Called only by
/// [`super::core::apply_binary`] with a relational or equality operator.
#[must_use]
pub fn apply_comparison(op: BinaryOperator, left: i32, right: i32) -> i32 {
    let holds = match op {
        BinaryOperator::Eq => left == right,
        BinaryOperator::NotEq => left != right,
        BinaryOperator::Lt => left < right,
        BinaryOperator::Le => left <= right,
        BinaryOperator::Gt => left > right,
        BinaryOperator::Ge => left >= right,
        _ => false,
    };
    i32::from(holds)
}
