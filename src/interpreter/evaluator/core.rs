use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

use crate::{
    ast::Expr,
    interpreter::evaluator::{binary::core::apply_binary, unary::apply_unary},
};

/// How an integer is read as a boolean by `!`, `&&` and `||`.
///
/// The same expression can evaluate differently under the two policies:
/// `!-5` is `1` under [`Truthiness::Positive`] and `0` under
/// [`Truthiness::NonZero`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Truthiness {
    /// True iff the value is greater than zero. Suits variables that count
    /// active conditions.
    Positive,
    /// True iff the value is not zero.
    #[default]
    NonZero,
}

impl Truthiness {
    /// Reads `value` as a boolean under this policy.
    ///
    /// ```
    /// use condexpr::Truthiness;
    ///
    /// assert!(!Truthiness::Positive.test(-5));
    /// assert!(Truthiness::NonZero.test(-5));
    /// ```
    #[must_use]
    pub const fn test(self, value: i32) -> bool {
        match self {
            Self::Positive => value > 0,
            Self::NonZero => value != 0,
        }
    }
}

/// Read-only access to the values of named variables.
///
/// Implemented for the standard maps keyed by `String` or `&str`. A name the
/// bindings do not know is not an error: the evaluator reads it as `0` or
/// `false`.
pub trait Bindings<T> {
    /// Returns the value bound to `name`, if any.
    fn value_of(&self, name: &str) -> Option<T>;
}

impl<T: Copy, S: BuildHasher> Bindings<T> for HashMap<String, T, S> {
    fn value_of(&self, name: &str) -> Option<T> {
        self.get(name).copied()
    }
}

impl<T: Copy, S: BuildHasher> Bindings<T> for HashMap<&str, T, S> {
    fn value_of(&self, name: &str) -> Option<T> {
        self.get(name).copied()
    }
}

impl<T: Copy> Bindings<T> for BTreeMap<String, T> {
    fn value_of(&self, name: &str) -> Option<T> {
        self.get(name).copied()
    }
}

impl<T: Copy> Bindings<T> for BTreeMap<&str, T> {
    fn value_of(&self, name: &str) -> Option<T> {
        self.get(name).copied()
    }
}

impl<T, B: Bindings<T> + ?Sized> Bindings<T> for &B {
    fn value_of(&self, name: &str) -> Option<T> {
        (**self).value_of(name)
    }
}

/// Bindings that know no variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBindings;

impl<T> Bindings<T> for NoBindings {
    fn value_of(&self, _name: &str) -> Option<T> {
        None
    }
}

/// Walks an expression tree against integer bindings.
///
/// The evaluator holds no state of its own beyond the borrowed bindings and
/// the policy, so one tree may be evaluated by many evaluators at once.
pub struct Evaluator<'b, B: ?Sized> {
    bindings:   &'b B,
    truthiness: Truthiness,
}

impl<'b, B: Bindings<i32> + ?Sized> Evaluator<'b, B> {
    /// Creates an evaluator reading `bindings` under `truthiness`.
    #[must_use]
    pub const fn new(bindings: &'b B, truthiness: Truthiness) -> Self {
        Self { bindings,
               truthiness }
    }

    /// Evaluates an expression.
    ///
    /// Literals evaluate to themselves with booleans as `1` and `0`, unknown
    /// variables to `0`. Both operands of every binary operation are always
    /// evaluated.
    ///
    /// # Example
    /// ```
    /// use std::collections::HashMap;
    ///
    /// use condexpr::{
    ///     Truthiness,
    ///     ast::{BinaryOperator, Expr},
    ///     interpreter::evaluator::core::Evaluator,
    /// };
    ///
    /// let bindings = HashMap::from([("charge".to_string(), 4)]);
    /// let expr = Expr::binary(BinaryOperator::Ge, Expr::Variable("charge".to_string()), Expr::Number(3));
    ///
    /// assert_eq!(Evaluator::new(&bindings, Truthiness::Positive).eval(&expr), 1);
    /// ```
    #[must_use]
    pub fn eval(&self, expr: &Expr) -> i32 {
        match expr {
            Expr::Number(value) => *value,
            Expr::Bool(value) => i32::from(*value),
            Expr::Variable(name) => self.bindings.value_of(name).unwrap_or(0),
            Expr::Unary { op, operand } => apply_unary(*op, self.eval(operand), self.truthiness),
            Expr::Binary { op, left, right } => {
                let left = self.eval(left);
                let right = self.eval(right);
                apply_binary(*op, left, right, self.truthiness)
            },
        }
    }
}

/// Evaluates `expr` against `bindings` under `truthiness`.
#[must_use]
pub fn evaluate<B: Bindings<i32> + ?Sized>(expr: &Expr, bindings: &B, truthiness: Truthiness) -> i32 {
    Evaluator::new(bindings, truthiness).eval(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOperator, UnaryOperator};

    fn var(name: &str) -> Expr {
        Expr::Variable(name.to_string())
    }

    #[test]
    fn unknown_variables_read_as_zero() {
        let expr = Expr::binary(BinaryOperator::Add, var("undef1"), var("undef2"));
        assert_eq!(evaluate(&expr, &NoBindings, Truthiness::NonZero), 0);
    }

    #[test]
    fn bindings_by_str_and_string() {
        let by_str = HashMap::from([("x", 3)]);
        let by_string = BTreeMap::from([("x".to_string(), 4)]);
        assert_eq!(evaluate(&var("x"), &by_str, Truthiness::NonZero), 3);
        assert_eq!(evaluate(&var("x"), &by_string, Truthiness::NonZero), 4);

        let dynamic: &dyn Bindings<i32> = &by_str;
        assert_eq!(evaluate(&var("x"), dynamic, Truthiness::NonZero), 3);
    }

    #[test]
    fn policy_changes_not() {
        let expr = Expr::unary(UnaryOperator::Not, Expr::Number(-5));
        assert_eq!(evaluate(&expr, &NoBindings, Truthiness::Positive), 1);
        assert_eq!(evaluate(&expr, &NoBindings, Truthiness::NonZero), 0);
    }

    #[test]
    fn policy_changes_and_or() {
        let and = Expr::binary(BinaryOperator::And, Expr::Number(-1), Expr::Number(2));
        let or = Expr::binary(BinaryOperator::Or, Expr::Number(-1), Expr::Number(0));
        assert_eq!(evaluate(&and, &NoBindings, Truthiness::Positive), 0);
        assert_eq!(evaluate(&and, &NoBindings, Truthiness::NonZero), 1);
        assert_eq!(evaluate(&or, &NoBindings, Truthiness::Positive), 0);
        assert_eq!(evaluate(&or, &NoBindings, Truthiness::NonZero), 1);
    }
}
