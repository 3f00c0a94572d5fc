use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    interpreter::evaluator::{
        binary::core::apply_binary,
        core::{Bindings, Truthiness},
        unary::apply_unary,
    },
};

/// Walks a boolean-tier tree against boolean bindings.
///
/// The boolean grammar has no numbers, so there is no truthiness policy to
/// choose: literals and variables are already `true` or `false`. Unknown
/// variables read as `false`.
pub struct BooleanEvaluator<'b, B: ?Sized> {
    bindings: &'b B,
}

impl<'b, B: Bindings<bool> + ?Sized> BooleanEvaluator<'b, B> {
    /// Creates an evaluator reading `bindings`.
    #[must_use]
    pub const fn new(bindings: &'b B) -> Self {
        Self { bindings }
    }

    /// Evaluates an expression to a boolean.
    ///
    /// # Example
    /// ```
    /// use std::collections::HashMap;
    ///
    /// use condexpr::{
    ///     ast::{BinaryOperator, Expr},
    ///     interpreter::evaluator::boolean::BooleanEvaluator,
    /// };
    ///
    /// let bindings = HashMap::from([("a", true), ("b", false)]);
    /// let expr = Expr::binary(BinaryOperator::Or,
    ///                         Expr::Variable("a".to_string()),
    ///                         Expr::Variable("b".to_string()));
    ///
    /// assert!(BooleanEvaluator::new(&bindings).eval(&expr));
    /// ```
    #[must_use]
    pub fn eval(&self, expr: &Expr) -> bool {
        match expr {
            Expr::Bool(value) => *value,
            Expr::Variable(name) => self.bindings.value_of(name).unwrap_or(false),
            Expr::Unary { op: UnaryOperator::Not,
                          operand, } => !self.eval(operand),
            Expr::Binary { op, left, right } if op.is_logical() => {
                let left = self.eval(left);
                let right = self.eval(right);
                match op {
                    BinaryOperator::And => left && right,
                    BinaryOperator::Or => left || right,
                    BinaryOperator::Eq => left == right,
                    _ => left != right,
                }
            },
            _ => self.eval_int(expr) != 0,
        }
    }

    /// Integer reading of a tree the boolean grammar could not have produced.
    ///
    /// Hand-built trees may still contain numbers or arithmetic; they are
    /// evaluated with booleans as `1` and `0` under the non-zero policy.
    fn eval_int(&self, expr: &Expr) -> i32 {
        const POLICY: Truthiness = Truthiness::NonZero;

        match expr {
            Expr::Number(value) => *value,
            Expr::Bool(_) | Expr::Variable(_) => i32::from(self.eval(expr)),
            Expr::Unary { op, operand } => apply_unary(*op, self.eval_int(operand), POLICY),
            Expr::Binary { op, left, right } => {
                let left = self.eval_int(left);
                let right = self.eval_int(right);
                apply_binary(*op, left, right, POLICY)
            },
        }
    }
}

/// Evaluates `expr` against boolean `bindings`.
#[must_use]
pub fn evaluate_bool<B: Bindings<bool> + ?Sized>(expr: &Expr, bindings: &B) -> bool {
    BooleanEvaluator::new(bindings).eval(expr)
}
