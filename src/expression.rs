use std::{collections::BTreeSet, fmt};

use crate::{
    ast::Expr,
    error::Diagnostic,
    interpreter::{
        evaluator::{
            boolean::evaluate_bool,
            core::{Bindings, Truthiness, evaluate},
        },
        lexer::ScanConfig,
        parser::core::{Grammar, parse_expression},
    },
};

/// An expression compiled once and evaluated many times.
///
/// Holds the tree, a copy of the source and the names of the variables the
/// tree reads. It is immutable after construction, so it may be shared between
/// threads and evaluated concurrently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledExpression {
    source:    String,
    root:      Expr,
    variables: BTreeSet<String>,
}

impl CompiledExpression {
    /// Compiles `source` with the default scanner configuration.
    ///
    /// # Errors
    /// Returns the first lexical or grammatical violation in source order.
    pub fn compile(source: &str) -> Result<Self, Diagnostic> {
        Self::compile_with(source, &ScanConfig::default(), Grammar::Arithmetic)
    }

    /// Compiles `source` against `grammar` with a custom scanner
    /// configuration.
    ///
    /// # Errors
    /// Returns the first lexical or grammatical violation in source order.
    #[tracing::instrument(level = "debug", skip(config))]
    pub fn compile_with(source: &str, config: &ScanConfig, grammar: Grammar) -> Result<Self, Diagnostic> {
        match parse_expression(source, config, grammar) {
            Ok(root) => {
                let mut variables = BTreeSet::new();
                root.for_each_variable(&mut |name| {
                        variables.insert(name.to_string());
                    });
                tracing::debug!(tree = %root, variables = variables.len(), "compiled expression");

                Ok(Self { source: source.to_string(),
                          root,
                          variables })
            },
            Err(diagnostic) => {
                tracing::debug!(index = diagnostic.index(), %diagnostic, "rejected expression");
                Err(diagnostic)
            },
        }
    }

    /// The source text the expression was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Root of the syntax tree.
    #[must_use]
    pub const fn root(&self) -> &Expr {
        &self.root
    }

    /// Names of the variables the expression reads, sorted and without
    /// duplicates.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(String::as_str)
    }

    /// Evaluates the expression against integer `bindings` under `truthiness`.
    #[must_use]
    pub fn evaluate<B: Bindings<i32> + ?Sized>(&self, bindings: &B, truthiness: Truthiness) -> i32 {
        let value = evaluate(&self.root, bindings, truthiness);
        tracing::trace!(source = %self.source, ?truthiness, value, "evaluated expression");
        value
    }
}

impl fmt::Display for CompiledExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// An integer expression whose logical operators treat any non-zero value as
/// true.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use condexpr::IntegerExpression;
///
/// let cost = IntegerExpression::new("base * 3 / 2").unwrap();
/// assert_eq!(cost.evaluate(&HashMap::from([("base", 40)])), 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerExpression(CompiledExpression);

impl IntegerExpression {
    /// Compiles an integer expression.
    ///
    /// # Errors
    /// Returns the diagnostic of the first violation.
    pub fn new(source: &str) -> Result<Self, Diagnostic> {
        CompiledExpression::compile(source).map(Self)
    }

    /// Compiles with a custom scanner configuration.
    ///
    /// # Errors
    /// Returns the diagnostic of the first violation.
    pub fn with_config(source: &str, config: &ScanConfig) -> Result<Self, Diagnostic> {
        CompiledExpression::compile_with(source, config, Grammar::Arithmetic).map(Self)
    }

    /// Evaluates the expression.
    #[must_use]
    pub fn evaluate<B: Bindings<i32> + ?Sized>(&self, bindings: &B) -> i32 {
        self.0.evaluate(bindings, Truthiness::NonZero)
    }

    /// Whether the expression evaluates to a non-zero value.
    #[must_use]
    pub fn is_true<B: Bindings<i32> + ?Sized>(&self, bindings: &B) -> bool {
        self.evaluate(bindings) != 0
    }

    /// Names of the variables the expression reads.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.0.variables()
    }

    /// The source text.
    #[must_use]
    pub fn source(&self) -> &str {
        self.0.source()
    }

    /// The underlying compiled expression.
    #[must_use]
    pub const fn compiled(&self) -> &CompiledExpression {
        &self.0
    }
}

/// A condition over counters, where only positive values count as true.
///
/// Suits variables that count how many sources currently grant a condition:
/// a counter that drops below zero does not switch the condition on.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use condexpr::ConditionExpression;
///
/// let cond = ConditionExpression::new("!jammed && charge >= 2").unwrap();
/// assert!(cond.is_true(&HashMap::from([("charge", 3)])));
/// assert!(!cond.is_true(&HashMap::from([("charge", 3), ("jammed", 1)])));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionExpression(CompiledExpression);

impl ConditionExpression {
    /// Compiles a condition.
    ///
    /// # Errors
    /// Returns the diagnostic of the first violation.
    pub fn new(source: &str) -> Result<Self, Diagnostic> {
        CompiledExpression::compile(source).map(Self)
    }

    /// Compiles with a custom scanner configuration.
    ///
    /// # Errors
    /// Returns the diagnostic of the first violation.
    pub fn with_config(source: &str, config: &ScanConfig) -> Result<Self, Diagnostic> {
        CompiledExpression::compile_with(source, config, Grammar::Arithmetic).map(Self)
    }

    /// Evaluates the condition to an integer.
    #[must_use]
    pub fn evaluate<B: Bindings<i32> + ?Sized>(&self, bindings: &B) -> i32 {
        self.0.evaluate(bindings, Truthiness::Positive)
    }

    /// Whether the condition evaluates to a positive value.
    #[must_use]
    pub fn is_true<B: Bindings<i32> + ?Sized>(&self, bindings: &B) -> bool {
        self.evaluate(bindings) > 0
    }

    /// Names of the variables the condition reads.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.0.variables()
    }

    /// The source text.
    #[must_use]
    pub fn source(&self) -> &str {
        self.0.source()
    }

    /// The underlying compiled expression.
    #[must_use]
    pub const fn compiled(&self) -> &CompiledExpression {
        &self.0
    }
}

/// A pure boolean expression over boolean variables.
///
/// Accepts `true`, `false`, variables, `!`, `&&`, `||`, `==`, `!=` and
/// parentheses. Numbers and every other operator are rejected at compile
/// time.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use condexpr::BooleanExpression;
///
/// let expr = BooleanExpression::new("deployed == (armed || !safe)").unwrap();
/// assert!(expr.evaluate(&HashMap::from([("deployed", true), ("armed", true)])));
/// assert!(BooleanExpression::new("armed + 1").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanExpression(CompiledExpression);

impl BooleanExpression {
    /// Compiles a boolean expression.
    ///
    /// # Errors
    /// Returns the diagnostic of the first violation, including any number or
    /// operator outside the boolean grammar.
    pub fn new(source: &str) -> Result<Self, Diagnostic> {
        Self::with_config(source, &ScanConfig::default())
    }

    /// Compiles with a custom scanner configuration.
    ///
    /// # Errors
    /// Returns the diagnostic of the first violation.
    pub fn with_config(source: &str, config: &ScanConfig) -> Result<Self, Diagnostic> {
        CompiledExpression::compile_with(source, config, Grammar::Boolean).map(Self)
    }

    /// Evaluates the expression. Unknown variables are `false`.
    #[must_use]
    pub fn evaluate<B: Bindings<bool> + ?Sized>(&self, bindings: &B) -> bool {
        let value = evaluate_bool(self.0.root(), bindings);
        tracing::trace!(source = %self.0.source(), value, "evaluated boolean expression");
        value
    }

    /// Names of the variables the expression reads.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.0.variables()
    }

    /// The source text.
    #[must_use]
    pub fn source(&self) -> &str {
        self.0.source()
    }

    /// The underlying compiled expression.
    #[must_use]
    pub const fn compiled(&self) -> &CompiledExpression {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::interpreter::evaluator::core::NoBindings;

    #[test]
    fn variables_are_sorted_and_unique() {
        let expr = CompiledExpression::compile("b + a * b - -c").unwrap();
        assert_eq!(expr.variables().collect::<Vec<_>>(), ["a", "b", "c"]);
    }

    #[test]
    fn literals_have_no_variables() {
        let expr = CompiledExpression::compile("true && 1 < 2").unwrap();
        assert_eq!(expr.variables().count(), 0);
    }

    #[test]
    fn facades_differ_on_negative_values() {
        let bindings = HashMap::from([("x", -5)]);
        assert!(!ConditionExpression::new("x").unwrap().is_true(&bindings));
        assert!(IntegerExpression::new("x").unwrap().is_true(&bindings));
        assert_eq!(ConditionExpression::new("!x").unwrap().evaluate(&bindings), 1);
        assert_eq!(IntegerExpression::new("!x").unwrap().evaluate(&bindings), 0);
    }

    #[test]
    fn source_is_kept() {
        let expr = IntegerExpression::new("  1 + 2  ").unwrap();
        assert_eq!(expr.source(), "  1 + 2  ");
        assert_eq!(expr.compiled().to_string(), "  1 + 2  ");
    }

    #[test]
    fn custom_punctuation() {
        let config = ScanConfig::new(['#']);
        let expr = IntegerExpression::with_config("unit#ready + 1", &config).unwrap();
        assert_eq!(expr.evaluate(&HashMap::from([("unit#ready", 2)])), 3);
        assert!(IntegerExpression::new("unit#ready").is_err());
    }

    #[test]
    fn boolean_facade_evaluates_without_policy() {
        let expr = BooleanExpression::new("a != b").unwrap();
        assert!(expr.evaluate(&HashMap::from([("a", true)])));
        assert!(!expr.evaluate(&NoBindings));
    }

    #[test]
    fn compiled_expressions_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CompiledExpression>();
        assert_send_sync::<ConditionExpression>();
        assert_send_sync::<BooleanExpression>();
    }
}
