//! # condexpr
//!
//! condexpr compiles small condition and integer expressions once and
//! evaluates them many times against runtime variable bindings. Compilation
//! reports the first problem in the source with its character offset;
//! evaluation never fails.
//!
//! ```
//! use std::collections::HashMap;
//!
//! use condexpr::{ConditionExpression, compile};
//!
//! let cond = ConditionExpression::new("deployed && ammo > 0").unwrap();
//! assert!(cond.is_true(&HashMap::from([("deployed", 1), ("ammo", 4)])));
//!
//! let error = compile("ammo >0").unwrap_err();
//! assert_eq!(error.to_string(), "Missing whitespace at index 6, after '>' operator.");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum and the operator enums that represent
/// an expression as a tree. The tree is built by the parser and walked by the
/// evaluator.
///
/// # Responsibilities
/// - Defines the node types for literals, variables, prefix and infix
///   operations.
/// - Carries operator precedence and symbols.
/// - Prints trees with explicit grouping for debugging.
pub mod ast;
/// Provides the error types raised while compiling an expression.
///
/// This module defines lexical and grammatical errors and the `Diagnostic`
/// wrapper returned to hosts, with character offsets and a caret excerpt
/// for display.
pub mod error;
/// Compiled expressions and the typed facades hosts evaluate.
///
/// # Responsibilities
/// - Compiles a source once into an immutable, shareable value.
/// - Records the variables an expression reads.
/// - Fixes the truthiness policy per facade.
pub mod expression;
/// Scanning, parsing and evaluation.
///
/// This module ties together the lexer, the parser and the evaluator. Most
/// hosts only need the facades in [`expression`]; the pieces here are public
/// for tooling that works on tokens or trees directly.
pub mod interpreter;

pub use error::{Diagnostic, LexError, ParseError};
pub use expression::{BooleanExpression, CompiledExpression, ConditionExpression, IntegerExpression};
pub use interpreter::{
    evaluator::core::{Bindings, NoBindings, Truthiness},
    lexer::ScanConfig,
    parser::core::Grammar,
};

/// Compiles an integer-tier expression with the default configuration.
///
/// # Errors
/// Returns a diagnostic describing the first lexical or grammatical
/// violation in source order.
///
/// # Examples
/// ```
/// use condexpr::{NoBindings, Truthiness, compile};
///
/// let expr = compile("2 * 3 + 4").unwrap();
/// assert_eq!(expr.evaluate(&NoBindings, Truthiness::NonZero), 10);
///
/// let error = compile("1 2").unwrap_err();
/// assert_eq!(error.index(), 2);
/// ```
pub fn compile(source: &str) -> Result<CompiledExpression, Diagnostic> {
    CompiledExpression::compile(source)
}

/// Compiles `source` against `grammar` with a custom scanner configuration.
///
/// # Errors
/// Returns a diagnostic describing the first violation.
pub fn compile_with(source: &str,
                    config: &ScanConfig,
                    grammar: Grammar)
                    -> Result<CompiledExpression, Diagnostic> {
    CompiledExpression::compile_with(source, config, grammar)
}
