/// Arithmetic operators: `+`, `-`, `*`, `/` and `%`.
pub(crate) mod arithmetic;

/// Relational and equality operators.
pub(crate) mod comparison;

/// Dispatch over all binary operators.
pub mod core;

/// Logical operators `&&` and `||` under a truthiness policy.
pub(crate) mod logic;
