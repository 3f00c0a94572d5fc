/// Entry point and grammar selection.
///
/// Exposes [`core::parse_expression`] and the [`core::Grammar`] tiers.
pub mod core;

/// Infix operators.
///
/// Precedence climbing over the binary operator table, folding operands into
/// left-associative trees.
pub(crate) mod binary;

/// Prefix operators and primary expressions.
///
/// Handles `!`, `~` and prefix `-`, literals, variables and parenthesised
/// sub-expressions.
pub(crate) mod unary;

/// Validated token stream.
///
/// Pulls tokens from the scanner one at a time, decides the role of each and
/// enforces the spacing contract and every rule about neighbouring tokens.
pub mod stream;
