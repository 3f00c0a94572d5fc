/// The evaluator module walks a syntax tree against variable bindings.
///
/// Evaluation is a pure, re-entrant recursive walk: it only reads the
/// bindings, treats unknown variables as zero and division by zero as zero,
/// and therefore has no error path.
///
/// # Responsibilities
/// - Resolves variables through the [`evaluator::core::Bindings`] trait.
/// - Applies the active truthiness policy to `!`, `&&` and `||`.
/// - Provides the policy-free walk of the boolean tier.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of positioned
/// tokens: numbers, identifiers, boolean literals, operators and parentheses.
///
/// # Responsibilities
/// - Fuses a `-` directly followed by a digit into a negative literal.
/// - Extends identifiers through configured continuation punctuation.
/// - Reports lexical errors with exact character offsets.
pub mod lexer;
/// The parser module builds the syntax tree from tokens.
///
/// # Responsibilities
/// - Decides whether `-` is negation or subtraction from its position.
/// - Enforces the operator spacing contract and the rules about neighbouring
///   tokens, reporting the first violation in source order.
/// - Arranges operands by operator precedence.
pub mod parser;
