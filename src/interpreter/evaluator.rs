/// Binary operator evaluation logic.
///
/// Handles arithmetic, comparison and logical operators over integers.
pub mod binary;

/// Evaluation of the boolean tier.
///
/// Walks trees whose leaves are boolean variables and literals.
pub mod boolean;

/// Core evaluation logic.
///
/// Contains the truthiness policies, the bindings abstraction and the integer
/// evaluator.
pub mod core;

/// Unary operator evaluation logic.
///
/// Implements logical NOT, bitwise complement and arithmetic negation.
pub mod unary;
