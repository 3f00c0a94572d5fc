use thiserror::Error;

/// Represents all grammar violations detected while parsing a token stream.
///
/// Offsets are character offsets into the source text. The message
/// templates are matched verbatim by content tooling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The source contained no tokens at all.
    #[error("Empty expression")]
    EmptyExpression,
    /// An infix operator without whitespace between it and its left operand.
    #[error("Missing whitespace at index {index}, before '{operator}' operator.")]
    MissingWhitespaceBefore {
        /// The operator symbol.
        operator: &'static str,
        /// Offset just past the operator.
        index:    usize,
    },
    /// An infix operator without whitespace between it and its right operand.
    #[error("Missing whitespace at index {index}, after '{operator}' operator.")]
    MissingWhitespaceAfter {
        /// The operator symbol.
        operator: &'static str,
        /// Offset of the first character after the operator.
        index:    usize,
    },
    /// Two value-producing tokens with no operator between them.
    #[error("Missing binary operation before '{token}' at index {index}")]
    MissingBinaryOperation {
        /// The second of the two tokens as written.
        token:          String,
        /// Offset of the second token.
        index:          usize,
        /// Offset of the token before it.
        previous_index: usize,
    },
    /// Two adjacent operators where the first expects a right operand and the
    /// second expects a left one.
    #[error("Missing value or sub-expression or there is an extra operator '{first}' at index {first_index} or '{second}' at index {second_index}")]
    ExtraOperator {
        /// The first operator symbol.
        first:        &'static str,
        /// Offset of the first operator.
        first_index:  usize,
        /// The second operator symbol.
        second:       &'static str,
        /// Offset of the second operator.
        second_index: usize,
    },
    /// An operator at the end of the input with nothing to its right.
    #[error("Missing value or sub-expression at end for '{operator}' operator")]
    MissingOperandAtEnd {
        /// The dangling operator symbol.
        operator: &'static str,
        /// Offset of the end of the source.
        index:    usize,
    },
    /// An operator at the start of the input with nothing to its left.
    #[error("Missing value or sub-expression at beginning for '{operator}' operator")]
    MissingOperandAtBeginning {
        /// The dangling operator symbol.
        operator: &'static str,
        /// Offset of the operator.
        index:    usize,
    },
    /// `()` with nothing inside.
    #[error("Empty parenthesis at index {index}")]
    EmptyParenthesis {
        /// Offset of the opening parenthesis.
        index: usize,
    },
    /// An opening parenthesis that is never closed.
    #[error("Unclosed opening parenthesis at index {index}")]
    UnclosedParenthesis {
        /// Offset of the innermost unclosed parenthesis.
        index: usize,
    },
    /// A closing parenthesis without a matching opener.
    #[error("Unmatched closing parenthesis at index {index}")]
    UnmatchedParenthesis {
        /// Offset of the closing parenthesis.
        index: usize,
    },
    /// A number literal inside a boolean-tier expression.
    #[error("Number '{number}' at index {index} is not supported in a boolean expression")]
    UnsupportedNumber {
        /// The literal as written.
        number: String,
        /// Offset of the literal.
        index:  usize,
    },
    /// An arithmetic or relational operator inside a boolean-tier expression.
    #[error("Operator '{operator}' at index {index} is not supported in a boolean expression")]
    UnsupportedOperator {
        /// The operator symbol.
        operator: &'static str,
        /// Offset of the operator.
        index:    usize,
    },
    /// More operators and parentheses than one expression may hold.
    #[error("Expression is too long at index {index}: more than {limit} operators")]
    TooLong {
        /// The operator limit.
        limit: usize,
        /// Offset of the first operator past the limit.
        index: usize,
    },
    /// Parentheses and prefix operators nested deeper than allowed.
    #[error("Expression is nested too deeply at index {index}: more than {limit} levels")]
    TooDeep {
        /// The nesting limit.
        limit: usize,
        /// Offset of the token that went past the limit.
        index: usize,
    },
    /// A token the grammar did not expect at this position.
    #[error("Unexpected token '{token}' at index {index}")]
    UnexpectedToken {
        /// The token as written.
        token: String,
        /// Offset of the token.
        index: usize,
    },
}

impl ParseError {
    /// Returns the primary character offset.
    ///
    /// An empty expression points at offset zero, a dangling operator at the
    /// end of the input points just past the source.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::EmptyExpression => 0,
            Self::MissingWhitespaceBefore { index, .. }
            | Self::MissingWhitespaceAfter { index, .. }
            | Self::MissingBinaryOperation { index, .. }
            | Self::MissingOperandAtEnd { index, .. }
            | Self::MissingOperandAtBeginning { index, .. }
            | Self::EmptyParenthesis { index }
            | Self::UnclosedParenthesis { index }
            | Self::UnmatchedParenthesis { index }
            | Self::UnsupportedNumber { index, .. }
            | Self::UnsupportedOperator { index, .. }
            | Self::TooLong { index, .. }
            | Self::TooDeep { index, .. }
            | Self::UnexpectedToken { index, .. } => *index,
            Self::ExtraOperator { first_index, .. } => *first_index,
        }
    }

    /// Returns the second offset of two-part messages.
    #[must_use]
    pub const fn secondary_index(&self) -> Option<usize> {
        match self {
            Self::ExtraOperator { second_index, .. } => Some(*second_index),
            Self::MissingBinaryOperation { previous_index, .. } => Some(*previous_index),
            _ => None,
        }
    }
}
