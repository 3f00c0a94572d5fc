use thiserror::Error;

/// Represents all errors that can occur while scanning source text into
/// tokens.
///
/// Every variant carries the character offset of the offending input. Message
/// texts are stable and are matched verbatim by content tooling, so treat the
/// `#[error]` templates as part of the public interface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A single `&`, `|` or `=` where the doubled operator was most likely
    /// intended.
    #[error("Unexpected character '{character}' at index {index} - should it be '{character}{character}'?")]
    UnexpectedCharacter {
        /// The lone character.
        character: char,
        /// Character offset into the source.
        index:     usize,
    },
    /// A character that cannot start any token.
    #[error("Invalid character '{character}' at index {index}")]
    InvalidCharacter {
        /// The rejected character.
        character: char,
        /// Character offset into the source.
        index:     usize,
    },
    /// An identifier that ends with continuation punctuation, such as `t-`.
    #[error("Invalid identifier end character at index {index} for '{identifier}'")]
    InvalidIdentifierEnd {
        /// The identifier scanned so far, including the trailing punctuation.
        identifier: String,
        /// Character offset of the trailing punctuation.
        index:      usize,
    },
    /// A number literal running straight into an identifier, such as `1a`.
    #[error("Number {number} and variable merged at index {index}")]
    MergedNumber {
        /// The number literal as written.
        number: String,
        /// Character offset of the literal.
        index:  usize,
    },
    /// A number literal that does not fit a 32-bit signed integer.
    #[error("Number {number} is out of range at index {index}")]
    NumberOutOfRange {
        /// The number literal as written.
        number: String,
        /// Character offset of the literal.
        index:  usize,
    },
}

impl LexError {
    /// Returns the character offset the error points at.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { index, .. }
            | Self::InvalidCharacter { index, .. }
            | Self::InvalidIdentifierEnd { index, .. }
            | Self::MergedNumber { index, .. }
            | Self::NumberOutOfRange { index, .. } => *index,
        }
    }

    /// Builds the error for a character no token rule accepts.
    ///
    /// Lone `&`, `|` and `=` get a hint towards their doubled form.
    #[must_use]
    pub const fn unrecognized(character: char, index: usize) -> Self {
        match character {
            '&' | '|' | '=' => Self::UnexpectedCharacter { character, index },
            _ => Self::InvalidCharacter { character, index },
        }
    }
}
