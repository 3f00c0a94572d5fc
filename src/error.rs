/// Scanning errors.
///
/// Defines the errors raised while turning source text into tokens: invalid
/// characters, identifiers ending in continuation punctuation, and number
/// literals that are malformed or out of range.
pub mod lex_error;
/// Parsing errors.
///
/// Defines the grammar violations raised while building the syntax tree:
/// the operator spacing contract, adjacent values, parenthesis mismatches,
/// dangling operators and boolean-tier restrictions.
pub mod parse_error;

use thiserror::Error;

pub use lex_error::LexError;
pub use parse_error::ParseError;

/// The single error type returned when an expression fails to compile.
///
/// A diagnostic is a one-line message plus the character offset it refers to
/// and, for two-part messages, a second offset. Evaluation never fails, so a
/// diagnostic is only ever produced by `compile`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// The scanner rejected the source.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The parser rejected the token stream.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Diagnostic {
    /// Returns the character offset the diagnostic points at.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Lex(e) => e.index(),
            Self::Parse(e) => e.index(),
        }
    }

    /// Returns the second offset of two-part messages, such as the offset of
    /// the value preceding a missing binary operation.
    #[must_use]
    pub const fn secondary_index(&self) -> Option<usize> {
        match self {
            Self::Lex(_) => None,
            Self::Parse(e) => e.secondary_index(),
        }
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Renders the message followed by the offending source line with carets
    /// under the reported offsets.
    ///
    /// ```
    /// use condexpr::compile;
    ///
    /// let err = compile("6+ 1").unwrap_err();
    /// assert_eq!(err.render("6+ 1"),
    ///            "Missing whitespace at index 2, before '+' operator.\n  6+ 1\n    ^");
    /// ```
    #[must_use]
    pub fn render(&self, source: &str) -> String {
        let line: String = source.chars()
                                 .map(|c| if c.is_whitespace() { ' ' } else { c })
                                 .collect();
        let mut out = format!("{self}\n  {line}\n  ");

        let mut marks = vec![self.index()];
        marks.extend(self.secondary_index());
        marks.sort_unstable();

        let mut column = 0;
        for mark in marks {
            while column < mark {
                out.push(' ');
                column += 1;
            }
            if column == mark {
                out.push('^');
                column += 1;
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use crate::compile;

    #[test]
    fn render_marks_both_offsets() {
        let source = "true\tfalse";
        let error = compile(source).unwrap_err();
        assert_eq!(error.render(source),
                   "Missing binary operation before 'false' at index 5\n  true false\n  ^    ^");
    }

    #[test]
    fn render_counts_characters() {
        let source = "größe+ 1";
        let error = compile(source).unwrap_err();
        assert_eq!(error.index(), 6);
        assert_eq!(error.render(source),
                   "Missing whitespace at index 6, before '+' operator.\n  größe+ 1\n        ^");
    }
}
