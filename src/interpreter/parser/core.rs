use crate::{
    ast::Expr,
    error::{Diagnostic, ParseError},
    interpreter::{
        lexer::{ScanConfig, Scanner},
        parser::{binary::parse_binary, stream::TokenStream},
    },
};

pub type ParseResult<T> = Result<T, Diagnostic>;

/// Which grammar tier a source is parsed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Grammar {
    /// Integers, arithmetic, relational, equality and logical operators.
    #[default]
    Arithmetic,
    /// Boolean variables and literals with `!`, `&&`, `||`, `==` and `!=`.
    Boolean,
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. Tokens are pulled lazily
/// from the scanner, so a lexical error after a grammatical one is never
/// reached. The result is either a complete tree or the first diagnostic.
///
/// # Errors
/// Returns the first lexical or grammatical violation in source order.
///
/// # Example
/// ```
/// use condexpr::{
///     ast::{BinaryOperator, Expr},
///     interpreter::{lexer::ScanConfig, parser::core::{Grammar, parse_expression}},
/// };
///
/// let expr = parse_expression("a && b", &ScanConfig::default(), Grammar::Boolean).unwrap();
/// assert_eq!(expr,
///            Expr::binary(BinaryOperator::And,
///                         Expr::Variable("a".to_string()),
///                         Expr::Variable("b".to_string())));
/// ```
pub fn parse_expression(source: &str, config: &ScanConfig, grammar: Grammar) -> ParseResult<Expr> {
    let mut tokens = TokenStream::new(Scanner::with_config(source, config.clone()), grammar);
    let expr = parse_binary(&mut tokens, 0)?;

    match tokens.advance()? {
        None => Ok(expr),
        Some(item) => Err(ParseError::UnexpectedToken { token: item.token.text.to_string(),
                                                        index: item.index(), }.into()),
    }
}
