use crate::{
    ast::Expr,
    error::{Diagnostic, ParseError},
    interpreter::{
        lexer::TokenKind,
        parser::{
            binary::parse_binary,
            core::ParseResult,
            stream::{Item, Role, TokenStream},
        },
    },
};

/// Parses a unary expression.
///
/// Supports the prefix operators `!`, `~` and `-`. They nest to the right, so
/// `!-x` is parsed as `!(-x)`. A `-` only reaches this point as a prefix
/// operator when it is not fused into a number literal, as in `- 5` or `-x`.
///
/// Grammar:
/// ```text
///     unary := ("!" | "~" | "-") unary
///            | primary
/// ```
pub(crate) fn parse_unary(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let prefix = match tokens.peek()? {
        Some(Item { role: Role::Prefix(op),
                    .. }) => Some(*op),
        _ => None,
    };

    if let Some(op) = prefix {
        tokens.advance()?;
        let operand = parse_unary(tokens)?;
        return Ok(Expr::unary(op, operand));
    }

    parse_primary(tokens)
}

/// Parses a primary expression: a literal, a variable or a parenthesised
/// sub-expression.
///
/// Grammar:
/// ```text
///     primary := number | "true" | "false" | identifier
///              | "(" binary(0) ")"
/// ```
pub(crate) fn parse_primary(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let Some(item) = tokens.advance()? else {
        return Err(ParseError::EmptyExpression.into());
    };

    match item.token.kind {
        TokenKind::Number(value) => Ok(Expr::Number(value)),
        TokenKind::Bool(value) => Ok(Expr::Bool(value)),
        TokenKind::Identifier(name) => Ok(Expr::Variable(name.to_string())),
        TokenKind::LParen => {
            let inner = parse_binary(tokens, 0)?;
            match tokens.advance()? {
                Some(Item { role: Role::Close,
                            .. }) => Ok(inner),
                Some(other) => Err(unexpected(&other)),
                None => Err(ParseError::UnclosedParenthesis { index: item.index() }.into()),
            }
        },
        _ => Err(unexpected(&item)),
    }
}

fn unexpected(item: &Item<'_>) -> Diagnostic {
    ParseError::UnexpectedToken { token: item.token.text.to_string(),
                                  index: item.index(), }.into()
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{Expr, UnaryOperator},
        interpreter::{
            lexer::ScanConfig,
            parser::core::{Grammar, parse_expression},
        },
    };

    fn parse(source: &str) -> Expr {
        parse_expression(source, &ScanConfig::default(), Grammar::Arithmetic).unwrap()
    }

    #[test]
    fn prefix_operators_nest_right() {
        assert_eq!(parse("!-5"), Expr::unary(UnaryOperator::Not, Expr::Number(-5)));
        assert_eq!(parse("~- 0"),
                   Expr::unary(UnaryOperator::BitNot,
                               Expr::unary(UnaryOperator::Negate, Expr::Number(0))));
    }

    #[test]
    fn minus_before_identifier_is_negation() {
        assert_eq!(parse("-t-1"),
                   Expr::unary(UnaryOperator::Negate, Expr::Variable("t-1".to_string())));
    }

    #[test]
    fn parentheses_leave_no_node() {
        assert_eq!(parse("((true))"), Expr::Bool(true));
    }
}
