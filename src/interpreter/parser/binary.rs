use crate::{
    ast::Expr,
    interpreter::parser::{
        core::ParseResult,
        stream::{Item, Role, TokenStream},
        unary::parse_unary,
    },
};

/// Parses infix operations by precedence climbing.
///
/// Operands are parsed with [`parse_unary`]; every infix operator whose
/// binding power is at least `min_precedence` is folded in. The right operand
/// is parsed one level tighter, which makes all infix operators
/// left-associative:
///
/// ```text
///     binary(p) := unary (op binary(prec(op) + 1))*    where prec(op) >= p
/// ```
///
/// # Parameters
/// - `tokens`: Validated token stream.
/// - `min_precedence`: Weakest operator this call may consume.
///
/// # Returns
/// The operand, or an `Expr::Binary` tree combining operands.
pub fn parse_binary(tokens: &mut TokenStream<'_>, min_precedence: u8) -> ParseResult<Expr> {
    let mut left = parse_unary(tokens)?;

    loop {
        let op = match tokens.peek()? {
            Some(Item { role: Role::Infix(op),
                        .. }) if op.precedence() >= min_precedence => *op,
            _ => break,
        };
        tokens.advance()?;

        let right = parse_binary(tokens, op.precedence() + 1)?;
        left = Expr::binary(op, left, right);
    }

    Ok(left)
}
