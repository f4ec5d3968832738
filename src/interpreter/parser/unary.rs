use std::iter::Peekable;

use crate::{
    ast::{Expr, Primary, UnaryOperator},
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect, parse_comma_separated, parse_type, unexpected},
        },
    },
};

/// Parses a prefix operator or a primary expression.
///
/// Prefix operators nest to the right: `- - x` is `-(-(x))`.
///
/// The rule is: `unary := ("-" | "!" | "~") unary | primary`
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let op = match tokens.peek() {
        Some((Token::Minus, _)) => UnaryOperator::Negate,
        Some((Token::Bang, _)) => UnaryOperator::Not,
        Some((Token::Tilde, _)) => UnaryOperator::BitNot,
        _ => return parse_primary(tokens),
    };
    let line = tokens.next().map_or(0, |(_, line)| *line);
    let expr = parse_unary(tokens)?;

    Ok(Expr::Unary { op,
                     expr: Box::new(expr),
                     line })
}

/// Parses a primary expression.
///
/// Primaries are literals, identifiers, calls (`name(args)`), casts
/// (`cast<type>(expr)`) and parenthesized expressions.
///
/// # Errors
/// Returns a `ParseError` if the next token cannot start an expression or a
/// nested construct is malformed.
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some(entry) = tokens.peek().copied() else {
        return Err(unexpected("an expression", None));
    };
    let (token, line) = (&entry.0, entry.1);

    if let Some(value) = literal(token) {
        tokens.next();
        return Ok(Expr::Primary { value, line });
    }

    let value = match token {
        Token::Identifier(name) => {
            tokens.next();
            if let Some((Token::LParen, _)) = tokens.peek() {
                tokens.next();
                let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
                Primary::Call { name: name.clone(),
                                arguments }
            } else {
                Primary::Identifier(name.clone())
            }
        },
        Token::LParen => {
            tokens.next();
            let inner = parse_expression(tokens)?;
            expect(tokens, &Token::RParen, "')'")?;
            Primary::Nested(Box::new(inner))
        },
        Token::Cast => {
            tokens.next();
            parse_cast(tokens)?
        },
        _ => return Err(unexpected("an expression", Some(entry))),
    };

    Ok(Expr::Primary { value, line })
}

fn literal(token: &Token) -> Option<Primary> {
    let value = match token {
        Token::Integer(v) => Primary::Int(*v),
        Token::Float(v) => Primary::Float(*v),
        Token::Bool(v) => Primary::Bool(*v),
        Token::Str(v) => Primary::Str(v.clone()),
        Token::Char(v) => Primary::Char(*v),
        _ => return None,
    };
    Some(value)
}

/// Parses the remainder of `cast<type>(expr)` after the `cast` keyword.
fn parse_cast<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Primary>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::Less, "'<' after 'cast'")?;
    let target = parse_type(tokens, false)?;
    expect(tokens, &Token::Greater, "'>' after cast type")?;
    expect(tokens, &Token::LParen, "'(' before cast operand")?;
    let expr = parse_expression(tokens)?;
    expect(tokens, &Token::RParen, "')' after cast operand")?;

    Ok(Primary::Cast { target,
                       expr: Box::new(expr) })
}
