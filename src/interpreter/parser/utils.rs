use std::iter::Peekable;

use crate::{
    ast::ValueType,
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// Builds the error for a token that did not match `expected`.
///
/// A `None` token means the stream ran out.
pub(in crate::interpreter::parser) fn unexpected(expected: &str,
                                                 found: Option<&(Token, usize)>)
                                                 -> ParseError {
    match found {
        Some((tok, line)) => ParseError::UnexpectedToken { expected: expected.to_string(),
                                                           found:    format!("{tok:?}"),
                                                           line:     *line, },
        None => ParseError::UnexpectedEndOfInput { expected: expected.to_string(),
                                                   line:     0, },
    }
}

/// Consumes the next token if it equals `expected` and returns its line.
///
/// The token is left in place on mismatch, so recovery can see it.
///
/// # Errors
/// `UnexpectedToken` or `UnexpectedEndOfInput` described by `what`.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token,
                                                    what: &str)
                                                    -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.peek() {
        Some((tok, line)) if tok == expected => {
            let line = *line;
            tokens.next();
            Ok(line)
        },
        found => Err(unexpected(what, found.copied())),
    }
}

/// Consumes the next token if it equals `expected`.
pub(in crate::interpreter::parser) fn eat<'a, I>(tokens: &mut Peekable<I>, expected: &Token) -> bool
    where I: Iterator<Item = &'a (Token, usize)>
{
    if tokens.peek().is_some_and(|(tok, _)| tok == expected) {
        tokens.next();
        return true;
    }
    false
}

/// Parses a plain identifier and returns its name with its line.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<(String, usize)>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.peek() {
        Some((Token::Identifier(name), line)) => {
            let parsed = (name.clone(), *line);
            tokens.next();
            Ok(parsed)
        },
        found => Err(unexpected("identifier", found.copied())),
    }
}

/// Parses a type keyword.
///
/// `void` is only accepted when `allow_void` is set, which is the case for
/// function return types.
pub(in crate::interpreter::parser) fn parse_type<'a, I>(tokens: &mut Peekable<I>,
                                                        allow_void: bool)
                                                        -> ParseResult<ValueType>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let ty = match tokens.peek() {
        Some((Token::IntType, _)) => ValueType::Int,
        Some((Token::FloatType, _)) => ValueType::Float,
        Some((Token::BoolType, _)) => ValueType::Bool,
        Some((Token::StringType, _)) => ValueType::Str,
        Some((Token::CharType, _)) => ValueType::Char,
        Some((Token::VoidType, _)) if allow_void => ValueType::Void,
        found => return Err(unexpected("a type", found.copied())),
    };
    tokens.next();
    Ok(ty)
}

/// Parses a comma-separated list of items until a closing token.
///
/// An immediately encountered closing token produces an empty list. The
/// closing token is consumed.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    if eat(tokens, closing) {
        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            Some((tok, _)) if tok == closing => {
                tokens.next();
                break;
            },
            found => return Err(unexpected(&format!("',' or {closing:?}"), found.copied())),
        }
    }
    Ok(items)
}
