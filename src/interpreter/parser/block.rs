use std::iter::Peekable;

use crate::{
    ast::Scope,
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            statement::parse_declaration,
            utils::{eat, expect, unexpected},
        },
    },
};

/// Parses a block delimited by braces.
///
/// Grammar: `scope := "{" declaration* "}"`
///
/// The resulting scope carries the line of its opening brace.
///
/// # Errors
/// Returns a `ParseError` if the opening brace is missing, a nested
/// declaration fails, or the input ends before the closing brace.
pub fn parse_scope<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Scope>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::LBrace, "'{'")?;
    let mut declarations = Vec::new();

    loop {
        if eat(tokens, &Token::RBrace) {
            break;
        }
        if tokens.peek().is_none() {
            return Err(unexpected("'}'", None));
        }
        declarations.push(parse_declaration(tokens)?);
    }

    Ok(Scope { declarations, line })
}
