use std::iter::Peekable;

use tracing::debug;

use crate::{
    ast::{Expr, TranslationUnit},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{binary::parse_assignment, statement::parse_declaration},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// The result of parsing a whole file.
///
/// `unit` holds every declaration that parsed cleanly; each declaration that
/// failed contributed exactly one entry to `errors` and is absent from `unit`.
#[derive(Debug)]
pub struct ParseOutput {
    /// The successfully parsed declarations.
    pub unit:   TranslationUnit,
    /// One error per malformed top-level declaration, in source order.
    pub errors: Vec<ParseError>,
}

/// Parses a token stream into a translation unit.
///
/// Top-level declarations are parsed one after another. When one fails, its
/// error is recorded, [`synchronize`] skips past the next `;`, and parsing
/// resumes, so a single run reports every malformed declaration.
///
/// # Parameters
/// - `tokens`: `(Token, line)` pairs as produced by the lexer.
/// - `file`: Source file name recorded on the unit for diagnostics.
pub fn parse(tokens: &[(Token, usize)], file: &str) -> ParseOutput {
    let end_line = tokens.last().map_or(1, |(_, line)| *line);
    let mut iter = tokens.iter().peekable();
    let mut declarations = Vec::new();
    let mut errors = Vec::new();

    while iter.peek().is_some() {
        match parse_declaration(&mut iter) {
            Ok(declaration) => declarations.push(declaration),
            Err(err) => {
                let err = locate_end_of_input(err, end_line);
                debug!(line = err.line(), error = %err, "syntax error, synchronizing");
                errors.push(err);
                synchronize(&mut iter);
            },
        }
    }

    ParseOutput { unit: TranslationUnit { file: file.to_string(),
                                          declarations },
                  errors }
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, assignment, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := assignment`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_assignment(tokens)
}

/// Discards tokens up to and including the next `;`, or to end of input.
pub fn synchronize<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, usize)>
{
    for (token, _) in tokens.by_ref() {
        if *token == Token::Semicolon {
            break;
        }
    }
}

/// End-of-input errors are raised without a line; pin them to the last line
/// of the file.
fn locate_end_of_input(err: ParseError, end_line: usize) -> ParseError {
    match err {
        ParseError::UnexpectedEndOfInput { expected, .. } => {
            ParseError::UnexpectedEndOfInput { expected,
                                               line: end_line }
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn parse_source(source: &str) -> ParseOutput {
        parse(&tokenize(source).unwrap(), "test.yapl")
    }

    fn expr(source: &str) -> String {
        let tokens = tokenize(source).unwrap();
        let mut iter = tokens.iter().peekable();
        parse_expression(&mut iter).unwrap().to_string()
    }

    #[test]
    fn precedence_climbing() {
        assert_eq!(expr("1 + 2 * 3"), "(+ 1 (* 2 3))");
        assert_eq!(expr("1 - 2 - 3"), "(- (- 1 2) 3)");
        assert_eq!(expr("a < b == c > d"), "(== (< a b) (> c d))");
        assert_eq!(expr("1 << 2 + 3"), "(<< 1 (+ 2 3))");
        assert_eq!(expr("a == b & c"), "(& (== a b) c)");
        assert_eq!(expr("a & b || c"), "(|| (& a b) c)");
        assert_eq!(expr("a < b << c"), "(< a (<< b c))");
    }

    #[test]
    fn unary_and_assignment_are_right_recursive() {
        assert_eq!(expr("- - x"), "(- (- x))");
        assert_eq!(expr("!~x"), "(! (~ x))");
        assert_eq!(expr("a = b += 3"), "(= a (+= b 3))");
    }

    #[test]
    fn primaries() {
        assert_eq!(expr("f(1, x + 1)"), "(call f 1 (+ x 1))");
        assert_eq!(expr("g()"), "(call g)");
        assert_eq!(expr("(1 + 2) * 3"), "(* (group (+ 1 2)) 3)");
        assert_eq!(expr("cast<float>(x)"), "(cast float x)");
        assert_eq!(expr("2.5"), "2.5");
    }

    #[test]
    fn invalid_lvalue_is_rejected() {
        let out = parse_source("1 = 2;\n(x) = 3;");
        assert_eq!(out.errors,
                   vec![ParseError::InvalidLValue { line: 1 },
                        ParseError::InvalidLValue { line: 2 }]);
        assert!(out.unit.declarations.is_empty());
    }

    #[test]
    fn recovery_keeps_valid_declarations() {
        let out = parse_source("x: int = 1;\ny: int = ;\nprint x;");
        assert_eq!(out.errors.len(), 1);
        assert_eq!(out.errors[0].line(), 2);
        assert_eq!(out.unit.declarations.len(), 2);
    }

    #[test]
    fn every_malformed_declaration_is_reported() {
        let out = parse_source("a: int = +;\nb: = 2;\nc: int = 3;\nprint );");
        assert_eq!(out.errors.iter().map(ParseError::line).collect::<Vec<_>>(), vec![1, 2, 4]);
        assert_eq!(out.unit.declarations.len(), 1);
    }

    #[test]
    fn end_of_input_is_located() {
        let out = parse_source("x: int = 1;\nprint x");
        assert!(matches!(out.errors.as_slice(),
                         [ParseError::UnexpectedEndOfInput { line: 2, .. }]));
    }
}
