use std::iter::Peekable;

use crate::{
    ast::{AssignOperator, BinaryOperator, Expr, Primary},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Parses an assignment, or falls through to the logical level.
///
/// Assignment is right-associative: `a = b = 1` parses as `a = (b = 1)`. The
/// left side must be a bare identifier; anything else is rejected with
/// `InvalidLValue` at the line of the assignment operator.
///
/// The rule is: `assignment := logical (assign_op assignment)?`
pub fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let target = parse_logical(tokens)?;

    let Some((token, op_line)) = tokens.peek() else {
        return Ok(target);
    };
    let Some(op) = token_to_assign_operator(token) else {
        return Ok(target);
    };
    let op_line = *op_line;

    let line = target.line();
    let Expr::Primary { value: Primary::Identifier(name),
                        .. } = target
    else {
        return Err(ParseError::InvalidLValue { line: op_line });
    };
    tokens.next();

    let value = parse_assignment(tokens)?;
    Ok(Expr::Assignment { target: name,
                          op,
                          value: Box::new(value),
                          line })
}

/// Parses `&&` and `||`, which share one precedence level.
///
/// The rule is: `logical := bitwise (("&&" | "||") bitwise)*`
pub fn parse_logical<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens, &[BinaryOperator::And, BinaryOperator::Or], parse_bitwise)
}

/// Parses `&`, `|` and `^`.
///
/// The rule is: `bitwise := equality (("&" | "|" | "^") equality)*`
pub fn parse_bitwise<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens,
                &[BinaryOperator::BitAnd, BinaryOperator::BitOr, BinaryOperator::BitXor],
                parse_equality)
}

/// The rule is: `equality := comparison (("==" | "!=") comparison)*`
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens, &[BinaryOperator::Equal, BinaryOperator::NotEqual], parse_comparison)
}

/// The rule is: `comparison := shift (("<" | ">" | "<=" | ">=") shift)*`
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens,
                &[BinaryOperator::Less,
                  BinaryOperator::Greater,
                  BinaryOperator::LessEqual,
                  BinaryOperator::GreaterEqual],
                parse_shift)
}

/// The rule is: `shift := additive (("<<" | ">>") additive)*`
pub fn parse_shift<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens,
                &[BinaryOperator::ShiftLeft, BinaryOperator::ShiftRight],
                parse_additive)
}

/// Parses addition and subtraction expressions.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens, &[BinaryOperator::Add, BinaryOperator::Sub], parse_multiplicative)
}

/// Parses multiplication, division and remainder.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "%") unary)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens,
                &[BinaryOperator::Mul, BinaryOperator::Div, BinaryOperator::Mod],
                parse_unary)
}

/// Parses one left-associative precedence level.
///
/// Operands come from `next`, the parser for the level directly above; any
/// operator in `operators` joins the expression so far with the next operand.
/// Each node takes the line of its leftmost operand.
fn parse_level<'a, I>(tokens: &mut Peekable<I>,
                      operators: &[BinaryOperator],
                      next: fn(&mut Peekable<I>) -> ParseResult<Expr>)
                      -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = next(tokens)?;
    loop {
        if let Some((token, _)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && operators.contains(&op)
        {
            tokens.next();
            let right = next(tokens)?;
            let line = left.line();
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `None` for all tokens that are not binary operators.
///
/// # Example
/// ```
/// use yapl::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::ShiftLeft), Some(BinaryOperator::ShiftLeft));
/// assert_eq!(token_to_binary_operator(&Token::Equals), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    let op = match token {
        Token::Plus => BinaryOperator::Add,
        Token::Minus => BinaryOperator::Sub,
        Token::Star => BinaryOperator::Mul,
        Token::Slash => BinaryOperator::Div,
        Token::Percent => BinaryOperator::Mod,
        Token::ShiftLeft => BinaryOperator::ShiftLeft,
        Token::ShiftRight => BinaryOperator::ShiftRight,
        Token::Less => BinaryOperator::Less,
        Token::Greater => BinaryOperator::Greater,
        Token::LessEqual => BinaryOperator::LessEqual,
        Token::GreaterEqual => BinaryOperator::GreaterEqual,
        Token::EqualEqual => BinaryOperator::Equal,
        Token::BangEqual => BinaryOperator::NotEqual,
        Token::Ampersand => BinaryOperator::BitAnd,
        Token::Pipe => BinaryOperator::BitOr,
        Token::Caret => BinaryOperator::BitXor,
        Token::DoubleAmpersand => BinaryOperator::And,
        Token::DoublePipe => BinaryOperator::Or,
        _ => return None,
    };
    Some(op)
}

/// Maps `=` and the compound assignment tokens to their operator.
#[must_use]
pub const fn token_to_assign_operator(token: &Token) -> Option<AssignOperator> {
    let op = match token {
        Token::Equals => AssignOperator::Assign,
        Token::PlusAssign => AssignOperator::Add,
        Token::MinusAssign => AssignOperator::Sub,
        Token::MulAssign => AssignOperator::Mul,
        Token::DivAssign => AssignOperator::Div,
        Token::ModAssign => AssignOperator::Mod,
        _ => return None,
    };
    Some(op)
}
