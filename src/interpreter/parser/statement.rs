use std::iter::Peekable;

use crate::{
    ast::{
        BranchKind, ConditionalStatement, ControllerKind, Declaration, Expr, ForLoop,
        FuncDeclaration, Scope, Specifiers, ValueType, VarDeclaration,
    },
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_scope,
            core::{ParseResult, parse_expression},
            utils::{eat, expect, parse_comma_separated, parse_identifier, parse_type, unexpected},
        },
    },
};

/// Parses a single declaration or statement.
///
/// A leading `identifier ':'` introduces a variable or function declaration;
/// a keyword introduces the matching statement; anything else is parsed as an
/// expression statement terminated by `;`.
///
/// # Errors
/// Returns the first `ParseError` met. `elif` and `else` are rejected here
/// with `DanglingBranch`, since a well-formed chain consumes them together
/// with its `if`.
pub fn parse_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Declaration>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some(entry) = tokens.peek().copied() else {
        return Err(unexpected("a declaration", None));
    };
    let line = entry.1;

    match &entry.0 {
        Token::Identifier(_) if is_declaration_start(tokens) => parse_named_declaration(tokens),
        Token::Print => parse_print(tokens),
        Token::If => parse_conditional(tokens).map(Declaration::Conditional),
        Token::Elif => Err(ParseError::DanglingBranch { keyword: "elif",
                                                        line }),
        Token::Else => Err(ParseError::DanglingBranch { keyword: "else",
                                                        line }),
        Token::While => parse_while(tokens),
        Token::For => parse_for(tokens).map(Declaration::For),
        Token::Return => parse_return(tokens),
        Token::Break => parse_controller(tokens, ControllerKind::Break),
        Token::Remit => parse_controller(tokens, ControllerKind::Remit),
        Token::LBrace => parse_scope(tokens).map(Declaration::Scope),
        _ => {
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::Semicolon, "';' after expression")?;
            Ok(Declaration::Expression { expr, line })
        },
    }
}

/// Looks past the identifier for the `:` that marks a declaration.
fn is_declaration_start<'a, I>(tokens: &Peekable<I>) -> bool
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut lookahead = tokens.clone();
    lookahead.next();
    matches!(lookahead.peek(), Some((Token::Colon, _)))
}

/// Parses `name ':' ...` as either a function or a variable declaration.
fn parse_named_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Declaration>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, line) = parse_identifier(tokens)?;
    expect(tokens, &Token::Colon, "':'")?;

    if eat(tokens, &Token::Func) {
        return parse_function(tokens, name, line).map(Declaration::Func);
    }
    parse_variable_rest(tokens, name, line).map(Declaration::Var)
}

/// Parses a complete variable declaration, `;` included.
///
/// Grammar: `var_declaration := identifier ":" "constant"? type ("=" expression)? ";"`
pub fn parse_var_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<VarDeclaration>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, line) = parse_identifier(tokens)?;
    expect(tokens, &Token::Colon, "':'")?;
    parse_variable_rest(tokens, name, line)
}

/// Parses what follows `name ':'` in a variable declaration.
fn parse_variable_rest<'a, I>(tokens: &mut Peekable<I>,
                              name: String,
                              line: usize)
                              -> ParseResult<VarDeclaration>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (specifiers, ty) = parse_type_specifier(tokens)?;

    let initializer = if eat(tokens, &Token::Equals) {
        Some(parse_expression(tokens)?)
    } else {
        None
    };
    expect(tokens, &Token::Semicolon, "';' after declaration")?;

    Ok(VarDeclaration { name,
                        ty,
                        specifiers,
                        initializer,
                        line })
}

/// Parses `"constant"? type`.
fn parse_type_specifier<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<(Specifiers, ValueType)>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut specifiers = Specifiers::empty();
    if eat(tokens, &Token::Constant) {
        specifiers |= Specifiers::CONSTANT;
    }
    let ty = parse_type(tokens, false)?;
    Ok((specifiers, ty))
}

/// Parses a function declaration after `name ':' 'func'`.
///
/// Grammar:
/// ```text
/// function := "(" (param ("," param)*)? ")" ("->" type)? scope
/// param    := identifier ":" "constant"? type
/// ```
/// A missing return type means `void`.
fn parse_function<'a, I>(tokens: &mut Peekable<I>,
                         name: String,
                         line: usize)
                         -> ParseResult<FuncDeclaration>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LParen, "'(' after 'func'")?;
    let params = parse_comma_separated(tokens, parse_parameter, &Token::RParen)?;

    let return_type = if eat(tokens, &Token::Arrow) {
        parse_type(tokens, true)?
    } else {
        ValueType::Void
    };
    let body = parse_scope(tokens)?;

    Ok(FuncDeclaration { name,
                         return_type,
                         params,
                         body,
                         line })
}

fn parse_parameter<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<VarDeclaration>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, line) = parse_identifier(tokens)?;
    expect(tokens, &Token::Colon, "':' after parameter name")?;
    let (specifiers, ty) = parse_type_specifier(tokens)?;

    Ok(VarDeclaration { name,
                        ty,
                        specifiers,
                        initializer: None,
                        line })
}

/// Parses `print expr ("," expr)* ";"`.
fn parse_print<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Declaration>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Print, "'print'")?;
    let mut expressions = vec![parse_expression(tokens)?];
    while eat(tokens, &Token::Comma) {
        expressions.push(parse_expression(tokens)?);
    }
    expect(tokens, &Token::Semicolon, "';' after print")?;

    Ok(Declaration::Print { expressions, line })
}

/// Parses an `if` chain with any number of `elif` branches and an optional
/// trailing `else`.
///
/// Syntax:
/// ```text
///     if <condition> { ... }
///     elif <condition> { ... }
///     else { ... }
/// ```
/// The result is the `if` node; each following branch hangs off the `next`
/// link of the one before it, in source order.
fn parse_conditional<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ConditionalStatement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::If, "'if'")?;
    let condition = parse_expression(tokens)?;
    let body = parse_scope(tokens)?;

    let mut branches: Vec<(BranchKind, Option<Expr>, Scope, usize)> = Vec::new();
    loop {
        match tokens.peek() {
            Some((Token::Elif, branch_line)) => {
                let branch_line = *branch_line;
                tokens.next();
                let condition = parse_expression(tokens)?;
                let body = parse_scope(tokens)?;
                branches.push((BranchKind::Elif, Some(condition), body, branch_line));
            },
            Some((Token::Else, branch_line)) => {
                let branch_line = *branch_line;
                tokens.next();
                let body = parse_scope(tokens)?;
                branches.push((BranchKind::Else, None, body, branch_line));
                break;
            },
            _ => break,
        }
    }

    let next = branches.into_iter().rev().fold(None, |next, (kind, condition, body, line)| {
                                                  Some(Box::new(ConditionalStatement { kind,
                                                                                       condition,
                                                                                       body,
                                                                                       next,
                                                                                       line }))
                                              });

    Ok(ConditionalStatement { kind: BranchKind::If,
                              condition: Some(condition),
                              body,
                              next,
                              line })
}

/// Parses `while <condition> { ... }`.
fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Declaration>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::While, "'while'")?;
    let condition = parse_expression(tokens)?;
    let body = parse_scope(tokens)?;

    Ok(Declaration::While { condition,
                            body,
                            line })
}

/// Parses `for <var_declaration> <condition> ";" <step> { ... }`.
///
/// The declaration carries its own `;`, so a typical loop reads
/// `for i: int = 0; i < n; i += 1 { ... }`.
fn parse_for<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ForLoop>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::For, "'for'")?;
    let initializer = parse_var_declaration(tokens)?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::Semicolon, "';' after loop condition")?;
    let step = parse_expression(tokens)?;
    let body = parse_scope(tokens)?;

    Ok(ForLoop { initializer,
                 condition,
                 step,
                 body,
                 line })
}

/// Parses `return expr? ";"`.
fn parse_return<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Declaration>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Return, "'return'")?;
    let expr = if matches!(tokens.peek(), Some((Token::Semicolon, _))) {
        None
    } else {
        Some(parse_expression(tokens)?)
    };
    expect(tokens, &Token::Semicolon, "';' after return")?;

    Ok(Declaration::Return { expr, line })
}

fn parse_controller<'a, I>(tokens: &mut Peekable<I>,
                           kind: ControllerKind)
                           -> ParseResult<Declaration>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = tokens.next().map_or(0, |(_, line)| *line);
    expect(tokens, &Token::Semicolon, "';'")?;
    Ok(Declaration::Controller { kind, line })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interpreter::{lexer::tokenize, parser::core::parse};

    fn declarations(source: &str) -> Vec<Declaration> {
        let out = parse(&tokenize(source).unwrap(), "test.yapl");
        assert_eq!(out.errors, vec![]);
        out.unit.declarations
    }

    fn render(source: &str) -> Vec<String> {
        declarations(source).iter().map(ToString::to_string).collect()
    }

    #[test]
    fn variable_declarations() {
        assert_eq!(render("x: int = 1 + 2;\ny: constant float = 2.5;\nz: string;"),
                   vec!["(var x int (+ 1 2))", "(var y constant float 2.5)", "(var z string)"]);

        let Declaration::Var(var) = &declarations("c: constant bool = true;")[0] else {
            panic!("expected a variable declaration");
        };
        assert!(var.specifiers.contains(Specifiers::CONSTANT));
        assert_eq!(var.ty, ValueType::Bool);
    }

    #[test]
    fn function_declaration() {
        let decls = declarations("add: func(a: int, b: int) -> int {\n  return a + b;\n}");
        let Declaration::Func(func) = &decls[0] else {
            panic!("expected a function declaration");
        };
        assert_eq!(func.name, "add");
        assert_eq!(func.return_type, ValueType::Int);
        assert_eq!(func.params.len(), 2);
        assert_eq!(func.body.declarations[0].line(), 2);

        assert_eq!(render("f: func() { print 1; }"), vec!["(func f () void (block (print 1)))"]);
    }

    #[test]
    fn conditional_chain_links_in_order() {
        assert_eq!(render("if a { print 1; } elif b { print 2; } elif c { } else { print 3; }"),
                   vec!["(if a (block (print 1))) (elif b (block (print 2))) (elif c (block)) \
                         (else (block (print 3)))"]);

        let Declaration::Conditional(chain) = &declarations("if a {}\nelif b {}\nelse {}")[0]
        else {
            panic!("expected a conditional");
        };
        let elif = chain.next.as_deref().unwrap();
        let other = elif.next.as_deref().unwrap();
        assert_eq!((chain.kind, elif.kind, other.kind),
                   (BranchKind::If, BranchKind::Elif, BranchKind::Else));
        assert_eq!((elif.line, other.line), (2, 3));
        assert!(other.condition.is_none() && other.next.is_none());
    }

    #[test]
    fn dangling_branches_are_errors() {
        let out = parse(&tokenize("elif x { }\nelse { }").unwrap(), "t");
        assert_eq!(out.errors[0], ParseError::DanglingBranch { keyword: "elif", line: 1 });
    }

    #[test]
    fn loops_and_controllers() {
        assert_eq!(render("while i < 3 { i += 1; break; }"),
                   vec!["(while (< i 3) (block (+= i 1) (break)))"]);
        assert_eq!(render("for i: int = 0; i < 3; i += 1 { remit; }"),
                   vec!["(for (var i int 0) (< i 3) (+= i 1) (block (remit)))"]);
    }

    #[test]
    fn print_and_return() {
        assert_eq!(render("print 1, \"a\", x;\nf: func() { return; }"),
                   vec!["(print 1 \"a\" x)", "(func f () void (block (return)))"]);
    }

    #[test]
    fn nested_scope_lines() {
        let decls = declarations("{\n  x: int = 1;\n  { print x; }\n}");
        let Declaration::Scope(scope) = &decls[0] else {
            panic!("expected a scope");
        };
        assert_eq!(scope.line, 1);
        assert_eq!(scope.declarations[1].line(), 3);
    }
}
