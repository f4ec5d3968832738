use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    /// Floating-point literal tokens, such as `3.14` or `2.0e-3`.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    Float(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Boolean literal tokens, such as `true`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// String literal tokens, such as `"hello\n"`.
    #[regex(r#""([^"\\\n]|\\.)*""#, parse_string)]
    Str(String),
    /// Character literal tokens, such as `'a'` or `'\n'`.
    #[regex(r"'([^'\\\n]|\\.)'", parse_char)]
    Char(char),
    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    /// `if`
    #[token("if")]
    If,
    /// `elif`
    #[token("elif")]
    Elif,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `for`
    #[token("for")]
    For,
    /// `return`
    #[token("return")]
    Return,
    /// `break`
    #[token("break")]
    Break,
    /// `remit`
    #[token("remit")]
    Remit,
    /// `print`
    #[token("print")]
    Print,
    /// `func`
    #[token("func")]
    Func,
    /// `cast`
    #[token("cast")]
    Cast,
    /// `constant`
    #[token("constant")]
    Constant,

    /// `int`
    #[token("int")]
    IntType,
    /// `float`
    #[token("float")]
    FloatType,
    /// `bool` or `boolean`
    #[token("bool")]
    #[token("boolean")]
    BoolType,
    /// `string`
    #[token("string")]
    StringType,
    /// `char`
    #[token("char")]
    CharType,
    /// `void`
    #[token("void")]
    VoidType,

    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip)]
    Comment,
    /// ```text
    /// /* Multi line comments. */
    /// ```
    #[regex(r"/\*([^*]|\*[^/])*\*/", |lex| {
        let comment      = lex.slice();
        let newlines     = comment.chars().filter(|&c| c == '\n').count();
        lex.extras.line += newlines;
        logos::Skip
    })]
    MultiLineComment,
    /// Line breaks only advance the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,

    /// `+=`
    #[token("+=")]
    PlusAssign,
    /// `-=`
    #[token("-=")]
    MinusAssign,
    /// `*=`
    #[token("*=")]
    MulAssign,
    /// `/=`
    #[token("/=")]
    DivAssign,
    /// `%=`
    #[token("%=")]
    ModAssign,
    /// `->`
    #[token("->")]
    Arrow,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `&&`
    #[token("&&")]
    DoubleAmpersand,
    /// `||`
    #[token("||")]
    DoublePipe,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `|`
    #[token("|")]
    Pipe,
    /// `^`
    #[token("^")]
    Caret,
    /// `<<`
    #[token("<<")]
    ShiftLeft,
    /// `>>`
    #[token(">>")]
    ShiftRight,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `!`
    #[token("!")]
    Bang,
    /// `~`
    #[token("~")]
    Tilde,
    /// `=`
    #[token("=")]
    Equals,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`
    #[token(";")]
    Semicolon,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
/// Automatically increments as newlines are processed.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line: 1 }
    }
}

/// Converts source text into `(Token, line)` pairs.
///
/// Lexing stops at the first character sequence that does not form a token.
///
/// # Errors
/// Returns [`ParseError::UnexpectedCharacter`] naming the offending slice and
/// its line.
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras::default());

    while let Some(token) = lexer.next() {
        match token {
            Ok(tok) => tokens.push((tok, lexer.extras.line)),
            Err(()) => {
                return Err(ParseError::UnexpectedCharacter { slice: lexer.slice().to_string(),
                                                             line:  lexer.extras.line, });
            },
        }
    }

    Ok(tokens)
}

/// Parses a floating-point literal from the current token slice.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice.
///
/// Literals that do not fit in an `i64` are rejected as lexical errors.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Strips the quotes of a string literal and resolves its escapes.
fn parse_string(lex: &logos::Lexer<Token>) -> Option<String> {
    let slice = lex.slice();
    unescape(&slice[1..slice.len() - 1])
}

/// Strips the quotes of a character literal and resolves its escape.
fn parse_char(lex: &logos::Lexer<Token>) -> Option<char> {
    let slice = lex.slice();
    let unescaped = unescape(&slice[1..slice.len() - 1])?;
    let mut chars = unescaped.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Resolves `\n`, `\t`, `\r`, `\0`, `\\`, `\'` and `\"`.
///
/// Returns `None` for any other escape sequence.
fn unescape(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = match chars.next()? {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            '\\' => '\\',
            '\'' => '\'',
            '"' => '"',
            _ => return None,
        };
        out.push(escaped);
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn declaration_tokens() {
        assert_eq!(kinds("x: constant int = 5;"),
                   vec![Token::Identifier("x".to_string()),
                        Token::Colon,
                        Token::Constant,
                        Token::IntType,
                        Token::Equals,
                        Token::Integer(5),
                        Token::Semicolon]);
    }

    #[test]
    fn keywords_win_over_identifiers() {
        assert_eq!(kinds("elif elifx boolean"),
                   vec![Token::Elif, Token::Identifier("elifx".to_string()), Token::BoolType]);
    }

    #[test]
    fn longest_operator_matches() {
        assert_eq!(kinds("<< <= < && & -> -="),
                   vec![Token::ShiftLeft,
                        Token::LessEqual,
                        Token::Less,
                        Token::DoubleAmpersand,
                        Token::Ampersand,
                        Token::Arrow,
                        Token::MinusAssign]);
    }

    #[test]
    fn literals_are_decoded() {
        assert_eq!(kinds(r#"3.5 "a\tb" '\n' 'z'"#),
                   vec![Token::Float(3.5),
                        Token::Str("a\tb".to_string()),
                        Token::Char('\n'),
                        Token::Char('z')]);
    }

    #[test]
    fn lines_advance_through_comments() {
        let tokens = tokenize("a\n// note\n/* one\ntwo */ b").unwrap();
        assert_eq!(tokens,
                   vec![(Token::Identifier("a".to_string()), 1),
                        (Token::Identifier("b".to_string()), 4)]);
    }

    #[test]
    fn line_comment_stops_at_newline() {
        assert_eq!(kinds("print 1; // trailing\nprint '\\'';"),
                   vec![Token::Print,
                        Token::Integer(1),
                        Token::Semicolon,
                        Token::Print,
                        Token::Char('\''),
                        Token::Semicolon]);
    }

    #[test]
    fn unknown_character_is_reported() {
        let err = tokenize("x: int = 1;\n$").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedCharacter { line: 2, .. }));
    }
}
