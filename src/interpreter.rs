/// The evaluator module executes the syntax tree.
///
/// The evaluator walks declarations and expressions, manages the scope chain,
/// binds function arguments, and turns in-band faults into located runtime
/// errors. It is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Executes statements and evaluates expressions against the environment.
/// - Enforces declared types, constants and return types at runtime.
/// - Reports the first runtime fault with its source line.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces `(Token, line)` pairs for
/// keywords, type names, literals, identifiers and operators, skipping
/// whitespace and comments. This is the first stage of interpretation.
pub mod lexer;
/// The parser module builds the syntax tree from tokens.
///
/// The parser is a recursive-descent parser with one function per precedence
/// level. A malformed declaration is reported and skipped up to the next `;`,
/// so one pass collects every syntax error.
///
/// # Responsibilities
/// - Converts tokens into declarations and expressions.
/// - Validates the grammar, reporting errors with line information.
/// - Recovers after errors and keeps parsing.
pub mod parser;
/// The value module defines the runtime objects and their operators.
pub mod value;
