/// Parser entry points.
///
/// Holds the `ParseResult` alias, the translation-unit driver with its
/// error recovery, and the expression entry point.
pub mod core;

/// Prefix operators and primary expressions.
///
/// Parses `-`, `!` and `~`, literals, identifiers, calls, casts and
/// parenthesized expressions.
pub mod unary;

/// Binary operators and assignment.
///
/// Implements one function per precedence level, from assignment down to
/// multiplication.
pub mod binary;

/// Braced blocks.
pub mod block;

/// Token-matching helpers shared by the other parser modules.
pub mod utils;

/// Declarations and statements.
///
/// Parses variable and function declarations, `print`, conditional chains,
/// loops, `return`, `break`, `remit` and expression statements.
pub mod statement;
