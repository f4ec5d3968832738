/// Core evaluation logic and interpreter state.
///
/// Contains the [`Interpreter`](core::Interpreter), the control-flow signal
/// returned by statements, expression evaluation and the conversion of
/// in-band faults into located runtime errors.
pub mod core;

/// The runtime scope chain.
///
/// Stores variable bindings and functions in a stack of scopes, each tagged
/// with the construct that opened it.
pub mod environment;

/// Statement execution.
///
/// Runs declarations, blocks, conditional chains, loops, `print` and the
/// `break` / `remit` controllers.
pub mod statement;

/// Function declaration, calls and `return`.
pub mod function;

/// Simple and compound assignment.
pub mod assignment;
