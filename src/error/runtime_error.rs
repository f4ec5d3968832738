use thiserror::Error;

/// The runtime error-code taxonomy.
///
/// A fault travels in-band inside
/// [`Object::Error`](crate::interpreter::value::core::Object::Error) until the
/// interpreter reaches a statement boundary and raises it as a
/// [`RuntimeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("operator is not supported for this type")]
    UnknownType,
    #[error("operand types do not match")]
    TypeMismatch,
    #[error("division by zero")]
    DivideByZero,
    #[error("cannot negate a non-numeric value")]
    Negate,
    #[error("undefined variable")]
    UndefinedVar,
    #[error("undefined function")]
    UndefinedFunc,
    #[error("missing return value in non-void function")]
    ReturnNull,
    #[error("void function cannot return a value")]
    ReturnNotExpected,
    #[error("wrong number of arguments")]
    ParamCountMismatch,
    #[error("value does not match the declared type")]
    WrongType,
    #[error("returned value does not match the function's return type")]
    WrongReturnType,
    #[error("value cannot be converted to the requested type")]
    ConvertFailed,
    #[error("integer overflow")]
    Overflow,
    #[error("cannot assign to a constant")]
    ConstantAssignment,
    #[error("constant declared without an initializer")]
    ConstantWithoutInitializer,
    #[error("function is already defined")]
    FunctionRedeclared,
    #[error("return outside of a function")]
    ReturnOutsideFunction,
    #[error("'break' outside of a loop or 'remit' outside of a conditional")]
    MisplacedController,
    #[error("failed to write program output")]
    Output,
}

/// The first fault of a run, located in the source.
///
/// Displays as `file:line: message`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{file}:{line}: {fault}")]
pub struct RuntimeError {
    /// Name of the source file.
    pub file:  String,
    /// Line of the node that raised the fault.
    pub line:  usize,
    /// What went wrong.
    pub fault: Fault,
}
