use std::io::Write;

use tracing::debug;

use crate::{
    ast::{Expr, Primary, TranslationUnit, ValueType},
    error::{Fault, RuntimeError},
    interpreter::{
        evaluator::environment::{Environment, ScopeKind},
        value::{
            core::Object,
            operators::{binary, unary},
        },
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or the
/// `RuntimeError` that ends the run.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How a statement finished.
///
/// Anything but `Normal` unwinds enclosing blocks until the construct that
/// handles it: loops take `Break`, conditionals take `Remit`, calls take
/// `Return`.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Continue with the next statement.
    Normal,
    /// Leave the innermost loop.
    Break,
    /// Leave the innermost conditional body.
    Remit,
    /// Leave the current function with a value.
    Return(Object),
}

/// Walks a translation unit and executes it.
///
/// The interpreter owns the scope chain and writes `print` output to `out`.
/// Evaluation stops at the first fault.
pub struct Interpreter<W: Write> {
    pub(crate) file:         String,
    pub(crate) environment:  Environment,
    /// Declared return types of the active calls, innermost last.
    pub(crate) return_types: Vec<ValueType>,
    pub(crate) out:          W,
}

impl<W: Write> Interpreter<W> {
    /// Creates an interpreter with an empty global scope that prints to
    /// `out`.
    pub fn new(out: W) -> Self {
        Self { file: String::new(),
               environment: Environment::new(),
               return_types: Vec::new(),
               out }
    }

    /// Executes every top-level declaration in order.
    ///
    /// State persists across calls, so several units can be run against the
    /// same globals.
    ///
    /// # Errors
    /// Returns the first fault raised, located at the node that raised it.
    pub fn interpret(&mut self, unit: &TranslationUnit) -> EvalResult<()> {
        self.file.clone_from(&unit.file);
        for declaration in &unit.declarations {
            self.execute(declaration)?;
        }
        Ok(())
    }

    /// Read access to the scope chain.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Builds the located error for `fault`.
    pub(crate) fn raise(&self, fault: Fault, line: usize) -> RuntimeError {
        debug!(file = %self.file, line, %fault, "runtime fault");
        RuntimeError { file: self.file.clone(),
                       line,
                       fault }
    }

    /// Runs `body` inside a fresh scope of `kind`.
    ///
    /// The scope is popped whether `body` succeeds or fails.
    pub(crate) fn scoped<T>(&mut self,
                            kind: ScopeKind,
                            body: impl FnOnce(&mut Self) -> EvalResult<T>)
                            -> EvalResult<T> {
        self.environment.push(kind);
        let result = body(self);
        self.environment.pop();
        result
    }

    /// Evaluates an expression and raises any fault it produced.
    ///
    /// This is the consumption point for in-band errors: the fault is
    /// reported at the line of `expr`.
    pub(crate) fn evaluate_checked(&mut self, expr: &Expr) -> EvalResult<Object> {
        let object = self.evaluate(expr)?;
        object.into_result().map_err(|fault| self.raise(fault, expr.line()))
    }

    /// Evaluates an expression.
    ///
    /// Operator faults come back in-band as `Object::Error`; only faults
    /// raised while running a called function's body are returned as `Err`.
    ///
    /// Both operands of a binary operator are always evaluated, left first,
    /// before the operator is applied.
    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult<Object> {
        match expr {
            Expr::Primary { value, line } => self.evaluate_primary(value, *line),
            Expr::Unary { op, expr, .. } => {
                let operand = self.evaluate(expr)?;
                Ok(unary(*op, &operand))
            },
            Expr::Binary { left, op, right, .. } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                Ok(binary(*op, &left, &right))
            },
            Expr::Assignment { target,
                               op,
                               value,
                               .. } => self.assign(target, *op, value),
        }
    }

    fn evaluate_primary(&mut self, primary: &Primary, line: usize) -> EvalResult<Object> {
        match primary {
            Primary::Int(v) => Ok(Object::Int(*v)),
            Primary::Float(v) => Ok(Object::Float(*v)),
            Primary::Bool(v) => Ok(Object::Bool(*v)),
            Primary::Str(v) => Ok(Object::Str(v.clone())),
            Primary::Char(v) => Ok(Object::Char(*v)),
            Primary::Identifier(name) => Ok(self.environment.get(name)),
            Primary::Nested(expr) => self.evaluate(expr),
            Primary::Call { name, arguments } => self.call(name, arguments, line),
            Primary::Cast { target, expr } => Ok(self.evaluate(expr)?.convert(*target)),
        }
    }
}
