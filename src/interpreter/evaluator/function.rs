use std::{io::Write, rc::Rc};

use tracing::trace;

use crate::{
    ast::{Expr, FuncDeclaration, Specifiers, ValueType},
    error::Fault,
    interpreter::{
        evaluator::{
            core::{EvalResult, Flow, Interpreter},
            environment::{Binding, ScopeKind},
        },
        value::core::Object,
    },
};

impl<W: Write> Interpreter<W> {
    /// Registers a function in the current scope.
    ///
    /// A name already declared as a function anywhere along the scope chain
    /// cannot be declared again.
    pub(crate) fn declare_function(&mut self, func: &FuncDeclaration) -> EvalResult<()> {
        if self.environment.is_function_defined(&func.name) {
            return Err(self.raise(Fault::FunctionRedeclared, func.line));
        }
        self.environment.define_function(Rc::new(func.clone()));
        Ok(())
    }

    /// Calls a user-defined function.
    ///
    /// The argument count is checked before any argument is evaluated.
    /// Arguments are then evaluated left to right in the caller's scope and
    /// checked against their parameter types. The body runs in a `Function`
    /// scope pushed on top of the caller's chain. A body that finishes
    /// without `return` yields `void`.
    ///
    /// Resolution, arity and argument faults are returned in-band; faults
    /// inside the body are raised where they happen.
    pub(crate) fn call(&mut self,
                       name: &str,
                       arguments: &[Expr],
                       line: usize)
                       -> EvalResult<Object> {
        let function = match self.environment.get_function(name) {
            Ok(function) => function,
            Err(fault) => return Ok(fault.into()),
        };
        if function.params.len() != arguments.len() {
            return Ok(Fault::ParamCountMismatch.into());
        }

        let mut values = Vec::with_capacity(arguments.len());
        for (param, argument) in function.params.iter().zip(arguments) {
            let value = self.evaluate(argument)?;
            if value.found_errors() {
                return Ok(value);
            }
            if value.value_type() != Some(param.ty) {
                return Ok(Fault::WrongType.into());
            }
            values.push(value);
        }

        trace!(function = name, depth = self.return_types.len() + 1, "call");
        self.return_types.push(function.return_type);
        let flow = self.scoped(ScopeKind::Function, |this| {
                           for (param, object) in function.params.iter().zip(values) {
                               let mutable = !param.specifiers.contains(Specifiers::CONSTANT);
                               this.environment.define(&param.name,
                                                       Binding { object,
                                                                 ty: param.ty,
                                                                 mutable });
                           }
                           this.execute_all(&function.body.declarations)
                       });
        self.return_types.pop();

        match flow? {
            Flow::Return(object) => Ok(object),
            Flow::Normal => Ok(Object::Void),
            Flow::Break | Flow::Remit => Err(self.raise(Fault::MisplacedController, line)),
        }
    }

    /// Executes `return`, checking the value against the active call's
    /// declared return type.
    pub(crate) fn execute_return(&mut self, expr: Option<&Expr>, line: usize) -> EvalResult<Flow> {
        let Some(&expected) = self.return_types.last() else {
            return Err(self.raise(Fault::ReturnOutsideFunction, line));
        };

        let Some(expr) = expr else {
            if expected != ValueType::Void {
                return Err(self.raise(Fault::ReturnNull, line));
            }
            return Ok(Flow::Return(Object::Void));
        };

        if expected == ValueType::Void {
            return Err(self.raise(Fault::ReturnNotExpected, line));
        }
        let object = self.evaluate_checked(expr)?;
        if object.value_type() != Some(expected) {
            return Err(self.raise(Fault::WrongReturnType, line));
        }
        Ok(Flow::Return(object))
    }
}
